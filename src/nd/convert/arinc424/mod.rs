// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ingests raw ARINC 424 data into a [`NavigationData`] snapshot.
//!
//! `arinc424` only models five record kinds (airport, runway, waypoint,
//! controlled airspace, restrictive airspace); navaids, airways, SIDs and
//! STARs have no ARINC 424 record type in this crate and must be populated
//! through [`NavigationDataBuilder`] directly, e.g. by an application layer
//! translating some other source format.

mod airspace;
mod fields;
mod records;

use airspace::AirspaceBuilder;

use crate::error::Error;
use crate::nd::{NavigationData, NavigationDataBuilder};

impl NavigationData {
    /// Builds navigation data from a raw ARINC 424 file.
    ///
    /// Individual malformed records are collected as errors rather than
    /// aborting the whole ingest; call [`NavigationDataBuilder::errors`] on
    /// the result of [`NavigationData::builder`] if partial ingestion needs
    /// to be inspected (this entry point discards them after logging).
    pub fn try_from_arinc424(data: &[u8]) -> Result<Self, Error> {
        let mut builder = NavigationDataBuilder::new();
        let mut controlled: Option<AirspaceBuilder> = None;
        let mut restrictive: Option<AirspaceBuilder> = None;

        for (kind, bytes) in arinc424::records::Records::new(data) {
            let result = (|| -> Result<(), arinc424::Error> {
                match kind {
                    arinc424::records::RecordKind::Airport => {
                        let record = arinc424::records::Airport::try_from(bytes)?;
                        builder.add_airport(record.try_into()?);
                    }

                    arinc424::records::RecordKind::Waypoint => {
                        let record = arinc424::records::Waypoint::try_from(bytes)?;
                        builder.add_point(record.try_into()?);
                    }

                    // Runway geometry is not part of this crate's object
                    // model; runway records are parsed only to validate
                    // they're well-formed ARINC 424, then discarded.
                    arinc424::records::RecordKind::Runway => {
                        arinc424::records::Runway::try_from(bytes)?;
                    }

                    arinc424::records::RecordKind::ControlledAirspace => {
                        let record = arinc424::records::ControlledAirspace::try_from(bytes)?;
                        let return_to_origin = record.bdry_via.return_to_origin;
                        controlled.get_or_insert_with(AirspaceBuilder::default).add_controlled(record)?;

                        if return_to_origin {
                            if let Some(b) = controlled.take() {
                                builder.add_airspace(b.build());
                            }
                        }
                    }

                    arinc424::records::RecordKind::RestrictiveAirspace => {
                        let record = arinc424::records::RestrictiveAirspace::try_from(bytes)?;
                        let return_to_origin = record.bdry_via.return_to_origin;
                        restrictive.get_or_insert_with(AirspaceBuilder::default).add_restrictive(record)?;

                        if return_to_origin {
                            if let Some(b) = restrictive.take() {
                                builder.add_airspace(b.build());
                            }
                        }
                    }
                }

                Ok(())
            })();

            if let Err(e) = result {
                builder.add_error(Error::InvalidArinc424 {
                    record: bytes.to_vec(),
                    error: e.to_string(),
                });
            }
        }

        Ok(builder.with_source(data).build())
    }
}
