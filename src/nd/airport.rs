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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Fix;
use crate::core::VerticalDistance;
use crate::geom::Coordinate;
use crate::wmm::MagneticVariation;

/// An airport or heliport, the only object kind allowed as the first and
/// last waypoint of a flight plan (spec.md §8, invariant I1).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    pub icao_ident: String,
    pub iata_designator: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub elevation: VerticalDistance,
    pub mag_var: Option<MagneticVariation>,
}

impl Fix for Airport {
    fn ident(&self) -> &str {
        &self.icao_ident
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
