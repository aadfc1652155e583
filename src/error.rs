// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
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

use std::fmt;

/// The crate's result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building navigation data or evaluating a route.
///
/// The flight-plan pipeline itself (see [`crate::fp::ParseState`]) is
/// non-fatal: most of these are collected into a `Vec<Error>` alongside a
/// possibly-partial parse rather than aborting. Only navigation-data
/// ingestion and a handful of internal invariant checks return a hard `Err`.
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// A speed token (`N####`, `K####`, `M###`) could not be parsed.
    InvalidSpeed(String),
    /// A level token (`VFR`, `F###`, `A###`, `S####`, `M####`) could not be
    /// parsed.
    InvalidLevel(String),
    /// Flight rules (`I`/`V`/`Y`/`Z`) or flight type letter was not one of
    /// the ICAO-defined values.
    InvalidFlightRulesOrType(String),
    /// A wake turbulence category was not `L`/`M`/`H`/`J`.
    InvalidWakeCategory(String),
    /// An `HHMM` time token could not be parsed.
    InvalidTime(String),
    /// A generic token did not match the expected alphanumeric/length shape.
    UnexpectedToken(String),
    /// The identifier does not name anything in the navigation database and
    /// the waypoint using it is IFR (VFR identifiers fall through silently,
    /// see spec.md §4.2.2).
    UnknownIdent(String),
    /// An airway segment's endpoints could not both be resolved.
    UnknownAirwaySegmentEndpoints { airway: String, from: String, to: String },
    /// A `STAY[n]` token repeats an index already seen.
    DuplicateStay(u8),
    /// `STAY[n]` tokens were not consecutive by index.
    NonConsecutiveStay,
    /// A `STAY[n]` token has no matching `STAYINFOn` other-info entry.
    MissingStayInfo(u8),
    /// A terminal-area VFR waypoint ident matches fixes in two distinct
    /// terminal areas and the surrounding tokens don't disambiguate it.
    AmbiguousTerminalArea { wp: String, a: String, b: String },
    /// An airport/runway combination named in the route doesn't exist.
    UnknownRunway { aprt: String, rwy: String },
    /// An ARINC 424 record failed to parse.
    InvalidArinc424 { record: Vec<u8>, error: String },
    /// A value fell outside the range the formula producing it expects.
    ImplausibleValue,
    /// An internal invariant was violated (e.g. suffix splitting produced an
    /// empty identifier). These never cross the public `parse` boundary as
    /// pipeline errors; they are turned into `Error` entries by the caller.
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSpeed(s) => write!(f, "invalid speed: {s}"),
            Error::InvalidLevel(s) => write!(f, "invalid level: {s}"),
            Error::InvalidFlightRulesOrType(s) => {
                write!(f, "invalid flight rules or flight type: {s}")
            }
            Error::InvalidWakeCategory(s) => write!(f, "invalid wake turbulence category: {s}"),
            Error::InvalidTime(s) => write!(f, "invalid time: {s}"),
            Error::UnexpectedToken(s) => write!(f, "unexpected token: {s}"),
            Error::UnknownIdent(s) => write!(f, "unknown identifier {s}"),
            Error::UnknownAirwaySegmentEndpoints { airway, from, to } => write!(
                f,
                "Airway segment {airway} {from} … {to} has unknown endpoint(s)"
            ),
            Error::DuplicateStay(n) => write!(f, "duplicate STAY{n}"),
            Error::NonConsecutiveStay => write!(f, "multiple STAY but not consecutive"),
            Error::MissingStayInfo(n) => write!(f, "STAYINFO{n} missing"),
            Error::AmbiguousTerminalArea { wp, a, b } => write!(
                f,
                "waypoint {wp} is ambiguous between terminal areas {a} and {b}"
            ),
            Error::UnknownRunway { aprt, rwy } => {
                write!(f, "unknown runway {rwy} at {aprt}")
            }
            Error::InvalidArinc424 { error, .. } => write!(f, "invalid ARINC 424 record: {error}"),
            Error::ImplausibleValue => write!(f, "implausible value"),
            Error::Internal(s) => write!(f, "internal error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
