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

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Fix;
use crate::geom::Coordinate;
use crate::wmm::MagneticVariation;

/// The closed set of radio navaid kinds named in spec.md §3.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavaidKind {
    Vor,
    VorDme,
    Vortac,
    Tacan,
    Dme,
    Ndb,
    NdbDme,
    IlsDme,
    LocDme,
    NdbMkr,
}

impl fmt::Display for NavaidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vor => "VOR",
            Self::VorDme => "VOR-DME",
            Self::Vortac => "VORTAC",
            Self::Tacan => "TACAN",
            Self::Dme => "DME",
            Self::Ndb => "NDB",
            Self::NdbDme => "NDB-DME",
            Self::IlsDme => "ILS-DME",
            Self::LocDme => "LOC-DME",
            Self::NdbMkr => "NDB-MKR",
        };
        write!(f, "{s}")
    }
}

/// A radio navaid.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Navaid {
    pub ident: String,
    pub kind: NavaidKind,
    pub coordinate: Coordinate,
    pub mag_var: Option<MagneticVariation>,
    pub frequency_khz: u32,
}

impl Fix for Navaid {
    fn ident(&self) -> &str {
        &self.ident
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
