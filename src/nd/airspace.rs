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

use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geo::Contains;

use crate::core::VerticalDistance;
use crate::geom::Coordinate;

/// ICAO Airspace Classification (ICAO Annex 11, Chapter 2).
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AirspaceClassification {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Airspace type — structural or special-use designation.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AirspaceType {
    CTA,
    CTR,
    TMA,
    Restricted,
    Danger,
    Prohibited,
    TMZ,
    RMZ,
    RadarZone,
}

/// An airspace volume: a structural or special-use [`AirspaceType`], an
/// optional ICAO [`AirspaceClassification`], enclosed by `polygon` and
/// ranging from `floor` to `ceiling`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airspace {
    pub name: String,
    pub airspace_type: AirspaceType,
    pub classification: Option<AirspaceClassification>,
    pub ceiling: VerticalDistance,
    pub floor: VerticalDistance,
    pub polygon: geo::Polygon<f64>,
}

impl Airspace {
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.polygon.contains(&geo::Point::from(*point))
    }
}

impl Display for AirspaceClassification {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::F => write!(f, "F"),
            Self::G => write!(f, "G"),
        }
    }
}

impl Display for AirspaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::CTA => write!(f, "CTA"),
            Self::CTR => write!(f, "CTR"),
            Self::TMA => write!(f, "TMA"),
            Self::Restricted => write!(f, "Restricted"),
            Self::Danger => write!(f, "Danger"),
            Self::Prohibited => write!(f, "Prohibited"),
            Self::TMZ => write!(f, "TMZ"),
            Self::RMZ => write!(f, "RMZ"),
            Self::RadarZone => write!(f, "Radar Zone"),
        }
    }
}

impl Display for Airspace {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.classification {
            Some(class) => write!(
                f,
                "{}: {} (Class {}) | {}/{}",
                self.name, self.airspace_type, class, self.ceiling, self.floor
            ),
            None => write!(
                f,
                "{}: {} | {}/{}",
                self.name, self.airspace_type, self.ceiling, self.floor
            ),
        }
    }
}
