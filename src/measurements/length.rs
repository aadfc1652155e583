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

use super::{constants, Measurement, PhysicalQuantity, UnitOfMeasure};

/// Length unit with _m_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum LengthUnit {
    Meters,
    Feet,
    NauticalMiles,
    StatuteMiles,
    Kilometers,
}

impl UnitOfMeasure<f32> for LengthUnit {
    fn quantity() -> PhysicalQuantity {
        PhysicalQuantity::Length
    }

    fn si() -> Self {
        Self::Meters
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "ft",
            Self::NauticalMiles => "nmi",
            Self::StatuteMiles => "sm",
            Self::Kilometers => "km",
        }
    }

    fn from_si(value: f32, to: &Self) -> f32 {
        match to {
            Self::Meters => value,
            Self::Feet => value / constants::FEET_IN_METER,
            Self::NauticalMiles => value / constants::NAUTICAL_MILE_IN_METER,
            Self::StatuteMiles => value / constants::STATUTE_MILE_IN_METER,
            Self::Kilometers => value / 1000.0,
        }
    }

    fn to_si(&self, value: &f32) -> f32 {
        match self {
            Self::Meters => *value,
            Self::Feet => value * constants::FEET_IN_METER,
            Self::NauticalMiles => value * constants::NAUTICAL_MILE_IN_METER,
            Self::StatuteMiles => value * constants::STATUTE_MILE_IN_METER,
            Self::Kilometers => value * 1000.0,
        }
    }
}

/// A distance or length, e.g. a leg's great-circle distance or the maximum
/// DCT-leg length in a [`ResolutionPolicy`](crate::fp::ResolutionPolicy).
pub type Length = Measurement<f32, LengthUnit>;

impl Length {
    /// Creates a length in meters.
    pub fn m(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Meters,
        }
    }

    /// Creates a length in feet.
    pub fn ft(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Feet,
        }
    }

    /// Creates a length in nautical miles.
    pub fn nm(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::NauticalMiles,
        }
    }

    /// Creates a length in statute miles.
    pub fn sm(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::StatuteMiles,
        }
    }

    /// Creates a length in kilometers.
    pub fn km(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Kilometers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nm_round_trips_through_meters() {
        let l = Length::nm(100.0);
        assert!((l.convert_to(LengthUnit::Meters).value() - 185_200.0).abs() < 1.0);
    }

    #[test]
    fn eq_across_units() {
        assert_eq!(Length::nm(1.0), Length::m(1852.0));
    }
}
