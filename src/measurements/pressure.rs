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

use super::{Measurement, PhysicalQuantity, UnitOfMeasure};

/// Pressure unit with _hPa_ as SI unit, the unit QNH is reported in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum PressureUnit {
    HectoPascal,
    InchesOfMercury,
}

impl UnitOfMeasure<f32> for PressureUnit {
    fn quantity() -> PhysicalQuantity {
        PhysicalQuantity::Pressure
    }

    fn si() -> Self {
        Self::HectoPascal
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::HectoPascal => "hPa",
            Self::InchesOfMercury => "inHg",
        }
    }

    fn from_si(value: f32, to: &Self) -> f32 {
        match to {
            Self::HectoPascal => value,
            Self::InchesOfMercury => value / 33.8639,
        }
    }

    fn to_si(&self, value: &f32) -> f32 {
        match self {
            Self::HectoPascal => *value,
            Self::InchesOfMercury => value * 33.8639,
        }
    }
}

/// An atmospheric pressure, typically an altimeter setting (QNH).
pub type Pressure = Measurement<f32, PressureUnit>;

impl Pressure {
    /// The ICAO standard pressure setting, 1013.25 hPa.
    pub const STD: Self = Self {
        value: 1013.25,
        unit: PressureUnit::HectoPascal,
    };

    /// Creates a pressure in hectopascals.
    pub fn h_pa(value: f32) -> Self {
        Self {
            value,
            unit: PressureUnit::HectoPascal,
        }
    }

    /// Creates a pressure in inches of mercury.
    pub fn in_hg(value: f32) -> Self {
        Self {
            value,
            unit: PressureUnit::InchesOfMercury,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_is_101325_hpa() {
        assert_eq!(Pressure::STD, Pressure::h_pa(1013.25));
    }

    #[test]
    fn in_hg_converts_to_hpa() {
        let p = Pressure::in_hg(29.92);
        assert!((p.to_si() - 1013.2).abs() < 0.5);
    }
}
