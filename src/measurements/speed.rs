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

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{constants, Measurement, PhysicalQuantity, UnitOfMeasure};
use crate::error::Error;

/// Speed unit with _m/s_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum SpeedUnit {
    MetersPerSecond,
    Knots,
    KilometersPerHour,
    Mach,
}

impl UnitOfMeasure<f32> for SpeedUnit {
    fn quantity() -> PhysicalQuantity {
        PhysicalQuantity::Speed
    }

    fn si() -> Self {
        Self::MetersPerSecond
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::Knots => "kt",
            Self::KilometersPerHour => "km/h",
            Self::Mach => "M",
        }
    }

    fn from_si(value: f32, to: &Self) -> f32 {
        match to {
            Self::MetersPerSecond => value,
            Self::Knots => value * constants::METER_PER_SECONDS_IN_KNOTS,
            Self::KilometersPerHour => value * 3.6,
            Self::Mach => value / constants::SPEED_OF_SOUND_ISA_SL,
        }
    }

    fn to_si(&self, value: &f32) -> f32 {
        match self {
            Self::MetersPerSecond => *value,
            Self::Knots => value / constants::METER_PER_SECONDS_IN_KNOTS,
            Self::KilometersPerHour => value / 3.6,
            Self::Mach => value * constants::SPEED_OF_SOUND_ISA_SL,
        }
    }
}

/// A true airspeed or ground speed, e.g. an Item-15 cruising-speed token.
pub type Speed = Measurement<f32, SpeedUnit>;

impl Speed {
    /// Creates a speed in meters per second.
    pub fn mps(value: f32) -> Self {
        Self {
            value,
            unit: SpeedUnit::MetersPerSecond,
        }
    }

    /// Creates a speed in knots.
    pub fn kt(value: f32) -> Self {
        Self {
            value,
            unit: SpeedUnit::Knots,
        }
    }

    /// Creates a speed in kilometers per hour.
    pub fn kmh(value: f32) -> Self {
        Self {
            value,
            unit: SpeedUnit::KilometersPerHour,
        }
    }

    /// Creates a speed as a Mach number, at ISA sea-level conditions.
    pub fn mach(value: f32) -> Self {
        Self {
            value,
            unit: SpeedUnit::Mach,
        }
    }
}

impl FromStr for Speed {
    type Err = Error;

    /// Parses an Item-15 cruising-speed token.
    ///
    /// - `N####` — knots, e.g. `N0450`
    /// - `K####` — kilometers per hour, e.g. `K0830`
    /// - `M###` — Mach number in thousandths, e.g. `M082` → Mach 0.82
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.get(1..).ok_or_else(|| Error::InvalidSpeed(s.to_string()))?;
        let n: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidSpeed(s.to_string()))?;

        match s.get(0..1) {
            Some("N") if digits.len() == 4 => Ok(Self::kt(n as f32)),
            Some("K") if digits.len() == 4 => Ok(Self::kmh(n as f32)),
            Some("M") if digits.len() == 3 => Ok(Self::mach(n as f32 / 1000.0)),
            _ => Err(Error::InvalidSpeed(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_knots() {
        assert_eq!("N0450".parse::<Speed>().unwrap(), Speed::kt(450.0));
    }

    #[test]
    fn parses_kmh() {
        assert_eq!("K0830".parse::<Speed>().unwrap(), Speed::kmh(830.0));
    }

    #[test]
    fn parses_mach() {
        let s = "M082".parse::<Speed>().unwrap();
        assert!((s.value() - 0.082).abs() < 1e-6);
        assert_eq!(*s.unit(), SpeedUnit::Mach);
    }

    #[test]
    fn rejects_malformed_token() {
        assert!("N45".parse::<Speed>().is_err());
        assert!("X0450".parse::<Speed>().is_err());
    }

    #[test]
    fn mach_round_trips_through_si() {
        let s = Speed::mach(0.82);
        let kt = s.convert_to(SpeedUnit::Knots);
        // Mach 0.82 at ISA SL is ~542 kt.
        assert!((kt.value() - 542.0).abs() < 2.0);
    }
}
