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

//! Typed physical quantities used throughout the flight-plan pipeline.
//!
//! Every quantity is a [`Measurement<T, Unit>`] pairing a raw value with the
//! unit it's expressed in; conversions always go through the unit's SI form
//! so that adding a new unit only means implementing [`UnitOfMeasure`] for
//! it, not touching every call site that already holds a value in a
//! different unit.

mod altitude;
mod angle;
pub(crate) mod constants;
mod duration;
mod length;
mod pressure;
mod speed;

pub use altitude::{Altitude, AltitudeUnit};
pub use angle::{Angle, AngleUnit};
pub use duration::Duration;
pub use length::{Length, LengthUnit};
pub use pressure::{Pressure, PressureUnit};
pub use speed::{Speed, SpeedUnit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Sub};

/// The dimension a [`Measurement`] belongs to.
///
/// Only used to keep [`UnitOfMeasure`] implementors honest about which
/// family of units they belong to; the pipeline itself never branches on
/// this at runtime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PhysicalQuantity {
    Length,
    Speed,
    Angle,
    Duration,
    Pressure,
}

/// A unit belonging to a single [`PhysicalQuantity`], convertible to and
/// from that quantity's SI unit.
pub trait UnitOfMeasure<T>: Copy + PartialEq {
    /// The quantity this unit measures.
    fn quantity() -> PhysicalQuantity;

    /// The SI unit for this quantity, used as the pivot for conversions
    /// between any two units of the same quantity.
    fn si() -> Self;

    /// A short unit symbol, e.g. `"kt"`, for [`Display`](fmt::Display).
    fn symbol(&self) -> &'static str;

    /// Converts a value expressed in the SI unit into `to`.
    fn from_si(value: T, to: &Self) -> T;

    /// Converts a value expressed in `self` into the SI unit.
    fn to_si(&self, value: &T) -> T;
}

/// A value paired with the unit it is expressed in.
///
/// Arithmetic and comparisons between two measurements of the same unit
/// family always normalize through the SI unit first, so `Length::nm(1.0)
/// == Length::m(1852.0)` holds regardless of which unit either side was
/// constructed in.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement<T, Unit> {
    pub(crate) value: T,
    pub(crate) unit: Unit,
}

impl<Unit: UnitOfMeasure<f32>> Measurement<f32, Unit> {
    /// The raw value, in the unit this measurement was constructed with.
    pub fn value(&self) -> &f32 {
        &self.value
    }

    /// The unit this measurement is expressed in.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The value expressed in the quantity's SI unit.
    pub fn to_si(&self) -> f32 {
        self.unit.to_si(&self.value)
    }

    /// Converts this measurement into the given unit, carrying the value
    /// through the SI unit.
    pub fn convert_to(&self, unit: Unit) -> Self {
        Self {
            value: Unit::from_si(self.to_si(), &unit),
            unit,
        }
    }
}

impl<Unit: UnitOfMeasure<f32>> PartialEq for Measurement<f32, Unit> {
    fn eq(&self, other: &Self) -> bool {
        self.to_si() == other.to_si()
    }
}

impl<Unit: UnitOfMeasure<f32>> PartialOrd for Measurement<f32, Unit> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_si().partial_cmp(&other.to_si())
    }
}

impl<Unit: UnitOfMeasure<f32>> Add for Measurement<f32, Unit> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: Unit::from_si(self.to_si() + rhs.to_si(), &self.unit),
            unit: self.unit,
        }
    }
}

impl<Unit: UnitOfMeasure<f32>> Sub for Measurement<f32, Unit> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            value: Unit::from_si(self.to_si() - rhs.to_si(), &self.unit),
            unit: self.unit,
        }
    }
}

impl<Unit: UnitOfMeasure<f32>> Div for Measurement<f32, Unit> {
    type Output = f32;

    /// The dimensionless ratio of two measurements of the same quantity.
    fn div(self, rhs: Self) -> Self::Output {
        self.to_si() / rhs.to_si()
    }
}

impl<Unit: UnitOfMeasure<f32>> fmt::Display for Measurement<f32, Unit> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_round_trips_through_si() {
        let a = Altitude::ft(1000.0);
        let b = a.convert_to(AltitudeUnit::Meters);
        let c = b.convert_to(AltitudeUnit::Feet);
        assert!((a.value() - c.value()).abs() < 1e-3);
    }

    #[test]
    fn eq_compares_across_units() {
        assert_eq!(Altitude::ft(3280.84), Altitude::m(1000.0));
    }
}
