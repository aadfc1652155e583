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

//! World Magnetic Model wrapper and published magnetic-variation values.
//!
//! The model itself is an external collaborator referenced only through its
//! contract (a pure function of altitude, coordinate and time returning a
//! declination): [`declination`] is the only entry point, so an upgrade of
//! the underlying `world_magnetic_model` crate only ever touches this file.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use time::Date;
use uom::si::angle::degree;
use uom::si::f32::{Angle as UomAngle, Length as UomLength};
use uom::si::length::meter;
use world_magnetic_model::GeomagneticField;

use crate::error::Error;
use crate::geom::Coordinate;
use crate::measurements::{Angle, Length, LengthUnit};

/// A published or computed magnetic variation, positive **east**.
///
/// Stored as a plain signed degree offset rather than an [`Angle`]: an
/// [`Angle`] normalizes into `[0, 360)` on construction, which is the right
/// behavior for a compass course but would turn a small westerly variation
/// like `-3°` into `357°` and complicate the arithmetic below.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagneticVariation(f32);

impl MagneticVariation {
    /// An easterly variation of `degrees`.
    pub fn east(degrees: f32) -> Self {
        Self(degrees)
    }

    /// A westerly variation of `degrees`.
    pub fn west(degrees: f32) -> Self {
        Self(-degrees)
    }

    /// The signed variation in degrees, positive east.
    pub fn degrees_east(&self) -> f32 {
        self.0
    }

    /// Converts a magnetic course to a true course.
    pub fn true_course(&self, magnetic: Angle) -> Angle {
        Angle::deg(magnetic.to_si() + self.0)
    }

    /// Converts a true course to a magnetic course.
    pub fn magnetic_course(&self, true_course: Angle) -> Angle {
        Angle::deg(true_course.to_si() - self.0)
    }
}

impl fmt::Display for MagneticVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0.0 {
            write!(f, "{:.1}°E", self.0)
        } else {
            write!(f, "{:.1}°W", -self.0)
        }
    }
}

/// Evaluates the World Magnetic Model at `coord`/`altitude`/`date`.
///
/// # Errors
///
/// Returns [`Error::Internal`] if the model rejects the input (e.g. a date
/// outside its epoch range).
pub fn declination(coord: Coordinate, altitude: Length, date: Date) -> Result<MagneticVariation, Error> {
    let altitude_m = *altitude.convert_to(LengthUnit::Meters).value();

    let field = GeomagneticField::new(
        UomLength::new::<meter>(altitude_m),
        UomAngle::new::<degree>(coord.latitude as f32),
        UomAngle::new::<degree>(coord.longitude as f32),
        date,
    )
    .map_err(|e| Error::Internal(format!("world magnetic model: {e}")))?;

    Ok(MagneticVariation::east(field.declination().get::<degree>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_course_adds_easterly_variation() {
        let var = MagneticVariation::east(1.0);
        let true_course = var.true_course(Angle::deg(90.0));
        assert!((true_course.to_si() - 91.0).abs() < 1e-3);
    }

    #[test]
    fn true_course_subtracts_westerly_variation() {
        let var = MagneticVariation::west(3.0);
        let true_course = var.true_course(Angle::deg(90.0));
        assert!((true_course.to_si() - 87.0).abs() < 1e-3);
    }

    #[test]
    fn magnetic_course_is_inverse_of_true_course() {
        let var = MagneticVariation::east(4.5);
        let magnetic = Angle::deg(123.0);
        let true_course = var.true_course(magnetic);
        let back = var.magnetic_course(true_course);
        assert!((back.to_si() - magnetic.to_si()).abs() < 1e-3);
    }

    #[test]
    fn display_shows_hemisphere_letter() {
        assert_eq!(MagneticVariation::east(1.0).to_string(), "1.0°E");
        assert_eq!(MagneticVariation::west(4.0).to_string(), "4.0°W");
    }
}
