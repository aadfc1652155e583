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

/// Angle unit with _degrees_ as SI unit.
///
/// Aeronautical angles (courses, bearings, radials) are conventionally
/// expressed in degrees rather than radians; degrees are therefore treated
/// as this quantity's "SI" unit for the purposes of [`UnitOfMeasure`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl UnitOfMeasure<f32> for AngleUnit {
    fn quantity() -> PhysicalQuantity {
        PhysicalQuantity::Angle
    }

    fn si() -> Self {
        Self::Degrees
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => "rad",
        }
    }

    fn from_si(value: f32, to: &Self) -> f32 {
        match to {
            Self::Degrees => value,
            Self::Radians => value.to_radians(),
        }
    }

    fn to_si(&self, value: &f32) -> f32 {
        match self {
            Self::Degrees => *value,
            Self::Radians => value.to_degrees(),
        }
    }
}

/// A course, bearing or radial.
///
/// No distinction is made here between true and magnetic angles; callers
/// track that separately (see [`crate::wmm`]) and normalize to true before
/// constructing an [`Angle`] for graph/geodesic work.
pub type Angle = Measurement<f32, AngleUnit>;

impl Angle {
    /// Creates an angle in degrees, normalized to `[0, 360)`.
    pub fn deg(value: f32) -> Self {
        Self {
            value: value.rem_euclid(360.0),
            unit: AngleUnit::Degrees,
        }
    }

    /// Creates an angle in radians.
    pub fn rad(value: f32) -> Self {
        Self {
            value,
            unit: AngleUnit::Radians,
        }
    }

    /// The smallest signed difference `self - other`, in degrees, in the
    /// range `(-180, 180]`.
    pub fn difference(&self, other: &Self) -> f32 {
        let diff = self.to_si() - other.to_si();
        let wrapped = (diff + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped <= -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deg_wraps_into_range() {
        assert_eq!(Angle::deg(370.0), Angle::deg(10.0));
        assert_eq!(Angle::deg(-10.0), Angle::deg(350.0));
    }

    #[test]
    fn difference_takes_shortest_path() {
        assert!((Angle::deg(350.0).difference(&Angle::deg(10.0)) - (-20.0)).abs() < 1e-3);
        assert!((Angle::deg(10.0).difference(&Angle::deg(350.0)) - 20.0).abs() < 1e-3);
    }
}
