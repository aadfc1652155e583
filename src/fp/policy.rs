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

//! Policy knobs threaded through [`crate::fp::ParseState`] and the route
//! transforms, pinning the open questions `efb`'s own config layer would
//! otherwise leave as inline constants.

use crate::core::VerticalDistance;
use crate::measurements::Length;

/// How `populate` computes a cruising altitude when none was given in the
/// Item-15 text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DefaultAltitudePolicy {
    /// `max(departure elevation, destination elevation)`, rounded up to the
    /// next 1000 ft, plus a further 1000 ft if the rounded value is at or
    /// above 5000 ft.
    #[default]
    RoundUp1000Plus1000Above5000,
}

impl DefaultAltitudePolicy {
    /// Applies this policy to a pair of airport elevations, returning a
    /// default cruising altitude.
    pub fn apply(&self, departure_elevation: VerticalDistance, destination_elevation: VerticalDistance) -> VerticalDistance {
        match self {
            Self::RoundUp1000Plus1000Above5000 => {
                let dep_ft = elevation_feet(departure_elevation);
                let dest_ft = elevation_feet(destination_elevation);
                let highest = dep_ft.max(dest_ft);
                let rounded = ((highest / 1000.0).ceil()) * 1000.0;
                let bumped = if rounded >= 5000.0 { rounded + 1000.0 } else { rounded };
                VerticalDistance::Altitude(bumped as u16)
            }
        }
    }
}

fn elevation_feet(v: VerticalDistance) -> f32 {
    f32::from(v)
}

/// Resolution knobs pinned by SPEC_FULL.md §12 in place of the base
/// spec's inline constants (spec.md §9, Open Questions).
#[derive(Clone, Debug)]
pub struct ResolutionPolicy {
    /// The maximum length of an unsubdivided DCT leg (spec.md §4.5,
    /// `fix_max_dct_distance`).
    pub max_dct_nm: Length,
    /// The perpendicular chord-deviation threshold below which an interior
    /// airway turnpoint is dropped (spec.md §4.5,
    /// `erase_unnecessary_airway(keep_turnpoints = true)`).
    pub airway_deviation_threshold: Length,
    /// How a missing cruising altitude is computed.
    pub default_altitude_rounding: DefaultAltitudePolicy,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            max_dct_nm: Length::nm(50.0),
            airway_deviation_threshold: Length::nm(0.5),
            default_altitude_rounding: DefaultAltitudePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_altitude_rounds_up_and_bumps_above_5000() {
        let policy = DefaultAltitudePolicy::RoundUp1000Plus1000Above5000;
        let alt = policy.apply(VerticalDistance::Msl(4200), VerticalDistance::Msl(3800));
        assert_eq!(alt, VerticalDistance::Altitude(6000));
    }

    #[test]
    fn default_altitude_stays_below_5000_when_low() {
        let policy = DefaultAltitudePolicy::RoundUp1000Plus1000Above5000;
        let alt = policy.apply(VerticalDistance::Msl(300), VerticalDistance::Msl(450));
        assert_eq!(alt, VerticalDistance::Altitude(1000));
    }

    #[test]
    fn resolution_policy_default_matches_pinned_values() {
        let policy = ResolutionPolicy::default();
        assert_eq!(policy.max_dct_nm, Length::nm(50.0));
        assert_eq!(policy.airway_deviation_threshold, Length::nm(0.5));
    }
}
