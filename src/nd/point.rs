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

use super::{Fix, TypeMask};
use crate::geom::Coordinate;
use crate::wmm::MagneticVariation;

/// How a designated point may be used, carried over from the ARINC 424
/// waypoint-usage letter and the VFR visual-reporting-point concept this
/// crate adds on top of it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WaypointUsage {
    /// Usable at any altitude, high or low.
    HiLoAltitude,
    HiAltitude,
    LoAltitude,
    /// An IFR terminal-area fix: not usable as an enroute point.
    TerminalOnly,
    /// A VFR-only visual reporting point.
    VfrOnly,
}

/// Where a designated point sits, following `efb`'s `Waypoint::region`:
/// either enroute, or scoped to a single airport's terminal area. Terminal
/// scoping is what lets two airports each publish a VRP named e.g. `N1`
/// without colliding.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    Enroute,
    TerminalArea(String),
}

/// A designated point: an enroute intersection, a terminal-area fix, a VFR
/// visual reporting point, or a user-entered coordinate fix.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignatedPoint {
    pub ident: String,
    pub coordinate: Coordinate,
    pub usage: WaypointUsage,
    pub region: Region,
    pub mag_var: Option<MagneticVariation>,
}

impl DesignatedPoint {
    /// The terminal area this point belongs to, if any.
    pub fn terminal_area(&self) -> Option<&str> {
        match &self.region {
            Region::TerminalArea(ident) => Some(ident.as_str()),
            Region::Enroute => None,
        }
    }

    /// The [`TypeMask`] role this point can play in resolution.
    ///
    /// A VFR-only visual reporting point is never a legal resolution for an
    /// IFR waypoint (spec.md §3, "IFR waypoints cannot be mapelements" —
    /// the same restriction extended to VFR-only points, see
    /// [`crate::fp::waypoint`]).
    pub fn type_mask(&self) -> TypeMask {
        match self.usage {
            WaypointUsage::VfrOnly => TypeMask::NONE,
            _ => TypeMask::INTERSECTION,
        }
    }
}

impl Fix for DesignatedPoint {
    fn ident(&self) -> &str {
        &self.ident
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(usage: WaypointUsage) -> DesignatedPoint {
        DesignatedPoint {
            ident: "WHISKEY".to_string(),
            coordinate: Coordinate::new(53.5, 9.5),
            usage,
            region: Region::Enroute,
            mag_var: None,
        }
    }

    #[test]
    fn vfr_only_point_has_no_ifr_type_mask() {
        assert_eq!(point(WaypointUsage::VfrOnly).type_mask(), TypeMask::NONE);
        assert_eq!(
            point(WaypointUsage::HiLoAltitude).type_mask(),
            TypeMask::INTERSECTION
        );
    }

    #[test]
    fn terminal_area_reports_owning_airport() {
        let mut wp = point(WaypointUsage::TerminalOnly);
        wp.region = Region::TerminalArea("EDDH".to_string());
        assert_eq!(wp.terminal_area(), Some("EDDH"));
        assert_eq!(point(WaypointUsage::HiLoAltitude).terminal_area(), None);
    }
}
