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

//! The route-carrying object kinds: airways and their segments, SIDs and
//! STARs and their legs. These feed [`crate::graph::RouteGraph`] directly —
//! one edge per segment/leg — rather than being graph vertices themselves.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::VerticalDistance;
use crate::geom::Coordinate;

/// Which altitude band a route segment belongs to.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AirwayKind {
    Low,
    High,
    Both,
    /// The segment's endpoints couldn't both be resolved against the
    /// database; kept around so the segment can still be reported in an
    /// error but never offered as a routable edge.
    Invalid,
}

/// One published leg of a named airway, between two fixes.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteSegment {
    pub from_ident: String,
    pub from_coord: Coordinate,
    pub to_ident: String,
    pub to_coord: Coordinate,
    pub lower: VerticalDistance,
    pub upper: VerticalDistance,
    pub kind: AirwayKind,
    /// Whether the segment may be flown in both directions.
    pub bidirectional: bool,
}

/// A named airway: an ordered sequence of [`RouteSegment`]s sharing an
/// identifier (spec.md §3, object kind `route`).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airway {
    pub ident: String,
    pub segments: Vec<RouteSegment>,
}

impl Airway {
    /// Every fix ident participating in this airway, from either end of any
    /// segment, used to seed the helper edges during airway expansion
    /// (spec.md §4.2.3).
    pub fn fix_idents(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .flat_map(|seg| [seg.from_ident.as_str(), seg.to_ident.as_str()])
    }
}

/// One leg of a standard instrument departure.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepartureLeg {
    pub from_ident: String,
    pub from_coord: Coordinate,
    pub to_ident: String,
    pub to_coord: Coordinate,
    pub lower: VerticalDistance,
    pub upper: VerticalDistance,
}

/// A standard instrument departure: legs anchored at the departure airport.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sid {
    pub ident: String,
    pub airport_ident: String,
    pub legs: Vec<DepartureLeg>,
}

/// One leg of a standard terminal arrival route.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrivalLeg {
    pub from_ident: String,
    pub from_coord: Coordinate,
    pub to_ident: String,
    pub to_coord: Coordinate,
    pub lower: VerticalDistance,
    pub upper: VerticalDistance,
}

/// A standard terminal arrival route: legs anchored at the destination
/// airport.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Star {
    pub ident: String,
    pub airport_ident: String,
    pub legs: Vec<ArrivalLeg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_idents_covers_both_ends_of_every_segment() {
        let airway = Airway {
            ident: "UM984".to_string(),
            segments: vec![RouteSegment {
                from_ident: "OSPEN".to_string(),
                from_coord: Coordinate::new(0.0, 0.0),
                to_ident: "BZO".to_string(),
                to_coord: Coordinate::new(0.0, 0.0),
                lower: VerticalDistance::Fl(100),
                upper: VerticalDistance::Unlimited,
                kind: AirwayKind::High,
                bidirectional: true,
            }],
        };

        let idents: Vec<&str> = airway.fix_idents().collect();
        assert_eq!(idents, vec!["OSPEN", "BZO"]);
    }
}
