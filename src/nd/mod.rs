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

//! Navigation Data.
//!
//! The navigation database itself (its persistence, its update cycle) is an
//! external collaborator referenced only through this facade: [`NavigationData`]
//! is an in-memory snapshot built once, by [`NavigationDataBuilder`] or by
//! [`NavigationData::try_from_arinc424`], and then read by the flight-plan
//! pipeline for the lifetime of a single parse.

use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod airport;
mod airspace;
mod airway;
pub(crate) mod convert;
mod find;
mod index;
mod mapelement;
mod navaid;
mod point;
mod timeslice;

mod builder;

pub use airport::Airport;
pub use airspace::{Airspace, AirspaceClassification, AirspaceType};
pub use airway::{Airway, AirwayKind, ArrivalLeg, DepartureLeg, RouteSegment, Sid, Star};
pub use builder::NavigationDataBuilder;
pub use find::{FindCoord, SearchFlags};
pub use mapelement::MapElement;
pub use navaid::{Navaid, NavaidKind};
pub use point::{DesignatedPoint, Region, WaypointUsage};
pub use timeslice::TimeSlice;

use index::NavIndex;

use crate::geom::Coordinate;

/// The closed set of database object kinds named in the base specification.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    Airport,
    Navaid,
    DesignatedPoint,
    MapElement,
    RouteSegment,
    Route,
    Sid,
    Star,
    DepartureLeg,
    ArrivalLeg,
    Airspace,
}

/// The roles a graph vertex, or a parse waypoint's candidate resolution, is
/// allowed to play.
///
/// Mirrors spec.md §3's `airport|navaid|intersection|mapelement|user` role
/// set as a small bitmask, following this crate's general preference
/// (`Equipment`, `Transponder`, `Pbn` in [`crate::fp::item`]) for typed
/// bitmask wrappers over bare integers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeMask(u8);

impl TypeMask {
    pub const NONE: Self = Self(0);
    pub const AIRPORT: Self = Self(1 << 0);
    pub const NAVAID: Self = Self(1 << 1);
    pub const INTERSECTION: Self = Self(1 << 2);
    pub const MAPELEMENT: Self = Self(1 << 3);
    pub const USER: Self = Self(1 << 4);
    pub const ALL: Self = Self(
        Self::AIRPORT.0 | Self::NAVAID.0 | Self::INTERSECTION.0 | Self::MAPELEMENT.0 | Self::USER.0,
    );

    /// All roles except [`MAPELEMENT`](Self::MAPELEMENT): IFR waypoints
    /// cannot be resolved to a mapelement (spec.md §3, `ParseWaypoint`).
    pub const IFR: Self = Self(Self::ALL.0 & !Self::MAPELEMENT.0);

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for TypeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A navigation object that can be the endpoint of a fix: something with an
/// identifier and a coordinate.
pub trait Fix {
    fn ident(&self) -> &str;
    fn coordinate(&self) -> Coordinate;
}

/// A resolved, identifiable entity returned by [`FindCoord`].
///
/// Covers every object kind that can be named by an Item-15 token: the four
/// graph-vertex-eligible kinds (airport/navaid/designated point/mapelement)
/// plus the three path-providing kinds (airway, SID, STAR) that a token may
/// also name (spec.md §4.2.2, "If the token names an airway ...").
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavEntity {
    Airport(Rc<Airport>),
    Navaid(Rc<Navaid>),
    Point(Rc<DesignatedPoint>),
    MapElement(Rc<MapElement>),
    Airway(Rc<Airway>),
    Sid(Rc<Sid>),
    Star(Rc<Star>),
}

impl NavEntity {
    pub fn ident(&self) -> &str {
        match self {
            Self::Airport(a) => a.ident(),
            Self::Navaid(n) => n.ident(),
            Self::Point(p) => p.ident(),
            Self::MapElement(m) => m.ident(),
            Self::Airway(a) => &a.ident,
            Self::Sid(s) => &s.ident,
            Self::Star(s) => &s.ident,
        }
    }

    /// The coordinate of this entity, if it is a graph vertex.
    ///
    /// Airways, SIDs and STARs are paths, not single points, and return
    /// `None`.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Airport(a) => Some(a.coordinate()),
            Self::Navaid(n) => Some(n.coordinate()),
            Self::Point(p) => Some(p.coordinate()),
            Self::MapElement(m) => Some(m.coordinate()),
            Self::Airway(_) | Self::Sid(_) | Self::Star(_) => None,
        }
    }

    /// The [`TypeMask`] role this entity can play when bound to a graph
    /// vertex. Path-providing kinds return [`TypeMask::NONE`]: they are
    /// never themselves a vertex.
    pub fn type_mask(&self) -> TypeMask {
        match self {
            Self::Airport(_) => TypeMask::AIRPORT,
            Self::Navaid(_) => TypeMask::NAVAID,
            Self::Point(p) => p.type_mask(),
            Self::MapElement(_) => TypeMask::MAPELEMENT,
            Self::Airway(_) | Self::Sid(_) | Self::Star(_) => TypeMask::NONE,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Airport(_) => ObjectKind::Airport,
            Self::Navaid(_) => ObjectKind::Navaid,
            Self::Point(_) => ObjectKind::DesignatedPoint,
            Self::MapElement(_) => ObjectKind::MapElement,
            Self::Airway(_) => ObjectKind::Route,
            Self::Sid(_) => ObjectKind::Sid,
            Self::Star(_) => ObjectKind::Star,
        }
    }
}

/// An in-memory snapshot of the navigation database, as described by
/// spec.md §1: the persistent storage and its update cycle are out of
/// scope, this is only the read side the pipeline needs.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationData {
    pub(crate) airports: Vec<Rc<Airport>>,
    pub(crate) navaids: Vec<Rc<Navaid>>,
    pub(crate) points: Vec<Rc<DesignatedPoint>>,
    pub(crate) mapelements: Vec<Rc<MapElement>>,
    pub(crate) airways: Vec<Rc<Airway>>,
    pub(crate) sids: Vec<Rc<Sid>>,
    pub(crate) stars: Vec<Rc<Star>>,
    pub(crate) airspaces: Vec<Airspace>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) index: NavIndex,
}

impl NavigationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> NavigationDataBuilder {
        NavigationDataBuilder::new()
    }

    /// Returns all airspaces that contain the given point.
    ///
    /// Performs a 2D spatial query using only the airspace polygon. Vertical
    /// bounds (floor/ceiling) are not checked.
    pub fn airspaces_at(&self, point: &Coordinate) -> Vec<&Airspace> {
        self.index
            .airspace_candidates_at(point)
            .filter(|airspace| airspace.contains(point))
            .collect()
    }

    /// A facade over identifier and coordinate-box lookups (spec.md §4.3).
    pub fn find(&self) -> FindCoord<'_> {
        FindCoord::new(self)
    }

    /// Loads every segment/leg of the airway, SID or STAR named `ident`
    /// into `graph` as edges (spec.md §4.3, "Airway graph queries return a
    /// `(graph, ident→vertex)` bundle used by the expander").
    ///
    /// Segment/leg endpoints are named only by ident in
    /// [`Airway`]/[`Sid`]/[`Star`], with no back-reference to whatever
    /// [`NavEntity`] a prior identifier lookup may already have bound to a
    /// vertex for the same fix, so this always goes through
    /// [`crate::graph::RouteGraph::find_or_insert_fix`] to land on the same
    /// vertex [`ParseState`](crate::fp::ParseState)'s DB lookup phase used.
    /// Idempotent: loading the same ident twice only adds each segment's
    /// edge once, since `petgraph` would otherwise duplicate it — callers
    /// load a route's edges at most once per ident, the first time a token
    /// resolves to that airway/SID/STAR.
    pub fn load_route_edges(&self, graph: &mut crate::graph::RouteGraph, ident: &str) {
        use crate::graph::Edge;

        for airway in self.airways.iter().filter(|a| a.ident == ident) {
            for seg in &airway.segments {
                if matches!(seg.kind, airway::AirwayKind::Invalid) {
                    continue;
                }
                let from = graph.find_or_insert_fix(&seg.from_ident, seg.from_coord);
                let to = graph.find_or_insert_fix(&seg.to_ident, seg.to_coord);
                let bearing = seg.from_coord.bearing(&seg.to_coord);
                let dist = seg.from_coord.dist(&seg.to_coord);
                let mut edge = Edge::airway(ident, dist, bearing, seg.lower, seg.upper);
                edge.bidirectional = seg.bidirectional;
                graph.add_edge(from, to, edge);
            }
        }
        for sid in self.sids.iter().filter(|s| s.ident == ident) {
            for leg in &sid.legs {
                let from = graph.find_or_insert_fix(&leg.from_ident, leg.from_coord);
                let to = graph.find_or_insert_fix(&leg.to_ident, leg.to_coord);
                let bearing = leg.from_coord.bearing(&leg.to_coord);
                let dist = leg.from_coord.dist(&leg.to_coord);
                graph.add_edge(from, to, Edge::sid(ident, dist, bearing, leg.lower, leg.upper));
            }
        }
        for star in self.stars.iter().filter(|s| s.ident == ident) {
            for leg in &star.legs {
                let from = graph.find_or_insert_fix(&leg.from_ident, leg.from_coord);
                let to = graph.find_or_insert_fix(&leg.to_ident, leg.to_coord);
                let bearing = leg.from_coord.bearing(&leg.to_coord);
                let dist = leg.from_coord.dist(&leg.to_coord);
                graph.add_edge(from, to, Edge::star(ident, dist, bearing, leg.lower, leg.upper));
            }
        }
    }

    pub(crate) fn airports(&self) -> impl Iterator<Item = &Rc<Airport>> {
        self.airports.iter()
    }

    pub(crate) fn navaids(&self) -> impl Iterator<Item = &Rc<Navaid>> {
        self.navaids.iter()
    }

    pub(crate) fn points(&self) -> impl Iterator<Item = &Rc<DesignatedPoint>> {
        self.points.iter()
    }

    pub(crate) fn mapelements(&self) -> impl Iterator<Item = &Rc<MapElement>> {
        self.mapelements.iter()
    }

    pub(crate) fn airways(&self) -> impl Iterator<Item = &Rc<Airway>> {
        self.airways.iter()
    }

    pub(crate) fn sids(&self) -> impl Iterator<Item = &Rc<Sid>> {
        self.sids.iter()
    }

    pub(crate) fn stars(&self) -> impl Iterator<Item = &Rc<Star>> {
        self.stars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VerticalDistance;

    #[test]
    fn airspace_at_point() {
        let inside = coord!(53.03759, 9.00533);
        let outside = coord!(53.04892, 8.90907);

        let mut builder = NavigationData::builder();
        builder.add_airspace(Airspace {
            name: String::from("TMA BREMEN A"),
            airspace_type: AirspaceType::TMA,
            classification: Some(AirspaceClassification::D),
            ceiling: VerticalDistance::Fl(65),
            floor: VerticalDistance::Msl(1500),
            polygon: polygon![
                (53.10111, 8.974999),
                (53.102776, 9.079166),
                (52.97028, 9.084444),
                (52.96889, 8.982222),
                (53.10111, 8.974999)
            ],
        });
        let nd = builder.build();

        assert_eq!(nd.airspaces_at(&inside).len(), 1);
        assert!(nd.airspaces_at(&outside).is_empty());
    }

    #[test]
    fn type_mask_ifr_excludes_mapelement() {
        assert!(!TypeMask::IFR.contains(TypeMask::MAPELEMENT));
        assert!(TypeMask::IFR.contains(TypeMask::AIRPORT));
        assert!(TypeMask::ALL.contains(TypeMask::MAPELEMENT));
    }
}
