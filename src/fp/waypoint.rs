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

//! `ParseWaypoint` and its supporting types (spec.md §3).

use petgraph::graph::NodeIndex;

use crate::core::VerticalDistance;
use crate::geom::Coordinate;
use crate::measurements::{Angle, Duration, Length, Speed};
use crate::nd::TypeMask;

/// Which flight rules apply to the leg leading to a waypoint.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Rules {
    Ifr,
    Vfr,
}

/// The kind of connection from a waypoint to the next (GLOSSARY, "Path
/// code").
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum PathCode {
    #[default]
    None,
    Airway(String),
    DirectTo,
    Sid(String),
    Star(String),
    VfrDeparture,
    VfrArrival,
    VfrTransition,
    /// A `STAY[n]` pseudo-waypoint (GLOSSARY, "Stay"); `n` indexes into
    /// `otherinfo`'s `STAYINFOn` entry.
    Stay(u8),
}

impl PathCode {
    /// The path name used for airway-continuation matching during
    /// expansion (spec.md §4.2.3): the airway/SID/STAR ident, or `None` for
    /// every other path code.
    pub fn route_ident(&self) -> Option<&str> {
        match self {
            Self::Airway(s) | Self::Sid(s) | Self::Star(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_route(&self) -> bool {
        self.route_ident().is_some()
    }
}

/// One candidate graph-vertex binding for a [`ParseWaypoint`], with the
/// cumulative distance and predecessor chain used to reach it (spec.md §3,
/// §5 ordering guarantee).
#[derive(Clone, Debug)]
pub struct Path {
    pub vertex: NodeIndex,
    /// Cumulative great-circle/airway distance from the departure, in
    /// nautical miles.
    pub dist: f64,
    /// The vertex chain from the previous-waypoint anchor up to (but not
    /// including) this candidate, nearest-to-this-candidate first (spec.md
    /// §5).
    pub predecessors: Vec<NodeIndex>,
}

impl Path {
    pub fn seed(vertex: NodeIndex) -> Self {
        Self {
            vertex,
            dist: 0.0,
            predecessors: Vec::new(),
        }
    }
}

/// A single token of the Item-15 route, progressively enriched by the
/// resolution pipeline (spec.md §3, "Lifecycle").
#[derive(Clone, Debug)]
pub struct ParseWaypoint {
    /// The identifier as parsed, with speed/altitude and course/distance
    /// suffixes already stripped.
    pub ident: String,
    pub type_mask: TypeMask,
    pub rules: Rules,
    pub speed: Option<Speed>,
    pub altitude: Option<VerticalDistance>,
    /// Standard-altitude flag (`F350`-style vs. the altflag_standard the
    /// base spec tracks for the initial level).
    pub altitude_is_standard: bool,
    /// Magnetic course and distance for an `IDENT######`-style fix
    /// (spec.md §4.2.2).
    pub course_dist: Option<(Angle, Length)>,
    pub path_code: PathCode,
    pub candidates: Vec<Path>,
    /// The candidate chosen by the backward pass (spec.md §4.2.3).
    pub resolved: Option<NodeIndex>,
    /// Set directly for a coordinate-literal token (spec.md §4.2.1,
    /// `process_coord`), before any DB lookup.
    pub coordinate: Option<Coordinate>,
    /// Whether this waypoint was inserted by airway/SID/STAR expansion
    /// rather than appearing in the original text (spec.md §3).
    pub expanded: bool,
    /// Estimated elapsed time from departure to this waypoint, cumulative
    /// (not per-leg), the same convention `EET/`'s `IDENT HHMM` pairs use
    /// (spec.md §4.2.4, §4.5 `add_eet`).
    pub et: Option<Duration>,
}

impl ParseWaypoint {
    pub fn new(ident: impl Into<String>, type_mask: TypeMask, rules: Rules) -> Self {
        Self {
            ident: ident.into(),
            type_mask,
            rules,
            speed: None,
            altitude: None,
            altitude_is_standard: false,
            course_dist: None,
            path_code: PathCode::None,
            candidates: Vec::new(),
            resolved: None,
            coordinate: None,
            expanded: false,
            et: None,
        }
    }

    pub fn is_coordinate_fix(&self) -> bool {
        self.coordinate.is_some() && self.candidates.is_empty()
    }
}
