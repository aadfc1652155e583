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

use super::Fix;
use crate::geom::Coordinate;

/// A charted ground feature used as a VFR reporting point (a town, a lake, a
/// landmark) that is not itself a designated navigation point.
///
/// `ParseWaypoint::type_mask` excludes this kind for IFR waypoints (spec.md
/// §3): an IFR route can only turn at an airport, navaid or designated
/// point.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapElement {
    pub ident: String,
    pub description: String,
    pub coordinate: Coordinate,
}

impl Fix for MapElement {
    fn ident(&self) -> &str {
        &self.ident
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
