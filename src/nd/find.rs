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

//! The DB lookup facade used by `ParseState`'s resolution phase (spec.md
//! §4.3): identifier search across every object kind, and a coordinate-box
//! search used for the free-text/coordinate fallback.

use geo::{Distance, Geodesic};

use super::{Fix, NavEntity, NavigationData, TypeMask};
use crate::geom::Coordinate;
use crate::measurements::Length;

/// Restricts an identifier or coordinate search to a subset of object
/// kinds, mirroring the `type_mask` argument threaded through spec.md
/// §4.3's `FindCoord` signatures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SearchFlags(TypeMask);

impl SearchFlags {
    pub const ANY: Self = Self(TypeMask::ALL);
    pub const IFR: Self = Self(TypeMask::IFR);

    pub fn new(mask: TypeMask) -> Self {
        Self(mask)
    }

    pub fn allows(&self, mask: TypeMask) -> bool {
        self.0.intersects(mask)
    }
}

/// A borrowed facade over [`NavigationData`]'s identifier and coordinate
/// lookups. Does not own any data; one is created per lookup via
/// [`NavigationData::find`].
pub struct FindCoord<'a> {
    nd: &'a NavigationData,
}

impl<'a> FindCoord<'a> {
    pub(crate) fn new(nd: &'a NavigationData) -> Self {
        Self { nd }
    }

    /// Finds every entity matching `ident`, restricted to `flags`, airways
    /// and SIDs/STARs included only when requested via the full `TypeMask`
    /// (spec.md §4.2.2, "If the token names an airway, a SID, or a STAR").
    ///
    /// Results are ordered airport, then navaid, then designated point,
    /// then mapelement, then route objects — the precedence spec.md §4.2.2
    /// assigns when an identifier collides across object kinds.
    pub fn by_ident(&self, ident: &str, flags: SearchFlags) -> Vec<NavEntity> {
        let mut results = Vec::new();

        if flags.allows(TypeMask::AIRPORT) {
            results.extend(
                self.nd
                    .airports()
                    .filter(|a| a.ident() == ident)
                    .map(|a| NavEntity::Airport(a.clone())),
            );
        }
        if flags.allows(TypeMask::NAVAID) {
            results.extend(
                self.nd
                    .navaids()
                    .filter(|n| n.ident() == ident)
                    .map(|n| NavEntity::Navaid(n.clone())),
            );
        }
        if flags.allows(TypeMask::INTERSECTION) {
            results.extend(
                self.nd
                    .points()
                    .filter(|p| p.ident() == ident)
                    .map(|p| NavEntity::Point(p.clone())),
            );
        }
        if flags.allows(TypeMask::MAPELEMENT) {
            results.extend(
                self.nd
                    .mapelements()
                    .filter(|m| m.ident() == ident)
                    .map(|m| NavEntity::MapElement(m.clone())),
            );
        }

        results.extend(
            self.nd
                .airways()
                .filter(|a| a.ident == ident)
                .map(|a| NavEntity::Airway(a.clone())),
        );
        results.extend(
            self.nd
                .sids()
                .filter(|s| s.ident == ident)
                .map(|s| NavEntity::Sid(s.clone())),
        );
        results.extend(
            self.nd
                .stars()
                .filter(|s| s.ident == ident)
                .map(|s| NavEntity::Star(s.clone())),
        );

        results
    }

    /// As [`by_ident`](Self::by_ident), restricted to the single closest
    /// match when `near` is given, tie-breaking on shortest identifier then
    /// nearest coordinate, the same precedence spec.md §4.2.2 uses to
    /// disambiguate a terminal-area VFR waypoint ident shared by two
    /// airports.
    pub fn by_ident_nearest(
        &self,
        ident: &str,
        flags: SearchFlags,
        near: Coordinate,
    ) -> Option<NavEntity> {
        let near_point: geo::Point<f64> = near.into();

        self.by_ident(ident, flags).into_iter().min_by(|a, b| {
            let da = a
                .coordinate()
                .map(|c| Geodesic.distance(near_point, c.into()))
                .unwrap_or(f64::MAX);
            let db = b
                .coordinate()
                .map(|c| Geodesic.distance(near_point, c.into()))
                .unwrap_or(f64::MAX);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Finds every point-like entity within `radius` of `coord`, restricted
    /// to `flags`. Used for the coordinate-fix fallback (spec.md §4.2.2,
    /// latitude/longitude and place/bearing/distance tokens with no named
    /// match).
    pub fn by_coordinate(&self, coord: Coordinate, radius: Length, flags: SearchFlags) -> Vec<NavEntity> {
        self.nd
            .index
            .within_radius(&coord, radius)
            .filter(|entity| flags.allows(entity.type_mask()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VerticalDistance;
    use crate::nd::{Airport, NavigationData};

    fn nd_with_airports() -> NavigationData {
        let mut builder = NavigationData::builder();
        builder
            .add_airport(Airport {
                icao_ident: "EDDH".to_string(),
                iata_designator: "HAM".to_string(),
                name: "Hamburg".to_string(),
                coordinate: Coordinate::new(53.63, 9.99),
                elevation: VerticalDistance::Msl(53),
                mag_var: None,
            })
            .add_airport(Airport {
                icao_ident: "EDHL".to_string(),
                iata_designator: "LBC".to_string(),
                name: "Luebeck".to_string(),
                coordinate: Coordinate::new(53.81, 10.70),
                elevation: VerticalDistance::Msl(53),
                mag_var: None,
            });
        builder.build()
    }

    #[test]
    fn by_ident_finds_airport() {
        let nd = nd_with_airports();
        let results = nd.find().by_ident("EDDH", SearchFlags::ANY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ident(), "EDDH");
    }

    #[test]
    fn by_ident_respects_flags() {
        let nd = nd_with_airports();
        let results = nd.find().by_ident("EDDH", SearchFlags::new(TypeMask::NAVAID));
        assert!(results.is_empty());
    }

    #[test]
    fn by_coordinate_finds_nearby_airport() {
        let nd = nd_with_airports();
        let results = nd
            .find()
            .by_coordinate(Coordinate::new(53.63, 9.99), Length::nm(10.0), SearchFlags::ANY);
        assert_eq!(results.len(), 1);
    }
}
