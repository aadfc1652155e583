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

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::Error;

use super::airway::{Airway, Sid, Star};
use super::index::NavIndex;
use super::{Airport, Airspace, DesignatedPoint, MapElement, Navaid, NavigationData};

/// Accumulates navigation objects into a [`NavigationData`] snapshot.
///
/// Mirrors `efb`'s `NavigationDataBuilder`: push objects in any order, one
/// call per object, then [`build`](Self::build) once to bulk-load the
/// spatial index.
#[derive(Default)]
pub struct NavigationDataBuilder {
    airports: Vec<Rc<Airport>>,
    navaids: Vec<Rc<Navaid>>,
    points: Vec<Rc<DesignatedPoint>>,
    mapelements: Vec<Rc<MapElement>>,
    airways: Vec<Rc<Airway>>,
    sids: Vec<Rc<Sid>>,
    stars: Vec<Rc<Star>>,
    airspaces: Vec<Airspace>,
    errors: Vec<Error>,
    partition_id: u64,
}

impl NavigationDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds this builder's partition id from a hash of the source bytes it
    /// was built from (e.g. a raw ARINC 424 file), following `efb`'s
    /// `with_source`.
    pub fn with_source(mut self, data: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        self.partition_id = hasher.finish();
        self
    }

    pub fn add_airport(&mut self, airport: Airport) -> &mut Self {
        self.airports.push(Rc::new(airport));
        self
    }

    pub fn add_navaid(&mut self, navaid: Navaid) -> &mut Self {
        self.navaids.push(Rc::new(navaid));
        self
    }

    pub fn add_point(&mut self, point: DesignatedPoint) -> &mut Self {
        self.points.push(Rc::new(point));
        self
    }

    pub fn add_mapelement(&mut self, mapelement: MapElement) -> &mut Self {
        self.mapelements.push(Rc::new(mapelement));
        self
    }

    pub fn add_airway(&mut self, airway: Airway) -> &mut Self {
        self.airways.push(Rc::new(airway));
        self
    }

    pub fn add_sid(&mut self, sid: Sid) -> &mut Self {
        self.sids.push(Rc::new(sid));
        self
    }

    pub fn add_star(&mut self, star: Star) -> &mut Self {
        self.stars.push(Rc::new(star));
        self
    }

    pub fn add_airspace(&mut self, airspace: Airspace) -> &mut Self {
        self.airspaces.push(airspace);
        self
    }

    pub fn add_error(&mut self, error: Error) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn build(self) -> NavigationData {
        let index = NavIndex::build(
            &self.airports,
            &self.navaids,
            &self.points,
            &self.mapelements,
            &self.airspaces,
        );

        NavigationData {
            airports: self.airports,
            navaids: self.navaids,
            points: self.points,
            mapelements: self.mapelements,
            airways: self.airways,
            sids: self.sids,
            stars: self.stars,
            airspaces: self.airspaces,
            index,
        }
    }
}

impl Extend<Airspace> for NavigationDataBuilder {
    fn extend<I: IntoIterator<Item = Airspace>>(&mut self, iter: I) {
        self.airspaces.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VerticalDistance;

    #[test]
    fn build_collects_every_object_kind() {
        let mut builder = NavigationDataBuilder::new();
        builder
            .add_airport(Airport {
                icao_ident: "EDDH".to_string(),
                iata_designator: "HAM".to_string(),
                name: "Hamburg".to_string(),
                coordinate: crate::geom::Coordinate::new(53.63, 9.99),
                elevation: VerticalDistance::Msl(53),
                mag_var: None,
            })
            .add_navaid(Navaid {
                ident: "HAM".to_string(),
                kind: super::super::NavaidKind::VorDme,
                coordinate: crate::geom::Coordinate::new(53.68, 10.0),
                mag_var: None,
                frequency_khz: 114_400,
            });

        let nd = builder.build();
        assert_eq!(nd.airports.len(), 1);
        assert_eq!(nd.navaids.len(), 1);
    }

    #[test]
    fn with_source_is_deterministic() {
        let a = NavigationDataBuilder::new().with_source(b"abc").partition_id;
        let b = NavigationDataBuilder::new().with_source(b"abc").partition_id;
        assert_eq!(a, b);
    }
}
