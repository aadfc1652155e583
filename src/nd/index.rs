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

//! Spatial indexing for the DB lookup facade's bbox/nearest queries
//! (spec.md §4.3).

use std::rc::Rc;

use geo::{Distance, Geodesic, Point};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, RTreeObject, AABB};

use super::{Airport, Airspace, MapElement, Navaid, NavEntity};
use crate::geom::Coordinate;
use crate::measurements::{Length, LengthUnit};

/// Approximate conversion factor: 1 nautical mile ≈ 1/60 degree.
const NM_TO_DEG: f64 = 1.0 / 60.0;

/// Spatial index over every [`NavEntity`] kind that has a single coordinate,
/// plus airspace bounding boxes for [`NavigationData::airspaces_at`].
///
/// [`NavigationData::airspaces_at`]: super::NavigationData::airspaces_at
#[derive(Clone, Debug, Default)]
pub struct NavIndex {
    points: RTree<GeomWithData<Point<f64>, NavEntity>>,
    airspaces: RTree<GeomWithData<Rectangle<Point<f64>>, Rc<Airspace>>>,
}

impl NavIndex {
    pub fn build(
        airports: &[Rc<Airport>],
        navaids: &[Rc<Navaid>],
        points: &[Rc<super::DesignatedPoint>],
        mapelements: &[Rc<MapElement>],
        airspaces: &[Airspace],
    ) -> Self {
        let mut entries = Vec::new();

        for airport in airports {
            entries.push(GeomWithData::new(
                airport.coordinate.into(),
                NavEntity::Airport(Rc::clone(airport)),
            ));
        }
        for navaid in navaids {
            entries.push(GeomWithData::new(
                navaid.coordinate.into(),
                NavEntity::Navaid(Rc::clone(navaid)),
            ));
        }
        for point in points {
            entries.push(GeomWithData::new(
                point.coordinate.into(),
                NavEntity::Point(Rc::clone(point)),
            ));
        }
        for mapelement in mapelements {
            entries.push(GeomWithData::new(
                mapelement.coordinate.into(),
                NavEntity::MapElement(Rc::clone(mapelement)),
            ));
        }

        let airspace_entries = airspaces
            .iter()
            .map(|a| {
                let rect = Rectangle::from_aabb(a.polygon.envelope());
                GeomWithData::new(rect, Rc::new(a.clone()))
            })
            .collect();

        Self {
            points: RTree::bulk_load(entries),
            airspaces: RTree::bulk_load(airspace_entries),
        }
    }

    /// Returns entities within `radius` of `coord`, filtered to actual
    /// geodesic distance after a cheap bounding-box prefilter.
    pub fn within_radius(&self, coord: &Coordinate, radius: Length) -> impl Iterator<Item = &NavEntity> {
        let radius_nm = *radius.convert_to(LengthUnit::NauticalMiles).value() as f64;
        let radius_deg = radius_nm * NM_TO_DEG;

        let center: Point<f64> = (*coord).into();
        let lat_rad = center.y().to_radians();
        let lon_expansion = if lat_rad.cos().abs() > 0.01 {
            radius_deg / lat_rad.cos()
        } else {
            radius_deg * 100.0
        };

        let envelope = AABB::from_corners(
            Point::new(center.x() - lon_expansion, center.y() - radius_deg),
            Point::new(center.x() + lon_expansion, center.y() + radius_deg),
        );

        let radius_m = radius.to_si() as f64;

        self.points
            .locate_in_envelope_intersecting(&envelope)
            .filter(move |entry| Geodesic.distance(center, *entry.geom()) <= radius_m)
            .map(|entry| &entry.data)
    }

    pub fn airspace_candidates_at(&self, point: &Coordinate) -> impl Iterator<Item = &Airspace> {
        let envelope = AABB::from_point((*point).into());
        self.airspaces
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VerticalDistance;
    use crate::nd::{AirspaceType, DesignatedPoint, Region, WaypointUsage};

    fn test_airport(ident: &str, lat: f64, lon: f64) -> Rc<Airport> {
        Rc::new(Airport {
            icao_ident: ident.to_string(),
            iata_designator: String::new(),
            name: ident.to_string(),
            coordinate: Coordinate::new(lat, lon),
            elevation: VerticalDistance::Gnd,
            mag_var: None,
        })
    }

    fn test_point(ident: &str, lat: f64, lon: f64) -> Rc<DesignatedPoint> {
        Rc::new(DesignatedPoint {
            ident: ident.to_string(),
            coordinate: Coordinate::new(lat, lon),
            usage: WaypointUsage::HiLoAltitude,
            region: Region::Enroute,
            mag_var: None,
        })
    }

    #[test]
    fn within_radius_finds_airports() {
        let airports = vec![
            test_airport("EDDH", 53.63, 9.99),
            test_airport("EDHL", 53.81, 10.70),
        ];
        let index = NavIndex::build(&airports, &[], &[], &[], &[]);

        let center = Coordinate::new(53.63, 9.99);
        let results: Vec<_> = index.within_radius(&center, Length::nm(10.0)).collect();
        assert_eq!(results.len(), 1);

        let results: Vec<_> = index.within_radius(&center, Length::nm(50.0)).collect();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn within_radius_finds_mixed_entities() {
        let airports = vec![test_airport("EDDH", 53.63, 9.99)];
        let points = vec![test_point("DHN1", 53.60, 9.95)];
        let index = NavIndex::build(&airports, &[], &points, &[], &[]);

        let center = Coordinate::new(53.62, 9.97);
        let results: Vec<_> = index.within_radius(&center, Length::nm(5.0)).collect();
        assert_eq!(results.len(), 2);

        assert!(results.iter().any(|e| matches!(e, NavEntity::Airport(_))));
        assert!(results.iter().any(|e| matches!(e, NavEntity::Point(_))));
    }

    #[test]
    fn airspace_candidates_match_bounding_box() {
        let airspaces = vec![Airspace {
            name: "Test".to_string(),
            airspace_type: AirspaceType::TMA,
            classification: None,
            ceiling: VerticalDistance::Fl(65),
            floor: VerticalDistance::Msl(1500),
            polygon: polygon![
                (53.0, 9.0),
                (53.0, 10.0),
                (54.0, 10.0),
                (54.0, 9.0),
                (53.0, 9.0),
            ],
        }];
        let index = NavIndex::build(&[], &[], &[], &[], &airspaces);

        let candidates: Vec<_> = index
            .airspace_candidates_at(&Coordinate::new(53.5, 9.5))
            .collect();
        assert_eq!(candidates.len(), 1);

        let candidates: Vec<_> = index
            .airspace_candidates_at(&Coordinate::new(52.0, 8.0))
            .collect();
        assert!(candidates.is_empty());
    }
}
