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

//! Accumulates the boundary records of a single controlled or restrictive
//! airspace into an [`Airspace`] polygon.
//!
//! ARINC 424 airspaces are a sequence of boundary records, each one segment
//! of the perimeter (a straight leg, a rhumb line, a circle or an arc); the
//! last carries a "return to origin" flag that ends the sequence.

use arinc424::fields::{BoundaryPath, LowerUpperLimit, RestrictiveType, UnitIndicator};
use arinc424::records::{ControlledAirspace, RestrictiveAirspace};
use geo::{Bearing, Destination, Geodesic, Point};

use super::fields::limit_to_vertical_distance;
use crate::core::VerticalDistance;
use crate::nd::{Airspace, AirspaceClassification, AirspaceType};

/// Number of interpolated points per 90 degrees of arc.
const ARC_POINTS_PER_QUADRANT: usize = 6;

#[derive(Debug)]
struct BoundarySegment {
    path: BoundaryPath,
    end_point: Point<f64>,
    arc_center: Option<Point<f64>>,
    arc_radius_m: Option<f64>,
}

#[derive(Default)]
pub(super) struct AirspaceBuilder {
    name: Option<String>,
    airspace_type: Option<AirspaceType>,
    classification: Option<AirspaceClassification>,
    ceiling: Option<VerticalDistance>,
    floor: Option<VerticalDistance>,
    segments: Vec<BoundarySegment>,
    start_point: Option<Point<f64>>,
}

impl AirspaceBuilder {
    pub(super) fn add_controlled(&mut self, record: ControlledAirspace) -> Result<(), arinc424::Error> {
        let coord = coordinate_of(record.latitude, record.longitude)?;

        if self.start_point.is_none() {
            self.start_point = coord;
            self.name = record.arsp_name.map(|n| n.as_str().trim().to_string());
            self.airspace_type = Some(arsp_type_to_airspace_type(record.arsp_type));
            self.classification = record
                .arsp_class
                .and_then(|c| classification_from_byte(c.as_str().as_bytes().first().copied()));
            self.ceiling = record
                .upper_limit
                .map(|l| limit_to_vertical_distance(l, record.upper_unit_indicator));
            self.floor = record
                .lower_limit
                .map(|l| limit_to_vertical_distance(l, record.lower_unit_indicator));
        }

        let arc_center = coordinate_of(record.arc_origin_latitude, record.arc_origin_longitude)?;
        let arc_radius_m = record.arc_dist.map(|d| d.dist()).transpose()?.map(|nm| nm as f64 * 1852.0);

        self.push_segment(record.bdry_via.path, coord, arc_center, arc_radius_m)
    }

    pub(super) fn add_restrictive(&mut self, record: RestrictiveAirspace) -> Result<(), arinc424::Error> {
        let coord = coordinate_of(record.latitude, record.longitude)?;

        if self.start_point.is_none() {
            self.start_point = coord;
            self.name = record.arsp_name.map(|n| n.as_str().trim().to_string());
            self.airspace_type = Some(restrictive_type_to_airspace_type(record.restrictive_type));
            self.classification = None;
            self.ceiling = record
                .upper_limit
                .map(|l| limit_to_vertical_distance(l, record.upper_unit_indicator));
            self.floor = record
                .lower_limit
                .map(|l| limit_to_vertical_distance(l, record.lower_unit_indicator));
        }

        let arc_center = coordinate_of(record.arc_origin_latitude, record.arc_origin_longitude)?;
        let arc_radius_m = record.arc_dist.map(|d| d.dist()).transpose()?.map(|nm| nm as f64 * 1852.0);

        self.push_segment(record.bdry_via.path, coord, arc_center, arc_radius_m)
    }

    fn push_segment(
        &mut self,
        path: BoundaryPath,
        coord: Option<Point<f64>>,
        arc_center: Option<Point<f64>>,
        arc_radius_m: Option<f64>,
    ) -> Result<(), arinc424::Error> {
        let end_point = coord.or(arc_center).ok_or(arinc424::Error::InvalidVariant {
            field: "Boundary",
            bytes: Vec::new(),
            expected: "a coordinate or an arc center",
        })?;

        self.segments.push(BoundarySegment {
            path,
            end_point,
            arc_center,
            arc_radius_m,
        });

        Ok(())
    }

    pub(super) fn build(self) -> Airspace {
        let polygon = self.build_polygon();

        Airspace {
            name: self.name.unwrap_or_default(),
            airspace_type: self.airspace_type.unwrap_or(AirspaceType::CTA),
            classification: self.classification,
            ceiling: self.ceiling.unwrap_or(VerticalDistance::Unlimited),
            floor: self.floor.unwrap_or(VerticalDistance::Gnd),
            polygon,
        }
    }

    fn build_polygon(&self) -> geo::Polygon<f64> {
        if self.segments.len() == 1 && self.segments[0].path == BoundaryPath::Circle {
            return self.build_circle(&self.segments[0]);
        }

        let mut coords: Vec<geo::Coord<f64>> = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            let prev_point = if i == 0 {
                self.start_point.unwrap_or(segment.end_point)
            } else {
                self.segments[i - 1].end_point
            };

            match segment.path {
                BoundaryPath::Circle | BoundaryPath::GreatCircle | BoundaryPath::RhumbLine => {
                    coords.push(segment.end_point.into());
                }
                BoundaryPath::ClockwiseArc => {
                    coords.extend(self.interpolate_arc(prev_point, segment, true));
                }
                BoundaryPath::CounterClockwiseArc => {
                    coords.extend(self.interpolate_arc(prev_point, segment, false));
                }
            }
        }

        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
            if first != last {
                coords.push(first);
            }
        }

        geo::Polygon::new(geo::LineString::from(coords), vec![])
    }

    fn build_circle(&self, segment: &BoundarySegment) -> geo::Polygon<f64> {
        let center = segment.end_point;
        let radius_m = segment.arc_radius_m.unwrap_or(0.0);

        let num_points = ARC_POINTS_PER_QUADRANT * 4;
        let mut coords = Vec::with_capacity(num_points + 1);

        for i in 0..num_points {
            let bearing_deg = i as f64 * 360.0 / num_points as f64;
            let point = Geodesic.destination(center, bearing_deg, radius_m);
            coords.push(geo::Coord::from(point));
        }

        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }

        geo::Polygon::new(geo::LineString::from(coords), vec![])
    }

    fn interpolate_arc(&self, start: Point<f64>, segment: &BoundarySegment, clockwise: bool) -> Vec<geo::Coord<f64>> {
        let (Some(center), Some(radius_m)) = (segment.arc_center, segment.arc_radius_m) else {
            return vec![segment.end_point.into()];
        };

        let start_bearing = Geodesic.bearing(center, start);
        let end_bearing = Geodesic.bearing(center, segment.end_point);
        let sweep_deg = arc_sweep_degrees(start_bearing, end_bearing, clockwise);

        let num_points = ((sweep_deg.abs() / 90.0) * ARC_POINTS_PER_QUADRANT as f64).ceil() as usize;
        let num_points = num_points.max(2);

        let mut coords = Vec::with_capacity(num_points);
        for i in 1..=num_points {
            let fraction = i as f64 / num_points as f64;
            let bearing_deg = start_bearing + sweep_deg * fraction;
            let point = Geodesic.destination(center, bearing_deg, radius_m);
            coords.push(geo::Coord::from(point));
        }

        coords
    }
}

/// The signed sweep angle from `start` to `end`, going in the requested
/// direction (clockwise positive).
fn arc_sweep_degrees(start: f64, end: f64, clockwise: bool) -> f64 {
    let mut diff = end - start;

    if clockwise {
        if diff <= 0.0 {
            diff += 360.0;
        }
    } else if diff >= 0.0 {
        diff -= 360.0;
    }

    diff
}

fn coordinate_of(
    lat: Option<arinc424::fields::Latitude>,
    lon: Option<arinc424::fields::Longitude>,
) -> Result<Option<Point<f64>>, arinc424::Error> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Point::new(lon.as_decimal()?, lat.as_decimal()?))),
        _ => Ok(None),
    }
}

fn classification_from_byte(byte: Option<u8>) -> Option<AirspaceClassification> {
    match byte {
        Some(b'A') => Some(AirspaceClassification::A),
        Some(b'B') => Some(AirspaceClassification::B),
        Some(b'C') => Some(AirspaceClassification::C),
        Some(b'D') => Some(AirspaceClassification::D),
        Some(b'E') => Some(AirspaceClassification::E),
        Some(b'F') => Some(AirspaceClassification::F),
        Some(b'G') => Some(AirspaceClassification::G),
        _ => None,
    }
}

fn arsp_type_to_airspace_type(arsp_type: arinc424::fields::ArspType) -> AirspaceType {
    use arinc424::fields::ArspType;

    match arsp_type {
        ArspType::ClassC | ArspType::ClassB | ArspType::ControlArea => AirspaceType::CTA,
        ArspType::TerminalControlArea => AirspaceType::TMA,
        ArspType::RadarZone => AirspaceType::RadarZone,
        ArspType::RadioMandatoryZone => AirspaceType::RMZ,
        ArspType::TransponderMandatoryZone => AirspaceType::TMZ,
        ArspType::ControlZone => AirspaceType::CTR,
    }
}

fn restrictive_type_to_airspace_type(restrictive_type: RestrictiveType) -> AirspaceType {
    match restrictive_type {
        RestrictiveType::Prohibited => AirspaceType::Prohibited,
        RestrictiveType::Danger | RestrictiveType::Warning => AirspaceType::Danger,
        RestrictiveType::Restricted
        | RestrictiveType::Alert
        | RestrictiveType::Caution
        | RestrictiveType::LongTermTFR
        | RestrictiveType::MOA
        | RestrictiveType::NationalSecurityArea
        | RestrictiveType::Training
        | RestrictiveType::UnspecifiedOrUnknown => AirspaceType::Restricted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_sweep_clockwise_wraps_past_zero() {
        assert!((arc_sweep_degrees(350.0, 10.0, true) - 20.0).abs() < 1e-6);
        assert!((arc_sweep_degrees(0.0, 90.0, true) - 90.0).abs() < 1e-6);
    }

    #[test]
    fn arc_sweep_counterclockwise_is_negative() {
        assert!((arc_sweep_degrees(90.0, 0.0, false) - (-90.0)).abs() < 1e-6);
    }

    #[test]
    fn controlled_airspace_record_builds_polygon() {
        const AIRSPACE: &[u8] = b"SUSAUCK6TKJFK PAB  A00100     R N40394857W074144423N40413000W07409590000402450   GND  A07000MNEW YORK AREA A               676061703";

        let record = ControlledAirspace::try_from(AIRSPACE).expect("record should parse");
        let mut builder = AirspaceBuilder::default();
        builder.add_controlled(record).expect("record should be accepted");
        let airspace = builder.build();

        assert_eq!(airspace.name, "NEW YORK AREA A");
        assert_eq!(airspace.classification, Some(AirspaceClassification::B));
        assert_eq!(airspace.floor, VerticalDistance::Gnd);
        assert!(!airspace.polygon.exterior().0.is_empty());
    }
}
