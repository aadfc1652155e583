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

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geo::{Bearing, Destination, Distance, Geodesic};

use crate::error::Error;
use crate::fc;
use crate::measurements::{Angle, AngleUnit, Length, LengthUnit};

/// A WGS84 latitude/longitude coordinate.
///
/// Corresponds to the base spec's `Point`: a geodesic coordinate used
/// throughout the flight-plan pipeline for distance, bearing and
/// course-at-distance calculations, and for the textual forms (ICAO
/// surface-position strings, Maidenhead locators) the Item-18/Item-19
/// free text and cockpit displays use.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Coordinate {
    /// Latitude in the range from -90° (south) to 90° (north).
    pub latitude: f64,

    /// Longitude in the range from -180° (west) to 180° (east).
    pub longitude: f64,
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Self {
            latitude: c.y,
            longitude: c.x,
        }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self {
            latitude: p.y(),
            longitude: p.x(),
        }
    }
}

impl Coordinate {
    /// An coordinate sentinel used by parse waypoints before a position has
    /// been resolved, corresponding to the base spec's `invalid` Point.
    pub const INVALID: Self = Self {
        latitude: f64::NAN,
        longitude: f64::NAN,
    };

    /// Creates a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether this coordinate is the [`INVALID`](Self::INVALID) sentinel.
    pub fn is_valid(&self) -> bool {
        !self.latitude.is_nan() && !self.longitude.is_nan()
    }

    /// Returns the initial true bearing from this point to `other`.
    ///
    /// Uses geodesic calculation on the WGS84 ellipsoid.
    pub fn bearing(&self, other: &Coordinate) -> Angle {
        let bearing = Geodesic.bearing((*self).into(), (*other).into());
        Angle::deg(bearing as f32)
    }

    /// Returns the distance from this point to the `other`.
    ///
    /// Uses geodesic calculation on the WGS84 ellipsoid.
    pub fn dist(&self, other: &Coordinate) -> Length {
        let distance_m = Geodesic.distance((*self).into(), (*other).into());
        Length::m(distance_m as f32)
    }

    /// Returns the point reached by travelling `distance` from this point
    /// along the given initial true `course`.
    ///
    /// Used to resolve `IDENT CCC DDD` course/distance fixes (base spec
    /// §4.2.2) once the magnetic course has been converted to true.
    pub fn course_distance(&self, course: Angle, distance: Length) -> Coordinate {
        let dest = Geodesic.destination(
            (*self).into(),
            *course.convert_to(AngleUnit::Degrees).value() as f64,
            *distance.convert_to(LengthUnit::Meters).value() as f64,
        );
        dest.into()
    }

    /// Returns the point on the great circle through `a` and `b` that is
    /// closest to this point (the cross-track projection), together with
    /// its along-track distance from `a`.
    ///
    /// Used by the backward expansion pass's turn-point retention check
    /// (base spec §4.5 `erase_unnecessary_airway(keep_turnpoints = true)`)
    /// and to materialize expanded airway waypoints onto the great-circle
    /// chord between two kept turn points.
    pub fn nearest_on_great_circle(&self, a: &Coordinate, b: &Coordinate) -> Coordinate {
        let v = |c: &Coordinate| -> [f64; 3] {
            let lat = c.latitude.to_radians();
            let lon = c.longitude.to_radians();
            [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
        };
        let cross = |u: [f64; 3], w: [f64; 3]| -> [f64; 3] {
            [
                u[1] * w[2] - u[2] * w[1],
                u[2] * w[0] - u[0] * w[2],
                u[0] * w[1] - u[1] * w[0],
            ]
        };
        let norm = |u: [f64; 3]| -> f64 { (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt() };
        let scale = |u: [f64; 3], s: f64| -> [f64; 3] { [u[0] * s, u[1] * s, u[2] * s] };

        let va = v(a);
        let vb = v(b);
        let vp = v(self);

        // the great circle's pole (normal to the plane through a, b and the
        // sphere's center), then the intersection of the perpendicular great
        // circle through p and that pole with the arc a-b.
        let pole = cross(va, vb);
        let pole_norm = norm(pole);
        if pole_norm < 1e-12 {
            // a and b (anti)coincide: there is no unique great circle.
            return *a;
        }
        let pole = scale(pole, 1.0 / pole_norm);
        let along = cross(pole, vp);
        let along_norm = norm(along);
        if along_norm < 1e-12 {
            return *self;
        }
        let projected = cross(along, pole);
        let projected_norm = norm(projected);
        let projected = scale(projected, 1.0 / projected_norm);

        let lat = projected[2].asin();
        let lon = projected[1].atan2(projected[0]);

        Coordinate::new(lat.to_degrees(), lon.to_degrees())
    }

    /// Perpendicular distance from this point to the great-circle chord
    /// `a`-`b`, used by `erase_unnecessary_airway`'s deviation threshold.
    pub fn cross_track_distance(&self, a: &Coordinate, b: &Coordinate) -> Length {
        let nearest = self.nearest_on_great_circle(a, b);
        self.dist(&nearest)
    }

    pub fn from_dms(latitude: (i8, u8, u8), longitude: (i16, u8, u8)) -> Self {
        Self {
            latitude: latitude.0.signum() as f64
                * fc::dms_to_decimal(latitude.0.unsigned_abs() as u16, latitude.1, latitude.2),
            longitude: longitude.0.signum() as f64
                * fc::dms_to_decimal(longitude.0.unsigned_abs() as u16, longitude.1, longitude.2),
        }
    }

    /// Parses an ICAO Item-15/Item-19 surface-coordinate literal:
    /// `DDMM[SS]{N,S}DDDMM[SS]{E,W}` (base spec §6), e.g. `4712N00815E` or
    /// `471200N0081500E`.
    pub fn from_icao_string(s: &str) -> Result<Self, Error> {
        let bad = || Error::UnexpectedToken(s.to_string());
        let ns = s.find(['N', 'S']).ok_or_else(bad)?;
        let lat_digits = &s[..ns];
        let ns_ch = s.as_bytes()[ns] as char;
        let rest = &s[ns + 1..];
        let ew = rest.find(['E', 'W']).ok_or_else(bad)?;
        let lon_digits = &rest[..ew];
        let ew_ch = rest.as_bytes()[ew] as char;
        if ew + 1 != rest.len() {
            return Err(bad());
        }

        let parse_part = |digits: &str, deg_len: usize| -> Result<(u16, u8, u8), Error> {
            match digits.len() {
                n if n == deg_len + 2 => {
                    let deg: u16 = digits[..deg_len].parse().map_err(|_| bad())?;
                    let min: u8 = digits[deg_len..].parse().map_err(|_| bad())?;
                    Ok((deg, min, 0))
                }
                n if n == deg_len + 4 => {
                    let deg: u16 = digits[..deg_len].parse().map_err(|_| bad())?;
                    let min: u8 = digits[deg_len..deg_len + 2].parse().map_err(|_| bad())?;
                    let sec: u8 = digits[deg_len + 2..].parse().map_err(|_| bad())?;
                    Ok((deg, min, sec))
                }
                _ => Err(bad()),
            }
        };

        let (lat_deg, lat_min, lat_sec) = parse_part(lat_digits, 2)?;
        let (lon_deg, lon_min, lon_sec) = parse_part(lon_digits, 3)?;

        if lat_deg > 90 || lat_min >= 60 || lon_deg > 180 || lon_min >= 60 {
            return Err(bad());
        }

        let lat_sign: i8 = if ns_ch == 'S' { -1 } else { 1 };
        let lon_sign: i16 = if ew_ch == 'W' { -1 } else { 1 };

        Ok(Self::from_dms(
            (lat_sign * lat_deg as i8, lat_min, lat_sec),
            (lon_sign * lon_deg as i16, lon_min, lon_sec),
        ))
    }

    /// Formats this coordinate as an ICAO surface-position literal with
    /// second-of-arc precision (`DDMMSS{N,S}DDDMMSS{E,W}`).
    pub fn to_icao_string(&self) -> String {
        let (lat_deg, lat_min, lat_sec) = fc::decimal_to_dms(self.latitude);
        let (lon_deg, lon_min, lon_sec) = fc::decimal_to_dms(self.longitude);
        format!(
            "{:02}{:02}{:02}{}{:03}{:02}{:02}{}",
            lat_deg,
            lat_min,
            lat_sec,
            if self.latitude < 0.0 { 'S' } else { 'N' },
            lon_deg,
            lon_min,
            lon_sec,
            if self.longitude < 0.0 { 'W' } else { 'E' },
        )
    }

    /// Converts this coordinate to a 10-character Maidenhead locator, for
    /// cockpit display (base spec §6, supplemented from `icaofpl.cc`).
    pub fn to_maidenhead(&self) -> String {
        const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQR";
        const DIGIT: &[u8] = b"0123456789";
        const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwx";

        let mut lon = (self.longitude + 180.0).rem_euclid(360.0);
        let mut lat = (self.latitude + 90.0).rem_euclid(180.0);

        let mut out = String::with_capacity(10);

        let field_lon = (lon / 20.0) as usize;
        let field_lat = (lat / 10.0) as usize;
        out.push(UPPER[field_lon.min(17)] as char);
        out.push(UPPER[field_lat.min(17)] as char);
        lon -= field_lon as f64 * 20.0;
        lat -= field_lat as f64 * 10.0;

        let square_lon = (lon / 2.0) as usize;
        let square_lat = lat as usize;
        out.push(DIGIT[square_lon.min(9)] as char);
        out.push(DIGIT[square_lat.min(9)] as char);
        lon -= square_lon as f64 * 2.0;
        lat -= square_lat as f64;

        let subsquare_lon = (lon / (2.0 / 24.0)) as usize;
        let subsquare_lat = (lat / (1.0 / 24.0)) as usize;
        out.push(LOWER[subsquare_lon.min(23)] as char);
        out.push(LOWER[subsquare_lat.min(23)] as char);
        lon -= subsquare_lon as f64 * (2.0 / 24.0);
        lat -= subsquare_lat as f64 * (1.0 / 24.0);

        let extended_lon = (lon / (2.0 / 240.0)) as usize;
        let extended_lat = (lat / (1.0 / 240.0)) as usize;
        out.push(DIGIT[extended_lon.min(9)] as char);
        out.push(DIGIT[extended_lat.min(9)] as char);
        lon -= extended_lon as f64 * (2.0 / 240.0);
        lat -= extended_lat as f64 * (1.0 / 240.0);

        let fine_lon = (lon / (2.0 / 240.0 / 24.0)) as usize;
        let fine_lat = (lat / (1.0 / 240.0 / 24.0)) as usize;
        out.push(LOWER[fine_lon.min(23)] as char);
        out.push(LOWER[fine_lat.min(23)] as char);

        out
    }

    /// Parses a Maidenhead locator of 2 to 10 characters back into a
    /// coordinate (the center of the smallest resolved cell).
    pub fn from_maidenhead(s: &str) -> Result<Self, Error> {
        let bad = || Error::UnexpectedToken(s.to_string());
        let b = s.as_bytes();
        if b.len() < 2 || b.len() % 2 != 0 || b.len() > 10 {
            return Err(bad());
        }

        let upper = |c: u8| -> Result<usize, Error> {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() && (c - b'A') < 18 {
                Ok((c - b'A') as usize)
            } else {
                Err(bad())
            }
        };
        let digit = |c: u8| -> Result<usize, Error> {
            if c.is_ascii_digit() {
                Ok((c - b'0') as usize)
            } else {
                Err(bad())
            }
        };
        let letter24 = |c: u8| -> Result<usize, Error> {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() && (c - b'a') < 24 {
                Ok((c - b'a') as usize)
            } else {
                Err(bad())
            }
        };

        let mut lon = upper(b[0])? as f64 * 20.0;
        let mut lat = upper(b[1])? as f64 * 10.0;
        let mut lon_cell = 20.0;
        let mut lat_cell = 10.0;

        if b.len() >= 4 {
            lon += digit(b[2])? as f64 * 2.0;
            lat += digit(b[3])? as f64;
            lon_cell = 2.0;
            lat_cell = 1.0;
        }
        if b.len() >= 6 {
            lon += letter24(b[4])? as f64 * (2.0 / 24.0);
            lat += letter24(b[5])? as f64 * (1.0 / 24.0);
            lon_cell = 2.0 / 24.0;
            lat_cell = 1.0 / 24.0;
        }
        if b.len() >= 8 {
            lon += digit(b[6])? as f64 * (2.0 / 240.0);
            lat += digit(b[7])? as f64 * (1.0 / 240.0);
            lon_cell = 2.0 / 240.0;
            lat_cell = 1.0 / 240.0;
        }
        if b.len() >= 10 {
            lon += letter24(b[8])? as f64 * (2.0 / 240.0 / 24.0);
            lat += letter24(b[9])? as f64 * (1.0 / 240.0 / 24.0);
            lon_cell = 2.0 / 240.0 / 24.0;
            lat_cell = 1.0 / 240.0 / 24.0;
        }

        // report the center of the smallest resolved cell.
        lon += lon_cell / 2.0;
        lat += lat_cell / 2.0;

        Ok(Self::new(lat - 90.0, lon - 180.0))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({0}, {1})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::LengthUnit;

    // As benchmark for our testing we use the directions to an airfield as
    // published in the German AIP. The airfield Hungriger Wolf in Itzehoe
    // (EDHF) has two directions from two VOR published in its visual operation
    // chart (25 JUL 2024).

    // Helgoland VOR
    const DHE: Coordinate = coord!(54.18568611, 7.91070000);
    // Itzehoe Hungriger Wolf
    const EDHF: Coordinate = coord!(53.99250000, 9.57666667);

    #[test]
    fn bearing() {
        // From the AIP we get a magnetic heading from the Helgoland VOR (DHE)
        // to EDHF of 97°. With a magnetic variation of 4° east in EDHF, we get
        // a true bearing of approximately 101°. The geodesic calculation on the
        // WGS84 ellipsoid gives a more precise result of ~100°.
        assert_eq!(DHE.bearing(&EDHF).value().round(), 100.0);
    }

    #[test]
    fn dist() {
        // the AIP provides only rounded values
        assert_eq!(
            DHE.dist(&EDHF)
                .convert_to(LengthUnit::NauticalMiles)
                .value()
                .round(),
            60.0
        );
    }

    #[test]
    fn course_distance_round_trips_bearing_and_dist() {
        let projected = DHE.course_distance(DHE.bearing(&EDHF), DHE.dist(&EDHF));
        assert!(projected.dist(&EDHF).convert_to(LengthUnit::Meters).value() < &50.0);
    }

    #[test]
    fn icao_string_round_trips() {
        let s = EDHF.to_icao_string();
        let parsed = Coordinate::from_icao_string(&s).unwrap();
        assert!((parsed.latitude - EDHF.latitude).abs() < 1e-3);
        assert!((parsed.longitude - EDHF.longitude).abs() < 1e-3);
    }

    #[test]
    fn icao_string_accepts_minute_precision() {
        // N47°E008° per base spec S4.
        let c = Coordinate::from_icao_string("4700N00800E").unwrap();
        assert!((c.latitude - 47.0).abs() < 1e-6);
        assert!((c.longitude - 8.0).abs() < 1e-6);
    }

    #[test]
    fn maidenhead_round_trips_within_a_cell() {
        let locator = EDHF.to_maidenhead();
        assert_eq!(locator.len(), 10);
        let back = Coordinate::from_maidenhead(&locator).unwrap();
        assert!((back.latitude - EDHF.latitude).abs() < 0.001);
        assert!((back.longitude - EDHF.longitude).abs() < 0.001);
    }

    #[test]
    fn nearest_on_great_circle_is_the_point_itself_when_on_the_chord() {
        let a = Coordinate::new(47.0, 8.0);
        let b = Coordinate::new(48.0, 9.0);
        let mid = a.course_distance(a.bearing(&b), a.dist(&b).convert_to(LengthUnit::Meters));
        let nearest = mid.nearest_on_great_circle(&a, &b);
        assert!(mid.dist(&nearest).convert_to(LengthUnit::Meters).value() < &10.0);
    }
}
