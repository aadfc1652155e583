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

use arinc424::fields;

use crate::core::VerticalDistance;
use crate::geom::Coordinate;
use crate::nd::Region;
use crate::wmm::MagneticVariation;

pub(super) fn lat_lon_to_coordinate(
    lat: fields::Latitude,
    lon: fields::Longitude,
) -> Result<Coordinate, arinc424::Error> {
    Ok(Coordinate::new(lat.as_decimal()?, lon.as_decimal()?))
}

impl From<fields::MagVar> for MagneticVariation {
    fn from(value: fields::MagVar) -> Self {
        match value {
            fields::MagVar::East(d) => Self::east(d),
            fields::MagVar::West(d) => Self::west(d),
            fields::MagVar::OrientedToTrueNorth => Self::east(0.0),
        }
    }
}

pub(super) fn regn_code_to_region(regn_code: fields::RegnCode) -> Region {
    match regn_code.as_str() {
        "ENRT" => Region::Enroute,
        icao => Region::TerminalArea(icao.trim().to_string()),
    }
}

pub(super) fn limit_to_vertical_distance(
    limit: fields::LowerUpperLimit,
    unit: Option<fields::UnitIndicator>,
) -> VerticalDistance {
    use fields::{LowerUpperLimit, UnitIndicator};

    match limit {
        LowerUpperLimit::Ground => VerticalDistance::Gnd,
        LowerUpperLimit::Unlimited | LowerUpperLimit::NotSpecified | LowerUpperLimit::NOTAM => {
            VerticalDistance::Unlimited
        }
        LowerUpperLimit::MeanSeaLevel => VerticalDistance::Msl(0),
        LowerUpperLimit::FlightLevel(fl) => VerticalDistance::Fl(fl),
        LowerUpperLimit::Altitude(ft) => match unit {
            Some(UnitIndicator::AboveGroundLevel) => VerticalDistance::Agl(ft as u16),
            _ => VerticalDistance::Msl(ft as u16),
        },
    }
}
