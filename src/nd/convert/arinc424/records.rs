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

use arinc424::records;

use super::fields::{lat_lon_to_coordinate, regn_code_to_region};
use crate::core::VerticalDistance;
use crate::nd::{Airport, DesignatedPoint, WaypointUsage};
use crate::wmm::MagneticVariation;

impl<'a> TryFrom<records::Airport<'a>> for Airport {
    type Error = arinc424::Error;

    fn try_from(arpt: records::Airport<'a>) -> Result<Self, Self::Error> {
        Ok(Airport {
            icao_ident: arpt.arpt_ident.as_str().to_string(),
            iata_designator: arpt.iata.as_str().to_string(),
            name: arpt.airport_name.as_str().to_string(),
            coordinate: lat_lon_to_coordinate(arpt.latitude, arpt.longitude)?,
            // ARINC 424's airport record carries no elevation field in this
            // crate; runway records do, but aren't linked to an airport
            // here (see the `mod.rs` note on skipped runway ingestion).
            elevation: VerticalDistance::Gnd,
            mag_var: arpt.mag_var.map(MagneticVariation::from),
        })
    }
}

impl<'a> TryFrom<records::Waypoint<'a>> for DesignatedPoint {
    type Error = arinc424::Error;

    fn try_from(wp: records::Waypoint<'a>) -> Result<Self, Self::Error> {
        let usage = if wp.waypoint_type.as_str().trim() == "V" {
            WaypointUsage::VfrOnly
        } else {
            match wp.waypoint_usage {
                arinc424::fields::WaypointUsage::HiLoAltitude => WaypointUsage::HiLoAltitude,
                arinc424::fields::WaypointUsage::HiAltitude => WaypointUsage::HiAltitude,
                arinc424::fields::WaypointUsage::LoAltitude => WaypointUsage::LoAltitude,
                arinc424::fields::WaypointUsage::TerminalOnly => WaypointUsage::TerminalOnly,
            }
        };

        Ok(DesignatedPoint {
            ident: wp.fix_ident.as_str().to_string(),
            coordinate: lat_lon_to_coordinate(wp.latitude, wp.longitude)?,
            usage,
            region: regn_code_to_region(wp.regn_code),
            mag_var: wp.mag_var.map(MagneticVariation::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PC_WAYPOINT: &[u8] = b"SEURPCEDDHED W1    ED0    V     N53341894E009404512                                 WGE           WHISKEY1                 122922407";
    const EA_WAYPOINT: &[u8] = b"SUSAEAENRT   AAARG K 0    W   B N32413827W078030466                       W0093     NAR           AAARG                    270862407";

    #[test]
    fn terminal_waypoint_is_vfr_only() {
        let record = records::Waypoint::try_from(PC_WAYPOINT).expect("record should parse");
        let point = DesignatedPoint::try_from(record).expect("conversion should succeed");
        assert_eq!(point.ident, "W1");
        assert_eq!(point.usage, WaypointUsage::VfrOnly);
    }

    #[test]
    fn enroute_waypoint_keeps_hiloaltitude_usage() {
        let record = records::Waypoint::try_from(EA_WAYPOINT).expect("record should parse");
        let point = DesignatedPoint::try_from(record).expect("conversion should succeed");
        assert_eq!(point.ident, "AAARG");
        assert_eq!(point.usage, WaypointUsage::HiLoAltitude);
        assert_eq!(point.region, crate::nd::Region::Enroute);
        assert_eq!(point.mag_var.map(|v| v.degrees_east()), Some(-0.93));
    }
}
