// Shared navigation-data fixtures for the end-to-end scenario tests in
// spec.md §8. Each builder only adds the objects a given scenario's route
// actually touches.

use icaofpl::core::VerticalDistance;
use icaofpl::geom::Coordinate;
use icaofpl::nd::{
    Airport, Airway, AirwayKind, DesignatedPoint, Navaid, NavaidKind, NavigationData, Region,
    RouteSegment, WaypointUsage,
};

fn airport(icao: &str, lat: f64, lon: f64, elev_ft: u16) -> Airport {
    Airport {
        icao_ident: icao.to_string(),
        iata_designator: String::new(),
        name: icao.to_string(),
        coordinate: Coordinate::new(lat, lon),
        elevation: VerticalDistance::Msl(elev_ft),
        mag_var: None,
    }
}

fn point(ident: &str, lat: f64, lon: f64) -> DesignatedPoint {
    DesignatedPoint {
        ident: ident.to_string(),
        coordinate: Coordinate::new(lat, lon),
        usage: WaypointUsage::HiLoAltitude,
        region: Region::Enroute,
        mag_var: None,
    }
}

/// S1: "(FPL-OEABC-VG -C150/L-OV/C -LOGG1220 -N0080VFR LH MK VM
/// -LOWK0130 LOWG -DOF/050719)" — a VFR hop from Göppingen (LOGG) to
/// Klagenfurt (LOWK) via three ground-feature reporting points, with
/// Graz (LOWG) filed as alternate.
pub fn s1_nd() -> NavigationData {
    let mut b = NavigationData::builder();
    b.add_airport(airport("LOGG", 48.6, 9.76, 730))
        .add_airport(airport("LOWK", 46.64, 14.34, 1470))
        .add_airport(airport("LOWG", 46.99, 15.44, 1119))
        .add_mapelement(icaofpl::nd::MapElement {
            ident: "LH".to_string(),
            description: "Landshut".to_string(),
            coordinate: Coordinate::new(48.2, 11.4),
        })
        .add_mapelement(icaofpl::nd::MapElement {
            ident: "MK".to_string(),
            description: "Markt".to_string(),
            coordinate: Coordinate::new(47.8, 12.5),
        })
        .add_mapelement(icaofpl::nd::MapElement {
            ident: "VM".to_string(),
            description: "Villach Markt".to_string(),
            coordinate: Coordinate::new(46.9, 13.7),
        });
    b.build()
}

/// S2 (abridged): Vienna (LOWW) to Palma (LEPA) via Ibiza (LEIB), with
/// `OSPEN UM984 BZO UM984 NEDED` as the airway-expansion segment under
/// test — altitude stepping 340 -> 350 -> 370.
pub fn s2_nd() -> NavigationData {
    let mut b = NavigationData::builder();
    b.add_airport(airport("LOWW", 48.11, 16.57, 600))
        .add_airport(airport("LEPA", 39.55, 2.74, 27))
        .add_airport(airport("LEIB", 38.87, 1.37, 22))
        .add_navaid(Navaid {
            ident: "OSPEN".to_string(),
            kind: NavaidKind::Vor,
            coordinate: Coordinate::new(47.4, 13.0),
            mag_var: None,
            frequency_khz: 114_000,
        })
        .add_point(point("BZO", 46.5, 11.3))
        .add_point(point("NEDED", 45.0, 9.5))
        .add_airway(Airway {
            ident: "UM984".to_string(),
            segments: vec![
                RouteSegment {
                    from_ident: "OSPEN".to_string(),
                    from_coord: Coordinate::new(47.4, 13.0),
                    to_ident: "BZO".to_string(),
                    to_coord: Coordinate::new(46.5, 11.3),
                    lower: VerticalDistance::Fl(200),
                    upper: VerticalDistance::Unlimited,
                    kind: AirwayKind::High,
                    bidirectional: true,
                },
                RouteSegment {
                    from_ident: "BZO".to_string(),
                    from_coord: Coordinate::new(46.5, 11.3),
                    to_ident: "NEDED".to_string(),
                    to_coord: Coordinate::new(45.0, 9.5),
                    lower: VerticalDistance::Fl(200),
                    upper: VerticalDistance::Unlimited,
                    kind: AirwayKind::High,
                    bidirectional: true,
                },
            ],
        });
    b.build()
}

/// S5: Zürich (LSZH) to Basel (LFSB/EuroAirport), a two-waypoint IFR plan
/// with no airways, used to exercise `fix_max_dct_distance`.
pub fn s5_nd() -> NavigationData {
    let mut b = NavigationData::builder();
    b.add_airport(airport("LSZH", 47.46, 8.55, 1417))
        .add_airport(airport("LFSB", 47.59, 7.53, 885));
    b.build()
}

/// S6: the Paris-TMA `POGO` pair, LFPG <-> LFPO, plus a non-member
/// destination (LSZH) to exercise removal.
pub fn s6_nd() -> NavigationData {
    let mut b = NavigationData::builder();
    b.add_airport(airport("LFPG", 49.01, 2.55, 392))
        .add_airport(airport("LFPO", 48.72, 2.36, 291))
        .add_airport(airport("LSZH", 47.46, 8.55, 1417));
    b.build()
}
