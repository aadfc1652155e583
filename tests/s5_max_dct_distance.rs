// spec.md §8, scenario S5: a two-waypoint IFR plan with no airways, where
// `fix_max_dct_distance(limit)` subdivides the DCT leg so that no two
// consecutive route coordinates are more than `limit` nautical miles apart
// (spec.md I7).

mod common;

use icaofpl::fp::{FlightPlan, ParseWaypoint, ResolutionPolicy};
use icaofpl::geom::Coordinate;
use icaofpl::graph::RouteGraph;
use icaofpl::measurements::{Length, LengthUnit};

const MESSAGE: &str = "(FPL-OEABC-IG -C150/L-SDFGRWY/S -LSZH0900 -DCT -LFSB0020)";

fn coord_of(wp: &ParseWaypoint, graph: &RouteGraph) -> Coordinate {
    if let Some(c) = wp.coordinate {
        return c;
    }
    let vertex = wp.resolved.or_else(|| wp.candidates.first().map(|p| p.vertex)).expect("resolved or candidate vertex");
    graph.vertex(vertex).coord
}

#[test]
fn subdivides_long_dct_leg_within_limit() {
    let nd = common::s5_nd();
    let limit = Length::nm(10.0);
    let policy = ResolutionPolicy {
        max_dct_nm: limit,
        ..ResolutionPolicy::default()
    };
    let plan = FlightPlan::parse(MESSAGE, &nd, policy);

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());
    assert!(plan.route.len() > 2, "expected interior waypoints to be inserted");

    for pair in plan.route.windows(2) {
        let a = coord_of(&pair[0], &plan.graph);
        let b = coord_of(&pair[1], &plan.graph);
        let dist = a.dist(&b);
        let dist_nm = *dist.convert_to(LengthUnit::NauticalMiles).value();
        let limit_nm = *limit.convert_to(LengthUnit::NauticalMiles).value();
        assert!(
            dist_nm <= limit_nm + 0.01,
            "leg {} -> {} is {:?}, exceeds the {:?} limit",
            pair[0].ident,
            pair[1].ident,
            dist,
            limit
        );
    }
}
