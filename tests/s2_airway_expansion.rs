// spec.md §8, scenario S2: a route naming an airway twice (`OSPEN UM984 BZO
// UM984 NEDED`) retroactively binds each fix's outgoing path code to the
// airway, erases the airway ident tokens themselves, and steps the filed
// altitude leg by leg (spec.md I2, I3).

mod common;

use icaofpl::core::VerticalDistance;
use icaofpl::fp::{FlightPlan, PathCode, ResolutionPolicy};

const MESSAGE: &str =
    "(FPL-OEABC-IN -C150/L-SDFGRWY/S -LOWW0900 -N0458F340 OSPEN UM984 BZO/N0458F350 UM984 NEDED/N0456F370 -LEPA0300 LEIB -DOF/050719)";

#[test]
fn erases_the_airway_ident_tokens_and_resolves_every_fix() {
    let nd = common::s2_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());

    // The `UM984` tokens name no fix of their own: they retroactively set
    // the preceding waypoint's path code and are erased, not kept as
    // candidate-less waypoints in their own right.
    let idents: Vec<&str> = plan.route.iter().map(|w| w.ident.as_str()).collect();
    assert_eq!(idents, vec!["LOWW", "OSPEN", "BZO", "NEDED", "LEPA"]);
}

/// I2: a waypoint whose outgoing path code names an airway has a matching
/// edge in the route graph to the next resolved fix.
#[test]
fn binds_the_preceding_fix_to_the_airway_on_both_segments() {
    let nd = common::s2_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    let ospen = plan.route.iter().find(|w| w.ident == "OSPEN").expect("OSPEN present");
    assert!(matches!(&ospen.path_code, PathCode::Airway(name) if name == "UM984"));

    let bzo = plan.route.iter().find(|w| w.ident == "BZO").expect("BZO present");
    assert!(matches!(&bzo.path_code, PathCode::Airway(name) if name == "UM984"));

    let ospen_vertex = ospen.resolved.expect("OSPEN resolves to a graph vertex");
    let bzo_vertex = bzo.resolved.expect("BZO resolves to a graph vertex");
    assert!(plan.graph.has_direct_edge(ospen_vertex, bzo_vertex, |e| e.ident == "UM984"));
}

/// I3: each fix's filed `/speed+level` suffix sets that fix's own altitude,
/// independent of its neighbours on the same airway.
#[test]
fn steps_the_altitude_along_the_airway() {
    let nd = common::s2_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    let bzo = plan.route.iter().find(|w| w.ident == "BZO").expect("BZO present");
    assert!(matches!(bzo.altitude, Some(VerticalDistance::Fl(350))));

    let neded = plan.route.iter().find(|w| w.ident == "NEDED").expect("NEDED present");
    assert!(matches!(neded.altitude, Some(VerticalDistance::Fl(370))));
}

#[test]
fn emits_the_airway_round_trip() {
    let nd = common::s2_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert_eq!(plan.get_item15(), "N0458F340 OSPEN UM984 BZO/N0458F350 UM984 NEDED/N0456F370");
}
