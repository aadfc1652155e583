// spec.md §8, scenario S1: a straightforward VFR hop with no airways.

mod common;

use icaofpl::fp::{FlightPlan, ResolutionPolicy};

const MESSAGE: &str =
    "(FPL-OEABC-VG -C150/L-OV/C -LOGG1220 -N0080VFR LH MK VM -LOWK0130 LOWG -DOF/050719)";

#[test]
fn parses_aircraft_and_route_identifiers() {
    let nd = common::s1_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());
    assert_eq!(plan.aircraft_id, "OEABC");
    assert_eq!(plan.departure, "LOGG");
    assert_eq!(plan.destination, "LOWK");
    assert_eq!(plan.alternate1.as_deref(), Some("LOWG"));
    assert_eq!(plan.otherinfo.get("DOF"), Some("050719"));
}

#[test]
fn resolves_every_waypoint_in_order() {
    let nd = common::s1_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    let idents: Vec<&str> = plan.route.iter().map(|w| w.ident.as_str()).collect();
    assert_eq!(idents, vec!["LOGG", "LH", "MK", "VM", "LOWK"]);
}

/// I1: the first and last waypoints of a successfully parsed plan resolve
/// to airports.
#[test]
fn endpoints_resolve_to_airports() {
    let nd = common::s1_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    let first = plan.route.first().expect("non-empty route");
    let last = plan.route.last().expect("non-empty route");
    assert!(!first.candidates.is_empty());
    assert!(!last.candidates.is_empty());

    let graph = &plan.graph;
    let first_kind = graph.vertex(first.candidates[0].vertex).kind;
    let last_kind = graph.vertex(last.candidates[0].vertex).kind;
    assert_eq!(first_kind, icaofpl::nd::ObjectKind::Airport);
    assert_eq!(last_kind, icaofpl::nd::ObjectKind::Airport);
}

#[test]
fn emits_canonical_item15() {
    let nd = common::s1_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert_eq!(plan.get_item15(), "N0080VFR LH MK VM");
}
