// spec.md §8, scenario S3: a bare `DCT` token between two IFR waypoints
// sets the preceding waypoint's path code to `directto` and is erased from
// the resolved route; round-trip emission reproduces a single `DCT`.

mod common;

use icaofpl::fp::{FlightPlan, PathCode, ResolutionPolicy};

const MESSAGE: &str = "(FPL-OEABC-IG -C150/L-SDFGRWY/S -LSZH0900 -DCT -LFSB0020 -)";

#[test]
fn dct_token_sets_directto_and_is_erased() {
    let nd = common::s5_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    let idents: Vec<&str> = plan.route.iter().filter(|w| !w.expanded).map(|w| w.ident.as_str()).collect();
    assert_eq!(idents, vec!["LSZH", "LFSB"]);

    let dep = plan.route.iter().find(|w| w.ident == "LSZH").expect("departure present");
    assert!(matches!(dep.path_code, PathCode::DirectTo));
}

#[test]
fn round_trip_emits_single_dct() {
    let nd = common::s5_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert_eq!(plan.get_item15(), "DCT");
}

/// spec.md §4.4: a plan with only departure and destination and no filed
/// route body at all (no explicit `DCT` token, no airway) still emits a
/// `DCT` leg between them when both ends are IFR.
#[test]
fn bare_ifr_dep_dest_with_no_route_body_emits_implicit_dct() {
    let nd = common::s5_nd();
    let message = "(FPL-OEABC-IG -C150/L-SDFGRWY/S -LSZH0900 -N0120F100 -LFSB0020 -)";
    let plan = FlightPlan::parse(message, &nd, ResolutionPolicy::default());

    assert_eq!(plan.get_item15(), "N0120F100 DCT");
}
