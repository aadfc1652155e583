// spec.md §8, scenario S6: an IFR flight entirely within the Paris TMA
// group gets `POGO` added to `RMK/`; changing the destination outside the
// group removes it again (spec.md I8: idempotent on a second pass).

mod common;

use icaofpl::fp::{FlightPlan, ResolutionPolicy};

#[test]
fn pogo_present_for_paris_tma_pair() {
    let nd = common::s6_nd();
    let message = "(FPL-OEABC-IN -C150/L-SDFGRWY/S -LFPG0900 -DCT -LFPO0020)";
    let plan = FlightPlan::parse(message, &nd, ResolutionPolicy::default());

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());
    assert!(plan.otherinfo.rmk_contains_token("POGO"));
}

#[test]
fn pogo_absent_outside_paris_tma() {
    let nd = common::s6_nd();
    let message = "(FPL-OEABC-IN -C150/L-SDFGRWY/S -LFPG0900 -DCT -LSZH0130)";
    let plan = FlightPlan::parse(message, &nd, ResolutionPolicy::default());

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());
    assert!(!plan.otherinfo.rmk_contains_token("POGO"));
}

/// I8: a second `populate` pass is idempotent — `POGO` neither
/// disappears nor duplicates.
#[test]
fn normalize_pogo_is_idempotent() {
    let nd = common::s6_nd();
    let message = "(FPL-OEABC-IN -C150/L-SDFGRWY/S -LFPG0900 -DCT -LFPO0020)";
    let mut plan = FlightPlan::parse(message, &nd, ResolutionPolicy::default());

    let first = plan.otherinfo.get("RMK").map(str::to_string);
    plan.populate(&nd);
    let second = plan.otherinfo.get("RMK").map(str::to_string);

    assert_eq!(first, second);
}
