// spec.md §8, scenario S4: an `IDENT###DDD`-style course/distance fix
// (spec.md I5) projects a new point from a known navaid's position rather
// than naming a fix of its own. The projected bearing is magnetic-variation
// dependent (and so, through `wmm::declination`, dependent on the current
// date), but the projected *distance* from the navaid is not, so this test
// asserts on distance rather than on an absolute coordinate.

mod common;

use icaofpl::fp::{FlightPlan, ResolutionPolicy};
use icaofpl::geom::Coordinate;
use icaofpl::measurements::LengthUnit;

const MESSAGE: &str = "(FPL-OEABC-IN -C150/L-SDFGRWY/S -LOWW0900 -OSPEN090010 -LEPA0300 LEIB -DOF/050719)";

#[test]
fn projects_a_point_ten_miles_from_the_navaid() {
    let ospen_coord = Coordinate::new(47.4, 13.0);
    let nd = common::s2_nd();
    let plan = FlightPlan::parse(MESSAGE, &nd, ResolutionPolicy::default());

    assert!(plan.errors().is_empty(), "unexpected errors: {:?}", plan.errors());

    let fix = plan.route.iter().find(|w| w.ident == "OSPEN").expect("course/distance fix present");
    let (_, filed_dist) = fix.course_dist.expect("course/distance suffix retained on the waypoint");
    let filed_dist_nm = *filed_dist.convert_to(LengthUnit::NauticalMiles).value();
    assert!((filed_dist_nm - 10.0).abs() < 0.01);

    let vertex = fix.resolved.expect("course/distance fix resolves to a synthesized vertex");
    let projected = plan.graph.vertex(vertex);
    assert_eq!(projected.ident, "OSPEN090010");

    let dist_nm = *ospen_coord.dist(&projected.coord).convert_to(LengthUnit::NauticalMiles).value();
    assert!((dist_nm - 10.0).abs() < 0.1, "projected fix is {dist_nm}nm from OSPEN, expected ~10nm");
}
