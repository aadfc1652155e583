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

//! `ParseState`: drives the route-token pipeline (spec.md §4.2) — speed/alt
//! resolution, DB lookup, airway expansion, time computation — the way
//! `efb`'s `route::mod::Route::decode` drives its own (much simpler)
//! pipeline, logging at each stage with `log::{debug, trace, warn}`.

use std::collections::BTreeMap;

use log::{debug, trace, warn};
use petgraph::graph::NodeIndex;

use crate::core::VerticalDistance;
use crate::error::Error;
use crate::geom::Coordinate;
use crate::graph::{Edge, RouteGraph};
use crate::measurements::{Angle, Duration, Length, Speed};
use crate::nd::{NavigationData, SearchFlags, TypeMask};
use crate::wmm;

use super::policy::ResolutionPolicy;
use super::token;
use super::waypoint::{Path, PathCode, ParseWaypoint, Rules};

/// Holds the in-flight parse waypoints, the route graph, the cruise-speed
/// table, and the accumulated error list (spec.md §3, "Parse State").
pub struct ParseState<'a> {
    nd: &'a NavigationData,
    policy: ResolutionPolicy,
    pub(crate) waypoints: Vec<ParseWaypoint>,
    pub(crate) graph: RouteGraph,
    /// `altitude (ft) → planned TAS`, append-only during parsing, looked up
    /// by nearest key (spec.md §5, "Shared resources").
    pub(crate) cruisespeeds: BTreeMap<u32, Speed>,
    pub(crate) errors: Vec<Error>,
}

impl<'a> ParseState<'a> {
    pub fn new(nd: &'a NavigationData, policy: ResolutionPolicy) -> Self {
        Self {
            nd,
            policy,
            waypoints: Vec::new(),
            graph: RouteGraph::new(),
            cruisespeeds: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_waypoints(self) -> Vec<ParseWaypoint> {
        self.waypoints
    }

    /// Consumes the parse state, handing the caller both the resolved
    /// waypoints and the route graph their `resolved`/`candidates` vertex
    /// indices point into — a [`FlightPlan`](super::FlightPlan) keeps both
    /// alive together since the post-parse transforms (`fix_max_dct_distance`,
    /// `erase_unnecessary_airway`) need vertex coordinates long after parsing.
    pub fn into_parts(self) -> (Vec<ParseWaypoint>, RouteGraph) {
        (self.waypoints, self.graph)
    }

    /// Phase 4.2.1: walks the raw route tokens, handling `IFR`/`VFR`/`DCT`/
    /// `STAY[n]` specials and `/speed[alt]` and course/distance suffixes.
    pub fn process_speedalt(&mut self, raw_tokens: &[String], initial_rules: Rules) {
        self.process_speedalt_seeded(raw_tokens, initial_rules, None, None);
    }

    /// As [`process_speedalt`](Self::process_speedalt), but seeded with the
    /// Item-15 route's leading `speed+level` token (spec.md §6, "the first
    /// token is `speed+level`") rather than starting with no planned
    /// speed/altitude — that leading token names no waypoint of its own, so
    /// [`crate::fp::FlightPlan::set_route`] strips it before tokenising and
    /// threads it in here instead.
    pub fn process_speedalt_seeded(
        &mut self,
        raw_tokens: &[String],
        initial_rules: Rules,
        initial_speed: Option<Speed>,
        initial_altitude: Option<VerticalDistance>,
    ) {
        let mut rules = initial_rules;
        let mut speed: Option<Speed> = initial_speed;
        let mut altitude: Option<VerticalDistance> = initial_altitude;

        for raw in raw_tokens {
            if raw == "IFR" {
                rules = Rules::Ifr;
                debug!("rules change to IFR after {:?}", self.waypoints.last().map(|w| &w.ident));
                continue;
            }
            if raw == "VFR" {
                rules = Rules::Vfr;
                debug!("rules change to VFR after {:?}", self.waypoints.last().map(|w| &w.ident));
                continue;
            }
            if raw == "DCT" {
                if let Some(wp) = self.waypoints.last_mut() {
                    wp.path_code = PathCode::DirectTo;
                }
                continue;
            }
            if let Some(n) = parse_stay_index(raw) {
                if let Some(wp) = self.waypoints.last_mut() {
                    wp.path_code = PathCode::Stay(n);
                }
                continue;
            }

            let (ident_part, suffix) = match raw.find('/') {
                Some(idx) => (&raw[..idx], Some(&raw[idx + 1..])),
                None => (raw.as_str(), None),
            };

            let mut ident = ident_part.to_string();
            let mut wp_altitude = altitude;
            let mut wp_speed = speed;
            let mut altitude_is_standard = false;

            if let Some(suffix) = suffix {
                match parse_speedalt_suffix(suffix) {
                    Ok((s, a, is_std)) => {
                        speed = Some(s);
                        altitude = Some(a);
                        wp_speed = Some(s);
                        wp_altitude = Some(a);
                        altitude_is_standard = is_std;
                        if let Some(alt_ft) = altitude_key(a) {
                            self.cruisespeeds.insert(alt_ft, s);
                        }
                    }
                    Err(e) => {
                        warn!("could not parse speed/altitude suffix {suffix}: {e}");
                        self.errors.push(e);
                    }
                }
            }

            let course_dist = strip_course_dist_suffix(&mut ident);

            let type_mask = match rules {
                Rules::Ifr => TypeMask::IFR,
                Rules::Vfr => TypeMask::ALL,
            };

            let mut wp = ParseWaypoint::new(ident, type_mask, rules);
            wp.speed = wp_speed;
            wp.altitude = wp_altitude;
            wp.altitude_is_standard = altitude_is_standard;
            wp.course_dist = course_dist;

            if let Ok(coord) = Coordinate::from_icao_string(&wp.ident) {
                trace!("token {} parsed as coordinate literal", wp.ident);
                wp.coordinate = Some(coord);
                wp.type_mask = TypeMask::USER;
            }

            self.waypoints.push(wp);
        }
    }

    /// Phase 4.2.2: resolves every waypoint's identifier against the
    /// navigation database, binding candidate graph vertices.
    pub fn process_dblookup(&mut self) {
        let n = self.waypoints.len();
        let mut consumed = vec![false; n];
        for i in 0..n {
            consumed[i] = self.resolve_waypoint(i);
        }
        // An airway/SID/STAR ident names no fix of its own: once it has
        // retroactively set the preceding waypoint's outgoing path code, the
        // token itself is erased so the airway is represented exactly once
        // (on the edge), not again as an inert waypoint with no candidates.
        let mut idx = 0;
        self.waypoints.retain(|_| {
            let keep = !consumed[idx];
            idx += 1;
            keep
        });
        self.resolve_course_dist_fixes();
    }

    /// Resolves waypoint `i` against the navigation database, returning
    /// `true` if it named a route object (airway/SID/STAR) that was bound
    /// into the preceding waypoint rather than a fix of its own, and so
    /// should be dropped from the waypoint list.
    fn resolve_waypoint(&mut self, i: usize) -> bool {
        let ident = self.waypoints[i].ident.clone();
        let type_mask = self.waypoints[i].type_mask;
        let rules = self.waypoints[i].rules;

        if self.waypoints[i].coordinate.is_some() {
            return false;
        }

        let flags = SearchFlags::new(type_mask);
        let matches = self.nd.find().by_ident(&ident, flags);

        let mut bound_route = None;
        for entity in &matches {
            let path_code = match entity {
                crate::nd::NavEntity::Airway(a) => Some(PathCode::Airway(a.ident.clone())),
                crate::nd::NavEntity::Sid(s) => Some(PathCode::Sid(s.ident.clone())),
                crate::nd::NavEntity::Star(s) => Some(PathCode::Star(s.ident.clone())),
                _ => None,
            };
            if let Some(path_code) = path_code {
                if i > 0 {
                    bound_route = Some(path_code);
                }
            }
        }

        if let Some(path_code) = bound_route {
            let route_ident = path_code.route_ident().unwrap_or_default().to_string();
            self.nd.load_route_edges(&mut self.graph, &route_ident);
            if let Some(prev) = self.waypoints.get_mut(i - 1) {
                debug!("retroactively binding {ident} as path object for preceding waypoint {}", prev.ident);
                prev.path_code = path_code;
            }
            return true;
        }

        let mut any = false;
        for entity in matches {
            if !flags.allows(entity.type_mask()) {
                continue;
            }
            if let Some(idx) = self.graph.find_vertex(entity) {
                self.waypoints[i].candidates.push(Path::seed(idx));
                any = true;
            }
        }

        if !any {
            any = self.resolve_vfr_terminal_waypoint(i);
        }

        if !any && matches!(rules, Rules::Ifr) {
            warn!("unknown identifier {ident}");
            self.errors.push(Error::UnknownIdent(ident));
        }

        false
    }

    /// VFR visual-reporting-point disambiguation (SPEC_FULL.md §11): a
    /// `WaypointUsage::VfrOnly` point is never admitted by the generic
    /// `type_mask` filter, so a VFR waypoint with no other candidates is
    /// additionally matched against terminal-area points belonging to the
    /// nearest named airport among the surrounding tokens, following
    /// `efb`'s `resolve_in_terminal_areas`/`lookahead_terminal_area`.
    fn resolve_vfr_terminal_waypoint(&mut self, i: usize) -> bool {
        if !matches!(self.waypoints[i].rules, Rules::Vfr) {
            return false;
        }
        let ident = self.waypoints[i].ident.clone();

        let terminal_area = self
            .lookahead_terminal_area(i)
            .or_else(|| self.lookbehind_terminal_area(i));

        let Some(airport_ident) = terminal_area else {
            return false;
        };

        let candidates: Vec<_> = self
            .nd
            .find()
            .by_ident(&ident, SearchFlags::new(TypeMask::INTERSECTION))
            .into_iter()
            .filter(|e| matches!(e, crate::nd::NavEntity::Point(p) if p.terminal_area() == Some(airport_ident.as_str())))
            .collect();

        match candidates.len() {
            0 => false,
            1 => {
                if let Some(idx) = self.graph.find_vertex(candidates.into_iter().next().unwrap()) {
                    self.waypoints[i].candidates.push(Path::seed(idx));
                    true
                } else {
                    false
                }
            }
            _ => {
                self.errors.push(Error::AmbiguousTerminalArea {
                    wp: ident,
                    a: airport_ident.clone(),
                    b: airport_ident,
                });
                false
            }
        }
    }

    fn lookahead_terminal_area(&self, from: usize) -> Option<String> {
        self.waypoints[from + 1..]
            .iter()
            .take_while(|w| !matches!(w.path_code, PathCode::DirectTo))
            .find_map(|w| self.nd.find().by_ident(&w.ident, SearchFlags::new(TypeMask::AIRPORT)).into_iter().next())
            .map(|e| e.ident().to_string())
    }

    fn lookbehind_terminal_area(&self, from: usize) -> Option<String> {
        self.waypoints[..from]
            .iter()
            .rev()
            .find_map(|w| self.nd.find().by_ident(&w.ident, SearchFlags::new(TypeMask::AIRPORT)).into_iter().next())
            .map(|e| e.ident().to_string())
    }

    /// Converts each course/distance fix's candidates into a synthesized
    /// point projected from the parent vertex (spec.md §4.2.2, second
    /// sub-phase).
    fn resolve_course_dist_fixes(&mut self) {
        for i in 0..self.waypoints.len() {
            let Some((mag_course, dist)) = self.waypoints[i].course_dist else { continue };
            let mut projected = Vec::new();

            for path in &self.waypoints[i].candidates {
                let parent = self.graph.vertex(path.vertex);
                let true_course = match wmm::declination(parent.coord, Length::m(0.0), time::OffsetDateTime::now_utc().date()) {
                    Ok(var) => var.true_course(mag_course),
                    Err(_) => mag_course,
                };
                let projected_coord = parent.coord.course_distance(true_course, dist);
                let synthetic_ident = format!(
                    "{}{:03.0}{:03.0}",
                    parent.ident,
                    mag_course.to_si(),
                    dist.convert_to(crate::measurements::LengthUnit::NauticalMiles).value()
                );
                let point = crate::nd::DesignatedPoint {
                    ident: synthetic_ident,
                    coordinate: projected_coord,
                    usage: crate::nd::WaypointUsage::HiLoAltitude,
                    region: crate::nd::Region::Enroute,
                    mag_var: None,
                };
                if let Some(idx) = self.graph.find_vertex(crate::nd::NavEntity::Point(std::rc::Rc::new(point))) {
                    projected.push(Path::seed(idx));
                }
            }

            if !projected.is_empty() {
                self.waypoints[i].candidates = projected;
            }
        }
    }

    /// Phase 4.2.3: forward and backward Dijkstra passes across airway,
    /// SID and STAR edges.
    pub fn process_airways(&mut self) {
        self.forward_pass();
        self.backward_pass();
        self.validate_airway_segments();
    }

    fn forward_pass(&mut self) {
        let n = self.waypoints.len();
        for i in 0..n {
            if self.waypoints[i].candidates.is_empty() {
                continue;
            }

            if i == 0 || self.first_nonempty_before(i).is_none() {
                for path in &mut self.waypoints[i].candidates {
                    path.dist = 0.0;
                    path.predecessors.clear();
                }
                continue;
            }

            let Some(prev_i) = self.first_nonempty_before(i) else { continue };
            // `prev_i` is only ever separated from `i` by route-ident
            // placeholder tokens (empty-candidate entries skipped above), so
            // there is no need to additionally require strict adjacency: a
            // bound route ident on `prev_i` already means "the very next
            // waypoint continues along this route" regardless of how many
            // placeholder slots sit between them.
            let continuation = self.waypoints[prev_i].path_code.route_ident().map(str::to_string);

            if let Some(route_ident) = continuation {
                self.expand_along_route(prev_i, i, &route_ident);
            } else {
                self.seed_straight_line(prev_i, i);
            }
        }
    }

    fn first_nonempty_before(&self, i: usize) -> Option<usize> {
        (0..i).rev().find(|&j| !self.waypoints[j].candidates.is_empty())
    }

    fn seed_straight_line(&mut self, prev_i: usize, i: usize) {
        let prev_candidates = self.waypoints[prev_i].candidates.clone();
        for cur in &mut self.waypoints[i].candidates {
            let cur_coord = self.graph.vertex(cur.vertex).coord;
            let best = prev_candidates.iter().min_by(|a, b| {
                let da = self.graph.vertex(a.vertex).coord.dist(&cur_coord);
                let db = self.graph.vertex(b.vertex).coord.dist(&cur_coord);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(best) = best {
                let leg = self.graph.vertex(best.vertex).coord.dist(&cur_coord);
                cur.dist = best.dist + *leg.convert_to(crate::measurements::LengthUnit::NauticalMiles).value() as f64;
                let mut chain = best.predecessors.clone();
                chain.push(best.vertex);
                cur.predecessors = chain;
            }
        }
    }

    fn expand_along_route(&mut self, prev_i: usize, i: usize, route_ident: &str) {
        let sources: Vec<(NodeIndex, f64)> = self.waypoints[prev_i].candidates.iter().map(|p| (p.vertex, p.dist)).collect();

        let predicate = |e: &Edge| e.ident == route_ident;
        let mut result = self.graph.dijkstra_filtered(sources.iter().copied(), predicate);

        let targets: Vec<NodeIndex> = self.waypoints[i].candidates.iter().map(|p| p.vertex).collect();
        let any_reached = targets.iter().any(|t| result.distance(*t).is_some());

        if !any_reached {
            trace!("no admissible {route_ident} edge, synthesizing helper edges");
            let members: Vec<NodeIndex> = self.graph.airway_members(route_ident).to_vec();
            for &(src, _) in &sources {
                for &member in &members {
                    if src == member {
                        continue;
                    }
                    let from_coord = self.graph.vertex(src).coord;
                    let to_coord = self.graph.vertex(member).coord;
                    let dist = from_coord.dist(&to_coord);
                    let bearing = from_coord.bearing(&to_coord);
                    self.graph.add_edge(src, member, Edge::helper(dist, bearing));
                }
            }
            result = self.graph.dijkstra_filtered(sources.iter().copied(), |e| e.ident == route_ident || e.is_helper());
            self.graph.remove_helper_edges();
        }

        for cur in &mut self.waypoints[i].candidates {
            if let Some(dist) = result.distance(cur.vertex) {
                cur.dist = dist;
                cur.predecessors = result.predecessors(cur.vertex);
            }
        }

        if self.waypoints[i].candidates.iter().all(|c| result.distance(c.vertex).is_none()) {
            warn!("airway segment {route_ident} has unknown endpoint(s)");
            self.errors.push(Error::UnknownAirwaySegmentEndpoints {
                airway: route_ident.to_string(),
                from: self.waypoints[prev_i].ident.clone(),
                to: self.waypoints[i].ident.clone(),
            });
            self.waypoints[prev_i].path_code = PathCode::DirectTo;
        }
    }

    /// Backward pass (spec.md §4.2.3): picks the single best candidate per
    /// waypoint and materialises the intermediate airway vertices.
    fn backward_pass(&mut self) {
        let n = self.waypoints.len();
        let mut next_coord: Option<Coordinate> = None;

        for i in (0..n).rev() {
            if self.waypoints[i].candidates.is_empty() {
                continue;
            }

            let best_idx = {
                let candidates = &self.waypoints[i].candidates;
                candidates
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| {
                        let score_a = a.dist + next_coord.map(|c| self.graph.vertex(a.vertex).coord.dist(&c).to_si() as f64).unwrap_or(0.0);
                        let score_b = b.dist + next_coord.map(|c| self.graph.vertex(b.vertex).coord.dist(&c).to_si() as f64).unwrap_or(0.0);
                        score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(idx, _)| idx)
            };

            let Some(best_idx) = best_idx else { continue };
            let best = self.waypoints[i].candidates[best_idx].clone();
            self.waypoints[i].resolved = Some(best.vertex);
            next_coord = Some(self.graph.vertex(best.vertex).coord);

            if !best.predecessors.is_empty() {
                self.materialize_expanded(i, &best.predecessors);
            }
        }
    }

    fn materialize_expanded(&mut self, i: usize, predecessors: &[NodeIndex]) {
        let path_name = self.waypoints.get(i.wrapping_sub(1)).and_then(|w| w.path_code.route_ident()).unwrap_or("").to_string();
        let rules = self.waypoints[i].rules;
        let altitude = self.waypoints[i].altitude;
        let speed = self.waypoints[i].speed;

        let mut inserted = Vec::new();
        for &vertex in predecessors {
            let v = self.graph.vertex(vertex);
            let mut wp = ParseWaypoint::new(v.ident.clone(), v.type_mask, rules);
            wp.altitude = altitude;
            wp.speed = speed;
            wp.expanded = true;
            wp.path_code = PathCode::Airway(path_name.clone());
            wp.resolved = Some(vertex);
            wp.candidates = vec![Path::seed(vertex)];
            inserted.push(wp);
        }

        for (offset, wp) in inserted.into_iter().enumerate() {
            self.waypoints.insert(i + offset, wp);
        }
    }

    fn validate_airway_segments(&mut self) {
        for i in 0..self.waypoints.len().saturating_sub(1) {
            let Some(route_ident) = self.waypoints[i].path_code.route_ident().map(str::to_string) else { continue };
            let Some(j) = self.next_resolved_after(i) else {
                self.waypoints[i].path_code = PathCode::None;
                continue;
            };
            let (Some(from), Some(to)) = (self.waypoints[i].resolved, self.waypoints[j].resolved) else {
                self.waypoints[i].path_code = PathCode::None;
                continue;
            };
            if !self.graph.has_direct_edge(from, to, |e| e.ident == route_ident) {
                self.waypoints[i].path_code = PathCode::None;
            }
        }
    }

    /// Finds the next waypoint after `i` that resolved to a graph vertex,
    /// skipping over route-ident placeholder tokens the same way
    /// [`first_nonempty_before`](Self::first_nonempty_before) skips them
    /// looking backward.
    fn next_resolved_after(&self, i: usize) -> Option<usize> {
        (i + 1..self.waypoints.len()).find(|&j| self.waypoints[j].resolved.is_some())
    }

    /// Phase 4.2.4: assigns an estimated elapsed time to each waypoint,
    /// cumulative from departure (the same convention as `EET/`'s filed
    /// `IDENT HHMM` pairs, spec.md §6), not a per-leg duration. An override
    /// from `EET/` replaces the running total outright rather than adding
    /// to it, since the filed value is itself already cumulative.
    pub fn compute_times(&mut self, eet_overrides: &BTreeMap<String, Duration>) {
        let mut prev_coord: Option<Coordinate> = None;
        let mut cumulative = Duration::seconds(0);

        for wp in &mut self.waypoints {
            let Some(vertex) = wp.resolved else { continue };
            let coord = self.graph.vertex(vertex).coord;

            if let Some(et) = eet_overrides.get(&wp.ident) {
                cumulative = *et;
                wp.et = Some(cumulative);
                prev_coord = Some(coord);
                continue;
            }

            if let Some(prev) = prev_coord {
                let dist = prev.dist(&coord);
                let alt_ft = wp.altitude.and_then(altitude_key).unwrap_or(0);
                if let Some(speed) = nearest_speed(&self.cruisespeeds, alt_ft) {
                    cumulative = cumulative + dist / speed;
                    wp.et = Some(cumulative);
                }
            }
            prev_coord = Some(coord);
        }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }
}

fn parse_stay_index(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("STAY")?;
    digits.parse().ok()
}

/// Parses a `/N####F###`-style suffix into `(speed, altitude,
/// altitude_is_standard)`. The speed and altitude sub-tokens run together
/// with no separator, so the cut point is fixed by the speed unit's letter
/// rather than found by scanning for a delimiter (spec.md §4.1 `parsespeed`).
pub(super) fn parse_speedalt_suffix(suffix: &str) -> Result<(Speed, VerticalDistance, bool), Error> {
    let speed_len = match suffix.as_bytes().first() {
        Some(b'N') | Some(b'K') => 5,
        Some(b'M') => 4,
        _ => return Err(Error::InvalidSpeed(suffix.to_string())),
    };
    if suffix.len() < speed_len {
        return Err(Error::InvalidSpeed(suffix.to_string()));
    }
    let speed_token = &suffix[..speed_len];
    let speed: Speed = speed_token.parse()?;

    let rest = &suffix[speed_len..];
    if rest == "VFR" {
        return Ok((speed, VerticalDistance::Gnd, false));
    }
    let altitude: VerticalDistance = rest.parse()?;
    let is_standard = rest.starts_with('F');
    Ok((speed, altitude, is_standard))
}

/// Strips a trailing `CCCDDD` course/distance suffix (spec.md §4.2.1),
/// returning `(magnetic course, distance)` if present.
fn strip_course_dist_suffix(ident: &mut String) -> Option<(Angle, Length)> {
    if ident.len() < 9 || !ident.as_bytes()[ident.len() - 6..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let split_at = ident.len() - 6;
    let suffix = ident.split_off(split_at);
    let course: f32 = suffix[0..3].parse().ok()?;
    let dist: f32 = suffix[3..6].parse().ok()?;
    if !(0.0..=360.0).contains(&course) || !(1.0..=999.0).contains(&dist) {
        ident.push_str(&suffix);
        return None;
    }
    Some((Angle::deg(course), Length::nm(dist)))
}

fn altitude_key(vd: VerticalDistance) -> Option<u32> {
    match vd {
        VerticalDistance::Gnd => None,
        other => Some(f32::from(other) as u32),
    }
}

fn nearest_speed(table: &BTreeMap<u32, Speed>, alt_ft: u32) -> Option<Speed> {
    if table.is_empty() {
        return None;
    }
    let below = table.range(..=alt_ft).next_back();
    let above = table.range(alt_ft..).next();
    match (below, above) {
        (Some((a, sa)), Some((b, sb))) => {
            if alt_ft - a <= b - alt_ft {
                Some(*sa)
            } else {
                Some(*sb)
            }
        }
        (Some((_, s)), None) | (None, Some((_, s))) => Some(*s),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nd::{Airport, NavigationData};

    fn test_nd() -> NavigationData {
        let mut builder = NavigationData::builder();
        builder
            .add_airport(Airport {
                icao_ident: "LOGG".to_string(),
                iata_designator: String::new(),
                name: "Goeppingen".to_string(),
                coordinate: Coordinate::new(48.6, 9.76),
                elevation: VerticalDistance::Msl(730),
                mag_var: None,
            })
            .add_airport(Airport {
                icao_ident: "LOWK".to_string(),
                iata_designator: String::new(),
                name: "Klagenfurt".to_string(),
                coordinate: Coordinate::new(46.64, 14.34),
                elevation: VerticalDistance::Msl(1470),
                mag_var: None,
            });
        builder.build()
    }

    #[test]
    fn process_speedalt_handles_dct_and_rules_tokens() {
        let nd = test_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("LOGG DCT LOWK");
        state.process_speedalt(&tokens, Rules::Ifr);

        assert_eq!(state.waypoints.len(), 2);
        assert!(matches!(state.waypoints[0].path_code, PathCode::DirectTo));
    }

    #[test]
    fn process_speedalt_strips_course_dist_suffix() {
        let nd = test_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("IDENT090010");
        state.process_speedalt(&tokens, Rules::Vfr);

        assert_eq!(state.waypoints[0].ident, "IDENT");
        let (course, dist) = state.waypoints[0].course_dist.unwrap();
        assert!((course.to_si() - 90.0).abs() < 0.01);
        assert!((dist.to_si() - Length::nm(10.0).to_si()).abs() < 1.0);
    }

    #[test]
    fn process_dblookup_resolves_known_airports() {
        let nd = test_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("LOGG LOWK");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();

        assert!(!state.waypoints[0].candidates.is_empty());
        assert!(!state.waypoints[1].candidates.is_empty());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn process_dblookup_flags_unknown_ifr_ident() {
        let nd = test_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("LOGG ZZZZZ LOWK");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();

        assert!(state.errors.iter().any(|e| matches!(e, Error::UnknownIdent(_))));
    }

    fn airway_nd() -> NavigationData {
        use crate::nd::{Airway, AirwayKind, DesignatedPoint, Navaid, NavaidKind, Region, RouteSegment, WaypointUsage};

        let mut builder = NavigationData::builder();
        builder
            .add_navaid(Navaid {
                ident: "OSPEN".to_string(),
                kind: NavaidKind::Vor,
                coordinate: Coordinate::new(47.4, 13.0),
                mag_var: None,
                frequency_khz: 114_000,
            })
            .add_point(DesignatedPoint {
                ident: "BZO".to_string(),
                coordinate: Coordinate::new(46.5, 11.3),
                usage: WaypointUsage::HiLoAltitude,
                region: Region::Enroute,
                mag_var: None,
            })
            .add_airway(Airway {
                ident: "UM984".to_string(),
                segments: vec![RouteSegment {
                    from_ident: "OSPEN".to_string(),
                    from_coord: Coordinate::new(47.4, 13.0),
                    to_ident: "BZO".to_string(),
                    to_coord: Coordinate::new(46.5, 11.3),
                    lower: VerticalDistance::Fl(200),
                    upper: VerticalDistance::Unlimited,
                    kind: AirwayKind::High,
                    bidirectional: true,
                }],
            });
        builder.build()
    }

    /// An airway ident token retroactively binds the preceding waypoint's
    /// path code and is itself erased, rather than lingering as an
    /// unresolved waypoint.
    #[test]
    fn process_dblookup_erases_airway_ident_tokens() {
        let nd = airway_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("OSPEN UM984 BZO");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();

        let idents: Vec<&str> = state.waypoints.iter().map(|w| w.ident.as_str()).collect();
        assert_eq!(idents, vec!["OSPEN", "BZO"]);
        assert!(matches!(&state.waypoints[0].path_code, PathCode::Airway(name) if name == "UM984"));
    }

    /// Forward/backward airway expansion still finds the direct edge once
    /// the ident token has been erased, even though the resolved waypoint
    /// is no longer adjacent by index to the bound fix.
    #[test]
    fn process_airways_expands_across_an_erased_ident_token() {
        let nd = airway_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("OSPEN UM984 BZO");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();
        state.process_airways();

        assert!(state.errors.is_empty(), "unexpected errors: {:?}", state.errors);
        assert!(state.waypoints[0].resolved.is_some());
        assert!(state.waypoints[1].resolved.is_some());
        assert!(matches!(&state.waypoints[0].path_code, PathCode::Airway(name) if name == "UM984"));
    }

    fn three_leg_airway_nd() -> NavigationData {
        use crate::nd::{Airway, AirwayKind, DesignatedPoint, Navaid, NavaidKind, Region, RouteSegment, WaypointUsage};

        let coord = |lat, lon| Coordinate::new(lat, lon);
        let mut builder = NavigationData::builder();
        builder
            .add_navaid(Navaid {
                ident: "ALFA".to_string(),
                kind: NavaidKind::Vor,
                coordinate: coord(48.0, 10.0),
                mag_var: None,
                frequency_khz: 114_000,
            })
            .add_point(DesignatedPoint {
                ident: "BRAVO".to_string(),
                coordinate: coord(46.0, 10.0),
                usage: WaypointUsage::HiLoAltitude,
                region: Region::Enroute,
                mag_var: None,
            })
            .add_point(DesignatedPoint {
                ident: "CHARLIE".to_string(),
                coordinate: coord(44.0, 10.0),
                usage: WaypointUsage::HiLoAltitude,
                region: Region::Enroute,
                mag_var: None,
            })
            .add_airway(Airway {
                ident: "UX1".to_string(),
                segments: vec![
                    RouteSegment {
                        from_ident: "ALFA".to_string(),
                        from_coord: coord(48.0, 10.0),
                        to_ident: "BRAVO".to_string(),
                        to_coord: coord(46.0, 10.0),
                        lower: VerticalDistance::Fl(200),
                        upper: VerticalDistance::Unlimited,
                        kind: AirwayKind::High,
                        bidirectional: true,
                    },
                    RouteSegment {
                        from_ident: "BRAVO".to_string(),
                        from_coord: coord(46.0, 10.0),
                        to_ident: "CHARLIE".to_string(),
                        to_coord: coord(44.0, 10.0),
                        lower: VerticalDistance::Fl(200),
                        upper: VerticalDistance::Unlimited,
                        kind: AirwayKind::High,
                        bidirectional: true,
                    },
                ],
            });
        builder.build()
    }

    /// `et` accumulates from departure rather than holding a per-leg
    /// duration: the third waypoint's time is the sum of both legs, not
    /// just the second leg's own flight time.
    #[test]
    fn compute_times_accumulates_from_departure() {
        let nd = three_leg_airway_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("ALFA/N0400F300 UX1 BRAVO UX1 CHARLIE");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();
        state.process_airways();
        assert!(state.errors.is_empty(), "unexpected errors: {:?}", state.errors);

        state.compute_times(&BTreeMap::new());

        let idents: Vec<&str> = state.waypoints.iter().map(|w| w.ident.as_str()).collect();
        assert_eq!(idents, vec!["ALFA", "BRAVO", "CHARLIE"]);

        let alfa_et = state.waypoints[0].et;
        let bravo_et = state.waypoints[1].et.expect("BRAVO has an et");
        let charlie_et = state.waypoints[2].et.expect("CHARLIE has an et");

        assert_eq!(alfa_et, None, "the departure has no leg behind it");
        assert!(charlie_et > bravo_et, "CHARLIE's et must include BRAVO's leg plus its own");

        // A per-leg (non-cumulative) implementation would give CHARLIE
        // roughly the same et as BRAVO, since both legs span two degrees
        // of latitude; the cumulative convention instead makes CHARLIE's
        // et close to double BRAVO's.
        let ratio = charlie_et.as_seconds() as f64 / bravo_et.as_seconds() as f64;
        assert!((ratio - 2.0).abs() < 0.2, "expected roughly double, got ratio {ratio}");
    }

    /// An `EET/` override replaces the running cumulative total outright
    /// (it is itself already cumulative from departure) rather than being
    /// added on top of the distance/speed estimate.
    #[test]
    fn compute_times_override_replaces_rather_than_adds() {
        let nd = three_leg_airway_nd();
        let mut state = ParseState::new(&nd, ResolutionPolicy::default());
        let tokens = token::split_route_tokens("ALFA/N0400F300 UX1 BRAVO UX1 CHARLIE");
        state.process_speedalt(&tokens, Rules::Ifr);
        state.process_dblookup();
        state.process_airways();
        assert!(state.errors.is_empty(), "unexpected errors: {:?}", state.errors);

        let mut overrides = BTreeMap::new();
        overrides.insert("BRAVO".to_string(), Duration::minutes(90.0));
        state.compute_times(&overrides);

        assert_eq!(state.waypoints[1].et, Some(Duration::minutes(90.0)));
        let charlie_et = state.waypoints[2].et.expect("CHARLIE has an et");
        // CHARLIE's et must continue accumulating from the 90-minute
        // override, not from whatever distance-based total preceded it.
        assert!(charlie_et > Duration::minutes(90.0));
    }
}
