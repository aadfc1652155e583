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

//! Route-shape transforms (spec.md §4.5): post-processing passes applied to
//! an already-resolved waypoint list, each independently toggled the way
//! `efb`'s `route::Route` exposes a handful of display-shaping methods
//! rather than baking every option into decode itself.

use log::debug;

use crate::graph::RouteGraph;
use crate::measurements::{Duration, Length, LengthUnit};

use super::item::OtherInfo;
use super::policy::ResolutionPolicy;
use super::waypoint::{ParseWaypoint, PathCode, Rules};

/// Clears a redundant `DCT`/airway path code at an IFR/VFR rules boundary
/// (spec.md §4.5): a path code only describes how to reach the *next*
/// waypoint, and that connection is meaningless once the rules governing it
/// have changed out from under it.
pub fn enforce_pathcode_vfrifr(waypoints: &mut [ParseWaypoint]) {
    for i in 0..waypoints.len().saturating_sub(1) {
        if waypoints[i].rules != waypoints[i + 1].rules && waypoints[i].path_code.is_route() {
            debug!("clearing path code at rules boundary {} -> {}", waypoints[i].ident, waypoints[i + 1].ident);
            waypoints[i].path_code = PathCode::None;
        }
    }
}

/// Subdivides any DCT leg longer than `policy.max_dct_nm` by inserting
/// synthesized intermediate coordinate fixes along the great circle, so no
/// single unsupervised leg exceeds the configured maximum (spec.md §4.5
/// `fix_max_dct_distance`).
pub fn fix_max_dct_distance(waypoints: &mut Vec<ParseWaypoint>, graph: &mut RouteGraph, policy: &ResolutionPolicy) {
    let mut i = 0;
    while i + 1 < waypoints.len() {
        let split = {
            let (Some(a), Some(b)) = (waypoints[i].resolved, waypoints[i + 1].resolved) else {
                i += 1;
                continue;
            };
            if !matches!(waypoints[i].path_code, PathCode::DirectTo | PathCode::None) {
                i += 1;
                continue;
            }
            let from = graph.vertex(a).coord;
            let to = graph.vertex(b).coord;
            let total = from.dist(&to);
            if total <= policy.max_dct_nm {
                i += 1;
                continue;
            }
            let legs = (total.to_si() / policy.max_dct_nm.to_si()).ceil() as usize;
            (from, to, legs, waypoints[i].rules, waypoints[i].altitude, waypoints[i].speed)
        };

        let (from, to, legs, rules, altitude, speed) = split;
        debug!("splitting {}nm DCT leg {} -> {} into {legs} segments", from.dist(&to).convert_to(LengthUnit::NauticalMiles).value(), waypoints[i].ident, waypoints[i + 1].ident);

        let bearing = from.bearing(&to);
        let total_dist = from.dist(&to);
        let mut inserted = Vec::with_capacity(legs.saturating_sub(1));
        for leg in 1..legs {
            let frac = leg as f32 / legs as f32;
            let point_coord = from.course_distance(bearing, Length::m(*total_dist.convert_to(LengthUnit::Meters).value() * frac));
            let ident = point_coord.to_icao_string();
            let mut wp = ParseWaypoint::new(ident, crate::nd::TypeMask::USER, rules);
            wp.altitude = altitude;
            wp.speed = speed;
            wp.coordinate = Some(point_coord);
            wp.path_code = PathCode::DirectTo;
            wp.expanded = true;
            inserted.push(wp);
        }
        waypoints[i].path_code = PathCode::DirectTo;

        let count = inserted.len();
        for (offset, wp) in inserted.into_iter().enumerate() {
            waypoints.insert(i + 1 + offset, wp);
        }
        i += count + 1;
    }
}

/// Drops interior airway turn points whose cross-track deviation from the
/// chord between the surrounding kept waypoints is below
/// `policy.airway_deviation_threshold`, optionally keeping every waypoint
/// that is itself an airway-to-airway or airway-to-DCT junction (spec.md
/// §4.5 `erase_unnecessary_airway`).
pub fn erase_unnecessary_airway(waypoints: &mut Vec<ParseWaypoint>, graph: &RouteGraph, policy: &ResolutionPolicy, keep_turnpoints: bool, include_dct: bool) {
    let mut kept: Vec<bool> = vec![true; waypoints.len()];

    for i in 1..waypoints.len().saturating_sub(1) {
        if !waypoints[i].expanded {
            continue;
        }
        let is_junction = waypoints[i - 1].path_code.route_ident() != waypoints[i].path_code.route_ident();
        if keep_turnpoints && is_junction {
            continue;
        }
        if !include_dct && matches!(waypoints[i].path_code, PathCode::DirectTo) {
            continue;
        }

        let prev = (0..i).rev().find(|&j| kept[j]);
        let next = (i + 1..waypoints.len()).find(|&j| kept[j]);
        let (Some(prev), Some(next)) = (prev, next) else { continue };
        let (Some(pv), Some(nv), Some(cv)) = (waypoints[prev].resolved, waypoints[next].resolved, waypoints[i].resolved) else { continue };

        let a = graph.vertex(pv).coord;
        let b = graph.vertex(nv).coord;
        let c = graph.vertex(cv).coord;
        if c.cross_track_distance(&a, &b) < policy.airway_deviation_threshold {
            kept[i] = false;
        }
    }

    let mut idx = 0;
    waypoints.retain(|_| {
        let keep = kept[idx];
        idx += 1;
        keep
    });
}

/// A waypoint's ident is too short to be a meaningful `EET/` token, or reads
/// as a bare number (an expanded airway-interior waypoint's synthetic
/// ident), per `original_source/src/icaofpl.cc`'s `add_eet` skip rule
/// (spec.md §4.5).
fn is_eet_ident(ident: &str) -> bool {
    ident.len() >= 2 && !ident.chars().all(|c| c.is_ascii_digit())
}

/// Rebuilds `EET/` as one `IDENT HHMM` token per waypoint, keyed by ident
/// (spec.md §4.5 `add_eet`, §6, I6): each waypoint's cumulative elapsed
/// time from departure (`ParseWaypoint::et`) is emitted under its own
/// ident, skipping waypoints whose ident is numeric or shorter than two
/// characters; a later waypoint sharing an earlier one's ident replaces its
/// entry rather than appending a second one, and the result is sorted by
/// ascending elapsed time.
pub fn add_eet(waypoints: &[ParseWaypoint], otherinfo: &mut OtherInfo) {
    let mut pairs: Vec<(String, Duration)> = Vec::new();
    for wp in waypoints {
        let (Some(et), true) = (wp.et, is_eet_ident(&wp.ident)) else {
            continue;
        };
        let ident = wp.ident.to_uppercase();
        match pairs.iter_mut().find(|(i, _)| *i == ident) {
            Some(entry) => entry.1 = et,
            None => pairs.push((ident, et)),
        }
    }

    if pairs.is_empty() {
        otherinfo.remove("EET");
        return;
    }

    pairs.sort_by_key(|(_, et)| *et);
    let text = pairs.iter().map(|(ident, et)| format!("{ident}{}", et.to_hhmm())).collect::<Vec<_>>().join(" ");
    otherinfo.set("EET", text);
}

/// Adds or removes the `POGO` remark token used by Paris-area IFPS
/// processing to flag a route flown entirely IFR between two Paris TMA
/// airports, or between Beauvais (LFOB) and Pontoise/Villacoublay
/// (LFPN/LFPV), following the token-level RMK helpers in
/// [`super::item::OtherInfo`] rather than rewriting the whole remarks field
/// (spec.md §4.5 `normalize_pogo`).
pub fn normalize_pogo(waypoints: &[ParseWaypoint], otherinfo: &mut OtherInfo) {
    const PARIS_GROUP: &[&str] = &["LFPB", "LFPG", "LFPN", "LFPO", "LFPT", "LFPV", "LFPC", "LFPM"];

    let Some(departure) = waypoints.first() else {
        otherinfo.rmk_remove_token("POGO");
        return;
    };
    let Some(destination) = waypoints.last() else {
        otherinfo.rmk_remove_token("POGO");
        return;
    };

    let both_ifr = matches!(departure.rules, Rules::Ifr) && matches!(destination.rules, Rules::Ifr);
    let dep = departure.ident.as_str();
    let dest = destination.ident.as_str();

    let in_paris_group = both_ifr && PARIS_GROUP.contains(&dep) && PARIS_GROUP.contains(&dest);
    let lfob_pair = both_ifr
        && ((dep == "LFOB" && (dest == "LFPN" || dest == "LFPV")) || (dest == "LFOB" && (dep == "LFPN" || dep == "LFPV")));

    if in_paris_group || lfob_pair {
        otherinfo.rmk_add_token("POGO");
    } else {
        otherinfo.rmk_remove_token("POGO");
    }
}
