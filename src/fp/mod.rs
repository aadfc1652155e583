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

//! ICAO Item-15 flight-plan parsing, resolution and re-emission
//! (spec.md §§3-4): [`FlightPlan`] is the public facade over the full
//! `(FPL-...)` message grammar, built on the tokeniser ([`token`]), the
//! per-field typed wrappers ([`item`]), the route resolver
//! ([`ParseState`]) and the post-resolution transforms ([`transform`]).

mod item;
mod parse_state;
mod policy;
mod token;
mod transform;
mod waypoint;

pub use item::{
    Dinghies, EmergencyRadio, Equipment, Item19, Lifejackets, OtherInfo, Pbn, PersonsOnBoard,
    Survival, Transponder,
};
pub use parse_state::ParseState;
pub use policy::{DefaultAltitudePolicy, ResolutionPolicy};
pub use waypoint::{Path, ParseWaypoint, PathCode, Rules};

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::core::VerticalDistance;
use crate::error::Error;
use crate::graph::RouteGraph;
use crate::measurements::{Duration, Speed, SpeedUnit};
use crate::nd::{NavEntity, NavigationData, SearchFlags, TypeMask};

/// Item 8a, the flight rules the pilot files under.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FlightRules {
    Ifr,
    Vfr,
    IfrThenVfr,
    VfrThenIfr,
}

impl FlightRules {
    /// The rules in force for the first leg of the route (spec.md §6):
    /// `Y`/`Z` only say where the flight *changes* rules partway, the
    /// initial leg still starts IFR or VFR respectively.
    fn initial(self) -> Rules {
        match self {
            Self::Ifr | Self::IfrThenVfr => Rules::Ifr,
            Self::Vfr | Self::VfrThenIfr => Rules::Vfr,
        }
    }
}

impl Default for FlightRules {
    fn default() -> Self {
        Self::Ifr
    }
}

impl FromStr for FlightRules {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::Ifr),
            "V" => Ok(Self::Vfr),
            "Y" => Ok(Self::IfrThenVfr),
            "Z" => Ok(Self::VfrThenIfr),
            _ => Err(Error::InvalidFlightRulesOrType(s.to_string())),
        }
    }
}

impl fmt::Display for FlightRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Ifr => 'I',
            Self::Vfr => 'V',
            Self::IfrThenVfr => 'Y',
            Self::VfrThenIfr => 'Z',
        };
        write!(f, "{c}")
    }
}

/// Item 8b, the type of flight.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FlightType {
    General,
    Scheduled,
    NonScheduled,
    Military,
    Other,
}

impl Default for FlightType {
    fn default() -> Self {
        Self::General
    }
}

impl FromStr for FlightType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" => Ok(Self::General),
            "S" => Ok(Self::Scheduled),
            "N" => Ok(Self::NonScheduled),
            "M" => Ok(Self::Military),
            "X" => Ok(Self::Other),
            _ => Err(Error::InvalidFlightRulesOrType(s.to_string())),
        }
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::General => 'G',
            Self::Scheduled => 'S',
            Self::NonScheduled => 'N',
            Self::Military => 'M',
            Self::Other => 'X',
        };
        write!(f, "{c}")
    }
}

/// Item 9, the wake turbulence category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WakeCategory {
    Light,
    Medium,
    Heavy,
    Super,
}

impl Default for WakeCategory {
    fn default() -> Self {
        Self::Medium
    }
}

impl FromStr for WakeCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::Light),
            "M" => Ok(Self::Medium),
            "H" => Ok(Self::Heavy),
            "J" => Ok(Self::Super),
            _ => Err(Error::InvalidWakeCategory(s.to_string())),
        }
    }
}

impl fmt::Display for WakeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Light => 'L',
            Self::Medium => 'M',
            Self::Heavy => 'H',
            Self::Super => 'J',
        };
        write!(f, "{c}")
    }
}

/// A resolved, route-expanded ICAO flight plan (spec.md §3).
///
/// Built either field by field (`FlightPlan::new` then assign, then
/// [`FlightPlan::set_route`] and [`FlightPlan::populate`]) or in one shot
/// from a raw `(FPL-...)` message via [`FlightPlan::parse`].
pub struct FlightPlan {
    pub aircraft_id: String,
    pub flight_rules: FlightRules,
    pub flight_type: FlightType,
    pub number: u8,
    pub aircraft_type: String,
    pub wake_category: WakeCategory,
    pub equipment: Equipment,
    pub transponder: Transponder,
    pub pbn: Pbn,
    pub departure: String,
    pub eobt: Duration,
    pub destination: String,
    pub total_eet: Duration,
    pub alternate1: Option<String>,
    pub alternate2: Option<String>,
    pub sid: Option<String>,
    pub star: Option<String>,
    pub route: Vec<ParseWaypoint>,
    pub graph: RouteGraph,
    pub otherinfo: OtherInfo,
    pub item19: Item19,
    pub cruisespeeds: BTreeMap<u32, Speed>,
    pub policy: ResolutionPolicy,
    initial_altitude_is_standard: bool,
    errors: Vec<Error>,
}

impl FlightPlan {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            aircraft_id: String::new(),
            flight_rules: FlightRules::default(),
            flight_type: FlightType::default(),
            number: 1,
            aircraft_type: String::new(),
            wake_category: WakeCategory::default(),
            equipment: Equipment::NONE,
            transponder: Transponder::NONE,
            pbn: Pbn::NONE,
            departure: String::new(),
            eobt: Duration::seconds(0),
            destination: String::new(),
            total_eet: Duration::seconds(0),
            alternate1: None,
            alternate2: None,
            sid: None,
            star: None,
            route: Vec::new(),
            graph: RouteGraph::new(),
            otherinfo: OtherInfo::new(),
            item19: Item19::default(),
            cruisespeeds: BTreeMap::new(),
            policy,
            initial_altitude_is_standard: false,
            errors: Vec::new(),
        }
    }

    /// Non-fatal errors accumulated while parsing and resolving the route
    /// (spec.md §7: lookup failures, ambiguous terminal-area waypoints and
    /// the like do not abort the pipeline).
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Parses a full `(FPL-...)` message and resolves its route against
    /// `nd`.
    pub fn parse(message: &str, nd: &NavigationData, policy: ResolutionPolicy) -> Self {
        let mut plan = Self::new(policy);
        let body = message
            .trim()
            .trim_start_matches('(')
            .trim_start_matches("FPL-")
            .trim_start_matches("FPL")
            .trim_start_matches('-');
        let mut scanner = token::Scanner::new(body);

        match scanner.parsetxt(0, false) {
            Ok(id) => plan.aircraft_id = id.to_string(),
            Err(e) => plan.errors.push(e),
        }
        let _ = scanner.expect('-');

        match scanner.parsetxt(0, false) {
            Ok(tok) => match parse_item8(tok) {
                Ok((rules, ftype)) => {
                    plan.flight_rules = rules;
                    plan.flight_type = ftype;
                }
                Err(e) => plan.errors.push(e),
            },
            Err(e) => plan.errors.push(e),
        }
        let _ = scanner.expect('-');

        if let Ok(tok) = scanner.parsetxt(0, true) {
            match parse_item9_prefix(tok) {
                Ok((number, actype)) => {
                    plan.number = number;
                    plan.aircraft_type = actype;
                }
                Err(e) => plan.errors.push(e),
            }
            if scanner.expect('/').is_ok() {
                match scanner.parsetxt(1, false) {
                    Ok(wake) => match wake.parse() {
                        Ok(w) => plan.wake_category = w,
                        Err(e) => plan.errors.push(e),
                    },
                    Err(e) => plan.errors.push(e),
                }
            }
        }
        let _ = scanner.expect('-');

        if let Ok(tok) = scanner.parsetxt(0, true) {
            match tok.parse() {
                Ok(eq) => plan.equipment = eq,
                Err(e) => plan.errors.push(e),
            }
            if scanner.expect('/').is_ok() {
                match scanner.parsetxt(0, false) {
                    Ok(transp) => match transp.parse() {
                        Ok(t) => plan.transponder = t,
                        Err(e) => plan.errors.push(e),
                    },
                    Err(e) => plan.errors.push(e),
                }
            }
        }
        let _ = scanner.expect('-');

        // Item 13 is the aerodrome-of-departure ident and EOBT concatenated
        // with no internal delimiter (`LOWW0915`, not `LOWW 0915`), so the
        // two fixed-width fields must be split out of a single 8-character
        // token rather than read as two independently delimited ones.
        if let Ok(tok) = scanner.parsetxt(8, false) {
            plan.departure = tok[..4].to_string();
            match token::parsetime(&tok[4..]) {
                Ok(secs) => plan.eobt = Duration::seconds(secs as i64),
                Err(e) => plan.errors.push(e),
            }
        }
        let _ = scanner.expect('-');

        let item15_text = read_words_until_dash(&mut scanner);
        let _ = scanner.expect('-');

        // Item 16's destination + total EET is the same concatenated
        // 8-character field as item 13.
        if let Ok(tok) = scanner.parsetxt(8, false) {
            plan.destination = tok[..4].to_string();
            match token::parsetime(&tok[4..]) {
                Ok(secs) => plan.total_eet = Duration::seconds(secs as i64),
                Err(e) => plan.errors.push(e),
            }
        }
        let alternates = read_words_until_dash(&mut scanner);
        let mut alts = alternates.split_whitespace();
        plan.alternate1 = alts.next().map(str::to_string);
        plan.alternate2 = alts.next().map(str::to_string);

        if scanner.expect('-').is_ok() {
            let other_text = read_words_until_dash(&mut scanner);
            plan.otherinfo = parse_category_map(&other_text);

            if scanner.expect('-').is_ok() {
                let item19_text = scanner.rest_trimmed();
                plan.item19 = parse_item19(item19_text);
            }
        }

        plan.set_route(&item15_text, nd);
        plan.populate(nd);
        plan
    }

    /// Alias for [`FlightPlan::set_route`] matching spec.md §2's facade
    /// naming (`parse_route` alongside `parse`/`populate`).
    pub fn parse_route(&mut self, item15: &str, nd: &NavigationData) {
        self.set_route(item15, nd);
    }

    /// Tokenises and resolves Item 15 against `nd`, replacing
    /// [`FlightPlan::route`](Self::route) and
    /// [`FlightPlan::graph`](Self::graph) with the result. Appends any
    /// resolution errors to [`FlightPlan::errors`](Self::errors).
    pub fn set_route(&mut self, item15: &str, nd: &NavigationData) {
        let tokens = token::split_route_tokens(item15);
        let mut state = ParseState::new(nd, self.policy.clone());

        // Item 15's body names only the waypoints between departure and
        // destination, but the parse state treats the flight plan as one
        // continuous chain of waypoints (spec.md §8, S1's "LOGG, LH, MK, VM,
        // LOWK" includes both endpoints) so that forward/backward airway
        // expansion, `fix_max_dct_distance` and `normalize_pogo` all have a
        // real departure/destination vertex to measure from. We splice the
        // two airport idents onto the body here rather than teach every
        // downstream stage about an implicit start/end.
        let (body, initial_speed, initial_altitude) = match split_initial_speedalt(&tokens) {
            Some((speed, altitude, is_standard, rest)) => {
                self.initial_altitude_is_standard = is_standard;
                (rest, Some(speed), Some(altitude))
            }
            None => (tokens, None, None),
        };
        let mut chained = Vec::with_capacity(body.len() + 2);
        chained.push(self.departure.clone());
        chained.extend(body);
        chained.push(self.destination.clone());

        state.process_speedalt_seeded(&chained, self.flight_rules.initial(), initial_speed, initial_altitude);
        state.process_dblookup();
        state.process_airways();

        let eet_overrides = eet_overrides_from_otherinfo(&self.otherinfo);
        state.compute_times(&eet_overrides);

        self.errors.extend(state.errors().iter().cloned());
        self.cruisespeeds = state.cruisespeeds.clone();
        let (waypoints, graph) = state.into_parts();
        self.route = waypoints;
        self.graph = graph;
    }

    /// Runs the post-resolution transforms (spec.md §7) and fills in
    /// fields derivable from the resolved route: the default cruise
    /// altitude when none was filed, the SID/STAR designators, and the
    /// `PBN`/`EET`/`POGO` other-info entries.
    pub fn populate(&mut self, nd: &NavigationData) {
        self.apply_default_altitude(nd);
        self.extract_sid_star();
        self.validate_stays();

        if self.pbn.is_empty() {
            if let Some(text) = self.otherinfo.get("PBN") {
                match text.parse() {
                    Ok(pbn) => self.pbn = pbn,
                    Err(e) => self.errors.push(e),
                }
            }
        }

        transform::enforce_pathcode_vfrifr(&mut self.route);
        transform::fix_max_dct_distance(&mut self.route, &mut self.graph, &self.policy);
        transform::erase_unnecessary_airway(&mut self.route, &self.graph, &self.policy, true, false);
        transform::add_eet(&self.route, &mut self.otherinfo);
        transform::normalize_pogo(&self.route, &mut self.otherinfo);

        if !self.pbn.is_empty() && !self.otherinfo.contains("PBN") {
            self.otherinfo.set("PBN", self.pbn.to_string());
        }

        debug!(
            "populated flight plan {} -> {}: {} waypoints, {} error(s)",
            self.departure,
            self.destination,
            self.route.len(),
            self.errors.len()
        );
    }

    fn apply_default_altitude(&mut self, nd: &NavigationData) {
        if self.route.iter().any(|w| w.altitude.is_some()) {
            return;
        }
        let (Some(dep_elev), Some(dest_elev)) = (
            self.airport_elevation(nd, &self.departure),
            self.airport_elevation(nd, &self.destination),
        ) else {
            warn!(
                "cannot default cruise altitude: departure or destination airport not found ({} / {})",
                self.departure, self.destination
            );
            return;
        };
        let altitude = self.policy.default_altitude_rounding.apply(dep_elev, dest_elev);
        if let Some(first) = self.route.first_mut() {
            first.altitude = Some(altitude);
            self.initial_altitude_is_standard = true;
        }
    }

    fn airport_elevation(&self, nd: &NavigationData, ident: &str) -> Option<VerticalDistance> {
        nd.find()
            .by_ident(ident, SearchFlags::new(TypeMask::AIRPORT))
            .into_iter()
            .find_map(|e| match e {
                NavEntity::Airport(a) => Some(a.elevation),
                _ => None,
            })
    }

    fn extract_sid_star(&mut self) {
        self.sid = self.route.iter().find_map(|w| match &w.path_code {
            PathCode::Sid(s) => Some(s.clone()),
            _ => None,
        });
        self.star = self.route.iter().rev().find_map(|w| match &w.path_code {
            PathCode::Star(s) => Some(s.clone()),
            _ => None,
        });
    }

    /// Validates `STAY[n]` usage (spec.md §7): indices must be unique,
    /// strictly consecutive starting at 1, and each must have a matching
    /// `STAYINFOn` other-info entry.
    fn validate_stays(&mut self) {
        let mut indices: Vec<u8> = self
            .route
            .iter()
            .filter_map(|w| match w.path_code {
                PathCode::Stay(n) => Some(n),
                _ => None,
            })
            .collect();

        let mut seen = HashSet::new();
        for &n in &indices {
            if !seen.insert(n) {
                self.errors.push(Error::DuplicateStay(n));
            }
        }

        indices.sort_unstable();
        indices.dedup();
        if indices.iter().enumerate().any(|(i, &n)| n as usize != i + 1) {
            self.errors.push(Error::NonConsecutiveStay);
        }

        for &n in &indices {
            if !self.otherinfo.contains(&format!("STAYINFO{n}")) {
                self.errors.push(Error::MissingStayInfo(n));
            }
        }
    }

    /// Re-emits Item 15's route text (spec.md §4.4) from the resolved
    /// route: the leading speed/level token, then each filed waypoint with
    /// a `/speed+level` suffix whenever it changes, the airway/SID/STAR
    /// designator or `DCT`/`STAYn` between waypoints, and `IFR`/`VFR` rule
    /// changes. Waypoints synthesized by airway expansion or DCT-splitting
    /// (`ParseWaypoint::expanded`) are not re-emitted — they were never
    /// part of the filed text.
    pub fn get_item15(&self) -> String {
        let visible: Vec<&ParseWaypoint> = self.route.iter().filter(|w| !w.expanded).collect();
        let Some(first) = visible.first() else {
            return String::new();
        };

        let mut parts = Vec::new();
        let mut last_speed = None;
        let mut last_altitude = None;
        if let (Some(speed), Some(altitude)) = (first.speed, first.altitude) {
            parts.push(format_level_token(speed, altitude, self.initial_altitude_is_standard));
            last_speed = Some(speed);
            last_altitude = Some(altitude);
        }
        let mut last_rules = first.rules;

        // `visible[0]` and `visible.last()` are the departure and
        // destination airports (`set_route` chains them onto the body so
        // the rest of the pipeline has real endpoints to route from); they
        // are filed in Items 13/16, not Item 15, so only the path code
        // linking them into the chain is re-emitted here, never their
        // idents (spec.md §4.4).
        let last_index = visible.len() - 1;
        for (i, wp) in visible.iter().enumerate() {
            if i > 0 && i < last_index {
                if last_rules != wp.rules {
                    parts.push(
                        match wp.rules {
                            Rules::Ifr => "IFR",
                            Rules::Vfr => "VFR",
                        }
                        .to_string(),
                    );
                    last_rules = wp.rules;
                }

                let mut token = wp.ident.clone();
                if wp.speed != last_speed || wp.altitude != last_altitude {
                    if let (Some(speed), Some(altitude)) = (wp.speed, wp.altitude) {
                        token.push('/');
                        token.push_str(&format_level_token(speed, altitude, wp.altitude_is_standard));
                    }
                }
                parts.push(token);
                last_speed = wp.speed.or(last_speed);
                last_altitude = wp.altitude.or(last_altitude);
            }

            if i < last_index {
                match &wp.path_code {
                    PathCode::Airway(ident) | PathCode::Sid(ident) | PathCode::Star(ident) => {
                        parts.push(ident.clone());
                    }
                    PathCode::DirectTo => parts.push("DCT".to_string()),
                    PathCode::Stay(n) => parts.push(format!("STAY{n}")),
                    PathCode::VfrDeparture | PathCode::VfrArrival | PathCode::VfrTransition => {}
                    PathCode::None => {
                        // A plan with no route body at all (departure and
                        // destination only) still files a `DCT` leg between
                        // them when both ends are IFR (spec.md §4.4).
                        if last_index == 1 && matches!(wp.rules, Rules::Ifr) && matches!(visible[last_index].rules, Rules::Ifr) {
                            parts.push("DCT".to_string());
                        }
                    }
                }
            }
        }

        parts.join(" ")
    }

    /// Re-emits the full `(FPL-...)` message (spec.md §4.4).
    pub fn get_fpl(&self) -> String {
        let mut s = format!(
            "(FPL-{}-{}{}-{}{}/{}-{}/{}-{}{}-{}-{}{}",
            self.aircraft_id,
            self.flight_rules,
            self.flight_type,
            if self.number > 1 { self.number.to_string() } else { String::new() },
            self.aircraft_type,
            self.wake_category,
            self.equipment,
            self.transponder,
            self.departure,
            eobt_hhmm(self.eobt),
            self.get_item15(),
            self.destination,
            eobt_hhmm(self.total_eet),
        );

        for alt in [&self.alternate1, &self.alternate2].into_iter().flatten() {
            s.push(' ');
            s.push_str(alt);
        }

        let other = format_category_entries(self.otherinfo.entries());
        if !other.is_empty() {
            s.push('-');
            s.push_str(&other);
        }

        let item19 = format_item19(&self.item19);
        if !item19.is_empty() {
            s.push('-');
            s.push_str(&item19);
        }

        s.push(')');
        s
    }
}

fn eobt_hhmm(d: Duration) -> String {
    let total_minutes = d.as_seconds().max(0) / 60;
    format!("{:02}{:02}", (total_minutes / 60) % 24, total_minutes % 60)
}

fn parse_item8(tok: &str) -> Result<(FlightRules, FlightType), Error> {
    let mut chars = tok.chars();
    let rules_ch = chars.next().ok_or_else(|| Error::InvalidFlightRulesOrType(tok.to_string()))?;
    let rules: FlightRules = rules_ch.to_string().parse()?;
    let flight_type = match chars.next() {
        Some(c) => c.to_string().parse()?,
        None => FlightType::default(),
    };
    Ok((rules, flight_type))
}

fn parse_item9_prefix(tok: &str) -> Result<(u8, String), Error> {
    let digit_len = tok.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_len == 0 || digit_len == tok.len() {
        return Ok((1, tok.to_string()));
    }
    let number: u8 = tok[..digit_len]
        .parse()
        .map_err(|_| Error::UnexpectedToken(tok.to_string()))?;
    Ok((number, tok[digit_len..].to_string()))
}

/// Strips Item 15's leading bare `speed+level` token, which names no
/// waypoint (spec.md §6), and returns its parsed speed/altitude along with
/// the remaining tokens to walk as the route proper.
fn split_initial_speedalt(tokens: &[String]) -> Option<(Speed, VerticalDistance, bool, Vec<String>)> {
    let first = tokens.first()?;
    let (speed, altitude, is_standard) = parse_state::parse_speedalt_suffix(first).ok()?;
    Some((speed, altitude, is_standard, tokens[1..].to_vec()))
}

fn read_words_until_dash(scanner: &mut token::Scanner<'_>) -> String {
    let mut words = Vec::new();
    loop {
        scanner.skip_ws();
        if scanner.is_empty() || scanner.peek_char() == Some('-') {
            break;
        }
        match scanner.parsetxt(0, false) {
            Ok(word) => words.push(word.to_string()),
            Err(_) => break,
        }
    }
    words.join(" ")
}

/// Splits Item-18/19 free text into `(category, text)` entries: a word is
/// a new category when it contains `/` with an all-alphabetic prefix,
/// otherwise it continues the current category's text (spec.md §6).
fn split_categories(text: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for word in text.split_whitespace() {
        if let Some(idx) = word.find('/') {
            let (cat, rest) = word.split_at(idx);
            let rest = &rest[1..];
            if !cat.is_empty() && cat.chars().all(|c| c.is_ascii_alphabetic()) {
                entries.push((cat.to_string(), rest.to_string()));
                continue;
            }
        }
        if let Some((_, text)) = entries.last_mut() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }
    entries
}

fn parse_category_map(text: &str) -> OtherInfo {
    let mut info = OtherInfo::new();
    for (cat, text) in split_categories(text) {
        info.set(&cat, text);
    }
    info
}

fn parse_item19(text: &str) -> Item19 {
    let mut item19 = Item19::default();
    for (cat, text) in split_categories(text) {
        match cat.as_str() {
            "E" => {
                if let Ok(secs) = token::parsetime(&text) {
                    item19.endurance = Some(Duration::seconds(secs as i64));
                }
            }
            "P" => {
                item19.persons_on_board = Some(if text.eq_ignore_ascii_case("TBN") {
                    PersonsOnBoard::Tbn
                } else if let Ok(n) = text.parse() {
                    PersonsOnBoard::Count(n)
                } else {
                    continue;
                });
            }
            "R" => item19.emergency_radio = parse_emergency_radio(&text),
            "S" => item19.survival = parse_survival(&text),
            "J" => item19.lifejackets = parse_lifejackets(&text),
            "D" => item19.dinghies = Some(parse_dinghies(&text)),
            "A" => item19.colour_and_markings = text,
            "N" => item19.remarks = text,
            "C" => item19.pilot_in_command = text,
            _ => {}
        }
    }
    item19
}

fn parse_emergency_radio(text: &str) -> EmergencyRadio {
    text.chars().fold(EmergencyRadio::NONE, |mask, c| {
        mask
            | match c {
                'U' => EmergencyRadio::UHF,
                'V' => EmergencyRadio::VHF,
                'E' => EmergencyRadio::ELT,
                _ => EmergencyRadio::NONE,
            }
    })
}

fn parse_survival(text: &str) -> Survival {
    text.chars().fold(Survival::NONE, |mask, c| {
        mask
            | match c {
                'P' => Survival::POLAR,
                'D' => Survival::DESERT,
                'M' => Survival::MARITIME,
                'J' => Survival::JUNGLE,
                _ => Survival::NONE,
            }
    })
}

fn parse_lifejackets(text: &str) -> Lifejackets {
    text.chars().fold(Lifejackets::NONE, |mask, c| {
        mask
            | match c {
                'L' => Lifejackets::LIGHT,
                'F' => Lifejackets::FLUORESCEIN,
                'U' => Lifejackets::UHF_RADIO,
                'V' => Lifejackets::VHF_RADIO,
                _ => Lifejackets::NONE,
            }
    })
}

fn parse_dinghies(text: &str) -> Dinghies {
    let mut words = text.split_whitespace();
    let number = words.next().and_then(|w| w.parse().ok()).unwrap_or(0);
    let total_capacity = words.next().and_then(|w| w.parse().ok()).unwrap_or(0);
    let mut covered = false;
    let mut colour_words = Vec::new();
    for w in words {
        if !covered && w.eq_ignore_ascii_case("C") {
            covered = true;
        } else {
            colour_words.push(w);
        }
    }
    Dinghies {
        number,
        total_capacity,
        covered,
        colour: colour_words.join(" "),
    }
}

fn format_emergency_radio(r: EmergencyRadio) -> String {
    let mut s = String::new();
    if r.contains(EmergencyRadio::UHF) {
        s.push('U');
    }
    if r.contains(EmergencyRadio::VHF) {
        s.push('V');
    }
    if r.contains(EmergencyRadio::ELT) {
        s.push('E');
    }
    s
}

fn format_survival(survival: Survival) -> String {
    let mut s = String::new();
    if survival.contains(Survival::POLAR) {
        s.push('P');
    }
    if survival.contains(Survival::DESERT) {
        s.push('D');
    }
    if survival.contains(Survival::MARITIME) {
        s.push('M');
    }
    if survival.contains(Survival::JUNGLE) {
        s.push('J');
    }
    s
}

fn format_lifejackets(jackets: Lifejackets) -> String {
    let mut s = String::new();
    if jackets.contains(Lifejackets::LIGHT) {
        s.push('L');
    }
    if jackets.contains(Lifejackets::FLUORESCEIN) {
        s.push('F');
    }
    if jackets.contains(Lifejackets::UHF_RADIO) {
        s.push('U');
    }
    if jackets.contains(Lifejackets::VHF_RADIO) {
        s.push('V');
    }
    s
}

fn format_item19(item19: &Item19) -> String {
    let mut parts = Vec::new();
    if let Some(endurance) = item19.endurance {
        parts.push(format!("E/{}", eobt_hhmm(endurance)));
    }
    if let Some(pob) = &item19.persons_on_board {
        let text = match pob {
            PersonsOnBoard::Count(n) => n.to_string(),
            PersonsOnBoard::Tbn => "TBN".to_string(),
        };
        parts.push(format!("P/{text}"));
    }
    if item19.emergency_radio != EmergencyRadio::NONE {
        parts.push(format!("R/{}", format_emergency_radio(item19.emergency_radio)));
    }
    if item19.survival != Survival::NONE {
        parts.push(format!("S/{}", format_survival(item19.survival)));
    }
    if item19.lifejackets != Lifejackets::NONE {
        parts.push(format!("J/{}", format_lifejackets(item19.lifejackets)));
    }
    if let Some(dinghies) = &item19.dinghies {
        let mut d = format!("D/{} {}", dinghies.number, dinghies.total_capacity);
        if dinghies.covered {
            d.push_str(" C");
        }
        if !dinghies.colour.is_empty() {
            d.push(' ');
            d.push_str(&dinghies.colour);
        }
        parts.push(d);
    }
    if !item19.colour_and_markings.is_empty() {
        parts.push(format!("A/{}", item19.colour_and_markings));
    }
    if !item19.remarks.is_empty() {
        parts.push(format!("N/{}", item19.remarks));
    }
    if !item19.pilot_in_command.is_empty() {
        parts.push(format!("C/{}", item19.pilot_in_command));
    }
    parts.join(" ")
}

fn format_category_entries<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    entries.map(|(c, t)| format!("{c}/{t}")).collect::<Vec<_>>().join(" ")
}

fn format_level_token(speed: Speed, altitude: VerticalDistance, is_standard: bool) -> String {
    format!("{}{}", format_speed(speed), format_level(altitude, is_standard))
}

fn format_speed(speed: Speed) -> String {
    format!("N{:04}", speed.convert_to(SpeedUnit::Knots).value().round() as u32)
}

fn format_level(altitude: VerticalDistance, is_standard: bool) -> String {
    match altitude {
        VerticalDistance::Gnd => "VFR".to_string(),
        VerticalDistance::Fl(fl) => format!("F{fl:03}"),
        VerticalDistance::Altitude(ft) if is_standard => format!("F{:03}", ft / 100),
        VerticalDistance::Altitude(ft) => format!("A{:03}", ft / 100),
        other => format!("A{:03}", f32::from(other) as u32 / 100),
    }
}

/// Parses Item 18's `EET/` entries (spec.md §6): a sequence of FIR-ident
/// + `HHMM` cumulative elapsed-time pairs with no separator between them,
/// keyed by the ident compute_times uses to stamp a waypoint's estimated
/// time.
fn eet_overrides_from_otherinfo(info: &OtherInfo) -> BTreeMap<String, Duration> {
    let mut map = BTreeMap::new();
    let Some(text) = info.get("EET") else {
        return map;
    };
    for word in text.split_whitespace() {
        if word.len() <= 4 {
            continue;
        }
        let (ident, time) = word.split_at(word.len() - 4);
        if let Ok(secs) = token::parsetime(time) {
            map.insert(ident.to_string(), Duration::seconds(secs as i64));
        }
    }
    map
}
