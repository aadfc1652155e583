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

//! Item-10/18/19 bitmasks and free-text holders (SPEC_FULL.md §11): the
//! full ICAO letter sets `original_source/src/icaofpl.cc` decodes, kept as
//! small typed wrappers over bare integers following this crate's general
//! preference (`TypeMask`, `AirwayKind`) over ad hoc strings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::Error;
use crate::measurements::Duration;

/// ICAO Item 10a equipment/capability letters, each a single bit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equipment(u32);

macro_rules! letter_bit {
    ($letter:expr) => {
        1u32 << (($letter as u8 - b'A') as u32)
    };
}

impl Equipment {
    pub const NONE: Self = Self(0);
    /// No COM/NAV/approach-aid equipment, and flight not to operate in RVSM.
    pub const N: Self = Self(letter_bit!('N'));
    pub const S: Self = Self(letter_bit!('S'));
    pub const A: Self = Self(letter_bit!('A'));
    pub const B: Self = Self(letter_bit!('B'));
    pub const C: Self = Self(letter_bit!('C'));
    pub const D: Self = Self(letter_bit!('D'));
    pub const E: Self = Self(letter_bit!('E'));
    pub const F: Self = Self(letter_bit!('F'));
    pub const G: Self = Self(letter_bit!('G'));
    pub const H: Self = Self(letter_bit!('H'));
    pub const I: Self = Self(letter_bit!('I'));
    pub const J: Self = Self(letter_bit!('J'));
    pub const K: Self = Self(letter_bit!('K'));
    pub const L: Self = Self(letter_bit!('L'));
    pub const M: Self = Self(letter_bit!('M'));
    pub const O: Self = Self(letter_bit!('O'));
    pub const P: Self = Self(letter_bit!('P'));
    pub const R: Self = Self(letter_bit!('R'));
    pub const T: Self = Self(letter_bit!('T'));
    pub const U: Self = Self(letter_bit!('U'));
    pub const V: Self = Self(letter_bit!('V'));
    pub const W: Self = Self(letter_bit!('W'));
    pub const X: Self = Self(letter_bit!('X'));
    pub const Y: Self = Self(letter_bit!('Y'));
    pub const Z: Self = Self(letter_bit!('Z'));

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Equipment {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::str::FromStr for Equipment {
    type Err = Error;

    /// Parses the Item 10a equipment string: a run of ICAO letters with no
    /// separators, e.g. `"SDFGRY"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u32;
        for c in s.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::UnexpectedToken(s.to_string()));
            }
            mask |= letter_bit!(c);
        }
        Ok(Self(mask))
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in b'A'..=b'Z' {
            if self.0 & letter_bit!(letter as char) != 0 {
                write!(f, "{}", letter as char)?;
            }
        }
        Ok(())
    }
}

/// ICAO Item 10b surveillance-transponder capability letters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transponder(u32);

impl Transponder {
    pub const NONE: Self = Self(0);
    /// No surveillance equipment.
    pub const N: Self = Self(letter_bit!('N'));
    /// Transponder, Mode A, no altitude reporting.
    pub const A: Self = Self(letter_bit!('A'));
    /// Transponder, Mode A and C.
    pub const C: Self = Self(letter_bit!('C'));
    /// Transponder, Mode S, no aircraft id, no altitude.
    pub const E: Self = Self(letter_bit!('E'));
    /// Transponder, Mode S, altitude and aircraft id.
    pub const H: Self = Self(letter_bit!('H'));
    /// Transponder, Mode S, altitude, no aircraft id.
    pub const I: Self = Self(letter_bit!('I'));
    /// Transponder, Mode S, aircraft id, no altitude.
    pub const L: Self = Self(letter_bit!('L'));
    /// ADS-B with dedicated 1090 MHz ADS-B "out" capability.
    pub const P: Self = Self(letter_bit!('P'));
    /// ADS-B, aircraft id, altitude, and extended squitter.
    pub const S: Self = Self(letter_bit!('S'));
    /// ADS-C with FANS 1/A capabilities.
    pub const X: Self = Self(letter_bit!('X'));

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Transponder {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::str::FromStr for Transponder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u32;
        for c in s.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::UnexpectedToken(s.to_string()));
            }
            mask |= letter_bit!(c);
        }
        Ok(Self(mask))
    }
}

impl fmt::Display for Transponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in b'A'..=b'Z' {
            if self.0 & letter_bit!(letter as char) != 0 {
                write!(f, "{}", letter as char)?;
            }
        }
        Ok(())
    }
}

/// ICAO Item 18 `PBN/` performance-based-navigation specification codes,
/// each a named bit rather than the bare two-character string the wire
/// format uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pbn(u32);

impl Pbn {
    pub const NONE: Self = Self(0);
    pub const A1: Self = Self(1 << 0);
    pub const B1: Self = Self(1 << 1);
    pub const B2: Self = Self(1 << 2);
    pub const B3: Self = Self(1 << 3);
    pub const B4: Self = Self(1 << 4);
    pub const B5: Self = Self(1 << 5);
    pub const B6: Self = Self(1 << 6);
    pub const C1: Self = Self(1 << 7);
    pub const C2: Self = Self(1 << 8);
    pub const C3: Self = Self(1 << 9);
    pub const C4: Self = Self(1 << 10);
    pub const D1: Self = Self(1 << 11);
    pub const D2: Self = Self(1 << 12);
    pub const D3: Self = Self(1 << 13);
    pub const D4: Self = Self(1 << 14);
    pub const O1: Self = Self(1 << 15);
    pub const O2: Self = Self(1 << 16);
    pub const O3: Self = Self(1 << 17);
    pub const O4: Self = Self(1 << 18);
    pub const S1: Self = Self(1 << 19);
    pub const S2: Self = Self(1 << 20);
    pub const T1: Self = Self(1 << 21);
    pub const T2: Self = Self(1 << 22);
    pub const L1: Self = Self(1 << 23);

    const CODES: &'static [(&'static str, Self)] = &[
        ("A1", Self::A1),
        ("B1", Self::B1),
        ("B2", Self::B2),
        ("B3", Self::B3),
        ("B4", Self::B4),
        ("B5", Self::B5),
        ("B6", Self::B6),
        ("C1", Self::C1),
        ("C2", Self::C2),
        ("C3", Self::C3),
        ("C4", Self::C4),
        ("D1", Self::D1),
        ("D2", Self::D2),
        ("D3", Self::D3),
        ("D4", Self::D4),
        ("O1", Self::O1),
        ("O2", Self::O2),
        ("O3", Self::O3),
        ("O4", Self::O4),
        ("S1", Self::S1),
        ("S2", Self::S2),
        ("T1", Self::T1),
        ("T2", Self::T2),
        ("L1", Self::L1),
    ];

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Pbn {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::str::FromStr for Pbn {
    type Err = Error;

    /// Parses the `PBN/` item text: a run of two-character codes with no
    /// separators, e.g. `"B2D2O2S1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() % 2 != 0 {
            return Err(Error::UnexpectedToken(s.to_string()));
        }
        let mut mask = 0u32;
        for chunk in bytes.chunks(2) {
            let code = std::str::from_utf8(chunk).map_err(|_| Error::UnexpectedToken(s.to_string()))?;
            let (_, bit) = Self::CODES
                .iter()
                .find(|(name, _)| *name == code)
                .ok_or_else(|| Error::UnexpectedToken(s.to_string()))?;
            mask |= bit.0;
        }
        Ok(Self(mask))
    }
}

impl fmt::Display for Pbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, bit) in Self::CODES {
            if self.0 & bit.0 != 0 {
                write!(f, "{name}")?;
            }
        }
        Ok(())
    }
}

/// Item 18 other-info: an ordered `category → text` mapping, preserving
/// insertion order and unrecognized categories verbatim
/// (`original_source/src/icaofpl.cc`'s opaque-preserving other-info table,
/// SPEC_FULL.md §11). Known categories (`EET`, `DOF`, `DEP`, `DEST`,
/// `PBN`, `RMK`, `STAYINFO*`, `SEL`, …) get no special struct field; they
/// are read and written through [`OtherInfo::get`]/[`OtherInfo::set`] like
/// any other category, so a category this crate doesn't specifically
/// reason about still round-trips untouched.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OtherInfo {
    entries: Vec<(String, String)>,
}

impl OtherInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(category))
            .map(|(_, text)| text.as_str())
    }

    /// Sets `category`'s text, appending it in insertion order if this is
    /// the first time the category is seen, or overwriting its existing
    /// text (keeping its original position) otherwise.
    pub fn set(&mut self, category: &str, text: impl Into<String>) {
        let text = text.into();
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| c.eq_ignore_ascii_case(category)) {
            entry.1 = text;
        } else {
            self.entries.push((category.to_string(), text));
        }
    }

    pub fn remove(&mut self, category: &str) {
        self.entries.retain(|(c, _)| !c.eq_ignore_ascii_case(category));
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), t.as_str()))
    }

    /// Whether `RMK/`'s free text contains `token` as a whole word,
    /// case-insensitively (used for `IFPSRA`/`POGO`/`CREW CONTACT`
    /// recognition, SPEC_FULL.md §11).
    pub fn rmk_contains_token(&self, token: &str) -> bool {
        self.get("RMK")
            .map(|rmk| rmk.split_whitespace().any(|w| w.eq_ignore_ascii_case(token)))
            .unwrap_or(false)
    }

    /// Appends `token` to `RMK/`'s free text if not already present.
    pub fn rmk_add_token(&mut self, token: &str) {
        if self.rmk_contains_token(token) {
            return;
        }
        let mut rmk = self.get("RMK").unwrap_or_default().to_string();
        if !rmk.is_empty() {
            rmk.push(' ');
        }
        rmk.push_str(token);
        self.set("RMK", rmk);
    }

    /// Removes `token` from `RMK/`'s free text, if present.
    pub fn rmk_remove_token(&mut self, token: &str) {
        let Some(rmk) = self.get("RMK") else { return };
        let remaining: Vec<&str> = rmk.split_whitespace().filter(|w| !w.eq_ignore_ascii_case(token)).collect();
        if remaining.is_empty() {
            self.remove("RMK");
        } else {
            self.set("RMK", remaining.join(" "));
        }
    }
}

/// How many persons are on board (Item 19 `P/`): a concrete count, or `TBN`
/// ("to be notified") when not yet known.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PersonsOnBoard {
    Count(u16),
    Tbn,
}

/// Item 19 `R/` emergency radio equipment carried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmergencyRadio(u8);

impl EmergencyRadio {
    pub const NONE: Self = Self(0);
    pub const UHF: Self = Self(1 << 0);
    pub const VHF: Self = Self(1 << 1);
    pub const ELT: Self = Self(1 << 2);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for EmergencyRadio {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Item 19 `S/` survival equipment carried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Survival(u8);

impl Survival {
    pub const NONE: Self = Self(0);
    pub const POLAR: Self = Self(1 << 0);
    pub const DESERT: Self = Self(1 << 1);
    pub const MARITIME: Self = Self(1 << 2);
    pub const JUNGLE: Self = Self(1 << 3);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Survival {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Item 19 `J/` lifejacket equipment carried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lifejackets(u8);

impl Lifejackets {
    pub const NONE: Self = Self(0);
    pub const LIGHT: Self = Self(1 << 0);
    pub const FLUORESCEIN: Self = Self(1 << 1);
    pub const UHF_RADIO: Self = Self(1 << 2);
    pub const VHF_RADIO: Self = Self(1 << 3);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Lifejackets {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Item 19 `D/` dinghies descriptor.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dinghies {
    pub number: u8,
    pub total_capacity: u16,
    pub covered: bool,
    pub colour: String,
}

/// Item 19 supplementary information, carried alongside the rest of
/// [`crate::fp::FlightPlan`] but kept in one struct since it's always
/// filled in or left empty as a unit.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item19 {
    pub endurance: Option<Duration>,
    pub persons_on_board: Option<PersonsOnBoard>,
    pub emergency_radio: EmergencyRadio,
    pub survival: Survival,
    pub lifejackets: Lifejackets,
    pub dinghies: Option<Dinghies>,
    pub colour_and_markings: String,
    pub remarks: String,
    pub pilot_in_command: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_round_trips_through_display() {
        let eq: Equipment = "SDFGRY".parse().unwrap();
        assert!(eq.contains(Equipment::S));
        assert!(eq.contains(Equipment::D));
        assert!(!eq.contains(Equipment::Z));
        assert_eq!(eq.to_string(), "DFGRSY");
    }

    #[test]
    fn transponder_parses_single_letter() {
        let t: Transponder = "S".parse().unwrap();
        assert!(t.contains(Transponder::S));
        assert!(!t.contains(Transponder::C));
    }

    #[test]
    fn pbn_parses_multiple_two_char_codes() {
        let pbn: Pbn = "B2D2O2S1".parse().unwrap();
        assert!(pbn.contains(Pbn::B2));
        assert!(pbn.contains(Pbn::D2));
        assert!(pbn.contains(Pbn::O2));
        assert!(pbn.contains(Pbn::S1));
        assert!(!pbn.contains(Pbn::A1));
        assert_eq!(pbn.to_string(), "B2D2O2S1");
    }

    #[test]
    fn pbn_rejects_unknown_code() {
        assert!("ZZ".parse::<Pbn>().is_err());
    }

    #[test]
    fn other_info_preserves_unknown_categories_and_order() {
        let mut info = OtherInfo::new();
        info.set("DOF", "050719");
        info.set("FOOBAR", "opaque text");
        info.set("RMK", "SOME REMARK");

        let cats: Vec<&str> = info.entries().map(|(c, _)| c).collect();
        assert_eq!(cats, vec!["DOF", "FOOBAR", "RMK"]);
        assert_eq!(info.get("foobar"), Some("opaque text"));
    }

    #[test]
    fn rmk_token_add_remove_is_idempotent() {
        let mut info = OtherInfo::new();
        info.rmk_add_token("POGO");
        assert!(info.rmk_contains_token("pogo"));
        info.rmk_add_token("POGO");
        assert_eq!(info.get("RMK"), Some("POGO"));

        info.rmk_remove_token("POGO");
        assert!(!info.rmk_contains_token("POGO"));
        assert_eq!(info.get("RMK"), None);
    }
}
