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

//! The tokeniser and item parser (spec.md §4.1): a small hand-rolled
//! scanner over `&str`, mirroring `efb`'s `route::token::Lexer`/`Words`
//! split (word boundaries first, item grammar second) rather than reaching
//! for a parser-combinator crate `efb` never uses.

use crate::error::Error;

/// A cursor over the remaining input, following `efb`'s `Lexer` (a thin
/// wrapper over `Peekable<Chars>`) rather than tracking byte offsets by
/// hand.
pub struct Scanner<'a> {
    rest: &'a str,
    /// Byte offset of `rest` within the original input, used to report
    /// error context (spec.md §4.1, "the iterator is returned at the first
    /// unparseable position").
    pub(crate) offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input, offset: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.skip_ws_view().is_empty()
    }

    fn skip_ws_view(&self) -> &'a str {
        self.rest.trim_start_matches(|c: char| c.is_whitespace())
    }

    /// Consumes leading whitespace.
    pub fn skip_ws(&mut self) {
        let trimmed = self.skip_ws_view();
        self.offset += self.rest.len() - trimmed.len();
        self.rest = trimmed;
    }

    fn advance(&mut self, bytes: usize) -> &'a str {
        let (taken, rest) = self.rest.split_at(bytes);
        self.offset += bytes;
        self.rest = rest;
        taken
    }

    /// `parsetxt(len, slashsep)` (spec.md §4.1): consumes a maximal
    /// alphanumeric run, stopping at whitespace, `-`, `(`, `)`, and, when
    /// `slashsep` is set, `/`. If `len > 0` the run must have exactly that
    /// length.
    pub fn parsetxt(&mut self, len: usize, slashsep: bool) -> Result<&'a str, Error> {
        self.skip_ws();
        let stop = |c: char| c.is_whitespace() || c == '-' || c == '(' || c == ')' || (slashsep && c == '/');
        let end = self.rest.find(stop).unwrap_or(self.rest.len());
        if end == 0 || (len > 0 && end != len) {
            return Err(Error::UnexpectedToken(self.rest.chars().take(len.max(1)).collect()));
        }
        Ok(self.advance(end))
    }

    /// `parsenum(digits)` (spec.md §4.1): an unsigned decimal of exactly
    /// `digits` digits, or 1+ digits when `digits == 0`.
    pub fn parsenum(&mut self, digits: usize) -> Result<u32, Error> {
        self.skip_ws();
        let end = self.rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(self.rest.len());
        if end == 0 || (digits > 0 && end != digits) {
            return Err(Error::UnexpectedToken(self.rest.chars().take(digits.max(1)).collect()));
        }
        let taken = self.advance(end);
        taken.parse().map_err(|_| Error::UnexpectedToken(taken.to_string()))
    }

    /// Consumes a literal character (e.g. `-` between FPL items), skipping
    /// leading whitespace first.
    pub fn expect(&mut self, c: char) -> Result<(), Error> {
        self.skip_ws();
        if self.rest.starts_with(c) {
            self.advance(c.len_utf8());
            Ok(())
        } else {
            Err(Error::UnexpectedToken(self.rest.chars().take(1).collect()))
        }
    }

    /// Returns everything remaining, trimmed of surrounding whitespace and
    /// a trailing `)`.
    pub fn rest_trimmed(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest.trim_end().trim_end_matches(')').trim_end();
        self.advance(self.rest.len());
        rest
    }

    pub fn peek_char(&self) -> Option<char> {
        self.skip_ws_view().chars().next()
    }

    /// Returns the next whitespace-delimited word without consuming it, used
    /// by Item-18/19 free-text fields to decide whether the next word starts
    /// a new `CATEGORY/text` entry or continues the current one.
    pub fn peek_word(&self) -> Option<&'a str> {
        let view = self.skip_ws_view();
        if view.is_empty() {
            return None;
        }
        let stop = |c: char| c.is_whitespace() || c == '-' || c == '(' || c == ')';
        let end = view.find(stop).unwrap_or(view.len());
        if end == 0 {
            None
        } else {
            Some(&view[..end])
        }
    }
}

/// `parsetime` (spec.md §4.1): parses `HHMM`, returning seconds since
/// midnight.
pub fn parsetime(s: &str) -> Result<u32, Error> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidTime(s.to_string()));
    }
    let hours: u32 = s[0..2].parse().unwrap();
    let minutes: u32 = s[2..4].parse().unwrap();
    if hours > 23 || minutes > 59 {
        return Err(Error::InvalidTime(s.to_string()));
    }
    Ok(hours * 3600 + minutes * 60)
}

/// Splits the Item-15 route text into whitespace-separated raw tokens,
/// the way `efb`'s `Lexer` splits into `Word`s before the tokenizer
/// assigns each a grammatical role.
pub fn split_route_tokens(route: &str) -> Vec<String> {
    route.split_whitespace().map(str::to_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsetxt_stops_at_dash() {
        let mut s = Scanner::new("OEABC-VG");
        assert_eq!(s.parsetxt(0, false).unwrap(), "OEABC");
        s.expect('-').unwrap();
        assert_eq!(s.parsetxt(0, false).unwrap(), "VG");
    }

    #[test]
    fn parsetxt_enforces_exact_length() {
        let mut s = Scanner::new("LOWW ");
        assert_eq!(s.parsetxt(4, false).unwrap(), "LOWW");

        let mut s = Scanner::new("LO ");
        assert!(s.parsetxt(4, false).is_err());
    }

    #[test]
    fn parsenum_reads_fixed_digit_run() {
        let mut s = Scanner::new("0915 ");
        assert_eq!(s.parsenum(4).unwrap(), 915);
    }

    #[test]
    fn parsetime_rejects_out_of_range() {
        assert!(parsetime("2561").is_err());
        assert_eq!(parsetime("0915").unwrap(), 9 * 3600 + 15 * 60);
    }

    #[test]
    fn split_route_tokens_uppercases_and_splits() {
        let tokens = split_route_tokens("lh mk vm");
        assert_eq!(tokens, vec!["LH", "MK", "VM"]);
    }
}
