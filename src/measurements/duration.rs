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

use std::ops::Div;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Length, Speed};

/// An elapsed time, e.g. a leg's estimated elapsed time (ET) or the
/// accumulated EET written into an Item-18 `EET/` token.
///
/// Stored as whole seconds since the formats this crate consumes and
/// produces (`HHMM`, `HHHMM` cumulative EET) never need sub-minute
/// precision; accumulating in seconds just avoids rounding error from
/// repeated minute-level additions across a long route.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration {
    seconds: i64,
}

impl Duration {
    /// Creates a duration from a whole number of seconds.
    pub fn seconds(seconds: i64) -> Self {
        Self { seconds }
    }

    /// Creates a duration from a (possibly fractional) number of minutes.
    pub fn minutes(minutes: f32) -> Self {
        Self::seconds((minutes * 60.0).round() as i64)
    }

    /// Creates a duration from a (possibly fractional) number of hours.
    pub fn hours(hours: f32) -> Self {
        Self::minutes(hours * 60.0)
    }

    /// The duration as a whole number of seconds.
    pub fn as_seconds(&self) -> i64 {
        self.seconds
    }

    /// The duration as a floating-point number of minutes.
    pub fn as_minutes(&self) -> f32 {
        self.seconds as f32 / 60.0
    }

    /// The duration as a floating-point number of hours.
    pub fn as_hours(&self) -> f32 {
        self.as_minutes() / 60.0
    }

    /// Formats the duration as an ICAO `HHMM` (or `HHHMM` for ≥ 100 hours)
    /// cumulative time token, as used by Item-18 `EET/` entries.
    pub fn to_hhmm(&self) -> String {
        let total_minutes = (self.seconds as f64 / 60.0).round() as i64;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        format!("{hours:02}{minutes:02}")
    }
}

impl std::ops::Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::seconds(self.seconds + rhs.seconds)
    }
}

impl std::ops::Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::seconds(self.seconds - rhs.seconds)
    }
}

impl std::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::add)
    }
}

/// `distance / speed = duration`, used to compute a leg's estimated
/// elapsed time from its great-circle distance and planned speed.
impl Div<Speed> for Length {
    type Output = Duration;

    fn div(self, rhs: Speed) -> Self::Output {
        Duration::seconds((self.to_si() / rhs.to_si()).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_over_speed_gives_duration() {
        // 100 nmi at 100 kt should take exactly one hour.
        let et = Length::nm(100.0) / Speed::kt(100.0);
        assert_eq!(et.as_minutes().round() as i64, 60);
    }

    #[test]
    fn to_hhmm_formats_with_leading_zeros() {
        assert_eq!(Duration::minutes(5.0).to_hhmm(), "0005");
        assert_eq!(Duration::hours(2.5).to_hhmm(), "0230");
    }

    #[test]
    fn sum_accumulates_across_legs() {
        let total: Duration = vec![Duration::minutes(30.0), Duration::minutes(45.0)]
            .into_iter()
            .sum();
        assert_eq!(total.as_minutes().round() as i64, 75);
    }
}
