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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

/// A single validity interval `[valid_from, valid_until)` of a database
/// object, as described in spec.md §3: the same ident may refer to
/// different coordinates or altitudes in different AIRAC cycles.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlice<T> {
    pub valid_from: NaiveDate,
    /// Exclusive end of the validity interval; `None` means "still current".
    pub valid_until: Option<NaiveDate>,
    pub data: T,
}

impl<T> TimeSlice<T> {
    pub fn new(valid_from: NaiveDate, valid_until: Option<NaiveDate>, data: T) -> Self {
        Self {
            valid_from,
            valid_until,
            data,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_until.map_or(true, |until| date < until)
    }
}

/// A database object as the union of its [`TimeSlice`]s.
///
/// All reads take a departure-time key and resolve to the one concrete
/// slice valid at that time.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSliced<T>(pub Vec<TimeSlice<T>>);

impl<T> TimeSliced<T> {
    pub fn new(slices: Vec<TimeSlice<T>>) -> Self {
        Self(slices)
    }

    /// Resolves the object at `date`, returning the slice whose interval
    /// contains it.
    pub fn at(&self, date: NaiveDate) -> Option<&T> {
        self.0.iter().find(|slice| slice.contains(date)).map(|slice| &slice.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_slice_containing_date() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        let ts = TimeSliced::new(vec![
            TimeSlice::new(d(2024, 1, 1), Some(d(2024, 6, 1)), "old"),
            TimeSlice::new(d(2024, 6, 1), None, "new"),
        ]);

        assert_eq!(ts.at(d(2024, 3, 1)), Some(&"old"));
        assert_eq!(ts.at(d(2024, 6, 1)), Some(&"new"));
        assert_eq!(ts.at(d(2025, 1, 1)), Some(&"new"));
        assert_eq!(ts.at(d(2023, 1, 1)), None);
    }
}
