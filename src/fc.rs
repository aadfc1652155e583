// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
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

//! Flight Computer.
//!
//! Small numeric helpers shared by [`crate::geom`] and [`crate::nd`] that
//! don't warrant a [`Measurement`](crate::measurements::Measurement) of
//! their own.

/// Converts an angle from degrees, minutes and seconds to decimal degrees.
pub fn dms_to_decimal(degree: u16, minutes: u8, seconds: u8) -> f64 {
    degree as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0
}

/// Converts a (non-negative) decimal degree value into degrees, minutes and
/// seconds, rounding to the nearest whole second.
pub fn decimal_to_dms(value: f64) -> (u16, u8, u8) {
    let value = value.abs();
    let degree = value.trunc();
    let minutes_f = (value - degree) * 60.0;
    let minutes = minutes_f.trunc();
    let seconds = ((minutes_f - minutes) * 60.0).round();

    // a rounded 60.0 seconds carries into the next minute, and a carried
    // 60.0 minutes into the next degree.
    let (minutes, seconds) = if seconds >= 60.0 {
        (minutes + 1.0, 0.0)
    } else {
        (minutes, seconds)
    };
    let (degree, minutes) = if minutes >= 60.0 {
        (degree + 1.0, 0.0)
    } else {
        (degree, minutes)
    };

    (degree as u16, minutes as u8, seconds as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dms_round_trips_to_decimal() {
        let decimal = dms_to_decimal(47, 30, 0);
        assert!((decimal - 47.5).abs() < 1e-9);
    }

    #[test]
    fn decimal_round_trips_to_dms() {
        assert_eq!(decimal_to_dms(47.5), (47, 30, 0));
        assert_eq!(decimal_to_dms(8.244166_f64), (8, 14, 39));
    }

    #[test]
    fn decimal_to_dms_carries_seconds_into_minutes() {
        // 59.9999... minutes of arc must carry into the next degree, not
        // render as `X°60'`.
        assert_eq!(decimal_to_dms(0.999999), (1, 0, 0));
    }
}
