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

//! A parser, resolver and router for ICAO Item-15 flight plans.
//!
//! The pipeline is a straight line from raw text to a fully resolved route:
//! [`fp::token`] tokenises the Item-15 route field, [`fp::ParseState`] walks
//! the tokens against a [`nd::NavigationData`] snapshot and a [`graph`] of
//! airway/SID/STAR connectivity, and [`fp::FlightPlan`] wraps the result back
//! up into ICAO field 13/15/16/18/19 text.
//!
//! Nothing here reaches outside this crate for its own navigation data: a
//! [`nd::NavigationData`] is either assembled by hand through
//! [`nd::NavigationDataBuilder`] or ingested from ARINC 424 records, and from
//! then on is read-only for the lifetime of a parse.

#[macro_use]
mod macros;

pub mod core;
mod error;
mod fc;
pub mod fp;
pub mod geom;
pub mod graph;
pub mod measurements;
pub mod nd;
mod wmm;

pub use error::{Error, Result};
pub use core::VerticalDistance;
pub use wmm::{declination, MagneticVariation};
