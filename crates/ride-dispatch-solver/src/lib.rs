// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Ride Dispatch Solver (`ride-dispatch-solver`)
//!
//! The per-cycle assignment engine: given the fleet's candidate trips and
//! the current requests, select the globally cheapest set of trips such that
//! every vehicle serves at most one trip, every request is served exactly
//! once or explicitly dropped at a penalty, and multi-modal transfer legs
//! run together or not at all. The selection is solved as an integer program
//! under a wall-clock budget.
//!
//! Pipeline per cycle: [`index::CandidateIndex`] →
//! [`encode::encode_assignment`] → a [`mip::MipBackend`] (HiGHS by default,
//! [`highs::HighsBackend`]) → decode into an
//! [`ride_dispatch_model::plan::AssignmentPlan`], with one audit row per
//! invocation ([`audit::CycleAudit`]). [`engine::AssignmentEngine`] drives
//! the whole pipeline.

pub mod audit;
pub mod config;
pub mod encode;
pub mod engine;
pub mod highs;
pub mod index;
pub mod mip;

pub use config::{ConfigError, DispatchConfig};
pub use engine::{AssignError, AssignmentEngine, EngineBuildError};
