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

//! Process-wide dispatch settings.
//!
//! All values are fixed before the first cycle and validated exactly once at
//! engine construction; nothing here mutates mid-run. The service-quality
//! fields (waiting, detour, dwell) are not read by the assignment core
//! itself — they parameterize the request-loading side that derives the
//! deadlines the core consumes.

use ride_dispatch_core::cost::Cost;
use std::{fmt::Display, path::PathBuf, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Directory receiving the audit trail and other run artifacts.
    pub results_dir: PathBuf,
    /// Wall-clock budget handed to the integer-program solver per cycle.
    pub solver_time_budget: Duration,
    /// Objective weight of leaving a droppable request unserved. Must
    /// dominate any realistic sum of route costs so that service always wins
    /// over savings.
    pub miss_penalty: Cost,
    /// Longest a rider may wait for pickup, in seconds.
    pub max_waiting_s: i64,
    /// Alighting deadline stretch over the ideal travel time.
    pub max_detour_factor: f64,
    /// Boarding dwell per pickup, in seconds.
    pub dwell_pickup_s: i64,
    /// Alighting dwell per dropoff, in seconds.
    pub dwell_alight_s: i64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            solver_time_budget: Duration::from_secs(30),
            miss_penalty: Cost::new(10_000_000.0),
            max_waiting_s: 420,
            max_detour_factor: 1.5,
            dwell_pickup_s: 30,
            dwell_alight_s: 20,
        }
    }
}

impl DispatchConfig {
    /// One-shot validation, run at engine construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.results_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyResultsDir);
        }
        if self.solver_time_budget.is_zero() {
            return Err(ConfigError::ZeroTimeBudget);
        }
        if !self.miss_penalty.is_finite() || self.miss_penalty.value() <= 0.0 {
            return Err(ConfigError::InvalidMissPenalty(self.miss_penalty));
        }
        if self.max_waiting_s < 0 {
            return Err(ConfigError::NegativeMaxWaiting(self.max_waiting_s));
        }
        if self.max_detour_factor < 1.0 {
            return Err(ConfigError::DetourFactorBelowOne(self.max_detour_factor));
        }
        if self.dwell_pickup_s < 0 || self.dwell_alight_s < 0 {
            return Err(ConfigError::NegativeDwell);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyResultsDir,
    ZeroTimeBudget,
    /// The miss penalty must be finite and positive to dominate the
    /// objective.
    InvalidMissPenalty(Cost),
    NegativeMaxWaiting(i64),
    DetourFactorBelowOne(f64),
    NegativeDwell,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyResultsDir => write!(f, "Results directory must not be empty"),
            ConfigError::ZeroTimeBudget => write!(f, "Solver time budget must be positive"),
            ConfigError::InvalidMissPenalty(penalty) => {
                write!(f, "Miss penalty must be finite and positive, got {}", penalty)
            }
            ConfigError::NegativeMaxWaiting(seconds) => {
                write!(f, "Max waiting must be non-negative, got {}", seconds)
            }
            ConfigError::DetourFactorBelowOne(factor) => {
                write!(f, "Max detour factor must be >= 1, got {}", factor)
            }
            ConfigError::NegativeDwell => write!(f, "Dwell times must be non-negative"),
        }
    }
}

impl std::error::Error for ConfigError {}
