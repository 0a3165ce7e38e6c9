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

//! Per-invocation audit trail.
//!
//! One tab-delimited row per solver invocation, appended to
//! `<results_dir>/cycle_stats.tsv`: clock-encoded cycle time, objective,
//! runtime seconds, optimality gap, selected-trip count, and status. The
//! file is the operator's window into solution quality over a run; a cycle
//! that short-circuits without invoking the solver writes no row.

use num_traits::ToPrimitive;
use ride_dispatch_core::{SolverVariable, time::TimePoint};
use ride_dispatch_model::plan::SolveStats;
use serde::Serialize;
use std::{
    fs::{File, OpenOptions, create_dir_all},
    io,
    path::{Path, PathBuf},
};

/// Renders a second-of-service timestamp as `HH:MM:SS`.
pub fn clock_label(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
}

#[derive(Debug, Serialize)]
struct AuditRecord {
    time: String,
    objective: f64,
    runtime_s: f64,
    gap: f64,
    selections: u64,
    status: String,
}

#[derive(Debug, Clone)]
pub struct CycleAudit {
    path: PathBuf,
}

impl CycleAudit {
    /// Prepares the results directory and the audit file path. No file is
    /// touched until the first record.
    pub fn new(results_dir: &Path) -> io::Result<Self> {
        create_dir_all(results_dir)?;
        Ok(Self {
            path: results_dir.join("cycle_stats.tsv"),
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_append(&self) -> io::Result<File> {
        OpenOptions::new().append(true).create(true).open(&self.path)
    }

    /// Appends one invocation record.
    pub fn record<T: SolverVariable>(
        &self,
        cycle_time: TimePoint<T>,
        stats: &SolveStats,
    ) -> io::Result<()> {
        let record = AuditRecord {
            time: clock_label(cycle_time.value().to_i64().unwrap_or(0)),
            objective: stats.objective().value(),
            runtime_s: stats.runtime().as_secs_f64(),
            gap: stats.gap(),
            selections: stats.selections() as u64,
            status: stats.status().to_string(),
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(self.open_append()?);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}
