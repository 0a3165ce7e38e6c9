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

//! The decoded outcome of one assignment cycle.
//!
//! Vehicles absent from the plan keep their current activity; that is the
//! normal idle case, not an error. Droppable primaries that no selected trip
//! covers are listed in `unserved`.

use crate::{
    id::{RequestId, VehicleId},
    trip::Trip,
};
use ride_dispatch_core::cost::Cost;
use std::{collections::HashMap, fmt::Display, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The solver proved optimality within the time budget.
    Optimal,
    /// The time budget elapsed first; the incumbent is feasible but unproven.
    TimeLimit,
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::TimeLimit => write!(f, "time_limit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    objective: Cost,
    runtime: Duration,
    gap: f64,
    status: SolveStatus,
    selections: usize,
}

impl SolveStats {
    #[inline]
    pub fn new(
        objective: Cost,
        runtime: Duration,
        gap: f64,
        status: SolveStatus,
        selections: usize,
    ) -> Self {
        Self {
            objective,
            runtime,
            gap,
            status,
            selections,
        }
    }

    #[inline]
    pub fn objective(&self) -> Cost {
        self.objective
    }

    #[inline]
    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Relative optimality gap; 0.0 once optimality is proven.
    #[inline]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Number of candidate trips selected into the plan.
    #[inline]
    pub fn selections(&self) -> usize {
        self.selections
    }
}

impl Display for SolveStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveStats(objective: {}, runtime: {:?}, gap: {}, status: {}, selections: {})",
            self.objective, self.runtime, self.gap, self.status, self.selections
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPlan {
    assignments: HashMap<VehicleId, Trip>,
    unserved: Vec<RequestId>,
    solve: Option<SolveStats>,
}

impl AssignmentPlan {
    #[inline]
    pub fn new(
        assignments: HashMap<VehicleId, Trip>,
        unserved: Vec<RequestId>,
        solve: SolveStats,
    ) -> Self {
        Self {
            assignments,
            unserved,
            solve: Some(solve),
        }
    }

    /// The no-candidates plan: nothing was solved, every droppable primary of
    /// the cycle stays unserved.
    #[inline]
    pub fn empty(unserved: Vec<RequestId>) -> Self {
        Self {
            assignments: HashMap::new(),
            unserved,
            solve: None,
        }
    }

    #[inline]
    pub fn assignments(&self) -> &HashMap<VehicleId, Trip> {
        &self.assignments
    }

    #[inline]
    pub fn trip_for(&self, vehicle: VehicleId) -> Option<&Trip> {
        self.assignments.get(&vehicle)
    }

    /// Droppable primary requests left unserved this cycle.
    #[inline]
    pub fn unserved(&self) -> &[RequestId] {
        &self.unserved
    }

    /// `None` when the cycle short-circuited because there were no candidate
    /// trips at all.
    #[inline]
    pub fn solve_stats(&self) -> Option<&SolveStats> {
        self.solve.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// True if any selected trip covers the request.
    pub fn serves(&self, request: RequestId) -> bool {
        self.assignments.values().any(|t| t.covers(request))
    }
}

impl Display for AssignmentPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AssignmentPlan:")?;
        for trip in self.assignments.values() {
            writeln!(f, "  {}", trip)?;
        }
        let unserved = self
            .unserved
            .iter()
            .map(|r| format!("{}", r))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "  unserved: [{}]", unserved)?;
        match &self.solve {
            Some(stats) => write!(f, "  {}", stats),
            None => write!(f, "  (no candidates this cycle)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(vehicle: u64, requests: &[u64], cost: f64) -> Trip {
        Trip::new(
            VehicleId::new(vehicle),
            requests.iter().map(|&r| RequestId::new(r)).collect(),
            Cost::new(cost),
        )
        .expect("valid trip")
    }

    #[test]
    fn empty_plan_has_no_stats() {
        let plan = AssignmentPlan::empty(vec![RequestId::new(1)]);
        assert!(plan.is_empty());
        assert!(plan.solve_stats().is_none());
        assert_eq!(plan.unserved(), &[RequestId::new(1)]);
    }

    #[test]
    fn serves_reports_coverage_across_assignments() {
        let mut assignments = HashMap::new();
        assignments.insert(VehicleId::new(1), trip(1, &[10, 11], 5.0));
        let stats = SolveStats::new(
            Cost::new(5.0),
            Duration::from_millis(12),
            0.0,
            SolveStatus::Optimal,
            1,
        );
        let plan = AssignmentPlan::new(assignments, vec![], stats);
        assert!(plan.serves(RequestId::new(11)));
        assert!(!plan.serves(RequestId::new(12)));
        assert!(plan.trip_for(VehicleId::new(1)).is_some());
        assert!(plan.trip_for(VehicleId::new(2)).is_none());
    }
}
