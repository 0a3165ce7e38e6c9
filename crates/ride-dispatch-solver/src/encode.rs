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

//! Constraint encoding.
//!
//! Translates one cycle's [`CandidateIndex`] into a [`MipModel`]:
//!
//! - one binary `e_<i>` per candidate trip, weighted by its route cost;
//! - one binary `x_<k>` per droppable primary request, weighted by the miss
//!   penalty so that serving a request always beats any route-cost saving;
//! - row family `c1-<vehicle>`: each vehicle serves at most one of its
//!   candidates;
//! - row family `c2-<request>`: a continuing request is covered exactly once
//!   and cannot be dropped; a droppable primary is covered exactly once
//!   across its own trips, one representative leg per distinct bus trip of
//!   its multi-modal options, and its drop variable;
//! - row family `c3-<bus-trip>`: when a first-mile and a last-mile leg exist
//!   for the same bus trip, their trip sums are forced equal, so either both
//!   transfer legs run or neither does.
//!
//! The emission order is a pure function of the snapshot's iteration order:
//! encoding the same snapshot twice yields equal models.

use crate::{
    index::CandidateIndex,
    mip::{MipModel, RowSense},
};
use ride_dispatch_core::{SolverVariable, cost::Cost};
use ride_dispatch_model::{
    id::{BusTripId, RequestId},
    req::LegRole,
};

/// A [`MipModel`] plus the mapping from drop variables back to the droppable
/// primaries they stand for.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAssignment {
    model: MipModel,
    miss_vars: Vec<(RequestId, usize)>,
}

impl EncodedAssignment {
    #[inline]
    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// `(primary request, variable index)` pairs, in request-list order.
    #[inline]
    pub fn miss_vars(&self) -> &[(RequestId, usize)] {
        &self.miss_vars
    }
}

pub fn encode_assignment<T: SolverVariable>(
    index: &CandidateIndex<'_, T>,
    miss_penalty: Cost,
) -> EncodedAssignment {
    let problem = index.problem();
    let mut model = MipModel::new();

    for i in 0..index.total_trips() {
        model.add_variable(format!("e_{}", i), index.cost(i).value());
    }

    let mut miss_vars: Vec<(RequestId, usize)> = Vec::new();
    for (k, request) in index.droppable_primaries().enumerate() {
        let var = model.add_variable(format!("x_{}", k), miss_penalty.value());
        miss_vars.push((request.id(), var));
    }

    // Vehicle exclusivity: at most one candidate per vehicle. Vehicles
    // without candidates satisfy this trivially and get no row.
    for (vehicle, range) in index.vehicle_ranges() {
        if range.is_empty() {
            continue;
        }
        let terms: Vec<(usize, f64)> = range.clone().map(|i| (i, 1.0)).collect();
        model.add_constraint(
            format!("c1-{}", vehicle.value()),
            terms,
            RowSense::AtMost,
            1.0,
        );
    }

    // Request coverage, one row per primary request.
    let mut next_miss = 0usize;
    for request in problem.requests() {
        if !request.is_primary() {
            continue;
        }
        let id = request.id();
        let mut terms: Vec<(usize, f64)> = index
            .trips_containing(id)
            .iter()
            .map(|&i| (i, 1.0))
            .collect();

        if request.is_assigned() {
            // A continuing rider is already on board somewhere; exactly one
            // selected trip must keep serving them.
            model.add_constraint(format!("c2-{}", id.value()), terms, RowSense::Equal, 1.0);
            continue;
        }

        // Fold the multi-modal options in: per distinct bus trip, one
        // representative leg (lowest id) contributes its covering trips.
        let mut seen_bus_trips: Vec<BusTripId> = Vec::new();
        for &leg_id in index.legs_of(id) {
            let leg = problem
                .request(leg_id)
                .and_then(|r| r.leg())
                .expect("indexed leg resolves");
            if !seen_bus_trips.contains(&leg.bus_trip()) {
                terms.extend(index.trips_containing(leg_id).iter().map(|&i| (i, 1.0)));
            }
            seen_bus_trips.push(leg.bus_trip());
        }

        let (_, miss_var) = miss_vars[next_miss];
        next_miss += 1;
        terms.push((miss_var, 1.0));
        model.add_constraint(format!("c2-{}", id.value()), terms, RowSense::Equal, 1.0);
    }

    // Leg synchronization: both legs of a multi-modal option run together.
    for request in problem.requests() {
        if !request.is_primary() || request.is_assigned() {
            continue;
        }
        let id = request.id();
        for &first_id in index.legs_of(id) {
            let first = problem
                .request(first_id)
                .and_then(|r| r.leg())
                .expect("indexed leg resolves");
            if first.role() != LegRole::FirstMile {
                continue;
            }
            let last_id = index.legs_of(id).iter().copied().find(|&other_id| {
                problem
                    .request(other_id)
                    .and_then(|r| r.leg())
                    .map(|l| l.bus_trip() == first.bus_trip() && l.role() == LegRole::LastMile)
                    .unwrap_or(false)
            });
            // A lone leg gets no pairing row.
            let Some(last_id) = last_id else { continue };

            let mut terms: Vec<(usize, f64)> = index
                .trips_containing(first_id)
                .iter()
                .map(|&i| (i, 1.0))
                .collect();
            terms.extend(index.trips_containing(last_id).iter().map(|&i| (i, -1.0)));
            model.add_constraint(
                format!("c3-{}", first.bus_trip().value()),
                terms,
                RowSense::Equal,
                0.0,
            );
        }
    }

    EncodedAssignment { model, miss_vars }
}
