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

//! Per-cycle candidate lookup structures.
//!
//! [`CandidateIndex`] flattens the per-vehicle candidate trip lists into one
//! stable enumeration `0..N`, grouped contiguously per vehicle in fleet
//! order. The constraint encoder depends on that contiguity to emit each
//! vehicle's exclusivity row straight from an index range, and the decoder
//! maps selected indices back through the same ranges.
//!
//! The index also resolves, once per cycle, everything the encoder would
//! otherwise rescan the request list for: which trips contain a request, and
//! which leg requests belong to a primary. Legs whose parent is absent (or
//! not a primary) are collected as orphans — tolerated, but surfaced for
//! monitoring.
//!
//! The index borrows from the problem snapshot and is discarded with the
//! cycle; it is never persisted.

use ride_dispatch_core::{SolverVariable, cost::Cost};
use ride_dispatch_model::{
    id::{RequestId, VehicleId},
    problem::DispatchProblem,
    req::Request,
    trip::Trip,
};
use std::{collections::HashMap, ops::Range};

#[derive(Debug, Clone)]
pub struct CandidateIndex<'p, T = i64>
where
    T: SolverVariable,
{
    problem: &'p DispatchProblem<T>,
    trips: Vec<&'p Trip>,
    vehicle_ranges: Vec<(VehicleId, Range<usize>)>,
    by_request: HashMap<RequestId, Vec<usize>>,
    legs_by_parent: HashMap<RequestId, Vec<RequestId>>,
    orphan_legs: Vec<RequestId>,
}

impl<'p, T: SolverVariable> CandidateIndex<'p, T> {
    pub fn build(problem: &'p DispatchProblem<T>) -> Self {
        let mut trips: Vec<&'p Trip> = Vec::with_capacity(problem.total_candidates());
        let mut vehicle_ranges: Vec<(VehicleId, Range<usize>)> = Vec::new();
        let mut by_request: HashMap<RequestId, Vec<usize>> = HashMap::new();

        for (vehicle, candidates) in problem.fleet() {
            let start = trips.len();
            for trip in candidates {
                let index = trips.len();
                trips.push(trip);
                for request in trip.requests() {
                    by_request.entry(*request).or_default().push(index);
                }
            }
            vehicle_ranges.push((vehicle.id(), start..trips.len()));
        }

        let mut legs_by_parent: HashMap<RequestId, Vec<RequestId>> = HashMap::new();
        let mut orphan_legs: Vec<RequestId> = Vec::new();
        for request in problem.requests() {
            let Some(leg) = request.leg() else { continue };
            let parent_is_primary = problem
                .request(leg.parent())
                .map(Request::is_primary)
                .unwrap_or(false);
            if parent_is_primary {
                legs_by_parent.entry(leg.parent()).or_default().push(request.id());
            } else {
                orphan_legs.push(request.id());
            }
        }
        for legs in legs_by_parent.values_mut() {
            legs.sort();
        }

        Self {
            problem,
            trips,
            vehicle_ranges,
            by_request,
            legs_by_parent,
            orphan_legs,
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p DispatchProblem<T> {
        self.problem
    }

    #[inline]
    pub fn total_trips(&self) -> usize {
        self.trips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    #[inline]
    pub fn trip(&self, index: usize) -> &'p Trip {
        self.trips[index]
    }

    #[inline]
    pub fn cost(&self, index: usize) -> Cost {
        self.trips[index].cost()
    }

    /// Contiguous flattened-index range per vehicle, in fleet order. Vehicles
    /// without candidates carry an empty range.
    #[inline]
    pub fn vehicle_ranges(&self) -> &[(VehicleId, Range<usize>)] {
        &self.vehicle_ranges
    }

    /// Flattened indices of all trips covering the request, ascending.
    #[inline]
    pub fn trips_containing(&self, request: RequestId) -> &[usize] {
        self.by_request.get(&request).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Leg request ids of a primary, ascending; empty for single-mode
    /// requests.
    #[inline]
    pub fn legs_of(&self, parent: RequestId) -> &[RequestId] {
        self.legs_by_parent
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Legs whose parent did not resolve to a primary request this cycle.
    #[inline]
    pub fn orphan_legs(&self) -> &[RequestId] {
        &self.orphan_legs
    }

    /// Primary requests that may still be dropped at the miss penalty.
    pub fn droppable_primaries(&self) -> impl Iterator<Item = &'p Request<T>> {
        self.problem
            .requests()
            .iter()
            .filter(|r| r.is_primary() && !r.is_assigned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ride_dispatch_core::time::{TimeDelta, TimePoint};
    use ride_dispatch_model::{
        id::{BusTripId, NodeId},
        problem::DispatchProblemBuilder,
        req::{GeoPoint, LegRef, LegRole, RequestKind},
        vehicle::Vehicle,
    };

    fn vehicle(id: u64) -> Vehicle {
        Vehicle::new(VehicleId::new(id), 4, 0, NodeId::new(1)).expect("valid vehicle")
    }

    fn request(id: u64, kind: RequestKind) -> Request {
        Request::new(
            RequestId::new(id),
            NodeId::new(1),
            NodeId::new(2),
            GeoPoint::default(),
            GeoPoint::default(),
            TimePoint::new(0),
            TimePoint::new(600),
            TimePoint::new(1500),
            TimeDelta::new(300),
            kind,
        )
        .expect("valid request")
    }

    fn leg(id: u64, parent: u64, bus_trip: u64, role: LegRole) -> Request {
        request(
            id,
            RequestKind::Leg(LegRef::new(
                RequestId::new(parent),
                BusTripId::new(bus_trip),
                role,
            )),
        )
    }

    fn trip(vehicle: u64, requests: &[u64], cost: f64) -> Trip {
        Trip::new(
            VehicleId::new(vehicle),
            requests.iter().map(|&r| RequestId::new(r)).collect(),
            Cost::new(cost),
        )
        .expect("valid trip")
    }

    #[test]
    fn enumeration_is_contiguous_per_vehicle_in_fleet_order() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1, RequestKind::Primary)).unwrap();
        b.add_request(request(2, RequestKind::Primary)).unwrap();
        b.add_vehicle(vehicle(10), vec![trip(10, &[1], 5.0), trip(10, &[2], 6.0)])
            .unwrap();
        b.add_vehicle(vehicle(11), vec![]).unwrap();
        b.add_vehicle(vehicle(12), vec![trip(12, &[1, 2], 9.0)]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        assert_eq!(index.total_trips(), 3);
        assert_eq!(
            index.vehicle_ranges(),
            &[
                (VehicleId::new(10), 0..2),
                (VehicleId::new(11), 2..2),
                (VehicleId::new(12), 2..3),
            ]
        );
        assert_eq!(index.cost(0), Cost::new(5.0));
        assert_eq!(index.cost(2), Cost::new(9.0));
    }

    #[test]
    fn trips_containing_lists_ascending_flat_indices() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1, RequestKind::Primary)).unwrap();
        b.add_request(request(2, RequestKind::Primary)).unwrap();
        b.add_vehicle(vehicle(10), vec![trip(10, &[1], 5.0), trip(10, &[1, 2], 6.0)])
            .unwrap();
        b.add_vehicle(vehicle(11), vec![trip(11, &[1], 7.0)]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        assert_eq!(index.trips_containing(RequestId::new(1)), &[0, 1, 2]);
        assert_eq!(index.trips_containing(RequestId::new(2)), &[1]);
        assert!(index.trips_containing(RequestId::new(3)).is_empty());
    }

    #[test]
    fn legs_resolve_to_their_primary_sorted_by_id() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1, RequestKind::Primary)).unwrap();
        b.add_request(leg(21, 1, 9, LegRole::LastMile)).unwrap();
        b.add_request(leg(20, 1, 9, LegRole::FirstMile)).unwrap();
        b.add_vehicle(vehicle(10), vec![]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        assert_eq!(
            index.legs_of(RequestId::new(1)),
            &[RequestId::new(20), RequestId::new(21)]
        );
        assert!(index.orphan_legs().is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn leg_without_a_present_parent_is_an_orphan() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(leg(20, 99, 9, LegRole::FirstMile)).unwrap();
        b.add_vehicle(vehicle(10), vec![]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        assert_eq!(index.orphan_legs(), &[RequestId::new(20)]);
        assert!(index.legs_of(RequestId::new(99)).is_empty());
    }

    #[test]
    fn leg_whose_parent_is_itself_a_leg_is_an_orphan() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(leg(20, 21, 9, LegRole::FirstMile)).unwrap();
        b.add_request(leg(21, 99, 9, LegRole::LastMile)).unwrap();
        b.add_vehicle(vehicle(10), vec![]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        assert_eq!(
            index.orphan_legs(),
            &[RequestId::new(20), RequestId::new(21)]
        );
    }

    #[test]
    fn droppable_primaries_exclude_continuing_and_legs() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        let mut continuing = request(1, RequestKind::Primary);
        continuing.mark_assigned();
        b.add_request(continuing).unwrap();
        b.add_request(request(2, RequestKind::Primary)).unwrap();
        b.add_request(leg(20, 2, 9, LegRole::FirstMile)).unwrap();
        b.add_vehicle(vehicle(10), vec![]).unwrap();
        let p = b.build().expect("valid problem");

        let index = CandidateIndex::build(&p);
        let droppable: Vec<RequestId> = index.droppable_primaries().map(Request::id).collect();
        assert_eq!(droppable, vec![RequestId::new(2)]);
    }
}
