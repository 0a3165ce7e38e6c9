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

//! One dispatch cycle's input snapshot.
//!
//! A [`DispatchProblem`] holds the fleet, the per-vehicle candidate trip
//! lists produced by the external route optimizer, and the full request list
//! (primaries and legs together) as of the cycle start. Iteration order is
//! the insertion order and is part of the contract: the solver flattens
//! candidate trips into contiguous per-vehicle index ranges, so re-building
//! the same snapshot must enumerate identically.
//!
//! The snapshot also carries a request-id lookup table built once at
//! construction; constraint emission resolves leg ids through it instead of
//! rescanning the request list.

use crate::{
    err::ProblemBuildError,
    id::{RequestId, VehicleId},
    req::Request,
    trip::Trip,
    vehicle::Vehicle,
};
use ride_dispatch_core::{SolverVariable, time::TimePoint};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchProblem<T = i64>
where
    T: SolverVariable,
{
    cycle_time: TimePoint<T>,
    vehicles: Vec<Vehicle>,
    candidates: Vec<Vec<Trip>>,
    requests: Vec<Request<T>>,
    request_lookup: HashMap<RequestId, usize>,
}

impl<T: SolverVariable> DispatchProblem<T> {
    #[inline]
    pub fn cycle_time(&self) -> TimePoint<T> {
        self.cycle_time
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Candidate trips of the vehicle at fleet position `index`.
    #[inline]
    pub fn candidates_of(&self, index: usize) -> &[Trip] {
        &self.candidates[index]
    }

    /// Fleet in stable insertion order, each vehicle paired with its
    /// candidate trips.
    pub fn fleet(&self) -> impl Iterator<Item = (&Vehicle, &[Trip])> {
        self.vehicles
            .iter()
            .zip(self.candidates.iter().map(Vec::as_slice))
    }

    #[inline]
    pub fn requests(&self) -> &[Request<T>] {
        &self.requests
    }

    #[inline]
    pub fn request(&self, id: RequestId) -> Option<&Request<T>> {
        self.request_lookup.get(&id).map(|&i| &self.requests[i])
    }

    #[inline]
    pub fn total_candidates(&self) -> usize {
        self.candidates.iter().map(Vec::len).sum()
    }
}

pub struct DispatchProblemBuilder<T = i64>
where
    T: SolverVariable,
{
    cycle_time: TimePoint<T>,
    vehicles: Vec<Vehicle>,
    candidates: Vec<Vec<Trip>>,
    vehicle_ids: HashMap<VehicleId, usize>,
    requests: Vec<Request<T>>,
    request_lookup: HashMap<RequestId, usize>,
}

impl<T: SolverVariable> DispatchProblemBuilder<T> {
    pub fn new(cycle_time: TimePoint<T>) -> Self {
        Self {
            cycle_time,
            vehicles: Vec::new(),
            candidates: Vec::new(),
            vehicle_ids: HashMap::new(),
            requests: Vec::new(),
            request_lookup: HashMap::new(),
        }
    }

    /// Registers a vehicle together with its candidate trips for this cycle.
    /// An empty trip list is valid; the vehicle then stays on its current
    /// plan.
    pub fn add_vehicle(
        &mut self,
        vehicle: Vehicle,
        trips: Vec<Trip>,
    ) -> Result<&mut Self, ProblemBuildError> {
        let id = vehicle.id();
        if self.vehicle_ids.contains_key(&id) {
            return Err(ProblemBuildError::DuplicateVehicleId(id));
        }
        for trip in &trips {
            if trip.vehicle() != id {
                return Err(ProblemBuildError::TripVehicleMismatch {
                    registered_under: id,
                    trip_vehicle: trip.vehicle(),
                });
            }
        }
        self.vehicle_ids.insert(id, self.vehicles.len());
        self.vehicles.push(vehicle);
        self.candidates.push(trips);
        Ok(self)
    }

    pub fn add_request(&mut self, request: Request<T>) -> Result<&mut Self, ProblemBuildError> {
        let id = request.id();
        if self.request_lookup.contains_key(&id) {
            return Err(ProblemBuildError::DuplicateRequestId(id));
        }
        self.request_lookup.insert(id, self.requests.len());
        self.requests.push(request);
        Ok(self)
    }

    /// Finalizes the snapshot, checking that every candidate trip covers only
    /// requests present in this cycle.
    pub fn build(&self) -> Result<DispatchProblem<T>, ProblemBuildError> {
        for (vehicle, trips) in self.vehicles.iter().zip(&self.candidates) {
            for trip in trips {
                for request in trip.requests() {
                    if !self.request_lookup.contains_key(request) {
                        return Err(ProblemBuildError::UnknownRequest {
                            vehicle: vehicle.id(),
                            request: *request,
                        });
                    }
                }
            }
        }

        Ok(DispatchProblem {
            cycle_time: self.cycle_time,
            vehicles: self.vehicles.clone(),
            candidates: self.candidates.clone(),
            requests: self.requests.clone(),
            request_lookup: self.request_lookup.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        id::NodeId,
        req::{GeoPoint, RequestKind},
    };
    use ride_dispatch_core::{cost::Cost, time::TimeDelta};

    fn vehicle(id: u64) -> Vehicle {
        Vehicle::new(VehicleId::new(id), 4, 0, NodeId::new(1)).expect("valid vehicle")
    }

    fn request(id: u64) -> Request {
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
            RequestKind::Primary,
        )
        .expect("valid request")
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
    fn preserves_fleet_insertion_order() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1)).unwrap();
        b.add_vehicle(vehicle(3), vec![trip(3, &[1], 5.0)]).unwrap();
        b.add_vehicle(vehicle(1), vec![]).unwrap();
        b.add_vehicle(vehicle(2), vec![trip(2, &[1], 8.0)]).unwrap();
        let p = b.build().expect("valid problem");

        let order: Vec<u64> = p.fleet().map(|(v, _)| v.id().value()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(p.total_candidates(), 2);
        assert!(p.candidates_of(1).is_empty());
    }

    #[test]
    fn rejects_duplicate_vehicle() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_vehicle(vehicle(1), vec![]).unwrap();
        assert!(matches!(
            b.add_vehicle(vehicle(1), vec![]),
            Err(ProblemBuildError::DuplicateVehicleId(_))
        ));
    }

    #[test]
    fn rejects_duplicate_request() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1)).unwrap();
        assert!(matches!(
            b.add_request(request(1)),
            Err(ProblemBuildError::DuplicateRequestId(_))
        ));
    }

    #[test]
    fn rejects_trip_registered_under_wrong_vehicle() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(1)).unwrap();
        assert!(matches!(
            b.add_vehicle(vehicle(1), vec![trip(2, &[1], 5.0)]),
            Err(ProblemBuildError::TripVehicleMismatch { .. })
        ));
    }

    #[test]
    fn rejects_trip_covering_unknown_request() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_vehicle(vehicle(1), vec![trip(1, &[42], 5.0)]).unwrap();
        assert!(matches!(
            b.build(),
            Err(ProblemBuildError::UnknownRequest { .. })
        ));
    }

    #[test]
    fn request_lookup_resolves_by_id() {
        let mut b = DispatchProblemBuilder::<i64>::new(TimePoint::new(0));
        b.add_request(request(7)).unwrap();
        b.add_request(request(9)).unwrap();
        let p = b.build().expect("valid problem");
        assert_eq!(p.request(RequestId::new(9)).map(|r| r.id().value()), Some(9));
        assert!(p.request(RequestId::new(8)).is_none());
    }
}
