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

//! Candidate vehicle trips.
//!
//! A [`Trip`] binds one vehicle to an ordered set of requests it could
//! feasibly serve this cycle, at a route cost precomputed by the external
//! route optimizer. Trips are immutable inputs: infeasible combinations are
//! simply never produced, and multiple alternative trips per vehicle are
//! mutually exclusive in the assignment.

use crate::{
    err::TripError,
    id::{RequestId, VehicleId},
};
use ride_dispatch_core::cost::Cost;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    vehicle: VehicleId,
    requests: Vec<RequestId>,
    cost: Cost,
}

impl Trip {
    pub fn new(vehicle: VehicleId, requests: Vec<RequestId>, cost: Cost) -> Result<Self, TripError> {
        if requests.is_empty() {
            return Err(TripError::EmptyRequestSet(vehicle));
        }
        for (i, id) in requests.iter().enumerate() {
            if requests[..i].contains(id) {
                return Err(TripError::DuplicateRequest(vehicle, *id));
            }
        }
        if !cost.is_finite() {
            return Err(TripError::NonFiniteCost(vehicle));
        }
        Ok(Self {
            vehicle,
            requests,
            cost,
        })
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    /// Covered requests in the order the route optimizer would serve them.
    #[inline]
    pub fn requests(&self) -> &[RequestId] {
        &self.requests
    }

    #[inline]
    pub fn covers(&self, request: RequestId) -> bool {
        self.requests.contains(&request)
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }
}

impl Display for Trip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let requests = self
            .requests
            .iter()
            .map(|r| format!("{}", r))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Trip(vehicle: {}, requests: [{}], cost: {})",
            self.vehicle, requests, self.cost
        )
    }
}
