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

use crate::id::{RequestId, VehicleId};
use ride_dispatch_core::{SolverVariable, time::TimePoint};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeadlineOrderError<T: SolverVariable> {
    id: RequestId,
    entry_time: TimePoint<T>,
    latest_boarding: TimePoint<T>,
    latest_alighting: TimePoint<T>,
}

impl<T: SolverVariable> DeadlineOrderError<T> {
    #[inline]
    pub fn new(
        id: RequestId,
        entry_time: TimePoint<T>,
        latest_boarding: TimePoint<T>,
        latest_alighting: TimePoint<T>,
    ) -> Self {
        Self {
            id,
            entry_time,
            latest_boarding,
            latest_alighting,
        }
    }

    #[inline]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[inline]
    pub fn entry_time(&self) -> TimePoint<T> {
        self.entry_time
    }

    #[inline]
    pub fn latest_boarding(&self) -> TimePoint<T> {
        self.latest_boarding
    }

    #[inline]
    pub fn latest_alighting(&self) -> TimePoint<T> {
        self.latest_alighting
    }
}

impl<T: SolverVariable + Display> Display for DeadlineOrderError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Request {} has out-of-order deadlines: entry {}, latest boarding {}, latest alighting {}",
            self.id, self.entry_time, self.latest_boarding, self.latest_alighting
        )
    }
}

impl<T: SolverVariable + Display> std::error::Error for DeadlineOrderError<T> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccupancyExceedsCapacityError {
    id: VehicleId,
    capacity: usize,
    occupancy: usize,
}

impl OccupancyExceedsCapacityError {
    #[inline]
    pub fn new(id: VehicleId, capacity: usize, occupancy: usize) -> Self {
        Self {
            id,
            capacity,
            occupancy,
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }
}

impl Display for OccupancyExceedsCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} reports occupancy {} above its capacity {}",
            self.id, self.occupancy, self.capacity
        )
    }
}

impl std::error::Error for OccupancyExceedsCapacityError {}

#[derive(Debug, Clone, PartialEq)]
pub enum TripError {
    /// A candidate trip must cover at least one request.
    EmptyRequestSet(VehicleId),
    /// The same request appears twice in one candidate trip.
    DuplicateRequest(VehicleId, RequestId),
    /// Route costs must be finite to enter the objective.
    NonFiniteCost(VehicleId),
}

impl Display for TripError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripError::EmptyRequestSet(v) => {
                write!(f, "Candidate trip for {} covers no requests", v)
            }
            TripError::DuplicateRequest(v, r) => {
                write!(f, "Candidate trip for {} lists {} twice", v, r)
            }
            TripError::NonFiniteCost(v) => {
                write!(f, "Candidate trip for {} has a non-finite cost", v)
            }
        }
    }
}

impl std::error::Error for TripError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemBuildError {
    /// A vehicle with this id has already been added to the cycle snapshot.
    DuplicateVehicleId(VehicleId),
    /// A request with this id has already been added to the cycle snapshot.
    DuplicateRequestId(RequestId),
    /// A candidate trip was registered under a vehicle it does not target.
    TripVehicleMismatch {
        registered_under: VehicleId,
        trip_vehicle: VehicleId,
    },
    /// A candidate trip covers a request that is not part of this cycle.
    UnknownRequest {
        vehicle: VehicleId,
        request: RequestId,
    },
}

impl Display for ProblemBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemBuildError::DuplicateVehicleId(id) => {
                write!(f, "Duplicate vehicle id: {}", id)
            }
            ProblemBuildError::DuplicateRequestId(id) => {
                write!(f, "Duplicate request id: {}", id)
            }
            ProblemBuildError::TripVehicleMismatch {
                registered_under,
                trip_vehicle,
            } => write!(
                f,
                "Candidate trip targeting {} was registered under {}",
                trip_vehicle, registered_under
            ),
            ProblemBuildError::UnknownRequest { vehicle, request } => write!(
                f,
                "Candidate trip for {} covers {}, which is not in this cycle's request list",
                vehicle, request
            ),
        }
    }
}

impl std::error::Error for ProblemBuildError {}
