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

use crate::{
    err::OccupancyExceedsCapacityError,
    id::{NodeId, VehicleId},
};
use std::fmt::Display;

/// Fleet-registry snapshot of one vehicle at the start of a dispatch cycle.
/// The assignment engine reads identity and uses it as a map key; it never
/// mutates vehicle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vehicle {
    id: VehicleId,
    capacity: usize,
    occupancy: usize,
    location: NodeId,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        capacity: usize,
        occupancy: usize,
        location: NodeId,
    ) -> Result<Self, OccupancyExceedsCapacityError> {
        if occupancy > capacity {
            return Err(OccupancyExceedsCapacityError::new(id, capacity, occupancy));
        }
        Ok(Self {
            id,
            capacity,
            occupancy,
            location,
        })
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

    #[inline]
    pub fn free_seats(&self) -> usize {
        self.capacity - self.occupancy
    }

    #[inline]
    pub fn location(&self) -> NodeId {
        self.location
    }
}

impl Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle(id: {}, capacity: {}, occupancy: {}, at: {})",
            self.id, self.capacity, self.occupancy, self.location
        )
    }
}
