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

//! Travel requests.
//!
//! A [`Request`] is either a *primary* request as submitted by a rider, or a
//! derived *leg* of a multi-modal option: the ride-hail feeder to a bus trip
//! ([`LegRole::FirstMile`]) or the ride-hail continuation from it
//! ([`LegRole::LastMile`]). Legs always know their parent primary request and
//! the bus trip instance they attach to; primaries never do. Encoding that
//! distinction as [`RequestKind`] makes the original system's `-1` parent
//! sentinel unrepresentable.

use crate::{
    err::DeadlineOrderError,
    id::{BusTripId, NodeId, RequestId},
};
use ride_dispatch_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use std::fmt::Display;

/// Informational rider position; the engine never computes on coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegRole {
    /// Ride-hail leg delivering the rider to the bus boarding stop.
    FirstMile,
    /// Ride-hail leg picking the rider up at the bus alighting stop.
    LastMile,
}

impl Display for LegRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegRole::FirstMile => write!(f, "FirstMile"),
            LegRole::LastMile => write!(f, "LastMile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegRef {
    parent: RequestId,
    bus_trip: BusTripId,
    role: LegRole,
}

impl LegRef {
    #[inline]
    pub const fn new(parent: RequestId, bus_trip: BusTripId, role: LegRole) -> Self {
        Self {
            parent,
            bus_trip,
            role,
        }
    }

    #[inline]
    pub fn parent(&self) -> RequestId {
        self.parent
    }

    #[inline]
    pub fn bus_trip(&self) -> BusTripId {
        self.bus_trip
    }

    #[inline]
    pub fn role(&self) -> LegRole {
        self.role
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Primary,
    Leg(LegRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request<T = i64>
where
    T: SolverVariable,
{
    id: RequestId,
    origin: NodeId,
    destination: NodeId,
    origin_position: GeoPoint,
    destination_position: GeoPoint,
    entry_time: TimePoint<T>,
    latest_boarding: TimePoint<T>,
    latest_alighting: TimePoint<T>,
    ideal_travel_time: TimeDelta<T>,
    assigned: bool,
    kind: RequestKind,
}

impl<T: SolverVariable> Request<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RequestId,
        origin: NodeId,
        destination: NodeId,
        origin_position: GeoPoint,
        destination_position: GeoPoint,
        entry_time: TimePoint<T>,
        latest_boarding: TimePoint<T>,
        latest_alighting: TimePoint<T>,
        ideal_travel_time: TimeDelta<T>,
        kind: RequestKind,
    ) -> Result<Self, DeadlineOrderError<T>> {
        if latest_boarding < entry_time || latest_alighting < latest_boarding {
            return Err(DeadlineOrderError::new(
                id,
                entry_time,
                latest_boarding,
                latest_alighting,
            ));
        }

        Ok(Self {
            id,
            origin,
            destination,
            origin_position,
            destination_position,
            entry_time,
            latest_boarding,
            latest_alighting,
            ideal_travel_time,
            assigned: false,
            kind,
        })
    }

    #[inline]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    #[inline]
    pub fn origin_position(&self) -> GeoPoint {
        self.origin_position
    }

    #[inline]
    pub fn destination_position(&self) -> GeoPoint {
        self.destination_position
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

    #[inline]
    pub fn ideal_travel_time(&self) -> TimeDelta<T> {
        self.ideal_travel_time
    }

    /// True once the rider has boarded; a continuing request can no longer be
    /// dropped by the assignment.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    #[inline]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        matches!(self.kind, RequestKind::Primary)
    }

    #[inline]
    pub fn leg(&self) -> Option<LegRef> {
        match self.kind {
            RequestKind::Primary => None,
            RequestKind::Leg(leg) => Some(leg),
        }
    }

    /// Marks the request as picked up. Owned by the request registry between
    /// cycles; the assignment engine itself only ever reads the flag.
    #[inline]
    pub fn mark_assigned(&mut self) {
        self.assigned = true;
    }
}

impl<T: SolverVariable + Display> Display for Request<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            RequestKind::Primary => "primary".to_string(),
            RequestKind::Leg(leg) => format!(
                "leg of {} via {} ({})",
                leg.parent(),
                leg.bus_trip(),
                leg.role()
            ),
        };
        write!(
            f,
            "Request(id: {}, {} -> {}, entry: {}, board by: {}, alight by: {}, {})",
            self.id,
            self.origin,
            self.destination,
            self.entry_time,
            self.latest_boarding,
            self.latest_alighting,
            kind
        )
    }
}
