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

//! # Ride Dispatch Model (`ride-dispatch-model`)
//!
//! Data model for fleet dispatch with multi-modal transfers. It builds on the
//! typed primitives of `ride-dispatch-core` to represent:
//!
//! - **`Vehicle`**: a fleet snapshot entry (capacity, occupancy, position).
//! - **`Request<T>`**: a travel request with boarding/alighting deadlines —
//!   either a primary rider request or one leg of a multi-modal option that
//!   hands over to a fixed bus trip ([`req::RequestKind`]).
//! - **`Trip`**: an externally generated candidate binding one vehicle to a
//!   set of requests at a route cost; the unit of choice in the assignment.
//! - **`DispatchProblem<T>`**: the per-cycle snapshot handed to the
//!   assignment engine, built through a validating builder.
//! - **`AssignmentPlan`**: the decoded per-cycle outcome, including solver
//!   statistics and the requests left unserved.
//!
//! The `generator` module produces seeded synthetic scenarios for demos,
//! tests, and benchmarks.

pub mod err;
pub mod generator;
pub mod id;
pub mod plan;
pub mod problem;
pub mod req;
pub mod trip;
pub mod vehicle;

pub mod prelude {
    pub use crate::err::{ProblemBuildError, TripError};
    pub use crate::id::{BusTripId, NodeId, RequestId, VehicleId};
    pub use crate::plan::{AssignmentPlan, SolveStats, SolveStatus};
    pub use crate::problem::{DispatchProblem, DispatchProblemBuilder};
    pub use crate::req::{GeoPoint, LegRef, LegRole, Request, RequestKind};
    pub use crate::trip::Trip;
    pub use crate::vehicle::Vehicle;
}
