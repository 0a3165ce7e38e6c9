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

//! # Ride Dispatch Core (`ride-dispatch-core`)
//!
//! Foundational, type-safe primitives shared by the ride-dispatch crates:
//!
//! - `TimePoint<T>` / `TimeDelta<T>`: a point on the simulation clock and a
//!   duration between two such points. Distinct newtypes prevent mixing the
//!   two in arithmetic (adding two `TimePoint`s does not compile).
//! - `Cost`: a route cost as handed over by the trip generator and consumed
//!   by the assignment objective. Costs are real-valued, so `Cost` wraps an
//!   `f64` rather than an integer scalar.
//!
//! The time scalar is generic over [`SolverVariable`] so simulations can pick
//! the precision of their clock (seconds in `i64` for general use).

use num_traits::{PrimInt, Signed, Zero};
use std::fmt::{Debug, Display};

pub mod cost;
pub mod time;

pub trait SolverVariable: PrimInt + Signed + Zero + Send + Sync + Debug + Display {}
impl<T> SolverVariable for T where T: PrimInt + Signed + Zero + Send + Sync + Debug + Display {}
