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

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioConfigBuildError {
    /// The named share must lie in `[0, 1]`.
    FractionOutOfRange(&'static str, f64),
    ZeroVehicles,
    ZeroNodes,
    ZeroVehicleCapacity,
    NonPositiveMeanTravelTime(f64),
    /// Detour factors below 1 would put the alighting deadline before the
    /// ideal arrival.
    DetourFactorBelowOne(f64),
    NegativeMaxWaiting(i64),
}

impl Display for ScenarioConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ScenarioConfigBuildError::*;
        match self {
            FractionOutOfRange(name, value) => {
                write!(f, "{} must be within [0, 1], got {}", name, value)
            }
            ZeroVehicles => write!(f, "Scenario needs at least one vehicle"),
            ZeroNodes => write!(f, "Scenario needs a non-empty network"),
            ZeroVehicleCapacity => write!(f, "Vehicles need at least one seat"),
            NonPositiveMeanTravelTime(value) => {
                write!(f, "Mean travel time must be positive, got {}", value)
            }
            DetourFactorBelowOne(value) => {
                write!(f, "Max detour factor must be >= 1, got {}", value)
            }
            NegativeMaxWaiting(value) => {
                write!(f, "Max waiting must be non-negative, got {}", value)
            }
        }
    }
}

impl std::error::Error for ScenarioConfigBuildError {}
