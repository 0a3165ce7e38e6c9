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

//! Backend-neutral integer-program representation.
//!
//! The constraint encoder emits a [`MipModel`] — binary variables with
//! objective coefficients plus named linear rows — and a [`MipBackend`]
//! turns it into a solution under a wall-clock budget. Which solver actually
//! runs behind the trait is irrelevant to the engine's correctness; the
//! default binding lives in [`crate::highs`].

use std::{fmt::Display, time::Duration};

/// One binary decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct MipVariable {
    name: String,
    objective: f64,
}

impl MipVariable {
    #[inline]
    pub fn new(name: String, objective: f64) -> Self {
        Self { name, objective }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowSense {
    Equal,
    AtMost,
}

/// A named linear row: `sum(coefficient * variable) <sense> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct MipConstraint {
    name: String,
    terms: Vec<(usize, f64)>,
    sense: RowSense,
    rhs: f64,
}

impl MipConstraint {
    #[inline]
    pub fn new(name: String, terms: Vec<(usize, f64)>, sense: RowSense, rhs: f64) -> Self {
        Self {
            name,
            terms,
            sense,
            rhs,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    #[inline]
    pub fn sense(&self) -> RowSense {
        self.sense
    }

    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}

/// A minimization program over binary variables. Structural equality of two
/// models means the encoder produced the very same program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MipModel {
    variables: Vec<MipVariable>,
    constraints: Vec<MipConstraint>,
}

impl MipModel {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary variable and returns its index.
    pub fn add_variable(&mut self, name: String, objective: f64) -> usize {
        self.variables.push(MipVariable::new(name, objective));
        self.variables.len() - 1
    }

    pub fn add_constraint(
        &mut self,
        name: String,
        terms: Vec<(usize, f64)>,
        sense: RowSense,
        rhs: f64,
    ) {
        self.constraints
            .push(MipConstraint::new(name, terms, sense, rhs));
    }

    #[inline]
    pub fn variables(&self) -> &[MipVariable] {
        &self.variables
    }

    #[inline]
    pub fn constraints(&self) -> &[MipConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Objective value of a concrete assignment vector.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(v, x)| v.objective() * x)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipStatus {
    /// Proven optimal within the budget.
    Optimal,
    /// Best feasible incumbent when the budget elapsed; not proven optimal.
    TimeLimit,
}

impl Display for MipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MipStatus::Optimal => write!(f, "optimal"),
            MipStatus::TimeLimit => write!(f, "time_limit"),
        }
    }
}

/// A feasible solution as reported by a backend. Values are raw solver
/// outputs; callers threshold at 0.5 when reading them as booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    values: Vec<f64>,
    objective: f64,
    runtime: Duration,
    gap: f64,
    status: MipStatus,
}

impl MipSolution {
    #[inline]
    pub fn new(
        values: Vec<f64>,
        objective: f64,
        runtime: Duration,
        gap: f64,
        status: MipStatus,
    ) -> Self {
        Self {
            values,
            objective,
            runtime,
            gap,
            status,
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    #[inline]
    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Relative optimality gap: 0.0 once proven, 1.0 when the budget cut the
    /// search before a proof.
    #[inline]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    #[inline]
    pub fn status(&self) -> MipStatus {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MipSolveError {
    /// The program admits no feasible assignment. With drop penalties in
    /// place this signals inconsistent input, not an unlucky instance.
    Infeasible,
    /// The program is unbounded; only possible on a malformed objective.
    Unbounded,
    /// The backend failed for reasons of its own.
    Backend(String),
}

impl Display for MipSolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MipSolveError::Infeasible => write!(f, "Integer program is infeasible"),
            MipSolveError::Unbounded => write!(f, "Integer program is unbounded"),
            MipSolveError::Backend(message) => write!(f, "Solver backend error: {}", message),
        }
    }
}

impl std::error::Error for MipSolveError {}

/// A mixed-integer-program solver binding.
///
/// Implementations block until a solution is available or the time budget
/// elapses; budget-limited runs return the incumbent with
/// [`MipStatus::TimeLimit`] rather than failing.
pub trait MipBackend {
    fn solve(&mut self, model: &MipModel, budget: Duration) -> Result<MipSolution, MipSolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_indices_are_dense_and_ordered() {
        let mut model = MipModel::new();
        assert_eq!(model.add_variable("e_0".into(), 5.0), 0);
        assert_eq!(model.add_variable("e_1".into(), 8.0), 1);
        assert_eq!(model.add_variable("x_0".into(), 1e7), 2);
        assert_eq!(model.variables().len(), 3);
    }

    #[test]
    fn objective_value_is_the_weighted_sum() {
        let mut model = MipModel::new();
        model.add_variable("e_0".into(), 5.0);
        model.add_variable("e_1".into(), 8.0);
        assert_eq!(model.objective_value(&[1.0, 0.0]), 5.0);
        assert_eq!(model.objective_value(&[1.0, 1.0]), 13.0);
    }

    #[test]
    fn identical_builds_compare_equal() {
        let build = || {
            let mut m = MipModel::new();
            let e0 = m.add_variable("e_0".into(), 2.0);
            m.add_constraint("c1-1".into(), vec![(e0, 1.0)], RowSense::AtMost, 1.0);
            m
        };
        assert_eq!(build(), build());
    }
}
