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

//! HiGHS binding via `good_lp`.
//!
//! The branch-and-bound search may parallelize internally; this driver only
//! owns the time limit and the blocking wait. A budget-limited run keeps the
//! incumbent and reports [`MipStatus::TimeLimit`]; the binding does not
//! expose the achieved optimality gap, so unproven solutions carry a unit
//! gap in lieu of a tighter bound.

use crate::mip::{MipBackend, MipModel, MipSolution, MipSolveError, MipStatus, RowSense};
use good_lp::{
    Expression, ResolutionError, Solution, SolverModel, Variable, WithTimeLimit, default_solver,
    variable, variables,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

impl HighsBackend {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl MipBackend for HighsBackend {
    fn solve(&mut self, model: &MipModel, budget: Duration) -> Result<MipSolution, MipSolveError> {
        let start = Instant::now();

        let mut vars = variables!();
        let xs: Vec<Variable> = model
            .variables()
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name())))
            .collect();

        let objective = model
            .variables()
            .iter()
            .zip(&xs)
            .fold(Expression::from(0.0), |acc, (v, x)| {
                acc + v.objective() * *x
            });

        let mut problem = vars
            .minimise(objective)
            .using(default_solver)
            .with_time_limit(budget.as_secs_f64());

        for row in model.constraints() {
            let sum = row
                .terms()
                .iter()
                .fold(Expression::from(0.0), |acc, &(i, w)| acc + w * xs[i]);
            let constraint = match row.sense() {
                RowSense::Equal => sum.eq(row.rhs()),
                RowSense::AtMost => sum.leq(row.rhs()),
            };
            problem.add_constraint(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = xs.iter().map(|x| solution.value(*x)).collect();
                let runtime = start.elapsed();
                let status = if runtime >= budget {
                    MipStatus::TimeLimit
                } else {
                    MipStatus::Optimal
                };
                let gap = match status {
                    MipStatus::Optimal => 0.0,
                    MipStatus::TimeLimit => 1.0,
                };
                let objective = model.objective_value(&values);
                Ok(MipSolution::new(values, objective, runtime, gap, status))
            }
            Err(ResolutionError::Infeasible) => Err(MipSolveError::Infeasible),
            Err(ResolutionError::Unbounded) => Err(MipSolveError::Unbounded),
            Err(other) => Err(MipSolveError::Backend(other.to_string())),
        }
    }
}
