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

//! Route-cost primitive.
//!
//! A [`Cost`] is the real-valued price of one candidate trip as computed by
//! the route optimizer, and the unit of the assignment objective. Wrapping
//! `f64` keeps cost arithmetic out of reach of the clock types.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Cost(f64);

impl Cost {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Cost(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Cost(0.0)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl From<f64> for Cost {
    #[inline]
    fn from(value: f64) -> Self {
        Cost(value)
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cost {
    type Output = Cost;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Cost(self.0 - rhs.0)
    }
}

impl Mul<f64> for Cost {
    type Output = Cost;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Cost(self.0 * rhs)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |acc, c| acc + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_behaves_like_the_wrapped_scalar() {
        let a = Cost::new(5.0);
        let b = Cost::new(8.5);
        assert_eq!(a + b, Cost::new(13.5));
        assert_eq!(b - a, Cost::new(3.5));
        assert_eq!(a * 2.0, Cost::new(10.0));

        let mut acc = Cost::zero();
        acc += a;
        acc += b;
        assert_eq!(acc, Cost::new(13.5));
    }

    #[test]
    fn sum_over_iterator() {
        let total: Cost = [1.0, 2.0, 3.0].into_iter().map(Cost::new).sum();
        assert_eq!(total, Cost::new(6.0));
    }

    #[test]
    fn finiteness_check() {
        assert!(Cost::new(1.0).is_finite());
        assert!(!Cost::new(f64::INFINITY).is_finite());
        assert!(!Cost::new(f64::NAN).is_finite());
    }
}
