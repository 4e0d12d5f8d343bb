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

//! Floating point tolerances.
//!
//! Times and gaps are measured in hours as `f64`. Accumulating gaps along a
//! search path introduces rounding noise, so every comparison that decides
//! whether a solution is strictly better goes through the helpers below with
//! the shared absolute tolerance `EPSILON`.

/// Absolute tolerance used for all floating point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Returns `true` if `a` and `b` differ by at most `EPSILON`.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns `true` if `a` is smaller than `b` by more than `EPSILON`.
#[inline]
pub fn definitely_less(a: f64, b: f64) -> bool {
    a < b - EPSILON
}

/// Returns `true` if `a` is larger than `b` by more than `EPSILON`.
#[inline]
pub fn definitely_greater(a: f64, b: f64) -> bool {
    a > b + EPSILON
}

/// Clamps tiny negative values produced by cancellation back to zero.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_within_tolerance() {
        assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(1.0, 1.0 + 10.0 * EPSILON));
    }

    #[test]
    fn test_definitely_less_and_greater() {
        assert!(definitely_less(1.0, 2.0));
        assert!(!definitely_less(1.0, 1.0 + EPSILON / 2.0));
        assert!(definitely_greater(2.0, 1.0));
        assert!(!definitely_greater(0.3, 0.1 + 0.2));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-1e-12), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }
}
