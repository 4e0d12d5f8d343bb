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

use num_traits::Float;

/// A half-open time interval `[start, end)` over a floating point clock.
///
/// Two intervals that merely touch (`a.end == b.start`) do not overlap, which
/// is what allows back-to-back courses to be scheduled together.
///
/// # Invariants
/// Both bounds are finite and `start <= end`.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TimeInterval<T>
where
    T: Float,
{
    start: T,
    end: T,
}

impl<T> TimeInterval<T>
where
    T: Float,
{
    /// Creates a new `TimeInterval`.
    ///
    /// # Panics
    ///
    /// Panics if a bound is not finite or if `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use coursetable_core::math::interval::TimeInterval;
    ///
    /// let iv = TimeInterval::new(8.0, 10.0);
    /// assert_eq!(iv.duration(), 2.0);
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        assert!(
            start.is_finite() && end.is_finite() && start <= end,
            "Invalid interval: bounds must be finite and start must be less than or equal to end"
        );
        Self { start, end }
    }

    /// Creates a new `TimeInterval` if the inputs are valid.
    ///
    /// Returns `None` if a bound is not finite or if `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use coursetable_core::math::interval::TimeInterval;
    ///
    /// assert!(TimeInterval::try_new(8.0, 10.0).is_some());
    /// assert!(TimeInterval::try_new(10.0, 8.0).is_none());
    /// assert!(TimeInterval::try_new(f64::NAN, 8.0).is_none());
    /// ```
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self> {
        if start.is_finite() && end.is_finite() && start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline(always)]
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive end of the interval.
    #[inline(always)]
    pub fn end(&self) -> T {
        self.end
    }

    /// Returns `end - start`.
    #[inline(always)]
    pub fn duration(&self) -> T {
        self.end - self.start
    }

    /// Returns `true` if the interval has zero length.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, t: T) -> bool {
        self.start <= t && t < self.end
    }

    /// Returns `true` if the two intervals share a point.
    ///
    /// Touching endpoints do not count as an overlap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use coursetable_core::math::interval::TimeInterval;
    ///
    /// let a = TimeInterval::new(8.0, 10.0);
    /// assert!(a.overlaps(&TimeInterval::new(9.0, 11.0)));
    /// assert!(!a.overlaps(&TimeInterval::new(10.0, 12.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the idle time between two intervals.
    ///
    /// The result is `max(0, later.start - earlier.end)` where `later` is the
    /// interval with the later start. It is symmetric and zero for
    /// overlapping or touching intervals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use coursetable_core::math::interval::TimeInterval;
    ///
    /// let a = TimeInterval::new(8.0, 10.0);
    /// let b = TimeInterval::new(13.0, 15.0);
    /// assert_eq!(a.gap_to(&b), 3.0);
    /// assert_eq!(b.gap_to(&a), 3.0);
    /// ```
    #[inline]
    pub fn gap_to(&self, other: &Self) -> T {
        let (earlier, later) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        let gap = later.start - earlier.end;
        if gap > T::zero() { gap } else { T::zero() }
    }

    /// Returns the common part of both intervals, or `None` if they do not
    /// overlap.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Returns the length of the intersection, zero if the intervals are
    /// disjoint.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> T {
        self.intersection(other)
            .map_or_else(T::zero, |common| common.duration())
    }

    /// Returns the smallest interval containing both intervals.
    #[inline]
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl<T> std::fmt::Debug for TimeInterval<T>
where
    T: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?})", self.start, self.end)
    }
}

impl<T> std::fmt::Display for TimeInterval<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
