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

//! Courses.
//!
//! A `Course` is immutable once built. `Course::new` checks the identifier,
//! the meeting interval and the credit value, `Course::with_prerequisites`
//! attaches the prerequisite ids. Deserialization goes through the same
//! checks via `CourseRecord`.

use crate::error::CourseError;
use coursetable_core::math::interval::TimeInterval;
use serde::{Deserialize, Serialize};

/// A single course offering: one meeting interval per semester.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord", into = "CourseRecord")]
pub struct Course {
    id: String,
    name: String,
    interval: TimeInterval<f64>,
    credits: u32,
    prerequisites: Vec<String>,
}

impl Course {
    /// Creates a course without prerequisites.
    ///
    /// # Errors
    ///
    /// Returns a `CourseError` if `id` is empty, if a time bound is not
    /// finite, if `end <= start`, or if `credits` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use coursetable_model::course::Course;
    ///
    /// let course = Course::new("MA101", "Calculus I", 8.0, 10.0, 4).unwrap();
    /// assert_eq!(course.duration(), 2.0);
    /// assert!(Course::new("MA102", "Calculus II", 10.0, 8.0, 4).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: f64,
        end_time: f64,
        credits: u32,
    ) -> Result<Self, CourseError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CourseError::EmptyId);
        }
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(CourseError::NonFiniteTime {
                id,
                start: start_time,
                end: end_time,
            });
        }
        if end_time <= start_time {
            return Err(CourseError::InvalidInterval {
                id,
                start: start_time,
                end: end_time,
            });
        }
        if credits == 0 {
            return Err(CourseError::ZeroCredits { id });
        }

        Ok(Self {
            id,
            name: name.into(),
            interval: TimeInterval::new(start_time, end_time),
            credits,
            prerequisites: Vec::new(),
        })
    }

    /// Replaces the prerequisite list of the course.
    ///
    /// Repeated ids are kept once, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::SelfPrerequisite` if the course lists itself.
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Result<Self, CourseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for prerequisite in prerequisites {
            let prerequisite = prerequisite.into();
            if prerequisite == self.id {
                return Err(CourseError::SelfPrerequisite { id: self.id });
            }
            if !list.contains(&prerequisite) {
                list.push(prerequisite);
            }
        }
        self.prerequisites = list;
        Ok(self)
    }

    /// Returns the unique identifier of the course.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name of the course.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the meeting interval `[start, end)` in hours.
    #[inline]
    pub fn interval(&self) -> TimeInterval<f64> {
        self.interval
    }

    #[inline]
    pub fn start_time(&self) -> f64 {
        self.interval.start()
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        self.interval.end()
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.interval.duration()
    }

    #[inline]
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Returns the prerequisite ids in declaration order.
    #[inline]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    /// Returns `true` if the course has at least one prerequisite.
    #[inline]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Returns `true` if the meeting intervals of both courses overlap.
    #[inline]
    pub fn conflicts_with(&self, other: &Course) -> bool {
        self.interval.overlaps(&other.interval)
    }

    /// Returns the idle time between this course and `other`, zero if they
    /// overlap or touch.
    #[inline]
    pub fn gap_to(&self, other: &Course) -> f64 {
        self.interval.gap_to(&other.interval)
    }
}

impl std::fmt::Debug for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Course")
            .field("id", &self.id)
            .field("interval", &self.interval)
            .field("credits", &self.credits)
            .field("prerequisites", &self.prerequisites)
            .finish()
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) {} {} cr",
            self.id, self.name, self.interval, self.credits
        )
    }
}

/// The flat, serializable form of a `Course`.
///
/// Converting a record into a `Course` runs the full validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub credits: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = CourseError;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        Course::new(
            record.id,
            record.name,
            record.start_time,
            record.end_time,
            record.credits,
        )?
        .with_prerequisites(record.prerequisites)
    }
}

impl From<Course> for CourseRecord {
    fn from(course: Course) -> Self {
        Self {
            start_time: course.start_time(),
            end_time: course.end_time(),
            id: course.id,
            name: course.name,
            credits: course.credits,
            prerequisites: course.prerequisites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_course() {
        let course = Course::new("CS101", "Intro", 8.0, 10.0, 4).unwrap();
        assert_eq!(course.id(), "CS101");
        assert_eq!(course.name(), "Intro");
        assert_eq!(course.start_time(), 8.0);
        assert_eq!(course.end_time(), 10.0);
        assert_eq!(course.credits(), 4);
        assert!(!course.has_prerequisites());
    }

    #[test]
    fn test_new_rejects_malformed_input() {
        assert_eq!(
            Course::new("", "x", 8.0, 10.0, 4).unwrap_err(),
            CourseError::EmptyId
        );
        assert!(matches!(
            Course::new("A", "x", 10.0, 10.0, 4),
            Err(CourseError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Course::new("A", "x", 12.0, 10.0, 4),
            Err(CourseError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Course::new("A", "x", f64::NAN, 10.0, 4),
            Err(CourseError::NonFiniteTime { .. })
        ));
        assert_eq!(
            Course::new("A", "x", 8.0, 10.0, 0).unwrap_err(),
            CourseError::ZeroCredits { id: "A".into() }
        );
    }

    #[test]
    fn test_with_prerequisites_deduplicates_in_order() {
        let course = Course::new("CS201", "Data Structures", 8.0, 10.0, 4)
            .unwrap()
            .with_prerequisites(["CS101", "MA101", "CS101"])
            .unwrap();
        assert_eq!(course.prerequisites(), ["CS101", "MA101"]);
    }

    #[test]
    fn test_self_prerequisite_is_rejected() {
        let err = Course::new("CS201", "Data Structures", 8.0, 10.0, 4)
            .unwrap()
            .with_prerequisites(["CS201"])
            .unwrap_err();
        assert_eq!(err, CourseError::SelfPrerequisite { id: "CS201".into() });
    }

    #[test]
    fn test_conflicts_and_gap() {
        let a = Course::new("A", "A", 8.0, 10.0, 4).unwrap();
        let b = Course::new("B", "B", 10.0, 12.0, 4).unwrap();
        let c = Course::new("C", "C", 9.0, 11.0, 4).unwrap();
        let d = Course::new("D", "D", 14.0, 15.0, 2).unwrap();
        assert!(!a.conflicts_with(&b));
        assert!(a.conflicts_with(&c));
        assert_eq!(a.gap_to(&b), 0.0);
        assert_eq!(a.gap_to(&d), 4.0);
        assert_eq!(d.gap_to(&a), 4.0);
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let json = r#"{"id":"CS201","name":"Data Structures","start_time":8.0,"end_time":10.0,"credits":4,"prerequisites":["CS101"]}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.prerequisites(), ["CS101"]);

        let back: Course = serde_json::from_str(&serde_json::to_string(&course).unwrap()).unwrap();
        assert_eq!(back, course);

        let missing_prerequisites = r#"{"id":"A","name":"A","start_time":8.0,"end_time":9.0,"credits":1}"#;
        assert!(serde_json::from_str::<Course>(missing_prerequisites).is_ok());

        let inverted = r#"{"id":"A","name":"A","start_time":9.0,"end_time":8.0,"credits":1}"#;
        assert!(serde_json::from_str::<Course>(inverted).is_err());
    }

    #[test]
    fn test_display() {
        let course = Course::new("A", "Algebra", 8.0, 9.5, 3).unwrap();
        assert_eq!(format!("{}", course), "A (Algebra) [8, 9.5) 3 cr");
    }
}
