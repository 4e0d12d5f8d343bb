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

//! The course catalog.
//!
//! A `Catalog` is the ordered, id-unique collection of offered courses. Its
//! order matters: solvers break ties by catalog position, so two runs on the
//! same catalog always return the same selection.
//!
//! Prerequisite ids that do not name a catalog course are accepted. Such a
//! course can only be scheduled if the student has already completed the
//! missing prerequisite, which is the caller's knowledge, not the catalog's.

use crate::{
    course::{Course, CourseRecord},
    error::CatalogError,
    index::CourseIndex,
};
use coursetable_core::math::interval::TimeInterval;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An immutable, validated collection of courses with an id lookup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Course>", into = "Vec<Course>")]
pub struct Catalog {
    courses: Vec<Course>,
    lookup: FxHashMap<String, CourseIndex>,
}

impl Catalog {
    /// Builds a catalog from the given courses, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two courses share an id and
    /// `CatalogError::CreditOverflow` if the credits of all courses together
    /// do not fit a `u32`. Every schedule is a subset of the catalog, so its
    /// credit total then never overflows either.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        courses
            .iter()
            .try_fold(0u32, |acc, c| acc.checked_add(c.credits()))
            .ok_or(CatalogError::CreditOverflow)?;

        let mut lookup =
            FxHashMap::with_capacity_and_hasher(courses.len(), Default::default());
        for (i, course) in courses.iter().enumerate() {
            if lookup
                .insert(course.id().to_owned(), CourseIndex::new(i))
                .is_some()
            {
                return Err(CatalogError::DuplicateId(course.id().to_owned()));
            }
        }

        let catalog = Self { courses, lookup };
        for (course, prerequisite) in catalog.unknown_prerequisites() {
            log::debug!(
                "course `{}` requires `{}`, which is not in the catalog",
                course.id(),
                prerequisite
            );
        }
        Ok(catalog)
    }

    /// Builds a catalog from raw records, validating every course.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Course` for the first malformed record and
    /// `CatalogError::DuplicateId` for repeated ids.
    pub fn from_records<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CourseRecord>,
    {
        let courses = records
            .into_iter()
            .map(Course::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(courses)
    }

    /// Returns the number of courses.
    #[inline]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` if the catalog contains no course.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Returns all courses in catalog order.
    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Returns the course at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn course(&self, index: CourseIndex) -> &Course {
        let i = index.get();
        debug_assert!(
            i < self.courses.len(),
            "called `Catalog::course` with index out of bounds: the len is {} but the index is {}",
            self.courses.len(),
            i
        );
        &self.courses[i]
    }

    /// Returns the course with the given id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.lookup.get(id).map(|&index| &self.courses[index.get()])
    }

    /// Returns the catalog position of the course with the given id.
    #[inline]
    pub fn index_of(&self, id: &str) -> Option<CourseIndex> {
        self.lookup.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    /// Iterates over `(index, course)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CourseIndex, &Course)> + '_ {
        self.courses
            .iter()
            .enumerate()
            .map(|(i, course)| (CourseIndex::new(i), course))
    }

    /// Iterates over every `(course, prerequisite id)` pair whose
    /// prerequisite does not name a catalog course.
    pub fn unknown_prerequisites(&self) -> impl Iterator<Item = (&Course, &str)> + '_ {
        self.courses.iter().flat_map(move |course| {
            course
                .prerequisites()
                .iter()
                .filter(move |p| !self.lookup.contains_key(p.as_str()))
                .map(move |p| (course, p.as_str()))
        })
    }

    /// Returns the sum of all credits in the catalog.
    pub fn total_credits(&self) -> u32 {
        self.courses.iter().map(Course::credits).sum()
    }

    /// Returns the interval from the earliest start to the latest end, or
    /// `None` for an empty catalog.
    pub fn span(&self) -> Option<TimeInterval<f64>> {
        self.courses
            .iter()
            .map(Course::interval)
            .reduce(|acc, iv| acc.hull(&iv))
    }
}

impl TryFrom<Vec<Course>> for Catalog {
    type Error = CatalogError;

    fn try_from(courses: Vec<Course>) -> Result<Self, Self::Error> {
        Self::new(courses)
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        catalog.courses
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog ({} courses)", self.len())?;
        if self.is_empty() {
            return writeln!(f, "   (empty)");
        }
        writeln!(
            f,
            "   {:<10} | {:<16} | {:>7} | {:<14}",
            "Id", "Interval", "Credits", "Prerequisites"
        )?;
        writeln!(f, "   {:-<10}-+-{:-<16}-+-{:->7}-+-{:-<14}", "", "", "", "")?;
        for course in &self.courses {
            writeln!(
                f,
                "   {:<10} | {:<16} | {:>7} | {:<14}",
                course.id(),
                course.interval().to_string(),
                course.credits(),
                course.prerequisites().join(", ")
            )?;
        }
        Ok(())
    }
}
