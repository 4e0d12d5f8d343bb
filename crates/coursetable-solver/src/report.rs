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

//! Comparison reports.

use crate::config::Algorithm;
use coursetable_model::schedule::Schedule;
use coursetable_search::objective::Objective;
use std::cmp::Ordering;
use std::time::Duration;

/// How an algorithm's run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// The schedule is proven optimal.
    Optimal,
    /// The schedule is feasible but comes with no guarantee.
    Heuristic,
    /// The search was stopped by a limit; the schedule is the best found.
    Aborted(String),
    /// The algorithm produced no schedule.
    Failed(String),
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Optimal => write!(f, "optimal"),
            EntryStatus::Heuristic => write!(f, "heuristic"),
            EntryStatus::Aborted(reason) => write!(f, "aborted ({})", reason),
            EntryStatus::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// One algorithm's result.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonEntry {
    pub algorithm: Algorithm,
    pub status: EntryStatus,
    /// `None` exactly when the status is `Failed`.
    pub schedule: Option<Schedule>,
    pub elapsed: Duration,
    /// The objective's headline number for the schedule.
    pub score: Option<f64>,
}

impl ComparisonEntry {
    /// An entry for a run that produced `schedule`.
    pub fn completed(
        algorithm: Algorithm,
        status: EntryStatus,
        schedule: Schedule,
        elapsed: Duration,
        objective: &Objective,
    ) -> Self {
        Self {
            algorithm,
            status,
            score: Some(objective.score(&schedule)),
            schedule: Some(schedule),
            elapsed,
        }
    }

    /// An entry for a run that failed.
    pub fn failed<R>(algorithm: Algorithm, reason: R, elapsed: Duration) -> Self
    where
        R: Into<String>,
    {
        Self {
            algorithm,
            status: EntryStatus::Failed(reason.into()),
            schedule: None,
            elapsed,
            score: None,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.status, EntryStatus::Optimal)
    }
}

/// The results of every algorithm on one catalog and objective.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub objective: Objective,
    pub entries: Vec<ComparisonEntry>,
}

impl Comparison {
    #[inline]
    pub fn new(objective: Objective, entries: Vec<ComparisonEntry>) -> Self {
        Self { objective, entries }
    }

    /// Returns the entry of `algorithm`, if it was run.
    pub fn entry(&self, algorithm: Algorithm) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.algorithm == algorithm)
    }

    /// Returns the entry with the best schedule under the objective. Ties
    /// keep the entry listed first.
    pub fn best(&self) -> Option<&ComparisonEntry> {
        let mut best: Option<(&ComparisonEntry, &Schedule)> = None;
        for entry in &self.entries {
            let Some(schedule) = entry.schedule.as_ref() else {
                continue;
            };
            match best {
                Some((_, incumbent))
                    if self.objective.compare(schedule, incumbent) != Ordering::Greater => {}
                _ => best = Some((entry, schedule)),
            }
        }
        best.map(|(entry, _)| entry)
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Objective: {}", self.objective)?;
        writeln!(
            f,
            "{:<17} | {:<24} | {:>7} | {:>8} | {:>9} | {:>10} | Courses",
            "Algorithm", "Status", "Credits", "Gap (h)", "Score", "Time"
        )?;
        write!(f, "{}", "-".repeat(100))?;
        for entry in &self.entries {
            let time = format!("{:.3}ms", entry.elapsed.as_secs_f64() * 1e3);
            match (&entry.schedule, entry.score) {
                (Some(schedule), Some(score)) => write!(
                    f,
                    "\n{:<17} | {:<24} | {:>7} | {:>8.2} | {:>9.3} | {:>10} | {}",
                    entry.algorithm.to_string(),
                    entry.status.to_string(),
                    schedule.total_credits(),
                    schedule.total_gap(),
                    score,
                    time,
                    schedule.selection()
                )?,
                _ => write!(
                    f,
                    "\n{:<17} | {:<24} | {:>7} | {:>8} | {:>9} | {:>10} | -",
                    entry.algorithm.to_string(),
                    entry.status.to_string(),
                    "-",
                    "-",
                    "-",
                    time
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursetable_model::schedule::Selection;

    fn schedule(ids: &[&str], credits: u32, gap: f64) -> Schedule {
        Schedule::new(ids.iter().copied().collect::<Selection>(), credits, gap)
    }

    fn comparison(objective: Objective) -> Comparison {
        Comparison::new(
            objective,
            vec![
                ComparisonEntry::completed(
                    Algorithm::BranchAndBound,
                    EntryStatus::Optimal,
                    schedule(&["A", "B"], 8, 0.0),
                    Duration::from_millis(2),
                    &objective,
                ),
                ComparisonEntry::completed(
                    Algorithm::Greedy,
                    EntryStatus::Heuristic,
                    schedule(&["C"], 8, 0.0),
                    Duration::from_micros(10),
                    &objective,
                ),
                ComparisonEntry::failed(Algorithm::Ilp, "backend down", Duration::from_millis(1)),
            ],
        )
    }

    #[test]
    fn test_best_keeps_first_on_tie() {
        let comparison = comparison(Objective::MaxCredits);
        assert_eq!(
            comparison.best().map(|e| e.algorithm),
            Some(Algorithm::BranchAndBound)
        );
    }

    #[test]
    fn test_best_skips_failed_entries() {
        let comparison = Comparison::new(
            Objective::MinGap,
            vec![
                ComparisonEntry::failed(Algorithm::Ilp, "x", Duration::ZERO),
                ComparisonEntry::completed(
                    Algorithm::Greedy,
                    EntryStatus::Heuristic,
                    schedule(&["C"], 3, 1.0),
                    Duration::ZERO,
                    &Objective::MinGap,
                ),
            ],
        );
        assert_eq!(comparison.best().map(|e| e.algorithm), Some(Algorithm::Greedy));
        assert!(Comparison::new(Objective::MinGap, Vec::new()).best().is_none());
    }

    #[test]
    fn test_entry_lookup_and_scores() {
        let comparison = comparison(Objective::combined(1.0));
        let ilp = comparison.entry(Algorithm::Ilp).unwrap();
        assert_eq!(ilp.score, None);
        assert_eq!(ilp.status, EntryStatus::Failed("backend down".into()));
        let bnb = comparison.entry(Algorithm::BranchAndBound).unwrap();
        assert!(bnb.is_optimal());
        assert_eq!(bnb.score, Some(8.0));
    }

    #[test]
    fn test_table_rendering() {
        let table = comparison(Objective::MaxCredits).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Objective: Max Credits");
        assert!(lines[3].starts_with("Branch-and-Bound"));
        assert!(lines[3].contains("optimal"));
        assert!(lines[3].ends_with("{A, B}"));
        assert!(lines[5].contains("failed (backend down)"));
        assert!(lines[5].ends_with("| -"));
    }
}
