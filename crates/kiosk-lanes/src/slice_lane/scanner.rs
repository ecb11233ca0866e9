// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A lane that looks for the first match in a collection, a slice at a time.

use kiosk_core::SliceBudget;
use std::convert::Infallible;

/// The state of a scan after one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// The item at `index` matched. Later items were not examined.
    Found {
        /// Position of the first matching item.
        index: usize,
    },
    /// Every item was examined and none matched.
    NotFound,
    /// The budget ran out; the next call resumes after `scanned` items.
    Pending {
        /// Items examined so far in this run.
        scanned: usize,
    },
}

impl ScanStatus {
    /// Returns `true` for `Found` and `NotFound`.
    pub fn is_finished(&self) -> bool {
        !matches!(self, ScanStatus::Pending { .. })
    }

    /// The matching index, if the scan found one.
    pub fn found(&self) -> Option<usize> {
        match self {
            ScanStatus::Found { index } => Some(*index),
            _ => None,
        }
    }
}

/// Resumable, budgeted search for the first item satisfying a predicate.
///
/// The scanner remembers how far the current run got. Callers pass the same
/// collection on every call of a run; once a run finishes (match or
/// exhaustion) the cursor returns to the start for the next run.
#[derive(Debug, Clone)]
pub struct EarlyExitScanner {
    budget: SliceBudget,
    cursor: usize,
}

impl EarlyExitScanner {
    /// Creates a scanner positioned at the start.
    pub fn new(budget: SliceBudget) -> Self {
        Self { budget, cursor: 0 }
    }

    /// The per-call budget.
    pub fn budget(&self) -> SliceBudget {
        self.budget
    }

    /// Replaces the per-call budget without disturbing a run in progress.
    pub fn reconfigure(&mut self, budget: SliceBudget) {
        self.budget = budget;
    }

    /// Index of the next item the current run will examine.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` while a run is paused part-way.
    pub fn is_mid_scan(&self) -> bool {
        self.cursor > 0
    }

    /// Abandons the current run.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Continues the current run with an infallible predicate.
    pub fn scan<T>(&mut self, items: &[T], mut predicate: impl FnMut(&T) -> bool) -> ScanStatus {
        match self.try_scan(items, |item| Ok::<_, Infallible>(predicate(item))) {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }

    /// Continues the current run with a fallible predicate.
    ///
    /// A predicate error is returned unchanged; the failing item counts as
    /// examined and the next call resumes after it.
    pub fn try_scan<T, E>(
        &mut self,
        items: &[T],
        mut predicate: impl FnMut(&T) -> Result<bool, E>,
    ) -> Result<ScanStatus, E> {
        if self.cursor >= items.len() {
            // Empty collection, or one that shrank under a paused run.
            self.cursor = 0;
            return Ok(ScanStatus::NotFound);
        }

        let mut meter = self.budget.meter();
        while let Some(item) = items.get(self.cursor) {
            if !meter.admits_next() {
                log::trace!(
                    "EarlyExitScanner: paused at {}/{} after {:?}",
                    self.cursor,
                    items.len(),
                    meter.elapsed(),
                );
                return Ok(ScanStatus::Pending {
                    scanned: self.cursor,
                });
            }

            let index = self.cursor;
            meter.record();
            self.cursor += 1;
            if predicate(item)? {
                self.cursor = 0;
                return Ok(ScanStatus::Found { index });
            }
        }

        self.cursor = 0;
        Ok(ScanStatus::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    #[test]
    fn test_empty_collection_is_not_found_immediately() {
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(1));
        let mut calls = 0;
        let status = scanner.scan(&[] as &[u32], |_| {
            calls += 1;
            true
        });
        assert_eq!(status, ScanStatus::NotFound);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_no_match_traverses_everything_before_not_found() {
        let items: Vec<u32> = (0..10).collect();
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(3));
        let evaluated = RefCell::new(Vec::new());
        let mut predicate = |n: &u32| {
            evaluated.borrow_mut().push(*n);
            false
        };

        assert_eq!(scanner.scan(&items, &mut predicate), ScanStatus::Pending { scanned: 3 });
        assert_eq!(scanner.scan(&items, &mut predicate), ScanStatus::Pending { scanned: 6 });
        assert_eq!(scanner.scan(&items, &mut predicate), ScanStatus::Pending { scanned: 9 });
        assert_eq!(scanner.scan(&items, &mut predicate), ScanStatus::NotFound);
        assert_eq!(*evaluated.borrow(), items, "each item examined exactly once, in order");
        assert!(!scanner.is_mid_scan());
    }

    #[test]
    fn test_match_stops_evaluation() {
        let items = [4, 8, 15, 16, 23, 42];
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(100));
        let mut evaluated = Vec::new();
        let status = scanner.scan(&items, |n| {
            evaluated.push(*n);
            *n == 15
        });

        assert_eq!(status, ScanStatus::Found { index: 2 });
        assert_eq!(status.found(), Some(2));
        assert_eq!(evaluated, vec![4, 8, 15], "nothing after the match is evaluated");
    }

    #[test]
    fn test_match_found_in_later_slice() {
        let items: Vec<u32> = (0..8).collect();
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(2));

        let statuses: Vec<ScanStatus> = (0..3).map(|_| scanner.scan(&items, |n| *n == 5)).collect();
        assert_eq!(
            statuses,
            vec![
                ScanStatus::Pending { scanned: 2 },
                ScanStatus::Pending { scanned: 4 },
                ScanStatus::Found { index: 5 },
            ]
        );
        assert_eq!(scanner.cursor(), 0, "finished runs rewind");
    }

    #[test]
    fn test_predicate_error_propagates_and_resumes_after_failure() {
        let items = ["ok", "boom", "ok", "hit"];
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(10));
        let predicate = |s: &&str| match *s {
            "boom" => Err("predicate failed"),
            "hit" => Ok(true),
            _ => Ok(false),
        };

        assert_eq!(scanner.try_scan(&items, predicate), Err("predicate failed"));
        assert_eq!(scanner.cursor(), 2);
        assert_eq!(
            scanner.try_scan(&items, predicate),
            Ok(ScanStatus::Found { index: 3 })
        );
    }

    #[test]
    fn test_shrunken_collection_finishes_run() {
        let items: Vec<u32> = (0..6).collect();
        let mut scanner = EarlyExitScanner::new(SliceBudget::items(4));
        assert!(!scanner.scan(&items, |_| false).is_finished());
        assert_eq!(scanner.scan(&items[..2], |_| false), ScanStatus::NotFound);
        assert_eq!(scanner.cursor(), 0);
    }

    #[test]
    fn test_time_budget_scan_terminates() {
        let items: Vec<u32> = (0..2_000).collect();
        let mut scanner = EarlyExitScanner::new(SliceBudget::time(Duration::ZERO));
        let mut calls = 0;
        let status = loop {
            let status = scanner.scan(&items, |_| false);
            calls += 1;
            if status.is_finished() {
                break status;
            }
            assert!(calls <= items.len(), "every call examines at least one item");
        };
        assert_eq!(status, ScanStatus::NotFound);
    }
}
