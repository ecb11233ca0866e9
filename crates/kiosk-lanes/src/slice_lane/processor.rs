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

//! A lane that drains a FIFO queue in budgeted slices.

use kiosk_core::SliceBudget;
use std::collections::VecDeque;
use std::convert::Infallible;

/// Whether a slice left work behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceProgress {
    /// The queue was empty when the slice ended.
    Complete,
    /// Items remain queued for a later slice.
    Pending,
}

/// The result of one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOutcome<R> {
    /// The folded result of this slice.
    pub result: R,
    /// Items popped during this slice.
    pub processed: usize,
    /// Whether more work is queued.
    pub progress: SliceProgress,
}

impl<R> SliceOutcome<R> {
    /// Returns `true` when items remain queued.
    pub fn is_pending(&self) -> bool {
        self.progress == SliceProgress::Pending
    }
}

/// Pops and folds items from the front of `queue` until it is empty or
/// `budget` is spent.
///
/// Items are folded strictly in FIFO order. An item handed to `fold` is
/// consumed even if `fold` fails; the error aborts the slice and is returned
/// as-is, and every item not yet popped stays queued.
pub fn process_slice<T, R, E>(
    queue: &mut VecDeque<T>,
    budget: SliceBudget,
    seed: R,
    mut fold: impl FnMut(R, T) -> Result<R, E>,
) -> Result<SliceOutcome<R>, E> {
    let mut meter = budget.meter();
    let mut acc = seed;

    while meter.admits_next() {
        let Some(item) = queue.pop_front() else {
            break;
        };
        meter.record();
        acc = fold(acc, item)?;
    }

    let progress = if queue.is_empty() {
        SliceProgress::Complete
    } else {
        SliceProgress::Pending
    };
    log::trace!(
        "process_slice: {} item(s) in {:?}, {} left ({:?})",
        meter.consumed(),
        meter.elapsed(),
        queue.len(),
        progress,
    );

    Ok(SliceOutcome {
        result: acc,
        processed: meter.consumed(),
        progress,
    })
}

/// Owns a FIFO backlog and drains it one budgeted slice per call.
#[derive(Debug, Clone)]
pub struct BudgetedQueueProcessor<T> {
    queue: VecDeque<T>,
    budget: SliceBudget,
    slices_run: u64,
    total_processed: u64,
}

impl<T> BudgetedQueueProcessor<T> {
    /// Creates an empty processor.
    pub fn new(budget: SliceBudget) -> Self {
        Self {
            queue: VecDeque::new(),
            budget,
            slices_run: 0,
            total_processed: 0,
        }
    }

    /// Appends an item to the back of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.queue.push_back(item);
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Read-only view of the queued items, front first.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    /// The per-slice budget.
    pub fn budget(&self) -> SliceBudget {
        self.budget
    }

    /// Replaces the per-slice budget. Takes effect from the next slice.
    pub fn reconfigure(&mut self, budget: SliceBudget) {
        self.budget = budget;
    }

    /// Slices run so far.
    pub fn slices_run(&self) -> u64 {
        self.slices_run
    }

    /// Items popped across all slices, including items whose fold failed.
    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    /// Runs one slice over the owned queue. See [`process_slice`].
    pub fn process_slice<R, E>(
        &mut self,
        seed: R,
        fold: impl FnMut(R, T) -> Result<R, E>,
    ) -> Result<SliceOutcome<R>, E> {
        let before = self.queue.len();
        self.slices_run += 1;
        let outcome = process_slice(&mut self.queue, self.budget, seed, fold);
        self.total_processed += (before - self.queue.len()) as u64;
        outcome
    }

    /// Runs one slice that simply moves items out, in order.
    pub fn drain_slice(&mut self) -> SliceOutcome<Vec<T>> {
        let outcome = self.process_slice(Vec::new(), |mut batch, item| {
            batch.push(item);
            Ok::<_, Infallible>(batch)
        });
        match outcome {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }
}

impl<T> Extend<T> for BudgetedQueueProcessor<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn loaded(items: impl IntoIterator<Item = char>, per_slice: usize) -> BudgetedQueueProcessor<char> {
        let mut processor = BudgetedQueueProcessor::new(SliceBudget::items(per_slice));
        processor.extend(items);
        processor
    }

    #[test]
    fn test_five_items_two_per_slice() {
        let mut processor = loaded("ABCDE".chars(), 2);

        let first = processor.drain_slice();
        assert_eq!(first.result, vec!['A', 'B']);
        assert!(first.is_pending());
        assert_eq!(processor.pending().copied().collect::<String>(), "CDE");

        let second = processor.drain_slice();
        assert_eq!(second.result, vec!['C', 'D']);
        assert_eq!(processor.pending().copied().collect::<String>(), "E");

        let third = processor.drain_slice();
        assert_eq!(third.result, vec!['E']);
        assert_eq!(third.progress, SliceProgress::Complete);
        assert!(processor.is_empty());
        assert_eq!(processor.slices_run(), 3);
    }

    #[test]
    fn test_ceil_l_over_k_slices_preserve_order() {
        for len in 0..=17usize {
            for per_slice in 1..=6usize {
                let original: Vec<usize> = (0..len).collect();
                let mut processor = BudgetedQueueProcessor::new(SliceBudget::items(per_slice));
                processor.extend(original.iter().copied());

                let mut seen = Vec::new();
                let mut calls = 0;
                while !processor.is_empty() {
                    let outcome = processor.drain_slice();
                    assert_eq!(outcome.processed, outcome.result.len());
                    assert!(outcome.processed <= per_slice);
                    seen.extend(outcome.result);
                    calls += 1;
                }

                assert_eq!(calls, len.div_ceil(per_slice), "len={len} k={per_slice}");
                assert_eq!(seen, original);
            }
        }
    }

    #[test]
    fn test_empty_queue_returns_seed() {
        let mut queue: VecDeque<u32> = VecDeque::new();
        let outcome =
            process_slice(&mut queue, SliceBudget::items(3), 42u32, |acc, n| Ok::<_, ()>(acc + n))
                .unwrap();
        assert_eq!(outcome.result, 42);
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.progress, SliceProgress::Complete);
    }

    #[test]
    fn test_fold_error_consumes_item_and_keeps_rest() {
        let mut queue: VecDeque<i32> = VecDeque::from(vec![1, 2, -3, 4, 5]);
        let err = process_slice(&mut queue, SliceBudget::items(10), 0, |acc, n| {
            if n < 0 {
                Err(format!("negative {n}"))
            } else {
                Ok(acc + n)
            }
        })
        .unwrap_err();

        assert_eq!(err, "negative -3");
        assert_eq!(queue, VecDeque::from(vec![4, 5]), "failing item consumed, rest kept");

        let resumed =
            process_slice(&mut queue, SliceBudget::items(10), 0, |acc, n| Ok::<_, String>(acc + n))
                .unwrap();
        assert_eq!(resumed.result, 9);
    }

    #[test]
    fn test_processor_counts_failed_items_as_processed() {
        let mut processor = BudgetedQueueProcessor::new(SliceBudget::items(4));
        processor.extend([1, 0, 2]);
        let result = processor.process_slice((), |(), n: i32| if n == 0 { Err(()) } else { Ok(()) });
        assert!(result.is_err());
        assert_eq!(processor.total_processed(), 2);
        assert_eq!(processor.len(), 1);
    }

    #[test]
    fn test_time_budget_eventually_drains_everything() {
        let mut processor = BudgetedQueueProcessor::new(SliceBudget::time(Duration::ZERO));
        processor.extend(0..500u32);

        let mut seen = Vec::new();
        let mut calls = 0;
        while !processor.is_empty() {
            let outcome = processor.drain_slice();
            assert!(outcome.processed >= 1, "every slice makes progress");
            seen.extend(outcome.result);
            calls += 1;
            assert!(calls <= 500);
        }
        assert_eq!(seen, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn test_reconfigure_applies_to_next_slice() {
        let mut processor = loaded("ABCDEF".chars(), 1);
        assert_eq!(processor.drain_slice().processed, 1);
        processor.reconfigure(SliceBudget::items(4));
        assert_eq!(processor.drain_slice().result, vec!['B', 'C', 'D', 'E']);
    }
}
