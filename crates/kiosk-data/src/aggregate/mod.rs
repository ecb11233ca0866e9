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

//! Group-fold-rank aggregation for report rows.
//!
//! A [`CategoryAggregator`] classifies items by a derived key, folds every
//! group from a fresh seed, projects each group into a report row, and orders
//! the rows by a ranking key. Queue health, stock danger, and profitability
//! reports are all instances of it; they differ only in the functions they
//! plug in.
//!
//! Groups are formed in first-seen order and sorted with a stable sort, so
//! rows that rank equal keep first-seen order. Callers should not rely on it.
//! Every group holds at least one item, so `report_of` always receives a
//! non-zero count and may divide by it.
//!
//! The fold step must not depend on the order items arrive in within a group
//! for the output to be a pure function of the input multiset.

use ahash::AHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// Direction in which report rows are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Highest rank first.
    #[default]
    Descending,
    /// Lowest rank first.
    Ascending,
}

type KeyFn<'f, T, K> = Box<dyn Fn(&T) -> K + 'f>;
type SeedFn<'f, A> = Box<dyn Fn() -> A + 'f>;
type StepFn<'f, T, A> = Box<dyn Fn(A, &T) -> A + 'f>;
type ReportFn<'f, K, A, R> = Box<dyn Fn(K, A, usize) -> R + 'f>;
type CompareFn<'f, R> = Box<dyn Fn(&R, &R) -> Ordering + 'f>;

struct Group<'a, K, T> {
    key: K,
    members: Vec<&'a T>,
}

/// Reusable group-by/fold/rank pipeline.
///
/// - `T`: the item type being classified.
/// - `K`: the group key.
/// - `A`: the per-group accumulator.
/// - `R`: the report row.
pub struct CategoryAggregator<'f, T, K, A, R> {
    key_of: KeyFn<'f, T, K>,
    seed: SeedFn<'f, A>,
    step: StepFn<'f, T, A>,
    report_of: ReportFn<'f, K, A, R>,
    compare: Option<CompareFn<'f, R>>,
}

impl<'f, T, K, A, R> CategoryAggregator<'f, T, K, A, R>
where
    K: Eq + Hash + Clone,
{
    /// Builds an unranked aggregator. Rows come out in first-seen group order
    /// until [`ranked_by`](Self::ranked_by) is applied.
    pub fn new(
        key_of: impl Fn(&T) -> K + 'f,
        seed: impl Fn() -> A + 'f,
        step: impl Fn(A, &T) -> A + 'f,
        report_of: impl Fn(K, A, usize) -> R + 'f,
    ) -> Self {
        Self {
            key_of: Box::new(key_of),
            seed: Box::new(seed),
            step: Box::new(step),
            report_of: Box::new(report_of),
            compare: None,
        }
    }

    /// Orders rows by `rank_of`. Incomparable ranks (NaN) are treated as equal.
    pub fn ranked_by<Rk>(mut self, rank_of: impl Fn(&R) -> Rk + 'f, order: RankOrder) -> Self
    where
        Rk: PartialOrd,
    {
        self.compare = Some(Box::new(move |a: &R, b: &R| {
            let ordering = rank_of(a)
                .partial_cmp(&rank_of(b))
                .unwrap_or(Ordering::Equal);
            match order {
                RankOrder::Ascending => ordering,
                RankOrder::Descending => ordering.reverse(),
            }
        }));
        self
    }

    /// Aggregates `items` into ranked report rows. An empty input yields no rows.
    pub fn aggregate<'a, I>(&self, items: I) -> Vec<R>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut index: AHashMap<K, usize> = AHashMap::new();
        let mut groups: Vec<Group<'a, K, T>> = Vec::new();

        for item in items {
            let key = (self.key_of)(item);
            match index.get(&key) {
                Some(&slot) => groups[slot].members.push(item),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        members: vec![item],
                    });
                }
            }
        }

        let mut rows: Vec<R> = groups
            .into_iter()
            .map(|group| {
                let count = group.members.len();
                let acc = group
                    .members
                    .into_iter()
                    .fold((self.seed)(), |acc, item| (self.step)(acc, item));
                (self.report_of)(group.key, acc, count)
            })
            .collect();

        if let Some(compare) = &self.compare {
            rows.sort_by(|a, b| compare(a, b));
        }
        rows
    }
}

/// One-shot form of [`CategoryAggregator`], ranked descending by `rank_of`.
pub fn aggregate<'a, T, K, A, R, Rk>(
    items: impl IntoIterator<Item = &'a T>,
    key_of: impl Fn(&T) -> K,
    seed: impl Fn() -> A,
    step: impl Fn(A, &T) -> A,
    report_of: impl Fn(K, A, usize) -> R,
    rank_of: impl Fn(&R) -> Rk,
) -> Vec<R>
where
    T: 'a,
    K: Eq + Hash + Clone,
    Rk: PartialOrd,
{
    CategoryAggregator::new(key_of, seed, step, report_of)
        .ranked_by(rank_of, RankOrder::Descending)
        .aggregate(items)
}
