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

//! Slice budgets: the cap placed on one bounded unit of incremental work.
//!
//! A [`SliceBudget`] is either a wall-clock allowance or a maximum item count.
//! Each invocation of a slice-based lane opens a fresh [`BudgetMeter`] and
//! asks it, before every item, whether one more unit of work still fits.
//!
//! Item budgets are exact and reproducible: a slice admits precisely
//! `min(limit, remaining)` items. Time budgets depend on the host's clock and
//! only guarantee progress: the first item of a slice is always admitted, so
//! repeated slices eventually drain any finite backlog.

use crate::agent::StrategyId;
use crate::utils::timer::Stopwatch;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

const LOW_POWER_DIVISOR: u32 = 4;
const HIGH_PERFORMANCE_MULTIPLIER: u32 = 3;
const MAX_CUSTOM_ITEMS: usize = 100;

/// The cap on a single slice of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceBudget {
    /// Stop once the slice has been running for longer than this duration.
    Time(Duration),
    /// Stop once this many items have been processed.
    Items(NonZeroUsize),
}

impl SliceBudget {
    /// A wall-clock budget.
    pub fn time(limit: Duration) -> Self {
        SliceBudget::Time(limit)
    }

    /// A wall-clock budget expressed in microseconds.
    pub fn micros(limit: u64) -> Self {
        SliceBudget::Time(Duration::from_micros(limit))
    }

    /// An item-count budget. A limit of zero would never make progress and is
    /// raised to one.
    pub fn items(limit: usize) -> Self {
        match NonZeroUsize::new(limit) {
            Some(limit) => SliceBudget::Items(limit),
            None => {
                log::warn!("SliceBudget: item limit of 0 raised to 1");
                SliceBudget::Items(NonZeroUsize::MIN)
            }
        }
    }

    /// Opens a meter for one slice. The clock starts now.
    pub fn meter(&self) -> BudgetMeter {
        BudgetMeter::new(*self)
    }

    /// Derives the budget an agent should use under `strategy`, treating
    /// `self` as the balanced baseline.
    ///
    /// `Custom(n)` always yields an item budget of `n` clamped to `1..=100`.
    pub fn scaled_for(self, strategy: StrategyId) -> Self {
        match (strategy, self) {
            (StrategyId::Balanced, budget) => budget,
            (StrategyId::LowPower, SliceBudget::Time(limit)) => {
                SliceBudget::Time(limit / LOW_POWER_DIVISOR)
            }
            (StrategyId::LowPower, SliceBudget::Items(limit)) => {
                SliceBudget::items(limit.get() / LOW_POWER_DIVISOR as usize)
            }
            (StrategyId::HighPerformance, SliceBudget::Time(limit)) => {
                SliceBudget::Time(limit * HIGH_PERFORMANCE_MULTIPLIER)
            }
            (StrategyId::HighPerformance, SliceBudget::Items(limit)) => {
                SliceBudget::items(limit.get().saturating_mul(HIGH_PERFORMANCE_MULTIPLIER as usize))
            }
            (StrategyId::Custom(count), _) => {
                SliceBudget::items((count as usize).clamp(1, MAX_CUSTOM_ITEMS))
            }
        }
    }
}

impl Default for SliceBudget {
    fn default() -> Self {
        SliceBudget::items(5)
    }
}

/// Tracks how much of a [`SliceBudget`] one slice has consumed.
#[derive(Debug, Clone)]
pub struct BudgetMeter {
    budget: SliceBudget,
    stopwatch: Stopwatch,
    consumed: usize,
}

impl BudgetMeter {
    /// Opens a meter; the clock starts immediately.
    pub fn new(budget: SliceBudget) -> Self {
        Self {
            budget,
            stopwatch: Stopwatch::new(),
            consumed: 0,
        }
    }

    /// Whether one more item fits in this slice.
    ///
    /// The first item is always admitted under a time budget.
    pub fn admits_next(&self) -> bool {
        match self.budget {
            SliceBudget::Items(limit) => self.consumed < limit.get(),
            SliceBudget::Time(limit) => self.consumed == 0 || !self.stopwatch.has_exceeded(limit),
        }
    }

    /// Records that one item was processed.
    #[inline]
    pub fn record(&mut self) {
        self.consumed += 1;
    }

    /// Number of items processed so far in this slice.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Wall-clock time spent in this slice so far.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_meter_admits_exactly_limit() {
        let mut meter = SliceBudget::items(3).meter();
        let mut admitted = 0;
        while meter.admits_next() {
            meter.record();
            admitted += 1;
            assert!(admitted <= 3, "meter must stop at its limit");
        }
        assert_eq!(admitted, 3);
        assert_eq!(meter.consumed(), 3);
    }

    #[test]
    fn test_zero_item_limit_is_raised_to_one() {
        assert_eq!(SliceBudget::items(0), SliceBudget::items(1));
    }

    #[test]
    fn test_time_meter_always_admits_first_item() {
        let mut meter = SliceBudget::time(Duration::ZERO).meter();
        std::thread::sleep(Duration::from_millis(2));
        assert!(meter.admits_next(), "first item must fit in any time budget");
        meter.record();
        assert!(
            !meter.admits_next(),
            "a zero budget that has elapsed admits nothing more"
        );
    }

    #[test]
    fn test_generous_time_meter_keeps_admitting() {
        let mut meter = SliceBudget::time(Duration::from_secs(60)).meter();
        for _ in 0..100 {
            assert!(meter.admits_next());
            meter.record();
        }
    }

    #[test]
    fn test_strategy_scaling_for_item_budgets() {
        let base = SliceBudget::items(10);
        assert_eq!(base.scaled_for(StrategyId::Balanced), SliceBudget::items(10));
        assert_eq!(base.scaled_for(StrategyId::LowPower), SliceBudget::items(2));
        assert_eq!(
            base.scaled_for(StrategyId::HighPerformance),
            SliceBudget::items(30)
        );
        assert_eq!(
            base.scaled_for(StrategyId::Custom(500)),
            SliceBudget::items(100)
        );
        assert_eq!(
            SliceBudget::items(2).scaled_for(StrategyId::LowPower),
            SliceBudget::items(1),
            "low power never scales an item budget down to zero"
        );
    }

    #[test]
    fn test_strategy_scaling_for_time_budgets() {
        let base = SliceBudget::micros(800);
        assert_eq!(base.scaled_for(StrategyId::LowPower), SliceBudget::micros(200));
        assert_eq!(
            base.scaled_for(StrategyId::HighPerformance),
            SliceBudget::micros(2400)
        );
    }

    #[test]
    fn test_budget_json_shape() {
        let json = serde_json::to_string(&SliceBudget::items(4)).unwrap();
        assert_eq!(json, r#"{"items":4}"#);
        let parsed: SliceBudget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SliceBudget::items(4));
        assert!(serde_json::from_str::<SliceBudget>(r#"{"items":0}"#).is_err());
    }
}
