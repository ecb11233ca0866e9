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

//! The agent that settles sales and reports on money.
//!
//! Recorded sales wait in a [`BudgetedQueueProcessor`](kiosk_lanes::BudgetedQueueProcessor)
//! and are settled a bounded batch per tick, so a burst of sales never stalls
//! the host loop. Settled sales feed the profitability report.

mod agent;
mod report;

pub use agent::{gross_margins, BatchReport, DailyBalance, FinanceAgent, SaleReceipt};
pub use report::ProfitabilityRow;

use kiosk_core::{Cents, SliceBudget};
use kiosk_data::shop::SaleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the [`FinanceAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceSettings {
    /// Baseline budget of one settlement slice.
    pub settlement: SliceBudget,
    /// Sales with income strictly above this are "high value".
    pub high_value_threshold: Cents,
}

impl Default for FinanceSettings {
    fn default() -> Self {
        Self {
            settlement: SliceBudget::items(5),
            high_value_threshold: 5_000,
        }
    }
}

/// Errors raised while settling sales.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    /// A queued sale's totals disagree with its item lines. The sale was discarded.
    #[error("sale {sale_id} has totals that do not match its items")]
    CorruptSale {
        /// The discarded sale.
        sale_id: SaleId,
    },
}
