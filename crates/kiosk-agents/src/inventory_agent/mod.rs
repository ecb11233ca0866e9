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

//! The agent that owns stock levels.
//!
//! Besides selling and restocking, the agent runs a budgeted stock-health scan
//! every tick that raises an alert for the first product at or below the
//! low-stock ratio, and produces the danger-zone report.

mod agent;
mod report;

pub use agent::{InventoryAgent, RestockOrder};
pub use report::{DangerRow, DangerZone};

use kiosk_core::SliceBudget;
use kiosk_data::shop::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the [`InventoryAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Stock ratio at or below which a product counts as running low.
    pub low_stock_ratio: f32,
    /// Baseline budget of the stock-health scan, per tick.
    pub stock_scan: SliceBudget,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_ratio: 0.75,
            stock_scan: SliceBudget::items(4),
        }
    }
}

/// Errors raised by inventory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No product with this id is stocked.
    #[error("unknown product id {0}")]
    UnknownProduct(ProductId),
    /// A restock request asked for zero units.
    #[error("restock of product {product_id} requested zero units")]
    ZeroAmount {
        /// The product the request named.
        product_id: ProductId,
    },
}
