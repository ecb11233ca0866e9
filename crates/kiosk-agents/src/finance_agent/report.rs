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

//! Profitability per product category.

use kiosk_core::Cents;
use kiosk_data::shop::SoldItem;
use kiosk_data::{CategoryAggregator, RankOrder};
use serde::Serialize;

/// One category of the profitability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitabilityRow {
    /// Product category.
    pub category: String,
    /// Units sold in the category.
    pub units: usize,
    /// Income from the category.
    pub total_income: Cents,
    /// Restock cost of the units sold.
    pub total_cost: Cents,
    /// Income minus cost.
    pub net_profit: Cents,
}

pub(super) type ProfitabilityAggregator =
    CategoryAggregator<'static, SoldItem, String, (Cents, Cents), ProfitabilityRow>;

/// Groups sold units by category, most profitable first.
pub(super) fn profitability_aggregator() -> ProfitabilityAggregator {
    CategoryAggregator::new(
        |item: &SoldItem| item.category.clone(),
        || (0, 0),
        |(income, cost): (Cents, Cents), item: &SoldItem| {
            (income + item.sell_price, cost + item.restock_cost)
        },
        |category, (total_income, total_cost), units| ProfitabilityRow {
            category,
            units,
            total_income,
            total_cost,
            net_profit: total_income - total_cost,
        },
    )
    .ranked_by(|row: &ProfitabilityRow| row.net_profit, RankOrder::Descending)
}
