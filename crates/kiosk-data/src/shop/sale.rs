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

use super::product::{Product, ProductId};
use kiosk_core::Cents;
use serde::Serialize;

/// Identifier of a recorded sale.
pub type SaleId = u32;

/// One unit sold, with the prices in force at the time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoldItem {
    /// The product sold.
    pub product_id: ProductId,
    /// Product name at the time of sale.
    pub name: String,
    /// Product category at the time of sale.
    pub category: String,
    /// Income from this unit.
    pub sell_price: Cents,
    /// Cost of replacing this unit.
    pub restock_cost: Cents,
}

impl From<&Product> for SoldItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            sell_price: product.sell_price,
            restock_cost: product.restock_cost,
        }
    }
}

/// A transaction awaiting or past settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    /// Sale id, unique per shop session.
    pub id: SaleId,
    /// Units sold.
    pub items: Vec<SoldItem>,
    /// Sum of the items' sell prices.
    pub total_income: Cents,
    /// Sum of the items' restock costs.
    pub total_cost: Cents,
    /// Shop tick at which the sale was recorded.
    pub recorded_at: u64,
}

impl Sale {
    /// Builds a sale whose totals are computed from `items`.
    pub fn from_items(id: SaleId, items: Vec<SoldItem>, recorded_at: u64) -> Self {
        let total_income = items.iter().map(|item| item.sell_price).sum();
        let total_cost = items.iter().map(|item| item.restock_cost).sum();
        Self {
            id,
            items,
            total_income,
            total_cost,
            recorded_at,
        }
    }

    /// Income minus restock cost.
    pub fn net_profit(&self) -> Cents {
        self.total_income - self.total_cost
    }

    /// Whether the stored totals agree with the item lines.
    pub fn totals_match(&self) -> bool {
        let income: Cents = self.items.iter().map(|item| item.sell_price).sum();
        let cost: Cents = self.items.iter().map(|item| item.restock_cost).sum();
        income == self.total_income && cost == self.total_cost
    }
}
