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

use kiosk_core::Cents;
use serde::{Deserialize, Serialize};

/// Identifier of a catalogue product.
pub type ProductId = u32;

/// A stocked product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalogue id.
    pub id: ProductId,
    /// Display name, also used in customer orders.
    pub name: String,
    /// Reporting category (e.g. "Metal", "Tool").
    pub category: String,
    /// Price charged per unit.
    pub sell_price: Cents,
    /// Cost of buying one unit back in.
    pub restock_cost: Cents,
    /// Shelf capacity.
    pub max_stock: u32,
    /// Units on the shelf.
    pub current_stock: u32,
}

impl Product {
    /// Current stock as a fraction of capacity. A product without capacity
    /// reports `0.0`.
    pub fn stock_ratio(&self) -> f32 {
        if self.max_stock == 0 {
            return 0.0;
        }
        self.current_stock as f32 / self.max_stock as f32
    }

    /// Whether at least one unit is on the shelf.
    pub fn in_stock(&self) -> bool {
        self.current_stock > 0
    }
}

/// A supplier and the product lines it delivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Supplier name.
    pub name: String,
    /// Ids of the products this supplier delivers.
    pub supplied: Vec<ProductId>,
}
