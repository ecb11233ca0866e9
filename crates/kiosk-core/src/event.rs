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

//! Notifications emitted by agents for external report consumers.

use crate::Cents;
use serde::Serialize;
use std::time::Duration;

/// Why a customer left the queue without being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DepartureReason {
    /// The customer waited longer than the patience limit.
    Impatience,
    /// The operator skipped the customer.
    Skipped,
}

/// An event describing something that happened in the shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ShopEvent {
    /// A customer joined the queue.
    CustomerAdmitted {
        /// The customer's id.
        customer_id: u32,
    },
    /// A customer was served at the counter.
    CustomerServed {
        /// The customer's id.
        customer_id: u32,
        /// How long the customer waited.
        waited: Duration,
    },
    /// A customer left without buying.
    CustomerLeft {
        /// The customer's id.
        customer_id: u32,
        /// The customer's display name.
        name: String,
        /// Why the customer left.
        reason: DepartureReason,
        /// Revenue estimated lost by the departure.
        estimated_loss: Cents,
    },
    /// A sale was recorded and queued for settlement.
    SaleRecorded {
        /// The sale's id.
        sale_id: u32,
        /// Gross income of the sale.
        total_income: Cents,
        /// Income minus restock cost.
        net_profit: Cents,
    },
    /// A settlement slice finished.
    BatchClosed {
        /// Sales settled in this slice.
        processed: usize,
        /// Sales still waiting.
        pending: usize,
    },
    /// A queued sale failed validation and was discarded.
    SaleRejected {
        /// The sale's id.
        sale_id: u32,
    },
    /// A product fell to or below the low-stock threshold.
    LowStock {
        /// The product's id.
        product_id: u32,
        /// The product's name.
        name: String,
        /// Current stock divided by capacity.
        stock_ratio: f32,
    },
    /// A queued customer ordered something that is out of stock.
    StockShortage {
        /// The first customer found with an unavailable item.
        customer_id: u32,
    },
    /// A product was restocked.
    Restocked {
        /// The product's id.
        product_id: u32,
        /// Units added.
        amount: u32,
        /// Cost of the restock.
        total_cost: Cents,
    },
}
