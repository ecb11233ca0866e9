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

//! Queue health: customers grouped by the first item they asked for.

use kiosk_data::shop::Customer;
use kiosk_data::{CategoryAggregator, RankOrder};
use serde::Serialize;
use std::time::Duration;

/// One group of the queue health report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueHealthRow {
    /// The first ordered item shared by the group (`"Unknown"` for empty orders).
    pub headline_item: String,
    /// Customers in the group.
    pub customers: usize,
    /// Mean time the group has been waiting.
    pub average_wait: Duration,
}

pub(super) type QueueHealthAggregator =
    CategoryAggregator<'static, Customer, String, Duration, QueueHealthRow>;

/// Groups by headline item and ranks the longest average wait first.
pub(super) fn queue_health_aggregator() -> QueueHealthAggregator {
    CategoryAggregator::new(
        |customer: &Customer| customer.headline_item().to_owned(),
        || Duration::ZERO,
        |total: Duration, customer: &Customer| total + customer.time_in_queue,
        |headline_item, total, customers| QueueHealthRow {
            headline_item,
            customers,
            average_wait: total / customers as u32,
        },
    )
    .ranked_by(|row: &QueueHealthRow| row.average_wait, RankOrder::Descending)
}
