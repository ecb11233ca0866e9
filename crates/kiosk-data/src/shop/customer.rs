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

use crate::pool::Poolable;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Identifier assigned to a customer when it joins the queue.
pub type CustomerId = u32;

/// A pooled customer. Instances are recycled between visits, so every field is
/// overwritten by [`Customer::admit`] when the instance is reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Customer {
    /// Id of the current visit.
    pub id: CustomerId,
    /// Display name of the current visit.
    pub name: String,
    /// Item names ordered, in the order they were requested.
    pub order: Vec<String>,
    /// Time spent waiting in the queue so far.
    pub time_in_queue: Duration,
    active: bool,
}

impl Customer {
    /// Prepares a freshly acquired instance for a new visit.
    pub fn admit(&mut self, id: CustomerId, order: Vec<String>) {
        self.id = id;
        self.name = format!("Client {id}");
        self.order = order;
        self.time_in_queue = Duration::ZERO;
    }

    /// Whether the instance is currently checked out of its pool.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The first ordered item, used to classify the customer in reports.
    pub fn headline_item(&self) -> &str {
        self.order.first().map(String::as_str).unwrap_or("Unknown")
    }

    /// Whether any ordered item is missing from `available`.
    pub fn wants_unavailable(&self, available: &HashSet<String>) -> bool {
        self.order.iter().any(|item| !available.contains(item))
    }
}

impl Poolable for Customer {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.order.clear();
            self.time_in_queue = Duration::ZERO;
        }
    }
}
