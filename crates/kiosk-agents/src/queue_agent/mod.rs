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

//! The agent that owns the customer queue.
//!
//! Customers are recycled through a [`ResourcePool`](kiosk_data::ResourcePool)
//! rather than built per visit. Every tick the agent ages the queue and sends
//! impatient customers home. On request it runs a budgeted order-validation
//! scan that looks for the first customer asking for something out of stock.

mod agent;
mod report;

pub use agent::{Departure, QueueAgent, ServedCustomer};
pub use report::QueueHealthRow;

use kiosk_core::{Cents, SliceBudget};
use kiosk_data::PoolSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the [`QueueAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    /// Customer pool sizing.
    pub pool: PoolSettings,
    /// Seconds a customer waits before leaving.
    pub max_patience_secs: f32,
    /// Revenue counted as lost when a customer leaves impatient.
    pub impatience_loss: Cents,
    /// Baseline budget of the stock-shortage scan, per call.
    pub shortage_scan: SliceBudget,
}

impl QueueSettings {
    /// The patience limit as a [`Duration`]. Negative and NaN values clamp
    /// to zero; values too large for a `Duration` mean unlimited patience.
    pub fn max_patience(&self) -> Duration {
        Duration::try_from_secs_f32(self.max_patience_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            pool: PoolSettings::default(),
            max_patience_secs: 30.0,
            impatience_loss: 2_000,
            shortage_scan: SliceBudget::items(8),
        }
    }
}
