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

//! # Kiosk Agents
//!
//! The shop's subsystems. Each agent owns its slice of the shop state, maps
//! the host's [`StrategyId`](kiosk_core::StrategyId) onto concrete slice
//! budgets, and does a bounded amount of work every tick.

#![warn(missing_docs)]

pub mod finance_agent;
pub mod inventory_agent;
pub mod queue_agent;

mod sink;

pub use finance_agent::{FinanceAgent, FinanceError, FinanceSettings};
pub use inventory_agent::{InventoryAgent, InventoryError, InventorySettings};
pub use queue_agent::{QueueAgent, QueueSettings};
pub use sink::EventSink;
