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

//! # Kiosk Core
//!
//! Foundational crate containing the slice budgets, agent contracts, events,
//! and error types shared by every other crate of the shop simulation.

#![warn(missing_docs)]

pub mod agent;
pub mod budget;
pub mod error;
pub mod event;
pub mod utils;

pub use agent::{Agent, AgentId, AgentStatus, StrategyId, TickContext};
pub use budget::{BudgetMeter, SliceBudget};
pub use error::PoolError;
pub use event::{DepartureReason, ShopEvent};
pub use utils::timer::Stopwatch;

/// Money amounts, in integer cents.
pub type Cents = i64;
