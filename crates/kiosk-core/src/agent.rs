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

//! Traits and types for the shop's autonomous subsystems (Agents).
//!
//! Each subsystem (customer queue, inventory, finance) owns its state and
//! performs a bounded amount of work per tick. The host driver pushes a coarse
//! [`StrategyId`] to every agent, which translates it into concrete slice
//! budgets, and polls [`AgentStatus`] snapshots for reporting.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for shop agents, in default update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentId {
    /// Customer queue and patience tracking.
    Queue,
    /// Stock levels and restocking.
    Inventory,
    /// Sale settlement and profitability.
    Finance,
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Coarse budget level applied to every agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    /// A quarter of the baseline budget.
    LowPower,
    /// The configured baseline budget.
    #[default]
    Balanced,
    /// Three times the baseline budget.
    HighPerformance,
    /// An explicit per-slice item count.
    Custom(u32),
}

/// Per-tick input handed to every agent by the host driver.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Monotonic tick counter, starting at zero.
    pub tick: u64,
    /// Simulated time elapsed since the previous tick.
    pub delta: Duration,
}

impl TickContext {
    /// Creates the context for tick number `tick`.
    pub fn new(tick: u64, delta: Duration) -> Self {
        Self { tick, delta }
    }
}

/// A snapshot of an agent's backlog and health.
#[derive(Debug, Clone)]
pub struct AgentStatus {
    /// The reporting agent.
    pub agent_id: AgentId,
    /// The strategy currently applied.
    pub current_strategy: StrategyId,
    /// Health score (0.0 to 1.0). 1.0 means no backlog.
    pub health_score: f32,
    /// Units of work still waiting for a future slice.
    pub backlog: usize,
    /// Human-readable status message.
    pub message: String,
}

/// The interface every shop subsystem implements.
pub trait Agent {
    /// Returns the unique identifier for this agent.
    fn id(&self) -> AgentId;

    /// Applies a new strategy, adjusting the agent's slice budgets.
    fn apply_strategy(&mut self, strategy: StrategyId);

    /// Performs this tick's bounded share of work.
    fn update(&mut self, context: &TickContext);

    /// Reports the current status and health of the agent.
    fn report_status(&self) -> AgentStatus;
}

/// Maps a backlog size to a health score.
pub fn health_from_backlog(backlog: usize) -> f32 {
    match backlog {
        0 => 1.0,
        1..=99 => 0.8,
        100..=499 => 0.5,
        _ => 0.2,
    }
}
