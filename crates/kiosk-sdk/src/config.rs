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

//! Shop configuration, loaded from and saved to JSON.

use kiosk_agents::{FinanceSettings, InventorySettings, QueueSettings};
use kiosk_core::StrategyId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or saving a [`ShopConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The contents are not a valid configuration.
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to open a [`Shop`](crate::Shop).
///
/// Missing fields take their default values, so a partial file such as
/// `{"strategy": "low_power"}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Customer queue settings.
    pub queue: QueueSettings,
    /// Stock settings.
    pub inventory: InventorySettings,
    /// Settlement settings.
    pub finance: FinanceSettings,
    /// Strategy applied to every agent when the shop opens.
    pub strategy: StrategyId,
    /// Capacity of the event channel. Events are dropped while it is full.
    pub event_buffer: usize,
    /// Number of sales listed in the recent-sales report.
    pub recent_sales: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            queue: QueueSettings::default(),
            inventory: InventorySettings::default(),
            finance: FinanceSettings::default(),
            strategy: StrategyId::Balanced,
            event_buffer: 256,
            recent_sales: 3,
        }
    }
}

impl ShopConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
