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

//! The public-facing API of the kiosk shop simulation.
//!
//! [`Shop`] owns one instance of every agent, routes customer actions between
//! them, and advances the whole shop one tick at a time. Hosts configure it
//! with a [`ShopConfig`] and read the results through [`ShopReports`] and the
//! [`ShopEvent`](kiosk_core::ShopEvent) channel returned by [`Shop::new`].

#![warn(missing_docs)]

pub mod catalogue;
pub mod config;
mod shop;

pub use config::{ConfigError, ShopConfig};
pub use shop::{Shop, ShopError, ShopReports, TickReport};

/// Types most hosts need, in one import.
pub mod prelude {
    pub use crate::catalogue::{sample_catalogue, sample_providers};
    pub use crate::{Shop, ShopConfig, ShopError, ShopReports, TickReport};
    pub use kiosk_core::{AgentStatus, Cents, ShopEvent, SliceBudget, StrategyId};
    pub use kiosk_data::shop::{Product, ProductId, Provider};
}
