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

//! # Kiosk Data
//!
//! Data-side building blocks of the shop: the recycling [`pool::ResourcePool`],
//! the grouping [`aggregate::CategoryAggregator`], and the plain records
//! (customers, products, sales) the agents operate on.

#![warn(missing_docs)]

pub mod aggregate;
pub mod pool;
pub mod shop;

pub use aggregate::{aggregate, CategoryAggregator, RankOrder};
pub use pool::{PoolSettings, PoolStats, Poolable, ResourcePool};
