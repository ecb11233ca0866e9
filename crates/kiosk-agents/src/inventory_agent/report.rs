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

//! Stock danger zones.

use kiosk_data::shop::Product;
use kiosk_data::{CategoryAggregator, RankOrder};
use serde::Serialize;

const CRITICAL_RATIO: f32 = 0.10;
const LOW_RATIO: f32 = 0.50;

/// How close a product is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DangerZone {
    /// At or below 10% of capacity.
    Critical,
    /// At or below 50% of capacity.
    Low,
    /// Above 50% of capacity.
    Normal,
}

impl DangerZone {
    /// Classifies a stock ratio.
    pub fn classify(stock_ratio: f32) -> Self {
        if stock_ratio <= CRITICAL_RATIO {
            DangerZone::Critical
        } else if stock_ratio <= LOW_RATIO {
            DangerZone::Low
        } else {
            DangerZone::Normal
        }
    }
}

/// One zone of the danger report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DangerRow {
    /// The zone.
    pub zone: DangerZone,
    /// Products in the zone.
    pub products: usize,
    /// Mean stock level of the zone, in percent of capacity.
    pub average_stock_rate: f32,
}

pub(super) type DangerAggregator = CategoryAggregator<'static, Product, DangerZone, f32, DangerRow>;

/// Groups by zone, most severe first.
pub(super) fn danger_aggregator() -> DangerAggregator {
    CategoryAggregator::new(
        |product: &Product| DangerZone::classify(product.stock_ratio()),
        || 0.0f32,
        |sum: f32, product: &Product| sum + product.stock_ratio(),
        |zone, sum, products| DangerRow {
            zone,
            products,
            average_stock_rate: sum / products as f32 * 100.0,
        },
    )
    .ranked_by(|row: &DangerRow| row.zone, RankOrder::Ascending)
}
