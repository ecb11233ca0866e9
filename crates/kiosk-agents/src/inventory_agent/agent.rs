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

use super::report::{danger_aggregator, DangerAggregator, DangerRow, DangerZone};
use super::{InventoryError, InventorySettings};
use crate::sink::EventSink;
use crossbeam_channel::Sender;
use kiosk_core::{Agent, AgentId, AgentStatus, Cents, ShopEvent, StrategyId, TickContext};
use kiosk_data::shop::{Product, ProductId, Provider, SoldItem};
use kiosk_lanes::{EarlyExitScanner, ScanStatus};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A completed restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockOrder {
    /// The restocked product.
    pub product_id: ProductId,
    /// Its name.
    pub name: String,
    /// Its category.
    pub category: String,
    /// Units added.
    pub amount: u32,
    /// `amount` times the unit restock cost.
    pub total_cost: Cents,
}

/// The agent responsible for stock levels.
pub struct InventoryAgent {
    products: Vec<Product>,
    settings: InventorySettings,
    stock_scanner: EarlyExitScanner,
    danger: DangerAggregator,
    restocks: Vec<RestockOrder>,
    current_strategy: StrategyId,
    last_alert: Option<ProductId>,
    events: EventSink,
}

impl InventoryAgent {
    /// Creates the agent over an initial product list.
    pub fn new(products: Vec<Product>, settings: InventorySettings) -> Self {
        Self {
            products,
            stock_scanner: EarlyExitScanner::new(settings.stock_scan),
            settings,
            danger: danger_aggregator(),
            restocks: Vec::new(),
            current_strategy: StrategyId::Balanced,
            last_alert: None,
            events: EventSink::default(),
        }
    }

    /// Attaches an event channel.
    pub fn with_event_sender(mut self, sender: Sender<ShopEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    /// All stocked products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Looks a product up by name.
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }

    /// Takes one unit of `name` off the shelf. `None` if unknown or sold out.
    pub fn take_one(&mut self, name: &str) -> Option<SoldItem> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.name == name && product.in_stock())?;
        product.current_stock -= 1;
        Some(SoldItem::from(&*product))
    }

    /// Names of the products with at least one unit on the shelf.
    pub fn available_names(&self) -> HashSet<String> {
        self.products
            .iter()
            .filter(|product| product.in_stock())
            .map(|product| product.name.clone())
            .collect()
    }

    /// Products grouped into danger zones, most severe zone first.
    pub fn danger_report(&self) -> Vec<DangerRow> {
        self.danger.aggregate(&self.products)
    }

    /// Products in descending stock order, skipping the leading run whose
    /// stock ratio is above the low-stock ratio.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        let mut ordered: Vec<&Product> = self.products.iter().collect();
        ordered.sort_by(|a, b| b.current_stock.cmp(&a.current_stock));
        ordered
            .into_iter()
            .skip_while(|product| product.stock_ratio() > self.settings.low_stock_ratio)
            .collect()
    }

    /// Products in the critical zone.
    pub fn critical_products(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|product| DangerZone::classify(product.stock_ratio()) == DangerZone::Critical)
    }

    /// Advances the stock-health scan by one slice.
    ///
    /// A finished run that found a low product raises an alert, once per
    /// product until a run comes back clean or finds a different product.
    pub fn poll_low_stock(&mut self) -> ScanStatus {
        let threshold = self.settings.low_stock_ratio;
        let status = self
            .stock_scanner
            .scan(&self.products, |product| product.stock_ratio() <= threshold);

        match status {
            ScanStatus::Found { index } => {
                let product = &self.products[index];
                if self.last_alert != Some(product.id) {
                    log::warn!(
                        "InventoryAgent: low stock on {} ({}/{})",
                        product.name,
                        product.current_stock,
                        product.max_stock,
                    );
                    self.events.emit(ShopEvent::LowStock {
                        product_id: product.id,
                        name: product.name.clone(),
                        stock_ratio: product.stock_ratio(),
                    });
                    self.last_alert = Some(product.id);
                }
            }
            ScanStatus::NotFound => self.last_alert = None,
            ScanStatus::Pending { .. } => {}
        }
        status
    }

    /// Product currently flagged by the stock-health scan.
    pub fn last_alert(&self) -> Option<ProductId> {
        self.last_alert
    }

    /// Adds `amount` units of a product to the shelf.
    pub fn restock(
        &mut self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<RestockOrder, InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount { product_id });
        }
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
            .ok_or(InventoryError::UnknownProduct(product_id))?;

        product.current_stock = product.current_stock.saturating_add(amount);
        let order = RestockOrder {
            product_id,
            name: product.name.clone(),
            category: product.category.clone(),
            amount,
            total_cost: Cents::from(amount) * product.restock_cost,
        };

        log::info!(
            "InventoryAgent: restocked {} x{} for {}",
            order.name,
            order.amount,
            order.total_cost
        );
        self.events.emit(ShopEvent::Restocked {
            product_id,
            amount,
            total_cost: order.total_cost,
        });
        self.restocks.push(order.clone());
        Ok(order)
    }

    /// Restocks performed so far, oldest first.
    pub fn restock_log(&self) -> &[RestockOrder] {
        &self.restocks
    }

    /// Current stock of every restocked product now above half capacity.
    pub fn restocked_map(&self) -> HashMap<ProductId, u32> {
        let restocked: HashSet<ProductId> =
            self.restocks.iter().map(|order| order.product_id).collect();
        self.products
            .iter()
            .filter(|product| restocked.contains(&product.id))
            .filter(|product| u64::from(product.current_stock) * 2 > u64::from(product.max_stock))
            .map(|product| (product.id, product.current_stock))
            .collect()
    }

    /// Every stocked product the given providers supply, in provider order.
    /// Ids no product matches are skipped.
    pub fn catalogue<'a>(&'a self, providers: &'a [Provider]) -> impl Iterator<Item = &'a Product> {
        providers
            .iter()
            .flat_map(|provider| provider.supplied.iter())
            .filter_map(move |id| self.product(*id))
    }
}

impl Agent for InventoryAgent {
    fn id(&self) -> AgentId {
        AgentId::Inventory
    }

    fn apply_strategy(&mut self, strategy: StrategyId) {
        log::info!("InventoryAgent: Strategy update to {:?}", strategy);
        self.current_strategy = strategy;
        self.stock_scanner
            .reconfigure(self.settings.stock_scan.scaled_for(strategy));
    }

    fn update(&mut self, _context: &TickContext) {
        self.poll_low_stock();
    }

    fn report_status(&self) -> AgentStatus {
        let critical = self.critical_products().count();
        AgentStatus {
            agent_id: self.id(),
            current_strategy: self.current_strategy,
            health_score: if critical == 0 { 1.0 } else { 0.5 },
            backlog: critical,
            message: format!(
                "products={} critical={} restocks={} alert={:?}",
                self.products.len(),
                critical,
                self.restocks.len(),
                self.last_alert,
            ),
        }
    }
}
