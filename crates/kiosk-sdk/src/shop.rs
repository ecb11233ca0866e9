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

use crate::config::ShopConfig;
use crossbeam_channel::{bounded, Receiver};
use kiosk_agents::finance_agent::{BatchReport, DailyBalance, ProfitabilityRow, SaleReceipt};
use kiosk_agents::inventory_agent::{DangerRow, RestockOrder};
use kiosk_agents::queue_agent::{Departure, QueueHealthRow};
use kiosk_agents::{FinanceAgent, FinanceError, InventoryAgent, InventoryError, QueueAgent};
use kiosk_core::{Agent, AgentStatus, PoolError, ShopEvent, StrategyId, TickContext};
use kiosk_data::shop::{CustomerId, Product, ProductId, Sale};
use kiosk_lanes::ScanStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by [`Shop`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// The customer pool could not supply another customer.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A stock operation was rejected.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    /// A queued sale failed settlement and was discarded.
    #[error(transparent)]
    Finance(#[from] FinanceError),
}

/// What happened during one [`Shop::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The tick that just ran.
    pub tick: u64,
    /// Customers who gave up waiting this tick.
    pub departures: Vec<Departure>,
    /// State of the order-validation scan after this tick's slice.
    pub shortage_scan: ScanStatus,
    /// Sales still waiting for settlement.
    pub pending_sales: usize,
}

/// A snapshot of every report the shop produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopReports {
    /// Queue grouped by headline item, longest wait first.
    pub queue_health: Vec<QueueHealthRow>,
    /// Products grouped by danger zone, most severe first.
    pub danger: Vec<DangerRow>,
    /// Names of products at or below the low-stock ratio.
    pub low_stock: Vec<String>,
    /// Settled sales per category, most profitable first.
    pub profitability: Vec<ProfitabilityRow>,
    /// The most recent settled sales, newest first.
    pub recent_sales: Vec<Sale>,
    /// Settled sales above the configured high-value threshold.
    pub high_value_sales: Vec<Sale>,
    /// Income against spending.
    pub balance: DailyBalance,
}

/// The shop: one queue, one shelf, one till, advanced a tick at a time.
pub struct Shop {
    config: ShopConfig,
    queue: QueueAgent,
    inventory: InventoryAgent,
    finance: FinanceAgent,
    strategy: StrategyId,
    tick: u64,
}

impl Shop {
    /// Opens a shop stocked with `products`.
    ///
    /// Returns the shop and the receiving end of its event channel. Dropping
    /// the receiver is allowed; events are then discarded.
    pub fn new(config: ShopConfig, products: Vec<Product>) -> (Self, Receiver<ShopEvent>) {
        let (sender, receiver) = bounded(config.event_buffer.max(1));

        let mut shop = Self {
            queue: QueueAgent::new(config.queue).with_event_sender(sender.clone()),
            inventory: InventoryAgent::new(products, config.inventory)
                .with_event_sender(sender.clone()),
            finance: FinanceAgent::new(config.finance).with_event_sender(sender),
            strategy: config.strategy,
            config,
            tick: 0,
        };
        if shop.strategy != StrategyId::Balanced {
            shop.apply_strategy(shop.strategy);
        }

        log::info!(
            "Shop: opened with {} product(s) under {:?}",
            shop.inventory.products().len(),
            shop.strategy
        );
        (shop, receiver)
    }

    /// Puts a new customer with `order` at the back of the queue.
    pub fn admit_customer(&mut self, order: Vec<String>) -> Result<CustomerId, ShopError> {
        Ok(self.queue.admit(order)?)
    }

    /// Serves the customer at the counter.
    ///
    /// Every ordered item still on the shelf is sold; sold-out items are
    /// skipped. The sale is queued for settlement on a later tick. Returns
    /// `None` when nobody is queued.
    pub fn serve_next(&mut self) -> Result<Option<SaleReceipt>, ShopError> {
        let Some(served) = self.queue.serve_front() else {
            return Ok(None);
        };

        let mut sold = Vec::with_capacity(served.order.len());
        for name in &served.order {
            match self.inventory.take_one(name) {
                Some(item) => sold.push(item),
                None => log::warn!("Shop: {} wanted {}, none left", served.name, name),
            }
        }

        let receipt = self.finance.record_sale(sold, self.tick);
        log::info!(
            "Shop: served {} after {:?}, sale {} for {}",
            served.name,
            served.waited,
            receipt.sale_id,
            receipt.total_income
        );
        Ok(Some(receipt))
    }

    /// Sends the customer at the counter away without a sale.
    pub fn skip_next(&mut self) -> Option<Departure> {
        self.queue.skip_front()
    }

    /// Restocks a product and books its cost as an expense.
    pub fn restock(&mut self, product_id: ProductId, amount: u32) -> Result<RestockOrder, ShopError> {
        let order = self.inventory.restock(product_id, amount)?;
        self.finance.record_expense(order.total_cost);
        Ok(order)
    }

    /// Queues a sale recorded elsewhere, such as a second till, for
    /// settlement. Its totals are checked when it settles.
    pub fn import_sale(&mut self, sale: Sale) {
        self.finance.submit(sale);
    }

    /// Settles one slice of queued sales outside the tick cycle, such as at
    /// closing time. Unlike [`tick`](Self::tick), a corrupt sale is reported.
    pub fn settle(&mut self) -> Result<BatchReport, ShopError> {
        Ok(self.finance.close_batch()?)
    }

    /// Applies `strategy` to every agent.
    pub fn apply_strategy(&mut self, strategy: StrategyId) {
        self.strategy = strategy;
        for agent in self.agents_mut() {
            agent.apply_strategy(strategy);
        }
    }

    /// Advances the shop by `delta` of simulated time.
    ///
    /// Each agent runs its update in [`AgentId`](kiosk_core::AgentId) order,
    /// which settles one slice of sales, then one slice of the
    /// order-validation scan runs against the shelf as it now stands.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        let context = TickContext::new(self.tick, delta);
        for agent in self.agents_mut() {
            agent.update(&context);
        }

        let available = self.inventory.available_names();
        let shortage_scan = self.queue.poll_stock_shortage(&available);
        let report = TickReport {
            tick: self.tick,
            departures: self.queue.take_departures(),
            shortage_scan,
            pending_sales: self.finance.pending_len(),
        };
        log::trace!("Shop: {:?}", report);
        self.tick += 1;
        report
    }

    /// Builds every report from the current state.
    pub fn reports(&self) -> ShopReports {
        let threshold = self.config.finance.high_value_threshold;
        ShopReports {
            queue_health: self.queue.health_report(),
            danger: self.inventory.danger_report(),
            low_stock: self
                .inventory
                .low_stock_products()
                .into_iter()
                .map(|product| product.name.clone())
                .collect(),
            profitability: self.finance.profitability_report(),
            recent_sales: self
                .finance
                .top_recent(self.config.recent_sales)
                .cloned()
                .collect(),
            high_value_sales: self
                .finance
                .high_value_sales(threshold)
                .into_iter()
                .cloned()
                .collect(),
            balance: self.finance.daily_balance(),
        }
    }

    /// Status snapshot of every agent.
    pub fn statuses(&self) -> Vec<AgentStatus> {
        let agents: [&dyn Agent; 3] = [&self.queue, &self.inventory, &self.finance];
        agents.iter().map(|agent| agent.report_status()).collect()
    }

    /// The queue agent.
    pub fn queue(&self) -> &QueueAgent {
        &self.queue
    }

    /// The inventory agent.
    pub fn inventory(&self) -> &InventoryAgent {
        &self.inventory
    }

    /// The finance agent.
    pub fn finance(&self) -> &FinanceAgent {
        &self.finance
    }

    /// The strategy currently applied.
    pub fn strategy(&self) -> StrategyId {
        self.strategy
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// The configuration the shop was opened with.
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    fn agents_mut(&mut self) -> [&mut dyn Agent; 3] {
        [&mut self.queue, &mut self.inventory, &mut self.finance]
    }
}
