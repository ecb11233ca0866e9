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

use super::report::{queue_health_aggregator, QueueHealthAggregator, QueueHealthRow};
use super::QueueSettings;
use crate::sink::EventSink;
use crossbeam_channel::Sender;
use kiosk_core::agent::health_from_backlog;
use kiosk_core::{
    Agent, AgentId, AgentStatus, Cents, DepartureReason, PoolError, ShopEvent, SliceBudget,
    StrategyId, TickContext,
};
use kiosk_data::shop::{Customer, CustomerId};
use kiosk_data::{PoolStats, ResourcePool};
use kiosk_lanes::{EarlyExitScanner, ScanStatus};
use std::collections::HashSet;
use std::time::Duration;

const FIRST_CUSTOMER_ID: CustomerId = 1000;

/// What the counter learns about a customer it served.
#[derive(Debug, Clone, PartialEq)]
pub struct ServedCustomer {
    /// The customer's id.
    pub customer_id: CustomerId,
    /// The customer's display name.
    pub name: String,
    /// Time spent in the queue.
    pub waited: Duration,
    /// The items ordered.
    pub order: Vec<String>,
}

/// A record of a customer leaving without buying.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// The customer's id.
    pub customer_id: CustomerId,
    /// The customer's display name.
    pub name: String,
    /// Why the customer left.
    pub reason: DepartureReason,
    /// Revenue estimated lost.
    pub estimated_loss: Cents,
}

/// The agent responsible for the customer queue.
pub struct QueueAgent {
    pool: ResourcePool<Customer>,
    queue: Vec<Customer>,
    next_id: CustomerId,
    settings: QueueSettings,
    shortage_scanner: EarlyExitScanner,
    health: QueueHealthAggregator,
    current_strategy: StrategyId,
    departures: Vec<Departure>,
    last_shortage: Option<bool>,
    events: EventSink,
}

impl QueueAgent {
    /// Creates the agent and pre-populates its customer pool.
    pub fn new(settings: QueueSettings) -> Self {
        Self {
            pool: ResourcePool::with_poolable("customers", Customer::default, settings.pool),
            queue: Vec::new(),
            next_id: FIRST_CUSTOMER_ID,
            shortage_scanner: EarlyExitScanner::new(settings.shortage_scan),
            settings,
            health: queue_health_aggregator(),
            current_strategy: StrategyId::Balanced,
            departures: Vec::new(),
            last_shortage: None,
            events: EventSink::default(),
        }
    }

    /// Attaches an event channel.
    pub fn with_event_sender(mut self, sender: Sender<ShopEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    /// Takes a customer from the pool and puts it at the back of the queue.
    pub fn admit(&mut self, order: Vec<String>) -> Result<CustomerId, PoolError> {
        let mut customer = self.pool.acquire()?;
        let id = self.next_id;
        self.next_id += 1;
        customer.admit(id, order);
        log::debug!("QueueAgent: {} joined ({} item(s))", customer.name, customer.order.len());
        self.queue.push(customer);
        self.events.emit(ShopEvent::CustomerAdmitted { customer_id: id });
        Ok(id)
    }

    /// Serves the customer at the counter and returns it to the pool.
    pub fn serve_front(&mut self) -> Option<ServedCustomer> {
        let mut customer = self.pop_front()?;
        let served = ServedCustomer {
            customer_id: customer.id,
            name: std::mem::take(&mut customer.name),
            waited: customer.time_in_queue,
            order: std::mem::take(&mut customer.order),
        };
        self.pool.release(customer);
        self.events.emit(ShopEvent::CustomerServed {
            customer_id: served.customer_id,
            waited: served.waited,
        });
        Some(served)
    }

    /// Sends the customer at the counter away without a sale.
    pub fn skip_front(&mut self) -> Option<Departure> {
        let customer = self.pop_front()?;
        Some(self.depart(customer, DepartureReason::Skipped, 0))
    }

    /// Customers queued, front first.
    pub fn customers(&self) -> &[Customer] {
        &self.queue
    }

    /// The customer at the counter.
    pub fn front(&self) -> Option<&Customer> {
        self.queue.first()
    }

    /// Number of queued customers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nobody is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Customers who have waited strictly longer than `max_wait`.
    pub fn angry_customers(&self, max_wait: Duration) -> impl Iterator<Item = &Customer> {
        self.queue
            .iter()
            .filter(move |customer| customer.time_in_queue > max_wait)
    }

    /// The queue ordered by order size, largest first. Equal sizes keep queue order.
    pub fn priority_order(&self) -> Vec<&Customer> {
        let mut ordered: Vec<&Customer> = self.queue.iter().collect();
        ordered.sort_by(|a, b| b.order.len().cmp(&a.order.len()));
        ordered
    }

    /// The customer with the largest non-empty order.
    pub fn next_priority_client(&self) -> Option<CustomerId> {
        self.priority_order()
            .into_iter()
            .find(|customer| !customer.order.is_empty())
            .map(|customer| customer.id)
    }

    /// Groups the queue by headline item, longest average wait first.
    pub fn health_report(&self) -> Vec<QueueHealthRow> {
        self.health.aggregate(&self.queue)
    }

    /// Advances the order-validation scan by one slice.
    ///
    /// Looks for the first queued customer whose order names an item missing
    /// from `available`. The run's outcome is kept in
    /// [`last_shortage`](Self::last_shortage).
    pub fn poll_stock_shortage(&mut self, available: &HashSet<String>) -> ScanStatus {
        let status = self
            .shortage_scanner
            .scan(&self.queue, |customer| customer.wants_unavailable(available));

        match status {
            ScanStatus::Found { index } => {
                let customer = &self.queue[index];
                log::warn!(
                    "QueueAgent: {} ordered an item that is out of stock",
                    customer.name
                );
                self.last_shortage = Some(true);
                self.events.emit(ShopEvent::StockShortage {
                    customer_id: customer.id,
                });
            }
            ScanStatus::NotFound => self.last_shortage = Some(false),
            ScanStatus::Pending { .. } => {}
        }
        status
    }

    /// Outcome of the last finished shortage scan, if any has finished.
    pub fn last_shortage(&self) -> Option<bool> {
        self.last_shortage
    }

    /// Returns and clears the departures recorded since the last call.
    pub fn take_departures(&mut self) -> Vec<Departure> {
        std::mem::take(&mut self.departures)
    }

    /// Counters of the customer pool.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// The settings the agent was built with.
    pub fn settings(&self) -> &QueueSettings {
        &self.settings
    }

    fn pop_front(&mut self) -> Option<Customer> {
        if self.queue.is_empty() {
            return None;
        }
        // Indices shift; a paused scan would skip a customer.
        self.shortage_scanner.reset();
        Some(self.queue.remove(0))
    }

    fn depart(&mut self, customer: Customer, reason: DepartureReason, loss: Cents) -> Departure {
        let departure = Departure {
            customer_id: customer.id,
            name: customer.name.clone(),
            reason,
            estimated_loss: loss,
        };
        log::info!(
            "QueueAgent: {} left ({:?}, estimated loss {})",
            departure.name,
            reason,
            loss
        );
        self.pool.release(customer);
        self.events.emit(ShopEvent::CustomerLeft {
            customer_id: departure.customer_id,
            name: departure.name.clone(),
            reason,
            estimated_loss: loss,
        });
        self.departures.push(departure.clone());
        departure
    }

    fn evict_impatient(&mut self) {
        let max_wait = self.settings.max_patience();
        if self.angry_customers(max_wait).next().is_none() {
            return;
        }

        self.shortage_scanner.reset();
        let (leaving, staying): (Vec<Customer>, Vec<Customer>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|customer| customer.time_in_queue > max_wait);
        self.queue = staying;

        let loss = self.settings.impatience_loss;
        for customer in leaving {
            self.depart(customer, DepartureReason::Impatience, loss);
        }
    }
}

impl Agent for QueueAgent {
    fn id(&self) -> AgentId {
        AgentId::Queue
    }

    fn apply_strategy(&mut self, strategy: StrategyId) {
        log::info!("QueueAgent: Strategy update to {:?}", strategy);
        self.current_strategy = strategy;
        let budget: SliceBudget = self.settings.shortage_scan.scaled_for(strategy);
        self.shortage_scanner.reconfigure(budget);
    }

    fn update(&mut self, context: &TickContext) {
        for customer in &mut self.queue {
            customer.time_in_queue = customer.time_in_queue.saturating_add(context.delta);
        }
        self.evict_impatient();
    }

    fn report_status(&self) -> AgentStatus {
        let stats = self.pool.stats();
        AgentStatus {
            agent_id: self.id(),
            current_strategy: self.current_strategy,
            health_score: health_from_backlog(self.queue.len()),
            backlog: self.queue.len(),
            message: format!(
                "queued={} pooled_available={} pooled_in_use={} shortage={:?}",
                self.queue.len(),
                stats.available,
                stats.in_use,
                self.last_shortage,
            ),
        }
    }
}
