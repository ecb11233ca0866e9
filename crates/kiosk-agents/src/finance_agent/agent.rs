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

use super::report::{profitability_aggregator, ProfitabilityAggregator, ProfitabilityRow};
use super::{FinanceError, FinanceSettings};
use crate::sink::EventSink;
use crossbeam_channel::Sender;
use kiosk_core::agent::health_from_backlog;
use kiosk_core::{Agent, AgentId, AgentStatus, Cents, ShopEvent, StrategyId, TickContext};
use kiosk_data::shop::{Sale, SaleId, SoldItem};
use kiosk_lanes::{BudgetedQueueProcessor, SliceProgress};
use serde::Serialize;

/// Summary returned when a sale is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaleReceipt {
    /// The new sale's id.
    pub sale_id: SaleId,
    /// Gross income.
    pub total_income: Cents,
    /// Income minus restock cost.
    pub net_profit: Cents,
}

/// Outcome of one settlement slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Sales settled in this slice.
    pub settled: usize,
    /// Sales still waiting.
    pub pending: usize,
    /// Whether sales remain queued.
    pub progress: SliceProgress,
}

/// Income and spending over the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DailyBalance {
    /// Income of settled sales.
    pub income: Cents,
    /// Recorded expenses (restocks).
    pub spending: Cents,
}

impl DailyBalance {
    /// Income minus spending.
    pub fn net(&self) -> Cents {
        self.income - self.spending
    }
}

/// Per-item margin of two parallel price lists. Extra entries in the longer
/// list are ignored.
pub fn gross_margins(sell_prices: &[Cents], restock_costs: &[Cents]) -> Vec<Cents> {
    sell_prices
        .iter()
        .zip(restock_costs)
        .map(|(price, cost)| price - cost)
        .collect()
}

/// The agent responsible for settling sales.
pub struct FinanceAgent {
    pending: BudgetedQueueProcessor<Sale>,
    completed: Vec<Sale>,
    expenses: Vec<Cents>,
    next_sale_id: SaleId,
    settings: FinanceSettings,
    profitability: ProfitabilityAggregator,
    current_strategy: StrategyId,
    rejected: u64,
    last_settled: usize,
    events: EventSink,
}

impl FinanceAgent {
    /// Creates an agent with no sales.
    pub fn new(settings: FinanceSettings) -> Self {
        Self {
            pending: BudgetedQueueProcessor::new(settings.settlement),
            completed: Vec::new(),
            expenses: Vec::new(),
            next_sale_id: 1,
            settings,
            profitability: profitability_aggregator(),
            current_strategy: StrategyId::Balanced,
            rejected: 0,
            last_settled: 0,
            events: EventSink::default(),
        }
    }

    /// Attaches an event channel.
    pub fn with_event_sender(mut self, sender: Sender<ShopEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    /// Records a sale of `items` at tick `tick` and queues it for settlement.
    pub fn record_sale(&mut self, items: Vec<SoldItem>, tick: u64) -> SaleReceipt {
        let sale = Sale::from_items(self.next_sale_id, items, tick);
        let receipt = SaleReceipt {
            sale_id: sale.id,
            total_income: sale.total_income,
            net_profit: sale.net_profit(),
        };
        self.submit(sale);
        self.events.emit(ShopEvent::SaleRecorded {
            sale_id: receipt.sale_id,
            total_income: receipt.total_income,
            net_profit: receipt.net_profit,
        });
        receipt
    }

    /// Queues an externally built sale for settlement.
    pub fn submit(&mut self, sale: Sale) {
        self.next_sale_id = self.next_sale_id.max(sale.id.saturating_add(1));
        self.pending.enqueue(sale);
    }

    /// Settles one budgeted batch of queued sales.
    ///
    /// A sale whose totals do not match its items is discarded and ends the
    /// batch with [`FinanceError::CorruptSale`]; sales behind it stay queued.
    pub fn close_batch(&mut self) -> Result<BatchReport, FinanceError> {
        let settled_before = self.completed.len();
        let completed = &mut self.completed;
        let outcome = self.pending.process_slice(0usize, |settled, sale| {
            if !sale.totals_match() {
                return Err(FinanceError::CorruptSale { sale_id: sale.id });
            }
            completed.push(sale);
            Ok(settled + 1)
        });

        match outcome {
            Ok(outcome) => {
                self.finish_batch(outcome.result);
                Ok(BatchReport {
                    settled: outcome.result,
                    pending: self.pending.len(),
                    progress: outcome.progress,
                })
            }
            Err(err) => {
                // Sales ahead of the corrupt one stay settled.
                self.finish_batch(self.completed.len() - settled_before);
                self.rejected += 1;
                match &err {
                    FinanceError::CorruptSale { sale_id } => {
                        self.events.emit(ShopEvent::SaleRejected { sale_id: *sale_id });
                    }
                }
                Err(err)
            }
        }
    }

    fn finish_batch(&mut self, settled: usize) {
        self.last_settled = settled;
        if settled == 0 {
            return;
        }
        let pending = self.pending.len();
        log::debug!("FinanceAgent: settled {} sale(s), {} pending", settled, pending);
        self.events.emit(ShopEvent::BatchClosed {
            processed: settled,
            pending,
        });
    }

    /// Sales waiting for settlement.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Settled sales, in settlement order.
    pub fn completed(&self) -> &[Sale] {
        &self.completed
    }

    /// Sales discarded by validation so far.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Profit per category over all settled sales, most profitable first.
    pub fn profitability_report(&self) -> Vec<ProfitabilityRow> {
        self.profitability
            .aggregate(self.completed.iter().flat_map(|sale| sale.items.iter()))
    }

    /// The `n` most recently recorded settled sales, newest first.
    pub fn top_recent(&self, n: usize) -> impl Iterator<Item = &Sale> {
        let mut newest_first: Vec<&Sale> = self.completed.iter().collect();
        newest_first.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        newest_first.into_iter().take(n)
    }

    /// Settled sales with income strictly above `threshold`, largest first.
    pub fn high_value_sales(&self, threshold: Cents) -> Vec<&Sale> {
        let mut sales: Vec<&Sale> = self
            .completed
            .iter()
            .filter(|sale| sale.total_income > threshold)
            .collect();
        sales.sort_by(|a, b| b.total_income.cmp(&a.total_income));
        sales
    }

    /// The settings the agent was built with.
    pub fn settings(&self) -> &FinanceSettings {
        &self.settings
    }

    /// Records an expense, such as a restock.
    pub fn record_expense(&mut self, amount: Cents) {
        self.expenses.push(amount);
    }

    /// Recorded expenses, oldest first.
    pub fn expenses(&self) -> &[Cents] {
        &self.expenses
    }

    /// Income of settled sales against recorded expenses.
    pub fn daily_balance(&self) -> DailyBalance {
        DailyBalance {
            income: self.completed.iter().map(|sale| sale.total_income).sum(),
            spending: self.expenses.iter().sum(),
        }
    }
}

impl Agent for FinanceAgent {
    fn id(&self) -> AgentId {
        AgentId::Finance
    }

    fn apply_strategy(&mut self, strategy: StrategyId) {
        log::info!("FinanceAgent: Strategy update to {:?}", strategy);
        self.current_strategy = strategy;
        self.pending
            .reconfigure(self.settings.settlement.scaled_for(strategy));
    }

    fn update(&mut self, _context: &TickContext) {
        if self.pending.is_empty() {
            self.last_settled = 0;
            return;
        }
        if let Err(err) = self.close_batch() {
            log::warn!("FinanceAgent: {err}");
        }
    }

    fn report_status(&self) -> AgentStatus {
        AgentStatus {
            agent_id: self.id(),
            current_strategy: self.current_strategy,
            health_score: health_from_backlog(self.pending.len()),
            backlog: self.pending.len(),
            message: format!(
                "pending={} settled={} last_settled={} rejected={}",
                self.pending.len(),
                self.completed.len(),
                self.last_settled,
                self.rejected,
            ),
        }
    }
}
