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

use crossbeam_channel::unbounded;
use kiosk_agents::finance_agent::{gross_margins, DailyBalance};
use kiosk_agents::{FinanceAgent, FinanceError, FinanceSettings};
use kiosk_core::{Agent, ShopEvent, SliceBudget, StrategyId, TickContext};
use kiosk_data::shop::{Sale, SoldItem};
use kiosk_lanes::SliceProgress;
use std::time::Duration;

fn item(category: &str, sell_price: i64, restock_cost: i64) -> SoldItem {
    SoldItem {
        product_id: 1,
        name: format!("{category} item"),
        category: category.to_string(),
        sell_price,
        restock_cost,
    }
}

fn settled_agent(sales: Vec<Vec<SoldItem>>) -> FinanceAgent {
    let mut agent = FinanceAgent::new(FinanceSettings {
        settlement: SliceBudget::items(100),
        ..FinanceSettings::default()
    });
    for (tick, items) in sales.into_iter().enumerate() {
        agent.record_sale(items, tick as u64);
    }
    agent.close_batch().unwrap();
    agent
}

#[test]
fn test_record_sale_returns_receipt_and_queues_it() {
    let mut agent = FinanceAgent::new(FinanceSettings::default());

    let receipt = agent.record_sale(vec![item("Tool", 800, 500), item("Metal", 105, 100)], 3);

    assert_eq!(receipt.sale_id, 1);
    assert_eq!(receipt.total_income, 905);
    assert_eq!(receipt.net_profit, 305);
    assert_eq!(agent.pending_len(), 1);
    assert!(agent.completed().is_empty(), "sales settle on a later tick");
}

#[test]
fn test_settlement_is_spread_over_ticks() {
    // --- 1. ARRANGE ---
    let mut agent = FinanceAgent::new(FinanceSettings::default());
    for tick in 0..12 {
        agent.record_sale(vec![item("Metal", 100, 50)], tick);
    }
    let context = TickContext::new(12, Duration::from_millis(16));

    // --- 2. ACT & ASSERT ---
    agent.update(&context);
    assert_eq!(agent.completed().len(), 5);
    agent.update(&context);
    assert_eq!(agent.completed().len(), 10);
    agent.update(&context);
    assert_eq!(agent.completed().len(), 12);
    assert_eq!(agent.pending_len(), 0);

    let ids: Vec<u32> = agent.completed().iter().map(|sale| sale.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>(), "settlement keeps FIFO order");
}

#[test]
fn test_close_batch_reports_progress() {
    let mut agent = FinanceAgent::new(FinanceSettings {
        settlement: SliceBudget::items(2),
        ..FinanceSettings::default()
    });
    for tick in 0..3 {
        agent.record_sale(vec![item("Tool", 600, 500)], tick);
    }

    let first = agent.close_batch().unwrap();
    assert_eq!((first.settled, first.pending), (2, 1));
    assert_eq!(first.progress, SliceProgress::Pending);

    let second = agent.close_batch().unwrap();
    assert_eq!((second.settled, second.pending), (1, 0));
    assert_eq!(second.progress, SliceProgress::Complete);
}

#[test]
fn test_corrupt_sale_is_discarded_and_later_sales_survive() {
    // --- 1. ARRANGE ---
    let (tx, rx) = unbounded();
    let mut agent = FinanceAgent::new(FinanceSettings::default()).with_event_sender(tx);
    agent.record_sale(vec![item("Metal", 100, 50)], 0);
    let mut corrupt = Sale::from_items(2, vec![item("Tool", 800, 500)], 1);
    corrupt.total_income = 1;
    agent.submit(corrupt);
    agent.record_sale(vec![item("Electronic", 300, 100)], 2);

    // --- 2. ACT ---
    let failed = agent.close_batch();
    let resumed = agent.close_batch();

    // --- 3. ASSERT ---
    assert_eq!(failed, Err(FinanceError::CorruptSale { sale_id: 2 }));
    assert_eq!(resumed.map(|report| report.settled), Ok(1));
    let ids: Vec<u32> = agent.completed().iter().map(|sale| sale.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(agent.rejected(), 1);
    assert!(rx
        .try_iter()
        .any(|event| event == ShopEvent::SaleRejected { sale_id: 2 }));
}

#[test]
fn test_profitability_ranks_categories_by_net_profit() {
    let agent = settled_agent(vec![
        vec![item("Metal", 105, 100), item("Tool", 800, 500)],
        vec![item("Electronic", 300, 100), item("Metal", 1000, 1250)],
        vec![item("Tool", 600, 500)],
    ]);

    let rows = agent.profitability_report();

    let summary: Vec<(&str, usize, i64)> = rows
        .iter()
        .map(|row| (row.category.as_str(), row.units, row.net_profit))
        .collect();
    assert_eq!(
        summary,
        vec![("Tool", 2, 400), ("Electronic", 1, 200), ("Metal", 2, -245)]
    );
    assert_eq!(rows[2].total_income, 1105);
    assert_eq!(rows[2].total_cost, 1350);
}

#[test]
fn test_top_recent_prefers_latest_ticks() {
    let agent = settled_agent(vec![
        vec![item("Metal", 100, 50)],
        vec![item("Metal", 100, 50)],
        vec![item("Metal", 100, 50)],
        vec![item("Metal", 100, 50)],
    ]);

    let ids: Vec<u32> = agent.top_recent(3).map(|sale| sale.id).collect();

    assert_eq!(ids, vec![4, 3, 2]);
    assert_eq!(agent.top_recent(10).count(), 4);
}

#[test]
fn test_high_value_sales_are_strictly_above_threshold() {
    let agent = settled_agent(vec![
        vec![item("Tool", 5_000, 100)],
        vec![item("Tool", 5_001, 100)],
        vec![item("Tool", 3_000, 100), item("Tool", 4_000, 100)],
    ]);

    let incomes: Vec<i64> = agent
        .high_value_sales(agent.settings().high_value_threshold)
        .into_iter()
        .map(|sale| sale.total_income)
        .collect();

    assert_eq!(incomes, vec![7_000, 5_001]);
}

#[test]
fn test_daily_balance_nets_expenses_against_income() {
    let mut agent = settled_agent(vec![vec![item("Tool", 800, 500)]]);
    agent.record_expense(300);
    agent.record_expense(250);

    assert_eq!(
        agent.daily_balance(),
        DailyBalance {
            income: 800,
            spending: 550,
        }
    );
    assert_eq!(agent.daily_balance().net(), 250);
}

#[test]
fn test_gross_margins_pair_prices_positionally() {
    assert_eq!(gross_margins(&[105, 800, 300], &[100, 500]), vec![5, 300]);
    assert!(gross_margins(&[], &[1, 2]).is_empty());
}

#[test]
fn test_high_performance_settles_more_per_tick() {
    let mut agent = FinanceAgent::new(FinanceSettings::default());
    for tick in 0..20 {
        agent.record_sale(vec![item("Metal", 100, 50)], tick);
    }

    agent.apply_strategy(StrategyId::HighPerformance);
    agent.update(&TickContext::new(0, Duration::from_millis(16)));

    assert_eq!(agent.completed().len(), 15);
    let status = agent.report_status();
    assert_eq!(status.backlog, 5);
    assert_eq!(status.current_strategy, StrategyId::HighPerformance);
}

#[test]
fn test_sales_settled_before_a_corrupt_one_are_reported() {
    // --- 1. ARRANGE ---
    let (tx, rx) = unbounded();
    let mut agent = FinanceAgent::new(FinanceSettings::default()).with_event_sender(tx);
    agent.record_sale(vec![item("Metal", 100, 50)], 0);
    agent.record_sale(vec![item("Tool", 600, 500)], 0);
    let mut corrupt = Sale::from_items(3, vec![item("Tool", 800, 500)], 1);
    corrupt.total_cost = 0;
    agent.submit(corrupt);
    agent.record_sale(vec![item("Electronic", 300, 100)], 2);
    let _recorded: Vec<ShopEvent> = rx.try_iter().collect();

    // --- 2. ACT ---
    let failed = agent.close_batch();

    // --- 3. ASSERT ---
    assert!(failed.is_err());
    let events: Vec<ShopEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            ShopEvent::BatchClosed {
                processed: 2,
                pending: 1,
            },
            ShopEvent::SaleRejected { sale_id: 3 },
        ]
    );
    assert!(agent.report_status().message.contains("last_settled=2"));
}
