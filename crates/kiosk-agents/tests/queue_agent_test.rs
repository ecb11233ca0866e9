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

use crossbeam_channel::bounded;
use kiosk_agents::queue_agent::QueueHealthRow;
use kiosk_agents::{QueueAgent, QueueSettings};
use kiosk_core::{Agent, DepartureReason, PoolError, ShopEvent, SliceBudget, StrategyId, TickContext};
use kiosk_data::PoolSettings;
use kiosk_lanes::ScanStatus;
use std::collections::HashSet;
use std::time::Duration;

fn order(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn tick(n: u64, secs: u64) -> TickContext {
    TickContext::new(n, Duration::from_secs(secs))
}

#[test]
fn test_customers_are_recycled_through_the_pool() {
    // --- 1. ARRANGE ---
    let mut agent = QueueAgent::new(QueueSettings::default());
    let prewarmed = agent.pool_stats().created;

    // --- 2. ACT ---
    let first = agent.admit(order(&["Nail"])).unwrap();
    let served = agent.serve_front().expect("one customer is queued");
    let second = agent.admit(order(&["Saw"])).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(served.customer_id, first);
    assert_eq!(served.order, order(&["Nail"]));
    assert_eq!(second, first + 1, "ids keep increasing across reuse");
    assert_eq!(
        agent.pool_stats().created,
        prewarmed,
        "a warm pool never builds a new customer"
    );
    assert_eq!(agent.front().map(|c| c.name.as_str()), Some("Client 1001"));
}

#[test]
fn test_fixed_pool_refuses_admission_when_exhausted() {
    let settings = QueueSettings {
        pool: PoolSettings {
            initial_population: 2,
            dynamic: false,
        },
        ..QueueSettings::default()
    };
    let mut agent = QueueAgent::new(settings);

    agent.admit(order(&["Nail"])).unwrap();
    agent.admit(order(&["Wire"])).unwrap();
    let refused = agent.admit(order(&["Saw"]));

    assert!(matches!(refused, Err(PoolError::Exhausted { in_use: 2, .. })));
    assert_eq!(agent.len(), 2, "a refused customer never joins the queue");
}

#[test]
fn test_impatient_customers_leave_with_estimated_loss() {
    // --- 1. ARRANGE ---
    let (tx, rx) = bounded(16);
    let mut agent = QueueAgent::new(QueueSettings::default()).with_event_sender(tx);
    let early = agent.admit(order(&["Nail"])).unwrap();
    agent.update(&tick(1, 20));
    let late = agent.admit(order(&["Saw"])).unwrap();

    // --- 2. ACT ---
    // The early customer crosses 30s of waiting; the late one is at 15s.
    agent.update(&tick(2, 15));

    // --- 3. ASSERT ---
    let departures = agent.take_departures();
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].customer_id, early);
    assert_eq!(departures[0].reason, DepartureReason::Impatience);
    assert_eq!(departures[0].estimated_loss, 2_000);
    assert_eq!(agent.front().map(|c| c.id), Some(late));
    assert!(agent.take_departures().is_empty(), "departures are drained");

    let left: Vec<ShopEvent> = rx
        .try_iter()
        .filter(|event| matches!(event, ShopEvent::CustomerLeft { .. }))
        .collect();
    assert_eq!(left.len(), 1);
}

#[test]
fn test_waiting_exactly_the_limit_is_not_impatient() {
    let mut agent = QueueAgent::new(QueueSettings::default());
    agent.admit(order(&["Nail"])).unwrap();

    agent.update(&tick(1, 30));

    assert_eq!(agent.len(), 1);
    assert_eq!(agent.angry_customers(Duration::from_secs(30)).count(), 0);
    assert_eq!(agent.angry_customers(Duration::from_secs(29)).count(), 1);
}

#[test]
fn test_skipped_customer_costs_nothing() {
    let mut agent = QueueAgent::new(QueueSettings::default());
    agent.admit(order(&["Tube"])).unwrap();

    let departure = agent.skip_front().expect("one customer is queued");

    assert_eq!(departure.reason, DepartureReason::Skipped);
    assert_eq!(departure.estimated_loss, 0);
    assert!(agent.is_empty());
    assert!(agent.skip_front().is_none());
}

#[test]
fn test_priority_favours_larger_orders_in_queue_order() {
    let mut agent = QueueAgent::new(QueueSettings::default());
    let small = agent.admit(order(&["Nail"])).unwrap();
    let big_first = agent.admit(order(&["Saw", "Wire"])).unwrap();
    let big_second = agent.admit(order(&["Tube", "Screw"])).unwrap();

    let ids: Vec<_> = agent.priority_order().into_iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![big_first, big_second, small]);
    assert_eq!(agent.next_priority_client(), Some(big_first));
}

#[test]
fn test_next_priority_client_ignores_empty_orders() {
    let mut agent = QueueAgent::new(QueueSettings::default());
    agent.admit(Vec::new()).unwrap();
    assert_eq!(agent.next_priority_client(), None);
}

#[test]
fn test_health_report_groups_by_headline_item() {
    // --- 1. ARRANGE ---
    let mut agent = QueueAgent::new(QueueSettings::default());
    agent.admit(order(&["Nail", "Saw"])).unwrap();
    agent.update(&tick(1, 10));
    agent.admit(order(&["Nail"])).unwrap();
    agent.admit(order(&["Wire"])).unwrap();
    agent.update(&tick(2, 2));

    // --- 2. ACT ---
    let rows = agent.health_report();

    // --- 3. ASSERT ---
    // Nail: waits of 12s and 2s average to 7s; Wire waited 2s.
    assert_eq!(
        rows,
        vec![
            QueueHealthRow {
                headline_item: "Nail".to_string(),
                customers: 2,
                average_wait: Duration::from_secs(7),
            },
            QueueHealthRow {
                headline_item: "Wire".to_string(),
                customers: 1,
                average_wait: Duration::from_secs(2),
            },
        ]
    );
}

#[test]
fn test_shortage_scan_runs_across_polls() {
    // --- 1. ARRANGE ---
    let settings = QueueSettings {
        shortage_scan: SliceBudget::items(2),
        ..QueueSettings::default()
    };
    let mut agent = QueueAgent::new(settings);
    for _ in 0..3 {
        agent.admit(order(&["Nail"])).unwrap();
    }
    let missing = agent.admit(order(&["Nail", "Saw"])).unwrap();
    let available: HashSet<String> = ["Nail".to_string()].into_iter().collect();

    // --- 2. ACT & ASSERT ---
    assert_eq!(
        agent.poll_stock_shortage(&available),
        ScanStatus::Pending { scanned: 2 }
    );
    assert_eq!(agent.last_shortage(), None, "no run has finished yet");
    assert_eq!(
        agent.poll_stock_shortage(&available),
        ScanStatus::Found { index: 3 }
    );
    assert_eq!(agent.customers()[3].id, missing);
    assert_eq!(agent.last_shortage(), Some(true));
}

#[test]
fn test_strategy_change_rescales_the_scan() {
    // --- 1. ARRANGE ---
    let mut agent = QueueAgent::new(QueueSettings::default());
    for _ in 0..10 {
        agent.admit(order(&["Nail"])).unwrap();
    }
    let available: HashSet<String> = ["Nail".to_string()].into_iter().collect();

    // --- 2. ACT ---
    agent.apply_strategy(StrategyId::LowPower);
    let status = agent.poll_stock_shortage(&available);

    // --- 3. ASSERT ---
    // The baseline of 8 items shrinks to 2 under low power.
    assert_eq!(status, ScanStatus::Pending { scanned: 2 });
    let report = agent.report_status();
    assert_eq!(report.current_strategy, StrategyId::LowPower);
    assert_eq!(report.backlog, 10);
}

#[test]
fn test_patience_limit_tolerates_out_of_range_settings() {
    let patience = |secs: f32| {
        QueueSettings {
            max_patience_secs: secs,
            ..QueueSettings::default()
        }
        .max_patience()
    };

    assert_eq!(patience(1e30), Duration::MAX);
    assert_eq!(patience(f32::INFINITY), Duration::MAX);
    assert_eq!(patience(-5.0), Duration::ZERO);
    assert_eq!(patience(f32::NAN), Duration::ZERO);
    assert_eq!(patience(30.0), Duration::from_secs(30));
}
