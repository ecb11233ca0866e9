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

// Kiosk sandbox
// Runs a scripted day at the hardware store and logs the reports.
//
// Usage: sandbox [config.json] [ticks]

use anyhow::{Context, Result};
use kiosk_sdk::prelude::*;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);
const DEFAULT_TICKS: u64 = 60;
const RESTOCK_AMOUNT: u32 = 20;

/// Orders placed by arriving customers, in turn.
const ORDERS: &[&[&str]] = &[
    &["Nail", "Screw"],
    &["Saw"],
    &["Light bulb", "Wire", "Wire"],
    &["Tube"],
    &["Screwdriver", "Screw", "Screw"],
    &["Hammer"],
    &[],
    &["Light bulb", "Light bulb"],
];

fn load_config(path: Option<String>) -> Result<ShopConfig> {
    match path {
        Some(path) => {
            ShopConfig::from_file(&path).with_context(|| format!("loading config from {path}"))
        }
        None => Ok(ShopConfig::default()),
    }
}

fn log_reports(shop: &Shop) {
    let reports = shop.reports();

    log::info!("--- Queue health ---");
    for row in &reports.queue_health {
        log::info!(
            "  {:<12} customers={} avg_wait={:?}",
            row.headline_item,
            row.customers,
            row.average_wait
        );
    }

    log::info!("--- Stock danger ---");
    for row in &reports.danger {
        log::info!(
            "  {:?} products={} avg_stock={:.1}%",
            row.zone,
            row.products,
            row.average_stock_rate
        );
    }
    log::info!("  low stock: {}", reports.low_stock.join(", "));

    log::info!("--- Profitability ---");
    for row in &reports.profitability {
        log::info!(
            "  {:<12} units={} income={} cost={} net={}",
            row.category,
            row.units,
            row.total_income,
            row.total_cost,
            row.net_profit
        );
    }

    log::info!("--- Recent sales ---");
    for sale in &reports.recent_sales {
        log::info!("  #{} +{} (tick {})", sale.id, sale.total_income, sale.recorded_at);
    }
    log::info!("  high value sales: {}", reports.high_value_sales.len());

    log::info!(
        "--- Balance: income={} spending={} net={} ---",
        reports.balance.income,
        reports.balance.spending,
        reports.balance.net()
    );

    for status in shop.statuses() {
        log::info!(
            "[{}] health={:.2} backlog={} {}",
            status.agent_id,
            status.health_score,
            status.backlog,
            status.message
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next())?;
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid tick count {raw:?}"))?,
        None => DEFAULT_TICKS,
    };

    let (mut shop, events) = Shop::new(config, sample_catalogue());
    let mut script = ORDERS.iter().cycle();

    for tick in 0..ticks {
        if tick % 2 == 0 {
            if let Some(order) = script.next() {
                let order = order.iter().map(|item| item.to_string()).collect();
                shop.admit_customer(order)?;
            }
        }
        if tick % 5 == 4 {
            shop.serve_next()?;
        }
        if tick % 9 == 8 {
            shop.skip_next();
        }
        if tick == ticks / 2 {
            shop.apply_strategy(StrategyId::HighPerformance);
        }

        shop.tick(TICK);

        for event in events.try_iter() {
            match event {
                ShopEvent::LowStock { product_id, .. } => {
                    shop.restock(product_id, RESTOCK_AMOUNT)?;
                }
                ShopEvent::SaleRejected { sale_id } => {
                    log::error!("Sale {sale_id} was rejected at settlement");
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    // Closing time: settle whatever is still queued.
    while shop.finance().pending_len() > 0 {
        if let Err(err) = shop.settle() {
            log::error!("Closing settlement: {err}");
        }
    }

    log_reports(&shop);
    Ok(())
}
