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

//! The hardware store's opening catalogue.

use kiosk_data::shop::{Product, ProductId, Provider};

fn product(
    id: ProductId,
    name: &str,
    category: &str,
    sell_price: i64,
    restock_cost: i64,
    (max_stock, current_stock): (u32, u32),
) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        sell_price,
        restock_cost,
        max_stock,
        current_stock,
    }
}

/// The seven product lines the shop opens with. Screws start nearly sold out.
pub fn sample_catalogue() -> Vec<Product> {
    vec![
        product(1, "Nail", "Metal", 105, 100, (50, 25)),
        product(2, "Wire", "Electronic", 150, 100, (50, 40)),
        product(3, "Screwdriver", "Tool", 600, 500, (80, 35)),
        product(4, "Saw", "Tool", 800, 500, (30, 20)),
        product(5, "Tube", "Metal", 1_000, 1_250, (120, 120)),
        product(6, "Light bulb", "Electronic", 300, 100, (10, 6)),
        product(7, "Screw", "Metal", 50, 30, (100, 5)),
    ]
}

/// One supplier per category of [`sample_catalogue`].
pub fn sample_providers() -> Vec<Provider> {
    let supplier = |name: &str, supplied: &[ProductId]| Provider {
        name: name.to_string(),
        supplied: supplied.to_vec(),
    };
    vec![
        supplier("Guillote", &[1, 5, 7]),
        supplier("Samid", &[3, 4]),
        supplier("Scrocchi", &[2, 6]),
    ]
}
