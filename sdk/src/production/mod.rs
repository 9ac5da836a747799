// Copyright 2021 Cargill Incorporated
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

//! Production batches and planning them from a bill of materials.

pub mod store;

use rust_decimal::Decimal;

use crate::formulation::{scale_bom, ProductBom};

pub use store::{Batch, BatchItem, BatchList, BatchStatus, ProductionStore, ProductionStoreError};

/// Prefills batch items from a BOM scaled to `production_qty`.
///
/// `material_name` resolves a BOM material to the product name recorded on the batch item;
/// materials it cannot resolve are named by their id.
pub fn plan_from_bom<F>(
    bom: &ProductBom,
    production_qty: Decimal,
    material_name: F,
) -> Vec<BatchItem>
where
    F: Fn(i64) -> Option<String>,
{
    scale_bom(bom, production_qty)
        .into_iter()
        .map(|item| BatchItem {
            product: material_name(item.material_id)
                .unwrap_or_else(|| format!("Material #{}", item.material_id)),
            qty: item.qty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::formulation::{ProductBomBuilder, ProductBomItem};

    #[test]
    fn test_plan_from_bom() {
        let bom = ProductBomBuilder::default()
            .with_product_id(1)
            .with_base_qty(Decimal::from(100))
            .with_items(vec![
                ProductBomItem {
                    material_id: 7,
                    percent: Decimal::from(60),
                    qty: Decimal::from(60),
                },
                ProductBomItem {
                    material_id: 8,
                    percent: Decimal::from(40),
                    qty: Decimal::from(40),
                },
            ])
            .build()
            .expect("Unable to build BOM");

        let items = plan_from_bom(&bom, Decimal::from(250), |id| {
            if id == 7 {
                Some("Alkyd Resin".to_string())
            } else {
                None
            }
        });

        assert_eq!(
            items,
            vec![
                BatchItem {
                    product: "Alkyd Resin".to_string(),
                    qty: Decimal::from(150),
                },
                BatchItem {
                    product: "Material #8".to_string(),
                    qty: Decimal::from(100),
                },
            ]
        );
    }
}
