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

//! Scaling a bill of materials to a production quantity.

use rust_decimal::Decimal;

use super::store::{ProductBom, ProductBomItem};
use crate::data_validation::DataValidationError;

/// Returns the BOM's items with quantities for `production_qty`.
///
/// Each quantity is `qty × production_qty / base_qty`, rounded to two places. A BOM without a
/// base quantity is scaled from its percentages instead.
pub fn scale_bom(bom: &ProductBom, production_qty: Decimal) -> Vec<ProductBomItem> {
    bom.items()
        .iter()
        .map(|item| {
            let qty = match (item.qty * production_qty).checked_div(bom.base_qty()) {
                Some(qty) => qty,
                None => item.percent * production_qty / Decimal::ONE_HUNDRED,
            };

            ProductBomItem {
                material_id: item.material_id,
                percent: item.percent,
                qty: qty.round_dp(2),
            }
        })
        .collect()
}

/// Checks that every percentage lies within 0–100 and that together they do not exceed 100.
pub fn check_percentages(items: &[ProductBomItem]) -> Result<(), DataValidationError> {
    let mut errors = DataValidationError::new();

    for (index, item) in items.iter().enumerate() {
        if item.percent < Decimal::ZERO || item.percent > Decimal::ONE_HUNDRED {
            errors.add_field_error(
                &format!("items-{}-percent", index),
                "Percent must be between 0 and 100.",
            );
        }
    }

    let total: Decimal = items.iter().map(|item| item.percent).sum();
    if total > Decimal::ONE_HUNDRED {
        errors.add_message(&format!(
            "Total percentage is {}; it cannot exceed 100.",
            total.normalize()
        ));
    }

    errors.into_result(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::formulation::store::ProductBomBuilder;

    fn item(material_id: i64, percent: &str, qty: &str) -> ProductBomItem {
        ProductBomItem {
            material_id,
            percent: percent.parse().expect("percent"),
            qty: qty.parse().expect("qty"),
        }
    }

    fn bom(base_qty: i64, items: Vec<ProductBomItem>) -> ProductBom {
        ProductBomBuilder::default()
            .with_product_id(1)
            .with_base_qty(Decimal::from(base_qty))
            .with_items(items)
            .build()
            .expect("Unable to build BOM")
    }

    #[test]
    fn test_scale_bom() {
        let bom = bom(
            200,
            vec![item(1, "60", "120"), item(2, "33.33", "66.66")],
        );

        let scaled = scale_bom(&bom, Decimal::from(500));

        assert_eq!(scaled[0].qty, Decimal::from(300));
        assert_eq!(scaled[0].percent, Decimal::from(60));
        // 66.66 * 500 / 200
        assert_eq!(scaled[1].qty, "166.65".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_scale_bom_rounds_to_two_places() {
        let bom = bom(3, vec![item(1, "10", "1")]);
        let scaled = scale_bom(&bom, Decimal::from(1));
        assert_eq!(scaled[0].qty, "0.33".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_scale_bom_without_base_qty_uses_percent() {
        let bom = bom(0, vec![item(1, "25", "0")]);
        let scaled = scale_bom(&bom, Decimal::from(80));
        assert_eq!(scaled[0].qty, Decimal::from(20));
    }

    #[test]
    fn test_check_percentages() {
        assert!(check_percentages(&[item(1, "60", "1"), item(2, "40", "1")]).is_ok());

        let err = check_percentages(&[item(1, "70", "1"), item(2, "40.5", "1")])
            .expect_err("Total over 100 should be rejected");
        assert_eq!(
            err.messages(),
            &["Total percentage is 110.5; it cannot exceed 100.".to_string()]
        );

        let err = check_percentages(&[item(1, "-1", "1"), item(2, "101", "1")])
            .expect_err("Out of range percent should be rejected");
        assert!(err.has_field_error("items-0-percent"));
        assert!(err.has_field_error("items-1-percent"));
    }
}
