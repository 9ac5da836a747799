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

use std::convert::TryFrom;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::data_validation::{self, DataValidationError, INVALID_CHOICE};
use crate::formulation::{
    check_percentages, FormulationStore, FormulationStoreError, ProductBomBuilder,
    ProductBomItem, ProductDevelopment, ProductDevelopmentItem,
};
use crate::inventory::{InventoryStore, InventoryStoreError, ProductType};
use crate::rest_api::resources::{
    dashboard::v1::MASTERS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const PRODUCT_BOM: &str = "/masters/product-bom/";
pub const PRODUCT_DEVELOPMENT: &str = "/masters/product-development/";

pub const NO_MATERIALS: &str = "Add at least one material.";

const CHOICE_LIMIT: i64 = 1024;

fn store_error(err: FormulationStoreError) -> ErrorResponse {
    match err {
        FormulationStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        FormulationStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        FormulationStoreError::InvalidArgumentError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        FormulationStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        FormulationStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

fn inventory_error(err: InventoryStoreError) -> ErrorResponse {
    match err {
        InventoryStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        InventoryStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
        err => ErrorResponse::internal_error(Box::new(err)),
    }
}

fn page(offset: u64, limit: u16) -> (i64, i64) {
    (
        i64::try_from(offset).unwrap_or(i64::MAX),
        i64::from(limit),
    )
}

fn form_id(form: &FormData) -> Result<Option<i64>, ErrorResponse> {
    let mut errors = DataValidationError::new();
    let id = data_validation::id(&mut errors, "id", form.get("id"), false);
    errors
        .into_result(id)
        .map_err(|errors| ErrorResponse::invalid_form(errors, form.echo()))
}

fn options<'a>(
    inventory: &(dyn InventoryStore + 'a),
    product_type: ProductType,
) -> Result<Vec<MaterialOption>, ErrorResponse> {
    Ok(inventory
        .list_master_products(Some(product_type), 0, CHOICE_LIMIT)
        .map_err(inventory_error)?
        .data
        .into_iter()
        .map(MaterialOption::from)
        .collect())
}

pub fn bom_screen<'a>(
    store: Box<dyn FormulationStore + 'a>,
    inventory: Box<dyn InventoryStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<ProductBomScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => match store.fetch_bom(id).map_err(store_error)? {
            Some(bom) => Some(ProductBomSlice::from(&bom)),
            None => return Err(ErrorResponse::new(404, &format!("BOM {} not found", id))),
        },
        None => None,
    };

    let boms = store.list_boms(offset, limit).map_err(store_error)?;

    let mut materials = options(inventory.as_ref(), ProductType::RawMaterial)?;
    materials.extend(options(inventory.as_ref(), ProductType::PackingMaterial)?);

    Ok(ProductBomScreenSlice {
        selected,
        data: boms.data.iter().map(ProductBomSlice::from).collect(),
        paging: Paging::new(PRODUCT_BOM, boms.paging),
        products: options(inventory.as_ref(), ProductType::FinishedGoods)?,
        materials,
    })
}

/// Handles a post to the BOM screen. The header and its `items-<n>-*` rows are saved together;
/// modifying a BOM replaces all of its items.
pub fn submit_bom<'a>(
    store: Box<dyn FormulationStore + 'a>,
    inventory: Box<dyn InventoryStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, PRODUCT_BOM, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            let id = id.ok_or_else(|| ErrorResponse::new(400, "Select a BOM to delete"))?;
            store.delete_bom(id).map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let product_id =
                data_validation::id(&mut errors, "product_id", form.get("product_id"), true);
            let base_qty = data_validation::decimal(
                &mut errors,
                "base_qty",
                "Base quantity",
                form.get("base_qty"),
                true,
            );
            let remark =
                data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

            if let Some(product_id) = product_id {
                match inventory
                    .fetch_master_product(product_id)
                    .map_err(inventory_error)?
                {
                    Some(product) if product.product_type == ProductType::FinishedGoods => {
                        if let Some(existing) = store
                            .fetch_bom_for_product(product_id)
                            .map_err(store_error)?
                        {
                            if Some(existing.id()) != id {
                                errors.add_field_error(
                                    "product_id",
                                    "BOM for this product already exists.",
                                );
                            }
                        }
                    }
                    _ => errors.add_field_error("product_id", INVALID_CHOICE),
                }
            }

            let items = bom_items(inventory.as_ref(), form, &mut errors)?;
            if errors.is_empty() {
                if let Err(percent_errors) = check_percentages(&items) {
                    errors.merge(percent_errors);
                }
            }

            let (product_id, base_qty) = match (product_id, base_qty) {
                (Some(product_id), Some(base_qty)) if errors.is_empty() => (product_id, base_qty),
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            let mut builder = ProductBomBuilder::default()
                .with_product_id(product_id)
                .with_base_qty(base_qty)
                .with_remark(remark.unwrap_or_default())
                .with_items(items);
            if let Some(id) = id {
                builder = builder.with_id(id);
            }
            let bom = builder
                .build()
                .map_err(|err| ErrorResponse::new(400, &err.to_string()))?;

            match id {
                Some(_) => store.update_bom(bom),
                None => store.add_bom(bom).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(PRODUCT_BOM))
}

fn bom_items<'a>(
    inventory: &(dyn InventoryStore + 'a),
    form: &FormData,
    errors: &mut DataValidationError,
) -> Result<Vec<ProductBomItem>, ErrorResponse> {
    let rows = form.rows("items");
    if rows.is_empty() {
        errors.add_message(NO_MATERIALS);
    }

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let material_id = data_validation::id(
            errors,
            &row.field_name("material_id"),
            row.get("material_id"),
            true,
        );
        let percent = data_validation::decimal(
            errors,
            &row.field_name("percent"),
            "Percent",
            row.get("percent"),
            true,
        );
        let qty = data_validation::decimal(
            errors,
            &row.field_name("qty"),
            "Quantity",
            row.get("qty"),
            true,
        );

        if let Some(material_id) = material_id {
            if inventory
                .fetch_master_product(material_id)
                .map_err(inventory_error)?
                .is_none()
            {
                errors.add_field_error(&row.field_name("material_id"), INVALID_CHOICE);
            }
        }
        if let Some(percent) = percent {
            if percent > Decimal::ONE_HUNDRED {
                errors.add_field_error(
                    &row.field_name("percent"),
                    "Percent must be between 0 and 100.",
                );
            }
        }

        if let (Some(material_id), Some(percent), Some(qty)) = (material_id, percent, qty) {
            items.push(ProductBomItem {
                material_id,
                percent,
                qty,
            });
        }
    }

    Ok(items)
}

pub fn development_screen<'a>(
    store: Box<dyn FormulationStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<ProductDevelopmentScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => match store.fetch_development(id).map_err(store_error)? {
            Some(development) => Some(ProductDevelopmentSlice::from(&development)),
            None => {
                return Err(ErrorResponse::new(
                    404,
                    &format!("Product development {} not found", id),
                ))
            }
        },
        None => None,
    };

    let developments = store
        .list_developments(offset, limit)
        .map_err(store_error)?;

    Ok(ProductDevelopmentScreenSlice {
        selected,
        data: developments
            .data
            .iter()
            .map(ProductDevelopmentSlice::from)
            .collect(),
        paging: Paging::new(PRODUCT_DEVELOPMENT, developments.paging),
    })
}

/// Handles a post to the product development screen. `now` stamps new formulas.
pub fn submit_development<'a>(
    store: Box<dyn FormulationStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, PRODUCT_DEVELOPMENT, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            let id =
                id.ok_or_else(|| ErrorResponse::new(400, "Select a formula to delete"))?;
            store.delete_development(id).map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let product_name = data_validation::required_text(
                &mut errors,
                "product_name",
                form.get("product_name"),
                200,
            );
            let selling_price = data_validation::decimal(
                &mut errors,
                "selling_price",
                "Selling price",
                form.get("selling_price"),
                true,
            );
            let remark =
                data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);
            let items = development_items(form, &mut errors);

            let created_at = match id {
                Some(id) => match store.fetch_development(id).map_err(store_error)? {
                    Some(existing) => existing.created_at,
                    None => {
                        return Err(ErrorResponse::new(
                            404,
                            &format!("Product development {} not found", id),
                        ))
                    }
                },
                None => now,
            };

            let development = match (product_name, selling_price) {
                (Some(product_name), Some(selling_price)) if errors.is_empty() => {
                    ProductDevelopment {
                        id: id.unwrap_or(0),
                        product_name,
                        selling_price,
                        remark: remark.unwrap_or_default(),
                        created_at,
                        items,
                    }
                }
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            match id {
                Some(_) => store.update_development(development),
                None => store.add_development(development).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(PRODUCT_DEVELOPMENT))
}

fn development_items(
    form: &FormData,
    errors: &mut DataValidationError,
) -> Vec<ProductDevelopmentItem> {
    let rows = form.rows("items");
    if rows.is_empty() {
        errors.add_message(NO_MATERIALS);
    }

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let material = data_validation::required_text(
            errors,
            &row.field_name("material"),
            row.get("material"),
            150,
        );
        let mut values = Vec::with_capacity(4);
        for (field, label) in &[
            ("percent", "Percent"),
            ("rate", "Rate"),
            ("density", "Density"),
            ("solids", "Solids"),
        ] {
            values.push(data_validation::decimal(
                errors,
                &row.field_name(field),
                label,
                row.get(field),
                true,
            ));
        }

        if let (Some(material), [Some(percent), Some(rate), Some(density), Some(solids)]) =
            (material, values.as_slice())
        {
            items.push(ProductDevelopmentItem {
                material,
                percent: *percent,
                rate: *rate,
                density: *density,
                solids: *solids,
            });
        }
    }

    items
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::inventory::MasterProduct;
    use crate::rest_api::resources::form::form;
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn add_master_product(
        factory: &dyn StoreFactory,
        name: &str,
        product_type: ProductType,
    ) -> i64 {
        factory
            .get_inventory_store()
            .add_master_product(MasterProduct {
                id: 0,
                name: name.to_string(),
                code: name.to_uppercase(),
                product_type,
                selling_price: Decimal::ZERO,
                purchase_price: Decimal::ZERO,
            })
            .expect("Unable to add master product")
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 3, 4).and_hms(11, 30, 0)
    }

    #[test]
    fn test_submit_bom() {
        let factory = in_memory_store_factory();
        let product = add_master_product(&*factory, "Enamel", ProductType::FinishedGoods);
        let resin = add_master_product(&*factory, "Resin", ProductType::RawMaterial);
        let pigment = add_master_product(&*factory, "Pigment", ProductType::RawMaterial);

        let product = product.to_string();
        let resin = resin.to_string();
        let pigment = pigment.to_string();

        let redirect = submit_bom(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            &form(&[
                ("action", "save"),
                ("product_id", &product),
                ("base_qty", "100"),
                ("items-0-material_id", &resin),
                ("items-0-percent", "60"),
                ("items-0-qty", "60"),
                ("items-1-material_id", ""),
                ("items-1-percent", ""),
                ("items-1-qty", ""),
                ("items-2-material_id", &pigment),
                ("items-2-percent", "40"),
                ("items-2-qty", "40"),
            ]),
        )
        .expect("Unable to save BOM");
        assert_eq!(redirect.location(), PRODUCT_BOM);

        let screen = bom_screen(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            None,
            0,
            10,
        )
        .expect("Unable to load screen");
        assert_eq!(screen.data.len(), 1);
        assert_eq!(screen.data[0].items.len(), 2);
        assert_eq!(screen.data[0].total_percent, Decimal::from(100));
        assert_eq!(screen.products.len(), 1);
        assert_eq!(screen.materials.len(), 2);

        // A second BOM for the same product is rejected
        let err = submit_bom(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            &form(&[
                ("product_id", &product),
                ("base_qty", "50"),
                ("items-0-material_id", &resin),
                ("items-0-percent", "10"),
                ("items-0-qty", "5"),
            ]),
        )
        .expect_err("Duplicate BOM accepted");
        assert_eq!(
            err.errors().get("product_id"),
            Some(&vec!["BOM for this product already exists.".to_string()])
        );
    }

    #[test]
    fn test_submit_bom_rejects_excess_percent() {
        let factory = in_memory_store_factory();
        let product =
            add_master_product(&*factory, "Primer", ProductType::FinishedGoods).to_string();
        let resin = add_master_product(&*factory, "Resin", ProductType::RawMaterial).to_string();

        let err = submit_bom(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            &form(&[
                ("product_id", &product),
                ("base_qty", "100"),
                ("items-0-material_id", &resin),
                ("items-0-percent", "70"),
                ("items-0-qty", "70"),
                ("items-1-material_id", &resin),
                ("items-1-percent", "40.5"),
                ("items-1-qty", "40.5"),
            ]),
        )
        .expect_err("Excess percentage accepted");
        assert_eq!(
            err.messages(),
            &["Total percentage is 110.5; it cannot exceed 100.".to_string()]
        );

        let err = submit_bom(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            &form(&[("product_id", &product), ("base_qty", "100")]),
        )
        .expect_err("BOM without items accepted");
        assert_eq!(err.messages(), &[NO_MATERIALS.to_string()]);

        let screen = bom_screen(
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            None,
            0,
            10,
        )
        .expect("Unable to load screen");
        assert!(screen.data.is_empty());
    }

    #[test]
    fn test_submit_development_reports_costing() {
        let factory = in_memory_store_factory();

        submit_development(
            factory.get_formulation_store(),
            &form(&[
                ("product_name", "Gloss Enamel"),
                ("selling_price", "250"),
                ("items-0-material", "Resin"),
                ("items-0-percent", "60"),
                ("items-0-rate", "150"),
                ("items-0-density", "1.2"),
                ("items-0-solids", "50"),
                ("items-1-material", "Solvent"),
                ("items-1-percent", "40"),
                ("items-1-rate", "80"),
                ("items-1-density", "0.8"),
                ("items-1-solids", "0"),
            ]),
            now(),
        )
        .expect("Unable to save formula");

        let screen = development_screen(factory.get_formulation_store(), None, 0, 10)
            .expect("Unable to load screen");
        let formula = &screen.data[0];
        assert_eq!(formula.created_at, now());
        // volume 60 / 1.2 + 40 / 0.8 = 100; cost 9000 + 3200 = 12200
        assert_eq!(formula.summary.total_volume, Decimal::from(100));
        assert_eq!(formula.summary.total_cost, Decimal::from(12200));
        assert_eq!(formula.summary.cost_per_liter, Decimal::from(122));
        assert_eq!(formula.summary.gross_profit, Decimal::from(128));
        assert_eq!(formula.items[0].volume, Decimal::from(50));

        let err = submit_development(
            factory.get_formulation_store(),
            &form(&[
                ("product_name", "Matt Enamel"),
                ("selling_price", "-5"),
                ("items-0-material", "Resin"),
                ("items-0-percent", "abc"),
            ]),
            now(),
        )
        .expect_err("Invalid formula accepted");
        assert_eq!(
            err.errors().get("selling_price"),
            Some(&vec!["Selling price cannot be negative.".to_string()])
        );
        assert_eq!(
            err.errors().get("items-0-percent"),
            Some(&vec!["Enter a number.".to_string()])
        );
        assert_eq!(
            err.errors().get("items-0-rate"),
            Some(&vec!["This field is required.".to_string()])
        );
    }
}
