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

use std::collections::HashMap;
use std::convert::TryFrom;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::data_validation::{self, DataValidationError, MISSING_CATEGORY};
use crate::formulation::{FormulationStore, FormulationStoreError};
use crate::inventory::{InventoryStore, InventoryStoreError};
use crate::production::{
    plan_from_bom, Batch, BatchItem, BatchStatus, ProductionStore, ProductionStoreError,
};
use crate::rest_api::resources::{
    dashboard::v1::OPERATIONS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const BOM_PRODUCTION: &str = "/operations/bom-production/";

pub const NO_ITEMS: &str = "Add at least one item.";

const CHOICE_LIMIT: i64 = 1024;

fn store_error(err: ProductionStoreError) -> ErrorResponse {
    match err {
        ProductionStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        ProductionStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        ProductionStoreError::InvalidArgumentError(err) => ErrorResponse::new(400, err.message()),
        ProductionStoreError::InvalidStateError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        ProductionStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        ProductionStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

fn rejected(err: ProductionStoreError, form: &FormData) -> ErrorResponse {
    match err {
        ProductionStoreError::InvalidStateError(err) => ErrorResponse::invalid_form(
            DataValidationError::with_message(&err.to_string()),
            form.echo(),
        ),
        err => store_error(err),
    }
}

fn formulation_error(err: FormulationStoreError) -> ErrorResponse {
    match err {
        FormulationStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
        err => ErrorResponse::internal_error(Box::new(err)),
    }
}

fn inventory_error(err: InventoryStoreError) -> ErrorResponse {
    ErrorResponse::internal_error(Box::new(err))
}

/// The batch listing, optionally filtered by status, with a plan prefilled from a BOM when
/// `bom_id` is given.
pub fn production_screen<'a>(
    store: Box<dyn ProductionStore + 'a>,
    formulation: Box<dyn FormulationStore + 'a>,
    inventory: Box<dyn InventoryStore + 'a>,
    query: &ProductionQuery,
    offset: u64,
    limit: u16,
) -> Result<ProductionScreenSlice, ErrorResponse> {
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    let limit = i64::from(limit);

    let status = match query.status.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(status) => Some(
            BatchStatus::from_str(&status.to_uppercase())
                .map_err(|err| ErrorResponse::new(400, err.message()))?,
        ),
    };

    let selected = match query.id {
        Some(id) => match store.fetch_batch(id).map_err(store_error)? {
            Some(batch) => Some(BatchSlice::from(batch)),
            None => return Err(ErrorResponse::new(404, &format!("Batch {} not found", id))),
        },
        None => None,
    };

    let plan = match query.bom_id {
        Some(bom_id) => Some(plan_batch(
            formulation.as_ref(),
            inventory.as_ref(),
            bom_id,
            query.production_qty.as_deref().unwrap_or(""),
        )?),
        None => None,
    };

    let batches = store
        .list_batches(status, offset, limit)
        .map_err(store_error)?;
    let base_link = match status {
        Some(status) => format!("{}?status={}", BOM_PRODUCTION, status),
        None => BOM_PRODUCTION.to_string(),
    };

    let boms = formulation
        .list_boms(0, CHOICE_LIMIT)
        .map_err(formulation_error)?
        .data;
    let names = product_names(inventory.as_ref(), boms.iter().map(|bom| bom.product_id()))?;
    let boms = boms
        .into_iter()
        .map(|bom| BomOption {
            id: bom.id(),
            product_id: bom.product_id(),
            product_name: names
                .get(&bom.product_id())
                .cloned()
                .unwrap_or_default(),
        })
        .collect();

    Ok(ProductionScreenSlice {
        selected,
        plan,
        data: batches.data.into_iter().map(BatchSlice::from).collect(),
        paging: Paging::new(&base_link, batches.paging),
        boms,
    })
}

/// Looks up master product names by id. Unknown ids are left out.
fn product_names<'a, I>(
    inventory: &(dyn InventoryStore + 'a),
    ids: I,
) -> Result<HashMap<i64, String>, ErrorResponse>
where
    I: IntoIterator<Item = i64>,
{
    let mut names = HashMap::new();
    for id in ids {
        if names.contains_key(&id) {
            continue;
        }
        if let Some(product) = inventory
            .fetch_master_product(id)
            .map_err(inventory_error)?
        {
            names.insert(id, product.name);
        }
    }
    Ok(names)
}

fn plan_batch<'a>(
    formulation: &(dyn FormulationStore + 'a),
    inventory: &(dyn InventoryStore + 'a),
    bom_id: i64,
    production_qty: &str,
) -> Result<BatchPlanSlice, ErrorResponse> {
    let mut errors = DataValidationError::new();
    let production_qty = data_validation::decimal(
        &mut errors,
        "production_qty",
        "Production quantity",
        production_qty,
        true,
    );
    let production_qty = match production_qty {
        Some(production_qty) if errors.is_empty() => production_qty,
        _ => return Err(ErrorResponse::invalid_form(errors, Default::default())),
    };

    let bom = formulation
        .fetch_bom(bom_id)
        .map_err(formulation_error)?
        .ok_or_else(|| ErrorResponse::new(404, &format!("BOM {} not found", bom_id)))?;

    let names = product_names(inventory, bom.items().iter().map(|item| item.material_id))?;
    let items = plan_from_bom(&bom, production_qty, |material_id| {
        names.get(&material_id).cloned()
    });

    Ok(BatchPlanSlice {
        bom_id,
        product_id: bom.product_id(),
        base_qty: bom.base_qty(),
        production_qty,
        items: items.into_iter().map(BatchItemSlice::from).collect(),
    })
}

/// Starts a batch (`save`), or finishes or cancels the active batch named in `id`. `now` is
/// the start or end time recorded.
pub fn submit_batch<'a>(
    store: Box<dyn ProductionStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, BOM_PRODUCTION, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }

    match action {
        action if action.is_save() => {
            let batch = validate_batch(form, now)?;
            let id = store.add_batch(batch).map_err(|err| rejected(err, form))?;
            info!("Started batch {}", id);
        }
        FormAction::Finish | FormAction::Cancel => {
            let mut errors = DataValidationError::new();
            let id = match data_validation::id(&mut errors, "id", form.get("id"), true) {
                Some(id) => id,
                None => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };
            if action == FormAction::Finish {
                store.finish_batch(id, now)
            } else {
                store.cancel_batch(id)
            }
            .map_err(|err| rejected(err, form))?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(BOM_PRODUCTION))
}

fn validate_batch(form: &FormData, now: NaiveDateTime) -> Result<Batch, ErrorResponse> {
    let mut errors = DataValidationError::new();

    let supervisor =
        data_validation::required_text(&mut errors, "supervisor", form.get("supervisor"), 150);
    let labour =
        data_validation::decimal(&mut errors, "labour", "Labour", form.get("labour"), true);
    if form.get("category").trim().is_empty() {
        errors.add_message(MISSING_CATEGORY);
    }
    let category =
        data_validation::optional_text(&mut errors, "category", form.get("category"), 100);
    let base_qty = data_validation::decimal(
        &mut errors,
        "base_qty",
        "Base quantity",
        form.get("base_qty"),
        true,
    );
    let production_qty = data_validation::decimal(
        &mut errors,
        "production_qty",
        "Production quantity",
        form.get("production_qty"),
        true,
    );
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    let rows = form.rows("items");
    if rows.is_empty() {
        errors.add_message(NO_ITEMS);
    }
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let product = data_validation::required_text(
            &mut errors,
            &row.field_name("product"),
            row.get("product"),
            200,
        );
        let qty = data_validation::decimal(
            &mut errors,
            &row.field_name("qty"),
            "Quantity",
            row.get("qty"),
            true,
        );
        if let (Some(product), Some(qty)) = (product, qty) {
            items.push(BatchItem { product, qty });
        }
    }

    match (supervisor, labour, category, base_qty, production_qty) {
        (Some(supervisor), Some(labour), Some(category), Some(base_qty), Some(production_qty))
            if errors.is_empty() =>
        {
            Ok(Batch {
                id: 0,
                supervisor,
                labour,
                category,
                base_qty,
                production_qty,
                remark: remark.unwrap_or_default(),
                started_at: now,
                ended_at: None,
                status: BatchStatus::Active,
                items,
            })
        }
        _ => Err(ErrorResponse::invalid_form(errors, form.echo())),
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::formulation::{ProductBomBuilder, ProductBomItem};
    use crate::inventory::{MasterProduct, ProductType};
    use crate::rest_api::resources::form::form;
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 6, 3).and_hms(8, 0, 0)
    }

    const BATCH: &[(&str, &str)] = &[
        ("action", "save"),
        ("supervisor", "Mahesh"),
        ("labour", "4"),
        ("category", "Enamel"),
        ("base_qty", "100"),
        ("production_qty", "250"),
        ("items-0-product", "Alkyd Resin"),
        ("items-0-qty", "150"),
        ("items-1-product", "Titanium Dioxide"),
        ("items-1-qty", "100"),
    ];

    fn screen(factory: &dyn StoreFactory, query: &ProductionQuery) -> ProductionScreenSlice {
        production_screen(
            factory.get_production_store(),
            factory.get_formulation_store(),
            factory.get_inventory_store(),
            query,
            0,
            10,
        )
        .expect("Unable to load screen")
    }

    #[test]
    fn test_batch_lifecycle() {
        let factory = in_memory_store_factory();

        submit_batch(factory.get_production_store(), &form(BATCH), started())
            .expect("Unable to start batch");

        let active = screen(
            &*factory,
            &ProductionQuery {
                status: Some("active".to_string()),
                ..ProductionQuery::default()
            },
        );
        assert_eq!(active.data.len(), 1);
        assert_eq!(active.data[0].items.len(), 2);
        assert_eq!(active.data[0].time_required, "2.5".parse::<Decimal>().expect("decimal"));
        let id = active.data[0].id.to_string();

        let ended = started() + Duration::hours(3);
        submit_batch(
            factory.get_production_store(),
            &form(&[("action", "finish"), ("id", &id)]),
            ended,
        )
        .expect("Unable to finish batch");

        let err = submit_batch(
            factory.get_production_store(),
            &form(&[("action", "cancel"), ("id", &id)]),
            ended,
        )
        .expect_err("Finished batch cancelled");
        assert_eq!(err.messages().len(), 1);

        let finished = screen(
            &*factory,
            &ProductionQuery {
                id: Some(active.data[0].id),
                status: Some("FINISHED".to_string()),
                ..ProductionQuery::default()
            },
        );
        let selected = finished.selected.expect("No batch selected");
        assert_eq!(selected.status, BatchStatus::Finished);
        assert_eq!(selected.ended_at, Some(ended));
    }

    #[test]
    fn test_batch_requires_category_and_items() {
        let factory = in_memory_store_factory();

        let err = submit_batch(
            factory.get_production_store(),
            &form(&[
                ("supervisor", "Mahesh"),
                ("labour", "4"),
                ("category", ""),
                ("base_qty", "100"),
                ("production_qty", "250"),
            ]),
            started(),
        )
        .expect_err("Batch without category accepted");

        assert_eq!(
            err.messages(),
            &[MISSING_CATEGORY.to_string(), NO_ITEMS.to_string()]
        );
        assert!(screen(&*factory, &ProductionQuery::default()).data.is_empty());
    }

    #[test]
    fn test_plan_prefilled_from_bom() {
        let factory = in_memory_store_factory();
        let inventory = factory.get_inventory_store();
        let add = |name: &str, product_type: ProductType| {
            inventory
                .add_master_product(MasterProduct {
                    id: 0,
                    name: name.to_string(),
                    code: name.to_uppercase(),
                    product_type,
                    selling_price: Decimal::ZERO,
                    purchase_price: Decimal::ZERO,
                })
                .expect("Unable to add master product")
        };
        let enamel = add("Enamel", ProductType::FinishedGoods);
        let resin = add("Resin", ProductType::RawMaterial);

        let bom = ProductBomBuilder::default()
            .with_product_id(enamel)
            .with_base_qty(Decimal::from(100))
            .with_items(vec![ProductBomItem {
                material_id: resin,
                percent: Decimal::from(60),
                qty: Decimal::from(60),
            }])
            .build()
            .expect("Unable to build BOM");
        let bom_id = factory
            .get_formulation_store()
            .add_bom(bom)
            .expect("Unable to add BOM");

        let prefilled = screen(
            &*factory,
            &ProductionQuery {
                bom_id: Some(bom_id),
                production_qty: Some("500".to_string()),
                ..ProductionQuery::default()
            },
        );
        let plan = prefilled.plan.expect("No plan");
        assert_eq!(
            plan.items,
            vec![BatchItemSlice {
                product: "Resin".to_string(),
                qty: Decimal::from(300),
            }]
        );
        assert_eq!(prefilled.boms[0].product_name, "Enamel");
    }

    /// Material names resolve however many master products exist.
    #[test]
    fn test_plan_names_materials_beyond_first_page() {
        let factory = in_memory_store_factory();
        let inventory = factory.get_inventory_store();
        let add = |name: &str, product_type: ProductType| {
            inventory
                .add_master_product(MasterProduct {
                    id: 0,
                    name: name.to_string(),
                    code: name.to_uppercase(),
                    product_type,
                    selling_price: Decimal::ZERO,
                    purchase_price: Decimal::ZERO,
                })
                .expect("Unable to add master product")
        };
        for n in 0..1100 {
            add(&format!("Additive {:04}", n), ProductType::RawMaterial);
        }
        let enamel = add("Enamel", ProductType::FinishedGoods);
        let pigment = add("Pigment", ProductType::RawMaterial);

        let bom = ProductBomBuilder::default()
            .with_product_id(enamel)
            .with_base_qty(Decimal::from(100))
            .with_items(vec![ProductBomItem {
                material_id: pigment,
                percent: Decimal::from(100),
                qty: Decimal::from(100),
            }])
            .build()
            .expect("Unable to build BOM");
        let bom_id = factory
            .get_formulation_store()
            .add_bom(bom)
            .expect("Unable to add BOM");

        let prefilled = screen(
            &*factory,
            &ProductionQuery {
                bom_id: Some(bom_id),
                production_qty: Some("50".to_string()),
                ..ProductionQuery::default()
            },
        );
        let plan = prefilled.plan.expect("No plan");
        assert_eq!(plan.items[0].product, "Pigment");
        assert_eq!(prefilled.boms[0].product_name, "Enamel");
    }
}
