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
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::data_validation::{self, DataValidationError, INVALID_CHOICE};
use crate::error::ConstraintViolationType;
use crate::inventory::{
    DiscardCategory, InventoryStore, InventoryStoreError, MasterProduct, MaterialDiscard,
    MaterialInward, MaterialReturn, PriceUpdate, ProductType, Supplier,
};
use crate::rest_api::resources::{
    dashboard::v1::OPERATIONS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const MASTER_PRODUCTS: &str = "/operations/master-products/";
pub const UPDATE_PRODUCTS: &str = "/operations/update-products/";
pub const SUPPLIERS: &str = "/operations/suppliers/";
pub const MATERIAL_INWARD: &str = "/operations/material-inward/";
pub const MATERIAL_DISCARD: &str = "/operations/material-discard/";
pub const MATERIAL_RETURN: &str = "/operations/material-inward-back/";

pub const IN_USE: &str = "This record is in use and cannot be deleted.";
pub const NO_PRODUCTS: &str = "There are no products to update.";

const PRODUCT_TYPES: [ProductType; 3] = [
    ProductType::FinishedGoods,
    ProductType::RawMaterial,
    ProductType::PackingMaterial,
];
const DISCARD_CATEGORIES: [DiscardCategory; 2] =
    [DiscardCategory::RawMaterial, DiscardCategory::FinishedGoods];

const CHOICE_LIMIT: i64 = 1024;

fn store_error(err: InventoryStoreError) -> ErrorResponse {
    match err {
        InventoryStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        InventoryStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        InventoryStoreError::InvalidArgumentError(err) => ErrorResponse::new(400, err.message()),
        InventoryStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        InventoryStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

/// Reports store rejections of a submitted form against its fields
fn rejected(err: InventoryStoreError, form: &FormData) -> ErrorResponse {
    match err {
        InventoryStoreError::InvalidArgumentError(err) => ErrorResponse::invalid_form(
            DataValidationError::with_field_error(err.argument(), err.message()),
            form.echo(),
        ),
        InventoryStoreError::ConstraintViolationError(ref violation)
            if violation.violation_type() == &ConstraintViolationType::ForeignKey =>
        {
            ErrorResponse::invalid_form(DataValidationError::with_message(IN_USE), form.echo())
        }
        err => store_error(err),
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

fn product_type_filter(product_type: Option<&str>) -> Result<Option<ProductType>, ErrorResponse> {
    match product_type.map(str::trim) {
        None | Some("") => Ok(None),
        Some(product_type) => ProductType::from_str(&product_type.to_uppercase())
            .map(Some)
            .map_err(|err| ErrorResponse::new(400, err.message())),
    }
}

fn product_choices<'a>(
    store: &(dyn InventoryStore + 'a),
) -> Result<Vec<MasterProductSlice>, ErrorResponse> {
    Ok(store
        .list_master_products(None, 0, CHOICE_LIMIT)
        .map_err(store_error)?
        .data
        .into_iter()
        .map(MasterProductSlice::from)
        .collect())
}

fn product_listing<'a>(
    store: &(dyn InventoryStore + 'a),
    base_link: &str,
    product_type: Option<&str>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<MasterProductScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);
    let product_type = product_type_filter(product_type)?;

    let selected = match selected {
        Some(id) => match store.fetch_master_product(id).map_err(store_error)? {
            Some(product) => Some(MasterProductSlice::from(product)),
            None => return Err(ErrorResponse::new(404, &format!("Product {} not found", id))),
        },
        None => None,
    };

    let products = store
        .list_master_products(product_type, offset, limit)
        .map_err(store_error)?;
    let base_link = match product_type {
        Some(product_type) => format!("{}?product_type={}", base_link, product_type),
        None => base_link.to_string(),
    };

    Ok(MasterProductScreenSlice {
        selected,
        data: products
            .data
            .into_iter()
            .map(MasterProductSlice::from)
            .collect(),
        paging: Paging::new(&base_link, products.paging),
        product_type,
        product_types: PRODUCT_TYPES.iter().copied().map(ChoiceSlice::from).collect(),
    })
}

pub fn master_product_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    product_type: Option<&str>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<MasterProductScreenSlice, ErrorResponse> {
    product_listing(
        store.as_ref(),
        MASTER_PRODUCTS,
        product_type,
        selected,
        offset,
        limit,
    )
}

pub fn submit_master_product<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, MASTER_PRODUCTS, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            let id = id.ok_or_else(|| ErrorResponse::new(400, "Select a product to delete"))?;
            store
                .delete_master_product(id)
                .map_err(|err| rejected(err, form))?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let name = data_validation::required_text(&mut errors, "name", form.get("name"), 200);
            let code = data_validation::optional_text(&mut errors, "code", form.get("code"), 50);
            let choices: Vec<(&str, &str)> = PRODUCT_TYPES
                .iter()
                .map(|product_type| (product_type.as_str(), product_type.label()))
                .collect();
            let product_type = data_validation::choice(
                &mut errors,
                "product_type",
                form.get("product_type"),
                &choices,
            )
            .and_then(|product_type| ProductType::from_str(&product_type).ok());
            let selling_price = data_validation::decimal(
                &mut errors,
                "selling_price",
                "Selling price",
                form.get("selling_price"),
                false,
            );
            let purchase_price = data_validation::decimal(
                &mut errors,
                "purchase_price",
                "Purchase price",
                form.get("purchase_price"),
                false,
            );

            let product = match (name, product_type) {
                (Some(name), Some(product_type)) if errors.is_empty() => MasterProduct {
                    id: id.unwrap_or(0),
                    name,
                    code: code.unwrap_or_default(),
                    product_type,
                    selling_price: selling_price.unwrap_or(Decimal::ZERO),
                    purchase_price: purchase_price.unwrap_or(Decimal::ZERO),
                },
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            match id {
                Some(_) => store.update_master_product(product),
                None => store.add_master_product(product).map(|_| ()),
            }
            .map_err(|err| rejected(err, form))?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(MASTER_PRODUCTS))
}

pub fn update_products_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    product_type: Option<&str>,
    offset: u64,
    limit: u16,
) -> Result<MasterProductScreenSlice, ErrorResponse> {
    product_listing(
        store.as_ref(),
        UPDATE_PRODUCTS,
        product_type,
        None,
        offset,
        limit,
    )
}

/// Saves the prices posted in `products-<n>-id`, `-selling_price` and `-purchase_price` rows.
/// Either every row is updated or none is.
pub fn submit_price_updates<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, UPDATE_PRODUCTS, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let mut errors = DataValidationError::new();
    let rows = form.rows("products");
    if rows.is_empty() {
        errors.add_message(NO_PRODUCTS);
    }

    let mut updates = Vec::with_capacity(rows.len());
    for row in rows {
        let id = data_validation::id(&mut errors, &row.field_name("id"), row.get("id"), true);
        let selling_price = data_validation::decimal(
            &mut errors,
            &row.field_name("selling_price"),
            "Selling price",
            row.get("selling_price"),
            true,
        );
        let purchase_price = data_validation::decimal(
            &mut errors,
            &row.field_name("purchase_price"),
            "Purchase price",
            row.get("purchase_price"),
            true,
        );
        if let (Some(master_product_id), Some(selling_price), Some(purchase_price)) =
            (id, selling_price, purchase_price)
        {
            updates.push(PriceUpdate {
                master_product_id,
                selling_price,
                purchase_price,
            });
        }
    }

    if !errors.is_empty() {
        return Err(ErrorResponse::invalid_form(errors, form.echo()));
    }

    let count = updates.len();
    store
        .update_prices(updates)
        .map_err(|err| rejected(err, form))?;
    info!("Updated prices of {} products", count);

    let product_type = product_type_filter(Some(form.get("product_type")))?;
    Ok(match product_type {
        Some(product_type) => Redirect::to(&format!(
            "{}?product_type={}",
            UPDATE_PRODUCTS, product_type
        )),
        None => Redirect::to(UPDATE_PRODUCTS),
    })
}

pub fn supplier_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<SupplierScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => match store.fetch_supplier(id).map_err(store_error)? {
            Some(supplier) => Some(SupplierSlice::from(supplier)),
            None => return Err(ErrorResponse::new(404, &format!("Supplier {} not found", id))),
        },
        None => None,
    };

    let suppliers = store.list_suppliers(offset, limit).map_err(store_error)?;

    Ok(SupplierScreenSlice {
        selected,
        data: suppliers.data.into_iter().map(SupplierSlice::from).collect(),
        paging: Paging::new(SUPPLIERS, suppliers.paging),
    })
}

pub fn submit_supplier<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, SUPPLIERS, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            let id = id.ok_or_else(|| ErrorResponse::new(400, "Select a supplier to delete"))?;
            store
                .delete_supplier(id)
                .map_err(|err| rejected(err, form))?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let name = data_validation::required_text(&mut errors, "name", form.get("name"), 200);
            let contact =
                data_validation::optional_text(&mut errors, "contact", form.get("contact"), 100);

            let supplier = match name {
                Some(name) if errors.is_empty() => Supplier {
                    id: id.unwrap_or(0),
                    name,
                    contact: contact.unwrap_or_default(),
                },
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            match id {
                Some(_) => store.update_supplier(supplier),
                None => store.add_supplier(supplier).map(|_| ()),
            }
            .map_err(|err| rejected(err, form))?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(SUPPLIERS))
}

pub fn material_inward_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    offset: u64,
    limit: u16,
) -> Result<MaterialInwardScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);
    let inwards = store
        .list_material_inwards(offset, limit)
        .map_err(store_error)?;
    let suppliers = store
        .list_suppliers(0, CHOICE_LIMIT)
        .map_err(store_error)?;

    Ok(MaterialInwardScreenSlice {
        data: inwards
            .data
            .into_iter()
            .map(MaterialInwardSlice::from)
            .collect(),
        paging: Paging::new(MATERIAL_INWARD, inwards.paging),
        products: product_choices(store.as_ref())?,
        suppliers: suppliers.data.into_iter().map(SupplierSlice::from).collect(),
    })
}

pub fn submit_material_inward<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, MATERIAL_INWARD, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let mut errors = DataValidationError::new();
    let master_product_id = data_validation::id(
        &mut errors,
        "master_product_id",
        form.get("master_product_id"),
        true,
    );
    let supplier_id =
        data_validation::id(&mut errors, "supplier_id", form.get("supplier_id"), true);
    let inward_date =
        data_validation::date(&mut errors, "inward_date", form.get("inward_date"), true);
    let bill_no = data_validation::required_text(&mut errors, "bill_no", form.get("bill_no"), 50);
    let qty =
        data_validation::decimal(&mut errors, "qty", "Inward quantity", form.get("qty"), true);
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    if let Some(master_product_id) = master_product_id {
        if store
            .fetch_master_product(master_product_id)
            .map_err(store_error)?
            .is_none()
        {
            errors.add_field_error("master_product_id", INVALID_CHOICE);
        }
    }
    if let Some(supplier_id) = supplier_id {
        if store.fetch_supplier(supplier_id).map_err(store_error)?.is_none() {
            errors.add_field_error("supplier_id", INVALID_CHOICE);
        }
    }

    let inward = match (master_product_id, supplier_id, inward_date, bill_no, qty) {
        (Some(master_product_id), Some(supplier_id), Some(inward_date), Some(bill_no), Some(qty))
            if errors.is_empty() =>
        {
            MaterialInward {
                id: 0,
                master_product_id,
                supplier_id,
                inward_date,
                bill_no,
                qty,
                remark: remark.unwrap_or_default(),
                created_at: now,
            }
        }
        _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
    };

    store
        .add_material_inward(inward)
        .map_err(|err| rejected(err, form))?;

    Ok(Redirect::to(MATERIAL_INWARD))
}

pub fn material_discard_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    offset: u64,
    limit: u16,
) -> Result<MaterialDiscardScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);
    let discards = store
        .list_material_discards(offset, limit)
        .map_err(store_error)?;

    Ok(MaterialDiscardScreenSlice {
        data: discards
            .data
            .into_iter()
            .map(MaterialDiscardSlice::from)
            .collect(),
        paging: Paging::new(MATERIAL_DISCARD, discards.paging),
        categories: DISCARD_CATEGORIES
            .iter()
            .copied()
            .map(ChoiceSlice::from)
            .collect(),
        products: product_choices(store.as_ref())?,
    })
}

pub fn submit_material_discard<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, MATERIAL_DISCARD, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let mut errors = DataValidationError::new();
    let choices: Vec<(&str, &str)> = DISCARD_CATEGORIES
        .iter()
        .map(|category| (category.as_str(), category.label()))
        .collect();
    let category = data_validation::choice(&mut errors, "category", form.get("category"), &choices)
        .and_then(|category| DiscardCategory::from_str(&category).ok());
    let master_product_id = data_validation::id(
        &mut errors,
        "master_product_id",
        form.get("master_product_id"),
        false,
    );
    let qty =
        data_validation::decimal(&mut errors, "qty", "Discard quantity", form.get("qty"), true);
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    if let Some(master_product_id) = master_product_id {
        if store
            .fetch_master_product(master_product_id)
            .map_err(store_error)?
            .is_none()
        {
            errors.add_field_error("master_product_id", INVALID_CHOICE);
        }
    }

    let discard = match (category, qty) {
        (Some(category), Some(qty)) if errors.is_empty() => MaterialDiscard {
            id: 0,
            category,
            master_product_id,
            qty,
            remark: remark.unwrap_or_default(),
            created_at: now,
        },
        _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
    };

    store
        .add_material_discard(discard)
        .map_err(|err| rejected(err, form))?;

    Ok(Redirect::to(MATERIAL_DISCARD))
}

pub fn material_return_screen<'a>(
    store: Box<dyn InventoryStore + 'a>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<MaterialReturnScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);
    let returns = store
        .list_material_returns(offset, limit)
        .map_err(store_error)?;

    Ok(MaterialReturnScreenSlice {
        data: returns
            .data
            .into_iter()
            .map(|material_return| MaterialReturnSlice::from_return(material_return, now))
            .collect(),
        paging: Paging::new(MATERIAL_RETURN, returns.paging),
    })
}

/// Records goods coming back from a customer against the order they were dispatched for
pub fn submit_material_return<'a>(
    store: Box<dyn InventoryStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, MATERIAL_RETURN, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let mut errors = DataValidationError::new();
    let order_id = data_validation::id(&mut errors, "order_id", form.get("order_id"), true);
    let mut text = |field: &str, max_length: usize| {
        data_validation::required_text(&mut errors, field, form.get(field), max_length)
    };
    let company_name = text("company_name", 200);
    let location = text("location", 150);
    let product = text("product", 200);
    let dispatched_qty = data_validation::decimal(
        &mut errors,
        "dispatched_qty",
        "Dispatched quantity",
        form.get("dispatched_qty"),
        true,
    );
    let returned_qty = data_validation::decimal(
        &mut errors,
        "returned_qty",
        "Returned quantity",
        form.get("returned_qty"),
        true,
    );
    let vehicle = data_validation::optional_text(&mut errors, "vehicle", form.get("vehicle"), 20);
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    let material_return = match (
        order_id,
        company_name,
        location,
        product,
        dispatched_qty,
        returned_qty,
    ) {
        (
            Some(order_id),
            Some(company_name),
            Some(location),
            Some(product),
            Some(dispatched_qty),
            Some(returned_qty),
        ) if errors.is_empty() => MaterialReturn {
            id: 0,
            order_id,
            company_name,
            location,
            product,
            dispatched_qty,
            returned_qty,
            vehicle: vehicle.unwrap_or_default(),
            remark: remark.unwrap_or_default(),
            returned_at: now,
        },
        _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
    };

    store
        .add_material_return(material_return)
        .map_err(|err| rejected(err, form))?;

    Ok(Redirect::to(MATERIAL_RETURN))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    use crate::rest_api::resources::form::form;
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 8, 12).and_hms(10, 0, 0)
    }

    fn add_product(factory: &dyn StoreFactory, name: &str, product_type: &str) -> String {
        submit_master_product(
            factory.get_inventory_store(),
            &form(&[
                ("name", name),
                ("product_type", product_type),
                ("selling_price", "10"),
            ]),
        )
        .expect("Unable to save product");

        master_product_screen(factory.get_inventory_store(), None, None, 0, 100)
            .expect("Unable to load products")
            .data
            .into_iter()
            .find(|product| product.name == name)
            .map(|product| product.id.to_string())
            .expect("Product not saved")
    }

    #[test]
    fn test_master_products_by_type() {
        let factory = in_memory_store_factory();
        add_product(&*factory, "Gloss Enamel", "FG");
        add_product(&*factory, "Alkyd Resin", "RM");
        add_product(&*factory, "20L Drum", "PK");

        let raw = master_product_screen(factory.get_inventory_store(), Some("rm"), None, 0, 10)
            .expect("Unable to load products");
        assert_eq!(raw.product_type, Some(ProductType::RawMaterial));
        assert_eq!(raw.data.len(), 1);
        assert_eq!(raw.data[0].product_type_label, "Raw Material");

        let err = submit_master_product(
            factory.get_inventory_store(),
            &form(&[("name", "Thinner"), ("product_type", "XX")]),
        )
        .expect_err("Unknown type accepted");
        assert!(err.errors().contains_key("product_type"));

        match master_product_screen(factory.get_inventory_store(), Some("XX"), None, 0, 10) {
            Err(err) => assert_eq!(err.status_code(), 400),
            Ok(screen) => panic!("Expected 400, got {:?}", screen),
        }
    }

    #[test]
    fn test_price_updates_are_all_or_nothing() {
        let factory = in_memory_store_factory();
        let enamel = add_product(&*factory, "Gloss Enamel", "FG");

        let err = submit_price_updates(
            factory.get_inventory_store(),
            &form(&[
                ("products-0-id", &enamel),
                ("products-0-selling_price", "120"),
                ("products-0-purchase_price", "80"),
                ("products-1-id", "999"),
                ("products-1-selling_price", "5"),
                ("products-1-purchase_price", "4"),
            ]),
        )
        .expect_err("Update of unknown product accepted");
        assert_eq!(err.status_code(), 404);

        let redirect = submit_price_updates(
            factory.get_inventory_store(),
            &form(&[
                ("product_type", "FG"),
                ("products-0-id", &enamel),
                ("products-0-selling_price", "120"),
                ("products-0-purchase_price", "80"),
            ]),
        )
        .expect("Unable to update prices");
        assert_eq!(
            redirect.location(),
            "/operations/update-products/?product_type=FG"
        );

        let products = update_products_screen(factory.get_inventory_store(), Some("FG"), 0, 10)
            .expect("Unable to load products");
        assert_eq!(products.data[0].selling_price, Decimal::from(120));
        assert_eq!(products.data[0].purchase_price, Decimal::from(80));
    }

    #[test]
    fn test_material_inward_and_supplier_in_use() {
        let factory = in_memory_store_factory();
        let resin = add_product(&*factory, "Alkyd Resin", "RM");
        submit_supplier(
            factory.get_inventory_store(),
            &form(&[("name", "Asian Resins"), ("contact", "9822012345")]),
        )
        .expect("Unable to save supplier");
        let supplier = supplier_screen(factory.get_inventory_store(), None, 0, 10)
            .expect("Unable to load suppliers")
            .data[0]
            .id
            .to_string();

        let err = submit_material_inward(
            factory.get_inventory_store(),
            &form(&[
                ("master_product_id", "999"),
                ("supplier_id", &supplier),
                ("inward_date", "2024-08-10"),
                ("bill_no", "P-11"),
                ("qty", "50"),
            ]),
            now(),
        )
        .expect_err("Unknown product accepted");
        assert_eq!(
            err.errors().get("master_product_id"),
            Some(&vec![INVALID_CHOICE.to_string()])
        );

        submit_material_inward(
            factory.get_inventory_store(),
            &form(&[
                ("master_product_id", &resin),
                ("supplier_id", &supplier),
                ("inward_date", "2024-08-10"),
                ("bill_no", "P-11"),
                ("qty", "50"),
            ]),
            now(),
        )
        .expect("Unable to record inward");

        let screen = material_inward_screen(factory.get_inventory_store(), 0, 10)
            .expect("Unable to load inwards");
        assert_eq!(screen.data.len(), 1);
        assert_eq!(screen.data[0].qty, Decimal::from(50));

        let err = submit_supplier(
            factory.get_inventory_store(),
            &form(&[("action", "delete"), ("id", &supplier)]),
        )
        .expect_err("Supplier in use deleted");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.messages(), &[IN_USE.to_string()]);

        let err = submit_master_product(
            factory.get_inventory_store(),
            &form(&[("action", "delete"), ("id", &resin)]),
        )
        .expect_err("Master product in use deleted");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.messages(), &[IN_USE.to_string()]);
    }

    #[test]
    fn test_discard_and_return() {
        let factory = in_memory_store_factory();

        let err = submit_material_discard(
            factory.get_inventory_store(),
            &form(&[("category", ""), ("qty", "5")]),
            now(),
        )
        .expect_err("Discard without category accepted");
        assert!(err.errors().contains_key("category"));

        submit_material_discard(
            factory.get_inventory_store(),
            &form(&[("category", "FG"), ("qty", "5"), ("remark", "Damaged drums")]),
            now(),
        )
        .expect("Unable to record discard");
        let discards = material_discard_screen(factory.get_inventory_store(), 0, 10)
            .expect("Unable to load discards");
        assert_eq!(discards.data[0].category, DiscardCategory::FinishedGoods);
        assert_eq!(discards.data[0].master_product_id, None);

        let fields = [
            ("order_id", "4"),
            ("company_name", "Acme Paints"),
            ("location", "Hadapsar"),
            ("product", "Gloss Enamel"),
            ("dispatched_qty", "100"),
            ("returned_qty", "120"),
        ];
        let err = submit_material_return(factory.get_inventory_store(), &form(&fields), now())
            .expect_err("Return above dispatched quantity accepted");
        assert_eq!(
            err.errors().get("returned_qty"),
            Some(&vec![
                "Returned quantity 120 exceeds dispatched quantity 100".to_string()
            ])
        );

        let mut fields = fields.to_vec();
        fields.retain(|(key, _)| *key != "returned_qty");
        fields.push(("returned_qty", "20"));
        submit_material_return(factory.get_inventory_store(), &form(&fields), now())
            .expect("Unable to record return");

        let later = now() + Duration::days(1) + Duration::minutes(5);
        let returns = material_return_screen(factory.get_inventory_store(), 0, 10, later)
            .expect("Unable to load returns");
        assert_eq!(returns.data[0].time_span, "1 Days 0 Hours 5 Minutes");
    }
}
