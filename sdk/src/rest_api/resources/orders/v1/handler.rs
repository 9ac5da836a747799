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

use crate::data_validation::{self, DataValidationError};
use crate::orders::{total_price_too_high, OrderFilter, OrderStore, OrderStoreError, SalesOrder};
use crate::rest_api::resources::{
    dashboard::v1::OPERATIONS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const CREATE_ORDER: &str = "/operations/create-order/";
pub const PAYMENTS: &str = "/operations/payments/";
pub const FACTORY_STATUS: &str = "/operations/factory-status/";
pub const SPLIT_ORDER: &str = "/operations/split-order/";

pub const TOTAL_PRICE_TOO_HIGH: &str =
    "Total price seems too high for given quantity/price/discount.";

fn store_error(err: OrderStoreError) -> ErrorResponse {
    match err {
        OrderStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        OrderStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        OrderStoreError::InvalidArgumentError(err) => ErrorResponse::new(400, err.message()),
        OrderStoreError::InvalidStateError(err) => ErrorResponse::new(400, &format!("{}", err)),
        OrderStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        OrderStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

/// Reports a rejected workflow step against the submitted form
fn rejected(err: OrderStoreError, form: &FormData) -> ErrorResponse {
    match err {
        OrderStoreError::InvalidArgumentError(err) => ErrorResponse::invalid_form(
            DataValidationError::with_field_error(err.argument(), err.message()),
            form.echo(),
        ),
        OrderStoreError::InvalidStateError(err) => ErrorResponse::invalid_form(
            DataValidationError::with_message(&err.to_string()),
            form.echo(),
        ),
        err => store_error(err),
    }
}

fn page(offset: u64, limit: u16) -> (i64, i64) {
    (
        i64::try_from(offset).unwrap_or(i64::MAX),
        i64::from(limit),
    )
}

/// The order a workflow action applies to, posted in the `id` field
fn order_id(form: &FormData) -> Result<i64, ErrorResponse> {
    let mut errors = DataValidationError::new();
    match data_validation::id(&mut errors, "id", form.get("id"), true) {
        Some(id) => Ok(id),
        None => Err(ErrorResponse::invalid_form(errors, form.echo())),
    }
}

fn order_list<'a>(
    store: &(dyn OrderStore + 'a),
    filter: OrderFilter,
    base_link: &str,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<OrderListSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);
    let orders = store
        .list_orders(filter, offset, limit)
        .map_err(store_error)?;

    Ok(OrderListSlice {
        data: orders
            .data
            .into_iter()
            .map(|order| SalesOrderSlice::from_order(order, now))
            .collect(),
        paging: Paging::new(base_link, orders.paging),
    })
}

/// Recent orders shown under the order entry form
pub fn create_order_screen<'a>(
    store: Box<dyn OrderStore + 'a>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<OrderListSlice, ErrorResponse> {
    order_list(
        store.as_ref(),
        OrderFilter::default(),
        CREATE_ORDER,
        offset,
        limit,
        now,
    )
}

pub fn submit_order<'a>(
    store: Box<dyn OrderStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, CREATE_ORDER, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let order = validate_order(form, now)?;
    let id = store.add_order(order).map_err(store_error)?;
    info!("Created sales order {}", id);

    Ok(Redirect::to(CREATE_ORDER))
}

fn validate_order(form: &FormData, now: NaiveDateTime) -> Result<SalesOrder, ErrorResponse> {
    let mut errors = DataValidationError::new();

    let mut text = |field: &str, max_length: usize| {
        data_validation::required_text(&mut errors, field, form.get(field), max_length)
    };
    let company = text("company", 200);
    let address = text("address", 500);
    let city = text("city", 100);
    let sales_person = text("sales_person", 150);
    let location = text("location", 150);

    let mobile1 = data_validation::mobile(&mut errors, "mobile1", form.get("mobile1"), true);
    let mobile2 = data_validation::mobile(&mut errors, "mobile2", form.get("mobile2"), true);
    let product_name =
        data_validation::optional_text(&mut errors, "product_name", form.get("product_name"), 200);
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    let mut number = |field: &str, label: &str| {
        data_validation::decimal(&mut errors, field, label, form.get(field), false)
    };
    let quantity = number("quantity", "Quantity");
    let price = number("price", "Price");
    let discount = number("discount", "Discount");
    let discount_amount = number("discount_amount", "Discount amount");
    let total_price = number("total_price", "Total price");

    if total_price_too_high(quantity, price, total_price, discount_amount) {
        errors.add_field_error("total_price", TOTAL_PRICE_TOO_HIGH);
    }

    match (company, address, city, sales_person, location, mobile1, mobile2) {
        (
            Some(company),
            Some(address),
            Some(city),
            Some(sales_person),
            Some(location),
            Some(mobile1),
            Some(mobile2),
        ) if errors.is_empty() => Ok(SalesOrder {
            id: 0,
            company,
            address,
            city,
            sales_person,
            location,
            mobile1,
            mobile2,
            product_name,
            quantity,
            price,
            discount,
            discount_amount,
            total_price,
            remark,
            order_created: now,
            bill_no: None,
            payment_cleared: false,
            on_hold: false,
            factory_accepted: false,
            available_qty: Decimal::ZERO,
            dispatch_date: None,
            time_span_text: None,
            is_split: false,
            is_cancelled: false,
        }),
        _ => Err(ErrorResponse::invalid_form(errors, form.echo())),
    }
}

/// The payment clearance listing. `status` is one of `pending`, `hold` or `cleared`; any other
/// value lists every order.
pub fn payments_screen<'a>(
    store: Box<dyn OrderStore + 'a>,
    status: Option<&str>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<OrderListSlice, ErrorResponse> {
    let (filter, base_link) = match status {
        Some("pending") => (
            OrderFilter {
                payment_cleared: Some(false),
                on_hold: Some(false),
                factory_accepted: None,
            },
            format!("{}?status=pending", PAYMENTS),
        ),
        Some("hold") => (
            OrderFilter {
                on_hold: Some(true),
                ..OrderFilter::default()
            },
            format!("{}?status=hold", PAYMENTS),
        ),
        Some("cleared") => (
            OrderFilter {
                payment_cleared: Some(true),
                ..OrderFilter::default()
            },
            format!("{}?status=cleared", PAYMENTS),
        ),
        _ => (OrderFilter::default(), PAYMENTS.to_string()),
    };

    order_list(store.as_ref(), filter, &base_link, offset, limit, now)
}

/// Clears (`save` with a `bill_no`), holds or releases the order named in `id`
pub fn submit_payment<'a>(
    store: Box<dyn OrderStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, PAYMENTS, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = order_id(form)?;

    match action {
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let bill_no =
                data_validation::required_text(&mut errors, "bill_no", form.get("bill_no"), 50);
            let bill_no = match bill_no {
                Some(bill_no) if errors.is_empty() => bill_no,
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };
            store
                .clear_payment(id, &bill_no)
                .map_err(|err| rejected(err, form))?;
        }
        FormAction::Hold => store
            .set_on_hold(id, true)
            .map_err(|err| rejected(err, form))?,
        FormAction::Release => store
            .set_on_hold(id, false)
            .map_err(|err| rejected(err, form))?,
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(PAYMENTS))
}

pub fn factory_status_screen<'a>(
    store: Box<dyn OrderStore + 'a>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<FactoryStatusSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let pending = store
        .list_pending_factory(offset, limit)
        .map_err(store_error)?;
    let accepted = store
        .list_factory_orders(offset, limit)
        .map_err(store_error)?;

    Ok(FactoryStatusSlice {
        pending: pending
            .data
            .into_iter()
            .map(|order| SalesOrderSlice::from_order(order, now))
            .collect(),
        accepted: accepted
            .data
            .into_iter()
            .map(|order| FactoryOrderSlice::from_factory_order(order, now))
            .collect(),
        pending_paging: Paging::new(FACTORY_STATUS, pending.paging),
        paging: Paging::new(FACTORY_STATUS, accepted.paging),
    })
}

/// Accepts the order named in `id` into the factory
pub fn submit_factory_status<'a>(
    store: Box<dyn OrderStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, FACTORY_STATUS, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }

    match action {
        FormAction::Accept | FormAction::Save => {
            let id = order_id(form)?;
            let mut errors = DataValidationError::new();
            let delivery_expected_date = data_validation::date(
                &mut errors,
                "delivery_expected_date",
                form.get("delivery_expected_date"),
                false,
            );
            let remark =
                data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);
            if !errors.is_empty() {
                return Err(ErrorResponse::invalid_form(errors, form.echo()));
            }

            let factory_order_id = store
                .accept_order(id, delivery_expected_date, remark, now)
                .map_err(|err| rejected(err, form))?;
            info!("Order {} accepted as factory order {}", id, factory_order_id);
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(FACTORY_STATUS))
}

/// Orders the factory has not accepted yet, which may still be split or cancelled
pub fn split_order_screen<'a>(
    store: Box<dyn OrderStore + 'a>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<OrderListSlice, ErrorResponse> {
    order_list(
        store.as_ref(),
        OrderFilter {
            factory_accepted: Some(false),
            ..OrderFilter::default()
        },
        SPLIT_ORDER,
        offset,
        limit,
        now,
    )
}

pub fn submit_split_order<'a>(
    store: Box<dyn OrderStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, SPLIT_ORDER, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = order_id(form)?;

    match action {
        FormAction::Split | FormAction::Save => {
            let mut errors = DataValidationError::new();
            let split_qty = data_validation::decimal(
                &mut errors,
                "split_qty",
                "Split quantity",
                form.get("split_qty"),
                true,
            );
            let split_qty = match split_qty {
                Some(split_qty) if errors.is_empty() => split_qty,
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            let new_id = store
                .split_order(id, split_qty)
                .map_err(|err| rejected(err, form))?;
            info!("Split {} from order {} into order {}", split_qty, id, new_id);
        }
        FormAction::Cancel => {
            store.cancel_order(id).map_err(|err| rejected(err, form))?;
            info!("Cancelled order {}", id);
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(SPLIT_ORDER))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    use crate::rest_api::resources::form::form;
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn taken() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 5, 6).and_hms(9, 15, 0)
    }

    const ORDER: &[(&str, &str)] = &[
        ("action", "save"),
        ("company", "Acme Paints"),
        ("address", "12 MG Road"),
        ("city", "Pune"),
        ("mobile1", "9876543210"),
        ("mobile2", "9876543211"),
        ("sales_person", "Ravi"),
        ("location", "Hadapsar"),
        ("product_name", "Gloss Enamel"),
        ("quantity", "10"),
        ("price", "250"),
        ("total_price", "2500"),
    ];

    fn place_order(factory: &dyn StoreFactory) -> i64 {
        submit_order(factory.get_order_store(), &form(ORDER), taken())
            .expect("Unable to create order");
        create_order_screen(factory.get_order_store(), 0, 10, taken())
            .expect("Unable to load orders")
            .data[0]
            .id
    }

    #[test]
    fn test_submit_order_validation() {
        let factory = in_memory_store_factory();

        let mut fields = ORDER.to_vec();
        fields.retain(|(key, _)| *key != "city" && *key != "total_price");
        fields.push(("total_price", "2600"));
        fields.push(("discount", "-1"));

        let err = submit_order(factory.get_order_store(), &form(&fields), taken())
            .expect_err("Invalid order accepted");

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.errors().get("city"),
            Some(&vec!["This field is required.".to_string()])
        );
        assert_eq!(
            err.errors().get("total_price"),
            Some(&vec![TOTAL_PRICE_TOO_HIGH.to_string()])
        );
        assert_eq!(
            err.errors().get("discount"),
            Some(&vec!["Discount cannot be negative.".to_string()])
        );
        assert!(create_order_screen(factory.get_order_store(), 0, 10, taken())
            .expect("Unable to load orders")
            .data
            .is_empty());
    }

    #[test]
    fn test_order_workflow() {
        let factory = in_memory_store_factory();
        let id = place_order(&*factory).to_string();
        let later = taken() + Duration::hours(3) + Duration::minutes(20);

        let pending = payments_screen(factory.get_order_store(), Some("pending"), 0, 10, later)
            .expect("Unable to load payments");
        assert_eq!(pending.data.len(), 1);
        assert_eq!(pending.data[0].time_span, "3 Hours 20 Minutes");

        // Accepting before the payment is cleared is refused with a message
        let err = submit_factory_status(
            factory.get_order_store(),
            &form(&[("action", "accept"), ("id", &id)]),
            later,
        )
        .expect_err("Uncleared order accepted");
        assert_eq!(err.messages().len(), 1);

        let err = submit_payment(factory.get_order_store(), &form(&[("id", &id)]))
            .expect_err("Missing bill number accepted");
        assert!(err.errors().contains_key("bill_no"));

        submit_payment(
            factory.get_order_store(),
            &form(&[("action", "save"), ("id", &id), ("bill_no", "B-101")]),
        )
        .expect("Unable to clear payment");

        let status = factory_status_screen(factory.get_order_store(), 0, 10, later)
            .expect("Unable to load factory status");
        assert_eq!(status.pending.len(), 1);
        assert!(status.accepted.is_empty());

        submit_factory_status(
            factory.get_order_store(),
            &form(&[
                ("action", "accept"),
                ("id", &id),
                ("delivery_expected_date", "2024-05-10"),
            ]),
            later,
        )
        .expect("Unable to accept order");

        let status = factory_status_screen(factory.get_order_store(), 0, 10, later)
            .expect("Unable to load factory status");
        assert!(status.pending.is_empty());
        assert_eq!(status.accepted.len(), 1);
        assert_eq!(status.accepted[0].time_span, "0 Days 3 Hours 20 Minutes");

        // Accepted orders can no longer be split
        let err = submit_split_order(
            factory.get_order_store(),
            &form(&[("action", "split"), ("id", &id), ("split_qty", "4")]),
        )
        .expect_err("Accepted order split");
        assert_eq!(err.messages().len(), 1);
    }

    #[test]
    fn test_factory_status_pages_pending_orders() {
        let factory = in_memory_store_factory();
        for _ in 0..3 {
            submit_order(factory.get_order_store(), &form(ORDER), taken())
                .expect("Unable to create order");
        }
        let store = factory.get_order_store();
        let orders = store
            .list_orders(OrderFilter::default(), 0, 10)
            .expect("Unable to list orders");
        for (n, order) in orders.data.iter().enumerate() {
            store
                .clear_payment(order.id, &format!("B-{}", n))
                .expect("Unable to clear payment");
        }

        let first = factory_status_screen(factory.get_order_store(), 0, 2, taken())
            .expect("Unable to load factory status");
        assert_eq!(first.pending.len(), 2);
        assert_eq!(first.pending_paging.total(), 3);

        let second = factory_status_screen(factory.get_order_store(), 2, 2, taken())
            .expect("Unable to load factory status");
        assert_eq!(second.pending.len(), 1);
        assert!(first.pending.iter().all(|order| order.id != second.pending[0].id));
    }

    #[test]
    fn test_split_and_cancel() {
        let factory = in_memory_store_factory();
        let id = place_order(&*factory).to_string();

        let err = submit_split_order(
            factory.get_order_store(),
            &form(&[("action", "split"), ("id", &id), ("split_qty", "10")]),
        )
        .expect_err("Split of the whole quantity accepted");
        assert_eq!(
            err.errors().get("split_qty"),
            Some(&vec!["Split quantity must be more than 0 and less than 10".to_string()])
        );

        submit_split_order(
            factory.get_order_store(),
            &form(&[("action", "split"), ("id", &id), ("split_qty", "4")]),
        )
        .expect("Unable to split order");

        let orders = split_order_screen(factory.get_order_store(), 0, 10, taken())
            .expect("Unable to load orders");
        assert_eq!(orders.data.len(), 2);
        assert!(orders.data.iter().all(|order| order.is_split));
        let mut quantities: Vec<_> = orders.data.iter().filter_map(|o| o.quantity).collect();
        quantities.sort();
        assert_eq!(quantities, vec![Decimal::from(4), Decimal::from(6)]);

        submit_split_order(
            factory.get_order_store(),
            &form(&[("action", "cancel"), ("id", &id)]),
        )
        .expect("Unable to cancel order");

        let orders = split_order_screen(factory.get_order_store(), 0, 10, taken())
            .expect("Unable to load orders");
        assert_eq!(orders.data.len(), 1);

        match submit_payment(
            factory.get_order_store(),
            &form(&[("action", "hold"), ("id", &id)]),
        ) {
            Err(err) => assert_eq!(err.status_code(), 404),
            Ok(redirect) => panic!("Expected 404, got {:?}", redirect),
        }
    }
}
