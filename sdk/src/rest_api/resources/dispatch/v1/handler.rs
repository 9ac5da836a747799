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

use crate::data_validation::{self, DataValidationError, INVALID_CHOICE};
use crate::dispatch::{DispatchAssignment, DispatchStore, DispatchStoreError, Vehicle};
use crate::error::ConstraintViolationType;
use crate::rest_api::resources::{
    dashboard::v1::OPERATIONS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const VEHICLES: &str = "/operations/vehicles/";
pub const DISPATCH_ORDER: &str = "/operations/dispatch-order/";

pub const DUPLICATE_VEHICLE: &str = "Vehicle with this number already exists.";
pub const VEHICLE_IN_USE: &str = "This vehicle has dispatches and cannot be deleted.";

const CHOICE_LIMIT: i64 = 1024;

fn store_error(err: DispatchStoreError) -> ErrorResponse {
    match err {
        DispatchStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        DispatchStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        DispatchStoreError::InvalidArgumentError(err) => ErrorResponse::new(400, err.message()),
        DispatchStoreError::InvalidStateError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        DispatchStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        DispatchStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
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

pub fn vehicle_screen<'a>(
    store: Box<dyn DispatchStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<VehicleScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => match store.fetch_vehicle(id).map_err(store_error)? {
            Some(vehicle) => Some(VehicleSlice::from(vehicle)),
            None => return Err(ErrorResponse::new(404, &format!("Vehicle {} not found", id))),
        },
        None => None,
    };

    let vehicles = store.list_vehicles(offset, limit).map_err(store_error)?;

    Ok(VehicleScreenSlice {
        selected,
        data: vehicles.data.into_iter().map(VehicleSlice::from).collect(),
        paging: Paging::new(VEHICLES, vehicles.paging),
    })
}

pub fn submit_vehicle<'a>(
    store: Box<dyn DispatchStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, VEHICLES, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            let id = id.ok_or_else(|| ErrorResponse::new(400, "Select a vehicle to delete"))?;
            match store.delete_vehicle(id) {
                Err(DispatchStoreError::ConstraintViolationError(ref err))
                    if err.violation_type() == &ConstraintViolationType::ForeignKey =>
                {
                    return Err(ErrorResponse::invalid_form(
                        DataValidationError::with_message(VEHICLE_IN_USE),
                        form.echo(),
                    ));
                }
                res => res.map_err(store_error)?,
            }
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let number =
                data_validation::required_text(&mut errors, "number", form.get("number"), 20)
                    .map(|number| number.to_uppercase());
            let capacity_qty = data_validation::decimal(
                &mut errors,
                "capacity_qty",
                "Capacity",
                form.get("capacity_qty"),
                true,
            );

            let vehicle = match (number, capacity_qty) {
                (Some(number), Some(capacity_qty)) if errors.is_empty() => Vehicle {
                    id: id.unwrap_or(0),
                    number,
                    capacity_qty,
                },
                _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
            };

            let saved = match id {
                Some(_) => store.update_vehicle(vehicle),
                None => store.add_vehicle(vehicle).map(|_| ()),
            };
            match saved {
                Err(DispatchStoreError::ConstraintViolationError(ref err))
                    if err.violation_type() == &ConstraintViolationType::Unique =>
                {
                    return Err(ErrorResponse::invalid_form(
                        DataValidationError::with_field_error("number", DUPLICATE_VEHICLE),
                        form.echo(),
                    ));
                }
                res => res.map_err(store_error)?,
            }
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(VEHICLES))
}

pub fn dispatch_screen<'a>(
    store: Box<dyn DispatchStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
    now: NaiveDateTime,
) -> Result<DispatchScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => match store.fetch_dispatch(id).map_err(store_error)? {
            Some(dispatch) => Some(DispatchSlice::from_dispatch(dispatch, now)),
            None => return Err(ErrorResponse::new(404, &format!("Dispatch {} not found", id))),
        },
        None => None,
    };

    let pending = store
        .list_pending_items(0, CHOICE_LIMIT)
        .map_err(store_error)?;
    let vehicles = store
        .list_vehicles(0, CHOICE_LIMIT)
        .map_err(store_error)?;
    let dispatches = store.list_dispatches(offset, limit).map_err(store_error)?;

    Ok(DispatchScreenSlice {
        selected,
        pending: pending
            .data
            .into_iter()
            .map(|item| DispatchItemSlice::from_item(item, now))
            .collect(),
        vehicles: vehicles.data.into_iter().map(VehicleSlice::from).collect(),
        data: dispatches
            .data
            .into_iter()
            .map(|dispatch| DispatchSlice::from_dispatch(dispatch, now))
            .collect(),
        paging: Paging::new(DISPATCH_ORDER, dispatches.paging),
    })
}

/// Loads the ticked `items-<n>-*` rows onto the chosen vehicle. Each row carries the pending
/// `item_id`, a `selected` checkbox, the `qty` to load and optionally a `dispatch_date` and
/// `bill_no`.
pub fn submit_dispatch<'a>(
    store: Box<dyn DispatchStore + 'a>,
    form: &FormData,
    now: NaiveDateTime,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, DISPATCH_ORDER, OPERATIONS_DASHBOARD) {
        return Ok(redirect);
    }
    if !action.is_save() {
        return Err(unsupported(action));
    }

    let mut errors = DataValidationError::new();
    let vehicle_id = data_validation::id(&mut errors, "vehicle_id", form.get("vehicle_id"), true);
    let remark = data_validation::optional_text(&mut errors, "remark", form.get("remark"), 500);

    if let Some(vehicle_id) = vehicle_id {
        if store.fetch_vehicle(vehicle_id).map_err(store_error)?.is_none() {
            errors.add_field_error("vehicle_id", INVALID_CHOICE);
        }
    }

    let mut assignments = Vec::new();
    for row in form
        .rows("items")
        .into_iter()
        .filter(|row| matches!(row.get("selected"), "on" | "true" | "1"))
    {
        let item_id =
            data_validation::id(&mut errors, &row.field_name("item_id"), row.get("item_id"), true);
        let qty = data_validation::decimal(
            &mut errors,
            &row.field_name("qty"),
            "Quantity",
            row.get("qty"),
            true,
        );
        let dispatch_date = data_validation::date(
            &mut errors,
            &row.field_name("dispatch_date"),
            row.get("dispatch_date"),
            false,
        );
        let bill_no = data_validation::optional_text(
            &mut errors,
            &row.field_name("bill_no"),
            row.get("bill_no"),
            50,
        );

        if let (Some(item_id), Some(qty)) = (item_id, qty) {
            assignments.push(DispatchAssignment {
                item_id,
                qty,
                dispatch_date,
                bill_no,
            });
        }
    }

    let vehicle_id = match vehicle_id {
        Some(vehicle_id) if errors.is_empty() => vehicle_id,
        _ => return Err(ErrorResponse::invalid_form(errors, form.echo())),
    };

    let id = store
        .add_dispatch(
            vehicle_id,
            remark.as_deref().unwrap_or(""),
            now,
            assignments,
        )
        .map_err(|err| match err {
            DispatchStoreError::InvalidArgumentError(err) => ErrorResponse::invalid_form(
                DataValidationError::with_message(err.message()),
                form.echo(),
            ),
            DispatchStoreError::InvalidStateError(err) => ErrorResponse::invalid_form(
                DataValidationError::with_message(&err.to_string()),
                form.echo(),
            ),
            err => store_error(err),
        })?;
    info!("Created dispatch {} on vehicle {}", id, vehicle_id);

    Ok(Redirect::to(DISPATCH_ORDER))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::rest_api::resources::form::form;
    use crate::store::in_memory_store_factory;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 7, 1).and_hms(14, 0, 0)
    }

    #[test]
    fn test_vehicle_number_is_unique() {
        let factory = in_memory_store_factory();

        submit_vehicle(
            factory.get_dispatch_store(),
            &form(&[("number", "mh12ab1234"), ("capacity_qty", "500")]),
        )
        .expect("Unable to save vehicle");

        let err = submit_vehicle(
            factory.get_dispatch_store(),
            &form(&[("number", "MH12AB1234"), ("capacity_qty", "800")]),
        )
        .expect_err("Duplicate vehicle accepted");
        assert_eq!(
            err.errors().get("number"),
            Some(&vec![DUPLICATE_VEHICLE.to_string()])
        );

        let err = submit_vehicle(
            factory.get_dispatch_store(),
            &form(&[("number", "MH12CD5678"), ("capacity_qty", "-1")]),
        )
        .expect_err("Negative capacity accepted");
        assert_eq!(
            err.errors().get("capacity_qty"),
            Some(&vec!["Capacity cannot be negative.".to_string()])
        );

        let vehicles = vehicle_screen(factory.get_dispatch_store(), None, 0, 10)
            .expect("Unable to load vehicles");
        assert_eq!(vehicles.data.len(), 1);
        assert_eq!(vehicles.data[0].number, "MH12AB1234");
    }

    #[cfg(feature = "orders")]
    #[test]
    fn test_dispatch_pending_item() {
        use crate::orders::SalesOrder;

        let factory = in_memory_store_factory();
        let orders = factory.get_order_store();
        let order_id = orders
            .add_order(SalesOrder {
                id: 0,
                company: "Acme Paints".to_string(),
                address: "12 MG Road".to_string(),
                city: "Pune".to_string(),
                sales_person: "Ravi".to_string(),
                location: "Hadapsar".to_string(),
                mobile1: "9876543210".to_string(),
                mobile2: "9876543211".to_string(),
                product_name: Some("Gloss Enamel".to_string()),
                quantity: Some(Decimal::from(300)),
                price: None,
                discount: None,
                discount_amount: None,
                total_price: None,
                remark: None,
                order_created: now(),
                bill_no: None,
                payment_cleared: false,
                on_hold: false,
                factory_accepted: false,
                available_qty: Decimal::ZERO,
                dispatch_date: None,
                time_span_text: None,
                is_split: false,
                is_cancelled: false,
            })
            .expect("Unable to add order");
        orders
            .clear_payment(order_id, "B-7")
            .expect("Unable to clear payment");
        orders
            .accept_order(order_id, None, None, now())
            .expect("Unable to accept order");

        submit_vehicle(
            factory.get_dispatch_store(),
            &form(&[("number", "MH12AB1234"), ("capacity_qty", "200")]),
        )
        .expect("Unable to save vehicle");

        let screen = dispatch_screen(factory.get_dispatch_store(), None, 0, 10, now())
            .expect("Unable to load screen");
        assert_eq!(screen.pending.len(), 1);
        let vehicle_id = screen.vehicles[0].id.to_string();
        let item_id = screen.pending[0].id.to_string();

        // Unticked rows are ignored and 300 does not fit a 200 capacity vehicle
        let err = submit_dispatch(
            factory.get_dispatch_store(),
            &form(&[
                ("vehicle_id", &vehicle_id),
                ("items-0-item_id", &item_id),
                ("items-0-selected", "on"),
                ("items-0-qty", "300"),
                ("items-1-item_id", "999"),
                ("items-1-qty", "5"),
            ]),
            now(),
        )
        .expect_err("Overloaded vehicle accepted");
        assert_eq!(err.messages().len(), 1);

        submit_dispatch(
            factory.get_dispatch_store(),
            &form(&[
                ("vehicle_id", &vehicle_id),
                ("remark", "First load"),
                ("items-0-item_id", &item_id),
                ("items-0-selected", "on"),
                ("items-0-qty", "150"),
                ("items-0-dispatch_date", "2024-07-02"),
                ("items-0-bill_no", "INV-1"),
            ]),
            now(),
        )
        .expect("Unable to dispatch");

        let screen = dispatch_screen(factory.get_dispatch_store(), None, 0, 10, now())
            .expect("Unable to load screen");
        assert_eq!(screen.data.len(), 1);
        assert_eq!(screen.data[0].total_qty, Decimal::from(150));
        assert_eq!(screen.data[0].load_percentage, Decimal::from(75));
        // The rest of the order stays pending
        assert_eq!(screen.pending.len(), 1);
        assert_eq!(screen.pending[0].available_qty, Decimal::from(150));

        let err = submit_vehicle(
            factory.get_dispatch_store(),
            &form(&[("action", "delete"), ("id", &vehicle_id)]),
        )
        .expect_err("Vehicle in use deleted");
        assert_eq!(err.messages(), &[VEHICLE_IN_USE.to_string()]);
    }
}
