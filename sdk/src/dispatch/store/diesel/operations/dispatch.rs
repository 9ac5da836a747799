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

use std::collections::HashSet;
use std::convert::TryFrom;

use rust_decimal::Decimal;

use super::DispatchStoreOperations;
use crate::dispatch::store::diesel::{
    models::{
        DispatchItemModel, DispatchModel, NewDispatchItemModel, NewDispatchModel, VehicleModel,
    },
    schema::{dispatch, dispatch_item, vehicle},
};
use crate::dispatch::store::{
    Dispatch, DispatchAssignment, DispatchItem, DispatchList, DispatchStoreError, Vehicle,
};
use crate::error::{InvalidArgumentError, InvalidStateError};
use crate::paging::Paging;
use crate::store::{decimal_text, LastInsertId};

use diesel::prelude::*;

pub(in crate::dispatch::store::diesel) trait DispatchStoreDispatchOperations {
    fn add_dispatch(
        &self,
        header: NewDispatchModel,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError>;
    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError>;
    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DispatchStoreDispatchOperations for DispatchStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_dispatch(
        &self,
        header: NewDispatchModel,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            if assignments.is_empty() {
                return Err(DispatchStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "assignments".to_string(),
                        "Select at least one item to dispatch".to_string(),
                    ),
                ));
            }

            let vehicle = vehicle::table
                .find(header.vehicle_id)
                .first::<VehicleModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    DispatchStoreError::NotFoundError(format!(
                        "Could not find vehicle with id: {}",
                        header.vehicle_id
                    ))
                })?;
            let vehicle = Vehicle::try_from(vehicle)?;

            let mut seen = HashSet::new();
            let mut loads = Vec::with_capacity(assignments.len());
            let mut total = Decimal::ZERO;

            for assignment in &assignments {
                if !seen.insert(assignment.item_id) {
                    return Err(DispatchStoreError::InvalidArgumentError(
                        InvalidArgumentError::new(
                            "assignments".to_string(),
                            format!("Dispatch item {} is selected twice", assignment.item_id),
                        ),
                    ));
                }

                let item = dispatch_item::table
                    .find(assignment.item_id)
                    .first::<DispatchItemModel>(self.conn)
                    .map(Some)
                    .or_else(|err| {
                        if err == diesel::result::Error::NotFound {
                            Ok(None)
                        } else {
                            Err(err)
                        }
                    })?
                    .ok_or_else(|| {
                        DispatchStoreError::NotFoundError(format!(
                            "Could not find dispatch item with id: {}",
                            assignment.item_id
                        ))
                    })?;
                let item = DispatchItem::try_from(item)?;

                if !item.is_pending() {
                    return Err(DispatchStoreError::InvalidStateError(
                        InvalidStateError::with_message(format!(
                            "Dispatch item {} has already been dispatched",
                            item.id
                        )),
                    ));
                }

                if assignment.qty <= Decimal::ZERO || assignment.qty > item.available_qty {
                    return Err(DispatchStoreError::InvalidArgumentError(
                        InvalidArgumentError::new(
                            "qty".to_string(),
                            format!(
                                "Quantity for order {} must be more than 0 and at most {}",
                                item.order_id, item.available_qty
                            ),
                        ),
                    ));
                }

                total += assignment.qty;
                loads.push((item, assignment));
            }

            if total > vehicle.capacity_qty {
                return Err(DispatchStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "qty".to_string(),
                        format!(
                            "Total quantity {} exceeds the capacity {} of vehicle {}",
                            total, vehicle.capacity_qty, vehicle.number
                        ),
                    ),
                ));
            }

            diesel::insert_into(dispatch::table)
                .values(&header)
                .execute(self.conn)?;
            let dispatch_id = self.conn.last_insert_id()?;

            for (item, assignment) in loads {
                diesel::update(dispatch_item::table.find(item.id))
                    .set((
                        dispatch_item::dispatch_id.eq(Some(dispatch_id)),
                        dispatch_item::qty.eq(decimal_text(&assignment.qty)),
                        dispatch_item::dispatch_date.eq(assignment.dispatch_date),
                        dispatch_item::bill_no.eq(assignment.bill_no.clone()),
                    ))
                    .execute(self.conn)?;

                let remaining = item.available_qty - assignment.qty;
                if remaining > Decimal::ZERO {
                    diesel::insert_into(dispatch_item::table)
                        .values(&NewDispatchItemModel {
                            dispatch_id: None,
                            order_id: item.order_id,
                            company_name: item.company_name,
                            location: item.location,
                            product: item.product,
                            available_qty: decimal_text(&remaining),
                            qty: decimal_text(&Decimal::ZERO),
                            ready_at: item.ready_at,
                            dispatch_date: None,
                            bill_no: item.bill_no,
                        })
                        .execute(self.conn)?;
                }
            }

            debug!(
                "Dispatched {} on vehicle {} as dispatch {}",
                total, vehicle.number, dispatch_id
            );

            Ok(dispatch_id)
        })
    }

    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let model = dispatch::table
                .filter(dispatch::id.eq(id))
                .first::<DispatchModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?;

            let model = match model {
                Some(model) => model,
                None => return Ok(None),
            };

            let vehicle = vehicle::table
                .find(model.vehicle_id)
                .first::<VehicleModel>(self.conn)?;

            let items = dispatch_item::table
                .filter(dispatch_item::dispatch_id.eq(model.id))
                .order(dispatch_item::id.asc())
                .load::<DispatchItemModel>(self.conn)?
                .into_iter()
                .map(DispatchItem::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(Dispatch {
                id: model.id,
                vehicle: Vehicle::try_from(vehicle)?,
                remark: model.remark,
                created_at: model.created_at,
                items,
            }))
        })
    }

    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = dispatch::table
                .inner_join(vehicle::table)
                .select((dispatch::all_columns, vehicle::all_columns))
                .order((dispatch::created_at.desc(), dispatch::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<(DispatchModel, VehicleModel)>(self.conn)?;

            let total = dispatch::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for (model, vehicle) in models {
                let items = dispatch_item::table
                    .filter(dispatch_item::dispatch_id.eq(model.id))
                    .order(dispatch_item::id.asc())
                    .load::<DispatchItemModel>(self.conn)?
                    .into_iter()
                    .map(DispatchItem::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                data.push(Dispatch {
                    id: model.id,
                    vehicle: Vehicle::try_from(vehicle)?,
                    remark: model.remark,
                    created_at: model.created_at,
                    items,
                });
            }

            Ok(DispatchList::new(data, Paging::new(offset, limit, total)))
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DispatchStoreDispatchOperations
    for DispatchStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_dispatch(
        &self,
        header: NewDispatchModel,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            if assignments.is_empty() {
                return Err(DispatchStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "assignments".to_string(),
                        "Select at least one item to dispatch".to_string(),
                    ),
                ));
            }

            let vehicle = vehicle::table
                .find(header.vehicle_id)
                .first::<VehicleModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    DispatchStoreError::NotFoundError(format!(
                        "Could not find vehicle with id: {}",
                        header.vehicle_id
                    ))
                })?;
            let vehicle = Vehicle::try_from(vehicle)?;

            let mut seen = HashSet::new();
            let mut loads = Vec::with_capacity(assignments.len());
            let mut total = Decimal::ZERO;

            for assignment in &assignments {
                if !seen.insert(assignment.item_id) {
                    return Err(DispatchStoreError::InvalidArgumentError(
                        InvalidArgumentError::new(
                            "assignments".to_string(),
                            format!("Dispatch item {} is selected twice", assignment.item_id),
                        ),
                    ));
                }

                let item = dispatch_item::table
                    .find(assignment.item_id)
                    .first::<DispatchItemModel>(self.conn)
                    .map(Some)
                    .or_else(|err| {
                        if err == diesel::result::Error::NotFound {
                            Ok(None)
                        } else {
                            Err(err)
                        }
                    })?
                    .ok_or_else(|| {
                        DispatchStoreError::NotFoundError(format!(
                            "Could not find dispatch item with id: {}",
                            assignment.item_id
                        ))
                    })?;
                let item = DispatchItem::try_from(item)?;

                if !item.is_pending() {
                    return Err(DispatchStoreError::InvalidStateError(
                        InvalidStateError::with_message(format!(
                            "Dispatch item {} has already been dispatched",
                            item.id
                        )),
                    ));
                }

                if assignment.qty <= Decimal::ZERO || assignment.qty > item.available_qty {
                    return Err(DispatchStoreError::InvalidArgumentError(
                        InvalidArgumentError::new(
                            "qty".to_string(),
                            format!(
                                "Quantity for order {} must be more than 0 and at most {}",
                                item.order_id, item.available_qty
                            ),
                        ),
                    ));
                }

                total += assignment.qty;
                loads.push((item, assignment));
            }

            if total > vehicle.capacity_qty {
                return Err(DispatchStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "qty".to_string(),
                        format!(
                            "Total quantity {} exceeds the capacity {} of vehicle {}",
                            total, vehicle.capacity_qty, vehicle.number
                        ),
                    ),
                ));
            }

            diesel::insert_into(dispatch::table)
                .values(&header)
                .execute(self.conn)?;
            let dispatch_id = self.conn.last_insert_id()?;

            for (item, assignment) in loads {
                diesel::update(dispatch_item::table.find(item.id))
                    .set((
                        dispatch_item::dispatch_id.eq(Some(dispatch_id)),
                        dispatch_item::qty.eq(decimal_text(&assignment.qty)),
                        dispatch_item::dispatch_date.eq(assignment.dispatch_date),
                        dispatch_item::bill_no.eq(assignment.bill_no.clone()),
                    ))
                    .execute(self.conn)?;

                let remaining = item.available_qty - assignment.qty;
                if remaining > Decimal::ZERO {
                    diesel::insert_into(dispatch_item::table)
                        .values(&NewDispatchItemModel {
                            dispatch_id: None,
                            order_id: item.order_id,
                            company_name: item.company_name,
                            location: item.location,
                            product: item.product,
                            available_qty: decimal_text(&remaining),
                            qty: decimal_text(&Decimal::ZERO),
                            ready_at: item.ready_at,
                            dispatch_date: None,
                            bill_no: item.bill_no,
                        })
                        .execute(self.conn)?;
                }
            }

            debug!(
                "Dispatched {} on vehicle {} as dispatch {}",
                total, vehicle.number, dispatch_id
            );

            Ok(dispatch_id)
        })
    }

    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let model = dispatch::table
                .filter(dispatch::id.eq(id))
                .first::<DispatchModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?;

            let model = match model {
                Some(model) => model,
                None => return Ok(None),
            };

            let vehicle = vehicle::table
                .find(model.vehicle_id)
                .first::<VehicleModel>(self.conn)?;

            let items = dispatch_item::table
                .filter(dispatch_item::dispatch_id.eq(model.id))
                .order(dispatch_item::id.asc())
                .load::<DispatchItemModel>(self.conn)?
                .into_iter()
                .map(DispatchItem::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(Dispatch {
                id: model.id,
                vehicle: Vehicle::try_from(vehicle)?,
                remark: model.remark,
                created_at: model.created_at,
                items,
            }))
        })
    }

    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = dispatch::table
                .inner_join(vehicle::table)
                .select((dispatch::all_columns, vehicle::all_columns))
                .order((dispatch::created_at.desc(), dispatch::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<(DispatchModel, VehicleModel)>(self.conn)?;

            let total = dispatch::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for (model, vehicle) in models {
                let items = dispatch_item::table
                    .filter(dispatch_item::dispatch_id.eq(model.id))
                    .order(dispatch_item::id.asc())
                    .load::<DispatchItemModel>(self.conn)?
                    .into_iter()
                    .map(DispatchItem::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                data.push(Dispatch {
                    id: model.id,
                    vehicle: Vehicle::try_from(vehicle)?,
                    remark: model.remark,
                    created_at: model.created_at,
                    items,
                });
            }

            Ok(DispatchList::new(data, Paging::new(offset, limit, total)))
        })
    }
}
