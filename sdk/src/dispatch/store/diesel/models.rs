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

use chrono::{NaiveDate, NaiveDateTime};

use crate::dispatch::store::diesel::schema::*;
use crate::dispatch::store::{DispatchItem, Vehicle};
use crate::error::InternalError;
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "vehicle"]
pub struct NewVehicleModel {
    pub number: String,
    pub capacity_qty: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct VehicleModel {
    pub id: i64,
    pub number: String,
    pub capacity_qty: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "dispatch"]
pub struct NewDispatchModel {
    pub vehicle_id: i64,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct DispatchModel {
    pub id: i64,
    pub vehicle_id: i64,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

/// A pending item as written when an order is accepted or a partial load leaves a remainder
#[derive(Insertable, PartialEq, Debug)]
#[table_name = "dispatch_item"]
pub struct NewDispatchItemModel {
    pub dispatch_id: Option<i64>,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub available_qty: String,
    pub qty: String,
    pub ready_at: NaiveDateTime,
    pub dispatch_date: Option<NaiveDate>,
    pub bill_no: Option<String>,
}

#[derive(Queryable, PartialEq, Debug, Clone)]
pub struct DispatchItemModel {
    pub id: i64,
    pub dispatch_id: Option<i64>,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub available_qty: String,
    pub qty: String,
    pub ready_at: NaiveDateTime,
    pub dispatch_date: Option<NaiveDate>,
    pub bill_no: Option<String>,
}

impl From<Vehicle> for NewVehicleModel {
    fn from(vehicle: Vehicle) -> Self {
        NewVehicleModel {
            number: vehicle.number,
            capacity_qty: decimal_text(&vehicle.capacity_qty),
        }
    }
}

impl TryFrom<VehicleModel> for Vehicle {
    type Error = InternalError;

    fn try_from(model: VehicleModel) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: model.id,
            number: model.number,
            capacity_qty: decimal_column(&model.capacity_qty, "vehicle.capacity_qty")?,
        })
    }
}

impl TryFrom<DispatchItemModel> for DispatchItem {
    type Error = InternalError;

    fn try_from(model: DispatchItemModel) -> Result<Self, Self::Error> {
        Ok(DispatchItem {
            id: model.id,
            dispatch_id: model.dispatch_id,
            order_id: model.order_id,
            company_name: model.company_name,
            location: model.location,
            product: model.product,
            available_qty: decimal_column(&model.available_qty, "dispatch_item.available_qty")?,
            qty: decimal_column(&model.qty, "dispatch_item.qty")?,
            ready_at: model.ready_at,
            dispatch_date: model.dispatch_date,
            bill_no: model.bill_no,
        })
    }
}
