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

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::dispatch::{Dispatch, DispatchItem, Vehicle};
use crate::rest_api::resources::paging::v1::Paging;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleSlice {
    pub id: i64,
    pub number: String,
    pub capacity_qty: Decimal,
}

impl From<Vehicle> for VehicleSlice {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            number: vehicle.number,
            capacity_qty: vehicle.capacity_qty,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleScreenSlice {
    pub selected: Option<VehicleSlice>,
    pub data: Vec<VehicleSlice>,
    pub paging: Paging,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DispatchItemSlice {
    pub id: i64,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub available_qty: Decimal,
    pub qty: Decimal,
    pub ready_at: NaiveDateTime,
    pub dispatch_date: Option<NaiveDate>,
    pub bill_no: Option<String>,
    /// Waiting time of a pending item
    pub delay: Option<String>,
}

impl DispatchItemSlice {
    pub fn from_item(item: DispatchItem, now: NaiveDateTime) -> Self {
        let delay = if item.is_pending() {
            Some(item.delay_text(now))
        } else {
            None
        };

        Self {
            id: item.id,
            order_id: item.order_id,
            company_name: item.company_name,
            location: item.location,
            product: item.product,
            available_qty: item.available_qty,
            qty: item.qty,
            ready_at: item.ready_at,
            dispatch_date: item.dispatch_date,
            bill_no: item.bill_no,
            delay,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DispatchSlice {
    pub id: i64,
    pub vehicle: VehicleSlice,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub total_qty: Decimal,
    pub load_percentage: Decimal,
    pub items: Vec<DispatchItemSlice>,
}

impl DispatchSlice {
    pub fn from_dispatch(dispatch: Dispatch, now: NaiveDateTime) -> Self {
        let total_qty = dispatch.total_qty();
        let load_percentage = dispatch.load_percentage();

        Self {
            id: dispatch.id,
            vehicle: VehicleSlice::from(dispatch.vehicle),
            remark: dispatch.remark,
            created_at: dispatch.created_at,
            total_qty,
            load_percentage,
            items: dispatch
                .items
                .into_iter()
                .map(|item| DispatchItemSlice::from_item(item, now))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DispatchScreenSlice {
    pub selected: Option<DispatchSlice>,
    /// Items waiting for a vehicle, longest waiting first
    pub pending: Vec<DispatchItemSlice>,
    pub vehicles: Vec<VehicleSlice>,
    pub data: Vec<DispatchSlice>,
    pub paging: Paging,
}
