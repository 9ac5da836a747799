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

use crate::orders::{FactoryOrder, SalesOrder};
use crate::rest_api::resources::paging::v1::Paging;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesOrderSlice {
    pub id: i64,
    pub company: String,
    pub address: String,
    pub city: String,
    pub sales_person: String,
    pub location: String,
    pub mobile1: String,
    pub mobile2: String,
    pub product_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub remark: Option<String>,
    pub order_created: NaiveDateTime,
    pub bill_no: Option<String>,
    pub payment_cleared: bool,
    pub on_hold: bool,
    pub factory_accepted: bool,
    pub available_qty: Decimal,
    pub is_split: bool,
    /// Time since the order was taken, or the wait until the factory accepted it
    pub time_span: String,
}

impl SalesOrderSlice {
    pub fn from_order(order: SalesOrder, now: NaiveDateTime) -> Self {
        let time_span = match order.time_span_text.clone() {
            Some(text) if order.factory_accepted => text,
            _ => order.time_span(now),
        };

        Self {
            id: order.id,
            company: order.company,
            address: order.address,
            city: order.city,
            sales_person: order.sales_person,
            location: order.location,
            mobile1: order.mobile1,
            mobile2: order.mobile2,
            product_name: order.product_name,
            quantity: order.quantity,
            price: order.price,
            discount: order.discount,
            discount_amount: order.discount_amount,
            total_price: order.total_price,
            remark: order.remark,
            order_created: order.order_created,
            bill_no: order.bill_no,
            payment_cleared: order.payment_cleared,
            on_hold: order.on_hold,
            factory_accepted: order.factory_accepted,
            available_qty: order.available_qty,
            is_split: order.is_split,
            time_span,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactoryOrderSlice {
    pub id: i64,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub sales_person: String,
    pub order_created: NaiveDateTime,
    pub delivery_expected_date: Option<NaiveDate>,
    pub remark: Option<String>,
    pub time_span: String,
}

impl FactoryOrderSlice {
    pub fn from_factory_order(order: FactoryOrder, now: NaiveDateTime) -> Self {
        let time_span = order.time_span(now);
        Self {
            id: order.id,
            order_id: order.order_id,
            company_name: order.company_name,
            location: order.location,
            sales_person: order.sales_person,
            order_created: order.order_created,
            delivery_expected_date: order.delivery_expected_date,
            remark: order.remark,
            time_span,
        }
    }
}

/// A listing of orders, used by the create-order, payments and split-order screens
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderListSlice {
    pub data: Vec<SalesOrderSlice>,
    pub paging: Paging,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactoryStatusSlice {
    /// Cleared orders waiting for the factory, oldest first
    pub pending: Vec<SalesOrderSlice>,
    pub pending_paging: Paging,
    pub accepted: Vec<FactoryOrderSlice>,
    pub paging: Paging,
}
