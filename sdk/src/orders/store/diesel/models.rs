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
use rust_decimal::Decimal;

use crate::error::InternalError;
use crate::orders::store::diesel::schema::*;
use crate::orders::store::{FactoryOrder, SalesOrder};
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "sales_order"]
pub struct NewSalesOrderModel {
    pub company: String,
    pub address: String,
    pub city: String,
    pub sales_person: String,
    pub location: String,
    pub mobile1: String,
    pub mobile2: String,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub discount: Option<String>,
    pub discount_amount: Option<String>,
    pub total_price: Option<String>,
    pub remark: Option<String>,
    pub order_created: NaiveDateTime,
    pub bill_no: Option<String>,
    pub payment_cleared: bool,
    pub on_hold: bool,
    pub factory_accepted: bool,
    pub available_qty: String,
    pub dispatch_date: Option<NaiveDate>,
    pub time_span_text: Option<String>,
    pub is_split: bool,
    pub is_cancelled: bool,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct SalesOrderModel {
    pub id: i64,
    pub company: String,
    pub address: String,
    pub city: String,
    pub sales_person: String,
    pub location: String,
    pub mobile1: String,
    pub mobile2: String,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub discount: Option<String>,
    pub discount_amount: Option<String>,
    pub total_price: Option<String>,
    pub remark: Option<String>,
    pub order_created: NaiveDateTime,
    pub bill_no: Option<String>,
    pub payment_cleared: bool,
    pub on_hold: bool,
    pub factory_accepted: bool,
    pub available_qty: String,
    pub dispatch_date: Option<NaiveDate>,
    pub time_span_text: Option<String>,
    pub is_split: bool,
    pub is_cancelled: bool,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "factory_order"]
pub struct NewFactoryOrderModel {
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub sales_person: String,
    pub order_created: NaiveDateTime,
    pub delivery_expected_date: Option<NaiveDate>,
    pub remark: Option<String>,
    pub factory_accepted: bool,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct FactoryOrderModel {
    pub id: i64,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub sales_person: String,
    pub order_created: NaiveDateTime,
    pub delivery_expected_date: Option<NaiveDate>,
    pub remark: Option<String>,
    pub factory_accepted: bool,
}

fn optional_decimal(
    value: &Option<String>,
    column: &str,
) -> Result<Option<Decimal>, InternalError> {
    value
        .as_ref()
        .map(|value| decimal_column(value, column))
        .transpose()
}

impl From<&SalesOrder> for NewSalesOrderModel {
    fn from(order: &SalesOrder) -> Self {
        NewSalesOrderModel {
            company: order.company.clone(),
            address: order.address.clone(),
            city: order.city.clone(),
            sales_person: order.sales_person.clone(),
            location: order.location.clone(),
            mobile1: order.mobile1.clone(),
            mobile2: order.mobile2.clone(),
            product_name: order.product_name.clone(),
            quantity: order.quantity.as_ref().map(decimal_text),
            price: order.price.as_ref().map(decimal_text),
            discount: order.discount.as_ref().map(decimal_text),
            discount_amount: order.discount_amount.as_ref().map(decimal_text),
            total_price: order.total_price.as_ref().map(decimal_text),
            remark: order.remark.clone(),
            order_created: order.order_created,
            bill_no: order.bill_no.clone(),
            payment_cleared: order.payment_cleared,
            on_hold: order.on_hold,
            factory_accepted: order.factory_accepted,
            available_qty: decimal_text(&order.available_qty),
            dispatch_date: order.dispatch_date,
            time_span_text: order.time_span_text.clone(),
            is_split: order.is_split,
            is_cancelled: order.is_cancelled,
        }
    }
}

impl TryFrom<SalesOrderModel> for SalesOrder {
    type Error = InternalError;

    fn try_from(model: SalesOrderModel) -> Result<Self, Self::Error> {
        Ok(SalesOrder {
            quantity: optional_decimal(&model.quantity, "sales_order.quantity")?,
            price: optional_decimal(&model.price, "sales_order.price")?,
            discount: optional_decimal(&model.discount, "sales_order.discount")?,
            discount_amount: optional_decimal(
                &model.discount_amount,
                "sales_order.discount_amount",
            )?,
            total_price: optional_decimal(&model.total_price, "sales_order.total_price")?,
            available_qty: decimal_column(&model.available_qty, "sales_order.available_qty")?,
            id: model.id,
            company: model.company,
            address: model.address,
            city: model.city,
            sales_person: model.sales_person,
            location: model.location,
            mobile1: model.mobile1,
            mobile2: model.mobile2,
            product_name: model.product_name,
            remark: model.remark,
            order_created: model.order_created,
            bill_no: model.bill_no,
            payment_cleared: model.payment_cleared,
            on_hold: model.on_hold,
            factory_accepted: model.factory_accepted,
            dispatch_date: model.dispatch_date,
            time_span_text: model.time_span_text,
            is_split: model.is_split,
            is_cancelled: model.is_cancelled,
        })
    }
}

impl From<FactoryOrderModel> for FactoryOrder {
    fn from(model: FactoryOrderModel) -> Self {
        FactoryOrder {
            id: model.id,
            order_id: model.order_id,
            company_name: model.company_name,
            location: model.location,
            sales_person: model.sales_person,
            order_created: model.order_created,
            delivery_expected_date: model.delivery_expected_date,
            remark: model.remark,
            factory_accepted: model.factory_accepted,
        }
    }
}
