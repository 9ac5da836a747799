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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::paging::Paging;
use crate::timespan::{elapsed_text, DayDisplay};

pub use error::OrderStoreError;

/// A customer order as taken by the sales team and carried through payment, factory acceptance
/// and dispatch
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SalesOrder {
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
    /// Quantity handed over to dispatch when the factory accepted the order
    pub available_qty: Decimal,
    pub dispatch_date: Option<NaiveDate>,
    /// How long the order waited before the factory accepted it
    pub time_span_text: Option<String>,
    pub is_split: bool,
    pub is_cancelled: bool,
}

impl SalesOrder {
    /// Time since the order was created, e.g. `"2 Days 5 Hours 12 Minutes"` or
    /// `"5 Hours 12 Minutes"`
    pub fn time_span(&self, now: NaiveDateTime) -> String {
        elapsed_text(self.order_created, now, DayDisplay::WhenNonZero)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SalesOrderList {
    pub data: Vec<SalesOrder>,
    pub paging: Paging,
}

impl SalesOrderList {
    pub fn new(data: Vec<SalesOrder>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Narrows `list_orders`; unset fields match any value. Cancelled orders are never listed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderFilter {
    pub payment_cleared: Option<bool>,
    pub on_hold: Option<bool>,
    pub factory_accepted: Option<bool>,
}

/// The factory's record of an accepted order
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FactoryOrder {
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

impl FactoryOrder {
    /// Time since the order was created, always including the day count
    pub fn time_span(&self, now: NaiveDateTime) -> String {
        elapsed_text(self.order_created, now, DayDisplay::Always)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FactoryOrderList {
    pub data: Vec<FactoryOrder>,
    pub paging: Paging,
}

impl FactoryOrderList {
    pub fn new(data: Vec<FactoryOrder>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Store for sales orders and their factory records.
///
/// Operations that change an order fail with `NotFoundError` for unknown and cancelled orders
/// alike.
pub trait OrderStore: Send + Sync {
    /// Adds a new order. The workflow flags of the given order are stored as they are.
    fn add_order(&self, order: SalesOrder) -> Result<i64, OrderStoreError>;

    /// Fetches an order, including a cancelled one
    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError>;

    /// Lists orders that have not been cancelled, newest first
    ///
    /// # Arguments
    ///
    ///  * `filter` - Workflow flags the listed orders must have
    ///  * `offset` - The index of the first in storage to retrieve
    ///  * `limit` - The number of items to retrieve from the offset
    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError>;

    /// Marks the payment of an order as cleared against a bill and takes it off hold
    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError>;

    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError>;

    /// Lists orders whose payment is cleared and which the factory has yet to accept, oldest
    /// first
    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError>;

    /// Accepts an order into the factory.
    ///
    /// Marks the order accepted, makes its whole quantity available, records a factory order
    /// and queues a pending dispatch item, all in one transaction. Returns the id of the
    /// factory order. The order's payment must have been cleared and it must not already have
    /// been accepted.
    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError>;

    /// Lists factory orders, newest first
    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError>;

    /// Splits `split_qty` off an order into a new order, returning the new order's id.
    ///
    /// The new order copies the customer data and price of the original; total price and
    /// discount amount are shared out in proportion to the quantities. Both orders are marked
    /// as split. The split quantity must be more than zero and less than the order quantity,
    /// and an order the factory has accepted cannot be split.
    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError>;

    /// Cancels an order that the factory has not accepted
    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 1, 5).and_hms(10, 0, 0)
    }

    #[test]
    fn test_time_spans() {
        let order = FactoryOrder {
            id: 1,
            order_id: 4,
            company_name: "Acme".to_string(),
            location: "Pune".to_string(),
            sales_person: "Ravi".to_string(),
            order_created: created(),
            delivery_expected_date: None,
            remark: None,
            factory_accepted: true,
        };

        let now = created() + Duration::hours(5) + Duration::minutes(48);
        assert_eq!(order.time_span(now), "0 Days 5 Hours 48 Minutes");

        let now = created() + Duration::days(14) + Duration::hours(5) + Duration::minutes(48);
        assert_eq!(order.time_span(now), "14 Days 5 Hours 48 Minutes");
    }
}
