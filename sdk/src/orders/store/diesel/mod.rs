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

pub(in crate) mod models;
mod operations;
pub(in crate) mod schema;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::r2d2::{ConnectionManager, Pool};
use rust_decimal::Decimal;

use super::{
    FactoryOrderList, OrderFilter, OrderStore, OrderStoreError, SalesOrder, SalesOrderList,
};
use models::NewSalesOrderModel;
use operations::factory::OrderStoreFactoryOperations;
use operations::order::OrderStoreOrderOperations;
use operations::OrderStoreOperations;

/// Manages sales orders and factory orders in the database
#[derive(Clone)]
pub struct DieselOrderStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselOrderStore<C> {
    /// Creates a new DieselOrderStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselOrderStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl OrderStore for DieselOrderStore<diesel::pg::PgConnection> {
    fn add_order(&self, order: SalesOrder) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?)
            .add_order(NewSalesOrderModel::from(&order))
    }

    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).fetch_order(id)
    }

    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).list_orders(filter, offset, limit)
    }

    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).clear_payment(id, bill_no)
    }

    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).set_on_hold(id, on_hold)
    }

    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?)
            .list_pending_factory(offset, limit)
    }

    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).accept_order(
            id,
            delivery_expected_date,
            remark,
            accepted_at,
        )
    }

    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).list_factory_orders(offset, limit)
    }

    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).split_order(id, split_qty)
    }

    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).cancel_order(id)
    }
}

#[cfg(feature = "sqlite")]
impl OrderStore for DieselOrderStore<diesel::sqlite::SqliteConnection> {
    fn add_order(&self, order: SalesOrder) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?)
            .add_order(NewSalesOrderModel::from(&order))
    }

    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).fetch_order(id)
    }

    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).list_orders(filter, offset, limit)
    }

    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).clear_payment(id, bill_no)
    }

    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).set_on_hold(id, on_hold)
    }

    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?)
            .list_pending_factory(offset, limit)
    }

    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).accept_order(
            id,
            delivery_expected_date,
            remark,
            accepted_at,
        )
    }

    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).list_factory_orders(offset, limit)
    }

    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).split_order(id, split_qty)
    }

    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError> {
        OrderStoreOperations::new(&*self.connection_pool.get()?).cancel_order(id)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::Duration;

    use crate::store::in_memory_store_factory;

    fn decimal(value: &str) -> Decimal {
        value.parse().expect("Invalid decimal")
    }

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 1, 5).and_hms(10, 0, 0)
    }

    fn order(company: &str) -> SalesOrder {
        SalesOrder {
            id: 0,
            company: company.to_string(),
            address: "Plot 7, MIDC".to_string(),
            city: "Nashik".to_string(),
            sales_person: "Ravi".to_string(),
            location: "Satpur".to_string(),
            mobile1: "9876543210".to_string(),
            mobile2: "9876543211".to_string(),
            product_name: Some("Enamel White".to_string()),
            quantity: Some(decimal("100")),
            price: Some(decimal("25")),
            discount: Some(decimal("0")),
            discount_amount: Some(decimal("100")),
            total_price: Some(decimal("2400")),
            remark: None,
            order_created: created(),
            bill_no: None,
            payment_cleared: false,
            on_hold: false,
            factory_accepted: false,
            available_qty: Decimal::ZERO,
            dispatch_date: None,
            time_span_text: None,
            is_split: false,
            is_cancelled: false,
        }
    }

    #[test]
    fn test_payment_clearance() {
        let factory = in_memory_store_factory();
        let store = factory.get_order_store();

        let first = store.add_order(order("Acme Paints")).expect("Unable to add order");
        let second = store.add_order(order("Bright Coats")).expect("Unable to add order");

        store.set_on_hold(second, true).expect("Unable to hold order");
        store
            .clear_payment(first, "B-101")
            .expect("Unable to clear payment");

        let cleared = store
            .list_orders(
                OrderFilter {
                    payment_cleared: Some(true),
                    ..Default::default()
                },
                0,
                10,
            )
            .expect("Unable to list orders");
        assert_eq!(cleared.data.len(), 1);
        assert_eq!(cleared.data[0].id, first);
        assert_eq!(cleared.data[0].bill_no, Some("B-101".to_string()));

        let held = store
            .list_orders(
                OrderFilter {
                    on_hold: Some(true),
                    ..Default::default()
                },
                0,
                10,
            )
            .expect("Unable to list orders");
        assert_eq!(held.paging.total, 1);
        assert_eq!(held.data[0].id, second);

        match store.clear_payment(99, "B-1") {
            Err(OrderStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }

    /// Verifies acceptance marks the order, records a factory order and queues a pending
    /// dispatch item for the whole quantity.
    #[test]
    fn test_accept_order() {
        let factory = in_memory_store_factory();
        let store = factory.get_order_store();
        let id = store.add_order(order("Acme Paints")).expect("Unable to add order");

        let accepted_at = created() + Duration::days(1) + Duration::hours(2);

        match store.accept_order(id, None, None, accepted_at) {
            Err(OrderStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }

        store
            .clear_payment(id, "B-7")
            .expect("Unable to clear payment");
        assert_eq!(
            store
                .list_pending_factory(0, 10)
                .expect("Unable to list pending orders")
                .paging
                .total,
            1
        );

        let delivery = NaiveDate::from_ymd(2024, 1, 12);
        store
            .accept_order(id, Some(delivery), Some("Urgent".to_string()), accepted_at)
            .expect("Unable to accept order");

        let accepted = store
            .fetch_order(id)
            .expect("Unable to fetch order")
            .expect("Order not found");
        assert!(accepted.factory_accepted);
        assert_eq!(accepted.available_qty, decimal("100"));
        assert_eq!(
            accepted.time_span_text,
            Some("1 Days 2 Hours 0 Minutes".to_string())
        );

        let factory_orders = store
            .list_factory_orders(0, 10)
            .expect("Unable to list factory orders");
        assert_eq!(factory_orders.data.len(), 1);
        assert_eq!(factory_orders.data[0].order_id, id);
        assert_eq!(factory_orders.data[0].delivery_expected_date, Some(delivery));

        let pending = factory
            .get_dispatch_store()
            .list_pending_items(0, 10)
            .expect("Unable to list pending items");
        assert_eq!(pending.data.len(), 1);
        assert_eq!(pending.data[0].order_id, id);
        assert_eq!(pending.data[0].available_qty, decimal("100"));
        assert_eq!(pending.data[0].bill_no, Some("B-7".to_string()));

        assert!(store
            .list_pending_factory(0, 10)
            .expect("Unable to list pending orders")
            .data
            .is_empty());

        match store.accept_order(id, None, None, accepted_at) {
            Err(OrderStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }
        match store.cancel_order(id) {
            Err(OrderStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }
    }

    #[test]
    fn test_accept_order_requires_quantity() {
        let factory = in_memory_store_factory();
        let store = factory.get_order_store();
        let id = store
            .add_order(SalesOrder {
                quantity: None,
                ..order("Acme Paints")
            })
            .expect("Unable to add order");
        store
            .clear_payment(id, "B-8")
            .expect("Unable to clear payment");

        match store.accept_order(id, None, None, created() + Duration::hours(1)) {
            Err(OrderStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }

        assert!(
            !store
                .fetch_order(id)
                .expect("Unable to fetch order")
                .expect("Order not found")
                .factory_accepted
        );
        assert!(factory
            .get_dispatch_store()
            .list_pending_items(0, 10)
            .expect("Unable to list pending items")
            .data
            .is_empty());
    }

    #[test]
    fn test_split_order() {
        let factory = in_memory_store_factory();
        let store = factory.get_order_store();
        let id = store.add_order(order("Acme Paints")).expect("Unable to add order");

        let split_id = store
            .split_order(id, decimal("30"))
            .expect("Unable to split order");

        let original = store
            .fetch_order(id)
            .expect("Unable to fetch order")
            .expect("Order not found");
        let split = store
            .fetch_order(split_id)
            .expect("Unable to fetch order")
            .expect("Order not found");

        assert!(original.is_split && split.is_split);
        assert_eq!(original.quantity, Some(decimal("70")));
        assert_eq!(split.quantity, Some(decimal("30")));
        assert_eq!(split.total_price, Some(decimal("720")));
        assert_eq!(original.total_price, Some(decimal("1680")));
        assert_eq!(split.discount_amount, Some(decimal("30")));
        assert_eq!(original.discount_amount, Some(decimal("70")));
        assert_eq!(split.company, original.company);
        assert_eq!(split.price, original.price);

        for qty in &["0", "70", "80"] {
            match store.split_order(id, decimal(qty)) {
                Err(OrderStoreError::InvalidArgumentError(_)) => (),
                res => panic!("Expected InvalidArgumentError for {}, got {:?}", qty, res),
            }
        }
    }

    #[test]
    fn test_cancel_order() {
        let factory = in_memory_store_factory();
        let store = factory.get_order_store();
        let id = store.add_order(order("Acme Paints")).expect("Unable to add order");
        store.add_order(order("Bright Coats")).expect("Unable to add order");

        store.cancel_order(id).expect("Unable to cancel order");

        let orders = store
            .list_orders(OrderFilter::default(), 0, 10)
            .expect("Unable to list orders");
        assert_eq!(orders.paging.total, 1);
        assert!(orders.data.iter().all(|order| order.id != id));

        assert!(store
            .fetch_order(id)
            .expect("Unable to fetch order")
            .expect("Order not found")
            .is_cancelled);

        match store.cancel_order(id) {
            Err(OrderStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
        match store.split_order(id, decimal("1")) {
            Err(OrderStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }
}
