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

use super::OrderStoreOperations;
use crate::dispatch::store::diesel::{models::NewDispatchItemModel, schema::dispatch_item};
use crate::error::InvalidStateError;
use crate::orders::store::diesel::{
    models::{FactoryOrderModel, NewFactoryOrderModel, SalesOrderModel},
    schema::{factory_order, sales_order},
};
use crate::orders::store::{FactoryOrderList, OrderStoreError, SalesOrder, SalesOrderList};
use crate::paging::Paging;
use crate::store::{decimal_text, LastInsertId};
use crate::timespan::{elapsed_text, DayDisplay};

use diesel::prelude::*;

pub(in crate::orders::store::diesel) trait OrderStoreFactoryOperations {
    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError>;
    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError>;
    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> OrderStoreFactoryOperations for OrderStoreOperations<'a, diesel::pg::PgConnection> {
    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let models = sales_order::table
                .filter(sales_order::payment_cleared.eq(true))
                .filter(sales_order::factory_accepted.eq(false))
                .filter(sales_order::is_cancelled.eq(false))
                .order((sales_order::order_created.asc(), sales_order::id.asc()))
                .offset(offset)
                .limit(limit)
                .load::<SalesOrderModel>(self.conn)?;

            let total = sales_order::table
                .filter(sales_order::payment_cleared.eq(true))
                .filter(sales_order::factory_accepted.eq(false))
                .filter(sales_order::is_cancelled.eq(false))
                .count()
                .get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(SalesOrder::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(OrderStoreError::InternalError)?;

            Ok(SalesOrderList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let order = sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false))
                .first::<SalesOrderModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    OrderStoreError::NotFoundError(format!(
                        "Could not find order with id: {}",
                        id
                    ))
                })?;
            let order = SalesOrder::try_from(order)?;

            if !order.payment_cleared {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Payment for order {} has not been cleared",
                        id
                    )),
                ));
            }

            if order.factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has already been accepted by the factory",
                        id
                    )),
                ));
            }

            let available_qty = match order.quantity {
                Some(qty) if qty > Decimal::ZERO => qty,
                _ => {
                    return Err(OrderStoreError::InvalidStateError(
                        InvalidStateError::with_message(format!(
                            "Order {} has no quantity to dispatch",
                            id
                        )),
                    ))
                }
            };

            diesel::update(sales_order::table.find(id))
                .set((
                    sales_order::factory_accepted.eq(true),
                    sales_order::available_qty.eq(decimal_text(&available_qty)),
                    sales_order::time_span_text.eq(Some(elapsed_text(
                        order.order_created,
                        accepted_at,
                        DayDisplay::WhenNonZero,
                    ))),
                ))
                .execute(self.conn)?;

            diesel::insert_into(factory_order::table)
                .values(&NewFactoryOrderModel {
                    order_id: id,
                    company_name: order.company.clone(),
                    location: order.location.clone(),
                    sales_person: order.sales_person.clone(),
                    order_created: order.order_created,
                    delivery_expected_date,
                    remark,
                    factory_accepted: true,
                })
                .execute(self.conn)?;
            let factory_order_id = self.conn.last_insert_id()?;

            diesel::insert_into(dispatch_item::table)
                .values(&NewDispatchItemModel {
                    dispatch_id: None,
                    order_id: id,
                    company_name: order.company,
                    location: order.location,
                    product: order.product_name.unwrap_or_default(),
                    available_qty: decimal_text(&available_qty),
                    qty: decimal_text(&Decimal::ZERO),
                    ready_at: accepted_at,
                    dispatch_date: order.dispatch_date,
                    bill_no: order.bill_no,
                })
                .execute(self.conn)?;

            debug!(
                "Factory accepted order {} as factory order {}",
                id, factory_order_id
            );

            Ok(factory_order_id)
        })
    }

    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let models = factory_order::table
                .order((factory_order::order_created.desc(), factory_order::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<FactoryOrderModel>(self.conn)?;

            let total = factory_order::table.count().get_result(self.conn)?;

            Ok(FactoryOrderList::new(
                models.into_iter().map(Into::into).collect(),
                Paging::new(offset, limit, total),
            ))
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> OrderStoreFactoryOperations
    for OrderStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_pending_factory(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let models = sales_order::table
                .filter(sales_order::payment_cleared.eq(true))
                .filter(sales_order::factory_accepted.eq(false))
                .filter(sales_order::is_cancelled.eq(false))
                .order((sales_order::order_created.asc(), sales_order::id.asc()))
                .offset(offset)
                .limit(limit)
                .load::<SalesOrderModel>(self.conn)?;

            let total = sales_order::table
                .filter(sales_order::payment_cleared.eq(true))
                .filter(sales_order::factory_accepted.eq(false))
                .filter(sales_order::is_cancelled.eq(false))
                .count()
                .get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(SalesOrder::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(OrderStoreError::InternalError)?;

            Ok(SalesOrderList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn accept_order(
        &self,
        id: i64,
        delivery_expected_date: Option<NaiveDate>,
        remark: Option<String>,
        accepted_at: NaiveDateTime,
    ) -> Result<i64, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let order = sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false))
                .first::<SalesOrderModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    OrderStoreError::NotFoundError(format!(
                        "Could not find order with id: {}",
                        id
                    ))
                })?;
            let order = SalesOrder::try_from(order)?;

            if !order.payment_cleared {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Payment for order {} has not been cleared",
                        id
                    )),
                ));
            }

            if order.factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has already been accepted by the factory",
                        id
                    )),
                ));
            }

            let available_qty = match order.quantity {
                Some(qty) if qty > Decimal::ZERO => qty,
                _ => {
                    return Err(OrderStoreError::InvalidStateError(
                        InvalidStateError::with_message(format!(
                            "Order {} has no quantity to dispatch",
                            id
                        )),
                    ))
                }
            };

            diesel::update(sales_order::table.find(id))
                .set((
                    sales_order::factory_accepted.eq(true),
                    sales_order::available_qty.eq(decimal_text(&available_qty)),
                    sales_order::time_span_text.eq(Some(elapsed_text(
                        order.order_created,
                        accepted_at,
                        DayDisplay::WhenNonZero,
                    ))),
                ))
                .execute(self.conn)?;

            diesel::insert_into(factory_order::table)
                .values(&NewFactoryOrderModel {
                    order_id: id,
                    company_name: order.company.clone(),
                    location: order.location.clone(),
                    sales_person: order.sales_person.clone(),
                    order_created: order.order_created,
                    delivery_expected_date,
                    remark,
                    factory_accepted: true,
                })
                .execute(self.conn)?;
            let factory_order_id = self.conn.last_insert_id()?;

            diesel::insert_into(dispatch_item::table)
                .values(&NewDispatchItemModel {
                    dispatch_id: None,
                    order_id: id,
                    company_name: order.company,
                    location: order.location,
                    product: order.product_name.unwrap_or_default(),
                    available_qty: decimal_text(&available_qty),
                    qty: decimal_text(&Decimal::ZERO),
                    ready_at: accepted_at,
                    dispatch_date: order.dispatch_date,
                    bill_no: order.bill_no,
                })
                .execute(self.conn)?;

            debug!(
                "Factory accepted order {} as factory order {}",
                id, factory_order_id
            );

            Ok(factory_order_id)
        })
    }

    fn list_factory_orders(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<FactoryOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let models = factory_order::table
                .order((factory_order::order_created.desc(), factory_order::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<FactoryOrderModel>(self.conn)?;

            let total = factory_order::table.count().get_result(self.conn)?;

            Ok(FactoryOrderList::new(
                models.into_iter().map(Into::into).collect(),
                Paging::new(offset, limit, total),
            ))
        })
    }
}
