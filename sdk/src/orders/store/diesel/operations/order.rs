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

use rust_decimal::Decimal;

use super::OrderStoreOperations;
use crate::error::{InvalidArgumentError, InvalidStateError};
use crate::orders::prorate;
use crate::orders::store::diesel::{
    models::{NewSalesOrderModel, SalesOrderModel},
    schema::sales_order,
};
use crate::orders::store::{OrderFilter, OrderStoreError, SalesOrder, SalesOrderList};
use crate::paging::Paging;
use crate::store::{decimal_text, LastInsertId};

use diesel::prelude::*;

pub(in crate::orders::store::diesel) trait OrderStoreOrderOperations {
    fn add_order(&self, order: NewSalesOrderModel) -> Result<i64, OrderStoreError>;
    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError>;
    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError>;
    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError>;
    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError>;
    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError>;
    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> OrderStoreOrderOperations for OrderStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_order(&self, order: NewSalesOrderModel) -> Result<i64, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            diesel::insert_into(sales_order::table)
                .values(&order)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError> {
        let model = sales_order::table
            .filter(sales_order::id.eq(id))
            .first::<SalesOrderModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(SalesOrder::try_from)
            .transpose()
            .map_err(OrderStoreError::InternalError)
    }

    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let mut query = sales_order::table
                .into_boxed()
                .filter(sales_order::is_cancelled.eq(false));
            let mut count_query = sales_order::table
                .into_boxed()
                .filter(sales_order::is_cancelled.eq(false));

            if let Some(payment_cleared) = filter.payment_cleared {
                query = query.filter(sales_order::payment_cleared.eq(payment_cleared));
                count_query = count_query.filter(sales_order::payment_cleared.eq(payment_cleared));
            }

            if let Some(on_hold) = filter.on_hold {
                query = query.filter(sales_order::on_hold.eq(on_hold));
                count_query = count_query.filter(sales_order::on_hold.eq(on_hold));
            }

            if let Some(factory_accepted) = filter.factory_accepted {
                query = query.filter(sales_order::factory_accepted.eq(factory_accepted));
                count_query =
                    count_query.filter(sales_order::factory_accepted.eq(factory_accepted));
            }

            let models = query
                .order((sales_order::order_created.desc(), sales_order::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<SalesOrderModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(SalesOrder::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(OrderStoreError::InternalError)?;

            Ok(SalesOrderList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError> {
        let updated = diesel::update(
            sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false)),
        )
        .set((
            sales_order::payment_cleared.eq(true),
            sales_order::on_hold.eq(false),
            sales_order::bill_no.eq(Some(bill_no.to_string())),
        ))
        .execute(self.conn)?;

        if updated == 0 {
            return Err(OrderStoreError::NotFoundError(format!(
                "Could not find order with id: {}",
                id
            )));
        }

        debug!("Cleared payment of order {} against bill {}", id, bill_no);

        Ok(())
    }

    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError> {
        let updated = diesel::update(
            sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false)),
        )
        .set(sales_order::on_hold.eq(on_hold))
        .execute(self.conn)?;

        if updated == 0 {
            return Err(OrderStoreError::NotFoundError(format!(
                "Could not find order with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError> {
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

            if order.factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has been accepted by the factory and cannot be split",
                        id
                    )),
                ));
            }

            let quantity = order.quantity.unwrap_or(Decimal::ZERO);
            if split_qty <= Decimal::ZERO || split_qty >= quantity {
                return Err(OrderStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "split_qty".to_string(),
                        format!("Split quantity must be more than 0 and less than {}", quantity),
                    ),
                ));
            }

            let split_total = order
                .total_price
                .map(|total| prorate(total, split_qty, quantity));
            let split_discount_amount = order
                .discount_amount
                .map(|amount| prorate(amount, split_qty, quantity));

            let split = SalesOrder {
                id: 0,
                quantity: Some(split_qty),
                total_price: split_total,
                discount_amount: split_discount_amount,
                is_split: true,
                ..order.clone()
            };

            diesel::insert_into(sales_order::table)
                .values(&NewSalesOrderModel::from(&split))
                .execute(self.conn)?;
            let split_id = self.conn.last_insert_id()?;

            let remaining_total = order
                .total_price
                .zip(split_total)
                .map(|(total, share)| total - share);
            let remaining_discount_amount = order
                .discount_amount
                .zip(split_discount_amount)
                .map(|(amount, share)| amount - share);

            diesel::update(sales_order::table.find(id))
                .set((
                    sales_order::quantity.eq(Some(decimal_text(&(quantity - split_qty)))),
                    sales_order::total_price.eq(remaining_total.as_ref().map(decimal_text)),
                    sales_order::discount_amount
                        .eq(remaining_discount_amount.as_ref().map(decimal_text)),
                    sales_order::is_split.eq(true),
                ))
                .execute(self.conn)?;

            debug!("Split {} off order {} into order {}", split_qty, id, split_id);

            Ok(split_id)
        })
    }

    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let factory_accepted = sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false))
                .select(sales_order::factory_accepted)
                .first::<bool>(self.conn)
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

            if factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has been accepted by the factory and cannot be cancelled",
                        id
                    )),
                ));
            }

            diesel::update(sales_order::table.find(id))
                .set(sales_order::is_cancelled.eq(true))
                .execute(self.conn)?;

            debug!("Cancelled order {}", id);

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> OrderStoreOrderOperations for OrderStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_order(&self, order: NewSalesOrderModel) -> Result<i64, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            diesel::insert_into(sales_order::table)
                .values(&order)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn fetch_order(&self, id: i64) -> Result<Option<SalesOrder>, OrderStoreError> {
        let model = sales_order::table
            .filter(sales_order::id.eq(id))
            .first::<SalesOrderModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(SalesOrder::try_from)
            .transpose()
            .map_err(OrderStoreError::InternalError)
    }

    fn list_orders(
        &self,
        filter: OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<SalesOrderList, OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let mut query = sales_order::table
                .into_boxed()
                .filter(sales_order::is_cancelled.eq(false));
            let mut count_query = sales_order::table
                .into_boxed()
                .filter(sales_order::is_cancelled.eq(false));

            if let Some(payment_cleared) = filter.payment_cleared {
                query = query.filter(sales_order::payment_cleared.eq(payment_cleared));
                count_query = count_query.filter(sales_order::payment_cleared.eq(payment_cleared));
            }

            if let Some(on_hold) = filter.on_hold {
                query = query.filter(sales_order::on_hold.eq(on_hold));
                count_query = count_query.filter(sales_order::on_hold.eq(on_hold));
            }

            if let Some(factory_accepted) = filter.factory_accepted {
                query = query.filter(sales_order::factory_accepted.eq(factory_accepted));
                count_query =
                    count_query.filter(sales_order::factory_accepted.eq(factory_accepted));
            }

            let models = query
                .order((sales_order::order_created.desc(), sales_order::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<SalesOrderModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(SalesOrder::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(OrderStoreError::InternalError)?;

            Ok(SalesOrderList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn clear_payment(&self, id: i64, bill_no: &str) -> Result<(), OrderStoreError> {
        let updated = diesel::update(
            sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false)),
        )
        .set((
            sales_order::payment_cleared.eq(true),
            sales_order::on_hold.eq(false),
            sales_order::bill_no.eq(Some(bill_no.to_string())),
        ))
        .execute(self.conn)?;

        if updated == 0 {
            return Err(OrderStoreError::NotFoundError(format!(
                "Could not find order with id: {}",
                id
            )));
        }

        debug!("Cleared payment of order {} against bill {}", id, bill_no);

        Ok(())
    }

    fn set_on_hold(&self, id: i64, on_hold: bool) -> Result<(), OrderStoreError> {
        let updated = diesel::update(
            sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false)),
        )
        .set(sales_order::on_hold.eq(on_hold))
        .execute(self.conn)?;

        if updated == 0 {
            return Err(OrderStoreError::NotFoundError(format!(
                "Could not find order with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn split_order(&self, id: i64, split_qty: Decimal) -> Result<i64, OrderStoreError> {
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

            if order.factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has been accepted by the factory and cannot be split",
                        id
                    )),
                ));
            }

            let quantity = order.quantity.unwrap_or(Decimal::ZERO);
            if split_qty <= Decimal::ZERO || split_qty >= quantity {
                return Err(OrderStoreError::InvalidArgumentError(
                    InvalidArgumentError::new(
                        "split_qty".to_string(),
                        format!("Split quantity must be more than 0 and less than {}", quantity),
                    ),
                ));
            }

            let split_total = order
                .total_price
                .map(|total| prorate(total, split_qty, quantity));
            let split_discount_amount = order
                .discount_amount
                .map(|amount| prorate(amount, split_qty, quantity));

            let split = SalesOrder {
                id: 0,
                quantity: Some(split_qty),
                total_price: split_total,
                discount_amount: split_discount_amount,
                is_split: true,
                ..order.clone()
            };

            diesel::insert_into(sales_order::table)
                .values(&NewSalesOrderModel::from(&split))
                .execute(self.conn)?;
            let split_id = self.conn.last_insert_id()?;

            let remaining_total = order
                .total_price
                .zip(split_total)
                .map(|(total, share)| total - share);
            let remaining_discount_amount = order
                .discount_amount
                .zip(split_discount_amount)
                .map(|(amount, share)| amount - share);

            diesel::update(sales_order::table.find(id))
                .set((
                    sales_order::quantity.eq(Some(decimal_text(&(quantity - split_qty)))),
                    sales_order::total_price.eq(remaining_total.as_ref().map(decimal_text)),
                    sales_order::discount_amount
                        .eq(remaining_discount_amount.as_ref().map(decimal_text)),
                    sales_order::is_split.eq(true),
                ))
                .execute(self.conn)?;

            debug!("Split {} off order {} into order {}", split_qty, id, split_id);

            Ok(split_id)
        })
    }

    fn cancel_order(&self, id: i64) -> Result<(), OrderStoreError> {
        self.conn.transaction::<_, OrderStoreError, _>(|| {
            let factory_accepted = sales_order::table
                .filter(sales_order::id.eq(id))
                .filter(sales_order::is_cancelled.eq(false))
                .select(sales_order::factory_accepted)
                .first::<bool>(self.conn)
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

            if factory_accepted {
                return Err(OrderStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Order {} has been accepted by the factory and cannot be cancelled",
                        id
                    )),
                ));
            }

            diesel::update(sales_order::table.find(id))
                .set(sales_order::is_cancelled.eq(true))
                .execute(self.conn)?;

            debug!("Cancelled order {}", id);

            Ok(())
        })
    }
}
