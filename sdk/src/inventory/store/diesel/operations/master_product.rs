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

use super::InventoryStoreOperations;
use crate::inventory::store::diesel::{
    models::{MasterProductModel, NewMasterProductModel},
    schema::master_product,
};
use crate::error::InvalidArgumentError;
use crate::inventory::store::{
    InventoryStoreError, MasterProduct, MasterProductList, PriceUpdate, ProductType,
};
use crate::paging::Paging;
use crate::store::{decimal_text, LastInsertId};

use rust_decimal::Decimal;

use diesel::prelude::*;

pub(in crate::inventory::store::diesel) trait InventoryStoreMasterProductOperations {
    fn add_master_product(&self, model: NewMasterProductModel) -> Result<i64, InventoryStoreError>;
    fn update_master_product(
        &self,
        id: i64,
        model: NewMasterProductModel,
    ) -> Result<(), InventoryStoreError>;
    fn fetch_master_product(&self, id: i64) -> Result<Option<MasterProduct>, InventoryStoreError>;
    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError>;
    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError>;
    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> InventoryStoreMasterProductOperations
    for InventoryStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_master_product(&self, model: NewMasterProductModel) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(master_product::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_master_product(
        &self,
        id: i64,
        model: NewMasterProductModel,
    ) -> Result<(), InventoryStoreError> {
        let updated = diesel::update(master_product::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find master product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_master_product(&self, id: i64) -> Result<Option<MasterProduct>, InventoryStoreError> {
        let model = master_product::table
            .filter(master_product::id.eq(id))
            .first::<MasterProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(MasterProduct::try_from)
            .transpose()
            .map_err(InventoryStoreError::InternalError)
    }

    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let mut query = master_product::table
                .into_boxed()
                .select(master_product::all_columns)
                .order(master_product::name.asc())
                .offset(offset)
                .limit(limit);
            let mut count_query = master_product::table
                .into_boxed()
                .select(master_product::all_columns);

            if let Some(product_type) = product_type {
                query = query.filter(master_product::product_type.eq(product_type.as_str()));
                count_query =
                    count_query.filter(master_product::product_type.eq(product_type.as_str()));
            }

            let models = query.load::<MasterProductModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MasterProduct::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MasterProductList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError> {
        let deleted = diesel::delete(master_product::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find master product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError> {
        if let Some(update) = updates
            .iter()
            .find(|u| u.selling_price < Decimal::ZERO || u.purchase_price < Decimal::ZERO)
        {
            return Err(InventoryStoreError::InvalidArgumentError(
                InvalidArgumentError::new(
                    "price".to_string(),
                    format!(
                        "Prices for master product {} cannot be negative",
                        update.master_product_id
                    ),
                ),
            ));
        }

        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            for update in &updates {
                let updated = diesel::update(master_product::table.find(update.master_product_id))
                    .set((
                        master_product::selling_price.eq(decimal_text(&update.selling_price)),
                        master_product::purchase_price.eq(decimal_text(&update.purchase_price)),
                    ))
                    .execute(self.conn)?;

                if updated == 0 {
                    return Err(InventoryStoreError::NotFoundError(format!(
                        "Could not find master product with id: {}",
                        update.master_product_id
                    )));
                }
            }

            debug!("Updated prices for {} master products", updates.len());

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> InventoryStoreMasterProductOperations
    for InventoryStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_master_product(&self, model: NewMasterProductModel) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(master_product::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_master_product(
        &self,
        id: i64,
        model: NewMasterProductModel,
    ) -> Result<(), InventoryStoreError> {
        let updated = diesel::update(master_product::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find master product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_master_product(&self, id: i64) -> Result<Option<MasterProduct>, InventoryStoreError> {
        let model = master_product::table
            .filter(master_product::id.eq(id))
            .first::<MasterProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(MasterProduct::try_from)
            .transpose()
            .map_err(InventoryStoreError::InternalError)
    }

    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let mut query = master_product::table
                .into_boxed()
                .select(master_product::all_columns)
                .order(master_product::name.asc())
                .offset(offset)
                .limit(limit);
            let mut count_query = master_product::table
                .into_boxed()
                .select(master_product::all_columns);

            if let Some(product_type) = product_type {
                query = query.filter(master_product::product_type.eq(product_type.as_str()));
                count_query =
                    count_query.filter(master_product::product_type.eq(product_type.as_str()));
            }

            let models = query.load::<MasterProductModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MasterProduct::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MasterProductList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError> {
        let deleted = diesel::delete(master_product::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find master product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError> {
        if let Some(update) = updates
            .iter()
            .find(|u| u.selling_price < Decimal::ZERO || u.purchase_price < Decimal::ZERO)
        {
            return Err(InventoryStoreError::InvalidArgumentError(
                InvalidArgumentError::new(
                    "price".to_string(),
                    format!(
                        "Prices for master product {} cannot be negative",
                        update.master_product_id
                    ),
                ),
            ));
        }

        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            for update in &updates {
                let updated = diesel::update(master_product::table.find(update.master_product_id))
                    .set((
                        master_product::selling_price.eq(decimal_text(&update.selling_price)),
                        master_product::purchase_price.eq(decimal_text(&update.purchase_price)),
                    ))
                    .execute(self.conn)?;

                if updated == 0 {
                    return Err(InventoryStoreError::NotFoundError(format!(
                        "Could not find master product with id: {}",
                        update.master_product_id
                    )));
                }
            }

            debug!("Updated prices for {} master products", updates.len());

            Ok(())
        })
    }
}
