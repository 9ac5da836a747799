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

use super::MasterStoreOperations;
use crate::masters::store::diesel::{
    models::{NewProductModel, ProductModel},
    schema::product,
};
use crate::masters::store::{MasterStoreError, Product, ProductList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreProductOperations {
    fn add_product(&self, model: NewProductModel) -> Result<i64, MasterStoreError>;
    fn update_product(&self, id: i64, model: NewProductModel) -> Result<(), MasterStoreError>;
    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError>;
    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError>;
    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError>;
    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreProductOperations for MasterStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_product(&self, model: NewProductModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(product::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_product(&self, id: i64, model: NewProductModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(product::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError> {
        let model = product::table
            .filter(product::id.eq(id))
            .first::<ProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Product::from))
    }

    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError> {
        let model = product::table
            .filter(product::name.eq(name))
            .first::<ProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Product::from))
    }

    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = product::table
                .order(product::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<ProductModel>(self.conn)?;

            let total = product::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Product::from).collect();

            Ok(ProductList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(product::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreProductOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_product(&self, model: NewProductModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(product::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_product(&self, id: i64, model: NewProductModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(product::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError> {
        let model = product::table
            .filter(product::id.eq(id))
            .first::<ProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Product::from))
    }

    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError> {
        let model = product::table
            .filter(product::name.eq(name))
            .first::<ProductModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Product::from))
    }

    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = product::table
                .order(product::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<ProductModel>(self.conn)?;

            let total = product::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Product::from).collect();

            Ok(ProductList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(product::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product with id: {}",
                id
            )));
        }

        Ok(())
    }
}
