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

use super::MasterStoreOperations;
use crate::masters::store::diesel::{
    models::{NewProductDetailModel, ProductDetailModel},
    schema::product_detail,
};
use crate::masters::store::{MasterStoreError, ProductDetail, ProductDetailList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreProductDetailOperations {
    fn add_product_detail(&self, model: NewProductDetailModel) -> Result<i64, MasterStoreError>;
    fn update_product_detail(
        &self,
        id: i64,
        model: NewProductDetailModel,
    ) -> Result<(), MasterStoreError>;
    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError>;
    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError>;
    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreProductDetailOperations
    for MasterStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_product_detail(&self, model: NewProductDetailModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(product_detail::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_product_detail(
        &self,
        id: i64,
        model: NewProductDetailModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(product_detail::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product detail with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError> {
        let model = product_detail::table
            .filter(product_detail::id.eq(id))
            .first::<ProductDetailModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(ProductDetail::try_from)
            .transpose()
            .map_err(MasterStoreError::InternalError)
    }

    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let mut query = product_detail::table
                .into_boxed()
                .select(product_detail::all_columns)
                .order(product_detail::id.asc())
                .offset(offset)
                .limit(limit);
            let mut count_query = product_detail::table
                .into_boxed()
                .select(product_detail::all_columns);

            if let Some(product_id) = product_id {
                query = query.filter(product_detail::product_id.eq(product_id));
                count_query = count_query.filter(product_detail::product_id.eq(product_id));
            }

            let models = query.load::<ProductDetailModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(ProductDetail::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(MasterStoreError::InternalError)?;

            Ok(ProductDetailList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(product_detail::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product detail with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreProductDetailOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_product_detail(&self, model: NewProductDetailModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(product_detail::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_product_detail(
        &self,
        id: i64,
        model: NewProductDetailModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(product_detail::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product detail with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError> {
        let model = product_detail::table
            .filter(product_detail::id.eq(id))
            .first::<ProductDetailModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(ProductDetail::try_from)
            .transpose()
            .map_err(MasterStoreError::InternalError)
    }

    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let mut query = product_detail::table
                .into_boxed()
                .select(product_detail::all_columns)
                .order(product_detail::id.asc())
                .offset(offset)
                .limit(limit);
            let mut count_query = product_detail::table
                .into_boxed()
                .select(product_detail::all_columns);

            if let Some(product_id) = product_id {
                query = query.filter(product_detail::product_id.eq(product_id));
                count_query = count_query.filter(product_detail::product_id.eq(product_id));
            }

            let models = query.load::<ProductDetailModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(ProductDetail::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(MasterStoreError::InternalError)?;

            Ok(ProductDetailList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(product_detail::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find product detail with id: {}",
                id
            )));
        }

        Ok(())
    }
}
