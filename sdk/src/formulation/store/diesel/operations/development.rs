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

use super::FormulationStoreOperations;
use crate::formulation::store::diesel::{
    models::{
        NewProductDevelopmentItemModel, NewProductDevelopmentModel, ProductDevelopmentItemModel,
        ProductDevelopmentModel,
    },
    schema::{product_development, product_development_item},
};
use crate::formulation::store::{
    FormulationStoreError, ProductDevelopment, ProductDevelopmentList,
};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::formulation::store::diesel) trait FormulationStoreDevelopmentOperations {
    fn add_development(
        &self,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<i64, FormulationStoreError>;
    fn update_development(
        &self,
        id: i64,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<(), FormulationStoreError>;
    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError>;
    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError>;
    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> FormulationStoreDevelopmentOperations
    for FormulationStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_development(
        &self,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<i64, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::insert_into(product_development::table)
                .values(&development)
                .execute(self.conn)?;

            let development_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(product_development_item::table)
                    .values(&NewProductDevelopmentItemModel {
                        development_id,
                        ..item
                    })
                    .execute(self.conn)?;
            }

            debug!(
                "Stored product development {} for {}",
                development_id, development.product_name
            );

            Ok(development_id)
        })
    }

    fn update_development(
        &self,
        id: i64,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let updated = diesel::update(product_development::table.find(id))
                .set((
                    product_development::product_name.eq(&development.product_name),
                    product_development::selling_price.eq(&development.selling_price),
                    product_development::remark.eq(&development.remark),
                ))
                .execute(self.conn)?;

            if updated == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find product development with id: {}",
                    id
                )));
            }

            diesel::delete(
                product_development_item::table
                    .filter(product_development_item::development_id.eq(id)),
            )
            .execute(self.conn)?;

            for item in items {
                diesel::insert_into(product_development_item::table)
                    .values(&NewProductDevelopmentItemModel {
                        development_id: id,
                        ..item
                    })
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }

    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_development::table
                .filter(product_development::id.eq(id))
                .first::<ProductDevelopmentModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?;

            let model = match model {
                Some(model) => model,
                None => return Ok(None),
            };

            let items = product_development_item::table
                .filter(product_development_item::development_id.eq(model.id))
                .order(product_development_item::id.asc())
                .load::<ProductDevelopmentItemModel>(self.conn)?;

            ProductDevelopment::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let models = product_development::table
                .order((
                    product_development::created_at.desc(),
                    product_development::id.desc(),
                ))
                .offset(offset)
                .limit(limit)
                .load::<ProductDevelopmentModel>(self.conn)?;

            let total = product_development::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = product_development_item::table
                    .filter(product_development_item::development_id.eq(model.id))
                    .order(product_development_item::id.asc())
                    .load::<ProductDevelopmentItemModel>(self.conn)?;

                data.push(
                    ProductDevelopment::try_from((model, items))
                        .map_err(FormulationStoreError::InternalError)?,
                );
            }

            Ok(ProductDevelopmentList::new(
                data,
                Paging::new(offset, limit, total),
            ))
        })
    }

    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::delete(
                product_development_item::table
                    .filter(product_development_item::development_id.eq(id)),
            )
            .execute(self.conn)?;

            let deleted = diesel::delete(product_development::table.find(id)).execute(self.conn)?;

            if deleted == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find product development with id: {}",
                    id
                )));
            }

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> FormulationStoreDevelopmentOperations
    for FormulationStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_development(
        &self,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<i64, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::insert_into(product_development::table)
                .values(&development)
                .execute(self.conn)?;

            let development_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(product_development_item::table)
                    .values(&NewProductDevelopmentItemModel {
                        development_id,
                        ..item
                    })
                    .execute(self.conn)?;
            }

            debug!(
                "Stored product development {} for {}",
                development_id, development.product_name
            );

            Ok(development_id)
        })
    }

    fn update_development(
        &self,
        id: i64,
        development: NewProductDevelopmentModel,
        items: Vec<NewProductDevelopmentItemModel>,
    ) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let updated = diesel::update(product_development::table.find(id))
                .set((
                    product_development::product_name.eq(&development.product_name),
                    product_development::selling_price.eq(&development.selling_price),
                    product_development::remark.eq(&development.remark),
                ))
                .execute(self.conn)?;

            if updated == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find product development with id: {}",
                    id
                )));
            }

            diesel::delete(
                product_development_item::table
                    .filter(product_development_item::development_id.eq(id)),
            )
            .execute(self.conn)?;

            for item in items {
                diesel::insert_into(product_development_item::table)
                    .values(&NewProductDevelopmentItemModel {
                        development_id: id,
                        ..item
                    })
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }

    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_development::table
                .filter(product_development::id.eq(id))
                .first::<ProductDevelopmentModel>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?;

            let model = match model {
                Some(model) => model,
                None => return Ok(None),
            };

            let items = product_development_item::table
                .filter(product_development_item::development_id.eq(model.id))
                .order(product_development_item::id.asc())
                .load::<ProductDevelopmentItemModel>(self.conn)?;

            ProductDevelopment::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let models = product_development::table
                .order((
                    product_development::created_at.desc(),
                    product_development::id.desc(),
                ))
                .offset(offset)
                .limit(limit)
                .load::<ProductDevelopmentModel>(self.conn)?;

            let total = product_development::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = product_development_item::table
                    .filter(product_development_item::development_id.eq(model.id))
                    .order(product_development_item::id.asc())
                    .load::<ProductDevelopmentItemModel>(self.conn)?;

                data.push(
                    ProductDevelopment::try_from((model, items))
                        .map_err(FormulationStoreError::InternalError)?,
                );
            }

            Ok(ProductDevelopmentList::new(
                data,
                Paging::new(offset, limit, total),
            ))
        })
    }

    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::delete(
                product_development_item::table
                    .filter(product_development_item::development_id.eq(id)),
            )
            .execute(self.conn)?;

            let deleted = diesel::delete(product_development::table.find(id)).execute(self.conn)?;

            if deleted == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find product development with id: {}",
                    id
                )));
            }

            Ok(())
        })
    }
}
