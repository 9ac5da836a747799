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
    models::{NewProductBomItemModel, NewProductBomModel, ProductBomItemModel, ProductBomModel},
    schema::{product_bom, product_bom_item},
};
use crate::formulation::store::{FormulationStoreError, ProductBom, ProductBomList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::formulation::store::diesel) trait FormulationStoreBomOperations {
    fn add_bom(
        &self,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<i64, FormulationStoreError>;
    fn update_bom(
        &self,
        id: i64,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<(), FormulationStoreError>;
    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError>;
    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError>;
    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError>;
    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> FormulationStoreBomOperations
    for FormulationStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_bom(
        &self,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<i64, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::insert_into(product_bom::table)
                .values(&bom)
                .execute(self.conn)?;

            let bom_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(product_bom_item::table)
                    .values(&NewProductBomItemModel { bom_id, ..item })
                    .execute(self.conn)?;
            }

            debug!("Stored BOM {} for product {}", bom_id, bom.product_id);

            Ok(bom_id)
        })
    }

    fn update_bom(
        &self,
        id: i64,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let updated = diesel::update(product_bom::table.find(id))
                .set((
                    product_bom::product_id.eq(bom.product_id),
                    product_bom::base_qty.eq(&bom.base_qty),
                    product_bom::remark.eq(&bom.remark),
                ))
                .execute(self.conn)?;

            if updated == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find BOM with id: {}",
                    id
                )));
            }

            diesel::delete(product_bom_item::table.filter(product_bom_item::bom_id.eq(id)))
                .execute(self.conn)?;

            for item in items {
                diesel::insert_into(product_bom_item::table)
                    .values(&NewProductBomItemModel { bom_id: id, ..item })
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }

    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_bom::table
                .filter(product_bom::id.eq(id))
                .first::<ProductBomModel>(self.conn)
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

            let items = product_bom_item::table
                .filter(product_bom_item::bom_id.eq(model.id))
                .order(product_bom_item::id.asc())
                .load::<ProductBomItemModel>(self.conn)?;

            ProductBom::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_bom::table
                .filter(product_bom::product_id.eq(product_id))
                .order((product_bom::created_at.desc(), product_bom::id.desc()))
                .first::<ProductBomModel>(self.conn)
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

            let items = product_bom_item::table
                .filter(product_bom_item::bom_id.eq(model.id))
                .order(product_bom_item::id.asc())
                .load::<ProductBomItemModel>(self.conn)?;

            ProductBom::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let models = product_bom::table
                .order((product_bom::created_at.desc(), product_bom::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<ProductBomModel>(self.conn)?;

            let total = product_bom::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = product_bom_item::table
                    .filter(product_bom_item::bom_id.eq(model.id))
                    .order(product_bom_item::id.asc())
                    .load::<ProductBomItemModel>(self.conn)?;

                data.push(
                    ProductBom::try_from((model, items))
                        .map_err(FormulationStoreError::InternalError)?,
                );
            }

            Ok(ProductBomList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::delete(product_bom_item::table.filter(product_bom_item::bom_id.eq(id)))
                .execute(self.conn)?;

            let deleted = diesel::delete(product_bom::table.find(id)).execute(self.conn)?;

            if deleted == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find BOM with id: {}",
                    id
                )));
            }

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> FormulationStoreBomOperations
    for FormulationStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_bom(
        &self,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<i64, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::insert_into(product_bom::table)
                .values(&bom)
                .execute(self.conn)?;

            let bom_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(product_bom_item::table)
                    .values(&NewProductBomItemModel { bom_id, ..item })
                    .execute(self.conn)?;
            }

            debug!("Stored BOM {} for product {}", bom_id, bom.product_id);

            Ok(bom_id)
        })
    }

    fn update_bom(
        &self,
        id: i64,
        bom: NewProductBomModel,
        items: Vec<NewProductBomItemModel>,
    ) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let updated = diesel::update(product_bom::table.find(id))
                .set((
                    product_bom::product_id.eq(bom.product_id),
                    product_bom::base_qty.eq(&bom.base_qty),
                    product_bom::remark.eq(&bom.remark),
                ))
                .execute(self.conn)?;

            if updated == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find BOM with id: {}",
                    id
                )));
            }

            diesel::delete(product_bom_item::table.filter(product_bom_item::bom_id.eq(id)))
                .execute(self.conn)?;

            for item in items {
                diesel::insert_into(product_bom_item::table)
                    .values(&NewProductBomItemModel { bom_id: id, ..item })
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }

    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_bom::table
                .filter(product_bom::id.eq(id))
                .first::<ProductBomModel>(self.conn)
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

            let items = product_bom_item::table
                .filter(product_bom_item::bom_id.eq(model.id))
                .order(product_bom_item::id.asc())
                .load::<ProductBomItemModel>(self.conn)?;

            ProductBom::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let model = product_bom::table
                .filter(product_bom::product_id.eq(product_id))
                .order((product_bom::created_at.desc(), product_bom::id.desc()))
                .first::<ProductBomModel>(self.conn)
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

            let items = product_bom_item::table
                .filter(product_bom_item::bom_id.eq(model.id))
                .order(product_bom_item::id.asc())
                .load::<ProductBomItemModel>(self.conn)?;

            ProductBom::try_from((model, items))
                .map(Some)
                .map_err(FormulationStoreError::InternalError)
        })
    }

    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            let models = product_bom::table
                .order((product_bom::created_at.desc(), product_bom::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<ProductBomModel>(self.conn)?;

            let total = product_bom::table.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = product_bom_item::table
                    .filter(product_bom_item::bom_id.eq(model.id))
                    .order(product_bom_item::id.asc())
                    .load::<ProductBomItemModel>(self.conn)?;

                data.push(
                    ProductBom::try_from((model, items))
                        .map_err(FormulationStoreError::InternalError)?,
                );
            }

            Ok(ProductBomList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError> {
        self.conn.transaction::<_, FormulationStoreError, _>(|| {
            diesel::delete(product_bom_item::table.filter(product_bom_item::bom_id.eq(id)))
                .execute(self.conn)?;

            let deleted = diesel::delete(product_bom::table.find(id)).execute(self.conn)?;

            if deleted == 0 {
                return Err(FormulationStoreError::NotFoundError(format!(
                    "Could not find BOM with id: {}",
                    id
                )));
            }

            Ok(())
        })
    }
}
