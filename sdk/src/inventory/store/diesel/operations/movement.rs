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
    models::{
        MaterialDiscardModel, MaterialInwardModel, MaterialReturnModel, NewMaterialDiscardModel,
        NewMaterialInwardModel, NewMaterialReturnModel,
    },
    schema::{master_product, material_discard, material_inward, material_return, supplier},
};
use crate::inventory::store::{
    InventoryStoreError, MaterialDiscard, MaterialDiscardList, MaterialInward,
    MaterialInwardList, MaterialReturn, MaterialReturnList,
};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::dsl::exists;
use diesel::prelude::*;

pub(in crate::inventory::store::diesel) trait InventoryStoreMovementOperations {
    fn add_material_inward(
        &self,
        model: NewMaterialInwardModel,
    ) -> Result<i64, InventoryStoreError>;
    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError>;
    fn add_material_discard(
        &self,
        model: NewMaterialDiscardModel,
    ) -> Result<i64, InventoryStoreError>;
    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError>;
    fn add_material_return(
        &self,
        model: NewMaterialReturnModel,
    ) -> Result<i64, InventoryStoreError>;
    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> InventoryStoreMovementOperations
    for InventoryStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_material_inward(
        &self,
        model: NewMaterialInwardModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let product_exists = diesel::select(exists(
                master_product::table.filter(master_product::id.eq(model.master_product_id)),
            ))
            .get_result::<bool>(self.conn)?;
            if !product_exists {
                return Err(InventoryStoreError::NotFoundError(format!(
                    "Could not find master product with id: {}",
                    model.master_product_id
                )));
            }

            let supplier_exists = diesel::select(exists(
                supplier::table.filter(supplier::id.eq(model.supplier_id)),
            ))
            .get_result::<bool>(self.conn)?;
            if !supplier_exists {
                return Err(InventoryStoreError::NotFoundError(format!(
                    "Could not find supplier with id: {}",
                    model.supplier_id
                )));
            }

            diesel::insert_into(material_inward::table)
                .values(&model)
                .execute(self.conn)?;

            let id = self.conn.last_insert_id()?;
            debug!("Recorded inward {} against bill {}", id, model.bill_no);

            Ok(id)
        })
    }

    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_inward::table
                .order((material_inward::created_at.desc(), material_inward::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialInwardModel>(self.conn)?;

            let total = material_inward::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialInward::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialInwardList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn add_material_discard(
        &self,
        model: NewMaterialDiscardModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            if let Some(master_product_id) = model.master_product_id {
                let product_exists = diesel::select(exists(
                    master_product::table.filter(master_product::id.eq(master_product_id)),
                ))
                .get_result::<bool>(self.conn)?;
                if !product_exists {
                    return Err(InventoryStoreError::NotFoundError(format!(
                        "Could not find master product with id: {}",
                        master_product_id
                    )));
                }
            }

            diesel::insert_into(material_discard::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_discard::table
                .order((material_discard::created_at.desc(), material_discard::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialDiscardModel>(self.conn)?;

            let total = material_discard::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialDiscard::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialDiscardList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn add_material_return(
        &self,
        model: NewMaterialReturnModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(material_return::table)
                .values(&model)
                .execute(self.conn)?;

            let id = self.conn.last_insert_id()?;
            debug!("Recorded return {} for order {}", id, model.order_id);

            Ok(id)
        })
    }

    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_return::table
                .order((material_return::returned_at.desc(), material_return::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialReturnModel>(self.conn)?;

            let total = material_return::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialReturn::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialReturnList::new(data, Paging::new(offset, limit, total)))
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> InventoryStoreMovementOperations
    for InventoryStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_material_inward(
        &self,
        model: NewMaterialInwardModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let product_exists = diesel::select(exists(
                master_product::table.filter(master_product::id.eq(model.master_product_id)),
            ))
            .get_result::<bool>(self.conn)?;
            if !product_exists {
                return Err(InventoryStoreError::NotFoundError(format!(
                    "Could not find master product with id: {}",
                    model.master_product_id
                )));
            }

            let supplier_exists = diesel::select(exists(
                supplier::table.filter(supplier::id.eq(model.supplier_id)),
            ))
            .get_result::<bool>(self.conn)?;
            if !supplier_exists {
                return Err(InventoryStoreError::NotFoundError(format!(
                    "Could not find supplier with id: {}",
                    model.supplier_id
                )));
            }

            diesel::insert_into(material_inward::table)
                .values(&model)
                .execute(self.conn)?;

            let id = self.conn.last_insert_id()?;
            debug!("Recorded inward {} against bill {}", id, model.bill_no);

            Ok(id)
        })
    }

    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_inward::table
                .order((material_inward::created_at.desc(), material_inward::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialInwardModel>(self.conn)?;

            let total = material_inward::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialInward::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialInwardList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn add_material_discard(
        &self,
        model: NewMaterialDiscardModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            if let Some(master_product_id) = model.master_product_id {
                let product_exists = diesel::select(exists(
                    master_product::table.filter(master_product::id.eq(master_product_id)),
                ))
                .get_result::<bool>(self.conn)?;
                if !product_exists {
                    return Err(InventoryStoreError::NotFoundError(format!(
                        "Could not find master product with id: {}",
                        master_product_id
                    )));
                }
            }

            diesel::insert_into(material_discard::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_discard::table
                .order((material_discard::created_at.desc(), material_discard::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialDiscardModel>(self.conn)?;

            let total = material_discard::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialDiscard::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialDiscardList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn add_material_return(
        &self,
        model: NewMaterialReturnModel,
    ) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(material_return::table)
                .values(&model)
                .execute(self.conn)?;

            let id = self.conn.last_insert_id()?;
            debug!("Recorded return {} for order {}", id, model.order_id);

            Ok(id)
        })
    }

    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = material_return::table
                .order((material_return::returned_at.desc(), material_return::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<MaterialReturnModel>(self.conn)?;

            let total = material_return::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(MaterialReturn::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InventoryStoreError::InternalError)?;

            Ok(MaterialReturnList::new(data, Paging::new(offset, limit, total)))
        })
    }
}
