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

use super::InventoryStoreOperations;
use crate::inventory::store::diesel::{
    models::{NewSupplierModel, SupplierModel},
    schema::supplier,
};
use crate::inventory::store::{InventoryStoreError, Supplier, SupplierList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::inventory::store::diesel) trait InventoryStoreSupplierOperations {
    fn add_supplier(&self, model: NewSupplierModel) -> Result<i64, InventoryStoreError>;
    fn update_supplier(&self, id: i64, model: NewSupplierModel) -> Result<(), InventoryStoreError>;
    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError>;
    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError>;
    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> InventoryStoreSupplierOperations
    for InventoryStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_supplier(&self, model: NewSupplierModel) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(supplier::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_supplier(&self, id: i64, model: NewSupplierModel) -> Result<(), InventoryStoreError> {
        let updated = diesel::update(supplier::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find supplier with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError> {
        let model = supplier::table
            .filter(supplier::id.eq(id))
            .first::<SupplierModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Supplier::from))
    }

    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = supplier::table
                .order(supplier::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<SupplierModel>(self.conn)?;

            let total = supplier::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Supplier::from).collect();

            Ok(SupplierList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError> {
        let deleted = diesel::delete(supplier::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find supplier with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> InventoryStoreSupplierOperations
    for InventoryStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_supplier(&self, model: NewSupplierModel) -> Result<i64, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            diesel::insert_into(supplier::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_supplier(&self, id: i64, model: NewSupplierModel) -> Result<(), InventoryStoreError> {
        let updated = diesel::update(supplier::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find supplier with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError> {
        let model = supplier::table
            .filter(supplier::id.eq(id))
            .first::<SupplierModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Supplier::from))
    }

    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError> {
        self.conn.transaction::<_, InventoryStoreError, _>(|| {
            let models = supplier::table
                .order(supplier::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<SupplierModel>(self.conn)?;

            let total = supplier::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Supplier::from).collect();

            Ok(SupplierList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError> {
        let deleted = diesel::delete(supplier::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(InventoryStoreError::NotFoundError(format!(
                "Could not find supplier with id: {}",
                id
            )));
        }

        Ok(())
    }
}
