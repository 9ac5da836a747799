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
    models::{NewUnitModel, UnitModel},
    schema::unit,
};
use crate::masters::store::{MasterStoreError, Unit, UnitList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreUnitOperations {
    fn add_unit(&self, model: NewUnitModel) -> Result<i64, MasterStoreError>;
    fn update_unit(&self, id: i64, model: NewUnitModel) -> Result<(), MasterStoreError>;
    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError>;
    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError>;
    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError>;
    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreUnitOperations for MasterStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_unit(&self, model: NewUnitModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(unit::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_unit(&self, id: i64, model: NewUnitModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(unit::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find unit with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError> {
        let model = unit::table
            .filter(unit::id.eq(id))
            .first::<UnitModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Unit::from))
    }

    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError> {
        let model = unit::table
            .filter(unit::name.eq(name))
            .first::<UnitModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Unit::from))
    }

    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = unit::table
                .order(unit::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<UnitModel>(self.conn)?;

            let total = unit::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Unit::from).collect();

            Ok(UnitList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(unit::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find unit with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreUnitOperations for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_unit(&self, model: NewUnitModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(unit::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_unit(&self, id: i64, model: NewUnitModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(unit::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find unit with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError> {
        let model = unit::table
            .filter(unit::id.eq(id))
            .first::<UnitModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Unit::from))
    }

    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError> {
        let model = unit::table
            .filter(unit::name.eq(name))
            .first::<UnitModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Unit::from))
    }

    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = unit::table
                .order(unit::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<UnitModel>(self.conn)?;

            let total = unit::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Unit::from).collect();

            Ok(UnitList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(unit::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find unit with id: {}",
                id
            )));
        }

        Ok(())
    }
}
