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
    models::{DepartmentModel, NewDepartmentModel},
    schema::department,
};
use crate::masters::store::{Department, DepartmentList, MasterStoreError};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreDepartmentOperations {
    fn add_department(&self, model: NewDepartmentModel) -> Result<i64, MasterStoreError>;
    fn update_department(&self, id: i64, model: NewDepartmentModel) -> Result<(), MasterStoreError>;
    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError>;
    fn fetch_department_by_name(&self, name: &str) -> Result<Option<Department>, MasterStoreError>;
    fn list_departments(&self, offset: i64, limit: i64) -> Result<DepartmentList, MasterStoreError>;
    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreDepartmentOperations for MasterStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_department(&self, model: NewDepartmentModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(department::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_department(
        &self,
        id: i64,
        model: NewDepartmentModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(department::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find department with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError> {
        let model = department::table
            .filter(department::id.eq(id))
            .first::<DepartmentModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Department::from))
    }

    fn fetch_department_by_name(&self, name: &str) -> Result<Option<Department>, MasterStoreError> {
        let model = department::table
            .filter(department::name.eq(name))
            .first::<DepartmentModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Department::from))
    }

    fn list_departments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DepartmentList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = department::table
                .order(department::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<DepartmentModel>(self.conn)?;

            let total = department::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Department::from).collect();

            Ok(DepartmentList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(department::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find department with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreDepartmentOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_department(&self, model: NewDepartmentModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(department::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_department(
        &self,
        id: i64,
        model: NewDepartmentModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(department::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find department with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError> {
        let model = department::table
            .filter(department::id.eq(id))
            .first::<DepartmentModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Department::from))
    }

    fn fetch_department_by_name(&self, name: &str) -> Result<Option<Department>, MasterStoreError> {
        let model = department::table
            .filter(department::name.eq(name))
            .first::<DepartmentModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Department::from))
    }

    fn list_departments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DepartmentList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = department::table
                .order(department::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<DepartmentModel>(self.conn)?;

            let total = department::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Department::from).collect();

            Ok(DepartmentList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(department::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find department with id: {}",
                id
            )));
        }

        Ok(())
    }
}
