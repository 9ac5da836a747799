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
    models::{EmployeeModel, NewEmployeeModel},
    schema::employee,
};
use crate::masters::store::{Employee, EmployeeList, MasterStoreError};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreEmployeeOperations {
    fn add_employee(&self, model: NewEmployeeModel) -> Result<i64, MasterStoreError>;
    fn update_employee(&self, id: i64, model: NewEmployeeModel) -> Result<(), MasterStoreError>;
    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError>;
    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError>;
    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreEmployeeOperations for MasterStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_employee(&self, model: NewEmployeeModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(employee::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_employee(&self, id: i64, model: NewEmployeeModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(employee::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find employee with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError> {
        let model = employee::table
            .filter(employee::id.eq(id))
            .first::<EmployeeModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Employee::from))
    }

    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = employee::table
                .order(employee::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<EmployeeModel>(self.conn)?;

            let total = employee::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Employee::from).collect();

            Ok(EmployeeList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(employee::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find employee with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreEmployeeOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_employee(&self, model: NewEmployeeModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(employee::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_employee(&self, id: i64, model: NewEmployeeModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(employee::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find employee with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError> {
        let model = employee::table
            .filter(employee::id.eq(id))
            .first::<EmployeeModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Employee::from))
    }

    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = employee::table
                .order(employee::name.asc())
                .offset(offset)
                .limit(limit)
                .load::<EmployeeModel>(self.conn)?;

            let total = employee::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Employee::from).collect();

            Ok(EmployeeList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(employee::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find employee with id: {}",
                id
            )));
        }

        Ok(())
    }
}
