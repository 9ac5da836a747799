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
    models::{NewTermConditionModel, TermConditionModel},
    schema::term_condition,
};
use crate::masters::store::{MasterStoreError, TermCondition, TermConditionList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreTermConditionOperations {
    fn add_term_condition(&self, model: NewTermConditionModel) -> Result<i64, MasterStoreError>;
    fn update_term_condition(
        &self,
        id: i64,
        model: NewTermConditionModel,
    ) -> Result<(), MasterStoreError>;
    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError>;
    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError>;
    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreTermConditionOperations
    for MasterStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_term_condition(&self, model: NewTermConditionModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(term_condition::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_term_condition(
        &self,
        id: i64,
        model: NewTermConditionModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(term_condition::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find term condition with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError> {
        let model = term_condition::table
            .filter(term_condition::id.eq(id))
            .first::<TermConditionModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(TermCondition::from))
    }

    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = term_condition::table
                .order(term_condition::id.asc())
                .offset(offset)
                .limit(limit)
                .load::<TermConditionModel>(self.conn)?;

            let total = term_condition::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(TermCondition::from).collect();

            Ok(TermConditionList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(term_condition::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find term condition with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreTermConditionOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_term_condition(&self, model: NewTermConditionModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(term_condition::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_term_condition(
        &self,
        id: i64,
        model: NewTermConditionModel,
    ) -> Result<(), MasterStoreError> {
        let updated = diesel::update(term_condition::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find term condition with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError> {
        let model = term_condition::table
            .filter(term_condition::id.eq(id))
            .first::<TermConditionModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(TermCondition::from))
    }

    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = term_condition::table
                .order(term_condition::id.asc())
                .offset(offset)
                .limit(limit)
                .load::<TermConditionModel>(self.conn)?;

            let total = term_condition::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(TermCondition::from).collect();

            Ok(TermConditionList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(term_condition::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find term condition with id: {}",
                id
            )));
        }

        Ok(())
    }
}
