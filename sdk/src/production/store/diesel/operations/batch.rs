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

use chrono::NaiveDateTime;

use super::ProductionStoreOperations;
use crate::error::{InvalidArgumentError, InvalidStateError};
use crate::production::store::diesel::{
    models::{BatchItemModel, BatchModel, NewBatchItemModel, NewBatchModel},
    schema::{batch, batch_item},
};
use crate::production::store::{Batch, BatchList, BatchStatus, ProductionStoreError};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::production::store::diesel) trait ProductionStoreBatchOperations {
    fn add_batch(
        &self,
        batch: NewBatchModel,
        items: Vec<NewBatchItemModel>,
    ) -> Result<i64, ProductionStoreError>;
    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError>;
    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError>;
    fn change_batch_status(
        &self,
        id: i64,
        status: BatchStatus,
        ended_at: Option<NaiveDateTime>,
    ) -> Result<(), ProductionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> ProductionStoreBatchOperations
    for ProductionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_batch(
        &self,
        header: NewBatchModel,
        items: Vec<NewBatchItemModel>,
    ) -> Result<i64, ProductionStoreError> {
        if items.is_empty() {
            return Err(ProductionStoreError::InvalidArgumentError(
                InvalidArgumentError::new(
                    "items".to_string(),
                    "A batch needs at least one item".to_string(),
                ),
            ));
        }

        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            diesel::insert_into(batch::table)
                .values(&header)
                .execute(self.conn)?;

            let batch_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(batch_item::table)
                    .values(&NewBatchItemModel { batch_id, ..item })
                    .execute(self.conn)?;
            }

            debug!("Started batch {} under {}", batch_id, header.supervisor);

            Ok(batch_id)
        })
    }

    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let model = batch::table
                .filter(batch::id.eq(id))
                .first::<BatchModel>(self.conn)
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

            let items = batch_item::table
                .filter(batch_item::batch_id.eq(model.id))
                .order(batch_item::id.asc())
                .load::<BatchItemModel>(self.conn)?;

            Batch::try_from((model, items))
                .map(Some)
                .map_err(ProductionStoreError::InternalError)
        })
    }

    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let mut query = batch::table.into_boxed();
            let mut count_query = batch::table.into_boxed();

            if let Some(status) = status {
                query = query.filter(batch::status.eq(status.as_str()));
                count_query = count_query.filter(batch::status.eq(status.as_str()));
            }

            let models = query
                .order((batch::started_at.desc(), batch::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<BatchModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = batch_item::table
                    .filter(batch_item::batch_id.eq(model.id))
                    .order(batch_item::id.asc())
                    .load::<BatchItemModel>(self.conn)?;

                data.push(
                    Batch::try_from((model, items))
                        .map_err(ProductionStoreError::InternalError)?,
                );
            }

            Ok(BatchList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn change_batch_status(
        &self,
        id: i64,
        status: BatchStatus,
        ended_at: Option<NaiveDateTime>,
    ) -> Result<(), ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let current = batch::table
                .find(id)
                .select(batch::status)
                .first::<String>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    ProductionStoreError::NotFoundError(format!(
                        "Could not find batch with id: {}",
                        id
                    ))
                })?;

            if current != BatchStatus::Active.as_str() {
                return Err(ProductionStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Batch {} is {} and can no longer change status",
                        id, current
                    )),
                ));
            }

            diesel::update(batch::table.find(id))
                .set((
                    batch::status.eq(status.as_str()),
                    batch::ended_at.eq(ended_at),
                ))
                .execute(self.conn)?;

            debug!("Batch {} is now {}", id, status);

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> ProductionStoreBatchOperations
    for ProductionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_batch(
        &self,
        header: NewBatchModel,
        items: Vec<NewBatchItemModel>,
    ) -> Result<i64, ProductionStoreError> {
        if items.is_empty() {
            return Err(ProductionStoreError::InvalidArgumentError(
                InvalidArgumentError::new(
                    "items".to_string(),
                    "A batch needs at least one item".to_string(),
                ),
            ));
        }

        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            diesel::insert_into(batch::table)
                .values(&header)
                .execute(self.conn)?;

            let batch_id = self.conn.last_insert_id()?;

            for item in items {
                diesel::insert_into(batch_item::table)
                    .values(&NewBatchItemModel { batch_id, ..item })
                    .execute(self.conn)?;
            }

            debug!("Started batch {} under {}", batch_id, header.supervisor);

            Ok(batch_id)
        })
    }

    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let model = batch::table
                .filter(batch::id.eq(id))
                .first::<BatchModel>(self.conn)
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

            let items = batch_item::table
                .filter(batch_item::batch_id.eq(model.id))
                .order(batch_item::id.asc())
                .load::<BatchItemModel>(self.conn)?;

            Batch::try_from((model, items))
                .map(Some)
                .map_err(ProductionStoreError::InternalError)
        })
    }

    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let mut query = batch::table.into_boxed();
            let mut count_query = batch::table.into_boxed();

            if let Some(status) = status {
                query = query.filter(batch::status.eq(status.as_str()));
                count_query = count_query.filter(batch::status.eq(status.as_str()));
            }

            let models = query
                .order((batch::started_at.desc(), batch::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<BatchModel>(self.conn)?;
            let total = count_query.count().get_result(self.conn)?;

            let mut data = Vec::with_capacity(models.len());
            for model in models {
                let items = batch_item::table
                    .filter(batch_item::batch_id.eq(model.id))
                    .order(batch_item::id.asc())
                    .load::<BatchItemModel>(self.conn)?;

                data.push(
                    Batch::try_from((model, items))
                        .map_err(ProductionStoreError::InternalError)?,
                );
            }

            Ok(BatchList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn change_batch_status(
        &self,
        id: i64,
        status: BatchStatus,
        ended_at: Option<NaiveDateTime>,
    ) -> Result<(), ProductionStoreError> {
        self.conn.transaction::<_, ProductionStoreError, _>(|| {
            let current = batch::table
                .find(id)
                .select(batch::status)
                .first::<String>(self.conn)
                .map(Some)
                .or_else(|err| {
                    if err == diesel::result::Error::NotFound {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                })?
                .ok_or_else(|| {
                    ProductionStoreError::NotFoundError(format!(
                        "Could not find batch with id: {}",
                        id
                    ))
                })?;

            if current != BatchStatus::Active.as_str() {
                return Err(ProductionStoreError::InvalidStateError(
                    InvalidStateError::with_message(format!(
                        "Batch {} is {} and can no longer change status",
                        id, current
                    )),
                ));
            }

            diesel::update(batch::table.find(id))
                .set((
                    batch::status.eq(status.as_str()),
                    batch::ended_at.eq(ended_at),
                ))
                .execute(self.conn)?;

            debug!("Batch {} is now {}", id, status);

            Ok(())
        })
    }
}
