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

use super::DispatchStoreOperations;
use crate::dispatch::store::diesel::{models::DispatchItemModel, schema::dispatch_item};
use crate::dispatch::store::{DispatchItem, DispatchItemList, DispatchStoreError};
use crate::paging::Paging;

use diesel::prelude::*;

pub(in crate::dispatch::store::diesel) trait DispatchStorePendingItemOperations {
    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError>;
    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DispatchStorePendingItemOperations
    for DispatchStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = dispatch_item::table
                .filter(dispatch_item::dispatch_id.is_null())
                .order((dispatch_item::ready_at.asc(), dispatch_item::id.asc()))
                .offset(offset)
                .limit(limit)
                .load::<DispatchItemModel>(self.conn)?;

            let total = dispatch_item::table
                .filter(dispatch_item::dispatch_id.is_null())
                .count()
                .get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(DispatchItem::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(DispatchStoreError::InternalError)?;

            Ok(DispatchItemList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError> {
        let model = dispatch_item::table
            .filter(dispatch_item::id.eq(id))
            .first::<DispatchItemModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(DispatchItem::try_from)
            .transpose()
            .map_err(DispatchStoreError::InternalError)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DispatchStorePendingItemOperations
    for DispatchStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = dispatch_item::table
                .filter(dispatch_item::dispatch_id.is_null())
                .order((dispatch_item::ready_at.asc(), dispatch_item::id.asc()))
                .offset(offset)
                .limit(limit)
                .load::<DispatchItemModel>(self.conn)?;

            let total = dispatch_item::table
                .filter(dispatch_item::dispatch_id.is_null())
                .count()
                .get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(DispatchItem::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(DispatchStoreError::InternalError)?;

            Ok(DispatchItemList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError> {
        let model = dispatch_item::table
            .filter(dispatch_item::id.eq(id))
            .first::<DispatchItemModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(DispatchItem::try_from)
            .transpose()
            .map_err(DispatchStoreError::InternalError)
    }
}
