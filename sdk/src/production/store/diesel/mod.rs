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

pub(in crate) mod models;
mod operations;
pub(in crate) mod schema;

use chrono::NaiveDateTime;
use diesel::r2d2::{ConnectionManager, Pool};

use super::{Batch, BatchList, BatchStatus, ProductionStore, ProductionStoreError};
use models::make_batch_models;
use operations::batch::ProductionStoreBatchOperations;
use operations::ProductionStoreOperations;

/// Manages production batches in the database
#[derive(Clone)]
pub struct DieselProductionStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselProductionStore<C> {
    /// Creates a new DieselProductionStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselProductionStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl ProductionStore for DieselProductionStore<diesel::pg::PgConnection> {
    fn add_batch(&self, batch: Batch) -> Result<i64, ProductionStoreError> {
        let (header, items) = make_batch_models(&batch);
        ProductionStoreOperations::new(&*self.connection_pool.get()?).add_batch(header, items)
    }

    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).fetch_batch(id)
    }

    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?)
            .list_batches(status, offset, limit)
    }

    fn finish_batch(&self, id: i64, ended_at: NaiveDateTime) -> Result<(), ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).change_batch_status(
            id,
            BatchStatus::Finished,
            Some(ended_at),
        )
    }

    fn cancel_batch(&self, id: i64) -> Result<(), ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).change_batch_status(
            id,
            BatchStatus::Cancelled,
            None,
        )
    }
}

#[cfg(feature = "sqlite")]
impl ProductionStore for DieselProductionStore<diesel::sqlite::SqliteConnection> {
    fn add_batch(&self, batch: Batch) -> Result<i64, ProductionStoreError> {
        let (header, items) = make_batch_models(&batch);
        ProductionStoreOperations::new(&*self.connection_pool.get()?).add_batch(header, items)
    }

    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).fetch_batch(id)
    }

    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?)
            .list_batches(status, offset, limit)
    }

    fn finish_batch(&self, id: i64, ended_at: NaiveDateTime) -> Result<(), ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).change_batch_status(
            id,
            BatchStatus::Finished,
            Some(ended_at),
        )
    }

    fn cancel_batch(&self, id: i64) -> Result<(), ProductionStoreError> {
        ProductionStoreOperations::new(&*self.connection_pool.get()?).change_batch_status(
            id,
            BatchStatus::Cancelled,
            None,
        )
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;
    use rust_decimal::Decimal;

    use crate::migrations::run_sqlite_migrations;
    use crate::production::store::BatchItem;
    use crate::store::sqlite::ConnectionOptions;

    fn decimal(value: &str) -> Decimal {
        value.parse().expect("Invalid decimal")
    }

    fn started_at() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 3, 4).and_hms(8, 30, 0)
    }

    fn create_store() -> DieselProductionStore<SqliteConnection> {
        let pool = Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
            .expect("Failed to build connection pool");

        run_sqlite_migrations(&*pool.get().expect("Failed to get connection"))
            .expect("Failed to run migrations");

        DieselProductionStore::new(pool)
    }

    fn batch(category: &str) -> Batch {
        Batch {
            id: 0,
            supervisor: "R. Patil".to_string(),
            labour: decimal("4"),
            category: category.to_string(),
            base_qty: decimal("100"),
            production_qty: decimal("250"),
            remark: "Morning shift".to_string(),
            started_at: started_at(),
            ended_at: None,
            status: BatchStatus::Active,
            items: vec![
                BatchItem {
                    product: "Titanium Dioxide".to_string(),
                    qty: decimal("62.5"),
                },
                BatchItem {
                    product: "Alkyd Resin".to_string(),
                    qty: decimal("137.5"),
                },
            ],
        }
    }

    #[test]
    fn test_add_and_fetch_batch() {
        let store = create_store();

        let id = store.add_batch(batch("Enamel")).expect("Unable to add batch");

        let fetched = store
            .fetch_batch(id)
            .expect("Unable to fetch batch")
            .expect("Batch not found");

        assert_eq!(fetched.id, id);
        assert_eq!(fetched.status, BatchStatus::Active);
        assert_eq!(fetched.labour, decimal("4"));
        assert_eq!(fetched.production_qty, decimal("250"));
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].product, "Titanium Dioxide");
        assert_eq!(fetched.items[1].qty, decimal("137.5"));

        assert!(store.fetch_batch(id + 1).expect("Unable to fetch").is_none());
    }

    #[test]
    fn test_batch_without_items_is_rejected() {
        let store = create_store();

        let mut empty = batch("Primer");
        empty.items.clear();

        match store.add_batch(empty) {
            Err(ProductionStoreError::InvalidArgumentError(err)) => {
                assert_eq!(err.argument(), "items")
            }
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }

        let list = store.list_batches(None, 0, 10).expect("Unable to list");
        assert!(list.data.is_empty());
    }

    #[test]
    fn test_finish_then_cancel() {
        let store = create_store();
        let id = store.add_batch(batch("Enamel")).expect("Unable to add batch");
        let ended_at = NaiveDate::from_ymd(2024, 3, 4).and_hms(16, 0, 0);

        store.finish_batch(id, ended_at).expect("Unable to finish");

        let fetched = store
            .fetch_batch(id)
            .expect("Unable to fetch batch")
            .expect("Batch not found");
        assert_eq!(fetched.status, BatchStatus::Finished);
        assert_eq!(fetched.ended_at, Some(ended_at));

        match store.cancel_batch(id) {
            Err(ProductionStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }

        match store.finish_batch(id + 10, ended_at) {
            Err(ProductionStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }

    #[test]
    fn test_list_by_status() {
        let store = create_store();
        let first = store.add_batch(batch("Enamel")).expect("Unable to add batch");
        let second = store.add_batch(batch("Primer")).expect("Unable to add batch");
        store.add_batch(batch("Putty")).expect("Unable to add batch");

        store.cancel_batch(first).expect("Unable to cancel");
        store
            .finish_batch(second, started_at())
            .expect("Unable to finish");

        let active = store
            .list_batches(Some(BatchStatus::Active), 0, 10)
            .expect("Unable to list");
        assert_eq!(active.data.len(), 1);
        assert_eq!(active.data[0].category, "Putty");
        assert_eq!(active.paging.total, 1);

        let all = store.list_batches(None, 0, 2).expect("Unable to list");
        assert_eq!(all.data.len(), 2);
        assert_eq!(all.paging.total, 3);
    }
}
