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

use diesel::{
    sqlite::SqliteConnection,
    r2d2::{ConnectionManager, Pool},
};
use diesel::{connection::SimpleConnection, r2d2::CustomizeConnection, RunQueryDsl};

use super::{LastInsertId, StoreFactory};

no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::BigInt,
    "Represents the SQLite last_insert_rowid() function"
);

/// Applied to every pooled SQLite connection: SQLite leaves foreign key enforcement off unless
/// asked, and a busy timeout lets concurrent writers wait instead of failing.
#[derive(Debug)]
pub struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

impl LastInsertId for SqliteConnection {
    fn last_insert_id(&self) -> diesel::QueryResult<i64> {
        diesel::select(last_insert_rowid).get_result::<i64>(self)
    }
}

/// A `StoreFactory` backed by a SQLite database.
pub struct SqliteStoreFactory {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl SqliteStoreFactory {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }
}

impl StoreFactory for SqliteStoreFactory {
    #[cfg(feature = "masters")]
    fn get_master_store<'a>(&'a self) -> Box<dyn crate::masters::store::MasterStore + 'a> {
        Box::new(crate::masters::store::diesel::DieselMasterStore::new(
            self.pool.clone(),
        ))
    }

    #[cfg(feature = "formulation")]
    fn get_formulation_store<'a>(
        &'a self,
    ) -> Box<dyn crate::formulation::store::FormulationStore + 'a> {
        Box::new(crate::formulation::store::diesel::DieselFormulationStore::new(
            self.pool.clone(),
        ))
    }

    #[cfg(feature = "orders")]
    fn get_order_store<'a>(&'a self) -> Box<dyn crate::orders::store::OrderStore + 'a> {
        Box::new(crate::orders::store::diesel::DieselOrderStore::new(
            self.pool.clone(),
        ))
    }

    #[cfg(feature = "production")]
    fn get_production_store<'a>(
        &'a self,
    ) -> Box<dyn crate::production::store::ProductionStore + 'a> {
        Box::new(crate::production::store::diesel::DieselProductionStore::new(
            self.pool.clone(),
        ))
    }

    #[cfg(feature = "dispatch")]
    fn get_dispatch_store<'a>(&'a self) -> Box<dyn crate::dispatch::store::DispatchStore + 'a> {
        Box::new(crate::dispatch::store::diesel::DieselDispatchStore::new(
            self.pool.clone(),
        ))
    }

    #[cfg(feature = "inventory")]
    fn get_inventory_store<'a>(
        &'a self,
    ) -> Box<dyn crate::inventory::store::InventoryStore + 'a> {
        Box::new(crate::inventory::store::diesel::DieselInventoryStore::new(
            self.pool.clone(),
        ))
    }
}
