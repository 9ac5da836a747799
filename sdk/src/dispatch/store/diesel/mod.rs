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

use super::{
    Dispatch, DispatchAssignment, DispatchItem, DispatchItemList, DispatchList, DispatchStore,
    DispatchStoreError, Vehicle, VehicleList,
};
use models::NewDispatchModel;
use operations::dispatch::DispatchStoreDispatchOperations;
use operations::pending_item::DispatchStorePendingItemOperations;
use operations::vehicle::DispatchStoreVehicleOperations;
use operations::DispatchStoreOperations;

/// Manages vehicles and dispatches in the database
#[derive(Clone)]
pub struct DieselDispatchStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselDispatchStore<C> {
    /// Creates a new DieselDispatchStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselDispatchStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl DispatchStore for DieselDispatchStore<diesel::pg::PgConnection> {
    fn add_vehicle(&self, vehicle: Vehicle) -> Result<i64, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).add_vehicle(vehicle.into())
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?)
            .update_vehicle(vehicle.id, vehicle.into())
    }

    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_vehicle(id)
    }

    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).list_vehicles(offset, limit)
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).delete_vehicle(id)
    }

    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?)
            .list_pending_items(offset, limit)
    }

    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_dispatch_item(id)
    }

    fn add_dispatch(
        &self,
        vehicle_id: i64,
        remark: &str,
        created_at: NaiveDateTime,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).add_dispatch(
            NewDispatchModel {
                vehicle_id,
                remark: remark.to_string(),
                created_at,
            },
            assignments,
        )
    }

    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_dispatch(id)
    }

    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).list_dispatches(offset, limit)
    }
}

#[cfg(feature = "sqlite")]
impl DispatchStore for DieselDispatchStore<diesel::sqlite::SqliteConnection> {
    fn add_vehicle(&self, vehicle: Vehicle) -> Result<i64, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).add_vehicle(vehicle.into())
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?)
            .update_vehicle(vehicle.id, vehicle.into())
    }

    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_vehicle(id)
    }

    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).list_vehicles(offset, limit)
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).delete_vehicle(id)
    }

    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?)
            .list_pending_items(offset, limit)
    }

    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_dispatch_item(id)
    }

    fn add_dispatch(
        &self,
        vehicle_id: i64,
        remark: &str,
        created_at: NaiveDateTime,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).add_dispatch(
            NewDispatchModel {
                vehicle_id,
                remark: remark.to_string(),
                created_at,
            },
            assignments,
        )
    }

    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).fetch_dispatch(id)
    }

    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError> {
        DispatchStoreOperations::new(&*self.connection_pool.get()?).list_dispatches(offset, limit)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::prelude::*;
    use diesel::sqlite::SqliteConnection;
    use rust_decimal::Decimal;

    use crate::error::ConstraintViolationType;
    use crate::migrations::run_sqlite_migrations;
    use crate::store::sqlite::ConnectionOptions;
    use super::models::NewDispatchItemModel;
    use super::schema::dispatch_item;

    fn decimal(value: &str) -> Decimal {
        value.parse().expect("Invalid decimal")
    }

    fn ready_at() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 6, 1).and_hms(7, 15, 0)
    }

    fn create_store() -> DieselDispatchStore<SqliteConnection> {
        let pool = Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
            .expect("Failed to build connection pool");

        run_sqlite_migrations(&*pool.get().expect("Failed to get connection"))
            .expect("Failed to run migrations");

        DieselDispatchStore::new(pool)
    }

    fn add_pending_item(
        store: &DieselDispatchStore<SqliteConnection>,
        order_id: i64,
        qty: &str,
    ) -> i64 {
        let conn = store.connection_pool.get().expect("Failed to get connection");
        diesel::insert_into(dispatch_item::table)
            .values(&NewDispatchItemModel {
                dispatch_id: None,
                order_id,
                company_name: "Acme Paints".to_string(),
                location: "Nashik".to_string(),
                product: "Enamel White".to_string(),
                available_qty: qty.to_string(),
                qty: "0".to_string(),
                ready_at: ready_at(),
                dispatch_date: None,
                bill_no: Some("B-17".to_string()),
            })
            .execute(&*conn)
            .expect("Failed to insert dispatch item");

        dispatch_item::table
            .select(dispatch_item::id)
            .order(dispatch_item::id.desc())
            .first(&*conn)
            .expect("Failed to read dispatch item id")
    }

    fn add_vehicle(store: &DieselDispatchStore<SqliteConnection>, capacity: &str) -> i64 {
        store
            .add_vehicle(Vehicle {
                id: 0,
                number: "MH15 CD 2020".to_string(),
                capacity_qty: decimal(capacity),
            })
            .expect("Unable to add vehicle")
    }

    fn assign(item_id: i64, qty: &str) -> DispatchAssignment {
        DispatchAssignment {
            item_id,
            qty: decimal(qty),
            dispatch_date: Some(NaiveDate::from_ymd(2024, 6, 2)),
            bill_no: Some("INV-2041".to_string()),
        }
    }

    #[test]
    fn test_duplicate_vehicle_number() {
        let store = create_store();
        add_vehicle(&store, "1000");

        match store.add_vehicle(Vehicle {
            id: 0,
            number: "MH15 CD 2020".to_string(),
            capacity_qty: decimal("500"),
        }) {
            Err(DispatchStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::Unique)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }
    }

    /// Verifies a dispatch assigns the pending items, that a partial load leaves the rest
    /// pending, and that the vehicle can no longer be deleted.
    #[test]
    fn test_add_dispatch() {
        let store = create_store();
        let vehicle_id = add_vehicle(&store, "1000");
        let full = add_pending_item(&store, 1, "400");
        let partial = add_pending_item(&store, 2, "500");

        let dispatch_id = store
            .add_dispatch(
                vehicle_id,
                "Morning run",
                ready_at(),
                vec![assign(full, "400"), assign(partial, "350")],
            )
            .expect("Unable to add dispatch");

        let dispatch = store
            .fetch_dispatch(dispatch_id)
            .expect("Unable to fetch dispatch")
            .expect("Dispatch not found");
        assert_eq!(dispatch.items.len(), 2);
        assert_eq!(dispatch.total_qty(), decimal("750"));
        assert_eq!(dispatch.load_percentage(), decimal("75"));
        assert_eq!(dispatch.items[1].bill_no, Some("INV-2041".to_string()));

        let pending = store
            .list_pending_items(0, 10)
            .expect("Unable to list pending items");
        assert_eq!(pending.data.len(), 1);
        assert_eq!(pending.data[0].order_id, 2);
        assert_eq!(pending.data[0].available_qty, decimal("150"));
        assert_eq!(pending.data[0].ready_at, ready_at());

        let list = store.list_dispatches(0, 10).expect("Unable to list dispatches");
        assert_eq!(list.data, vec![dispatch]);

        match store.delete_vehicle(vehicle_id) {
            Err(DispatchStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }
    }

    /// Verifies that a load over the vehicle's capacity writes nothing.
    #[test]
    fn test_add_dispatch_over_capacity() {
        let store = create_store();
        let vehicle_id = add_vehicle(&store, "500");
        let first = add_pending_item(&store, 1, "300");
        let second = add_pending_item(&store, 2, "300");

        match store.add_dispatch(
            vehicle_id,
            "",
            ready_at(),
            vec![assign(first, "300"), assign(second, "250")],
        ) {
            Err(DispatchStoreError::InvalidArgumentError(err)) => {
                assert_eq!(err.argument(), "qty")
            }
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }

        let pending = store
            .list_pending_items(0, 10)
            .expect("Unable to list pending items");
        assert_eq!(pending.paging.total, 2);
        assert!(store
            .list_dispatches(0, 10)
            .expect("Unable to list dispatches")
            .data
            .is_empty());
    }

    #[test]
    fn test_add_dispatch_rejects_invalid_assignments() {
        let store = create_store();
        let vehicle_id = add_vehicle(&store, "1000");
        let item = add_pending_item(&store, 1, "100");

        for qty in &["0", "-5", "100.01"] {
            match store.add_dispatch(vehicle_id, "", ready_at(), vec![assign(item, qty)]) {
                Err(DispatchStoreError::InvalidArgumentError(_)) => (),
                res => panic!("Expected InvalidArgumentError for {}, got {:?}", qty, res),
            }
        }

        match store.add_dispatch(vehicle_id, "", ready_at(), vec![]) {
            Err(DispatchStoreError::InvalidArgumentError(_)) => (),
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }

        store
            .add_dispatch(vehicle_id, "", ready_at(), vec![assign(item, "100")])
            .expect("Unable to add dispatch");

        match store.add_dispatch(vehicle_id, "", ready_at(), vec![assign(item, "100")]) {
            Err(DispatchStoreError::InvalidStateError(_)) => (),
            res => panic!("Expected InvalidStateError, got {:?}", res),
        }

        match store.add_dispatch(999, "", ready_at(), vec![assign(item, "1")]) {
            Err(DispatchStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }
}
