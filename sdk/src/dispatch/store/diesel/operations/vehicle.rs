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
use crate::dispatch::store::diesel::{
    models::{NewVehicleModel, VehicleModel},
    schema::vehicle,
};
use crate::dispatch::store::{DispatchStoreError, Vehicle, VehicleList};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::dispatch::store::diesel) trait DispatchStoreVehicleOperations {
    fn add_vehicle(&self, model: NewVehicleModel) -> Result<i64, DispatchStoreError>;
    fn update_vehicle(&self, id: i64, model: NewVehicleModel) -> Result<(), DispatchStoreError>;
    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError>;
    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError>;
    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DispatchStoreVehicleOperations for DispatchStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_vehicle(&self, model: NewVehicleModel) -> Result<i64, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            diesel::insert_into(vehicle::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_vehicle(&self, id: i64, model: NewVehicleModel) -> Result<(), DispatchStoreError> {
        let updated = diesel::update(vehicle::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(DispatchStoreError::NotFoundError(format!(
                "Could not find vehicle with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError> {
        let model = vehicle::table
            .filter(vehicle::id.eq(id))
            .first::<VehicleModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(Vehicle::try_from)
            .transpose()
            .map_err(DispatchStoreError::InternalError)
    }

    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = vehicle::table
                .order(vehicle::number.asc())
                .offset(offset)
                .limit(limit)
                .load::<VehicleModel>(self.conn)?;

            let total = vehicle::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(Vehicle::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(DispatchStoreError::InternalError)?;

            Ok(VehicleList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError> {
        let deleted = diesel::delete(vehicle::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(DispatchStoreError::NotFoundError(format!(
                "Could not find vehicle with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DispatchStoreVehicleOperations
    for DispatchStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_vehicle(&self, model: NewVehicleModel) -> Result<i64, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            diesel::insert_into(vehicle::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_vehicle(&self, id: i64, model: NewVehicleModel) -> Result<(), DispatchStoreError> {
        let updated = diesel::update(vehicle::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(DispatchStoreError::NotFoundError(format!(
                "Could not find vehicle with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError> {
        let model = vehicle::table
            .filter(vehicle::id.eq(id))
            .first::<VehicleModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        model
            .map(Vehicle::try_from)
            .transpose()
            .map_err(DispatchStoreError::InternalError)
    }

    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError> {
        self.conn.transaction::<_, DispatchStoreError, _>(|| {
            let models = vehicle::table
                .order(vehicle::number.asc())
                .offset(offset)
                .limit(limit)
                .load::<VehicleModel>(self.conn)?;

            let total = vehicle::table.count().get_result(self.conn)?;

            let data = models
                .into_iter()
                .map(Vehicle::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(DispatchStoreError::InternalError)?;

            Ok(VehicleList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError> {
        let deleted = diesel::delete(vehicle::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(DispatchStoreError::NotFoundError(format!(
                "Could not find vehicle with id: {}",
                id
            )));
        }

        Ok(())
    }
}
