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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::paging::Paging;
use crate::timespan::{elapsed_text, DayDisplay};

pub use error::DispatchStoreError;

/// A delivery vehicle and the load it can carry
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub number: String,
    pub capacity_qty: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct VehicleList {
    pub data: Vec<Vehicle>,
    pub paging: Paging,
}

impl VehicleList {
    pub fn new(data: Vec<Vehicle>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A quantity of an accepted order that is ready to be loaded.
///
/// An item without a `dispatch_id` is pending.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DispatchItem {
    pub id: i64,
    pub dispatch_id: Option<i64>,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub available_qty: Decimal,
    pub qty: Decimal,
    pub ready_at: NaiveDateTime,
    pub dispatch_date: Option<NaiveDate>,
    pub bill_no: Option<String>,
}

impl DispatchItem {
    pub fn is_pending(&self) -> bool {
        self.dispatch_id.is_none()
    }

    /// How long the item has been waiting since it became ready
    pub fn delay_text(&self, now: NaiveDateTime) -> String {
        elapsed_text(self.ready_at, now, DayDisplay::WhenNonZero)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DispatchItemList {
    pub data: Vec<DispatchItem>,
    pub paging: Paging,
}

impl DispatchItemList {
    pub fn new(data: Vec<DispatchItem>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A load sent out on one vehicle
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Dispatch {
    pub id: i64,
    pub vehicle: Vehicle,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<DispatchItem>,
}

impl Dispatch {
    pub fn total_qty(&self) -> Decimal {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Share of the vehicle's capacity used by the load; zero for a vehicle without capacity
    pub fn load_percentage(&self) -> Decimal {
        match (self.total_qty() * Decimal::ONE_HUNDRED).checked_div(self.vehicle.capacity_qty) {
            Some(percentage) => percentage.round_dp(2),
            None => Decimal::ZERO,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DispatchList {
    pub data: Vec<Dispatch>,
    pub paging: Paging,
}

impl DispatchList {
    pub fn new(data: Vec<Dispatch>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Assigns a pending item to a new dispatch
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchAssignment {
    pub item_id: i64,
    pub qty: Decimal,
    pub dispatch_date: Option<NaiveDate>,
    pub bill_no: Option<String>,
}

pub trait DispatchStore: Send + Sync {
    /// Adds a vehicle; the number must be unique
    fn add_vehicle(&self, vehicle: Vehicle) -> Result<i64, DispatchStoreError>;

    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), DispatchStoreError>;

    fn fetch_vehicle(&self, id: i64) -> Result<Option<Vehicle>, DispatchStoreError>;

    /// Lists vehicles ordered by number
    fn list_vehicles(&self, offset: i64, limit: i64) -> Result<VehicleList, DispatchStoreError>;

    /// Deletes a vehicle. A vehicle that has been used for a dispatch cannot be deleted.
    fn delete_vehicle(&self, id: i64) -> Result<(), DispatchStoreError>;

    /// Lists items not yet assigned to a dispatch, longest waiting first
    fn list_pending_items(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DispatchItemList, DispatchStoreError>;

    fn fetch_dispatch_item(&self, id: i64) -> Result<Option<DispatchItem>, DispatchStoreError>;

    /// Creates a dispatch on a vehicle and assigns the given pending items to it.
    ///
    /// Each assigned quantity must be greater than zero and no more than the item's available
    /// quantity, and together they must fit the vehicle's capacity. When less than the
    /// available quantity is loaded, the rest stays pending as a new item. Nothing is written
    /// unless every assignment is valid.
    ///
    /// # Arguments
    ///
    ///  * `vehicle_id` - The vehicle carrying the load
    ///  * `remark` - Free text remark for the dispatch
    ///  * `created_at` - When the dispatch was created
    ///  * `assignments` - The pending items to load
    fn add_dispatch(
        &self,
        vehicle_id: i64,
        remark: &str,
        created_at: NaiveDateTime,
        assignments: Vec<DispatchAssignment>,
    ) -> Result<i64, DispatchStoreError>;

    fn fetch_dispatch(&self, id: i64) -> Result<Option<Dispatch>, DispatchStoreError>;

    /// Lists dispatches, newest first
    fn list_dispatches(&self, offset: i64, limit: i64) -> Result<DispatchList, DispatchStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    fn ready_at() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 6, 1).and_hms(7, 15, 0)
    }

    fn item(qty: i64) -> DispatchItem {
        DispatchItem {
            id: 1,
            dispatch_id: Some(1),
            order_id: 10,
            company_name: "Acme Paints".to_string(),
            location: "Pune".to_string(),
            product: "Enamel".to_string(),
            available_qty: Decimal::from(qty),
            qty: Decimal::from(qty),
            ready_at: ready_at(),
            dispatch_date: None,
            bill_no: None,
        }
    }

    fn dispatch(capacity: i64, items: Vec<DispatchItem>) -> Dispatch {
        Dispatch {
            id: 1,
            vehicle: Vehicle {
                id: 1,
                number: "MH12AB1234".to_string(),
                capacity_qty: Decimal::from(capacity),
            },
            remark: String::new(),
            created_at: ready_at(),
            items,
        }
    }

    #[test]
    fn test_load_percentage() {
        let load = dispatch(300, vec![item(100), item(50)]);
        assert_eq!(load.total_qty(), Decimal::from(150));
        assert_eq!(load.load_percentage(), Decimal::from(50));

        let load = dispatch(3, vec![item(1)]);
        assert_eq!(load.load_percentage(), "33.33".parse::<Decimal>().expect("decimal"));

        let load = dispatch(0, vec![item(1)]);
        assert_eq!(load.load_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_delay_text() {
        let item = item(1);
        assert_eq!(
            item.delay_text(ready_at() + Duration::minutes(95)),
            "1 Hours 35 Minutes"
        );
        assert_eq!(
            item.delay_text(ready_at() + Duration::days(25) + Duration::hours(18)),
            "25 Days 18 Hours 0 Minutes"
        );
    }
}
