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

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::InvalidArgumentError;
use crate::paging::Paging;

pub use error::ProductionStoreError;

/// Lifecycle of a batch. Only an active batch may change status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Active,
    Finished,
    Cancelled,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "ACTIVE",
            BatchStatus::Finished => "FINISHED",
            BatchStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            BatchStatus::Active => "Active",
            BatchStatus::Finished => "Finished",
            BatchStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(BatchStatus::Active),
            "FINISHED" => Ok(BatchStatus::Finished),
            "CANCELLED" => Ok(BatchStatus::Cancelled),
            _ => Err(InvalidArgumentError::new(
                "status".to_string(),
                format!("{} is not a valid batch status", s),
            )),
        }
    }
}

/// A production batch and the materials charged to it
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Batch {
    pub id: i64,
    pub supervisor: String,
    /// Total labour hours or cost
    pub labour: Decimal,
    pub category: String,
    pub base_qty: Decimal,
    pub production_qty: Decimal,
    pub remark: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub status: BatchStatus,
    pub items: Vec<BatchItem>,
}

impl Batch {
    /// Planned hours, at one hour per hundred units produced
    pub fn time_required(&self) -> Decimal {
        self.production_qty / Decimal::ONE_HUNDRED
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BatchItem {
    pub product: String,
    pub qty: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BatchList {
    pub data: Vec<Batch>,
    pub paging: Paging,
}

impl BatchList {
    pub fn new(data: Vec<Batch>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

pub trait ProductionStore: Send + Sync {
    /// Adds a batch with its items in one transaction, returning the id of the batch. A batch
    /// needs at least one item.
    fn add_batch(&self, batch: Batch) -> Result<i64, ProductionStoreError>;

    fn fetch_batch(&self, id: i64) -> Result<Option<Batch>, ProductionStoreError>;

    /// Lists batches, most recently started first
    ///
    /// # Arguments
    ///
    ///  * `status` - Only list batches with this status
    ///  * `offset` - The index of the first in storage to retrieve
    ///  * `limit` - The number of items to retrieve from the offset
    fn list_batches(
        &self,
        status: Option<BatchStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<BatchList, ProductionStoreError>;

    /// Marks an active batch finished at `ended_at`
    fn finish_batch(&self, id: i64, ended_at: NaiveDateTime) -> Result<(), ProductionStoreError>;

    /// Marks an active batch cancelled
    fn cancel_batch(&self, id: i64) -> Result<(), ProductionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    #[test]
    fn test_time_required() {
        let batch = Batch {
            id: 1,
            supervisor: "Suresh".to_string(),
            labour: Decimal::from(8),
            category: "Enamel".to_string(),
            base_qty: Decimal::from(100),
            production_qty: Decimal::from(250),
            remark: String::new(),
            started_at: NaiveDate::from_ymd(2024, 2, 1).and_hms(8, 0, 0),
            ended_at: None,
            status: BatchStatus::Active,
            items: vec![],
        };

        assert_eq!(batch.time_required(), "2.5".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_status_round_trip() {
        for status in &[
            BatchStatus::Active,
            BatchStatus::Finished,
            BatchStatus::Cancelled,
        ] {
            assert_eq!(
                status.as_str().parse::<BatchStatus>().expect("Invalid status"),
                *status
            );
        }
        assert!("DONE".parse::<BatchStatus>().is_err());
    }
}
