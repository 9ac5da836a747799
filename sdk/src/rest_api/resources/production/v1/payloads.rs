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

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::production::{Batch, BatchItem, BatchStatus};
use crate::rest_api::resources::paging::v1::Paging;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchItemSlice {
    pub product: String,
    pub qty: Decimal,
}

impl From<BatchItem> for BatchItemSlice {
    fn from(item: BatchItem) -> Self {
        Self {
            product: item.product,
            qty: item.qty,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchSlice {
    pub id: i64,
    pub supervisor: String,
    pub labour: Decimal,
    pub category: String,
    pub base_qty: Decimal,
    pub production_qty: Decimal,
    pub remark: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub status: BatchStatus,
    pub status_label: String,
    /// Hours the batch is expected to take
    pub time_required: Decimal,
    pub items: Vec<BatchItemSlice>,
}

impl From<Batch> for BatchSlice {
    fn from(batch: Batch) -> Self {
        let time_required = batch.time_required();
        Self {
            id: batch.id,
            supervisor: batch.supervisor,
            labour: batch.labour,
            category: batch.category,
            base_qty: batch.base_qty,
            production_qty: batch.production_qty,
            remark: batch.remark,
            started_at: batch.started_at,
            ended_at: batch.ended_at,
            status: batch.status,
            status_label: batch.status.label().to_string(),
            time_required,
            items: batch.items.into_iter().map(BatchItemSlice::from).collect(),
        }
    }
}

/// Batch lines prefilled from a BOM
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchPlanSlice {
    pub bom_id: i64,
    pub product_id: i64,
    pub base_qty: Decimal,
    pub production_qty: Decimal,
    pub items: Vec<BatchItemSlice>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BomOption {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductionScreenSlice {
    pub selected: Option<BatchSlice>,
    pub plan: Option<BatchPlanSlice>,
    pub data: Vec<BatchSlice>,
    pub paging: Paging,
    pub boms: Vec<BomOption>,
}

/// Query of the batch production screen
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProductionQuery {
    /// Batch to show in full
    pub id: Option<i64>,
    /// `ACTIVE`, `FINISHED` or `CANCELLED`
    pub status: Option<String>,
    /// BOM to prefill the batch lines from, scaled to `production_qty`
    pub bom_id: Option<i64>,
    pub production_qty: Option<String>,
}
