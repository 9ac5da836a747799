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

use crate::error::InternalError;
use crate::production::store::diesel::schema::*;
use crate::production::store::{Batch, BatchItem, BatchStatus};
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "batch"]
pub struct NewBatchModel {
    pub supervisor: String,
    pub labour: String,
    pub category: String,
    pub base_qty: String,
    pub production_qty: String,
    pub remark: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub status: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct BatchModel {
    pub id: i64,
    pub supervisor: String,
    pub labour: String,
    pub category: String,
    pub base_qty: String,
    pub production_qty: String,
    pub remark: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub status: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "batch_item"]
pub struct NewBatchItemModel {
    pub batch_id: i64,
    pub product: String,
    pub qty: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct BatchItemModel {
    pub id: i64,
    pub batch_id: i64,
    pub product: String,
    pub qty: String,
}

pub fn make_batch_models(batch: &Batch) -> (NewBatchModel, Vec<NewBatchItemModel>) {
    let header = NewBatchModel {
        supervisor: batch.supervisor.clone(),
        labour: decimal_text(&batch.labour),
        category: batch.category.clone(),
        base_qty: decimal_text(&batch.base_qty),
        production_qty: decimal_text(&batch.production_qty),
        remark: batch.remark.clone(),
        started_at: batch.started_at,
        ended_at: batch.ended_at,
        status: batch.status.as_str().to_string(),
    };

    let items = batch
        .items
        .iter()
        .map(|item| NewBatchItemModel {
            batch_id: 0,
            product: item.product.clone(),
            qty: decimal_text(&item.qty),
        })
        .collect();

    (header, items)
}

impl TryFrom<BatchItemModel> for BatchItem {
    type Error = InternalError;

    fn try_from(model: BatchItemModel) -> Result<Self, Self::Error> {
        Ok(BatchItem {
            product: model.product,
            qty: decimal_column(&model.qty, "batch_item.qty")?,
        })
    }
}

impl TryFrom<(BatchModel, Vec<BatchItemModel>)> for Batch {
    type Error = InternalError;

    fn try_from((model, items): (BatchModel, Vec<BatchItemModel>)) -> Result<Self, Self::Error> {
        Ok(Batch {
            id: model.id,
            supervisor: model.supervisor,
            labour: decimal_column(&model.labour, "batch.labour")?,
            category: model.category,
            base_qty: decimal_column(&model.base_qty, "batch.base_qty")?,
            production_qty: decimal_column(&model.production_qty, "batch.production_qty")?,
            remark: model.remark,
            started_at: model.started_at,
            ended_at: model.ended_at,
            status: model
                .status
                .parse::<BatchStatus>()
                .map_err(|err| InternalError::from_source(Box::new(err)))?,
            items: items
                .into_iter()
                .map(BatchItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
