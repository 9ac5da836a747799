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
use crate::formulation::store::diesel::schema::*;
use crate::formulation::store::{
    ProductBom, ProductBomBuilder, ProductBomItem, ProductDevelopment, ProductDevelopmentItem,
};
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "product_bom"]
pub struct NewProductBomModel {
    pub product_id: i64,
    pub base_qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductBomModel {
    pub id: i64,
    pub product_id: i64,
    pub base_qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "product_bom_item"]
pub struct NewProductBomItemModel {
    pub bom_id: i64,
    pub material_id: i64,
    pub percent: String,
    pub qty: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductBomItemModel {
    pub id: i64,
    pub bom_id: i64,
    pub material_id: i64,
    pub percent: String,
    pub qty: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "product_development"]
pub struct NewProductDevelopmentModel {
    pub product_name: String,
    pub selling_price: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductDevelopmentModel {
    pub id: i64,
    pub product_name: String,
    pub selling_price: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "product_development_item"]
pub struct NewProductDevelopmentItemModel {
    pub development_id: i64,
    pub material: String,
    pub percent: String,
    pub rate: String,
    pub density: String,
    pub solids: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductDevelopmentItemModel {
    pub id: i64,
    pub development_id: i64,
    pub material: String,
    pub percent: String,
    pub rate: String,
    pub density: String,
    pub solids: String,
}

/// Splits a BOM into its header and item models; item models carry a zero `bom_id` until the
/// header has been written
pub fn make_bom_models(bom: &ProductBom) -> (NewProductBomModel, Vec<NewProductBomItemModel>) {
    let header = NewProductBomModel {
        product_id: bom.product_id(),
        base_qty: decimal_text(&bom.base_qty()),
        remark: bom.remark().to_string(),
        created_at: bom.created_at(),
    };

    let items = bom
        .items()
        .iter()
        .map(|item| NewProductBomItemModel {
            bom_id: 0,
            material_id: item.material_id,
            percent: decimal_text(&item.percent),
            qty: decimal_text(&item.qty),
        })
        .collect();

    (header, items)
}

pub fn make_development_models(
    development: &ProductDevelopment,
) -> (
    NewProductDevelopmentModel,
    Vec<NewProductDevelopmentItemModel>,
) {
    let header = NewProductDevelopmentModel {
        product_name: development.product_name.clone(),
        selling_price: decimal_text(&development.selling_price),
        remark: development.remark.clone(),
        created_at: development.created_at,
    };

    let items = development
        .items
        .iter()
        .map(|item| NewProductDevelopmentItemModel {
            development_id: 0,
            material: item.material.clone(),
            percent: decimal_text(&item.percent),
            rate: decimal_text(&item.rate),
            density: decimal_text(&item.density),
            solids: decimal_text(&item.solids),
        })
        .collect();

    (header, items)
}

impl TryFrom<ProductBomItemModel> for ProductBomItem {
    type Error = InternalError;

    fn try_from(model: ProductBomItemModel) -> Result<Self, Self::Error> {
        Ok(ProductBomItem {
            material_id: model.material_id,
            percent: decimal_column(&model.percent, "product_bom_item.percent")?,
            qty: decimal_column(&model.qty, "product_bom_item.qty")?,
        })
    }
}

impl TryFrom<(ProductBomModel, Vec<ProductBomItemModel>)> for ProductBom {
    type Error = InternalError;

    fn try_from(
        (model, items): (ProductBomModel, Vec<ProductBomItemModel>),
    ) -> Result<Self, Self::Error> {
        let items = items
            .into_iter()
            .map(ProductBomItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        ProductBomBuilder::default()
            .with_id(model.id)
            .with_product_id(model.product_id)
            .with_base_qty(decimal_column(&model.base_qty, "product_bom.base_qty")?)
            .with_remark(model.remark)
            .with_created_at(model.created_at)
            .with_items(items)
            .build()
            .map_err(|err| InternalError::from_source(Box::new(err)))
    }
}

impl TryFrom<ProductDevelopmentItemModel> for ProductDevelopmentItem {
    type Error = InternalError;

    fn try_from(model: ProductDevelopmentItemModel) -> Result<Self, Self::Error> {
        Ok(ProductDevelopmentItem {
            material: model.material,
            percent: decimal_column(&model.percent, "product_development_item.percent")?,
            rate: decimal_column(&model.rate, "product_development_item.rate")?,
            density: decimal_column(&model.density, "product_development_item.density")?,
            solids: decimal_column(&model.solids, "product_development_item.solids")?,
        })
    }
}

impl TryFrom<(ProductDevelopmentModel, Vec<ProductDevelopmentItemModel>)> for ProductDevelopment {
    type Error = InternalError;

    fn try_from(
        (model, items): (ProductDevelopmentModel, Vec<ProductDevelopmentItemModel>),
    ) -> Result<Self, Self::Error> {
        Ok(ProductDevelopment {
            id: model.id,
            product_name: model.product_name,
            selling_price: decimal_column(
                &model.selling_price,
                "product_development.selling_price",
            )?,
            remark: model.remark,
            created_at: model.created_at,
            items: items
                .into_iter()
                .map(ProductDevelopmentItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
