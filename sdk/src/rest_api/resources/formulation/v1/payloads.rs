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

use crate::formulation::{
    costing::line_cost, CostSummary, ProductBom, ProductBomItem, ProductDevelopment,
    ProductDevelopmentItem,
};
use crate::inventory::MasterProduct;
use crate::rest_api::resources::paging::v1::Paging;

/// A master product offered in a select box
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialOption {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl From<MasterProduct> for MaterialOption {
    fn from(product: MasterProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            code: product.code,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductBomItemSlice {
    pub material_id: i64,
    pub percent: Decimal,
    pub qty: Decimal,
}

impl From<&ProductBomItem> for ProductBomItemSlice {
    fn from(item: &ProductBomItem) -> Self {
        Self {
            material_id: item.material_id,
            percent: item.percent,
            qty: item.qty,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductBomSlice {
    pub id: i64,
    pub product_id: i64,
    pub base_qty: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub total_percent: Decimal,
    pub items: Vec<ProductBomItemSlice>,
}

impl From<&ProductBom> for ProductBomSlice {
    fn from(bom: &ProductBom) -> Self {
        Self {
            id: bom.id(),
            product_id: bom.product_id(),
            base_qty: bom.base_qty(),
            remark: bom.remark().to_string(),
            created_at: bom.created_at(),
            total_percent: bom.total_percent(),
            items: bom.items().iter().map(ProductBomItemSlice::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductBomScreenSlice {
    pub selected: Option<ProductBomSlice>,
    pub data: Vec<ProductBomSlice>,
    pub paging: Paging,
    /// Finished goods a BOM can be written for
    pub products: Vec<MaterialOption>,
    /// Raw and packing materials a BOM line can use
    pub materials: Vec<MaterialOption>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDevelopmentItemSlice {
    pub material: String,
    pub percent: Decimal,
    pub rate: Decimal,
    pub density: Decimal,
    pub solids: Decimal,
    pub volume: Decimal,
    pub solid_weight: Decimal,
    pub cost: Decimal,
}

impl From<&ProductDevelopmentItem> for ProductDevelopmentItemSlice {
    fn from(item: &ProductDevelopmentItem) -> Self {
        let line = line_cost(item);
        Self {
            material: item.material.clone(),
            percent: item.percent,
            rate: item.rate,
            density: item.density,
            solids: item.solids,
            volume: line.volume.round_dp(3),
            solid_weight: line.solid_weight.round_dp(2),
            cost: line.cost.round_dp(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDevelopmentSlice {
    pub id: i64,
    pub product_name: String,
    pub selling_price: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<ProductDevelopmentItemSlice>,
    pub summary: CostSummary,
}

impl From<&ProductDevelopment> for ProductDevelopmentSlice {
    fn from(development: &ProductDevelopment) -> Self {
        Self {
            id: development.id,
            product_name: development.product_name.clone(),
            selling_price: development.selling_price,
            remark: development.remark.clone(),
            created_at: development.created_at,
            items: development
                .items
                .iter()
                .map(ProductDevelopmentItemSlice::from)
                .collect(),
            summary: development.cost_summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDevelopmentScreenSlice {
    pub selected: Option<ProductDevelopmentSlice>,
    pub data: Vec<ProductDevelopmentSlice>,
    pub paging: Paging,
}
