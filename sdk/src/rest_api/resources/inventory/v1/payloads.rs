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

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::inventory::{
    DiscardCategory, MasterProduct, MaterialDiscard, MaterialInward, MaterialReturn, ProductType,
    Supplier,
};
use crate::rest_api::resources::paging::v1::Paging;

/// A value offered in a select box
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChoiceSlice {
    pub value: String,
    pub label: String,
}

impl From<ProductType> for ChoiceSlice {
    fn from(product_type: ProductType) -> Self {
        Self {
            value: product_type.as_str().to_string(),
            label: product_type.label().to_string(),
        }
    }
}

impl From<DiscardCategory> for ChoiceSlice {
    fn from(category: DiscardCategory) -> Self {
        Self {
            value: category.as_str().to_string(),
            label: category.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MasterProductSlice {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub product_type: ProductType,
    pub product_type_label: String,
    pub selling_price: Decimal,
    pub purchase_price: Decimal,
}

impl From<MasterProduct> for MasterProductSlice {
    fn from(product: MasterProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            code: product.code,
            product_type: product.product_type,
            product_type_label: product.product_type.label().to_string(),
            selling_price: product.selling_price,
            purchase_price: product.purchase_price,
        }
    }
}

/// The master product listing; also used by the bulk price update screen
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MasterProductScreenSlice {
    pub selected: Option<MasterProductSlice>,
    pub data: Vec<MasterProductSlice>,
    pub paging: Paging,
    pub product_type: Option<ProductType>,
    pub product_types: Vec<ChoiceSlice>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SupplierSlice {
    pub id: i64,
    pub name: String,
    pub contact: String,
}

impl From<Supplier> for SupplierSlice {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            contact: supplier.contact,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SupplierScreenSlice {
    pub selected: Option<SupplierSlice>,
    pub data: Vec<SupplierSlice>,
    pub paging: Paging,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialInwardSlice {
    pub id: i64,
    pub master_product_id: i64,
    pub supplier_id: i64,
    pub inward_date: NaiveDate,
    pub bill_no: String,
    pub qty: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

impl From<MaterialInward> for MaterialInwardSlice {
    fn from(inward: MaterialInward) -> Self {
        Self {
            id: inward.id,
            master_product_id: inward.master_product_id,
            supplier_id: inward.supplier_id,
            inward_date: inward.inward_date,
            bill_no: inward.bill_no,
            qty: inward.qty,
            remark: inward.remark,
            created_at: inward.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialInwardScreenSlice {
    pub data: Vec<MaterialInwardSlice>,
    pub paging: Paging,
    pub products: Vec<MasterProductSlice>,
    pub suppliers: Vec<SupplierSlice>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialDiscardSlice {
    pub id: i64,
    pub category: DiscardCategory,
    pub master_product_id: Option<i64>,
    pub qty: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

impl From<MaterialDiscard> for MaterialDiscardSlice {
    fn from(discard: MaterialDiscard) -> Self {
        Self {
            id: discard.id,
            category: discard.category,
            master_product_id: discard.master_product_id,
            qty: discard.qty,
            remark: discard.remark,
            created_at: discard.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialDiscardScreenSlice {
    pub data: Vec<MaterialDiscardSlice>,
    pub paging: Paging,
    pub categories: Vec<ChoiceSlice>,
    pub products: Vec<MasterProductSlice>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialReturnSlice {
    pub id: i64,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub dispatched_qty: Decimal,
    pub returned_qty: Decimal,
    pub vehicle: String,
    pub remark: String,
    pub returned_at: NaiveDateTime,
    pub time_span: String,
}

impl MaterialReturnSlice {
    pub fn from_return(material_return: MaterialReturn, now: NaiveDateTime) -> Self {
        let time_span = material_return.time_span(now);
        Self {
            id: material_return.id,
            order_id: material_return.order_id,
            company_name: material_return.company_name,
            location: material_return.location,
            product: material_return.product,
            dispatched_qty: material_return.dispatched_qty,
            returned_qty: material_return.returned_qty,
            vehicle: material_return.vehicle,
            remark: material_return.remark,
            returned_at: material_return.returned_at,
            time_span,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialReturnScreenSlice {
    pub data: Vec<MaterialReturnSlice>,
    pub paging: Paging,
}
