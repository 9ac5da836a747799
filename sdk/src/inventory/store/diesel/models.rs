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

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::InternalError;
use crate::inventory::store::diesel::schema::*;
use crate::inventory::store::{
    DiscardCategory, MasterProduct, MaterialDiscard, MaterialInward, MaterialReturn, ProductType,
    Supplier,
};
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "master_product"]
pub struct NewMasterProductModel {
    pub name: String,
    pub code: String,
    pub product_type: String,
    pub selling_price: String,
    pub purchase_price: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct MasterProductModel {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub product_type: String,
    pub selling_price: String,
    pub purchase_price: String,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "supplier"]
pub struct NewSupplierModel {
    pub name: String,
    pub contact: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct SupplierModel {
    pub id: i64,
    pub name: String,
    pub contact: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "material_inward"]
pub struct NewMaterialInwardModel {
    pub master_product_id: i64,
    pub supplier_id: i64,
    pub inward_date: NaiveDate,
    pub bill_no: String,
    pub qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct MaterialInwardModel {
    pub id: i64,
    pub master_product_id: i64,
    pub supplier_id: i64,
    pub inward_date: NaiveDate,
    pub bill_no: String,
    pub qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "material_discard"]
pub struct NewMaterialDiscardModel {
    pub category: String,
    pub master_product_id: Option<i64>,
    pub qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct MaterialDiscardModel {
    pub id: i64,
    pub category: String,
    pub master_product_id: Option<i64>,
    pub qty: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "material_return"]
pub struct NewMaterialReturnModel {
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub dispatched_qty: String,
    pub returned_qty: String,
    pub vehicle: String,
    pub remark: String,
    pub returned_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct MaterialReturnModel {
    pub id: i64,
    pub order_id: i64,
    pub company_name: String,
    pub location: String,
    pub product: String,
    pub dispatched_qty: String,
    pub returned_qty: String,
    pub vehicle: String,
    pub remark: String,
    pub returned_at: NaiveDateTime,
}

impl From<MasterProduct> for NewMasterProductModel {
    fn from(product: MasterProduct) -> Self {
        NewMasterProductModel {
            name: product.name,
            code: product.code,
            product_type: product.product_type.as_str().to_string(),
            selling_price: decimal_text(&product.selling_price),
            purchase_price: decimal_text(&product.purchase_price),
        }
    }
}

impl TryFrom<MasterProductModel> for MasterProduct {
    type Error = InternalError;

    fn try_from(model: MasterProductModel) -> Result<Self, Self::Error> {
        Ok(MasterProduct {
            id: model.id,
            name: model.name,
            code: model.code,
            product_type: model
                .product_type
                .parse::<ProductType>()
                .map_err(|err| InternalError::from_source(Box::new(err)))?,
            selling_price: decimal_column(&model.selling_price, "master_product.selling_price")?,
            purchase_price: decimal_column(
                &model.purchase_price,
                "master_product.purchase_price",
            )?,
        })
    }
}

impl From<Supplier> for NewSupplierModel {
    fn from(supplier: Supplier) -> Self {
        NewSupplierModel {
            name: supplier.name,
            contact: supplier.contact,
        }
    }
}

impl From<SupplierModel> for Supplier {
    fn from(model: SupplierModel) -> Self {
        Supplier {
            id: model.id,
            name: model.name,
            contact: model.contact,
        }
    }
}

impl From<MaterialInward> for NewMaterialInwardModel {
    fn from(inward: MaterialInward) -> Self {
        NewMaterialInwardModel {
            master_product_id: inward.master_product_id,
            supplier_id: inward.supplier_id,
            inward_date: inward.inward_date,
            bill_no: inward.bill_no,
            qty: decimal_text(&inward.qty),
            remark: inward.remark,
            created_at: inward.created_at,
        }
    }
}

impl TryFrom<MaterialInwardModel> for MaterialInward {
    type Error = InternalError;

    fn try_from(model: MaterialInwardModel) -> Result<Self, Self::Error> {
        Ok(MaterialInward {
            id: model.id,
            master_product_id: model.master_product_id,
            supplier_id: model.supplier_id,
            inward_date: model.inward_date,
            bill_no: model.bill_no,
            qty: decimal_column(&model.qty, "material_inward.qty")?,
            remark: model.remark,
            created_at: model.created_at,
        })
    }
}

impl From<MaterialDiscard> for NewMaterialDiscardModel {
    fn from(discard: MaterialDiscard) -> Self {
        NewMaterialDiscardModel {
            category: discard.category.as_str().to_string(),
            master_product_id: discard.master_product_id,
            qty: decimal_text(&discard.qty),
            remark: discard.remark,
            created_at: discard.created_at,
        }
    }
}

impl TryFrom<MaterialDiscardModel> for MaterialDiscard {
    type Error = InternalError;

    fn try_from(model: MaterialDiscardModel) -> Result<Self, Self::Error> {
        Ok(MaterialDiscard {
            id: model.id,
            category: model
                .category
                .parse::<DiscardCategory>()
                .map_err(|err| InternalError::from_source(Box::new(err)))?,
            master_product_id: model.master_product_id,
            qty: decimal_column(&model.qty, "material_discard.qty")?,
            remark: model.remark,
            created_at: model.created_at,
        })
    }
}

impl From<MaterialReturn> for NewMaterialReturnModel {
    fn from(material_return: MaterialReturn) -> Self {
        NewMaterialReturnModel {
            order_id: material_return.order_id,
            company_name: material_return.company_name,
            location: material_return.location,
            product: material_return.product,
            dispatched_qty: decimal_text(&material_return.dispatched_qty),
            returned_qty: decimal_text(&material_return.returned_qty),
            vehicle: material_return.vehicle,
            remark: material_return.remark,
            returned_at: material_return.returned_at,
        }
    }
}

impl TryFrom<MaterialReturnModel> for MaterialReturn {
    type Error = InternalError;

    fn try_from(model: MaterialReturnModel) -> Result<Self, Self::Error> {
        Ok(MaterialReturn {
            id: model.id,
            order_id: model.order_id,
            company_name: model.company_name,
            location: model.location,
            product: model.product,
            dispatched_qty: decimal_column(
                &model.dispatched_qty,
                "material_return.dispatched_qty",
            )?,
            returned_qty: decimal_column(&model.returned_qty, "material_return.returned_qty")?,
            vehicle: model.vehicle,
            remark: model.remark,
            returned_at: model.returned_at,
        })
    }
}
