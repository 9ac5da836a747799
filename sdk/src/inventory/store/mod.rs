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

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::InvalidArgumentError;
use crate::paging::Paging;
use crate::timespan::{elapsed_text, DayDisplay};

pub use error::InventoryStoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProductType {
    #[serde(rename = "FG")]
    FinishedGoods,
    #[serde(rename = "RM")]
    RawMaterial,
    #[serde(rename = "PK")]
    PackingMaterial,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::FinishedGoods => "FG",
            ProductType::RawMaterial => "RM",
            ProductType::PackingMaterial => "PK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::FinishedGoods => "Finished Goods",
            ProductType::RawMaterial => "Raw Material",
            ProductType::PackingMaterial => "Packing",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FG" => Ok(ProductType::FinishedGoods),
            "RM" => Ok(ProductType::RawMaterial),
            "PK" => Ok(ProductType::PackingMaterial),
            _ => Err(InvalidArgumentError::new(
                "product_type".to_string(),
                format!("{} is not a valid product type", s),
            )),
        }
    }
}

/// What kind of stock a discard removes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiscardCategory {
    #[serde(rename = "RM")]
    RawMaterial,
    #[serde(rename = "FG")]
    FinishedGoods,
}

impl DiscardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscardCategory::RawMaterial => "RM",
            DiscardCategory::FinishedGoods => "FG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscardCategory::RawMaterial => "Raw Material",
            DiscardCategory::FinishedGoods => "Finished Goods",
        }
    }
}

impl fmt::Display for DiscardCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscardCategory {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RM" => Ok(DiscardCategory::RawMaterial),
            "FG" => Ok(DiscardCategory::FinishedGoods),
            _ => Err(InvalidArgumentError::new(
                "category".to_string(),
                format!("{} is not a valid discard category", s),
            )),
        }
    }
}

fn non_negative(argument: &str, value: &Decimal, label: &str) -> Result<(), InvalidArgumentError> {
    if *value < Decimal::ZERO {
        return Err(InvalidArgumentError::new(
            argument.to_string(),
            format!("{} cannot be negative", label),
        ));
    }
    Ok(())
}

/// A product the plant buys or sells, with its current prices
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MasterProduct {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub product_type: ProductType,
    pub selling_price: Decimal,
    pub purchase_price: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MasterProductList {
    pub data: Vec<MasterProduct>,
    pub paging: Paging,
}

impl MasterProductList {
    pub fn new(data: Vec<MasterProduct>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// New prices for one master product
#[derive(Clone, Debug, PartialEq)]
pub struct PriceUpdate {
    pub master_product_id: i64,
    pub selling_price: Decimal,
    pub purchase_price: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SupplierList {
    pub data: Vec<Supplier>,
    pub paging: Paging,
}

impl SupplierList {
    pub fn new(data: Vec<Supplier>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Material received from a supplier against a bill
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialInward {
    pub id: i64,
    pub master_product_id: i64,
    pub supplier_id: i64,
    pub inward_date: NaiveDate,
    pub bill_no: String,
    pub qty: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

impl MaterialInward {
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        non_negative("qty", &self.qty, "Inward quantity")
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialInwardList {
    pub data: Vec<MaterialInward>,
    pub paging: Paging,
}

impl MaterialInwardList {
    pub fn new(data: Vec<MaterialInward>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialDiscard {
    pub id: i64,
    pub category: DiscardCategory,
    pub master_product_id: Option<i64>,
    pub qty: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

impl MaterialDiscard {
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        non_negative("qty", &self.qty, "Discard quantity")
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialDiscardList {
    pub data: Vec<MaterialDiscard>,
    pub paging: Paging,
}

impl MaterialDiscardList {
    pub fn new(data: Vec<MaterialDiscard>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Goods that came back from a customer after dispatch
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialReturn {
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
}

impl MaterialReturn {
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        non_negative("dispatched_qty", &self.dispatched_qty, "Dispatched quantity")?;
        non_negative("returned_qty", &self.returned_qty, "Returned quantity")?;

        if self.returned_qty > self.dispatched_qty {
            return Err(InvalidArgumentError::new(
                "returned_qty".to_string(),
                format!(
                    "Returned quantity {} exceeds dispatched quantity {}",
                    self.returned_qty, self.dispatched_qty
                ),
            ));
        }

        Ok(())
    }

    pub fn time_span(&self, now: NaiveDateTime) -> String {
        elapsed_text(self.returned_at, now, DayDisplay::Always)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MaterialReturnList {
    pub data: Vec<MaterialReturn>,
    pub paging: Paging,
}

impl MaterialReturnList {
    pub fn new(data: Vec<MaterialReturn>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

pub trait InventoryStore: Send + Sync {
    /// Adds a master product and returns its id
    fn add_master_product(&self, product: MasterProduct) -> Result<i64, InventoryStoreError>;

    fn update_master_product(&self, product: MasterProduct) -> Result<(), InventoryStoreError>;

    fn fetch_master_product(&self, id: i64)
        -> Result<Option<MasterProduct>, InventoryStoreError>;

    /// Lists master products, optionally restricted to one type
    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError>;

    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError>;

    /// Applies every price update or none of them
    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError>;

    fn add_supplier(&self, supplier: Supplier) -> Result<i64, InventoryStoreError>;

    fn update_supplier(&self, supplier: Supplier) -> Result<(), InventoryStoreError>;

    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError>;

    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError>;

    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError>;

    /// Records an inward entry. Both the product and the supplier must exist.
    fn add_material_inward(&self, inward: MaterialInward) -> Result<i64, InventoryStoreError>;

    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError>;

    fn add_material_discard(&self, discard: MaterialDiscard) -> Result<i64, InventoryStoreError>;

    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError>;

    /// Records a return. The returned quantity may not exceed what was dispatched.
    fn add_material_return(&self, material_return: MaterialReturn)
        -> Result<i64, InventoryStoreError>;

    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_codes() {
        for product_type in &[
            ProductType::FinishedGoods,
            ProductType::RawMaterial,
            ProductType::PackingMaterial,
        ] {
            assert_eq!(
                product_type.as_str().parse::<ProductType>().ok(),
                Some(*product_type)
            );
        }
        assert!("XX".parse::<ProductType>().is_err());
        assert_eq!(ProductType::PackingMaterial.label(), "Packing");
    }

    #[test]
    fn test_discard_category_rejects_packing() {
        assert_eq!(
            "FG".parse::<DiscardCategory>().ok(),
            Some(DiscardCategory::FinishedGoods)
        );
        match "PK".parse::<DiscardCategory>() {
            Err(err) => assert_eq!(err.argument(), "category"),
            Ok(category) => panic!("Expected error, got {:?}", category),
        }
    }

    #[test]
    fn test_return_cannot_exceed_dispatch() {
        let mut material_return = MaterialReturn {
            id: 0,
            order_id: 3,
            company_name: "Acme Paints".to_string(),
            location: "Pune".to_string(),
            product: "Primer".to_string(),
            dispatched_qty: Decimal::new(20, 0),
            returned_qty: Decimal::new(20, 0),
            vehicle: String::new(),
            remark: String::new(),
            returned_at: NaiveDate::from_ymd(2024, 2, 1).and_hms(10, 0, 0),
        };
        assert!(material_return.validate().is_ok());

        material_return.returned_qty = Decimal::new(2005, 2);
        match material_return.validate() {
            Err(err) => assert_eq!(err.argument(), "returned_qty"),
            Ok(()) => panic!("Expected returned_qty to be rejected"),
        }

        material_return.returned_qty = Decimal::new(-1, 0);
        assert!(material_return.validate().is_err());
    }

    #[test]
    fn test_return_time_span_includes_days() {
        let returned_at = NaiveDate::from_ymd(2024, 2, 1).and_hms(10, 0, 0);
        let material_return = MaterialReturn {
            id: 1,
            order_id: 12,
            company_name: "Acme Paints".to_string(),
            location: "Pune".to_string(),
            product: "Enamel White".to_string(),
            dispatched_qty: Decimal::new(50, 0),
            returned_qty: Decimal::new(5, 0),
            vehicle: "MH12 AB 1234".to_string(),
            remark: String::new(),
            returned_at,
        };

        assert_eq!(
            material_return.time_span(NaiveDate::from_ymd(2024, 2, 1).and_hms(12, 30, 0)),
            "0 Days 2 Hours 30 Minutes"
        );
    }
}
