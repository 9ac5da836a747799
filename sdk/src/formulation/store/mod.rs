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

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::paging::Paging;

pub use error::{FormulationStoreError, ProductBomBuilderError};

/// Represents a bill of materials for one master product
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductBom {
    id: i64,
    product_id: i64,
    base_qty: Decimal,
    remark: String,
    created_at: NaiveDateTime,
    items: Vec<ProductBomItem>,
}

impl ProductBom {
    /// Returns the id of the BOM; zero until it has been stored
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the id of the master product this BOM makes
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    /// Returns the batch quantity the item quantities are given for
    pub fn base_qty(&self) -> Decimal {
        self.base_qty
    }

    /// Returns the remark for the BOM
    pub fn remark(&self) -> &str {
        &self.remark
    }

    /// Returns the time the BOM was first saved
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the materials of the BOM
    pub fn items(&self) -> &[ProductBomItem] {
        &self.items
    }

    /// Sum of the item percentages
    pub fn total_percent(&self) -> Decimal {
        self.items.iter().map(|item| item.percent).sum()
    }

    pub fn into_builder(self) -> ProductBomBuilder {
        ProductBomBuilder {
            id: Some(self.id),
            product_id: Some(self.product_id),
            base_qty: Some(self.base_qty),
            remark: Some(self.remark),
            created_at: Some(self.created_at),
            items: self.items,
        }
    }
}

/// Builder used to create a BOM
#[derive(Default, Clone)]
pub struct ProductBomBuilder {
    id: Option<i64>,
    product_id: Option<i64>,
    base_qty: Option<Decimal>,
    remark: Option<String>,
    created_at: Option<NaiveDateTime>,
    items: Vec<ProductBomItem>,
}

impl ProductBomBuilder {
    /// Sets the id of an existing BOM
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the master product the BOM makes
    pub fn with_product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Sets the batch quantity the item quantities are given for
    pub fn with_base_qty(mut self, base_qty: Decimal) -> Self {
        self.base_qty = Some(base_qty);
        self
    }

    pub fn with_remark(mut self, remark: String) -> Self {
        self.remark = Some(remark);
        self
    }

    /// Sets the creation time; defaults to now
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_items(mut self, items: Vec<ProductBomItem>) -> Self {
        self.items = items;
        self
    }

    pub fn build(self) -> Result<ProductBom, ProductBomBuilderError> {
        let ProductBomBuilder {
            id,
            product_id,
            base_qty,
            remark,
            created_at,
            items,
        } = self;

        let product_id = product_id.ok_or_else(|| {
            ProductBomBuilderError::MissingRequiredField("product_id".to_string())
        })?;

        let base_qty = base_qty
            .ok_or_else(|| ProductBomBuilderError::MissingRequiredField("base_qty".to_string()))?;

        if base_qty < Decimal::ZERO {
            return Err(ProductBomBuilderError::InvalidField(
                "base_qty".to_string(),
                "cannot be negative".to_string(),
            ));
        }

        if items.is_empty() {
            return Err(ProductBomBuilderError::MissingRequiredField(
                "items".to_string(),
            ));
        }

        Ok(ProductBom {
            id: id.unwrap_or(0),
            product_id,
            base_qty,
            remark: remark.unwrap_or_default(),
            created_at: created_at.unwrap_or_else(|| Utc::now().naive_utc()),
            items,
        })
    }
}

/// One material of a BOM: its share of the product and the quantity used per base quantity
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductBomItem {
    pub material_id: i64,
    pub percent: Decimal,
    pub qty: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductBomList {
    pub data: Vec<ProductBom>,
    pub paging: Paging,
}

impl ProductBomList {
    pub fn new(data: Vec<ProductBom>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A trial formula for a new product, priced per litre
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDevelopment {
    pub id: i64,
    pub product_name: String,
    pub selling_price: Decimal,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<ProductDevelopmentItem>,
}

impl ProductDevelopment {
    /// Rolls up the cost of the formula against its selling price
    pub fn cost_summary(&self) -> super::costing::CostSummary {
        super::costing::roll_up(&self.items, self.selling_price)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDevelopmentItem {
    pub material: String,
    pub percent: Decimal,
    /// Rate per kg
    pub rate: Decimal,
    /// kg/L
    pub density: Decimal,
    /// Solids content in percent
    pub solids: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDevelopmentList {
    pub data: Vec<ProductDevelopment>,
    pub paging: Paging,
}

impl ProductDevelopmentList {
    pub fn new(data: Vec<ProductDevelopment>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Store for bills of materials and product development formulas.
///
/// A header and its items are always written together; updating a header replaces all of its
/// items.
pub trait FormulationStore: Send + Sync {
    /// Adds a BOM and its items, returning the id of the new BOM
    ///
    /// # Arguments
    ///
    ///  * `bom` - The BOM to be added
    fn add_bom(&self, bom: ProductBom) -> Result<i64, FormulationStoreError>;

    /// Replaces the header and all items of an existing BOM
    fn update_bom(&self, bom: ProductBom) -> Result<(), FormulationStoreError>;

    /// Fetches a BOM with its items
    ///
    /// # Arguments
    ///
    ///  * `id` - The id of the BOM
    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError>;

    /// Fetches the most recently created BOM for a master product
    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError>;

    /// Lists BOMs, newest first
    ///
    /// # Arguments
    ///
    ///  * `offset` - The index of the first in storage to retrieve
    ///  * `limit` - The number of items to retrieve from the offset
    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError>;

    /// Deletes a BOM and its items
    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError>;

    fn add_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<i64, FormulationStoreError>;

    fn update_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<(), FormulationStoreError>;

    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError>;

    /// Lists product development formulas, newest first
    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError>;

    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn item(material_id: i64, percent: i64) -> ProductBomItem {
        ProductBomItem {
            material_id,
            percent: Decimal::from(percent),
            qty: Decimal::from(percent),
        }
    }

    #[test]
    fn test_build_bom() {
        let created_at = NaiveDate::from_ymd(2024, 2, 1).and_hms(10, 0, 0);
        let bom = ProductBomBuilder::default()
            .with_product_id(3)
            .with_base_qty(Decimal::from(100))
            .with_created_at(created_at)
            .with_items(vec![item(1, 60), item(2, 30)])
            .build()
            .expect("Unable to build BOM");

        assert_eq!(bom.id(), 0);
        assert_eq!(bom.product_id(), 3);
        assert_eq!(bom.remark(), "");
        assert_eq!(bom.created_at(), created_at);
        assert_eq!(bom.total_percent(), Decimal::from(90));

        let rebuilt = bom
            .clone()
            .into_builder()
            .with_id(9)
            .build()
            .expect("Unable to rebuild BOM");
        assert_eq!(rebuilt.id(), 9);
        assert_eq!(rebuilt.items(), bom.items());
    }

    #[test]
    fn test_build_bom_missing_fields() {
        match ProductBomBuilder::default()
            .with_base_qty(Decimal::from(100))
            .with_items(vec![item(1, 10)])
            .build()
        {
            Err(ProductBomBuilderError::MissingRequiredField(field)) => {
                assert_eq!(field, "product_id")
            }
            res => panic!("Expected MissingRequiredField, got {:?}", res),
        }

        match ProductBomBuilder::default()
            .with_product_id(1)
            .with_base_qty(Decimal::from(100))
            .build()
        {
            Err(ProductBomBuilderError::MissingRequiredField(field)) => assert_eq!(field, "items"),
            res => panic!("Expected MissingRequiredField, got {:?}", res),
        }

        match ProductBomBuilder::default()
            .with_product_id(1)
            .with_base_qty(Decimal::from(-1))
            .with_items(vec![item(1, 10)])
            .build()
        {
            Err(ProductBomBuilderError::InvalidField(field, _)) => assert_eq!(field, "base_qty"),
            res => panic!("Expected InvalidField, got {:?}", res),
        }
    }
}
