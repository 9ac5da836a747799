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

pub(in crate) mod models;
mod operations;
pub(in crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{
    FormulationStore, FormulationStoreError, ProductBom, ProductBomList, ProductDevelopment,
    ProductDevelopmentList,
};
use models::{make_bom_models, make_development_models};
use operations::bom::FormulationStoreBomOperations;
use operations::development::FormulationStoreDevelopmentOperations;
use operations::FormulationStoreOperations;

/// Manages BOMs and product development formulas in the database
#[derive(Clone)]
pub struct DieselFormulationStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselFormulationStore<C> {
    /// Creates a new DieselFormulationStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselFormulationStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl FormulationStore for DieselFormulationStore<diesel::pg::PgConnection> {
    fn add_bom(&self, bom: ProductBom) -> Result<i64, FormulationStoreError> {
        let (header, items) = make_bom_models(&bom);
        FormulationStoreOperations::new(&*self.connection_pool.get()?).add_bom(header, items)
    }

    fn update_bom(&self, bom: ProductBom) -> Result<(), FormulationStoreError> {
        let (header, items) = make_bom_models(&bom);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .update_bom(bom.id(), header, items)
    }

    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).fetch_bom(id)
    }

    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_bom_for_product(product_id)
    }

    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).list_boms(offset, limit)
    }

    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).delete_bom(id)
    }

    fn add_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<i64, FormulationStoreError> {
        let (header, items) = make_development_models(&development);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .add_development(header, items)
    }

    fn update_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<(), FormulationStoreError> {
        let (header, items) = make_development_models(&development);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .update_development(development.id, header, items)
    }

    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).fetch_development(id)
    }

    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .list_developments(offset, limit)
    }

    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).delete_development(id)
    }
}

#[cfg(feature = "sqlite")]
impl FormulationStore for DieselFormulationStore<diesel::sqlite::SqliteConnection> {
    fn add_bom(&self, bom: ProductBom) -> Result<i64, FormulationStoreError> {
        let (header, items) = make_bom_models(&bom);
        FormulationStoreOperations::new(&*self.connection_pool.get()?).add_bom(header, items)
    }

    fn update_bom(&self, bom: ProductBom) -> Result<(), FormulationStoreError> {
        let (header, items) = make_bom_models(&bom);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .update_bom(bom.id(), header, items)
    }

    fn fetch_bom(&self, id: i64) -> Result<Option<ProductBom>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).fetch_bom(id)
    }

    fn fetch_bom_for_product(
        &self,
        product_id: i64,
    ) -> Result<Option<ProductBom>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_bom_for_product(product_id)
    }

    fn list_boms(&self, offset: i64, limit: i64) -> Result<ProductBomList, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).list_boms(offset, limit)
    }

    fn delete_bom(&self, id: i64) -> Result<(), FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).delete_bom(id)
    }

    fn add_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<i64, FormulationStoreError> {
        let (header, items) = make_development_models(&development);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .add_development(header, items)
    }

    fn update_development(
        &self,
        development: ProductDevelopment,
    ) -> Result<(), FormulationStoreError> {
        let (header, items) = make_development_models(&development);
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .update_development(development.id, header, items)
    }

    fn fetch_development(
        &self,
        id: i64,
    ) -> Result<Option<ProductDevelopment>, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).fetch_development(id)
    }

    fn list_developments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDevelopmentList, FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?)
            .list_developments(offset, limit)
    }

    fn delete_development(&self, id: i64) -> Result<(), FormulationStoreError> {
        FormulationStoreOperations::new(&*self.connection_pool.get()?).delete_development(id)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::error::ConstraintViolationType;
    use crate::formulation::store::{ProductBomBuilder, ProductBomItem, ProductDevelopmentItem};
    use crate::inventory::store::{MasterProduct, ProductType};
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn decimal(value: &str) -> Decimal {
        value.parse().expect("Invalid decimal")
    }

    fn add_master_product(
        factory: &dyn StoreFactory,
        name: &str,
        product_type: ProductType,
    ) -> i64 {
        factory
            .get_inventory_store()
            .add_master_product(MasterProduct {
                id: 0,
                name: name.to_string(),
                code: String::new(),
                product_type,
                selling_price: Decimal::ZERO,
                purchase_price: Decimal::ZERO,
            })
            .expect("Unable to add master product")
    }

    fn bom_item(material_id: i64, percent: &str, qty: &str) -> ProductBomItem {
        ProductBomItem {
            material_id,
            percent: decimal(percent),
            qty: decimal(qty),
        }
    }

    /// Verifies a BOM is stored with its items, that modifying it replaces the items and that
    /// the latest BOM for a product is returned by `fetch_bom_for_product`.
    #[test]
    fn test_bom_lifecycle() {
        let factory = in_memory_store_factory();
        let paint = add_master_product(&*factory, "Enamel White", ProductType::FinishedGoods);
        let resin = add_master_product(&*factory, "Alkyd Resin", ProductType::RawMaterial);
        let pigment = add_master_product(&*factory, "TiO2", ProductType::RawMaterial);
        let store = factory.get_formulation_store();

        let bom = ProductBomBuilder::default()
            .with_product_id(paint)
            .with_base_qty(decimal("100"))
            .with_created_at(NaiveDate::from_ymd(2024, 3, 1).and_hms(8, 0, 0))
            .with_items(vec![
                bom_item(resin, "60", "60"),
                bom_item(pigment, "25", "25"),
            ])
            .build()
            .expect("Unable to build BOM");

        let id = store.add_bom(bom.clone()).expect("Unable to add BOM");
        let fetched = store
            .fetch_bom(id)
            .expect("Unable to fetch BOM")
            .expect("BOM not found");
        assert_eq!(fetched.id(), id);
        assert_eq!(fetched.items(), bom.items());

        let modified = fetched
            .into_builder()
            .with_remark("Less pigment".to_string())
            .with_items(vec![bom_item(resin, "70", "70")])
            .build()
            .expect("Unable to build BOM");
        store.update_bom(modified).expect("Unable to update BOM");

        let fetched = store
            .fetch_bom(id)
            .expect("Unable to fetch BOM")
            .expect("BOM not found");
        assert_eq!(fetched.remark(), "Less pigment");
        assert_eq!(fetched.items(), &[bom_item(resin, "70", "70")]);

        let newer = ProductBomBuilder::default()
            .with_product_id(paint)
            .with_base_qty(decimal("50"))
            .with_created_at(NaiveDate::from_ymd(2024, 4, 1).and_hms(8, 0, 0))
            .with_items(vec![bom_item(resin, "50", "25")])
            .build()
            .expect("Unable to build BOM");
        let newer_id = store.add_bom(newer).expect("Unable to add BOM");

        let latest = store
            .fetch_bom_for_product(paint)
            .expect("Unable to fetch BOM")
            .expect("BOM not found");
        assert_eq!(latest.id(), newer_id);

        let list = store.list_boms(0, 10).expect("Unable to list BOMs");
        assert_eq!(list.paging.total, 2);
        assert_eq!(list.data[0].id(), newer_id);

        store.delete_bom(id).expect("Unable to delete BOM");
        assert_eq!(store.fetch_bom(id).expect("Unable to fetch BOM"), None);
    }

    /// Verifies that a BOM referencing a missing material is rejected as a whole: neither the
    /// header nor any item is stored.
    #[test]
    fn test_bom_write_is_atomic() {
        let factory = in_memory_store_factory();
        let paint = add_master_product(&*factory, "Primer", ProductType::FinishedGoods);
        let resin = add_master_product(&*factory, "Resin", ProductType::RawMaterial);
        let store = factory.get_formulation_store();

        let bom = ProductBomBuilder::default()
            .with_product_id(paint)
            .with_base_qty(decimal("100"))
            .with_items(vec![bom_item(resin, "50", "50"), bom_item(999, "10", "10")])
            .build()
            .expect("Unable to build BOM");

        match store.add_bom(bom) {
            Err(FormulationStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        let list = store.list_boms(0, 10).expect("Unable to list BOMs");
        assert!(list.data.is_empty());
        assert_eq!(list.paging.total, 0);
    }

    #[test]
    fn test_missing_bom() {
        let store_factory = in_memory_store_factory();
        let store = store_factory.get_formulation_store();

        match store.delete_bom(5) {
            Err(FormulationStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
        assert_eq!(
            store.fetch_bom_for_product(5).expect("Unable to fetch BOM"),
            None
        );
    }

    #[test]
    fn test_development_lifecycle() {
        let factory = in_memory_store_factory();
        let store = factory.get_formulation_store();

        let mut development = ProductDevelopment {
            id: 0,
            product_name: "Satin Emulsion".to_string(),
            selling_price: decimal("200"),
            remark: String::new(),
            created_at: NaiveDate::from_ymd(2024, 5, 2).and_hms(11, 30, 0),
            items: vec![
                ProductDevelopmentItem {
                    material: "Resin".to_string(),
                    percent: decimal("40"),
                    rate: decimal("120"),
                    density: decimal("1.6"),
                    solids: decimal("100"),
                },
                ProductDevelopmentItem {
                    material: "Water".to_string(),
                    percent: decimal("60"),
                    rate: decimal("0"),
                    density: decimal("1"),
                    solids: decimal("0"),
                },
            ],
        };

        let id = store
            .add_development(development.clone())
            .expect("Unable to add development");
        development.id = id;

        let fetched = store
            .fetch_development(id)
            .expect("Unable to fetch development")
            .expect("Development not found");
        assert_eq!(fetched, development);
        assert_eq!(fetched.cost_summary().total_cost, decimal("4800"));

        development.selling_price = decimal("180");
        development.items.truncate(1);
        store
            .update_development(development.clone())
            .expect("Unable to update development");
        let fetched = store
            .fetch_development(id)
            .expect("Unable to fetch development")
            .expect("Development not found");
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.selling_price, decimal("180"));

        let list = store
            .list_developments(0, 10)
            .expect("Unable to list developments");
        assert_eq!(list.data, vec![fetched]);

        store
            .delete_development(id)
            .expect("Unable to delete development");
        match store.update_development(development) {
            Err(FormulationStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }
}
