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
    InventoryStore, InventoryStoreError, MasterProduct, MasterProductList, MaterialDiscard,
    MaterialDiscardList, MaterialInward, MaterialInwardList, MaterialReturn, MaterialReturnList,
    PriceUpdate, ProductType, Supplier, SupplierList,
};
use operations::master_product::InventoryStoreMasterProductOperations;
use operations::movement::InventoryStoreMovementOperations;
use operations::supplier::InventoryStoreSupplierOperations;
use operations::InventoryStoreOperations;

/// Manages master products, suppliers and material movements in the database
#[derive(Clone)]
pub struct DieselInventoryStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselInventoryStore<C> {
    /// Creates a new DieselInventoryStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselInventoryStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl InventoryStore for DieselInventoryStore<diesel::pg::PgConnection> {
    fn add_master_product(&self, product: MasterProduct) -> Result<i64, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_master_product(product.into())
    }

    fn update_master_product(&self, product: MasterProduct) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .update_master_product(product.id, product.into())
    }

    fn fetch_master_product(
        &self,
        id: i64,
    ) -> Result<Option<MasterProduct>, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).fetch_master_product(id)
    }

    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_master_products(product_type, offset, limit)
    }

    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).delete_master_product(id)
    }

    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).update_prices(updates)
    }

    fn add_supplier(&self, supplier: Supplier) -> Result<i64, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).add_supplier(supplier.into())
    }

    fn update_supplier(&self, supplier: Supplier) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .update_supplier(supplier.id, supplier.into())
    }

    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).fetch_supplier(id)
    }

    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).list_suppliers(offset, limit)
    }

    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).delete_supplier(id)
    }

    fn add_material_inward(&self, inward: MaterialInward) -> Result<i64, InventoryStoreError> {
        inward.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_inward(inward.into())
    }

    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_inwards(offset, limit)
    }

    fn add_material_discard(&self, discard: MaterialDiscard) -> Result<i64, InventoryStoreError> {
        discard.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_discard(discard.into())
    }

    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_discards(offset, limit)
    }

    fn add_material_return(
        &self,
        material_return: MaterialReturn,
    ) -> Result<i64, InventoryStoreError> {
        material_return.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_return(material_return.into())
    }

    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_returns(offset, limit)
    }
}

#[cfg(feature = "sqlite")]
impl InventoryStore for DieselInventoryStore<diesel::sqlite::SqliteConnection> {
    fn add_master_product(&self, product: MasterProduct) -> Result<i64, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_master_product(product.into())
    }

    fn update_master_product(&self, product: MasterProduct) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .update_master_product(product.id, product.into())
    }

    fn fetch_master_product(
        &self,
        id: i64,
    ) -> Result<Option<MasterProduct>, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).fetch_master_product(id)
    }

    fn list_master_products(
        &self,
        product_type: Option<ProductType>,
        offset: i64,
        limit: i64,
    ) -> Result<MasterProductList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_master_products(product_type, offset, limit)
    }

    fn delete_master_product(&self, id: i64) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).delete_master_product(id)
    }

    fn update_prices(&self, updates: Vec<PriceUpdate>) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).update_prices(updates)
    }

    fn add_supplier(&self, supplier: Supplier) -> Result<i64, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).add_supplier(supplier.into())
    }

    fn update_supplier(&self, supplier: Supplier) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .update_supplier(supplier.id, supplier.into())
    }

    fn fetch_supplier(&self, id: i64) -> Result<Option<Supplier>, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).fetch_supplier(id)
    }

    fn list_suppliers(&self, offset: i64, limit: i64) -> Result<SupplierList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).list_suppliers(offset, limit)
    }

    fn delete_supplier(&self, id: i64) -> Result<(), InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?).delete_supplier(id)
    }

    fn add_material_inward(&self, inward: MaterialInward) -> Result<i64, InventoryStoreError> {
        inward.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_inward(inward.into())
    }

    fn list_material_inwards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialInwardList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_inwards(offset, limit)
    }

    fn add_material_discard(&self, discard: MaterialDiscard) -> Result<i64, InventoryStoreError> {
        discard.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_discard(discard.into())
    }

    fn list_material_discards(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialDiscardList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_discards(offset, limit)
    }

    fn add_material_return(
        &self,
        material_return: MaterialReturn,
    ) -> Result<i64, InventoryStoreError> {
        material_return.validate()?;
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .add_material_return(material_return.into())
    }

    fn list_material_returns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<MaterialReturnList, InventoryStoreError> {
        InventoryStoreOperations::new(&*self.connection_pool.get()?)
            .list_material_returns(offset, limit)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};
    use diesel::sqlite::SqliteConnection;
    use rust_decimal::Decimal;

    use crate::error::ConstraintViolationType;
    use crate::inventory::store::DiscardCategory;
    use crate::migrations::run_sqlite_migrations;
    use crate::store::sqlite::ConnectionOptions;

    fn decimal(value: &str) -> Decimal {
        value.parse().expect("Invalid decimal")
    }

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 5, 20).and_hms(11, 45, 0)
    }

    fn create_store() -> DieselInventoryStore<SqliteConnection> {
        let pool = Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
            .expect("Failed to build connection pool");

        run_sqlite_migrations(&*pool.get().expect("Failed to get connection"))
            .expect("Failed to run migrations");

        DieselInventoryStore::new(pool)
    }

    fn product(name: &str, product_type: ProductType) -> MasterProduct {
        MasterProduct {
            id: 0,
            name: name.to_string(),
            code: format!("{}-01", product_type),
            product_type,
            selling_price: decimal("120.50"),
            purchase_price: decimal("95"),
        }
    }

    fn supplier(name: &str) -> Supplier {
        Supplier {
            id: 0,
            name: name.to_string(),
            contact: "020 2612 4455".to_string(),
        }
    }

    fn inward(master_product_id: i64, supplier_id: i64, qty: &str) -> MaterialInward {
        MaterialInward {
            id: 0,
            master_product_id,
            supplier_id,
            inward_date: NaiveDate::from_ymd(2024, 5, 20),
            bill_no: "SB-331".to_string(),
            qty: decimal(qty),
            remark: String::new(),
            created_at: created_at(),
        }
    }

    #[test]
    fn test_master_product_crud_and_type_filter() {
        let store = create_store();

        let enamel = store
            .add_master_product(product("Enamel White", ProductType::FinishedGoods))
            .expect("Unable to add product");
        store
            .add_master_product(product("Alkyd Resin", ProductType::RawMaterial))
            .expect("Unable to add product");
        store
            .add_master_product(product("20L Tin", ProductType::PackingMaterial))
            .expect("Unable to add product");

        let raw = store
            .list_master_products(Some(ProductType::RawMaterial), 0, 10)
            .expect("Unable to list products");
        assert_eq!(raw.data.len(), 1);
        assert_eq!(raw.data[0].name, "Alkyd Resin");
        assert_eq!(raw.paging.total, 1);

        let all = store
            .list_master_products(None, 0, 10)
            .expect("Unable to list products");
        assert_eq!(
            all.data.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["20L Tin", "Alkyd Resin", "Enamel White"]
        );

        let mut fetched = store
            .fetch_master_product(enamel)
            .expect("Unable to fetch product")
            .expect("Product not found");
        assert_eq!(fetched.selling_price, decimal("120.50"));
        assert_eq!(fetched.product_type, ProductType::FinishedGoods);

        fetched.name = "Enamel Bright White".to_string();
        store
            .update_master_product(fetched)
            .expect("Unable to update product");
        assert_eq!(
            store
                .fetch_master_product(enamel)
                .expect("Unable to fetch product")
                .expect("Product not found")
                .name,
            "Enamel Bright White"
        );

        store
            .delete_master_product(enamel)
            .expect("Unable to delete product");
        match store.delete_master_product(enamel) {
            Err(InventoryStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }

    #[test]
    fn test_update_prices_is_all_or_nothing() {
        let store = create_store();
        let resin = store
            .add_master_product(product("Alkyd Resin", ProductType::RawMaterial))
            .expect("Unable to add product");
        let tin = store
            .add_master_product(product("20L Tin", ProductType::PackingMaterial))
            .expect("Unable to add product");

        let result = store.update_prices(vec![
            PriceUpdate {
                master_product_id: resin,
                selling_price: decimal("130"),
                purchase_price: decimal("101.25"),
            },
            PriceUpdate {
                master_product_id: tin + 100,
                selling_price: decimal("40"),
                purchase_price: decimal("32"),
            },
        ]);
        match result {
            Err(InventoryStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }

        let unchanged = store
            .fetch_master_product(resin)
            .expect("Unable to fetch product")
            .expect("Product not found");
        assert_eq!(unchanged.selling_price, decimal("120.50"));

        store
            .update_prices(vec![
                PriceUpdate {
                    master_product_id: resin,
                    selling_price: decimal("130"),
                    purchase_price: decimal("101.25"),
                },
                PriceUpdate {
                    master_product_id: tin,
                    selling_price: decimal("40"),
                    purchase_price: decimal("32"),
                },
            ])
            .expect("Unable to update prices");

        let updated = store
            .fetch_master_product(resin)
            .expect("Unable to fetch product")
            .expect("Product not found");
        assert_eq!(updated.selling_price, decimal("130"));
        assert_eq!(updated.purchase_price, decimal("101.25"));

        match store.update_prices(vec![PriceUpdate {
            master_product_id: tin,
            selling_price: decimal("-1"),
            purchase_price: decimal("32"),
        }]) {
            Err(InventoryStoreError::InvalidArgumentError(_)) => (),
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }
    }

    #[test]
    fn test_inward_requires_product_and_supplier() {
        let store = create_store();
        let resin = store
            .add_master_product(product("Alkyd Resin", ProductType::RawMaterial))
            .expect("Unable to add product");
        let supplier_id = store
            .add_supplier(supplier("Deccan Chemicals"))
            .expect("Unable to add supplier");

        match store.add_material_inward(inward(resin, supplier_id + 1, "500")) {
            Err(InventoryStoreError::NotFoundError(msg)) => assert!(msg.contains("supplier")),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
        match store.add_material_inward(inward(resin + 1, supplier_id, "500")) {
            Err(InventoryStoreError::NotFoundError(msg)) => {
                assert!(msg.contains("master product"))
            }
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
        match store.add_material_inward(inward(resin, supplier_id, "-5")) {
            Err(InventoryStoreError::InvalidArgumentError(err)) => {
                assert_eq!(err.argument(), "qty")
            }
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }

        let id = store
            .add_material_inward(inward(resin, supplier_id, "500"))
            .expect("Unable to add inward");

        let list = store
            .list_material_inwards(0, 10)
            .expect("Unable to list inwards");
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].id, id);
        assert_eq!(list.data[0].qty, decimal("500"));

        match store.delete_supplier(supplier_id) {
            Err(InventoryStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }
    }

    #[test]
    fn test_discard_and_return() {
        let store = create_store();
        let enamel = store
            .add_master_product(product("Enamel White", ProductType::FinishedGoods))
            .expect("Unable to add product");

        store
            .add_material_discard(MaterialDiscard {
                id: 0,
                category: DiscardCategory::FinishedGoods,
                master_product_id: Some(enamel),
                qty: decimal("12"),
                remark: "Skinned over".to_string(),
                created_at: created_at(),
            })
            .expect("Unable to add discard");
        store
            .add_material_discard(MaterialDiscard {
                id: 0,
                category: DiscardCategory::RawMaterial,
                master_product_id: None,
                qty: decimal("3.5"),
                remark: String::new(),
                created_at: created_at(),
            })
            .expect("Unable to add discard");

        let discards = store
            .list_material_discards(0, 10)
            .expect("Unable to list discards");
        assert_eq!(discards.paging.total, 2);
        assert_eq!(discards.data[0].category, DiscardCategory::RawMaterial);
        assert_eq!(discards.data[1].master_product_id, Some(enamel));

        let material_return = MaterialReturn {
            id: 0,
            order_id: 8,
            company_name: "Acme Paints".to_string(),
            location: "Pune".to_string(),
            product: "Enamel White".to_string(),
            dispatched_qty: decimal("40"),
            returned_qty: decimal("45"),
            vehicle: "MH12 AB 1234".to_string(),
            remark: String::new(),
            returned_at: created_at(),
        };
        match store.add_material_return(material_return.clone()) {
            Err(InventoryStoreError::InvalidArgumentError(err)) => {
                assert_eq!(err.argument(), "returned_qty")
            }
            res => panic!("Expected InvalidArgumentError, got {:?}", res),
        }

        store
            .add_material_return(MaterialReturn {
                returned_qty: decimal("4"),
                ..material_return
            })
            .expect("Unable to add return");

        let returns = store
            .list_material_returns(0, 10)
            .expect("Unable to list returns");
        assert_eq!(returns.data.len(), 1);
        assert_eq!(returns.data[0].returned_qty, decimal("4"));
    }
}
