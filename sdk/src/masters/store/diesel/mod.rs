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
    Customer, CustomerList, Department, DepartmentList, Employee, EmployeeList, MasterStore,
    MasterStoreError, Product, ProductDetail, ProductDetailList, ProductList, TermCondition,
    TermConditionList, Unit, UnitList,
};
use operations::customer::MasterStoreCustomerOperations;
use operations::department::MasterStoreDepartmentOperations;
use operations::employee::MasterStoreEmployeeOperations;
use operations::product::MasterStoreProductOperations;
use operations::product_detail::MasterStoreProductDetailOperations;
use operations::term_condition::MasterStoreTermConditionOperations;
use operations::unit::MasterStoreUnitOperations;
use operations::MasterStoreOperations;

/// Manages master data in the database
#[derive(Clone)]
pub struct DieselMasterStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselMasterStore<C> {
    /// Creates a new DieselMasterStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselMasterStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl MasterStore for DieselMasterStore<diesel::pg::PgConnection> {
    fn add_department(&self, department: Department) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_department(department.into())
    }

    fn update_department(&self, department: Department) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_department(department.id, department.into())
    }

    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_department(id)
    }

    fn fetch_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_department_by_name(name)
    }

    fn list_departments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DepartmentList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_departments(offset, limit)
    }

    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_department(id)
    }

    fn add_employee(&self, employee: Employee) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_employee(employee.into())
    }

    fn update_employee(&self, employee: Employee) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_employee(employee.id, employee.into())
    }

    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_employee(id)
    }

    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_employees(offset, limit)
    }

    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_employee(id)
    }

    fn add_unit(&self, unit: Unit) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_unit(unit.into())
    }

    fn update_unit(&self, unit: Unit) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).update_unit(unit.id, unit.into())
    }

    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_unit(id)
    }

    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_unit_by_name(name)
    }

    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_units(offset, limit)
    }

    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_unit(id)
    }

    fn add_product(&self, product: Product) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_product(product.into())
    }

    fn update_product(&self, product: Product) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_product(product.id, product.into())
    }

    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product(id)
    }

    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product_by_name(name)
    }

    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_products(offset, limit)
    }

    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_product(id)
    }

    fn add_product_detail(&self, detail: ProductDetail) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .add_product_detail(detail.into())
    }

    fn update_product_detail(&self, detail: ProductDetail) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_product_detail(detail.id, detail.into())
    }

    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product_detail(id)
    }

    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .list_product_details(product_id, offset, limit)
    }

    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_product_detail(id)
    }

    fn add_term_condition(&self, term: TermCondition) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_term_condition(term.into())
    }

    fn update_term_condition(&self, term: TermCondition) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_term_condition(term.id, term.into())
    }

    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_term_condition(id)
    }

    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .list_term_conditions(offset, limit)
    }

    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_term_condition(id)
    }

    fn add_customer(&self, customer: Customer) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_customer(customer.into())
    }

    fn update_customer(&self, customer: Customer) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_customer(customer.id, customer.into())
    }

    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer(id)
    }

    fn fetch_customer_by_gst_no(
        &self,
        gst_no: &str,
    ) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer_by_gst_no(gst_no)
    }

    fn fetch_customer_by_mobile(
        &self,
        mobile: &str,
    ) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer_by_mobile(mobile)
    }

    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_customers(offset, limit)
    }

    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_customer(id)
    }
}

#[cfg(feature = "sqlite")]
impl MasterStore for DieselMasterStore<diesel::sqlite::SqliteConnection> {
    fn add_department(&self, department: Department) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_department(department.into())
    }

    fn update_department(&self, department: Department) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_department(department.id, department.into())
    }

    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_department(id)
    }

    fn fetch_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_department_by_name(name)
    }

    fn list_departments(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<DepartmentList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_departments(offset, limit)
    }

    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_department(id)
    }

    fn add_employee(&self, employee: Employee) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_employee(employee.into())
    }

    fn update_employee(&self, employee: Employee) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_employee(employee.id, employee.into())
    }

    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_employee(id)
    }

    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_employees(offset, limit)
    }

    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_employee(id)
    }

    fn add_unit(&self, unit: Unit) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_unit(unit.into())
    }

    fn update_unit(&self, unit: Unit) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).update_unit(unit.id, unit.into())
    }

    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_unit(id)
    }

    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_unit_by_name(name)
    }

    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_units(offset, limit)
    }

    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_unit(id)
    }

    fn add_product(&self, product: Product) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_product(product.into())
    }

    fn update_product(&self, product: Product) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_product(product.id, product.into())
    }

    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product(id)
    }

    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product_by_name(name)
    }

    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_products(offset, limit)
    }

    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_product(id)
    }

    fn add_product_detail(&self, detail: ProductDetail) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .add_product_detail(detail.into())
    }

    fn update_product_detail(&self, detail: ProductDetail) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_product_detail(detail.id, detail.into())
    }

    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_product_detail(id)
    }

    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .list_product_details(product_id, offset, limit)
    }

    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_product_detail(id)
    }

    fn add_term_condition(&self, term: TermCondition) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_term_condition(term.into())
    }

    fn update_term_condition(&self, term: TermCondition) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_term_condition(term.id, term.into())
    }

    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_term_condition(id)
    }

    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .list_term_conditions(offset, limit)
    }

    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_term_condition(id)
    }

    fn add_customer(&self, customer: Customer) -> Result<i64, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).add_customer(customer.into())
    }

    fn update_customer(&self, customer: Customer) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?)
            .update_customer(customer.id, customer.into())
    }

    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer(id)
    }

    fn fetch_customer_by_gst_no(
        &self,
        gst_no: &str,
    ) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer_by_gst_no(gst_no)
    }

    fn fetch_customer_by_mobile(
        &self,
        mobile: &str,
    ) -> Result<Option<Customer>, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).fetch_customer_by_mobile(mobile)
    }

    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).list_customers(offset, limit)
    }

    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError> {
        MasterStoreOperations::new(&*self.connection_pool.get()?).delete_customer(id)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::error::ConstraintViolationType;
    use crate::store::in_memory_store_factory;

    fn department(name: &str, head_id: Option<i64>) -> Department {
        Department {
            id: 0,
            name: name.to_string(),
            head_id,
        }
    }

    fn employee(name: &str) -> Employee {
        Employee {
            id: 0,
            name: name.to_string(),
            designation: Some("Supervisor".to_string()),
            department_id: None,
            mobile: None,
        }
    }

    fn customer(company: &str, mobile: &str, gst_no: Option<&str>) -> Customer {
        Customer {
            id: 0,
            company: company.to_string(),
            contact_person: None,
            address: None,
            city: Some("Pune".to_string()),
            mobile: mobile.to_string(),
            gst_no: gst_no.map(String::from),
            email: None,
        }
    }

    /// Verifies that departments can be added, renamed, listed by name and deleted.
    #[test]
    fn test_department_lifecycle() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        let paint_id = store
            .add_department(department("Paint Shop", None))
            .expect("Unable to add department");
        store
            .add_department(department("Accounts", None))
            .expect("Unable to add department");

        let mut paint = store
            .fetch_department(paint_id)
            .expect("Unable to fetch department")
            .expect("Department not found");
        assert_eq!(paint.name, "Paint Shop");

        paint.name = "Tinting".to_string();
        store
            .update_department(paint.clone())
            .expect("Unable to update department");

        let list = store
            .list_departments(0, 10)
            .expect("Unable to list departments");
        let names: Vec<&str> = list.data.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Accounts", "Tinting"]);
        assert_eq!(list.paging.total, 2);

        assert_eq!(
            store
                .fetch_department_by_name("Tinting")
                .expect("Unable to fetch department"),
            Some(paint)
        );

        store
            .delete_department(paint_id)
            .expect("Unable to delete department");
        assert_eq!(
            store
                .fetch_department(paint_id)
                .expect("Unable to fetch department"),
            None
        );
    }

    #[test]
    fn test_duplicate_department_name_is_a_constraint_violation() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        store
            .add_department(department("Stores", None))
            .expect("Unable to add department");

        match store.add_department(department("Stores", None)) {
            Err(MasterStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::Unique)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }
    }

    #[test]
    fn test_update_missing_row_is_not_found() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        let mut missing = department("Ghost", None);
        missing.id = 42;
        match store.update_department(missing) {
            Err(MasterStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
        match store.delete_unit(42) {
            Err(MasterStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }

    /// Verifies that deleting the head of a department leaves the department without a head.
    #[test]
    fn test_deleting_head_clears_department_head() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        let head_id = store
            .add_employee(employee("R. Patil"))
            .expect("Unable to add employee");
        let dept_id = store
            .add_department(department("Production", Some(head_id)))
            .expect("Unable to add department");

        store
            .delete_employee(head_id)
            .expect("Unable to delete employee");

        let dept = store
            .fetch_department(dept_id)
            .expect("Unable to fetch department")
            .expect("Department not found");
        assert_eq!(dept.head_id, None);
    }

    #[test]
    fn test_department_head_must_exist() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        match store.add_department(department("Quality", Some(99))) {
            Err(MasterStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }
    }

    /// Verifies that product details are listed per product and removed with their product.
    #[test]
    fn test_product_details_cascade() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        let litre = store
            .add_unit(Unit {
                id: 0,
                name: "Litre".to_string(),
                symbol: Some("L".to_string()),
            })
            .expect("Unable to add unit");
        let enamel = store
            .add_product(Product {
                id: 0,
                name: "Enamel White".to_string(),
                category: "Paint".to_string(),
                unit_id: Some(litre),
            })
            .expect("Unable to add product");
        let primer = store
            .add_product(Product {
                id: 0,
                name: "Red Oxide Primer".to_string(),
                category: "Primer".to_string(),
                unit_id: Some(litre),
            })
            .expect("Unable to add product");

        let details = [(enamel, 1, 32050), (enamel, 4, 120000), (primer, 20, 410000)];
        for (product_id, pack, rate) in &details {
            store
                .add_product_detail(ProductDetail {
                    id: 0,
                    product_id: *product_id,
                    pack_size: Decimal::from(*pack),
                    unit_id: Some(litre),
                    rate: Decimal::new(*rate, 2),
                })
                .expect("Unable to add product detail");
        }

        let details = store
            .list_product_details(Some(enamel), 0, 10)
            .expect("Unable to list product details");
        assert_eq!(details.data.len(), 2);
        assert_eq!(details.data[0].rate, Decimal::new(32050, 2));
        assert_eq!(
            store
                .list_product_details(None, 0, 10)
                .expect("Unable to list product details")
                .paging
                .total,
            3
        );

        store
            .delete_product(enamel)
            .expect("Unable to delete product");
        assert_eq!(
            store
                .list_product_details(None, 0, 10)
                .expect("Unable to list product details")
                .data
                .iter()
                .map(|d| d.product_id)
                .collect::<Vec<_>>(),
            vec![primer]
        );
    }

    #[test]
    fn test_customer_lookups() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        let id = store
            .add_customer(customer("Sai Traders", "9876543210", Some("27AAAPL1234C1ZV")))
            .expect("Unable to add customer");
        store
            .add_customer(customer("Om Hardware", "9123456780", None))
            .expect("Unable to add customer");
        store
            .add_customer(customer("Shree Paints", "9000000001", None))
            .expect("Unable to add customer without GST number");

        assert_eq!(
            store
                .fetch_customer_by_gst_no("27AAAPL1234C1ZV")
                .expect("Unable to fetch customer")
                .map(|c| c.id),
            Some(id)
        );
        assert_eq!(
            store
                .fetch_customer_by_mobile("9123456780")
                .expect("Unable to fetch customer")
                .map(|c| c.company),
            Some("Om Hardware".to_string())
        );
        assert_eq!(
            store
                .fetch_customer_by_mobile("9999999999")
                .expect("Unable to fetch customer"),
            None
        );

        let companies: Vec<String> = store
            .list_customers(0, 10)
            .expect("Unable to list customers")
            .data
            .into_iter()
            .map(|c| c.company)
            .collect();
        assert_eq!(companies, vec!["Om Hardware", "Sai Traders", "Shree Paints"]);
    }

    #[test]
    fn test_term_conditions_paging() {
        let factory = in_memory_store_factory();
        let store = factory.get_master_store();

        for n in 1..=3 {
            store
                .add_term_condition(TermCondition {
                    id: 0,
                    title: format!("Term {}", n),
                    description: "Payment within 30 days".to_string(),
                })
                .expect("Unable to add term");
        }

        let page = store
            .list_term_conditions(2, 2)
            .expect("Unable to list terms");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title, "Term 3");
        assert_eq!(page.paging.total, 3);
        assert_eq!(page.paging.next_offset(), None);
    }
}
