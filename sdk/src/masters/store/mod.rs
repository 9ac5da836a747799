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

use rust_decimal::Decimal;

use crate::paging::Paging;

pub use error::MasterStoreError;

/// Represents a department, optionally headed by an employee
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub head_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DepartmentList {
    pub data: Vec<Department>,
    pub paging: Paging,
}

impl DepartmentList {
    pub fn new(data: Vec<Department>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
    pub department_id: Option<i64>,
    pub mobile: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EmployeeList {
    pub data: Vec<Employee>,
    pub paging: Paging,
}

impl EmployeeList {
    pub fn new(data: Vec<Employee>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A unit of measure, e.g. `Litre` / `L`
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UnitList {
    pub data: Vec<Unit>,
    pub paging: Paging,
}

impl UnitList {
    pub fn new(data: Vec<Unit>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A saleable product; its pack sizes and rates are kept as `ProductDetail` rows
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductList {
    pub data: Vec<Product>,
    pub paging: Paging,
}

impl ProductList {
    pub fn new(data: Vec<Product>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// One pack size of a product and the rate it sells at
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDetail {
    pub id: i64,
    pub product_id: i64,
    pub pack_size: Decimal,
    pub unit_id: Option<i64>,
    pub rate: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDetailList {
    pub data: Vec<ProductDetail>,
    pub paging: Paging,
}

impl ProductDetailList {
    pub fn new(data: Vec<ProductDetail>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TermCondition {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TermConditionList {
    pub data: Vec<TermCondition>,
    pub paging: Paging,
}

impl TermConditionList {
    pub fn new(data: Vec<TermCondition>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// A customer company. The mobile number and, when given, the GST number identify a customer
/// uniquely.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub company: String,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub mobile: String,
    pub gst_no: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomerList {
    pub data: Vec<Customer>,
    pub paging: Paging,
}

impl CustomerList {
    pub fn new(data: Vec<Customer>, paging: Paging) -> Self {
        Self { data, paging }
    }
}

/// Store for master data.
///
/// `add_*` operations ignore the `id` of the value passed in and return the id assigned by the
/// database; `update_*` operations use it to find the row and fail with `NotFoundError` when it
/// does not exist.
pub trait MasterStore: Send + Sync {
    /// Adds a department to the underlying storage
    ///
    /// # Arguments
    ///
    ///  * `department` - The department to be added
    fn add_department(&self, department: Department) -> Result<i64, MasterStoreError>;

    /// Replaces the name and head of an existing department
    fn update_department(&self, department: Department) -> Result<(), MasterStoreError>;

    /// Fetches a department from the underlying storage
    ///
    /// # Arguments
    ///
    ///  * `id` - The id of the department
    fn fetch_department(&self, id: i64) -> Result<Option<Department>, MasterStoreError>;

    /// Fetches the department with exactly this name, if any
    fn fetch_department_by_name(&self, name: &str)
        -> Result<Option<Department>, MasterStoreError>;

    /// Lists departments ordered by name
    ///
    /// # Arguments
    ///
    ///  * `offset` - The index of the first in storage to retrieve
    ///  * `limit` - The number of items to retrieve from the offset
    fn list_departments(&self, offset: i64, limit: i64)
        -> Result<DepartmentList, MasterStoreError>;

    fn delete_department(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_employee(&self, employee: Employee) -> Result<i64, MasterStoreError>;

    fn update_employee(&self, employee: Employee) -> Result<(), MasterStoreError>;

    fn fetch_employee(&self, id: i64) -> Result<Option<Employee>, MasterStoreError>;

    /// Lists employees ordered by name
    fn list_employees(&self, offset: i64, limit: i64) -> Result<EmployeeList, MasterStoreError>;

    /// Deletes an employee; departments headed by the employee are left without a head
    fn delete_employee(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_unit(&self, unit: Unit) -> Result<i64, MasterStoreError>;

    fn update_unit(&self, unit: Unit) -> Result<(), MasterStoreError>;

    fn fetch_unit(&self, id: i64) -> Result<Option<Unit>, MasterStoreError>;

    fn fetch_unit_by_name(&self, name: &str) -> Result<Option<Unit>, MasterStoreError>;

    /// Lists units ordered by name
    fn list_units(&self, offset: i64, limit: i64) -> Result<UnitList, MasterStoreError>;

    fn delete_unit(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_product(&self, product: Product) -> Result<i64, MasterStoreError>;

    fn update_product(&self, product: Product) -> Result<(), MasterStoreError>;

    fn fetch_product(&self, id: i64) -> Result<Option<Product>, MasterStoreError>;

    fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, MasterStoreError>;

    /// Lists products ordered by name
    fn list_products(&self, offset: i64, limit: i64) -> Result<ProductList, MasterStoreError>;

    /// Deletes a product together with all of its details
    fn delete_product(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_product_detail(&self, detail: ProductDetail) -> Result<i64, MasterStoreError>;

    fn update_product_detail(&self, detail: ProductDetail) -> Result<(), MasterStoreError>;

    fn fetch_product_detail(&self, id: i64) -> Result<Option<ProductDetail>, MasterStoreError>;

    /// Lists product details in the order they were added
    ///
    /// # Arguments
    ///
    ///  * `product_id` - Only list the details of this product
    ///  * `offset` - The index of the first in storage to retrieve
    ///  * `limit` - The number of items to retrieve from the offset
    fn list_product_details(
        &self,
        product_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<ProductDetailList, MasterStoreError>;

    fn delete_product_detail(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_term_condition(&self, term: TermCondition) -> Result<i64, MasterStoreError>;

    fn update_term_condition(&self, term: TermCondition) -> Result<(), MasterStoreError>;

    fn fetch_term_condition(&self, id: i64) -> Result<Option<TermCondition>, MasterStoreError>;

    /// Lists terms and conditions in the order they were added
    fn list_term_conditions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<TermConditionList, MasterStoreError>;

    fn delete_term_condition(&self, id: i64) -> Result<(), MasterStoreError>;

    fn add_customer(&self, customer: Customer) -> Result<i64, MasterStoreError>;

    fn update_customer(&self, customer: Customer) -> Result<(), MasterStoreError>;

    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError>;

    fn fetch_customer_by_gst_no(&self, gst_no: &str)
        -> Result<Option<Customer>, MasterStoreError>;

    fn fetch_customer_by_mobile(&self, mobile: &str)
        -> Result<Option<Customer>, MasterStoreError>;

    /// Lists customers ordered by company name
    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError>;

    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError>;
}
