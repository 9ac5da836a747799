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

use crate::error::InternalError;
use crate::masters::store::diesel::schema::*;
use crate::masters::store::{
    Customer, Department, Employee, Product, ProductDetail, TermCondition, Unit,
};
use crate::store::{decimal_column, decimal_text};

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "department"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewDepartmentModel {
    pub name: String,
    pub head_id: Option<i64>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct DepartmentModel {
    pub id: i64,
    pub name: String,
    pub head_id: Option<i64>,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "employee"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewEmployeeModel {
    pub name: String,
    pub designation: Option<String>,
    pub department_id: Option<i64>,
    pub mobile: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct EmployeeModel {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
    pub department_id: Option<i64>,
    pub mobile: Option<String>,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "unit"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewUnitModel {
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct UnitModel {
    pub id: i64,
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "product"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewProductModel {
    pub name: String,
    pub category: String,
    pub unit_id: Option<i64>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductModel {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit_id: Option<i64>,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "product_detail"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewProductDetailModel {
    pub product_id: i64,
    pub pack_size: String,
    pub unit_id: Option<i64>,
    pub rate: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ProductDetailModel {
    pub id: i64,
    pub product_id: i64,
    pub pack_size: String,
    pub unit_id: Option<i64>,
    pub rate: String,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "term_condition"]
pub struct NewTermConditionModel {
    pub title: String,
    pub description: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct TermConditionModel {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[table_name = "customer"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewCustomerModel {
    pub company: String,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub mobile: String,
    pub gst_no: Option<String>,
    pub email: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct CustomerModel {
    pub id: i64,
    pub company: String,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub mobile: String,
    pub gst_no: Option<String>,
    pub email: Option<String>,
}

impl From<Department> for NewDepartmentModel {
    fn from(department: Department) -> Self {
        NewDepartmentModel {
            name: department.name,
            head_id: department.head_id,
        }
    }
}

impl From<DepartmentModel> for Department {
    fn from(model: DepartmentModel) -> Self {
        Department {
            id: model.id,
            name: model.name,
            head_id: model.head_id,
        }
    }
}

impl From<Employee> for NewEmployeeModel {
    fn from(employee: Employee) -> Self {
        NewEmployeeModel {
            name: employee.name,
            designation: employee.designation,
            department_id: employee.department_id,
            mobile: employee.mobile,
        }
    }
}

impl From<EmployeeModel> for Employee {
    fn from(model: EmployeeModel) -> Self {
        Employee {
            id: model.id,
            name: model.name,
            designation: model.designation,
            department_id: model.department_id,
            mobile: model.mobile,
        }
    }
}

impl From<Unit> for NewUnitModel {
    fn from(unit: Unit) -> Self {
        NewUnitModel {
            name: unit.name,
            symbol: unit.symbol,
        }
    }
}

impl From<UnitModel> for Unit {
    fn from(model: UnitModel) -> Self {
        Unit {
            id: model.id,
            name: model.name,
            symbol: model.symbol,
        }
    }
}

impl From<Product> for NewProductModel {
    fn from(product: Product) -> Self {
        NewProductModel {
            name: product.name,
            category: product.category,
            unit_id: product.unit_id,
        }
    }
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: model.id,
            name: model.name,
            category: model.category,
            unit_id: model.unit_id,
        }
    }
}

impl From<ProductDetail> for NewProductDetailModel {
    fn from(detail: ProductDetail) -> Self {
        NewProductDetailModel {
            product_id: detail.product_id,
            pack_size: decimal_text(&detail.pack_size),
            unit_id: detail.unit_id,
            rate: decimal_text(&detail.rate),
        }
    }
}

impl TryFrom<ProductDetailModel> for ProductDetail {
    type Error = InternalError;

    fn try_from(model: ProductDetailModel) -> Result<Self, Self::Error> {
        Ok(ProductDetail {
            id: model.id,
            product_id: model.product_id,
            pack_size: decimal_column(&model.pack_size, "product_detail.pack_size")?,
            unit_id: model.unit_id,
            rate: decimal_column(&model.rate, "product_detail.rate")?,
        })
    }
}

impl From<TermCondition> for NewTermConditionModel {
    fn from(term: TermCondition) -> Self {
        NewTermConditionModel {
            title: term.title,
            description: term.description,
        }
    }
}

impl From<TermConditionModel> for TermCondition {
    fn from(model: TermConditionModel) -> Self {
        TermCondition {
            id: model.id,
            title: model.title,
            description: model.description,
        }
    }
}

impl From<Customer> for NewCustomerModel {
    fn from(customer: Customer) -> Self {
        NewCustomerModel {
            company: customer.company,
            contact_person: customer.contact_person,
            address: customer.address,
            city: customer.city,
            mobile: customer.mobile,
            gst_no: customer.gst_no,
            email: customer.email,
        }
    }
}

impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        Customer {
            id: model.id,
            company: model.company,
            contact_person: model.contact_person,
            address: model.address,
            city: model.city,
            mobile: model.mobile,
            gst_no: model.gst_no,
            email: model.email,
        }
    }
}
