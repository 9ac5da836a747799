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

use rust_decimal::Decimal;

use crate::masters::store::{
    Customer, Department, Employee, Product, ProductDetail, TermCondition, Unit,
};
use crate::rest_api::resources::paging::v1::Paging;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentSlice {
    pub id: i64,
    pub name: String,
    pub head_id: Option<i64>,
}

impl From<Department> for DepartmentSlice {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
            head_id: department.head_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeSlice {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
    pub department_id: Option<i64>,
    pub mobile: Option<String>,
}

impl From<Employee> for EmployeeSlice {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            designation: employee.designation,
            department_id: employee.department_id,
            mobile: employee.mobile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitSlice {
    pub id: i64,
    pub name: String,
    pub symbol: Option<String>,
}

impl From<Unit> for UnitSlice {
    fn from(unit: Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name,
            symbol: unit.symbol,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSlice {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit_id: Option<i64>,
}

impl From<Product> for ProductSlice {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            unit_id: product.unit_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetailSlice {
    pub id: i64,
    pub product_id: i64,
    pub pack_size: Decimal,
    pub unit_id: Option<i64>,
    pub rate: Decimal,
}

impl From<ProductDetail> for ProductDetailSlice {
    fn from(detail: ProductDetail) -> Self {
        Self {
            id: detail.id,
            product_id: detail.product_id,
            pack_size: detail.pack_size,
            unit_id: detail.unit_id,
            rate: detail.rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermConditionSlice {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<TermCondition> for TermConditionSlice {
    fn from(term: TermCondition) -> Self {
        Self {
            id: term.id,
            title: term.title,
            description: term.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSlice {
    pub id: i64,
    pub company: String,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub mobile: String,
    pub gst_no: Option<String>,
    pub email: Option<String>,
}

impl From<Customer> for CustomerSlice {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
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

/// A master screen: the listing, the row picked for editing and the rows offered in its
/// select boxes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterScreenSlice<T, C = ()> {
    pub selected: Option<T>,
    pub data: Vec<T>,
    pub paging: Paging,
    pub choices: C,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentChoices {
    pub employees: Vec<EmployeeSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeChoices {
    pub departments: Vec<DepartmentSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitChoices {
    pub units: Vec<UnitSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetailChoices {
    pub products: Vec<ProductSlice>,
    pub units: Vec<UnitSlice>,
    pub product_id: Option<i64>,
}

pub type DepartmentScreenSlice = MasterScreenSlice<DepartmentSlice, DepartmentChoices>;
pub type EmployeeScreenSlice = MasterScreenSlice<EmployeeSlice, EmployeeChoices>;
pub type UnitScreenSlice = MasterScreenSlice<UnitSlice>;
pub type ProductScreenSlice = MasterScreenSlice<ProductSlice, UnitChoices>;
pub type ProductDetailScreenSlice = MasterScreenSlice<ProductDetailSlice, ProductDetailChoices>;
pub type TermConditionScreenSlice = MasterScreenSlice<TermConditionSlice>;
pub type CustomerScreenSlice = MasterScreenSlice<CustomerSlice>;
