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

use crate::data_validation::{self, DataValidationError, INVALID_CHOICE, MISSING_CATEGORY};
use crate::masters::store::{
    Customer, Department, Employee, MasterStore, MasterStoreError, Product, ProductDetail,
    TermCondition, Unit,
};
use crate::rest_api::resources::{
    dashboard::v1::MASTERS_DASHBOARD,
    error::ErrorResponse,
    form::{navigate, unsupported, FormAction, FormData, Redirect},
    paging::v1::Paging,
};

use super::payloads::*;

pub const DEPARTMENTS: &str = "/masters/departments/";
pub const EMPLOYEES: &str = "/masters/employee-master/";
pub const UNITS: &str = "/masters/units/";
pub const PRODUCTS: &str = "/masters/product-master/";
pub const PRODUCT_DETAILS: &str = "/masters/product-master-detail/";
pub const TERMS_CONDITIONS: &str = "/masters/terms-conditions/";
pub const CUSTOMERS: &str = "/masters/customers/";

pub const DUPLICATE_GST: &str = "Customer with this GST number already exists.";
pub const DUPLICATE_MOBILE: &str = "Customer with this mobile number already exists.";

/// Upper bound on the rows offered in a select box
const CHOICE_LIMIT: i64 = 1024;

fn store_error(err: MasterStoreError) -> ErrorResponse {
    match err {
        MasterStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        MasterStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        MasterStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        MasterStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

fn page(offset: u64, limit: u16) -> (i64, i64) {
    (
        i64::try_from(offset).unwrap_or(i64::MAX),
        i64::from(limit),
    )
}

fn required<T>(found: Option<T>, kind: &str, id: i64) -> Result<T, ErrorResponse> {
    found.ok_or_else(|| ErrorResponse::new(404, &format!("{} {} not found", kind, id)))
}

/// The id of the row being edited, posted in the `id` field
fn form_id(form: &FormData) -> Result<Option<i64>, ErrorResponse> {
    let mut errors = DataValidationError::new();
    let id = data_validation::id(&mut errors, "id", form.get("id"), false);
    errors
        .into_result(id)
        .map_err(|errors| ErrorResponse::invalid_form(errors, form.echo()))
}

fn delete_id(id: Option<i64>, kind: &str) -> Result<i64, ErrorResponse> {
    id.ok_or_else(|| ErrorResponse::new(400, &format!("Select a {} to delete", kind)))
}

fn reject(errors: DataValidationError, form: &FormData) -> ErrorResponse {
    ErrorResponse::invalid_form(errors, form.echo())
}

pub fn department_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<DepartmentScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(DepartmentSlice::from(required(
            store.fetch_department(id).map_err(store_error)?,
            "Department",
            id,
        )?)),
        None => None,
    };

    let departments = store
        .list_departments(offset, limit)
        .map_err(store_error)?;
    let employees = store
        .list_employees(0, CHOICE_LIMIT)
        .map_err(store_error)?;

    Ok(DepartmentScreenSlice {
        selected,
        data: departments
            .data
            .into_iter()
            .map(DepartmentSlice::from)
            .collect(),
        paging: Paging::new(DEPARTMENTS, departments.paging),
        choices: DepartmentChoices {
            employees: employees.data.into_iter().map(EmployeeSlice::from).collect(),
        },
    })
}

/// Handles a post to the department screen. `id` is the department named in the path, if any.
pub fn submit_department<'a>(
    store: Box<dyn MasterStore + 'a>,
    id: Option<i64>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, DEPARTMENTS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }

    let id = match id {
        Some(id) => Some(id),
        None => form_id(form)?,
    };

    match action {
        FormAction::Delete => {
            store
                .delete_department(delete_id(id, "department")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let department = validate_department(store.as_ref(), id, form)?;
            match id {
                Some(_) => store.update_department(department),
                None => store.add_department(department).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(DEPARTMENTS))
}

fn validate_department(
    store: &dyn MasterStore,
    id: Option<i64>,
    form: &FormData,
) -> Result<Department, ErrorResponse> {
    let mut errors = DataValidationError::new();
    let name = data_validation::required_text(&mut errors, "name", form.get("name"), 100);
    let head_id = data_validation::id(&mut errors, "head_id", form.get("head_id"), false);

    if let Some(name) = &name {
        if let Some(existing) = store.fetch_department_by_name(name).map_err(store_error)? {
            if Some(existing.id) != id {
                errors.add_field_error("name", "Department with this name already exists.");
            }
        }
    }
    if let Some(head_id) = head_id {
        if store.fetch_employee(head_id).map_err(store_error)?.is_none() {
            errors.add_field_error("head_id", INVALID_CHOICE);
        }
    }

    match name {
        Some(name) if errors.is_empty() => Ok(Department {
            id: id.unwrap_or(0),
            name,
            head_id,
        }),
        _ => Err(reject(errors, form)),
    }
}

pub fn employee_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<EmployeeScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(EmployeeSlice::from(required(
            store.fetch_employee(id).map_err(store_error)?,
            "Employee",
            id,
        )?)),
        None => None,
    };

    let employees = store.list_employees(offset, limit).map_err(store_error)?;
    let departments = store
        .list_departments(0, CHOICE_LIMIT)
        .map_err(store_error)?;

    Ok(EmployeeScreenSlice {
        selected,
        data: employees.data.into_iter().map(EmployeeSlice::from).collect(),
        paging: Paging::new(EMPLOYEES, employees.paging),
        choices: EmployeeChoices {
            departments: departments
                .data
                .into_iter()
                .map(DepartmentSlice::from)
                .collect(),
        },
    })
}

pub fn submit_employee<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, EMPLOYEES, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            store
                .delete_employee(delete_id(id, "employee")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let name = data_validation::required_text(&mut errors, "name", form.get("name"), 150);
            let designation = data_validation::optional_text(
                &mut errors,
                "designation",
                form.get("designation"),
                100,
            );
            let department_id = data_validation::id(
                &mut errors,
                "department_id",
                form.get("department_id"),
                false,
            );
            let mobile = data_validation::mobile(&mut errors, "mobile", form.get("mobile"), false);

            if let Some(department_id) = department_id {
                if store
                    .fetch_department(department_id)
                    .map_err(store_error)?
                    .is_none()
                {
                    errors.add_field_error("department_id", INVALID_CHOICE);
                }
            }

            let employee = match name {
                Some(name) if errors.is_empty() => Employee {
                    id: id.unwrap_or(0),
                    name,
                    designation,
                    department_id,
                    mobile,
                },
                _ => return Err(reject(errors, form)),
            };

            match id {
                Some(_) => store.update_employee(employee),
                None => store.add_employee(employee).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(EMPLOYEES))
}

pub fn unit_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<UnitScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(UnitSlice::from(required(
            store.fetch_unit(id).map_err(store_error)?,
            "Unit",
            id,
        )?)),
        None => None,
    };

    let units = store.list_units(offset, limit).map_err(store_error)?;

    Ok(UnitScreenSlice {
        selected,
        data: units.data.into_iter().map(UnitSlice::from).collect(),
        paging: Paging::new(UNITS, units.paging),
        choices: (),
    })
}

pub fn submit_unit<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, UNITS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            store
                .delete_unit(delete_id(id, "unit")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let name = data_validation::required_text(&mut errors, "name", form.get("name"), 50);
            let symbol =
                data_validation::optional_text(&mut errors, "symbol", form.get("symbol"), 20);

            if let Some(name) = &name {
                if let Some(existing) = store.fetch_unit_by_name(name).map_err(store_error)? {
                    if Some(existing.id) != id {
                        errors.add_field_error("name", "Unit with this name already exists.");
                    }
                }
            }

            let unit = match name {
                Some(name) if errors.is_empty() => Unit {
                    id: id.unwrap_or(0),
                    name,
                    symbol,
                },
                _ => return Err(reject(errors, form)),
            };

            match id {
                Some(_) => store.update_unit(unit),
                None => store.add_unit(unit).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(UNITS))
}

pub fn product_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<ProductScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(ProductSlice::from(required(
            store.fetch_product(id).map_err(store_error)?,
            "Product",
            id,
        )?)),
        None => None,
    };

    let products = store.list_products(offset, limit).map_err(store_error)?;
    let units = store.list_units(0, CHOICE_LIMIT).map_err(store_error)?;

    Ok(ProductScreenSlice {
        selected,
        data: products.data.into_iter().map(ProductSlice::from).collect(),
        paging: Paging::new(PRODUCTS, products.paging),
        choices: UnitChoices {
            units: units.data.into_iter().map(UnitSlice::from).collect(),
        },
    })
}

/// Handles a post to the product master screen. A product without a category is reported as a
/// flash message rather than a field error.
pub fn submit_product<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, PRODUCTS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            store
                .delete_product(delete_id(id, "product")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let name = data_validation::required_text(&mut errors, "name", form.get("name"), 150);
            if form.get("category").trim().is_empty() {
                errors.add_message(MISSING_CATEGORY);
            }
            let category =
                data_validation::optional_text(&mut errors, "category", form.get("category"), 100);
            let unit_id = data_validation::id(&mut errors, "unit_id", form.get("unit_id"), false);

            if let Some(name) = &name {
                if let Some(existing) = store.fetch_product_by_name(name).map_err(store_error)? {
                    if Some(existing.id) != id {
                        errors.add_field_error("name", "Product with this name already exists.");
                    }
                }
            }
            if let Some(unit_id) = unit_id {
                if store.fetch_unit(unit_id).map_err(store_error)?.is_none() {
                    errors.add_field_error("unit_id", INVALID_CHOICE);
                }
            }

            let product = match (name, category) {
                (Some(name), Some(category)) if errors.is_empty() => Product {
                    id: id.unwrap_or(0),
                    name,
                    category,
                    unit_id,
                },
                _ => return Err(reject(errors, form)),
            };

            match id {
                Some(_) => store.update_product(product),
                None => store.add_product(product).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(PRODUCTS))
}

fn product_details_link(product_id: i64) -> String {
    format!("{}?product_id={}", PRODUCT_DETAILS, product_id)
}

pub fn product_detail_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    product_id: Option<i64>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<ProductDetailScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(ProductDetailSlice::from(required(
            store.fetch_product_detail(id).map_err(store_error)?,
            "Product detail",
            id,
        )?)),
        None => None,
    };

    let details = store
        .list_product_details(product_id, offset, limit)
        .map_err(store_error)?;
    let products = store.list_products(0, CHOICE_LIMIT).map_err(store_error)?;
    let units = store.list_units(0, CHOICE_LIMIT).map_err(store_error)?;

    let base_link = match product_id {
        Some(product_id) => product_details_link(product_id),
        None => PRODUCT_DETAILS.to_string(),
    };

    Ok(ProductDetailScreenSlice {
        selected,
        data: details
            .data
            .into_iter()
            .map(ProductDetailSlice::from)
            .collect(),
        paging: Paging::new(&base_link, details.paging),
        choices: ProductDetailChoices {
            products: products.data.into_iter().map(ProductSlice::from).collect(),
            units: units.data.into_iter().map(UnitSlice::from).collect(),
            product_id,
        },
    })
}

pub fn submit_product_detail<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, PRODUCT_DETAILS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => delete_product_detail(store, delete_id(id, "product detail")?),
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let product_id =
                data_validation::id(&mut errors, "product_id", form.get("product_id"), true);
            let pack_size = data_validation::decimal(
                &mut errors,
                "pack_size",
                "Pack size",
                form.get("pack_size"),
                true,
            );
            let unit_id = data_validation::id(&mut errors, "unit_id", form.get("unit_id"), false);
            let rate =
                data_validation::decimal(&mut errors, "rate", "Rate", form.get("rate"), true);

            if let Some(product_id) = product_id {
                if store.fetch_product(product_id).map_err(store_error)?.is_none() {
                    errors.add_field_error("product_id", INVALID_CHOICE);
                }
            }
            if let Some(unit_id) = unit_id {
                if store.fetch_unit(unit_id).map_err(store_error)?.is_none() {
                    errors.add_field_error("unit_id", INVALID_CHOICE);
                }
            }

            let detail = match (product_id, pack_size, rate) {
                (Some(product_id), Some(pack_size), Some(rate)) if errors.is_empty() => {
                    ProductDetail {
                        id: id.unwrap_or(0),
                        product_id,
                        pack_size,
                        unit_id,
                        rate,
                    }
                }
                _ => return Err(reject(errors, form)),
            };
            let product_id = detail.product_id;

            match id {
                Some(_) => store.update_product_detail(detail),
                None => store.add_product_detail(detail).map(|_| ()),
            }
            .map_err(store_error)?;

            Ok(Redirect::to(&product_details_link(product_id)))
        }
        action => Err(unsupported(action)),
    }
}

/// Removes a product detail and returns to the details of its product
pub fn delete_product_detail<'a>(
    store: Box<dyn MasterStore + 'a>,
    id: i64,
) -> Result<Redirect, ErrorResponse> {
    let detail = required(
        store.fetch_product_detail(id).map_err(store_error)?,
        "Product detail",
        id,
    )?;

    store.delete_product_detail(id).map_err(store_error)?;

    Ok(Redirect::to(&product_details_link(detail.product_id)))
}

pub fn term_condition_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<TermConditionScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(TermConditionSlice::from(required(
            store.fetch_term_condition(id).map_err(store_error)?,
            "Term",
            id,
        )?)),
        None => None,
    };

    let terms = store
        .list_term_conditions(offset, limit)
        .map_err(store_error)?;

    Ok(TermConditionScreenSlice {
        selected,
        data: terms
            .data
            .into_iter()
            .map(TermConditionSlice::from)
            .collect(),
        paging: Paging::new(TERMS_CONDITIONS, terms.paging),
        choices: (),
    })
}

pub fn submit_term_condition<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, TERMS_CONDITIONS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            store
                .delete_term_condition(delete_id(id, "term")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let mut errors = DataValidationError::new();
            let title =
                data_validation::required_text(&mut errors, "title", form.get("title"), 200);
            let description = data_validation::required_text(
                &mut errors,
                "description",
                form.get("description"),
                4000,
            );

            let term = match (title, description) {
                (Some(title), Some(description)) if errors.is_empty() => TermCondition {
                    id: id.unwrap_or(0),
                    title,
                    description,
                },
                _ => return Err(reject(errors, form)),
            };

            match id {
                Some(_) => store.update_term_condition(term),
                None => store.add_term_condition(term).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(TERMS_CONDITIONS))
}

pub fn customer_screen<'a>(
    store: Box<dyn MasterStore + 'a>,
    selected: Option<i64>,
    offset: u64,
    limit: u16,
) -> Result<CustomerScreenSlice, ErrorResponse> {
    let (offset, limit) = page(offset, limit);

    let selected = match selected {
        Some(id) => Some(CustomerSlice::from(required(
            store.fetch_customer(id).map_err(store_error)?,
            "Customer",
            id,
        )?)),
        None => None,
    };

    let customers = store.list_customers(offset, limit).map_err(store_error)?;

    Ok(CustomerScreenSlice {
        selected,
        data: customers.data.into_iter().map(CustomerSlice::from).collect(),
        paging: Paging::new(CUSTOMERS, customers.paging),
        choices: (),
    })
}

/// Handles a post to the customer screen. Duplicate GST and mobile numbers are reported as
/// flash messages and the form is redisplayed with the submitted values.
pub fn submit_customer<'a>(
    store: Box<dyn MasterStore + 'a>,
    form: &FormData,
) -> Result<Redirect, ErrorResponse> {
    let action = form.action()?;
    if let Some(redirect) = navigate(action, CUSTOMERS, MASTERS_DASHBOARD) {
        return Ok(redirect);
    }
    let id = form_id(form)?;

    match action {
        FormAction::Delete => {
            store
                .delete_customer(delete_id(id, "customer")?)
                .map_err(store_error)?;
        }
        action if action.is_save() => {
            let customer = validate_customer(store.as_ref(), id, form)?;
            match id {
                Some(_) => store.update_customer(customer),
                None => store.add_customer(customer).map(|_| ()),
            }
            .map_err(store_error)?;
        }
        action => return Err(unsupported(action)),
    }

    Ok(Redirect::to(CUSTOMERS))
}

fn validate_customer(
    store: &dyn MasterStore,
    id: Option<i64>,
    form: &FormData,
) -> Result<Customer, ErrorResponse> {
    let mut errors = DataValidationError::new();
    let company = data_validation::required_text(&mut errors, "company", form.get("company"), 200);
    let contact_person = data_validation::optional_text(
        &mut errors,
        "contact_person",
        form.get("contact_person"),
        150,
    );
    let address =
        data_validation::optional_text(&mut errors, "address", form.get("address"), 500);
    let city = data_validation::optional_text(&mut errors, "city", form.get("city"), 100);
    let mobile = data_validation::mobile(&mut errors, "mobile", form.get("mobile"), true);
    let gst_no = data_validation::optional_text(&mut errors, "gst_no", form.get("gst_no"), 15)
        .map(|gst_no| gst_no.to_uppercase());
    let email = data_validation::optional_text(&mut errors, "email", form.get("email"), 254);

    if let Some(email) = &email {
        if !email.contains('@') {
            errors.add_field_error("email", "Enter a valid email address.");
        }
    }
    if let Some(gst_no) = &gst_no {
        if let Some(existing) = store.fetch_customer_by_gst_no(gst_no).map_err(store_error)? {
            if Some(existing.id) != id {
                errors.add_message(DUPLICATE_GST);
            }
        }
    }
    if let Some(mobile) = &mobile {
        if let Some(existing) = store.fetch_customer_by_mobile(mobile).map_err(store_error)? {
            if Some(existing.id) != id {
                errors.add_message(DUPLICATE_MOBILE);
            }
        }
    }

    match (company, mobile) {
        (Some(company), Some(mobile)) if errors.is_empty() => Ok(Customer {
            id: id.unwrap_or(0),
            company,
            contact_person,
            address,
            city,
            mobile,
            gst_no,
            email,
        }),
        _ => Err(reject(errors, form)),
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::rest_api::resources::form::form;
    use crate::store::{in_memory_store_factory, StoreFactory};

    fn add_department(factory: &dyn StoreFactory, name: &str) -> Redirect {
        submit_department(
            factory.get_master_store(),
            None,
            &form(&[("action", "save"), ("name", name)]),
        )
        .expect("Unable to save department")
    }

    #[test]
    fn test_page_keeps_requested_limit() {
        assert_eq!(page(20, 1024), (20, 1024));
        assert_eq!(page(u64::MAX, 10), (i64::MAX, 10));
    }

    #[test]
    fn test_department_save_modify_and_duplicate() {
        let factory = in_memory_store_factory();

        assert_eq!(add_department(&*factory, "Paint Shop").location(), DEPARTMENTS);
        add_department(&*factory, "Dispatch");

        let screen = department_screen(factory.get_master_store(), None, 0, 10)
            .expect("Unable to load screen");
        assert_eq!(
            screen.data.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Dispatch", "Paint Shop"]
        );
        let paint_shop = screen.data[1].id;

        let err = submit_department(
            factory.get_master_store(),
            None,
            &form(&[("action", "save"), ("name", "Paint Shop")]),
        )
        .expect_err("Duplicate name accepted");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.errors().get("name"),
            Some(&vec!["Department with this name already exists.".to_string()])
        );

        // Renaming a department to its own name is not a duplicate
        submit_department(
            factory.get_master_store(),
            Some(paint_shop),
            &form(&[("action", "modify"), ("name", "Paint Shop")]),
        )
        .expect("Unable to modify department");

        let screen = department_screen(factory.get_master_store(), Some(paint_shop), 0, 10)
            .expect("Unable to load screen");
        assert_eq!(screen.selected.map(|d| d.name), Some("Paint Shop".to_string()));
    }

    #[test]
    fn test_department_navigation_and_missing_head() {
        let factory = in_memory_store_factory();

        let redirect = submit_department(
            factory.get_master_store(),
            None,
            &form(&[("action", "close"), ("name", "")]),
        )
        .expect("Unable to close");
        assert_eq!(redirect.location(), MASTERS_DASHBOARD);

        let err = submit_department(
            factory.get_master_store(),
            None,
            &form(&[("action", "save"), ("name", "Stores"), ("head_id", "42")]),
        )
        .expect_err("Unknown head accepted");
        assert_eq!(
            err.errors().get("head_id"),
            Some(&vec![INVALID_CHOICE.to_string()])
        );

        match department_screen(factory.get_master_store(), Some(9), 0, 10) {
            Err(err) => assert_eq!(err.status_code(), 404),
            Ok(screen) => panic!("Expected 404, got {:?}", screen),
        }
    }

    #[test]
    fn test_product_without_category_is_flashed() {
        let factory = in_memory_store_factory();

        let err = submit_product(
            factory.get_master_store(),
            &form(&[("action", "save"), ("name", "Enamel White"), ("category", "")]),
        )
        .expect_err("Missing category accepted");

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.messages(), &[MISSING_CATEGORY.to_string()]);
        assert!(err.errors().is_empty());
    }

    #[test]
    fn test_customer_duplicates_are_flashed() {
        let factory = in_memory_store_factory();

        submit_customer(
            factory.get_master_store(),
            &form(&[
                ("action", "save"),
                ("company", "Acme Paints"),
                ("mobile", "9876543210"),
                ("gst_no", "27aaacr5055k1z5"),
            ]),
        )
        .expect("Unable to save customer");

        let err = submit_customer(
            factory.get_master_store(),
            &form(&[
                ("action", "save"),
                ("company", "Acme Coatings"),
                ("mobile", "9876543210"),
                ("gst_no", "27AAACR5055K1Z5"),
            ]),
        )
        .expect_err("Duplicate customer accepted");

        assert_eq!(
            err.messages(),
            &[DUPLICATE_GST.to_string(), DUPLICATE_MOBILE.to_string()]
        );

        let customers = customer_screen(factory.get_master_store(), None, 0, 10)
            .expect("Unable to load screen");
        assert_eq!(customers.data.len(), 1);
        assert_eq!(customers.data[0].gst_no, Some("27AAACR5055K1Z5".to_string()));
    }

    #[test]
    fn test_product_detail_delete_returns_to_product() {
        let factory = in_memory_store_factory();

        submit_product(
            factory.get_master_store(),
            &form(&[("action", "save"), ("name", "Primer"), ("category", "Paint")]),
        )
        .expect("Unable to save product");
        let product_id = product_screen(factory.get_master_store(), None, 0, 10)
            .expect("Unable to load screen")
            .data[0]
            .id;

        let redirect = submit_product_detail(
            factory.get_master_store(),
            &form(&[
                ("action", "save"),
                ("product_id", &product_id.to_string()),
                ("pack_size", "20"),
                ("rate", "1450.50"),
            ]),
        )
        .expect("Unable to save detail");
        assert_eq!(redirect.location(), product_details_link(product_id));

        let screen =
            product_detail_screen(factory.get_master_store(), Some(product_id), None, 0, 10)
                .expect("Unable to load screen");
        assert_eq!(screen.data.len(), 1);

        let redirect = delete_product_detail(factory.get_master_store(), screen.data[0].id)
            .expect("Unable to delete detail");
        assert_eq!(redirect.location(), product_details_link(product_id));

        match delete_product_detail(factory.get_master_store(), screen.data[0].id) {
            Err(err) => assert_eq!(err.status_code(), 404),
            Ok(redirect) => panic!("Expected 404, got {:?}", redirect),
        }
    }
}
