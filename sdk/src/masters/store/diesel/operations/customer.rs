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

use super::MasterStoreOperations;
use crate::masters::store::diesel::{
    models::{CustomerModel, NewCustomerModel},
    schema::customer,
};
use crate::masters::store::{Customer, CustomerList, MasterStoreError};
use crate::paging::Paging;
use crate::store::LastInsertId;

use diesel::prelude::*;

pub(in crate::masters::store::diesel) trait MasterStoreCustomerOperations {
    fn add_customer(&self, model: NewCustomerModel) -> Result<i64, MasterStoreError>;
    fn update_customer(&self, id: i64, model: NewCustomerModel) -> Result<(), MasterStoreError>;
    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError>;
    fn fetch_customer_by_gst_no(&self, gst_no: &str) -> Result<Option<Customer>, MasterStoreError>;
    fn fetch_customer_by_mobile(&self, mobile: &str) -> Result<Option<Customer>, MasterStoreError>;
    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError>;
    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MasterStoreCustomerOperations for MasterStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_customer(&self, model: NewCustomerModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(customer::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_customer(&self, id: i64, model: NewCustomerModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(customer::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find customer with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::id.eq(id))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn fetch_customer_by_gst_no(&self, gst_no: &str) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::gst_no.eq(gst_no))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn fetch_customer_by_mobile(&self, mobile: &str) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::mobile.eq(mobile))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = customer::table
                .order(customer::company.asc())
                .offset(offset)
                .limit(limit)
                .load::<CustomerModel>(self.conn)?;

            let total = customer::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Customer::from).collect();

            Ok(CustomerList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(customer::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find customer with id: {}",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MasterStoreCustomerOperations
    for MasterStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_customer(&self, model: NewCustomerModel) -> Result<i64, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            diesel::insert_into(customer::table)
                .values(&model)
                .execute(self.conn)?;

            Ok(self.conn.last_insert_id()?)
        })
    }

    fn update_customer(&self, id: i64, model: NewCustomerModel) -> Result<(), MasterStoreError> {
        let updated = diesel::update(customer::table.find(id))
            .set(&model)
            .execute(self.conn)?;

        if updated == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find customer with id: {}",
                id
            )));
        }

        Ok(())
    }

    fn fetch_customer(&self, id: i64) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::id.eq(id))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn fetch_customer_by_gst_no(&self, gst_no: &str) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::gst_no.eq(gst_no))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn fetch_customer_by_mobile(&self, mobile: &str) -> Result<Option<Customer>, MasterStoreError> {
        let model = customer::table
            .filter(customer::mobile.eq(mobile))
            .first::<CustomerModel>(self.conn)
            .map(Some)
            .or_else(|err| {
                if err == diesel::result::Error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })?;

        Ok(model.map(Customer::from))
    }

    fn list_customers(&self, offset: i64, limit: i64) -> Result<CustomerList, MasterStoreError> {
        self.conn.transaction::<_, MasterStoreError, _>(|| {
            let models = customer::table
                .order(customer::company.asc())
                .offset(offset)
                .limit(limit)
                .load::<CustomerModel>(self.conn)?;

            let total = customer::table.count().get_result(self.conn)?;

            let data = models.into_iter().map(Customer::from).collect();

            Ok(CustomerList::new(data, Paging::new(offset, limit, total)))
        })
    }

    fn delete_customer(&self, id: i64) -> Result<(), MasterStoreError> {
        let deleted = diesel::delete(customer::table.find(id)).execute(self.conn)?;

        if deleted == 0 {
            return Err(MasterStoreError::NotFoundError(format!(
                "Could not find customer with id: {}",
                id
            )));
        }

        Ok(())
    }
}
