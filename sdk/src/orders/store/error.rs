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

use std::error::Error;
use std::fmt;

#[cfg(feature = "diesel")]
use crate::error::diesel_violation_type;
use crate::error::{
    ConstraintViolationError, InternalError, InvalidArgumentError, InvalidStateError,
    ResourceTemporarilyUnavailableError,
};

/// Represents OrderStore errors
#[derive(Debug)]
pub enum OrderStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    InvalidArgumentError(InvalidArgumentError),
    InvalidStateError(InvalidStateError),
    NotFoundError(String),
}

impl Error for OrderStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OrderStoreError::InternalError(err) => Some(err),
            OrderStoreError::ConstraintViolationError(err) => Some(err),
            OrderStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            OrderStoreError::InvalidArgumentError(err) => Some(err),
            OrderStoreError::InvalidStateError(err) => Some(err),
            OrderStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for OrderStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderStoreError::InternalError(err) => err.fmt(f),
            OrderStoreError::ConstraintViolationError(err) => err.fmt(f),
            OrderStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            OrderStoreError::InvalidArgumentError(err) => err.fmt(f),
            OrderStoreError::InvalidStateError(err) => err.fmt(f),
            OrderStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for OrderStoreError {
    fn from(err: InternalError) -> Self {
        OrderStoreError::InternalError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for OrderStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => OrderStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => OrderStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for OrderStoreError {
    fn from(err: diesel::r2d2::PoolError) -> OrderStoreError {
        OrderStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
