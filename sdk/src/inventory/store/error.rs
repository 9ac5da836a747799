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
    ConstraintViolationError, InternalError, InvalidArgumentError,
    ResourceTemporarilyUnavailableError,
};

/// Represents InventoryStore errors
#[derive(Debug)]
pub enum InventoryStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    InvalidArgumentError(InvalidArgumentError),
    NotFoundError(String),
}

impl Error for InventoryStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InventoryStoreError::InternalError(err) => Some(err),
            InventoryStoreError::ConstraintViolationError(err) => Some(err),
            InventoryStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            InventoryStoreError::InvalidArgumentError(err) => Some(err),
            InventoryStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for InventoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InventoryStoreError::InternalError(err) => err.fmt(f),
            InventoryStoreError::ConstraintViolationError(err) => err.fmt(f),
            InventoryStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            InventoryStoreError::InvalidArgumentError(err) => err.fmt(f),
            InventoryStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for InventoryStoreError {
    fn from(err: InternalError) -> Self {
        InventoryStoreError::InternalError(err)
    }
}

impl From<InvalidArgumentError> for InventoryStoreError {
    fn from(err: InvalidArgumentError) -> Self {
        InventoryStoreError::InvalidArgumentError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for InventoryStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => InventoryStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => InventoryStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for InventoryStoreError {
    fn from(err: diesel::r2d2::PoolError) -> InventoryStoreError {
        InventoryStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
