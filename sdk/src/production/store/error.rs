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

/// Represents ProductionStore errors
#[derive(Debug)]
pub enum ProductionStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    InvalidArgumentError(InvalidArgumentError),
    InvalidStateError(InvalidStateError),
    NotFoundError(String),
}

impl Error for ProductionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProductionStoreError::InternalError(err) => Some(err),
            ProductionStoreError::ConstraintViolationError(err) => Some(err),
            ProductionStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            ProductionStoreError::InvalidArgumentError(err) => Some(err),
            ProductionStoreError::InvalidStateError(err) => Some(err),
            ProductionStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for ProductionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProductionStoreError::InternalError(err) => err.fmt(f),
            ProductionStoreError::ConstraintViolationError(err) => err.fmt(f),
            ProductionStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            ProductionStoreError::InvalidArgumentError(err) => err.fmt(f),
            ProductionStoreError::InvalidStateError(err) => err.fmt(f),
            ProductionStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for ProductionStoreError {
    fn from(err: InternalError) -> Self {
        ProductionStoreError::InternalError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for ProductionStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => ProductionStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => ProductionStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for ProductionStoreError {
    fn from(err: diesel::r2d2::PoolError) -> ProductionStoreError {
        ProductionStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
