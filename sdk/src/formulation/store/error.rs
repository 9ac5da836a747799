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

/// Represents FormulationStore errors
#[derive(Debug)]
pub enum FormulationStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    InvalidArgumentError(InvalidArgumentError),
    NotFoundError(String),
}

impl Error for FormulationStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FormulationStoreError::InternalError(err) => Some(err),
            FormulationStoreError::ConstraintViolationError(err) => Some(err),
            FormulationStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            FormulationStoreError::InvalidArgumentError(err) => Some(err),
            FormulationStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for FormulationStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormulationStoreError::InternalError(err) => err.fmt(f),
            FormulationStoreError::ConstraintViolationError(err) => err.fmt(f),
            FormulationStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            FormulationStoreError::InvalidArgumentError(err) => err.fmt(f),
            FormulationStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for FormulationStoreError {
    fn from(err: InternalError) -> Self {
        FormulationStoreError::InternalError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for FormulationStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => FormulationStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => FormulationStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for FormulationStoreError {
    fn from(err: diesel::r2d2::PoolError) -> FormulationStoreError {
        FormulationStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}

/// Represents errors raised while building a `ProductBom`
#[derive(Debug)]
pub enum ProductBomBuilderError {
    MissingRequiredField(String),
    InvalidField(String, String),
}

impl Error for ProductBomBuilderError {}

impl fmt::Display for ProductBomBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProductBomBuilderError::MissingRequiredField(ref s) => {
                write!(f, "Missing required field: {}", s)
            }
            ProductBomBuilderError::InvalidField(ref field, ref reason) => {
                write!(f, "Invalid field {}: {}", field, reason)
            }
        }
    }
}
