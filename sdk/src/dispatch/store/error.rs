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

/// Represents DispatchStore errors
#[derive(Debug)]
pub enum DispatchStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    InvalidArgumentError(InvalidArgumentError),
    InvalidStateError(InvalidStateError),
    NotFoundError(String),
}

impl Error for DispatchStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DispatchStoreError::InternalError(err) => Some(err),
            DispatchStoreError::ConstraintViolationError(err) => Some(err),
            DispatchStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            DispatchStoreError::InvalidArgumentError(err) => Some(err),
            DispatchStoreError::InvalidStateError(err) => Some(err),
            DispatchStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for DispatchStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DispatchStoreError::InternalError(err) => err.fmt(f),
            DispatchStoreError::ConstraintViolationError(err) => err.fmt(f),
            DispatchStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            DispatchStoreError::InvalidArgumentError(err) => err.fmt(f),
            DispatchStoreError::InvalidStateError(err) => err.fmt(f),
            DispatchStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for DispatchStoreError {
    fn from(err: InternalError) -> Self {
        DispatchStoreError::InternalError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for DispatchStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => DispatchStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => DispatchStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for DispatchStoreError {
    fn from(err: diesel::r2d2::PoolError) -> DispatchStoreError {
        DispatchStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
