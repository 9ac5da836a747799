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
use crate::error::{ConstraintViolationError, InternalError, ResourceTemporarilyUnavailableError};

/// Represents MasterStore errors
#[derive(Debug)]
pub enum MasterStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    NotFoundError(String),
}

impl Error for MasterStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MasterStoreError::InternalError(err) => Some(err),
            MasterStoreError::ConstraintViolationError(err) => Some(err),
            MasterStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            MasterStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for MasterStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MasterStoreError::InternalError(err) => err.fmt(f),
            MasterStoreError::ConstraintViolationError(err) => err.fmt(f),
            MasterStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            MasterStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

impl From<InternalError> for MasterStoreError {
    fn from(err: InternalError) -> Self {
        MasterStoreError::InternalError(err)
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for MasterStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match diesel_violation_type(&err) {
            Some(violation_type) => MasterStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    violation_type,
                    Box::new(err),
                ),
            ),
            None => MasterStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for MasterStoreError {
    fn from(err: diesel::r2d2::PoolError) -> MasterStoreError {
        MasterStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
