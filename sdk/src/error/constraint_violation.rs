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

use std::error;
use std::fmt;

/// The kind of database constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintViolationType {
    Unique,
    ForeignKey,
    NotNull,
    Other,
}

impl fmt::Display for ConstraintViolationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintViolationType::Unique => f.write_str("Unique"),
            ConstraintViolationType::ForeignKey => f.write_str("ForeignKey"),
            ConstraintViolationType::NotNull => f.write_str("NotNull"),
            ConstraintViolationType::Other => f.write_str("Other"),
        }
    }
}

/// Returned when a write would break a uniqueness or referential rule, for example adding a
/// second vehicle with the same number or deleting a supplier that still has inward entries.
#[derive(Debug)]
pub struct ConstraintViolationError {
    violation_type: ConstraintViolationType,
    message: Option<String>,
    source: Option<Box<dyn error::Error>>,
}

impl ConstraintViolationError {
    /// # Examples
    ///
    /// ```
    /// use mfgops_sdk::error::{ConstraintViolationError, ConstraintViolationType};
    ///
    /// let err = ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique);
    /// assert_eq!(format!("{}", err), "Unique constraint violated");
    /// ```
    pub fn with_violation_type(violation_type: ConstraintViolationType) -> Self {
        Self {
            violation_type,
            message: None,
            source: None,
        }
    }

    /// Creates an error with a user-facing message.
    ///
    /// # Examples
    ///
    /// ```
    /// use mfgops_sdk::error::{ConstraintViolationError, ConstraintViolationType};
    ///
    /// let err = ConstraintViolationError::with_message(
    ///     ConstraintViolationType::Unique,
    ///     "Vehicle with this number already exists.".to_string(),
    /// );
    /// assert_eq!(format!("{}", err), "Vehicle with this number already exists.");
    /// ```
    pub fn with_message(violation_type: ConstraintViolationType, message: String) -> Self {
        Self {
            violation_type,
            message: Some(message),
            source: None,
        }
    }

    pub fn from_source_with_violation_type(
        violation_type: ConstraintViolationType,
        source: Box<dyn error::Error>,
    ) -> Self {
        Self {
            violation_type,
            message: None,
            source: Some(source),
        }
    }

    pub fn violation_type(&self) -> &ConstraintViolationType {
        &self.violation_type
    }
}

impl error::Error for ConstraintViolationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref())
    }
}

impl fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "{} constraint violated", self.violation_type),
        }
    }
}

/// Classifies a diesel error as a constraint violation.
///
/// SQLite reports foreign key failures without a specific kind, so those are recognized by
/// their message.
#[cfg(feature = "diesel")]
pub(crate) fn diesel_violation_type(
    err: &diesel::result::Error,
) -> Option<ConstraintViolationType> {
    use diesel::result::{DatabaseErrorKind, Error};

    match err {
        Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(ConstraintViolationType::Unique)
        }
        Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Some(ConstraintViolationType::ForeignKey)
        }
        Error::DatabaseError(_, info)
            if info.message().starts_with("FOREIGN KEY constraint failed") =>
        {
            Some(ConstraintViolationType::ForeignKey)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InternalError;

    #[test]
    fn test_display_from_source_hides_source_text() {
        let err = ConstraintViolationError::from_source_with_violation_type(
            ConstraintViolationType::ForeignKey,
            Box::new(InternalError::with_message("FOREIGN KEY constraint failed".into())),
        );
        assert_eq!(err.to_string(), "ForeignKey constraint violated");
        assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey);
    }

    #[cfg(feature = "diesel")]
    #[test]
    fn test_sqlite_foreign_key_message_is_foreign_key() {
        use diesel::result::{DatabaseErrorKind, Error};

        let err = Error::DatabaseError(
            DatabaseErrorKind::UnableToSendCommand,
            Box::new("FOREIGN KEY constraint failed".to_string()),
        );
        assert_eq!(
            diesel_violation_type(&err),
            Some(ConstraintViolationType::ForeignKey)
        );

        let err = Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: vehicles.number".to_string()),
        );
        assert_eq!(diesel_violation_type(&err), Some(ConstraintViolationType::Unique));

        assert_eq!(diesel_violation_type(&Error::NotFound), None);
    }
}
