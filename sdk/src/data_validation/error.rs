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

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Everything wrong with a submitted form.
///
/// Field errors are keyed by the form field name and are reported next to the field; messages
/// are shown above the form, e.g. "Customer with this GST number already exists.".
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DataValidationError {
    errors: BTreeMap<String, Vec<String>>,
    messages: Vec<String>,
}

impl DataValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error holding a single message that is not tied to a field.
    pub fn with_message(message: &str) -> Self {
        Self {
            errors: BTreeMap::new(),
            messages: vec![message.to_string()],
        }
    }

    /// Creates an error holding a single field error.
    pub fn with_field_error(field: &str, message: &str) -> Self {
        let mut err = Self::default();
        err.add_field_error(field, message);
        err
    }

    pub fn add_field_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(Vec::new)
            .push(message.to_string());
    }

    pub fn add_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    /// Moves the field errors and messages of `other` into this error.
    pub fn merge(&mut self, other: DataValidationError) {
        for (field, messages) in other.errors {
            self.errors
                .entry(field)
                .or_insert_with(Vec::new)
                .extend(messages);
        }
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.messages.is_empty()
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, DataValidationError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Error for DataValidationError {}

impl fmt::Display for DataValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts: Vec<String> = self.messages.clone();
        for (field, messages) in &self.errors {
            for message in messages {
                parts.push(format!("{}: {}", field, message));
            }
        }
        if parts.is_empty() {
            f.write_str("Invalid form")
        } else {
            f.write_str(&parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_messages_before_fields() {
        let mut err = DataValidationError::with_message("Please select a category.");
        err.add_field_error("name", "This field is required.");
        assert_eq!(
            err.to_string(),
            "Please select a category.; name: This field is required."
        );
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut err = DataValidationError::new();
        assert_eq!(DataValidationError::new().into_result(3), Ok(3));

        err.merge(DataValidationError::with_field_error("qty", "Enter a number."));
        err.merge(DataValidationError::with_field_error("qty", "Qty cannot be negative."));
        assert_eq!(err.field_errors("qty").len(), 2);
        assert!(err.field_errors("rate").is_empty());
        assert!(err.into_result(()).is_err());
    }
}
