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
use std::error;
use std::fmt;

use crate::data_validation::DataValidationError;

/// Generic error designed with the expectation that it may be converted into an HTTP response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// A corresponding HTTP status code for the error
    status_code: u16,

    /// The message that would be returned in an HTTP response
    message: String,

    /// Problems with individual form fields, keyed by field name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<String, Vec<String>>,

    /// Flash messages to show above the redisplayed form
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,

    /// The submitted values, so the screen can be redisplayed as entered
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<BTreeMap<String, String>>,

    /// Wrapped error that is not exposed in the HTTP response
    #[serde(skip_serializing)]
    source: Option<Box<dyn error::Error>>,
}

impl ErrorResponse {
    /// Create a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status_code` - Corresponding HTTP status code
    /// * `message` - External message to display to the user
    ///
    /// # Examples
    /// ```
    /// use mfgops_sdk::rest_api::resources::error::ErrorResponse;
    ///
    /// let response = ErrorResponse::new(404, "The requested batch was not found");
    ///
    /// assert_eq!(404, response.status_code());
    /// assert_eq!("The requested batch was not found", response.message());
    /// ```
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            errors: BTreeMap::new(),
            messages: vec![],
            form: None,
            source: None,
        }
    }

    /// Create a new ErrorResponse that does not expose the underlying error
    ///
    /// # Arguments
    ///
    /// * `source` - Underlying internal error
    ///
    /// # Examples
    /// ```
    /// use mfgops_sdk::rest_api::resources::error::ErrorResponse;
    ///
    /// // Mock an internal error
    /// let error = "NaN".parse::<u32>().unwrap_err();
    ///
    /// let response = ErrorResponse::internal_error(Box::new(error));
    ///
    /// assert_eq!(500, response.status_code());
    /// assert_eq!("An internal error occurred", response.message());
    /// ```
    pub fn internal_error(source: Box<dyn error::Error>) -> Self {
        error!("{}", source);
        Self {
            status_code: 500,
            message: "An internal error occurred".to_string(),
            errors: BTreeMap::new(),
            messages: vec![],
            form: None,
            source: Some(source),
        }
    }

    /// Create a `400 Bad Request` carrying the field errors and flash messages of a rejected
    /// form, along with the values that were submitted.
    pub fn invalid_form(errors: DataValidationError, form: BTreeMap<String, String>) -> Self {
        Self {
            status_code: 400,
            message: "The submitted form is invalid".to_string(),
            errors: errors.errors().clone(),
            messages: errors.messages().to_vec(),
            form: Some(form),
            source: None,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl error::Error for ErrorResponse {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref src) = self.source {
            write!(f, "{}", src)
        } else {
            write!(
                f,
                "Status Code {}: Message {}",
                self.status_code, self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use serde_json::Result;

    // Deny any unknown fields so we can test for data leaks
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Response {
        status_code: u16,
        message: String,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct FormResponse {
        status_code: u16,
        message: String,
        errors: BTreeMap<String, Vec<String>>,
        messages: Vec<String>,
        form: BTreeMap<String, String>,
    }

    #[test]
    fn test_error_response_internal_error_display() {
        let error = "NaN".parse::<u32>().unwrap_err();
        let response = ErrorResponse::internal_error(Box::new(error));
        assert_eq!(response.to_string(), "invalid digit found in string");
    }

    #[test]
    fn test_error_response_new_display() {
        let response = ErrorResponse::new(404, "Vehicle 3 not found");
        assert_eq!(
            response.to_string(),
            "Status Code 404: Message Vehicle 3 not found"
        );
    }

    #[test]
    fn test_error_response_internal_error_json_serialization() -> Result<()> {
        let err = "NaN".parse::<u32>().unwrap_err();
        let response = ErrorResponse::internal_error(Box::new(err));
        let json = serde_json::to_string(&response)?;
        let deserialized: Response = serde_json::from_str(&json)?;

        assert_eq!(deserialized.status_code, 500);
        assert_eq!(deserialized.message, "An internal error occurred");

        Ok(())
    }

    #[test]
    fn test_invalid_form_json_serialization() -> Result<()> {
        let mut errors = DataValidationError::with_field_error("name", "This field is required.");
        errors.add_message("Please select a category.");

        let mut form = BTreeMap::new();
        form.insert("name".to_string(), "".to_string());
        form.insert("action".to_string(), "save".to_string());

        let response = ErrorResponse::invalid_form(errors, form);
        let json = serde_json::to_string(&response)?;
        let deserialized: FormResponse = serde_json::from_str(&json)?;

        assert_eq!(deserialized.status_code, 400);
        assert_eq!(
            deserialized.errors.get("name"),
            Some(&vec!["This field is required.".to_string()])
        );
        assert_eq!(deserialized.messages, vec!["Please select a category.".to_string()]);
        assert_eq!(deserialized.form.get("action").map(String::as_str), Some("save"));

        Ok(())
    }
}
