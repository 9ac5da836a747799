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

/// Returned when a value handed to an operation is unusable, e.g. a split quantity larger than
/// the order it splits.
#[derive(Debug)]
pub struct InvalidArgumentError {
    argument: String,
    message: String,
}

impl InvalidArgumentError {
    /// `argument` names the offending field; `message` says what is wrong with it and should not
    /// repeat the field name.
    ///
    /// # Examples
    ///
    /// ```
    /// use mfgops_sdk::error::InvalidArgumentError;
    ///
    /// let err =
    ///     InvalidArgumentError::new("split_qty".to_string(), "must be positive".to_string());
    /// assert_eq!(format!("{}", err), "must be positive (split_qty)");
    /// ```
    pub fn new(argument: String, message: String) -> Self {
        Self { argument, message }
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for InvalidArgumentError {}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", &self.message, &self.argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_accessors() {
        let err = InvalidArgumentError::new("qty".to_string(), "cannot be negative".to_string());
        assert_eq!(err.to_string(), "cannot be negative (qty)");
        assert_eq!(err.argument(), "qty");
        assert_eq!(err.message(), "cannot be negative");
    }
}
