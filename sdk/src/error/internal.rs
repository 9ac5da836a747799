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

struct Source {
    prefix: Option<String>,
    source: Box<dyn error::Error>,
}

/// An error raised when something inside the service failed in a way the caller cannot fix.
///
/// The REST layer never exposes the wrapped cause to clients; it is only logged.
pub struct InternalError {
    message: Option<String>,
    source: Option<Source>,
}

impl InternalError {
    /// Wraps a lower-level error; `Display` passes the source's message through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use mfgops_sdk::error::InternalError;
    ///
    /// let parse_err = "x1".parse::<i64>().unwrap_err();
    /// let internal_error = InternalError::from_source(Box::new(parse_err));
    /// assert_eq!(format!("{}", internal_error), "invalid digit found in string");
    /// ```
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Wraps a lower-level error, replacing its message with `message`.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Wraps a lower-level error; `Display` renders as `"{prefix}: {source}"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mfgops_sdk::error::InternalError;
    ///
    /// let parse_err = "x1".parse::<i64>().unwrap_err();
    /// let internal_error = InternalError::from_source_with_prefix(
    ///     Box::new(parse_err),
    ///     "Unable to read batch id".to_string(),
    /// );
    /// assert_eq!(
    ///     format!("{}", internal_error),
    ///     "Unable to read batch id: invalid digit found in string"
    /// );
    /// ```
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: Some(prefix),
                source,
            }),
        }
    }

    /// Creates an error carrying only a message.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.source.as_ref())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(m), _) => write!(f, "{}", m),
            (None, Some(Source { prefix: Some(p), source })) => write!(f, "{}: {}", p, source),
            (None, Some(Source { prefix: None, source })) => write!(f, "{}", source),
            (None, None) => f.write_str("InternalError"),
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("InternalError");
        if let Some(message) = &self.message {
            debug.field("message", message);
        }
        if let Some(source) = &self.source {
            if let Some(prefix) = &source.prefix {
                debug.field("prefix", prefix);
            }
            debug.field("source", &source.source);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_message() {
        let err = InternalError::with_message("pool exhausted".to_string());
        assert_eq!(err.to_string(), "pool exhausted");
    }

    #[test]
    fn test_display_from_source_uses_source_message() {
        let err = InternalError::from_source(Box::new(InternalError::with_message(
            "inner".to_string(),
        )));
        assert_eq!(err.to_string(), "inner");
    }

    #[test]
    fn test_display_message_wins_over_source() {
        let err = InternalError::from_source_with_message(
            Box::new(InternalError::with_message("inner".to_string())),
            "outer".to_string(),
        );
        assert_eq!(err.to_string(), "outer");
    }

    #[test]
    fn test_display_from_source_with_prefix() {
        let err = InternalError::from_source_with_prefix(
            Box::new(InternalError::with_message("inner".to_string())),
            "Loading order".to_string(),
        );
        assert_eq!(err.to_string(), "Loading order: inner");
    }

    #[test]
    fn test_debug_with_prefix() {
        let err = InternalError::from_source_with_prefix(
            Box::new(InternalError::with_message("inner".to_string())),
            "Loading order".to_string(),
        );
        assert_eq!(
            format!("{:?}", err),
            "InternalError { prefix: \"Loading order\", source: InternalError { message: \"inner\" } }"
        );
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let err = InternalError::from_source(Box::new(InternalError::with_message(
            "inner".to_string(),
        )));
        assert!(err.source().is_some());
        assert!(InternalError::with_message("x".into()).source().is_none());
    }
}
