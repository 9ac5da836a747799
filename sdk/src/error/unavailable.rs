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

/// Returned when a database connection could not be checked out of the pool.
///
/// Callers may retry; the REST layer answers with `503 Service Unavailable`.
#[derive(Debug)]
pub struct ResourceTemporarilyUnavailableError {
    source: Box<dyn error::Error>,
}

impl ResourceTemporarilyUnavailableError {
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self { source }
    }
}

impl error::Error for ResourceTemporarilyUnavailableError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl fmt::Display for ResourceTemporarilyUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::InternalError;

    use super::*;

    #[test]
    fn test_display_from_source() {
        let err = ResourceTemporarilyUnavailableError::from_source(Box::new(
            InternalError::with_message("timed out waiting for connection".to_string()),
        ));
        assert_eq!(err.to_string(), "timed out waiting for connection");
    }
}
