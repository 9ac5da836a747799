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

use mfgops_sdk::error::InternalError;

#[derive(Debug)]
pub enum DaemonError {
    LoggingInitializationError(Box<flexi_logger::FlexiLoggerError>),
    ConfigurationError(Box<ConfigurationError>),
    RestApiError(InternalError),
    StartUpError(Box<dyn Error>),
}

impl Error for DaemonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DaemonError::LoggingInitializationError(err) => Some(err),
            DaemonError::ConfigurationError(err) => Some(err),
            DaemonError::RestApiError(err) => Some(err),
            DaemonError::StartUpError(err) => Some(&**err),
        }
    }
}

impl fmt::Display for DaemonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DaemonError::LoggingInitializationError(e) => {
                write!(f, "Logging initialization error: {}", e)
            }
            DaemonError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            DaemonError::RestApiError(e) => write!(f, "Rest API error: {}", e),
            DaemonError::StartUpError(e) => write!(f, "Start-up error: {}", e),
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for DaemonError {
    fn from(err: flexi_logger::FlexiLoggerError) -> DaemonError {
        DaemonError::LoggingInitializationError(Box::new(err))
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigurationError {
    MissingValue(String),
}

impl Error for ConfigurationError {}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigurationError::MissingValue(config_field_name) => {
                write!(f, "Missing configuration for {}", config_field_name)
            }
        }
    }
}

impl From<ConfigurationError> for DaemonError {
    fn from(err: ConfigurationError) -> Self {
        DaemonError::ConfigurationError(Box::new(err))
    }
}

impl From<InternalError> for DaemonError {
    fn from(err: InternalError) -> DaemonError {
        DaemonError::RestApiError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = DaemonError::from(ConfigurationError::MissingValue("bind".to_owned()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing configuration for bind"
        );
        assert!(err.source().is_some());
    }
}
