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

use crate::error::ConfigurationError;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "mfgops.db";

pub struct MfgConfig {
    rest_api_endpoint: String,
    database_url: String,
}

impl MfgConfig {
    pub fn rest_api_endpoint(&self) -> &str {
        &self.rest_api_endpoint
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

pub struct MfgConfigBuilder {
    rest_api_endpoint: Option<String>,
    database_url: Option<String>,
}

impl Default for MfgConfigBuilder {
    fn default() -> Self {
        Self {
            rest_api_endpoint: Some(DEFAULT_BIND.to_owned()),
            database_url: Some(DEFAULT_DATABASE_URL.to_owned()),
        }
    }
}

impl MfgConfigBuilder {
    pub fn with_cli_args(&mut self, matches: &clap::ArgMatches<'_>) -> Self {
        Self {
            rest_api_endpoint: matches
                .value_of("bind")
                .map(ToOwned::to_owned)
                .or_else(|| self.rest_api_endpoint.take()),
            database_url: matches
                .value_of("database_url")
                .map(ToOwned::to_owned)
                .or_else(|| self.database_url.take()),
        }
    }

    pub fn build(mut self) -> Result<MfgConfig, ConfigurationError> {
        Ok(MfgConfig {
            rest_api_endpoint: self
                .rest_api_endpoint
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("bind".to_owned()))?,
            database_url: self
                .database_url
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("database_url".to_owned()))?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_app() -> clap::App<'static, 'static> {
        clap::App::new("testapp")
            .arg(clap::Arg::with_name("bind").short("b").takes_value(true))
            .arg(
                clap::Arg::with_name("database_url")
                    .long("database-url")
                    .takes_value(true),
            )
    }

    #[test]
    fn build_with_args() {
        let matches = test_app().get_matches_from(vec![
            "testapp",
            "-b",
            "0.0.0.0:9000",
            "--database-url",
            "postgres://mfg:secret@db/mfgops",
        ]);

        let config = MfgConfigBuilder::default()
            .with_cli_args(&matches)
            .build()
            .expect("Unable to build configuration");

        assert_eq!("0.0.0.0:9000", config.rest_api_endpoint());
        assert_eq!("postgres://mfg:secret@db/mfgops", config.database_url());
    }

    #[test]
    fn build_with_missing_args() {
        let matches = test_app().get_matches_from(vec!["testapp"]);

        let config = MfgConfigBuilder::default()
            .with_cli_args(&matches)
            .build()
            .expect("Unable to build configuration");

        assert_eq!("127.0.0.1:8080", config.rest_api_endpoint());
        assert_eq!("mfgops.db", config.database_url());
    }

    #[test]
    fn build_without_defaults() {
        let matches = test_app().get_matches_from(vec!["testapp"]);

        let result = MfgConfigBuilder {
            rest_api_endpoint: None,
            database_url: Some(DEFAULT_DATABASE_URL.to_owned()),
        }
        .with_cli_args(&matches)
        .build();

        assert_eq!(
            result.err(),
            Some(ConfigurationError::MissingValue("bind".to_owned()))
        );
    }
}
