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

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod config;
mod error;

use flexi_logger::{LogSpecBuilder, Logger};
use mfgops_sdk::rest_api::actix_web_4::{run as run_rest_api, StoreState};
use mfgops_sdk::store::{create_store_factory, ConnectionUri};

use crate::config::MfgConfigBuilder;
use crate::error::DaemonError;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn run() -> Result<(), DaemonError> {
    let matches = clap_app!(myapp =>
        (name: APP_NAME)
        (version: VERSION)
        (author: "Cargill Incorporated")
        (about: "Manufacturing operations daemon")
        (@arg verbose: -v +multiple "Log verbosely")
        (@arg database_url: --("database-url") +takes_value
         "specifies the database URL to connect to; postgres:// URLs select PostgreSQL")
        (@arg bind: -b --bind +takes_value "connection endpoint for rest API"))
    .get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut log_spec_builder = LogSpecBuilder::new();
    log_spec_builder.default(log_level);
    log_spec_builder.module("actix_server", log::LevelFilter::Warn);
    log_spec_builder.module("mio", log::LevelFilter::Warn);

    Logger::with(log_spec_builder.build()).start()?;

    let config = MfgConfigBuilder::default()
        .with_cli_args(&matches)
        .build()?;

    let connection_uri: ConnectionUri = config
        .database_url()
        .parse()
        .map_err(|err| DaemonError::StartUpError(Box::new(err)))?;
    let store_factory = create_store_factory(&connection_uri)
        .map_err(|err| DaemonError::StartUpError(Box::new(err)))?;
    info!("Connected to {}", connection_uri);

    actix_rt::System::new()
        .block_on(run_rest_api(
            config.rest_api_endpoint(),
            StoreState::new(store_factory),
        ))
        .map_err(DaemonError::from)
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
