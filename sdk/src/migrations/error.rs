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

#[derive(Debug)]
pub enum MigrationsError {
    MigrationError(Box<dyn Error>),
}

impl Error for MigrationsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MigrationsError::MigrationError(e) => Some(&**e),
        }
    }
}

impl fmt::Display for MigrationsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MigrationsError::MigrationError(e) => write!(f, "Unable to migrate database: {}", e),
        }
    }
}

impl From<diesel_migrations::RunMigrationsError> for MigrationsError {
    fn from(err: diesel_migrations::RunMigrationsError) -> Self {
        MigrationsError::MigrationError(Box::new(err))
    }
}
