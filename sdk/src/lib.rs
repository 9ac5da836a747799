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

//! Building blocks for running a paint and chemical manufacturing plant: master data, order
//! intake through dispatch, production batches and material movements.
//!
//! Each domain module exposes a store trait with a diesel implementation for PostgreSQL and
//! SQLite. The `rest-api` feature adds the form-posting HTTP screens on top of the stores.

#[macro_use]
extern crate serde_derive;
#[macro_use]
#[cfg(feature = "diesel")]
extern crate diesel;
#[macro_use]
#[cfg(feature = "diesel")]
extern crate diesel_migrations;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod data_validation;
#[cfg(feature = "dispatch")]
pub mod dispatch;
pub mod error;
#[cfg(feature = "formulation")]
pub mod formulation;
#[cfg(feature = "inventory")]
pub mod inventory;
#[cfg(feature = "masters")]
pub mod masters;
#[cfg(feature = "diesel")]
pub mod migrations;
#[cfg(feature = "orders")]
pub mod orders;
pub mod paging;
#[cfg(feature = "production")]
pub mod production;
#[cfg(feature = "rest-api")]
pub mod rest_api;
pub mod store;
pub mod timespan;
