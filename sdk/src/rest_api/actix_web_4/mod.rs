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

pub mod routes;
mod run;
mod service;

use std::sync::Arc;

use crate::store::StoreFactory;

pub use run::run;
pub use service::{QueryPaging, QuerySelection};

/// Shared application state handed to every route.
#[derive(Clone)]
pub struct StoreState {
    pub store_factory: Arc<dyn StoreFactory>,
}

impl StoreState {
    pub fn new(store_factory: Box<dyn StoreFactory>) -> Self {
        Self {
            store_factory: Arc::from(store_factory),
        }
    }
}
