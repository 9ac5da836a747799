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

pub mod dashboard;
#[cfg(feature = "dispatch")]
pub mod dispatch;
pub mod error;
pub mod form;
#[cfg(feature = "formulation")]
pub mod formulation;
#[cfg(feature = "inventory")]
pub mod inventory;
#[cfg(feature = "masters")]
pub mod masters;
#[cfg(feature = "orders")]
pub mod orders;
pub mod paging;
#[cfg(feature = "production")]
pub mod production;
