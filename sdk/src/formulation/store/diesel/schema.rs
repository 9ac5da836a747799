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

table! {
    product_bom (id) {
        id -> Int8,
        product_id -> Int8,
        base_qty -> Text,
        remark -> Text,
        created_at -> Timestamp,
    }
}

table! {
    product_bom_item (id) {
        id -> Int8,
        bom_id -> Int8,
        material_id -> Int8,
        percent -> Text,
        qty -> Text,
    }
}

table! {
    product_development (id) {
        id -> Int8,
        product_name -> Text,
        selling_price -> Text,
        remark -> Text,
        created_at -> Timestamp,
    }
}

table! {
    product_development_item (id) {
        id -> Int8,
        development_id -> Int8,
        material -> Text,
        percent -> Text,
        rate -> Text,
        density -> Text,
        solids -> Text,
    }
}

joinable!(product_bom_item -> product_bom (bom_id));
joinable!(product_development_item -> product_development (development_id));

allow_tables_to_appear_in_same_query!(
    product_bom,
    product_bom_item,
    product_development,
    product_development_item,
);
