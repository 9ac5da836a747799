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
    master_product (id) {
        id -> Int8,
        name -> Text,
        code -> Text,
        product_type -> Text,
        selling_price -> Text,
        purchase_price -> Text,
    }
}

table! {
    supplier (id) {
        id -> Int8,
        name -> Text,
        contact -> Text,
    }
}

table! {
    material_inward (id) {
        id -> Int8,
        master_product_id -> Int8,
        supplier_id -> Int8,
        inward_date -> Date,
        bill_no -> Text,
        qty -> Text,
        remark -> Text,
        created_at -> Timestamp,
    }
}

table! {
    material_discard (id) {
        id -> Int8,
        category -> Text,
        master_product_id -> Nullable<Int8>,
        qty -> Text,
        remark -> Text,
        created_at -> Timestamp,
    }
}

table! {
    material_return (id) {
        id -> Int8,
        order_id -> Int8,
        company_name -> Text,
        location -> Text,
        product -> Text,
        dispatched_qty -> Text,
        returned_qty -> Text,
        vehicle -> Text,
        remark -> Text,
        returned_at -> Timestamp,
    }
}

joinable!(material_inward -> master_product (master_product_id));
joinable!(material_inward -> supplier (supplier_id));
joinable!(material_discard -> master_product (master_product_id));

allow_tables_to_appear_in_same_query!(
    master_product,
    supplier,
    material_inward,
    material_discard,
    material_return,
);
