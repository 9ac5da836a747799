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
    department (id) {
        id -> Int8,
        name -> Text,
        head_id -> Nullable<Int8>,
    }
}

table! {
    employee (id) {
        id -> Int8,
        name -> Text,
        designation -> Nullable<Text>,
        department_id -> Nullable<Int8>,
        mobile -> Nullable<Text>,
    }
}

table! {
    unit (id) {
        id -> Int8,
        name -> Text,
        symbol -> Nullable<Text>,
    }
}

table! {
    product (id) {
        id -> Int8,
        name -> Text,
        category -> Text,
        unit_id -> Nullable<Int8>,
    }
}

table! {
    product_detail (id) {
        id -> Int8,
        product_id -> Int8,
        pack_size -> Text,
        unit_id -> Nullable<Int8>,
        rate -> Text,
    }
}

table! {
    term_condition (id) {
        id -> Int8,
        title -> Text,
        description -> Text,
    }
}

table! {
    customer (id) {
        id -> Int8,
        company -> Text,
        contact_person -> Nullable<Text>,
        address -> Nullable<Text>,
        city -> Nullable<Text>,
        mobile -> Text,
        gst_no -> Nullable<Text>,
        email -> Nullable<Text>,
    }
}
