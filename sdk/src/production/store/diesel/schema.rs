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
    batch (id) {
        id -> Int8,
        supervisor -> Text,
        labour -> Text,
        category -> Text,
        base_qty -> Text,
        production_qty -> Text,
        remark -> Text,
        started_at -> Timestamp,
        ended_at -> Nullable<Timestamp>,
        status -> Text,
    }
}

table! {
    batch_item (id) {
        id -> Int8,
        batch_id -> Int8,
        product -> Text,
        qty -> Text,
    }
}

joinable!(batch_item -> batch (batch_id));

allow_tables_to_appear_in_same_query!(batch, batch_item);
