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
    vehicle (id) {
        id -> Int8,
        number -> Text,
        capacity_qty -> Text,
    }
}

table! {
    dispatch (id) {
        id -> Int8,
        vehicle_id -> Int8,
        remark -> Text,
        created_at -> Timestamp,
    }
}

table! {
    dispatch_item (id) {
        id -> Int8,
        dispatch_id -> Nullable<Int8>,
        order_id -> Int8,
        company_name -> Text,
        location -> Text,
        product -> Text,
        available_qty -> Text,
        qty -> Text,
        ready_at -> Timestamp,
        dispatch_date -> Nullable<Date>,
        bill_no -> Nullable<Text>,
    }
}

joinable!(dispatch -> vehicle (vehicle_id));
joinable!(dispatch_item -> dispatch (dispatch_id));

allow_tables_to_appear_in_same_query!(vehicle, dispatch, dispatch_item);
