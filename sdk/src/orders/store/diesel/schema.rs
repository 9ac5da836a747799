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
    sales_order (id) {
        id -> Int8,
        company -> Text,
        address -> Text,
        city -> Text,
        sales_person -> Text,
        location -> Text,
        mobile1 -> Text,
        mobile2 -> Text,
        product_name -> Nullable<Text>,
        quantity -> Nullable<Text>,
        price -> Nullable<Text>,
        discount -> Nullable<Text>,
        discount_amount -> Nullable<Text>,
        total_price -> Nullable<Text>,
        remark -> Nullable<Text>,
        order_created -> Timestamp,
        bill_no -> Nullable<Text>,
        payment_cleared -> Bool,
        on_hold -> Bool,
        factory_accepted -> Bool,
        available_qty -> Text,
        dispatch_date -> Nullable<Date>,
        time_span_text -> Nullable<Text>,
        is_split -> Bool,
        is_cancelled -> Bool,
    }
}

table! {
    factory_order (id) {
        id -> Int8,
        order_id -> Int8,
        company_name -> Text,
        location -> Text,
        sales_person -> Text,
        order_created -> Timestamp,
        delivery_expected_date -> Nullable<Date>,
        remark -> Nullable<Text>,
        factory_accepted -> Bool,
    }
}
