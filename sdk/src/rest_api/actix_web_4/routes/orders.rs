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

use actix_web_4::{web, HttpResponse};

use crate::rest_api::{
    actix_web_4::{QueryPaging, QuerySelection, StoreState},
    resources::orders::v1,
};

use super::{form_data, now, redirect_response, screen_response, FormBody};

pub async fn create_order_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    let paging = query_paging.into_inner();
    screen_response(v1::create_order_screen(
        store,
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_order(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    redirect_response(v1::submit_order(store, &form_data(body), now()))
}

pub async fn payments_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    let paging = query_paging.into_inner();
    screen_response(v1::payments_screen(
        store,
        selection.status.as_deref(),
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_payment(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    redirect_response(v1::submit_payment(store, &form_data(body)))
}

pub async fn factory_status_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    let paging = query_paging.into_inner();
    screen_response(v1::factory_status_screen(
        store,
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_factory_status(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    redirect_response(v1::submit_factory_status(store, &form_data(body), now()))
}

pub async fn split_order_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    let paging = query_paging.into_inner();
    screen_response(v1::split_order_screen(
        store,
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_split_order(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_order_store();
    redirect_response(v1::submit_split_order(store, &form_data(body)))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::Value;

    use crate::rest_api::actix_web_4::routes::{configure, test_state};

    const ORDER: [(&str, &str); 10] = [
        ("company", "Acme Paints"),
        ("address", "Plot 4, MIDC"),
        ("city", "Pune"),
        ("sales_person", "R. Kulkarni"),
        ("location", "Hadapsar"),
        ("mobile1", "9876543210"),
        ("mobile2", "9876543211"),
        ("quantity", "10"),
        ("price", "100"),
        ("total_price", "1000"),
    ];

    #[actix_rt::test]
    async fn test_new_order_waits_for_payment() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/operations/create-order/")
            .set_form(&ORDER)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .and_then(|location| location.to_str().ok()),
            Some("/operations/create-order/")
        );

        let req = test::TestRequest::get()
            .uri("/operations/payments/?status=pending")
            .to_request();
        let screen: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(screen["data"][0]["company"], "Acme Paints");

        let req = test::TestRequest::get()
            .uri("/operations/payments/?status=cleared")
            .to_request();
        let screen: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(screen["data"], Value::Array(vec![]));
    }

    #[actix_rt::test]
    async fn test_close_returns_to_dashboard() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/operations/split-order/")
            .set_form(&[("action", "close")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .and_then(|location| location.to_str().ok()),
            Some("/operations/")
        );
    }
}
