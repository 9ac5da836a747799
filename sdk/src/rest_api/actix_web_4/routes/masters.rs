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
    resources::masters::v1,
};

use super::{form_data, redirect_response, screen_response, FormBody};

pub async fn department_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::department_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn edit_department_screen(
    store_state: web::Data<StoreState>,
    id: web::Path<i64>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::department_screen(
        store,
        Some(id.into_inner()),
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_department(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_department(store, None, &form_data(body)))
}

pub async fn submit_department_edit(
    store_state: web::Data<StoreState>,
    id: web::Path<i64>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_department(
        store,
        Some(id.into_inner()),
        &form_data(body),
    ))
}

pub async fn employee_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::employee_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_employee(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_employee(store, &form_data(body)))
}

pub async fn unit_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::unit_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_unit(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_unit(store, &form_data(body)))
}

pub async fn product_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::product_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_product(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_product(store, &form_data(body)))
}

pub async fn product_detail_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::product_detail_screen(
        store,
        selection.product_id,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_product_detail(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_product_detail(store, &form_data(body)))
}

pub async fn delete_product_detail(
    store_state: web::Data<StoreState>,
    id: web::Path<i64>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::delete_product_detail(store, id.into_inner()))
}

pub async fn term_condition_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::term_condition_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_term_condition(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_term_condition(store, &form_data(body)))
}

pub async fn customer_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    let paging = query_paging.into_inner();
    screen_response(v1::customer_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_customer(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_master_store();
    redirect_response(v1::submit_customer(store, &form_data(body)))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::Value;

    use crate::rest_api::actix_web_4::routes::{configure, test_state};

    #[actix_rt::test]
    async fn test_department_post_redirects_and_lists() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/masters/departments/")
            .set_form(&[("name", "Paint Shop")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .and_then(|location| location.to_str().ok()),
            Some("/masters/departments/")
        );

        let req = test::TestRequest::get()
            .uri("/masters/departments/?limit=5")
            .to_request();
        let screen: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(screen["data"][0]["name"], "Paint Shop");
        assert_eq!(screen["paging"]["limit"], 5);
    }

    #[actix_rt::test]
    async fn test_invalid_customer_is_echoed() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/masters/customers/")
            .set_form(&[("company", "Acme Paints"), ("mobile", "12")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 400);
        assert!(body["errors"]["mobile"].is_array());
    }

    #[actix_rt::test]
    async fn test_unknown_department_is_not_found() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/masters/departments/42/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
