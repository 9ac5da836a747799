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
    resources::formulation::v1,
};

use super::{form_data, now, redirect_response, screen_response, FormBody};

pub async fn bom_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let factory = &store_state.store_factory;
    let paging = query_paging.into_inner();
    screen_response(v1::bom_screen(
        factory.get_formulation_store(),
        factory.get_inventory_store(),
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_bom(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let factory = &store_state.store_factory;
    redirect_response(v1::submit_bom(
        factory.get_formulation_store(),
        factory.get_inventory_store(),
        &form_data(body),
    ))
}

pub async fn development_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_formulation_store();
    let paging = query_paging.into_inner();
    screen_response(v1::development_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_development(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_formulation_store();
    redirect_response(v1::submit_development(store, &form_data(body), now()))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::rest_api::actix_web_4::routes::{configure, test_state};

    #[actix_rt::test]
    async fn test_bom_without_materials_is_rejected() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/masters/product-bom/")
            .set_form(&[("product_id", ""), ("base_qty", "100")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["errors"]["product_id"].is_array());
        assert_eq!(body["form"]["base_qty"], "100");
    }

    #[actix_rt::test]
    async fn test_development_screen_lists_nothing_on_empty_store() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/masters/product-development/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let screen: Value = test::read_body_json(resp).await;
        assert_eq!(screen["data"], Value::Array(vec![]));
    }
}
