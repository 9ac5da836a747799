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
    resources::inventory::v1,
};

use super::{form_data, now, redirect_response, screen_response, FormBody};

pub async fn master_product_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::master_product_screen(
        store,
        selection.product_type.as_deref(),
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_master_product(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_master_product(store, &form_data(body)))
}

pub async fn update_products_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::update_products_screen(
        store,
        selection.product_type.as_deref(),
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_price_updates(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_price_updates(store, &form_data(body)))
}

pub async fn supplier_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::supplier_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_supplier(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_supplier(store, &form_data(body)))
}

pub async fn material_inward_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::material_inward_screen(
        store,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_material_inward(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_material_inward(store, &form_data(body), now()))
}

pub async fn material_discard_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::material_discard_screen(
        store,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_material_discard(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_material_discard(store, &form_data(body), now()))
}

pub async fn material_return_screen(
    store_state: web::Data<StoreState>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    let paging = query_paging.into_inner();
    screen_response(v1::material_return_screen(
        store,
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_material_return(
    store_state: web::Data<StoreState>,
    body: FormBody,
) -> HttpResponse {
    let store = store_state.store_factory.get_inventory_store();
    redirect_response(v1::submit_material_return(store, &form_data(body), now()))
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
    async fn test_master_products_filtered_by_type() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        for (name, product_type) in &[("Gloss Enamel", "FG"), ("Alkyd Resin", "RM")] {
            let req = test::TestRequest::post()
                .uri("/operations/master-products/")
                .set_form(&[("name", *name), ("product_type", *product_type)])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }

        let req = test::TestRequest::get()
            .uri("/operations/master-products/?product_type=RM")
            .to_request();
        let screen: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(screen["product_type"], "RM");
        assert_eq!(screen["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(screen["data"][0]["name"], "Alkyd Resin");
    }

    #[actix_rt::test]
    async fn test_empty_price_update_is_flashed() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/operations/update-products/")
            .set_form(&[("action", "save")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["messages"][0], "There are no products to update.");
    }

    #[actix_rt::test]
    async fn test_new_discard_form() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/operations/material-discard/")
            .set_form(&[("action", "new")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .and_then(|location| location.to_str().ok()),
            Some("/operations/material-discard/")
        );
    }
}
