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
    actix_web_4::{QueryPaging, StoreState},
    resources::production::v1,
};

use super::{form_data, now, redirect_response, screen_response, FormBody};

pub async fn production_screen(
    store_state: web::Data<StoreState>,
    query: web::Query<v1::ProductionQuery>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let factory = &store_state.store_factory;
    let paging = query_paging.into_inner();
    screen_response(v1::production_screen(
        factory.get_production_store(),
        factory.get_formulation_store(),
        factory.get_inventory_store(),
        &query,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_batch(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_production_store();
    redirect_response(v1::submit_batch(store, &form_data(body), now()))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::data_validation::MISSING_CATEGORY;
    use crate::rest_api::actix_web_4::routes::{configure, test_state};

    #[actix_rt::test]
    async fn test_batch_without_category_is_flashed() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/operations/bom-production/")
            .set_form(&[
                ("supervisor", "S. Patil"),
                ("labour", "4"),
                ("base_qty", "100"),
                ("production_qty", "200"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["messages"]
            .as_array()
            .map(|messages| messages.iter().any(|message| message == MISSING_CATEGORY))
            .unwrap_or(false));
    }

    #[actix_rt::test]
    async fn test_status_filter_is_accepted() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/operations/bom-production/?status=active")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
