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
    resources::dispatch::v1,
};

use super::{form_data, now, redirect_response, screen_response, FormBody};

pub async fn vehicle_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_dispatch_store();
    let paging = query_paging.into_inner();
    screen_response(v1::vehicle_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
    ))
}

pub async fn submit_vehicle(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_dispatch_store();
    redirect_response(v1::submit_vehicle(store, &form_data(body)))
}

pub async fn dispatch_screen(
    store_state: web::Data<StoreState>,
    selection: web::Query<QuerySelection>,
    query_paging: web::Query<QueryPaging>,
) -> HttpResponse {
    let store = store_state.store_factory.get_dispatch_store();
    let paging = query_paging.into_inner();
    screen_response(v1::dispatch_screen(
        store,
        selection.id,
        paging.offset(),
        paging.limit(),
        now(),
    ))
}

pub async fn submit_dispatch(store_state: web::Data<StoreState>, body: FormBody) -> HttpResponse {
    let store = store_state.store_factory.get_dispatch_store();
    redirect_response(v1::submit_dispatch(store, &form_data(body), now()))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::rest_api::actix_web_4::routes::{configure, test_state};
    use crate::rest_api::resources::dispatch::v1::DUPLICATE_VEHICLE;

    #[actix_rt::test]
    async fn test_duplicate_vehicle_number() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        for expected in &[StatusCode::SEE_OTHER, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/operations/vehicles/")
                .set_form(&[("number", "mh12ab1234"), ("capacity_qty", "20")])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(&resp.status(), expected);

            if resp.status() == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["errors"]["number"][0], DUPLICATE_VEHICLE);
            }
        }

        let req = test::TestRequest::get()
            .uri("/operations/vehicles/")
            .to_request();
        let screen: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(screen["data"][0]["number"], "MH12AB1234");
    }
}
