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

use actix_web_4::HttpResponse;

use crate::rest_api::resources::dashboard::v1;

pub async fn masters_dashboard() -> HttpResponse {
    HttpResponse::Ok().json(v1::master_dashboard())
}

pub async fn operations_dashboard() -> HttpResponse {
    HttpResponse::Ok().json(v1::operation_dashboard())
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use actix_web_4::{http::StatusCode, test, App};

    use crate::rest_api::actix_web_4::routes::{configure, test_state};
    use crate::rest_api::resources::dashboard::v1::DashboardSlice;

    #[actix_rt::test]
    async fn test_operations_dashboard() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/operations/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let dashboard: DashboardSlice = test::read_body_json(resp).await;
        assert!(dashboard
            .row1
            .iter()
            .any(|tile| tile.url == "/operations/create-order/"));
    }
}
