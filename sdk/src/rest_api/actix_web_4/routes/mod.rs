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

mod dashboard;
#[cfg(feature = "dispatch")]
pub(in crate) mod dispatch;
#[cfg(feature = "formulation")]
pub(in crate) mod formulation;
#[cfg(feature = "inventory")]
pub(in crate) mod inventory;
#[cfg(feature = "masters")]
pub(in crate) mod masters;
#[cfg(feature = "orders")]
pub(in crate) mod orders;
#[cfg(feature = "production")]
pub(in crate) mod production;

use actix_web_4::{
    http::{header, StatusCode},
    web, HttpResponse,
};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::rest_api::resources::{
    error::ErrorResponse,
    form::{FormData, Redirect},
};

/// A url-encoded form body, kept as ordered pairs so repeated row fields survive.
pub type FormBody = web::Form<Vec<(String, String)>>;

/// Registers every screen with the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/masters/", web::get().to(dashboard::masters_dashboard))
        .route("/operations/", web::get().to(dashboard::operations_dashboard));

    #[cfg(feature = "masters")]
    {
        cfg.service(
            web::resource("/masters/departments/")
                .route(web::get().to(masters::department_screen))
                .route(web::post().to(masters::submit_department)),
        )
        .service(
            web::resource("/masters/departments/{id}/")
                .route(web::get().to(masters::edit_department_screen))
                .route(web::post().to(masters::submit_department_edit)),
        )
        .service(
            web::resource("/masters/employee-master/")
                .route(web::get().to(masters::employee_screen))
                .route(web::post().to(masters::submit_employee)),
        )
        .service(
            web::resource("/masters/units/")
                .route(web::get().to(masters::unit_screen))
                .route(web::post().to(masters::submit_unit)),
        )
        .service(
            web::resource("/masters/product-master/")
                .route(web::get().to(masters::product_screen))
                .route(web::post().to(masters::submit_product)),
        )
        .service(
            web::resource("/masters/product-master-detail/")
                .route(web::get().to(masters::product_detail_screen))
                .route(web::post().to(masters::submit_product_detail)),
        )
        .service(
            web::resource("/masters/product-master-detail/{id}/delete/")
                .route(web::get().to(masters::delete_product_detail))
                .route(web::post().to(masters::delete_product_detail)),
        )
        .service(
            web::resource("/masters/terms-conditions/")
                .route(web::get().to(masters::term_condition_screen))
                .route(web::post().to(masters::submit_term_condition)),
        )
        .service(
            web::resource("/masters/customers/")
                .route(web::get().to(masters::customer_screen))
                .route(web::post().to(masters::submit_customer)),
        );
    }

    #[cfg(feature = "formulation")]
    {
        cfg.service(
            web::resource("/masters/product-bom/")
                .route(web::get().to(formulation::bom_screen))
                .route(web::post().to(formulation::submit_bom)),
        )
        .service(
            web::resource("/masters/product-development/")
                .route(web::get().to(formulation::development_screen))
                .route(web::post().to(formulation::submit_development)),
        );
    }

    #[cfg(feature = "orders")]
    {
        cfg.service(
            web::resource("/operations/create-order/")
                .route(web::get().to(orders::create_order_screen))
                .route(web::post().to(orders::submit_order)),
        )
        .service(
            web::resource("/operations/payments/")
                .route(web::get().to(orders::payments_screen))
                .route(web::post().to(orders::submit_payment)),
        )
        .service(
            web::resource("/operations/factory-status/")
                .route(web::get().to(orders::factory_status_screen))
                .route(web::post().to(orders::submit_factory_status)),
        )
        .service(
            web::resource("/operations/split-order/")
                .route(web::get().to(orders::split_order_screen))
                .route(web::post().to(orders::submit_split_order)),
        );
    }

    #[cfg(feature = "production")]
    {
        cfg.service(
            web::resource("/operations/bom-production/")
                .route(web::get().to(production::production_screen))
                .route(web::post().to(production::submit_batch)),
        );
    }

    #[cfg(feature = "dispatch")]
    {
        cfg.service(
            web::resource("/operations/vehicles/")
                .route(web::get().to(dispatch::vehicle_screen))
                .route(web::post().to(dispatch::submit_vehicle)),
        )
        .service(
            web::resource("/operations/dispatch-order/")
                .route(web::get().to(dispatch::dispatch_screen))
                .route(web::post().to(dispatch::submit_dispatch)),
        );
    }

    #[cfg(feature = "inventory")]
    {
        cfg.service(
            web::resource("/operations/master-products/")
                .route(web::get().to(inventory::master_product_screen))
                .route(web::post().to(inventory::submit_master_product)),
        )
        .service(
            web::resource("/operations/update-products/")
                .route(web::get().to(inventory::update_products_screen))
                .route(web::post().to(inventory::submit_price_updates)),
        )
        .service(
            web::resource("/operations/suppliers/")
                .route(web::get().to(inventory::supplier_screen))
                .route(web::post().to(inventory::submit_supplier)),
        )
        .service(
            web::resource("/operations/material-inward/")
                .route(web::get().to(inventory::material_inward_screen))
                .route(web::post().to(inventory::submit_material_inward)),
        )
        .service(
            web::resource("/operations/material-discard/")
                .route(web::get().to(inventory::material_discard_screen))
                .route(web::post().to(inventory::submit_material_discard)),
        )
        .service(
            web::resource("/operations/material-inward-back/")
                .route(web::get().to(inventory::material_return_screen))
                .route(web::post().to(inventory::submit_material_return)),
        );
    }
}

pub(in crate::rest_api) fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub(in crate::rest_api) fn form_data(body: FormBody) -> FormData {
    FormData::new(body.into_inner())
}

/// Answers a screen request with its view model, or the error that prevented building it.
pub(in crate::rest_api) fn screen_response<T: Serialize>(
    result: Result<T, ErrorResponse>,
) -> HttpResponse {
    match result {
        Ok(res) => HttpResponse::Ok().json(res),
        Err(err) => error_response(err),
    }
}

/// Answers a form post with `303 See Other`, or with the validation errors and the echoed form.
pub(in crate::rest_api) fn redirect_response(
    result: Result<Redirect, ErrorResponse>,
) -> HttpResponse {
    match result {
        Ok(redirect) => {
            debug!("Redirecting to {}", redirect.location());
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, redirect.location()))
                .finish()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ErrorResponse) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .json(err)
}

#[cfg(all(test, feature = "sqlite"))]
pub(in crate::rest_api) fn test_state() -> web::Data<super::StoreState> {
    web::Data::new(super::StoreState::new(
        crate::store::in_memory_store_factory(),
    ))
}
