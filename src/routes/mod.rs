//! JSON API exposing the service layer under `/api/v1`.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::domain::types::TypeConstraintError;
use crate::services::{ServiceError, ServiceResult};

pub mod appointments;
pub mod calendar;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod portfolio;

/// Registers every API route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(clients::list_clients)
            .service(clients::create_client)
            .service(clients::client_history)
            .service(clients::get_client)
            .service(clients::update_client)
            .service(clients::delete_client)
            .service(catalog::list_services)
            .service(catalog::create_service)
            .service(catalog::update_service)
            .service(catalog::delete_service)
            .service(appointments::list_appointments)
            .service(appointments::create_appointment)
            .service(appointments::book_services)
            .service(appointments::todays_appointments)
            .service(appointments::set_appointment_status)
            .service(appointments::start_attendance)
            .service(appointments::finish_attendance)
            .service(appointments::get_appointment)
            .service(appointments::update_appointment)
            .service(appointments::delete_appointment)
            .service(portfolio::list_photos)
            .service(portfolio::add_photo)
            .service(portfolio::update_photo)
            .service(portfolio::delete_photo)
            .service(dashboard::show_dashboard)
            .service(calendar::show_month)
            .service(calendar::list_blocked_dates)
            .service(calendar::toggle_blocked_date),
    );
}

/// Maps a service failure onto its HTTP status with a JSON error body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "not found" })),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(json!({ "error": message }))
        }
        err @ ServiceError::Repository(_) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}

/// `200 OK` with the payload, or the mapped error.
pub fn json_response<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(err) => error_response(err),
    }
}

/// `201 Created` with the payload, or the mapped error.
pub fn created_response<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::Created().json(payload),
        Err(err) => error_response(err),
    }
}

/// `204 No Content`, or the mapped error.
pub fn empty_response(result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

/// Path ids that are not positive can never exist.
pub(crate) fn path_id<T>(raw: i32) -> ServiceResult<T>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    T::try_from(raw).map_err(|_| ServiceError::NotFound)
}
