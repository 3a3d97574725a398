use actix_web::{Responder, delete, get, post, put, web};

use crate::domain::appointment::AppointmentStatus;
use crate::domain::types::AppointmentId;
use crate::forms::appointment::{
    AppointmentForm, BookingForm, StatusForm, UpdateAppointmentForm,
};
use crate::repository::Store;
use crate::routes::{created_response, empty_response, json_response, path_id};
use crate::services::ServiceError;
use crate::services::appointments as appointments_service;

#[get("/appointments")]
pub async fn list_appointments(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(appointments_service::list_appointments(repo.get_ref()))
}

#[post("/appointments")]
pub async fn create_appointment(
    repo: web::Data<dyn Store>,
    web::Json(form): web::Json<AppointmentForm>,
) -> impl Responder {
    created_response(appointments_service::create_appointment(
        repo.get_ref(),
        form,
    ))
}

#[post("/appointments/book")]
pub async fn book_services(
    repo: web::Data<dyn Store>,
    web::Json(form): web::Json<BookingForm>,
) -> impl Responder {
    created_response(appointments_service::book_services(repo.get_ref(), form))
}

#[get("/appointments/today")]
pub async fn todays_appointments(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(appointments_service::todays_appointments(repo.get_ref()))
}

#[get("/appointments/{appointment_id}")]
pub async fn get_appointment(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    json_response(
        path_id::<AppointmentId>(appointment_id.into_inner())
            .and_then(|id| appointments_service::get_appointment(repo.get_ref(), id)),
    )
}

#[put("/appointments/{appointment_id}")]
pub async fn update_appointment(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
    web::Json(form): web::Json<UpdateAppointmentForm>,
) -> impl Responder {
    json_response(
        path_id::<AppointmentId>(appointment_id.into_inner())
            .and_then(|id| appointments_service::update_appointment(repo.get_ref(), id, form)),
    )
}

#[delete("/appointments/{appointment_id}")]
pub async fn delete_appointment(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    empty_response(
        path_id::<AppointmentId>(appointment_id.into_inner())
            .and_then(|id| appointments_service::delete_appointment(repo.get_ref(), id)),
    )
}

#[post("/appointments/{appointment_id}/status")]
pub async fn set_appointment_status(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
    web::Json(form): web::Json<StatusForm>,
) -> impl Responder {
    let result = path_id::<AppointmentId>(appointment_id.into_inner()).and_then(|id| {
        let status = AppointmentStatus::try_from(form).map_err(ServiceError::from)?;
        appointments_service::set_appointment_status(repo.get_ref(), id, status)
    });

    json_response(result)
}

#[get("/appointments/{appointment_id}/attendance")]
pub async fn start_attendance(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    json_response(
        path_id::<AppointmentId>(appointment_id.into_inner())
            .and_then(|id| appointments_service::start_attendance(repo.get_ref(), id)),
    )
}

#[post("/appointments/{appointment_id}/attendance/finish")]
pub async fn finish_attendance(
    repo: web::Data<dyn Store>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    json_response(
        path_id::<AppointmentId>(appointment_id.into_inner())
            .and_then(|id| appointments_service::finish_attendance(repo.get_ref(), id)),
    )
}
