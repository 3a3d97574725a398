use actix_web::{Responder, delete, get, post, put, web};

use crate::domain::types::ServiceId;
use crate::forms::catalog::{ServiceForm, UpdateServiceForm};
use crate::repository::Store;
use crate::routes::{created_response, empty_response, json_response, path_id};
use crate::services::catalog as catalog_service;

#[get("/services")]
pub async fn list_services(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(catalog_service::list_services(repo.get_ref()))
}

#[post("/services")]
pub async fn create_service(
    repo: web::Data<dyn Store>,
    web::Json(form): web::Json<ServiceForm>,
) -> impl Responder {
    created_response(catalog_service::create_service(repo.get_ref(), form))
}

#[put("/services/{service_id}")]
pub async fn update_service(
    repo: web::Data<dyn Store>,
    service_id: web::Path<i32>,
    web::Json(form): web::Json<UpdateServiceForm>,
) -> impl Responder {
    json_response(
        path_id::<ServiceId>(service_id.into_inner())
            .and_then(|id| catalog_service::update_service(repo.get_ref(), id, form)),
    )
}

#[delete("/services/{service_id}")]
pub async fn delete_service(
    repo: web::Data<dyn Store>,
    service_id: web::Path<i32>,
) -> impl Responder {
    empty_response(
        path_id::<ServiceId>(service_id.into_inner())
            .and_then(|id| catalog_service::delete_service(repo.get_ref(), id)),
    )
}
