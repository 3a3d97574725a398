use actix_web::{Responder, delete, get, post, put, web};

use crate::domain::types::PhotoId;
use crate::forms::photo::{PhotoForm, UpdatePhotoForm};
use crate::repository::Store;
use crate::routes::{created_response, empty_response, json_response, path_id};
use crate::services::portfolio as portfolio_service;

#[get("/portfolio")]
pub async fn list_photos(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(portfolio_service::list_photos(repo.get_ref()))
}

#[post("/portfolio")]
pub async fn add_photo(
    repo: web::Data<dyn Store>,
    web::Json(form): web::Json<PhotoForm>,
) -> impl Responder {
    created_response(portfolio_service::add_photo(repo.get_ref(), form))
}

#[put("/portfolio/{photo_id}")]
pub async fn update_photo(
    repo: web::Data<dyn Store>,
    photo_id: web::Path<i32>,
    web::Json(form): web::Json<UpdatePhotoForm>,
) -> impl Responder {
    json_response(
        path_id::<PhotoId>(photo_id.into_inner())
            .and_then(|id| portfolio_service::update_photo(repo.get_ref(), id, form)),
    )
}

#[delete("/portfolio/{photo_id}")]
pub async fn delete_photo(
    repo: web::Data<dyn Store>,
    photo_id: web::Path<i32>,
) -> impl Responder {
    empty_response(
        path_id::<PhotoId>(photo_id.into_inner())
            .and_then(|id| portfolio_service::delete_photo(repo.get_ref(), id)),
    )
}
