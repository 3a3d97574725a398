use actix_web::{Responder, delete, get, post, put, web};

use crate::domain::types::ClientId;
use crate::dto::client::ClientSearchQuery;
use crate::forms::client::{ClientForm, UpdateClientForm};
use crate::repository::Store;
use crate::routes::{created_response, empty_response, json_response, path_id};
use crate::services::clients as clients_service;

#[get("/clients")]
pub async fn list_clients(
    repo: web::Data<dyn Store>,
    query: web::Query<ClientSearchQuery>,
) -> impl Responder {
    json_response(clients_service::search_clients(
        repo.get_ref(),
        query.search.as_deref(),
    ))
}

#[post("/clients")]
pub async fn create_client(
    repo: web::Data<dyn Store>,
    web::Json(form): web::Json<ClientForm>,
) -> impl Responder {
    created_response(clients_service::create_client(repo.get_ref(), form))
}

#[get("/clients/{client_id}")]
pub async fn get_client(repo: web::Data<dyn Store>, client_id: web::Path<i32>) -> impl Responder {
    json_response(
        path_id::<ClientId>(client_id.into_inner())
            .and_then(|id| clients_service::get_client(repo.get_ref(), id)),
    )
}

#[put("/clients/{client_id}")]
pub async fn update_client(
    repo: web::Data<dyn Store>,
    client_id: web::Path<i32>,
    web::Json(form): web::Json<UpdateClientForm>,
) -> impl Responder {
    json_response(
        path_id::<ClientId>(client_id.into_inner())
            .and_then(|id| clients_service::update_client(repo.get_ref(), id, form)),
    )
}

#[delete("/clients/{client_id}")]
pub async fn delete_client(
    repo: web::Data<dyn Store>,
    client_id: web::Path<i32>,
) -> impl Responder {
    empty_response(
        path_id::<ClientId>(client_id.into_inner())
            .and_then(|id| clients_service::delete_client(repo.get_ref(), id)),
    )
}

#[get("/clients/{client_id}/history")]
pub async fn client_history(
    repo: web::Data<dyn Store>,
    client_id: web::Path<i32>,
) -> impl Responder {
    json_response(
        path_id::<ClientId>(client_id.into_inner())
            .and_then(|id| clients_service::client_history(repo.get_ref(), id)),
    )
}
