use actix_web::{Responder, get, web};

use crate::repository::Store;
use crate::routes::json_response;
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(dashboard_service::load_dashboard(repo.get_ref()))
}
