use actix_web::{Responder, get, post, web};

use crate::domain::calendar::parse_blocked_date_key;
use crate::dto::calendar::MonthQuery;
use crate::models::config::ServerConfig;
use crate::repository::Store;
use crate::routes::json_response;
use crate::services::ServiceError;
use crate::services::calendar as calendar_service;

#[get("/calendar")]
pub async fn show_month(
    repo: web::Data<dyn Store>,
    server_config: web::Data<ServerConfig>,
    query: web::Query<MonthQuery>,
) -> impl Responder {
    json_response(calendar_service::load_month_for_query(
        repo.get_ref(),
        &query,
        server_config.calendar_day_limit,
    ))
}

#[get("/blocked-dates")]
pub async fn list_blocked_dates(repo: web::Data<dyn Store>) -> impl Responder {
    json_response(calendar_service::list_blocked_dates(repo.get_ref()))
}

/// Responds with `{ "date": ..., "blocked": bool }` describing the new state.
#[post("/blocked-dates/{date}/toggle")]
pub async fn toggle_blocked_date(
    repo: web::Data<dyn Store>,
    date: web::Path<String>,
) -> impl Responder {
    let result = parse_blocked_date_key(&date)
        .map_err(ServiceError::from)
        .and_then(|date| {
            calendar_service::toggle_blocked_date(repo.get_ref(), date)
                .map(|blocked| serde_json::json!({ "date": date, "blocked": blocked }))
        });

    json_response(result)
}
