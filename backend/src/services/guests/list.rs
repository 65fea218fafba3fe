use crate::app_state::AppState;
use crate::services::store_failure;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/guests`.
///
/// # Returns
/// - `200 OK` with every guest as a JSON array, newest first.
/// - `500 Internal Server Error` with an `ApiResponse` if the store cannot be read.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match state.store.list() {
        Ok(guests) => HttpResponse::Ok().json(guests),
        Err(e) => store_failure(e),
    }
}
