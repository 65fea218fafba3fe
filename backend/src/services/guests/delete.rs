use crate::app_state::AppState;
use crate::services::store_failure;
use actix_web::{web, HttpResponse, Responder};
use common::responses::ApiResponse;
use log::info;

/// Handler for `DELETE /api/guests/{id}`.
///
/// Deleting an id that does not exist is not an error, so a repeated click
/// from the UI still answers success.
///
/// # Arguments
/// * `id` - The guest row id, from the URL path.
///
/// # Returns
/// - `200 OK` with `{success: true}`.
/// - `500 Internal Server Error` if the delete statement fails.
pub async fn process(state: web::Data<AppState>, id: web::Path<i64>) -> impl Responder {
    match state.store.delete(*id) {
        Ok(()) => {
            info!("deleted guest {}", id);
            HttpResponse::Ok().json(ApiResponse::ok())
        }
        Err(e) => store_failure(e),
    }
}
