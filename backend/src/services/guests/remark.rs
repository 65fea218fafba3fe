use crate::app_state::AppState;
use crate::services::store_failure;
use actix_web::{web, HttpResponse, Responder};
use common::requests::RemarkUpdate;
use common::responses::ApiResponse;

/// Stores the note the user types after sharing a card. The text is kept
/// as entered apart from surrounding whitespace.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<RemarkUpdate>,
) -> impl Responder {
    match state.store.update_remark(*id, payload.remark.trim()) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok()),
        Err(e) => store_failure(e),
    }
}
