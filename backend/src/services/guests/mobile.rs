use crate::app_state::AppState;
use crate::services::store_failure;
use actix_web::{web, HttpResponse, Responder};
use common::requests::MobileUpdate;
use common::responses::ApiResponse;
use common::validation::normalize_mobile;

/// Handler for `POST /api/guests/{id}/mobile`.
///
/// The number is normalised to bare digits before it is stored. An empty
/// string clears it.
///
/// # Arguments
/// * `id` - The guest row id, from the URL path.
/// * `payload` - `MobileUpdate` with the number as typed.
///
/// # Returns
/// - `200 OK` with `{success: true}` once stored.
/// - `400 Bad Request` when the number does not reduce to 10-15 digits.
/// - `404 Not Found` when no guest has this id.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<MobileUpdate>,
) -> impl Responder {
    let mobile = match normalize_mobile(&payload.mobile) {
        Ok(mobile) => mobile,
        Err(msg) => return HttpResponse::BadRequest().json(ApiResponse::error(msg)),
    };
    match state.store.update_mobile(*id, mobile.as_deref()) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok()),
        Err(e) => store_failure(e),
    }
}
