use crate::app_state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::TranslateRequest;
use common::responses::{ApiResponse, TranslateResponse};
use common::validation::validate_name;

/// Handler for `POST /api/translate`, the live preview under the add form.
///
/// Nothing is stored. A failed remote call still answers `200` with the
/// dictionary rendering.
///
/// # Returns
/// - `200 OK` with a `TranslateResponse`.
/// - `400 Bad Request` when the name is blank.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<TranslateRequest>,
) -> impl Responder {
    let name = match validate_name(&payload.name) {
        Ok(name) => name,
        Err(msg) => return HttpResponse::BadRequest().json(ApiResponse::error(msg)),
    };
    let name_gujarati = state.translator.translate(&name).await;
    HttpResponse::Ok().json(TranslateResponse {
        name_english: name,
        name_gujarati,
    })
}
