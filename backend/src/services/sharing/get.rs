use crate::app_state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/sharing`: the configured senders and message
/// template, used by the UI to build the WhatsApp text.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.config.sharing.settings())
}
