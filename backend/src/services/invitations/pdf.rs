//! # Invitation Rendering Endpoint
//!
//! 1.  The guest is looked up by id; an unknown id answers `404`.
//! 2.  The stored Gujarati name is stamped onto the template inside
//!     `tokio::task::spawn_blocking`, since lopdf parsing and font shaping are
//!     CPU bound and the template is read from disk.
//! 3.  The bytes are returned as `application/pdf` with the configured file
//!     name. Any render failure is fatal for the request: there is no
//!     partially stamped output.

use crate::app_state::AppState;
use crate::render::RenderError;
use crate::services::store_failure;
use crate::store::StoreError;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use common::responses::ApiResponse;
use log::{debug, error};

enum InvitationError {
    Store(StoreError),
    Render(RenderError),
    Join(tokio::task::JoinError),
}

pub async fn download(state: web::Data<AppState>, id: web::Path<i64>) -> impl Responder {
    respond(&state, *id, DispositionType::Attachment).await
}

pub async fn inline(state: web::Data<AppState>, id: web::Path<i64>) -> impl Responder {
    respond(&state, *id, DispositionType::Inline).await
}

async fn respond(state: &AppState, id: i64, disposition: DispositionType) -> HttpResponse {
    match render_for_guest(state, id).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition,
                parameters: vec![DispositionParam::Filename(
                    state.config.invitation.download_name.clone(),
                )],
            })
            .body(bytes),
        Err(InvitationError::Store(e)) => store_failure(e),
        Err(InvitationError::Render(e)) => {
            error!("rendering invitation for guest {} failed: {}", id, e);
            let message = match e {
                RenderError::TemplateMissing(_)
                | RenderError::TemplateUnreadable(_)
                | RenderError::PageOutOfRange { .. } => {
                    "The invitation template is not usable, check the server configuration"
                }
                _ => "The invitation could not be generated",
            };
            HttpResponse::InternalServerError().json(ApiResponse::error(message))
        }
        Err(InvitationError::Join(e)) => {
            error!("invitation render task for guest {} failed: {}", id, e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("The invitation could not be generated"))
        }
    }
}

async fn render_for_guest(state: &AppState, id: i64) -> Result<Vec<u8>, InvitationError> {
    let guest = state.store.get(id).map_err(InvitationError::Store)?;
    let renderer = state.renderer.clone();
    let name = guest.name_gujarati.clone();

    let bytes = tokio::task::spawn_blocking(move || renderer.render(&name))
        .await
        .map_err(InvitationError::Join)?
        .map_err(InvitationError::Render)?;

    debug!(
        "invitation for guest {} ({}), {} bytes",
        guest.id,
        guest.name_english,
        bytes.len()
    );
    Ok(bytes)
}
