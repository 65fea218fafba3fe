//! HTTP API. Each sub-module owns one path prefix and exposes a
//! `configure_routes()` scope that `main.rs` mounts on the app.

pub mod guests;
pub mod invitations;
pub mod sharing;
pub mod translate;

use crate::store::StoreError;
use actix_web::HttpResponse;
use common::responses::ApiResponse;
use log::error;

/// Maps a store failure onto the response sent to the browser. Database
/// details go to the log only.
pub(crate) fn store_failure(err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound => {
            HttpResponse::NotFound().json(ApiResponse::error(StoreError::NotFound.to_string()))
        }
        other => {
            error!("guest store failure: {}", other);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("The guest list could not be accessed"))
        }
    }
}
