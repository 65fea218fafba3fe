//! # Guest Creation
//!
//! `POST /api/guests`. The name is trimmed and must not be blank, the
//! mobile number is normalised to digits, and the Gujarati name is computed
//! here once. Translation never fails the request: when Google is
//! unreachable the dictionary result is stored instead.

use crate::app_state::AppState;
use crate::services::store_failure;
use crate::store::StoreError;
use actix_web::{web, HttpResponse, Responder};
use common::model::guest::Guest;
use common::requests::NewGuest;
use common::responses::ApiResponse;
use common::validation::{normalize_mobile, validate_name};
use log::info;

enum AddError {
    Invalid(String),
    Store(StoreError),
}

pub async fn process(state: web::Data<AppState>, payload: web::Json<NewGuest>) -> impl Responder {
    match add_guest(&state, payload.into_inner()).await {
        Ok(guest) => HttpResponse::Created().json(guest),
        Err(AddError::Invalid(msg)) => HttpResponse::BadRequest().json(ApiResponse::error(msg)),
        Err(AddError::Store(e)) => store_failure(e),
    }
}

async fn add_guest(state: &AppState, payload: NewGuest) -> Result<Guest, AddError> {
    let name = validate_name(&payload.name_english).map_err(AddError::Invalid)?;
    let mobile = normalize_mobile(payload.mobile.as_deref().unwrap_or_default())
        .map_err(AddError::Invalid)?;

    let gujarati = state.translator.translate(&name).await;
    let guest = state
        .store
        .insert(&name, &gujarati, mobile.as_deref())
        .map_err(AddError::Store)?;
    info!("added guest {} ({} -> {})", guest.id, guest.name_english, guest.name_gujarati);
    Ok(guest)
}
