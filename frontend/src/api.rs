//! Thin client for the backend JSON API.
//!
//! Every call returns `Err(message)` with a text that can be shown to the
//! user as is: the server's `ApiResponse.error` when it sent one, otherwise
//! the transport error.

use common::model::guest::Guest;
use common::model::sender::SharingSettings;
use common::requests::{MobileUpdate, NewGuest, RemarkUpdate, TranslateRequest};
use common::responses::{ApiResponse, TranslateResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response.json::<T>().await.map_err(|e| e.to_string());
    }
    let status = response.status();
    match response.json::<ApiResponse>().await {
        Ok(ApiResponse {
            error: Some(message),
            ..
        }) => Err(message),
        _ => Err(format!("Server answered {}", status)),
    }
}

async fn send<T: DeserializeOwned>(request: Result<Request, gloo_net::Error>) -> Result<T, String> {
    let response = request
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}

pub async fn list_guests() -> Result<Vec<Guest>, String> {
    send(Request::get("/api/guests").build()).await
}

pub async fn sharing_settings() -> Result<SharingSettings, String> {
    send(Request::get("/api/sharing").build()).await
}

pub async fn add_guest(guest: &NewGuest) -> Result<Guest, String> {
    send(Request::post("/api/guests").json(guest)).await
}

pub async fn translate(name: &str) -> Result<TranslateResponse, String> {
    let body = TranslateRequest {
        name: name.to_string(),
    };
    send(Request::post("/api/translate").json(&body)).await
}

pub async fn update_remark(id: i64, remark: &str) -> Result<ApiResponse, String> {
    let body = RemarkUpdate {
        remark: remark.to_string(),
    };
    send(Request::post(&format!("/api/guests/{}/remark", id)).json(&body)).await
}

pub async fn update_mobile(id: i64, mobile: &str) -> Result<ApiResponse, String> {
    let body = MobileUpdate {
        mobile: mobile.to_string(),
    };
    send(Request::post(&format!("/api/guests/{}/mobile", id)).json(&body)).await
}

pub async fn delete_guest(id: i64) -> Result<ApiResponse, String> {
    send(Request::delete(&format!("/api/guests/{}", id)).build()).await
}

/// Invitation bytes and the file name suggested by the server.
pub async fn invitation_pdf(id: i64) -> Result<(Vec<u8>, Option<String>), String> {
    let response = Request::get(&format!("/api/invitations/{}/inline", id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        let message = read::<ApiResponse>(response).await.err();
        return Err(message.unwrap_or_else(|| "The invitation could not be downloaded".to_string()));
    }
    let file_name = response
        .headers()
        .get("content-disposition")
        .and_then(|header| crate::share::file_name_from_disposition(&header));
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    Ok((bytes, file_name))
}
