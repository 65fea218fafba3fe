//! # Guest Service Module
//!
//! Routes for the guest list under `/api/guests`. Guests are added with
//! their Gujarati name already computed, so rendering a card later never
//! depends on the translation service being reachable.
//!
//! ## Sub-modules:
//! - `list`: returns every guest, newest first.
//! - `add`: validates the form, translates the name and stores the row.
//! - `remark`: records the note entered after a card was shared.
//! - `mobile`: changes or clears a guest's mobile number.
//! - `delete`: removes a guest.

mod add;
mod delete;
mod list;
mod mobile;
mod remark;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all guest-related API endpoints.
const API_PATH: &str = "/api/guests";

/// Configures and returns the Actix `Scope` for the guest routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`, JSON array of `Guest`.
/// *   **`POST /`**: `add::process`, body `NewGuest`, answers `201` with the
///     stored `Guest`.
/// *   **`POST /{id}/remark`**: `remark::process`, body `RemarkUpdate`.
/// *   **`POST /{id}/mobile`**: `mobile::process`, body `MobileUpdate`; an
///     empty number clears it.
/// *   **`DELETE /{id}`**: `delete::process`, succeeds for unknown ids too.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(add::process))
        .route("/{id}/remark", post().to(remark::process))
        .route("/{id}/mobile", post().to(mobile::process))
        .route("/{id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::guest::Guest;
    use common::responses::ApiResponse;
    use serde_json::json;

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn added_guest_is_translated_and_listed() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/guests")
            .set_json(json!({ "name_english": "  Ramesh Patel ", "mobile": "+91 98765-43210" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let guest: Guest = test::read_body_json(resp).await;
        assert_eq!(guest.name_english, "Ramesh Patel");
        assert_eq!(guest.name_gujarati, "રમેશ પટેલ");
        assert_eq!(guest.mobile.as_deref(), Some("919876543210"));
        assert!(!guest.is_sent());

        let req = test::TestRequest::get().uri("/api/guests").to_request();
        let guests: Vec<Guest> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(guests, vec![guest]);
    }

    #[actix_web::test]
    async fn blank_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/guests")
            .set_json(json!({ "name_english": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(body, ApiResponse::error("Name is required"));
        assert!(state.store.list().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_mobile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/guests")
            .set_json(json!({ "name_english": "Asha", "mobile": "12345" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn remark_marks_guest_as_sent() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Asha", "આશા", None).unwrap();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/api/guests/{}/remark", guest.id))
            .set_json(json!({ "remark": "  sent by Sarthak " }))
            .to_request();
        let body: ApiResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, ApiResponse::ok());

        let stored = state.store.get(guest.id).unwrap();
        assert_eq!(stored.remark.as_deref(), Some("sent by Sarthak"));
        assert!(stored.is_sent());
    }

    #[actix_web::test]
    async fn unknown_guest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = app!(state);

        for (uri, body) in [
            ("/api/guests/42/remark", json!({ "remark": "x" })),
            ("/api/guests/42/mobile", json!({ "mobile": "9876543210" })),
        ] {
            let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: ApiResponse = test::read_body_json(resp).await;
            assert_eq!(body, ApiResponse::error("Entry not found"));
        }
    }

    #[actix_web::test]
    async fn mobile_can_be_changed_and_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Asha", "આશા", None).unwrap();
        let app = app!(state);
        let uri = format!("/api/guests/{}/mobile", guest.id);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "mobile": "(98) 7654.3210" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(
            state.store.get(guest.id).unwrap().mobile.as_deref(),
            Some("9876543210")
        );

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "mobile": "" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(state.store.get(guest.id).unwrap().mobile, None);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "mobile": "call me" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Asha", "આશા", None).unwrap();
        let app = app!(state);

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri(&format!("/api/guests/{}", guest.id))
                .to_request();
            let body: ApiResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body, ApiResponse::ok());
        }
        assert!(state.store.list().unwrap().is_empty());
    }
}
