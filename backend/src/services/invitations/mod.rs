//! # Invitation Service Module
//!
//! Serves the personalised invitation card of a stored guest under
//! `/api/invitations`. The card is rendered on every request from the
//! template on disk and the guest's stored Gujarati name; nothing is cached.
//!
//! ## Sub-modules:
//! - `pdf`: renders the card and returns it either as a download or inline
//!   (the browser fetches the inline variant to build a shareable `File`).

mod pdf;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all invitation-related API endpoints.
const API_PATH: &str = "/api/invitations";

/// Configures and returns the Actix `Scope` for the invitation routes.
///
/// # Registered Routes:
///
/// *   **`GET /{id}/pdf`**: `pdf::download`, `Content-Disposition: attachment`.
/// *   **`GET /{id}/inline`**: `pdf::inline`, same bytes with `inline`
///     disposition.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{id}/pdf", get().to(pdf::download))
        .route("/{id}/inline", get().to(pdf::inline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_state;
    use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::responses::ApiResponse;
    use lopdf::Document;

    #[actix_web::test]
    async fn download_is_a_stamped_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Ramesh", "Ramesh", None).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/invitations/{}/pdf", guest.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "application/pdf");
        let disposition = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("Wedding Invitation.pdf"));

        let body = test::read_body(resp).await;
        let doc = Document::load_mem(&body).unwrap();
        assert_eq!(doc.get_pages().len(), 4);
    }

    #[actix_web::test]
    async fn inline_and_download_bodies_match() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Asha", "Asha", None).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/invitations/{}/inline", guest.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let disposition = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("inline"));
        let inline = test::read_body(resp).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/invitations/{}/pdf", guest.id))
            .to_request();
        let download = test::call_and_read_body(&app, req).await;
        assert_eq!(inline, download);
    }

    #[actix_web::test]
    async fn unknown_guest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/invitations/7/pdf").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn missing_template_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let guest = state.store.insert("Asha", "Asha", None).unwrap();
        std::fs::remove_file(state.renderer.template_path()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/invitations/{}/pdf", guest.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert!(!body.success);
    }
}
