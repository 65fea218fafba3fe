//! # Translation Preview Module
//!
//! `POST /api/translate` lets the add-guest form show the Gujarati name
//! while the user types. It uses the same translator as guest creation.

mod preview;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for the translation endpoint.
const API_PATH: &str = "/api/translate";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(preview::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::responses::TranslateResponse;
    use serde_json::json;

    #[actix_web::test]
    async fn preview_uses_dictionary_when_offline() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_state(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/translate")
            .set_json(json!({ "name": "Sarthak Vadhel" }))
            .to_request();
        let body: TranslateResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            TranslateResponse {
                name_english: "Sarthak Vadhel".to_string(),
                name_gujarati: "સાર્થક વઢેળ".to_string(),
            }
        );
    }

    #[actix_web::test]
    async fn blank_preview_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_state(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/translate")
            .set_json(json!({ "name": "" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
