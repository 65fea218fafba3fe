//! # Sharing Settings Module
//!
//! `GET /api/sharing` gives the browser the list of senders and the
//! WhatsApp message template, both taken from the configuration file.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/sharing";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_state;
    use actix_web::{test, web, App};
    use common::model::sender::SharingSettings;

    #[actix_web::test]
    async fn returns_configured_senders() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(&dir);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/sharing").to_request();
        let body: SharingSettings = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, state.config.sharing.settings());
        assert_eq!(body.senders.len(), 3);
        assert!(body.message_template.contains("{name}"));
    }
}
