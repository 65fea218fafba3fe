//! Shared state handed to every request handler.
//!
//! `AppState` is built once in `main.rs` and injected into the Actix
//! application as `web::Data`. Everything in it is either immutable after
//! startup or opens its own resources per call, so handlers never need to
//! lock anything.

use crate::config::AppConfig;
use crate::render::InvitationRenderer;
use crate::store::GuestStore;
use crate::translation::NameTranslator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Effective configuration, after file and environment overrides.
    pub config: Arc<AppConfig>,

    /// Guest records. Cheap to clone; each operation opens its own SQLite
    /// connection.
    pub store: GuestStore,

    /// English to Gujarati name translation. Shared by the preview endpoint
    /// and guest creation so both give the same answer.
    pub translator: Arc<NameTranslator>,

    /// Invitation template renderer. Moved into `spawn_blocking` closures,
    /// hence the `Arc`.
    pub renderer: Arc<InvitationRenderer>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store = GuestStore::new(&config.database.path);
        store.init()?;
        let translator = NameTranslator::from_config(&config.translation)?;
        let renderer = InvitationRenderer::from_config(&config.invitation);
        Ok(Self {
            config: Arc::new(config),
            store,
            translator: Arc::new(translator),
            renderer: Arc::new(renderer),
        })
    }
}
