//! # Application Configuration
//!
//! Settings are layered with `figment`:
//!
//! 1. Built-in defaults (`AppConfig::default()`), matching the original
//!    wedding card layout.
//! 2. An optional YAML file (`invitations.yaml` unless `--config` says
//!    otherwise). A missing file is not an error.
//! 3. Environment variables prefixed with `INVITE_`, with `__` separating
//!    nested keys (e.g. `INVITE_SERVER__PORT=9000`).
//!
//! The overlay positions and the fallback dictionary extensions live here
//! instead of in the renderer/translator so the same code can serve other
//! card templates.

use anyhow::{bail, Context};
use common::model::sender::{Sender, SharingSettings};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "invitations.yaml";
const ENV_PREFIX: &str = "INVITE_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub translation: TranslationConfig,
    pub invitation: InvitationConfig,
    pub sharing: SharingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the UI in the default browser once the server is up.
    pub open_browser: bool,
    pub json_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
            json_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/invitations.db"),
        }
    }
}

/// A word that must never go through the remote translator as-is.
///
/// The remote service mangles some family names; they are masked before the
/// call and restored afterwards, and the listed `variants` (known wrong
/// renderings) are rewritten to `gujarati`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedTerm {
    pub english: String,
    pub gujarati: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout_secs: u64,
    /// Extra lowercase English -> Gujarati tokens layered over the built-in table.
    pub extra_words: BTreeMap<String, String>,
    pub protected_terms: Vec<ProtectedTerm>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            source_lang: "en".to_string(),
            target_lang: "gu".to_string(),
            timeout_secs: 3,
            extra_words: BTreeMap::new(),
            protected_terms: vec![ProtectedTerm {
                english: "vadhel".to_string(),
                gujarati: "વઢેળ".to_string(),
                variants: vec!["વાધેલ".to_string(), "વધેલ".to_string()],
            }],
        }
    }
}

/// One place on the template where the guest name is drawn.
///
/// `page` is 1-based. `x`/`y` are points measured from the top-left corner
/// of the page; the renderer flips `y` into PDF user space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampConfig {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationConfig {
    pub template_path: PathBuf,
    pub download_name: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub color: [u8; 3],
    pub stamps: Vec<StampConfig>,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("Invitation card.pdf"),
            download_name: "Vadhel Sarthak's Wedding Invitation.pdf".to_string(),
            font_path: PathBuf::from("fonts/NotoSansGujarati-Regular.ttf"),
            font_size: 15.0,
            // Crimson
            color: [220, 20, 60],
            stamps: vec![
                StampConfig {
                    page: 1,
                    x: 170.0,
                    y: 490.0,
                    font_size: None,
                    color: None,
                },
                StampConfig {
                    page: 4,
                    x: 95.0,
                    y: 186.0,
                    font_size: None,
                    color: None,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharingConfig {
    pub senders: Vec<Sender>,
    pub message_template: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        let sender = |key: &str, name: &str, phone: &str| Sender {
            key: key.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
        };
        Self {
            senders: vec![
                sender("sarthak", "Sarthak", "919737932864"),
                sender("vanrajbhai", "Vanrajbhai", "919574932864"),
                sender("vasudha", "Vasudha", "916355995964"),
            ],
            message_template: "Dear {name},\n\nYou are warmly invited to Vadhel Sarthak's wedding. \
                               Please find the invitation card attached.\n\n- {sender}"
                .to_string(),
        }
    }
}

impl SharingConfig {
    pub fn settings(&self) -> SharingSettings {
        SharingSettings {
            senders: self.senders.clone(),
            message_template: self.message_template.clone(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `path` (if it exists), then `INVITE_*` variables.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::figment(path)
            .extract::<AppConfig>()
            .with_context(|| format!("invalid configuration (file: {})", path.display()))
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let inv = &self.invitation;
        if inv.stamps.is_empty() {
            bail!("invitation.stamps must contain at least one position");
        }
        for stamp in &inv.stamps {
            if stamp.page == 0 {
                bail!("invitation.stamps: page numbers start at 1");
            }
            if stamp.font_size.unwrap_or(inv.font_size) <= 0.0 {
                bail!("invitation font size must be positive (page {})", stamp.page);
            }
        }
        if inv.font_size <= 0.0 {
            bail!("invitation.font_size must be positive");
        }
        if self.translation.timeout_secs == 0 {
            bail!("translation.timeout_secs must be at least 1");
        }

        let mut keys = HashSet::new();
        for sender in &self.sharing.senders {
            if !keys.insert(sender.key.as_str()) {
                bail!("sharing.senders: duplicate key '{}'", sender.key);
            }
        }
        Ok(())
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("failed to serialize configuration")
    }
}
