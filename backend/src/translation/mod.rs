//! # Name Translator
//!
//! Turns an English guest name into Gujarati script. The remote translator
//! is tried first under a short timeout; whatever goes wrong there (network,
//! quota, garbage response, timeout) the dictionary fallback takes over, so
//! `NameTranslator::translate` never fails.

mod google;
mod table;

pub use google::GoogleTranslateClient;
pub use table::FallbackTable;

use futures_util::future::BoxFuture;
use log::{info, warn};
use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ProtectedTerm, TranslationConfig};

/// Left behind when the remote service translates the English word
/// "placeholder" that older masking code used.
const PLACEHOLDER_ARTIFACT: &str = r"_?પ્લેસહોલ્ડર";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("translation service answered HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("translation service returned an empty result")]
    Empty,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// An external translation service.
pub trait RemoteTranslator: Send + Sync {
    fn translate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, TranslateError>>;
}

/// A protected term plus its compiled whole-word matcher and marker.
struct Mask {
    pattern: Regex,
    marker: String,
    term: ProtectedTerm,
}

pub struct NameTranslator {
    remote: Option<Arc<dyn RemoteTranslator>>,
    table: FallbackTable,
    masks: Vec<Mask>,
    placeholder_artifact: Regex,
    timeout: Duration,
}

impl NameTranslator {
    pub fn new(
        remote: Option<Arc<dyn RemoteTranslator>>,
        table: FallbackTable,
        protected: &[ProtectedTerm],
        timeout: Duration,
    ) -> Result<Self, regex::Error> {
        let masks = protected
            .iter()
            .enumerate()
            .map(|(i, term)| {
                let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&term.english)))
                    .case_insensitive(true)
                    .build()?;
                Ok(Mask {
                    pattern,
                    // Digits survive translation untouched.
                    marker: format!("XXX{}XXX", 999 - i),
                    term: term.clone(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            remote,
            table,
            masks,
            placeholder_artifact: Regex::new(PLACEHOLDER_ARTIFACT)?,
            timeout,
        })
    }

    /// Builds the translator described by `config`: the Google client when
    /// enabled, and the built-in table merged with the configured words.
    pub fn from_config(config: &TranslationConfig) -> anyhow::Result<Self> {
        let remote: Option<Arc<dyn RemoteTranslator>> = if config.enabled {
            Some(Arc::new(GoogleTranslateClient::from_config(config)?))
        } else {
            info!("remote translation disabled; using the dictionary only");
            None
        };
        let table = FallbackTable::with_overrides(&config.extra_words, &config.protected_terms);
        Ok(Self::new(
            remote,
            table,
            &config.protected_terms,
            Duration::from_secs(config.timeout_secs),
        )?)
    }

    pub async fn translate(&self, english: &str) -> String {
        if english.trim().is_empty() {
            return String::new();
        }
        if contains_gujarati(english) {
            return english.to_string();
        }

        if let Some(remote) = &self.remote {
            match self.translate_remote(remote.as_ref(), english).await {
                Ok(translated) => return translated,
                Err(e) => warn!("remote translation failed for '{}': {}; using dictionary", english, e),
            }
        }

        self.table.transliterate(english)
    }

    async fn translate_remote(
        &self,
        remote: &dyn RemoteTranslator,
        english: &str,
    ) -> Result<String, TranslateError> {
        let (masked, applied) = self.mask(english);
        let translated = tokio::time::timeout(self.timeout, remote.translate(&masked))
            .await
            .map_err(|_| TranslateError::Timeout(self.timeout))??;

        let restored = self.unmask(&translated, &applied);
        if restored.trim().is_empty() {
            return Err(TranslateError::Empty);
        }
        Ok(restored)
    }

    /// Replaces protected terms by their markers. Returns the masked text and
    /// the masks that matched.
    fn mask<'m>(&'m self, text: &str) -> (String, Vec<&'m Mask>) {
        let mut out = text.to_string();
        let mut applied = Vec::new();
        for mask in &self.masks {
            if mask.pattern.is_match(&out) {
                out = mask.pattern.replace_all(&out, mask.marker.as_str()).into_owned();
                applied.push(mask);
            }
        }
        (out, applied)
    }

    /// Variants are only rewritten for terms that were present in the input,
    /// so a name that really is spelled like a variant is left alone.
    fn unmask(&self, text: &str, applied: &[&Mask]) -> String {
        let mut out = text.to_string();
        for mask in applied {
            out = out.replace(&mask.marker, &mask.term.gujarati);
            for variant in &mask.term.variants {
                out = out.replace(variant.as_str(), &mask.term.gujarati);
            }
        }
        self.placeholder_artifact.replace_all(&out, "").into_owned()
    }
}

/// True when `text` has at least one character from the Gujarati block.
pub fn contains_gujarati(text: &str) -> bool {
    text.chars().any(|c| ('\u{0A80}'..='\u{0AFF}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::FutureExt;
    use std::sync::Mutex;

    /// Canned remote: records what it was asked and answers with `reply`.
    struct Canned {
        reply: Result<String, ()>,
        seen: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl Canned {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
                delay: None,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
                delay: None,
            })
        }

        fn slow(reply: &str, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
                delay: Some(delay),
            })
        }
    }

    impl RemoteTranslator for Canned {
        fn translate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, TranslateError>> {
            self.seen.lock().unwrap().push(text.to_string());
            async move {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.reply.clone().map_err(|_| TranslateError::Status(503))
            }
            .boxed()
        }
    }

    fn vadhel() -> ProtectedTerm {
        TranslationConfig::default().protected_terms[0].clone()
    }

    fn translator(remote: Option<Arc<dyn RemoteTranslator>>) -> NameTranslator {
        let protected = vec![vadhel()];
        let table = FallbackTable::with_overrides(&Default::default(), &protected);
        NameTranslator::new(remote, table, &protected, Duration::from_millis(200)).unwrap()
    }

    #[actix_web::test]
    async fn table_names_translate_without_network() {
        let t = translator(None);
        assert_eq!(t.translate("Ramesh").await, "રમેશ");
        assert_eq!(t.translate("Ramesh Patel").await, "રમેશ પટેલ");
    }

    #[actix_web::test]
    async fn unknown_name_without_network_is_identity() {
        let t = translator(Some(Canned::failing()));
        assert_eq!(t.translate("Johnathan").await, "Johnathan");
    }

    #[actix_web::test]
    async fn remote_failure_falls_back_to_table() {
        let t = translator(Some(Canned::failing()));
        assert_eq!(t.translate("vadhel sarthak").await, "વઢેળ સાર્થક");
    }

    #[actix_web::test]
    async fn empty_and_gujarati_inputs_short_circuit() {
        let remote = Canned::ok("unused");
        let t = translator(Some(remote.clone()));
        assert_eq!(t.translate("   ").await, "");
        assert_eq!(t.translate("રમેશ").await, "રમેશ");
        assert!(remote.seen.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn protected_term_is_masked_and_restored() {
        let remote = Canned::ok("સાર્થક XXX999XXX");
        let t = translator(Some(remote.clone()));

        assert_eq!(t.translate("Sarthak VADHEL").await, "સાર્થક વઢેળ");
        assert_eq!(remote.seen.lock().unwrap().as_slice(), ["Sarthak XXX999XXX"]);
    }

    #[actix_web::test]
    async fn known_mistranslations_are_corrected() {
        let t = translator(Some(Canned::ok("સાર્થક વાધેલ_પ્લેસહોલ્ડર")));
        assert_eq!(t.translate("Sarthak Vadhel").await, "સાર્થક વઢેળ");
    }

    #[actix_web::test]
    async fn variants_are_kept_when_term_was_not_typed() {
        let t = translator(Some(Canned::ok("વધેલ")));
        assert_eq!(t.translate("Leftover").await, "વધેલ");
    }

    #[actix_web::test]
    async fn masking_respects_word_boundaries() {
        let remote = Canned::ok("x");
        let t = translator(Some(remote.clone()));
        t.translate("Vadhelia").await;
        assert_eq!(remote.seen.lock().unwrap().as_slice(), ["Vadhelia"]);
    }

    #[actix_web::test]
    async fn slow_remote_times_out_into_fallback() {
        let t = translator(Some(Canned::slow("ignored", Duration::from_secs(5))));
        assert_eq!(t.translate("Asha").await, "આશા");
    }

    #[test]
    fn gujarati_detection() {
        assert!(contains_gujarati("Ramesh રમેશ"));
        assert!(!contains_gujarati("Ramesh"));
        // Devanagari is a different block
        assert!(!contains_gujarati("रमेश"));
    }
}
