use serde::{Deserialize, Serialize};

/// Payload of `POST /api/guests`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGuest {
    pub name_english: String,
    #[serde(default)]
    pub mobile: Option<String>,
}

/// Payload of `POST /api/guests/{id}/remark`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemarkUpdate {
    #[serde(default)]
    pub remark: String,
}

/// Payload of `POST /api/guests/{id}/mobile`. An empty value clears the number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MobileUpdate {
    #[serde(default)]
    pub mobile: String,
}

/// Payload of `POST /api/translate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub name: String,
}
