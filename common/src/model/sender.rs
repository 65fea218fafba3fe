use serde::{Deserialize, Serialize};

/// A person who sends invitations from their own WhatsApp account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub key: String,
    pub name: String,
    pub phone: String,
}

/// Sharing settings handed to the frontend by `GET /api/sharing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharingSettings {
    pub senders: Vec<Sender>,
    /// Message body with `{name}` and `{sender}` placeholders.
    pub message_template: String,
}
