use serde::{Deserialize, Serialize};

/// A guest row as stored by the backend and shown in the guest table.
///
/// `name_gujarati` is computed once when the guest is added and is the text
/// stamped onto the invitation card. `remark` stays `None` until the user
/// confirms that the card was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name_english: String,
    pub name_gujarati: String,
    pub mobile: Option<String>,
    pub remark: Option<String>,
    pub created_at: String,
}

impl Guest {
    /// True once a remark was recorded after sending the card.
    pub fn is_sent(&self) -> bool {
        self.remark.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}
