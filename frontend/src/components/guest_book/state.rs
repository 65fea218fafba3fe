//! Component state for the guest book.

use common::model::guest::Guest;
use common::model::sender::{Sender, SharingSettings};

pub struct GuestBookComponent {
    /// Guests as last returned by the server, newest first.
    pub guests: Vec<Guest>,

    /// Senders and message template; `None` until loaded.
    pub settings: Option<SharingSettings>,

    /// Key of the sender chosen in the selector.
    pub sender_key: Option<String>,

    /// Add form fields.
    pub name: String,
    pub mobile: String,

    /// Gujarati preview of `name`, if the last request answered.
    pub preview: Option<String>,

    /// Bumped on every keystroke; a preview is only shown when its sequence
    /// number is still current.
    pub preview_seq: u32,

    pub submitting: bool,

    /// Guest whose card is being fetched and shared.
    pub sharing: Option<i64>,

    /// Row with an open mobile editor and its current text.
    pub editing_mobile: Option<(i64, String)>,

    /// Guard for the first-render fetch.
    pub loaded: bool,
}

impl GuestBookComponent {
    pub fn new() -> Self {
        Self {
            guests: Vec::new(),
            settings: None,
            sender_key: None,
            name: String::new(),
            mobile: String::new(),
            preview: None,
            preview_seq: 0,
            submitting: false,
            sharing: None,
            editing_mobile: None,
            loaded: false,
        }
    }

    pub fn sender(&self) -> Option<&Sender> {
        let settings = self.settings.as_ref()?;
        match &self.sender_key {
            Some(key) => settings.senders.iter().find(|s| &s.key == key),
            None => settings.senders.first(),
        }
    }

    pub fn guest(&self, id: i64) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }
}
