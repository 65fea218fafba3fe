use crate::share::ShareOutcome;
use common::model::guest::Guest;
use common::model::sender::SharingSettings;

pub enum Msg {
    Reload,
    GuestsLoaded(Vec<Guest>),
    SettingsLoaded(SharingSettings),

    NameInput(String),
    MobileInput(String),
    RequestPreview(u32),
    PreviewReady { seq: u32, gujarati: String },
    Submit,
    GuestAdded(Guest),
    SubmitFailed(String),

    SelectSender(String),
    Share(i64),
    ShareFinished { id: i64, outcome: ShareOutcome },
    ShareFailed(String),

    StartEditMobile(i64),
    EditMobileInput(String),
    SaveMobile,
    CancelEditMobile,

    Delete(i64),
}
