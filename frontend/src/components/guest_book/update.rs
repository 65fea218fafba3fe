//! Update function for the guest book component.
//!
//! Elm-style: mutate the state for `msg`, start any request with
//! `spawn_local`, and return whether the view must re-render. Server errors
//! are reported with toasts; the state is only changed once the server
//! agreed.

use common::requests::NewGuest;
use common::share::{render_message, whatsapp_link};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{confirm, prompt, show_toast};
use crate::share::{share_invitation, ShareOutcome};

use super::messages::Msg;
use super::state::GuestBookComponent;

const PREVIEW_DELAY_MS: u32 = 400;
const FALLBACK_FILE_NAME: &str = "invitation.pdf";

pub fn update(
    component: &mut GuestBookComponent,
    ctx: &Context<GuestBookComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Reload => {
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::list_guests().await {
                    Ok(guests) => link.send_message(Msg::GuestsLoaded(guests)),
                    Err(e) => show_toast(&format!("Could not load guests: {}", e)),
                }
            });
            false
        }
        Msg::GuestsLoaded(guests) => {
            component.guests = guests;
            true
        }
        Msg::SettingsLoaded(settings) => {
            if component.sender_key.is_none() {
                component.sender_key = settings.senders.first().map(|s| s.key.clone());
            }
            component.settings = Some(settings);
            true
        }

        Msg::NameInput(name) => {
            component.name = name;
            component.preview_seq = component.preview_seq.wrapping_add(1);
            if component.name.trim().is_empty() {
                component.preview = None;
                return true;
            }
            // Wait for typing to pause before asking the server.
            let seq = component.preview_seq;
            let link = ctx.link().clone();
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(PREVIEW_DELAY_MS).await;
                link.send_message(Msg::RequestPreview(seq));
            });
            true
        }
        Msg::RequestPreview(seq) => {
            if seq != component.preview_seq {
                return false;
            }
            let name = component.name.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                if let Ok(resp) = api::translate(&name).await {
                    link.send_message(Msg::PreviewReady {
                        seq,
                        gujarati: resp.name_gujarati,
                    });
                }
            });
            false
        }
        Msg::PreviewReady { seq, gujarati } => {
            if seq != component.preview_seq {
                return false;
            }
            component.preview = Some(gujarati);
            true
        }
        Msg::MobileInput(mobile) => {
            component.mobile = mobile;
            true
        }
        Msg::Submit => {
            if component.submitting {
                return false;
            }
            if component.name.trim().is_empty() {
                show_toast("Name is required");
                return false;
            }
            component.submitting = true;
            let payload = NewGuest {
                name_english: component.name.clone(),
                mobile: Some(component.mobile.clone()).filter(|m| !m.trim().is_empty()),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::add_guest(&payload).await {
                    Ok(guest) => link.send_message(Msg::GuestAdded(guest)),
                    Err(e) => link.send_message(Msg::SubmitFailed(e)),
                }
            });
            true
        }
        Msg::GuestAdded(guest) => {
            show_toast(&format!("Added {} ({})", guest.name_english, guest.name_gujarati));
            component.submitting = false;
            component.name.clear();
            component.mobile.clear();
            component.preview = None;
            component.preview_seq = component.preview_seq.wrapping_add(1);
            component.guests.insert(0, guest);
            true
        }
        Msg::SubmitFailed(e) => {
            component.submitting = false;
            show_toast(&e);
            true
        }

        Msg::SelectSender(key) => {
            component.sender_key = Some(key);
            true
        }
        Msg::Share(id) => {
            if component.sharing.is_some() {
                return false;
            }
            let (Some(guest), Some(sender), Some(settings)) = (
                component.guest(id).cloned(),
                component.sender().cloned(),
                component.settings.as_ref(),
            ) else {
                show_toast("Sharing settings are not loaded yet");
                return false;
            };

            let message = render_message(&settings.message_template, &guest.name_gujarati, &sender.name);
            let wa_link = whatsapp_link(guest.mobile.as_deref(), &message);
            component.sharing = Some(id);

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match api::invitation_pdf(id).await {
                    Ok((pdf, file_name)) => {
                        let file_name = file_name.unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
                        share_invitation(&pdf, &file_name, &message, &wa_link).await
                    }
                    Err(e) => Err(e),
                };
                match result {
                    Ok(outcome) => link.send_message(Msg::ShareFinished { id, outcome }),
                    Err(e) => link.send_message(Msg::ShareFailed(e)),
                }
            });
            true
        }
        Msg::ShareFinished { id, outcome } => {
            component.sharing = None;
            if outcome == ShareOutcome::Cancelled {
                return true;
            }
            let Some(guest) = component.guest(id) else {
                return true;
            };
            let default_remark = component
                .sender()
                .map(|s| format!("Sent by {}", s.name))
                .unwrap_or_default();
            // Cancelling the prompt leaves the guest untouched.
            if let Some(remark) = prompt(
                &format!("Remark for {} (e.g. who sent it)", guest.name_english),
                &default_remark,
            ) {
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::update_remark(id, &remark).await {
                        Ok(_) => {
                            show_toast("Remark saved");
                            link.send_message(Msg::Reload);
                        }
                        Err(e) => show_toast(&format!("Could not save remark: {}", e)),
                    }
                });
            }
            true
        }
        Msg::ShareFailed(e) => {
            gloo_console::error!(format!("share failed: {}", e));
            component.sharing = None;
            show_toast(&format!("Could not share the invitation: {}", e));
            true
        }

        Msg::StartEditMobile(id) => {
            let current = component
                .guest(id)
                .and_then(|g| g.mobile.clone())
                .unwrap_or_default();
            component.editing_mobile = Some((id, current));
            true
        }
        Msg::EditMobileInput(value) => {
            if let Some((_, text)) = component.editing_mobile.as_mut() {
                *text = value;
            }
            false
        }
        Msg::SaveMobile => {
            let Some((id, mobile)) = component.editing_mobile.take() else {
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::update_mobile(id, &mobile).await {
                    Ok(_) => {
                        show_toast("Mobile number updated");
                        link.send_message(Msg::Reload);
                    }
                    Err(e) => show_toast(&e),
                }
            });
            true
        }
        Msg::CancelEditMobile => {
            component.editing_mobile = None;
            true
        }

        Msg::Delete(id) => {
            let Some(guest) = component.guest(id) else {
                return false;
            };
            if !confirm(&format!("Delete {}?", guest.name_english)) {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::delete_guest(id).await {
                    Ok(_) => link.send_message(Msg::Reload),
                    Err(e) => show_toast(&format!("Could not delete: {}", e)),
                }
            });
            false
        }
    }
}
