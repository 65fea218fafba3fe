//! Guest book: the add-guest form and the guest table in one component.
//!
//! Split the same way as the other components: `state` holds the data,
//! `update` reacts to `Msg`, `view` renders. On first render the guest list
//! and the sharing settings are fetched.

use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

use crate::api;
use crate::helpers::show_toast;
pub use messages::Msg;
pub use state::GuestBookComponent;

impl Component for GuestBookComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        GuestBookComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Reload);

            let link = ctx.link().clone();
            spawn_local(async move {
                match api::sharing_settings().await {
                    Ok(settings) => link.send_message(Msg::SettingsLoaded(settings)),
                    Err(e) => show_toast(&format!("Could not load sharing settings: {}", e)),
                }
            });
        }
    }
}
