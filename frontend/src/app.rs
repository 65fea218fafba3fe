use crate::components::guest_book::GuestBookComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div style="max-width:960px;margin:0 auto;padding:24px;">
                <h1 style="color:#b23a48;">{"Wedding Invitations"}</h1>
                <GuestBookComponent />
            </div>
        }
    }
}
