//! View rendering for the guest book: the add form on top, the guest table
//! below.

use common::model::guest::Guest;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::GuestBookComponent;

pub fn view(component: &GuestBookComponent, ctx: &Context<GuestBookComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div>
            { build_add_form(component, link) }
            { build_sender_bar(component, link) }
            { build_guest_table(component, link) }
        </div>
    }
}

fn build_add_form(component: &GuestBookComponent, link: &Scope<GuestBookComponent>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let on_name = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::NameInput(input.value())
    });
    let on_mobile = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::MobileInput(input.value())
    });

    html! {
        <form {onsubmit} style="display:flex;flex-wrap:wrap;gap:12px;align-items:flex-end;margin-bottom:24px;">
            <label style="display:flex;flex-direction:column;gap:4px;">
                {"Guest name (English)"}
                <input type="text" value={component.name.clone()} oninput={on_name} placeholder="e.g. Ramesh Patel" />
            </label>
            <label style="display:flex;flex-direction:column;gap:4px;">
                {"Mobile (optional)"}
                <input type="tel" value={component.mobile.clone()} oninput={on_mobile} placeholder="+91 98765 43210" />
            </label>
            <button class="primary" type="submit" disabled={component.submitting}>
                { if component.submitting { "Adding..." } else { "Add guest" } }
            </button>
            <div style="flex-basis:100%;min-height:1.5em;font-size:1.2rem;color:#b23a48;">
                {
                    match &component.preview {
                        Some(gujarati) => html! { <span>{"Gujarati: "}<strong>{ gujarati.clone() }</strong></span> },
                        None => html! {},
                    }
                }
            </div>
        </form>
    }
}

fn build_sender_bar(component: &GuestBookComponent, link: &Scope<GuestBookComponent>) -> Html {
    let Some(settings) = &component.settings else {
        return html! {};
    };
    let onchange = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectSender(select.value())
    });
    let selected = component.sender().map(|s| s.key.clone()).unwrap_or_default();

    html! {
        <div style="margin-bottom:12px;">
            <label>
                {"Sending as "}
                <select {onchange}>
                    { for settings.senders.iter().map(|s| html! {
                        <option value={s.key.clone()} selected={s.key == selected}>{ s.name.clone() }</option>
                    }) }
                </select>
            </label>
        </div>
    }
}

fn build_guest_table(component: &GuestBookComponent, link: &Scope<GuestBookComponent>) -> Html {
    if component.guests.is_empty() {
        return html! { <p>{"No guests yet."}</p> };
    }
    let sent = component.guests.iter().filter(|g| g.is_sent()).count();

    html! {
        <>
            <p>{ format!("{} guests, {} sent", component.guests.len(), sent) }</p>
            <table>
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"ગુજરાતી"}</th>
                        <th>{"Mobile"}</th>
                        <th>{"Remark"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for component.guests.iter().map(|g| build_guest_row(component, link, g)) }
                </tbody>
            </table>
        </>
    }
}

fn build_guest_row(
    component: &GuestBookComponent,
    link: &Scope<GuestBookComponent>,
    guest: &Guest,
) -> Html {
    let id = guest.id;
    let row_style = if guest.is_sent() { "background:#eef7ee;" } else { "" };
    let sharing_this = component.sharing == Some(id);

    html! {
        <tr key={id} style={row_style}>
            <td>{ guest.name_english.clone() }</td>
            <td style="font-size:1.1rem;">{ guest.name_gujarati.clone() }</td>
            <td>{ build_mobile_cell(component, link, guest) }</td>
            <td>{ guest.remark.clone().unwrap_or_default() }</td>
            <td style="white-space:nowrap;display:flex;gap:6px;">
                <a href={format!("/api/invitations/{}/pdf", id)}>
                    <button type="button">{"PDF"}</button>
                </a>
                <button
                    class="primary"
                    type="button"
                    disabled={component.sharing.is_some()}
                    onclick={link.callback(move |_| Msg::Share(id))}
                >
                    { if sharing_this { "Preparing..." } else { "WhatsApp" } }
                </button>
                <button type="button" onclick={link.callback(move |_| Msg::Delete(id))}>{"Delete"}</button>
            </td>
        </tr>
    }
}

fn build_mobile_cell(
    component: &GuestBookComponent,
    link: &Scope<GuestBookComponent>,
    guest: &Guest,
) -> Html {
    let id = guest.id;
    match &component.editing_mobile {
        Some((editing_id, text)) if *editing_id == id => {
            let oninput = link.callback(|e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::EditMobileInput(input.value())
            });
            let onkeydown = link.batch_callback(|e: KeyboardEvent| match e.key().as_str() {
                "Enter" => Some(Msg::SaveMobile),
                "Escape" => Some(Msg::CancelEditMobile),
                _ => None,
            });
            html! {
                <span style="display:flex;gap:4px;">
                    <input type="tel" value={text.clone()} {oninput} {onkeydown} size="14" />
                    <button type="button" onclick={link.callback(|_| Msg::SaveMobile)}>{"Save"}</button>
                    <button type="button" onclick={link.callback(|_| Msg::CancelEditMobile)}>{"✕"}</button>
                </span>
            }
        }
        _ => html! {
            <span
                style="cursor:pointer;border-bottom:1px dashed #999;"
                title="Click to edit"
                onclick={link.callback(move |_| Msg::StartEditMobile(id))}
            >
                { guest.mobile.clone().unwrap_or_else(|| "add".to_string()) }
            </span>
        },
    }
}
