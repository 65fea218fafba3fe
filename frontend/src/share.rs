//! Hands an invitation card to WhatsApp.
//!
//! Phones that support the Web Share API with files get the PDF and the
//! message in the native share sheet, where WhatsApp can be picked. Other
//! browsers download the PDF and open a `wa.me` link with the message
//! filled in; the user attaches the file by hand.

use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag, HtmlAnchorElement, Url};

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet completed.
    Shared,
    /// The PDF was downloaded and a WhatsApp chat opened.
    LinkOpened,
    /// The user closed the share sheet.
    Cancelled,
}

pub async fn share_invitation(
    pdf: &[u8],
    file_name: &str,
    message: &str,
    whatsapp_link: &str,
) -> Result<ShareOutcome, String> {
    let window = web_sys::window().ok_or("No browser window")?;
    let parts = Array::of1(&Uint8Array::from(pdf));

    let file_options = FilePropertyBag::new();
    file_options.set_type(PDF_MIME);
    let file = File::new_with_u8_array_sequence_and_options(&parts, file_name, &file_options)
        .map_err(js_error)?;

    let navigator: JsValue = window.navigator().into();
    let data = Object::new();
    Reflect::set(&data, &"files".into(), &Array::of1(&file)).map_err(js_error)?;

    if can_share(&navigator, &data) {
        Reflect::set(&data, &"text".into(), &message.into()).map_err(js_error)?;
        let share = Reflect::get(&navigator, &"share".into())
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(js_error)?;
        let promise: Promise = share
            .call1(&navigator, &data)
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        return match JsFuture::from(promise).await {
            Ok(_) => Ok(ShareOutcome::Shared),
            Err(e) if error_name(&e).as_deref() == Some("AbortError") => Ok(ShareOutcome::Cancelled),
            Err(e) => Err(js_error(e)),
        };
    }

    download(pdf, file_name)?;
    window
        .open_with_url_and_target(whatsapp_link, "_blank")
        .map_err(js_error)?;
    Ok(ShareOutcome::LinkOpened)
}

/// `navigator.canShare(data)`, false when the browser lacks the API.
fn can_share(navigator: &JsValue, data: &Object) -> bool {
    Reflect::get(navigator, &"canShare".into())
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .and_then(|f| f.call1(navigator, data).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn download(pdf: &[u8], file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let body = document.body().ok_or("No document body")?;

    let options = BlobPropertyBag::new();
    options.set_type(PDF_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&Uint8Array::from(pdf)), &options)
        .map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Cannot create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).ok();
    Url::revoke_object_url(&url).ok();
    Ok(())
}

fn error_name(err: &JsValue) -> Option<String> {
    Reflect::get(err, &"name".into()).ok()?.as_string()
}

fn js_error(err: impl Into<JsValue>) -> String {
    let err = err.into();
    err.as_string()
        .or_else(|| {
            Reflect::get(&err, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "Sharing failed".to_string())
}

/// Extracts `filename` from a `Content-Disposition` header value.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|param| {
        let value = param.strip_prefix("filename=")?;
        let value = value.trim_matches('"').replace("\\\"", "\"");
        (!value.is_empty()).then_some(value)
    })
}
