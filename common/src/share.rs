//! WhatsApp message and deep-link construction.
//!
//! Cards are sent manually: the UI either hands the PDF to the Web Share API
//! or opens a `wa.me` link with the message pre-filled. Both paths use the
//! text produced here.

const WA_ME: &str = "https://wa.me/";

/// Fills `{name}` and `{sender}` in a message template.
pub fn render_message(template: &str, guest_name: &str, sender_name: &str) -> String {
    template
        .replace("{name}", guest_name)
        .replace("{sender}", sender_name)
}

/// Builds `https://wa.me/<number>?text=<message>`.
///
/// Non-digit characters are removed from `phone`. Without a usable number the
/// link opens WhatsApp's contact picker instead.
pub fn whatsapp_link(phone: Option<&str>, message: &str) -> String {
    let digits: String = phone
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    format!("{}{}?text={}", WA_ME, digits, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_placeholders_are_filled() {
        let msg = render_message("Dear {name}, regards {sender}. {name}!", "રમેશ", "Sarthak");
        assert_eq!(msg, "Dear રમેશ, regards Sarthak. રમેશ!");
    }

    #[test]
    fn link_targets_number_and_encodes_text() {
        let link = whatsapp_link(Some("+91 97379 32864"), "Hello & welcome");
        assert_eq!(link, "https://wa.me/919737932864?text=Hello%20%26%20welcome");
    }

    #[test]
    fn link_without_number_opens_picker() {
        assert_eq!(whatsapp_link(None, "hi"), "https://wa.me/?text=hi");
    }

    #[test]
    fn gujarati_text_is_percent_encoded() {
        let link = whatsapp_link(Some("919737932864"), "રમેશ");
        assert!(link.ends_with("?text=%E0%AA%B0%E0%AA%AE%E0%AB%87%E0%AA%B6"));
    }
}
