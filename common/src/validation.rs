//! Form input checks shared by the server handlers and the UI.

pub const MIN_MOBILE_DIGITS: usize = 10;
pub const MAX_MOBILE_DIGITS: usize = 15;

/// Returns the trimmed guest name, or an error message when it is blank.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    Ok(name.to_string())
}

/// Normalises a mobile number to bare digits.
///
/// Spaces, dashes, dots, parentheses and one leading `+` are dropped. An empty
/// input yields `Ok(None)`; anything else must reduce to 10-15 ASCII digits.
pub fn normalize_mobile(raw: &str) -> Result<Option<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = String::with_capacity(body.len());
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(format!("Mobile number contains an invalid character: '{}'", ch)),
        }
    }

    if !(MIN_MOBILE_DIGITS..=MAX_MOBILE_DIGITS).contains(&digits.len()) {
        return Err(format!(
            "Mobile number must contain {} to {} digits",
            MIN_MOBILE_DIGITS, MAX_MOBILE_DIGITS
        ));
    }
    Ok(Some(digits))
}
