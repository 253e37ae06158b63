/// Render a secret value in its on-disk form: decimal digits and a newline.
pub fn encode_secret(value: u32) -> String {
    format!("{}\n", value)
}

/// Turn raw file content into the value handed to callers.
pub fn decode_secret(content: &str) -> &str {
    content.trim()
}

/// Whether `content` is a well-formed secret file
#[cfg(test)]
pub fn is_well_formed(content: &str) -> bool {
    match content.strip_suffix('\n') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
