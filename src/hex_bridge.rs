use crate::error::{CodecError, Result};

/// Converts text to the uppercase hex of its UTF-8 bytes.
/// Non-ASCII characters contribute their percent-encoded byte sequence, ASCII one byte each.
pub fn text_to_hex(text: &str) -> String {
    hex::encode_upper(text.as_bytes())
}

/// Converts a hex byte dump back to text, reporting why it failed
pub fn try_hex_to_text(hex_str: &str) -> Result<String> {
    let bytes = hex::decode(hex_str)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidText)
}

/// Converts a hex byte dump back to text.
/// Returns `None` for odd length, non-hex digits, or bytes that are not UTF-8.
pub fn hex_to_text(hex_str: &str) -> Option<String> {
    try_hex_to_text(hex_str).ok()
}
