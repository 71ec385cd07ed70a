//! # Print Payload Encoding
//!
//! The printer only understands GBK. Text is converted strictly: a single
//! character outside GBK rejects the whole payload, since the vendor would
//! otherwise print the HTML numeric escape `encoding_rs` substitutes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::MemobirdError;

/// Content-type tag for plain text payloads.
pub const TEXT_TAG: &str = "T:";

/// Convert UTF-8 text to GBK bytes.
///
/// Returns [`MemobirdError::Encoding`] naming the first character that has
/// no GBK representation.
pub fn utf8_to_gbk(text: &str) -> Result<Vec<u8>, MemobirdError> {
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(text);
    if had_errors {
        let character = first_unencodable(text).unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(MemobirdError::Encoding { character });
    }
    Ok(bytes.into_owned())
}

fn first_unencodable(text: &str) -> Option<char> {
    let mut buf = [0u8; 4];
    text.chars().find(|c| {
        let (_, _, had_errors) = encoding_rs::GBK.encode(c.encode_utf8(&mut buf));
        had_errors
    })
}

/// Build the `printcontent` form value for a text payload.
pub fn text_content(text: &str) -> Result<String, MemobirdError> {
    let gbk = utf8_to_gbk(text)?;
    Ok(format!("{}{}", TEXT_TAG, STANDARD.encode(gbk)))
}
