//! Note ID generation and textual encoding.
//!
//! IDs are 128-bit UUIDs (v4 or v7, per configuration) rendered as
//! base32/base64 text. The charset is either a named preset or a custom
//! alphabet, which is validated before any ID is generated.

use data_encoding::{Encoding, Specification};
use uuid::Uuid;

use crate::config::{EncodeConfig, IdConfig};
use crate::error::{VaultError, VaultResult};

const BASE32_STD: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE32_HEX: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUV";
const BASE64_STD: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_URL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate and encode a fresh ID in one step.
///
/// The encoding is resolved (and the charset validated) before the ID is
/// generated, so a bad charset never consumes an ID.
pub fn generate_encoded(config: &IdConfig) -> VaultResult<String> {
    let encoding = encoding(&config.encode)?;
    let id = generate(&config.id_type)?;
    Ok(encoding.encode(&id))
}

/// Generate the raw ID bytes for the configured algorithm.
pub fn generate(id_type: &str) -> VaultResult<[u8; 16]> {
    match id_type {
        "UUIDv4" => Ok(*Uuid::new_v4().as_bytes()),
        "UUIDv7" => Ok(*Uuid::now_v7().as_bytes()),
        other => Err(VaultError::UnsupportedIdType(other.to_string())),
    }
}

/// Resolve the configured output encoding.
pub fn encoding(encode: &EncodeConfig) -> VaultResult<Encoding> {
    let symbols = match encode.format.as_str() {
        "base32" => match encode.charset.as_str() {
            "StdEncoding" => BASE32_STD.to_string(),
            "HexEncoding" => BASE32_HEX.to_string(),
            // base32 requires precisely 32 characters
            custom => validated_charset(custom, 32)?,
        },
        "base64" => match encode.charset.as_str() {
            "StdEncoding" => BASE64_STD.to_string(),
            "URLEncoding" => BASE64_URL.to_string(),
            // base64 requires precisely 64 characters
            custom => validated_charset(custom, 64)?,
        },
        other => return Err(VaultError::UnsupportedEncoding(other.to_string())),
    };

    let mut spec = Specification::new();
    spec.symbols = symbols;
    if encode.padding {
        spec.padding = Some('=');
    }
    spec.encoding()
        .map_err(|e| VaultError::charset(e.to_string()))
}

fn validated_charset(charset: &str, expected: usize) -> VaultResult<String> {
    let len = charset.chars().count();
    if len != expected {
        return Err(VaultError::charset(format!(
            "expected {expected} characters, got {len}"
        )));
    }
    for (i, c) in charset.char_indices() {
        if c == '\n' || c == '\r' {
            return Err(VaultError::charset("charset contains a line break"));
        }
        if charset[..i].contains(c) {
            return Err(VaultError::charset(format!("duplicate character {c:?}")));
        }
    }
    Ok(charset.to_string())
}
