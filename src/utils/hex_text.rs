//! Text carried over the registry wire as `0x`-prefixed hex.
//!
//! `bytes32` slots are right-padded with zero bytes, so decoding strips `00`
//! padding from both ends before reading the bytes as UTF-8.

use crate::utils::error::DecodeError;

pub const BYTES32_LEN: usize = 32;

/// Decodes a `0x`-prefixed hex string into text.
pub fn decode_hex_text(raw: &str) -> Result<String, DecodeError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or(DecodeError::MissingPrefix)?;

    let bytes = hex::decode(digits).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
    decode_text_bytes(&bytes)
}

/// Reads zero-padded bytes as UTF-8 text.
pub fn decode_text_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| *b != 0).map_or(start, |i| i + 1);

    std::str::from_utf8(&bytes[start..end])
        .map(str::to_string)
        .map_err(|e| DecodeError::InvalidUtf8(e.to_string()))
}

pub fn encode_hex_text(text: &str) -> String {
    to_raw(text.as_bytes())
}

pub fn to_raw(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Packs text into a right-padded `bytes32` key.
pub fn encode_bytes32(text: &str) -> Result<[u8; BYTES32_LEN], DecodeError> {
    let bytes = text.as_bytes();
    if bytes.len() > BYTES32_LEN {
        return Err(DecodeError::TooLong {
            len: bytes.len(),
            max: BYTES32_LEN,
        });
    }

    let mut out = [0u8; BYTES32_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}
