//! Unprefixed lowercase hex is the sole textual form for references, topics
//! and owner addresses. Everything here validates before converting so that
//! malformed input is rejected at the boundary with the offending value in
//! the error.

use crate::error::HexError;

/// Returns true iff `value` is a non-empty string of hex digits
/// (case-insensitive) and, when `len` is given, exactly that many characters.
pub fn is_hex_string(value: &str, len: Option<usize>) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_hexdigit())
        && len.is_none_or(|len| value.len() == len)
}

/// Assertion form of [`is_hex_string`]: the error names the value and, if a
/// length was requested, includes it.
pub fn assert_hex_string(value: &str, len: Option<usize>, name: &'static str) -> Result<(), HexError> {
    if is_hex_string(value, len) {
        return Ok(());
    }
    match len {
        Some(expected) => Err(HexError::WrongLength {
            name,
            expected,
            value: value.to_string(),
        }),
        None => Err(HexError::NotHex {
            name,
            value: value.to_string(),
        }),
    }
}

/// Converts bytes to unprefixed lowercase hex, two characters per byte.
///
/// When `expected_len` is given the produced character length is always
/// checked; this catches internal length bugs as well as bad external input.
pub fn bytes_to_hex(bytes: &[u8], expected_len: Option<usize>) -> Result<String, HexError> {
    let encoded = hex::encode(bytes);
    if let Some(expected) = expected_len
        && encoded.len() != expected
    {
        return Err(HexError::WrongLength {
            name: "encoded bytes",
            expected,
            value: encoded,
        });
    }
    Ok(encoded)
}

/// Parses an unprefixed hex string (either case) into bytes.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, HexError> {
    assert_hex_string(value, None, "value")?;
    if value.len() % 2 != 0 {
        return Err(HexError::OddLength {
            value: value.to_string(),
        });
    }
    hex::decode(value).map_err(|_| HexError::NotHex {
        name: "value",
        value: value.to_string(),
    })
}

/// Parses a hex string of exactly `2 * N` characters into a fixed-size array.
pub fn hex_to_array<const N: usize>(value: &str, name: &'static str) -> Result<[u8; N], HexError> {
    assert_hex_string(value, Some(2 * N), name)?;
    let mut bytes = [0u8; N];
    hex::decode_to_slice(value, &mut bytes).map_err(|_| HexError::NotHex {
        name,
        value: value.to_string(),
    })?;
    Ok(bytes)
}
