//! Error types for reference validation, CID decoding and index handling.
//!
//! Every validation error carries the offending value so the failure can be
//! traced back to its input without re-running anything.

use crate::cid::ReferenceType;

/// Hex string validation and conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum HexError {
    /// The value contains non-hex characters (or is empty).
    #[error("{name} is not a valid hex string: {value}")]
    NotHex {
        /// Name of the value being validated, for the error message.
        name: &'static str,
        /// The offending input.
        value: String,
    },

    /// The value is not a hex string of the requested character length.
    #[error("{name} is not a valid hex string of length {expected}: {value}")]
    WrongLength {
        /// Name of the value being validated.
        name: &'static str,
        /// Expected character length.
        expected: usize,
        /// The offending input.
        value: String,
    },

    /// Hex input with an odd number of characters cannot map to whole bytes.
    #[error("hex string has odd length: {value}")]
    OddLength {
        /// The offending input.
        value: String,
    },
}

/// Errors constructing a [`Reference`](crate::types::reference::Reference).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ReferenceError {
    /// The value contains non-hex characters.
    #[error("reference is not a valid hex string: {value}")]
    NotHex {
        /// The offending input.
        value: String,
    },

    /// The value is hex but not 64 characters long.
    #[error("reference does not have expected length of 64 characters: {value}")]
    Length {
        /// The offending input.
        value: String,
    },

    /// 128-character (encrypted) references are valid on the wire but not
    /// supported by this client core.
    #[error("encrypted references are not supported: {value}")]
    Encrypted {
        /// The offending input.
        value: String,
    },
}

/// Errors decoding or encoding cluster CIDs.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CidError {
    /// The textual CID could not be parsed at all.
    #[error("failed to parse CID: {0}")]
    Parse(#[from] cid::Error),

    /// The CID parsed but its multihash digest is not a 32-byte cluster digest.
    #[error("CID multihash digest is {len} bytes, expected 32")]
    DigestLength {
        /// Actual digest length in bytes.
        len: usize,
    },

    /// A strict decode was requested and the codec did not match.
    #[error("CID did not have Cluster {expected} codec")]
    UnexpectedCodec {
        /// The reference type the caller committed to.
        expected: ReferenceType,
        /// The codec actually present in the CID.
        found: u64,
    },
}

/// Errors normalizing a [`FeedIndex`](crate::types::feed::FeedIndex).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum IndexError {
    /// A decimal-string index did not parse as an unsigned integer.
    #[error("feed index is not a valid decimal number: {value}")]
    Decimal {
        /// The offending input.
        value: String,
    },
}
