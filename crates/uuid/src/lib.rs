//! A 128-bit identifier value type.
//!
//! [`UuidValue`] holds exactly 16 bytes and never changes once constructed. Values come from
//! one of four places:
//! - [`UuidValue::generate`] draws 16 random bytes and stamps the RFC 4122 version-4 and
//!   variant bits.
//! - [`UuidValue::from_bytes`] copies a caller-supplied buffer verbatim.
//! - [`UuidValue::parse`] reads the canonical hyphenated form.
//! - [`Coding::decode`] reads the `uuidbytes` field of a keyed archive.
//!
//! ## Canonical text form
//! - Length: 36
//! - Layout: `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` (8-4-4-4-12 hex digits)
//! - Output is always uppercase; input is accepted in either case.
//! - Example: `550E8400-E29B-41D4-A716-446655440000`
//!
//! Ingested bytes are never checked for version or variant bits. Any 16 bytes are a valid
//! identifier.
//!
//! ## Archives
//! The [`archive`] module defines the keyed encode/decode interface the type serializes
//! through, along with two small reference archives. Only keyed archives are supported; a
//! positional archive is rejected with [`ArchiveError::UnsupportedFormat`].

pub mod archive;
mod value;

// Re-export public types
pub use archive::{
    ArchiveError, ArchiveResult, Coding, Decoder, KeyedArchive, KeyedDecoder, KeyedEncoder,
    SequentialArchive, UUID_BYTES_KEY,
};
pub use value::{Comparand, UuidValue, UUID_BYTE_LEN, UUID_STRING_LEN};

/// Error type for UUID text operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID text operations.
pub type UuidResult<T> = Result<T, UuidError>;
