//! Keyed archive interface and the identifier's archive encoding.
//!
//! A [`UuidValue`] is archived as a single byte field named [`UUID_BYTES_KEY`] holding the 16
//! raw bytes. Archives that can only be read positionally are not supported: a [`Decoder`]
//! advertises keyed lookup through [`Decoder::as_keyed`], and decoding fails with
//! [`ArchiveError::UnsupportedFormat`] when it is absent.
//!
//! Two reference archives are provided:
//! - [`KeyedArchive`], an in-memory field map that can be persisted as JSON.
//! - [`SequentialArchive`], a positional byte queue with no keyed view.

use crate::value::{UuidValue, UUID_BYTE_LEN};
use std::collections::{BTreeMap, VecDeque};
#[cfg(feature = "serde")]
use std::path::Path;

/// Field name the identifier bytes are stored under.
pub const UUID_BYTES_KEY: &str = "uuidbytes";

/// Errors raised while encoding to or decoding from an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("{0} cannot be decoded by non-keyed coders")]
    UnsupportedFormat(&'static str),
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[cfg(feature = "serde")]
    #[error("failed to serialize archive: {0}")]
    Serialization(serde_json::Error),
    #[cfg(feature = "serde")]
    #[error("failed to deserialize archive: {0}")]
    Deserialization(serde_json::Error),
    #[cfg(feature = "serde")]
    #[error("failed to write archive file: {0}")]
    FileWrite(std::io::Error),
    #[cfg(feature = "serde")]
    #[error("failed to read archive file: {0}")]
    FileRead(std::io::Error),
}

pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

/// Write side of a keyed archive.
pub trait KeyedEncoder {
    /// Stores `bytes` under `key`, replacing any previous value.
    fn encode_bytes(&mut self, key: &str, bytes: &[u8]);
}

/// Keyed lookup on the read side of an archive.
pub trait KeyedDecoder {
    /// Returns the bytes stored under `key`, if any.
    fn decode_bytes(&self, key: &str) -> Option<&[u8]>;
}

/// Read side of an archive.
pub trait Decoder {
    /// Returns the keyed view of this archive, or `None` if it can only be read positionally.
    fn as_keyed(&self) -> Option<&dyn KeyedDecoder>;
}

/// Types that can be written to and read back from an archive.
///
/// The associated constants let a framework pick a compatible archive format before
/// attempting to encode or decode.
pub trait Coding: Sized {
    /// The type validates everything it decodes and never trusts archived type information.
    const SUPPORTS_SECURE_CODING: bool;
    /// The type can only be decoded from archives that support keyed lookup.
    const REQUIRES_KEYED_CODING: bool;

    fn encode<E: KeyedEncoder + ?Sized>(&self, encoder: &mut E);

    fn decode<D: Decoder + ?Sized>(decoder: &D) -> ArchiveResult<Self>;
}

impl Coding for UuidValue {
    const SUPPORTS_SECURE_CODING: bool = true;
    const REQUIRES_KEYED_CODING: bool = true;

    /// Writes the 16 raw bytes under [`UUID_BYTES_KEY`].
    fn encode<E: KeyedEncoder + ?Sized>(&self, encoder: &mut E) {
        encoder.encode_bytes(UUID_BYTES_KEY, self.as_bytes());
    }

    /// Reads the 16 raw bytes under [`UUID_BYTES_KEY`].
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::UnsupportedFormat`] if the archive has no keyed view.
    /// - [`ArchiveError::CorruptData`] if the field is missing or is not exactly 16 bytes.
    fn decode<D: Decoder + ?Sized>(decoder: &D) -> ArchiveResult<Self> {
        let Some(keyed) = decoder.as_keyed() else {
            tracing::warn!("UuidValue decode attempted with a non-keyed archive");
            return Err(ArchiveError::UnsupportedFormat("UuidValue"));
        };

        let field = keyed.decode_bytes(UUID_BYTES_KEY).ok_or_else(|| {
            tracing::debug!(key = UUID_BYTES_KEY, "archive field missing");
            ArchiveError::CorruptData(format!("required field `{}` missing", UUID_BYTES_KEY))
        })?;

        let bytes: [u8; UUID_BYTE_LEN] = field.try_into().map_err(|_| {
            tracing::debug!(key = UUID_BYTES_KEY, len = field.len(), "archive field mis-sized");
            ArchiveError::CorruptData(format!(
                "expected {} bytes, found {}",
                UUID_BYTE_LEN,
                field.len()
            ))
        })?;

        Ok(UuidValue::from_bytes(bytes))
    }
}

/// In-memory archive that stores byte fields by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyedArchive {
    fields: BTreeMap<String, Vec<u8>>,
}

impl KeyedArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Serializes the archive as a JSON object of field name to lowercase hex.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> ArchiveResult<String> {
        let encoded: BTreeMap<&str, String> = self
            .fields
            .iter()
            .map(|(key, bytes)| (key.as_str(), hex::encode(bytes)))
            .collect();
        serde_json::to_string_pretty(&encoded).map_err(ArchiveError::Serialization)
    }

    /// Parses an archive produced by [`KeyedArchive::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Deserialization`] for malformed JSON and
    /// [`ArchiveError::CorruptData`] for a field that is not valid hex.
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> ArchiveResult<Self> {
        let encoded: BTreeMap<String, String> =
            serde_json::from_str(input).map_err(ArchiveError::Deserialization)?;

        let fields = encoded
            .into_iter()
            .map(|(key, value)| match hex::decode(&value) {
                Ok(bytes) => Ok((key, bytes)),
                Err(e) => Err(ArchiveError::CorruptData(format!(
                    "field `{}` is not valid hex: {}",
                    key, e
                ))),
            })
            .collect::<ArchiveResult<BTreeMap<_, _>>>()?;

        Ok(Self { fields })
    }

    #[cfg(feature = "serde")]
    pub fn write_to_path(&self, path: &Path) -> ArchiveResult<()> {
        std::fs::write(path, self.to_json()?).map_err(ArchiveError::FileWrite)
    }

    #[cfg(feature = "serde")]
    pub fn read_from_path(path: &Path) -> ArchiveResult<Self> {
        let input = std::fs::read_to_string(path).map_err(ArchiveError::FileRead)?;
        Self::from_json(&input)
    }
}

impl KeyedEncoder for KeyedArchive {
    fn encode_bytes(&mut self, key: &str, bytes: &[u8]) {
        self.fields.insert(key.to_owned(), bytes.to_vec());
    }
}

impl KeyedDecoder for KeyedArchive {
    fn decode_bytes(&self, key: &str) -> Option<&[u8]> {
        self.fields.get(key).map(Vec::as_slice)
    }
}

impl Decoder for KeyedArchive {
    fn as_keyed(&self) -> Option<&dyn KeyedDecoder> {
        Some(self)
    }
}

/// In-memory archive that can only be read back in the order it was written.
#[derive(Clone, Debug, Default)]
pub struct SequentialArchive {
    entries: VecDeque<Vec<u8>>,
}

impl SequentialArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.entries.push_back(bytes.to_vec());
    }

    /// Removes and returns the oldest entry.
    pub fn next_bytes(&mut self) -> Option<Vec<u8>> {
        self.entries.pop_front()
    }
}

impl Decoder for SequentialArchive {
    fn as_keyed(&self) -> Option<&dyn KeyedDecoder> {
        None
    }
}
