//! The identifier value type and its text form.
//!
//! Storage is a `uuid::Uuid`, which is itself an inline `[u8; 16]`. The `uuid` crate supplies
//! the random source for generation and the hex codec; everything else about the value
//! (strict canonical parsing, uppercase output, equality against the closed set of
//! [`Comparand`] kinds) is defined here.

use crate::{UuidError, UuidResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Number of bytes in every identifier.
pub const UUID_BYTE_LEN: usize = 16;

/// Number of characters in the canonical hyphenated text form.
pub const UUID_STRING_LEN: usize = 36;

const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// An immutable 16-byte universally unique identifier.
///
/// Two values are the same identifier exactly when their bytes are equal, whichever way each
/// was constructed. Copies are independent values; nothing can mutate the bytes after
/// construction.
///
/// # Construction
/// - [`UuidValue::generate`] creates a random RFC 4122 version-4 identifier.
/// - [`UuidValue::from_bytes`] and [`UuidValue::from_slice`] copy raw bytes without
///   validation.
/// - [`UuidValue::parse`] reads the canonical hyphenated form in either case.
///
/// # Display format
/// `Display` and [`UuidValue::to_canonical_string`] both produce the 36-character hyphenated
/// form with uppercase hex digits.
#[derive(Clone, Copy, Debug)]
pub struct UuidValue(Uuid);

impl Default for UuidValue {
    fn default() -> Self {
        Self::generate()
    }
}

impl UuidValue {
    /// Generates a random version-4 identifier.
    ///
    /// Sixteen bytes are drawn from the operating system's secure random source, then the high
    /// nibble of byte 6 is set to `0100` and the top two bits of byte 8 to `10`. Failure of the
    /// random source is fatal and is not reported as an error.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the canonical 36-character hyphenated form.
    ///
    /// Hex digits may be upper or lower case. The bytes are produced in the order the digit
    /// groups appear.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` has the wrong length, has a hyphen out of
    /// place, or contains anything other than hex digits between the hyphens.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            tracing::debug!(len = input.len(), "rejected non-canonical UUID string");
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 36 characters in 8-4-4-4-12 hyphenated hex form, got: '{}'",
                input
            )));
        }

        Uuid::try_parse(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid UUID '{}': {}", input, e)))
    }

    /// Returns true if `input` is in the canonical hyphenated form.
    ///
    /// This is a purely syntactic check:
    /// - exactly 36 bytes long
    /// - `-` at offsets 8, 13, 18 and 23
    /// - ASCII hex digits (either case) everywhere else
    pub fn is_canonical(input: &str) -> bool {
        input.len() == UUID_STRING_LEN
            && input.bytes().enumerate().all(|(i, b)| {
                if HYPHEN_OFFSETS.contains(&i) {
                    b == b'-'
                } else {
                    b.is_ascii_hexdigit()
                }
            })
    }

    /// Wraps 16 bytes verbatim. Version and variant bits are not inspected.
    pub const fn from_bytes(bytes: [u8; UUID_BYTE_LEN]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Copies 16 bytes out of a slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly 16 bytes long. Passing any other length is a bug in
    /// the caller; use [`UuidValue::from_bytes`] to have the length checked at compile time.
    pub fn from_slice(bytes: &[u8]) -> Self {
        assert_eq!(
            bytes.len(),
            UUID_BYTE_LEN,
            "UuidValue::from_slice requires exactly {} bytes",
            UUID_BYTE_LEN
        );
        let mut buffer = [0u8; UUID_BYTE_LEN];
        buffer.copy_from_slice(bytes);
        Self::from_bytes(buffer)
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; UUID_BYTE_LEN] {
        self.0.as_bytes()
    }

    /// Returns a copy of the raw bytes.
    pub fn to_bytes(&self) -> [u8; UUID_BYTE_LEN] {
        *self.0.as_bytes()
    }

    /// Writes the raw bytes into caller-owned storage.
    pub fn copy_bytes_into(&self, destination: &mut [u8; UUID_BYTE_LEN]) {
        destination.copy_from_slice(self.0.as_bytes());
    }

    /// Formats the identifier as `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` in uppercase hex.
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Compares against any of the identifier representations in [`Comparand`].
    ///
    /// Comparison is byte-for-byte in storage order. A value compared with itself returns
    /// `true` without looking at the bytes, and [`Comparand::Unrelated`] is never equal.
    pub fn is_equal<'a>(&self, other: impl Into<Comparand<'a>>) -> bool {
        match other.into() {
            Comparand::Native(native) => self.0.as_bytes() == native.as_bytes(),
            Comparand::Value(value) => std::ptr::eq(self, value) || self.0 == value.0,
            Comparand::Unrelated => false,
        }
    }

    /// Hashes the 16 bytes with an unkeyed SipHash.
    ///
    /// Equal identifiers always produce equal results. The result is stable for the lifetime
    /// of the process; it is not promised to survive a toolchain upgrade.
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// The kinds of value a [`UuidValue`] can be compared against.
#[derive(Clone, Copy, Debug)]
pub enum Comparand<'a> {
    /// The native `uuid::Uuid` representation.
    Native(&'a Uuid),
    /// Another `UuidValue`.
    Value(&'a UuidValue),
    /// Anything that is not an identifier.
    Unrelated,
}

impl<'a> From<&'a Uuid> for Comparand<'a> {
    fn from(native: &'a Uuid) -> Self {
        Comparand::Native(native)
    }
}

impl<'a> From<&'a UuidValue> for Comparand<'a> {
    fn from(value: &'a UuidValue) -> Self {
        Comparand::Value(value)
    }
}

impl PartialEq for UuidValue {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for UuidValue {}

impl PartialEq<Uuid> for UuidValue {
    fn eq(&self, other: &Uuid) -> bool {
        self.is_equal(other)
    }
}

impl PartialEq<UuidValue> for Uuid {
    fn eq(&self, other: &UuidValue) -> bool {
        other.is_equal(self)
    }
}

impl PartialEq<[u8; UUID_BYTE_LEN]> for UuidValue {
    fn eq(&self, other: &[u8; UUID_BYTE_LEN]) -> bool {
        self.as_bytes() == other
    }
}

impl Hash for UuidValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_bytes().hash(state);
    }
}

impl fmt::Display for UuidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Uuid::encode_buffer();
        f.write_str(self.0.hyphenated().encode_upper(&mut buffer))
    }
}

impl FromStr for UuidValue {
    type Err = UuidError;

    /// Equivalent to [`UuidValue::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UuidValue::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UuidValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UuidValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UuidValue::parse(&s).map_err(serde::de::Error::custom)
    }
}
