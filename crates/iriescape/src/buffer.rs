//! Append-only UTF-16 output buffer.
//!
//! The codec writes exclusively through the `push_*` methods; there is no
//! indexed write. Everything the codec appends is well-formed UTF-16 (lone
//! surrogates are always escaped), so materializing into a `String` is
//! lossless.

use alloc::{string::String, vec::Vec};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Growable output of one escape or unescape call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utf16Buffer {
    units: Vec<u16>,
}

impl Utf16Buffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Creates an empty buffer with room for `capacity` code units.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::with_capacity(capacity),
        }
    }

    /// Number of code units written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The code units written so far.
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    #[inline]
    pub(crate) fn push_unit(&mut self, unit: u16) {
        self.units.push(unit);
    }

    #[inline]
    pub(crate) fn push_units(&mut self, units: &[u16]) {
        self.units.extend_from_slice(units);
    }

    /// Appends `ch` as one code unit, or a surrogate pair above U+FFFF.
    pub(crate) fn push_char(&mut self, ch: char) {
        let mut pair = [0u16; 2];
        self.push_units(ch.encode_utf16(&mut pair));
    }

    /// Appends `%XX` for one octet, uppercase hex.
    pub(crate) fn push_percent_encoded(&mut self, byte: u8) {
        self.units.extend_from_slice(&[
            u16::from(b'%'),
            u16::from(HEX_UPPER[usize::from(byte >> 4)]),
            u16::from(HEX_UPPER[usize::from(byte & 0x0F)]),
        ]);
    }

    /// Appends the UTF-8 encoding of `ch` as a run of percent-triplets.
    pub(crate) fn push_escaped_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        for &byte in ch.encode_utf8(&mut utf8).as_bytes() {
            self.push_percent_encoded(byte);
        }
    }

    /// Consumes the buffer, returning the raw code units.
    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.units
    }

    /// Consumes the buffer, returning it as a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        debug_assert!(
            char::decode_utf16(self.units.iter().copied()).all(|r| r.is_ok()),
            "codec produced a lone surrogate"
        );
        String::from_utf16_lossy(&self.units)
    }
}
