//! Escaping: literal text to percent-encoded text.
//!
//! Walks the input by code point, so a surrogate pair is classified once as
//! the scalar it encodes. Code points classified [`CharClass::MustEscape`]
//! are written as their UTF-8 octets in `%XX` form; everything else is copied
//! as the original code units.
//!
//! Escaping does not look for existing percent-triplets. `%` is itself
//! escaped, so escaping already-escaped text escapes it a second time.

use alloc::{string::String, vec::Vec};

use crate::{CharClass, InputRange, Policy, RangeError, Utf16Buffer, classify};

/// Escapes `input` for `component`, appending to `out`.
pub fn escape_into(input: InputRange<'_>, component: impl Into<Policy>, out: &mut Utf16Buffer) {
    let policy = component.into();
    let units = input.as_units();
    let mut pos = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => {
                let width = ch.len_utf16();
                if classify(policy, u32::from(ch)) == CharClass::MustEscape {
                    out.push_escaped_char(ch);
                } else {
                    out.push_units(&units[pos..pos + width]);
                }
                pos += width;
            }
            Err(lone) => {
                log::trace!(
                    "escaping lone surrogate {:#06X} at {pos} as U+FFFD",
                    lone.unpaired_surrogate()
                );
                out.push_escaped_char(char::REPLACEMENT_CHARACTER);
                pos += 1;
            }
        }
    }
}

/// Escapes `input` for `component`.
#[must_use]
pub fn escape(input: InputRange<'_>, component: impl Into<Policy>) -> String {
    let mut out = Utf16Buffer::with_capacity(input.len());
    escape_into(input, component, &mut out);
    out.into_string()
}

/// Escapes `input` for `component`, returning UTF-16 code units.
#[must_use]
pub fn escape_utf16(input: InputRange<'_>, component: impl Into<Policy>) -> Vec<u16> {
    let mut out = Utf16Buffer::with_capacity(input.len());
    escape_into(input, component, &mut out);
    out.into_units()
}

/// Escapes `len` code units of `backing` starting at `offset`.
///
/// # Errors
///
/// Returns [`RangeError`] without producing output if the range does not fit
/// in `backing`.
pub fn escape_range(
    backing: &[u16],
    offset: usize,
    len: usize,
    component: impl Into<Policy>,
) -> Result<String, RangeError> {
    Ok(escape(InputRange::new(backing, offset, len)?, component))
}

/// Escapes a UTF-8 string for `component`.
#[must_use]
pub fn escape_str(input: &str, component: impl Into<Policy>) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    escape(InputRange::from(units.as_slice()), component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Component;

    fn escape_units(units: &[u16], component: Component) -> String {
        escape(InputRange::from(units), component)
    }

    #[test]
    fn reserved_characters_for_fragment_and_path() {
        let input = "/?#??#%[]";
        assert_eq!(
            escape_str(input, Component::Fragment),
            "%2F%3F%23%3F%3F%23%25%5B%5D"
        );
        assert_eq!(
            escape_str(input, Component::Path),
            "/%3F%23%3F%3F%23%25%5B%5D"
        );
    }

    #[test]
    fn escaping_is_not_idempotent() {
        let once = escape_str("a b", Component::Path);
        assert_eq!(once, "a%20b");
        assert_eq!(escape_str(&once, Component::Path), "a%2520b");
    }

    #[test]
    fn iri_characters_stay_literal() {
        assert_eq!(escape_str("中文/😀", Component::Path), "中文/😀");
        assert_eq!(escape_str("\u{A1}", Component::Fragment), "\u{A1}");
    }

    #[test]
    fn bidi_controls_are_escaped() {
        assert_eq!(escape_str("\u{200E}", Component::Path), "%E2%80%8E");
        assert_eq!(
            escape_str("\u{10003A}\u{200E}", Component::Query),
            "\u{10003A}%E2%80%8E"
        );
    }

    #[test]
    fn surrogate_pairs_are_one_code_point() {
        // U+10003A is private use: literal in a query, escaped elsewhere.
        let units = [0xDBC0, 0xDC3A];
        assert_eq!(escape_units(&units, Component::Query), "\u{10003A}");
        assert_eq!(escape_units(&units, Component::Path), "%F4%80%80%BA");
    }

    #[test]
    fn lone_surrogates_become_replacement_character() {
        let units = [0xDBC0, 0xDC3A, 0xDBC0];
        assert_eq!(
            escape_units(&units, Component::Query),
            "\u{10003A}%EF%BF%BD"
        );
        assert_eq!(
            escape_units(&[0xDC00, u16::from(b'a')], Component::Path),
            "%EF%BF%BDa"
        );
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(
            escape_units(&[0x00, 0x1F, 0x7F, 0x85], Component::AbsoluteUri),
            "%00%1F%7F%C2%85"
        );
    }

    #[test]
    fn range_contract_is_checked_first() {
        let backing: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(escape_range(&backing, 1, 2, Component::Path).unwrap(), "bc");
        assert!(escape_range(&backing, 2, 2, Component::Path).is_err());
    }
}
