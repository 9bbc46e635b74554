//! Per-component character classification.
//!
//! [`classify`] is a pure function of `(component, code point)`. It reads
//! only `const` data, so it is safe to call from any number of threads and
//! gives the same answer under every locale.

use crate::Policy;

/// How a code point is treated inside a given component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharClass {
    /// Always safe to appear literally; decoded back from a triplet.
    Unreserved,
    /// A delimiter this component keeps verbatim. Never decoded from a
    /// triplet, since that would change the meaning of the text.
    ComponentReserved,
    /// Has to appear as percent-encoded UTF-8.
    MustEscape,
}

/// RFC 3986 `unreserved` over ASCII.
const UNRESERVED_ASCII: u128 = {
    let mut mask = 0u128;
    let mut c = 0u8;
    while c < 128 {
        if c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~') {
            mask |= 1u128 << c;
        }
        c += 1;
    }
    mask
};

/// Classifies `cp` for a component, optionally keeping its delimiter.
///
/// `cp` is a `u32` rather than a `char` so that lone surrogates can be
/// classified; they are always [`CharClass::MustEscape`].
#[must_use]
pub fn classify(policy: impl Into<Policy>, cp: u32) -> CharClass {
    let policy = policy.into();
    if cp < 0x80 {
        let bit = 1u128 << cp;
        return if UNRESERVED_ASCII & bit != 0 {
            CharClass::Unreserved
        } else if policy.reserved_ascii() & bit != 0 {
            CharClass::ComponentReserved
        } else {
            CharClass::MustEscape
        };
    }

    if is_bidi_control(cp) {
        return CharClass::MustEscape;
    }
    if is_ucschar(cp) || (policy.allows_private_use() && is_iprivate(cp)) {
        CharClass::Unreserved
    } else {
        CharClass::MustEscape
    }
}

/// Bidirectional formatting characters that RFC 3987 §4.1 forbids in an
/// IRI: LRM, RLM, LRE, RLE, PDF, LRO and RLO.
#[must_use]
pub const fn is_bidi_control(cp: u32) -> bool {
    matches!(cp, 0x200E | 0x200F | 0x202A..=0x202E)
}

/// RFC 3987 `ucschar`.
#[must_use]
pub const fn is_ucschar(cp: u32) -> bool {
    match cp {
        0xA0..=0xD7FF | 0xF900..=0xFDCF | 0xFDF0..=0xFFEF => true,
        // Planes 1-13: everything but the two non-characters closing each.
        0x1_0000..=0xD_FFFF => cp & 0xFFFF < 0xFFFE,
        0xE_1000..=0xE_FFFD => true,
        _ => false,
    }
}

/// RFC 3987 `iprivate`.
#[must_use]
pub const fn is_iprivate(cp: u32) -> bool {
    matches!(cp, 0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD)
}
