//! Reassembly of percent-decoded octets into Unicode scalars.
//!
//! The [`Utf8Assembler`] accumulates one UTF-8 sequence (lead byte plus up to
//! three continuation bytes) into a `u32` as octets arrive and yields a
//! [`char`] once the sequence is complete. Every rejection resets the
//! assembler so the caller can fall back and start over.
//!
//! A sequence is rejected when:
//!
//! - the lead byte cannot start a sequence (`0x80..=0xC1`, `0xF5..=0xFF`),
//! - a continuation byte does not match `10xxxxxx`,
//! - the result is an overlong encoding, a surrogate, or above U+10FFFF.

/// Smallest scalar that needs a sequence of the given length.
const MIN_SCALAR: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

/// Total sequence length announced by a lead byte, or `None` if `lead`
/// cannot begin a well-formed sequence.
#[must_use]
pub const fn sequence_len(lead: u8) -> Option<u8> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Whether `byte` has the continuation bit pattern `10xxxxxx`.
#[inline]
pub(crate) const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Outcome of handing one more octet to the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Step {
    /// The octet was accepted; more continuation bytes are expected.
    NeedMore,
    /// The sequence is complete and well-formed.
    Done(char),
    /// The sequence is malformed. The assembler has been reset.
    Invalid,
}

/// Accumulates a single UTF-8 sequence.
#[derive(Debug, Default)]
pub struct Utf8Assembler {
    acc: u32,
    len: u8,
    need: u8,
}

impl Utf8Assembler {
    /// Creates an idle assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            acc: 0,
            len: 0,
            need: 0,
        }
    }

    /// Discards any pending octets.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
        self.need = 0;
    }

    /// Number of octets accepted for the sequence in flight.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn pending(&self) -> usize {
        usize::from(self.len)
    }

    /// Number of continuation bytes still expected.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn remaining(&self) -> usize {
        usize::from(self.need - self.len)
    }

    /// Starts a new sequence with `lead`, discarding anything pending.
    pub fn start(&mut self, lead: u8) -> Utf8Step {
        self.reset();
        let Some(need) = sequence_len(lead) else {
            return Utf8Step::Invalid;
        };
        if need == 1 {
            return Utf8Step::Done(char::from(lead));
        }

        // Payload bits of the lead: 5, 4 or 3 depending on length.
        self.acc = u32::from(lead & (0x7F >> need));
        self.len = 1;
        self.need = need;
        Utf8Step::NeedMore
    }

    /// Feeds one continuation byte to the sequence in flight.
    pub fn feed(&mut self, byte: u8) -> Utf8Step {
        if self.len == 0 || !is_continuation(byte) {
            self.reset();
            return Utf8Step::Invalid;
        }

        self.acc = (self.acc << 6) | u32::from(byte & 0x3F);
        self.len += 1;
        if self.len < self.need {
            return Utf8Step::NeedMore;
        }

        let code = self.acc;
        let need = usize::from(self.need);
        self.reset();

        if code < MIN_SCALAR[need] {
            return Utf8Step::Invalid;
        }
        // Rejects surrogates and anything past U+10FFFF.
        char::from_u32(code).map_or(Utf8Step::Invalid, Utf8Step::Done)
    }
}
