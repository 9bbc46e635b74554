//! Unescaping: percent-encoded text to literal IRI text.
//!
//! A single left-to-right pass over the input. Percent-triplet runs are
//! decoded to octets and reassembled into scalars with a [`Utf8Assembler`].
//! A decoded scalar is written literally only when it is
//! [`CharClass::Unreserved`] for the component; reserved and must-escape
//! scalars keep their original triplet text, since decoding them would
//! change what the text means.
//!
//! Malformed input is never rejected:
//!
//! - a `%` not followed by two hex digits is copied as a literal `%` and
//!   scanning resumes right after it;
//! - an invalid or truncated UTF-8 sequence is copied as the original text
//!   of the triplets it consumed. The unit that broke the sequence is not
//!   consumed and is scanned again on its own.
//!
//! Units that are not part of a triplet are copied, except that anything
//! classified [`CharClass::MustEscape`] is escaped so the output is a valid
//! IRI component. A literal surrogate pair is classified as the scalar it
//! encodes; a lone surrogate is escaped as U+FFFD.

use alloc::{string::String, vec::Vec};

use crate::{
    CharClass, InputRange, Policy, RangeError, Utf16Buffer, classify,
    utf8::{Utf8Assembler, Utf8Step, is_continuation},
};

const PERCENT: u16 = 0x25;

/// Value of one ASCII hex digit.
#[inline]
fn hex_val(unit: u16) -> Option<u8> {
    let digit = u8::try_from(unit).ok()?;
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decodes the triplet starting at `pos`, if there is a complete and valid
/// one.
#[inline]
fn triplet_at(units: &[u16], pos: usize) -> Option<u8> {
    match units.get(pos..pos + 3)? {
        &[PERCENT, hi, lo] => Some((hex_val(hi)? << 4) | hex_val(lo)?),
        _ => None,
    }
}

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

struct Unescaper<'a, 'o> {
    units: &'a [u16],
    pos: usize,
    policy: Policy,
    utf8: Utf8Assembler,
    out: &'o mut Utf16Buffer,
}

impl Unescaper<'_, '_> {
    fn run(&mut self) {
        while let Some(&unit) = self.units.get(self.pos) {
            if unit == PERCENT {
                self.percent();
            } else {
                self.literal(unit);
            }
        }
    }

    /// Handles a unit that does not start a triplet.
    fn literal(&mut self, unit: u16) {
        if is_high_surrogate(unit) {
            let next = self.units.get(self.pos + 1).copied();
            if let Some(low) = next.filter(|&u| is_low_surrogate(u)) {
                let ch = char::decode_utf16([unit, low])
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                if classify(self.policy, u32::from(ch)) == CharClass::MustEscape {
                    self.out.push_escaped_char(ch);
                } else {
                    self.out.push_units(&[unit, low]);
                }
                self.pos += 2;
                return;
            }
        }

        match char::from_u32(u32::from(unit)) {
            Some(ch) if classify(self.policy, u32::from(ch)) == CharClass::MustEscape => {
                self.out.push_escaped_char(ch);
            }
            Some(_) => self.out.push_unit(unit),
            None => {
                log::trace!(
                    "escaping lone surrogate {unit:#06X} at {} as U+FFFD",
                    self.pos
                );
                self.out.push_escaped_char(char::REPLACEMENT_CHARACTER);
            }
        }
        self.pos += 1;
    }

    /// Handles a `%`, which may or may not start a valid triplet run.
    fn percent(&mut self) {
        let start = self.pos;
        let Some(lead) = triplet_at(self.units, start) else {
            log::trace!("literal '%' at {start}: no hex pair follows");
            self.out.push_unit(PERCENT);
            self.pos += 1;
            return;
        };
        self.pos += 3;

        let mut step = self.utf8.start(lead);
        while step == Utf8Step::NeedMore {
            let Some(byte) = triplet_at(self.units, self.pos).filter(|&b| is_continuation(b))
            else {
                self.utf8.reset();
                step = Utf8Step::Invalid;
                break;
            };
            self.pos += 3;
            step = self.utf8.feed(byte);
        }

        match step {
            Utf8Step::Done(ch)
                if classify(self.policy, u32::from(ch)) == CharClass::Unreserved =>
            {
                self.out.push_char(ch);
            }
            Utf8Step::Done(_) => self.out.push_units(&self.units[start..self.pos]),
            Utf8Step::Invalid | Utf8Step::NeedMore => {
                log::trace!(
                    "passing through malformed UTF-8 sequence at {start}..{}",
                    self.pos
                );
                self.out.push_units(&self.units[start..self.pos]);
            }
        }
    }
}

/// Unescapes `input` for `component`, appending to `out`.
pub fn unescape_into(input: InputRange<'_>, component: impl Into<Policy>, out: &mut Utf16Buffer) {
    Unescaper {
        units: input.as_units(),
        pos: 0,
        policy: component.into(),
        utf8: Utf8Assembler::new(),
        out,
    }
    .run();
}

/// Unescapes `input` for `component`.
#[must_use]
pub fn unescape(input: InputRange<'_>, component: impl Into<Policy>) -> String {
    let mut out = Utf16Buffer::with_capacity(input.len());
    unescape_into(input, component, &mut out);
    out.into_string()
}

/// Unescapes `input` for `component`, returning UTF-16 code units.
#[must_use]
pub fn unescape_utf16(input: InputRange<'_>, component: impl Into<Policy>) -> Vec<u16> {
    let mut out = Utf16Buffer::with_capacity(input.len());
    unescape_into(input, component, &mut out);
    out.into_units()
}

/// Unescapes `len` code units of `backing` starting at `offset`.
///
/// # Errors
///
/// Returns [`RangeError`] without producing output if the range does not fit
/// in `backing`.
pub fn unescape_range(
    backing: &[u16],
    offset: usize,
    len: usize,
    component: impl Into<Policy>,
) -> Result<String, RangeError> {
    Ok(unescape(InputRange::new(backing, offset, len)?, component))
}

/// Unescapes a UTF-8 string for `component`.
#[must_use]
pub fn unescape_str(input: &str, component: impl Into<Policy>) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    unescape(InputRange::from(units.as_slice()), component)
}
