#![allow(missing_docs)]

//! Every input is embedded between guard regions filled with a sentinel and
//! run through both directions for every component. The guards must come
//! back untouched and the output must match a run over the bare input.

use iriescape::{
    Component, InputRange, RangeError, escape, escape_range, escape_utf16, unescape,
    unescape_range, unescape_utf16,
};

const PADDING: usize = 32;
const SENTINEL: u16 = 0xDEAD;

struct Guarded {
    block: Vec<u16>,
    len: usize,
}

impl Guarded {
    fn new(input: &[u16]) -> Self {
        let mut block = vec![SENTINEL; input.len() + 2 * PADDING];
        block[PADDING..PADDING + input.len()].copy_from_slice(input);
        Self {
            block,
            len: input.len(),
        }
    }

    fn range(&self) -> InputRange<'_> {
        InputRange::new(&self.block, PADDING, self.len).expect("guarded range fits")
    }

    fn assert_guards_intact(&self) {
        for (i, &unit) in self.block.iter().enumerate() {
            if i < PADDING || i >= PADDING + self.len {
                assert_eq!(
                    unit, SENTINEL,
                    "guard corrupted at index {i}, data at {PADDING}..{}",
                    PADDING + self.len
                );
            }
        }
    }
}

fn check_all_components(input: &[u16]) {
    let guarded = Guarded::new(input);
    let bare = InputRange::from(input);

    for component in Component::ALL {
        let escaped = escape_utf16(guarded.range(), component);
        guarded.assert_guards_intact();
        assert_eq!(escaped, escape_utf16(bare, component), "{component}");
        assert!(!escaped.contains(&SENTINEL), "{component}");

        let unescaped = unescape_utf16(guarded.range(), component);
        guarded.assert_guards_intact();
        assert_eq!(unescaped, unescape_utf16(bare, component), "{component}");
        assert!(
            char::decode_utf16(unescaped.iter().copied()).all(|r| r.is_ok()),
            "{component}: unescape produced a lone surrogate"
        );

        // Whatever the escaper produced, unescaping leaves it alone.
        let reescaped = Guarded::new(&escaped);
        assert_eq!(
            unescape_utf16(reescaped.range(), component),
            escaped,
            "{component}"
        );
        reescaped.assert_guards_intact();
    }
}

fn check_str(input: &str) {
    check_all_components(&input.encode_utf16().collect::<Vec<_>>());
}

fn check_plane(start: u32, end: u32, step: usize) {
    let mut units = Vec::new();
    for cp in (start..end).step_by(step) {
        match char::from_u32(cp) {
            Some(ch) => units.extend_from_slice(ch.encode_utf16(&mut [0; 2])),
            // Surrogate code points go in as lone code units on purpose.
            None => units.push(u16::try_from(cp).expect("surrogates are BMP")),
        }
    }
    check_all_components(&units);
}

#[test]
fn fragment_invalid_characters() {
    check_str("%F4%80%80%BA");
}

#[test]
fn escaped_ascii() {
    check_str("%%%01%35%36");
}

#[test]
fn escaped_ascii_followed_by_unescaped() {
    check_str("%ABabc");
}

#[test]
fn invalid_hex_sequence() {
    check_str("%AB%FG%GF");
}

#[test]
fn invalid_utf8_sequence() {
    check_str("%F4%80%80%7F");
}

#[test]
fn incomplete_escaped_character() {
    check_str("%F4%80%80%B");
}

#[test]
fn reserved_characters() {
    check_str("/?#??#%[]");
}

#[test]
fn escaped_reserved_characters() {
    check_str("%2F%3F%23%3F%3F%23%25%5B%5D");
}

#[test]
fn bidi_characters() {
    check_str("\u{200E}");
}

#[test]
fn incomplete_surrogate() {
    check_all_components(&[0xDBC0, 0xDC3A, 0xDBC0]);
}

#[test]
fn iri_range_after_surrogate_pair() {
    check_all_components(&[0xDBC0, 0xDC3A, 0x00A1]);
}

#[test]
fn bidi_character_after_surrogate_pair() {
    check_all_components(&[0xDBC0, 0xDC3A, 0x200E]);
}

#[test]
fn sentinel_inside_input() {
    // The sentinel is itself a lone low surrogate.
    check_all_components(&[u16::from(b'a'), SENTINEL]);
    check_all_components(&[SENTINEL, 0xDC00]);
}

#[test]
fn unicode_plane_0() {
    check_plane(0x0, 0xFFFF, 0x100);
}

#[test]
fn unicode_plane_1() {
    check_plane(0x1_0000, 0x1_FFFF, 0x100);
}

#[test]
fn unicode_plane_2() {
    check_plane(0x2_0000, 0x2_FFFF, 0x100);
}

#[test]
fn unicode_planes_3_to_13() {
    check_plane(0x3_0000, 0xD_FFFF, 0x500);
}

#[test]
fn unicode_plane_14() {
    check_plane(0xE_0000, 0xE_FFFF, 0x100);
}

#[test]
fn unicode_planes_15_and_16() {
    check_plane(0xF_0000, 0x10_FFFF, 0x100);
}

#[test]
fn truncation_by_the_range_is_respected() {
    // The backing continues a valid sequence, but the range stops short.
    let backing: Vec<u16> = "%E4%B8%AD".encode_utf16().collect();
    assert_eq!(
        unescape_range(&backing, 0, 6, Component::Path).unwrap(),
        "%E4%B8"
    );
    assert_eq!(
        unescape_range(&backing, 0, 9, Component::Path).unwrap(),
        "中"
    );

    let pair = [0xD83D, 0xDE00];
    let high_only = InputRange::new(&pair, 0, 1).unwrap();
    assert_eq!(escape(high_only, Component::Query), "%EF%BF%BD");
    assert_eq!(unescape(high_only, Component::Query), "%EF%BF%BD");
}

#[test]
fn contract_violations_fail_before_output() {
    let backing = [SENTINEL; 8];
    assert_eq!(
        escape_range(&backing, 6, 4, Component::Path),
        Err(RangeError::OutOfBounds {
            offset: 6,
            len: 4,
            available: 8
        })
    );
    assert_eq!(
        unescape_range(&backing, usize::MAX, 1, Component::Path),
        Err(RangeError::Overflow {
            offset: usize::MAX,
            len: 1
        })
    );
}
