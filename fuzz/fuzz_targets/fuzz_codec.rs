#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use iriescape::{
    Component, InputRange, Policy, RangeError, escape_range, escape_utf16, unescape_range, unescape_utf16,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Component index, keep-delimiter flag and a raw range request.
const HEADER: usize = 6;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Code unit sequences that sit on the edges of the decoder.
static TOKENS: &[&[u16]] = &[
    &[0x25],                               // %
    &[0x25, 0x34],                         // %4
    &[0x25, 0x34, 0x31],                   // %41
    &[0x25, 0x45, 0x34],                   // %E4
    &[0x25, 0x46, 0x34],                   // %F4
    &[0x25, 0x38, 0x30],                   // %80
    &[0x25, 0x42, 0x46],                   // %BF
    &[0x25, 0x43, 0x30],                   // %C0
    &[0x25, 0x45, 0x44, 0x25, 0x41, 0x30], // %ED%A0
    &[0x25, 0x66, 0x67],                   // %fg
    &[0xD800],
    &[0xDFFF],
    &[0xDBC0, 0xDC3A],
    &[0x200E],
    &[0x0085],
    &[0xE000],
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Splices a decoder-edge token into the unit payload at an even offset.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || !seed.is_multiple_of(4) {
        return fuzzer_mutate(data, size, max_size);
    }
    with_rng(|rng| {
        let token = TOKENS[rng.random_range(0..TOKENS.len())];
        let bytes = token.len() * 2;
        if size + bytes > max_size {
            return fuzzer_mutate(data, size, max_size);
        }
        let units = (size - HEADER) / 2;
        let at = HEADER + 2 * rng.random_range(0..=units);
        data.copy_within(at..size, at + bytes);
        for (i, unit) in token.iter().enumerate() {
            data[at + 2 * i..at + 2 * i + 2].copy_from_slice(&unit.to_le_bytes());
        }
        size + bytes
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct Case {
    policy: Policy,
    offset: usize,
    len: usize,
    units: Vec<u16>,
}

impl<'a> Arbitrary<'a> for Case {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let component = *u.choose(&Component::ALL)?;
        let policy = if u.arbitrary()? {
            component.keep_delimiter()
        } else {
            Policy::from(component)
        };
        let offset = usize::from(u.arbitrary::<u16>()?);
        let len = usize::from(u.arbitrary::<u16>()?);
        let units = u
            .bytes(u.len() & !1)?
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self {
            policy,
            offset,
            len,
            units,
        })
    }
}

fn is_well_formed(units: &[u16]) -> bool {
    char::decode_utf16(units.iter().copied()).all(|r| r.is_ok())
}

fn codec(data: &[u8]) {
    let Ok(case) = Case::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    let policy = case.policy;

    // Whole payload: both directions produce well-formed output, and escaped
    // output is left alone by the unescaper.
    let whole = InputRange::from(case.units.as_slice());
    let escaped = escape_utf16(whole, policy);
    assert!(is_well_formed(&escaped));
    assert_eq!(unescape_utf16(InputRange::from(escaped.as_slice()), policy), escaped);
    assert!(is_well_formed(&unescape_utf16(whole, policy)));

    // Caller range: either the exact sub-slice is processed or nothing is.
    let end = case.offset.checked_add(case.len);
    let fits = end.is_some_and(|end| end <= case.units.len());
    match escape_range(&case.units, case.offset, case.len, policy) {
        Ok(out) => {
            assert!(fits);
            let sub = InputRange::new(&case.units, case.offset, case.len).unwrap();
            assert_eq!(out, String::from_utf16(&escape_utf16(sub, policy)).unwrap());
        }
        Err(RangeError::OutOfBounds { available, .. }) => {
            assert!(!fits);
            assert_eq!(available, case.units.len());
        }
        Err(RangeError::Overflow { .. }) => assert!(end.is_none()),
    }
    assert_eq!(
        unescape_range(&case.units, case.offset, case.len, policy).is_ok(),
        fits
    );
}

fuzz_target!(|data: &[u8]| codec(data));
