use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::Component;

impl Arbitrary for Component {
    fn arbitrary(g: &mut Gen) -> Self {
        Self::ALL[usize::arbitrary(g) % Self::ALL.len()]
    }
}

/// Raw UTF-16 input, biased towards the units the codec cares about:
/// `%`, hex digits, delimiters and surrogates.
#[derive(Debug, Clone)]
pub(crate) struct Units(pub Vec<u16>);

impl Arbitrary for Units {
    fn arbitrary(g: &mut Gen) -> Self {
        const INTERESTING: &[u16] = &[
            0x25, 0x25, 0x25, 0x30, 0x37, 0x38, 0x41, 0x42, 0x46, 0x61, 0x66, 0x67, 0x2F, 0x3F,
            0x23, 0x5B, 0x5D, 0x40, 0x20, 0x7F, 0xA1, 0x200E, 0x4E2D, 0xE000, 0xFFFD, 0xD800,
            0xDBC0, 0xDC00, 0xDC3A, 0xDFFF,
        ];

        let len = usize::arbitrary(g) % 48;
        let units = (0..len)
            .map(|_| {
                if bool::arbitrary(g) {
                    *g.choose(INTERESTING).unwrap_or(&0x25)
                } else {
                    u16::arbitrary(g)
                }
            })
            .collect();
        Self(units)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Text made of percent-triplet runs, stray `%` signs and unreserved
/// literals that happen to look like hex digits.
#[derive(Debug, Clone)]
pub(crate) struct PercentText(pub String);

impl Arbitrary for PercentText {
    fn arbitrary(g: &mut Gen) -> Self {
        const PIECES: &[&str] = &[
            "%", "%4", "%41", "%7e", "%2F", "%25", "%C2", "%A1", "%E4", "%B8", "%AD", "%F0",
            "%F4", "%80", "%BF", "%7F", "%FG", "%GF", "%ED", "%A0", "a", "B", "9",
        ];

        let len = usize::arbitrary(g) % 24;
        let mut text = String::new();
        for _ in 0..len {
            text.push_str(g.choose(PIECES).copied().unwrap_or("%"));
        }
        Self(text)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}
