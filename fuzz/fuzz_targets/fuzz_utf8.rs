#![no_main]

use iriescape::{Utf8Assembler, Utf8Step, sequence_len};
use libfuzzer_sys::fuzz_target;

/// Drives the assembler over the leading sequence of `data` and checks the
/// verdict against the standard library's decoder.
fn assembler(data: &[u8]) {
    let Some((&lead, rest)) = data.split_first() else {
        return;
    };
    let mut utf8 = Utf8Assembler::new();
    let mut step = utf8.start(lead);
    let mut used = 1;
    for &byte in rest {
        if step != Utf8Step::NeedMore {
            break;
        }
        step = utf8.feed(byte);
        used += 1;
    }

    let prefix = &data[..used];
    match step {
        Utf8Step::Done(ch) => {
            assert_eq!(std::str::from_utf8(prefix).ok(), Some(ch.encode_utf8(&mut [0; 4]) as &str));
            assert_eq!(sequence_len(lead).map(usize::from), Some(used));
        }
        Utf8Step::Invalid => {
            assert!(std::str::from_utf8(prefix).is_err());
            assert_eq!(utf8.pending(), 0);
        }
        Utf8Step::NeedMore => {
            assert_eq!(used, data.len());
            assert!(std::str::from_utf8(prefix).is_err());
            assert_eq!(utf8.pending() + utf8.remaining(), usize::from(sequence_len(lead).unwrap()));
        }
    }
}

fuzz_target!(|data: &[u8]| assembler(data));
