//! Component-aware percent escaping and unescaping for URI and IRI text.
//!
//! The crate converts between the ASCII-safe escaped form of a single URI/IRI
//! component and its literal Unicode form, following RFC 3986 and RFC 3987.
//! Input is a view over UTF-16 code units; output is always well-formed
//! UTF-16 and is materialized into a [`String`](alloc::string::String) or a
//! `Vec<u16>`.
//!
//! Both directions are total: malformed percent-encoding never fails, it is
//! copied through as literal text. The only error is a caller handing in an
//! offset/length pair that does not fit the backing storage
//! ([`RangeError`]).
//!
//! ```rust
//! use iriescape::{Component, escape_str, unescape_str};
//!
//! assert_eq!(escape_str("/a b?", Component::Path), "/a%20b%3F");
//! assert_eq!(unescape_str("%E4%B8%AD%2F", Component::Path), "中%2F");
//!
//! // Malformed sequences pass through untouched.
//! assert_eq!(unescape_str("%F4%80%80%7F", Component::Fragment), "%F4%80%80%7F");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod char_class;
mod component;
mod error;
mod escape;
mod input;
mod unescape;
mod utf8;

#[cfg(test)]
mod tests;

pub use buffer::Utf16Buffer;
pub use char_class::{CharClass, classify, is_bidi_control, is_iprivate, is_ucschar};
pub use component::{Component, ParseComponentError, Policy};
pub use error::RangeError;
pub use escape::{escape, escape_into, escape_range, escape_str, escape_utf16};
pub use input::InputRange;
pub use unescape::{unescape, unescape_into, unescape_range, unescape_str, unescape_utf16};

#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub use utf8::{Utf8Assembler, Utf8Step, sequence_len};
