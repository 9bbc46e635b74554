use thiserror::Error;

/// A caller asked for a range that does not fit its backing storage.
///
/// This is a contract violation, not a content problem: malformed
/// percent-encoding is never reported as an error. It is returned before any
/// output is produced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// `offset + len` does not fit in a `usize`.
    #[error("input range {offset}+{len} overflows")]
    Overflow {
        /// Requested start of the range.
        offset: usize,
        /// Requested length of the range.
        len: usize,
    },
    /// The range ends past the backing storage.
    #[error("input range {offset}..{end} exceeds backing length {available}", end = .offset.saturating_add(*.len))]
    OutOfBounds {
        /// Requested start of the range.
        offset: usize,
        /// Requested length of the range.
        len: usize,
        /// Number of code units in the backing storage.
        available: usize,
    },
}
