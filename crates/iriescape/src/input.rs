use crate::RangeError;

/// A read-only window of UTF-16 code units handed to the codec.
///
/// The window is validated once, at construction. After that the codec only
/// ever sees the sub-slice, so it cannot observe anything outside
/// `[offset, offset + len)` of the backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRange<'a> {
    units: &'a [u16],
}

impl<'a> InputRange<'a> {
    /// Selects `len` code units of `backing` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if the range overflows or does not fit in
    /// `backing`.
    pub fn new(backing: &'a [u16], offset: usize, len: usize) -> Result<Self, RangeError> {
        let Some(end) = offset.checked_add(len) else {
            log::debug!("rejecting input range {offset}+{len}: overflow");
            return Err(RangeError::Overflow { offset, len });
        };
        match backing.get(offset..end) {
            Some(units) => Ok(Self { units }),
            None => {
                log::debug!(
                    "rejecting input range {offset}..{end}: backing has {} units",
                    backing.len()
                );
                Err(RangeError::OutOfBounds {
                    offset,
                    len,
                    available: backing.len(),
                })
            }
        }
    }

    /// The selected code units.
    #[must_use]
    pub const fn as_units(&self) -> &'a [u16] {
        self.units
    }

    /// Number of code units in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<'a> From<&'a [u16]> for InputRange<'a> {
    fn from(units: &'a [u16]) -> Self {
        Self { units }
    }
}
