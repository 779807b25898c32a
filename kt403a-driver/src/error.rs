//! Driver errors

/// Errors surfaced by the player driver
///
/// Malformed response frames and unanswered queries are not errors; the
/// facade falls back to documented defaults for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Serial transport failure
    Serial(E),
    /// Module did not answer the state query during initialization
    Init,
}

impl<E> Error<E> {
    /// Check whether this is an initialization failure
    pub fn is_init(&self) -> bool {
        matches!(self, Error::Init)
    }
}
