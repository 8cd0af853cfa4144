/// Possible errors from a read transaction.
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// A protocol phase did not complete within its microsecond budget.
    /// Usually points at wiring: missing pull-up, sensor absent or unpowered.
    Timeout,
    /// A complete 40-bit frame arrived but the trailing checksum byte did not
    /// match the payload sum. Points at noise or marginal timing rather than
    /// a wiring fault.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DhtError::Timeout => write!(f, "timed out waiting for a line level change"),
            DhtError::ChecksumMismatch => write!(f, "frame checksum did not match the payload"),
            DhtError::PinError(e) => write!(f, "pin error: {e}"),
        }
    }
}
