use crate::driver::DriverError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwaiError {
    // Configuration errors, detected before the peripheral is touched
    UnsupportedBitRate(u32),
    PayloadTooLong(usize),

    // Lifecycle errors
    NotRunning,
    AlreadyRunning,

    // Errors reported by the peripheral driver, forwarded verbatim
    Driver(DriverError),
}

impl TwaiError {
    /// Canonical name of the underlying result code, in the platform's
    /// `ESP_ERR_*` vocabulary. Configuration and lifecycle errors map to the
    /// codes the peripheral driver would produce for the same misuse.
    pub fn code_name(&self) -> &'static str {
        match self {
            TwaiError::UnsupportedBitRate(_) => DriverError::NotSupported.name(),
            TwaiError::PayloadTooLong(_) => DriverError::NoMem.name(),
            TwaiError::NotRunning | TwaiError::AlreadyRunning => DriverError::InvalidState.name(),
            TwaiError::Driver(e) => e.name(),
        }
    }
}

impl fmt::Display for TwaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwaiError::UnsupportedBitRate(kbps) => {
                write!(f, "Unsupported bit rate: {} kbit/s", kbps)
            }
            TwaiError::PayloadTooLong(len) => {
                write!(f, "Payload of {} bytes exceeds 8 byte frame capacity", len)
            }
            TwaiError::NotRunning => write!(f, "Bus is not running"),
            TwaiError::AlreadyRunning => write!(f, "Bus is already running"),
            TwaiError::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl Error for TwaiError {}

impl From<DriverError> for TwaiError {
    fn from(e: DriverError) -> Self {
        TwaiError::Driver(e)
    }
}

pub type Result<T> = std::result::Result<T, TwaiError>;
