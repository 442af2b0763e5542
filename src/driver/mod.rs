//! Seam between the facade and the platform's TWAI peripheral driver.
//!
//! The driver is treated as a black box: it owns bus arbitration, bit
//! timing, interrupt handling and queueing. The facade only installs it,
//! starts and stops it, and moves frames and alert bits across this trait.

pub mod mock;

use crate::types::{Alerts, Frame, StatusInfo, TimingConfig};
use std::fmt;

/// Configuration handed to the driver at install time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub tx_pin: u8,
    pub rx_pin: u8,
    pub timing: TimingConfig,
    pub rx_queue_len: usize,
    pub tx_queue_len: usize,
    pub alerts_enabled: Alerts,
}

/// Result codes reported by the peripheral driver, mirroring the platform's
/// `esp_err_t` values handled by this facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    Fail,
    NoMem,
    InvalidArg,
    InvalidState,
    InvalidSize,
    NotFound,
    NotSupported,
    Timeout,
}

impl DriverError {
    /// Numeric value of the platform result code
    pub fn code(&self) -> i32 {
        match self {
            DriverError::Fail => -1,
            DriverError::NoMem => 0x101,
            DriverError::InvalidArg => 0x102,
            DriverError::InvalidState => 0x103,
            DriverError::InvalidSize => 0x104,
            DriverError::NotFound => 0x105,
            DriverError::NotSupported => 0x106,
            DriverError::Timeout => 0x107,
        }
    }

    /// Canonical platform name for the result code
    pub fn name(&self) -> &'static str {
        match self {
            DriverError::Fail => "ESP_FAIL",
            DriverError::NoMem => "ESP_ERR_NO_MEM",
            DriverError::InvalidArg => "ESP_ERR_INVALID_ARG",
            DriverError::InvalidState => "ESP_ERR_INVALID_STATE",
            DriverError::InvalidSize => "ESP_ERR_INVALID_SIZE",
            DriverError::NotFound => "ESP_ERR_NOT_FOUND",
            DriverError::NotSupported => "ESP_ERR_NOT_SUPPORTED",
            DriverError::Timeout => "ESP_ERR_TIMEOUT",
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Peripheral driver surface consumed by the facade. Implemented by
/// platform-specific code; [`mock::MockDriver`] implements it as a loopback
/// for host-side testing.
pub trait TwaiDriver: Send {
    fn install(&mut self, config: &DriverConfig) -> Result<(), DriverError>;
    fn start(&mut self) -> Result<(), DriverError>;
    fn stop(&mut self) -> Result<(), DriverError>;
    fn uninstall(&mut self) -> Result<(), DriverError>;
    fn transmit(&mut self, frame: &Frame, timeout_ms: u32) -> Result<(), DriverError>;
    fn receive(&mut self, timeout_ms: u32) -> Result<Frame, DriverError>;
    fn status(&self) -> Result<StatusInfo, DriverError>;
    fn read_alerts(&mut self, timeout_ms: u32) -> Result<Alerts, DriverError>;
}

impl TwaiDriver for Box<dyn TwaiDriver + Send> {
    fn install(&mut self, config: &DriverConfig) -> Result<(), DriverError> {
        (**self).install(config)
    }

    fn start(&mut self) -> Result<(), DriverError> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        (**self).stop()
    }

    fn uninstall(&mut self) -> Result<(), DriverError> {
        (**self).uninstall()
    }

    fn transmit(&mut self, frame: &Frame, timeout_ms: u32) -> Result<(), DriverError> {
        (**self).transmit(frame, timeout_ms)
    }

    fn receive(&mut self, timeout_ms: u32) -> Result<Frame, DriverError> {
        (**self).receive(timeout_ms)
    }

    fn status(&self) -> Result<StatusInfo, DriverError> {
        (**self).status()
    }

    fn read_alerts(&mut self, timeout_ms: u32) -> Result<Alerts, DriverError> {
        (**self).read_alerts(timeout_ms)
    }
}
