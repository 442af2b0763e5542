//! The bus facade: a thin, synchronous pass-through over the peripheral
//! driver seam. All queueing, arbitration and error detection live below
//! the [`TwaiDriver`] trait; this layer only validates configuration,
//! shapes frames and remembers which driver phase was attempted last so
//! failures can be rendered as readable text.

use crate::driver::{DriverConfig, TwaiDriver};
use crate::error::{Result, TwaiError};
use crate::types::{Alerts, Baudrate, Frame, FrameType, StatusInfo};


pub const RX_QUEUE_LEN_DEFAULT: usize = 5;
pub const TX_QUEUE_LEN_DEFAULT: usize = 10;

// Bounded waits handed to the driver, in milliseconds
const TX_TIMEOUT_MS: u32 = 100;
const RX_TIMEOUT_MS: u32 = 10;
const ALERT_TIMEOUT_MS: u32 = 20;

/// Driver phase most recently attempted by the facade, used to prefix
/// diagnostic strings produced by [`TwaiBus::error_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Install,
    Start,
    Stop,
    Uninstall,
    Transmit,
    Receive,
    Speed,
    Status,
}

impl Phase {
    pub fn prefix(&self) -> &'static str {
        match self {
            Phase::Init => "",
            Phase::Install => "TWAI INSTALL: ",
            Phase::Start => "TWAI START: ",
            Phase::Stop => "TWAI STOP: ",
            Phase::Uninstall => "TWAI UNINSTALL: ",
            Phase::Transmit => "TWAI TX: ",
            Phase::Receive => "TWAI RX: ",
            Phase::Speed => "TWAI SPEED: ",
            Phase::Status => "TWAI STATUS: ",
        }
    }
}

/// Bus configuration consumed by [`TwaiBus::begin`].
///
/// The bit rate is stored numerically (kbit/s) and resolved against the
/// closed set of supported speeds at `begin` time, so an out-of-range rate
/// is a configuration error rather than a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    pub rx_pin: u8,
    pub tx_pin: u8,
    pub bit_rate: u32,
    pub enable_alerts: bool,
    pub rx_queue_len: usize,
    pub tx_queue_len: usize,
}

impl BusConfig {
    pub fn new(rx_pin: u8, tx_pin: u8, baud: Baudrate) -> Self {
        Self {
            rx_pin,
            tx_pin,
            bit_rate: baud.kbps(),
            enable_alerts: false,
            rx_queue_len: RX_QUEUE_LEN_DEFAULT,
            tx_queue_len: TX_QUEUE_LEN_DEFAULT,
        }
    }
}

/// Facade over one TWAI peripheral.
///
/// Exactly one live peripheral acquisition may exist per physical bus;
/// construct one `TwaiBus` per controller and share it by injection. The
/// facade adds no locking of its own — wrap it in a mutex when calling
/// from multiple contexts (the [`crate::singleton`] shim does exactly
/// that).
pub struct TwaiBus<D: TwaiDriver> {
    driver: D,
    phase: Phase,
    running: bool,
}

impl<D: TwaiDriver> TwaiBus<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            phase: Phase::Init,
            running: false,
        }
    }

    /// Resolves the configured bit rate to a fixed timing profile, installs
    /// the driver and starts it. Returns the first failure encountered,
    /// with the failing phase recorded for [`Self::error_text`]. An
    /// unsupported bit rate fails before the peripheral is touched.
    pub fn begin(&mut self, config: &BusConfig) -> Result<()> {
        if self.running {
            return Err(TwaiError::AlreadyRunning);
        }

        self.phase = Phase::Speed;
        let timing = Baudrate::try_from(config.bit_rate)?.timing();

        let driver_config = DriverConfig {
            tx_pin: config.tx_pin,
            rx_pin: config.rx_pin,
            timing,
            rx_queue_len: config.rx_queue_len,
            tx_queue_len: config.tx_queue_len,
            alerts_enabled: if config.enable_alerts {
                Alerts::all()
            } else {
                Alerts::empty()
            },
        };

        self.phase = Phase::Install;
        self.driver.install(&driver_config)?;

        self.phase = Phase::Start;
        self.driver.start()?;

        self.running = true;
        Ok(())
    }

    /// Stops the driver and releases the peripheral. Release is attempted
    /// even when the stop phase fails, so the peripheral is never leaked;
    /// the stop error takes precedence in the returned result.
    pub fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Err(TwaiError::NotRunning);
        }

        self.phase = Phase::Stop;
        match self.driver.stop() {
            Ok(()) => {
                self.running = false;
                self.phase = Phase::Uninstall;
                self.driver.uninstall()?;
                Ok(())
            }
            Err(stop_err) => {
                if self.driver.uninstall().is_ok() {
                    self.running = false;
                }
                Err(stop_err.into())
            }
        }
    }

    /// Builds an outgoing data frame and submits it with a bounded wait for
    /// outbound queue space. A payload longer than 8 bytes is rejected
    /// without invoking the driver; driver results are surfaced verbatim.
    pub fn write(&mut self, frame_type: FrameType, id: u32, data: &[u8]) -> Result<()> {
        self.phase = Phase::Transmit;
        let frame = Frame::new(frame_type, id, data)?;
        self.driver.transmit(&frame, TX_TIMEOUT_MS)?;
        Ok(())
    }

    /// Dequeues one pending frame, if any. `Ok(None)` means the driver
    /// reports zero frames pending, which is not an error; a status-query
    /// failure is surfaced without attempting a dequeue.
    pub fn read(&mut self) -> Result<Option<Frame>> {
        self.phase = Phase::Status;
        let status = self.driver.status()?;
        if status.msgs_to_rx == 0 {
            return Ok(None);
        }

        self.phase = Phase::Receive;
        let frame = self.driver.receive(RX_TIMEOUT_MS)?;
        Ok(Some(frame))
    }

    /// Polls the driver's alert bits with a bounded wait. Poll failures
    /// (timeout, invalid argument, invalid state) are distinct error
    /// values, not reserved ranges inside the bitmask.
    pub fn alerts(&mut self) -> Result<Alerts> {
        let alerts = self.driver.read_alerts(ALERT_TIMEOUT_MS)?;
        Ok(alerts)
    }

    /// Snapshot of the driver's status counters
    pub fn status(&mut self) -> Result<StatusInfo> {
        self.phase = Phase::Status;
        let status = self.driver.status()?;
        Ok(status)
    }

    /// Renders an error as the failing phase's prefix plus the platform's
    /// canonical code name, e.g. `"TWAI TX: ESP_ERR_TIMEOUT"`. Safe to call
    /// at any time; before any operation the prefix is empty.
    pub fn error_text(&self, err: &TwaiError) -> String {
        format!("{}{}", self.phase.prefix(), err.code_name())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_phase(&self) -> Phase {
        self.phase
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: TwaiDriver> Drop for TwaiBus<D> {
    fn drop(&mut self) {
        if self.running {
            let _ = self.stop();
        }
    }
}
