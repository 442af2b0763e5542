use super::{DriverConfig, DriverError, TwaiDriver};
use crate::types::{Alerts, BusState, Frame, StatusInfo};
use std::collections::VecDeque;

/// Mock peripheral driver for testing without hardware.
///
/// Transmitted frames loop back into the receive queue, so a
/// write-then-read sequence through the facade observes its own traffic.
/// Each driver call can be forced to fail with a chosen result code, and
/// call counts are recorded so tests can assert which driver operations
/// were (or were not) reached.
pub struct MockDriver {
    installed: bool,
    started: bool,
    config: Option<DriverConfig>,
    rx_queue: VecDeque<Frame>,
    alerts: Alerts,

    fail_install: Option<DriverError>,
    fail_start: Option<DriverError>,
    fail_stop: Option<DriverError>,
    fail_uninstall: Option<DriverError>,
    fail_transmit: Option<DriverError>,
    fail_receive: Option<DriverError>,
    fail_status: Option<DriverError>,
    fail_read_alerts: Option<DriverError>,

    pub install_calls: u32,
    pub transmit_calls: u32,
    pub receive_calls: u32,
    pub uninstall_calls: u32,
}

impl MockDriver {
    /// Creates a loopback mock in the uninstalled state
    pub fn new() -> Self {
        Self {
            installed: false,
            started: false,
            config: None,
            rx_queue: VecDeque::new(),
            alerts: Alerts::empty(),
            fail_install: None,
            fail_start: None,
            fail_stop: None,
            fail_uninstall: None,
            fail_transmit: None,
            fail_receive: None,
            fail_status: None,
            fail_read_alerts: None,
            install_calls: 0,
            transmit_calls: 0,
            receive_calls: 0,
            uninstall_calls: 0,
        }
    }

    pub fn fail_install(mut self, err: DriverError) -> Self {
        self.fail_install = Some(err);
        self
    }

    pub fn fail_start(mut self, err: DriverError) -> Self {
        self.fail_start = Some(err);
        self
    }

    pub fn fail_stop(mut self, err: DriverError) -> Self {
        self.fail_stop = Some(err);
        self
    }

    pub fn fail_uninstall(mut self, err: DriverError) -> Self {
        self.fail_uninstall = Some(err);
        self
    }

    pub fn fail_transmit(mut self, err: DriverError) -> Self {
        self.fail_transmit = Some(err);
        self
    }

    pub fn fail_receive(mut self, err: DriverError) -> Self {
        self.fail_receive = Some(err);
        self
    }

    pub fn fail_status(mut self, err: DriverError) -> Self {
        self.fail_status = Some(err);
        self
    }

    pub fn fail_read_alerts(mut self, err: DriverError) -> Self {
        self.fail_read_alerts = Some(err);
        self
    }

    /// Sets the alert bits the next `read_alerts` call reports
    pub fn set_alerts(&mut self, alerts: Alerts) {
        self.alerts = alerts;
    }

    /// Stages an incoming frame as if it had arrived from the bus
    pub fn push_rx(&mut self, frame: Frame) {
        self.rx_queue.push_back(frame);
    }

    /// Configuration captured by the last successful `install`
    pub fn last_config(&self) -> Option<&DriverConfig> {
        self.config.as_ref()
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TwaiDriver for MockDriver {
    fn install(&mut self, config: &DriverConfig) -> Result<(), DriverError> {
        self.install_calls += 1;
        if let Some(err) = self.fail_install {
            return Err(err);
        }
        if self.installed {
            return Err(DriverError::InvalidState);
        }
        self.installed = true;
        self.config = Some(*config);
        Ok(())
    }

    fn start(&mut self) -> Result<(), DriverError> {
        if let Some(err) = self.fail_start {
            return Err(err);
        }
        if !self.installed || self.started {
            return Err(DriverError::InvalidState);
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        if let Some(err) = self.fail_stop {
            return Err(err);
        }
        if !self.started {
            return Err(DriverError::InvalidState);
        }
        self.started = false;
        Ok(())
    }

    fn uninstall(&mut self) -> Result<(), DriverError> {
        self.uninstall_calls += 1;
        if let Some(err) = self.fail_uninstall {
            return Err(err);
        }
        if !self.installed || self.started {
            return Err(DriverError::InvalidState);
        }
        self.installed = false;
        self.config = None;
        self.rx_queue.clear();
        Ok(())
    }

    fn transmit(&mut self, frame: &Frame, _timeout_ms: u32) -> Result<(), DriverError> {
        self.transmit_calls += 1;
        if let Some(err) = self.fail_transmit {
            return Err(err);
        }
        if !self.started {
            return Err(DriverError::InvalidState);
        }
        // Loopback: the transmitted frame becomes pending receive data
        self.rx_queue.push_back(*frame);
        Ok(())
    }

    fn receive(&mut self, _timeout_ms: u32) -> Result<Frame, DriverError> {
        self.receive_calls += 1;
        if let Some(err) = self.fail_receive {
            return Err(err);
        }
        if !self.started {
            return Err(DriverError::InvalidState);
        }
        self.rx_queue.pop_front().ok_or(DriverError::Timeout)
    }

    fn status(&self) -> Result<StatusInfo, DriverError> {
        if let Some(err) = self.fail_status {
            return Err(err);
        }
        Ok(StatusInfo {
            state: if self.started {
                BusState::Running
            } else {
                BusState::Stopped
            },
            msgs_to_rx: self.rx_queue.len() as u32,
            ..StatusInfo::default()
        })
    }

    fn read_alerts(&mut self, _timeout_ms: u32) -> Result<Alerts, DriverError> {
        if let Some(err) = self.fail_read_alerts {
            return Err(err);
        }
        if !self.installed {
            return Err(DriverError::InvalidState);
        }
        Ok(self.alerts)
    }
}
