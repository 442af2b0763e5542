//! Process-wide bus accessor for legacy call sites.
//!
//! Prefer constructing a [`TwaiBus`] and injecting it into the components
//! that need bus access; this shim exists only for code bases that expect a
//! global `CAN`-style handle. The bus is wrapped in a mutex because the
//! facade itself adds no locking.

use crate::bus::TwaiBus;
use crate::driver::TwaiDriver;
use std::sync::{Mutex, OnceLock};

pub type SharedBus = Mutex<TwaiBus<Box<dyn TwaiDriver + Send>>>;

static BUS: OnceLock<SharedBus> = OnceLock::new();

/// Installs the global bus around the given driver. Returns false when the
/// global bus was already installed; the original instance is kept.
pub fn init(driver: Box<dyn TwaiDriver + Send>) -> bool {
    BUS.set(Mutex::new(TwaiBus::new(driver))).is_ok()
}

/// The global bus, or None when [`init`] has not been called
pub fn bus() -> Option<&'static SharedBus> {
    BUS.get()
}
