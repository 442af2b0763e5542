// Facade layers
pub mod bus; // TwaiBus facade over the peripheral driver
pub mod driver; // Black-box peripheral driver seam and mock
pub mod singleton; // Legacy global accessor (prefer injection)

// Common types and errors
pub mod error;
pub mod types;

// Re-exports for convenience
pub use bus::{BusConfig, Phase, TwaiBus};
pub use driver::{DriverConfig, DriverError, TwaiDriver};
pub use error::{Result, TwaiError};
pub use types::{Alerts, Baudrate, BusState, Frame, FrameType, StatusInfo, TimingConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
