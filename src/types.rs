use crate::error::{Result, TwaiError};
use bitflags::bitflags;

/// Fixed payload capacity of a classic CAN/TWAI frame
pub const FRAME_CAPACITY: usize = 8;

/// Supported bus speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baudrate {
    Rate100K,
    Rate125K,
    Rate250K,
    Rate500K,
    Rate800K,
    Rate1M,
}

impl Baudrate {
    /// Bus speed in kbit/s
    pub fn kbps(&self) -> u32 {
        match self {
            Baudrate::Rate100K => 100,
            Baudrate::Rate125K => 125,
            Baudrate::Rate250K => 250,
            Baudrate::Rate500K => 500,
            Baudrate::Rate800K => 800,
            Baudrate::Rate1M => 1000,
        }
    }

    /// Fixed bit-timing profile for this speed
    pub fn timing(&self) -> TimingConfig {
        match self {
            Baudrate::Rate100K => TimingConfig::T_100KBITS,
            Baudrate::Rate125K => TimingConfig::T_125KBITS,
            Baudrate::Rate250K => TimingConfig::T_250KBITS,
            Baudrate::Rate500K => TimingConfig::T_500KBITS,
            Baudrate::Rate800K => TimingConfig::T_800KBITS,
            Baudrate::Rate1M => TimingConfig::T_1MBITS,
        }
    }
}

impl TryFrom<u32> for Baudrate {
    type Error = TwaiError;

    fn try_from(kbps: u32) -> Result<Self> {
        match kbps {
            100 => Ok(Baudrate::Rate100K),
            125 => Ok(Baudrate::Rate125K),
            250 => Ok(Baudrate::Rate250K),
            500 => Ok(Baudrate::Rate500K),
            800 => Ok(Baudrate::Rate800K),
            1000 => Ok(Baudrate::Rate1M),
            other => Err(TwaiError::UnsupportedBitRate(other)),
        }
    }
}

/// Bit-timing configuration passed to the peripheral driver. Values mirror
/// the controller's stock profiles for an 80 MHz source clock; the facade
/// never computes timings itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub brp: u32,
    pub tseg_1: u8,
    pub tseg_2: u8,
    pub sjw: u8,
    pub triple_sampling: bool,
}

impl TimingConfig {
    pub const T_100KBITS: TimingConfig = TimingConfig {
        brp: 40,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
    };
    pub const T_125KBITS: TimingConfig = TimingConfig {
        brp: 32,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
    };
    pub const T_250KBITS: TimingConfig = TimingConfig {
        brp: 16,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
    };
    pub const T_500KBITS: TimingConfig = TimingConfig {
        brp: 8,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
    };
    pub const T_800KBITS: TimingConfig = TimingConfig {
        brp: 4,
        tseg_1: 16,
        tseg_2: 8,
        sjw: 3,
        triple_sampling: false,
    };
    pub const T_1MBITS: TimingConfig = TimingConfig {
        brp: 4,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
    };
}

/// Frame identifier format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// 11-bit identifier
    Standard,
    /// 29-bit identifier
    Extended,
}

/// A single bus message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub id: u32,
    pub frame_type: FrameType,
    pub dlc: u8,
    pub data: [u8; FRAME_CAPACITY],
    pub rtr: bool,
}

impl Frame {
    /// Builds a data frame from a payload slice. Fails when the payload
    /// exceeds the fixed 8 byte capacity; the copy is exactly `data.len()`
    /// bytes and the remainder of the buffer stays zeroed.
    pub fn new(frame_type: FrameType, id: u32, data: &[u8]) -> Result<Self> {
        if data.len() > FRAME_CAPACITY {
            return Err(TwaiError::PayloadTooLong(data.len()));
        }

        let mut buf = [0u8; FRAME_CAPACITY];
        buf[..data.len()].copy_from_slice(data);

        Ok(Self {
            id,
            frame_type,
            dlc: data.len() as u8,
            data: buf,
            rtr: false,
        })
    }

    /// The valid portion of the payload buffer
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.dlc as usize]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            id: 0,
            frame_type: FrameType::Standard,
            dlc: 0,
            data: [0; FRAME_CAPACITY],
            rtr: false,
        }
    }
}

/// Controller state as reported by the peripheral driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusState {
    Stopped,
    Running,
    BusOff,
    Recovering,
}

/// Status snapshot returned verbatim from the peripheral driver. The facade
/// only ever looks at `msgs_to_rx`; everything else is passed through for
/// the caller to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub state: BusState,
    pub msgs_to_tx: u32,
    pub msgs_to_rx: u32,
    pub tx_error_counter: u32,
    pub rx_error_counter: u32,
    pub tx_failed_count: u32,
    pub rx_missed_count: u32,
    pub arb_lost_count: u32,
    pub bus_error_count: u32,
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            state: BusState::Stopped,
            msgs_to_tx: 0,
            msgs_to_rx: 0,
            tx_error_counter: 0,
            rx_error_counter: 0,
            tx_failed_count: 0,
            rx_missed_count: 0,
            arb_lost_count: 0,
            bus_error_count: 0,
        }
    }
}

bitflags! {
    /// Alert conditions reported by the peripheral driver
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Alerts: u32 {
        const TX_IDLE              = 0x0000_0001;
        const TX_SUCCESS           = 0x0000_0002;
        const RX_DATA              = 0x0000_0004;
        const BELOW_ERR_WARN       = 0x0000_0008;
        const ERR_ACTIVE           = 0x0000_0010;
        const RECOVERY_IN_PROGRESS = 0x0000_0020;
        const BUS_RECOVERED        = 0x0000_0040;
        const ARB_LOST             = 0x0000_0080;
        const ABOVE_ERR_WARN       = 0x0000_0100;
        const BUS_ERROR            = 0x0000_0200;
        const TX_FAILED            = 0x0000_0400;
        const RX_QUEUE_FULL        = 0x0000_0800;
        const ERR_PASS             = 0x0000_1000;
        const BUS_OFF              = 0x0000_2000;
        const RX_FIFO_OVERRUN      = 0x0000_4000;
        const TX_RETRIED           = 0x0000_8000;
        const PERIPH_RESET         = 0x0001_0000;
    }
}
