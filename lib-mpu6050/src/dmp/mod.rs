//! Digital Motion Processor support: firmware and configuration upload, the staged bring-up of
//! the DMP and decoding of the packets it pushes into the FIFO.

pub mod firmware;

pub mod blob;
pub use blob::*;

pub mod packet;
pub use packet::*;

pub mod fifo;
pub use fifo::*;

pub mod session;
pub use session::*;

/// `INT_ENABLE` value written by the "enable interrupts" special instruction of the
/// configuration blob.
/// 
pub const DMP_CONFIG_INT_ENABLE: u8 = 0x32;

/// `INT_ENABLE` value once the DMP is configured: DMP data ready and FIFO overflow.
/// 
pub const DMP_INT_ENABLE: u8 = 0x12;

/// `DMP_CFG_1` and `DMP_CFG_2`, the vendor never documented what these do.
/// 
pub const DMP_CONFIG_1: u8 = 0x03;
pub const DMP_CONFIG_2: u8 = 0x00;

/// A small write into (or read from) DMP memory.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPatch
{
    pub bank: u8,
    pub offset: u8,
    pub data: &'static [u8],
}

/// Final memory updates applied after the configuration blob. These were reverse-engineered
/// from the vendor library and cannot be derived from anything, keep them verbatim.
/// 
/// Update 6 is not written, its location is only read back (`data.len()` bytes).
/// 
pub const DMP_UPDATES: [MemoryPatch; 7] = [
    MemoryPatch { bank: 0x01, offset: 0xB2, data: &[ 0xFF, 0xFF ] },
    MemoryPatch { bank: 0x01, offset: 0x90, data: &[ 0x09, 0x23, 0xA1, 0x35 ] },
    MemoryPatch { bank: 0x01, offset: 0x6A, data: &[ 0x06, 0x00 ] },
    MemoryPatch { bank: 0x01, offset: 0x60, data: &[ 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00 ] },
    MemoryPatch { bank: 0x00, offset: 0x60, data: &[ 0x40, 0x00, 0x00, 0x00 ] },
    MemoryPatch { bank: 0x01, offset: 0x62, data: &[ 0x00, 0x00 ] },
    MemoryPatch { bank: 0x00, offset: 0x60, data: &[ 0x00, 0x40, 0x00, 0x00 ] },
];

/// Motion detection settings written during bring-up (threshold 2mg per LSB, duration 1ms per
/// LSB).
/// 
pub const MOTION_DETECTION_THRESHOLD: u8 = 2;
pub const ZERO_MOTION_DETECTION_THRESHOLD: u8 = 156;
pub const MOTION_DETECTION_DURATION: u8 = 80;
pub const ZERO_MOTION_DETECTION_DURATION: u8 = 0;
