/// DLPF (Digital Low Pass Filter) mode, this determines the highest frequency that is not filtered
/// out. 
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DLPFMode {
    Bw256Hz = 0x00,
    Bw188Hz = 0x01,
    Bw98Hz = 0x02,
    Bw42Hz = 0x03,
    Bw20Hz = 0x04,
    Bw10Hz = 0x05,
    Bw5Hz = 0x06,
}

/// Where the FSYNC pin gets latched into, `TempOutL` is what the DMP firmware is set up for.
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalFrameSync {
    Disabled = 0x00,
    TempOutL = 0x01,
    GyroXOutL = 0x02,
    GyroYOutL = 0x03,
    GyroZOutL = 0x04,
    AccelXOutL = 0x05,
    AccelYOutL = 0x06,
    AccelZOutL = 0x07,
}
