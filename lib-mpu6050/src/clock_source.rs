#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource
{
    InternalOscillator = 0,

    GyroX = 1,
    GyroY = 2,
    /// PLL with the Z axis gyroscope as reference, required by the DMP.
    GyroZ = 3,
    
    External32kHz = 4,
    External19MHz = 5,

    // 6 is reserved.

    /// Stops the clock and keeps the timing generator in reset
    Stop = 7,
}
