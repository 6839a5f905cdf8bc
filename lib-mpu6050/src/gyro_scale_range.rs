/// Full scale range of the gyroscope in degrees per second, the DMP firmware expects `D2000`.
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroScaleRange
{
    #[default]
    D250 = 0x00,
    D500 = 0x01,
    D1000 = 0x02,
    D2000 = 0x03,
}

impl GyroScaleRange {

    /// Gets the full scale range from the contents of the `FS_SEL` field of `GYRO_CONFIG`.
    /// 
    pub fn from_bits(value: u8) -> Self {
        match value & 0b011 {
            0x00 => Self::D250,
            0x01 => Self::D500,
            0x02 => Self::D1000,
            _ => Self::D2000,
        }
    }
    
    /// Gets the sensitivity scale factor for the given scale range.
    /// (Note scale factor is in LSB / (deg/s)).
    /// 
    pub fn as_scale_factor(&self) -> f32 {
        match self {
            Self::D250 => 131.0,
            Self::D500 => 65.5,
            Self::D1000 => 32.8,
            Self::D2000 => 16.4,
        }
    }
}
