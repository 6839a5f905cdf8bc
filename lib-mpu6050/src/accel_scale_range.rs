/// Full scale range of the accelerometer in multiples of g.
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelScaleRange
{
    #[default]
    G2 = 0x00,
    G4 = 0x01,
    G8 = 0x02,
    G16 = 0x03,
}

impl AccelScaleRange {
    
    /// Gets the full scale range from the contents of the `AFS_SEL` field of `ACCEL_CONFIG`.
    /// 
    pub fn from_bits(value: u8) -> Self {
        match value & 0b011 {
            0x00 => Self::G2,
            0x01 => Self::G4,
            0x02 => Self::G8,
            _ => Self::G16,
        }
    }
    
    /// Gets the sensitivity scale factor for the given scale range.
    /// (Note scale factor is in LSB/g).
    /// 
    pub fn as_scale_factor(&self) -> f32 {
        match self {
            Self::G2 => 16384.0,    // Fixed point between 2-3 MSB bits.
            Self::G4 => 8192.0,     // Fixed point between 3-4 MSB bits.
            Self::G8 => 4096.0,     // Fixed point between 4-5 MSB bits.
            Self::G16 => 2048.0,    // Fixed point between 5-6 MSB bits.
        }
    }
}
