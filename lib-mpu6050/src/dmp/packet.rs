use crate::{AccelScaleRange, EulerAngles, GyroScaleRange, Quaternion, Vector, YawPitchRoll};

/// Size of one packet the MotionApps 2.0 firmware pushes into the FIFO.
/// 
pub const DMP_PACKET_SIZE: usize = 42;

/// Fixed point scale of the quaternion components, `1.0` is sent as `16384`.
/// 
const QUATERNION_SCALE: f32 = 16384.0;

const QUATERNION_OFFSETS: [usize; 4] = [ 0, 4, 8, 12 ];
const GYRO_OFFSETS: [usize; 3] = [ 16, 20, 24 ];
const ACCEL_OFFSETS: [usize; 3] = [ 28, 32, 36 ];

/// Raw sensor values of the three axes, exactly as the DMP reported them.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawAxes
{
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAxes {

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        RawAxes { x, y, z }
    }

    /// Divide every axis by the sensitivity of the range it was measured in.
    /// 
    #[inline]
    fn scaled(&self, lsb_per_unit: f32) -> Vector {
        Vector::from([ self.x, self.y, self.z ]) / lsb_per_unit
    }
}

/// Every element in the packet takes 4 bytes but only the 2 most significant ones are used.
/// 
#[inline]
fn read_i16(packet: &[u8; DMP_PACKET_SIZE], offset: usize) -> i16 {
    i16::from_be_bytes([ packet[offset], packet[offset + 1] ])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPacket
{
    /// Orientation, the DMP outputs (close to) unit quaternions.
    pub quaternion: Quaternion,
    pub gyro: RawAxes,
    pub accel: RawAxes,
}

impl MotionPacket {

    pub fn from_bytes(packet: &[u8; DMP_PACKET_SIZE]) -> Self {
        let quaternion = Quaternion::from(QUATERNION_OFFSETS.map(|offset| read_i16(packet, offset) as f32));
        let [ gx, gy, gz ] = GYRO_OFFSETS.map(|offset| read_i16(packet, offset));
        let [ ax, ay, az ] = ACCEL_OFFSETS.map(|offset| read_i16(packet, offset));
        MotionPacket {
            quaternion: quaternion / QUATERNION_SCALE,
            gyro: RawAxes::new(gx, gy, gz),
            accel: RawAxes::new(ax, ay, az),
        }
    }

    pub fn gravity(&self) -> Vector {
        self.quaternion.gravity()
    }

    pub fn yaw_pitch_roll(&self) -> YawPitchRoll {
        self.quaternion.yaw_pitch_roll()
    }

    pub fn euler(&self) -> EulerAngles {
        self.quaternion.euler()
    }

    /// Angular velocity in degrees per second, given the range the gyroscope is configured for.
    /// 
    pub fn gyro_dps(&self, range: GyroScaleRange) -> Vector {
        self.gyro.scaled(range.as_scale_factor())
    }

    /// Acceleration in multiples of g, given the range the accelerometer is configured for.
    /// 
    pub fn accel_g(&self, range: AccelScaleRange) -> Vector {
        self.accel.scaled(range.as_scale_factor())
    }
}
