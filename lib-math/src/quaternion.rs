use core::ops::Div;
use crate::*;

/// Orientation as reported by the DMP. None of the projections below normalize the quaternion,
/// the DMP already emits unit quaternions and callers are expected to pass those along as is.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion
{
    pub w: f32,
    pub x: f32, 
    pub y: f32,
    pub z: f32,
}

impl From<[f32; 4]> for Quaternion {
    fn from(values: [f32; 4]) -> Self {
        Self {
            w: values[0],
            x: values[1],
            y: values[2],
            z: values[3],
        }
    }
}

impl Quaternion 
{
    /// Create a new quaternion with the given values.
    /// 
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Returns the identity quaternion (no rotation)
    /// 
    pub const fn identity() -> Self {
        Quaternion {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Get the magnitude of the quaternion.
    /// 
    #[inline]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Direction of gravity in the device frame, i.e. the world Z axis rotated by the inverse of
    /// this orientation. For the identity quaternion this is `(0, 0, 1)`.
    /// 
    pub fn gravity(&self) -> Vector {
        Vector {
            x: 2.0 * (self.x * self.z - self.w * self.y),
            y: 2.0 * (self.w * self.x + self.y * self.z),
            z: self.w * self.w - self.x * self.x - self.y * self.y + self.z * self.z,
        }
    }

    /// Yaw, pitch and roll of this orientation, see [`YawPitchRoll`].
    /// 
    #[inline]
    pub fn yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from(self)
    }

    /// Euler angles of this orientation, see [`EulerAngles`].
    /// 
    #[inline]
    pub fn euler(&self) -> EulerAngles {
        EulerAngles::from(self)
    }

    /// Approximate equality check with a given tolerance.
    /// 
    pub fn approx_eq(&self, other: &Quaternion, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
            && libm::fabsf(self.w - other.w) <= tol
    }
}

impl Div<f32> for Quaternion
{
    type Output = Self;

    fn div(self, other: f32) -> Self::Output {
        Quaternion {
            w: self.w / other,
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}
