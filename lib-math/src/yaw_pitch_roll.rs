use crate::*;

/// Yaw/pitch/roll in radians where pitch and roll are derived from the gravity vector rather than
/// straight from the quaternion, this keeps both within ±π/2.
/// 
/// Yaw = rotation around Z-axis
/// Pitch = rotation around Y-axis
/// Roll = rotation around X-axis
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YawPitchRoll
{
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl YawPitchRoll
{
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        YawPitchRoll { yaw, pitch, roll }
    }

    /// Computes the angles from an orientation and the gravity vector belonging to it, use this
    /// instead of `From<&Quaternion>` when the gravity vector is needed anyway.
    /// 
    pub fn from_gravity(q: &Quaternion, gravity: &Vector) -> Self {
        let yaw = libm::atan2f(
            2.0 * q.x * q.y - 2.0 * q.w * q.z,
            2.0 * q.w * q.w + 2.0 * q.x * q.x - 1.0,
        );
        let pitch = libm::atanf(gravity.x / libm::sqrtf(gravity.y * gravity.y + gravity.z * gravity.z));
        let roll = libm::atanf(gravity.y / libm::sqrtf(gravity.x * gravity.x + gravity.z * gravity.z));
        YawPitchRoll { yaw, pitch, roll }
    }

    /// Same angles in degrees instead of radians.
    /// 
    pub fn to_degrees(&self) -> Self {
        YawPitchRoll {
            yaw: self.yaw * RAD_TO_DEG,
            pitch: self.pitch * RAD_TO_DEG,
            roll: self.roll * RAD_TO_DEG,
        }
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Self, tol: f32) -> bool {
        libm::fabsf(self.yaw - other.yaw) <= tol
            && libm::fabsf(self.pitch - other.pitch) <= tol
            && libm::fabsf(self.roll - other.roll) <= tol
    }
}

impl From<&Quaternion> for YawPitchRoll {
    fn from(q: &Quaternion) -> Self {
        YawPitchRoll::from_gravity(q, &q.gravity())
    }
}

impl From<Quaternion> for YawPitchRoll {
    fn from(q: Quaternion) -> Self {
        YawPitchRoll::from(&q)
    }
}
