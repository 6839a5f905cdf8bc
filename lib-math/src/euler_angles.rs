use crate::*;

/// Orientation as three successive rotations in radians, using the aerospace `psi`/`theta`/`phi`
/// convention of the MotionApps sample code. Note that Euler angles suffer from gimbal lock when
/// `theta` nears ±π/2, they are mostly useful for displaying orientation.
/// 
/// psi = rotation around Z-axis
/// theta = rotation around Y-axis
/// phi = rotation around X-axis
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles
{
    pub psi: f32,
    pub theta: f32, 
    pub phi: f32,
}

impl EulerAngles
{
    pub const fn new(psi: f32, theta: f32, phi: f32) -> Self {
        EulerAngles { psi, theta, phi }
    }

    /// Creates an all zeros euler angles instance, i.e. the identity/no rotation angles.
    /// 
    pub const fn identity() -> Self {
        EulerAngles { psi: 0.0, theta: 0.0, phi: 0.0 }
    }

    /// Same angles in degrees instead of radians.
    /// 
    pub fn to_degrees(&self) -> Self {
        EulerAngles {
            psi: self.psi * RAD_TO_DEG,
            theta: self.theta * RAD_TO_DEG,
            phi: self.phi * RAD_TO_DEG,
        }
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Self, tol: f32) -> bool {
        libm::fabsf(self.psi - other.psi) <= tol
            && libm::fabsf(self.theta - other.theta) <= tol
            && libm::fabsf(self.phi - other.phi) <= tol
    }
}

impl From<Quaternion> for EulerAngles {
    fn from(value: Quaternion) -> Self {
        EulerAngles::from(&value)
    }
}

impl From<&Quaternion> for EulerAngles {
    fn from(q: &Quaternion) -> Self {
        let psi = libm::atan2f(
            2.0 * q.x * q.y - 2.0 * q.w * q.z,
            2.0 * q.w * q.w + 2.0 * q.x * q.x - 1.0,
        );
        // Not clamped, an input that is not a unit quaternion may push this outside of [-1, 1]
        // and give NaN.
        let theta = -libm::asinf(2.0 * q.x * q.z + 2.0 * q.w * q.y);
        let phi = libm::atan2f(
            2.0 * q.y * q.z - 2.0 * q.w * q.x,
            2.0 * q.w * q.w + 2.0 * q.z * q.z - 1.0,
        );
        EulerAngles::new(psi, theta, phi)
    }
}
