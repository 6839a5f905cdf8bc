use core::ops::Div;

/// Vector in the sensor frame, used for gravity and scaled sensor readings.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector
{
    pub x: f32, 
    pub y: f32,
    pub z: f32,
}

/// Raw 16 bit sensor axes, converted as is without any scaling.
/// 
impl From<[i16; 3]> for Vector {
    fn from(values: [i16; 3]) -> Self {
        Self {
            x: values[0] as f32,
            y: values[1] as f32,
            z: values[2] as f32,
        }
    }
}

impl Vector 
{
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector { x, y, z }
    }

    /// Calculate the length/magnitude of the vector
    /// 
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Vector, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
    }
}

impl Div<f32> for Vector
{
    type Output = Self;

    fn div(self, divisor: f32) -> Self::Output {
        Vector {
            x: self.x / divisor,
            y: self.y / divisor,
            z: self.z / divisor,
        }
    }
}
