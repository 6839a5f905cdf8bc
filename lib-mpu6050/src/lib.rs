#![cfg_attr(not(test), no_std)]

pub use math::{EulerAngles, Quaternion, Vector, YawPitchRoll};

pub mod error;
pub use error::*;

pub mod interface;
pub use interface::*;

pub mod accel_scale_range;
pub use accel_scale_range::*;

pub mod gyro_scale_range;
pub use gyro_scale_range::*;

pub mod i2c_slave;
pub use i2c_slave::*;

pub mod clock_source;
pub use clock_source::*;

pub mod dlpf_mode;
pub use dlpf_mode::*;

pub mod registers;

pub mod mpu6050;
pub use mpu6050::*;

pub mod dmp;
pub use dmp::*;

#[cfg(test)]
mod tests;

/// Default i2c address of the MPU 6050 chip.
/// 
pub const MPU6050_DEFAULT_I2C_ADDR: u8 = 0x68;

/// Address of the MPU 6050 chip when its AD0 pin is pulled high.
/// 
pub const MPU6050_ALTERNATIVE_I2C_ADDR: u8 = 0x69;

/// The default device ID of a MPU6050 chip.
/// 
pub const MPU6050_DEVICE_ID: u8 = 0x34;
