#![cfg_attr(not(test), no_std)]

pub mod vector;
pub use vector::*;

pub mod quaternion;
pub use quaternion::*;

pub mod euler_angles;
pub use euler_angles::*;

pub mod yaw_pitch_roll;
pub use yaw_pitch_roll::*;


pub const RAD_TO_DEG: f32 = 57.29578;
