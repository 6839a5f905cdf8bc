mod mock;
mod mpu6050;
mod fifo;

pub(crate) use mock::*;

/// Installs `env_logger` once so `RUST_LOG=debug cargo test` shows the driver logs.
/// 
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
