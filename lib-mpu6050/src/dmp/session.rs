//! Staged bring-up of the DMP.
//! 
//! The chip needs time to settle after a reset and after waking up, so the bring-up is split
//! into stages. [`DmpSession::advance`] runs a single stage and tells the caller how long to wait
//! before running the next one, which lets the caller do other work in the meantime.
//! [`initialize`] (and [`initialize_async`]) drive a session all the way to ready.

use embedded_hal::delay::DelayNs;

use crate::dmp::firmware::{DMP_CONFIG, DMP_FIRMWARE};
use crate::*;

/// Time the chip needs after a device reset before it responds again.
/// 
pub const RESET_SETTLE_MS: u32 = 30;

/// Time the chip needs after waking up and resetting the auxiliary I2C master.
/// 
pub const STAGE1_SETTLE_MS: u32 = 20;

/// FIFO rate divisor used when none is configured, `200Hz / (1 + 1) = 100Hz`.
/// 
pub const DEFAULT_FIFO_RATE: u8 = 0x01;

/// Number of `FIFO_COUNT` reads a wait for data gives up after by default.
/// 
pub const DEFAULT_SPIN_LIMIT: u32 = 10_000;

/// Sample rate divider the firmware expects: `1khz / (1 + 4) = 200 Hz`.
/// 
const DMP_SAMPLE_RATE_DIVIDER: u8 = 4;

/// Bytes the FIFO has to hold before the bring-up continues after enabling the DMP.
/// 
const DMP_WARMUP_FIFO_COUNT: u16 = 3;

/// Address written to slave 0 while resetting the auxiliary I2C master.
/// 
const SLAVE0_DISABLED_ADDR: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmpConfig
{
    /// DMP output rate divisor, packets arrive at `200Hz / (1 + fifo_rate)`. Going faster than
    /// 100Hz tends to give very noisy data.
    pub fifo_rate: u8,

    /// Report FIFO overflows as warnings instead of debug messages.
    pub debug: bool,

    /// Upper bound on the `FIFO_COUNT` reads of a single wait for data, `0` makes every wait time
    /// out immediately.
    pub spin_limit: u32,
}

impl DmpConfig {

    pub const fn new(fifo_rate: u8) -> Self {
        DmpConfig { fifo_rate, debug: false, spin_limit: DEFAULT_SPIN_LIMIT }
    }

    pub const fn with_debug(self, debug: bool) -> Self {
        DmpConfig { debug, ..self }
    }

    pub const fn with_spin_limit(self, spin_limit: u32) -> Self {
        DmpConfig { spin_limit, ..self }
    }
}

impl Default for DmpConfig {
    fn default() -> Self {
        DmpConfig::new(DEFAULT_FIFO_RATE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase
{
    /// Nothing has happened yet, the next step resets the chip.
    Reset,

    /// Chip was reset, the next step wakes it up.
    Stage1,

    /// Chip is awake, the next step uploads and configures the DMP. Carries the factory gyro
    /// offsets that have to be restored after the upload.
    Stage2 { offsets: GyroOffsetsTc },

    Ready,

    Failed(InitFailure),
}

/// What the caller should do after a call to [`DmpSession::advance`].
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step
{
    /// Wait this many milliseconds, then call `advance` again.
    Settle(u32),

    /// The DMP is running, packets can be polled.
    Ready,
}

pub struct DmpSession<R>
{
    pub(crate) mpu: Mpu6050<R>,
    pub(crate) config: DmpConfig,
    phase: InitPhase,
}

impl<R: RegisterAccess> DmpSession<R>
{
    /// Creates a session in the `Reset` phase, the bus is not touched until the first call to
    /// `advance`. Pass `&mut bus` to keep ownership of the bus.
    /// 
    pub fn new(bus: R, config: DmpConfig) -> Self {
        DmpSession { mpu: Mpu6050::new(bus), config, phase: InitPhase::Reset }
    }

    pub fn phase(&self) -> InitPhase {
        self.phase
    }

    pub fn config(&self) -> &DmpConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.phase == InitPhase::Ready
    }

    pub fn mpu(&mut self) -> &mut Mpu6050<R> {
        &mut self.mpu
    }

    /// Gives the bus back.
    /// 
    pub fn release(self) -> R {
        self.mpu.release()
    }

    /// Runs the current stage of the bring-up. Any error is final: the session moves to
    /// `Failed` and every later call returns [`InitError::Halted`].
    /// 
    pub fn advance(&mut self) -> Result<Step, InitError<R::Error>> {
        let result = match self.phase {
            InitPhase::Reset => self.reset_stage(),
            InitPhase::Stage1 => self.wake_stage(),
            InitPhase::Stage2 { offsets } => self.upload_stage(&offsets),
            InitPhase::Ready => return Ok(Step::Ready),
            InitPhase::Failed(failure) => return Err(InitError::Halted(failure)),
        };

        match result {
            Ok(step) => Ok(step),
            Err(err) => {
                log::error!("DMP initialization failed: {}", err);
                self.phase = InitPhase::Failed(err.failure());
                Err(err)
            },
        }
    }

    fn reset_stage(&mut self) -> Result<Step, InitError<R::Error>> {
        log::info!("Resetting MPU6050...");
        self.mpu.reset()?;
        self.phase = InitPhase::Stage1;
        Ok(Step::Settle(RESET_SETTLE_MS))
    }

    fn wake_stage(&mut self) -> Result<Step, InitError<R::Error>> {
        let mpu = &mut self.mpu;
        mpu.set_sleep_enabled(false)?;
        mpu.set_memory_bank(0, false, false)?;

        let valid = mpu.otp_bank_valid()?;
        log::info!("OTP bank is {}", if valid { "valid" } else { "invalid" });

        let offsets = mpu.gyro_offsets_tc()?;
        log::debug!("Gyro offset TC values: {:?}", offsets);

        mpu.set_slave_address(I2cSlave::Slave0, SLAVE0_DISABLED_ADDR)?;
        mpu.set_i2c_master_mode(false)?;
        mpu.set_slave_address(I2cSlave::Slave0, MPU6050_DEFAULT_I2C_ADDR)?;
        mpu.reset_i2c_master()?;

        self.phase = InitPhase::Stage2 { offsets };
        Ok(Step::Settle(STAGE1_SETTLE_MS))
    }

    fn upload_stage(&mut self, offsets: &GyroOffsetsTc) -> Result<Step, InitError<R::Error>> {
        upload_firmware(&mut self.mpu, &DMP_FIRMWARE).map_err(InitError::FirmwareUploadFailed)?;
        log::info!("DMP code written and verified");

        let mut config = DMP_CONFIG;
        patch_fifo_rate(&mut config, self.config.fifo_rate);
        apply_config(&mut self.mpu, &config).map_err(InitError::ConfigurationUploadFailed)?;
        log::info!("DMP configuration written and verified");

        let mpu = &mut self.mpu;
        mpu.set_clock_source(ClockSource::GyroZ)?;
        mpu.set_int_enabled(DMP_INT_ENABLE)?;
        mpu.set_sample_rate_divider(DMP_SAMPLE_RATE_DIVIDER)?;
        mpu.set_external_frame_sync(ExternalFrameSync::TempOutL)?;
        mpu.set_dlpf_mode(DLPFMode::Bw42Hz)?;
        mpu.set_gyro_scale(GyroScaleRange::D2000)?;
        mpu.set_dmp_config_1(DMP_CONFIG_1)?;
        mpu.set_dmp_config_2(DMP_CONFIG_2)?;
        mpu.set_otp_bank_valid(false)?;
        mpu.set_gyro_offsets_tc(offsets)?;

        self.write_update(0)?;
        self.write_update(1)?;

        let mpu = &mut self.mpu;
        mpu.reset_fifo()?;
        let count = mpu.fifo_count()?;
        mpu.drain_fifo(count)?;

        mpu.set_motion_detection_threshold(MOTION_DETECTION_THRESHOLD)?;
        mpu.set_zero_motion_detection_threshold(ZERO_MOTION_DETECTION_THRESHOLD)?;
        mpu.set_motion_detection_duration(MOTION_DETECTION_DURATION)?;
        mpu.set_zero_motion_detection_duration(ZERO_MOTION_DETECTION_DURATION)?;

        mpu.reset_fifo()?;
        mpu.set_fifo_enabled(true)?;
        mpu.set_dmp_enabled(true)?;
        mpu.reset_dmp()?;

        self.write_update(2)?;
        self.write_update(3)?;
        self.write_update(4)?;

        self.settle_fifo()?;

        let update = &DMP_UPDATES[5];
        let mut readback = [ 0u8; 2 ];
        self.mpu.read_memory_block(&mut readback, update.bank, update.offset)?;
        log::debug!("Memory update 6/7 read back: {:?}", readback);

        self.settle_fifo()?;

        self.write_update(6)?;

        self.mpu.reset_fifo()?;
        let status = self.mpu.int_status()?;
        log::info!("DMP is good to go! IntStatus: {:#04x}", status);

        self.phase = InitPhase::Ready;
        Ok(Step::Ready)
    }

    fn write_update(&mut self, index: usize) -> Result<(), Error<R::Error>> {
        let update = &DMP_UPDATES[index];
        log::debug!("Writing final memory update {}/{}", index + 1, DMP_UPDATES.len());
        self.mpu.write_memory_block(update.data, update.bank, update.offset)
    }

    /// Waits for the freshly enabled DMP to push a few bytes, then throws them away.
    /// 
    fn settle_fifo(&mut self) -> Result<(), Error<R::Error>> {
        let count = self.wait_for_fifo(DMP_WARMUP_FIFO_COUNT)?;
        log::debug!("FIFO count: {}", count);
        self.mpu.drain_fifo(count)?;
        let status = self.mpu.int_status()?;
        log::debug!("IntStatus: {:#04x}", status);
        Ok(())
    }

    /// Re-reads `FIFO_COUNT` until it reaches `min_count`, giving up with [`Error::Timeout`]
    /// after `spin_limit` reads.
    /// 
    pub(crate) fn wait_for_fifo(&mut self, min_count: u16) -> Result<u16, Error<R::Error>> {
        for _ in 0..self.config.spin_limit {
            let count = self.mpu.fifo_count()?;
            if count >= min_count {
                return Ok(count);
            }
        }
        log::warn!("Timed out waiting for {} bytes in the FIFO", min_count);
        Err(Error::Timeout)
    }
}

/// Brings the DMP up, blocking on `delay` while the chip settles between stages.
/// 
pub fn initialize<R, D>(bus: R, config: DmpConfig, delay: &mut D) -> Result<DmpSession<R>, InitError<R::Error>>
where
    R: RegisterAccess,
    D: DelayNs,
{
    let mut session = DmpSession::new(bus, config);
    loop {
        match session.advance()? {
            Step::Settle(ms) => delay.delay_ms(ms),
            Step::Ready => return Ok(session),
        }
    }
}

/// Brings the DMP up, awaiting the settle time between stages so other tasks keep running.
/// 
#[cfg(feature = "async")]
pub async fn initialize_async<R, D>(bus: R, config: DmpConfig, mut delay: D) -> Result<DmpSession<R>, InitError<R::Error>>
where
    R: RegisterAccess,
    D: embedded_hal_async::delay::DelayNs,
{
    let mut session = DmpSession::new(bus, config);
    loop {
        match session.advance()? {
            Step::Settle(ms) => delay.delay_ms(ms).await,
            Step::Ready => return Ok(session),
        }
    }
}
