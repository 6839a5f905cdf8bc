use cfg_if::cfg_if;

use crate::{registers::*, AccelScaleRange, ClockSource, DLPFMode, Error, ExternalFrameSync, GyroScaleRange, I2cSlave, RegisterAccess, MPU6050_DEVICE_ID};

/// Size of a single DMP memory bank in bytes.
/// 
pub const DMP_MEMORY_BANK_SIZE: usize = 256;

/// Number of DMP memory banks.
/// 
pub const DMP_MEMORY_BANKS: u8 = 8;

/// Largest chunk written to or read from the DMP memory in one transaction.
/// 
pub const DMP_MEMORY_CHUNK_SIZE: usize = 16;

/// Largest chunk read from the FIFO in one transaction while draining it.
/// 
const FIFO_DRAIN_CHUNK_SIZE: usize = 32;

/// Temperature compensation offsets of the three gyroscope axes (6 bit values), these come from
/// the factory and have to survive the DMP firmware upload.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GyroOffsetsTc
{
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

pub struct Mpu6050<R>
{
    /// Register access used to communicate with the MPU6050 chip.
    bus: R,

    accel_scale: AccelScaleRange,
    gyro_scale: GyroScaleRange,
}

impl<R: RegisterAccess> Mpu6050<R>
{
    /// Create a new MPU 6050 instance on top of the given register access.
    /// 
    pub fn new(bus: R) -> Self {
        Mpu6050 {
            bus,
            accel_scale: AccelScaleRange::default(),
            gyro_scale: GyroScaleRange::default(),
        }
    }

    /// Gives the register access back.
    /// 
    pub fn release(self) -> R {
        self.bus
    }

    /// Direct access to the underlying registers.
    /// 
    pub fn bus(&mut self) -> &mut R {
        &mut self.bus
    }

    /// Triggers a full device reset, all registers go back to their power-on values. The chip
    /// needs some time before it responds again, see `DmpSession`.
    /// 
    pub fn reset(&mut self) -> Result<(), Error<R::Error>> {
        self.write_bit(PWR_MGMT_1, PWR1_DEVICE_RESET_BIT, true)
    }

    pub fn set_sleep_enabled(&mut self, enabled: bool) -> Result<(), Error<R::Error>> {
        self.write_bit(PWR_MGMT_1, PWR1_SLEEP_BIT, enabled)
    }

    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error<R::Error>> {
        log::info!("Setting clock source={:?}", source);
        self.write_bits(PWR_MGMT_1, PWR1_CLKSEL_BIT, PWR1_CLKSEL_LENGTH, source as u8)
    }

    /// Gets the device ID of this MPU6050 chip, practically speaking this just gets the contents
    /// of the `WHO_AM_I` register.
    /// 
    pub fn device_id(&mut self) -> Result<u8, Error<R::Error>> {
        self.read_bits(WHO_AM_I, WHO_AM_I_BIT, WHO_AM_I_LENGTH)
    }

    /// Checks if the connection with the MPU6050 chip is working as expected, practically
    /// speaking this function just checks if it can read the device ID and if the device ID is
    /// the expected value.
    /// 
    pub fn connection_okay(&mut self) -> bool {
        self.device_id().map(|id| id == MPU6050_DEVICE_ID).unwrap_or(false)
    }

    pub fn accel_scale(&self) -> AccelScaleRange {
        self.accel_scale
    }

    pub fn set_accel_scale(&mut self, scale: AccelScaleRange) -> Result<(), Error<R::Error>> {
        self.write_bits(ACCEL_CONFIG, FS_SEL_BIT, FS_SEL_LENGTH, scale as u8)?;
        self.accel_scale = scale;
        Ok(())
    }

    pub fn gyro_scale(&self) -> GyroScaleRange {
        self.gyro_scale
    }

    pub fn set_gyro_scale(&mut self, scale: GyroScaleRange) -> Result<(), Error<R::Error>> {
        self.write_bits(GYRO_CONFIG, FS_SEL_BIT, FS_SEL_LENGTH, scale as u8)?;
        self.gyro_scale = scale;
        Ok(())
    }

    /// Set digital low-pass filter configuration
    /// 
    pub fn set_dlpf_mode(&mut self, mode: DLPFMode) -> Result<(), Error<R::Error>> {
        self.write_bits(CONFIG, DLPF_CFG_BIT, DLPF_CFG_LENGTH, mode as u8)
    }

    pub fn set_external_frame_sync(&mut self, sync: ExternalFrameSync) -> Result<(), Error<R::Error>> {
        self.write_bits(CONFIG, EXT_SYNC_SET_BIT, EXT_SYNC_SET_LENGTH, sync as u8)
    }

    /// Sets the sample rate based on the divider using the following formula:
    /// `1khz / (1 + divider) = sample_rate`
    /// 
    /// For example: `1khz / (1 + 4) = 200 Hz`
    /// 
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<R::Error>> {
        self.write(SMPLRT_DIV, divider)
    }

    pub fn set_int_enabled(&mut self, mask: u8) -> Result<(), Error<R::Error>> {
        self.write(INT_ENABLE, mask)
    }

    /// Gets the full set of interrupt status bits, note that reading clears them on the chip.
    /// 
    pub fn int_status(&mut self) -> Result<u8, Error<R::Error>> {
        self.read(INT_STATUS)
    }

    pub fn set_dmp_config_1(&mut self, config: u8) -> Result<(), Error<R::Error>> {
        self.write(DMP_CFG_1, config)
    }

    pub fn set_dmp_config_2(&mut self, config: u8) -> Result<(), Error<R::Error>> {
        self.write(DMP_CFG_2, config)
    }

    /// Motion detection threshold, 2mg per LSB.
    /// 
    pub fn set_motion_detection_threshold(&mut self, threshold: u8) -> Result<(), Error<R::Error>> {
        self.write(MOT_THR, threshold)
    }

    /// Motion detection duration, 1ms per LSB.
    /// 
    pub fn set_motion_detection_duration(&mut self, duration: u8) -> Result<(), Error<R::Error>> {
        self.write(MOT_DUR, duration)
    }

    pub fn set_zero_motion_detection_threshold(&mut self, threshold: u8) -> Result<(), Error<R::Error>> {
        self.write(ZRMOT_THR, threshold)
    }

    pub fn set_zero_motion_detection_duration(&mut self, duration: u8) -> Result<(), Error<R::Error>> {
        self.write(ZRMOT_DUR, duration)
    }

    pub fn otp_bank_valid(&mut self) -> Result<bool, Error<R::Error>> {
        self.bus.read_bit(XG_OFFS_TC, TC_OTP_BNK_VLD_BIT).map_err(Error::Bus)
    }

    pub fn set_otp_bank_valid(&mut self, valid: bool) -> Result<(), Error<R::Error>> {
        self.write_bit(XG_OFFS_TC, TC_OTP_BNK_VLD_BIT, valid)
    }

    pub fn gyro_offsets_tc(&mut self) -> Result<GyroOffsetsTc, Error<R::Error>> {
        Ok(GyroOffsetsTc {
            x: self.read_bits(XG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH)?,
            y: self.read_bits(YG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH)?,
            z: self.read_bits(ZG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH)?,
        })
    }

    pub fn set_gyro_offsets_tc(&mut self, offsets: &GyroOffsetsTc) -> Result<(), Error<R::Error>> {
        self.write_bits(XG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH, offsets.x)?;
        self.write_bits(YG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH, offsets.y)?;
        self.write_bits(ZG_OFFS_TC, TC_OFFSET_BIT, TC_OFFSET_LENGTH, offsets.z)
    }

    /// Sets the i2c address at which the MPU6050 should expect to find the given slave.
    /// 
    pub fn set_slave_address(&mut self, slave: I2cSlave, address: u8) -> Result<(), Error<R::Error>> {
        self.write(I2C_SLV0_ADDR + (slave as u8) * 3, address)
    }

    pub fn set_i2c_master_mode(&mut self, enable: bool) -> Result<(), Error<R::Error>> {
        log::debug!("Setting I2C master mode enabled={}", enable);
        self.write_bit(USER_CTRL, USERCTRL_I2C_MST_EN_BIT, enable)
    }

    pub fn reset_i2c_master(&mut self) -> Result<(), Error<R::Error>> {
        log::debug!("Resetting I2C master mode");
        self.write_bit(USER_CTRL, USERCTRL_I2C_MST_RESET_BIT, true)
    }

    /// Enable or disable the DMP (Digital Motion Processor).
    /// 
    pub fn set_dmp_enabled(&mut self, enabled: bool) -> Result<(), Error<R::Error>> {
        self.write_bit(USER_CTRL, USERCTRL_DMP_EN_BIT, enabled)
    }

    pub fn reset_dmp(&mut self) -> Result<(), Error<R::Error>> {
        log::debug!("Reset DMP");
        self.write_bit(USER_CTRL, USERCTRL_DMP_RESET_BIT, true)
    }

    pub fn set_fifo_enabled(&mut self, enabled: bool) -> Result<(), Error<R::Error>> {
        self.write_bit(USER_CTRL, USERCTRL_FIFO_EN_BIT, enabled)
    }

    /// Resets the FIFO packet buffer, the bit clears itself once the reset is done.
    /// 
    pub fn reset_fifo(&mut self) -> Result<(), Error<R::Error>> {
        self.write_bit(USER_CTRL, USERCTRL_FIFO_RESET_BIT, true)
    }

    /// Gets the number of bytes currently available inside FIFO buffer.
    /// 
    pub fn fifo_count(&mut self) -> Result<u16, Error<R::Error>> {
        let mut data = [ 0u8; 2 ];
        self.bus.read_bytes(FIFO_COUNT_H, &mut data).map_err(Error::Bus)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Pulls exactly `buf.len()` bytes out of the FIFO in a single transaction.
    /// 
    pub fn read_fifo_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error<R::Error>> {
        if buf.is_empty() {
            return Ok(());
        }
        self.bus.read_bytes(FIFO_R_W, buf).map_err(Error::Bus)
    }

    /// Reads and discards `count` bytes from the FIFO.
    /// 
    pub fn drain_fifo(&mut self, count: u16) -> Result<(), Error<R::Error>> {
        let mut remaining = count as usize;
        let mut chunk = [ 0u8; FIFO_DRAIN_CHUNK_SIZE ];
        while remaining > 0 {
            let size = usize::min(remaining, FIFO_DRAIN_CHUNK_SIZE);
            self.read_fifo_bytes(&mut chunk[..size])?;
            log::debug!("Drained FIFO bytes: {:?}", &chunk[..size]);
            remaining -= size;
        }
        Ok(())
    }

    pub fn set_memory_bank(&mut self, bank: u8, prefetch: bool, user_bank: bool) -> Result<(), Error<R::Error>> {
        let mut bank = bank & 0x1F;
        if user_bank {
            bank |= 1 << BANKSEL_CFG_USER_BANK_BIT;
        }
        if prefetch {
            bank |= 1 << BANKSEL_PRFTCH_BIT;
        }
        self.write(BANK_SEL, bank)
    }

    pub fn set_memory_start_address(&mut self, address: u8) -> Result<(), Error<R::Error>> {
        self.write(MEM_START_ADDR, address)
    }

    /// Writes `data` into the DMP memory starting at `bank`/`offset`. Writes are chunked and
    /// continue in the next bank once the end of a bank is reached, so a single call can upload
    /// the complete firmware image.
    /// 
    /// With the `verify-firmware` feature every chunk is read back after writing it.
    /// 
    pub fn write_memory_block(&mut self, data: &[u8], bank: u8, offset: u8) -> Result<(), Error<R::Error>> {
        let mut bank = bank;
        let mut address = offset as usize;
        let mut written: usize = 0;
        while written < data.len() {
            if bank >= DMP_MEMORY_BANKS {
                return Err(Error::InvalidBank(bank));
            }

            let remaining = data.len() - written;
            let left_in_bank = DMP_MEMORY_BANK_SIZE - address;
            let chunk_size = usize::min(DMP_MEMORY_CHUNK_SIZE, usize::min(remaining, left_in_bank));
            let chunk = &data[written .. written + chunk_size];

            self.set_memory_bank(bank, false, false)?;
            self.set_memory_start_address(address as u8)?;
            self.bus.write_bytes(MEM_R_W, chunk).map_err(Error::Bus)?;

            cfg_if! { if #[cfg(feature = "verify-firmware")] {
                self.verify_memory_chunk(chunk, bank, address as u8)?;
            }}

            written += chunk_size;
            address += chunk_size;

            if address >= DMP_MEMORY_BANK_SIZE {
                log::debug!("Finished writing to bank: {}", bank);
                address = 0;
                bank += 1;
            }
        }
        Ok(())
    }

    /// Reads `buf.len()` bytes of DMP memory starting at `bank`/`offset`, crossing into the next
    /// bank the same way `write_memory_block` does.
    /// 
    pub fn read_memory_block(&mut self, buf: &mut [u8], bank: u8, offset: u8) -> Result<(), Error<R::Error>> {
        let mut bank = bank;
        let mut address = offset as usize;
        let mut read: usize = 0;
        while read < buf.len() {
            if bank >= DMP_MEMORY_BANKS {
                return Err(Error::InvalidBank(bank));
            }

            let remaining = buf.len() - read;
            let left_in_bank = DMP_MEMORY_BANK_SIZE - address;
            let chunk_size = usize::min(DMP_MEMORY_CHUNK_SIZE, usize::min(remaining, left_in_bank));

            self.set_memory_bank(bank, false, false)?;
            self.set_memory_start_address(address as u8)?;
            self.bus.read_bytes(MEM_R_W, &mut buf[read .. read + chunk_size]).map_err(Error::Bus)?;

            read += chunk_size;
            address += chunk_size;

            if address >= DMP_MEMORY_BANK_SIZE {
                address = 0;
                bank += 1;
            }
        }
        Ok(())
    }

    #[cfg(feature = "verify-firmware")]
    fn verify_memory_chunk(&mut self, chunk: &[u8], bank: u8, address: u8) -> Result<(), Error<R::Error>> {
        let mut verify_data = [ 0u8; DMP_MEMORY_CHUNK_SIZE ];
        let verify_data = &mut verify_data[.. chunk.len()];
        self.set_memory_bank(bank, false, false)?;
        self.set_memory_start_address(address)?;
        self.bus.read_bytes(MEM_R_W, verify_data).map_err(Error::Bus)?;

        if let Some(i) = verify_data.iter().zip(chunk).position(|(found, expected)| found != expected) {
            let offset = address + i as u8;
            log::error!(
                "Verify of mem data failed: bank {}, address {}: found {} expected {}",
                bank, offset, verify_data[i], chunk[i]
            );
            return Err(Error::BlockWriteFailed { bank, offset });
        }
        Ok(())
    }

    #[inline]
    fn read(&mut self, register: u8) -> Result<u8, Error<R::Error>> {
        self.bus.read_register(register).map_err(Error::Bus)
    }

    #[inline]
    fn write(&mut self, register: u8, value: u8) -> Result<(), Error<R::Error>> {
        self.bus.write_register(register, value).map_err(Error::Bus)
    }

    #[inline]
    fn write_bit(&mut self, register: u8, bit: u8, enabled: bool) -> Result<(), Error<R::Error>> {
        self.bus.write_bit(register, bit, enabled).map_err(Error::Bus)
    }

    #[inline]
    fn read_bits(&mut self, register: u8, bit_start: u8, length: u8) -> Result<u8, Error<R::Error>> {
        self.bus.read_bits(register, bit_start, length).map_err(Error::Bus)
    }

    #[inline]
    fn write_bits(&mut self, register: u8, bit_start: u8, length: u8, value: u8) -> Result<(), Error<R::Error>> {
        self.bus.write_bits(register, bit_start, length, value).map_err(Error::Bus)
    }
}
