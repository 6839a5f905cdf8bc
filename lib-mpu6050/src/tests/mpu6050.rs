use crate::registers::*;
use crate::tests::*;
use crate::*;

fn mem_writes(mock: &MockMpu) -> Vec<usize> {
    mock.writes_to(MEM_R_W).iter().map(|data| data.len()).collect()
}

fn fail_everything(_: &Access) -> bool {
    true
}

#[test]
fn test_connection_okay() {
    init_logger();
    let mut mpu = Mpu6050::new(MockMpu::new());
    assert_eq!(mpu.device_id().unwrap(), MPU6050_DEVICE_ID);
    assert!(mpu.connection_okay());

    mpu.bus().set_reg(WHO_AM_I, 0x00);
    assert!(!mpu.connection_okay());

    mpu.bus().fail_when = Some(fail_everything);
    assert!(!mpu.connection_okay());
    assert_eq!(mpu.device_id(), Err(Error::Bus(MockBusError)));
}

#[test]
fn test_reset_restores_power_on_state() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_sleep_enabled(false).unwrap();
    mpu.set_sample_rate_divider(9).unwrap();
    mpu.reset().unwrap();

    assert_eq!(mock.device_resets, 1);
    assert_eq!(mock.reg(PWR_MGMT_1), 0x40);
    assert_eq!(mock.reg(SMPLRT_DIV), 0);
}

#[test]
fn test_clock_source_and_sleep_share_power_register() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_clock_source(ClockSource::GyroZ).unwrap();
    assert_eq!(mpu.bus().reg(PWR_MGMT_1), 0x43);

    mpu.set_sleep_enabled(false).unwrap();
    assert_eq!(mock.reg(PWR_MGMT_1), 0x03);
}

#[test]
fn test_scale_ranges() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_gyro_scale(GyroScaleRange::D2000).unwrap();
    mpu.set_accel_scale(AccelScaleRange::G8).unwrap();
    assert_eq!(mpu.gyro_scale(), GyroScaleRange::D2000);
    assert_eq!(mpu.accel_scale(), AccelScaleRange::G8);

    assert_eq!(mock.reg(GYRO_CONFIG), 0x18);
    assert_eq!(mock.reg(ACCEL_CONFIG), 0x10);
    assert_eq!(GyroScaleRange::from_bits(mock.reg(GYRO_CONFIG) >> 3), GyroScaleRange::D2000);
    assert_eq!(AccelScaleRange::from_bits(mock.reg(ACCEL_CONFIG) >> 3), AccelScaleRange::G8);
}

#[test]
fn test_frame_sync_and_dlpf_share_config_register() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_external_frame_sync(ExternalFrameSync::TempOutL).unwrap();
    mpu.set_dlpf_mode(DLPFMode::Bw42Hz).unwrap();
    assert_eq!(mock.reg(CONFIG), 0b0000_1011);
}

#[test]
fn test_memory_bank_selection() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_memory_bank(3, true, true).unwrap();
    assert_eq!(mpu.bus().reg(BANK_SEL), 0x63);
    mpu.set_memory_bank(5, false, false).unwrap();
    assert_eq!(mpu.bus().reg(BANK_SEL), 0x05);
}

#[test]
fn test_write_memory_block_crosses_bank_boundary() {
    init_logger();
    let mut mock = MockMpu::new();
    let data: Vec<u8> = (1..=40).collect();
    Mpu6050::new(&mut mock).write_memory_block(&data, 2, 0xF0).unwrap();

    assert_eq!(&mock.memory[2][0xF0..], &data[..16]);
    assert_eq!(&mock.memory[3][..24], &data[16..]);
    assert_eq!(mock.memory[3][24], 0);

    assert_eq!(mem_writes(&mock), vec![ 16, 16, 8 ]);
    if cfg!(feature = "verify-firmware") {
        assert_eq!(mock.reads_of(MEM_R_W), 3);
    }
    let selections = if cfg!(feature = "verify-firmware") { 4 } else { 2 };
    assert_eq!(mock.writes_to(BANK_SEL).iter().filter(|data| data[0] == 3).count(), selections);
}

#[test]
fn test_write_memory_block_rejects_banks_past_the_last() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    assert_eq!(mpu.write_memory_block(&[ 0x01 ], 8, 0), Err(Error::InvalidBank(8)));

    let data = [ 0xAA; 20 ];
    assert_eq!(mpu.write_memory_block(&data, 7, 0xF8), Err(Error::InvalidBank(8)));
    assert_eq!(&mock.memory[7][0xF8..], &[ 0xAA; 8 ]);
}

#[test]
#[cfg(feature = "verify-firmware")]
fn test_write_memory_block_reports_first_mismatch() {
    let mut mock = MockMpu::new();
    mock.corrupt = Some((1, 0x13));
    let result = Mpu6050::new(&mut mock).write_memory_block(&[ 0x55; 32 ], 1, 0x00);
    assert_eq!(result, Err(Error::BlockWriteFailed { bank: 1, offset: 0x13 }));

    // Writing stops at the failing chunk.
    assert_eq!(mem_writes(&mock), vec![ 16, 16 ]);
}

#[test]
fn test_read_memory_block() {
    let mut mock = MockMpu::new();
    mock.memory[0][0xFE] = 0x12;
    mock.memory[0][0xFF] = 0x34;
    mock.memory[1][0x00] = 0x56;

    let mut buf = [ 0u8; 3 ];
    Mpu6050::new(&mut mock).read_memory_block(&mut buf, 0, 0xFE).unwrap();
    assert_eq!(buf, [ 0x12, 0x34, 0x56 ]);
}

#[test]
fn test_gyro_offsets_tc_round_trip() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);

    let offsets = mpu.gyro_offsets_tc().unwrap();
    assert_eq!([ offsets.x, offsets.y, offsets.z ], FACTORY_OFFSETS_TC);
    assert!(mpu.otp_bank_valid().unwrap());

    mpu.set_otp_bank_valid(false).unwrap();
    mpu.set_gyro_offsets_tc(&GyroOffsetsTc { x: 0x3F, y: 0x00, z: 0x01 }).unwrap();
    assert!(!mpu.otp_bank_valid().unwrap());
    assert_eq!(mpu.gyro_offsets_tc().unwrap(), GyroOffsetsTc { x: 0x3F, y: 0x00, z: 0x01 });
    assert_eq!(mock.reg(XG_OFFS_TC), 0x7E);
    assert_eq!(mock.reg(ZG_OFFS_TC), 0x02);
}

#[test]
fn test_auxiliary_i2c_master() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_slave_address(I2cSlave::Slave0, 0x7F).unwrap();
    mpu.set_slave_address(I2cSlave::Slave1, 0x1E).unwrap();
    mpu.set_i2c_master_mode(true).unwrap();
    mpu.reset_i2c_master().unwrap();

    assert_eq!(mock.reg(I2C_SLV0_ADDR), 0x7F);
    assert_eq!(mock.reg(I2C_SLV0_ADDR + 3), 0x1E);
    assert_eq!(mock.reg(USER_CTRL), 1 << USERCTRL_I2C_MST_EN_BIT);
    assert_eq!(mock.writes_to(USER_CTRL).last(), Some(&vec![ 0b0010_0010 ]));
}

#[test]
fn test_fifo_count_and_drain() {
    init_logger();
    let mut mock = MockMpu::new();
    mock.fifo.extend(0..70u8);

    let mut mpu = Mpu6050::new(&mut mock);
    let count = mpu.fifo_count().unwrap();
    assert_eq!(count, 70);
    mpu.drain_fifo(count).unwrap();
    assert_eq!(mpu.fifo_count().unwrap(), 0);

    let lengths: Vec<usize> = mock.log.iter().filter_map(|access| match access {
        Access::Read { register: FIFO_R_W, len } => Some(*len),
        _ => None,
    }).collect();
    assert_eq!(lengths, vec![ 32, 32, 6 ]);
}

#[test]
fn test_fifo_count_is_big_endian() {
    let mut mock = MockMpu::new();
    mock.fifo.extend(std::iter::repeat(0u8).take(0x0123));
    assert_eq!(Mpu6050::new(&mut mock).fifo_count().unwrap(), 0x0123);
}

#[test]
fn test_fifo_and_dmp_control_bits() {
    let mut mock = MockMpu::new();
    mock.fifo.extend([ 1, 2, 3 ]);

    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_fifo_enabled(true).unwrap();
    mpu.set_dmp_enabled(true).unwrap();
    mpu.reset_fifo().unwrap();
    mpu.reset_dmp().unwrap();

    assert!(mock.fifo.is_empty());
    assert_eq!(mock.reg(USER_CTRL), 0b1100_0000);
    assert_eq!(mock.writes_to(USER_CTRL)[2], vec![ 0b1100_0100 ]);
    assert_eq!(mock.writes_to(USER_CTRL)[3], vec![ 0b1100_1000 ]);
}

#[test]
fn test_motion_detection_and_dmp_config() {
    let mut mock = MockMpu::new();
    let mut mpu = Mpu6050::new(&mut mock);
    mpu.set_motion_detection_threshold(2).unwrap();
    mpu.set_zero_motion_detection_threshold(156).unwrap();
    mpu.set_motion_detection_duration(80).unwrap();
    mpu.set_zero_motion_detection_duration(0).unwrap();
    mpu.set_dmp_config_1(0x03).unwrap();
    mpu.set_dmp_config_2(0x00).unwrap();
    mpu.set_int_enabled(0x12).unwrap();

    assert_eq!(mock.reg(MOT_THR), 2);
    assert_eq!(mock.reg(ZRMOT_THR), 156);
    assert_eq!(mock.reg(MOT_DUR), 80);
    assert_eq!(mock.reg(ZRMOT_DUR), 0);
    assert_eq!(mock.reg(DMP_CFG_1), 0x03);
    assert_eq!(mock.reg(INT_ENABLE), 0x12);
}

#[test]
fn test_int_status_clears_on_read() {
    let mut mock = MockMpu::new();
    mock.set_reg(INT_STATUS, 0x12);
    let mut mpu = Mpu6050::new(&mut mock);
    assert_eq!(mpu.int_status().unwrap(), 0x12);
    assert_eq!(mpu.int_status().unwrap(), 0x00);
}
