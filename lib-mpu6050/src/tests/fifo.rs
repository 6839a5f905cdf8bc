use crate::registers::*;
use crate::tests::init::ready_session;
use crate::tests::packet::packet_bytes;
use crate::tests::*;
use crate::*;

fn fifo_reads(mock: &MockMpu) -> Vec<usize> {
    mock.log.iter().filter_map(|access| match access {
        Access::Read { register: FIFO_R_W, len } => Some(*len),
        _ => None,
    }).collect()
}

#[test]
fn test_classify_fifo_state() {
    let test_cases = [
        (0x00, 0, FifoState::NotReady),
        (0x00, 84, FifoState::NotReady),
        (0x02, 42, FifoState::DataReady),
        (0x02, 0, FifoState::DataReady),
        (0x10, 42, FifoState::Overflow),
        (0x12, 42, FifoState::Overflow),
        (0x02, FIFO_CAPACITY, FifoState::Overflow),
        (0x00, FIFO_CAPACITY, FifoState::Overflow),
        (0x02, FIFO_CAPACITY - 1, FifoState::DataReady),
    ];

    for (status, count, expected) in test_cases {
        assert_eq!(FifoState::classify(status, count), expected, "status {:#04x} count {}", status, count);
    }
}

#[test]
fn test_poll_reads_one_packet() {
    init_logger();
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default());

    let first = packet_bytes([ 16384, 0, 0, 0 ], [ 1, 2, 3 ], [ 4, 5, 6 ]);
    let second = packet_bytes([ 0, 16384, 0, 0 ], [ -1, -2, -3 ], [ -4, -5, -6 ]);
    session.mpu().bus().push_packet(&first);
    session.mpu().bus().push_packet(&second);

    let packet = session.poll().unwrap().unwrap();
    assert_eq!(packet.quaternion, Quaternion::identity());
    assert_eq!(packet.gyro, RawAxes::new(1, 2, 3));
    assert_eq!(packet.accel, RawAxes::new(4, 5, 6));
    assert!(packet.gravity().approx_eq(&Vector::new(0.0, 0.0, 1.0), 1e-6));

    // The next packet stays in the FIFO untouched.
    assert_eq!(session.mpu().bus().fifo.len(), DMP_PACKET_SIZE);
    assert_eq!(session.poll(), Ok(None));

    session.mpu().bus().set_reg(INT_STATUS, 1 << INT_DMP_BIT);
    let packet = session.poll().unwrap().unwrap();
    assert_eq!(packet.quaternion, Quaternion::new(0.0, 1.0, 0.0, 0.0));
    assert_eq!(packet.accel, RawAxes::new(-4, -5, -6));

    drop(session);
    assert_eq!(fifo_reads(&mock).iter().rev().take(2).collect::<Vec<_>>(), vec![ &DMP_PACKET_SIZE, &DMP_PACKET_SIZE ]);
}

#[test]
fn test_poll_without_data_ready() {
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default());
    session.mpu().bus().fifo.extend([ 0u8; DMP_PACKET_SIZE ]);
    let reads = fifo_reads(session.mpu().bus()).len();

    assert_eq!(session.poll(), Ok(None));
    assert_eq!(fifo_reads(session.mpu().bus()).len(), reads);
    assert_eq!(session.mpu().bus().fifo.len(), DMP_PACKET_SIZE);
}

#[test]
fn test_poll_resets_overflowed_fifo() {
    init_logger();
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default().with_debug(true));
    let packet = packet_bytes([ 16384, 0, 0, 0 ], [ 0, 0, 0 ], [ 0, 0, 0 ]);

    // Overflow bit set, ready bit ignored.
    session.mpu().bus().push_packet(&packet);
    session.mpu().bus().set_reg(INT_STATUS, (1 << INT_FIFO_OFLOW_BIT) | (1 << INT_DMP_BIT));
    assert_eq!(session.poll(), Ok(None));
    assert!(session.mpu().bus().fifo.is_empty());

    // Completely full FIFO.
    session.mpu().bus().fifo.extend(std::iter::repeat(0xAB).take(FIFO_CAPACITY as usize));
    session.mpu().bus().set_reg(INT_STATUS, 1 << INT_DMP_BIT);
    assert_eq!(session.poll(), Ok(None));
    assert!(session.mpu().bus().fifo.is_empty());

    let resets = session.mpu().bus().writes_to(USER_CTRL).iter().rev().take(2)
        .filter(|data| data[0] & (1 << USERCTRL_FIFO_RESET_BIT) != 0)
        .count();
    assert_eq!(resets, 2);

    // Business as usual afterwards.
    session.mpu().bus().push_packet(&packet);
    assert!(session.poll().unwrap().is_some());
}

#[test]
fn test_poll_waits_for_complete_packet() {
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default());
    let packet = packet_bytes([ 8192, 8192, 8192, 8192 ], [ 7, 8, 9 ], [ 10, 11, 12 ]);

    let bus = session.mpu().bus();
    bus.fifo.extend(&packet[..20]);
    bus.stream.extend(&packet[20..]);
    bus.feed_per_read = 11;
    bus.set_reg(INT_STATUS, 1 << INT_DMP_BIT);

    let decoded = session.poll().unwrap().unwrap();
    assert_eq!(decoded, MotionPacket::from_bytes(&packet));
    assert!(session.mpu().bus().fifo.is_empty());
}

#[test]
fn test_poll_gives_up_on_partial_packet() {
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default().with_spin_limit(3));
    let bus = session.mpu().bus();
    bus.fifo.extend([ 0u8; 20 ]);
    bus.set_reg(INT_STATUS, 1 << INT_DMP_BIT);
    let reads = fifo_reads(bus).len();

    assert_eq!(session.poll(), Err(Error::Timeout));
    assert_eq!(fifo_reads(session.mpu().bus()).len(), reads);
    assert_eq!(session.mpu().bus().fifo.len(), 20);
}

fn fail_on_int_status(access: &Access) -> bool {
    matches!(access, Access::Read { register: INT_STATUS, .. })
}

#[test]
fn test_poll_propagates_bus_errors() {
    let mut mock = MockMpu::new();
    let mut session = ready_session(&mut mock, DmpConfig::default());
    session.mpu().bus().fail_when = Some(fail_on_int_status);
    assert_eq!(session.poll(), Err(Error::Bus(MockBusError)));
}

#[test]
fn test_release_returns_bus() {
    let mut mock = MockMpu::new();
    let session = ready_session(&mut mock, DmpConfig::default());
    let bus = session.release();
    bus.set_reg(SMPLRT_DIV, 9);
    assert_eq!(mock.reg(SMPLRT_DIV), 9);
}
