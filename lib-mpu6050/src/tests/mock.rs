//! Simulated MPU6050 for the driver tests: a register file, the 8 DMP memory banks behind the
//! bank/start address window, a FIFO fed by a pretend DMP, failure injection and a log of every
//! bus access.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::registers::*;
use crate::{RegisterAccess, DMP_PACKET_SIZE, FIFO_CAPACITY};

/// Factory gyro temperature compensation offsets of the simulated chip.
pub const FACTORY_OFFSETS_TC: [u8; 3] = [ 0x15, 0x2A, 0x07 ];

const USER_CTRL_SELF_CLEARING: u8 = (1 << USERCTRL_DMP_RESET_BIT) | (1 << USERCTRL_FIFO_RESET_BIT) | (1 << USERCTRL_I2C_MST_RESET_BIT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access
{
    Read { register: u8, len: usize },
    Write { register: u8, data: Vec<u8> },
}

pub struct MockMpu
{
    pub registers: [u8; 128],
    pub memory: [[u8; 256]; 8],
    pub fifo: VecDeque<u8>,

    /// Bytes the DMP pushes into the FIFO while both the DMP and the FIFO are enabled, handed
    /// out `feed_per_read` at a time on every `FIFO_COUNT` read.
    pub stream: VecDeque<u8>,
    pub feed_per_read: usize,

    /// Fail (and skip) every access this returns true for.
    pub fail_when: Option<fn(&Access) -> bool>,

    /// Memory location that silently stores the inverted byte.
    pub corrupt: Option<(u8, u8)>,

    pub log: Vec<Access>,
    pub device_resets: usize,
}

impl MockMpu {

    pub fn new() -> Self {
        let mut mock = MockMpu {
            registers: [ 0u8; 128 ],
            memory: [ [ 0u8; 256 ]; 8 ],
            fifo: VecDeque::new(),
            stream: VecDeque::new(),
            feed_per_read: 3,
            fail_when: None,
            corrupt: None,
            log: Vec::new(),
            device_resets: 0,
        };
        mock.factory_defaults();
        mock
    }

    /// A chip that will push `bytes` bytes once the DMP runs, enough for the bring-up waits.
    pub fn with_stream(bytes: usize) -> Self {
        let mut mock = Self::new();
        mock.stream.extend((0..bytes).map(|i| i as u8));
        mock
    }

    fn factory_defaults(&mut self) {
        self.registers = [ 0u8; 128 ];
        self.registers[WHO_AM_I as usize] = 0x68;
        self.registers[PWR_MGMT_1 as usize] = 0x40;
        self.registers[XG_OFFS_TC as usize] = (FACTORY_OFFSETS_TC[0] << 1) | 0x01;
        self.registers[YG_OFFS_TC as usize] = FACTORY_OFFSETS_TC[1] << 1;
        self.registers[ZG_OFFS_TC as usize] = FACTORY_OFFSETS_TC[2] << 1;
        self.fifo.clear();
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    pub fn set_reg(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    /// Queues a complete packet and raises the DMP data ready interrupt.
    pub fn push_packet(&mut self, packet: &[u8; DMP_PACKET_SIZE]) {
        self.fifo.extend(packet.iter());
        self.registers[INT_STATUS as usize] |= 1 << INT_DMP_BIT;
    }

    pub fn writes_to(&self, register: u8) -> Vec<Vec<u8>> {
        self.log.iter().filter_map(|access| match access {
            Access::Write { register: r, data } if *r == register => Some(data.clone()),
            _ => None,
        }).collect()
    }

    pub fn reads_of(&self, register: u8) -> usize {
        self.log.iter().filter(|access| matches!(access, Access::Read { register: r, .. } if *r == register)).count()
    }

    /// Position of the first write of `value` to `register` in the access log.
    pub fn position_of_write(&self, register: u8, value: &[u8]) -> Option<usize> {
        self.log.iter().position(|access| matches!(access, Access::Write { register: r, data } if *r == register && data == value))
    }

    fn dmp_running(&self) -> bool {
        let ctrl = self.reg(USER_CTRL);
        ctrl & (1 << USERCTRL_DMP_EN_BIT) != 0 && ctrl & (1 << USERCTRL_FIFO_EN_BIT) != 0
    }

    fn feed_fifo(&mut self) {
        if !self.dmp_running() {
            return;
        }
        for _ in 0..self.feed_per_read {
            match self.stream.pop_front() {
                Some(byte) => self.fifo.push_back(byte),
                None => break,
            }
        }
        while self.fifo.len() > FIFO_CAPACITY as usize {
            self.fifo.pop_front();
            self.registers[INT_STATUS as usize] |= 1 << INT_FIFO_OFLOW_BIT;
        }
    }

    fn memory_cursor(&self) -> (usize, usize) {
        ((self.reg(BANK_SEL) & 0x1F) as usize % 8, self.reg(MEM_START_ADDR) as usize)
    }

    fn read_value(&mut self, register: u8) -> u8 {
        match register {
            INT_STATUS => {
                let status = self.reg(INT_STATUS);
                self.set_reg(INT_STATUS, 0);
                status
            },
            FIFO_COUNT_H => (self.fifo.len() >> 8) as u8,
            FIFO_COUNT_L => (self.fifo.len() & 0xFF) as u8,
            _ => self.registers[register as usize % 128],
        }
    }

    fn write_value(&mut self, register: u8, value: u8) {
        match register {
            PWR_MGMT_1 if value & (1 << PWR1_DEVICE_RESET_BIT) != 0 => {
                self.device_resets += 1;
                self.factory_defaults();
            },
            USER_CTRL => {
                if value & (1 << USERCTRL_FIFO_RESET_BIT) != 0 {
                    self.fifo.clear();
                }
                self.set_reg(USER_CTRL, value & !USER_CTRL_SELF_CLEARING);
            },
            _ => self.registers[register as usize % 128] = value,
        }
    }
}

impl RegisterAccess for MockMpu {
    type Error = MockBusError;

    fn read_bytes(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let access = Access::Read { register, len: buf.len() };
        let fail = self.fail_when.is_some_and(|fail_when| fail_when(&access));
        self.log.push(access);
        if fail {
            return Err(MockBusError);
        }

        match register {
            FIFO_R_W => {
                for byte in buf.iter_mut() {
                    *byte = self.fifo.pop_front().unwrap_or(0);
                }
            },
            MEM_R_W => {
                let (bank, mut address) = self.memory_cursor();
                for byte in buf.iter_mut() {
                    *byte = self.memory[bank][address];
                    address = (address + 1) % 256;
                }
                self.set_reg(MEM_START_ADDR, address as u8);
            },
            _ => {
                if register == FIFO_COUNT_H {
                    self.feed_fifo();
                }
                for (i, byte) in buf.iter_mut().enumerate() {
                    *byte = self.read_value(register + i as u8);
                }
            },
        }
        Ok(())
    }

    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let access = Access::Write { register, data: data.to_vec() };
        let fail = self.fail_when.is_some_and(|fail_when| fail_when(&access));
        self.log.push(access);
        if fail {
            return Err(MockBusError);
        }

        match register {
            MEM_R_W => {
                let (bank, mut address) = self.memory_cursor();
                for byte in data {
                    let corrupted = self.corrupt == Some((bank as u8, address as u8));
                    self.memory[bank][address] = if corrupted { !*byte } else { *byte };
                    address = (address + 1) % 256;
                }
                self.set_reg(MEM_START_ADDR, address as u8);
            },
            FIFO_R_W => self.fifo.extend(data.iter()),
            _ => {
                for (i, byte) in data.iter().enumerate() {
                    self.write_value(register + i as u8, *byte);
                }
            },
        }
        Ok(())
    }
}

/// Delay that returns immediately and remembers what it was asked to wait.
#[derive(Default)]
pub struct RecordingDelay
{
    pub delays_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}
