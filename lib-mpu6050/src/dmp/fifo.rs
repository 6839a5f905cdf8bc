use crate::registers::{INT_DMP_BIT, INT_FIFO_OFLOW_BIT};
use crate::{DmpSession, Error, MotionPacket, RegisterAccess, DMP_PACKET_SIZE};

/// Size of the FIFO buffer of the MPU6050, a full buffer is treated as an overflow.
/// 
pub const FIFO_CAPACITY: u16 = 1024;

const INT_STATUS_FIFO_OVERFLOW: u8 = 1 << INT_FIFO_OFLOW_BIT;
const INT_STATUS_DMP_READY: u8 = 1 << INT_DMP_BIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoState
{
    /// The FIFO overflowed (or is full), its contents can no longer be trusted.
    Overflow,

    /// The DMP signalled that it pushed a packet.
    DataReady,

    NotReady,
}

impl FifoState {

    /// Overflow wins over data ready, a partially overwritten buffer is never read.
    /// 
    pub fn classify(int_status: u8, fifo_count: u16) -> Self {
        if int_status & INT_STATUS_FIFO_OVERFLOW != 0 || fifo_count == FIFO_CAPACITY {
            FifoState::Overflow
        } else if int_status & INT_STATUS_DMP_READY != 0 {
            FifoState::DataReady
        } else {
            FifoState::NotReady
        }
    }
}

impl<R: RegisterAccess> DmpSession<R>
{
    /// Reads the next packet from the FIFO if the DMP has one ready.
    /// 
    /// An overflowed FIFO is reset and reported as `Ok(None)`. When the DMP signals data but the
    /// packet has not completely arrived yet this waits for it, bounded by the configured spin
    /// limit. Exactly one packet is read per call.
    /// 
    pub fn poll(&mut self) -> Result<Option<MotionPacket>, Error<R::Error>> {
        if !self.is_ready() {
            return Err(Error::NotReady);
        }

        let status = self.mpu.int_status()?;
        let count = self.mpu.fifo_count()?;

        match FifoState::classify(status, count) {
            FifoState::Overflow => {
                self.mpu.reset_fifo()?;
                if self.config.debug {
                    log::warn!("FIFO overflow! (count {}, status {:#04x})", count, status);
                } else {
                    log::debug!("FIFO overflow, FIFO was reset");
                }
                Ok(None)
            },
            FifoState::DataReady => {
                if (count as usize) < DMP_PACKET_SIZE {
                    self.wait_for_fifo(DMP_PACKET_SIZE as u16)?;
                }
                let mut packet = [ 0u8; DMP_PACKET_SIZE ];
                self.mpu.read_fifo_bytes(&mut packet)?;
                Ok(Some(MotionPacket::from_bytes(&packet)))
            },
            FifoState::NotReady => {
                log::trace!("DMP data not ready");
                Ok(None)
            },
        }
    }
}
