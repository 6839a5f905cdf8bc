//! Register level access to the MPU6050. Every bus transaction first selects a register and then
//! transfers bytes starting at that register, which is all the DMP bring-up needs.
//! 
//! The transaction is not atomic across callers, when the bus is shared with other sensors the
//! caller has to make sure nobody else talks to the bus in between.

use embedded_hal::i2c::I2c;

use crate::{MPU6050_ALTERNATIVE_I2C_ADDR, MPU6050_DEFAULT_I2C_ADDR};

/// Maximum amount of data bytes sent in a single I2C write transaction.
/// 
const MAX_WRITE_SIZE: usize = 32;

/// Mask covering the bit field that starts at `bit_start` (its most significant bit) and extends
/// `length` bits downwards.
/// 
#[inline]
fn field_mask(bit_start: u8, length: u8) -> u8 {
    debug_assert!(bit_start < 8 && length >= 1 && length <= bit_start + 1);
    let shift = bit_start + 1 - length;
    (((1u16 << length) - 1) << shift) as u8
}

/// Byte level access to the registers of a device plus bit field helpers on top of it.
/// 
pub trait RegisterAccess
{
    type Error: core::fmt::Debug;

    /// Selects `register` and reads `buf.len()` bytes starting there.
    fn read_bytes(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Selects `register` and writes all of `data` starting there.
    /// 
    /// Implementations may split long writes into several transactions that each restart at
    /// `register`, which is only correct for auto-incrementing windows such as `MEM_R_W` and
    /// `FIFO_R_W`. Writes to ordinary registers should stay within a single transaction.
    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut state = [ 0u8 ];
        self.read_bytes(register, &mut state)?;
        Ok(state[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write_bytes(register, &[ value ])
    }

    fn read_bit(&mut self, register: u8, bit: u8) -> Result<bool, Self::Error> {
        let state = self.read_register(register)?;
        Ok(((state >> bit) & 0b01) > 0)
    }

    /// Sets or clears a single bit, leaving the other bits of the register as they are.
    /// 
    fn write_bit(&mut self, register: u8, bit: u8, enabled: bool) -> Result<(), Self::Error> {
        debug_assert!(bit < 8);
        let mut state = self.read_register(register)?;
        if enabled {
            state |= 0b01 << bit;
        } else {
            state &= !(0b01 << bit);
        }
        self.write_register(register, state)
    }

    /// Reads the field of `length` bits whose most significant bit is `bit_start`, the result is
    /// right aligned, i.e. `0b101` read from any position returns `5`.
    /// 
    fn read_bits(&mut self, register: u8, bit_start: u8, length: u8) -> Result<u8, Self::Error> {
        let state = self.read_register(register)?;
        let mask = field_mask(bit_start, length);
        Ok((state & mask) >> (bit_start + 1 - length))
    }

    /// Writes `value` into the field of `length` bits whose most significant bit is `bit_start`,
    /// bits of `value` that do not fit into the field are dropped.
    /// 
    fn write_bits(&mut self, register: u8, bit_start: u8, length: u8, value: u8) -> Result<(), Self::Error> {
        let state = self.read_register(register)?;
        let mask = field_mask(bit_start, length);
        let value = (value << (bit_start + 1 - length)) & mask;
        self.write_register(register, (state & !mask) | value)
    }
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for &mut R
{
    type Error = R::Error;

    #[inline]
    fn read_bytes(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_bytes(register, buf)
    }

    #[inline]
    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(register, data)
    }
}

/// [`RegisterAccess`] over any `embedded-hal` I2C bus.
/// 
/// Writes longer than 32 bytes are sent as several transactions, each one selecting the same
/// register again.
/// 
pub struct I2cRegisters<I2C>
{
    i2c: I2C,

    /// i2c address that chip is located at.
    address: u8,
}

impl<I2C> I2cRegisters<I2C>
{
    /// Talk to the chip at its default address (`0x68`, AD0 pulled low).
    /// 
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, MPU6050_DEFAULT_I2C_ADDR)
    }

    /// Talk to the chip at its alternative address (`0x69`, AD0 pulled high).
    /// 
    pub const fn alternative(i2c: I2C) -> Self {
        Self::with_address(i2c, MPU6050_ALTERNATIVE_I2C_ADDR)
    }

    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        I2cRegisters { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterAccess for I2cRegisters<I2C>
{
    type Error = I2C::Error;

    fn read_bytes(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[ register ], buf)
    }

    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_WRITE_SIZE + 1];
        buffer[0] = register;
        for chunk in data.chunks(MAX_WRITE_SIZE) {
            buffer[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &buffer[..=chunk.len()])?;
        }
        Ok(())
    }
}
