//! Interpreter for the block format used to push the DMP firmware and its configuration into the
//! banked DMP memory.
//! 
//! A configuration blob is a sequence of blocks laid out as `[bank] [offset] [length] [data...]`.
//! A block with a length of zero carries a single special instruction code instead of data:
//! `[bank] [offset] [0] [code]`, the bank and offset of such a block are ignored.

use crate::{Error, Mpu6050, RegisterAccess, DMP_CONFIG_INT_ENABLE, DMP_MEMORY_BANKS, DMP_MEMORY_BANK_SIZE};

const DMP_MEMORY_SIZE: usize = DMP_MEMORY_BANKS as usize * DMP_MEMORY_BANK_SIZE;

/// Size of the `[bank] [offset] [length]` header in front of every block.
/// 
const BLOCK_HEADER_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigBlock<'a>
{
    /// Write `payload` into DMP memory at `bank`/`offset`.
    Data { bank: u8, offset: u8, payload: &'a [u8] },

    /// Out of band instruction, see [`SpecialInstruction`].
    Special(u8),
}

impl<'a> ConfigBlock<'a> {

    /// Number of bytes this block takes up in a blob.
    /// 
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Data { payload, .. } => BLOCK_HEADER_SIZE + payload.len(),
            Self::Special(_) => BLOCK_HEADER_SIZE + 1,
        }
    }

    /// Writes the block into the start of `buf` and returns the number of bytes written. Returns
    /// `None` when `buf` is too small or when a data block has no payload or more than 255 bytes
    /// of it (neither can be expressed in the block format).
    /// 
    pub fn encode_into(&self, buf: &mut [u8]) -> Option<usize> {
        let size = self.encoded_len();
        if buf.len() < size {
            return None;
        }
        match self {
            Self::Data { bank, offset, payload } => {
                let length = u8::try_from(payload.len()).ok().filter(|length| *length > 0)?;
                buf[0] = *bank;
                buf[1] = *offset;
                buf[2] = length;
                buf[BLOCK_HEADER_SIZE..size].copy_from_slice(payload);
            },
            Self::Special(code) => {
                buf[..size].copy_from_slice(&[ 0, 0, 0, *code ]);
            },
        }
        Some(size)
    }
}

/// Special instructions a configuration blob may contain.
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialInstruction
{
    /// Enable the DMP related interrupts, `INT_ENABLE` = `0x32`.
    EnableDmpInterrupts = 0x01,
}

impl TryFrom<u8> for SpecialInstruction {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(Self::EnableDmpInterrupts),
            _ => Err(code),
        }
    }
}

/// The blob ends in the middle of the block that starts at `position`.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobTruncated
{
    pub position: usize,
}

impl<E> From<BlobTruncated> for Error<E>
{
    fn from(truncated: BlobTruncated) -> Self {
        Error::TruncatedBlob { position: truncated.position }
    }
}

/// Iterator over the blocks of a configuration blob. Stops after the first truncated block.
/// 
#[derive(Debug, Clone)]
pub struct ConfigBlocks<'a>
{
    blob: &'a [u8],
    position: usize,
}

impl<'a> ConfigBlocks<'a> {

    pub fn new(blob: &'a [u8]) -> Self {
        ConfigBlocks { blob, position: 0 }
    }
}

impl<'a> Iterator for ConfigBlocks<'a> {
    type Item = Result<ConfigBlock<'a>, BlobTruncated>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.position;
        let rest = self.blob.get(start..)?;
        if rest.is_empty() {
            return None;
        }

        let truncated = BlobTruncated { position: start };
        let block = match rest {
            [ _, _, 0, code, .. ] => {
                self.position += BLOCK_HEADER_SIZE + 1;
                ConfigBlock::Special(*code)
            },
            [ bank, offset, length, payload @ .. ] if *length > 0 && payload.len() >= *length as usize => {
                let length = *length as usize;
                self.position += BLOCK_HEADER_SIZE + length;
                ConfigBlock::Data { bank: *bank, offset: *offset, payload: &payload[..length] }
            },
            _ => {
                self.position = self.blob.len();
                return Some(Err(truncated));
            },
        };
        Some(Ok(block))
    }
}

/// Overwrites the reserved last byte of a configuration blob with the FIFO rate divisor, the DMP
/// outputs at `200Hz / (1 + rate)`.
/// 
pub fn patch_fifo_rate(blob: &mut [u8], rate: u8) {
    if let Some(last) = blob.last_mut() {
        *last = rate;
    }
}

/// Checks the whole blob before anything gets written, a malformed blob leaves the device
/// untouched.
/// 
pub fn validate_config<E>(blob: &[u8]) -> Result<(), Error<E>> {
    for block in ConfigBlocks::new(blob) {
        match block? {
            ConfigBlock::Data { bank, .. } if bank >= DMP_MEMORY_BANKS => {
                return Err(Error::InvalidBank(bank));
            },
            // A block may roll over into the next bank but never past the last one.
            ConfigBlock::Data { bank, offset, payload }
                if bank as usize * DMP_MEMORY_BANK_SIZE + offset as usize + payload.len() > DMP_MEMORY_SIZE => {
                return Err(Error::InvalidBank(bank + 1));
            },
            ConfigBlock::Data { .. } => {},
            ConfigBlock::Special(code) => {
                SpecialInstruction::try_from(code).map_err(Error::UnknownSpecialInstruction)?;
            },
        }
    }
    Ok(())
}

/// Interprets a configuration blob, writing every data block into DMP memory and executing the
/// special instructions in the order they appear.
/// 
pub fn apply_config<R: RegisterAccess>(mpu: &mut Mpu6050<R>, blob: &[u8]) -> Result<(), Error<R::Error>> {
    validate_config(blob)?;

    for block in ConfigBlocks::new(blob) {
        match block? {
            ConfigBlock::Data { bank, offset, payload } => {
                mpu.write_memory_block(payload, bank, offset).inspect_err(|err| {
                    log::error!("Writing config block to bank {} offset {:#04x} failed: {}", bank, offset, err);
                })?;
            },
            ConfigBlock::Special(code) => {
                match SpecialInstruction::try_from(code).map_err(Error::UnknownSpecialInstruction)? {
                    SpecialInstruction::EnableDmpInterrupts => {
                        log::debug!("Special instruction: enabling DMP interrupts");
                        mpu.set_int_enabled(DMP_CONFIG_INT_ENABLE)?;
                    },
                }
            },
        }
    }
    Ok(())
}

/// Uploads a DMP program image as one contiguous block starting at bank 0 offset 0.
/// 
pub fn upload_firmware<R: RegisterAccess>(mpu: &mut Mpu6050<R>, firmware: &[u8]) -> Result<(), Error<R::Error>> {
    mpu.write_memory_block(firmware, 0, 0).inspect_err(|err| {
        log::error!("Writing DMP firmware failed: {}", err);
    })
}
