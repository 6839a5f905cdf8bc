use core::fmt;

/// Anything that can go wrong while talking to the MPU6050 or its DMP, generic over the error
/// type of the underlying bus.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E>
{
    /// The bus transaction itself failed.
    Bus(E),

    /// Reading back a freshly written memory chunk gave different bytes, `bank`/`offset` point at
    /// the first byte that differs.
    BlockWriteFailed { bank: u8, offset: u8 },

    /// A configuration blob contains a special instruction code we do not know about.
    UnknownSpecialInstruction(u8),

    /// A configuration blob ends in the middle of the block starting at `position`.
    TruncatedBlob { position: usize },

    /// A memory write targets a bank beyond the 8 banks the DMP has.
    InvalidBank(u8),

    /// The FIFO did not reach the expected depth within the configured number of polls.
    Timeout,

    /// The DMP session has not finished initializing (or failed to), so there is nothing to poll.
    NotReady,
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bus(err) => write!(f, "Bus error: {:?}", err),
            Self::BlockWriteFailed { bank, offset } => write!(
                f, "Verify of DMP memory failed at bank {}, offset {:#04x}", bank, offset
            ),
            Self::UnknownSpecialInstruction(code) => write!(f, "Unknown special instruction: {:#04x}", code),
            Self::TruncatedBlob { position } => write!(f, "Blob truncated in block at byte {}", position),
            Self::InvalidBank(bank) => write!(f, "Invalid DMP memory bank: {}", bank),
            Self::Timeout => write!(f, "Timed out waiting for the FIFO"),
            Self::NotReady => write!(f, "DMP is not initialized"),
        }
    }
}

/// Which part of the DMP initialization failed, kept around by a failed session.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitFailure
{
    FirmwareUpload,
    ConfigurationUpload,
    Device,
}

impl InitFailure {

    /// Numeric failure code, `1` for the firmware and `2` for the configuration upload.
    /// 
    pub fn code(&self) -> u8 {
        match self {
            Self::FirmwareUpload => 1,
            Self::ConfigurationUpload => 2,
            Self::Device => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError<E>
{
    /// Writing the DMP program image failed.
    FirmwareUploadFailed(Error<E>),

    /// Interpreting the DMP configuration blob failed.
    ConfigurationUploadFailed(Error<E>),

    /// Any other register access failed or timed out.
    Device(Error<E>),

    /// The session already failed earlier and will not try again.
    Halted(InitFailure),
}

impl<E> InitError<E> {

    pub fn failure(&self) -> InitFailure {
        match self {
            Self::FirmwareUploadFailed(_) => InitFailure::FirmwareUpload,
            Self::ConfigurationUploadFailed(_) => InitFailure::ConfigurationUpload,
            Self::Device(_) => InitFailure::Device,
            Self::Halted(failure) => *failure,
        }
    }
}

impl<E: fmt::Debug> core::error::Error for InitError<E> {}

impl<E: fmt::Debug> fmt::Display for InitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FirmwareUploadFailed(err) => write!(f, "DMP firmware upload failed: {}", err),
            Self::ConfigurationUploadFailed(err) => write!(f, "DMP configuration upload failed: {}", err),
            Self::Device(err) => write!(f, "DMP initialization failed: {}", err),
            Self::Halted(failure) => write!(f, "DMP initialization already failed ({:?})", failure),
        }
    }
}

impl<E> From<Error<E>> for InitError<E>
{
    fn from(err: Error<E>) -> Self {
        InitError::Device(err)
    }
}
