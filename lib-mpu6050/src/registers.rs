//! MPU6050 register map, only the registers and bit fields used to bring up the DMP and read its
//! FIFO output are listed here.
//! 
//! Bit field positions follow the convention of [`crate::RegisterAccess::read_bits`]: the `_BIT`
//! constant names the most significant bit of the field and the field extends `_LENGTH` bits
//! downwards from there.

pub const XG_OFFS_TC: u8 = 0x00; //[7] PWR_MODE, [6:1] XG_OFFS_TC, [0] OTP_BNK_VLD
pub const YG_OFFS_TC: u8 = 0x01; //[7] PWR_MODE, [6:1] YG_OFFS_TC, [0] OTP_BNK_VLD
pub const ZG_OFFS_TC: u8 = 0x02; //[7] PWR_MODE, [6:1] ZG_OFFS_TC, [0] OTP_BNK_VLD

pub const SMPLRT_DIV: u8 = 0x19;

pub const CONFIG: u8 = 0x1A;
pub const GYRO_CONFIG: u8 = 0x1B;
pub const ACCEL_CONFIG: u8 = 0x1C;

pub const MOT_THR: u8 = 0x1F;
pub const MOT_DUR: u8 = 0x20;
pub const ZRMOT_THR: u8 = 0x21;
pub const ZRMOT_DUR: u8 = 0x22;

pub const FIFO_EN: u8 = 0x23;

pub const I2C_SLV0_ADDR: u8 = 0x25;

pub const INT_PIN_CFG: u8 = 0x37;
pub const INT_ENABLE: u8 = 0x38;
pub const INT_STATUS: u8 = 0x3A;

pub const USER_CTRL: u8 = 0x6A;
pub const PWR_MGMT_1: u8 = 0x6B;

pub const BANK_SEL: u8 = 0x6D;
pub const MEM_START_ADDR: u8 = 0x6E;
pub const MEM_R_W: u8 = 0x6F;
pub const DMP_CFG_1: u8 = 0x70;
pub const DMP_CFG_2: u8 = 0x71;

pub const FIFO_COUNT_H: u8 = 0x72;
pub const FIFO_COUNT_L: u8 = 0x73;
pub const FIFO_R_W: u8 = 0x74;

pub const WHO_AM_I: u8 = 0x75;

// XG_OFFS_TC / YG_OFFS_TC / ZG_OFFS_TC
pub const TC_OFFSET_BIT: u8 = 6;
pub const TC_OFFSET_LENGTH: u8 = 6;
pub const TC_OTP_BNK_VLD_BIT: u8 = 0;

// CONFIG
pub const EXT_SYNC_SET_BIT: u8 = 5;
pub const EXT_SYNC_SET_LENGTH: u8 = 3;
pub const DLPF_CFG_BIT: u8 = 2;
pub const DLPF_CFG_LENGTH: u8 = 3;

// GYRO_CONFIG / ACCEL_CONFIG
pub const FS_SEL_BIT: u8 = 4;
pub const FS_SEL_LENGTH: u8 = 2;

// INT_STATUS / INT_ENABLE
pub const INT_FIFO_OFLOW_BIT: u8 = 4;
pub const INT_DMP_BIT: u8 = 1;

// USER_CTRL
pub const USERCTRL_DMP_EN_BIT: u8 = 7;
pub const USERCTRL_FIFO_EN_BIT: u8 = 6;
pub const USERCTRL_I2C_MST_EN_BIT: u8 = 5;
pub const USERCTRL_DMP_RESET_BIT: u8 = 3;
pub const USERCTRL_FIFO_RESET_BIT: u8 = 2;
pub const USERCTRL_I2C_MST_RESET_BIT: u8 = 1;

// PWR_MGMT_1
pub const PWR1_DEVICE_RESET_BIT: u8 = 7;
pub const PWR1_SLEEP_BIT: u8 = 6;
pub const PWR1_CLKSEL_BIT: u8 = 2;
pub const PWR1_CLKSEL_LENGTH: u8 = 3;

// WHO_AM_I
pub const WHO_AM_I_BIT: u8 = 6;
pub const WHO_AM_I_LENGTH: u8 = 6;

// BANK_SEL
pub const BANKSEL_PRFTCH_BIT: u8 = 6;
pub const BANKSEL_CFG_USER_BANK_BIT: u8 = 5;
