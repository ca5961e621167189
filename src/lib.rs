#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod codec;
pub mod device;
pub mod fields;
pub mod gate;
pub mod interface;
pub mod registers;
pub mod units;

// Re-export main types
pub use codec::FieldTag;
pub use device::NbmDriver;
pub use fields::Field;
pub use gate::{REGISTER_COUNT, Register, is_valid_register, is_writable_register};
pub use interface::{I2cInterface, SpiInterface};

use bitflags::bitflags;

/// NBMx100A I2C address, primary (0x2E)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_PRIMARY: u8 = 0x2E;

/// NBMx100A I2C address, secondary (0x2F)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_SECONDARY: u8 = 0x2F;

/// Members of the NBM device family
///
/// The `A` parts are I2C devices, the `B` parts are SPI devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceType {
    /// NBM5100A (I2C, with cell balancing)
    Nbm5100A = 1,
    /// NBM5100B (SPI, with cell balancing)
    Nbm5100B = 2,
    /// NBM7100A (I2C)
    Nbm7100A = 4,
    /// NBM7100B (SPI)
    Nbm7100B = 8,
}

impl DeviceType {
    /// The single-bit device mask for this device
    pub const fn mask(self) -> DeviceTypes {
        DeviceTypes::from_bits_retain(self as u8)
    }

    /// True for the I2C variants (`NBM5100A`, `NBM7100A`)
    pub const fn is_i2c(self) -> bool {
        matches!(self, Self::Nbm5100A | Self::Nbm7100A)
    }
}

bitflags! {
    /// Set of device types, used to record which parts implement a field
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceTypes: u8 {
        /// NBM5100A
        const NBM5100A = 1 << 0;
        /// NBM5100B
        const NBM5100B = 1 << 1;
        /// NBM7100A
        const NBM7100A = 1 << 2;
        /// NBM7100B
        const NBM7100B = 1 << 3;

        /// Every member of the family
        const ALL = Self::NBM5100A.bits() | Self::NBM5100B.bits()
            | Self::NBM7100A.bits() | Self::NBM7100B.bits();
        /// NBM5100A and NBM5100B
        const SERIES_5100 = Self::NBM5100A.bits() | Self::NBM5100B.bits();
        /// NBM7100A and NBM7100B
        const SERIES_7100 = Self::NBM7100A.bits() | Self::NBM7100B.bits();
        /// The I2C parts
        const I2C_SERIES = Self::NBM5100A.bits() | Self::NBM7100A.bits();
        /// The SPI parts
        const SPI_SERIES = Self::NBM5100B.bits() | Self::NBM7100B.bits();
    }
}

bitflags! {
    /// Cumulative error state of a driver
    ///
    /// Every failed operation ORs its flag into the driver's error state. The state
    /// is never cleared by the driver itself, see [`NbmDriver::clear_errors`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ErrorFlags: u8 {
        /// A transport (bus or pin) call failed
        const IO_ERROR = 1;
        /// A value does not fit the field it was written to
        const INVALID_VALUE = 2;
        /// Write to a read-only register or field
        const NOT_WRITABLE = 4;
        /// Unknown register index, or an access running past the last register
        const INVALID_REGISTER = 16;
        /// Unknown field tag
        const INVALID_FIELD = 32;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ErrorFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ErrorFlags({=u8:#x})", self.bits());
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceTypes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DeviceTypes({=u8:#x})", self.bits());
    }
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// A READY or START pin operation failed
    Pin,
    /// Value out of the field's legal range
    InvalidValue,
    /// Attempted write to a read-only register or field
    NotWritable,
    /// Unknown register index or out of range register access
    InvalidRegister,
    /// Unknown field tag
    InvalidField,
}

impl<E> Error<E> {
    /// The flag this error sets in the driver's cumulative error state
    pub const fn flag(&self) -> ErrorFlags {
        match self {
            Self::Bus(_) | Self::Pin => ErrorFlags::IO_ERROR,
            Self::InvalidValue => ErrorFlags::INVALID_VALUE,
            Self::NotWritable => ErrorFlags::NOT_WRITABLE,
            Self::InvalidRegister => ErrorFlags::INVALID_REGISTER,
            Self::InvalidField => ErrorFlags::INVALID_FIELD,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
