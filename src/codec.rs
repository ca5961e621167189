//! Field descriptor encoding
//!
//! Every named field of the NBM register map is described by a [`FieldTag`], a
//! `u16` packing where the field lives and how it may be accessed:
//!
//! ```text
//!  15    12 11     8 7   5 4   2   1      0
//! +--------+--------+-----+-----+------+----------+
//! |  reg   | devices| msb | lsb | solo | writable |
//! +--------+--------+-----+-----+------+----------+
//! ```
//!
//! - **reg**: index of the register holding the field (or, for multi-byte
//!   fields, the first register)
//! - **devices**: [`DeviceTypes`] mask of the parts implementing the field
//! - **msb**/**lsb**: bit positions of the field inside the register byte
//! - **solo**: the field owns the whole register, writes need no prior read
//! - **writable**: the field may be written
//!
//! Decoding is pure bit arithmetic and never fails. Tags are trusted to come from
//! the [`Field`](crate::Field) table; validating a raw tag is the job of
//! [`Field::from_tag`](crate::Field::from_tag).

use crate::DeviceTypes;
use crate::gate::Register;

const REGISTER_SHIFT: u16 = 12;
const DEVICES_SHIFT: u16 = 8;
const MSB_SHIFT: u16 = 5;
const LSB_SHIFT: u16 = 2;
const SOLO_SHIFT: u16 = 1;
const WRITABLE_SHIFT: u16 = 0;

const NIBBLE: u16 = 0xF;
const BIT_POSITION: u16 = 0x7;

/// Compact descriptor of one register field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldTag(u16);

impl FieldTag {
    /// Encode a field descriptor
    ///
    /// # Arguments
    /// * `register` - Register holding the field
    /// * `devices` - Parts implementing the field
    /// * `msb` - Most significant bit position (0-7)
    /// * `lsb` - Least significant bit position (0-7, `lsb <= msb`)
    /// * `solo` - Field occupies the whole register
    /// * `writable` - Field may be written
    pub const fn new(
        register: Register,
        devices: DeviceTypes,
        msb: u8,
        lsb: u8,
        solo: bool,
        writable: bool,
    ) -> Self {
        Self(
            ((register as u16 & NIBBLE) << REGISTER_SHIFT)
                | ((devices.bits() as u16 & NIBBLE) << DEVICES_SHIFT)
                | ((msb as u16 & BIT_POSITION) << MSB_SHIFT)
                | ((lsb as u16 & BIT_POSITION) << LSB_SHIFT)
                | ((solo as u16) << SOLO_SHIFT)
                | ((writable as u16) << WRITABLE_SHIFT),
        )
    }

    /// Wrap a raw tag value
    ///
    /// The result is not guaranteed to describe a defined field.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The raw tag value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Index of the register holding the field
    pub const fn register(self) -> u8 {
        ((self.0 >> REGISTER_SHIFT) & NIBBLE) as u8
    }

    /// Parts implementing the field
    pub const fn devices(self) -> DeviceTypes {
        DeviceTypes::from_bits_retain(((self.0 >> DEVICES_SHIFT) & NIBBLE) as u8)
    }

    /// Most significant bit position inside the register
    pub const fn msb(self) -> u8 {
        ((self.0 >> MSB_SHIFT) & BIT_POSITION) as u8
    }

    /// Least significant bit position inside the register
    pub const fn lsb(self) -> u8 {
        ((self.0 >> LSB_SHIFT) & BIT_POSITION) as u8
    }

    /// Width of the field in bits, always in `1..=8`
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> u8 {
        // Wraps for a malformed tag (lsb > msb) instead of overflowing
        (self.msb().wrapping_sub(self.lsb()) & BIT_POSITION as u8) + 1
    }

    /// Mask of the field's value, aligned to bit 0
    pub const fn value_mask(self) -> u8 {
        u8::MAX >> (8 - self.len())
    }

    /// Mask of the field's bits inside the register byte
    pub const fn register_mask(self) -> u8 {
        self.value_mask() << self.lsb()
    }

    /// True if the field owns its whole register
    pub const fn is_solo(self) -> bool {
        (self.0 >> SOLO_SHIFT) & 1 == 1
    }

    /// True if the field may be written
    pub const fn is_writable(self) -> bool {
        (self.0 >> WRITABLE_SHIFT) & 1 == 1
    }
}
