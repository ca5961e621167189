//! Named fields of the NBM5100/NBM7100 register map
//!
//! [`Field`] is the closed set of fields the driver knows about. Each field maps to
//! one constant [`FieldTag`] through an exhaustive `match`, so adding a field
//! without describing it is a compile error.
//!
//! Two fields need special handling by the read/write engine:
//! - [`Field::Chengy`] spans the four `CHENERGY` registers and reads as a `u32`
//! - [`Field::Prof`] is six bits wide, with bits 3:0 in `COMMAND[7:4]` and
//!   bits 5:4 in `PROFILE_MSB[1:0]`

use crate::codec::FieldTag;
use crate::gate::Register;
use crate::{DeviceType, DeviceTypes};

/// Width of the split profile field in bits
pub const PROFILE_BITS: u8 = 6;

/// Largest value of the split profile field
pub const PROFILE_MAX: u8 = (1 << PROFILE_BITS) - 1;

/// Register fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Battery voltage low (STATUS\[7\], read-only)
    Lowbat,
    /// Early warning, capacitor voltage below VEW (STATUS\[6\], read-only)
    Ew,
    /// Load current too high (STATUS\[5\], read-only)
    Alrm,
    /// Capacitor charged (STATUS\[0\], read-only)
    Rdy,
    /// Accumulated charge energy (CHENERGY1..4, 32 bits, read-only)
    Chengy,
    /// Capacitor voltage code (VCAP\[4:0\], read-only)
    Vcap,
    /// Capacitor voltage code at end of charge (VCHEND\[4:0\], read-only)
    Vchend,
    /// Optimiser profile (COMMAND\[7:4\] + PROFILE_MSB\[1:0\], 6 bits)
    Prof,
    /// Reset profiler (COMMAND\[3\])
    Rstpf,
    /// Force active (COMMAND\[2\])
    Act,
    /// Enable continuous mode (COMMAND\[1\])
    Ecm,
    /// Enable on demand (COMMAND\[0\])
    Eod,
    /// Fixed capacitor charge voltage (SET1\[7:4\])
    Vfix,
    /// VDH output voltage (SET1\[3:0\])
    Vset,
    /// Capacitor charge current (SET2\[7:5\])
    Ich,
    /// VDH high impedance in standby (SET2\[4\])
    Vdhhiz,
    /// Minimum battery voltage (SET2\[2:0\])
    Vmin,
    /// Automatic mode (SET3\[7\], I2C parts only)
    Automode,
    /// Enable early warning (SET3\[4\])
    Eew,
    /// Early warning threshold (SET3\[3:0\])
    Vew,
    /// Balancing current (SET4\[7:6\], NBM5100 only)
    Balmode,
    /// Enable cell balancing (SET4\[5\], NBM5100 only)
    Enbal,
    /// Maximum capacitor voltage (SET4\[4\])
    Vcapmax,
    /// Optimiser margin (SET5\[1:0\])
    OptMarg,
}

const fn tag(
    register: Register,
    devices: DeviceTypes,
    msb: u8,
    lsb: u8,
    solo: bool,
    writable: bool,
) -> FieldTag {
    FieldTag::new(register, devices, msb, lsb, solo, writable)
}

const ALL_PARTS: DeviceTypes = DeviceTypes::ALL;
const RO: bool = false;
const RW: bool = true;
const SHARED: bool = false;
const SOLO: bool = true;

impl Field {
    /// Every field, in register order
    pub const ALL: [Self; 24] = [
        Self::Lowbat,
        Self::Ew,
        Self::Alrm,
        Self::Rdy,
        Self::Chengy,
        Self::Vcap,
        Self::Vchend,
        Self::Prof,
        Self::Rstpf,
        Self::Act,
        Self::Ecm,
        Self::Eod,
        Self::Vfix,
        Self::Vset,
        Self::Ich,
        Self::Vdhhiz,
        Self::Vmin,
        Self::Automode,
        Self::Eew,
        Self::Vew,
        Self::Balmode,
        Self::Enbal,
        Self::Vcapmax,
        Self::OptMarg,
    ];

    /// Descriptor of this field
    pub const fn tag(self) -> FieldTag {
        match self {
            Self::Lowbat => tag(Register::Status, ALL_PARTS, 7, 7, SHARED, RO),
            Self::Ew => tag(Register::Status, ALL_PARTS, 6, 6, SHARED, RO),
            Self::Alrm => tag(Register::Status, ALL_PARTS, 5, 5, SHARED, RO),
            Self::Rdy => tag(Register::Status, ALL_PARTS, 0, 0, SHARED, RO),
            Self::Chengy => tag(Register::ChEnergy1, ALL_PARTS, 7, 0, SOLO, RO),
            Self::Vcap => tag(Register::Vcap, ALL_PARTS, 4, 0, SOLO, RO),
            Self::Vchend => tag(Register::Vchend, ALL_PARTS, 4, 0, SOLO, RO),
            // Low nibble only, the top bits live in PROFILE_MSB
            Self::Prof => tag(Register::Command, ALL_PARTS, 7, 4, SHARED, RW),
            Self::Rstpf => tag(Register::Command, ALL_PARTS, 3, 3, SHARED, RW),
            Self::Act => tag(Register::Command, ALL_PARTS, 2, 2, SHARED, RW),
            Self::Ecm => tag(Register::Command, ALL_PARTS, 1, 1, SHARED, RW),
            Self::Eod => tag(Register::Command, ALL_PARTS, 0, 0, SHARED, RW),
            Self::Vfix => tag(Register::Set1, ALL_PARTS, 7, 4, SHARED, RW),
            Self::Vset => tag(Register::Set1, ALL_PARTS, 3, 0, SHARED, RW),
            Self::Ich => tag(Register::Set2, ALL_PARTS, 7, 5, SHARED, RW),
            Self::Vdhhiz => tag(Register::Set2, ALL_PARTS, 4, 4, SHARED, RW),
            Self::Vmin => tag(Register::Set2, ALL_PARTS, 2, 0, SHARED, RW),
            Self::Automode => tag(Register::Set3, DeviceTypes::I2C_SERIES, 7, 7, SHARED, RW),
            Self::Eew => tag(Register::Set3, ALL_PARTS, 4, 4, SHARED, RW),
            Self::Vew => tag(Register::Set3, ALL_PARTS, 3, 0, SHARED, RW),
            Self::Balmode => tag(Register::Set4, DeviceTypes::SERIES_5100, 7, 6, SHARED, RW),
            Self::Enbal => tag(Register::Set4, DeviceTypes::SERIES_5100, 5, 5, SHARED, RW),
            Self::Vcapmax => tag(Register::Set4, ALL_PARTS, 4, 4, SHARED, RW),
            Self::OptMarg => tag(Register::Set5, ALL_PARTS, 1, 0, SOLO, RW),
        }
    }

    /// Look up the field described by a raw tag
    ///
    /// Returns `None` if `tag` does not describe one of the defined fields.
    pub fn from_tag(tag: FieldTag) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.tag() == tag)
    }

    /// Width of the field's logical value in bits
    pub const fn width(self) -> u8 {
        match self {
            Self::Chengy => 32,
            Self::Prof => PROFILE_BITS,
            _ => self.tag().len(),
        }
    }

    /// True if `device` implements this field
    ///
    /// The driver does not enforce this; it is provided for callers that want to
    /// guard device-specific settings such as [`Field::Automode`] or
    /// [`Field::Balmode`].
    pub const fn is_supported_by(self, device: DeviceType) -> bool {
        self.tag().devices().contains(device.mask())
    }
}

impl From<Field> for FieldTag {
    fn from(field: Field) -> Self {
        field.tag()
    }
}
