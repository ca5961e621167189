//! Register indices and the register access gate
//!
//! The device exposes fourteen byte-wide registers. Status and measurement
//! registers (0-6) are read-only, configuration and command registers (7-13)
//! are read-write. Writability follows no numeric pattern in the silicon, so it
//! is classified explicitly per register.
//!
//! ## Register map
//! | Index | Register      | Access |
//! |-------|---------------|--------|
//! | 0     | `STATUS`      | RO     |
//! | 1-4   | `CHENERGY1-4` | RO     |
//! | 5     | `VCAP`        | RO     |
//! | 6     | `VCHEND`      | RO     |
//! | 7     | `PROFILE_MSB` | RW     |
//! | 8     | `COMMAND`     | RW     |
//! | 9-13  | `SET1-5`      | RW     |
//!
//! This module is the register access gate: [`is_valid_register`] and
//! [`is_writable_register`] are total over every `u8`.

/// Number of registers on the device
pub const REGISTER_COUNT: usize = 14;

/// Register indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Status flags
    Status = 0,
    /// Accumulated charge energy, most significant byte
    ChEnergy1 = 1,
    /// Accumulated charge energy, byte 2
    ChEnergy2 = 2,
    /// Accumulated charge energy, byte 3
    ChEnergy3 = 3,
    /// Accumulated charge energy, least significant byte
    ChEnergy4 = 4,
    /// Storage capacitor voltage
    Vcap = 5,
    /// Capacitor voltage at the end of the last charge
    Vchend = 6,
    /// Top two bits of the optimiser profile
    ProfileMsb = 7,
    /// Command register
    Command = 8,
    /// Settings 1
    Set1 = 9,
    /// Settings 2
    Set2 = 10,
    /// Settings 3
    Set3 = 11,
    /// Settings 4
    Set4 = 12,
    /// Settings 5
    Set5 = 13,
}

impl Register {
    /// All registers in index order
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::Status,
        Self::ChEnergy1,
        Self::ChEnergy2,
        Self::ChEnergy3,
        Self::ChEnergy4,
        Self::Vcap,
        Self::Vchend,
        Self::ProfileMsb,
        Self::Command,
        Self::Set1,
        Self::Set2,
        Self::Set3,
        Self::Set4,
        Self::Set5,
    ];

    /// Register index on the bus
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a register by index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Status),
            1 => Some(Self::ChEnergy1),
            2 => Some(Self::ChEnergy2),
            3 => Some(Self::ChEnergy3),
            4 => Some(Self::ChEnergy4),
            5 => Some(Self::Vcap),
            6 => Some(Self::Vchend),
            7 => Some(Self::ProfileMsb),
            8 => Some(Self::Command),
            9 => Some(Self::Set1),
            10 => Some(Self::Set2),
            11 => Some(Self::Set3),
            12 => Some(Self::Set4),
            13 => Some(Self::Set5),
            _ => None,
        }
    }

    /// True for configuration and command registers
    // No wildcard arm: a new register must be classified here.
    pub const fn is_writable(self) -> bool {
        match self {
            Self::Status
            | Self::ChEnergy1
            | Self::ChEnergy2
            | Self::ChEnergy3
            | Self::ChEnergy4
            | Self::Vcap
            | Self::Vchend => false,
            Self::ProfileMsb
            | Self::Command
            | Self::Set1
            | Self::Set2
            | Self::Set3
            | Self::Set4
            | Self::Set5 => true,
        }
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.index()
    }
}

impl TryFrom<u8> for Register {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(index)
    }
}

/// True if `index` names a register of the device
pub const fn is_valid_register(index: u8) -> bool {
    Register::from_index(index).is_some()
}

/// True if `index` names a register that may be written
pub const fn is_writable_register(index: u8) -> bool {
    match Register::from_index(index) {
        Some(register) => register.is_writable(),
        None => false,
    }
}
