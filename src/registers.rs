//! Typed register map for the NBM5100/NBM7100
//!
//! Register-level access with named fields, generated by `device-driver`. The
//! field engine in [`crate::device`] does not go through these types; it works on
//! raw register indices validated by [`crate::gate`]. Reach this device through
//! [`NbmDriver::device_mut`](crate::NbmDriver::device_mut).
//!
//! `CHENERGY1..4` are described as one 32-bit big-endian register.

device_driver::create_device!(
    device_name: Nbm,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// STATUS - Status flags (0x00)
        register Status {
            type Access = RO;
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Capacitor charged, device ready
            rdy: bool = 0,
            /// Load current alarm
            alrm: bool = 5,
            /// Early warning, VCAP below VEW
            ew: bool = 6,
            /// Battery voltage low
            lowbat: bool = 7,
        },

        /// CHENERGY1..4 - Accumulated charge energy (0x01-0x04)
        /// CHENERGY1 is the most significant byte
        register ChEnergy {
            type Access = RO;
            const ADDRESS = 0x01;
            const SIZE_BITS = 32;

            /// Accumulated energy counter
            energy: uint = 0..32,
        },

        /// VCAP - Storage capacitor voltage code (0x05)
        register Vcap {
            type Access = RO;
            const ADDRESS = 0x05;
            const SIZE_BITS = 8;

            /// Voltage code, see `units::vcap_to_mv`
            vcap: uint = 0..5,
        },

        /// VCHEND - Capacitor voltage at end of charge (0x06)
        register Vchend {
            type Access = RO;
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// Voltage code, see `units::vcap_to_mv`
            vchend: uint = 0..5,
        },

        /// PROFILE_MSB - Top bits of the optimiser profile (0x07)
        register ProfileMsb {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Profile bits 5:4
            prof_msb: uint = 0..2,
        },

        /// COMMAND - Command register (0x08)
        register Command {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;
            const RESET_VALUE = 0x10;

            /// Enable on demand
            eod: bool = 0,
            /// Enable continuous mode
            ecm: bool = 1,
            /// Force active
            act: bool = 2,
            /// Reset profiler
            rstpf: bool = 3,
            /// Profile bits 3:0
            prof: uint = 4..8,
        },

        /// SET1 - Settings 1 (0x09)
        register Set1 {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;
            const RESET_VALUE = 0x09;

            /// VDH output voltage
            vset: uint = 0..4,
            /// Fixed capacitor charge voltage
            vfix: uint = 4..8,
        },

        /// SET2 - Settings 2 (0x0A)
        register Set2 {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;
            const RESET_VALUE = 0x80;

            /// Minimum battery voltage
            vmin: uint = 0..3,
            /// VDH high impedance in standby
            vdhhiz: bool = 4,
            /// Capacitor charge current
            ich: uint = 5..8,
        },

        /// SET3 - Settings 3 (0x0B)
        register Set3 {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;
            const RESET_VALUE = 0x80;

            /// Early warning threshold
            vew: uint = 0..4,
            /// Enable early warning
            eew: bool = 4,
            /// Automatic mode (I2C parts only)
            automode: bool = 7,
        },

        /// SET4 - Settings 4 (0x0C)
        register Set4 {
            const ADDRESS = 0x0C;
            const SIZE_BITS = 8;

            /// Maximum capacitor voltage
            vcapmax: bool = 4,
            /// Enable cell balancing (NBM5100 only)
            enbal: bool = 5,
            /// Balancing current (NBM5100 only)
            balmode: uint = 6..8,
        },

        /// SET5 - Settings 5 (0x0D)
        register Set5 {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 8;

            /// Optimiser margin
            opt_marg: uint = 0..2,
        }
    }
);

// Re-export commonly used types for convenience
pub use Nbm as RegisterDevice;
