//! Field value codes and conversion to physical units
//!
//! Most configuration fields hold a code rather than a physical value. The
//! [`values`] module names every documented code; the conversion functions map
//! the voltage codes to millivolts.
//!
//! # Example
//!
//! ```ignore
//! # use nbm::{Field, units::{self, values}};
//! nbm.write_field(Field::Vfix, values::VFIX_3V84)?;
//! let vcap = nbm.read_field(Field::Vcap)? as u8;
//! let vcap_mv = units::vcap_to_mv(vcap);
//! ```

use crate::fields::PROFILE_MAX;

/// Named codes for each field
#[allow(missing_docs)]
pub mod values {
    pub const LOWBAT_VBAT_GOOD: u8 = 0;
    pub const LOWBAT_VBAT_LOW: u8 = 1;

    pub const EW_VCAP_GOOD: u8 = 0;
    pub const EW_VCAP_LOW: u8 = 1;

    pub const ALRM_ILOAD_GOOD: u8 = 0;
    pub const ALRM_ILOAD_TOO_HIGH: u8 = 1;

    pub const RDY_CAP_NOT_CHARGED: u8 = 0;
    pub const RDY_CAP_CHARGED: u8 = 1;

    pub const EOD_INACTIVE: u8 = 0;
    pub const EOD_ON_DEMAND: u8 = 1;

    pub const ECM_INACTIVE: u8 = 0;
    pub const ECM_CONTINUOUS: u8 = 1;

    pub const ACT_INACTIVE: u8 = 0;
    pub const ACT_FORCE_ACTIVE: u8 = 1;

    pub const RSTPF_INACTIVE: u8 = 0;
    pub const RSTPF_RESET: u8 = 1;

    pub const AUTOMODE_INACTIVE: u8 = 0;
    pub const AUTOMODE_ACTIVE: u8 = 1;

    pub const VSET_1V8: u8 = 0;
    pub const VSET_2V0: u8 = 1;
    pub const VSET_2V2: u8 = 2;
    pub const VSET_2V4: u8 = 3;
    pub const VSET_2V5: u8 = 4;
    pub const VSET_2V6: u8 = 5;
    pub const VSET_2V7: u8 = 6;
    pub const VSET_2V8: u8 = 7;
    pub const VSET_2V9: u8 = 8;
    /// Reset default
    pub const VSET_3V0: u8 = 9;
    pub const VSET_3V1: u8 = 10;
    pub const VSET_3V2: u8 = 11;
    pub const VSET_3V3: u8 = 12;
    pub const VSET_3V4: u8 = 13;
    pub const VSET_3V5: u8 = 14;
    pub const VSET_3V6: u8 = 15;

    pub const VFIX_2V60: u8 = 3;
    pub const VFIX_2V95: u8 = 4;
    pub const VFIX_3V27: u8 = 5;
    pub const VFIX_3V57: u8 = 6;
    pub const VFIX_3V84: u8 = 7;
    pub const VFIX_4V10: u8 = 8;
    pub const VFIX_4V33: u8 = 9;
    pub const VFIX_4V55: u8 = 10;
    pub const VFIX_4V76: u8 = 11;
    pub const VFIX_4V96: u8 = 12;
    pub const VFIX_5V16: u8 = 13;
    pub const VFIX_5V34: u8 = 14;
    pub const VFIX_5V54: u8 = 15;

    pub const VCAPMAX_4V95: u8 = 0;
    pub const VCAPMAX_5V54: u8 = 1;

    pub const VMIN_2V4: u8 = 0;
    pub const VMIN_2V6: u8 = 1;
    pub const VMIN_2V8: u8 = 2;
    pub const VMIN_3V0: u8 = 3;
    pub const VMIN_3V2: u8 = 4;

    pub const ICH_2MA: u8 = 0;
    pub const ICH_4MA: u8 = 1;
    pub const ICH_8MA: u8 = 2;
    pub const ICH_16MA: u8 = 3;
    pub const ICH_50MA: u8 = 4;

    pub const VEW_2V4: u8 = 0;
    pub const VEW_2V6: u8 = 1;
    pub const VEW_2V8: u8 = 2;
    pub const VEW_3V0: u8 = 3;
    pub const VEW_3V2: u8 = 4;
    pub const VEW_3V4: u8 = 5;
    pub const VEW_3V6: u8 = 6;
    pub const VEW_3V84: u8 = 7;
    pub const VEW_4V1: u8 = 8;
    pub const VEW_4V3: u8 = 9;

    pub const VDHHIZ_ALWAYS_ON: u8 = 0;
    pub const VDHHIZ_HIGH_IMPEDANCE: u8 = 1;

    pub const PROF_NO_OPTIMISER: u8 = 0;

    pub const OPT_MARG_INACTIVE: u8 = 0;
    pub const OPT_MARG_2V19: u8 = 1;
    pub const OPT_MARG_2V60: u8 = 2;
    pub const OPT_MARG_2V95: u8 = 3;

    pub const BALMODE_1MA10: u8 = 0;
    pub const BALMODE_2MA30: u8 = 1;
    pub const BALMODE_3MA15: u8 = 2;
    pub const BALMODE_4MA90: u8 = 3;

    pub const ENBAL_INACTIVE: u8 = 0;
    pub const ENBAL_ACTIVE: u8 = 1;
}

/// Optimiser profile code for profile `n`, clamped to `1..=63`
///
/// Use [`values::PROF_NO_OPTIMISER`] to disable the optimiser.
pub const fn profile(n: u8) -> u8 {
    if n < 1 {
        1
    } else if n > PROFILE_MAX {
        PROFILE_MAX
    } else {
        n
    }
}

/// `VFIX` code to millivolts, 0 for codes without a documented voltage
pub const fn vfix_to_mv(vfix: u8) -> u16 {
    match vfix {
        values::VFIX_2V60 => 2600,
        values::VFIX_2V95 => 2950,
        values::VFIX_3V27 => 3270,
        values::VFIX_3V57 => 3570,
        values::VFIX_3V84 => 3840,
        values::VFIX_4V10 => 4100,
        values::VFIX_4V33 => 4330,
        values::VFIX_4V55 => 4550,
        values::VFIX_4V76 => 4760,
        values::VFIX_4V96 => 4960,
        values::VFIX_5V16 => 5160,
        values::VFIX_5V34 => 5340,
        values::VFIX_5V54 => 5540,
        _ => 0,
    }
}

/// `VCAP`/`VCHEND` code to millivolts, 0 for codes out of range
///
/// Codes 0 to 3 all read as 1100 mV: the converter does not resolve
/// voltages below 1.1 V.
pub const fn vcap_to_mv(vcap: u8) -> u16 {
    const TABLE: [u16; 32] = [
        1100, 1100, 1100, 1100, 1200, 1300, 1400, 1510, //
        1600, 1710, 1810, 1990, 2190, 2400, 2600, 2790, //
        2950, 3010, 3200, 3270, 3410, 3570, 3610, 3840, //
        4100, 4330, 4550, 4760, 4950, 5160, 5340, 5540,
    ];

    if (vcap as usize) < TABLE.len() {
        TABLE[vcap as usize]
    } else {
        0
    }
}

/// `VCAPMAX` code to millivolts, 0 for codes out of range
pub const fn vcapmax_to_mv(vcapmax: u8) -> u16 {
    match vcapmax {
        values::VCAPMAX_4V95 => 4950,
        values::VCAPMAX_5V54 => 5540,
        _ => 0,
    }
}
