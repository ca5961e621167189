//! Unit tests for the split profile field and the energy counter

use crate::common::{MockError, Operation, create_mock_driver};
use nbm::fields::PROFILE_MAX;
use nbm::units;
use nbm::{Error, ErrorFlags, Field, Register};

// ==================== PROF ====================

#[test]
fn test_profile_write_splits_value() {
    let (mut driver, interface) = create_mock_driver();

    driver.write_field(Field::Prof, 37).unwrap();

    assert_eq!(interface.get_register(Register::ProfileMsb.index()), 2);
    assert_eq!(interface.get_register(Register::Command.index()) >> 4, 5);
    assert_eq!(driver.read_field(Field::Prof).unwrap(), 37);
}

#[test]
fn test_profile_write_sequence() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Register::Command.index(), 0x1F);

    driver.write_field(Field::Prof, 37).unwrap();

    // COMMAND is read for its low bits, then PROFILE_MSB is written first
    assert_eq!(
        interface.operations(),
        vec![
            Operation::Read {
                address: 8,
                data: vec![0x1F],
            },
            Operation::Write {
                address: 7,
                data: vec![2],
            },
            Operation::Write {
                address: 8,
                data: vec![0x5F],
            },
        ]
    );
}

#[test]
fn test_profile_round_trip() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Register::Command.index(), 0x0A);

    for value in 0..=PROFILE_MAX {
        driver.write_field(Field::Prof, value).unwrap();
        assert_eq!(driver.read_field(Field::Prof).unwrap(), u32::from(value));
        // Command bits untouched
        assert_eq!(interface.get_register(Register::Command.index()) & 0x0F, 0x0A);
    }
}

#[test]
fn test_profile_limits() {
    let (mut driver, interface) = create_mock_driver();

    driver.write_field(Field::Prof, units::profile(200)).unwrap();
    assert_eq!(interface.get_register(Register::ProfileMsb.index()), 3);
    assert_eq!(interface.get_register(Register::Command.index()) >> 4, 0xF);

    interface.clear_operations();
    for value in [PROFILE_MAX + 1, 0x80, 0xFF] {
        let result = driver.write_field(Field::Prof, value);
        assert!(matches!(result, Err(Error::InvalidValue)), "{value}");
    }
    assert_eq!(interface.transaction_count(), 0);
    assert_eq!(driver.errors(), ErrorFlags::INVALID_VALUE);
}

#[test]
fn test_profile_read_ignores_unused_msb_bits() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Register::ProfileMsb.index(), 0xFE);
    interface.set_register(Register::Command.index(), 0x3C);

    assert_eq!(driver.read_field(Field::Prof).unwrap(), 0x23);
}

#[test]
fn test_profile_partial_write_is_not_rolled_back() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_write_after(1);

    let result = driver.write_field(Field::Prof, 37);

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(interface.get_register(Register::ProfileMsb.index()), 2);
    assert_eq!(interface.get_register(Register::Command.index()), 0x10);
    assert_eq!(driver.errors(), ErrorFlags::IO_ERROR);
}

#[test]
fn test_profile_read_failure_prevents_writes() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_next_read();

    let result = driver.write_field(Field::Prof, 37);

    assert!(matches!(result, Err(Error::Bus(_))));
    assert!(interface.writes().is_empty());
    assert_eq!(interface.get_register(Register::ProfileMsb.index()), 0);
}

// ==================== CHENGY ====================

#[test]
fn test_energy_most_significant_byte_first() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_registers(Register::ChEnergy1.index(), &[4, 3, 2, 1]);
    assert_eq!(driver.read_field(Field::Chengy).unwrap(), 67_305_985);

    interface.set_registers(Register::ChEnergy1.index(), &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(driver.read_energy().unwrap(), 0x0102_0304);

    interface.set_registers(Register::ChEnergy1.index(), &[0xFF; 4]);
    assert_eq!(driver.read_energy().unwrap(), u32::MAX);
}

#[test]
fn test_energy_single_transaction() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_registers(Register::ChEnergy1.index(), &[0, 0, 1, 0]);

    assert_eq!(driver.read_field(Field::Chengy).unwrap(), 256);
    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: 1,
            data: vec![0, 0, 1, 0],
        }]
    );
}

#[test]
fn test_energy_is_read_only() {
    let (mut driver, interface) = create_mock_driver();

    let result = driver.write_field(Field::Chengy, 1);

    assert!(matches!(result, Err(Error::NotWritable)));
    assert_eq!(interface.transaction_count(), 0);
}

#[test]
fn test_energy_read_failure() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_next_read();

    assert!(matches!(
        driver.read_field(Field::Chengy),
        Err(Error::Bus(MockError::Communication))
    ));
    assert_eq!(driver.errors(), ErrorFlags::IO_ERROR);
}
