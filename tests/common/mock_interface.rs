//! Mock interface implementation for testing the NBM driver
//!
//! The mock is an in-memory register file shared between the test and the driver
//! (through `Rc<RefCell<_>>`), with an operation log and failure injection.

use device_driver::RegisterInterface;
use nbm::REGISTER_COUNT;
use std::cell::RefCell;
use std::rc::Rc;

/// Power-on register contents of the simulated device
pub const RESET_REGISTERS: [u8; REGISTER_COUNT] = [
    0x00, // STATUS
    0x00, 0x00, 0x00, 0x00, // CHENERGY1..4
    0x00, // VCAP
    0x00, // VCHEND
    0x00, // PROFILE_MSB
    0x10, // COMMAND
    0x09, // SET1
    0x80, // SET2
    0x80, // SET3
    0x00, // SET4
    0x00, // SET5
];

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read transaction
    Read {
        /// First register address
        address: u8,
        /// Bytes that were returned
        data: Vec<u8>,
    },
    /// Write transaction
    Write {
        /// First register address
        address: u8,
        /// Bytes that were written
        data: Vec<u8>,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values
    registers: [u8; REGISTER_COUNT],

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
    /// Fail the write after this many successful writes
    fail_write_after: Option<usize>,
}

impl MockState {
    fn new() -> Self {
        Self {
            registers: RESET_REGISTERS,
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fail_write_after: None,
        }
    }

    fn span(address: u8, len: usize) -> Result<std::ops::Range<usize>, MockError> {
        let start = usize::from(address);
        let end = start + len;
        if end > REGISTER_COUNT {
            return Err(MockError::OutOfRange);
        }
        Ok(start..end)
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with power-on register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers[usize::from(address)] = value;
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state.borrow().registers[usize::from(address)]
    }

    /// Set consecutive registers starting at `address`
    pub fn set_registers(&self, address: u8, values: &[u8]) {
        let start = usize::from(address);
        self.state.borrow_mut().registers[start..start + values.len()].copy_from_slice(values);
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Let `count` writes succeed, then fail the next one
    #[allow(dead_code)]
    pub fn fail_write_after(&self, count: usize) {
        self.state.borrow_mut().fail_write_after = Some(count);
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    #[allow(dead_code)]
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Number of bus transactions performed
    pub fn transaction_count(&self) -> usize {
        self.state.borrow().operations.len()
    }

    /// Write transactions only
    pub fn writes(&self) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(|op| matches!(op, Operation::Write { .. }))
            .collect()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
    /// Access past the last register
    OutOfRange,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        let span = MockState::span(address, read_data.len())?;
        read_data.copy_from_slice(&state.registers[span]);

        state.operations.push(Operation::Read {
            address,
            data: read_data.to_vec(),
        });

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }
        match state.fail_write_after {
            Some(0) => {
                state.fail_write_after = None;
                return Err(MockError::Communication);
            }
            Some(remaining) => state.fail_write_after = Some(remaining - 1),
            None => {}
        }

        let span = MockState::span(address, write_data.len())?;
        state.registers[span].copy_from_slice(write_data);

        state.operations.push(Operation::Write {
            address,
            data: write_data.to_vec(),
        });

        Ok(())
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
