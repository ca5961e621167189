//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use nbm::{DeviceType, ErrorFlags, NbmDriver};
use std::cell::RefCell;
use std::rc::Rc;

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver() -> (NbmDriver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = NbmDriver::new(interface, DeviceType::Nbm7100A);
    (driver, interface_clone)
}

/// Observer log shared between a test and its driver's error observer
pub type ObserverLog = Rc<RefCell<Vec<ErrorFlags>>>;

/// Create a mock driver whose error observer records every call
pub fn create_observed_driver() -> (
    NbmDriver<MockInterface, impl FnMut(ErrorFlags)>,
    MockInterface,
    ObserverLog,
) {
    let (driver, interface) = create_mock_driver();
    let log: ObserverLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let driver = driver.with_error_observer(move |flags| sink.borrow_mut().push(flags));
    (driver, interface, log)
}

/// Mock digital pin
///
/// Reading returns `level`; driving records the new level. Set `fail` to make
/// every access fail.
#[derive(Debug, Default)]
pub struct MockPin {
    /// Current level
    pub level: bool,
    /// Fail every access
    pub fail: bool,
}

/// Mock pin error
#[derive(Debug)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        Ok(self.level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        self.level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        self.level = true;
        Ok(())
    }
}
