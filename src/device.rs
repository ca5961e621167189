//! High-level driver API for the NBM5100/NBM7100
//!
//! [`NbmDriver`] owns the bus interface of one device and translates named
//! [`Field`]s into register transactions:
//!
//! - **Solo fields** (the field owns its register) are written directly
//! - **Shared fields** are read-modify-written so neighbouring bits survive
//! - **`PROF`** is split over `COMMAND[7:4]` and `PROFILE_MSB[1:0]`
//! - **`CHENGY`** is read as four consecutive bytes, most significant first
//!
//! # Error state
//!
//! Every failing operation returns an [`Error`] and also ORs its flag into the
//! driver's cumulative [`ErrorFlags`]. The flags are only cleared by
//! [`NbmDriver::clear_errors`]. An optional observer registered with
//! [`NbmDriver::with_error_observer`] is called synchronously each time an
//! operation adds a flag that was not already set.
//!
//! An operation stops at its first failure. A `PROF` write whose second bus write
//! fails leaves `PROFILE_MSB` already updated.

use crate::codec::FieldTag;
use crate::fields::{Field, PROFILE_MAX};
use crate::gate::{REGISTER_COUNT, Register, is_valid_register, is_writable_register};
use crate::registers::RegisterDevice;
use crate::{DeviceType, Error, ErrorFlags};

use device_driver::RegisterInterface;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Bits of the profile value stored in `COMMAND[7:4]`
const PROFILE_LOW_BITS: u8 = 4;

/// Mask of `PROFILE_MSB` holding profile bits 5:4
const PROFILE_MSB_MASK: u8 = 0b11;

/// Width of the accumulated energy counter in bytes
const ENERGY_BYTES: usize = 4;

const fn size_bits(len: usize) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let bits = (len * 8) as u32;
    bits
}

/// Main driver for the NBM5100/NBM7100
///
/// `F` is the error observer; drivers built with [`NbmDriver::new`] have none.
pub struct NbmDriver<I, F = fn(ErrorFlags)> {
    device: RegisterDevice<I>,
    device_type: DeviceType,
    errors: ErrorFlags,
    on_error: Option<F>,
}

impl<I> NbmDriver<I> {
    /// Create a new driver instance
    ///
    /// No bus traffic is generated.
    ///
    /// # Arguments
    /// * `interface` - Bus interface, e.g. [`I2cInterface`](crate::I2cInterface)
    /// * `device_type` - Which member of the family is connected
    pub fn new(interface: I, device_type: DeviceType) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            device_type,
            errors: ErrorFlags::empty(),
            on_error: None,
        }
    }
}

impl<I, F> NbmDriver<I, F> {
    /// Register an error observer
    ///
    /// The observer is called with the updated error flags whenever an operation
    /// sets a flag that was not set before. It runs synchronously inside the
    /// failing call and must not block.
    ///
    /// # Example
    /// ```ignore
    /// let mut nbm = NbmDriver::new(interface, DeviceType::Nbm7100A)
    ///     .with_error_observer(|flags| defmt::error!("nbm error {}", flags));
    /// ```
    pub fn with_error_observer<G>(self, observer: G) -> NbmDriver<I, G>
    where
        G: FnMut(ErrorFlags),
    {
        NbmDriver {
            device: self.device,
            device_type: self.device_type,
            errors: self.errors,
            on_error: Some(observer),
        }
    }

    /// The device type this driver was created for
    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Accumulated error flags
    pub const fn errors(&self) -> ErrorFlags {
        self.errors
    }

    /// Clear the accumulated error flags
    pub fn clear_errors(&mut self) {
        self.errors = ErrorFlags::empty();
    }

    /// True if the connected device implements `field`
    pub const fn supports(&self, field: Field) -> bool {
        field.is_supported_by(self.device_type)
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }

    /// Get a mutable reference to the underlying register device (for advanced usage)
    ///
    /// Accesses made through the register device bypass the driver's error state.
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<I> {
        &mut self.device
    }
}

impl<I, F> NbmDriver<I, F>
where
    I: RegisterInterface<AddressType = u8>,
    F: FnMut(ErrorFlags),
{
    // ==================== FIELD ACCESS ====================

    /// Write a field
    ///
    /// `value` is the field's raw code, aligned to bit 0. Fields sharing their
    /// register are read first so the other bits are preserved.
    ///
    /// # Errors
    ///
    /// - [`Error::NotWritable`] if the field is read-only
    /// - [`Error::InvalidValue`] if `value` does not fit the field (for
    ///   [`Field::Prof`]: above 63)
    /// - [`Error::Bus`] if a bus transaction fails
    ///
    /// Validation errors are raised before any bus traffic.
    pub fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<I::Error>> {
        let tag = field.tag();

        if !is_writable_register(tag.register()) || !tag.is_writable() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Write to read-only field {}", field);
            return Err(self.raise(Error::NotWritable));
        }

        if field == Field::Prof {
            return self.write_profile(value);
        }

        if value & tag.value_mask() != value {
            #[cfg(feature = "defmt")]
            defmt::warn!("Value {=u8} does not fit field {}", value, field);
            return Err(self.raise(Error::InvalidValue));
        }

        let byte = self.merge(tag, value)?;
        self.write_bytes(tag.register(), &[byte])
    }

    /// Read a field
    ///
    /// Returns the field's raw code aligned to bit 0. [`Field::Chengy`] returns the
    /// full 32-bit counter; every other field fits in the low byte.
    ///
    /// The value is not validated: transitional states reported by the hardware
    /// are returned as read.
    ///
    /// # Errors
    ///
    /// Returns an error if a bus transaction fails.
    pub fn read_field(&mut self, field: Field) -> Result<u32, Error<I::Error>> {
        match field {
            Field::Chengy => self.read_energy(),
            Field::Prof => self.read_profile().map(u32::from),
            _ => {
                let tag = field.tag();
                let mut buffer = [0u8; 1];
                self.read_bytes(tag.register(), &mut buffer)?;
                Ok(u32::from((buffer[0] >> tag.lsb()) & tag.value_mask()))
            }
        }
    }

    /// Write the field described by a raw tag
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] without bus traffic if `tag` is not one
    /// of the defined fields, otherwise as [`write_field`](Self::write_field).
    pub fn write_tag(&mut self, tag: FieldTag, value: u8) -> Result<(), Error<I::Error>> {
        let field = self.lookup(tag)?;
        self.write_field(field, value)
    }

    /// Read the field described by a raw tag
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] without bus traffic if `tag` is not one
    /// of the defined fields, otherwise as [`read_field`](Self::read_field).
    pub fn read_tag(&mut self, tag: FieldTag) -> Result<u32, Error<I::Error>> {
        let field = self.lookup(tag)?;
        self.read_field(field)
    }

    /// Read the accumulated charge energy counter
    ///
    /// The four `CHENERGY` registers are read in one transaction; `CHENERGY1`
    /// holds the most significant byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    pub fn read_energy(&mut self) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; ENERGY_BYTES];
        self.read_bytes(Register::ChEnergy1.index(), &mut buffer)?;
        Ok(u32::from_be_bytes(buffer))
    }

    // ==================== REGISTER ACCESS ====================

    /// Read `buffer.len()` consecutive registers starting at `register`
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRegister`] if `register` is unknown or the read runs
    ///   past the last register
    /// - [`Error::Bus`] if the bus transaction fails
    pub fn read_register(
        &mut self,
        register: impl Into<u8>,
        buffer: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        let register = register.into();
        self.check_span(register, buffer.len())?;
        self.read_bytes(register, buffer)
    }

    /// Write `data` to consecutive registers starting at `register`
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRegister`] if `register` is unknown or the write runs
    ///   past the last register
    /// - [`Error::NotWritable`] if `register` is read-only
    /// - [`Error::Bus`] if the bus transaction fails
    pub fn write_register(
        &mut self,
        register: impl Into<u8>,
        data: &[u8],
    ) -> Result<(), Error<I::Error>> {
        let register = register.into();
        self.check_span(register, data.len())?;

        if !is_writable_register(register) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Write to read-only register {=u8}", register);
            return Err(self.raise(Error::NotWritable));
        }

        self.write_bytes(register, data)
    }

    // ==================== PINS ====================

    /// Sample the READY pin
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if the pin cannot be read.
    pub fn read_ready<P>(&mut self, pin: &mut P) -> Result<bool, Error<I::Error>>
    where
        P: InputPin,
    {
        pin.is_high().map_err(|_| self.raise(Error::Pin))
    }

    /// Drive the START pin
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if the pin cannot be driven.
    pub fn write_start<P>(&mut self, pin: &mut P, high: bool) -> Result<(), Error<I::Error>>
    where
        P: OutputPin,
    {
        pin.set_state(PinState::from(high))
            .map_err(|_| self.raise(Error::Pin))
    }

    // ==================== INTERNALS ====================

    /// Profile values are six bits: bits 3:0 go to `COMMAND[7:4]`, bits 5:4 to
    /// `PROFILE_MSB[1:0]`. `PROFILE_MSB` is written first.
    fn write_profile(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        if value > PROFILE_MAX {
            #[cfg(feature = "defmt")]
            defmt::warn!("Profile {=u8} out of range", value);
            return Err(self.raise(Error::InvalidValue));
        }

        let tag = Field::Prof.tag();
        let command = self.merge(tag, value & tag.value_mask())?;

        self.write_bytes(Register::ProfileMsb.index(), &[value >> PROFILE_LOW_BITS])?;
        self.write_bytes(tag.register(), &[command])
    }

    fn read_profile(&mut self) -> Result<u8, Error<I::Error>> {
        let tag = Field::Prof.tag();
        let mut msb = [0u8; 1];
        let mut command = [0u8; 1];

        self.read_bytes(Register::ProfileMsb.index(), &mut msb)?;
        self.read_bytes(tag.register(), &mut command)?;

        Ok(((msb[0] & PROFILE_MSB_MASK) << PROFILE_LOW_BITS)
            | ((command[0] >> tag.lsb()) & tag.value_mask()))
    }

    /// Register byte with `value` placed in the field's bits
    ///
    /// Solo fields need no read; shared registers are read so the other fields
    /// keep their bits.
    fn merge(&mut self, tag: FieldTag, value: u8) -> Result<u8, Error<I::Error>> {
        let shifted = value << tag.lsb();
        if tag.is_solo() {
            return Ok(shifted);
        }

        let mut current = [0u8; 1];
        self.read_bytes(tag.register(), &mut current)?;
        Ok((current[0] & !tag.register_mask()) | shifted)
    }

    fn lookup(&mut self, tag: FieldTag) -> Result<Field, Error<I::Error>> {
        match Field::from_tag(tag) {
            Some(field) => Ok(field),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Unknown field tag {=u16:#x}", tag.bits());
                Err(self.raise(Error::InvalidField))
            }
        }
    }

    fn check_span(&mut self, register: u8, len: usize) -> Result<(), Error<I::Error>> {
        if is_valid_register(register) && usize::from(register) + len <= REGISTER_COUNT {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("Invalid register access {=u8} (+{=usize})", register, len);
        Err(self.raise(Error::InvalidRegister))
    }

    fn read_bytes(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .read_register(register, size_bits(buffer.len()), buffer)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Bus read failed at register {=u8}", register);
                self.raise(Error::Bus(e))
            })
    }

    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .write_register(register, size_bits(data.len()), data)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Bus write failed at register {=u8}", register);
                self.raise(Error::Bus(e))
            })
    }

    /// Record `error` in the error state and notify the observer of new flags
    fn raise(&mut self, error: Error<I::Error>) -> Error<I::Error> {
        let previous = self.errors;
        self.errors |= error.flag();

        if self.errors != previous {
            #[cfg(feature = "defmt")]
            defmt::debug!("Error flags now {}", self.errors);

            if let Some(observer) = self.on_error.as_mut() {
                observer(self.errors);
            }
        }

        error
    }
}
