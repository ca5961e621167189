//! Bus interface implementations for the NBM5100/NBM7100
//!
//! These are the two transport functions of the driver: byte-level register read
//! and write over I2C (`NBMx100A`) or SPI (`NBMx100B`), exposed through the
//! `device-driver` [`RegisterInterface`] trait. Any other `RegisterInterface`
//! implementation can be used in their place.

use crate::I2C_ADDRESS_PRIMARY;
use crate::gate::REGISTER_COUNT;

use device_driver::RegisterInterface;

/// Largest write frame: one register address followed by a full register dump
const MAX_FRAME: usize = REGISTER_COUNT + 1;

/// Read flag in the SPI command byte
const SPI_READ: u8 = 0x80;

/// I2C interface for the NBM5100A/NBM7100A
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the primary address (0x2E)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut nbm = NbmDriver::new(interface, DeviceType::Nbm7100A);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_PRIMARY,
        }
    }

    /// Create a new I2C interface with the secondary address (0x2F)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_SECONDARY,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The I2C device address in use
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_FRAME];
        buffer[0] = address;
        let len = write_data.len().min(REGISTER_COUNT);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

/// SPI interface for the NBM5100B/NBM7100B
///
/// # Note on Chip Select
///
/// The chip select line is owned by the `SpiDevice` implementation, e.g.
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
///
/// Each transaction starts with a command byte holding the register index, with
/// bit 7 set for reads.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let command = [address | SPI_READ];
        let mut operations = [
            embedded_hal::spi::Operation::Write(&command),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_FRAME];
        buffer[0] = address & !SPI_READ;
        let len = write_data.len().min(REGISTER_COUNT);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len])
    }
}
