use embedded_onewire::{OneWire, OneWireError, OneWireResult};

use crate::{
    BusResetResult, SerialChannel, SerialConfig, UartError, UartPort, UartResult,
    status::RESET_PULSE,
};

/// Time slot byte that leaves the line high (write-one or read slot).
const SLOT_ONE: u8 = 0xff;
/// Time slot byte that holds the line low (write-zero slot).
const SLOT_ZERO: u8 = 0x00;

/// A 1-Wire bus master driving the line through a UART.
///
/// The bus owns its port exclusively; nothing else may talk to the port
/// while a transaction is in progress, since every written byte is paired
/// with the next byte read back.
pub struct OneWireUart<P> {
    port: P,
    config: SerialConfig,
}

impl OneWireUart<SerialChannel> {
    /// Opens a serial port and wraps it in a bus master.
    pub fn open(path: &str, config: SerialConfig) -> UartResult<Self> {
        Ok(Self::new(SerialChannel::open(path, &config)?, config))
    }

    /// Releases the serial port.
    pub fn close(&mut self) {
        self.port.close();
    }
}

impl<P> OneWireUart<P> {
    /// Creates a bus master on an already opened port.
    ///
    /// The port is expected to run at `config.baud_rate_normal`.
    pub fn new(port: P, config: SerialConfig) -> Self {
        Self { port, config }
    }

    /// Borrows the underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: UartPort> OneWire for OneWireUart<P> {
    type Status = BusResetResult;

    type BusError = UartError;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        self.port.set_baud_rate(self.config.baud_rate_reset)?;
        self.port.write_byte(RESET_PULSE)?;
        let echo = self.port.read_byte();
        // back to slot speed even when the read failed
        self.port.set_baud_rate(self.config.baud_rate_normal)?;
        let echo = echo?.ok_or(UartError::NoEcho)?;
        let status = BusResetResult::from_echo(echo);
        log::debug!("reset echo {echo:#04x}: {status:?}");
        match status {
            BusResetResult::NoDevicesPresent => Err(OneWireError::NoDevicePresent),
            BusResetResult::ShortCircuit => Err(OneWireError::ShortCircuit),
            present => Ok(present),
        }
    }

    fn touch_bit(&mut self, bit: bool) -> OneWireResult<bool, Self::BusError> {
        self.port
            .write_byte(if bit { SLOT_ONE } else { SLOT_ZERO })?;
        let echo = self.port.read_byte()?;
        log::trace!("slot {} echo {echo:02x?}", bit as u8);
        // a lost echo reads as a zero
        Ok(echo == Some(SLOT_ONE))
    }
}
