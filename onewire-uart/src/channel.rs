use std::{
    io::{self, Read, Write},
    time::Duration,
};

use serialport::{ClearBuffer, DataBits, ErrorKind, FlowControl, Parity, SerialPort, StopBits};

use crate::{UartError, UartResult};

/// Serial line settings of a [`SerialChannel`].
///
/// Only the baud rate changes while the channel is open; the frame format is
/// always 8 data bits, no parity and one stop bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate used for bit time slots.
    pub baud_rate_normal: u32,
    /// Baud rate used while sending the reset pulse.
    pub baud_rate_reset: u32,
    /// Upper bound on a single byte read.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate_normal: 115_200,
            baud_rate_reset: 9_600,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Byte-level access to a UART whose baud rate can change on the fly.
pub trait UartPort {
    /// Switches the baud rate; takes effect before the next byte is sent.
    fn set_baud_rate(&mut self, rate: u32) -> UartResult<()>;

    /// Transmits exactly one byte.
    fn write_byte(&mut self, byte: u8) -> UartResult<()>;

    /// Waits for one byte, bounded by the read timeout.
    ///
    /// Returns `None` if nothing arrived in time.
    fn read_byte(&mut self) -> UartResult<Option<u8>>;
}

impl<P: UartPort + ?Sized> UartPort for &mut P {
    fn set_baud_rate(&mut self, rate: u32) -> UartResult<()> {
        (**self).set_baud_rate(rate)
    }

    fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self) -> UartResult<Option<u8>> {
        (**self).read_byte()
    }
}

/// A serial port opened for 1-Wire use.
pub struct SerialChannel {
    path: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialChannel {
    /// Opens `path` at the normal baud rate of `config`.
    ///
    /// # Errors
    /// [`UartError::PortUnavailable`] if the node is missing, busy or not
    /// accessible, [`UartError::PortOpenFailed`] for any other failure.
    pub fn open(path: &str, config: &SerialConfig) -> UartResult<Self> {
        #[cfg(unix)]
        if !std::path::Path::new(path).exists() {
            return Err(UartError::PortUnavailable {
                path: path.to_string(),
                source: serialport::Error::new(ErrorKind::NoDevice, "device node does not exist"),
            });
        }
        let port = serialport::new(path, config.baud_rate_normal)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| match source.kind() {
                ErrorKind::NoDevice
                | ErrorKind::Io(io::ErrorKind::NotFound)
                | ErrorKind::Io(io::ErrorKind::PermissionDenied) => UartError::PortUnavailable {
                    path: path.to_string(),
                    source,
                },
                _ => UartError::PortOpenFailed {
                    path: path.to_string(),
                    source,
                },
            })?;
        // Stale bytes would pair the next write with the wrong echo
        port.clear(ClearBuffer::All)
            .map_err(|source| UartError::PortOpenFailed {
                path: path.to_string(),
                source,
            })?;
        log::debug!("opened {path} at {} baud", config.baud_rate_normal);
        Ok(Self {
            path: path.to_string(),
            port: Some(port),
        })
    }

    /// Releases the port. Calling this more than once is harmless.
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            log::debug!("closed {}", self.path);
        }
    }

    fn port(&mut self) -> UartResult<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(UartError::Closed)
    }
}

impl UartPort for SerialChannel {
    fn set_baud_rate(&mut self, rate: u32) -> UartResult<()> {
        self.port()?
            .set_baud_rate(rate)
            .map_err(|source| UartError::Baud { rate, source })
    }

    fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        let port = self.port()?;
        port.write_all(&[byte]).map_err(UartError::Write)?;
        // Drain before reading so the echo belongs to this byte
        port.flush().map_err(UartError::Write)
    }

    fn read_byte(&mut self) -> UartResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.port()?.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(UartError::Read(e)),
        }
    }
}

/// Lists serial ports whose name starts with `prefix`, sorted by name.
pub fn available_ports(prefix: &str) -> UartResult<Vec<String>> {
    let mut ports: Vec<String> = serialport::available_ports()
        .map_err(UartError::Enumerate)?
        .into_iter()
        .map(|info| info.port_name)
        .filter(|name| name.starts_with(prefix))
        .collect();
    ports.sort();
    Ok(ports)
}
