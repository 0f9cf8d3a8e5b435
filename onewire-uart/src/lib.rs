#![deny(missing_docs)]

/*! # onewire-uart
 *
 * A 1-Wire bus master built from a plain UART, such as a USB serial adapter
 * with TX and RX tied together onto the 1-Wire data line.
 *
 * The UART line driver generates the 1-Wire time slots. A `0xf0` byte at
 * 9600 baud pulls the line low for long enough to act as a reset pulse, and
 * devices answering with a presence pulse corrupt the echoed byte. At
 * 115200 baud a single byte spans one time slot: `0xff` is a write-one (or
 * read) slot and `0x00` a write-zero slot, and any device holding the line
 * low shows up as an echo other than `0xff`.
 *
 * [`OneWireUart`] implements [`OneWire`] on top of any [`UartPort`];
 * [`SerialChannel`] is the implementation backed by a real serial port.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult};
mod channel;
mod error;
mod onewire;
mod status;

pub use channel::{SerialChannel, SerialConfig, UartPort, available_ports};
pub use error::UartError;
pub use onewire::OneWireUart;
pub use status::BusResetResult;

/// Results of UART-specific function calls.
pub type UartResult<T> = Result<T, UartError>;
