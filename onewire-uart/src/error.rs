use thiserror::Error;

/// Serial transport errors.
#[derive(Debug, Error)]
pub enum UartError {
    /// The device node does not exist, is busy or may not be opened.
    #[error("serial port {path} is unavailable")]
    PortUnavailable {
        /// Device path.
        path: String,
        /// Underlying error.
        #[source]
        source: serialport::Error,
    },
    /// The port could not be opened for any other reason.
    #[error("failed to open serial port {path}")]
    PortOpenFailed {
        /// Device path.
        path: String,
        /// Underlying error.
        #[source]
        source: serialport::Error,
    },
    /// Changing the baud rate of an open port failed.
    #[error("failed to switch baud rate to {rate}")]
    Baud {
        /// Requested baud rate.
        rate: u32,
        /// Underlying error.
        #[source]
        source: serialport::Error,
    },
    /// Writing a byte failed.
    #[error("serial write failed")]
    Write(#[source] std::io::Error),
    /// Reading a byte failed for a reason other than a timeout.
    #[error("serial read failed")]
    Read(#[source] std::io::Error),
    /// The reset pulse was not echoed back at all.
    ///
    /// Even an empty bus echoes the reset byte, so this points at the
    /// adapter or its TX/RX wiring.
    #[error("reset pulse was not echoed")]
    NoEcho,
    /// The channel has been closed.
    #[error("serial port is closed")]
    Closed,
    /// Listing serial ports failed.
    #[error("failed to enumerate serial ports")]
    Enumerate(#[source] serialport::Error),
}
