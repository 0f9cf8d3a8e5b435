use embedded_onewire::OneWireError;

/// Results of DS18B20 operations.
pub type Ds18b20Result<T, E> = Result<T, Ds18b20Error<E>>;

/// DS18B20 driver errors.
#[derive(Debug, PartialEq)]
pub enum Ds18b20Error<E> {
    /// The bus transaction failed.
    Bus(OneWireError<E>),
    /// Requested resolution is outside 9..=12 bits. The bus was not touched.
    InvalidResolution(u8),
    /// The device did not report completion within the allowed number of polls.
    ConversionTimeout {
        /// Number of polls made.
        polls: u32,
    },
    /// The wait was cancelled through the cancellation flag.
    Cancelled,
    /// CRC check of a ROM code or scratchpad failed.
    InvalidCrc,
}

impl<E> From<OneWireError<E>> for Ds18b20Error<E> {
    fn from(value: OneWireError<E>) -> Self {
        Self::Bus(value)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for Ds18b20Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => e.fmt(f),
            Self::InvalidResolution(bits) => {
                write!(f, "invalid resolution {bits} bits, expected 9 to 12")
            }
            Self::ConversionTimeout { polls } => {
                write!(f, "device still busy after {polls} polls")
            }
            Self::Cancelled => f.write_str("wait cancelled"),
            Self::InvalidCrc => f.write_str("CRC mismatch"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for Ds18b20Error<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Bus(e) => Some(e),
            _ => None,
        }
    }
}
