use crate::OneWireResult;

/// Status reported by a bus master after a reset/presence-detect cycle.
pub trait OneWireStatus {
    /// At least one device answered the reset with a presence pulse.
    fn presence(&self) -> bool;

    /// The bus was held low during the presence-detect window.
    fn shortcircuit(&self) -> bool;
}

/// Trait for 1-Wire communication.
///
/// An implementation provides the reset/presence-detect cycle and a single
/// time slot exchange. Everything else is built from those two primitives:
/// a write-one slot doubles as a read slot, since a device signals a 0 by
/// holding the line low during the slot.
pub trait OneWire {
    /// The status type returned by the reset operation.
    /// This type must implement the [OneWireStatus] trait.
    type Status: OneWireStatus;
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware or communication.
    type BusError;

    /// Resets the 1-Wire bus and returns the status of the bus.
    ///
    /// # Errors
    /// Implementations return [`OneWireError::NoDevicePresent`](crate::OneWireError::NoDevicePresent)
    /// or [`OneWireError::ShortCircuit`](crate::OneWireError::ShortCircuit) instead of a status
    /// describing those conditions, so that a failed reset can never be mistaken for success.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Generates one time slot, writing `bit` and returning the level sampled by the master.
    ///
    /// Sending a `1` and reading the result is a read slot.
    fn touch_bit(&mut self, bit: bool) -> OneWireResult<bool, Self::BusError>;

    /// Exchanges a byte, least significant bit first.
    ///
    /// Bit `i` of `byte` is sent in slot `i`, and the level sampled in
    /// slot `i` is stored in bit `i` of the result. Sending `0xff` reads a byte.
    fn touch_byte(&mut self, byte: u8) -> OneWireResult<u8, Self::BusError> {
        let mut out = 0;
        for i in 0..8 {
            if self.touch_bit((byte >> i) & 1 == 1)? {
                out |= 1 << i;
            }
        }
        Ok(out)
    }

    /// Writes a byte to the 1-Wire bus.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        self.touch_byte(byte).map(|_| ())
    }

    /// Reads a byte from the 1-Wire bus.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        self.touch_byte(0xff)
    }

    /// Writes a single bit to the 1-Wire bus.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        self.touch_bit(bit).map(|_| ())
    }

    /// Reads a single bit from the 1-Wire bus.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        self.touch_bit(true)
    }

    /// Resets the bus, sends a ROM command byte followed by a function command byte.
    ///
    /// Returns the byte sampled while the function command was sent. A failed
    /// reset aborts the sequence before any time slot is generated.
    fn send_command(&mut self, target: u8, command: u8) -> OneWireResult<u8, Self::BusError> {
        self.reset()?;
        self.touch_byte(target)?;
        self.touch_byte(command)
    }
}
