use embedded_onewire::OneWireStatus;

/// Byte written at the reset baud rate to generate a reset pulse.
pub(crate) const RESET_PULSE: u8 = 0xf0;
/// Echo of a single presence pulse at the reset baud rate.
pub(crate) const ECHO_SINGLE_DEVICE: u8 = 0xe0;
/// Echo of a line held low for the whole byte.
pub(crate) const ECHO_SHORTED: u8 = 0x00;

/// Outcome of a reset pulse, derived from the byte echoed back on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusResetResult {
    /// The reset byte came back unchanged: nobody pulled the line low.
    NoDevicesPresent,
    /// The line was low for the entire byte.
    ShortCircuit,
    /// The echo matches the presence pulse of one device.
    SingleDevicePresent,
    /// Overlapping presence pulses from several devices.
    MultipleDevicesPresent,
}

impl BusResetResult {
    /// Classifies the echo of a reset pulse.
    pub const fn from_echo(echo: u8) -> Self {
        match echo {
            RESET_PULSE => Self::NoDevicesPresent,
            ECHO_SHORTED => Self::ShortCircuit,
            ECHO_SINGLE_DEVICE => Self::SingleDevicePresent,
            _ => Self::MultipleDevicesPresent,
        }
    }
}

impl OneWireStatus for BusResetResult {
    fn presence(&self) -> bool {
        matches!(
            self,
            Self::SingleDevicePresent | Self::MultipleDevicesPresent
        )
    }

    fn shortcircuit(&self) -> bool {
        matches!(self, Self::ShortCircuit)
    }
}

#[cfg(test)]
mod tests {
    use super::BusResetResult::{self, *};
    use embedded_onewire::OneWireStatus;

    #[test]
    fn classifies_echo() {
        let cases = [
            (0xf0, NoDevicesPresent),
            (0x00, ShortCircuit),
            (0xe0, SingleDevicePresent),
            (0xe1, MultipleDevicesPresent),
            (0x01, MultipleDevicesPresent),
            (0xc0, MultipleDevicesPresent),
            (0x80, MultipleDevicesPresent),
            (0xef, MultipleDevicesPresent),
            (0xff, MultipleDevicesPresent),
        ];
        for (echo, expected) in cases {
            assert_eq!(BusResetResult::from_echo(echo), expected, "echo {echo:#04x}");
        }
    }

    #[test]
    fn only_other_echoes_are_multiple_devices() {
        for echo in 0..=u8::MAX {
            let status = BusResetResult::from_echo(echo);
            let special = matches!(echo, 0xf0 | 0x00 | 0xe0);
            assert_eq!(status == MultipleDevicesPresent, !special);
        }
    }

    #[test]
    fn status_flags() {
        assert!(!NoDevicesPresent.presence());
        assert!(!ShortCircuit.presence());
        assert!(ShortCircuit.shortcircuit());
        assert!(SingleDevicePresent.presence());
        assert!(MultipleDevicesPresent.presence());
        assert!(!MultipleDevicesPresent.shortcircuit());
    }
}
