use embedded_onewire::OneWireCrc;

use crate::{Configuration, Temperature};

/// The nine scratchpad bytes, in the order the device sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scratchpad {
    /// Temperature register, low byte.
    pub temperature_lsb: u8,
    /// Temperature register, high byte (sign bits).
    pub temperature_msb: u8,
    /// High alarm trigger, or user byte 1.
    pub th_register: u8,
    /// Low alarm trigger, or user byte 2.
    pub tl_register: u8,
    /// Configuration register.
    pub configuration: u8,
    /// Reserved, reads `0xff`.
    pub reserved_ff: u8,
    /// Reserved.
    pub reserved_xx: u8,
    /// Reserved, reads `0x10`.
    pub reserved_10: u8,
    /// CRC-8 of the eight bytes above.
    pub crc: u8,
}

impl Scratchpad {
    /// Size of the scratchpad in bytes.
    pub const LEN: usize = 9;

    /// Builds the record from the bytes in reception order.
    pub const fn from_bytes(b: [u8; Self::LEN]) -> Self {
        Self {
            temperature_lsb: b[0],
            temperature_msb: b[1],
            th_register: b[2],
            tl_register: b[3],
            configuration: b[4],
            reserved_ff: b[5],
            reserved_xx: b[6],
            reserved_10: b[7],
            crc: b[8],
        }
    }

    /// The bytes in reception order.
    pub const fn to_bytes(&self) -> [u8; Self::LEN] {
        [
            self.temperature_lsb,
            self.temperature_msb,
            self.th_register,
            self.tl_register,
            self.configuration,
            self.reserved_ff,
            self.reserved_xx,
            self.reserved_10,
            self.crc,
        ]
    }

    /// Conversion resolution in bits, 9 to 12.
    pub const fn resolution_bits(&self) -> u8 {
        let c = self.configuration;
        9 + ((c >> 5) & 1) + (((c >> 6) & 1) << 1)
    }

    /// Configuration register as a bitfield.
    pub const fn configuration_register(&self) -> Configuration {
        Configuration::from_bits(self.configuration)
    }

    /// Temperature register, sign-extended.
    pub fn temperature(&self) -> Temperature {
        Temperature::from_le_bytes([self.temperature_lsb, self.temperature_msb])
    }

    /// Whether the CRC byte matches the other eight.
    pub fn crc_valid(&self) -> bool {
        OneWireCrc::validate(&self.to_bytes())
    }
}
