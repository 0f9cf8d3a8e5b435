use bitfield_struct::bitfield;

/// Conversion resolution of the temperature register.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 0.5 °C steps.
    Resolution9bit = 9,
    /// 0.25 °C steps.
    Resolution10bit = 10,
    /// 0.125 °C steps.
    Resolution11bit = 11,
    /// 0.0625 °C steps, the power-on default.
    #[default]
    Resolution12bit = 12,
}

impl Resolution {
    /// Resolution for a bit count in 9..=12.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        use Resolution::*;
        match bits {
            9 => Some(Resolution9bit),
            10 => Some(Resolution10bit),
            11 => Some(Resolution11bit),
            12 => Some(Resolution12bit),
            _ => None,
        }
    }

    /// Number of bits.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Resolution {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value).ok_or(value)
    }
}

/// Configuration register of the DS18B20.
///
/// Only R0 (bit 5) and R1 (bit 6) are meaningful; the other bits are
/// reserved and carried through unchanged.
#[bitfield(u8)]
pub struct Configuration {
    #[bits(5)]
    __: u8,
    /// R1:R0, resolution minus nine.
    #[bits(2)]
    resolution_code: u8,
    __: bool,
}

impl Configuration {
    /// Register content after power-on with factory EEPROM (12 bits).
    pub const POWER_ON: Self = Self::from_bits(0x7f);

    /// Resolution selected by R1:R0.
    pub const fn resolution(&self) -> Resolution {
        use Resolution::*;
        match self.resolution_code() {
            0 => Resolution9bit,
            1 => Resolution10bit,
            2 => Resolution11bit,
            _ => Resolution12bit,
        }
    }

    /// Copy of the register with R1:R0 replaced.
    pub const fn with_resolution(self, resolution: Resolution) -> Self {
        self.with_resolution_code(resolution.bits() - 9)
    }
}
