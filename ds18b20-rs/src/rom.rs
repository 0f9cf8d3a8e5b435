use embedded_onewire::OneWireCrc;

/// 64-bit ROM code of a 1-Wire device.
///
/// On the wire the family code comes first, then the serial number least
/// significant byte first, then the CRC. `serial` is stored most
/// significant byte first, the order it is usually printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomCode {
    /// CRC-8 over family code and serial number.
    pub crc: u8,
    /// 48-bit serial number, most significant byte first.
    pub serial: [u8; 6],
    /// Device family (0x28 for the DS18B20).
    pub family_code: u8,
}

impl RomCode {
    /// Builds a ROM code from the eight bytes in the order they were received.
    pub const fn from_wire(wire: [u8; 8]) -> Self {
        Self {
            crc: wire[7],
            serial: [wire[6], wire[5], wire[4], wire[3], wire[2], wire[1]],
            family_code: wire[0],
        }
    }

    /// The eight bytes in transmission order.
    pub const fn to_wire(&self) -> [u8; 8] {
        let s = self.serial;
        [
            self.family_code,
            s[5],
            s[4],
            s[3],
            s[2],
            s[1],
            s[0],
            self.crc,
        ]
    }

    /// ROM code as reported by [`OneWireSearch`](embedded_onewire::OneWireSearch).
    pub const fn as_u64(&self) -> u64 {
        u64::from_le_bytes(self.to_wire())
    }

    /// Whether the CRC byte matches family code and serial number.
    pub fn crc_valid(&self) -> bool {
        OneWireCrc::validate(&self.to_wire())
    }
}

impl From<u64> for RomCode {
    fn from(rom: u64) -> Self {
        Self::from_wire(rom.to_le_bytes())
    }
}

impl From<RomCode> for u64 {
    fn from(rom: RomCode) -> Self {
        rom.as_u64()
    }
}

/// Formats as `ff-ssssssssssss`, family code and serial number in hex.
impl core::fmt::Display for RomCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02x}-", self.family_code)?;
        for b in self.serial.iter() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RomCode;

    #[test]
    fn reverses_serial_from_wire_order() {
        let wire = [0x28, 0x38, 0x17, 0xd9, 0x10, 0x20, 0x01, 0x5c];
        let rom = RomCode::from_wire(wire);
        assert_eq!(rom.family_code, 0x28);
        assert_eq!(rom.serial, [0x01, 0x20, 0x10, 0xd9, 0x17, 0x38]);
        assert_eq!(rom.crc, 0x5c);
        assert_eq!(rom.to_wire(), wire);
    }

    #[test]
    fn u64_uses_wire_order() {
        let wire = [0x02, 0x1c, 0xb8, 0x01, 0x00, 0x00, 0x00, 0xa2];
        let rom = RomCode::from(u64::from_le_bytes(wire));
        assert_eq!(rom.family_code, 0x02);
        assert_eq!(rom.serial, [0x00, 0x00, 0x00, 0x01, 0xb8, 0x1c]);
        assert_eq!(u64::from(rom), u64::from_le_bytes(wire));
        assert!(rom.crc_valid());
    }

    #[test]
    fn detects_bad_crc() {
        let rom = RomCode::from_wire([0x02, 0x1c, 0xb8, 0x01, 0x00, 0x00, 0x00, 0xa3]);
        assert!(!rom.crc_valid());
    }
}
