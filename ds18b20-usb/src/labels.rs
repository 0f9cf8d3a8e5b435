use std::collections::HashMap;

use ds18b20::RomCode;

/// Human names for sensors, keyed by serial number.
#[derive(Debug, Default)]
pub struct Labels(HashMap<[u8; 6], String>);

impl Labels {
    /// Name of the sensor, or its serial number in hex when it has none.
    pub fn name(&self, rom: &RomCode) -> String {
        self.0
            .get(&rom.serial)
            .cloned()
            .unwrap_or_else(|| hex::encode(rom.serial))
    }
}

impl FromIterator<([u8; 6], String)> for Labels {
    fn from_iter<T: IntoIterator<Item = ([u8; 6], String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses `SERIAL=NAME`, the serial number being 12 hex digits.
pub fn parse_label(s: &str) -> Result<([u8; 6], String), String> {
    let (serial, name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SERIAL=NAME, got `{s}`"))?;
    let bytes = hex::decode(serial.trim()).map_err(|e| format!("serial `{serial}`: {e}"))?;
    let serial: [u8; 6] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("serial must be 6 bytes, got {}", b.len()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("empty sensor name".to_string());
    }
    Ok((serial, name.to_string()))
}
