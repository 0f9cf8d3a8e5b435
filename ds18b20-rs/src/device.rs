use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_onewire::{
    OneWire,
    consts::{ONEWIRE_READ_ROM_CMD, ONEWIRE_SKIP_ROM_CMD},
};

use crate::{
    DS18B20_CONVERT_T, DS18B20_COPY_SCRATCH, DS18B20_READ_POWERMODE, DS18B20_READ_SCRATCH,
    DS18B20_RECALL_EEPROM, DS18B20_WRITE_SCRATCH, Ds18b20Error, Ds18b20Result, Resolution,
    RomCode, Scratchpad, Temperature,
};

/// EEPROM write time after Copy Scratchpad.
const COPY_SCRATCH_DELAY_MS: u32 = 10;

/// How the sensors on the bus are powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Every device has its own supply.
    ExternallyPowered,
    /// At least one device draws power from the data line.
    ParasiticPowered,
}

/// DS18B20 sensor(s) addressed by broadcast.
///
/// Holds no bus state. Waiting for a conversion is done by polling the bus
/// every `poll_interval_ms` until the device releases the line, for at
/// most `max_polls` attempts.
#[derive(Debug)]
pub struct Ds18b20<'a> {
    poll_interval_ms: u32,
    max_polls: u32,
    crc: bool,
    cancel: Option<&'a AtomicBool>,
}

impl Default for Ds18b20<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Ds18b20<'a> {
    /// Family code of the DS18B20.
    #[inline]
    pub const fn family() -> u8 {
        0x28
    }

    fn new() -> Self {
        Self {
            poll_interval_ms: 500,
            max_polls: 20,
            crc: false,
            cancel: None,
        }
    }

    /// Sets the delay between two completion polls.
    pub fn with_poll_interval_ms(mut self, interval: u32) -> Self {
        self.poll_interval_ms = interval;
        self
    }

    /// Sets how many completion polls are made before giving up (at least one).
    pub fn with_max_polls(mut self, polls: u32) -> Self {
        self.max_polls = polls.max(1);
        self
    }

    /// Verify the CRC of ROM codes and scratchpads.
    pub fn with_crc_check(mut self, crc: bool) -> Self {
        self.crc = crc;
        self
    }

    /// Flag checked between completion polls; setting it aborts the wait.
    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Starts a temperature conversion and waits until it has finished.
    ///
    /// # Errors
    /// [`Ds18b20Error::ConversionTimeout`] if the device is still busy after
    /// the configured number of polls, [`Ds18b20Error::Cancelled`] if the
    /// cancellation flag was raised.
    pub fn start_temperature_conversion<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> Ds18b20Result<(), O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_CONVERT_T)?;
        self.wait_ready(bus, delay)
    }

    /// Polls read slots until the device stops holding the line low.
    fn wait_ready<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> Ds18b20Result<(), O::BusError> {
        for _ in 0..self.max_polls {
            if self.cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                return Err(Ds18b20Error::Cancelled);
            }
            if bus.read_byte()? != 0 {
                return Ok(());
            }
            delay.delay_ms(self.poll_interval_ms);
        }
        Err(Ds18b20Error::ConversionTimeout {
            polls: self.max_polls,
        })
    }

    /// Reads the nine scratchpad bytes.
    ///
    /// # Errors
    /// [`Ds18b20Error::InvalidCrc`] if CRC checking is enabled and the CRC does
    /// not match or every byte read back as zero.
    pub fn read_scratchpad<O: OneWire>(&self, bus: &mut O) -> Ds18b20Result<Scratchpad, O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_READ_SCRATCH)?;
        let mut buf = [0; Scratchpad::LEN];
        for b in buf.iter_mut() {
            *b = bus.read_byte()?;
        }
        let pad = Scratchpad::from_bytes(buf);
        // a line stuck low reads as zeros, which carry a matching CRC
        if self.crc && (buf == [0; Scratchpad::LEN] || !pad.crc_valid()) {
            return Err(Ds18b20Error::InvalidCrc);
        }
        Ok(pad)
    }

    /// Writes Th, Tl and the configuration register, in that order.
    pub fn write_scratchpad<O: OneWire>(
        &self,
        bus: &mut O,
        th: u8,
        tl: u8,
        config: u8,
    ) -> Ds18b20Result<(), O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_WRITE_SCRATCH)?;
        bus.write_byte(th)?;
        bus.write_byte(tl)?;
        bus.write_byte(config)?;
        Ok(())
    }

    /// Stores Th, Tl and the configuration register in EEPROM.
    pub fn copy_scratchpad<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> Ds18b20Result<(), O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_COPY_SCRATCH)?;
        // the idle line must stay high while the EEPROM is written
        delay.delay_ms(COPY_SCRATCH_DELAY_MS);
        Ok(())
    }

    /// Reloads Th, Tl and the configuration register from EEPROM.
    pub fn recall_eeprom<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> Ds18b20Result<(), O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_RECALL_EEPROM)?;
        self.wait_ready(bus, delay)
    }

    /// Runs a conversion and reads the result.
    ///
    /// Only the two temperature bytes are read; the transaction is cut
    /// short and the next reset discards the rest of the scratchpad. No CRC
    /// is available for a truncated read.
    pub fn read_temperature<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> Ds18b20Result<Temperature, O::BusError> {
        self.start_temperature_conversion(bus, delay)?;
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_READ_SCRATCH)?;
        let lsb = bus.read_byte()?;
        let msb = bus.read_byte()?;
        Ok(Temperature::from_le_bytes([lsb, msb]))
    }

    /// Reads the ROM code of the only device on the bus.
    ///
    /// With several devices connected the result is the bitwise AND of
    /// their codes; enable CRC checking to catch that. With CRC checking a
    /// zero family code is rejected as well.
    pub fn read_rom_code<O: OneWire>(&self, bus: &mut O) -> Ds18b20Result<RomCode, O::BusError> {
        bus.reset()?;
        bus.write_byte(ONEWIRE_READ_ROM_CMD)?;
        let mut wire = [0; 8];
        for b in wire.iter_mut() {
            *b = bus.read_byte()?;
        }
        let rom = RomCode::from_wire(wire);
        if self.crc && (rom.family_code == 0 || !rom.crc_valid()) {
            return Err(Ds18b20Error::InvalidCrc);
        }
        Ok(rom)
    }

    /// Asks whether any device on the bus runs on parasitic power.
    pub fn read_power_supply<O: OneWire>(&self, bus: &mut O) -> Ds18b20Result<PowerMode, O::BusError> {
        bus.send_command(ONEWIRE_SKIP_ROM_CMD, DS18B20_READ_POWERMODE)?;
        // parasitic devices pull the read slots low
        if bus.read_byte()? == 0xff {
            Ok(PowerMode::ExternallyPowered)
        } else {
            Ok(PowerMode::ParasiticPowered)
        }
    }

    /// Changes the conversion resolution, keeping Th and Tl.
    ///
    /// The change lives in the scratchpad only; call
    /// [`copy_scratchpad`](Self::copy_scratchpad) to keep it across power cycles.
    ///
    /// # Errors
    /// [`Ds18b20Error::InvalidResolution`] for `bits` outside 9..=12, before
    /// any bus traffic.
    pub fn set_resolution<O: OneWire>(&self, bus: &mut O, bits: u8) -> Ds18b20Result<(), O::BusError> {
        let resolution =
            Resolution::from_bits(bits).ok_or(Ds18b20Error::InvalidResolution(bits))?;
        let pad = self.read_scratchpad(bus)?;
        let config = pad.configuration_register().with_resolution(resolution);
        self.write_scratchpad(bus, pad.th_register, pad.tl_register, config.into_bits())
    }
}
