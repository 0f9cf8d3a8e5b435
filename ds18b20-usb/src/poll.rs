use anyhow::Context;
use chrono::{DateTime, Utc};
use ds18b20::{Ds18b20, RomCode, Temperature};
use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireSearch, OneWireSearchKind};
use onewire_uart::{OneWireUart, SerialConfig};

use crate::labels::Labels;

/// Extra work done on every bus before reading.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tasks {
    /// Log every ROM code found by a search.
    pub scan: bool,
    /// Log the power supply mode.
    pub power: bool,
    /// Resolution to program before converting.
    pub resolution: Option<u8>,
}

/// One temperature sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub device: String,
    pub temperature: Temperature,
}

impl Reading {
    /// CSV fields: unix time in seconds, device label, degrees Celsius.
    pub fn record(&self) -> [String; 3] {
        [
            format!("{:.3}", self.timestamp.timestamp_millis() as f64 / 1000.0),
            self.device.clone(),
            self.temperature.to_string(),
        ]
    }
}

/// Opens `path`, reads its sensor and closes the port again.
pub fn read_port<D: DelayNs>(
    path: &str,
    sensor: &Ds18b20,
    tasks: Tasks,
    labels: &Labels,
    delay: &mut D,
) -> anyhow::Result<Reading> {
    let mut bus = OneWireUart::open(path, SerialConfig::default())?;
    let reading = read_bus(&mut bus, sensor, tasks, labels, delay);
    bus.close();
    reading.with_context(|| format!("reading sensor on {path}"))
}

/// Reads the single sensor on an open bus.
pub fn read_bus<O, D>(
    bus: &mut O,
    sensor: &Ds18b20,
    tasks: Tasks,
    labels: &Labels,
    delay: &mut D,
) -> anyhow::Result<Reading>
where
    O: OneWire,
    O::BusError: std::error::Error + Send + Sync + 'static,
    D: DelayNs,
{
    if tasks.scan {
        let mut search = OneWireSearch::new(bus, OneWireSearchKind::Normal);
        while let Some(rom) = search.next()? {
            log::info!("found {}", RomCode::from(rom));
        }
    }
    let rom = sensor.read_rom_code(bus)?;
    let device = labels.name(&rom);
    if tasks.power {
        log::info!("{device}: {:?}", sensor.read_power_supply(bus)?);
    }
    if let Some(bits) = tasks.resolution {
        sensor.set_resolution(bus, bits)?;
        log::debug!("{device}: resolution set to {bits} bits");
    }
    let temperature = sensor.read_temperature(bus, delay)?;
    Ok(Reading {
        timestamp: Utc::now(),
        device,
        temperature,
    })
}
