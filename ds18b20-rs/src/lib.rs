#![no_std]
#![deny(missing_docs)]
//! # ds18b20
//! Driver for the DS18B20 1-Wire digital thermometer.
//!
//! The driver addresses the bus with the Skip ROM broadcast, which is
//! what a single sensor per bus needs. [`Ds18b20`] only holds settings;
//! every operation borrows the bus (and a delay source where it waits),
//! starts with a reset and leaves the bus idle when it returns.

mod config;
mod device;
mod error;
mod rom;
mod scratchpad;

pub use config::{Configuration, Resolution};
pub use device::{Ds18b20, PowerMode};
pub use error::{Ds18b20Error, Ds18b20Result};
pub use rom::RomCode;
pub use scratchpad::Scratchpad;

/// Temperature in degrees Celsius, 1/16 °C per LSB.
pub type Temperature = fixed::types::I12F4;

/// Start a temperature conversion.
pub const DS18B20_CONVERT_T: u8 = 0x44;
/// Read the nine scratchpad bytes.
pub const DS18B20_READ_SCRATCH: u8 = 0xbe;
/// Write Th, Tl and the configuration register.
pub const DS18B20_WRITE_SCRATCH: u8 = 0x4e;
/// Copy Th, Tl and configuration to EEPROM.
pub const DS18B20_COPY_SCRATCH: u8 = 0x48;
/// Reload Th, Tl and configuration from EEPROM.
pub const DS18B20_RECALL_EEPROM: u8 = 0xb8;
/// Ask whether any device runs on parasitic power.
pub const DS18B20_READ_POWERMODE: u8 = 0xb4;
