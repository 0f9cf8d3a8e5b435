//! ROM command constants for 1-Wire communication.

/// Command to read the ROM code of all devices on the bus, one bit at a time.
pub const ONEWIRE_SEARCH_CMD: u8 = 0xf0;

/// Command to read the 64-bit ROM code directly.
///
/// Only valid when a single device is connected, otherwise the
/// open-drain bus returns the wired-AND of all ROM codes.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Command to match a specific ROM address in 1-Wire communication, followed by the 64-bit ROM code.
pub const ONEWIRE_MATCH_ROM_CMD: u8 = 0x55;

/// Command to skip ROM addressing; the following function command is broadcast to all devices.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Command to search for devices in alarm state on the 1-Wire bus
pub const ONEWIRE_CONDITIONAL_SEARCH_CMD: u8 = 0xec;
