#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireCrc, OneWireError, OneWireResult, OneWireStatus};

pub const POWER_ON_SCRATCHPAD: [u8; 9] = [0x50, 0x05, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x10, 0x1c];

pub struct Present;

impl OneWireStatus for Present {
    fn presence(&self) -> bool {
        true
    }

    fn shortcircuit(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Rom,
    Function,
    WriteData(usize),
    Busy,
    Idle,
}

/// A single DS18B20 modelled at time slot level.
pub struct SimDs18b20 {
    pub rom: [u8; 8],
    pub scratchpad: [u8; 9],
    pub eeprom: [u8; 3],
    pub parasitic: bool,
    pub present: bool,
    /// Read bytes answered with zero after a conversion starts.
    pub busy_polls: u32,
    /// Temperature register loaded when a conversion completes.
    pub next_reading: [u8; 2],
    pub resets: u32,
    pub conversions: u32,
    pub received: Vec<u8>,
    state: State,
    shift: u8,
    nbits: u8,
    busy_slots: u32,
    out: VecDeque<bool>,
}

impl SimDs18b20 {
    pub fn new(rom: [u8; 8]) -> Self {
        Self {
            rom,
            scratchpad: POWER_ON_SCRATCHPAD,
            eeprom: [0x4b, 0x46, 0x7f],
            parasitic: false,
            present: true,
            busy_polls: 0,
            next_reading: [0x50, 0x05],
            resets: 0,
            conversions: 0,
            received: Vec::new(),
            state: State::Idle,
            shift: 0,
            nbits: 0,
            busy_slots: 0,
            out: VecDeque::new(),
        }
    }

    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    pub fn with_reading(mut self, lsb: u8, msb: u8) -> Self {
        self.next_reading = [lsb, msb];
        self
    }

    /// Output bits the master has not clocked out yet.
    pub fn pending_output_bits(&self) -> usize {
        self.out.len()
    }

    fn queue(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            for i in 0..8 {
                self.out.push_back((byte >> i) & 1 == 1);
            }
        }
    }

    fn refresh_crc(&mut self) {
        self.scratchpad[8] = OneWireCrc::compute(&self.scratchpad[..8]);
    }

    fn complete_conversion(&mut self) {
        self.scratchpad[0] = self.next_reading[0];
        self.scratchpad[1] = self.next_reading[1];
        self.refresh_crc();
        self.conversions += 1;
    }

    fn on_byte(&mut self, byte: u8) {
        self.received.push(byte);
        self.state = match self.state {
            State::Rom => match byte {
                0xcc => State::Function,
                0x33 => {
                    let rom = self.rom;
                    self.queue(&rom);
                    State::Idle
                }
                _ => State::Idle,
            },
            State::Function => match byte {
                0x44 => {
                    self.busy_slots = self.busy_polls * 8;
                    if self.busy_slots == 0 {
                        self.complete_conversion();
                    }
                    State::Busy
                }
                0xbe => {
                    let pad = self.scratchpad;
                    self.queue(&pad);
                    State::Idle
                }
                0x4e => State::WriteData(0),
                0x48 => {
                    self.eeprom.copy_from_slice(&self.scratchpad[2..5]);
                    State::Idle
                }
                0xb8 => {
                    let eeprom = self.eeprom;
                    self.scratchpad[2..5].copy_from_slice(&eeprom);
                    self.refresh_crc();
                    State::Busy
                }
                0xb4 => {
                    self.out.push_back(!self.parasitic);
                    State::Idle
                }
                _ => State::Idle,
            },
            State::WriteData(n) => {
                self.scratchpad[2 + n] = byte;
                self.refresh_crc();
                if n == 2 { State::Idle } else { State::WriteData(n + 1) }
            }
            other => other,
        };
    }

    fn reset(&mut self) -> bool {
        self.resets += 1;
        self.out.clear();
        self.shift = 0;
        self.nbits = 0;
        self.state = State::Rom;
        self.present
    }

    fn touch(&mut self, bit: bool) -> bool {
        if let Some(out) = self.out.pop_front() {
            return bit && out;
        }
        if self.state == State::Busy {
            if self.busy_slots > 0 {
                self.busy_slots -= 1;
                if self.busy_slots == 0 {
                    self.complete_conversion();
                }
                return false;
            }
            return bit;
        }
        self.shift |= (bit as u8) << self.nbits;
        self.nbits += 1;
        if self.nbits == 8 {
            let byte = self.shift;
            self.shift = 0;
            self.nbits = 0;
            self.on_byte(byte);
        }
        bit
    }
}

/// Bus with a single simulated device on it.
pub struct SimBus {
    pub device: SimDs18b20,
}

impl SimBus {
    pub fn new(device: SimDs18b20) -> Self {
        Self { device }
    }
}

impl OneWire for SimBus {
    type Status = Present;
    type BusError = ();

    fn reset(&mut self) -> OneWireResult<Present, ()> {
        if self.device.reset() {
            Ok(Present)
        } else {
            Err(OneWireError::NoDevicePresent)
        }
    }

    fn touch_bit(&mut self, bit: bool) -> OneWireResult<bool, ()> {
        Ok(self.device.touch(bit))
    }
}

/// Bus whose line never comes back up after a presence pulse.
pub struct StuckLowBus;

impl OneWire for StuckLowBus {
    type Status = Present;
    type BusError = ();

    fn reset(&mut self) -> OneWireResult<Present, ()> {
        Ok(Present)
    }

    fn touch_bit(&mut self, _bit: bool) -> OneWireResult<bool, ()> {
        Ok(false)
    }
}

/// Delay that only records what was asked of it.
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }
}

pub fn sample_rom() -> [u8; 8] {
    let mut rom = [0x28, 0x38, 0x17, 0xd9, 0x10, 0x20, 0x01, 0x00];
    rom[7] = OneWireCrc::compute(&rom[..7]);
    rom
}
