#![allow(dead_code)]

use std::collections::VecDeque;

use onewire_uart::{UartError, UartPort, UartResult};

pub const NORMAL: u32 = 115_200;
pub const RESET: u32 = 9_600;

/// One expected interaction with the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Baud(u32),
    Write(u8),
    Read(Option<u8>),
    WriteFails,
    ReadFails,
}

/// Port that checks every call against a script, in order.
pub struct MockPort {
    expected: VecDeque<Transaction>,
}

impl MockPort {
    pub fn new(expected: &[Transaction]) -> Self {
        Self {
            expected: expected.iter().copied().collect(),
        }
    }

    pub fn done(&self) {
        assert!(
            self.expected.is_empty(),
            "{} transactions left: {:?}",
            self.expected.len(),
            self.expected
        );
    }

    fn next(&mut self, what: &str) -> Transaction {
        self.expected
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {what}"))
    }
}

impl UartPort for MockPort {
    fn set_baud_rate(&mut self, rate: u32) -> UartResult<()> {
        match self.next("baud change") {
            Transaction::Baud(expected) => {
                assert_eq!(rate, expected);
                Ok(())
            }
            other => panic!("baud change to {rate}, expected {other:?}"),
        }
    }

    fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        match self.next("write") {
            Transaction::Write(expected) => {
                assert_eq!(byte, expected, "written byte");
                Ok(())
            }
            Transaction::WriteFails => Err(UartError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "adapter unplugged",
            ))),
            other => panic!("write of {byte:#04x}, expected {other:?}"),
        }
    }

    fn read_byte(&mut self) -> UartResult<Option<u8>> {
        match self.next("read") {
            Transaction::Read(echo) => Ok(echo),
            Transaction::ReadFails => Err(UartError::Read(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "adapter unplugged",
            ))),
            other => panic!("read, expected {other:?}"),
        }
    }
}

/// Port that echoes every byte unchanged, as an empty line with TX tied to RX does.
#[derive(Default)]
pub struct LoopbackPort {
    pub baud: u32,
    pub written: Vec<u8>,
    last: Option<u8>,
}

impl UartPort for LoopbackPort {
    fn set_baud_rate(&mut self, rate: u32) -> UartResult<()> {
        self.baud = rate;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        self.written.push(byte);
        self.last = Some(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> UartResult<Option<u8>> {
        Ok(self.last.take())
    }
}

/// Reset pulse answered with `echo`.
pub fn reset(echo: u8) -> Vec<Transaction> {
    vec![
        Transaction::Baud(RESET),
        Transaction::Write(0xf0),
        Transaction::Read(Some(echo)),
        Transaction::Baud(NORMAL),
    ]
}

/// Byte sent by the master, echoed unchanged.
pub fn send(byte: u8) -> Vec<Transaction> {
    (0..8)
        .flat_map(|i| {
            let slot = if (byte >> i) & 1 == 1 { 0xff } else { 0x00 };
            [Transaction::Write(slot), Transaction::Read(Some(slot))]
        })
        .collect()
}

/// Byte sent by a device in read slots; zero bits come back as a corrupted echo.
pub fn recv(byte: u8) -> Vec<Transaction> {
    (0..8)
        .flat_map(|i| {
            let echo = if (byte >> i) & 1 == 1 { 0xff } else { 0xfe };
            [Transaction::Write(0xff), Transaction::Read(Some(echo))]
        })
        .collect()
}

pub fn script(parts: &[Vec<Transaction>]) -> Vec<Transaction> {
    parts.concat()
}
