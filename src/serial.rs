use std::time::Duration;

// Use rppal in production
#[cfg(not(test))]
use rppal::uart::{Parity, Uart};

// Mock UART for testing
#[cfg(test)]
use crate::mocks::mock_uart::{Parity, Uart};

use crate::config::{
    MAX_LINE_LEN, SERIAL_BAUD, SERIAL_DATA_BITS, SERIAL_DEVICE, SERIAL_STOP_BITS,
};
use crate::error::HilError;

const READ_CHUNK: usize = 64;

/// Assembles newline-terminated command lines from the UART without blocking.
pub struct SerialLine {
    uart: Uart,
    buffer: Vec<u8>,
    // Set after an overlong line was dropped, until its newline goes by.
    discarding: bool,
}

impl SerialLine {
    /// Open the default command port.
    pub fn new() -> Result<Self, HilError> {
        Self::with_path(SERIAL_DEVICE, SERIAL_BAUD)
    }

    pub fn with_path(path: &str, baud_rate: u32) -> Result<Self, HilError> {
        let mut uart = Uart::with_path(
            path,
            baud_rate,
            Parity::None,
            SERIAL_DATA_BITS,
            SERIAL_STOP_BITS,
        )?;

        // Non-blocking: read returns whatever is buffered, possibly nothing.
        uart.set_read_mode(0, Duration::ZERO)?;

        Ok(Self {
            uart,
            buffer: Vec::with_capacity(MAX_LINE_LEN),
            discarding: false,
        })
    }

    /// Returns the next complete line with surrounding whitespace stripped,
    /// or None if no newline has arrived yet.
    pub fn poll_line(&mut self) -> Result<Option<String>, HilError> {
        self.skip_discarded();
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = self.uart.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            self.buffer.extend_from_slice(&chunk[..n]);
            if chunk[..n].contains(&b'\n') {
                break;
            }
        }

        self.skip_discarded();
        let line = self.take_line();
        if line.is_none() && self.buffer.len() > MAX_LINE_LEN {
            log_warn!(
                "Discarding {} bytes received without a newline",
                self.buffer.len()
            );
            self.buffer.clear();
            self.discarding = true;
        }
        Ok(line)
    }

    /// Bytes received that do not yet form a complete line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drops the rest of an overlong line, up to and including its newline.
    fn skip_discarded(&mut self) {
        if !self.discarding {
            return;
        }
        match self.buffer.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.buffer.drain(..=end);
                self.discarding = false;
            }
            None => self.buffer.clear(),
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        let raw: Vec<u8> = self.buffer.drain(..=end).collect();
        let text = String::from_utf8_lossy(&raw[..end]);
        Some(text.trim().to_string())
    }
}
