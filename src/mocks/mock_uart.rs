// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use crate::error::HilError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parity {
    None,
}

thread_local! {
    static MOCK_RX: RefCell<VecDeque<u8>> = RefCell::new(VecDeque::new());
}

pub struct Uart;

impl Uart {
    pub fn with_path<P: AsRef<Path>>(
        _path: P,
        _baud_rate: u32,
        _parity: Parity,
        _data_bits: u8,
        _stop_bits: u8,
    ) -> Result<Self, HilError> {
        Ok(Uart)
    }

    pub fn set_read_mode(&mut self, _min_length: u8, _timeout: Duration) -> Result<(), HilError> {
        Ok(())
    }

    /// Never blocks, returns 0 when nothing is queued.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, HilError> {
        MOCK_RX.with(|rx| {
            let mut rx = rx.borrow_mut();
            let n = buffer.len().min(rx.len());
            for (slot, byte) in buffer.iter_mut().zip(rx.drain(..n)) {
                *slot = byte;
            }
            Ok(n)
        })
    }
}

// test helper: queue bytes as if they arrived on the wire
pub fn push_mock_rx(bytes: &[u8]) {
    MOCK_RX.with(|rx| rx.borrow_mut().extend(bytes.iter().copied()));
}

// test helper to drop anything still queued
pub fn reset_mock_uart() {
    MOCK_RX.with(|rx| rx.borrow_mut().clear());
}
