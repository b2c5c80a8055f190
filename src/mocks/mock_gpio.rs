// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::HilError;

/// Software PWM settings last applied to a pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmState {
    pub frequency: f64,
    pub duty_cycle: f64,
}

thread_local! {
    static MOCK_PWM: RefCell<HashMap<u8, Option<PwmState>>> = RefCell::new(HashMap::new());
    static MOCK_WRITES: RefCell<u32> = const { RefCell::new(0) };
    static MOCK_FAILING: RefCell<HashSet<u8>> = RefCell::new(HashSet::new());
}

fn check_failing(pin: u8) -> Result<(), HilError> {
    if MOCK_FAILING.with(|failing| failing.borrow().contains(&pin)) {
        let e = std::io::Error::other(format!("mock failure on pin {}", pin));
        return Err(HilError::Gpio(rppal::gpio::Error::Io(e)));
    }
    Ok(())
}

pub struct OutputPin {
    pin: u8,
}

impl OutputPin {
    pub fn set_pwm_frequency(&mut self, frequency: f64, duty_cycle: f64) -> Result<(), HilError> {
        check_failing(self.pin)?;
        MOCK_PWM.with(|pins| {
            pins.borrow_mut().insert(
                self.pin,
                Some(PwmState {
                    frequency,
                    duty_cycle,
                }),
            );
        });
        MOCK_WRITES.with(|w| *w.borrow_mut() += 1);
        Ok(())
    }

    pub fn clear_pwm(&mut self) -> Result<(), HilError> {
        check_failing(self.pin)?;
        MOCK_PWM.with(|pins| {
            pins.borrow_mut().insert(self.pin, None);
        });
        Ok(())
    }
}

pub struct Gpio;

impl Gpio {
    pub fn new() -> Result<Self, HilError> {
        Ok(Gpio)
    }

    pub fn get(&self, pin: u8) -> Result<Pin, HilError> {
        Ok(Pin { pin })
    }
}

pub struct Pin {
    pin: u8,
}

impl Pin {
    pub fn into_output_low(self) -> OutputPin {
        MOCK_PWM.with(|pins| {
            pins.borrow_mut().insert(self.pin, None);
        });
        OutputPin { pin: self.pin }
    }
}

// test helper: PWM state of a pin, None if PWM is not running
pub fn get_mock_pwm(pin: u8) -> Option<PwmState> {
    MOCK_PWM.with(|pins| pins.borrow().get(&pin).copied().flatten())
}

// test helper: number of PWM updates since the last reset
pub fn get_mock_write_count() -> u32 {
    MOCK_WRITES.with(|w| *w.borrow())
}

// test helper: make every PWM call on a pin fail
pub fn set_mock_pin_failing(pin: u8, failing: bool) {
    MOCK_FAILING.with(|f| {
        if failing {
            f.borrow_mut().insert(pin);
        } else {
            f.borrow_mut().remove(&pin);
        }
    });
}

// test helper to reset all pins
pub fn reset_mock_pins() {
    MOCK_PWM.with(|pins| pins.borrow_mut().clear());
    MOCK_WRITES.with(|w| *w.borrow_mut() = 0);
    MOCK_FAILING.with(|f| f.borrow_mut().clear());
}
