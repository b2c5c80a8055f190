// Use rppal in production
#[cfg(not(test))]
use rppal::gpio::{Gpio, OutputPin};

// Mock GPIO for testing
#[cfg(test)]
use crate::mocks::mock_gpio::{Gpio, OutputPin};

use crate::channel::{CHANNEL_COUNT, ChannelConfig, ChannelId};
use crate::config::{PWM_FREQUENCY_HZ, PWM_RANGE};
use crate::error::HilError;

/// The eight PWM outputs, one per pressure channel.
///
/// rppal only exposes two hardware PWM channels, so every output runs
/// software PWM on its own GPIO. Outputs start at 0 and are released on drop.
pub struct PwmBank {
    outputs: Vec<OutputPin>,
}

impl PwmBank {
    pub fn new(channels: &[ChannelConfig; CHANNEL_COUNT]) -> Result<Self, HilError> {
        let gpio = Gpio::new()?;

        // Outputs are stored by channel number, whatever the table order.
        let mut ordered: Vec<&ChannelConfig> = channels.iter().collect();
        ordered.sort_by_key(|c| c.id);

        let mut outputs = Vec::with_capacity(CHANNEL_COUNT);
        for channel in ordered {
            let mut pin = gpio.get(channel.pin)?.into_output_low();
            pin.set_pwm_frequency(PWM_FREQUENCY_HZ, 0.0)?;
            outputs.push(pin);
        }

        Ok(Self { outputs })
    }

    /// Set the duty of one channel, 0 - PWM_RANGE. Larger values saturate.
    pub fn write_duty(&mut self, channel: ChannelId, duty: u16) -> Result<(), HilError> {
        let duty_cycle = f64::from(duty.min(PWM_RANGE)) / f64::from(PWM_RANGE);
        self.outputs[channel.index()].set_pwm_frequency(PWM_FREQUENCY_HZ, duty_cycle)?;
        Ok(())
    }

    /// Stop PWM on every output. A failing pin does not stop the others,
    /// the first error is returned once all were tried.
    pub fn disable(&mut self) -> Result<(), HilError> {
        let mut first_err = None;
        for pin in &mut self.outputs {
            if let Err(e) = pin.clear_pwm() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl Drop for PwmBank {
    fn drop(&mut self) {
        // Leave the regulators at their safe state when the process exits
        let _ = self.disable();
    }
}
