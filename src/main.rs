use std::thread;
use std::time::Duration;

use pressure_hil::channel::default_channels;
use pressure_hil::config::{POLL_INTERVAL_MS, PWM_FREQUENCY_HZ, SERIAL_BAUD, SERIAL_DEVICE};
use pressure_hil::pwm::PwmBank;
use pressure_hil::serial::SerialLine;
use pressure_hil::{ControlLoop, log_error, log_info};

// Usage:
//  Send one line per update on the serial port, e.g.
//    P1:500,P2:300.5,P7:0
//  → P1, P2 and P7 are driven to the requested pressures
//  → every channel not named in the line drops back to 0 psi
fn main() -> Result<(), Box<dyn std::error::Error>> {
    log_info!("Starting pressure HIL controller...");

    let channels = default_channels();

    let output = PwmBank::new(&channels)?;
    log_info!("PWM outputs initialized at {} Hz:", PWM_FREQUENCY_HZ);
    for channel in &channels {
        log_info!(
            "  {}: GPIO {:>2}  slope {:>9.4}  intercept {:>7.1}",
            channel.id,
            channel.pin,
            channel.calibration.slope,
            channel.calibration.intercept
        );
    }

    let input = SerialLine::new()?;
    log_info!("Listening on {} at {} baud", SERIAL_DEVICE, SERIAL_BAUD);

    let mut control = ControlLoop::new(channels, input, output);

    // Main control loop
    loop {
        match control.tick() {
            Ok(Some(duties)) => log_info!("Duty: {:?}", duties),
            Ok(None) => thread::sleep(Duration::from_millis(POLL_INTERVAL_MS)),
            Err(e) => log_error!("Control loop error: {}", e),
        }
    }
}
