use std::env;

use pressure_hil::channel::default_channels;
use pressure_hil::config::{MAX_PRESSURE, MIN_PRESSURE, PWM_RANGE, VREF};
use pressure_hil::conversion::{to_analog, to_duty};

const DEFAULT_STEP_PSI: f32 = 100.0;

// Prints pressure -> analog -> duty for every channel so a calibration table
// can be checked on the bench without any hardware attached.
//
// Usage: duty-table [step_psi]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let step = match env::args().nth(1) {
        Some(arg) => arg.parse::<f32>()?,
        None => DEFAULT_STEP_PSI,
    };
    if step.is_nan() || step <= 0.0 {
        return Err(format!("Step must be positive, got {}", step).into());
    }

    println!("Vref {:.2} V, duty range 0 - {}\n", VREF, PWM_RANGE);

    for channel in default_channels() {
        let cal = channel.calibration;
        println!(
            "{} (GPIO {})  slope {:.4}  intercept {:.1}",
            channel.id, channel.pin, cal.slope, cal.intercept
        );
        println!("{:>10} | {:>9} | {:>5}", "psi", "volts", "duty");
        println!("{:-<10}-+-{:-<9}-+-{:-<5}", "", "", "");

        let mut pressure = MIN_PRESSURE;
        while pressure <= MAX_PRESSURE {
            let analog = to_analog(pressure, &cal);
            println!(
                "{:>10.1} | {:>9.4} | {:>5}",
                pressure,
                analog,
                to_duty(analog)
            );
            pressure += step;
        }
        println!();
    }

    Ok(())
}
