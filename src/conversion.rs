use crate::channel::Calibration;
use crate::config::{PWM_RANGE, VREF};

/// Analog voltage the transducer would output at `pressure`.
///
/// Inverse of pressure = analog * slope + intercept. Not clamped, pressures
/// outside the calibrated span give voltages outside [0, VREF].
pub fn to_analog(pressure: f32, calibration: &Calibration) -> f32 {
    (pressure - calibration.intercept) / calibration.slope
}

/// Duty value that reproduces `analog` volts, truncated toward zero and
/// clamped to [0, PWM_RANGE].
pub fn to_duty(analog: f32) -> u16 {
    let fraction = f64::from(analog) / VREF;
    let raw = fraction * f64::from(PWM_RANGE);

    // `as` truncates toward zero, saturates on overflow and maps NaN to 0.
    (raw as i64).clamp(0, i64::from(PWM_RANGE)) as u16
}

/// Pressure to duty for one channel.
pub fn duty_for(pressure: f32, calibration: &Calibration) -> u16 {
    to_duty(to_analog(pressure, calibration))
}
