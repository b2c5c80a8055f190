// ** OUTPUT CONFIGURATION ** //

/// Reference voltage of the simulated transducer output (volts).
/// A duty of PWM_RANGE corresponds to VREF after the RC filter.
pub const VREF: f64 = 3.3;

/// PWM value range, 10-bit resolution (0 - 1023).
pub const PWM_RANGE: u16 = 1023;

/// Software PWM carrier frequency (Hz), shared by all channels.
/// rppal software PWM tops out well below a hardware timer, keep this modest.
pub const PWM_FREQUENCY_HZ: f64 = 1000.0;

/// BCM GPIO number driving each channel. Index 0 is channel P1.
pub const OUTPUT_PINS: [u8; 8] = [5, 6, 12, 13, 16, 19, 20, 26];

// ** CALIBRATION CONFIGURATION ** //

/// Pressure transducer calibration constants, pressure = analog * slope + intercept.
/// Placeholder values until each transducer is characterised on the bench.
pub const PT_SLOPE: [f32; 8] = [
    585.9375, 585.9375, 585.9375, 585.9375, 585.9375, 585.9375, 390.625, 390.625,
];
pub const PT_INTERCEPT: [f32; 8] = [-375.0, -375.0, -375.0, -375.0, -375.0, -375.0, -250.0, -250.0];

/// Nominal pressure bounds (psi). Setpoints outside are reported, never clamped.
pub const MIN_PRESSURE: f32 = 0.0;
pub const MAX_PRESSURE: f32 = 1000.0;

// ** SERIAL CONFIGURATION ** //
pub const SERIAL_DEVICE: &str = "/dev/serial0";
pub const SERIAL_BAUD: u32 = 9600;
pub const SERIAL_DATA_BITS: u8 = 8;
pub const SERIAL_STOP_BITS: u8 = 1;

/// A partial command longer than this without a newline is dropped.
pub const MAX_LINE_LEN: usize = 256;

// ** MAIN CONFIGURATION ** //
/// Idle sleep between control loop ticks when no line is ready.
pub const POLL_INTERVAL_MS: u64 = 1;
