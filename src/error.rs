/// Errors raised while talking to the controller hardware.
#[derive(Debug, thiserror::Error)]
pub enum HilError {
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("UART error: {0}")]
    Uart(#[from] rppal::uart::Error),

    #[error("Invalid channel: {0} (expected 1-8)")]
    InvalidChannel(u8),
}
