use crate::config::{OUTPUT_PINS, PT_INTERCEPT, PT_SLOPE};
use crate::error::HilError;

/// Number of independent pressure channels.
pub const CHANNEL_COUNT: usize = 8;

/// Identifies one of the eight pressure channels, P1 through P8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    pub fn new(number: u8) -> Result<Self, HilError> {
        if (1..=CHANNEL_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(HilError::InvalidChannel(number))
        }
    }

    /// All channels in processing order, 1 through 8.
    pub fn all() -> impl Iterator<Item = ChannelId> {
        (1..=CHANNEL_COUNT as u8).map(ChannelId)
    }

    /// Channel number as written in a command, 1-8.
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based index into per-channel tables.
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Matches a command key against `P1`..`P8`. Exact and case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "P1" => Some(Self(1)),
            "P2" => Some(Self(2)),
            "P3" => Some(Self(3)),
            "P4" => Some(Self(4)),
            "P5" => Some(Self(5)),
            "P6" => Some(Self(6)),
            "P7" => Some(Self(7)),
            "P8" => Some(Self(8)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Linear transducer calibration: pressure = analog * slope + intercept.
/// The slope must be nonzero, division by it is not guarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub slope: f32,
    pub intercept: f32,
}

/// Static configuration of one channel. Never mutated after startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub id: ChannelId,
    pub pin: u8, // BCM GPIO
    pub calibration: Calibration,
}

/// Builds the channel table from the build-time constants in `config`.
pub fn default_channels() -> [ChannelConfig; CHANNEL_COUNT] {
    std::array::from_fn(|i| ChannelConfig {
        id: ChannelId(i as u8 + 1),
        pin: OUTPUT_PINS[i],
        calibration: Calibration {
            slope: PT_SLOPE[i],
            intercept: PT_INTERCEPT[i],
        },
    })
}
