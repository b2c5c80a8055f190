use crate::channel::{CHANNEL_COUNT, ChannelConfig};
use crate::command::{self, SetpointMap};
use crate::config::{MAX_PRESSURE, MIN_PRESSURE};
use crate::conversion::duty_for;
use crate::error::HilError;
use crate::pwm::PwmBank;
use crate::serial::SerialLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    WaitForLine,
    Process,
}

/// Turns command lines from the serial port into duty values on the outputs.
///
/// Open loop: each line fully replaces the previous setpoints and the parsed
/// values are applied in the same tick they arrive.
pub struct ControlLoop {
    channels: [ChannelConfig; CHANNEL_COUNT],
    input: SerialLine,
    output: PwmBank,
    state: LoopState,
    last_duties: [u16; CHANNEL_COUNT],
    lines_processed: u64,
}

impl ControlLoop {
    pub fn new(
        channels: [ChannelConfig; CHANNEL_COUNT],
        input: SerialLine,
        output: PwmBank,
    ) -> Self {
        Self {
            channels,
            input,
            output,
            state: LoopState::WaitForLine,
            last_duties: [0; CHANNEL_COUNT],
            lines_processed: 0,
        }
    }

    /// One scheduler tick. Returns the written duties if a line was processed,
    /// None if no complete line was waiting.
    pub fn tick(&mut self) -> Result<Option<[u16; CHANNEL_COUNT]>, HilError> {
        let Some(line) = self.input.poll_line()? else {
            return Ok(None);
        };

        self.state = LoopState::Process;
        let result = self.apply(&line);
        self.state = LoopState::WaitForLine;

        result.map(Some)
    }

    /// Parse and convert a command line without touching the outputs.
    pub fn process_line(&self, line: &str) -> [u16; CHANNEL_COUNT] {
        let setpoints = command::parse(line.trim());
        self.duties(&setpoints)
    }

    /// Duty for every channel, indexed by channel number - 1 whatever the
    /// order of the channel table. Unnamed channels are at 0 psi.
    pub fn duties(&self, setpoints: &SetpointMap) -> [u16; CHANNEL_COUNT] {
        let mut duties = [0; CHANNEL_COUNT];
        for channel in &self.channels {
            let pressure = setpoints.pressure(channel.id);
            duties[channel.id.index()] = duty_for(pressure, &channel.calibration);
        }
        duties
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Duties currently on the outputs. After a failed write this holds the
    /// new values up to the failing channel and the previous ones after it.
    pub fn last_duties(&self) -> [u16; CHANNEL_COUNT] {
        self.last_duties
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    pub fn channels(&self) -> &[ChannelConfig; CHANNEL_COUNT] {
        &self.channels
    }

    fn apply(&mut self, line: &str) -> Result<[u16; CHANNEL_COUNT], HilError> {
        log_debug!("Command: {:?}", line);

        let setpoints = command::parse(line);
        for (channel, pressure) in setpoints.iter() {
            if !(MIN_PRESSURE..=MAX_PRESSURE).contains(&pressure) {
                log_warn!(
                    "{} setpoint {} psi outside {} - {} psi",
                    channel,
                    pressure,
                    MIN_PRESSURE,
                    MAX_PRESSURE
                );
            }
        }

        let duties = self.duties(&setpoints);
        for channel in &self.channels {
            let duty = duties[channel.id.index()];
            log_debug!("  {} -> {}", channel.id, duty);
            self.output.write_duty(channel.id, duty)?;
            self.last_duties[channel.id.index()] = duty;
        }

        self.lines_processed += 1;
        Ok(duties)
    }
}
