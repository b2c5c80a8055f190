//! Serial command parsing.
//!
//! A command line looks like `P1:500,P2:300.5,P7:0`. Parsing never fails:
//! unknown keys are skipped, unreadable values become 0 and channels that
//! are not mentioned stay unset (the control loop treats them as 0).

use crate::channel::{CHANNEL_COUNT, ChannelId};

/// One `key:value` pair from a command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Lazy, single pass tokenizer over a command line.
///
/// Each step looks for the next `:` and the next `,` (end of line if there
/// is no comma left). The segment is a token only when the colon comes
/// before the terminator. Segments without one are skipped.
pub struct Tokens<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.line.len() {
            let start = self.pos;
            let rest = &self.line[start..];
            let colon = rest.find(':').map(|i| start + i);
            let terminator = rest.find(',').map_or(self.line.len(), |i| start + i);

            // ':' and ',' are ASCII so every index here is a char boundary.
            self.pos = terminator + 1;

            if let Some(colon) = colon
                && colon < terminator
            {
                return Some(Token {
                    key: &self.line[start..colon],
                    value: &self.line[colon + 1..terminator],
                });
            }
        }
        None
    }
}

/// Reads the leading decimal number of `text`, 0 if there is none.
///
/// Mirrors C `atof`: leading whitespace is skipped and anything after the
/// numeric prefix is ignored, so `"12abc"` reads as 12 and `"abc"` as 0.
pub fn parse_value(text: &str) -> f32 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let count_digits = |from: usize| {
        bytes[from.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Requested pressure per channel for a single command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetpointMap {
    values: [Option<f32>; CHANNEL_COUNT],
}

impl SetpointMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, channel: ChannelId, pressure: f32) {
        self.values[channel.index()] = Some(pressure);
    }

    /// The value given in the command, None if the channel was not named.
    pub fn get(&self, channel: ChannelId) -> Option<f32> {
        self.values[channel.index()]
    }

    /// Effective pressure for this cycle. Unnamed channels are 0.
    pub fn pressure(&self, channel: ChannelId) -> f32 {
        self.get(channel).unwrap_or(0.0)
    }

    /// Channels named in the command with their values, in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, f32)> + '_ {
        ChannelId::all().filter_map(|id| self.get(id).map(|p| (id, p)))
    }

    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a command line into a fresh setpoint map. Later keys win.
pub fn parse(line: &str) -> SetpointMap {
    let mut setpoints = SetpointMap::new();

    for token in Tokens::new(line) {
        match ChannelId::from_key(token.key) {
            Some(channel) => setpoints.set(channel, parse_value(token.value)),
            None => log_debug!("Ignoring unknown key {:?}", token.key),
        }
    }

    setpoints
}
