//! Outbound control commands
//!
//! Commands are written to the timer characteristic as bare ASCII tokens.

use core::fmt;
use core::str::FromStr;

/// Control command understood by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Start,
    Stop,
    Reset,
}

const TOKEN_START: &str = "start";
const TOKEN_STOP: &str = "stop";
const TOKEN_RESET: &str = "reset";

impl Command {
    /// Wire token for this command
    pub const fn as_str(self) -> &'static str {
        match self {
            Command::Start => TOKEN_START,
            Command::Stop => TOKEN_STOP,
            Command::Reset => TOKEN_RESET,
        }
    }

    /// Payload bytes to write to the characteristic
    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known command tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownCommand;

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TOKEN_START => Ok(Command::Start),
            TOKEN_STOP => Ok(Command::Stop),
            TOKEN_RESET => Ok(Command::Reset),
            _ => Err(UnknownCommand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!(Command::Start.as_bytes(), b"start");
        assert_eq!(Command::Stop.as_str(), "stop");
        assert_eq!(Command::Reset.as_str(), "reset");
    }

    #[test]
    fn test_parse() {
        assert_eq!("stop".parse::<Command>(), Ok(Command::Stop));
        assert_eq!("START".parse::<Command>(), Err(UnknownCommand));
        assert_eq!("".parse::<Command>(), Err(UnknownCommand));
    }
}
