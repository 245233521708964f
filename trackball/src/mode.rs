//! Move/scroll mode of the trackball and the command used to change it

use core::sync::atomic::{AtomicU8, Ordering};

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// What the ball motion is turned into.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Pointer movement, with acceleration and inertia
    Move = 1,
    /// Wheel/pan scrolling
    Scroll = 2,
}

impl TryFrom<u8> for Mode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Mode::Move),
            2 => Ok(Mode::Scroll),
            _ => Err(ConfigError::InvalidMode(value)),
        }
    }
}

/// Mode change requested by a key behavior.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeCommand {
    Move,
    Scroll,
    /// Flip between `Move` and `Scroll`
    Toggle,
}

impl From<Mode> for ModeCommand {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Move => ModeCommand::Move,
            Mode::Scroll => ModeCommand::Scroll,
        }
    }
}

impl ModeCommand {
    /// Decode the command parameter of a keymap behavior, unknown values are `None`.
    pub fn from_param(param: u8) -> Option<Self> {
        match param {
            1 => Some(ModeCommand::Move),
            2 => Some(ModeCommand::Scroll),
            3 => Some(ModeCommand::Toggle),
            _ => None,
        }
    }
}

/// Shared handle of the current mode.
///
/// Written by key behaviors from any context, read once per poll cycle by the polling loop.
/// A change becomes visible at the next cycle.
pub struct ModeHandle {
    mode: AtomicU8,
}

impl ModeHandle {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode: AtomicU8::new(mode as u8),
        }
    }

    /// Current mode. Any unknown stored value reads as `Move`.
    pub fn mode(&self) -> Mode {
        Mode::try_from(self.mode.load(Ordering::Acquire)).unwrap_or(Mode::Move)
    }

    /// Apply a mode command. Never fails, a toggle on an unknown stored value is ignored.
    pub fn set_mode(&self, command: ModeCommand) {
        let new_mode = match command {
            ModeCommand::Move => Mode::Move,
            ModeCommand::Scroll => Mode::Scroll,
            ModeCommand::Toggle => match Mode::try_from(self.mode.load(Ordering::Acquire)) {
                Ok(Mode::Move) => Mode::Scroll,
                Ok(Mode::Scroll) => Mode::Move,
                Err(_) => return,
            },
        };
        debug!("Trackball mode set to {:?}", new_mode);
        self.mode.store(new_mode as u8, Ordering::Release);
    }
}
