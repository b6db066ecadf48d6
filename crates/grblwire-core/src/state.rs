//! Machine state reported at the head of every status report.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controller machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineState {
    /// Ready for commands
    Idle,
    /// Executing motion
    Run,
    /// Feed hold; carries a sub-state (0 = complete, 1 = in progress)
    Hold,
    /// Jogging
    Jog,
    /// Alarm lock, requires unlock or reset
    Alarm,
    /// Safety door; carries a sub-state (0..=3)
    Door,
    /// G-code check mode
    Check,
    /// Homing cycle
    Home,
    /// Sleep mode
    Sleep,
    /// Tool change (grblHAL)
    Tool,
}

impl MachineState {
    /// Every state, in wire-name order
    pub const ALL: [MachineState; 10] = [
        Self::Idle,
        Self::Run,
        Self::Hold,
        Self::Jog,
        Self::Alarm,
        Self::Door,
        Self::Check,
        Self::Home,
        Self::Sleep,
        Self::Tool,
    ];

    /// Look up a state by its exact wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.name() == name)
    }

    /// Wire name of the state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Run => "Run",
            Self::Hold => "Hold",
            Self::Jog => "Jog",
            Self::Alarm => "Alarm",
            Self::Door => "Door",
            Self::Check => "Check",
            Self::Home => "Home",
            Self::Sleep => "Sleep",
            Self::Tool => "Tool",
        }
    }

    /// Machine is moving under program or jog control
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Run | Self::Jog | Self::Home)
    }

    /// Motion is suspended
    pub fn is_held(&self) -> bool {
        matches!(self, Self::Hold | Self::Door | Self::Tool)
    }

    /// Controller refuses motion until the operator intervenes
    pub fn is_error_state(&self) -> bool {
        matches!(self, Self::Alarm | Self::Door)
    }
}

impl FromStr for MachineState {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DecodeError::unknown_state(s))
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
