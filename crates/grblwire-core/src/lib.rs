//! # grblwire Core
//!
//! Core types for grblwire.
//! Provides the decoded status report model, machine states, the letter-coded
//! pin and accessory flag tables, and the decode error taxonomy.

pub mod error;
pub mod flags;
pub mod state;
pub mod status;

pub use error::{DecodeError, DecodeResult};
pub use flags::{AccessoryState, InputPins, ACCESSORY_LETTERS, INPUT_PIN_LETTERS};
pub use state::MachineState;
pub use status::{
    BufferState, CoordinateVector, FeedSpindle, OverridePercentages, Position, PositionType,
    StatusReport, AXIS_COUNT,
};
