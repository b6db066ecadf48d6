//! Decoded real-time status report
//!
//! A `StatusReport` owns all of its data and carries no reference to the
//! line it was decoded from. Every field other than the machine state is
//! independently optional.
//!
//! Optional fields are modelled as `Option`. Consumers that still expect the
//! wire-era sentinels (-1 for an absent sub-state, line number or spindle
//! speed, 0.0 for an absent feed) use the `*_code` accessors.

use crate::flags::{AccessoryState, InputPins};
use crate::state::MachineState;
use serde::{Deserialize, Serialize};

/// Number of components in a coordinate vector
pub const AXIS_COUNT: usize = 4;

/// Four-axis coordinate vector
///
/// Status fields report three axes; the fourth component is synthesized as
/// zero unless the controller supplies it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinateVector(pub [f64; AXIS_COUNT]);

impl CoordinateVector {
    /// Create a vector from three axes, padding the fourth with zero
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z, 0.0])
    }

    /// Create a vector from 3 or 4 components
    ///
    /// Returns `None` for any other length.
    pub fn from_components(values: &[f64]) -> Option<Self> {
        if !(3..=AXIS_COUNT).contains(&values.len()) {
            return None;
        }
        let mut axes = [0.0; AXIS_COUNT];
        axes[..values.len()].copy_from_slice(values);
        Some(Self(axes))
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn a(&self) -> f64 {
        self.0[3]
    }

    /// Components as an array
    pub fn to_array(self) -> [f64; AXIS_COUNT] {
        self.0
    }

    fn zip_with(self, other: Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let mut out = [0.0; AXIS_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(self.0[i], other.0[i]);
        }
        Self(out)
    }
}

impl std::ops::Add for CoordinateVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl std::ops::Sub for CoordinateVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

/// Which coordinate space a reported position is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    /// `MPos:` machine coordinates
    MachinePosition,
    /// `WPos:` work coordinates
    WorkPosition,
}

/// Reported position; `MPos` and `WPos` are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Machine(CoordinateVector),
    Work(CoordinateVector),
}

impl Position {
    pub fn position_type(&self) -> PositionType {
        match self {
            Self::Machine(_) => PositionType::MachinePosition,
            Self::Work(_) => PositionType::WorkPosition,
        }
    }

    pub fn coordinates(&self) -> CoordinateVector {
        match self {
            Self::Machine(v) | Self::Work(v) => *v,
        }
    }
}

/// Buffer availability (`Bf:`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferState {
    /// Planner blocks available
    pub planner_blocks: u32,
    /// Serial receive buffer bytes available
    pub rx_bytes: u32,
}

/// Override percentages (`Ov:`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverridePercentages {
    /// Feed override percentage
    pub feed: i32,
    /// Rapid override percentage
    pub rapid: i32,
    /// Spindle speed override percentage
    pub spindle: i32,
}

/// Feed rate with optional spindle speed (`F:` or `FS:`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedSpindle {
    /// Current feed rate
    pub feed: f64,
    /// Spindle speed, present only in the combined `FS:` form
    pub spindle_speed: Option<i32>,
}

/// GRBL real-time status report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Machine state
    pub state: MachineState,
    /// Sub-state qualifier (`Hold:1`, `Door:2`)
    pub sub_state: Option<u16>,
    /// Machine or work position
    pub position: Option<Position>,
    /// Work coordinate offset (`WCO:`)
    pub work_coordinate_offset: Option<CoordinateVector>,
    /// Buffer availability (`Bf:`)
    pub buffer: Option<BufferState>,
    /// Executing line number (`Ln:`)
    pub line_number: Option<u32>,
    /// Feed and spindle (`F:` / `FS:`)
    pub feed_spindle: Option<FeedSpindle>,
    /// Triggered input pins (`Pn:`); empty when not reported
    pub pins: InputPins,
    /// Overrides (`Ov:`)
    pub overrides: Option<OverridePercentages>,
    /// Active accessories (`A:`); empty when not reported
    pub accessories: AccessoryState,
}

impl StatusReport {
    /// Create a report carrying only a state
    pub fn new(state: MachineState, sub_state: Option<u16>) -> Self {
        Self {
            state,
            sub_state,
            position: None,
            work_coordinate_offset: None,
            buffer: None,
            line_number: None,
            feed_spindle: None,
            pins: InputPins::empty(),
            overrides: None,
            accessories: AccessoryState::empty(),
        }
    }

    pub fn position_type(&self) -> Option<PositionType> {
        self.position.as_ref().map(Position::position_type)
    }

    /// Current feed rate, if reported
    pub fn feed(&self) -> Option<f64> {
        self.feed_spindle.map(|fs| fs.feed)
    }

    /// Current spindle speed, if reported
    pub fn spindle_speed(&self) -> Option<i32> {
        self.feed_spindle.and_then(|fs| fs.spindle_speed)
    }

    /// Machine position, derived as `WPos + WCO` when work position was reported
    pub fn machine_position(&self) -> Option<CoordinateVector> {
        match (self.position?, self.work_coordinate_offset) {
            (Position::Machine(mpos), _) => Some(mpos),
            (Position::Work(wpos), Some(wco)) => Some(wpos + wco),
            (Position::Work(_), None) => None,
        }
    }

    /// Work position, derived as `MPos - WCO` when machine position was reported
    pub fn work_position(&self) -> Option<CoordinateVector> {
        match (self.position?, self.work_coordinate_offset) {
            (Position::Work(wpos), _) => Some(wpos),
            (Position::Machine(mpos), Some(wco)) => Some(mpos - wco),
            (Position::Machine(_), None) => None,
        }
    }

    /// Sub-state, or -1 when absent
    pub fn sub_state_code(&self) -> i32 {
        self.sub_state.map_or(-1, i32::from)
    }

    /// Line number, or -1 when absent
    pub fn line_number_code(&self) -> i64 {
        self.line_number.map_or(-1, i64::from)
    }

    /// Feed rate, or 0.0 when absent
    pub fn feed_code(&self) -> f64 {
        self.feed().unwrap_or(0.0)
    }

    /// Spindle speed, or -1 when absent
    pub fn spindle_speed_code(&self) -> i64 {
        self.spindle_speed().map_or(-1, i64::from)
    }
}
