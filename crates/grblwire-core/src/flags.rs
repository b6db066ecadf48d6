//! Letter-coded bit sets from the `Pn:` and `A:` status fields.
//!
//! Each reported letter sets exactly one bit. Letters are looked up in a
//! static table; letters missing from the table are ignored and repeated
//! letters are idempotent.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Input pins reported as triggered (`Pn:`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct InputPins: u16 {
        /// X limit switch.
        const X           = 0x0001;
        /// Y limit switch.
        const Y           = 0x0002;
        /// Z limit switch.
        const Z           = 0x0004;
        /// A limit switch.
        const A           = 0x0008;
        /// B limit switch.
        const B           = 0x0010;
        /// C limit switch.
        const C           = 0x0020;
        /// Probe input.
        const PROBE       = 0x0040;
        /// Safety door input.
        const DOOR        = 0x0080;
        /// Feed hold input.
        const HOLD        = 0x0100;
        /// Soft reset input.
        const SOFT_RESET  = 0x0200;
        /// Cycle start input.
        const CYCLE_START = 0x0400;
    }
}

bitflags! {
    /// Accessory outputs reported as active (`A:`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AccessoryState: u8 {
        /// Spindle running clockwise (M3).
        const SPINDLE_CW    = 0x01;
        /// Spindle running counter-clockwise (M4).
        const SPINDLE_CCW   = 0x02;
        /// Flood coolant (M8).
        const FLOOD_COOLANT = 0x04;
        /// Mist coolant (M7).
        const MIST_COOLANT  = 0x08;
    }
}

/// Letter table for `Pn:`
pub const INPUT_PIN_LETTERS: &[(char, InputPins)] = &[
    ('X', InputPins::X),
    ('Y', InputPins::Y),
    ('Z', InputPins::Z),
    ('A', InputPins::A),
    ('B', InputPins::B),
    ('C', InputPins::C),
    ('P', InputPins::PROBE),
    ('D', InputPins::DOOR),
    ('H', InputPins::HOLD),
    ('R', InputPins::SOFT_RESET),
    ('S', InputPins::CYCLE_START),
];

/// Letter table for `A:`
pub const ACCESSORY_LETTERS: &[(char, AccessoryState)] = &[
    ('S', AccessoryState::SPINDLE_CW),
    ('C', AccessoryState::SPINDLE_CCW),
    ('F', AccessoryState::FLOOD_COOLANT),
    ('M', AccessoryState::MIST_COOLANT),
];

fn collect_letters<F>(letters: &str, table: &[(char, F)]) -> F
where
    F: bitflags::Flags + Copy,
{
    letters
        .chars()
        .filter_map(|letter| {
            table
                .iter()
                .find(|(known, _)| *known == letter)
                .map(|(_, flag)| *flag)
        })
        .fold(F::empty(), |mut acc, flag| {
            acc.insert(flag);
            acc
        })
}

impl InputPins {
    /// Build the pin set from a `Pn:` letter run
    pub fn from_letters(letters: &str) -> Self {
        collect_letters(letters, INPUT_PIN_LETTERS)
    }

    /// Any axis limit switch is triggered
    pub fn limit_triggered(&self) -> bool {
        self.intersects(Self::X | Self::Y | Self::Z | Self::A | Self::B | Self::C)
    }

    /// Probe input is triggered
    pub fn probe(&self) -> bool {
        self.contains(Self::PROBE)
    }

    /// Safety door input is open
    pub fn door(&self) -> bool {
        self.contains(Self::DOOR)
    }

    /// Feed hold input is asserted
    pub fn hold(&self) -> bool {
        self.contains(Self::HOLD)
    }

    /// Soft reset input is asserted
    pub fn soft_reset(&self) -> bool {
        self.contains(Self::SOFT_RESET)
    }

    /// Cycle start input is asserted
    pub fn cycle_start(&self) -> bool {
        self.contains(Self::CYCLE_START)
    }
}

impl AccessoryState {
    /// Build the accessory set from an `A:` letter run
    pub fn from_letters(letters: &str) -> Self {
        collect_letters(letters, ACCESSORY_LETTERS)
    }

    /// Spindle is turning in either direction
    pub fn spindle_on(&self) -> bool {
        self.intersects(Self::SPINDLE_CW | Self::SPINDLE_CCW)
    }

    /// Spindle is turning clockwise
    pub fn spindle_cw(&self) -> bool {
        self.contains(Self::SPINDLE_CW)
    }

    /// Spindle is turning counter-clockwise
    pub fn spindle_ccw(&self) -> bool {
        self.contains(Self::SPINDLE_CCW)
    }

    /// Flood coolant is on
    pub fn flood(&self) -> bool {
        self.contains(Self::FLOOD_COOLANT)
    }

    /// Mist coolant is on
    pub fn mist(&self) -> bool {
        self.contains(Self::MIST_COOLANT)
    }

    /// Any coolant is on
    pub fn coolant_on(&self) -> bool {
        self.intersects(Self::FLOOD_COOLANT | Self::MIST_COOLANT)
    }
}
