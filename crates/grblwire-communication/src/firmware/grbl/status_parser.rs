//! GRBL Status Report Parsing
//!
//! Decodes the inside of a `<...>` real-time status report:
//!
//! ```text
//! state-token ("|" tag ":" payload)*
//! ```
//!
//! The state token is mandatory. Each remaining segment is looked up in the
//! field grammar table by tag. Unknown tags are skipped so that newer firmware
//! can add fields without breaking the decoder. A known tag whose payload does
//! not match its grammar rejects the whole report. Segment order carries no
//! meaning; a repeated field overwrites the earlier value.

use super::utils::{parse_decimal, parse_integer, split_exact};
use grblwire_core::{
    AccessoryState, BufferState, CoordinateVector, DecodeError, DecodeResult, FeedSpindle,
    InputPins, MachineState, OverridePercentages, Position, StatusReport,
};

/// Segment delimiter inside a status report
pub const SEGMENT_DELIMITER: char = '|';

/// One decoded status field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusField {
    /// `MPos:` or `WPos:`
    Position(Position),
    /// `WCO:`
    WorkCoordinateOffset(CoordinateVector),
    /// `Bf:`
    Buffer(BufferState),
    /// `Ln:`
    LineNumber(u32),
    /// `F:` or `FS:`
    FeedSpindle(FeedSpindle),
    /// `Pn:`
    Pins(InputPins),
    /// `Ov:`
    Overrides(OverridePercentages),
    /// `A:`
    Accessories(AccessoryState),
}

impl StatusField {
    fn apply(self, status: &mut StatusReport) {
        match self {
            Self::Position(position) => status.position = Some(position),
            Self::WorkCoordinateOffset(wco) => status.work_coordinate_offset = Some(wco),
            Self::Buffer(buffer) => status.buffer = Some(buffer),
            Self::LineNumber(line) => status.line_number = Some(line),
            Self::FeedSpindle(fs) => status.feed_spindle = Some(fs),
            Self::Pins(pins) => status.pins = pins,
            Self::Overrides(overrides) => status.overrides = Some(overrides),
            Self::Accessories(accessories) => status.accessories = accessories,
        }
    }
}

type FieldGrammar = fn(&str) -> Option<StatusField>;

/// Tag to grammar table
const FIELD_GRAMMARS: &[(&str, FieldGrammar)] = &[
    ("MPos", |p| {
        parse_coordinates(p).map(|v| StatusField::Position(Position::Machine(v)))
    }),
    ("WPos", |p| {
        parse_coordinates(p).map(|v| StatusField::Position(Position::Work(v)))
    }),
    ("WCO", |p| parse_coordinates(p).map(StatusField::WorkCoordinateOffset)),
    ("Bf", parse_buffer),
    ("Ln", |p| parse_integer(p).map(StatusField::LineNumber)),
    ("F", parse_feed),
    ("FS", parse_feed_spindle),
    ("Pn", |p| Some(StatusField::Pins(InputPins::from_letters(p)))),
    ("Ov", parse_overrides),
    ("A", |p| {
        Some(StatusField::Accessories(AccessoryState::from_letters(p)))
    }),
];

/// Tags the decoder understands
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    FIELD_GRAMMARS.iter().map(|(tag, _)| *tag)
}

/// Coordinate list: 3 decimals (4 tolerated), padded to four axes
fn parse_coordinates(payload: &str) -> Option<CoordinateVector> {
    let values = payload
        .split(',')
        .map(parse_decimal)
        .collect::<Option<Vec<f64>>>()?;
    CoordinateVector::from_components(&values)
}

fn parse_buffer(payload: &str) -> Option<StatusField> {
    let [blocks, bytes] = split_exact::<2>(payload)?;
    Some(StatusField::Buffer(BufferState {
        planner_blocks: parse_integer(blocks)?,
        rx_bytes: parse_integer(bytes)?,
    }))
}

fn parse_feed(payload: &str) -> Option<StatusField> {
    Some(StatusField::FeedSpindle(FeedSpindle {
        feed: parse_decimal(payload)?,
        spindle_speed: None,
    }))
}

fn parse_feed_spindle(payload: &str) -> Option<StatusField> {
    let [feed, speed] = split_exact::<2>(payload)?;
    Some(StatusField::FeedSpindle(FeedSpindle {
        feed: parse_decimal(feed)?,
        spindle_speed: Some(parse_integer(speed)?),
    }))
}

fn parse_overrides(payload: &str) -> Option<StatusField> {
    let [feed, rapid, spindle] = split_exact::<3>(payload)?;
    Some(StatusField::Overrides(OverridePercentages {
        feed: parse_integer(feed)?,
        rapid: parse_integer(rapid)?,
        spindle: parse_integer(spindle)?,
    }))
}

/// Decode a single `tag:payload` segment
///
/// Returns `Ok(None)` for a tag the decoder does not know.
pub fn decode_field(tag: &str, payload: &str) -> DecodeResult<Option<StatusField>> {
    let Some((_, grammar)) = FIELD_GRAMMARS.iter().find(|(known, _)| *known == tag) else {
        return Ok(None);
    };
    grammar(payload)
        .map(Some)
        .ok_or_else(|| DecodeError::field_format(tag, payload))
}

/// Decode the leading `state[:sub]` token
pub fn decode_state_token(token: &str) -> DecodeResult<(MachineState, Option<u16>)> {
    let (name, sub) = match token.split_once(':') {
        Some((name, sub)) => (name, Some(sub)),
        None => (token, None),
    };

    let state = name.parse::<MachineState>()?;
    let sub_state = sub
        .map(|sub| parse_integer::<u16>(sub).ok_or_else(|| DecodeError::field_format(name, sub)))
        .transpose()?;

    Ok((state, sub_state))
}

/// Decode the content of a status report with the angle brackets removed
pub fn decode_status(inner: &str) -> DecodeResult<StatusReport> {
    let mut segments = inner.split(SEGMENT_DELIMITER);

    // split always yields at least one item
    let (state, sub_state) = decode_state_token(segments.next().unwrap_or_default())?;
    let mut status = StatusReport::new(state, sub_state);

    for segment in segments {
        let (tag, payload) = segment.split_once(':').unwrap_or((segment, ""));
        if let Some(field) = decode_field(tag, payload)? {
            field.apply(&mut status);
        }
    }

    Ok(status)
}
