//! GRBL Response Parser
//!
//! Line dispatcher for everything a GRBL controller sends back: real-time
//! status reports, acknowledgements, error and alarm codes, the startup
//! banner, setting echoes and bracketed feedback messages.
//!
//! The input is one line with its terminator already stripped. Parsing is a
//! pure function of that line; nothing is cached between calls.

use super::error_decoder::{format_alarm, format_error};
use super::status_parser::decode_status;
use super::utils::{is_status_frame, parse_integer, strip_prefix_ignore_case};
use grblwire_core::{DecodeError, DecodeResult, StatusReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded GRBL message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GrblMessage {
    /// Real-time status report (`<...>`)
    Status(StatusReport),
    /// Acknowledgment (`ok`)
    Ok,
    /// Error response with error code (`error:n`)
    Error(u8),
    /// Alarm with alarm code (`ALARM:n`)
    Alarm(u8),
    /// Startup banner (`Grbl 1.1h ['$' for help]`)
    Welcome { version: String },
    /// Setting echo (`$n=value`)
    Setting { number: u16, value: String },
    /// Bracketed feedback (`[MSG:...]`, `[GC:...]`, `[PRB:...]`), brackets removed
    Feedback(String),
}

impl GrblMessage {
    /// Status report payload, if this is one
    pub fn as_status(&self) -> Option<&StatusReport> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }

    /// Message kind as a short lowercase label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Ok => "ok",
            Self::Error(_) => "error",
            Self::Alarm(_) => "alarm",
            Self::Welcome { .. } => "welcome",
            Self::Setting { .. } => "setting",
            Self::Feedback(_) => "feedback",
        }
    }
}

impl fmt::Display for GrblMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "status:{}", status.state),
            Self::Ok => write!(f, "ok"),
            Self::Error(code) => write!(f, "{}", format_error(*code)),
            Self::Alarm(code) => write!(f, "{}", format_alarm(*code)),
            Self::Welcome { version } => write!(f, "welcome:{}", version),
            Self::Setting { number, value } => write!(f, "setting:${}={}", number, value),
            Self::Feedback(text) => write!(f, "feedback:{}", text),
        }
    }
}

/// Banner prefixes, longest first
const WELCOME_PREFIXES: &[&str] = &["GrblHAL ", "Grbl "];

fn parse_code(tag: &str, payload: &str) -> DecodeResult<u8> {
    parse_integer(payload).ok_or_else(|| DecodeError::field_format(tag, payload))
}

fn parse_welcome(line: &str) -> Option<GrblMessage> {
    let rest = WELCOME_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(*prefix))?;
    let version = rest.split_whitespace().next()?;
    Some(GrblMessage::Welcome {
        version: version.to_string(),
    })
}

fn parse_setting(body: &str) -> DecodeResult<GrblMessage> {
    let (number, value) = body
        .split_once('=')
        .ok_or_else(|| DecodeError::field_format("$", body))?;
    let number = parse_integer::<u16>(number).ok_or_else(|| DecodeError::field_format("$", body))?;
    Ok(GrblMessage::Setting {
        number,
        value: value.to_string(),
    })
}

/// Parse one GRBL line
///
/// Surrounding whitespace is ignored. A line that matches no known framing
/// fails with [`DecodeError::Framing`].
pub fn parse_line(line: &str) -> DecodeResult<GrblMessage> {
    let line = line.trim();

    if is_status_frame(line) {
        return decode_status(&line[1..line.len() - 1]).map(GrblMessage::Status);
    }

    if line == "ok" {
        return Ok(GrblMessage::Ok);
    }

    if let Some(code) = strip_prefix_ignore_case(line, "error:") {
        return parse_code("error", code).map(GrblMessage::Error);
    }

    if let Some(code) = strip_prefix_ignore_case(line, "ALARM:") {
        return parse_code("ALARM", code).map(GrblMessage::Alarm);
    }

    if let Some(welcome) = parse_welcome(line) {
        return Ok(welcome);
    }

    if let Some(body) = line.strip_prefix('$') {
        if body.contains('=') {
            return parse_setting(body);
        }
    }

    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Ok(GrblMessage::Feedback(line[1..line.len() - 1].to_string()));
    }

    Err(DecodeError::framing(line))
}
