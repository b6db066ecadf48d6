//! GRBL protocol support
//!
//! - `response_parser`: line dispatcher and the decoded message type
//! - `status_parser`: `<...>` status report decoder and field grammars
//! - `error_decoder`: error and alarm code descriptions
//! - `utils`: number syntax and framing helpers

pub mod error_decoder;
pub mod response_parser;
pub mod status_parser;
pub mod utils;

pub use error_decoder::{describe_alarm, describe_error, format_alarm, format_error};
pub use response_parser::{parse_line, GrblMessage};
pub use status_parser::{decode_field, decode_state_token, decode_status, known_tags, StatusField};
