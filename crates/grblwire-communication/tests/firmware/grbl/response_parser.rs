use grblwire_communication::firmware::grbl::response_parser::*;
use grblwire_core::{DecodeError, MachineState};

#[test]
fn test_parse_ok() {
    assert_eq!(parse_line("ok"), Ok(GrblMessage::Ok));
    assert_eq!(parse_line("  ok \r"), Ok(GrblMessage::Ok));
}

#[test]
fn test_parse_error() {
    assert_eq!(parse_line("error:1"), Ok(GrblMessage::Error(1)));
    assert_eq!(parse_line("error:23"), Ok(GrblMessage::Error(23)));
    assert_eq!(
        parse_line("error:x"),
        Err(DecodeError::field_format("error", "x"))
    );
}

#[test]
fn test_parse_alarm() {
    assert_eq!(parse_line("ALARM:1"), Ok(GrblMessage::Alarm(1)));
    assert_eq!(parse_line("alarm:6"), Ok(GrblMessage::Alarm(6)));
    assert!(parse_line("ALARM:").is_err());
}

#[test]
fn test_parse_status_report() {
    let response = parse_line("<Idle|MPos:0.000,0.000,0.000|FS:0.0,0>").unwrap();
    let status = response.as_status().expect("status report");
    assert_eq!(status.state, MachineState::Idle);
    assert_eq!(status.feed(), Some(0.0));
}

#[test]
fn test_parse_setting() {
    assert_eq!(
        parse_line("$110=1000.000"),
        Ok(GrblMessage::Setting {
            number: 110,
            value: "1000.000".to_string()
        })
    );
    assert_eq!(
        parse_line("$N0=G21"),
        Err(DecodeError::field_format("$", "N0=G21"))
    );
}

#[test]
fn test_parse_version() {
    assert_eq!(
        parse_line("Grbl 1.1h ['$' for help]"),
        Ok(GrblMessage::Welcome {
            version: "1.1h".to_string()
        })
    );
}

#[test]
fn test_parse_feedback() {
    assert_eq!(
        parse_line("[MSG:'$H'|'$X' to unlock]"),
        Ok(GrblMessage::Feedback("MSG:'$H'|'$X' to unlock".to_string()))
    );
    assert_eq!(
        parse_line("[PRB:0.000,0.000,1.492:1]"),
        Ok(GrblMessage::Feedback("PRB:0.000,0.000,1.492:1".to_string()))
    );
}

#[test]
fn test_parse_empty_line() {
    assert_eq!(parse_line(""), Err(DecodeError::framing("")));
    assert_eq!(parse_line("   "), Err(DecodeError::framing("")));
}

#[test]
fn test_framing_errors() {
    for line in ["Idle|MPos:0,0,0", "<Idle|MPos:0,0,0", "Idle>", "OK", "hello", "$$", "<"] {
        let err = parse_line(line).unwrap_err();
        assert!(err.is_framing_error(), "{line:?} gave {err:?}");
    }
}

#[test]
fn test_status_failures_propagate() {
    assert_eq!(
        parse_line("<Dance|MPos:0,0,0>"),
        Err(DecodeError::unknown_state("Dance"))
    );
    assert_eq!(
        parse_line("<Idle|Bf:15>"),
        Err(DecodeError::field_format("Bf", "15"))
    );
}

#[test]
fn test_decoding_is_independent_across_calls() {
    assert!(parse_line("<Idle|Ov:1,2>").is_err());
    assert!(parse_line("<Idle|Ov:1,2,3>").is_ok());
}
