use grblwire_communication::firmware::grbl::{parse_line, GrblMessage};
use grblwire_core::{
    AccessoryState, BufferState, CoordinateVector, DecodeError, InputPins, MachineState,
    OverridePercentages, PositionType, StatusReport,
};

fn status(line: &str) -> StatusReport {
    match parse_line(line) {
        Ok(GrblMessage::Status(status)) => status,
        other => panic!("expected status report for {line:?}, got {other:?}"),
    }
}

#[test]
fn test_machine_states() {
    let cases = [
        ("Idle", MachineState::Idle, -1),
        ("Run", MachineState::Run, -1),
        ("Hold", MachineState::Hold, -1),
        ("Hold:0", MachineState::Hold, 0),
        ("Hold:1", MachineState::Hold, 1),
        ("Jog", MachineState::Jog, -1),
        ("Alarm", MachineState::Alarm, -1),
        ("Door", MachineState::Door, -1),
        ("Door:0", MachineState::Door, 0),
        ("Door:1", MachineState::Door, 1),
        ("Door:2", MachineState::Door, 2),
        ("Door:3", MachineState::Door, 3),
        ("Check", MachineState::Check, -1),
        ("Home", MachineState::Home, -1),
        ("Sleep", MachineState::Sleep, -1),
    ];

    for (token, expected_state, expected_sub_state) in cases {
        let report = status(&format!("<{token}|MPos:0.000,0.000,0.000|FS:0.0,0>"));
        assert_eq!(report.state, expected_state, "{token}");
        assert_eq!(report.sub_state_code(), expected_sub_state, "{token}");
    }
}

#[test]
fn test_current_position() {
    let report = status("<Idle|MPos:0.000,-10.000,5.000|FS:0.0,0>");
    assert_eq!(report.position_type(), Some(PositionType::MachinePosition));
    assert_eq!(
        report.position.unwrap().coordinates().to_array(),
        [0.0, -10.0, 5.0, 0.0]
    );

    let report = status("<Idle|WPos:-2.500,0.000,11.000|FS:0.0,0>");
    assert_eq!(report.position_type(), Some(PositionType::WorkPosition));
    assert_eq!(
        report.position.unwrap().coordinates().to_array(),
        [-2.5, 0.0, 11.0, 0.0]
    );
}

#[test]
fn test_work_coordinate_offset() {
    let report = status("<Hold|MPos:0.000,-10.000,5.000|FS:0.0,0|WCO:0.000,1.551,5.664>");
    assert_eq!(
        report.work_coordinate_offset.unwrap().to_array(),
        [0.0, 1.551, 5.664, 0.0]
    );
}

#[test]
fn test_buffer_state() {
    let report = status("<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|Bf:15,128|WCO:0.000,1.551,5.664>");
    assert_eq!(
        report.buffer,
        Some(BufferState {
            planner_blocks: 15,
            rx_bytes: 128
        })
    );
}

#[test]
fn test_line_number() {
    let report = status("<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|Ln:99999|WCO:0.000,1.551,5.664>");
    assert_eq!(report.line_number, Some(99999));
    assert_eq!(report.line_number_code(), 99999);

    let report = status("<Idle|MPos:0,0,0>");
    assert_eq!(report.line_number_code(), -1);
}

#[test]
fn test_feed_speed() {
    let cases = [
        ("F:500", 500.0, -1),
        ("F:500.53", 500.53, -1),
        ("FS:500,8000", 500.0, 8000),
    ];

    for (segment, expected_feed, expected_spindle) in cases {
        let report = status(&format!(
            "<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|{segment}|WCO:0.000,1.551,5.664>"
        ));
        assert_eq!(report.feed_code(), expected_feed, "{segment}");
        assert_eq!(report.spindle_speed_code(), expected_spindle, "{segment}");
    }
}

#[test]
fn test_pin_state() {
    let cases = [
        (
            "Pn:XDHA",
            InputPins::X | InputPins::DOOR | InputPins::HOLD | InputPins::A,
        ),
        (
            "Pn:ZPR",
            InputPins::Z | InputPins::PROBE | InputPins::SOFT_RESET,
        ),
        ("Pn:SY", InputPins::CYCLE_START | InputPins::Y),
    ];

    for (segment, expected) in cases {
        let report = status(&format!(
            "<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|{segment}|WCO:0.000,1.551,5.664>"
        ));
        assert_eq!(report.pins, expected, "{segment}");
    }
}

#[test]
fn test_overrides() {
    let report = status("<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|Ov:23,97,143|WCO:0.000,1.551,5.664>");
    assert_eq!(
        report.overrides,
        Some(OverridePercentages {
            feed: 23,
            rapid: 97,
            spindle: 143
        })
    );
}

#[test]
fn test_accessories() {
    let cases = [
        (
            "A:SCM",
            AccessoryState::SPINDLE_CW | AccessoryState::SPINDLE_CCW | AccessoryState::MIST_COOLANT,
        ),
        (
            "A:MSF",
            AccessoryState::MIST_COOLANT
                | AccessoryState::SPINDLE_CW
                | AccessoryState::FLOOD_COOLANT,
        ),
    ];

    for (segment, expected) in cases {
        let report = status(&format!(
            "<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|{segment}|WCO:0.000,1.551,5.664>"
        ));
        assert_eq!(report.accessories, expected, "{segment}");
    }
}

#[test]
fn test_end_to_end_idle() {
    let report = status("<Idle|MPos:0.000,0.000,0.000|FS:0.0,0>");
    assert_eq!(report.state, MachineState::Idle);
    assert_eq!(report.sub_state_code(), -1);
    assert_eq!(report.position_type(), Some(PositionType::MachinePosition));
    assert_eq!(
        report.position.unwrap().coordinates(),
        CoordinateVector([0.0, 0.0, 0.0, 0.0])
    );
    assert_eq!(report.feed(), Some(0.0));
    assert_eq!(report.spindle_speed(), Some(0));
}

#[test]
fn test_end_to_end_door() {
    let report = status("<Door:2|WPos:-2.500,0.000,11.000|FS:0.0,0|Ov:23,97,143>");
    assert_eq!(report.state, MachineState::Door);
    assert_eq!(report.sub_state, Some(2));
    assert_eq!(report.position_type(), Some(PositionType::WorkPosition));
    assert_eq!(
        report.position.unwrap().coordinates(),
        CoordinateVector([-2.5, 0.0, 11.0, 0.0])
    );
    assert_eq!(
        report.overrides,
        Some(OverridePercentages {
            feed: 23,
            rapid: 97,
            spindle: 143
        })
    );
}

#[test]
fn test_end_to_end_hold_with_pins() {
    let report = status("<Hold|WPos:-2.500,0.000,11.000|FS:0.0,0|Pn:XDHA|WCO:0.000,1.551,5.664>");
    assert_eq!(
        report.pins,
        InputPins::X | InputPins::DOOR | InputPins::HOLD | InputPins::A
    );
    assert_eq!(
        report.work_coordinate_offset,
        Some(CoordinateVector([0.0, 1.551, 5.664, 0.0]))
    );
    assert!(report.overrides.is_none());
    assert!(report.accessories.is_empty());
}

#[test]
fn test_unknown_tags_are_ignored() {
    let plain = status("<Run|MPos:1,2,3|Bf:15,128>");
    let noisy = status("<Run|Unknown|MPos:1,2,3|T:5|Bf:15,128|Future:1,2,3,4>");
    assert_eq!(plain, noisy);
}

#[test]
fn test_segment_order_does_not_matter() {
    let a = status("<Run|MPos:1,2,3|Bf:15,128|Ov:100,100,100|A:SF|Pn:P>");
    let b = status("<Run|Pn:P|A:SF|Ov:100,100,100|Bf:15,128|MPos:1,2,3>");
    assert_eq!(a, b);
}

#[test]
fn test_malformed_known_field_rejects_line() {
    let cases = [
        ("<Idle|MPos:1,2>", "MPos", "1,2"),
        ("<Idle|WPos:a,b,c>", "WPos", "a,b,c"),
        ("<Idle|WCO:1,2,3,4,5>", "WCO", "1,2,3,4,5"),
        ("<Idle|Bf:-1,128>", "Bf", "-1,128"),
        ("<Idle|Ln:ten>", "Ln", "ten"),
        ("<Idle|F:fast>", "F", "fast"),
        ("<Idle|FS:500>", "FS", "500"),
        ("<Idle|Ov:100,100>", "Ov", "100,100"),
        ("<Idle|MPos>", "MPos", ""),
    ];

    for (line, tag, payload) in cases {
        assert_eq!(
            parse_line(line),
            Err(DecodeError::field_format(tag, payload)),
            "{line}"
        );
    }
}

#[test]
fn test_four_axis_position() {
    let report = status("<Idle|MPos:10.000,20.000,30.000,5.000>");
    let position = report.position.unwrap().coordinates();
    assert_eq!(position.x(), 10.0);
    assert_eq!(position.a(), 5.0);
}

#[test]
fn test_signed_spindle_speed_and_overrides() {
    let report = status("<Run|MPos:0.000,0.000,0.000|FS:500,-100|Ov:-5,100,100>");
    assert_eq!(report.feed(), Some(500.0));
    assert_eq!(report.spindle_speed(), Some(-100));
    assert_eq!(
        report.overrides,
        Some(OverridePercentages {
            feed: -5,
            rapid: 100,
            spindle: 100
        })
    );
}

#[test]
fn test_sub_state_above_byte_range() {
    let report = status("<Door:300|MPos:0.000,0.000,0.000>");
    assert_eq!(report.state, MachineState::Door);
    assert_eq!(report.sub_state, Some(300));
    assert_eq!(report.sub_state_code(), 300);
}
