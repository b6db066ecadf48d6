//! GRBL Error and Alarm Code Decoder
//! Maps numeric `error:` and `ALARM:` codes to human-readable descriptions

/// Describe a GRBL 1.1 error code
pub fn describe_error(code: u8) -> Option<&'static str> {
    let text = match code {
        1 => "G-code word is missing its letter",
        2 => "Numeric value is missing or malformed",
        3 => "'$' system command not recognized",
        4 => "Negative value where a positive value is required",
        5 => "Homing cycle is not enabled",
        6 => "Step pulse time must be at least 3 microseconds",
        7 => "EEPROM read failed; settings restored to defaults",
        8 => "'$' command requires the machine to be idle",
        9 => "G-code is locked out during alarm or jog",
        10 => "Soft limits require homing to be enabled",
        11 => "Line exceeds the maximum line length",
        12 => "Setting exceeds the maximum supported step rate",
        13 => "Safety door opened",
        14 => "Build info or startup line exceeds EEPROM storage",
        15 => "Jog target exceeds machine travel",
        16 => "Jog command is malformed or contains prohibited g-code",
        17 => "Laser mode requires PWM output",
        20 => "Unsupported or invalid g-code command",
        21 => "More than one command from the same modal group",
        22 => "Feed rate is undefined",
        23 => "Command requires an integer value",
        24 => "More than one command requires axis words",
        25 => "Repeated g-code word in block",
        26 => "Command requires axis words but none were given",
        27 => "Line number out of range",
        28 => "Command is missing a required P or L word",
        29 => "Unsupported work coordinate system",
        30 => "G53 requires G0 or G1 motion mode",
        31 => "Unused axis words with G80 active",
        32 => "Arc has no axis words in the selected plane",
        33 => "Motion target is invalid",
        34 => "Arc radius definition is geometrically impossible",
        35 => "Arc offset definition is missing its plane offset word",
        36 => "Unused words left in block",
        37 => "Tool length offset applied to the wrong axis",
        38 => "Tool number exceeds the supported maximum",
        _ => return None,
    };
    Some(text)
}

/// Describe a GRBL 1.1 alarm code
pub fn describe_alarm(code: u8) -> Option<&'static str> {
    let text = match code {
        1 => "Hard limit triggered; position lost",
        2 => "Soft limit exceeded; motion target outside travel",
        3 => "Reset during motion; position lost",
        4 => "Probe not in expected initial state",
        5 => "Probe did not contact the workpiece",
        6 => "Homing failed: cycle was reset",
        7 => "Homing failed: safety door opened",
        8 => "Homing failed: pull-off did not clear the limit switch",
        9 => "Homing failed: limit switch not found",
        10 => "Homing failed: second switch not found on dual axis",
        _ => return None,
    };
    Some(text)
}

/// Format an error code with its description, if known
pub fn format_error(code: u8) -> String {
    match describe_error(code) {
        Some(text) => format!("error:{} ({})", code, text),
        None => format!("error:{}", code),
    }
}

/// Format an alarm code with its description, if known
pub fn format_alarm(code: u8) -> String {
    match describe_alarm(code) {
        Some(text) => format!("ALARM:{} ({})", code, text),
        None => format!("ALARM:{}", code),
    }
}
