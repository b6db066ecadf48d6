//! GRBL Protocol Utilities
//!
//! Token-level helpers shared by the line dispatcher and the status field
//! grammars: strict number syntax, fixed-arity list splitting, and framing
//! checks.
//!
//! Numbers accept an optional leading sign and, for decimals, an optional
//! fractional part. Exponents, `inf`/`NaN`, embedded whitespace and empty
//! tokens are rejected.

use std::str::FromStr;

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn unsigned_part(token: &str) -> &str {
    token.strip_prefix(['+', '-']).unwrap_or(token)
}

/// Token is `[+-]?digits`
pub fn is_integer_token(token: &str) -> bool {
    is_digits(unsigned_part(token))
}

/// Token is `[+-]?digits(.digits*)?`
pub fn is_decimal_token(token: &str) -> bool {
    let body = unsigned_part(token);
    match body.split_once('.') {
        Some((int, frac)) => is_digits(int) && frac.bytes().all(|b| b.is_ascii_digit()),
        None => is_digits(body),
    }
}

/// Parse a decimal token
pub fn parse_decimal(token: &str) -> Option<f64> {
    if !is_decimal_token(token) {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Parse an integer token into `T`
///
/// Fails on overflow and on a negative value for unsigned targets.
pub fn parse_integer<T: FromStr>(token: &str) -> Option<T> {
    if !is_integer_token(token) {
        return None;
    }
    token.parse::<T>().ok()
}

/// Split a comma-separated payload into exactly `N` tokens
pub fn split_exact<const N: usize>(payload: &str) -> Option<[&str; N]> {
    let mut out = [""; N];
    let mut parts = payload.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?;
    }
    parts.next().is_none().then_some(out)
}

/// Line is framed as a status report (`<...>`)
pub fn is_status_frame(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('<') && line.ends_with('>')
}

/// Strip an ASCII prefix, ignoring case
pub fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}
