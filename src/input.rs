//! Text input parsing
//!
//! Number fields follow browser `parseInt(s, 10)` rules so a value that
//! works in the page works the same way here: leading whitespace skipped,
//! optional sign, then as many decimal digits as are present.

use crate::NumberRange;
use crate::error::DrawError;

/// Parse the leading integer of `s` (None if there are no leading digits)
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    // Saturate rather than fail on absurdly long input; it's out of range anyway
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Validate a guess field against a roller range
pub fn parse_guess(raw: &str, range: NumberRange) -> Result<u32, DrawError> {
    let raw = raw.trim();
    let value = if raw.is_empty() {
        None
    } else {
        parse_int_prefix(raw)
    };

    let Some(value) = value else {
        return Err(DrawError::InvalidGuess {
            min: range.min,
            max: range.max,
        });
    };

    if !range.contains(value) {
        return Err(DrawError::GuessOutOfRange {
            value,
            min: range.min,
            max: range.max,
        });
    }

    Ok(value as u32)
}
