//! Duration string parsing.
//!
//! Accepts the compact notation used by provider settings such as
//! `request_timeout` and `batching.send_after`: one or more decimal numbers,
//! each with an optional fraction and a unit suffix, e.g. `"10s"`,
//! `"1m30s"`, `"1.5h"` or `"300ms"`. The bare string `"0"` means zero.

use std::time::Duration;

use crate::error::{Error, Result};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest number of fraction digits that affect the result.
const MAX_FRACTION_DIGITS: u32 = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration string for the settings field `field`.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] for empty input, a missing or unknown
/// unit, a negative value, or a value too large to represent.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gprov::duration::parse_duration;
///
/// assert_eq!(parse_duration("send_after", "10s").unwrap(), Duration::from_secs(10));
/// assert_eq!(parse_duration("send_after", "1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("send_after", "1.5h").unwrap(), Duration::from_secs(5400));
/// assert!(parse_duration("send_after", "garbage").is_err());
/// ```
pub fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    let invalid = |reason: &str| Error::InvalidDuration {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = value;
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if rest.starts_with('-') {
        return Err(invalid("negative durations are not allowed"));
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);
        rest = after_int;

        let mut fraction = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            let (digits, after_frac) = after_dot.split_at(frac_len);
            fraction = digits;
            rest = after_frac;
        }

        if int_part.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map_or(rest.len(), |(i, _)| i);
        let (unit, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| invalid(&format!("unknown unit {unit:?}")))?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid("value out of range"))?
        };

        let mut component = whole
            .checked_mul(scale)
            .ok_or_else(|| invalid("value out of range"))?;

        if !fraction.is_empty() {
            let kept = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS as usize)];
            let digits: u128 = kept.parse().map_err(|_| invalid("value out of range"))?;
            let divisor = 10u128.pow(u32::try_from(kept.len()).unwrap_or(MAX_FRACTION_DIGITS));
            component = component
                .checked_add(digits * scale / divisor)
                .ok_or_else(|| invalid("value out of range"))?;
        }

        total = total
            .checked_add(component)
            .ok_or_else(|| invalid("value out of range"))?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid("value out of range"))?;
    // Remainder is always below one second.
    let nanos = u32::try_from(total % NANOS_PER_SEC).unwrap_or(0);
    Ok(Duration::new(secs, nanos))
}
