use alloy_primitives::U256;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Base units per displayed 6th decimal (10^12).
const WEI_PER_MICRO: u64 = 1_000_000_000_000;
const MICROS_PER_ETH: u64 = 1_000_000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a base-unit integer string as an ETH amount with 6 decimals.
///
/// Zero, negative or unparsable values render as `0 ETH`. Positive values are
/// rounded half-up, so a dust amount shows as `0.000000 ETH`.
pub fn format_value(raw: &str) -> String {
    let wei = match U256::from_str_radix(raw.trim(), 10) {
        Ok(v) if !v.is_zero() => v,
        _ => return "0 ETH".to_string(),
    };

    let half = U256::from(WEI_PER_MICRO / 2);
    let rounded = wei.checked_add(half).unwrap_or(wei);
    let micros = rounded / U256::from(WEI_PER_MICRO);

    let whole = micros / U256::from(MICROS_PER_ETH);
    let frac = micros % U256::from(MICROS_PER_ETH);
    format!("{whole}.{:0>6} ETH", frac.to_string())
}

/// Unix-seconds string to a local date and time.
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

pub fn explorer_link(tx_url: &str, hash: &str) -> String {
    format!("{tx_url}{hash}")
}
