use chrono::Duration;
use core::fmt;

/// The text matched none of the accepted elapsed-time formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedDuration;

impl fmt::Display for UnrecognizedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value matches no accepted elapsed-time format")
    }
}

impl core::error::Error for UnrecognizedDuration {}

/// Accepted formats in priority order; the first parser that succeeds wins.
const PARSERS: [fn(&str) -> Option<Duration>; 4] = [
    parse_hms_frac, // hours:minutes:seconds.fraction
    parse_ms_frac,  // minutes:seconds.fraction
    parse_hms,      // hours:minutes:seconds
    parse_ms,       // minutes:seconds
];

/// Parse a GNU-time style elapsed value through the fallback chain.
pub fn parse_elapsed(text: &str) -> Result<Duration, UnrecognizedDuration> {
    PARSERS.iter().find_map(|parse| parse(text)).ok_or(UnrecognizedDuration)
}

/// Render an accumulated total as `H:MM:SS`, with six fractional digits
/// appended when a sub-second remainder exists.
#[must_use]
pub fn format_elapsed(total: Duration) -> String {
    let seconds = total.num_seconds();
    let micros = (total - Duration::seconds(seconds)).num_microseconds().unwrap_or(0);
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if micros > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}

fn parse_hms_frac(text: &str) -> Option<Duration> {
    let (rest, frac) = text.split_once('.')?;
    Some(parse_hms(rest)? + Duration::microseconds(parse_fraction(frac)?))
}

fn parse_ms_frac(text: &str) -> Option<Duration> {
    let (rest, frac) = text.split_once('.')?;
    Some(parse_ms(rest)? + Duration::microseconds(parse_fraction(frac)?))
}

fn parse_hms(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let hours = clock_field(parts.next()?, 23)?;
    let minutes = clock_field(parts.next()?, 59)?;
    let seconds = clock_field(parts.next()?, 61)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Duration::seconds((hours * 60 + minutes) * 60 + seconds))
}

fn parse_ms(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let minutes = clock_field(parts.next()?, 59)?;
    let seconds = clock_field(parts.next()?, 61)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Duration::seconds(minutes * 60 + seconds))
}

/// One clock field: one or two digits, bounded inclusively by `max`.
fn clock_field(text: &str, max: i64) -> Option<i64> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = text.parse::<i64>().ok()?;
    (value <= max).then_some(value)
}

/// Fractional seconds: one to six digits, right-padded to microseconds.
fn parse_fraction(text: &str) -> Option<i64> {
    if text.is_empty() || text.len() > 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = text.parse::<i64>().ok()?;
    Some(digits * 10_i64.pow(u32::try_from(6 - text.len()).unwrap_or_default()))
}
