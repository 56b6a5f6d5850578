//! Conversion between decimal degrees and degrees-minutes-seconds strings.
//!
//! The accepted input form is `"D M S H"` with numeric components separated
//! by whitespace or DMS punctuation, and a trailing hemisphere letter, e.g.
//! `"55 40 34N"`. Seconds may be fractional or omitted entirely (`"12 27S"`).
//! Output uses the compact `DD°MM′SS″H` form with seconds rounded to the
//! nearest whole second, so formatting then parsing a coordinate stays
//! within one arcsecond of the original.

use crate::errors::GeodesyError;

/// Parses a DMS coordinate string into signed decimal degrees.
///
/// The hemisphere letter determines the sign: `S` and `W` negate, `N` and
/// `E` are positive. Any malformed input yields a `GeodesyError` instead of
/// a silently wrong value.
pub fn parse_dms(input: &str) -> Result<f64, GeodesyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GeodesyError::EmptyInput);
    }

    let hemisphere = trimmed
        .chars()
        .last()
        .ok_or(GeodesyError::EmptyInput)?
        .to_ascii_uppercase();
    let sign = match hemisphere {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => return Err(GeodesyError::MissingHemisphere(trimmed.to_string())),
    };

    // Components may be separated by whitespace or by the °′″ marks that
    // `to_lat_string`/`to_lon_string` emit; both split the same way.
    let body = &trimmed[..trimmed.len() - trimmed.chars().last().map_or(0, char::len_utf8)];
    let components: Vec<&str> = body
        .split(|c: char| c.is_whitespace() || matches!(c, '°' | '′' | '″' | '\'' | '"'))
        .filter(|token| !token.is_empty())
        .collect();
    if components.len() < 2 || components.len() > 3 {
        return Err(GeodesyError::WrongComponentCount(trimmed.to_string()));
    }

    let mut parts = [0.0_f64; 3];
    for (i, token) in components.iter().enumerate() {
        parts[i] = token
            .parse()
            .map_err(|_| GeodesyError::InvalidNumber(token.to_string()))?;
    }

    let magnitude = parts[0] + parts[1] / 60.0 + parts[2] / 3600.0;
    Ok(sign * magnitude)
}

/// Formats a latitude as `DD°MM′SS″` with an `N`/`S` suffix.
pub fn to_lat_string(decimal_degrees: f64) -> String {
    let hemisphere = if decimal_degrees < 0.0 { 'S' } else { 'N' };
    let (d, m, s) = to_dms_parts(decimal_degrees);
    format!("{:02}°{:02}′{:02}″{}", d, m, s, hemisphere)
}

/// Formats a longitude as `DDD°MM′SS″` with an `E`/`W` suffix.
pub fn to_lon_string(decimal_degrees: f64) -> String {
    let hemisphere = if decimal_degrees < 0.0 { 'W' } else { 'E' };
    let (d, m, s) = to_dms_parts(decimal_degrees);
    format!("{:03}°{:02}′{:02}″{}", d, m, s, hemisphere)
}

// Rounding happens on the total seconds so a value like 12.5683 carries
// into 34′06″ instead of truncating to 05″.
fn to_dms_parts(decimal_degrees: f64) -> (u32, u32, u32) {
    let total_seconds = (decimal_degrees.abs() * 3600.0).round() as u64;
    let degrees = (total_seconds / 3600) as u32;
    let minutes = ((total_seconds % 3600) / 60) as u32;
    let seconds = (total_seconds % 60) as u32;
    (degrees, minutes, seconds)
}
