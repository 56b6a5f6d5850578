use std::fmt::{self, Display};

/// Enum representing the possible errors that can occur while parsing
/// coordinate strings.
///
/// The possible errors are:
///
/// - `EmptyInput`: the input string had no content to parse.
/// - `MissingHemisphere`: the input did not end in one of `N`, `S`, `E`, `W`.
/// - `InvalidNumber`: a degrees/minutes/seconds component was not numeric.
/// - `WrongComponentCount`: the input did not split into degrees, minutes
///   and optional seconds.
///
/// A parse failure is always reported through one of these variants so a
/// malformed string can never be confused with a valid coordinate of `0.0`.
#[derive(Debug, PartialEq)]
pub enum GeodesyError {
    EmptyInput,
    MissingHemisphere(String),
    InvalidNumber(String),
    WrongComponentCount(String),
}

impl Display for GeodesyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeodesyError::EmptyInput => {
                write!(f, "[EmptyInput]: The coordinate string was empty")
            }
            GeodesyError::MissingHemisphere(input) => write!(
                f,
                "[MissingHemisphere]: '{}' does not end in N, S, E or W",
                input
            ),
            GeodesyError::InvalidNumber(token) => write!(
                f,
                "[InvalidNumber]: '{}' is not a valid numeric component",
                token
            ),
            GeodesyError::WrongComponentCount(input) => write!(
                f,
                "[WrongComponentCount]: '{}' must contain degrees, minutes and optional seconds",
                input
            ),
        }
    }
}
