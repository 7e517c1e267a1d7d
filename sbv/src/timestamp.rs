/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Converts between textual timestamps and seconds.
//!
//! Input timestamps follow the `[[H:]M:]S[.ms]` grammar, where any number of colon-separated
//! components may precede the seconds. Output timestamps are always rendered as
//! `H:MM:SS.mmm`.


use std::num::ParseFloatError;
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for timestamp parsing.
pub type TimestampResult<T> = Result<T, TimestampError>;

/// The error type for [parse_timestamp].
#[derive(ThisError, Debug)]
pub enum TimestampError {
    /// One of the colon-separated components is not a decimal number.
    #[error("timestamp has a malformed component")]
    MalformedTimestamp {
        /// The underlying number parsing error.
        #[from]
        source: ParseFloatError,
    },
    /// The components add up to infinity or NaN.
    #[error("timestamp is not finite")]
    NotFinite,
    /// The components add up to less than zero.
    #[error("timestamp is negative")]
    Negative,
}

/// Parses a timestamp in the `[[H:]M:]S[.ms]` format into seconds.
///
/// The rightmost component is seconds, possibly fractional. Every component to its left is
/// worth sixty times the one after it, so `1:3:5.25` is 3785.25 seconds. There is no limit on
/// the number of components.
pub fn parse_timestamp(text: &str) -> TimestampResult<f64> {

    let mut seconds = 0.0;
    let mut factor = 1.0;

    for component in text.trim().rsplit(':') {
        seconds += component.trim().parse::<f64>()? * factor;
        factor *= 60.0;
    }

    if !seconds.is_finite() {
        return Err(TimestampError::NotFinite)
    }
    if seconds < 0.0 {
        return Err(TimestampError::Negative)
    }

    Ok(seconds)
}

/// Renders seconds as `H:MM:SS.mmm`.
///
/// The value is rounded to the nearest millisecond before being split up, so the millisecond
/// field never overflows into `1000`. Hours are not padded and may take any number of digits.
/// Negative values render as zero.
pub fn format_timestamp(seconds: f64) -> String {

    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_ss = total_ms / 1000;
    let ss = total_ss % 60;
    let mm = total_ss / 60 % 60;
    let h = total_ss / 3600;

    format!("{}:{:02}:{:02}.{:03}", h, mm, ss, ms)
}
