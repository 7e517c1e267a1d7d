/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Operates on individual captions and input lines.
//!
//! # Overview
//!
//! Caption exports carry no explicit framing. Every input line is one of:
//!
//! 1. Header comment, beginning with `#` (only meaningful before anything else)
//! 2. Metadata, a single digit-led token holding one or two comma-joined timestamps
//! 3. Caption text, anything else that is not blank
//! 4. Blank
//!
//! ## Timing encodings
//!
//! With the dual encoding, each metadata line states the start and end of the caption that
//! follows it, as in `0:00:10.360,0:00:17.359`. With the single encoding, each metadata line
//! holds one timestamp that ends the previous caption and starts the next one.
//!
//! Captions are always written back out using the dual encoding.


mod captionwrite;

pub use captionwrite::*;

/// Marks a header comment line.
pub const HEADER_MARK: char = '#';

/// Separates the timestamps of a dual-encoded metadata line.
pub const TIME_SEPARATOR: char = ',';

/// Represents a caption that is ready to be written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionRecord {
    /// When the caption appears, in seconds.
    pub start: f64,
    /// When the caption disappears, in seconds. Never less than `start`.
    pub end: f64,
    /// The caption's text lines, verbatim.
    pub lines: Vec<String>,
}

/// Defines how metadata lines carry their timing.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Encoding {
    /// Each metadata line holds the start and end of the following caption.
    Dual,
    /// Each metadata line holds a single timestamp shared by the end of the previous caption
    /// and the start of the next one.
    Single,
}

impl Encoding {

    /// Picks the encoding implied by the number of timestamps on a metadata line.
    pub fn from_field_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Single),
            2 => Some(Self::Dual),
            _ => None,
        }
    }

    /// The number of timestamps every metadata line carries under this encoding.
    pub fn field_count(self) -> usize {
        match self {
            Self::Dual => 2,
            Self::Single => 1,
        }
    }
}

/// Represents a classified input line.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Line<'a> {
    /// A line beginning with [HEADER_MARK].
    Header(&'a str),
    /// A timestamp line, split into its comma-separated fields.
    Metadata(Vec<&'a str>),
    /// A caption text line, verbatim.
    Text(&'a str),
    /// A line holding nothing but whitespace.
    Blank,
}

/// Classifies a single input line, without its line terminator.
///
/// Whether a header line is actually treated as a header depends on where it appears; that
/// decision is left to the caller.
pub fn classify_line(line: &str) -> Line<'_> {

    if line.starts_with(HEADER_MARK) {
        return Line::Header(line)
    }

    let mut tokens = line.split_whitespace();

    match (tokens.next(), tokens.next()) {
        (None, _) => Line::Blank,
        (Some(token), None) if token.starts_with(|c: char| c.is_ascii_digit()) => {
            Line::Metadata(token.split(TIME_SEPARATOR).collect())
        }
        _ => Line::Text(line),
    }
}
