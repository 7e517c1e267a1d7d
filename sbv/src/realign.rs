/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Pairs caption text with timestamps and shifts them to a new start time.
//!
//! A [Realigner] is fed one input line at a time. Leading header comments are skipped, the
//! timing encoding is detected from the first metadata line, and from then on every metadata
//! line closes the caption text buffered before it. When the input runs out,
//! [Realigner::finish] closes whatever caption is still open.
//!
//! Every timestamp is shifted by the same offset: the difference between the first timestamp
//! in the stream and the requested start time.

#[cfg(test)]
mod tests;

mod adjust;

pub use adjust::*;

use super::{
    caption::{classify_line, CaptionRecord, Encoding, Line},
    timestamp::{parse_timestamp, TimestampError},
};
use log::{debug, trace};
use std::mem;
use thiserror::Error as ThisError;

/// How long the final caption of a single-encoded stream lasts, in seconds.
pub const LAST_CAPTION_DURATION: f64 = 5.0;

/// A specialized [`Result`](std::result::Result) type for realignment operations.
pub type RealignResult<T> = Result<T, RealignError>;

/// The error type for [Realigner].
///
/// Every error is terminal for the stream being processed.
#[derive(ThisError, Debug)]
pub enum RealignError {
    #[error("timestamp value error")]
    TimestampError {
        #[from]
        source: TimestampError,
    },
    /// A metadata line holds a number of timestamps that no encoding (or not the encoding
    /// already detected) allows.
    #[error("metadata line has an unexpected number of timestamps: {fields}")]
    AmbiguousEncoding {
        fields: usize,
    },
    /// The stream ended without a single metadata line.
    #[error("no timestamps found in input")]
    EmptyOrHeaderOnlyInput,
    /// Caption text appeared before the first metadata line, so it has no timing.
    #[error("caption text precedes the first timestamp")]
    CaptionBeforeTimestamp,
    /// Shifting a timestamp by the offset moved it before zero.
    #[error("realigned timestamp is negative: {value}")]
    NegativeTimestamp {
        value: f64,
    },
    #[error("caption ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        start: f64,
        end: f64,
    },
}

/// Timestamps that are known but not yet attached to caption text.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Boundary {
    Dual {
        start: f64,
        end: f64,
    },
    Single(f64),
}

impl Boundary {

    fn new(encoding: Encoding, times: &[f64], offset: f64) -> RealignResult<Self> {

        let mut shifted = [0.0; 2];

        for (slot, time) in shifted.iter_mut().zip(times) {
            let value = time - offset;
            if value < 0.0 {
                return Err(RealignError::NegativeTimestamp { value })
            }
            *slot = value;
        }

        Ok(
            match encoding {
                Encoding::Dual => Boundary::Dual { start: shifted[0], end: shifted[1] },
                Encoding::Single => Boundary::Single(shifted[0]),
            }
        )
    }

    fn encoding(self) -> Encoding {
        match self {
            Boundary::Dual { .. } => Encoding::Dual,
            Boundary::Single(_) => Encoding::Single,
        }
    }

    fn start(self) -> f64 {
        match self {
            Boundary::Dual { start, .. } => start,
            Boundary::Single(start) => start,
        }
    }

    /// The span of a caption whose text is followed by the `next` metadata line.
    fn closed_by(self, next: Boundary) -> (f64, f64) {
        match self {
            Boundary::Dual { start, end } => (start, end),
            Boundary::Single(start) => (start, next.start()),
        }
    }

    /// The span of a caption whose text runs to the end of the stream.
    fn unclosed(self) -> (f64, f64) {
        match self {
            Boundary::Dual { start, end } => (start, end),
            Boundary::Single(start) => (start, start + LAST_CAPTION_DURATION),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    InHeader,
    DetectingEncoding,
    InBody {
        offset: f64,
        pending: Boundary,
    },
}

/// Converts a stream of caption lines into [CaptionRecord]s.
///
/// One instance handles exactly one stream; it carries nothing over to the next.
#[derive(Clone, Debug)]
pub struct Realigner {
    start: Option<f64>,
    state: State,
    captions: Vec<String>,
}

impl Realigner {

    /// Creates a realigner that moves the first caption to `start` seconds, or keeps the
    /// original timing if `start` is `None`.
    pub fn new(start: Option<f64>) -> Self {
        Self {
            start,
            state: State::InHeader,
            captions: Vec::new(),
        }
    }

    /// The encoding detected so far, if any.
    pub fn encoding(&self) -> Option<Encoding> {
        match self.state {
            State::InBody { pending, .. } => Some(pending.encoding()),
            _ => None,
        }
    }

    /// The offset subtracted from every timestamp, once the encoding is known.
    pub fn offset(&self) -> Option<f64> {
        match self.state {
            State::InBody { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// Processes one input line, without its line terminator, returning the caption that it
    /// completes, if any.
    pub fn push_line(&mut self, line: &str) -> RealignResult<Option<CaptionRecord>> {

        let line = classify_line(line);

        if self.state == State::InHeader {
            if let Line::Header(_) = line {
                return Ok(None)
            }
            self.state = State::DetectingEncoding;
        }

        match line {
            Line::Blank => Ok(None),
            Line::Header(text) | Line::Text(text) => {
                self.captions.push(text.to_string());
                Ok(None)
            }
            Line::Metadata(fields) => self.push_metadata(&fields),
        }
    }

    /// Closes the stream, returning the caption still being buffered, if any.
    pub fn finish(mut self) -> RealignResult<Option<CaptionRecord>> {
        match self.state {
            State::InBody { pending, .. } => self.take_caption(pending.unclosed()),
            _ => Err(RealignError::EmptyOrHeaderOnlyInput),
        }
    }

    fn push_metadata(&mut self, fields: &[&str]) -> RealignResult<Option<CaptionRecord>> {

        let times = fields.iter()
            .map(|field| parse_timestamp(field))
            .collect::<Result<Vec<f64>, _>>()?;

        match self.state {
            State::InBody { offset, pending } => {

                let encoding = pending.encoding();

                if times.len() != encoding.field_count() {
                    return Err(RealignError::AmbiguousEncoding { fields: times.len() })
                }

                let next = Boundary::new(encoding, &times, offset)?;

                self.state = State::InBody { offset, pending: next };
                self.take_caption(pending.closed_by(next))
            }
            _ => {

                if !self.captions.is_empty() {
                    return Err(RealignError::CaptionBeforeTimestamp)
                }

                let encoding = Encoding::from_field_count(times.len())
                    .ok_or(RealignError::AmbiguousEncoding { fields: times.len() })?;
                let offset = match self.start {
                    Some(start) => times[0] - start,
                    None => 0.0,
                };

                debug!(
                    "Detected {:?} encoding with a time offset of {} seconds.",
                    encoding,
                    offset,
                );

                self.state = State::InBody {
                    offset,
                    pending: Boundary::new(encoding, &times, offset)?,
                };

                Ok(None)
            }
        }
    }

    fn take_caption(
        &mut self,
        (start, end): (f64, f64),
    ) -> RealignResult<Option<CaptionRecord>> {

        if self.captions.is_empty() {
            return Ok(None)
        }
        if end < start {
            return Err(RealignError::EndBeforeStart { start, end })
        }

        trace!("Caption from {} to {} with {} line(s).", start, end, self.captions.len());

        Ok(
            Some(
                CaptionRecord {
                    start,
                    end,
                    lines: mem::take(&mut self.captions),
                }
            )
        )
    }
}

/// Realigns a complete sequence of lines, collecting every caption.
pub fn realign_lines<I, S>(
    lines: I,
    start: Option<f64>,
) -> RealignResult<Vec<CaptionRecord>> where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{

    let mut realigner = Realigner::new(start);
    let mut captions = Vec::new();

    for line in lines {
        if let Some(caption) = realigner.push_line(line.as_ref())? {
            captions.push(caption);
        }
    }
    if let Some(caption) = realigner.finish()? {
        captions.push(caption);
    }

    Ok(captions)
}
