/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use super::{
    CaptionRecord,
    TIME_SEPARATOR,
    super::timestamp::format_timestamp,
};
use std::io::{
    Error as IoError,
    Write,
};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for caption-writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// The error type for [WriteCaptionExt].
#[derive(ThisError, Debug)]
pub enum WriteError {
    /// The [`CaptionRecord`] could not be written because of an underlying I/O error.
    #[error("caption IO error")]
    IoError {
        /// The underlying I/O error.
        #[from]
        source: IoError,
    },
    /// The [`CaptionRecord`] being written has no text lines.
    #[error("caption has no text lines")]
    NoLines,
}

/// Allows writing captions to a destination.
pub trait WriteCaptionExt {
    /// Writes a caption to a destination in the SBV format, followed by a blank line.
    fn write_caption(&mut self, caption: &CaptionRecord) -> WriteResult<()>;
}

impl<T> WriteCaptionExt for T where
    T: Write,
{

    fn write_caption(&mut self, caption: &CaptionRecord) -> WriteResult<()> {

        if caption.lines.is_empty() {
            return Err(WriteError::NoLines)
        }

        writeln!(
            self,
            "{}{}{}",
            format_timestamp(caption.start),
            TIME_SEPARATOR,
            format_timestamp(caption.end),
        )?;

        for line in caption.lines.iter() {
            writeln!(self, "{}", line)?;
        }

        writeln!(self)?;

        Ok(())
    }
}
