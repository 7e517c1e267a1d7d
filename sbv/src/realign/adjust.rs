/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use super::{
    RealignError,
    Realigner,
    super::caption::{WriteCaptionExt, WriteError},
};
use std::io::{
    BufRead,
    Error as IoError,
    Write,
};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for [AdjustCaptionsExt].
pub type AdjustResult<T> = Result<T, AdjustError>;

/// The error type for [AdjustCaptionsExt].
///
/// Captions written before the error remain in the output.
#[derive(ThisError, Debug)]
pub enum AdjustError {
    #[error("caption input IO error")]
    IoError {
        #[from]
        source: IoError,
    },
    #[error("caption realignment error")]
    RealignError {
        #[from]
        source: RealignError,
    },
    #[error("caption write error")]
    WriteError {
        #[from]
        source: WriteError,
    },
}

/// Allows converting a caption transcript into realigned SBV captions.
pub trait AdjustCaptionsExt {
    /// Reads every line from this source and writes the resulting captions to `output`,
    /// moving the first caption to `start` seconds if given. Returns the number of captions
    /// written.
    fn adjust_captions<W: Write>(
        &mut self,
        output: &mut W,
        start: Option<f64>,
    ) -> AdjustResult<usize>;
}

impl<T> AdjustCaptionsExt for T where
    T: BufRead,
{

    fn adjust_captions<W: Write>(
        &mut self,
        output: &mut W,
        start: Option<f64>,
    ) -> AdjustResult<usize> {

        let mut realigner = Realigner::new(start);
        let mut count = 0;

        for line in self.lines() {
            if let Some(caption) = realigner.push_line(&line?)? {
                output.write_caption(&caption)?;
                count += 1;
            }
        }

        if let Some(caption) = realigner.finish()? {
            output.write_caption(&caption)?;
            count += 1;
        }

        Ok(count)
    }
}
