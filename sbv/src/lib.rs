/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Normalizes caption transcripts into the SBV format.
//!
//! Transcripts exported by captioning tools either pair every caption with an explicit start
//! and end timestamp, or separate captions with lone timestamps that both end one caption and
//! start the next. Either way, this library writes them back out as SBV captions, optionally
//! shifting every timestamp so that the first caption begins at a chosen time.

pub mod caption;
pub mod realign;
pub mod timestamp;
