/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: MPL-2.0
 */


use sbv::{
    realign::{AdjustCaptionsExt, AdjustResult},
    timestamp::parse_timestamp,
};
use std::{
    error::Error,
    ffi::OsString,
    fs::File,
    io::{stdin, stdout, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::exit,
};
use clap::{app_from_crate, crate_authors, crate_description, crate_name, crate_version, Arg};
use env_logger::Env;
use log::{error, info, warn};

fn main() {

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = app_from_crate!()
        .arg(Arg::with_name("start-time")
            .long("start-time")
            .short("s")
            .value_name("[[H:]M:]S[.MS]")
            .help("Shifts all captions so that the first one starts at this time")
            .takes_value(true)
            .required(false)
            .validator(|value| {
                match parse_timestamp(&value) {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("must be a timestamp: {}", err)),
                }
            })
        )
        .arg(Arg::with_name("no-overwrites")
            .long("no-overwrites")
            .short("n")
            .help("Skips any input whose output file already exists")
        )
        .arg(Arg::with_name("input")
            .index(1)
            .value_name("INPUT-FILE")
            .help("Input transcript files; use - for STDIN, which is written to STDOUT")
            .multiple(true)
            .required(true)
        )
        .after_help(format!("This utility will convert caption transcripts, either already in \
            the SBV format or in the raw format of lone timestamps followed by caption text, \
            into the SBV format. SBV inputs are written next to the input with a .fix.sbv \
            extension, all others with a .sbv extension.\n\n\
            Copyright © 2021 William Swartzendruber\n\
            Licensed under the Mozilla Public License 2.0\n\
            <{}>", env!("CARGO_PKG_REPOSITORY")).as_str())
        .get_matches();
    let start = matches.value_of("start-time")
        .map(|value| parse_timestamp(value).expect("Start time was not validated."));
    let no_overwrites = matches.is_present("no-overwrites");
    let mut failures = 0;

    for input_value in matches.values_of("input").into_iter().flatten() {
        if let Err(err) = adjust(input_value, start, no_overwrites) {
            error!("Could not adjust {}: {}", input_value, describe(&err));
            failures += 1;
        }
    }

    if failures > 0 {
        error!("{} input(s) could not be adjusted.", failures);
        exit(1)
    }
}

fn adjust(input_value: &str, start: Option<f64>, no_overwrites: bool) -> AdjustResult<()> {

    if input_value == "-" {

        let stdin_read = stdin();
        let mut input = stdin_read.lock();
        let mut output = BufWriter::new(stdout());
        let count = input.adjust_captions(&mut output, start)?;

        output.flush()?;
        info!("Wrote {} caption(s) to STDOUT.", count);

        return Ok(())
    }

    let output_value = output_path(Path::new(input_value));

    if output_value.is_file() {
        if no_overwrites {
            warn!("Output file already exists; skipping: {}", output_value.display());
            return Ok(())
        }
        warn!("Output file already exists and will be overwritten: {}", output_value.display());
    }

    let mut input = BufReader::new(File::open(input_value)?);
    let mut output = BufWriter::new(File::create(&output_value)?);
    let count = input.adjust_captions(&mut output, start)?;

    output.flush()?;
    info!("Wrote {} caption(s) to {}.", count, output_value.display());

    Ok(())
}

/// Names the output file for an input: `.sbv` inputs gain a `.fix` infix, anything else has
/// its extension replaced by `.sbv`.
fn output_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("sbv") => {
            let mut fixed = OsString::from("fix.");
            fixed.push(extension);
            input.with_extension(fixed)
        }
        _ => input.with_extension("sbv"),
    }
}

fn describe(err: &dyn Error) -> String {

    let mut description = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }

    description
}
