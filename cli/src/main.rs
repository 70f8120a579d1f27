// Copyright 2023, 2026 Viktor Reusch
//
// This file is part of track2geojson.
//
// track2geojson is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// track2geojson is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License
// for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with track2geojson. If not, see <https://www.gnu.org/licenses/>.

//! Command-line interface for converting a KML or GPX file to GeoJSON.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::error;
use track2geojson::{convert_file, Error};

/// Convert a KML or GPX file to a GeoJSON FeatureCollection.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// KML or GPX file to read; the format follows the extension
    input: PathBuf,
    /// GeoJSON file to write
    output: PathBuf,
}

/// Conversion failures are logged but do not fail the process.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!(
        "Converting {} -> {}",
        args.input.display(),
        args.output.display()
    );

    match convert_file(&args.input, &args.output) {
        Ok(count) => println!("Success! {count} features found."),
        Err(Error::UnsupportedFormat(extension)) => println!("Unsupported format: {extension}"),
        Err(err) => {
            let err = anyhow::Error::new(err)
                .context(format!("Error processing {}", args.input.display()));
            error!("{err:?}");
        }
    }

    ExitCode::SUCCESS
}
