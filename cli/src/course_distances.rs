// Copyright 2026 Viktor Reusch
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

//! Prints the length of every course file in a directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glob::Pattern;
use log::debug;
use track2geojson::distance::route_length_file;

/// Print the total route length of GeoJSON course files in kilometers.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Directory containing the course files
    #[arg(long, default_value = "src/data")]
    dir: PathBuf,
    /// File name pattern of the course files
    #[arg(long, default_value = "course_*.json")]
    pattern: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let dir = args
        .dir
        .to_str()
        .with_context(|| format!("{} is not valid UTF-8", args.dir.display()))?;
    let pattern = Path::new(&Pattern::escape(dir)).join(&args.pattern);
    let pattern = pattern.to_string_lossy();
    debug!("scanning {pattern}");

    let paths = glob::glob(&pattern).with_context(|| format!("invalid pattern {pattern}"))?;

    println!("--- Course Distances ---");
    for entry in paths {
        match entry {
            Ok(path) => report(&path),
            Err(err) => println!("Error processing {}: {}", err.path().display(), err.error()),
        }
    }
    Ok(())
}

/// Print the length of the course at `path`, or why it cannot be measured.
fn report(path: &Path) {
    match route_length_file(path) {
        Ok(km) => {
            let name = path.file_name().unwrap_or(path.as_os_str());
            println!("{}: {km:.2} km", name.to_string_lossy());
        }
        Err(err) => println!("Error processing {}: {err}", path.display()),
    }
}
