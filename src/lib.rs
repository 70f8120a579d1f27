// Copyright 2021, 2022, 2026 Viktor Reusch
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

//! Library for converting [KML](https://developers.google.com/kml) and
//! [GPX](https://www.topografix.com/gpx.asp) files to
//! [GeoJSON](https://datatracker.ietf.org/doc/html/rfc7946).
//!
//! KML _Placemarks_ as well as GPX tracks and waypoints are normalized to
//! _spots_ (points) and _route bases_ (lines). See [`convert`] for the main
//! entry point and [`distance`] for measuring the length of converted routes.

use std::fs;
use std::io::{self, Read};
use std::num::ParseFloatError;
use std::path::Path;

use geojson::FeatureCollection;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

pub mod distance;
mod gpx_reader;
mod kml_reader;
mod mark;

pub use mark::{Mark, Route, Spot};

/// Indentation of the written GeoJSON.
const INDENT: &[u8] = b"    ";

/// Error returned from the conversion and distance functions.
#[derive(Error, Debug)]
pub enum Error {
    /// The source file extension names no supported format.
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),
    /// Reading or writing a file failed.
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The source is not well-formed XML.
    #[error("parsing XML failed: {0}")]
    Xml(#[from] roxmltree::Error),
    /// A required child element is absent.
    #[error("<{parent}> has no <{child}> element")]
    MissingElement {
        parent: &'static str,
        child: &'static str,
    },
    /// A required child element has no text.
    #[error("<{child}> of <{parent}> is empty")]
    EmptyElement {
        parent: &'static str,
        child: &'static str,
    },
    /// A required attribute is absent.
    #[error("<{element}> has no {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    /// A coordinate value is not a number.
    #[error("invalid number {text:?}")]
    InvalidNumber {
        text: String,
        #[source]
        source: ParseFloatError,
    },
    /// A coordinate tuple has too few components.
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
    /// The GeoJSON source is not valid JSON or writing JSON failed.
    #[error("JSON failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON source is not valid GeoJSON.
    #[error("reading GeoJSON failed: {0}")]
    GeoJson(#[from] geojson::Error),
    /// A GeoJSON member has the wrong JSON type.
    #[error("expected {0}")]
    UnexpectedJson(&'static str),
}

/// Format of a source document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Kml,
    Gpx,
}

impl SourceFormat {
    /// Select the format from a file extension, ignoring case.
    ///
    /// The extension may be given with or without its leading dot.
    pub fn from_extension(extension: &str) -> Result<Self, Error> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        match extension.as_str() {
            "kml" => Ok(Self::Kml),
            "gpx" => Ok(Self::Gpx),
            _ => Err(Error::UnsupportedFormat(format!(".{extension}"))),
        }
    }

    /// Select the format from the extension of `path`.
    ///
    /// A path without an extension is unsupported.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        match path.extension() {
            Some(extension) => Self::from_extension(&extension.to_string_lossy()),
            None => Err(Error::UnsupportedFormat(String::new())),
        }
    }
}

/// Read all spots and routes from a complete `source` document.
///
/// KML _Placemarks_ are returned in document order. For GPX, all tracks come
/// before all waypoints.
pub fn read_features(mut source: impl Read, format: SourceFormat) -> Result<Vec<Mark>, Error> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;

    let marks = match format {
        SourceFormat::Kml => kml_reader::read(&text)?,
        SourceFormat::Gpx => gpx_reader::read(&text)?,
    };
    info!("read {} features from {format:?} source", marks.len());
    Ok(marks)
}

/// Serialize `marks` as a pretty-printed GeoJSON _FeatureCollection_.
///
/// Nothing is written to `sink` if serialization fails.
pub fn write_geojson(marks: Vec<Mark>, mut sink: impl io::Write) -> Result<(), Error> {
    let collection = FeatureCollection {
        bbox: None,
        features: marks.into_iter().map(Mark::into_feature).collect(),
        foreign_members: None,
    };

    let mut buffer = vec![];
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    collection.serialize(&mut serializer)?;
    buffer.push(b'\n');

    sink.write_all(&buffer)?;
    Ok(())
}

/// Read a KML or GPX file and write a GeoJSON file.
///
/// A complete document of the given `format` is read from `source`. The
/// converted _FeatureCollection_ is written to `sink` only once all features
/// are known. Returns the number of written features.
///
/// # Example
/// ```
/// # use track2geojson::{convert, SourceFormat};
/// #
/// let source = r#"
/// <?xml version="1.0" encoding="UTF-8"?>
/// <gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
///     <wpt lat="48.858222" lon="2.2945"><name>Eiffel Tower</name></wpt>
/// </gpx>
/// "#;
/// let mut sink = vec![];
///
/// let count = convert(source.trim().as_bytes(), SourceFormat::Gpx, &mut sink)
///     .expect("conversion failed");
///
/// let geojson = String::from_utf8(sink).expect("GeoJSON data is not valid UTF-8");
/// assert_eq!(count, 1);
/// assert!(geojson.contains("FeatureCollection"));
/// assert!(geojson.contains("2.2945"));
/// assert!(geojson.contains("48.858222"));
/// assert!(geojson.contains("Eiffel Tower"));
/// ```
pub fn convert(
    source: impl Read,
    format: SourceFormat,
    sink: impl io::Write,
) -> Result<usize, Error> {
    let marks = read_features(source, format)?;
    let count = marks.len();
    write_geojson(marks, sink)?;
    Ok(count)
}

/// Convert the file at `input` to a GeoJSON file at `output`.
///
/// The format is selected by the extension of `input`. The output file is
/// neither created nor truncated if the conversion fails.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize, Error> {
    let format = SourceFormat::from_path(input)?;
    let source = fs::File::open(input)?;

    let mut buffer = vec![];
    let count = convert(source, format, &mut buffer)?;
    fs::write(output, buffer)?;
    Ok(count)
}

/// Options for parsing KML and GPX sources.
fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}

/// All text directly inside `element`, joined across comments and
/// processing instructions.
///
/// An element without any text yields [`None`].
fn element_text(element: roxmltree::Node) -> Option<String> {
    let mut parts = element
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .peekable();
    parts.peek()?;
    Some(parts.collect())
}

/// Parse a coordinate value, ignoring surrounding whitespace.
fn parse_number(text: &str) -> Result<f64, Error> {
    text.trim().parse().map_err(|source| Error::InvalidNumber {
        text: text.to_string(),
        source,
    })
}
