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

//! Reading of KML _Placemarks_.

use log::debug;
use roxmltree::{Document, Node};

use crate::mark::{Mark, Route, Spot};
use crate::{element_text, parse_number, parsing_options, Error};

/// Only elements of this namespace are considered.
const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
/// Name of placemarks without a _name_ element.
const DEFAULT_NAME: &str = "Unnamed";

/// Read all _Placemarks_ with _Point_ or _LineString_ geometry from `text`.
pub(crate) fn read(text: &str) -> Result<Vec<Mark>, Error> {
    let document = Document::parse_with_options(text, parsing_options())?;

    let mut marks = vec![];
    for placemark in document
        .descendants()
        .filter(|n| n.has_tag_name((KML_NAMESPACE, "Placemark")))
    {
        if let Some(mark) = convert_placemark(placemark)? {
            marks.push(mark);
        }
    }
    Ok(marks)
}

/// Convert a single `placemark`.
///
/// A _Point_ takes precedence over a _LineString_. Placemarks with neither are
/// skipped.
fn convert_placemark(placemark: Node) -> Result<Option<Mark>, Error> {
    let name = child_text(placemark, "name").unwrap_or_else(|| DEFAULT_NAME.to_string());

    if let Some(point) = child(placemark, "Point") {
        let description = child_text(placemark, "description").unwrap_or_default();
        let position = parse_point(&coordinates(point, "Point")?)?;
        return Ok(Some(Mark::Spot(Spot {
            name,
            description,
            position,
        })));
    }

    if let Some(line) = child(placemark, "LineString") {
        let coordinates = parse_line(&coordinates(line, "LineString")?)?;
        return Ok(Some(Mark::Route(Route { name, coordinates })));
    }

    debug!("skipping placemark {name:?} without point or line geometry");
    Ok(None)
}

/// Parse the text of a _Point_ as `lon,lat[,alt]`.
///
/// Everything after the latitude is ignored.
fn parse_point(text: &str) -> Result<[f64; 2], Error> {
    let mut parts = text.trim().split(',');
    match (parts.next(), parts.next()) {
        (Some(lon), Some(lat)) => Ok([parse_number(lon)?, parse_number(lat)?]),
        _ => Err(Error::InvalidCoordinate(text.to_string())),
    }
}

/// Parse the text of a _LineString_ as whitespace-separated `lon,lat[,ele]`
/// tuples.
///
/// Tokens without a comma are skipped.
fn parse_line(text: &str) -> Result<Vec<[f64; 3]>, Error> {
    let mut coordinates = vec![];
    for tuple in text.split_whitespace() {
        if !tuple.contains(',') {
            debug!("skipping coordinate token {tuple:?}");
            continue;
        }

        let mut parts = tuple.split(',');
        let lon = parts.next().unwrap_or_default();
        let lat = parts
            .next()
            .ok_or_else(|| Error::InvalidCoordinate(tuple.to_string()))?;
        let ele = match parts.next() {
            Some(ele) => parse_number(ele)?,
            None => 0.0,
        };
        coordinates.push([parse_number(lon)?, parse_number(lat)?, ele]);
    }
    Ok(coordinates)
}

/// Text of the _coordinates_ child of `geometry`, which must not be empty.
fn coordinates(geometry: Node, parent: &'static str) -> Result<String, Error> {
    let coordinates = child(geometry, "coordinates").ok_or(Error::MissingElement {
        parent,
        child: "coordinates",
    })?;
    element_text(coordinates).ok_or(Error::EmptyElement {
        parent,
        child: "coordinates",
    })
}

/// First direct child of `node` named `name` in the KML namespace.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((KML_NAMESPACE, name)))
}

/// Text of the first direct child named `name`.
///
/// An empty element yields an empty string.
fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name).map(|n| element_text(n).unwrap_or_default())
}
