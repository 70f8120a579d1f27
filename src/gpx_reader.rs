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

//! Reading of GPX tracks and waypoints.
//!
//! Elements are matched by their local name only, so that GPX 1.0, GPX 1.1,
//! and documents without any namespace are read the same way.

use log::debug;
use roxmltree::{Document, Node};

use crate::mark::{Mark, Route, Spot};
use crate::{element_text, parse_number, parsing_options, Error};

/// Name of tracks without a _name_ element.
const DEFAULT_ROUTE_NAME: &str = "Unnamed Route";
/// Name of waypoints without a _name_ element.
const DEFAULT_SPOT_NAME: &str = "Unnamed Spot";

/// Read all tracks, followed by all waypoints, from `text`.
pub(crate) fn read(text: &str) -> Result<Vec<Mark>, Error> {
    let document = Document::parse_with_options(text, parsing_options())?;
    let root = document.root_element();

    let mut marks = vec![];
    for track in descendants(root, "trk") {
        if let Some(route) = convert_track(track)? {
            marks.push(Mark::Route(route));
        }
    }

    for waypoint in descendants(root, "wpt") {
        marks.push(Mark::Spot(convert_waypoint(waypoint)?));
    }

    Ok(marks)
}

/// Convert a GPX `track` to a single line through all of its points.
///
/// Segments are joined. A track without points yields [`None`].
fn convert_track(track: Node) -> Result<Option<Route>, Error> {
    let name = child_text(track, "name").unwrap_or_else(|| DEFAULT_ROUTE_NAME.to_string());

    let mut coordinates = vec![];
    for point in descendants(track, "trkpt") {
        let [lon, lat] = position(point, "trkpt")?;
        let ele = match child_text(point, "ele") {
            Some(ele) => parse_number(&ele)?,
            None => 0.0,
        };
        coordinates.push([lon, lat, ele]);
    }

    if coordinates.is_empty() {
        debug!("omitting track {name:?} without points");
        return Ok(None);
    }

    Ok(Some(Route { name, coordinates }))
}

/// Convert a GPX `waypoint` to a spot.
fn convert_waypoint(waypoint: Node) -> Result<Spot, Error> {
    Ok(Spot {
        position: position(waypoint, "wpt")?,
        name: child_text(waypoint, "name").unwrap_or_else(|| DEFAULT_SPOT_NAME.to_string()),
        description: child_text(waypoint, "desc").unwrap_or_default(),
    })
}

/// Read the required `lon` and `lat` attributes of `point` as
/// `[longitude, latitude]`.
fn position(point: Node, element: &'static str) -> Result<[f64; 2], Error> {
    let attribute = |attribute: &'static str| {
        point
            .attribute(attribute)
            .ok_or(Error::MissingAttribute { element, attribute })
            .and_then(parse_number)
    };
    Ok([attribute("lon")?, attribute("lat")?])
}

/// All element descendants of `node` with local `name`, in document order.
///
/// `node` itself is excluded.
fn descendants<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .skip(1)
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Text of the first direct child element with local `name`.
///
/// An empty element yields an empty string.
fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .map(|n| element_text(n).unwrap_or_default())
}
