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

//! Length of GeoJSON routes along great circles.
//!
//! The earth is treated as a sphere and elevations are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geojson::{Geometry, Value};
use log::debug;
use serde_json::Value as JsonValue;

use crate::Error;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two `[longitude, latitude]`
/// positions given in degrees.
///
/// # Example
/// ```
/// # use track2geojson::distance::haversine_distance;
/// #
/// let km = haversine_distance([0.0, 0.0], [0.0, 1.0]);
/// assert!((km - 111.19).abs() < 0.01);
/// ```
pub fn haversine_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let [lon_a, lat_a] = a;
    let [lon_b, lat_b] = b;

    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let delta_phi = phi_b - phi_a;
    let delta_lambda = (lon_b - lon_a).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding may leave h marginally outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Total length in kilometers of all _LineStrings_ in a GeoJSON `document`.
///
/// The _features_ array is searched. A single _Feature_ without features
/// counts as a collection of one. Only _LineString_ geometries are validated;
/// other geometries and features without geometry contribute nothing.
pub fn route_length(document: &JsonValue) -> Result<f64, Error> {
    let mut features = match document.get("features") {
        None | Some(JsonValue::Null) => &[][..],
        Some(JsonValue::Array(features)) => features.as_slice(),
        Some(_) => return Err(Error::UnexpectedJson("an array of features")),
    };
    if features.is_empty() && type_of(document) == Some("Feature") {
        features = std::slice::from_ref(document);
    }

    let mut total = 0.0;
    for feature in features {
        if !feature.is_object() {
            return Err(Error::UnexpectedJson("a feature object"));
        }
        let Some(geometry) = feature
            .get("geometry")
            .filter(|g| type_of(g) == Some("LineString"))
        else {
            continue;
        };
        let Value::LineString(positions) = Geometry::from_json_value(geometry.clone())?.value
        else {
            continue;
        };

        for pair in positions.windows(2) {
            total += haversine_distance(lon_lat(&pair[0]), lon_lat(&pair[1]));
        }
    }
    Ok(total)
}

/// Read a complete GeoJSON document from `source` and compute its
/// [`route_length`].
pub fn route_length_from_reader(source: impl Read) -> Result<f64, Error> {
    let document: JsonValue = serde_json::from_reader(source)?;
    route_length(&document)
}

/// Compute the [`route_length`] of the GeoJSON file at `path`.
pub fn route_length_file(path: &Path) -> Result<f64, Error> {
    let file = File::open(path)?;
    let km = route_length_from_reader(BufReader::new(file))?;
    debug!("{} is {km} km long", path.display());
    Ok(km)
}

/// The `type` member of a GeoJSON object.
fn type_of(object: &JsonValue) -> Option<&str> {
    object.get("type").and_then(JsonValue::as_str)
}

/// Split a GeoJSON position into `[longitude, latitude]`, dropping any
/// elevation.
///
/// `geojson` rejects positions with fewer than two values.
fn lon_lat(position: &[f64]) -> [f64; 2] {
    [position[0], position[1]]
}
