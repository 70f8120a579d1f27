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

//! Normalized features shared by the KML and GPX readers.

use geojson::{Feature, Geometry, JsonObject, Value};

/// `properties.type` of point features.
const SPOT_TYPE: &str = "spot";
/// `properties.type` of line features.
const ROUTE_TYPE: &str = "route_base";

/// A named point of interest.
#[derive(Clone, Debug, PartialEq)]
pub struct Spot {
    pub name: String,
    pub description: String,
    /// `[longitude, latitude]` in degrees.
    pub position: [f64; 2],
}

/// A named line, usually a recorded or planned course.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub name: String,
    /// `[longitude, latitude, elevation]` triples in travel order.
    ///
    /// The elevation is `0` where the source has none.
    pub coordinates: Vec<[f64; 3]>,
}

/// A single feature read from a KML or GPX document.
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Spot(Spot),
    Route(Route),
}

impl Mark {
    /// Convert to a GeoJSON _Feature_ with _Point_ or _LineString_ geometry.
    pub fn into_feature(self) -> Feature {
        let mut properties = JsonObject::new();
        let value = match self {
            Mark::Spot(spot) => {
                properties.insert("type".to_string(), SPOT_TYPE.into());
                properties.insert("name".to_string(), spot.name.into());
                properties.insert("description".to_string(), spot.description.into());
                Value::Point(spot.position.to_vec())
            }
            Mark::Route(route) => {
                properties.insert("type".to_string(), ROUTE_TYPE.into());
                properties.insert("name".to_string(), route.name.into());
                Value::LineString(route.coordinates.iter().map(|c| c.to_vec()).collect())
            }
        };

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn spot_feature() {
        let feature = Mark::Spot(Spot {
            name: "X".to_string(),
            description: String::new(),
            position: [10.0, 20.0],
        })
        .into_feature();

        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "properties": {"type": "spot", "name": "X", "description": ""},
                "geometry": {"type": "Point", "coordinates": [10.0, 20.0]},
            })
        );
    }

    #[test]
    fn route_feature_has_no_description() {
        let feature = Mark::Route(Route {
            name: "Loop".to_string(),
            coordinates: vec![[1.0, 2.0, 0.0], [3.0, 4.0, 5.5]],
        })
        .into_feature();

        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "properties": {"type": "route_base", "name": "Loop"},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[1.0, 2.0, 0.0], [3.0, 4.0, 5.5]],
                },
            })
        );
    }
}
