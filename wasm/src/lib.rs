// Copyright 2022, 2026 Viktor Reusch
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

//! This is a WASM wrapper for `track2geojson`.

use track2geojson::{distance, SourceFormat};
use wasm_bindgen::{prelude::wasm_bindgen, JsError};

/// This wraps `track2geojson::convert` for interfacing with JS.
///
/// `extension` is the extension of the uploaded file name, e.g. `".gpx"`.
#[wasm_bindgen]
pub fn convert(source: &[u8], extension: &str) -> Result<Box<[u8]>, JsError> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let format = SourceFormat::from_extension(extension)?;
    let mut sink = vec![];
    track2geojson::convert(source, format, &mut sink)?;
    Ok(sink.into_boxed_slice())
}

/// Total length in kilometers of all routes in a GeoJSON document.
#[wasm_bindgen]
pub fn route_length(source: &[u8]) -> Result<f64, JsError> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    Ok(distance::route_length_from_reader(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_by_extension() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Placemark>
            <Point><coordinates>10,20</coordinates></Point>
        </Placemark></kml>"#;
        let geojson =
            convert(kml.as_bytes(), ".KML").unwrap_or_else(|_| panic!("conversion failed"));

        let length = route_length(&geojson).unwrap_or_else(|_| panic!("measuring failed"));
        assert_eq!(length, 0.0);
    }
}
