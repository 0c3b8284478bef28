use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

/// Build a GeoJSON FeatureCollection from (id, geometry, properties) triples.
pub(crate) fn feature_collection<'a>(
    features: impl IntoIterator<Item = (&'a str, &'a MultiPolygon<f64>, Map<String, Value>)>,
) -> Value {
    let features = features.into_iter()
        .map(|(id, geometry, properties)| json!({
            "type": "Feature",
            "id": id,
            "geometry": multipolygon_to_geojson(geometry),
            "properties": properties,
        }))
        .collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write a GeoJSON value to `path`.
pub fn write_geojson(value: &Value, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::geojson::write] Failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("[io::geojson::write] Failed to write GeoJSON to {:?}", path))
}

/// Convert a MultiPolygon to a GeoJSON geometry object.
fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let polygons = mp.0.iter()
        .map(|polygon| std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>())
            .collect::<Vec<_>>())
        .collect::<Vec<_>>();

    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    #[test]
    fn polygon_rings_are_nested_arrays() {
        let mp = MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let value = multipolygon_to_geojson(&mp);
        assert_eq!(value["type"], "MultiPolygon");
        // one polygon, one ring, closed (4 coordinates)
        assert_eq!(value["coordinates"][0][0].as_array().unwrap().len(), 4);
        assert_eq!(value["coordinates"][0][0][1], json!([1.0, 0.0]));
    }

    #[test]
    fn collection_carries_ids_and_properties() {
        let mp = MultiPolygon(vec![]);
        let mut props = Map::new();
        props.insert("events".into(), json!(2));
        let fc = feature_collection([("DE2", &mp, props)]);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"][0]["id"], "DE2");
        assert_eq!(fc["features"][0]["properties"]["events"], 2);
    }
}
