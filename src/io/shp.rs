use std::path::Path;

use anyhow::{bail, Context, Result};
use shapefile::{self as shp, dbase::{FieldValue, Record}, PolygonRing, Reader, Shape};

use crate::disaster::RegionPolygon;

/// Read region polygons from a `.shp` file (with its `.dbf` alongside).
/// `id_field` names the attribute holding the region id; `name_field` the display name (defaults to the id).
/// Null shapes become empty geometries, which the matcher reports and skips.
pub fn read_regions_shapefile(path: &Path, id_field: &str, name_field: Option<&str>) -> Result<Vec<RegionPolygon>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp::read] Failed to open shapefile: {}", path.display()))?;

    let mut regions = Vec::with_capacity(reader.shape_count()?);
    for (i, result) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = result.context("[io::shp::read] Error reading shape+record")?;

        let id = field_text(&record, id_field)
            .with_context(|| format!("[io::shp::read] Record {i} has no '{id_field}' attribute"))?;
        let name = name_field
            .and_then(|field| field_text(&record, field))
            .unwrap_or_else(|| id.clone());

        let geometry = match shape {
            Shape::Polygon(polygon) => shp_to_geo(&polygon),
            Shape::NullShape => geo::MultiPolygon(vec![]),
            other => bail!("[io::shp::read] Record {i} ({id}) is a {:?}, expected a polygon", other.shapetype()),
        };

        regions.push(RegionPolygon::new(id, name, geometry));
    }
    Ok(regions)
}

/// Attribute value rendered as text; numeric ids lose a trailing ".0".
fn field_text(record: &Record, field: &str) -> Option<String> {
    let text = match record.get(field)? {
        FieldValue::Character(Some(s)) => s.trim().to_string(),
        FieldValue::Memo(s) => s.trim().to_string(),
        FieldValue::Numeric(Some(n)) | FieldValue::Double(n) | FieldValue::Currency(n) if n.fract() == 0.0 => {
            format!("{}", *n as i64)
        }
        FieldValue::Numeric(Some(n)) | FieldValue::Double(n) | FieldValue::Currency(n) => n.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>: each outer ring starts a polygon,
/// inner rings attach to the most recent outer ring. Inner rings before any outer ring are dropped.
fn shp_to_geo(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    fn ring(points: &[shp::Point]) -> geo::LineString<f64> {
        // geo::Polygon::new closes rings itself
        points.iter().map(|pt| geo::Coord { x: pt.x, y: pt.y }).collect()
    }

    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();

    for r in p.rings() {
        match r {
            PolygonRing::Outer(points) => {
                if let Some(ext) = exterior.replace(ring(points)) {
                    polys.push(geo::Polygon::new(ext, std::mem::take(&mut holes)));
                }
            }
            PolygonRing::Inner(points) if exterior.is_some() => holes.push(ring(points)),
            PolygonRing::Inner(_) => {}
        }
    }
    if let Some(ext) = exterior {
        polys.push(geo::Polygon::new(ext, holes));
    }

    geo::MultiPolygon(polys)
}
