use geo::{Area, CoordsIter, MultiPolygon};
use thiserror::Error;

/// Why a region geometry cannot take part in containment tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("geometry is empty")]
    Empty,

    #[error("geometry has a non-finite coordinate")]
    NonFinite,

    #[error("geometry has zero area")]
    ZeroArea,
}

/// Check that a MultiPolygon is usable as a containment target.
pub(crate) fn validate_shape(shape: &MultiPolygon<f64>) -> Result<(), GeometryError> {
    if shape.0.iter().all(|polygon| polygon.exterior().0.is_empty()) {
        return Err(GeometryError::Empty);
    }
    if shape.coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFinite);
    }
    if shape.unsigned_area() <= 0.0 {
        return Err(GeometryError::ZeroArea);
    }
    Ok(())
}
