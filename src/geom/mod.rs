mod index;
mod validate;

pub(crate) use index::RegionIndex;
pub(crate) use validate::validate_shape;
pub use validate::GeometryError;
