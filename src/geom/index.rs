use geo::{BoundingRect, Contains, MultiPolygon, Point, Rect};
use rstar::{primitives::{GeomWithData, Rectangle}, RTree, AABB};

/// Bounding rectangle of an indexed shape, tagged with the shape's slot in `entries`.
type Envelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

fn envelope(slot: usize, rect: Rect<f64>) -> Envelope {
    GeomWithData::new(Rectangle::from_corners(rect.min().into(), rect.max().into()), slot)
}

/// A set of region geometries with an R-tree over their bounding boxes.
/// Each entry keeps the caller's key (typically the region's position in its input slice).
#[derive(Debug, Clone)]
pub(crate) struct RegionIndex<'a> {
    entries: Vec<(usize, &'a MultiPolygon<f64>)>,
    rtree: RTree<Envelope>,
}

impl<'a> RegionIndex<'a> {
    /// Build an index from (key, shape) pairs. Shapes without a bounding rectangle are left out.
    pub(crate) fn new(shapes: impl IntoIterator<Item = (usize, &'a MultiPolygon<f64>)>) -> Self {
        let entries = shapes.into_iter()
            .filter(|(_, shape)| shape.bounding_rect().is_some())
            .collect::<Vec<_>>();

        Self {
            rtree: RTree::bulk_load(
                entries.iter().enumerate()
                    .filter_map(|(i, (_, shape))| shape.bounding_rect().map(|rect| envelope(i, rect)))
                    .collect()
            ),
            entries,
        }
    }

    /// Number of indexed shapes.
    #[inline] pub(crate) fn len(&self) -> usize { self.entries.len() }

    /// Keys of every shape that contains `point`, in ascending key order.
    pub(crate) fn containing(&self, point: Point<f64>) -> Vec<usize> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        let mut keys = self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(|hit| self.entries[hit.data])
            .filter(|(_, shape)| shape.contains(&point))
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        keys.sort_unstable();
        keys
    }
}
