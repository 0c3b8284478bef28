use geo::Point;

use crate::types::EventId;

/// A geocoded location in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Accept only finite coordinates inside the lat/lng domain.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng))
            .then_some(Self { lat, lng })
    }

    /// As a planar point (x = lng, y = lat).
    #[inline] pub fn to_point(self) -> Point<f64> { Point::new(self.lng, self.lat) }
}

/// One row of the disaster events table.
/// `coords` is `None` when the geocoder found no match for `location`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterEvent {
    pub id: EventId,
    pub year: Option<i32>,
    pub subgroup: String, // e.g. "Hydrological", "Meteorological"
    pub country: String,
    pub location: String, // Free-text location as reported by the source
    pub coords: Option<Coordinates>,
}

impl DisasterEvent {
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            year: None,
            subgroup: String::new(),
            country: String::new(),
            location: String::new(),
            coords: None,
        }
    }

    pub fn with_coords(mut self, lat: f64, lng: f64) -> Self {
        self.coords = Some(Coordinates { lat, lng });
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.subgroup = subgroup.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[inline] pub fn is_located(&self) -> bool { self.coords.is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(Coordinates::checked(48.1, 11.5).is_some());
        assert!(Coordinates::checked(91.0, 11.5).is_none());
        assert!(Coordinates::checked(48.1, -181.0).is_none());
        assert!(Coordinates::checked(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn point_is_lng_lat() {
        let p = Coordinates { lat: 48.1, lng: 11.5 }.to_point();
        assert_eq!((p.x(), p.y()), (11.5, 48.1));
    }
}
