use std::ops::RangeInclusive;

use super::DisasterEvent;

/// Narrows the events table before matching (e.g. German hydrological events 2000-2020).
/// Empty criteria accept everything; country and subgroup compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub countries: Vec<String>,
    pub subgroups: Vec<String>,
    pub years: Option<RangeInclusive<i32>>,
}

impl EventFilter {
    pub fn new() -> Self { Self::default() }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }

    pub fn subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.subgroups.push(subgroup.into());
        self
    }

    pub fn years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = Some(years);
        self
    }

    /// True if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.subgroups.is_empty() && self.years.is_none()
    }

    pub fn accepts(&self, event: &DisasterEvent) -> bool {
        fn any_eq(options: &[String], value: &str) -> bool {
            options.is_empty() || options.iter().any(|o| o.eq_ignore_ascii_case(value))
        }

        any_eq(&self.countries, &event.country)
            && any_eq(&self.subgroups, &event.subgroup)
            && match (&self.years, event.year) {
                (None, _) => true,
                (Some(range), Some(year)) => range.contains(&year),
                (Some(_), None) => false,
            }
    }

    /// Clone out the accepted events.
    pub fn apply(&self, events: &[DisasterEvent]) -> Vec<DisasterEvent> {
        events.iter().filter(|e| self.accepts(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<DisasterEvent> {
        vec![
            DisasterEvent::new("A").with_country("Germany").with_subgroup("Hydrological").with_year(2021),
            DisasterEvent::new("B").with_country("Germany").with_subgroup("Meteorological").with_year(2018),
            DisasterEvent::new("C").with_country("Austria").with_subgroup("Hydrological").with_year(2002),
            DisasterEvent::new("D").with_country("Germany").with_subgroup("Hydrological"),
        ]
    }

    fn ids(events: &[DisasterEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = EventFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&events()).len(), 4);
    }

    #[test]
    fn combines_criteria() {
        let filter = EventFilter::new().country("germany").subgroup("HYDROLOGICAL").years(2000..=2021);
        assert_eq!(ids(&filter.apply(&events())), vec!["A"]);
    }

    #[test]
    fn year_range_excludes_undated_events() {
        let filter = EventFilter::new().years(1900..=2100);
        assert_eq!(ids(&filter.apply(&events())), vec!["A", "B", "C"]);
    }
}
