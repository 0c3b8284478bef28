use std::{fmt, sync::Arc};

/// Declare a cheap, cloneable string key.
/// Keeps the original id text (leading zeros included) without repeated owned Strings.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl AsRef<str>) -> Self { Self(Arc::from(id.as_ref())) }

            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self { Self::new(id) }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self { Self(Arc::from(id)) }
        }
    };
}

string_id!(
    /// Identifier of a polygon in a zonal extract (e.g. "DE2", "09162").
    PolygonId
);

string_id!(
    /// Identifier of a raster layer (one time slice, e.g. "2021-07-14").
    LayerId
);

string_id!(
    /// Identifier of a disaster event (e.g. "2021-0384-DEU").
    EventId
);

string_id!(
    /// Identifier of a candidate region polygon.
    RegionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_leading_zeros() {
        let id = PolygonId::new("09162");
        assert_eq!(id.as_str(), "09162");
        assert_eq!(id.to_string(), "09162");
    }

    #[test]
    fn orders_lexicographically() {
        let mut ids = vec![LayerId::from("d2"), LayerId::from("d10"), LayerId::from("d1")];
        ids.sort();
        assert_eq!(ids, vec![LayerId::from("d1"), LayerId::from("d10"), LayerId::from("d2")]);
    }
}
