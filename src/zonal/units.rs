use serde::{Deserialize, Serialize};

/// Linear unit conversion `value * scale + offset`, applied to aggregated values only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    #[serde(default = "one")]
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
}

fn one() -> f64 { 1.0 }

impl Default for UnitConversion {
    fn default() -> Self { Self::identity() }
}

impl UnitConversion {
    pub const KELVIN_OFFSET: f64 = -273.15;

    #[inline] pub fn identity() -> Self { Self { scale: 1.0, offset: 0.0 } }

    #[inline] pub fn kelvin_to_celsius() -> Self { Self { scale: 1.0, offset: Self::KELVIN_OFFSET } }

    #[inline] pub fn is_identity(&self) -> bool { self.scale == 1.0 && self.offset == 0.0 }

    #[inline] pub fn apply(&self, value: f64) -> f64 { value * self.scale + self.offset }
}

#[cfg(test)]
mod tests {
    use super::UnitConversion;

    #[test]
    fn kelvin_to_celsius() {
        let c = UnitConversion::kelvin_to_celsius().apply(293.15);
        assert!((c - 20.0).abs() < 1e-9);
    }

    #[test]
    fn default_is_identity() {
        assert!(UnitConversion::default().is_identity());
        assert_eq!(UnitConversion::default().apply(42.5), 42.5);
    }

    #[test]
    fn deserializes_partial_json() {
        let conv: UnitConversion = serde_json::from_str(r#"{"offset": -273.15}"#).unwrap();
        assert_eq!(conv, UnitConversion::kelvin_to_celsius());
    }
}
