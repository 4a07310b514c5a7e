use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Admin-defined vehicle category key, e.g. `economy` or `xl`.
///
/// Keys are trimmed and lowercased on construction so lookups are
/// case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VehicleType(String);

impl VehicleType {
    pub fn new(key: &str) -> Self {
        Self(key.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for VehicleType {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VehicleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Self::new(&key))
    }
}

#[test]
fn vehicle_type_normalization_test() {
    assert_eq!(VehicleType::new("  Economy "), VehicleType::new("economy"));
    assert_eq!(VehicleType::from("XL").as_str(), "xl");

    let parsed: VehicleType = serde_json::from_str("\"Comfort\"").unwrap();
    assert_eq!(parsed.as_str(), "comfort");
    assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"comfort\"");
}
