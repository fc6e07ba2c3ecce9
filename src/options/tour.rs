use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One stop of a camera tour. Each field names a scene member; roles left
/// unset stay where they are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(default)]
pub struct TourStop {
    /// Member the camera moves to.
    pub camera: Option<String>,
    /// Member the focal point moves to.
    pub focus: Option<String>,
    /// Member the light moves to.
    pub light: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[schemars(title = "Tour", inline)]
#[serde(default)]
/// Ordered tour stops, bound to number keys in the viewer.
pub struct TourOptions {
    /// Stops in key order (first stop on `1`).
    pub stops: Vec<TourStop>,
}

impl TourOptions {
    /// Stop bound to a 1-based key number.
    #[must_use]
    pub fn stop_for_key(&self, key: usize) -> Option<&TourStop> {
        key.checked_sub(1).and_then(|i| self.stops.get(i))
    }
}
