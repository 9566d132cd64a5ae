//! Routing profile value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Travel mode used to compute a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    /// Motor vehicle
    #[default]
    Car,
    /// Bicycle
    Bicycle,
    /// Walking
    Foot,
}

impl RoutingProfile {
    /// Map a free-form mode token to a profile
    ///
    /// Unknown or empty tokens fall back to [`RoutingProfile::Car`].
    #[must_use]
    pub fn from_mode(mode: &str) -> Self {
        match mode.trim().to_lowercase().as_str() {
            "bike" | "bicycle" => Self::Bicycle,
            "foot" | "walking" => Self::Foot,
            _ => Self::Car,
        }
    }

    /// Path segment used by the routing service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bicycle => "bicycle",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
