//! Map features returned by filter queries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bare coordinate as it appears in feature geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// Element kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Single point
    Node,
    /// Ordered list of nodes
    Way,
    /// Group of elements
    Relation,
}

/// A point feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
    /// OSM identifier
    pub id: i64,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Free-form tags (`amenity`, `name`, ...)
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A way or relation
///
/// Depending on the query's output mode the upstream sends a computed
/// `center`, the member node references, full `geometry`, or a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeElement {
    /// OSM identifier
    pub id: i64,
    /// Computed center point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
    /// Member node references, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<i64>,
    /// Resolved geometry, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<GeoPoint>,
    /// Free-form tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A map element, discriminated by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureElement {
    /// `node`
    Node(NodeElement),
    /// `way`
    Way(CompositeElement),
    /// `relation`
    Relation(CompositeElement),
}

impl FeatureElement {
    /// Element kind
    #[must_use]
    pub const fn kind(&self) -> FeatureKind {
        match self {
            Self::Node(_) => FeatureKind::Node,
            Self::Way(_) => FeatureKind::Way,
            Self::Relation(_) => FeatureKind::Relation,
        }
    }

    /// OSM identifier
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Node(node) => node.id,
            Self::Way(element) | Self::Relation(element) => element.id,
        }
    }

    /// Element tags
    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Node(node) => &node.tags,
            Self::Way(element) | Self::Relation(element) => &element.tags,
        }
    }

    /// Value of the `name` tag
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags().get("name").map(String::as_str)
    }

    /// Representative point: node position, center, or first geometry point
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        match self {
            Self::Node(node) => Some(GeoPoint {
                lat: node.lat,
                lon: node.lon,
            }),
            Self::Way(element) | Self::Relation(element) => {
                element.center.or_else(|| element.geometry.first().copied())
            },
        }
    }
}
