//! Filter-query builder
//!
//! Renders the small Overpass QL dialect the gateway needs:
//!
//! ```text
//! [out:json];node<filter>(<area>);out[ <limit>];
//! ```

use std::fmt;

use domain::{BoundingBox, GeoLocation};

/// Tag the category filters match against
const CATEGORY_KEY: &str = "amenity";

/// Which elements a query selects
///
/// Values are inserted verbatim. A category containing query metacharacters
/// (`"`, `]`, `;`, `|`) changes the structure of the rendered query, so only
/// trusted values should reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    /// A raw tag expression such as `amenity=school`, rendered as `[amenity=school]`
    Expression(String),
    /// Elements whose `amenity` matches any of the values (`["amenity"~"a|b"]`),
    /// or that carry an `amenity` tag at all when the list is empty
    Amenities(Vec<String>),
}

impl TagFilter {
    /// Filter on a raw `key=value` expression
    #[must_use]
    pub fn expression(expression: impl Into<String>) -> Self {
        Self::Expression(expression.into())
    }

    /// Filter on a list of amenity categories
    #[must_use]
    pub fn amenities<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Amenities(categories.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expression) => write!(f, "[{expression}]"),
            Self::Amenities(categories) if categories.is_empty() => {
                write!(f, "[\"{CATEGORY_KEY}\"]")
            },
            Self::Amenities(categories) => {
                write!(f, "[\"{CATEGORY_KEY}\"~\"{}\"]", categories.join("|"))
            },
        }
    }
}

/// Where a query looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchArea {
    /// Within `radius` meters of `center`
    Around {
        /// Radius in meters
        radius: f64,
        /// Circle center
        center: GeoLocation,
    },
    /// Inside a bounding box
    BoundingBox(BoundingBox),
}

impl fmt::Display for SearchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Around { radius, center } => write!(
                f,
                "around:{radius:.6},{},{}",
                center.latitude_param(),
                center.longitude_param()
            ),
            Self::BoundingBox(bbox) => write!(f, "{bbox}"),
        }
    }
}

/// A node query ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureQuery {
    filter: TagFilter,
    area: SearchArea,
    limit: Option<u32>,
}

impl FeatureQuery {
    /// Query nodes matching `filter` within `radius` meters of `center`
    #[must_use]
    pub const fn around(filter: TagFilter, center: GeoLocation, radius: f64) -> Self {
        Self {
            filter,
            area: SearchArea::Around { radius, center },
            limit: None,
        }
    }

    /// Query nodes matching `filter` inside `bbox`
    #[must_use]
    pub const fn within(filter: TagFilter, bbox: BoundingBox) -> Self {
        Self {
            filter,
            area: SearchArea::BoundingBox(bbox),
            limit: None,
        }
    }

    /// Cap the number of returned elements
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Selected filter
    #[must_use]
    pub const fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// Selected area
    #[must_use]
    pub const fn area(&self) -> &SearchArea {
        &self.area
    }

    /// Result cap
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Render the query text
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FeatureQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[out:json];node{}({});out", self.filter, self.area)?;
        if let Some(limit) = self.limit {
            write!(f, " {limit}")?;
        }
        f.write_str(";")
    }
}
