use serde::{Deserialize, Serialize};

/// One row of the processed restaurant table.
///
/// Column names match the header written by the processing step; any extra
/// columns in the file are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub restaurant_id: u64,
    pub restaurant_name: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Comma-separated cuisine labels, kept as a single opaque string.
    #[serde(default)]
    pub cuisines: String,
    pub currency: String,
    pub average_cost_for_two: f64,
    /// Marker color derived from the rating, passed through to the map.
    pub color_name: String,
    pub aggregate_rating: f64,
    pub votes: u64,
}

/// Text columns usable as a distinct-count target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColumn {
    Country,
    City,
    Cuisines,
}

impl TextColumn {
    pub fn value<'a>(&self, row: &'a Restaurant) -> &'a str {
        match self {
            TextColumn::Country => &row.country,
            TextColumn::City => &row.city,
            TextColumn::Cuisines => &row.cuisines,
        }
    }
}

/// Numeric columns usable as a mean target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Votes,
    AverageCostForTwo,
}

impl NumericColumn {
    pub fn value(&self, row: &Restaurant) -> f64 {
        match self {
            NumericColumn::Votes => row.votes as f64,
            NumericColumn::AverageCostForTwo => row.average_cost_for_two,
        }
    }
}
