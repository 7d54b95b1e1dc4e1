//! Row selection by country and rating band.

use crate::table::Restaurant;
use serde::Serialize;
use std::collections::BTreeSet;
use strsim::jaro_winkler;

const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Set of countries the user chose to look at.
///
/// An empty selection selects nothing. Kept ordered so it can key caches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selection {
    countries: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.contains(country)
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(String::as_str)
    }

    /// Selected names that match no country in `known`, each with the
    /// closest known name when one is similar enough.
    pub fn unknown_in(&self, known: &[&str]) -> Vec<UnknownCountry> {
        self.countries
            .iter()
            .filter(|name| !known.contains(&name.as_str()))
            .map(|name| UnknownCountry {
                name: name.clone(),
                suggestion: closest(name, known),
            })
            .collect()
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            countries: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            countries: iter.into_iter().collect(),
        }
    }
}

/// A selected country name absent from the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownCountry {
    pub name: String,
    pub suggestion: Option<String>,
}

fn closest(name: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .filter(|&&k| jaro_winkler(name, k) >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| {
            jaro_winkler(name, a)
                .partial_cmp(&jaro_winkler(name, b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|&s| s.to_string())
}

/// Inclusive rating threshold used by the best/worst city reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingBand {
    AtLeast(f64),
    AtMost(f64),
}

impl RatingBand {
    pub const BEST: RatingBand = RatingBand::AtLeast(4.0);
    pub const WORST: RatingBand = RatingBand::AtMost(2.5);

    pub fn contains(&self, rating: f64) -> bool {
        match *self {
            RatingBand::AtLeast(min) => rating >= min,
            RatingBand::AtMost(max) => rating <= max,
        }
    }
}

/// Country selection AND optional rating band, applied in one pass.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter<'s> {
    selection: &'s Selection,
    band: Option<RatingBand>,
}

impl<'s> RowFilter<'s> {
    pub fn new(selection: &'s Selection) -> Self {
        Self {
            selection,
            band: None,
        }
    }

    pub fn with_band(mut self, band: Option<RatingBand>) -> Self {
        self.band = band;
        self
    }

    pub fn matches(&self, row: &Restaurant) -> bool {
        self.selection.contains(&row.country)
            && self.band.is_none_or(|band| band.contains(row.aggregate_rating))
    }

    /// Keep matching rows in their original order.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<&'a Restaurant>
    where
        I: IntoIterator<Item = &'a Restaurant>,
    {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}
