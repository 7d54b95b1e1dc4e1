//! Whole-table summary figures for the headline widgets.
//!
//! These always read the full table: they describe how much data exists,
//! not what the current country selection shows.

use crate::format::thousands;
use crate::table::{RecordTable, TextColumn};
use serde::Serialize;
use std::collections::HashSet;

pub fn qty_restaurants(table: &RecordTable) -> usize {
    table
        .rows()
        .iter()
        .map(|r| r.restaurant_id)
        .collect::<HashSet<_>>()
        .len()
}

pub fn qty_countries(table: &RecordTable) -> usize {
    distinct(table, TextColumn::Country)
}

pub fn qty_cities(table: &RecordTable) -> usize {
    distinct(table, TextColumn::City)
}

/// Every row carries exactly one rating.
pub fn qty_ratings(table: &RecordTable) -> usize {
    table.len()
}

/// Distinct raw cuisine strings (not individual cuisine labels).
pub fn qty_cuisines(table: &RecordTable) -> usize {
    distinct(table, TextColumn::Cuisines)
}

fn distinct(table: &RecordTable, column: TextColumn) -> usize {
    table
        .rows()
        .iter()
        .map(|r| column.value(r))
        .collect::<HashSet<_>>()
        .len()
}

/// The five headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub restaurants: usize,
    pub countries: usize,
    pub cities: usize,
    pub ratings: usize,
    pub cuisines: usize,
}

impl Summary {
    pub fn compute(table: &RecordTable) -> Self {
        Self {
            restaurants: qty_restaurants(table),
            countries: qty_countries(table),
            cities: qty_cities(table),
            ratings: qty_ratings(table),
            cuisines: qty_cuisines(table),
        }
    }

    /// Widget label and display text for each figure, in dashboard order.
    pub fn widgets(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Restaurants", thousands(self.restaurants as u64)),
            ("Countries", thousands(self.countries as u64)),
            ("Cities", thousands(self.cities as u64)),
            ("Ratings", thousands(self.ratings as u64)),
            ("Types of culinary", thousands(self.cuisines as u64)),
        ]
    }
}
