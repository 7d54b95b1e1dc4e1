use crate::table::{RecordTable, Restaurant};

/// Minimal restaurant row for engine tests; descriptive fields get fillers.
pub fn restaurant(id: u64, country: &str, city: &str, rating: f64) -> Restaurant {
    Restaurant {
        restaurant_id: id,
        restaurant_name: format!("Restaurant {}", id),
        country: country.to_string(),
        city: city.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        cuisines: "Cafe".to_string(),
        currency: "USD".to_string(),
        average_cost_for_two: 10.0,
        color_name: "green".to_string(),
        aggregate_rating: rating,
        votes: 0,
    }
}

/// The three-row Brazil table used across report tests.
pub fn brazil_table() -> RecordTable {
    RecordTable::from_rows(vec![
        restaurant(1, "Brazil", "São Paulo", 4.2),
        restaurant(2, "Brazil", "São Paulo", 3.0),
        restaurant(3, "Brazil", "Rio", 4.8),
    ])
}

/// Selection from string literals.
pub fn selection(countries: &[&str]) -> crate::engine::Selection {
    countries.iter().copied().collect()
}
