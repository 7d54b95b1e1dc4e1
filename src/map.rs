//! Marker rows for the restaurant location map.

use crate::engine::{RowFilter, Selection};
use crate::format::escape_html;
use crate::table::{RecordTable, Restaurant};
use serde::Serialize;

/// One map marker; the renderer clusters these and opens `popup` on click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub restaurant_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Icon color, taken verbatim from `color_name`.
    pub color: String,
    pub popup: String,
}

/// Popup body for a restaurant marker.
pub fn popup_html(row: &Restaurant) -> String {
    format!(
        "<p><strong>{}</strong></p><p>Price: {},00 ({}) para dois<br />Type: {}<br />Aggregate Rating: {:.1}/5.0",
        escape_html(&row.restaurant_name),
        row.average_cost_for_two,
        escape_html(&row.currency),
        escape_html(&row.cuisines),
        row.aggregate_rating
    )
}

/// Markers for every restaurant in the selected countries, in table order.
pub fn markers(table: &RecordTable, selection: &Selection) -> Vec<MapMarker> {
    RowFilter::new(selection)
        .apply(table.rows())
        .into_iter()
        .map(|row| MapMarker {
            restaurant_id: row.restaurant_id,
            latitude: row.latitude,
            longitude: row.longitude,
            color: row.color_name.clone(),
            popup: popup_html(row),
        })
        .collect()
}
