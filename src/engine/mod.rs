//! Filter → aggregate → rank pipeline shared by every report.

pub mod aggregate;
pub mod filter;
pub mod rank;

pub use aggregate::{Aggregate, Aggregation, AggregationResult, GroupBy, GroupKey, MetricValue, Reducer};
pub use filter::{RatingBand, RowFilter, Selection, UnknownCountry};
pub use rank::{rank, Limit};
