//! Grouped reductions over filtered rows.
//!
//! Rows are partitioned by country or by (country, city) and each partition
//! is reduced to a single metric: a row count, a distinct count of a text
//! column, or the mean of a numeric column.

use crate::table::{NumericColumn, Restaurant, TextColumn};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Columns that form the group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    Country,
    CountryCity,
}

/// How each partition is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reducer {
    Count,
    /// Distinct raw values of a column; multi-value strings are not split.
    DistinctCount(TextColumn),
    Mean(NumericColumn),
}

/// An aggregation clause: group key plus reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aggregation {
    pub group_by: GroupBy,
    pub reducer: Reducer,
}

/// Identity of one partition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl GroupKey {
    /// Category label shown on the chart axis: the city when grouped by
    /// city, otherwise the country.
    pub fn label(&self) -> &str {
        self.city.as_deref().unwrap_or(&self.country)
    }
}

/// Reduced value of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Mean(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Count(n) => n as f64,
            MetricValue::Mean(v) => v,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match *self {
            MetricValue::Count(n) => Some(n),
            MetricValue::Mean(_) => None,
        }
    }

    /// Total order over values; NaN means sort above every number.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MetricValue::Count(a), MetricValue::Count(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

/// One reduced partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    #[serde(flatten)]
    pub key: GroupKey,
    pub value: MetricValue,
}

/// Result of an aggregation computation.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Groups in key order (country, then city); ranking reorders them.
    pub groups: Vec<Aggregate>,
    /// Number of input rows across all groups.
    pub total_rows: usize,
}

enum Accumulator<'a> {
    Count(u64),
    Distinct(HashSet<&'a str>),
    Mean { sum: f64, n: u64 },
}

impl<'a> Accumulator<'a> {
    fn new(reducer: Reducer) -> Self {
        match reducer {
            Reducer::Count => Accumulator::Count(0),
            Reducer::DistinctCount(_) => Accumulator::Distinct(HashSet::new()),
            Reducer::Mean(_) => Accumulator::Mean { sum: 0.0, n: 0 },
        }
    }

    fn push(&mut self, reducer: Reducer, row: &'a Restaurant) {
        match (self, reducer) {
            (Accumulator::Count(n), _) => *n += 1,
            (Accumulator::Distinct(seen), Reducer::DistinctCount(column)) => {
                seen.insert(column.value(row));
            }
            (Accumulator::Mean { sum, n }, Reducer::Mean(column)) => {
                *sum += column.value(row);
                *n += 1;
            }
            _ => unreachable!("accumulator built for a different reducer"),
        }
    }

    fn finish(self) -> MetricValue {
        match self {
            Accumulator::Count(n) => MetricValue::Count(n),
            Accumulator::Distinct(seen) => MetricValue::Count(seen.len() as u64),
            Accumulator::Mean { sum, n } => {
                debug_assert!(n > 0, "mean reduced over an empty partition");
                MetricValue::Mean(sum / n as f64)
            }
        }
    }
}

impl AggregationResult {
    /// Partition `rows` by the clause's key and reduce each partition.
    ///
    /// Only keys present in `rows` produce a group, so no reducer ever sees
    /// an empty partition.
    pub fn compute<'a>(rows: &[&'a Restaurant], aggregation: &Aggregation) -> Self {
        let mut groups: BTreeMap<(&'a str, Option<&'a str>), Accumulator<'a>> = BTreeMap::new();

        for &row in rows {
            let key = match aggregation.group_by {
                GroupBy::Country => (row.country.as_str(), None),
                GroupBy::CountryCity => (row.country.as_str(), Some(row.city.as_str())),
            };
            groups
                .entry(key)
                .or_insert_with(|| Accumulator::new(aggregation.reducer))
                .push(aggregation.reducer, row);
        }

        let groups = groups
            .into_iter()
            .map(|((country, city), acc)| Aggregate {
                key: GroupKey {
                    country: country.to_string(),
                    city: city.map(str::to_string),
                },
                value: acc.finish(),
            })
            .collect();

        AggregationResult {
            groups,
            total_rows: rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::restaurant;

    fn key(country: &str, city: Option<&str>) -> GroupKey {
        GroupKey {
            country: country.into(),
            city: city.map(Into::into),
        }
    }

    fn sample() -> Vec<Restaurant> {
        let mut rows = vec![
            restaurant(1, "Brazil", "Rio", 4.0),
            restaurant(2, "India", "Goa", 3.0),
            restaurant(3, "Brazil", "Rio", 2.0),
            restaurant(4, "Brazil", "Brasília", 1.0),
        ];
        rows[0].votes = 10;
        rows[2].votes = 20;
        rows[3].votes = 3;
        rows[1].votes = 7;
        rows[0].cuisines = "Bar Food, Brazilian".into();
        rows[2].cuisines = "Brazilian, Bar Food".into();
        rows[3].cuisines = "Bar Food, Brazilian".into();
        rows
    }

    #[test]
    fn test_count_by_country() {
        let rows = sample();
        let refs: Vec<&Restaurant> = rows.iter().collect();
        let agg = Aggregation {
            group_by: GroupBy::Country,
            reducer: Reducer::Count,
        };

        let result = AggregationResult::compute(&refs, &agg);

        assert_eq!(result.total_rows, 4);
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].key, key("Brazil", None));
        assert_eq!(result.groups[0].value, MetricValue::Count(3));
        assert_eq!(result.groups[1].key, key("India", None));
        assert_eq!(result.groups[1].value, MetricValue::Count(1));
    }

    #[test]
    fn test_counts_sum_to_total() {
        let rows = sample();
        let refs: Vec<&Restaurant> = rows.iter().collect();
        let agg = Aggregation {
            group_by: GroupBy::CountryCity,
            reducer: Reducer::Count,
        };

        let result = AggregationResult::compute(&refs, &agg);
        let sum: u64 = result
            .groups
            .iter()
            .filter_map(|g| g.value.as_count())
            .sum();

        assert_eq!(sum as usize, result.total_rows);
        assert_eq!(result.groups.len(), 3);
    }

    #[test]
    fn test_distinct_city_per_country() {
        let rows = sample();
        let refs: Vec<&Restaurant> = rows.iter().collect();
        let agg = Aggregation {
            group_by: GroupBy::Country,
            reducer: Reducer::DistinctCount(TextColumn::City),
        };

        let result = AggregationResult::compute(&refs, &agg);
        assert_eq!(result.groups[0].value, MetricValue::Count(2));
        assert_eq!(result.groups[1].value, MetricValue::Count(1));
    }

    #[test]
    fn test_distinct_cuisines_compares_raw_strings() {
        let rows = sample();
        let refs: Vec<&Restaurant> = rows.iter().collect();
        let agg = Aggregation {
            group_by: GroupBy::CountryCity,
            reducer: Reducer::DistinctCount(TextColumn::Cuisines),
        };

        let result = AggregationResult::compute(&refs, &agg);
        let rio = result
            .groups
            .iter()
            .find(|g| g.key == key("Brazil", Some("Rio")))
            .unwrap();
        // Same tokens in a different order count as two values.
        assert_eq!(rio.value, MetricValue::Count(2));
    }

    #[test]
    fn test_mean_votes() {
        let rows = sample();
        let refs: Vec<&Restaurant> = rows.iter().collect();
        let agg = Aggregation {
            group_by: GroupBy::Country,
            reducer: Reducer::Mean(NumericColumn::Votes),
        };

        let result = AggregationResult::compute(&refs, &agg);
        assert_eq!(result.groups[0].value, MetricValue::Mean(11.0));
        assert_eq!(result.groups[1].value, MetricValue::Mean(7.0));
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let agg = Aggregation {
            group_by: GroupBy::Country,
            reducer: Reducer::Mean(NumericColumn::AverageCostForTwo),
        };

        let result = AggregationResult::compute(&[], &agg);
        assert!(result.groups.is_empty());
        assert_eq!(result.total_rows, 0);
    }

    #[test]
    fn test_label_prefers_city() {
        assert_eq!(key("Brazil", Some("Rio")).label(), "Rio");
        assert_eq!(key("Brazil", None).label(), "Brazil");
    }
}
