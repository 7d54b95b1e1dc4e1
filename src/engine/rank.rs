//! Ordering and truncation of aggregated groups.

use crate::engine::aggregate::Aggregate;
use std::cmp::Ordering;

/// How many ranked groups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    All,
    Top(usize),
}

/// Ranking order: value descending, then city ascending.
///
/// Groups tied on both keep their enumeration order, so the caller must
/// enumerate deterministically.
pub fn compare(a: &Aggregate, b: &Aggregate) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then_with(|| a.key.city.cmp(&b.key.city))
}

/// Sort `groups` by [`compare`] (stable) and apply `limit`.
///
/// Asking for more groups than exist returns all of them.
pub fn rank(mut groups: Vec<Aggregate>, limit: Limit) -> Vec<Aggregate> {
    groups.sort_by(compare);

    if let Limit::Top(n) = limit {
        groups.truncate(n);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::{GroupKey, MetricValue};

    fn group(country: &str, city: Option<&str>, value: MetricValue) -> Aggregate {
        Aggregate {
            key: GroupKey {
                country: country.into(),
                city: city.map(Into::into),
            },
            value,
        }
    }

    fn cities(groups: &[Aggregate]) -> Vec<&str> {
        groups.iter().map(|g| g.key.label()).collect()
    }

    #[test]
    fn test_rank_by_value_then_city() {
        let groups = vec![
            group("Brazil", Some("São Paulo"), MetricValue::Count(1)),
            group("Brazil", Some("Rio"), MetricValue::Count(1)),
            group("India", Some("Goa"), MetricValue::Count(5)),
            group("Qatar", Some("Doha"), MetricValue::Count(2)),
        ];

        let ranked = rank(groups, Limit::All);
        assert_eq!(cities(&ranked), vec!["Goa", "Doha", "Rio", "São Paulo"]);
    }

    #[test]
    fn test_full_tie_keeps_enumeration_order() {
        let groups = vec![
            group("Canada", Some("London"), MetricValue::Count(3)),
            group("England", Some("London"), MetricValue::Count(3)),
        ];

        let ranked = rank(groups, Limit::All);
        assert_eq!(ranked[0].key.country, "Canada");
        assert_eq!(ranked[1].key.country, "England");
    }

    #[test]
    fn test_truncate_to_top_n() {
        let groups = (0..12)
            .map(|i| group("X", Some(format!("c{:02}", i).as_str()), MetricValue::Count(i)))
            .collect();

        let ranked = rank(groups, Limit::Top(10));
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].value, MetricValue::Count(11));
        assert_eq!(ranked[9].value, MetricValue::Count(2));
    }

    #[test]
    fn test_top_n_with_fewer_groups() {
        let groups = vec![
            group("A", None, MetricValue::Count(1)),
            group("B", None, MetricValue::Count(2)),
        ];

        let ranked = rank(groups, Limit::Top(7));
        assert_eq!(ranked.len(), 2);
        assert!(rank(Vec::new(), Limit::Top(7)).is_empty());
    }

    #[test]
    fn test_means_rank_descending() {
        let groups = vec![
            group("A", None, MetricValue::Mean(1.5)),
            group("B", None, MetricValue::Mean(10.25)),
            group("C", None, MetricValue::Mean(3.0)),
        ];

        let ranked = rank(groups, Limit::All);
        assert_eq!(cities(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_adjacent_entries_are_ordered() {
        let groups = vec![
            group("A", Some("b"), MetricValue::Count(2)),
            group("A", Some("a"), MetricValue::Count(2)),
            group("B", Some("z"), MetricValue::Count(9)),
            group("B", Some("c"), MetricValue::Count(1)),
            group("C", Some("a"), MetricValue::Count(2)),
        ];

        let ranked = rank(groups, Limit::All);
        for pair in ranked.windows(2) {
            let ord = pair[0].value.total_cmp(&pair[1].value);
            assert!(
                ord == Ordering::Greater
                    || (ord == Ordering::Equal && pair[0].key.city <= pair[1].key.city)
            );
        }
    }
}
