//! Named dashboard reports.
//!
//! Each report is a fixed pipeline: filter by the country selection (and for
//! two of them a rating band), aggregate with a fixed key and reducer, then
//! rank and truncate. Reports are pure functions of (table, selection).

use crate::engine::{
    rank, Aggregation, AggregationResult, GroupBy, GroupKey, Limit, MetricValue, RatingBand,
    Reducer, RowFilter, Selection,
};
use crate::format::{thousands, two_decimals};
use crate::table::{NumericColumn, RecordTable, TextColumn};
use clap::ValueEnum;
use serde::Serialize;
use strsim::jaro_winkler;

const SIMILARITY_THRESHOLD: f64 = 0.8;

/// The dashboard questions, addressed by their kebab-case slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Number of restaurants per country
    CountriesRestaurants,
    /// Number of distinct cities per country
    CountriesCities,
    /// Mean votes per country
    CountriesMeanVotes,
    /// Mean cost for two per country
    CountriesAveragePlate,
    /// Top 10 cities by restaurant count
    TopCitiesRestaurants,
    /// Top 7 cities by restaurants rated 4 or more
    TopBestRestaurants,
    /// Top 7 cities by restaurants rated 2.5 or less
    TopWorstRestaurants,
    /// Top 10 cities by distinct cuisine strings
    MostCuisines,
}

/// Filter, aggregation and limit for one report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportPlan {
    pub band: Option<RatingBand>,
    pub aggregation: Aggregation,
    pub limit: Limit,
}

/// What the chart renderer needs besides the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::CountriesRestaurants,
        ReportKind::CountriesCities,
        ReportKind::CountriesMeanVotes,
        ReportKind::CountriesAveragePlate,
        ReportKind::TopCitiesRestaurants,
        ReportKind::TopBestRestaurants,
        ReportKind::TopWorstRestaurants,
        ReportKind::MostCuisines,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::CountriesRestaurants => "countries-restaurants",
            ReportKind::CountriesCities => "countries-cities",
            ReportKind::CountriesMeanVotes => "countries-mean-votes",
            ReportKind::CountriesAveragePlate => "countries-average-plate",
            ReportKind::TopCitiesRestaurants => "top-cities-restaurants",
            ReportKind::TopBestRestaurants => "top-best-restaurants",
            ReportKind::TopWorstRestaurants => "top-worst-restaurants",
            ReportKind::MostCuisines => "most-cuisines",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Closest known slug, for "did you mean" hints.
    pub fn suggest(slug: &str) -> Option<&'static str> {
        Self::ALL
            .iter()
            .map(|kind| kind.slug())
            .filter(|known| jaro_winkler(slug, known) >= SIMILARITY_THRESHOLD)
            .max_by(|a, b| {
                jaro_winkler(slug, a)
                    .partial_cmp(&jaro_winkler(slug, b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    pub fn plan(self) -> ReportPlan {
        let (band, group_by, reducer, limit) = match self {
            ReportKind::CountriesRestaurants => (None, GroupBy::Country, Reducer::Count, Limit::All),
            ReportKind::CountriesCities => (
                None,
                GroupBy::Country,
                Reducer::DistinctCount(TextColumn::City),
                Limit::All,
            ),
            ReportKind::CountriesMeanVotes => (
                None,
                GroupBy::Country,
                Reducer::Mean(NumericColumn::Votes),
                Limit::All,
            ),
            ReportKind::CountriesAveragePlate => (
                None,
                GroupBy::Country,
                Reducer::Mean(NumericColumn::AverageCostForTwo),
                Limit::All,
            ),
            ReportKind::TopCitiesRestaurants => {
                (None, GroupBy::CountryCity, Reducer::Count, Limit::Top(10))
            }
            ReportKind::TopBestRestaurants => (
                Some(RatingBand::BEST),
                GroupBy::CountryCity,
                Reducer::Count,
                Limit::Top(7),
            ),
            ReportKind::TopWorstRestaurants => (
                Some(RatingBand::WORST),
                GroupBy::CountryCity,
                Reducer::Count,
                Limit::Top(7),
            ),
            ReportKind::MostCuisines => (
                None,
                GroupBy::CountryCity,
                Reducer::DistinctCount(TextColumn::Cuisines),
                Limit::Top(10),
            ),
        };

        ReportPlan {
            band,
            aggregation: Aggregation { group_by, reducer },
            limit,
        }
    }

    pub fn chart(self) -> ChartSpec {
        let (title, x_label, y_label) = match self {
            ReportKind::CountriesRestaurants => (
                "Number of restaurants per country",
                "Country",
                "Number of restaurants",
            ),
            ReportKind::CountriesCities => {
                ("Number of cities per country", "Country", "Number of cities")
            }
            ReportKind::CountriesMeanVotes => ("Ratings per country", "Country", "Ratings"),
            ReportKind::CountriesAveragePlate => (
                "Average cost for two people per country",
                "Country",
                "Average cost for two people",
            ),
            ReportKind::TopCitiesRestaurants => (
                "Top 10 Cities with more restaurants",
                "City",
                "Number of restaurants",
            ),
            ReportKind::TopBestRestaurants => (
                "Top 7 Cities with Restaurants with an average rating above 4",
                "City",
                "Number of restaurants",
            ),
            ReportKind::TopWorstRestaurants => (
                "Top 7 Cities with Restaurants with an average rating below 2.5",
                "City",
                "Number of restaurants",
            ),
            ReportKind::MostCuisines => (
                "Top 10 Cities with more restaurants with different types of culinary",
                "City",
                "Types of culinary",
            ),
        };
        ChartSpec {
            title,
            x_label,
            y_label,
        }
    }

    /// Filter, aggregate and rank `table` for this report.
    pub fn run(self, table: &RecordTable, selection: &Selection) -> Report {
        let plan = self.plan();
        let rows = RowFilter::new(selection)
            .with_band(plan.band)
            .apply(table.rows());
        let result = AggregationResult::compute(&rows, &plan.aggregation);
        let groups = rank(result.groups, plan.limit);

        Report {
            kind: self,
            chart: self.chart(),
            entries: groups
                .into_iter()
                .map(|g| ReportEntry {
                    label: g.key.label().to_string(),
                    text: value_text(g.value),
                    key: g.key,
                    value: g.value,
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

fn value_text(value: MetricValue) -> String {
    match value {
        MetricValue::Count(n) => thousands(n),
        MetricValue::Mean(v) => two_decimals(v),
    }
}

/// A ranked view ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub chart: ChartSpec,
    pub entries: Vec<ReportEntry>,
}

/// One bar: group key, category label, raw value and its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub key: GroupKey,
    pub label: String,
    pub value: MetricValue,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{brazil_table, restaurant, selection};

    fn triples(report: &Report) -> Vec<(&str, &str, u64)> {
        report
            .entries
            .iter()
            .map(|e| {
                (
                    e.key.country.as_str(),
                    e.key.city.as_deref().unwrap_or(""),
                    e.value.as_count().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_restaurants_per_country() {
        let report = ReportKind::CountriesRestaurants.run(&brazil_table(), &selection(&["Brazil"]));

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].key.country, "Brazil");
        assert_eq!(report.entries[0].value, MetricValue::Count(3));
        assert_eq!(report.entries[0].label, "Brazil");
    }

    #[test]
    fn test_top_cities_by_restaurant_count() {
        let report = ReportKind::TopCitiesRestaurants.run(&brazil_table(), &selection(&["Brazil"]));

        assert_eq!(
            triples(&report),
            vec![("Brazil", "São Paulo", 2), ("Brazil", "Rio", 1)]
        );
    }

    #[test]
    fn test_best_rated_ties_break_on_city() {
        let report = ReportKind::TopBestRestaurants.run(&brazil_table(), &selection(&["Brazil"]));

        assert_eq!(
            triples(&report),
            vec![("Brazil", "Rio", 1), ("Brazil", "São Paulo", 1)]
        );
    }

    #[test]
    fn test_worst_rated_band() {
        let mut rows = brazil_table().rows().to_vec();
        rows.push(restaurant(4, "Brazil", "Rio", 2.5));
        rows.push(restaurant(5, "Brazil", "Rio", 1.0));
        rows.push(restaurant(6, "India", "Goa", 0.0));
        let table = RecordTable::from_rows(rows);

        let report = ReportKind::TopWorstRestaurants.run(&table, &selection(&["Brazil", "India"]));
        assert_eq!(
            triples(&report),
            vec![("Brazil", "Rio", 2), ("India", "Goa", 1)]
        );
    }

    #[test]
    fn test_empty_selection_yields_empty_reports() {
        let table = brazil_table();
        for kind in ReportKind::ALL {
            assert!(kind.run(&table, &Selection::new()).entries.is_empty());
        }
    }

    #[test]
    fn test_mean_cost_text_has_two_decimals() {
        let mut rows = vec![
            restaurant(1, "Qatar", "Doha", 4.0),
            restaurant(2, "Qatar", "Doha", 4.0),
            restaurant(3, "Canada", "Toronto", 4.0),
        ];
        rows[0].average_cost_for_two = 100.0;
        rows[1].average_cost_for_two = 151.0;
        rows[2].average_cost_for_two = 40.0;
        let table = RecordTable::from_rows(rows);

        let report =
            ReportKind::CountriesAveragePlate.run(&table, &selection(&["Qatar", "Canada"]));
        assert_eq!(report.entries[0].key.country, "Qatar");
        assert_eq!(report.entries[0].value, MetricValue::Mean(125.5));
        assert_eq!(report.entries[0].text, "125.50");
        assert_eq!(report.entries[1].text, "40.00");
    }

    #[test]
    fn test_most_cuisines_limit() {
        let rows: Vec<_> = (0..15)
            .map(|i| {
                let mut r = restaurant(i, "India", &format!("City {:02}", i), 3.0);
                r.cuisines = format!("Cuisine {}", i);
                r
            })
            .collect();
        let table = RecordTable::from_rows(rows);

        let report = ReportKind::MostCuisines.run(&table, &selection(&["India"]));
        assert_eq!(report.entries.len(), 10);
        assert_eq!(report.entries[0].label, "City 00");
        assert_eq!(report.entries[9].label, "City 09");
    }

    #[test]
    fn test_slugs_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ReportKind::from_slug("nope"), None);
    }

    #[test]
    fn test_suggest_slug() {
        assert_eq!(ReportKind::suggest("most-cuisine"), Some("most-cuisines"));
        assert_eq!(ReportKind::suggest("xyz"), None);
    }

    #[test]
    fn test_plan_limits() {
        assert_eq!(ReportKind::CountriesCities.plan().limit, Limit::All);
        assert_eq!(ReportKind::TopCitiesRestaurants.plan().limit, Limit::Top(10));
        assert_eq!(ReportKind::TopBestRestaurants.plan().limit, Limit::Top(7));
        assert_eq!(
            ReportKind::TopWorstRestaurants.plan().band,
            Some(RatingBand::AtMost(2.5))
        );
    }
}
