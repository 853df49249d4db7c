use std::collections::BTreeMap;

use super::filter::Subset;
use super::model::Column;

// ---------------------------------------------------------------------------
// Single-column counts
// ---------------------------------------------------------------------------

/// One bar / slice: a category, its row count and its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// `count / total * 100`, rounded to one decimal. `None` when the total is 0.
    pub percentage: Option<f64>,
}

/// Group counts of one categorical column, sorted by category.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: Column,
    pub rows: Vec<CategoryCount>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.category.as_str())
    }

    /// Sum of the rounded percentages. Each group is rounded on its own, so
    /// this may be off 100 by up to 0.05 per group.
    pub fn percentage_sum(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.percentage).sum()
    }
}

/// Round to one decimal place, ties to even (as Pandas' `round(1)` does).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Count rows per distinct value of `column`, skipping missing cells.
pub fn count_by(subset: &Subset<'_>, column: Column) -> Distribution {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in subset.records() {
        if let Some(value) = rec.category(column) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    let rows = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
            percentage: (total > 0).then(|| round1(count as f64 / total as f64 * 100.0)),
        })
        .collect();

    Distribution { column, rows }
}

// ---------------------------------------------------------------------------
// Two-column counts
// ---------------------------------------------------------------------------

/// Row count for one `(first, second)` pair, e.g. (Job Role, Gender).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCount {
    pub first: String,
    pub second: String,
    pub count: usize,
}

/// Count rows per `(first, second)` pair. Rows missing either cell are
/// dropped. No percentages; ordered by `first` then `second`.
pub fn count_by_pair(subset: &Subset<'_>, first: Column, second: Column) -> Vec<PairCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for rec in subset.records() {
        if let (Some(a), Some(b)) = (rec.category(first), rec.category(second)) {
            *counts.entry((a, b)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((a, b), count)| PairCount {
            first: a.to_string(),
            second: b.to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Numeric means
// ---------------------------------------------------------------------------

/// Mean of a numeric column for one distinct key value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: f64,
    pub mean: f64,
    pub rows: usize,
}

/// Mean of `value` per distinct `key`, ascending by key. Rows where either
/// number is missing (absent or unparseable) are dropped.
pub fn mean_by(subset: &Subset<'_>, key: Column, value: Column) -> Vec<GroupMean> {
    let mut pairs: Vec<(f64, f64)> = subset
        .records()
        .filter_map(|rec| Some((rec.number(key)?, rec.number(value)?)))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out: Vec<GroupMean> = Vec::new();
    let mut sum = 0.0;
    for (k, v) in pairs {
        if let Some(last) = out.last_mut().filter(|last| last.key == k) {
            last.rows += 1;
            sum += v;
            last.mean = sum / last.rows as f64;
            continue;
        }
        sum = v;
        out.push(GroupMean {
            key: k,
            mean: v,
            rows: 1,
        });
    }
    out
}

/// Average weekly hours per age.
pub fn mean_hours_by_age(subset: &Subset<'_>) -> Vec<GroupMean> {
    mean_by(subset, Column::Age, Column::HoursWorkedPerWeek)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterSpec;
    use crate::data::model::{SurveyDataset, SurveyRecord};

    fn dataset(records: Vec<SurveyRecord>) -> SurveyDataset {
        SurveyDataset::new(records, Column::ALL.into_iter().collect())
    }

    fn stress(level: &str) -> SurveyRecord {
        SurveyRecord {
            stress_level: Some(level.to_string()),
            ..Default::default()
        }
    }

    fn role_gender(role: &str, gender: Option<&str>) -> SurveyRecord {
        SurveyRecord {
            job_role: Some(role.to_string()),
            gender: gender.map(str::to_string),
            ..Default::default()
        }
    }

    fn counted(category: &str, count: usize, percentage: f64) -> CategoryCount {
        CategoryCount {
            category: category.to_string(),
            count,
            percentage: Some(percentage),
        }
    }

    fn pair(first: &str, second: &str, count: usize) -> PairCount {
        PairCount {
            first: first.to_string(),
            second: second.to_string(),
            count,
        }
    }

    fn mean(key: f64, mean: f64, rows: usize) -> GroupMean {
        GroupMean { key, mean, rows }
    }

    fn age_hours(age: Option<f64>, hours: Option<f64>) -> SurveyRecord {
        SurveyRecord {
            age,
            hours_worked_per_week: hours,
            ..Default::default()
        }
    }

    #[test]
    fn stress_levels_count_and_percentages() {
        let ds = dataset(vec![
            stress("High"),
            stress("High"),
            stress("Low"),
            stress("Medium"),
        ]);
        let dist = count_by(&Subset::all(&ds), Column::StressLevel);

        let expected = vec![
            counted("High", 2, 50.0),
            counted("Low", 1, 25.0),
            counted("Medium", 1, 25.0),
        ];
        assert_eq!(dist.rows, expected);
        assert_eq!(dist.total(), 4);
    }

    #[test]
    fn missing_categories_are_dropped_before_percentages() {
        let mut records = vec![stress("High"), stress("Low")];
        records.push(SurveyRecord::default());
        let ds = dataset(records);
        let dist = count_by(&Subset::all(&ds), Column::StressLevel);
        assert_eq!(dist.total(), 2);
        assert_eq!(dist.rows[0].percentage, Some(50.0));
    }

    #[test]
    fn percentages_are_rounded_independently() {
        let ds = dataset(vec![stress("A"), stress("B"), stress("C")]);
        let dist = count_by(&Subset::all(&ds), Column::StressLevel);
        assert!(dist.rows.iter().all(|r| r.percentage == Some(33.3)));
        assert!((dist.percentage_sum() - 100.0).abs() <= 0.1);
    }

    #[test]
    fn percentage_sum_stays_within_rounding_tolerance() {
        let levels = ["A", "B", "B", "C", "C", "C", "D", "E", "E", "F", "G"];
        let ds = dataset(levels.iter().map(|l| stress(l)).collect());
        let dist = count_by(&Subset::all(&ds), Column::StressLevel);
        let tolerance = 0.05 * dist.rows.len() as f64 + 1e-9;
        assert!((dist.percentage_sum() - 100.0).abs() <= tolerance);
    }

    #[test]
    fn empty_subset_gives_empty_distribution() {
        let ds = dataset(vec![stress("High")]);
        let subset = FilterSpec::new().with(Column::Region, "Nowhere").apply(&ds);
        let dist = count_by(&subset, Column::StressLevel);
        assert!(dist.is_empty());
        assert_eq!(dist.total(), 0);
        assert_eq!(dist.percentage_sum(), 0.0);
        assert!(count_by_pair(&subset, Column::JobRole, Column::Gender).is_empty());
        assert!(mean_hours_by_age(&subset).is_empty());
    }

    #[test]
    fn pair_counts_group_by_both_columns() {
        let ds = dataset(vec![
            role_gender("Engineer", Some("F")),
            role_gender("Engineer", Some("F")),
            role_gender("Engineer", Some("M")),
        ]);
        let pairs = count_by_pair(&Subset::all(&ds), Column::JobRole, Column::Gender);
        assert_eq!(pairs, vec![pair("Engineer", "F", 2), pair("Engineer", "M", 1)]);
    }

    #[test]
    fn pair_counts_skip_rows_missing_either_value() {
        let ds = dataset(vec![
            role_gender("Engineer", Some("F")),
            role_gender("Designer", None),
            SurveyRecord {
                gender: Some("M".into()),
                ..Default::default()
            },
        ]);
        let pairs = count_by_pair(&Subset::all(&ds), Column::JobRole, Column::Gender);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].count, 1);
    }

    #[test]
    fn mean_hours_grouped_and_sorted_by_age() {
        let ds = dataset(vec![
            age_hours(Some(40.0), Some(50.0)),
            age_hours(Some(25.0), Some(30.0)),
            age_hours(Some(40.0), Some(40.0)),
            age_hours(None, Some(99.0)),
            age_hours(Some(33.0), None),
        ]);
        let means = mean_hours_by_age(&Subset::all(&ds));
        assert_eq!(means, vec![mean(25.0, 30.0, 1), mean(40.0, 45.0, 2)]);
    }

    #[test]
    fn unparseable_age_is_not_counted() {
        let text = "Age,Hours_Worked_Per_Week\nthirty,60\n30,40\n30,50\n";
        let ds = crate::data::loader::read_delimited(text.as_bytes(), b',').unwrap();
        let means = mean_hours_by_age(&Subset::all(&ds));
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].key, 30.0);
        assert_eq!(means[0].rows, 2);
        assert_eq!(means[0].mean, 45.0);
    }

    #[test]
    fn round1_uses_ties_to_even() {
        assert_eq!(round1(12.25), 12.2);
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.666), 66.7);
    }
}
