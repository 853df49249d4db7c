use std::collections::HashSet;

use super::issue::DataIssue;
use super::model::{Column, SurveyDataset, SurveyRecord, coerce_numeric};

// ---------------------------------------------------------------------------
// FilterSpec: ordered equality constraints
// ---------------------------------------------------------------------------

/// Ordered list of `column == value` constraints, applied conjunctively.
/// An empty spec keeps every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    constraints: Vec<(Column, String)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint (builder style).
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.constraints.push((column, value.into()));
        self
    }

    /// A row passes when every constrained cell is present and equal.
    /// Missing cells never match.
    pub fn matches(&self, record: &SurveyRecord) -> bool {
        self.constraints
            .iter()
            .all(|(col, value)| cell_equals(record, *col, value))
    }

    /// Rows of `dataset` passing all constraints, in dataset order.
    pub fn apply<'a>(&self, dataset: &'a SurveyDataset) -> Subset<'a> {
        let indices = dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| self.matches(rec))
            .map(|(i, _)| i)
            .collect();
        Subset { dataset, indices }
    }
}

fn cell_equals(record: &SurveyRecord, column: Column, value: &str) -> bool {
    if column.is_numeric() {
        match (record.number(column), coerce_numeric(value)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    } else {
        record.category(column) == Some(value)
    }
}

// ---------------------------------------------------------------------------
// Subset: a filtered view over the dataset
// ---------------------------------------------------------------------------

/// Indices into a dataset, always ascending. Borrowing keeps the dataset
/// read-only for as long as any subset is alive.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a SurveyDataset,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    /// The whole dataset.
    pub fn all(dataset: &'a SurveyDataset) -> Self {
        Subset {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// No rows at all, e.g. when a select box has nothing to offer.
    pub fn none(dataset: &'a SurveyDataset) -> Self {
        Subset {
            dataset,
            indices: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &'a SurveyDataset {
        self.dataset
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a SurveyRecord> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Narrow this subset by one more equality constraint.
    pub fn restrict(&self, column: Column, value: &str) -> Subset<'a> {
        self.refine(&FilterSpec::new().with(column, value))
    }

    /// Narrow this subset by every constraint of `spec`.
    pub fn refine(&self, spec: &FilterSpec) -> Subset<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| spec.matches(&self.dataset.records[i]))
            .collect();
        Subset {
            dataset: self.dataset,
            indices,
        }
    }

    /// Distinct non-missing values of `column`, in first-seen order.
    /// Used to populate select boxes.
    pub fn distinct(&self, column: Column) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for rec in self.records() {
            let value = if column.is_numeric() {
                rec.number(column).map(|n| n.to_string())
            } else {
                rec.category(column).map(str::to_string)
            };
            if let Some(v) = value {
                if seen.insert(v.clone()) {
                    values.push(v);
                }
            }
        }
        values
    }

    /// Check that `column` can feed a chart: present in the source, the
    /// subset has rows, and not every value in it is missing.
    pub fn require(&self, column: Column) -> Result<(), DataIssue> {
        if !self.dataset.has_column(column) {
            return Err(DataIssue::missing(column));
        }
        if self.is_empty() {
            return Err(DataIssue::empty("the current selection"));
        }
        if self.records().all(|r| r.is_missing(column)) {
            return Err(DataIssue::missing(column));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SurveyRecord;

    fn rec(region: &str, role: &str, location: &str) -> SurveyRecord {
        SurveyRecord {
            region: Some(region.to_string()),
            job_role: Some(role.to_string()),
            work_location: Some(location.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> SurveyDataset {
        let records = vec![
            rec("Europe", "Engineer", "Remote"),
            rec("Asia", "Engineer", "Hybrid"),
            rec("Europe", "Designer", "Onsite"),
            SurveyRecord::default(),
            rec("Europe", "Engineer", "Hybrid"),
        ];
        SurveyDataset::new(
            records,
            [Column::Region, Column::JobRole, Column::WorkLocation].into(),
        )
    }

    #[test]
    fn apply_keeps_dataset_order() {
        let ds = sample();
        let subset = FilterSpec::new().with(Column::Region, "Europe").apply(&ds);
        assert_eq!(subset.indices(), &[0, 2, 4]);
        assert!(subset.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn constraints_are_conjunctive() {
        let ds = sample();
        let spec = FilterSpec::new()
            .with(Column::Region, "Europe")
            .with(Column::JobRole, "Engineer")
            .with(Column::WorkLocation, "Hybrid");
        assert_eq!(spec.apply(&ds).indices(), &[4]);
    }

    #[test]
    fn chained_restrict_matches_single_spec() {
        let ds = sample();
        let chained = Subset::all(&ds)
            .restrict(Column::Region, "Europe")
            .restrict(Column::JobRole, "Engineer");
        let direct = FilterSpec::new()
            .with(Column::Region, "Europe")
            .with(Column::JobRole, "Engineer")
            .apply(&ds);
        assert_eq!(chained.indices(), direct.indices());
    }

    #[test]
    fn unknown_value_gives_empty_subset() {
        let ds = sample();
        let subset = FilterSpec::new().with(Column::Region, "Antarctica").apply(&ds);
        assert!(subset.is_empty());
        assert_eq!(
            subset.require(Column::JobRole),
            Err(DataIssue::empty("the current selection"))
        );
    }

    #[test]
    fn filtering_on_absent_column_gives_empty_subset() {
        let ds = sample();
        let subset = FilterSpec::new().with(Column::Industry, "IT").apply(&ds);
        assert!(subset.is_empty());
    }

    #[test]
    fn empty_spec_keeps_everything() {
        let ds = sample();
        assert_eq!(FilterSpec::new().apply(&ds).len(), ds.len());
    }

    #[test]
    fn distinct_drops_missing_and_keeps_first_seen_order() {
        let ds = sample();
        let regions = Subset::all(&ds).distinct(Column::Region);
        assert_eq!(regions, vec!["Europe".to_string(), "Asia".to_string()]);
        let locations = Subset::all(&ds).distinct(Column::WorkLocation);
        assert_eq!(locations, vec!["Remote", "Hybrid", "Onsite"]);
    }

    #[test]
    fn require_flags_absent_and_all_missing_columns() {
        let ds = sample();
        let all = Subset::all(&ds);
        assert!(all.require(Column::Region).is_ok());
        assert_eq!(all.require(Column::Industry), Err(DataIssue::missing(Column::Industry)));

        let blank_row = FilterSpec::new().apply(&ds).refine(&FilterSpec::new());
        assert!(blank_row.require(Column::JobRole).is_ok());

        let only_blank = Subset {
            dataset: &ds,
            indices: vec![3],
        };
        assert_eq!(
            only_blank.require(Column::JobRole),
            Err(DataIssue::missing(Column::JobRole))
        );

        let nothing = Subset::none(&ds);
        assert_eq!(
            nothing.require(Column::Industry),
            Err(DataIssue::missing(Column::Industry))
        );
    }
}
