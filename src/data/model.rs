use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the survey attributes the dashboard knows about
// ---------------------------------------------------------------------------

/// A survey column, identified in source files by its header name.
/// `Ord` so columns can live in a `BTreeSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Region,
    JobRole,
    Gender,
    Age,
    HoursWorkedPerWeek,
    WorkLocation,
    Industry,
    ProductivityChange,
    StressLevel,
    SatisfactionWithRemoteWork,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Region,
        Column::JobRole,
        Column::Gender,
        Column::Age,
        Column::HoursWorkedPerWeek,
        Column::WorkLocation,
        Column::Industry,
        Column::ProductivityChange,
        Column::StressLevel,
        Column::SatisfactionWithRemoteWork,
    ];

    /// Header name as it appears in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Region => "Region",
            Column::JobRole => "Job_Role",
            Column::Gender => "Gender",
            Column::Age => "Age",
            Column::HoursWorkedPerWeek => "Hours_Worked_Per_Week",
            Column::WorkLocation => "Work_Location",
            Column::Industry => "Industry",
            Column::ProductivityChange => "Productivity_Change",
            Column::StressLevel => "Stress_Level",
            Column::SatisfactionWithRemoteWork => "Satisfaction_with_Remote_Work",
        }
    }

    /// Human-readable axis / legend label.
    pub fn label(self) -> &'static str {
        match self {
            Column::Region => "Region",
            Column::JobRole => "Job Role",
            Column::Gender => "Gender",
            Column::Age => "Age",
            Column::HoursWorkedPerWeek => "Hours Worked Per Week",
            Column::WorkLocation => "Work Location",
            Column::Industry => "Industry",
            Column::ProductivityChange => "Productivity Change",
            Column::StressLevel => "Stress Level",
            Column::SatisfactionWithRemoteWork => "Satisfaction Level",
        }
    }

    pub fn from_header(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == name.trim())
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Age | Column::HoursWorkedPerWeek)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Tokens read as a missing value, matching what Pandas' `read_csv` treats as NA.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Exact match only: `" NA "` is a value, as it is for Pandas.
pub fn is_na_token(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

/// Normalise a raw categorical cell: NA tokens become `None`. Text is kept
/// verbatim, surrounding whitespace included.
pub fn coerce_category(raw: &str) -> Option<String> {
    if is_na_token(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Coerce a raw cell to a number. Surrounding whitespace is ignored;
/// anything that does not parse is missing.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if is_na_token(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// SurveyRecord – one respondent (one row of the source table)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyRecord {
    pub region: Option<String>,
    pub job_role: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f64>,
    pub hours_worked_per_week: Option<f64>,
    pub work_location: Option<String>,
    pub industry: Option<String>,
    pub productivity_change: Option<String>,
    pub stress_level: Option<String>,
    pub satisfaction_with_remote_work: Option<String>,
}

impl SurveyRecord {
    /// Categorical value of `column`. Always `None` for numeric columns.
    pub fn category(&self, column: Column) -> Option<&str> {
        let cell = match column {
            Column::Region => &self.region,
            Column::JobRole => &self.job_role,
            Column::Gender => &self.gender,
            Column::WorkLocation => &self.work_location,
            Column::Industry => &self.industry,
            Column::ProductivityChange => &self.productivity_change,
            Column::StressLevel => &self.stress_level,
            Column::SatisfactionWithRemoteWork => &self.satisfaction_with_remote_work,
            Column::Age | Column::HoursWorkedPerWeek => return None,
        };
        cell.as_deref()
    }

    /// Numeric value of `column`. Always `None` for categorical columns.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Age => self.age,
            Column::HoursWorkedPerWeek => self.hours_worked_per_week,
            _ => None,
        }
    }

    pub fn is_missing(&self, column: Column) -> bool {
        if column.is_numeric() {
            self.number(column).is_none()
        } else {
            self.category(column).is_none()
        }
    }

    /// Store a raw text cell, coercing numeric columns.
    /// Returns `false` when a non-empty numeric cell failed to parse.
    pub fn set_raw(&mut self, column: Column, raw: &str) -> bool {
        if column.is_numeric() {
            let value = coerce_numeric(raw);
            self.set_number(column, value);
            value.is_some() || is_na_token(raw.trim())
        } else {
            self.set_category(column, coerce_category(raw));
            true
        }
    }

    pub fn set_number(&mut self, column: Column, value: Option<f64>) {
        match column {
            Column::Age => self.age = value,
            Column::HoursWorkedPerWeek => self.hours_worked_per_week = value,
            other => self.set_category(other, value.map(|v| v.to_string())),
        }
    }

    pub fn set_category(&mut self, column: Column, value: Option<String>) {
        let cell = match column {
            Column::Region => &mut self.region,
            Column::JobRole => &mut self.job_role,
            Column::Gender => &mut self.gender,
            Column::WorkLocation => &mut self.work_location,
            Column::Industry => &mut self.industry,
            Column::ProductivityChange => &mut self.productivity_change,
            Column::StressLevel => &mut self.stress_level,
            Column::SatisfactionWithRemoteWork => &mut self.satisfaction_with_remote_work,
            numeric => {
                let parsed = value.as_deref().and_then(coerce_numeric);
                self.set_number(numeric, parsed);
                return;
            }
        };
        *cell = value;
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once by the loader and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// All respondents, in file order.
    pub records: Vec<SurveyRecord>,
    /// Columns present in the source header.
    pub columns: BTreeSet<Column>,
}

impl SurveyDataset {
    pub fn new(records: Vec<SurveyRecord>, columns: BTreeSet<Column>) -> Self {
        SurveyDataset { records, columns }
    }

    /// Whether the source file carried `column` at all.
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Columns the dashboard knows about that the source lacks.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.columns.contains(c))
            .collect()
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_treats_words_as_missing() {
        assert_eq!(coerce_numeric("thirty"), None);
        assert_eq!(coerce_numeric(" 42 "), Some(42.0));
        assert_eq!(coerce_numeric("37.5"), Some(37.5));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("NaN"), None);
    }

    #[test]
    fn na_tokens_are_missing_categories() {
        assert_eq!(coerce_category("N/A"), None);
        assert_eq!(coerce_category(""), None);
    }

    #[test]
    fn category_whitespace_is_kept_verbatim() {
        assert_eq!(coerce_category("  "), Some("  ".to_string()));
        assert_eq!(coerce_category(" NA "), Some(" NA ".to_string()));
        assert_eq!(coerce_category(" Europe "), Some(" Europe ".to_string()));
        assert!(!is_na_token(" null"));

        let mut rec = SurveyRecord::default();
        rec.set_raw(Column::Region, "Europe ");
        assert_eq!(rec.category(Column::Region), Some("Europe "));
        assert!(rec.set_raw(Column::Age, "  "));
        assert_eq!(rec.age, None);
    }

    #[test]
    fn set_raw_reports_unparseable_numbers() {
        let mut rec = SurveyRecord::default();
        assert!(!rec.set_raw(Column::Age, "thirty"));
        assert_eq!(rec.age, None);
        assert!(rec.set_raw(Column::Age, ""));
        assert!(rec.set_raw(Column::HoursWorkedPerWeek, "40"));
        assert_eq!(rec.number(Column::HoursWorkedPerWeek), Some(40.0));
        assert!(rec.set_raw(Column::StressLevel, "High"));
        assert_eq!(rec.category(Column::StressLevel), Some("High"));
    }

    #[test]
    fn header_lookup_round_trips_every_column() {
        for col in Column::ALL {
            assert_eq!(Column::from_header(col.header()), Some(col));
        }
        assert_eq!(Column::from_header("Employee_ID"), None);
    }

    #[test]
    fn missing_columns_lists_absent_headers() {
        let ds = SurveyDataset::new(Vec::new(), [Column::Region, Column::Age].into());
        assert!(ds.has_column(Column::Region));
        assert!(!ds.has_column(Column::Industry));
        assert_eq!(ds.missing_columns().len(), 8);
    }
}
