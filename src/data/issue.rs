use thiserror::Error;

use super::model::Column;

/// Why a chart has nothing to show. Every variant is recoverable: the UI
/// renders the message inline and skips the chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIssue {
    /// The column is absent from the source, or every value in the subset is missing.
    #[error("No valid data available for {}.", .column.label())]
    MissingColumn { column: Column },

    /// The active filter combination matched no rows.
    #[error("No data available for {context}.")]
    EmptySubset { context: String },
}

impl DataIssue {
    pub fn missing(column: Column) -> Self {
        DataIssue::MissingColumn { column }
    }

    pub fn empty(context: impl Into<String>) -> Self {
        DataIssue::EmptySubset {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            DataIssue::missing(Column::StressLevel).to_string(),
            "No valid data available for Stress Level."
        );
        assert_eq!(
            DataIssue::empty("the selected industry (IT)").to_string(),
            "No data available for the selected industry (IT)."
        );
    }
}
