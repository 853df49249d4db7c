use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, SurveyDataset, SurveyRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.txt` – delimited text with a header row
/// * `.json`    – `[{ "Region": "Europe", "Age": 32, ... }, ...]`
/// * `.parquet` – flat table as written by `df.to_parquet()`
///
/// Columns are located by header name. Unknown columns are ignored and
/// absent ones are recorded on the dataset instead of failing the load.
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!(
        "Loaded {} survey rows from {}",
        dataset.len(),
        path.display()
    );
    let missing = dataset.missing_columns();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|c| c.header()).collect();
        log::warn!("Source has no column(s): {}", names.join(", "));
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_delimited(file, delimiter)
}

/// Parse a delimited table from any reader. The first row is the header.
pub fn read_delimited<R: Read>(source: R, delimiter: u8) -> Result<SurveyDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let mapping: Vec<(usize, Column)> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| Column::from_header(name).map(|col| (idx, col)))
        .collect();
    let columns: BTreeSet<Column> = mapping.iter().map(|(_, col)| *col).collect();

    let mut records = Vec::new();
    let mut unparseable = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut record = SurveyRecord::default();
        for &(idx, col) in &mapping {
            let raw = row.get(idx).unwrap_or("");
            if !record.set_raw(col, raw) {
                log::debug!("Row {row_no}: '{raw}' in {col} is not numeric, treated as missing");
                unparseable += 1;
            }
        }
        records.push(record);
    }

    if unparseable > 0 {
        log::debug!("{unparseable} numeric cell(s) could not be parsed");
    }
    Ok(SurveyDataset::new(records, columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Region": "Europe", "Job_Role": "Designer", "Age": 32, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<SurveyDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut columns = BTreeSet::new();

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = SurveyRecord::default();
        for (key, val) in obj {
            let Some(col) = Column::from_header(key) else {
                continue;
            };
            columns.insert(col);
            match val {
                JsonValue::Null => {}
                JsonValue::Number(n) => record.set_number(col, n.as_f64()),
                JsonValue::String(s) => {
                    if !record.set_raw(col, s) {
                        log::debug!("Row {i}: '{s}' in {col} is not numeric, treated as missing");
                    }
                }
                other => {
                    record.set_raw(col, &other.to_string());
                }
            }
        }
        records.push(record);
    }

    Ok(SurveyDataset::new(records, columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. String columns go through the same coercion
/// as CSV cells; integer and float columns are taken as numbers.
fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let mapping: Vec<(usize, Column)> = builder
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter_map(|(idx, field)| Column::from_header(field.name()).map(|col| (idx, col)))
        .collect();
    let columns: BTreeSet<Column> = mapping.iter().map(|(_, col)| *col).collect();

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let mut record = SurveyRecord::default();
            for &(idx, col) in &mapping {
                store_arrow_cell(&mut record, col, batch.column(idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{col}'"))?;
            }
            records.push(record);
        }
    }

    Ok(SurveyDataset::new(records, columns))
}

/// Copy one Arrow cell into the record.
fn store_arrow_cell(
    record: &mut SurveyRecord,
    col: Column,
    array: &ArrayRef,
    row: usize,
) -> Result<()> {
    if array.is_null(row) {
        return Ok(());
    }
    match array.data_type() {
        DataType::Utf8 => {
            record.set_raw(col, array.as_string::<i32>().value(row));
        }
        DataType::LargeUtf8 => {
            record.set_raw(col, array.as_string::<i64>().value(row));
        }
        DataType::Int32 => {
            let v = array.as_primitive::<Int32Type>().value(row);
            record.set_number(col, Some(v as f64));
        }
        DataType::Int64 => {
            let v = array.as_primitive::<Int64Type>().value(row);
            record.set_number(col, Some(v as f64));
        }
        DataType::Float32 => {
            let v = array.as_primitive::<Float32Type>().value(row);
            record.set_number(col, Some(v as f64).filter(|v| !v.is_nan()));
        }
        DataType::Float64 => {
            let v = array.as_primitive::<Float64Type>().value(row);
            record.set_number(col, Some(v).filter(|v| !v.is_nan()));
        }
        _ => {
            let text = array_value_to_string(array.as_ref(), row)?;
            record.set_raw(col, &text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
Employee_ID,Age,Gender,Job_Role,Industry,Work_Location,Hours_Worked_Per_Week,Stress_Level,Productivity_Change,Satisfaction_with_Remote_Work,Region
EMP0001,32,Female,Engineer,IT,Remote,40,High,Increase,Satisfied,Europe
EMP0002,thirty,Male,Engineer,IT,Hybrid,45,Low,Decrease,Neutral,Asia
EMP0003,41,,Designer,,Onsite,,Medium,No Change,Unsatisfied,Europe
";

    #[test]
    fn reads_csv_rows_in_order() {
        let ds = read_delimited(SAMPLE.as_bytes(), b',').unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].region.as_deref(), Some("Europe"));
        assert_eq!(ds.records[1].region.as_deref(), Some("Asia"));
        assert_eq!(ds.records[2].job_role.as_deref(), Some("Designer"));
        assert_eq!(ds.columns.len(), 10);
    }

    #[test]
    fn unparseable_age_becomes_missing() {
        let ds = read_delimited(SAMPLE.as_bytes(), b',').unwrap();
        assert_eq!(ds.records[0].age, Some(32.0));
        assert_eq!(ds.records[1].age, None);
        assert_eq!(ds.records[1].hours_worked_per_week, Some(45.0));
    }

    #[test]
    fn empty_cells_are_missing() {
        let ds = read_delimited(SAMPLE.as_bytes(), b',').unwrap();
        let rec = &ds.records[2];
        assert_eq!(rec.gender, None);
        assert_eq!(rec.industry, None);
        assert_eq!(rec.hours_worked_per_week, None);
    }

    #[test]
    fn absent_columns_are_tolerated() {
        let text = "Region,Stress_Level\nEurope,High\n";
        let ds = read_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.len(), 1);
        assert!(ds.has_column(Column::StressLevel));
        assert!(!ds.has_column(Column::Age));
        assert_eq!(ds.records[0].age, None);
    }

    #[test]
    fn short_rows_leave_trailing_cells_missing() {
        let text = "Region,Job_Role,Gender\nEurope,Engineer\n";
        let ds = read_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.records[0].job_role.as_deref(), Some("Engineer"));
        assert_eq!(ds.records[0].gender, None);
    }

    #[test]
    fn json_records_are_accepted() {
        let text = r#"[
            {"Region": "Europe", "Age": 30, "Hours_Worked_Per_Week": "41", "Gender": null},
            {"Region": "Asia", "Age": "thirty"}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].age, Some(30.0));
        assert_eq!(ds.records[0].hours_worked_per_week, Some(41.0));
        assert_eq!(ds.records[0].gender, None);
        assert_eq!(ds.records[1].age, None);
        assert!(ds.has_column(Column::Gender));
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"Region": "Europe"}"#).is_err());
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(file, "Region\tIndustry\nEurope\tFinance\n").unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].industry.as_deref(), Some("Finance"));

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(load_file(other.path()).is_err());
    }
}
