use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One generated respondent, serialized with the survey's header names.
#[derive(Serialize)]
struct SurveyRow<'a> {
    #[serde(rename = "Employee_ID")]
    employee_id: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Gender")]
    gender: &'a str,
    #[serde(rename = "Job_Role")]
    job_role: &'a str,
    #[serde(rename = "Industry")]
    industry: &'a str,
    #[serde(rename = "Work_Location")]
    work_location: &'a str,
    #[serde(rename = "Hours_Worked_Per_Week")]
    hours_worked_per_week: String,
    #[serde(rename = "Stress_Level")]
    stress_level: &'a str,
    #[serde(rename = "Productivity_Change")]
    productivity_change: &'a str,
    #[serde(rename = "Satisfaction_with_Remote_Work")]
    satisfaction_with_remote_work: &'a str,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Sleep_Quality")]
    sleep_quality: &'a str,
}

const GENDERS: &[&str] = &["Female", "Male", "Non-binary", "Prefer not to say"];
const JOB_ROLES: &[&str] = &[
    "Data Scientist",
    "Designer",
    "HR",
    "Marketing",
    "Project Manager",
    "Sales",
    "Software Engineer",
];
const INDUSTRIES: &[&str] = &[
    "Consulting",
    "Education",
    "Finance",
    "Healthcare",
    "IT",
    "Manufacturing",
    "Retail",
];
const LOCATIONS: &[&str] = &["Hybrid", "Onsite", "Remote"];
const STRESS: &[&str] = &["High", "Low", "Medium"];
const PRODUCTIVITY: &[&str] = &["Decrease", "Increase", "No Change"];
const SATISFACTION: &[&str] = &["Neutral", "Satisfied", "Unsatisfied"];
const REGIONS: &[&str] = &[
    "Africa",
    "Asia",
    "Europe",
    "North America",
    "Oceania",
    "South America",
];
const SLEEP: &[&str] = &["Average", "Good", "Poor"];

/// SplitMix64 stream: one add and two multiply-xorshift rounds per draw.
/// Same seed, same file.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.range(0, options.len() as u64 - 1) as usize]
    }

    /// `true` roughly once every `n` draws.
    fn one_in(&mut self, n: u64) -> bool {
        self.next() % n == 0
    }
}

/// Usage: `generate_sample [OUTPUT.csv] [ROWS]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data/Impact_of_Remote_Work_on_Mental_Health.csv".to_string()),
    );
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 5000,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = Rng(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for i in 0..rows {
        let age = rng.range(22, 60);
        let hours = rng.range(20, 60);

        // Sprinkle in the kinds of dirt the dashboard must tolerate.
        let age_cell = if rng.one_in(200) {
            "unknown".to_string()
        } else {
            age.to_string()
        };
        let hours_cell = if rng.one_in(200) {
            String::new()
        } else {
            hours.to_string()
        };
        let gender = if rng.one_in(100) { "" } else { rng.pick(GENDERS) };

        let row = SurveyRow {
            employee_id: format!("EMP{:04}", i + 1),
            age: age_cell,
            gender,
            job_role: rng.pick(JOB_ROLES),
            industry: rng.pick(INDUSTRIES),
            work_location: rng.pick(LOCATIONS),
            hours_worked_per_week: hours_cell,
            stress_level: rng.pick(STRESS),
            productivity_change: rng.pick(PRODUCTIVITY),
            satisfaction_with_remote_work: rng.pick(SATISFACTION),
            region: rng.pick(REGIONS),
            sleep_quality: rng.pick(SLEEP),
        };
        writer.serialize(&row)?;
    }
    writer.flush()?;

    println!("Wrote {rows} survey rows to {}", output_path.display());
    Ok(())
}
