use crate::data::aggregate::{
    Distribution, GroupMean, PairCount, count_by, count_by_pair, mean_hours_by_age,
};
use crate::data::filter::{FilterSpec, Subset};
use crate::data::issue::DataIssue;
use crate::data::model::{Column, SurveyDataset};

/// A chart's data, or the reason it is skipped.
pub type ChartResult<T> = Result<T, DataIssue>;

// ---------------------------------------------------------------------------
// User selections
// ---------------------------------------------------------------------------

/// What the user picked in each select box. `None` means "first option".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub region: Option<String>,
    pub job_role: Option<String>,
    pub work_location: Option<String>,
    pub industry: Option<String>,
}

/// Values offered by each select box, distinct and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub regions: Vec<String>,
    pub job_roles: Vec<String>,
    pub work_locations: Vec<String>,
    pub industries: Vec<String>,
}

/// Keep `wanted` if it is still offered, otherwise fall back to the first option.
fn resolve(wanted: Option<&String>, offered: &[String]) -> Option<String> {
    wanted
        .filter(|w| offered.contains(w))
        .or_else(|| offered.first())
        .cloned()
}

// ---------------------------------------------------------------------------
// Per-tab chart data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// Job Role × Gender grouped bars.
    pub gender_by_role: ChartResult<Vec<PairCount>>,
    /// Age vs. average weekly hours line.
    pub hours_by_age: ChartResult<Vec<GroupMean>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCharts {
    pub productivity: ChartResult<Distribution>,
    pub stress: ChartResult<Distribution>,
    pub satisfaction: ChartResult<Distribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndustryCharts {
    pub stress: ChartResult<Distribution>,
    pub satisfaction: ChartResult<Distribution>,
}

// ---------------------------------------------------------------------------
// Dashboard – one full filter → aggregate cycle
// ---------------------------------------------------------------------------

/// Everything the UI draws for one set of selections. Rebuilt from scratch
/// whenever a selection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub options: Options,
    /// Selections after falling back to the first offered value.
    pub selections: Selections,
    pub total_rows: usize,
    pub region_rows: usize,
    pub overview: Overview,
    /// Stress Analysis tab (job role + work location subset).
    pub by_role: ChartResult<RoleCharts>,
    /// Industry Insights tab (industry subset).
    pub by_industry: ChartResult<IndustryCharts>,
}

impl Dashboard {
    pub fn build(dataset: &SurveyDataset, wanted: &Selections) -> Self {
        let everything = Subset::all(dataset);

        let regions = everything.distinct(Column::Region);
        let region = resolve(wanted.region.as_ref(), &regions);
        let region_subset = match &region {
            Some(r) => FilterSpec::new()
                .with(Column::Region, r.as_str())
                .apply(dataset),
            None => Subset::none(dataset),
        };

        let job_roles = region_subset.distinct(Column::JobRole);
        let work_locations = region_subset.distinct(Column::WorkLocation);
        let industries = region_subset.distinct(Column::Industry);

        let selections = Selections {
            job_role: resolve(wanted.job_role.as_ref(), &job_roles),
            work_location: resolve(wanted.work_location.as_ref(), &work_locations),
            industry: resolve(wanted.industry.as_ref(), &industries),
            region,
        };

        log::debug!(
            "Rebuilding dashboard: {} of {} rows in region {:?}",
            region_subset.len(),
            dataset.len(),
            selections.region
        );

        let overview = Overview {
            gender_by_role: gender_by_role(&region_subset),
            hours_by_age: hours_by_age(&region_subset),
        };
        let by_role = role_charts(&region_subset, &selections);
        let by_industry = industry_charts(&region_subset, &selections);

        Dashboard {
            options: Options {
                regions,
                job_roles,
                work_locations,
                industries,
            },
            total_rows: dataset.len(),
            region_rows: region_subset.len(),
            selections,
            overview,
            by_role,
            by_industry,
        }
    }

    /// Region name for headers, empty when there is none.
    pub fn region_label(&self) -> &str {
        self.selections.region.as_deref().unwrap_or("")
    }
}

fn distribution(subset: &Subset<'_>, column: Column) -> ChartResult<Distribution> {
    subset.require(column)?;
    Ok(count_by(subset, column))
}

fn gender_by_role(subset: &Subset<'_>) -> ChartResult<Vec<PairCount>> {
    subset.require(Column::JobRole)?;
    subset.require(Column::Gender)?;
    let pairs = count_by_pair(subset, Column::JobRole, Column::Gender);
    if pairs.is_empty() {
        return Err(DataIssue::empty("Job Role and Gender distribution"));
    }
    Ok(pairs)
}

fn hours_by_age(subset: &Subset<'_>) -> ChartResult<Vec<GroupMean>> {
    let dataset = subset.dataset();
    for column in [Column::Age, Column::HoursWorkedPerWeek] {
        if !dataset.has_column(column) {
            return Err(DataIssue::missing(column));
        }
    }
    let means = mean_hours_by_age(subset);
    if means.is_empty() {
        return Err(DataIssue::empty("Age and Hours Worked Per Week"));
    }
    Ok(means)
}

fn role_charts(region: &Subset<'_>, selections: &Selections) -> ChartResult<RoleCharts> {
    let role = selections.job_role.as_deref().unwrap_or_default();
    let location = selections.work_location.as_deref().unwrap_or_default();
    let subset = match (&selections.job_role, &selections.work_location) {
        (Some(r), Some(l)) => region.refine(
            &FilterSpec::new()
                .with(Column::JobRole, r.as_str())
                .with(Column::WorkLocation, l.as_str()),
        ),
        _ => Subset::none(region.dataset()),
    };
    if subset.is_empty() {
        return Err(DataIssue::empty(format!(
            "the selected job role ({role}) and work location ({location})"
        )));
    }
    Ok(RoleCharts {
        productivity: distribution(&subset, Column::ProductivityChange),
        stress: distribution(&subset, Column::StressLevel),
        satisfaction: distribution(&subset, Column::SatisfactionWithRemoteWork),
    })
}

fn industry_charts(region: &Subset<'_>, selections: &Selections) -> ChartResult<IndustryCharts> {
    let subset = match &selections.industry {
        Some(industry) => region.restrict(Column::Industry, industry),
        None => Subset::none(region.dataset()),
    };
    if subset.is_empty() {
        return Err(DataIssue::empty(format!(
            "the selected industry ({}) in region ({})",
            selections.industry.as_deref().unwrap_or_default(),
            selections.region.as_deref().unwrap_or_default()
        )));
    }
    Ok(IndustryCharts {
        stress: distribution(&subset, Column::StressLevel),
        satisfaction: distribution(&subset, Column::SatisfactionWithRemoteWork),
    })
}
