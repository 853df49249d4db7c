use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::charts::{
    chart_or_warning, count_bars, distribution_table, donut, grouped_bars, line_with_markers,
    warning,
};

const INTRO: &str = "Remote work became more prevalent since the COVID-19 pandemic, and many \
employees found it a blessing. According to a study from Owl Labs and Global Workplace \
Analytics, 62% of employees feel more proactive when working remotely, and 52% said they would \
trade a slight reduction in pay for the option to work from home. Working from home allows a \
better work-life balance, which leads to higher job satisfaction and a greater likelihood of \
staying with the company. With companies bringing back five-day office mandates, should they, \
or should they offer a hybrid or remote option? Let's find out.";

/// Select box over `options`. Returns the newly picked value, if any.
fn select_box(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<String> {
    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.unwrap_or("—"))
            .width(200.0)
            .show_ui(ui, |ui: &mut Ui| {
                for option in options {
                    if ui
                        .selectable_label(current == Some(option.as_str()), option)
                        .clicked()
                    {
                        picked = Some(option.clone());
                    }
                }
            });
    });
    picked
}

// ---------------------------------------------------------------------------
// Tab 1: Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &AppState) {
    let Some(dash) = &state.dashboard else {
        return;
    };

    ui.label(INTRO);
    ui.add_space(8.0);
    ui.heading(format!("Overview for {}", dash.region_label()));

    ui.add_space(8.0);
    ui.strong("Job Role Distribution by Gender");
    chart_or_warning(ui, &dash.overview.gender_by_role, |ui, pairs| {
        grouped_bars(ui, "job_role_gender", pairs);
    });

    ui.add_space(12.0);
    ui.strong("Age vs. Average Hours Worked Per Week");
    chart_or_warning(ui, &dash.overview.hours_by_age, |ui, means| {
        line_with_markers(ui, "age_hours", means);
    });
}

// ---------------------------------------------------------------------------
// Tab 2: Stress Analysis
// ---------------------------------------------------------------------------

pub fn stress_analysis(ui: &mut Ui, state: &mut AppState) {
    let Some(dash) = state.dashboard.clone() else {
        return;
    };

    ui.heading(format!("Industry-Wide Insights for {}", dash.region_label()));
    ui.strong("Filter by Job Role and Work Location");

    if let Some(role) = select_box(
        ui,
        "job_role",
        "Select a Job Role",
        dash.selections.job_role.as_deref(),
        &dash.options.job_roles,
    ) {
        state.select_job_role(role);
    }
    if let Some(location) = select_box(
        ui,
        "work_location",
        "Select a Work Location",
        dash.selections.work_location.as_deref(),
        &dash.options.work_locations,
    ) {
        state.select_work_location(location);
    }
    ui.separator();

    let charts = match &dash.by_role {
        Ok(charts) => charts,
        Err(issue) => {
            warning(ui, issue);
            return;
        }
    };

    ui.columns(2, |cols| {
        cols[0].strong("Productivity Change Distribution");
        chart_or_warning(&mut cols[0], &charts.productivity, |ui, dist| {
            count_bars(ui, "productivity", dist, false);
            distribution_table(ui, "productivity_table", dist);
        });
        cols[1].strong("Stress Level Distribution");
        chart_or_warning(&mut cols[1], &charts.stress, |ui, dist| {
            count_bars(ui, "role_stress", dist, false);
            distribution_table(ui, "role_stress_table", dist);
        });
    });

    ui.add_space(12.0);
    ui.strong("Employee Satisfaction Breakdown");
    chart_or_warning(ui, &charts.satisfaction, |ui, dist| {
        ui.vertical_centered(|ui: &mut Ui| donut(ui, dist, 0.4));
    });
}

// ---------------------------------------------------------------------------
// Tab 3: Industry Insights
// ---------------------------------------------------------------------------

pub fn industry_insights(ui: &mut Ui, state: &mut AppState) {
    let Some(dash) = state.dashboard.clone() else {
        return;
    };

    ui.heading(format!("Industry-Wide Insights for {}", dash.region_label()));
    if let Some(industry) = select_box(
        ui,
        "industry",
        "Select an Industry",
        dash.selections.industry.as_deref(),
        &dash.options.industries,
    ) {
        state.select_industry(industry);
    }
    ui.separator();

    match &dash.by_industry {
        Ok(charts) => {
            ui.columns(2, |cols| {
                cols[0].strong("Stress Level Distribution");
                chart_or_warning(&mut cols[0], &charts.stress, |ui, dist| {
                    count_bars(ui, "industry_stress", dist, true);
                    distribution_table(ui, "industry_stress_table", dist);
                });
                cols[1].strong("Work Satisfaction Distribution");
                chart_or_warning(&mut cols[1], &charts.satisfaction, |ui, dist| {
                    count_bars(ui, "industry_satisfaction", dist, true);
                    distribution_table(ui, "industry_satisfaction_table", dist);
                });
            });
        }
        Err(issue) => warning(ui, issue),
    }

    ui.add_space(16.0);
    ui.heading("Data Sources");
    ui.hyperlink_to(
        "Remote Work & Mental Health",
        "https://www.kaggle.com/datasets/waqi786/remote-work-and-mental-health/data",
    );
    ui.hyperlink_to(
        "How Remote Work Can Impact Employees' Mental Health",
        "https://www.forbes.com/councils/forbeshumanresourcescouncil/2023/07/03/how-remote-work-can-impact-employees-mental-health/",
    );
}
