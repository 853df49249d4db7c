use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Ui, Vec2};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::ColorMap;
use crate::dashboard::ChartResult;
use crate::data::aggregate::{Distribution, GroupMean, PairCount};
use crate::data::issue::DataIssue;

const WARNING_COLOR: Color32 = Color32::from_rgb(0xE0, 0xA0, 0x30);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Inline "no data" notice shown in place of a skipped chart.
pub fn warning(ui: &mut Ui, issue: &DataIssue) {
    ui.label(RichText::new(format!("⚠ {issue}")).color(WARNING_COLOR));
}

/// Draw `chart` with the data, or the warning when the chart is skipped.
pub fn chart_or_warning<T>(
    ui: &mut Ui,
    data: &ChartResult<T>,
    chart: impl FnOnce(&mut Ui, &T),
) {
    match data {
        Ok(value) => chart(ui, value),
        Err(issue) => warning(ui, issue),
    }
}

/// Axis formatter that prints category names at integer positions.
fn category_axis(
    names: Vec<String>,
) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        names.get(rounded as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Grouped bars: Job Role × Gender
// ---------------------------------------------------------------------------

pub fn grouped_bars(ui: &mut Ui, id: &str, pairs: &[PairCount]) {
    let mut roles: Vec<String> = Vec::new();
    let mut genders: Vec<String> = Vec::new();
    for p in pairs {
        if !roles.contains(&p.first) {
            roles.push(p.first.clone());
        }
        if !genders.contains(&p.second) {
            genders.push(p.second.clone());
        }
    }

    let colors = ColorMap::new(genders.iter().map(String::as_str));
    let group_width = 0.8;
    let bar_width = group_width / genders.len().max(1) as f64;

    Plot::new(id)
        .legend(Legend::default().position(egui_plot::Corner::RightTop))
        .x_axis_label("Job Role")
        .y_axis_label("Number of Employees")
        .x_axis_formatter(category_axis(roles.clone()))
        .include_y(0.0)
        .height(500.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (g, gender) in genders.iter().enumerate() {
                let offset = -group_width / 2.0 + bar_width * (g as f64 + 0.5);
                let bars: Vec<Bar> = pairs
                    .iter()
                    .filter(|p| &p.second == gender)
                    .filter_map(|p| {
                        let x = roles.iter().position(|r| r == &p.first)? as f64;
                        Some(
                            Bar::new(x + offset, p.count as f64)
                                .width(bar_width * 0.9)
                                .name(&p.first),
                        )
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(gender)
                        .color(colors.color_for(gender)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Line with point markers: Age → mean hours
// ---------------------------------------------------------------------------

pub fn line_with_markers(ui: &mut Ui, id: &str, means: &[GroupMean]) {
    let series: Vec<[f64; 2]> = means.iter().map(|m| [m.key, m.mean]).collect();
    let color = Color32::from_rgb(0x63, 0x6E, 0xFA);

    Plot::new(id)
        .x_axis_label("Age")
        .y_axis_label("Average Hours Worked Per Week")
        .height(400.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .color(color)
                    .width(2.0)
                    .name("Average hours"),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .color(color)
                    .radius(3.5)
                    .name("Average hours"),
            );
        });
}

// ---------------------------------------------------------------------------
// Count bars (optionally with percentage labels inside the bars)
// ---------------------------------------------------------------------------

pub fn count_bars(ui: &mut Ui, id: &str, dist: &Distribution, labels_inside: bool) {
    let names: Vec<String> = dist.categories().map(str::to_string).collect();
    let colors = ColorMap::new(dist.categories());
    let axis_label = dist.column.label();

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(axis_label)
        .y_axis_label("Number of People")
        .x_axis_formatter(category_axis(names))
        .include_y(0.0)
        .height(if labels_inside { 500.0 } else { 400.0 })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, row) in dist.rows.iter().enumerate() {
                let x = i as f64;
                let percentage = row.percentage.unwrap_or(0.0);
                let bar = Bar::new(x, row.count as f64)
                    .width(0.8)
                    .name(&row.category);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&row.category)
                        .color(colors.color_for(&row.category))
                        .element_formatter(Box::new(move |bar, _chart| {
                            format!(
                                "{axis_label}: {}\nCount: {}\nPercentage: {percentage:.1}%",
                                bar.name, bar.value
                            )
                        })),
                );
                if labels_inside {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x, row.count as f64 / 2.0),
                            RichText::new(format!("{percentage:.1}%"))
                                .size(18.0)
                                .color(Color32::WHITE),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Donut pie
// ---------------------------------------------------------------------------

/// Pie with a hole of `hole` × radius, slices in distribution order.
pub fn donut(ui: &mut Ui, dist: &Distribution, hole: f32) {
    if dist.is_empty() {
        return;
    }
    let total = dist.total();
    let colors = ColorMap::new(dist.categories());
    let size = ui.available_width().min(360.0);

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let outer = size * 0.48;
        let inner = outer * hole;

        // Start at 12 o'clock, clockwise.
        let mut start = -TAU / 4.0;
        for row in &dist.rows {
            let sweep = TAU * row.count as f32 / total as f32;
            let color = colors.color_for(&row.category);
            let segment = ring_segment(center, inner, outer, start, sweep, color);
            painter.add(Shape::mesh(segment));

            let mid = start + sweep / 2.0;
            let label_radius = (inner + outer) / 2.0;
            let label_pos = center + Vec2::angled(mid) * label_radius;
            if sweep > 0.25 {
                painter.text(
                    label_pos,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", row.percentage.unwrap_or(0.0)),
                    FontId::proportional(14.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            ui.strong(dist.column.label());
            for row in &dist.rows {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(colors.color_for(&row.category)));
                    ui.label(format!("{}  ({})", row.category, row.count));
                });
            }
        });
    });
}

fn ring_segment(
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) -> Mesh {
    let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    for s in 0..=steps {
        let angle = start + sweep * s as f32 / steps as f32;
        let dir = Vec2::angled(angle);
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for s in 0..steps {
        let i = s * 2;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    mesh
}

// ---------------------------------------------------------------------------
// Data table under a chart
// ---------------------------------------------------------------------------

/// Collapsible table of the numbers behind a distribution chart.
pub fn distribution_table(ui: &mut Ui, id: &str, dist: &Distribution) {
    egui::CollapsingHeader::new("Show data")
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.push_id(id, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .column(TableColumn::auto().at_least(120.0))
                    .column(TableColumn::auto())
                    .column(TableColumn::remainder())
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong(dist.column.label());
                        });
                        header.col(|ui| {
                            ui.strong("Count");
                        });
                        header.col(|ui| {
                            ui.strong("Percentage");
                        });
                    })
                    .body(|mut body| {
                        for row in &dist.rows {
                            body.row(18.0, |mut table_row| {
                                table_row.col(|ui| {
                                    ui.label(&row.category);
                                });
                                table_row.col(|ui| {
                                    ui.label(row.count.to_string());
                                });
                                table_row.col(|ui| {
                                    ui.label(
                                        row.percentage
                                            .map(|p| format!("{p:.1}%"))
                                            .unwrap_or_else(|| "–".to_string()),
                                    );
                                });
                            });
                        }
                        // Rounded shares may not add up to exactly 100.
                        body.row(18.0, |mut total_row| {
                            total_row.col(|ui| {
                                ui.strong("Total");
                            });
                            total_row.col(|ui| {
                                ui.strong(dist.total().to_string());
                            });
                            total_row.col(|ui| {
                                ui.strong(format!("{:.1}%", dist.percentage_sum()));
                            });
                        });
                    });
            });
        });
}
