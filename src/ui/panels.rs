use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – region filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter by Region");
    ui.separator();

    let Some(dash) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let regions = dash.options.regions.clone();
    let current = dash.selections.region.clone();
    let (total, visible) = (dash.total_rows, dash.region_rows);

    if regions.is_empty() {
        ui.label("The dataset has no regions.");
    }

    let mut picked = None;
    ui.label("Select a Region");
    egui::ComboBox::from_id_salt("region")
        .selected_text(current.as_deref().unwrap_or("—"))
        .show_ui(ui, |ui: &mut Ui| {
            for region in &regions {
                if ui
                    .selectable_label(current.as_ref() == Some(region), region)
                    .clicked()
                {
                    picked = Some(region.clone());
                }
            }
        });

    ui.add_space(8.0);
    ui.label(format!("{visible} of {total} respondents"));

    if let Some(region) = picked {
        log::debug!("Region selected: {region}");
        state.select_region(region);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
