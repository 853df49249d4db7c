use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{panels, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RemotePulseApp {
    pub state: AppState,
}

impl RemotePulseApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RemotePulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: region filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Impact of Remote Work on Mental Health");
            ui.separator();

            if self.state.dashboard.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label("Open a survey file to start  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| match self.state.tab {
                    Tab::Overview => tabs::overview(ui, &self.state),
                    Tab::StressAnalysis => tabs::stress_analysis(ui, &mut self.state),
                    Tab::IndustryInsights => tabs::industry_insights(ui, &mut self.state),
                });
        });
    }
}
