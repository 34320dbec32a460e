use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, ViewMode};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SkytraceApp {
    pub state: AppState,
}

impl SkytraceApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for SkytraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard: Left/Right step through files, I flips validity view ----
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.state.next();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.state.previous();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::I)) {
            self.state.toggle_invalid();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: folders and files ----
        egui::SidePanel::left("folder_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scatter view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            ViewMode::Orbit3D => plot::scatter_3d(ui, &mut self.state),
            ViewMode::TopDown => plot::top_down(ui, &self.state),
        });
    }
}
