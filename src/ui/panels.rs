use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, ViewMode};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Rescan data root").clicked() {
                state.refresh_folders();
                ui.close_menu();
            }
        });

        ui.separator();

        // ---- File navigation ----
        let has_files = state.session.as_ref().is_some_and(|s| !s.is_empty());
        ui.add_enabled_ui(has_files, |ui: &mut Ui| {
            if ui.button("◀ Prev").clicked() {
                state.previous();
            }
            if ui.button("Next ▶").clicked() {
                state.next();
            }
        });
        match &state.session {
            Some(s) if s.is_empty() => {
                ui.label("No CSV files in this folder");
            }
            Some(s) => {
                ui.label(format!("Page {}/{}", s.index() + 1, s.file_count()));
            }
            None => {}
        }

        ui.separator();

        let mut show_invalid = state.show_invalid;
        if ui.checkbox(&mut show_invalid, "Show invalid points").changed() {
            state.toggle_invalid();
        }

        ui.separator();

        // ---- View selection ----
        if ui
            .selectable_label(state.view == ViewMode::Orbit3D, "3D")
            .clicked()
        {
            state.view = ViewMode::Orbit3D;
        }
        if ui
            .selectable_label(state.view == ViewMode::TopDown, "Top-down")
            .clicked()
        {
            state.view = ViewMode::TopDown;
        }

        if let Some(ds) = &state.dataset {
            ui.separator();
            let mut summary = format!("{} records, {} valid", ds.len(), ds.valid_count());
            if ds.dropped_rows > 0 {
                summary.push_str(&format!(", {} rows dropped", ds.dropped_rows));
            }
            ui.label(summary);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – folder / file lists
// ---------------------------------------------------------------------------

/// Render the folder and file lists.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Folders");
    ui.separator();

    if state.folders.is_empty() {
        ui.label(format!(
            "No subfolders under {}",
            state.data_root().display()
        ));
    }

    let folders = state.folders.clone();
    let current_folder = state
        .session
        .as_ref()
        .map(|s| s.folder().to_path_buf());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for folder in &folders {
                let name = folder
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("<unnamed>");
                let selected = current_folder.as_deref() == Some(folder.as_path());
                if ui.selectable_label(selected, name).clicked() && !selected {
                    state.select_folder(folder);
                }
            }

            // ---- Files of the selected folder ----
            let Some(session) = &state.session else {
                return;
            };
            ui.add_space(8.0);
            ui.heading("Files");
            ui.separator();

            let files: Vec<String> = session.files().to_vec();
            let current_index = session.index();
            let mut jump_target = None;
            for (i, name) in files.iter().enumerate() {
                if ui.selectable_label(i == current_index, name).clicked() {
                    jump_target = Some(i);
                }
            }
            if let Some(i) = jump_target {
                state.jump_to(i);
            }
        });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Native folder picker, restricted to subfolders of the data root.  A
/// selection outside the root is rejected and the prior session kept.
pub fn open_folder_dialog(state: &mut AppState) {
    let Some(picked) = rfd::FileDialog::new()
        .set_title("Select a subfolder of the data root")
        .set_directory(state.data_root())
        .pick_folder()
    else {
        return;
    };

    let root = state
        .data_root()
        .canonicalize()
        .unwrap_or_else(|_| state.data_root().to_path_buf());
    let picked = picked.canonicalize().unwrap_or(picked);

    if !picked.starts_with(&root) || picked == root {
        log::warn!("rejected selection outside data root: {}", picked.display());
        state.status_message = Some(format!(
            "Pick a subfolder of {}",
            state.data_root().display()
        ));
        return;
    }

    state.select_folder(&picked);
}
