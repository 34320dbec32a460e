use std::path::{Path, PathBuf};

use crate::camera::OrbitCamera;
use crate::config::AppConfig;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::session::FolderSession;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which projection the central panel draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Orbitable scatter: longitude, latitude, value.
    Orbit3D,
    /// Top-down longitude/latitude map.
    TopDown,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Subfolders of the data root shown in the side panel.
    pub folders: Vec<PathBuf>,

    /// Selected folder + file cursor (None until a folder is picked).
    pub session: Option<FolderSession>,

    /// Dataset of the current file, reloaded on every navigation step.
    pub dataset: Option<Dataset>,

    /// Whether invalid records are drawn (gray) or omitted.
    pub show_invalid: bool,

    pub view: ViewMode,
    pub camera: OrbitCamera,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState {
            config,
            folders: Vec::new(),
            session: None,
            dataset: None,
            show_invalid: false,
            view: ViewMode::Orbit3D,
            camera: OrbitCamera::default(),
            status_message: None,
        };
        state.refresh_folders();
        state
    }

    pub fn data_root(&self) -> &Path {
        &self.config.data_dir
    }

    /// Re-list the subfolders of the data root.  A missing root is not an
    /// error at startup; the side panel just shows nothing.
    pub fn refresh_folders(&mut self) {
        match loader::list_folders(&self.config.data_dir) {
            Ok(folders) => self.folders = folders,
            Err(e) => {
                log::warn!("listing data root failed: {e:#}");
                self.folders.clear();
            }
        }
    }

    /// Select a folder and load its first file.  On failure the previous
    /// session and dataset are left untouched and the error is surfaced as
    /// a status message.
    pub fn select_folder(&mut self, folder: &Path) {
        let files = match loader::list_csv_files(folder) {
            Ok(files) => files,
            Err(e) => {
                log::error!("folder selection failed: {e:#}");
                self.status_message = Some(format!("Cannot open folder: {e:#}"));
                return;
            }
        };

        log::info!("selected {} ({} CSV files)", folder.display(), files.len());
        self.session = Some(FolderSession::new(folder.to_path_buf(), files));
        self.status_message = None;
        self.load_current();
    }

    /// Advance to the next file (clamped) and reload.
    pub fn next(&mut self) {
        if self.session.as_mut().is_some_and(|s| s.next()) {
            self.load_current();
        }
    }

    /// Step back to the previous file (clamped) and reload.
    pub fn previous(&mut self) {
        if self.session.as_mut().is_some_and(|s| s.previous()) {
            self.load_current();
        }
    }

    /// Jump straight to a file in the current folder.
    pub fn jump_to(&mut self, index: usize) {
        if self.session.as_mut().is_some_and(|s| s.jump_to(index)) {
            self.load_current();
        }
    }

    /// Flip invalid-point visibility.  The dataset keeps every record, so
    /// no reload is needed; the views re-filter on the next frame.
    pub fn toggle_invalid(&mut self) {
        self.show_invalid = !self.show_invalid;
        log::debug!("show_invalid = {}", self.show_invalid);
    }

    /// (Re)load the session's current file into `dataset`.
    pub fn load_current(&mut self) {
        let Some(session) = &self.session else {
            self.dataset = None;
            return;
        };
        let Some(path) = session.current_file() else {
            // Folder with no CSV files: empty plot, navigation disabled.
            self.dataset = None;
            return;
        };

        match loader::load_csv(&path, &self.config.validity) {
            Ok(dataset) => {
                self.status_message = None;
                self.dataset = Some(dataset);
            }
            Err(e) => {
                log::error!("loading {} failed: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.dataset = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn scratch_root(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "skytrace-state-{}-{name}-{n}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn state_with_root(root: &Path) -> AppState {
        AppState::new(AppConfig {
            data_dir: root.to_path_buf(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn rejected_selection_retains_the_prior_session() {
        let root = scratch_root("retain");
        let folder = root.join("node1");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(
            folder.join("LOG0001.CSV"),
            "0,1,A,B,C,10.0,20.0,100,0,Valid,0,0,5.0\n",
        )
        .unwrap();

        let mut state = state_with_root(&root);
        state.select_folder(&folder);
        assert_eq!(
            state.session.as_ref().map(|s| s.folder().to_path_buf()),
            Some(folder.clone())
        );
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
        assert!(state.status_message.is_none());

        // Selecting a folder that does not exist must not disturb the
        // current session or dataset.
        state.select_folder(&root.join("missing"));
        assert_eq!(
            state.session.as_ref().map(|s| s.folder().to_path_buf()),
            Some(folder)
        );
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn empty_folder_selects_with_no_dataset() {
        let root = scratch_root("empty");
        let folder = root.join("node1");
        std::fs::create_dir_all(&folder).unwrap();

        let mut state = state_with_root(&root);
        state.select_folder(&folder);

        let session = state.session.as_ref().unwrap();
        assert!(session.is_empty());
        assert!(state.dataset.is_none());
    }

    #[test]
    fn navigation_reloads_the_new_current_file() {
        let root = scratch_root("nav");
        let folder = root.join("node1");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(
            folder.join("LOG0001.CSV"),
            "0,1,A,B,C,10.0,20.0,100,0,Valid,0,0,5.0\n",
        )
        .unwrap();
        std::fs::write(
            folder.join("LOG0002.CSV"),
            "0,1,A,B,C,10.0,20.0,100,0,Valid,0,0,5.0\n\
             1,2,A,B,C,11.0,21.0,101,0,Valid,0,0,6.0\n",
        )
        .unwrap();

        let mut state = state_with_root(&root);
        state.select_folder(&folder);
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));

        state.next();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(2));

        // Clamped at the end: a further step keeps the same file.
        state.next();
        assert_eq!(state.session.as_ref().unwrap().index(), 1);
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(2));

        state.previous();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
    }
}
