use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Folder session: selected folder + navigation state
// ---------------------------------------------------------------------------

/// The currently selected folder, its CSV files in display order, and the
/// cursor into that list.  The index stays within `[0, file_count - 1]`
/// whenever there are files; navigation clamps at both boundaries.
#[derive(Debug, Clone)]
pub struct FolderSession {
    folder: PathBuf,
    files: Vec<String>,
    index: usize,
}

impl FolderSession {
    pub fn new(folder: PathBuf, files: Vec<String>) -> Self {
        FolderSession {
            folder,
            files,
            index: 0,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Full path of the current file, if the folder holds any.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.files.get(self.index).map(|name| self.folder.join(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.files.get(self.index).map(String::as_str)
    }

    /// Jump to an explicit index.  Returns true when the cursor moved.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.files.len() || index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    /// Advance to the next file, clamped at the end.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.files.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back to the previous file, clamped at the start.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: usize) -> FolderSession {
        let files = (0..n).map(|i| format!("LOG{i:04}.CSV")).collect();
        FolderSession::new(PathBuf::from("data/node1"), files)
    }

    #[test]
    fn forward_walk_reaches_the_last_file() {
        let mut s = session(4);
        for _ in 0..3 {
            assert!(s.next());
        }
        assert_eq!(s.index(), 3);
        assert_eq!(s.current_name(), Some("LOG0003.CSV"));
    }

    #[test]
    fn next_clamps_at_the_end_and_is_idempotent() {
        let mut s = session(3);
        s.jump_to(2);
        assert!(!s.next());
        assert!(!s.next());
        assert_eq!(s.index(), 2);
    }

    #[test]
    fn previous_clamps_at_the_start() {
        let mut s = session(3);
        assert!(!s.previous());
        assert_eq!(s.index(), 0);
        s.next();
        assert!(s.previous());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn empty_session_has_no_current_file_and_stays_put() {
        let mut s = session(0);
        assert!(s.is_empty());
        assert_eq!(s.current_file(), None);
        assert!(!s.next());
        assert!(!s.previous());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn jump_rejects_out_of_range_targets() {
        let mut s = session(2);
        assert!(s.jump_to(1));
        assert!(!s.jump_to(5));
        assert_eq!(s.index(), 1);
    }

    #[test]
    fn current_file_joins_folder_and_name() {
        let s = session(1);
        assert_eq!(
            s.current_file(),
            Some(PathBuf::from("data/node1").join("LOG0000.CSV"))
        );
    }
}
