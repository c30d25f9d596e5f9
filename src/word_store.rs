use crate::evaluator::is_valid_word;
use crate::game_state::DEFAULT_TARGET_WORD;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STORE_DIR_NAME: &str = "wordy";
const STORE_FILE_NAME: &str = "target_word.txt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read or write the word store at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single persisted slot holding the target word.
pub trait WordStore {
    fn get_target_word(&self) -> Result<Option<String>, StoreError>;
    fn set_target_word(&self, word: &str) -> Result<(), StoreError>;
}

/// Default location of the word store, under the platform data directory.
#[must_use]
pub fn get_target_word_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(STORE_DIR_NAME).join(STORE_FILE_NAME))
}

/// Word store backed by a one-line text file.
#[derive(Debug, Clone)]
pub struct FileWordStore {
    path: PathBuf,
}

impl FileWordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl WordStore for FileWordStore {
    fn get_target_word(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let word = contents.lines().next().unwrap_or("").trim();
                if word.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(word.to_string()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set_target_word(&self, word: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, format!("{word}\n")).map_err(|e| self.io_error(e))
    }
}

/// In-memory store, for tests and for running without a writable data dir.
#[derive(Debug, Default)]
pub struct MemoryWordStore {
    word: RefCell<Option<String>>,
}

impl MemoryWordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_word(word: &str) -> Self {
        Self {
            word: RefCell::new(Some(word.to_string())),
        }
    }
}

impl WordStore for MemoryWordStore {
    fn get_target_word(&self) -> Result<Option<String>, StoreError> {
        Ok(self.word.borrow().clone())
    }

    fn set_target_word(&self, word: &str) -> Result<(), StoreError> {
        *self.word.borrow_mut() = Some(word.to_string());
        Ok(())
    }
}

/// Read the target word from `store`, uppercased.
///
/// A missing, unreadable or malformed entry falls back to the default word,
/// which is then written back to the store.
pub fn load_target_word<S: WordStore + ?Sized>(store: &S) -> String {
    match store.get_target_word() {
        Ok(Some(word)) => {
            let upper = word.to_uppercase();
            if is_valid_word(&upper) {
                log::info!("Loaded target word from store");
                return upper;
            }
            log::warn!("Stored target word {word:?} is not a valid word; using default");
        }
        Ok(None) => log::info!("No stored target word; using default"),
        Err(e) => log::warn!("{e}; using default"),
    }

    if let Err(e) = store.set_target_word(DEFAULT_TARGET_WORD) {
        log::warn!("Failed to persist default target word: {e}");
    }
    DEFAULT_TARGET_WORD.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileWordStore {
        let path = std::env::temp_dir()
            .join("wordy_store_tests")
            .join(name)
            .join(STORE_FILE_NAME);
        let _ = fs::remove_file(&path);
        FileWordStore::new(path)
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = get_target_word_path() {
            assert!(path.ends_with("wordy/target_word.txt"));
        }
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = temp_store("missing");
        assert!(store.get_target_word().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_creates_dirs() {
        let store = temp_store("round_trip");
        store.set_target_word("SLATE").unwrap();
        assert_eq!(store.get_target_word().unwrap(), Some("SLATE".to_string()));
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "SLATE\n");
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_file_store_blank_file_is_none() {
        let store = temp_store("blank");
        store.set_target_word("   ").unwrap();
        assert!(store.get_target_word().unwrap().is_none());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_file_store_unreadable_path_errors() {
        // A directory cannot be read as a file
        let dir = std::env::temp_dir().join("wordy_store_tests").join("is_a_dir");
        fs::create_dir_all(&dir).unwrap();
        let store = FileWordStore::new(&dir);
        assert!(matches!(store.get_target_word(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_load_defaults_and_persists() {
        let store = MemoryWordStore::new();
        assert_eq!(load_target_word(&store), "CRANE");
        assert_eq!(store.get_target_word().unwrap(), Some("CRANE".to_string()));
    }

    #[test]
    fn test_load_uppercases_stored_word() {
        let store = MemoryWordStore::with_word("slate");
        assert_eq!(load_target_word(&store), "SLATE");
    }

    #[test]
    fn test_load_invalid_stored_word_falls_back() {
        let store = MemoryWordStore::with_word("toolong");
        assert_eq!(load_target_word(&store), "CRANE");
        assert_eq!(store.get_target_word().unwrap(), Some("CRANE".to_string()));
    }

    #[test]
    fn test_load_from_file_store() {
        let store = temp_store("load");
        assert_eq!(load_target_word(&store), "CRANE");
        assert_eq!(store.get_target_word().unwrap(), Some("CRANE".to_string()));

        store.set_target_word("pious").unwrap();
        assert_eq!(load_target_word(&store), "PIOUS");
        let _ = fs::remove_file(store.path());
    }
}
