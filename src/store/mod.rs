//! Macro save-file management with atomic writes and backup support.
//!
//! Macros persist one per line as `NAME,DEFINITION`, where the definition
//! uses the macro grammar verbatim. Commas are not escaped; a name holding
//! a comma corrupts round-tripping (known format limitation). Key features:
//!
//! - **Atomic writes**: replace-on-save, never a half-written file
//! - **Automatic backups**: every overwrite creates a timestamped backup
//! - **Whole-load validation**: any invalid line abandons the entire load
//!
//! # Example
//!
//! ```no_run
//! use macro_replay::core::types::Macro;
//! use macro_replay::store::MacroStore;
//! use std::path::PathBuf;
//!
//! let store = MacroStore::open(PathBuf::from("macros.txt"))?;
//! let macros = vec![Macro::new("greet", "hi\\E")?];
//! store.save(&macros)?;
//! assert_eq!(store.load()?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub use error::StoreError;

use atomic_write_file::AtomicWriteFile;
use chrono::Local;
use nom::bytes::complete::take_until;
use nom::character::complete::char;
use nom::{IResult, Parser};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::types::Macro;

/// Manages one macro save file with safe atomic operations.
///
/// Reads are plain; writes go through a timestamped backup of the previous
/// content followed by an atomic replace.
#[derive(Debug)]
pub struct MacroStore {
    /// Path to the save file. It does not have to exist yet; the first save
    /// creates it.
    path: PathBuf,
    backup_dir: PathBuf,
}

impl MacroStore {
    /// Creates a store rooted at the given save file.
    ///
    /// The backup directory lives next to the save file
    /// (e.g. `~/.local/share/macro-replay/macros.txt` →
    /// `~/.local/share/macro-replay/backups/`) and is created lazily on the
    /// first save that overwrites existing content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BackupDirNotWritable` if the path has no parent
    /// directory to place backups in.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let backup_dir = path
            .parent()
            .ok_or_else(|| StoreError::BackupDirNotWritable(path.clone()))?
            .join("backups");

        Ok(Self { path, backup_dir })
    }

    /// Path of the save file this store manages.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every macro from the save file.
    ///
    /// A missing or unreadable file is `StoreError::LoadFailed`, distinct
    /// from per-line errors. Blank lines are skipped; any other line must
    /// parse as `NAME,DEFINITION` and construct a valid macro, or the whole
    /// load is abandoned with the offending line number.
    pub fn load(&self) -> Result<Vec<Macro>, StoreError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|_| StoreError::LoadFailed(self.path.clone()))?;

        parse_save_file(&content)
    }

    /// Saves the given macros, replacing the file's previous content.
    ///
    /// If the file already exists its content is backed up first, so a
    /// failed or regretted save can be recovered by hand. The write itself
    /// is atomic: the file is never observable in a half-written state.
    pub fn save(&self, macros: &[Macro]) -> Result<(), StoreError> {
        if self.path.exists() {
            self.create_timestamped_backup()?;
        } else if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|_| StoreError::SaveFailed(self.path.clone()))?;
        }

        let mut file = AtomicWriteFile::open(&self.path)
            .map_err(|_| StoreError::SaveFailed(self.path.clone()))?;

        for macro_ in macros {
            writeln!(file, "{}", macro_).map_err(|_| StoreError::SaveFailed(self.path.clone()))?;
        }

        file.commit()
            .map_err(|_| StoreError::SaveFailed(self.path.clone()))?;

        Ok(())
    }

    fn create_timestamped_backup(&self) -> Result<PathBuf, StoreError> {
        let content = fs::read_to_string(&self.path)?;

        fs::create_dir_all(&self.backup_dir)
            .map_err(|_| StoreError::BackupDirNotWritable(self.backup_dir.clone()))?;

        // Timestamp in YYYY-MM-DD_HHMMSS format
        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");

        let original_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("macros.txt");

        let backup_path = self.backup_dir.join(format!("{}.{}", original_name, timestamp));
        fs::write(&backup_path, &content)?;

        Ok(backup_path)
    }
}

/// Parses one save-file line into its name and definition halves.
///
/// The split is at the first comma; the definition grammar never produces
/// one, so everything after it belongs to the definition.
fn parse_macro_line(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, name) = take_until(",")(input)?;
    let (definition, _) = char(',').parse(rest)?;

    Ok(("", (name, definition)))
}

fn parse_save_file(content: &str) -> Result<Vec<Macro>, StoreError> {
    let mut macros = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1; // Human-readable numbers start at 1

        // The writer terminates every line, so a trailing blank is normal.
        if line.trim().is_empty() {
            continue;
        }

        let (name, definition) = match parse_macro_line(line) {
            Ok((_, parts)) => parts,
            Err(_) => return Err(StoreError::MalformedLine { line: line_num }),
        };

        let macro_ = Macro::new(name, definition)
            .map_err(|source| StoreError::InvalidMacro { line: line_num, source })?;
        macros.push(macro_);
    }

    Ok(macros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MacroError;
    use crate::core::validator::ValidationError;
    use tempfile::TempDir;

    /// Helper: store rooted in a fresh temp directory.
    fn test_store() -> (TempDir, MacroStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("macros.txt");
        let store = MacroStore::open(path).unwrap();
        (temp_dir, store)
    }

    fn test_macro(name: &str, definition: &str) -> Macro {
        Macro::new(name, definition).unwrap()
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_temp_dir, store) = test_store();

        let macros = vec![
            test_macro("greet", "hi\\E"),
            test_macro("pause", "a$50$a"),
            test_macro("caps", "<ab>c"),
        ];
        store.save(&macros).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        for (saved, loaded) in macros.iter().zip(&loaded) {
            assert_eq!(saved.name(), loaded.name());
            assert_eq!(saved.definition(), loaded.definition());
        }
    }

    #[test]
    fn test_load_missing_file_is_load_failed() {
        let (_temp_dir, store) = test_store();

        match store.load() {
            Err(StoreError::LoadFailed(path)) => assert_eq!(path, store.path()),
            other => panic!("Expected LoadFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_line_without_comma_fails_with_line_number() {
        let (_temp_dir, store) = test_store();
        fs::write(store.path(), "good,abc\nno comma here\n").unwrap();

        match store.load() {
            Err(StoreError::MalformedLine { line }) => assert_eq!(line, 2),
            other => panic!("Expected MalformedLine, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_definition_aborts_the_whole_load() {
        let (_temp_dir, store) = test_store();
        fs::write(store.path(), "good,abc\nbad,\\X\nalso_good,def\n").unwrap();

        match store.load() {
            Err(StoreError::InvalidMacro { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    MacroError::InvalidDefinition(ValidationError::UnknownSpecialKey {
                        mnemonic: 'X',
                        position: 2,
                    })
                );
            }
            other => panic!("Expected InvalidMacro, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_line_aborts_the_load() {
        let (_temp_dir, store) = test_store();
        fs::write(store.path(), ",abc\n").unwrap();

        assert!(matches!(
            store.load(),
            Err(StoreError::InvalidMacro {
                line: 1,
                source: MacroError::EmptyName,
            })
        ));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let (_temp_dir, store) = test_store();
        fs::write(store.path(), "a,x\n\nb,y\n\n").unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_definition_keeps_text_after_a_name_comma_split() {
        // The split is at the first comma only; a second comma lands in the
        // definition, where the grammar rejects it.
        let (_temp_dir, store) = test_store();
        fs::write(store.path(), "name,ab,cd\n").unwrap();

        assert!(matches!(
            store.load(),
            Err(StoreError::InvalidMacro { line: 1, .. })
        ));
    }

    #[test]
    fn test_overwriting_save_creates_a_backup_of_the_old_content() {
        let (temp_dir, store) = test_store();

        store.save(&[test_macro("a", "x")]).unwrap();
        store.save(&[test_macro("b", "y")]).unwrap();

        let backup_dir = temp_dir.path().join("backups");
        assert!(backup_dir.is_dir(), "Backup directory should be created");

        let backups: Vec<_> = fs::read_dir(&backup_dir).unwrap().collect();
        assert_eq!(backups.len(), 1);

        let backup_path = backups[0].as_ref().unwrap().path();
        assert_eq!(fs::read_to_string(backup_path).unwrap(), "a,x\n");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "b,y\n");
    }

    #[test]
    fn test_first_save_creates_no_backup() {
        let (temp_dir, store) = test_store();
        store.save(&[test_macro("a", "x")]).unwrap();

        assert!(!temp_dir.path().join("backups").exists());
    }

    #[test]
    fn test_save_preserves_order() {
        let (_temp_dir, store) = test_store();
        store
            .save(&[test_macro("c", "1"), test_macro("a", "2"), test_macro("b", "3")])
            .unwrap();

        let names: Vec<String> = store
            .load()
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
