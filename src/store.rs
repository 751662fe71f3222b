use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{R50Error, Result};

/// In-memory copy of the notes file: one line per record, blank lines dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub lines: Vec<String>,
}

impl Store {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }

    pub fn parse(content: &str) -> Self {
        Self::from_lines(content.lines())
    }

    /// Load the store; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No store at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let store = Self::parse(&fs::read_to_string(path)?);
        debug!("Loaded {} lines from {}", store.lines.len(), path.display());
        Ok(store)
    }

    /// Replace the file with this store's lines via a temp file and rename.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let dir = parent_dir(path);
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        for line in &self.lines {
            writeln!(tmp, "{line}")?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        info!("Rewrote {} with {} lines", path.display(), self.lines.len());
        Ok(())
    }
}

/// Append one line, starting a fresh line if the file does not end with one.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    fs::create_dir_all(parent_dir(path))?;
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }
    writeln!(file, "{line}")?;
    info!("Appended to {}", path.display());
    Ok(())
}

/// Exclusive advisory lock on a hidden `.<store>.lock` sibling, released on drop.
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    pub fn acquire(store_path: &Path) -> Result<Self> {
        fs::create_dir_all(parent_dir(store_path))?;
        let path = lock_path(store_path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        if let Err(e) = file.try_lock_exclusive() {
            if is_contended(&e) {
                return Err(R50Error::Locked(store_path.to_path_buf()));
            }
            return Err(e.into());
        }
        debug!("Locked {}", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!("Unlocked {}", self.path.display());
    }
}

fn is_contended(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

fn lock_path(store_path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(store_path.file_name().unwrap_or_default());
    name.push(".lock");
    store_path.with_file_name(name)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(&dir.path().join("nope.txt")).unwrap();
        assert!(store.lines.is_empty());
    }

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let store = Store::parse("  a  \n\n\tb\n   \n");
        assert_eq!(store.lines, vec!["a", "b"]);
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("notes.txt");
        append_line(&path, "one").unwrap();
        append_line(&path, "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_append_repairs_missing_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "legacy").unwrap();
        append_line(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "legacy\nnew\n");
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "old\nstuff\n").unwrap();
        Store::from_lines(["x", "y"]).write_atomic(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\ny\n");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_contended_lock_reports_locked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let held = StoreLock::acquire(&path).unwrap();
        match StoreLock::acquire(&path) {
            Err(R50Error::Locked(locked)) => assert_eq!(locked, path),
            other => panic!("expected Locked, got {:?}", other.map(|_| ())),
        }
        drop(held);
        assert!(StoreLock::acquire(&path).is_ok());
    }

    #[test]
    fn test_only_contention_counts_as_locked() {
        assert!(is_contended(&fs2::lock_contended_error()));
        assert!(is_contended(&std::io::Error::from(ErrorKind::WouldBlock)));
        assert!(!is_contended(&std::io::Error::from(ErrorKind::PermissionDenied)));
        assert!(!is_contended(&std::io::Error::from(ErrorKind::Unsupported)));
    }

    #[test]
    fn test_lock_file_is_hidden_sibling() {
        let path = Path::new("/home/me/Documents/budget_notes.txt");
        assert_eq!(
            lock_path(path),
            PathBuf::from("/home/me/Documents/.budget_notes.txt.lock")
        );
    }
}
