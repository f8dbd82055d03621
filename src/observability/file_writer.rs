//! Rotating file writer with size-based rotation and backup retention.
//!
//! This module provides a thread-safe log sink that automatically rotates the
//! file when it exceeds a size threshold, keeping a fixed number of backups.
//! It plugs into `tracing-subscriber` through [`MakeWriter`], so every
//! formatted event is appended to the file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If size exceeds the threshold, rotate:
///    - Rename current file to `<name>.<unix_millis>`
///    - Open a new empty file on the next write
///    - Remove the oldest backups beyond the retention limit
///
/// # Thread Safety
///
/// Uses an internal `Mutex`, so the subscriber may write from any thread.
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<File>>,
    max_bytes: u64,
    max_backups: usize,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB / 3 backups policy.
    ///
    /// The file is not opened until the first write operation.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with a custom rotation threshold and retention.
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            writer: Mutex::new(None),
            max_bytes,
            max_backups,
        }
    }

    /// Appends `bytes` to the file, rotating first if it has grown too large.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening, or writing fails, or if the lock
    /// is poisoned.
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;

        file.write_all(bytes)?;
        file.flush()
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    /// Renames the current file to a timestamped backup and prunes old ones.
    ///
    /// Stamps strictly increase, so the newest backup always sorts first even
    /// when several rotations land in the same millisecond.
    fn rotate_files(&self) -> io::Result<()> {
        let now = chrono::Utc::now().timestamp_millis();
        let stamp = match self.backups()?.first() {
            Some((newest, _)) => now.max(newest + 1),
            None => now,
        };
        let backup_path = self.backup_path(stamp);

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    fn backup_path(&self, stamp: i64) -> PathBuf {
        let mut name = self.file_path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{stamp}"));
        self.file_path.with_file_name(name)
    }

    /// Lists backups of this file, newest first.
    fn backups(&self) -> io::Result<Vec<(i64, PathBuf)>> {
        let parent_dir = match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("Invalid file name"))?;

        let mut backups: Vec<(i64, PathBuf)> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter_map(|path| {
                let stamp = path
                    .file_name()?
                    .to_str()?
                    .strip_prefix(&prefix)?
                    .parse::<i64>()
                    .ok()?;
                Some((stamp, path))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(backups)
    }

    /// Removes backups beyond the retention limit. Individual deletion
    /// failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        for (_, old_backup) in self.backups()?.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyst.log");
        let writer = FileWriter::new(path.clone());

        writer.write_bytes(b"first\n").unwrap();
        (&writer).write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyst.log");
        let writer = FileWriter::with_limits(path.clone(), 16, 2);

        for n in 0..10 {
            writer.write_bytes(format!("line number {n:02}\n").as_bytes()).unwrap();
        }

        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(fs::metadata(&path).unwrap().len() <= 32);
        // Rotation happens once the file exceeds 16 bytes, i.e. every two lines.
        let newest = fs::read_to_string(&backups[0].1).unwrap();
        assert_eq!(newest, "line number 06\nline number 07\n");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "line number 08\nline number 09\n"
        );
    }

    #[test]
    fn new_backup_sorts_after_existing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyst.log");
        let future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        fs::write(dir.path().join(format!("lyst.log.{future}")), "stale\n").unwrap();

        let writer = FileWriter::with_limits(path, 16, 1);
        for n in 0..3 {
            writer.write_bytes(format!("line number {n:02}\n").as_bytes()).unwrap();
        }

        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].0, future + 1);
        assert_eq!(
            fs::read_to_string(&backups[0].1).unwrap(),
            "line number 00\nline number 01\n"
        );
    }

    #[test]
    fn unrelated_files_are_not_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyst.log");
        fs::write(dir.path().join("lyst.log.old"), "x").unwrap();
        fs::write(dir.path().join("lyst.db"), "x").unwrap();

        let writer = FileWriter::new(path);
        assert!(writer.backups().unwrap().is_empty());
    }
}
