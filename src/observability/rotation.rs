//! Append-only file with size-based rotation to numbered backups.
//!
//! On rotation `trace.json` becomes `trace.json.1`, the old `.1` becomes `.2`,
//! and so on; the oldest backup beyond the limit is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default size at which the live file is rotated (5 MiB).
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of rotated files kept next to the live one.
pub const MAX_BACKUPS: usize = 2;

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Option<File>,
    written: u64,
}

impl RotatingFile {
    /// Creates a writer for `path`. Nothing is opened until the first write.
    pub const fn new(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: None,
            written: 0,
        }
    }

    /// Appends `line` and a newline, rotating first if the file is full.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.file.is_none() {
            self.open()?;
        }
        if self.written > 0 && self.written + line.len() as u64 + 1 > self.max_bytes {
            self.rotate()?;
        }

        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Err(io::Error::new(io::ErrorKind::NotFound, "trace file not open")),
        };
        writeln!(file, "{line}")?;
        file.flush()?;
        self.written += line.len() as u64 + 1;
        Ok(())
    }

    fn open(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;

        if self.max_backups == 0 {
            fs::remove_file(&self.path)?;
        } else {
            let _ = fs::remove_file(backup_path(&self.path, self.max_backups));
            for n in (1..self.max_backups).rev() {
                let from = backup_path(&self.path, n);
                if from.exists() {
                    fs::rename(&from, backup_path(&self.path, n + 1))?;
                }
            }
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }

        self.open()
    }
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}
