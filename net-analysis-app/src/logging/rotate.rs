use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only log file that rolls over once it would reach `max_bytes`.
///
/// Backups are `<path>.1` (newest) through `<path>.<backup_count>` (oldest).
/// With `backup_count == 0` the file is never rolled over.
#[derive(Debug)]
pub struct SizeRotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    size: u64,
}

impl SizeRotatingWriter {
    /// Opens `path` for appending, creating missing parent directories.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: u32) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_append(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.backup_count > 0 && self.size > 0 && self.size + incoming as u64 >= self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        for index in (1..self.backup_count).rev() {
            let source = self.backup_path(index);
            if source.exists() {
                fs::rename(&source, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = open_append(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for SizeRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/logs/app.log");

        let mut writer = SizeRotatingWriter::open(&path, 1024, 1).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "hello\n");
    }

    #[test]
    fn test_rolls_over_and_keeps_newest_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = SizeRotatingWriter::open(&path, 10, 2).unwrap();

        for line in ["line-1\n", "line-2\n", "line-3\n", "line-4\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(read(&path), "line-4\n");
        assert_eq!(read(&writer.backup_path(1)), "line-3\n");
        assert_eq!(read(&writer.backup_path(2)), "line-2\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn test_reaching_the_limit_exactly_rolls_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = SizeRotatingWriter::open(&path, 10, 1).unwrap();

        writer.write_all(b"12345\n").unwrap();
        writer.write_all(b"abc\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "abc\n");
        assert_eq!(read(&writer.backup_path(1)), "12345\n");
    }

    #[test]
    fn test_zero_backups_never_rolls_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = SizeRotatingWriter::open(&path, 4, 0).unwrap();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "first\nsecond\n");
        assert!(!writer.backup_path(1).exists());
    }

    #[test]
    fn test_existing_size_counts_toward_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "previous\n").unwrap();

        let mut writer = SizeRotatingWriter::open(&path, 12, 1).unwrap();
        writer.write_all(b"next\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "next\n");
        assert_eq!(read(&writer.backup_path(1)), "previous\n");
    }
}
