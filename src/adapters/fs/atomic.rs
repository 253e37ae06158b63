use std::ffi::OsString;
use std::fs::Permissions;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// A pending replacement of `target`.
///
/// Content goes to a temporary file in the target's own directory so the final
/// rename never crosses a filesystem boundary. Nothing is visible at `target`
/// until [`AtomicFile::commit`] succeeds; dropping an uncommitted handle removes
/// the temporary file.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp: NamedTempFile,
}

impl AtomicFile {
    /// Start a replacement using `<basename>.tmp` as the temp file prefix
    pub fn create(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let mut prefix = target
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        prefix.push(".tmp");
        Self::with_prefix(target, prefix)
    }

    pub fn with_prefix(target: impl Into<PathBuf>, prefix: impl Into<OsString>) -> Result<Self> {
        let target = target.into();
        let prefix: OsString = prefix.into();
        let dir = parent_dir(&target);
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(dir)
            .map_err(|e| Error::io("create temp file", dir, e))?;

        debug!(
            path = %target.display(),
            temp = %temp.path().display(),
            "created temp file"
        );

        Ok(Self { target, temp })
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.temp
            .write_all(data)
            .map_err(|e| Error::io("write", self.temp.path(), e))
    }

    /// Flush to stable storage, apply `mode`, then rename over the target
    pub fn commit(self, mode: u32) -> Result<()> {
        let Self { target, temp } = self;

        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io("sync", temp.path(), e))?;
        temp.as_file()
            .set_permissions(Permissions::from_mode(mode))
            .map_err(|e| Error::io("chmod", temp.path(), e))?;

        // On failure the returned handle is dropped, which unlinks the temp file
        let file = temp
            .persist(&target)
            .map_err(|e| Error::io("rename", &target, e.error))?;
        drop(file);

        debug!(path = %target.display(), mode = %format!("{:o}", mode), "replaced file");
        Ok(())
    }
}

/// Atomically replace `path` with `data` and permission bits `mode`.
///
/// Readers see either the old content or all of `data`, never a mix.
pub fn overwrite(path: impl AsRef<Path>, data: &[u8], mode: u32) -> Result<()> {
    let mut file = AtomicFile::create(path.as_ref())?;
    file.write_all(data)?;
    file.commit(mode)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_overwrite_creates_file_with_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        overwrite(&path, b"{\"a\":1}", 0o640).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{\"a\":1}");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o640);
        assert_eq!(entries(dir.path()), vec!["config.json"]);
    }

    #[test]
    fn test_overwrite_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data");
        fs::write(&path, b"old content that is longer than the new one").unwrap();

        overwrite(&path, b"new", 0o600).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o600);
    }

    #[test]
    fn test_overwrite_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"something").unwrap();

        overwrite(&path, b"", 0o644).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn test_temp_file_lives_next_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");

        let file = AtomicFile::create(&path).unwrap();
        assert_eq!(file.temp_path().parent(), Some(dir.path()));
        let name = file.temp_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("state.tmp"));
    }

    #[test]
    fn test_abandoned_write_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        fs::write(&path, b"old").unwrap();

        let mut file = AtomicFile::create(&path).unwrap();
        file.write_all(b"half of the new").unwrap();
        // Target is unchanged while the write is in flight
        assert_eq!(fs::read(&path).unwrap(), b"old");
        drop(file);

        assert_eq!(fs::read(&path).unwrap(), b"old");
        assert_eq!(entries(dir.path()), vec!["state"]);
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a regular file
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), b"keep").unwrap();

        let err = overwrite(&path, b"new", 0o644).unwrap_err();
        assert!(matches!(err, Error::Io { op: "rename", .. }));

        assert_eq!(fs::read(path.join("inner")).unwrap(), b"keep");
        assert_eq!(entries(dir.path()), vec!["occupied"]);
    }

    #[test]
    fn test_missing_directory_fails_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("file");

        let err = overwrite(&path, b"x", 0o644).unwrap_err();
        assert!(matches!(err, Error::Io { op: "create temp file", .. }));
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_relative_target_uses_current_dir() {
        assert_eq!(parent_dir(Path::new("secret")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/var/lib/secret")), Path::new("/var/lib"));
    }
}
