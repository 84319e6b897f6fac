//! File system utilities for Chroma.
//!
//! Every helper reports failures as [`Error::FileSystem`] carrying the
//! offending path and an [`FsErrorKind`], so callers can decide whether a
//! failure is fatal (output writes) or skippable (individual color files).

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chroma_common_core::{Error, FsErrorKind, Result};
use tracing::trace;

fn read_error(e: io::Error, path: &Path, what: &str) -> Error {
    match e.kind() {
        io::ErrorKind::NotFound => Error::fs(
            FsErrorKind::NotFound,
            format!("{what} not found: {}", path.display()),
            path,
            Some(e),
        ),
        io::ErrorKind::PermissionDenied => Error::fs(
            FsErrorKind::PermissionDenied,
            format!("permission denied: {}", path.display()),
            path,
            Some(e),
        ),
        io::ErrorKind::InvalidData => Error::fs(
            FsErrorKind::InvalidEncoding,
            format!("{what} is not valid UTF-8: {}", path.display()),
            path,
            Some(e),
        ),
        _ => Error::fs(
            FsErrorKind::Read,
            format!("failed to read {what}: {}", path.display()),
            path,
            Some(e),
        ),
    }
}

fn write_error(e: io::Error, path: &Path, what: &str) -> Error {
    let kind = if e.kind() == io::ErrorKind::PermissionDenied {
        FsErrorKind::PermissionDenied
    } else {
        FsErrorKind::Write
    };
    Error::fs(kind, format!("{what}: {}", path.display()), path, Some(e))
}

/// Read a file to string with size limit.
pub fn read_to_string(path: impl AsRef<Path>, max_size: usize) -> Result<String> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| read_error(e, path, "file"))?;

    if metadata.len() > max_size as u64 {
        return Err(Error::fs(
            FsErrorKind::TooLarge,
            format!(
                "file too large: {} ({} bytes, max: {})",
                path.display(),
                metadata.len(),
                max_size
            ),
            path,
            None,
        ));
    }

    fs::read_to_string(path).map_err(|e| read_error(e, path, "file"))
}

/// Write to a file atomically (write to temp, then rename).
///
/// Missing parent directories are created and an existing file at `path`
/// is replaced.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => {
            return Err(Error::fs(
                FsErrorKind::Write,
                format!("not a file path: {}", path.display()),
                path,
                None,
            ))
        }
    }

    {
        let mut file = File::create(&temp_path)
            .map_err(|e| write_error(e, &temp_path, "failed to create temporary file"))?;

        file.write_all(contents)
            .map_err(|e| write_error(e, &temp_path, "failed to write temporary file"))?;

        file.sync_all()
            .map_err(|e| write_error(e, &temp_path, "failed to sync temporary file"))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_error(e, path, "failed to move temporary file into place")
    })?;

    trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists, creating it and its parents if needed.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| write_error(e, path, "failed to create directory"))?;
    }
    Ok(())
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir).map_err(|e| read_error(e, dir, "directory"))?;

    let mut paths = Vec::new();
    for entry in read_dir {
        let path = entry.map_err(|e| read_error(e, dir, "directory entry"))?.path();
        if keep(&path) {
            paths.push(path);
        }
    }

    // read_dir order is platform dependent
    paths.sort();
    Ok(paths)
}

/// List immediate subdirectories of `dir`, sorted by name.
pub fn list_dirs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    sorted_entries(dir.as_ref(), Path::is_dir)
}

/// List regular files in `dir` whose extension equals `extension`, sorted by name.
///
/// `extension` is given without the leading dot.
pub fn list_files_with_extension(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    sorted_entries(dir.as_ref(), |path| {
        path.is_file() && path.extension().is_some_and(|ext| ext == extension)
    })
}

/// File name of `path` with its extension removed.
pub fn file_stem(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ts");

        write_string_atomic(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        // Overwrite without prompting
        write_string_atomic(&path, "world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "world");

        // No temp file left behind
        assert!(!dir.path().join(".test.ts.tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("builds/nested/colors.ts");

        write_string_atomic(&path, "export default {};\n").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("a/b/c");

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());
    }

    #[test]
    fn test_file_not_found() {
        let err = read_to_string("/nonexistent/path/color.txt", 1024).unwrap_err();
        assert_eq!(err.fs_kind(), FsErrorKind::NotFound);
        assert_eq!(err.path(), Path::new("/nonexistent/path/color.txt"));
    }

    #[test]
    fn test_read_with_size_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "x".repeat(100)).unwrap();

        assert_eq!(read_to_string(&path, 100).unwrap().len(), 100);

        let err = read_to_string(&path, 50).unwrap_err();
        assert_eq!(err.fs_kind(), FsErrorKind::TooLarge);
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = read_to_string(&path, 1024).unwrap_err();
        assert_eq!(err.fs_kind(), FsErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_list_dirs_sorted() {
        let dir = tempdir().unwrap();
        for name in ["reds", "blues", "greens"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("README.md"), "").unwrap();

        let dirs = list_dirs(dir.path()).unwrap();
        let names: Vec<_> = dirs.iter().filter_map(file_stem).collect();
        assert_eq!(names, vec!["blues", "greens", "reds"]);
    }

    #[test]
    fn test_list_files_with_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("navy.txt"), "").unwrap();
        fs::write(dir.path().join("azure.txt"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = list_files_with_extension(dir.path(), "txt").unwrap();
        let names: Vec<_> = files.iter().filter_map(file_stem).collect();
        assert_eq!(names, vec!["azure", "navy"]);
    }

    #[test]
    fn test_list_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let err = list_dirs(dir.path().join("missing")).unwrap_err();
        assert_eq!(err.fs_kind(), FsErrorKind::NotFound);
    }
}
