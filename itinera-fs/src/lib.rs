//! Capability-based file helpers over UTF-8 paths.
//!
//! Every helper resolves the parent directory with ambient authority and
//! then works relative to it, so callers never touch `std::fs` directly.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read a UTF-8 file into a string.
///
/// # Errors
/// Propagates IO failures from opening the parent directory or the file.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent_dir(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories and
/// truncating any existing file.
///
/// # Errors
/// Propagates IO failures from directory creation or the write.
pub fn write_utf8_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.write(name.as_str(), contents)
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates IO failures from opening the base directory or creating the
/// missing components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_at_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Whether `path` names an existing regular file.
///
/// A missing file or missing parent directory yields `Ok(false)`.
///
/// # Errors
/// Propagates IO failures other than `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let metadata = open_parent_dir(path).and_then(|(dir, name)| dir.metadata(name.as_str()));
    match metadata {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("path '{path}' has no file name")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Open the filesystem root (or `.` for relative paths) and return the
/// remainder of `dir` relative to it.
fn split_at_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut components = dir.as_std_path().components();
    let base = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // Skip the root separator that follows a drive prefix.
            if matches!(components.clone().next(), Some(Component::RootDir)) {
                components.next();
            }
            format!("{prefix}{}", std::path::MAIN_SEPARATOR)
        }
        Some(Component::RootDir) => std::path::MAIN_SEPARATOR.to_string(),
        _ => {
            components = dir.as_std_path().components();
            ".".to_owned()
        }
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;
    let base = fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?;
    Ok((base, relative))
}
