//! File reading utilities

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// List entry names under `root`, sorted, the way `ls` would print them.
///
/// Dotfiles are left out. Entries are not checked for being directories.
pub fn list_dir_names<P: AsRef<Path>>(root: P) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

/// Read a whole file as raw bytes
pub fn read_bytes<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Check if a file exists safely
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Latest modification time, in seconds since the epoch, of `root` and
/// everything below it.
///
/// Symlinks are not followed. Subdirectories that cannot be read are
/// skipped; only a failure on `root` itself is reported.
pub fn latest_mtime<P: AsRef<Path>>(root: P) -> io::Result<i64> {
    let root = root.as_ref();
    let meta = fs::symlink_metadata(root)?;
    let mut latest = mtime_secs(&meta);

    if !meta.is_dir() {
        return Ok(latest);
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("skipping {}: {}", dir.display(), err);
                continue;
            }
        };

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            let Ok(meta) = fs::symlink_metadata(&path) else {
                continue;
            };
            latest = latest.max(mtime_secs(&meta));
            if meta.is_dir() {
                pending.push(path);
            }
        }
    }

    Ok(latest)
}

fn mtime_secs(meta: &fs::Metadata) -> i64 {
    meta.modified().map(epoch_secs).unwrap_or(0)
}

/// Seconds since the epoch, clamped at zero.
fn epoch_secs(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn lists_names_sorted_without_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zed")).unwrap();
        fs::create_dir(dir.path().join("amy")).unwrap();
        fs::create_dir(dir.path().join(".snapshots")).unwrap();
        File::create(dir.path().join("lost+found")).unwrap();

        let names = list_dir_names(dir.path()).unwrap();
        assert_eq!(names, vec!["amy", "lost+found", "zed"]);
    }

    #[test]
    fn listing_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_dir_names(dir.path().join("nope")).is_err());
    }

    #[test]
    fn latest_mtime_sees_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        let file = File::create(nested.join("page.html")).unwrap();

        let newest = SystemTime::now() + std::time::Duration::from_secs(3600);
        file.set_modified(newest).unwrap();

        assert_eq!(latest_mtime(dir.path()).unwrap(), epoch_secs(newest));
    }

    #[test]
    fn latest_mtime_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(latest_mtime(dir.path().join("public_html")).is_err());
    }
}
