use std::fs;
use std::io;
use std::path::Path;

use crate::error::{RenameError, Result};
use crate::logging::LogSink;

/// Lists the direct children of `directory` whose extension (lower-cased,
/// with its leading dot) is in `extensions`, sorted in ascending
/// lexicographic order.
///
/// Non-recursive and read-only. `extensions` entries are expected
/// pre-normalized (lower-case, leading dot).
pub fn scan(directory: &Path, extensions: &[String], log: &dyn LogSink) -> Result<Vec<String>> {
    if !directory.is_dir() {
        return Err(RenameError::DirectoryNotFound(directory.to_path_buf()));
    }

    let entries = fs::read_dir(directory).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RenameError::DirectoryNotFound(directory.to_path_buf()),
        io::ErrorKind::PermissionDenied => RenameError::AccessDenied {
            path: directory.to_path_buf(),
            source,
        },
        _ => RenameError::Io(source),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        // Non-UTF-8 names cannot carry an episode code we could match on.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if has_extension_in(&name, extensions) {
            files.push(name);
        }
    }
    files.sort();

    log.debug(&format!(
        "Found files with extensions {extensions:?}: {files:?}"
    ));
    Ok(files)
}

fn has_extension_in(filename: &str, extensions: &[String]) -> bool {
    let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_lowercase());
    extensions.iter().any(|allowed| *allowed == dotted)
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use tempfile::TempDir;

    use super::*;
    use crate::logging::test_support::RecordingSink;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn filters_by_extension_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.mkv", "a.mkv", "c.srt", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let sink = RecordingSink::new();
        let files = scan(dir.path(), &exts(&[".mkv", ".mp4"]), &sink).unwrap();
        assert_eq!(files, vec!["a.mkv", "b.mkv"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("Show.S01E01.SRT")).unwrap();

        let sink = RecordingSink::new();
        let files = scan(dir.path(), &exts(&[".srt"]), &sink).unwrap();
        assert_eq!(files, vec!["Show.S01E01.SRT"]);
    }

    #[test]
    fn does_not_descend_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("season1.mkv")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("inner.mkv")).unwrap();
        File::create(dir.path().join("top.mkv")).unwrap();

        let sink = RecordingSink::new();
        let files = scan(dir.path(), &exts(&[".mkv"]), &sink).unwrap();
        assert_eq!(files, vec!["top.mkv"]);
    }

    #[test]
    fn missing_directory_is_a_fatal_error() {
        let sink = RecordingSink::new();
        let err = scan(Path::new("/no/such/directory"), &exts(&[".mkv"]), &sink).unwrap_err();
        assert!(matches!(err, RenameError::DirectoryNotFound(_)));
    }

    #[test]
    fn files_without_extension_are_skipped() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("README")).unwrap();
        File::create(dir.path().join("movie.mkv")).unwrap();

        let sink = RecordingSink::new();
        let files = scan(dir.path(), &exts(&[".mkv"]), &sink).unwrap();
        assert_eq!(files, vec!["movie.mkv"]);
    }
}
