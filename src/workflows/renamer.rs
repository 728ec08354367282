use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{RenamePair, RenameSummary};
use crate::error::{RenameError, Result};
use crate::logging::LogSink;
use crate::media::scanner;
use crate::workflows::pairing::{self, CodeMapping};

/// Outcome of renaming a single subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(String),
    /// The subtitle already carries the target name; nothing to do.
    Unchanged(String),
}

/// Batch renamer for one directory: scans videos and subtitles, pairs them
/// on episode code, and renames each paired subtitle after its video.
pub struct SubtitleRenamer {
    directory: PathBuf,
    video_extensions: Vec<String>,
    subtitle_extensions: Vec<String>,
    suffix: String,
}

impl SubtitleRenamer {
    pub fn new(directory: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            video_extensions: normalize_extensions([".mkv", ".mp4", ".avi"]),
            subtitle_extensions: normalize_extensions([".srt", ".ass", ".sub"]),
            suffix: suffix.into(),
        }
    }

    pub fn with_video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video_extensions = normalize_extensions(extensions);
        self
    }

    pub fn with_subtitle_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subtitle_extensions = normalize_extensions(extensions);
        self
    }

    /// Runs one scan → extract → pair → rename pass.
    ///
    /// A failed rename is logged and counted, then the batch continues with
    /// the remaining pairs; files already renamed stay renamed.
    pub fn run(&self, log: &dyn LogSink) -> Result<RenameSummary> {
        let videos = scanner::scan(&self.directory, &self.video_extensions, log)?;
        let subtitles = scanner::scan(&self.directory, &self.subtitle_extensions, log)?;

        let video_mapping = CodeMapping::build(&videos, log);
        let subtitle_mapping = CodeMapping::build(&subtitles, log);
        log.debug(&format!("Video mapping: {video_mapping:?}"));
        log.debug(&format!("Subtitle mapping: {subtitle_mapping:?}"));

        let (pairs, unmatched) = pairing::pair(&video_mapping, &subtitle_mapping, log);

        let mut summary = RenameSummary {
            unmatched: unmatched.len(),
            ..Default::default()
        };
        for pair in &pairs {
            match apply_rename(&self.directory, pair, &self.suffix, log) {
                Ok(RenameOutcome::Renamed(_)) => summary.renamed += 1,
                Ok(RenameOutcome::Unchanged(_)) => summary.unchanged += 1,
                Err(e) => {
                    log.error(&e.to_string());
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}

/// Renames one paired subtitle to the video's stem with the suffix inserted
/// before the subtitle's original extension.
///
/// Renaming a subtitle that already carries the target name is a no-op; an
/// existing different file at the target is an error rather than a silent
/// overwrite.
pub fn apply_rename(
    directory: &Path,
    pair: &RenamePair,
    suffix: &str,
    log: &dyn LogSink,
) -> Result<RenameOutcome> {
    let new_name = target_name(&pair.video, &pair.subtitle, suffix);

    if pair.subtitle == new_name {
        log.debug(&format!(
            "Subtitle '{}' already matches its video; skipping",
            pair.subtitle
        ));
        return Ok(RenameOutcome::Unchanged(new_name));
    }

    let new_path = directory.join(&new_name);
    if new_path.exists() {
        return Err(RenameError::TargetExists {
            subtitle: pair.subtitle.clone(),
            target: new_name,
        });
    }

    fs::rename(directory.join(&pair.subtitle), &new_path).map_err(|source| {
        RenameError::RenameFailed {
            from: pair.subtitle.clone(),
            to: new_name.clone(),
            source,
        }
    })?;

    log.info(&format!("Renamed '{}' to '{}'", pair.subtitle, new_name));
    Ok(RenameOutcome::Renamed(new_name))
}

/// `stem(video) + "." + suffix + ext(subtitle)`, where `stem` is the video
/// filename without its final extension and `ext` keeps the leading dot.
pub fn target_name(video: &str, subtitle: &str, suffix: &str) -> String {
    let stem = Path::new(video)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(video);
    let ext = Path::new(subtitle)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{stem}.{suffix}{ext}")
}

fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| {
            let ext = ext.as_ref().to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;
    use tracing::Level;

    use super::*;
    use crate::logging::test_support::RecordingSink;

    fn touch(dir: &TempDir, names: &[&str]) {
        for name in names {
            File::create(dir.path().join(name)).unwrap();
        }
    }

    fn listing(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn target_name_keeps_video_stem_and_subtitle_extension() {
        assert_eq!(
            target_name("Show.S01E01.mkv", "sub.S01E01.srt", "en"),
            "Show.S01E01.en.srt"
        );
        // Only the final extension is stripped from the video name.
        assert_eq!(
            target_name("Show.S1_E2.1080p.mp4", "whatever.ass", "ar"),
            "Show.S1_E2.1080p.ar.ass"
        );
    }

    #[test]
    fn renames_matching_subtitle() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Show.S01E01.mkv", "Show.S01E01.srt"]);

        let sink = RecordingSink::new();
        let summary = SubtitleRenamer::new(dir.path(), "en").run(&sink).unwrap();

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(listing(&dir), vec!["Show.S01E01.en.srt", "Show.S01E01.mkv"]);
        assert!(sink
            .messages_at(Level::INFO)
            .iter()
            .any(|m| m.contains("Show.S01E01.en.srt")));
    }

    #[test]
    fn pairs_across_padding_and_separator_variants() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Show.S1_E2.mp4", "Show.S01E02.ass"]);

        let sink = RecordingSink::new();
        let summary = SubtitleRenamer::new(dir.path(), "en").run(&sink).unwrap();

        assert_eq!(summary.renamed, 1);
        // The video's stem is preserved verbatim; only matching is normalized.
        assert_eq!(listing(&dir), vec!["Show.S1_E2.en.ass", "Show.S1_E2.mp4"]);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Show.S01E01.mkv", "Show.S01E01.srt"]);

        let renamer = SubtitleRenamer::new(dir.path(), "en");
        renamer.run(&RecordingSink::new()).unwrap();
        let before = listing(&dir);

        let summary = renamer.run(&RecordingSink::new()).unwrap();
        assert_eq!(summary.renamed, 0);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(listing(&dir), before);
    }

    #[test]
    fn unmatched_video_warns_and_leaves_files_alone() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Show.S02E05.mkv", "Other.S01E01.srt"]);

        let sink = RecordingSink::new();
        let summary = SubtitleRenamer::new(dir.path(), "en").run(&sink).unwrap();

        assert_eq!(summary.renamed, 0);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(listing(&dir), vec!["Other.S01E01.srt", "Show.S02E05.mkv"]);
        assert!(sink
            .messages_at(Level::WARN)
            .iter()
            .any(|m| m.contains("S02E05")));
    }

    #[test]
    fn duplicate_subtitle_codes_rename_the_lexicographically_last() {
        let dir = TempDir::new().unwrap();
        touch(
            &dir,
            &["Show.S01E01.mkv", "Show.A.S01E01.srt", "Show.B.S01E01.srt"],
        );

        let sink = RecordingSink::new();
        let summary = SubtitleRenamer::new(dir.path(), "en").run(&sink).unwrap();

        assert_eq!(summary.renamed, 1);
        assert_eq!(
            listing(&dir),
            vec!["Show.A.S01E01.srt", "Show.S01E01.en.srt", "Show.S01E01.mkv"]
        );
    }

    #[test]
    fn existing_target_fails_the_pair_but_not_the_run() {
        let dir = TempDir::new().unwrap();
        touch(
            &dir,
            &["Show.S01E01.mkv", "Show.S01E01.sub", "Show.S01E01.en.sub"],
        );

        let sink = RecordingSink::new();
        let summary = SubtitleRenamer::new(dir.path(), "en")
            .with_subtitle_extensions([".sub"])
            .run(&sink)
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.renamed, 0);
        assert!(!sink.messages_at(Level::ERROR).is_empty());
        // Both files are still there, untouched.
        assert_eq!(
            listing(&dir),
            vec!["Show.S01E01.en.sub", "Show.S01E01.mkv", "Show.S01E01.sub"]
        );
    }

    #[test]
    fn missing_directory_aborts_the_run() {
        let sink = RecordingSink::new();
        let err = SubtitleRenamer::new("/no/such/directory", "en")
            .run(&sink)
            .unwrap_err();
        assert!(matches!(err, RenameError::DirectoryNotFound(_)));
    }

    #[test]
    fn extension_options_are_normalized() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Show.S01E01.mkv", "Show.S01E01.srt"]);

        // Mixed case and missing dots are accepted.
        let summary = SubtitleRenamer::new(dir.path(), "en")
            .with_video_extensions(["MKV"])
            .with_subtitle_extensions(["srt"])
            .run(&RecordingSink::new())
            .unwrap();
        assert_eq!(summary.renamed, 1);
    }
}
