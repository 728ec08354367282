use crate::domain::models::{EpisodeCode, RenamePair};
use crate::logging::LogSink;
use crate::workflows::episode;

/// Insertion-ordered episode code → filename mapping for one kind of file.
///
/// Order is the order codes first appeared in the sorted scan. A duplicate
/// code keeps its original position but takes the later filename
/// (last-write-wins), with a warning naming both files.
#[derive(Debug, Default)]
pub struct CodeMapping {
    entries: Vec<(EpisodeCode, String)>,
}

impl CodeMapping {
    pub fn build(files: &[String], log: &dyn LogSink) -> Self {
        let mut mapping = Self::default();
        for filename in files {
            let Some(code) = episode::extract(filename, log) else {
                continue;
            };
            match mapping.entries.iter_mut().find(|(c, _)| *c == code) {
                Some((_, existing)) => {
                    log.warning(&format!(
                        "Duplicate episode code '{code}': '{filename}' replaces '{existing}'"
                    ));
                    *existing = filename.clone();
                }
                None => mapping.entries.push((code, filename.clone())),
            }
        }
        mapping
    }

    pub fn get(&self, code: EpisodeCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, filename)| filename.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EpisodeCode, &str)> {
        self.entries
            .iter()
            .map(|(code, filename)| (*code, filename.as_str()))
    }
}

/// Joins videos to subtitles on equal episode code, in the video mapping's
/// insertion order.
///
/// Videos without a matching subtitle are logged as warnings and returned
/// separately; subtitles matching no video are silently left alone.
pub fn pair(
    videos: &CodeMapping,
    subtitles: &CodeMapping,
    log: &dyn LogSink,
) -> (Vec<RenamePair>, Vec<(EpisodeCode, String)>) {
    let mut pairs = Vec::new();
    let mut unmatched = Vec::new();

    for (code, video) in videos.iter() {
        match subtitles.get(code) {
            Some(subtitle) => pairs.push(RenamePair {
                video: video.to_string(),
                subtitle: subtitle.to_string(),
                code,
            }),
            None => {
                log.warning(&format!(
                    "No matching subtitle found for video '{video}' with episode code '{code}'"
                ));
                unmatched.push((code, video.to_string()));
            }
        }
    }

    (pairs, unmatched)
}
