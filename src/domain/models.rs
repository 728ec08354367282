use std::fmt;

/// Canonical season/episode identifier.
///
/// Two filenames refer to the same episode iff their extracted codes are
/// equal; zero-padding in the source names never matters. The canonical
/// rendering is always `SxxExx` (e.g. `S01E01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeCode {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeCode {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// A video and the subtitle that shares its episode code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub video: String,
    pub subtitle: String,
    pub code: EpisodeCode,
}

/// Per-run counters reported at the end of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub unchanged: usize,
    pub unmatched: usize,
    pub failed: usize,
}
