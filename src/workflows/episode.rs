use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::EpisodeCode;
use crate::logging::LogSink;

// One alternation branch per separator variant (none, `_`, `-`), with
// per-branch group names since the regex crate forbids reusing one name
// across branches. The leftmost match in the filename wins; at equal start
// positions the no-separator branch takes priority over `_` and `-`.
static EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)S(?<season>\d{1,2})E(?<episode>\d{1,2})|S(?<season_u>\d{1,2})_E(?<episode_u>\d{1,2})|S(?<season_d>\d{1,2})-E(?<episode_d>\d{1,2})",
    )
    .expect("episode pattern is valid")
});

/// Extracts the episode code from a filename, normalized to canonical
/// `SxxExx` form.
///
/// Returns `None` when the name carries no recognizable code; that is an
/// expected outcome (extras, samples), not an error.
pub fn extract(filename: &str, log: &dyn LogSink) -> Option<EpisodeCode> {
    let caps = EPISODE_PATTERN.captures(filename)?;
    // Exactly one branch participated; take its groups.
    let season = caps
        .name("season")
        .or_else(|| caps.name("season_u"))
        .or_else(|| caps.name("season_d"))?;
    let episode = caps
        .name("episode")
        .or_else(|| caps.name("episode_u"))
        .or_else(|| caps.name("episode_d"))?;
    // 1-2 digit groups always fit a u32; parsing drops any leading zero.
    let season: u32 = season.as_str().parse().ok()?;
    let episode: u32 = episode.as_str().parse().ok()?;

    let code = EpisodeCode::new(season, episode);
    log.debug(&format!(
        "Extracted episode code '{code}' from '{filename}'"
    ));
    Some(code)
}
