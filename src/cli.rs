use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rename-subtitles")]
#[command(about = "Rename subtitle files after the video files that share their episode code")]
pub struct Cli {
    /// Directory containing the video and subtitle files
    pub directory: PathBuf,

    /// Suffix inserted before the subtitle's original extension
    /// (e.g. "Show.S01E01.ar.srt")
    #[arg(long, default_value = "ar")]
    pub suffix: String,

    /// Append log lines to a file in addition to the console
    #[arg(long)]
    pub log_to_file: bool,

    /// Log file used with --log-to-file
    #[arg(long, default_value = "app.log")]
    pub log_file: PathBuf,

    /// Video extensions to scan for (comma separated)
    #[arg(
        long = "video-ext",
        value_delimiter = ',',
        default_values_t = [".mkv".to_string(), ".mp4".to_string(), ".avi".to_string()]
    )]
    pub video_extensions: Vec<String>,

    /// Subtitle extensions to scan for (comma separated)
    #[arg(
        long = "subtitle-ext",
        value_delimiter = ',',
        default_values_t = [".srt".to_string(), ".ass".to_string(), ".sub".to_string()]
    )]
    pub subtitle_extensions: Vec<String>,
}
