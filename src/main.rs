mod cli;
mod domain;
mod error;
mod logging;
mod media;
mod workflows;

use anyhow::{bail, Result};
use clap::Parser;

use cli::Cli;
use logging::{LogSink, TracingSink};
use workflows::renamer::SubtitleRenamer;

fn main() {
    let cli = Cli::parse();

    // The guard flushes buffered file-log lines when dropped at exit.
    let _guard = match logging::init(cli.log_to_file, &cli.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let log = TracingSink;
    let renamer = SubtitleRenamer::new(cli.directory, cli.suffix)
        .with_video_extensions(&cli.video_extensions)
        .with_subtitle_extensions(&cli.subtitle_extensions);

    let summary = renamer.run(&log)?;

    log.info(&format!(
        "Done: {} renamed, {} unchanged, {} video(s) without a matching subtitle, {} failed",
        summary.renamed, summary.unchanged, summary.unmatched, summary.failed
    ));

    // Unmatched videos are warnings; only failed renames flip the exit code.
    if summary.failed > 0 {
        bail!("{} rename(s) failed", summary.failed);
    }
    Ok(())
}
