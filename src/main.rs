mod cleanup;
mod config;
mod drafts;
mod error;
mod frontmatter;
mod logging;

use clap::Parser;
use cleanup::Normalizer;
use config::Rules;
use error::CleanupError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "wpclean",
    about = "Clean WordPress-exported markdown for static site generators"
)]
struct Cli {
    #[arg(
        long,
        env = "WPCLEAN_DIR",
        default_value = "drafts",
        help = "Directory to scan for markdown files"
    )]
    dir: PathBuf,

    #[arg(long, help = "Report files that would change without writing")]
    dry_run: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[arg(long, help = "Only process top-level .md files")]
    no_recursive: bool,

    #[arg(
        long,
        env = "WPCLEAN_CONFIG",
        help = "YAML file overriding the built-in cleanup rules"
    )]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Summary {
    processed: usize,
    changed: usize,
    failed: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(summary) if summary.failed > 0 => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, CleanupError> {
    let rules = match &cli.config {
        Some(path) => Rules::load(path)?,
        None => Rules::default(),
    };
    let normalizer = Normalizer::new(&rules)?;

    drafts::ensure_directory(&cli.dir)?;

    let recursive = !cli.no_recursive;
    debug!(
        dir = %cli.dir.display(),
        recursive,
        "scanning for markdown files"
    );
    let files = drafts::collect_markdown_files(&cli.dir, recursive);

    let mut summary = Summary::default();

    for path in &files {
        summary.processed += 1;

        match drafts::clean_file(&normalizer, path, cli.dry_run) {
            Ok(false) => debug!("unchanged: {}", path.display()),
            Ok(true) => {
                summary.changed += 1;
                if cli.dry_run {
                    println!("[DRY] Would clean: {}", path.display());
                } else {
                    println!("Cleaned: {}", path.display());
                }
            }
            Err(e) => {
                summary.failed += 1;
                warn!("{e}");
            }
        }
    }

    println!(
        "Processed {} markdown files; changed {}{}.",
        summary.processed,
        summary.changed,
        if cli.dry_run { " (dry-run)" } else { "" }
    );
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some files could not be cleaned");
    }

    Ok(summary)
}
