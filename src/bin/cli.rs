//! poster-harvest CLI
//!
//! Harvests a movie collection listing into `movie_info.json` plus a poster
//! directory, and composes the posters into a single wall image.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use poster_harvest::{
    error::Result,
    models::Config,
    pipeline,
    storage::{JsonRecordStore, RecordStore},
    utils::{self, fs::list_files_with_extensions},
};

/// poster-harvest - Movie Collection Harvester
#[derive(Parser, Debug)]
#[command(
    name = "poster-harvest",
    version,
    about = "Movie collection harvester and poster wall builder"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "harvest.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the collection listing and download posters
    Harvest {
        /// Collection owner (overrides harvest.subject_id)
        #[arg(long)]
        subject: Option<String>,

        /// Maximum number of pages (overrides harvest.max_pages)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Metadata output file (overrides paths.output_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compose downloaded posters into one image
    Wall {
        /// Poster directory (overrides paths.asset_dir)
        #[arg(long)]
        asset_dir: Option<PathBuf>,

        /// Output image (overrides paths.wall_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run harvest, then build the wall
    Run {
        /// Collection owner (overrides harvest.subject_id)
        #[arg(long)]
        subject: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Show saved metadata and poster directory info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Harvest {
            subject,
            max_pages,
            output,
        } => {
            if let Some(subject) = subject {
                config.harvest.subject_id = subject;
            }
            if let Some(max_pages) = max_pages {
                config.harvest.max_pages = max_pages;
            }
            if let Some(output) = output {
                config.paths.output_file = output;
            }
            config.validate()?;

            let outcome = pipeline::run_harvest(&config, &config.harvest_job())?;
            if outcome.is_failed() {
                log::warn!("Harvest ended early; partial results were saved.");
            }
        }

        Command::Wall { asset_dir, output } => {
            let asset_dir = asset_dir.unwrap_or_else(|| config.paths.asset_dir.clone());
            let output = output.unwrap_or_else(|| config.paths.wall_file.clone());
            pipeline::run_wall(&config.wall, &asset_dir, &output)?;
        }

        Command::Run { subject } => {
            if let Some(subject) = subject {
                config.harvest.subject_id = subject;
            }
            config.validate()?;
            let job = config.harvest_job();

            utils::log::step(1, 2, "Harvesting collection...");
            let outcome = pipeline::run_harvest(&config, &job)?;
            if outcome.is_failed() {
                log::warn!("Harvest ended early; building the wall from what is on disk.");
            }

            utils::log::step(2, 2, "Building poster wall...");
            pipeline::run_wall(&config.wall, &job.asset_dir, &config.paths.wall_file)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            let output_file = &config.paths.output_file;
            if output_file.exists() {
                let records = JsonRecordStore::new().load_records(output_file)?;
                let with_poster = records.iter().filter(|r| r.has_asset()).count();
                let with_note = records.iter().filter(|r| r.note.is_some()).count();
                log::info!("Metadata: {}", output_file.display());
                log::info!("  Records: {}", records.len());
                log::info!("  With poster: {}", with_poster);
                log::info!("  With comment: {}", with_note);
            } else {
                log::info!("No metadata file at {}", output_file.display());
            }

            let asset_dir = &config.paths.asset_dir;
            if asset_dir.is_dir() {
                let images = list_files_with_extensions(asset_dir, &config.wall.extensions)?;
                log::info!("Posters: {} file(s) in {}", images.len(), asset_dir.display());
            } else {
                log::info!("Poster directory {} not found", asset_dir.display());
            }

            log::info!(
                "Wall: {}",
                if config.paths.wall_file.exists() {
                    "exists"
                } else {
                    "not built yet"
                }
            );
        }
    }

    Ok(())
}
