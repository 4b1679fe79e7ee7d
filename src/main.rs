// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod marker_processor;
mod sequence_builder;
mod subtitle_processor;
mod time_utils;
mod timeline_writer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a timeline XML from subtitles, markers and images (default command)
    #[command(alias = "generate")]
    Generate(GenerateArgs),

    /// Generate shell completions for subsequence
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Subtitle file (.srt)
    #[arg(value_name = "SUBTITLES")]
    subtitle_path: PathBuf,

    /// Marker XML file exported from the editing software
    #[arg(value_name = "MARKERS")]
    marker_path: PathBuf,

    /// Directory containing the numbered images (1.png, 2.png, ...)
    #[arg(value_name = "IMAGES_DIR")]
    images_dir: PathBuf,

    /// Output path for the generated timeline XML
    #[arg(short, long, default_value = "generated_sequence.xml")]
    output: PathBuf,

    /// Frames per second of the sequence
    #[arg(short, long)]
    fps: Option<u32>,

    /// Display name of the generated sequence
    #[arg(short = 'n', long)]
    sequence_name: Option<String>,

    /// Extension of the numbered image files (without the dot)
    #[arg(short = 'e', long)]
    image_extension: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subsequence - subtitle-driven image sequence generator
///
/// Converts an SRT subtitle track, a marker XML export and a folder of
/// numbered still images into a frame-accurate timeline XML for
/// non-linear editing software.
#[derive(Parser, Debug)]
#[command(name = "subsequence")]
#[command(version = "1.0.0")]
#[command(about = "Generate edit timelines from subtitles, markers and numbered images")]
#[command(long_about = "subsequence groups subtitles into marker-delimited blocks and places one
numbered image per subtitle on a timeline: the first image of a block
holds until the block ends, middle images run from their subtitle to the
block end, and the last image is trimmed to its own subtitle.

EXAMPLES:
    subsequence subs.srt markers.xml ./images          # Generate with default config
    subsequence -f 25 subs.srt markers.xml ./images    # Force a 25 fps timebase
    subsequence -o out.xml subs.srt markers.xml ./img  # Choose the output path
    subsequence -e jpg subs.srt markers.xml ./images   # Images are 1.jpg, 2.jpg, ...
    subsequence completions bash > subsequence.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file (.srt)
    #[arg(value_name = "SUBTITLES")]
    subtitle_path: Option<PathBuf>,

    /// Marker XML file exported from the editing software
    #[arg(value_name = "MARKERS")]
    marker_path: Option<PathBuf>,

    /// Directory containing the numbered images (1.png, 2.png, ...)
    #[arg(value_name = "IMAGES_DIR")]
    images_dir: Option<PathBuf>,

    /// Output path for the generated timeline XML
    #[arg(short, long, default_value = "generated_sequence.xml")]
    output: PathBuf,

    /// Frames per second of the sequence
    #[arg(short, long)]
    fps: Option<u32>,

    /// Display name of the generated sequence
    #[arg(short = 'n', long)]
    sequence_name: Option<String>,

    /// Extension of the numbered image files (without the dot)
    #[arg(short = 'e', long)]
    image_extension: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsequence", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        None => {
            // Default behavior - use top-level args for direct invocation
            let subtitle_path = cli
                .subtitle_path
                .ok_or_else(|| anyhow!("SUBTITLES is required when no subcommand is specified"))?;
            let marker_path = cli
                .marker_path
                .ok_or_else(|| anyhow!("MARKERS is required when no subcommand is specified"))?;
            let images_dir = cli
                .images_dir
                .ok_or_else(|| anyhow!("IMAGES_DIR is required when no subcommand is specified"))?;

            run_generate(GenerateArgs {
                subtitle_path,
                marker_path,
                images_dir,
                output: cli.output,
                fps: cli.fps,
                sequence_name: cli.sequence_name,
                image_extension: cli.image_extension,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
        }
    }
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(fps) = options.fps {
        config.fps = fps;
    }

    if let Some(name) = &options.sequence_name {
        config.sequence_name = name.clone();
    }

    if let Some(extension) = &options.image_extension {
        config.image_extension = extension.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller (validates the configuration) and run the pipeline
    let controller = Controller::with_config(config)?;
    controller.run(
        &options.subtitle_path,
        &options.marker_path,
        &options.images_dir,
        &options.output,
    )?;

    Ok(())
}
