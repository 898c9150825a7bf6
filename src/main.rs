// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use serde::Serialize;
use clap_complete::{generate, Shell};

use quotevault::app_config::{self, Config};
use quotevault::file_utils::FileManager;
use quotevault::source_utils;
use quotevault::transcript::{AnnotatedParagraph, AnnotationMode, HighlightSet, TranscriptDocument, format_timestamp};
use quotevault::TranscriptService;

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

/// CLI Wrapper for AnnotationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAnnotationMode {
    Spans,
    Legacy,
}

impl From<CliAnnotationMode> for AnnotationMode {
    fn from(mode: CliAnnotationMode) -> Self {
        match mode {
            CliAnnotationMode::Spans => AnnotationMode::Spans,
            CliAnnotationMode::Legacy => AnnotationMode::Legacy,
        }
    }
}

/// Rendering of a segmented transcript
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Document with paragraphs (and annotated paragraphs when highlights are given)
    Json,
    /// Paragraph blocks with timestamps and highlight markers
    Html,
    /// Plain paragraphs separated by blank lines
    Raw,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Raw => "txt",
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Highlights JSON file (array, or a record with a `highlights` field)
    #[arg(long, value_name = "FILE")]
    highlights: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Write to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write next to the input file as <name>.transcript.<ext>
    #[arg(long, conflicts_with = "output")]
    output_beside: bool,

    /// Highlight matching strategy
    #[arg(long, value_enum)]
    mode: Option<CliAnnotationMode>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Segment a captions JSON file into paragraphs
    Segment {
        /// Captions file: fragment array, provider payload or stored document
        #[arg(value_name = "CAPTIONS")]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Fetch a video transcript from the caption provider
    Fetch {
        /// Video link or identifier
        #[arg(value_name = "URL")]
        url: String,

        /// Caption language code (e.g., 'en', 'es'), or 'auto'
        #[arg(short, long)]
        language: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Format a playback offset in seconds as M:SS or H:MM:SS
    Timestamp {
        #[arg(value_name = "SECONDS")]
        seconds: f64,
    },

    /// List caption languages that can be requested
    Languages,

    /// Generate shell completions for quotevault
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// quotevault - transcript tools for a personal quote vault
///
/// Segments timed captions into readable paragraphs and overlays saved
/// highlights onto them.
#[derive(Parser, Debug)]
#[command(name = "quotevault")]
#[command(version)]
#[command(about = "Transcript segmentation and highlight annotation")]
#[command(long_about = "quotevault turns timed captions into readable paragraphs and marks saved highlights.

EXAMPLES:
    quotevault segment talk.json                         # HTML paragraphs to stdout
    quotevault segment talk.json -f raw                  # Plain text paragraphs
    quotevault segment talk.json --highlights hl.json    # Mark highlights
    quotevault fetch https://youtu.be/dQw4w9WgXcQ -l en  # Fetch and segment captions
    quotevault timestamp 3661                            # Prints 1:01:01
    quotevault completions bash > quotevault.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically. The caption API key can
    also be provided through the SUPADATA_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
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

    // @returns: ANSI color and tag for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "quotevault", &mut std::io::stdout());
            Ok(())
        }
        Commands::Timestamp { seconds } => {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(anyhow!("Timestamp must be a non-negative number of seconds, got {}", seconds));
            }
            println!("{}", format_timestamp(seconds));
            Ok(())
        }
        Commands::Languages => {
            for language in source_utils::available_languages() {
                println!("{:<5} {} ({})", language.code, language.label, language.label_en);
            }
            Ok(())
        }
        Commands::Segment { input, render } => {
            let config = load_config(&cli.config_path, cli.log_level.is_some(), render.mode.clone())?;
            let service = TranscriptService::from_config(&config)?;

            let fragments = FileManager::read_fragments(&input)?;
            info!("Loaded {} caption fragments from {:?}", fragments.len(), input);

            let document = service.build_document(fragments);
            emit(&service, &document, &render, Some(&input))
        }
        Commands::Fetch { url, language, render } => {
            let config = load_config(&cli.config_path, cli.log_level.is_some(), render.mode.clone())?;
            let service = TranscriptService::from_config(&config)?;

            let document = service.fetch_transcript(&url, language.as_deref()).await?;
            emit(&service, &document, &render, None)
        }
    }
}

/// Load or create the configuration file and apply command line overrides
fn load_config(config_path: &str, log_level_from_cli: bool, mode: Option<CliAnnotationMode>) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", config_path);
    }

    if let Some(mode) = mode {
        config.annotation.mode = mode.into();
    }

    if !log_level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Using segmentation thresholds: {:?}", config.segmentation);
    Ok(config)
}

/// JSON rendering: the document plus its highlight-annotated paragraphs
#[derive(Serialize)]
struct JsonOutput<'a> {
    document: &'a TranscriptDocument,
    annotated: Vec<AnnotatedParagraph>,
}

/// Render a document in the requested format and write it out
fn emit(service: &TranscriptService, document: &TranscriptDocument, render: &RenderArgs, input: Option<&Path>) -> Result<()> {
    let highlights = match &render.highlights {
        Some(path) => FileManager::read_highlights(path)?,
        None => HighlightSet::new(),
    };

    if document.is_empty() {
        warn!("Transcript contains no text after cleaning");
    }

    let rendered = match render.format {
        OutputFormat::Raw => document.raw.clone(),
        OutputFormat::Html => service.annotate(document, highlights.as_slice()),
        OutputFormat::Json => {
            let annotated = service
                .annotator()
                .annotate_paragraphs(&document.paragraphs, highlights.as_slice());
            serde_json::to_string_pretty(&JsonOutput { document, annotated })
                .context("Failed to serialize transcript")?
        }
    };

    let output = match (&render.output, render.output_beside, input) {
        (Some(path), _, _) => Some(path.clone()),
        (None, true, Some(input)) => Some(FileManager::generate_output_path(input, render.format.extension())),
        (None, true, None) => return Err(anyhow!("--output-beside needs an input file; use --output instead")),
        (None, false, _) => None,
    };

    match output {
        Some(path) => {
            FileManager::write_output(&path, &rendered)?;
            info!("Success: {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
