// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use qa_translator::app_config::{self, Config, TranslationProvider};
use qa_translator::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the dataset (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for qa-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct TranslateArgs {
    /// Input dataset CSV (qa_id, question, answer, ...)
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Output CSV for the first target language
    #[arg(long)]
    primary_output: Option<PathBuf>,

    /// Output CSV for the second target language
    #[arg(long)]
    secondary_output: Option<PathBuf>,

    /// Output CSV for rows that failed in either language
    #[arg(long)]
    errors_output: Option<PathBuf>,

    /// Rows per translation call
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Save outputs whenever this many first-language rows have accumulated
    #[arg(long)]
    save_interval: Option<usize>,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// First target language code (e.g., 'ru')
    #[arg(long)]
    primary_language: Option<String>,

    /// Second target language code (e.g., 'kk')
    #[arg(long)]
    secondary_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// qa-translator - resumable QA dataset translation
///
/// Translates the question and answer columns of a CSV dataset into two
/// languages, saving progress so an interrupted run picks up where it stopped.
#[derive(Parser, Debug)]
#[command(name = "qa-translator")]
#[command(version)]
#[command(about = "Resumable two-language translation of question-answer datasets")]
#[command(long_about = "qa-translator translates the question and answer columns of a CSV dataset into two languages.

EXAMPLES:
    qa-translator data/part2.csv                          # Translate using default config
    qa-translator -b 20 --save-interval 200 data/part2.csv
    qa-translator --primary-language de --secondary-language fr data/part2.csv
    qa-translator completions bash > qa-translator.bash   # Generate bash completions

RESUMING:
    Rerunning the same command continues after the highest qa_id found in the
    two language outputs. Rows that failed are kept in the errors output.

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Initialize the logger once with trace so later max-level changes take effect
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "qa-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load the configuration file, creating a default one when it is missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

/// Override config values with CLI options when provided
fn apply_overrides(config: &mut Config, options: TranslateArgs) {
    if let Some(input) = options.input_file {
        config.files.input = input;
    }
    if let Some(path) = options.primary_output {
        config.files.primary_output = Some(path);
    }
    if let Some(path) = options.secondary_output {
        config.files.secondary_output = Some(path);
    }
    if let Some(path) = options.errors_output {
        config.files.errors_output = Some(path);
    }
    if let Some(batch_size) = options.batch_size {
        config.pipeline.batch_size = batch_size;
    }
    if let Some(save_interval) = options.save_interval {
        config.pipeline.save_interval = save_interval;
    }
    if let Some(lang) = options.source_language {
        config.source_language = lang;
    }
    if let Some(lang) = options.primary_language {
        config.primary_language = lang;
    }
    if let Some(lang) = options.secondary_language {
        config.secondary_language = lang;
    }
    if let Some(provider) = options.provider {
        config.provider.provider_type = provider.into();
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it before loading config
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_config(&options.config_path)?;
    apply_overrides(&mut config, options);
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller.run().await?;

    Ok(())
}
