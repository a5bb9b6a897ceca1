//! CLI Tooling
//!
//! Command-line surface of the size check: one file argument, at most one
//! check flag, plus state file, config and logging options.

use crate::check::{ByteUnit, CheckSpec, Evaluation, Threshold, ThresholdUnit};
use crate::config::{ConfigLoader, SizecheckConfig};
use crate::error::{CheckError, EXIT_SYNTAX_ERROR};
use crate::logging::LoggingConfig;
use crate::runner::SizeCheck;
use crate::store::FileSizeStore;
use clap::error::ErrorKind;
use clap::{Args, Parser};
use std::path::{Path, PathBuf};

/// Exit code for `--help` and `--version`; distinct from every verdict and error.
pub const EXIT_USAGE: i32 = 7;

/// Sizecheck CLI - report whether a file's size changed since the last run
#[derive(Parser, Debug)]
#[command(name = "sizecheck", version)]
#[command(about = "Check whether a file's size changed since the previous run")]
#[command(after_help = "Exit codes: 0 pass, 1 changed, 2 unchanged, 3 grew, 4 shrank, \
5 syntax error, 6 other error, 7 help")]
pub struct Cli {
    /// File whose size is checked
    pub file: PathBuf,

    #[command(flatten)]
    pub check: CheckArgs,

    /// State file recording the last seen sizes (overrides configuration)
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Check selection. At most one flag may be given; none means `--change`.
#[derive(Args, Debug, Default, Clone)]
#[group(id = "check", multiple = false)]
pub struct CheckArgs {
    /// Fail if the file size changed (default)
    #[arg(long)]
    pub change: bool,

    /// Fail if the file size did not change
    #[arg(long)]
    pub same: bool,

    /// Fail if the file grew at all
    #[arg(long)]
    pub grow: bool,

    /// Fail if the file shrank at all
    #[arg(long)]
    pub shrink: bool,

    /// Fail if the file grew by more than N percent
    #[arg(long, value_name = "N")]
    pub growper: Option<Threshold>,

    /// Fail if the file shrank by more than N percent
    #[arg(long, value_name = "N")]
    pub shrinkper: Option<Threshold>,

    /// Fail if the file grew by at least N bytes
    #[arg(long, value_name = "N", visible_alias = "growbyte")]
    pub growb: Option<Threshold>,

    /// Fail if the file shrank by at least N bytes
    #[arg(long, value_name = "N", visible_alias = "shrinkbyte")]
    pub shrinkb: Option<Threshold>,

    /// Fail if the file grew by at least N kilobytes
    #[arg(long, value_name = "N")]
    pub growkb: Option<Threshold>,

    /// Fail if the file shrank by at least N kilobytes
    #[arg(long, value_name = "N")]
    pub shrinkkb: Option<Threshold>,

    /// Fail if the file grew by at least N megabytes
    #[arg(long, value_name = "N")]
    pub growmb: Option<Threshold>,

    /// Fail if the file shrank by at least N megabytes
    #[arg(long, value_name = "N")]
    pub shrinkmb: Option<Threshold>,

    /// Fail if the file grew by at least N gigabytes
    #[arg(long, value_name = "N")]
    pub growgb: Option<Threshold>,

    /// Fail if the file shrank by at least N gigabytes
    #[arg(long, value_name = "N")]
    pub shrinkgb: Option<Threshold>,
}

impl CheckArgs {
    pub fn to_spec(&self) -> CheckSpec {
        let bytes = ThresholdUnit::Bytes;
        let grow_by = [
            (self.growper, ThresholdUnit::Percent),
            (self.growb, bytes(ByteUnit::Byte)),
            (self.growkb, bytes(ByteUnit::Kilobyte)),
            (self.growmb, bytes(ByteUnit::Megabyte)),
            (self.growgb, bytes(ByteUnit::Gigabyte)),
        ];
        let shrink_by = [
            (self.shrinkper, ThresholdUnit::Percent),
            (self.shrinkb, bytes(ByteUnit::Byte)),
            (self.shrinkkb, bytes(ByteUnit::Kilobyte)),
            (self.shrinkmb, bytes(ByteUnit::Megabyte)),
            (self.shrinkgb, bytes(ByteUnit::Gigabyte)),
        ];

        if self.same {
            return CheckSpec::same();
        }
        if self.grow {
            return CheckSpec::any_growth();
        }
        if self.shrink {
            return CheckSpec::any_shrinkage();
        }
        if let Some((threshold, unit)) = grow_by.iter().find_map(|(t, u)| t.map(|t| (t, *u))) {
            return CheckSpec::grow(unit, threshold);
        }
        if let Some((threshold, unit)) = shrink_by.iter().find_map(|(t, u)| t.map(|t| (t, *u))) {
            return CheckSpec::shrink(unit, threshold);
        }
        CheckSpec::change()
    }
}

impl Cli {
    /// Logging configuration with CLI flags applied over `base`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

/// Outcome of argument parsing, mapped to what the binary should do.
#[derive(Debug)]
pub enum ParseOutcome {
    Run(Box<Cli>),
    /// Help or version text; print and exit with [`EXIT_USAGE`].
    Usage(String),
    /// Syntax error with usage; print to stderr and exit with 5.
    Syntax(String),
}

impl ParseOutcome {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ParseOutcome::Run(_) => None,
            ParseOutcome::Usage(_) => Some(EXIT_USAGE),
            ParseOutcome::Syntax(_) => Some(EXIT_SYNTAX_ERROR),
        }
    }
}

pub fn parse_args<I, T>(args: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParseOutcome::Run(Box::new(cli)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                ParseOutcome::Usage(e.render().to_string())
            }
            _ => ParseOutcome::Syntax(e.render().to_string()),
        },
    }
}

/// Resolved runtime context for one invocation.
pub struct CliContext {
    config: SizecheckConfig,
    state_file: PathBuf,
    /// The default state file lives in a directory created on first write.
    create_state_dir: bool,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config_path: Option<&Path>, state_file: Option<&Path>) -> Result<Self, CheckError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(config, state_file)
    }

    /// Create a context from an already loaded configuration.
    pub fn with_config(
        config: SizecheckConfig,
        state_file: Option<&Path>,
    ) -> Result<Self, CheckError> {
        let resolved = config.storage.resolve_state_file(state_file)?;
        Ok(Self {
            config,
            state_file: resolved.path,
            create_state_dir: resolved.is_default,
        })
    }

    pub fn config(&self) -> &SizecheckConfig {
        &self.config
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Run one check against the resolved state file.
    pub fn execute(&self, target: &Path, spec: &CheckSpec) -> Result<Evaluation, CheckError> {
        tracing::debug!(
            target_file = %target.display(),
            state_file = %self.state_file.display(),
            check = ?spec,
            "Running size check"
        );
        let mut store = FileSizeStore::new(&self.state_file);
        if self.create_state_dir {
            store = store.creating_directory();
        }
        SizeCheck::new(store).run(target, spec)
    }
}
