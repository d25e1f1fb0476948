//! zs - inspect and edit ZIP archives in memory.
//!
//! Every command reads the whole archive into an archive session, runs one
//! operation against it and, for edits, exports the session back to disk.

mod exit_codes;
mod logging;
mod output;

use clap::{ArgGroup, Args, Parser, Subcommand};
use exit_codes::ExitCode;
use logging::{init_logging, LogConfig, LogFormat, LogLevel};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use zs_archive::{ArchiveError, Session};
use zs_config::{load_config, ArchiveConfig, ValidationError};

/// Inspect and edit ZIP archives in memory
#[derive(Parser)]
#[command(name = "zs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to zs.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

impl GlobalOpts {
    fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the archive as a directory tree
    Tree(ViewArgs),

    /// List every directory and file entry
    Ls(ViewArgs),

    /// Print a member as text
    Cat {
        /// Archive file
        archive: PathBuf,
        /// Member path inside the archive
        member: String,
    },

    /// Replace or create a text member and save the archive
    Put(PutArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Archive file
    archive: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("content").required(true).args(["text", "from"])))]
struct PutArgs {
    /// Archive file
    archive: PathBuf,

    /// Member path inside the archive
    member: String,

    /// New content given inline
    #[arg(long)]
    text: Option<String>,

    /// Read new content from a file
    #[arg(long)]
    from: Option<PathBuf>,

    /// Write the result here instead of overwriting the archive
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Archive(#[from] ArchiveError),

    #[error("config: {0}")]
    Config(#[from] ValidationError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Archive(err) => ExitCode::from(err),
            CliError::Config(_) => ExitCode::ConfigError,
            CliError::Io { .. } => ExitCode::IoError,
            CliError::Json(_) => ExitCode::InternalError,
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(cli.global.log_level(), cli.global.log_format);
    init_logging(&log_config);

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    };

    debug!(
        code = exit_code.code_name(),
        success = exit_code.is_success(),
        "Exiting"
    );
    exit_code.into()
}

fn run(cli: &Cli) -> CliResult<()> {
    let (config, source) = load_config(cli.global.config.as_deref())?;
    debug!(source = %source, "Configuration resolved");

    match &cli.command {
        Commands::Tree(args) => run_tree(&config, args),
        Commands::Ls(args) => run_ls(&config, args),
        Commands::Cat { archive, member } => run_cat(&config, archive, member),
        Commands::Put(args) => run_put(&config, args),
        Commands::Config => {
            println!("# source: {source}");
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn open_session(config: &ArchiveConfig, archive: &Path) -> CliResult<Session> {
    let bytes = std::fs::read(archive).map_err(|e| CliError::io(archive, e))?;
    let mut session = Session::new(config);
    session.load(&bytes)?;
    Ok(session)
}

fn run_tree(config: &ArchiveConfig, args: &ViewArgs) -> CliResult<()> {
    let session = open_session(config, &args.archive)?;
    let roots = session.tree()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&roots)?);
    } else {
        print!("{}", output::render_tree(&roots));
    }
    Ok(())
}

fn run_ls(config: &ArchiveConfig, args: &ViewArgs) -> CliResult<()> {
    let session = open_session(config, &args.archive)?;
    let entries = session.entries()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", output::render_entries(&entries));
    }
    Ok(())
}

fn run_cat(config: &ArchiveConfig, archive: &Path, member: &str) -> CliResult<()> {
    let session = open_session(config, archive)?;
    print!("{}", session.read_text(member)?);
    Ok(())
}

fn run_put(config: &ArchiveConfig, args: &PutArgs) -> CliResult<()> {
    let content = match (&args.text, &args.from) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?,
        (None, None) => String::new(),
    };

    let mut session = open_session(config, &args.archive)?;
    session.write_text(&args.member, &content)?;
    let bytes = session.export()?;

    let target = args.output.as_deref().unwrap_or(&args.archive);
    std::fs::write(target, &bytes).map_err(|e| CliError::io(target, e))?;

    info!(
        archive = %target.display(),
        member = %args.member,
        bytes = bytes.len(),
        "Archive saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_put_requires_content() {
        let result = Cli::try_parse_from(["zs", "put", "a.zip", "x.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["zs", "-vv", "config"]).unwrap();
        assert_eq!(cli.global.log_level(), Some(LogLevel::Trace));

        let cli = Cli::try_parse_from(["zs", "-q", "config"]).unwrap();
        assert_eq!(cli.global.log_level(), Some(LogLevel::Error));

        let cli = Cli::try_parse_from(["zs", "config"]).unwrap();
        assert_eq!(cli.global.log_level(), None);
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["zs", "--log-format", "jsonl", "config"]).unwrap();
        assert_eq!(cli.global.log_format, Some(LogFormat::Jsonl));
    }
}
