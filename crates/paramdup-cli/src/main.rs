//! paramdup CLI - duplicate the parameter of single-parameter PHP methods
//!
//! `function foo(int $param)` becomes `function foo(int $param, int $param1)`.
//! Files are rewritten in place unless `--check` is given.

mod config;
mod logging;
mod output;
mod process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use rayon::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use config::Config;
use output::{DuplicationInfo, OutputFormat, Reporter};
use paramdup_rules::{AcceptSuggestion, NameConfirmer, PromptConfirmer, SingleParamDuplicator};
use process::{process_file, write_file};

#[derive(Parser)]
#[command(name = "paramdup")]
#[command(version)]
#[command(about = "Duplicate the parameter of single-parameter PHP methods")]
#[command(author = "paramdup contributors")]
struct Cli {
    /// Files or directories to process (prompted for when omitted)
    paths: Vec<PathBuf>,

    /// Show changes without writing them
    #[arg(long, short = 'n')]
    check: bool,

    /// Confirm or override each suggested parameter name
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Also rewrite named functions, not only methods
    #[arg(long)]
    functions: bool,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Path to config file (default: auto-detect .paramdup.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, conflicts_with = "config")]
    no_config: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = if cli.no_config {
        Config::default()
    } else if let Some(config_path) = &cli.config {
        Config::load_path(config_path)?
    } else {
        match Config::load()? {
            Some((cfg, path)) => {
                tracing::debug!(path = %path.display(), "using config");
                cfg
            }
            None => Config::default(),
        }
    };

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        let name = cli
            .format
            .as_deref()
            .or(config.output.format.as_deref())
            .unwrap_or("text");
        OutputFormat::from_str(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid output format '{}'. Valid options: text, json, diff",
                name
            )
        })?
    };

    let interactive = cli.interactive || config.duplicate.allow_user_input;
    let functions = cli.functions || config.duplicate.functions;
    let check_mode = cli.check;

    let requested = if cli.paths.is_empty() {
        vec![prompt_for_path()?]
    } else {
        cli.paths.clone()
    };

    let (file_paths, missing_paths) = collect_files(&requested, &config);
    tracing::debug!(
        files = file_paths.len(),
        interactive,
        functions,
        check_mode,
        "starting"
    );

    // Prompts must not interleave, so interactive runs stay on one thread
    let results: Vec<FileResult> = if interactive {
        let stdin = io::stdin();
        let mut prompt = PromptConfirmer::new(stdin.lock(), io::stderr());
        file_paths
            .iter()
            .map(|path| process_file_to_result(path, &mut prompt, functions))
            .collect()
    } else {
        file_paths
            .par_iter()
            .map(|path| process_file_to_result(path, AcceptSuggestion, functions))
            .collect()
    };

    // Sort results by path for deterministic output
    let mut sorted_results: Vec<_> = results.into_iter().zip(file_paths.iter()).collect();
    sorted_results.sort_by(|a, b| a.1.cmp(b.1));

    let mut reporter = Reporter::new(output_format, cli.verbose);

    for path in &missing_paths {
        reporter.report_missing(path);
    }

    for (result, path) in sorted_results {
        report_result(path, result, check_mode, &mut reporter)?;
    }

    let summary = reporter.summary();
    let exit_code = if summary.errors > 0 {
        ExitCode::from(1)
    } else if check_mode && summary.files_with_changes > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    };

    reporter.finish(check_mode)?;

    Ok(exit_code)
}

/// Ask for a single file path on stdin
fn prompt_for_path() -> Result<PathBuf> {
    let mut stderr = io::stderr();
    write!(stderr, "Enter file path: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read file path")?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("No file path given");
    }
    Ok(PathBuf::from(trimmed))
}

/// Expand the requested paths into PHP files, separating out paths that do not exist
fn collect_files(paths: &[PathBuf], config: &Config) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut file_paths: Vec<PathBuf> = Vec::new();
    let mut missing_paths: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_file() {
            file_paths.push(path.clone());
        } else if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "php"))
            {
                let file_path = entry.path();
                if !config.should_exclude(file_path) {
                    file_paths.push(file_path.to_path_buf());
                }
            }
        } else {
            missing_paths.push(path.clone());
        }
    }

    (file_paths, missing_paths)
}

/// Result of processing a single file
enum FileResult {
    /// File had no changes
    NoChanges,
    /// File has changes to report/apply
    HasChanges {
        duplications: Vec<DuplicationInfo>,
        old_source: String,
        new_source: String,
    },
    /// Parse error occurred
    ParseError,
    /// Other error occurred
    Error(String),
}

/// Process a file and return a result (no output, suitable for parallel execution)
fn process_file_to_result<C: NameConfirmer>(
    path: &Path,
    confirmer: C,
    functions: bool,
) -> FileResult {
    let mut duplicator = SingleParamDuplicator::new(confirmer).include_functions(functions);
    match process_file(path, &mut duplicator) {
        Ok(Some(result)) => match result.new_source {
            Some(new_source) if !result.duplications.is_empty() => FileResult::HasChanges {
                duplications: result.duplications,
                old_source: result.old_source,
                new_source,
            },
            _ => FileResult::NoChanges,
        },
        Ok(None) => FileResult::ParseError,
        Err(e) => FileResult::Error(format!("{:#}", e)),
    }
}

/// Report a file result and write the new source unless checking
fn report_result(
    path: &Path,
    result: FileResult,
    check_mode: bool,
    reporter: &mut Reporter,
) -> Result<()> {
    match result {
        FileResult::NoChanges => {
            reporter.report_skipped(path);
        }
        FileResult::HasChanges {
            duplications,
            old_source,
            new_source,
        } => {
            if check_mode {
                reporter.report_check(path, duplications, &old_source, &new_source);
            } else {
                write_file(path, &new_source)?;
                reporter.report_fix(path, duplications);
            }
        }
        FileResult::ParseError => {
            reporter.report_error(path, "Couldn't parse file.");
        }
        FileResult::Error(msg) => {
            reporter.report_error(path, &msg);
        }
    }
    Ok(())
}
