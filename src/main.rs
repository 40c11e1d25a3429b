// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use manifest_lint::utils::logging::{format_info, format_success, format_warning};
use manifest_lint::{
    Config, ImportAuditor, ImportScanner, JsonExporter, LintPipeline, ManifestNormalizer,
    ManifestParser, ManifestScanner, TextReporter, Validator,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "manifest_lint")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Parse, lint and format Python requirements manifests", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "manifest_lint.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint manifest files, or every manifest found under the given directories
    Check {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the JSON report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        deny_warnings: bool,

        #[arg(long)]
        progress: bool,
    },

    /// Print a manifest in canonical form
    Fmt {
        file: PathBuf,

        /// Rewrite the file in place
        #[arg(long, conflicts_with = "check")]
        write: bool,

        /// Exit non-zero when the file is not already canonical
        #[arg(long)]
        check: bool,
    },

    /// Show packages grouped by their comment sections
    List {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Compare python imports under a source tree with the declared packages
    Imports {
        manifest: PathBuf,

        #[arg(short, long, value_name = "DIR")]
        source: PathBuf,

        #[arg(long)]
        json: bool,

        /// Also fail when declared packages are never imported
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    manifest_lint::utils::logging::init_logger(cli.color, cli.verbose);

    debug!("Loading configuration from: {}", cli.config.display());

    let config_file = cli.config.exists().then_some(cli.config.as_path());
    if config_file.is_none() {
        debug!(
            "Config file {} not found, using defaults and environment overrides",
            cli.config.display()
        );
    }
    let config = Config::load(config_file).context("Failed to load configuration")?;

    let passed = match cli.command {
        Commands::Check {
            paths,
            format,
            output,
            pretty,
            deny_warnings,
            progress,
        } => {
            cmd_check(
                &config,
                &paths,
                format,
                output.as_deref(),
                pretty,
                deny_warnings,
                progress,
                cli.color,
            )
            .await?
        }
        Commands::Fmt { file, write, check } => cmd_fmt(&file, write, check)?,
        Commands::List { file, json } => cmd_list(&file, json)?,
        Commands::Imports {
            manifest,
            source,
            json,
            strict,
        } => cmd_imports(&config, &manifest, &source, json, strict)?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn cmd_check(
    config: &Config,
    paths: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
    pretty: bool,
    deny_warnings: bool,
    progress: bool,
    colored: bool,
) -> Result<bool> {
    Validator::validate_paths_given(paths)?;
    if let Some(output) = output {
        Validator::validate_output_path(output)?;
    }

    let scanner = ManifestScanner::new(config.discovery.clone())?;
    let files = scanner
        .scan_all(paths)
        .context("Failed to discover manifest files")?;

    if files.is_empty() {
        eprintln!("{}", format_warning("No manifest files found"));
        return Ok(false);
    }

    let pipeline = LintPipeline::new(config)?.with_progress(progress, colored);
    let run = pipeline.run(files).await;

    let exporter = JsonExporter::new(pretty);
    if let Some(output) = output {
        exporter
            .write_run(&run, output)
            .context("Failed to write JSON report")?;
    }

    match format {
        OutputFormat::Text => println!("{}", TextReporter::new().format_run(&run)),
        OutputFormat::Json => println!("{}", exporter.render_run(&run)?),
    }

    let deny_warnings = deny_warnings || config.lint.deny_warnings;
    Ok(!run.is_failure(deny_warnings))
}

fn cmd_fmt(file: &Path, write: bool, check: bool) -> Result<bool> {
    Validator::validate_file_path(file)?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let manifest = ManifestParser::new().parse(&content);
    let normalizer = ManifestNormalizer::new();

    if check {
        let formatted = normalizer.is_normalized(&manifest, &content);
        if formatted {
            eprintln!("{}", format_success(&format!("{} is formatted", file.display())));
        } else {
            eprintln!(
                "{}",
                format_warning(&format!("{} is not formatted", file.display()))
            );
        }
        return Ok(formatted);
    }

    let normalized = normalizer.normalize(&manifest);

    if write {
        if normalized == content {
            eprintln!("{}", format_info(&format!("{} already formatted", file.display())));
        } else {
            fs::write(file, &normalized)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            eprintln!("{}", format_success(&format!("Formatted {}", file.display())));
        }
        return Ok(true);
    }

    print!("{}", normalized);
    Ok(true)
}

fn cmd_list(file: &Path, json: bool) -> Result<bool> {
    Validator::validate_file_path(file)?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let manifest = ManifestParser::new().parse(&content);
    let sections = manifest.sections();

    if json {
        println!("{}", JsonExporter::new(true).render(&sections)?);
    } else {
        println!("{}", TextReporter::new().format_sections(&sections));
    }

    Ok(true)
}

fn cmd_imports(
    config: &Config,
    manifest_path: &Path,
    source: &Path,
    json: bool,
    strict: bool,
) -> Result<bool> {
    Validator::validate_file_path(manifest_path)?;
    Validator::validate_directory(source)?;

    let content = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let manifest = ManifestParser::new().parse(&content);

    let imports = ImportScanner::new(config.discovery.skip_patterns.clone())
        .scan(source)
        .context("Failed to scan python sources")?;
    let audit = ImportAuditor::new(&config.imports).audit(&manifest, &imports);

    if json {
        println!("{}", JsonExporter::new(true).render(&audit)?);
    } else {
        println!("{}", TextReporter::new().format_import_audit(&audit));
    }

    Ok(audit.is_clean() && (!strict || audit.unused.is_empty()))
}
