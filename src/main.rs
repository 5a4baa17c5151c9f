use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stalepom::config::Config;
use stalepom::file_types::FileType;
use stalepom::oracle::StaticOracle;
use stalepom::registries::http_client::create_shared_client;
use stalepom::registries::maven_central::MavenCentralRegistry;
use stalepom::reports::{ReportFormat, render_report};
use stalepom::scanner::{ScanReport, Scanner, check_content};
use stalepom::validator::DependencyValidator;

#[derive(Parser)]
#[command(name = "stalepom")]
#[command(about = "Flags stale dependency versions in Maven pom.xml files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
    Markdown,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => ReportFormat::Summary,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Markdown => ReportFormat::Markdown,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a pom.xml for outdated dependencies
    Check {
        /// Path to the pom.xml to check
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Known latest version, repeatable; disables registry lookups
        #[arg(long, value_name = "GROUP:ARTIFACT=VERSION")]
        latest: Vec<String>,

        /// Maven repository to query instead of the configured one
        #[arg(long)]
        registry_url: Option<String>,

        /// Exit with code 1 if outdated dependencies are found
        #[arg(long)]
        fail_on_violations: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Check {
            file,
            output,
            config,
            latest,
            registry_url,
            fail_on_violations,
        } => run_check(file, output, config, latest, registry_url, fail_on_violations).await,
    }
}

async fn run_check(
    file: PathBuf,
    output: OutputFormat,
    config_path: Option<PathBuf>,
    latest: Vec<String>,
    registry_url: Option<String>,
    fail_on_violations: bool,
) -> ExitCode {
    let mut config = match config_path {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(url) = registry_url {
        config.registry.url = url;
    }

    let file_name = file.display().to_string();
    if FileType::detect(&file_name).is_none() {
        eprintln!("Unsupported file type: {file_name}");
        return ExitCode::FAILURE;
    }

    let content = match tokio::fs::read_to_string(&file).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match check(&file_name, &content, config, &latest).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match render_report(&report, output.into()) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            return ExitCode::FAILURE;
        }
    }

    if fail_on_violations && report.violations() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn check(
    file_name: &str,
    content: &str,
    config: Config,
    latest: &[String],
) -> anyhow::Result<ScanReport> {
    if !latest.is_empty() {
        let oracle = StaticOracle::from_entries(latest)?;
        tracing::info!("Using {} known versions, registry disabled", oracle.len());
        let validator = DependencyValidator::new(config);
        return Ok(check_content(&validator, file_name, content, &oracle)?);
    }

    let registry = MavenCentralRegistry::with_client(create_shared_client()?)
        .with_base_url(config.registry.url.clone());
    Scanner::new(registry, config).scan(file_name, content).await
}
