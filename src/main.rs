use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use version_matrix::config::{ConfigOverrides, ERROR_MARKER, MatcherConfig};
use version_matrix::error::Error;
use version_matrix::logging::init_logging;
use version_matrix::runner::{MatrixReport, run};

#[derive(Parser)]
#[command(name = "version-matrix")]
#[command(
    version,
    about = "Build a component version matrix from version-matching rules"
)]
struct Cli {
    /// JSON config file (caseVersionsFile, candidateVersions, outputFile, includeCaseSpecificVersion)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule file with `component=pattern[,pattern...]` lines
    #[arg(long, env = "VERSION_MATRIX_CASE_VERSIONS_FILE")]
    case_versions_file: Option<PathBuf>,

    /// Candidate versions: `component:ver1[,ver2...][;component2:ver1...]`
    #[arg(long, env = "VERSION_MATRIX_CANDIDATE_VERSIONS")]
    candidate_versions: Option<String>,

    /// Where to write the version matrix
    #[arg(long, env = "VERSION_MATRIX_OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Use exact versions from the rule file when no candidate matched [default: true]
    #[arg(long, env = "VERSION_MATRIX_INCLUDE_CASE_SPECIFIC_VERSION")]
    include_case_specific_version: Option<bool>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<MatcherConfig, Error> {
        let base = match &self.config {
            Some(path) => MatcherConfig::from_file(path)?,
            None => MatcherConfig::default(),
        };

        Ok(base.with_overrides(ConfigOverrides {
            case_versions_file: self.case_versions_file,
            candidate_versions: self.candidate_versions,
            output_file: self.output_file,
            include_case_specific_version: self.include_case_specific_version,
        }))
    }
}

fn execute(cli: Cli) -> Result<MatrixReport, Error> {
    let config = cli.into_config()?.validate()?;
    run(&config)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref(), cli.log_json)?;

    match execute(cli) {
        Ok(report) => {
            info!(
                "Wrote {} version profiles to {}",
                report.profiles.len(),
                report.output_file.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{} {}", ERROR_MARKER, e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
