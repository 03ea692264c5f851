pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::paginator::PaginationMode;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::{OutputConfig, OutputFormat, StatsConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "salary-stats")]
#[command(about = "Average programming salaries from HeadHunter and SuperJob vacancies")]
pub struct CliConfig {
    /// Path to a TOML configuration file; built-in defaults are used without one
    #[arg(short, long)]
    pub config: Option<String>,

    /// Search terms, overriding the configured list
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<String>,

    /// Pagination mode: legacy or exhaustive
    #[arg(long)]
    pub pagination: Option<PaginationMode>,

    /// Stop each term after this many pages
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory to export the report into
    #[arg(long)]
    pub output_path: Option<String>,

    /// Export formats, used together with --output-path
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Show what would be queried without sending any request
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the file (or the defaults) and layers the command line on top.
    pub fn load(&self) -> crate::Result<StatsConfig> {
        let mut config = match &self.config {
            Some(path) => StatsConfig::from_file(path)?,
            None => StatsConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.apply_env_credentials();
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut StatsConfig) {
        if !self.terms.is_empty() {
            config.report.terms = self.terms.clone();
        }
        if let Some(mode) = self.pagination {
            config.report.pagination = mode;
        }
        if self.max_pages.is_some() {
            config.report.max_pages = self.max_pages;
        }
        if self.timeout.is_some() {
            config.report.timeout_seconds = self.timeout;
        }

        if let Some(path) = &self.output_path {
            let formats = match (&config.output, self.format.is_empty()) {
                (_, false) => self.format.clone(),
                (Some(output), true) => output.formats.clone(),
                (None, true) => vec![OutputFormat::Json, OutputFormat::Csv],
            };
            config.output = Some(OutputConfig {
                path: path.clone(),
                formats,
            });
        } else if let (Some(output), false) = (config.output.as_mut(), self.format.is_empty()) {
            output.formats = self.format.clone();
        }
    }
}
