use crate::core::paginator::{PaginationMode, PaginationPolicy};
use crate::core::provider::ProviderKind;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Environment variable holding the SuperJob application key.
pub const SUPERJOB_KEY_VAR: &str = "SJ_KEY";

pub const DEFAULT_TERMS: [&str; 8] = ["Python", "JS", "Java", "Ruby", "PHP", "C", "CSS", "GO"];

const SUPERJOB_MAX_COUNT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,
    #[serde(default)]
    pub pagination: PaginationMode,
    pub max_pages: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub label: Option<String>,
    pub endpoint: Option<String>,
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    /// Vacancies per page requested from SuperJob.
    pub count: Option<u32>,
    pub headers: Option<HashMap<String, String>>,
    pub parameters: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
}

fn default_terms() -> Vec<String> {
    DEFAULT_TERMS.iter().map(|t| t.to_string()).collect()
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ProviderKind::HeadHunter),
        ProviderConfig::new(ProviderKind::SuperJob),
    ]
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Json, OutputFormat::Csv]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            terms: default_terms(),
            pagination: PaginationMode::default(),
            max_pages: None,
            timeout_seconds: None,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            providers: default_providers(),
            output: None,
        }
    }
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            label: None,
            endpoint: None,
            enabled: None,
            api_key: None,
            count: None,
            headers: None,
            parameters: None,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.kind.default_label())
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(self.kind.default_endpoint())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn count(&self) -> u32 {
        self.count.unwrap_or(SUPERJOB_MAX_COUNT)
    }

    /// False for empty keys and for `${VAR}` placeholders left unresolved.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && !key.starts_with("${"))
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported output format '{}'", other)),
        }
    }
}

impl StatsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Fills missing SuperJob keys from `SJ_KEY`.
    pub fn apply_env_credentials(&mut self) {
        let env_key = std::env::var(SUPERJOB_KEY_VAR).ok().filter(|k| !k.is_empty());

        for provider in self
            .providers
            .iter_mut()
            .filter(|p| p.kind.requires_api_key())
        {
            if !provider.has_api_key() {
                provider.api_key = env_key.clone();
            }
        }
    }

    pub fn pagination_policy(&self) -> PaginationPolicy {
        PaginationPolicy {
            mode: self.report.pagination,
            max_pages: self.report.max_pages,
        }
    }

    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.is_enabled())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.report.terms.is_empty() {
            return Err(StatsError::ConfigValidationError {
                field: "report.terms".to_string(),
                message: "At least one search term is required".to_string(),
            });
        }
        for term in &self.report.terms {
            validation::validate_non_empty_string("report.terms", term)?;
        }
        validation::validate_unique("report.terms", &self.report.terms)?;

        if let Some(max_pages) = self.report.max_pages {
            validation::validate_positive_number("report.max_pages", max_pages, 1)?;
        }
        if let Some(timeout) = self.report.timeout_seconds {
            validation::validate_positive_number("report.timeout_seconds", timeout, 1)?;
        }

        if self.enabled_providers().next().is_none() {
            return Err(StatsError::ConfigValidationError {
                field: "providers".to_string(),
                message: "At least one provider must be enabled".to_string(),
            });
        }

        let labels: Vec<String> = self
            .enabled_providers()
            .map(|p| p.label().to_string())
            .collect();
        validation::validate_unique("providers.label", &labels)?;

        for provider in self.enabled_providers() {
            validation::validate_non_empty_string("providers.label", provider.label())?;
            validation::validate_url("providers.endpoint", provider.endpoint())?;

            if provider.kind.requires_api_key() {
                validation::validate_range(
                    "providers.count",
                    provider.count(),
                    1,
                    SUPERJOB_MAX_COUNT,
                )?;
                if !provider.has_api_key() {
                    return Err(StatsError::MissingCredential {
                        provider: provider.label().to_string(),
                        name: SUPERJOB_KEY_VAR.to_string(),
                    });
                }
            }
        }

        if let Some(output) = &self.output {
            validation::validate_path("output.path", &output.path)?;
            if output.formats.is_empty() {
                return Err(StatsError::ConfigValidationError {
                    field: "output.formats".to_string(),
                    message: "At least one output format is required".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for StatsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
