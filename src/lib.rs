pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::StatsConfig};

pub use crate::core::{
    aggregator::aggregate,
    engine::{RunSummary, StatisticsEngine},
    estimator::predict_salary,
    fetcher::HttpPageSource,
    paginator::{PaginationMode, PaginationPolicy},
    provider::ProviderKind,
};
pub use domain::model::{ProviderStatistics, SalaryBounds, StatisticsReport, TermAggregate};
pub use report::{render_report, ReportExporter};
pub use utils::error::{Result, StatsError};
