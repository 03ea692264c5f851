use crate::core::aggregator::aggregate;
use crate::core::paginator::{fetch_term_pages, PaginationPolicy};
use crate::domain::model::{ProviderStatistics, StatisticsReport};
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, StatsError};

/// A provider whose run was aborted, with the error that stopped it.
#[derive(Debug)]
pub struct ProviderFailure {
    pub label: String,
    pub error: StatsError,
}

#[derive(Debug)]
pub struct RunSummary {
    pub report: StatisticsReport,
    pub failures: Vec<ProviderFailure>,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs every term against every source, one request at a time.
pub struct StatisticsEngine {
    sources: Vec<Box<dyn PageSource>>,
    terms: Vec<String>,
    policy: PaginationPolicy,
}

impl StatisticsEngine {
    pub fn new(
        sources: Vec<Box<dyn PageSource>>,
        terms: Vec<String>,
        policy: PaginationPolicy,
    ) -> Self {
        Self {
            sources,
            terms,
            policy,
        }
    }

    pub async fn run(&self) -> RunSummary {
        let mut providers = Vec::new();
        let mut failures = Vec::new();

        for source in &self.sources {
            match self.collect_provider(source.as_ref()).await {
                Ok(statistics) => providers.push(statistics),
                Err(error) => {
                    tracing::error!("❌ {} aborted: {}", source.label(), error);
                    failures.push(ProviderFailure {
                        label: source.label().to_string(),
                        error,
                    });
                }
            }
        }

        RunSummary {
            report: StatisticsReport::new(providers),
            failures,
        }
    }

    /// Builds one provider's statistics. The first failed request discards
    /// everything gathered for that provider so far.
    pub async fn collect_provider(&self, source: &dyn PageSource) -> Result<ProviderStatistics> {
        tracing::info!("🚀 Collecting {} ({} terms)", source.label(), self.terms.len());
        let mut statistics = ProviderStatistics::new(source.label());

        for term in &self.terms {
            let pages = fetch_term_pages(source, term, self.policy).await?;

            match aggregate(term, source.kind(), &pages) {
                Some(term_aggregate) => {
                    tracing::info!(
                        "📊 {} {}: found {}, processed {}, average {}",
                        source.label(),
                        term,
                        term_aggregate.vacancies_found,
                        term_aggregate.vacancies_processed,
                        term_aggregate.average_salary
                    );
                    statistics.aggregates.push(term_aggregate);
                }
                None => tracing::warn!(
                    "{} {}: no vacancies with a usable salary, skipping",
                    source.label(),
                    term
                ),
            }
        }

        Ok(statistics)
    }
}
