use crate::domain::model::VacancyPage;
use crate::domain::ports::PageSource;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Keep requesting while the page index is below the page's bound field
    /// (`per_page` on HeadHunter, `total` on SuperJob), re-read on every page.
    #[default]
    Legacy,
    /// Stop on an empty page, on the provider's "no more pages" signal, or
    /// once the declared total has been seen.
    Exhaustive,
}

impl std::fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl std::str::FromStr for PaginationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "exhaustive" => Ok(Self::Exhaustive),
            other => Err(format!("unknown pagination mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub mode: PaginationMode,
    pub max_pages: Option<u64>,
}

impl PaginationPolicy {
    fn should_continue(&self, next_index: u64, page: &VacancyPage, seen: u64, found: u64) -> bool {
        if self.max_pages.is_some_and(|max| next_index >= max) {
            return false;
        }

        match self.mode {
            PaginationMode::Legacy => next_index < page.page_bound,
            PaginationMode::Exhaustive => {
                !page.items.is_empty() && page.has_more.unwrap_or(true) && seen < found
            }
        }
    }
}

/// Fetches every page of `term` one request at a time. Page 0 is always
/// requested; the first failing request aborts the whole term.
pub async fn fetch_term_pages(
    source: &dyn PageSource,
    term: &str,
    policy: PaginationPolicy,
) -> Result<Vec<VacancyPage>> {
    let mut pages: Vec<VacancyPage> = Vec::new();
    let mut index = 0;
    let mut seen = 0;

    loop {
        let page = source.fetch_page(term, index).await?;
        seen += page.items.len() as u64;
        tracing::debug!(
            "{} '{}' page {}: {} items (bound {})",
            source.label(),
            term,
            index,
            page.items.len(),
            page.page_bound
        );

        let found = pages.first().map_or(page.found, |first| first.found);
        let next_index = index + 1;
        let more = policy.should_continue(next_index, &page, seen, found);
        pages.push(page);

        if !more {
            break;
        }
        index = next_index;
    }

    Ok(pages)
}
