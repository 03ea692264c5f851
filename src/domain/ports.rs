use crate::core::provider::ProviderKind;
use crate::domain::model::VacancyPage;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Fetches a single page of search results for a term.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn label(&self) -> &str;
    fn kind(&self) -> ProviderKind;
    async fn fetch_page(&self, term: &str, page: u64) -> Result<VacancyPage>;
}
