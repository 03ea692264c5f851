pub mod aggregator;
pub mod engine;
pub mod estimator;
pub mod fetcher;
pub mod paginator;
pub mod provider;

pub use crate::domain::model::{SalaryTally, TermAggregate, VacancyPage};
pub use crate::domain::ports::{PageSource, Storage};
pub use crate::utils::error::Result;
