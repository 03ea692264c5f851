use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower/upper salary figures as a provider reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryBounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SalaryBounds {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

/// One page of search results. Pages of the same term are kept apart and
/// folded one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyPage {
    pub index: u64,
    /// Total matching vacancies as declared by the provider.
    pub found: u64,
    /// Value the pagination loop compares the next page index against.
    pub page_bound: u64,
    /// Provider's own "more pages follow" signal, when it sends one.
    pub has_more: Option<bool>,
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermAggregate {
    pub term: String,
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: u64,
}

/// Running totals for one term while its pages stream in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryTally {
    pub vacancies_found: Option<u64>,
    pub vacancies_processed: u64,
    /// Wide enough that summing saturated `u64` estimates cannot overflow.
    pub salary_sum: u128,
}

impl SalaryTally {
    pub fn record(&mut self, estimate: u64) {
        self.salary_sum += u128::from(estimate);
        self.vacancies_processed += 1;
    }

    /// `None` when nothing was processed.
    pub fn average(&self) -> Option<u64> {
        self.salary_sum
            .checked_div(u128::from(self.vacancies_processed))
            .map(|average| u64::try_from(average).unwrap_or(u64::MAX))
    }

    pub fn into_aggregate(self, term: &str) -> Option<TermAggregate> {
        let average_salary = self.average()?;
        Some(TermAggregate {
            term: term.to_string(),
            vacancies_found: self.vacancies_found.unwrap_or(0),
            vacancies_processed: self.vacancies_processed,
            average_salary,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatistics {
    pub label: String,
    pub aggregates: Vec<TermAggregate>,
}

impl ProviderStatistics {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            aggregates: Vec::new(),
        }
    }

    pub fn get(&self, term: &str) -> Option<&TermAggregate> {
        self.aggregates.iter().find(|a| a.term == term)
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub generated_at: DateTime<Utc>,
    pub providers: Vec<ProviderStatistics>,
}

impl StatisticsReport {
    pub fn new(providers: Vec<ProviderStatistics>) -> Self {
        Self {
            generated_at: Utc::now(),
            providers,
        }
    }

    pub fn provider(&self, label: &str) -> Option<&ProviderStatistics> {
        self.providers.iter().find(|p| p.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally_has_no_average() {
        let tally = SalaryTally {
            vacancies_found: Some(42),
            ..Default::default()
        };
        assert_eq!(tally.average(), None);
        assert_eq!(tally.into_aggregate("Rust"), None);
    }

    #[test]
    fn test_average_truncates() {
        let mut tally = SalaryTally::default();
        tally.record(100);
        tally.record(101);
        assert_eq!(tally.average(), Some(100));
    }

    #[test]
    fn test_sum_of_max_estimates_does_not_overflow() {
        let mut tally = SalaryTally::default();
        tally.record(u64::MAX);
        tally.record(u64::MAX);
        assert_eq!(tally.salary_sum, 2 * u128::from(u64::MAX));
        assert_eq!(tally.average(), Some(u64::MAX));
    }

    #[test]
    fn test_zero_salary_is_still_an_aggregate() {
        let mut tally = SalaryTally {
            vacancies_found: Some(1),
            ..Default::default()
        };
        tally.record(0);

        let aggregate = tally.into_aggregate("C").unwrap();
        assert_eq!(aggregate.average_salary, 0);
        assert_eq!(aggregate.vacancies_processed, 1);
    }
}
