use crate::core::estimator::predict_salary;
use crate::domain::model::{SalaryBounds, VacancyPage};
use crate::utils::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The vacancy APIs this tool knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    HeadHunter,
    SuperJob,
}

impl ProviderKind {
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::HeadHunter => "HeadHunter Moscow",
            Self::SuperJob => "SuperJob Moscow",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::HeadHunter => "https://api.hh.ru/vacancies",
            Self::SuperJob => "https://api.superjob.ru/2.0/vacancies/",
        }
    }

    /// Query parameter carrying the search term.
    pub fn term_param(&self) -> &'static str {
        match self {
            Self::HeadHunter => "text",
            Self::SuperJob => "keywords",
        }
    }

    pub fn currency(&self) -> &'static str {
        match self {
            Self::HeadHunter => "RUR",
            Self::SuperJob => "rub",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::SuperJob)
    }

    fn found_field(&self) -> &'static str {
        match self {
            Self::HeadHunter => "found",
            Self::SuperJob => "total",
        }
    }

    /// HeadHunter's loop bound is its `per_page` setting, SuperJob's is the
    /// total count. Neither is a page count.
    fn page_bound_field(&self) -> &'static str {
        match self {
            Self::HeadHunter => "per_page",
            Self::SuperJob => "total",
        }
    }

    fn listing_field(&self) -> &'static str {
        match self {
            Self::HeadHunter => "items",
            Self::SuperJob => "objects",
        }
    }

    /// Estimates the salary of one vacancy, or `None` when it carries no
    /// usable salary in the provider's currency.
    pub fn extract_salary(&self, vacancy: &Value) -> Option<u64> {
        match self {
            Self::HeadHunter => {
                let salary = vacancy.get("salary").filter(|s| s.is_object())?;
                if salary.get("currency").and_then(Value::as_str) != Some(self.currency()) {
                    return None;
                }
                let bounds = SalaryBounds::new(
                    truthy_number(salary.get("from")),
                    truthy_number(salary.get("to")),
                );
                predict_salary(bounds).filter(|estimate| *estimate != 0)
            }
            Self::SuperJob => {
                let bounds = SalaryBounds::new(
                    truthy_number(vacancy.get("payment_from")),
                    truthy_number(vacancy.get("payment_to")),
                );
                let has_payment = bounds.lower.is_some() || bounds.upper.is_some();
                let in_currency =
                    vacancy.get("currency").and_then(Value::as_str) == Some(self.currency());
                if !(has_payment && in_currency) {
                    return None;
                }
                predict_salary(bounds)
            }
        }
    }

    /// Splits a raw response body into a [`VacancyPage`]. The total, bound and
    /// listing fields are required; everything inside the listing is not.
    pub fn parse_page(&self, label: &str, index: u64, body: Value) -> Result<VacancyPage> {
        let found = self.required_count(label, index, &body, self.found_field())?;
        let page_bound = self.required_count(label, index, &body, self.page_bound_field())?;

        let has_more = match self {
            Self::HeadHunter => body
                .get("pages")
                .and_then(Value::as_u64)
                .map(|pages| index + 1 < pages),
            Self::SuperJob => body.get("more").and_then(Value::as_bool),
        };

        let items = match body {
            Value::Object(mut map) => match map.remove(self.listing_field()) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
        .ok_or_else(|| self.malformed(label, index, self.listing_field()))?;

        Ok(VacancyPage {
            index,
            found,
            page_bound,
            has_more,
            items,
        })
    }

    fn required_count(&self, label: &str, index: u64, body: &Value, field: &str) -> Result<u64> {
        body.get(field)
            .and_then(Value::as_u64)
            .ok_or_else(|| self.malformed(label, index, field))
    }

    fn malformed(&self, label: &str, index: u64, field: &str) -> StatsError {
        StatsError::MalformedPage {
            provider: label.to_string(),
            page: index,
            field: field.to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeadHunter => write!(f, "headhunter"),
            Self::SuperJob => write!(f, "superjob"),
        }
    }
}

/// Number that is present and non-zero; null, zero and non-numbers are absent.
fn truthy_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| *n != 0.0)
}
