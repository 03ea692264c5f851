use crate::core::provider::ProviderKind;
use crate::domain::model::{SalaryTally, TermAggregate, VacancyPage};

/// Folds one page into the running tally. The first page seen fixes
/// `vacancies_found`; later pages never overwrite it.
pub fn absorb_page(tally: &mut SalaryTally, kind: ProviderKind, page: &VacancyPage) {
    if tally.vacancies_found.is_none() {
        tally.vacancies_found = Some(page.found);
    }

    for estimate in page.items.iter().filter_map(|v| kind.extract_salary(v)) {
        tally.record(estimate);
    }
}

/// Summarises every page fetched for `term`.
///
/// Returns `None` when no vacancy carried a usable salary; such terms are
/// left out of the report rather than shown with an empty average.
pub fn aggregate<'a, I>(term: &str, kind: ProviderKind, pages: I) -> Option<TermAggregate>
where
    I: IntoIterator<Item = &'a VacancyPage>,
{
    let tally = pages
        .into_iter()
        .fold(SalaryTally::default(), |mut tally, page| {
            absorb_page(&mut tally, kind, page);
            tally
        });

    tracing::debug!(
        "{}: {} of {:?} vacancies carried a usable salary",
        term,
        tally.vacancies_processed,
        tally.vacancies_found
    );

    tally.into_aggregate(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hh_page(index: u64, found: u64, items: Vec<serde_json::Value>) -> VacancyPage {
        VacancyPage {
            index,
            found,
            page_bound: 20,
            has_more: None,
            items,
        }
    }

    fn rub(from: Option<u64>, to: Option<u64>) -> serde_json::Value {
        json!({"salary": {"from": from, "to": to, "currency": "RUR"}})
    }

    #[test]
    fn test_no_usable_salary_gives_no_aggregate() {
        let pages = vec![hh_page(
            0,
            12,
            vec![
                json!({"salary": null}),
                json!({"salary": {"from": 5000, "to": null, "currency": "USD"}}),
            ],
        )];
        assert_eq!(aggregate("Ruby", ProviderKind::HeadHunter, &pages), None);
    }

    #[test]
    fn test_no_pages_gives_no_aggregate() {
        let pages: Vec<VacancyPage> = Vec::new();
        assert_eq!(aggregate("Ruby", ProviderKind::HeadHunter, &pages), None);
    }

    #[test]
    fn test_single_processed_vacancy() {
        let pages = vec![hh_page(0, 7, vec![rub(Some(100), Some(100))])];
        let aggregate = aggregate("Python", ProviderKind::HeadHunter, &pages).unwrap();

        assert_eq!(aggregate.term, "Python");
        assert_eq!(aggregate.vacancies_found, 7);
        assert_eq!(aggregate.vacancies_processed, 1);
        assert_eq!(aggregate.average_salary, 100);
    }

    #[test]
    fn test_found_comes_from_first_page() {
        let pages = vec![
            hh_page(0, 300, vec![rub(Some(100), None)]),
            hh_page(1, 999, vec![rub(None, Some(200))]),
        ];
        let aggregate = aggregate("Java", ProviderKind::HeadHunter, &pages).unwrap();
        assert_eq!(aggregate.vacancies_found, 300);
    }

    #[test]
    fn test_pages_are_pooled() {
        // 150 + 120 on the first page, 160 + 200 on the second
        let pages = vec![
            hh_page(0, 40, vec![rub(Some(100), Some(200)), rub(Some(100), None)]),
            hh_page(
                1,
                40,
                vec![rub(None, Some(200)), json!({"salary": null}), rub(Some(200), Some(200))],
            ),
        ];
        let aggregate = aggregate("Go", ProviderKind::HeadHunter, &pages).unwrap();

        assert_eq!(aggregate.vacancies_processed, 4);
        assert_eq!(aggregate.average_salary, (150 + 120 + 160 + 200) / 4);
    }

    #[test]
    fn test_found_is_not_clamped_to_processed() {
        let pages = vec![hh_page(0, 1, vec![rub(Some(10), None), rub(Some(20), None)])];
        let aggregate = aggregate("C", ProviderKind::HeadHunter, &pages).unwrap();
        assert_eq!(aggregate.vacancies_found, 1);
        assert_eq!(aggregate.vacancies_processed, 2);
    }

    #[test]
    fn test_huge_salaries_saturate_without_overflow() {
        let huge = json!({"salary": {"from": 1e19, "to": null, "currency": "RUR"}});
        let pages = vec![hh_page(0, 2, vec![huge.clone(), huge])];

        let aggregate = aggregate("Rust", ProviderKind::HeadHunter, &pages).unwrap();
        assert_eq!(aggregate.vacancies_processed, 2);
        assert_eq!(aggregate.average_salary, u64::MAX);
    }

    #[test]
    fn test_superjob_pages() {
        let page = VacancyPage {
            index: 0,
            found: 3,
            page_bound: 3,
            has_more: Some(false),
            items: vec![
                json!({"payment_from": 50000, "payment_to": 70000, "currency": "rub"}),
                json!({"payment_from": 0, "payment_to": null, "currency": "rub"}),
                json!({"payment_from": 1000, "payment_to": 0, "currency": "usd"}),
            ],
        };
        let aggregate = aggregate("PHP", ProviderKind::SuperJob, [&page]).unwrap();
        assert_eq!(aggregate.vacancies_processed, 1);
        assert_eq!(aggregate.average_salary, 60000);
    }
}
