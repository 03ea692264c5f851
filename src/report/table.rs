use crate::domain::model::{ProviderStatistics, StatisticsReport};

const HEADERS: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

/// Renders one provider as an ASCII table with its label set into the top
/// border:
///
/// ```text
/// +HeadHunter Moscow---+-----------------+...
/// | Language           | Vacancies found |...
/// +--------------------+-----------------+...
/// | Python             | 1234            |...
/// +--------------------+-----------------+...
/// ```
pub fn render_table(statistics: &ProviderStatistics) -> String {
    let rows: Vec<[String; 4]> = statistics
        .aggregates
        .iter()
        .map(|a| {
            [
                a.term.clone(),
                a.vacancies_found.to_string(),
                a.vacancies_processed.to_string(),
                a.average_salary.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = border(&widths);
    let mut lines = vec![titled_border(&separator, &statistics.label)];
    lines.push(line(&HEADERS.map(String::from), &widths));
    lines.push(separator.clone());
    for row in &rows {
        lines.push(line(row, &widths));
    }
    lines.push(separator);

    lines.join("\n")
}

pub fn render_report(report: &StatisticsReport) -> String {
    report
        .providers
        .iter()
        .map(render_table)
        .collect::<Vec<_>>()
        .join("\n")
}

fn border(widths: &[usize]) -> String {
    let cells: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", cells.join("+"))
}

/// Overwrites the start of the top border with the title. Titles longer than
/// the border are left out.
fn titled_border(separator: &str, title: &str) -> String {
    let title_len = title.chars().count();
    let border_len = separator.chars().count();
    if title_len + 2 > border_len {
        return separator.to_string();
    }

    let tail: String = separator.chars().skip(title_len + 1).collect();
    format!("+{}{}", title, tail)
}

fn line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    format!("|{}|", padded.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TermAggregate;

    fn statistics() -> ProviderStatistics {
        ProviderStatistics {
            label: "HeadHunter Moscow".to_string(),
            aggregates: vec![TermAggregate {
                term: "Python".to_string(),
                vacancies_found: 1500,
                vacancies_processed: 420,
                average_salary: 183250,
            }],
        }
    }

    #[test]
    fn test_render_table_layout() {
        let table = render_table(&statistics());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("+HeadHunter Moscow-"));
        assert_eq!(
            lines[1],
            "| Language | Vacancies found | Vacancies processed | Average salary |"
        );
        assert_eq!(
            lines[3],
            "| Python   | 1500            | 420                 | 183250         |"
        );
        assert_eq!(lines[2], lines[4]);
        assert!(lines.iter().all(|l| l.chars().count() == lines[1].chars().count()));
    }

    #[test]
    fn test_empty_provider_renders_header_only() {
        let table = render_table(&ProviderStatistics::new("SuperJob Moscow"));
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn test_wide_title_is_dropped() {
        let separator = border(&[1]);
        assert_eq!(titled_border(&separator, "Very long title"), separator);
    }
}
