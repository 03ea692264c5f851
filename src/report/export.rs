use crate::config::toml_config::OutputFormat;
use crate::domain::model::StatisticsReport;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, StatsError};
use serde::Serialize;

pub const JSON_FILENAME: &str = "salary_statistics.json";
pub const CSV_FILENAME: &str = "salary_statistics.csv";

const CSV_HEADERS: [&str; 5] = [
    "provider",
    "term",
    "vacancies_found",
    "vacancies_processed",
    "average_salary",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    provider: &'a str,
    term: &'a str,
    vacancies_found: u64,
    vacancies_processed: u64,
    average_salary: u64,
}

/// Writes a finished report through a [`Storage`] backend.
pub struct ReportExporter<S: Storage> {
    storage: S,
    formats: Vec<OutputFormat>,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S, formats: Vec<OutputFormat>) -> Self {
        Self { storage, formats }
    }

    /// Returns the names of the files written, in format order.
    pub async fn export(&self, report: &StatisticsReport) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in &self.formats {
            let (filename, data) = match format {
                OutputFormat::Json => (JSON_FILENAME, serde_json::to_vec_pretty(report)?),
                OutputFormat::Csv => (CSV_FILENAME, to_csv(report)?),
            };

            tracing::debug!("Writing {} ({} bytes) to storage", filename, data.len());
            self.storage.write_file(filename, &data).await?;
            written.push(filename.to_string());
        }

        Ok(written)
    }
}

pub fn to_csv(report: &StatisticsReport) -> Result<Vec<u8>> {
    // header written by hand so an empty report still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for provider in &report.providers {
        for aggregate in &provider.aggregates {
            writer.serialize(CsvRow {
                provider: &provider.label,
                term: &aggregate.term,
                vacancies_found: aggregate.vacancies_found,
                vacancies_processed: aggregate.vacancies_processed,
                average_salary: aggregate.average_salary,
            })?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| StatsError::IoError(e.into_error()))
}
