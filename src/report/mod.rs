pub mod export;
pub mod table;

pub use export::ReportExporter;
pub use table::{render_report, render_table};
