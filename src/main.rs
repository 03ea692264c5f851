use clap::Parser;
use salary_stats::config::toml_config::StatsConfig;
use salary_stats::core::PageSource;
use salary_stats::utils::error::{ErrorSeverity, StatsError};
use salary_stats::utils::{logger, validation::Validate};
use salary_stats::{
    render_report, CliConfig, HttpPageSource, LocalStorage, ReportExporter, StatisticsEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; SJ_KEY may come from the real environment
    let _ = dotenvy::dotenv();
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting salary-stats");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let mut sources: Vec<Box<dyn PageSource>> = Vec::new();
    for provider in config.enabled_providers() {
        let source = HttpPageSource::new(provider.clone(), config.report.timeout_seconds)?;
        sources.push(Box::new(source));
    }

    let engine = StatisticsEngine::new(
        sources,
        config.report.terms.clone(),
        config.pagination_policy(),
    );
    let summary = engine.run().await;

    println!("{}", render_report(&summary.report));

    if let Some(output) = &config.output {
        let storage = LocalStorage::new(output.path.clone());
        let exporter = ReportExporter::new(storage.clone(), output.formats.clone());
        match exporter.export(&summary.report).await {
            Ok(files) => {
                for file in files {
                    tracing::info!("📁 Report saved to: {}", storage.full_path(&file));
                }
            }
            Err(e) => {
                tracing::error!("❌ Export failed: {}", e);
                fail(&e);
            }
        }
    }

    if let Some(worst) = summary.failures.iter().map(|f| &f.error).max_by_key(|e| e.severity()) {
        for failure in &summary.failures {
            eprintln!("❌ {}: {}", failure.label, failure.error.user_friendly_message());
        }
        fail(worst);
    }

    Ok(())
}

fn print_plan(config: &StatsConfig) {
    println!("🔍 Dry run: no requests will be sent");
    println!("Terms: {}", config.report.terms.join(", "));
    println!("Pagination: {}", config.report.pagination);
    if let Some(max_pages) = config.report.max_pages {
        println!("Max pages per term: {}", max_pages);
    }
    for provider in config.enabled_providers() {
        println!("- {} ({}): {}", provider.label(), provider.kind, provider.endpoint());
    }
    if let Some(output) = &config.output {
        println!("Output: {} {:?}", output.path, output.formats);
    }
}

fn fail(error: &StatsError) -> ! {
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 Suggestion: {}", error.recovery_suggestion());

    let exit_code = match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
