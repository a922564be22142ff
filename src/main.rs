use clap::Parser;
use std::io::Write;
use status_to_csv::utils::error::{ErrorSeverity, Result};
use status_to_csv::utils::{logger, validation::Validate};
use status_to_csv::{CliConfig, CsvBuilder, EtlEngine, JsonLinesSource, LocalFiles, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting status-to-csv");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let mut source = JsonLinesSource::new(LocalFiles::open_input(config.input.path.as_deref())?);

    if let Some(limit) = config.sample_limit() {
        // 取樣模式不寫任何 CSV
        let builder = CsvBuilder::new(&config.builder, std::io::sink())?;
        let sampler = EtlEngine::new(builder).sample(&mut source, limit)?;
        print!("{}", sampler.report());
        return Ok(());
    }

    let target = LocalFiles::open_csv(config.output.csv_path.as_deref(), config.output.append)?;
    let builder = CsvBuilder::new(&config.builder, target.writer)?;

    let mut engine =
        EtlEngine::new(builder).with_header(config.output.write_header && target.needs_header);
    if let Some(json_path) = &config.output.json_path {
        engine = engine.with_json_sink(LocalFiles::open_json(json_path, config.output.append)?);
    }

    let summary = engine.run(&mut source)?;
    // 確認緩衝內容都已寫出
    engine.into_builder().into_inner()?.flush()?;

    tracing::info!(
        "📁 {} rows written to {}",
        summary.written,
        config.output.csv_path.as_deref().unwrap_or("stdout")
    );
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let builder = &config.builder;
    tracing::info!("📋 Fields: {}", builder.fields.join(", "));
    tracing::info!("📋 URL columns: {}", builder.url_columns);
    if builder.require_english {
        tracing::info!(
            "📋 English only (text check: {})",
            if builder.check_text_language { "on" } else { "off" }
        );
    }
    if !builder.date_fields.is_empty() {
        tracing::info!("📋 Date fields: {}", builder.date_fields.join(", "));
    }
}
