use cep_race::utils::{logger, output, validation::Validate};
use cep_race::{CepError, CepLookup, CliConfig, ConfigProvider, OutputFormat};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // --help and --version are not failures; every real parse error exits 1.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match config.output_format() {
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::debug!("CLI config: {:?}", config);

    if !config.extra_args.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", config.extra_args);
    }

    if config.cep().is_none() {
        println!("{}", output::USAGE);
        std::process::exit(CepError::MissingCep.exit_code());
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let format = config.output_format();
    let lookup = CepLookup::new(config);

    match lookup.run().await {
        Ok(address) => {
            let rendered = match format {
                OutputFormat::Text => output::render_text(&address),
                OutputFormat::Json => output::render_json(&address)?,
            };
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ CEP lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            println!("{}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
