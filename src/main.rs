use clap::Parser;
use std::sync::Arc;
use user_registration::utils::{
    logger::{self, TracingLogger},
    validation::Validate,
};
use user_registration::{CliConfig, LocalUserRepository, RegistrationEvent, RegistrationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting user-registration CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let body = config.read_body().await?;
    let repository = LocalUserRepository::new(config.store_path.clone());
    let service = RegistrationService::from_config(
        repository,
        &config.app_config(),
        Arc::new(TracingLogger::new(config.verbose)),
    );

    let event = RegistrationEvent {
        body: body.map(serde_json::Value::String),
    };
    let response = service.handle(event).await;
    let success = response.is_success();

    println!("{}", serde_json::to_string_pretty(&response.into_http())?);

    if success {
        tracing::info!("📁 User records in: {}", config.store_path.display());
    } else {
        std::process::exit(1);
    }

    Ok(())
}
