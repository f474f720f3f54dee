//! # Listwire
//!
//! Imports subscribers from a JSON file into a MailerLite group.
//!
//! The target group is an existing ID (`import.group_id` or
//! `mailerlite.default_group_id`) or a new group named by
//! `import.group_name`. Configuration comes from `./config/*.toml` and
//! `LISTWIRE__*` environment variables.

use listwire_cli::logging::init_logging;
use listwire_cli::{read_subscribers, run_import, GroupTarget, ImportSummary};
use listwire_client::create_mailerlite_service;
use listwire_config::{ConfigLoader, ListwireConfig, ObservabilityConfig};
use listwire_core::{ListwireError, ListwireResult};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting Listwire import...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    match run(config).await {
        Ok(summary) if summary.is_complete() => {
            info!(
                group_id = %summary.group_id,
                group_created = summary.group_created,
                submitted = summary.submitted,
                "Import finished"
            );
        }
        Ok(summary) => {
            warn!(
                group_id = %summary.group_id,
                submitted = summary.submitted,
                failed = summary.failed,
                "Import finished with failures"
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!(code = e.error_code(), status = ?e.status(), "Import failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(config: ListwireConfig) -> ListwireResult<ImportSummary> {
    let file = config
        .import
        .file
        .clone()
        .ok_or_else(|| ListwireError::configuration("import.file is required"))?;

    let target = GroupTarget::resolve(&config.import, &config.mailerlite)?;
    let subscribers = read_subscribers(&file).await?;
    info!("Importing {} subscribers from {} into {}", subscribers.len(), file.display(), target);

    let service = create_mailerlite_service(&config.mailerlite)?;
    run_import(service.as_ref(), target, &subscribers, config.import.single).await
}
