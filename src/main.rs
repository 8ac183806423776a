use catalogue_admin::config::Command;
use catalogue_admin::core::ServiceResolver;
use catalogue_admin::utils::{logger, validation::Validate};
use catalogue_admin::{CliConfig, ConsoleContext, ConsoleError, DeviceAssignment, ErrorKind, User};
use clap::Parser;
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // logging first, so config errors are reported through it
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!(
        "CLI config: registry={} timeout={}s config={:?}",
        cli.registry,
        cli.timeout,
        cli.config
    );

    let config = match cli.console_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // fresh context per run; resolved addresses are never reused across runs
    let context = ConsoleContext::new(&config);

    match run(&context, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Operation failed: {} (kind: {:?})", e, e.kind());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.kind() {
                ErrorKind::Config => 1,
                ErrorKind::NotFound | ErrorKind::Downstream => 2,
                ErrorKind::Unreachable | ErrorKind::Timeout | ErrorKind::InvalidResponse => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(context: &ConsoleContext, command: Command) -> Result<serde_json::Value, ConsoleError> {
    match command {
        Command::Resolve { service } => {
            let resolution = context.discovery().resolve(&service).await?;
            match resolution.endpoint() {
                Some(endpoint) => Ok(json!({"ok": true, "service": service, "url": endpoint.base_url()})),
                None => Err(ConsoleError::ServiceNotFound { service }),
            }
        }
        Command::Devices => {
            let devices = context.device_inventory().list_devices().await?;
            Ok(json!({"ok": true, "devices": devices}))
        }
        Command::Users => {
            let response = context.user_catalogue().await?.list_users().await?.error_for_status()?;
            let users: Vec<User> = response.list_field("users");
            Ok(json!({"ok": true, "users": users}))
        }
        Command::CreateUser { username, password } => {
            let catalogue = context.user_catalogue().await?;
            let data = catalogue.create_user(username, password).await?.error_for_status()?;
            Ok(json!({"ok": true, "data": data.body}))
        }
        Command::UserDevices { user_id } => {
            let catalogue = context.user_catalogue().await?;
            let response = catalogue.list_user_devices(user_id).await?.error_for_status()?;
            let devices: Vec<DeviceAssignment> = response.list_field("devices");
            Ok(json!({"ok": true, "devices": devices}))
        }
        Command::Assign {
            user_id,
            device_id,
            label,
        } => {
            let catalogue = context.user_catalogue().await?;
            let data = catalogue.assign_device(user_id, device_id, label).await?.error_for_status()?;
            Ok(json!({"ok": true, "data": data.body}))
        }
        Command::Unassign { user_id, device_id } => {
            let catalogue = context.user_catalogue().await?;
            let data = catalogue.unassign_device(user_id, device_id).await?.error_for_status()?;
            Ok(json!({"ok": true, "data": data.body}))
        }
    }
}
