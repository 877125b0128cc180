use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;

use profilebot::cli::{Cli, Commands};
use profilebot::core::keep_alive::start_keep_alive_task;
use profilebot::core::web_server::start_web_server;
use profilebot::core::{config, init_logger, install_panic_hook, log_startup_configuration, BotConfig};
use profilebot::storage::{Catalog, SubscriberStore};
use profilebot::telegram::notifications::notify_admin_startup;
use profilebot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    install_panic_hook();
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Profiles { path }) => {
            let path = path.unwrap_or_else(|| config::PROFILES_PATH.clone());
            run_profiles(&path)
        }
    }
}

/// Prints the catalog listing. Unlike the bot, a broken file is an error here.
fn run_profiles(path: &str) -> Result<()> {
    let catalog = Catalog::load(path)?;
    println!("{} profile(s) in {}", catalog.len(), path);
    for line in catalog.listing() {
        println!("{}", line);
    }
    Ok(())
}

async fn run_bot() -> Result<()> {
    let bot_config = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    log_startup_configuration(&bot_config);

    let catalog = Arc::new(Catalog::load_or_empty(config::PROFILES_PATH.as_str()));
    let subscribers = Arc::new(SubscriberStore::load(config::SUBSCRIBERS_PATH.as_str()).await);
    log::info!("Subscribers loaded: {}", subscribers.len().await);

    let bot = create_bot(&bot_config)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    notify_admin_startup(&bot, bot_config.admin_id, catalog.len(), subscribers.len().await).await;

    let port = bot_config.port;
    tokio::spawn(async move {
        if let Err(e) = start_web_server(port).await {
            log::error!("Health server stopped: {}", e);
        }
    });

    if let Some(period) = config::keep_alive::interval() {
        if let Err(e) = start_keep_alive_task(bot_config.self_url.clone(), period) {
            log::warn!("Self-ping disabled: {}", e);
        }
    }

    let deps = HandlerDeps::new(Arc::new(bot_config), catalog, subscribers);
    let handler = schema(deps);

    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;
    let mut retry_count = 0;

    // Run the dispatcher with retry logic
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // Create a new dispatcher in a separate task to isolate panics
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            let listener = Polling::builder(bot_clone.clone()).build();

            Dispatcher::builder(bot_clone, handler_clone)
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);

                if retry_count < max_retries {
                    retry_count += 1;
                    log::info!(
                        "Restarting dispatcher after panic (attempt {}/{})...",
                        retry_count,
                        max_retries
                    );
                    exponential_backoff(retry_count).await;
                } else {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        sleep(config::retry::dispatcher_delay()).await;
    }

    Ok(())
}

/// Exponential backoff delay for retries
async fn exponential_backoff(retry_count: u32) {
    let delay = Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
