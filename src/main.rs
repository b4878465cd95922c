//! GptBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use tracing::{error, info, warn};

use GptBuddy::{
    config::Settings,
    utils::logging,
    database::{ChatRepository, connection::{create_pool, health_check, run_migrations, DatabaseConfig}},
    services::ServiceFactory,
    state::{ConversationStateStore, OnboardingScript},
    handlers::{MessageDispatcher, handle_message},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", GptBuddy::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;
    run_migrations(&db_pool).await?;
    health_check(&db_pool).await.context("chat history table is not reachable")?;

    // Initialize conversation state
    let script = Arc::new(OnboardingScript::from(&settings.onboarding));
    info!(prompts = script.len(), "Onboarding questionnaire loaded");
    let states = ConversationStateStore::new(script);

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let services = ServiceFactory::new(bot.clone(), &settings, ChatRepository::new(db_pool))?;
    let dispatcher = Arc::new(MessageDispatcher::from_services(states, &services));

    info!("Setting up bot handlers...");

    let mut bot_dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    bot_dispatcher.dispatch().await;

    info!("GptBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_messages))
}

/// Handle regular messages
async fn handle_messages(msg: Message, dispatcher: Arc<MessageDispatcher>) -> HandlerResult {
    if let Err(e) = handle_message(msg, dispatcher).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
