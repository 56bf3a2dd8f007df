mod server;

use std::sync::Arc;

use crate::server::{
    bot, config::Config, data::session::InMemorySessionStore, error::AppError, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();
    startup::install_panic_hook();

    let config = Config::from_env()?;

    let sessions = Arc::new(InMemorySessionStore::new());
    let client = bot::start::init_bot(&config, sessions).await?;
    let shard_manager = client.shard_manager.clone();

    // Start Discord bot in a separate task
    let bot_task = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Discord bot task failed: {}", e);
            }
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}
