//! relay-bot: entry point. Loads `.env`, reads config, sets up logging and starts polling.

use anyhow::Result;
use clap::Parser;
use dbot_telegram::TelegramConfig;
use llm_client::EnvLlmConfig;
use relay_bot::run_relay_bot;

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Relays Telegram messages to Fireworks AI and streams the reply back", long_about = None)]
#[command(version)]
struct Cli {}

/// Single-threaded scheduler; blocking upstream reads run on tokio's blocking pool.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    Cli::parse();

    let telegram = TelegramConfig::from_env()?;
    dbot_core::init_tracing(telegram.log_file.as_deref())?;
    let llm = EnvLlmConfig::from_env()?;

    run_relay_bot(telegram, llm).await
}
