use anyhow::Context;
use icebreaker::config::{self, Config};
use icebreaker::{MessageGenerator, logging, telegram};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("info");

    // Missing bot token is the one startup-fatal condition.
    let token = config::telegram_token().context("cannot start telegram bot")?;
    let config = Config::from_env().context("cannot load configuration")?;
    let generator = MessageGenerator::from_config(config)?;

    println!("🤖 Telegram bot is running.");
    println!("📱 Find your bot in Telegram and start sending profile bios.");
    println!("🛑 Press Ctrl+C to stop.");

    telegram::run(token, generator).await;
    Ok(())
}
