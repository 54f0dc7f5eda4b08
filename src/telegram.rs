//! Telegram front end: long polling, three commands, and free text treated
//! as a bio.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{MessageEntity, MessageEntityKind, MessageId};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::frontend::{self, ChatReplies};
use crate::generator::MessageGenerator;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "get started")]
    Start,
    #[command(description = "show usage help")]
    Help,
    #[command(description = "show an example bio")]
    Example,
}

/// Run the bot until Ctrl+C. Each chat is handled independently; the
/// generator is shared read-only.
pub async fn run(token: SecretString, generator: MessageGenerator) {
    let bot = Bot::new(token.expose_secret());
    let generator = Arc::new(generator);

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter(|msg: Message| {
                msg.text().is_some() && !starts_with_bot_command(msg.entities().unwrap_or_default())
            })
            .endpoint(handle_text),
        );

    info!("telegram bot started, polling for updates");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![generator])
        .default_handler(|update| async move {
            tracing::debug!(update_id = ?update.id, "ignoring unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred in the telegram dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Telegram marks commands (known or not) with a `BotCommand` entity at the
/// start of the text. Text that merely begins with `/` is still a bio.
fn starts_with_bot_command(entities: &[MessageEntity]) -> bool {
    entities
        .iter()
        .any(|e| e.kind == MessageEntityKind::BotCommand && e.offset == 0)
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    let text = match cmd {
        Command::Start => frontend::START_TEXT.to_owned(),
        Command::Help => frontend::HELP_TEXT.to_owned(),
        Command::Example => frontend::example_text(),
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    generator: Arc<MessageGenerator>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat = TelegramChat {
        bot,
        chat_id: msg.chat.id,
    };
    frontend::respond(&generator, &chat, text).await
}

struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
}

impl ChatReplies for TelegramChat {
    type Notice = MessageId;
    type Error = RequestError;

    async fn send(&self, text: String) -> Result<(), RequestError> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn notify(&self, text: &str) -> Result<MessageId, RequestError> {
        let sent = self.bot.send_message(self.chat_id, text).await?;
        Ok(sent.id)
    }

    async fn retract(&self, notice: MessageId) {
        if let Err(e) = self.bot.delete_message(self.chat_id, notice).await {
            warn!(chat_id = self.chat_id.0, error = %e, "could not delete processing notice");
        }
    }
}
