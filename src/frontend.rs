//! Chat front-end logic: reply texts, the input screen, the per-message
//! conversation flow, and batch formatting. Transports plug in through
//! [`ChatReplies`]; no Telegram code lives here.

use thiserror::Error;
use tracing::{error, info};

use crate::error::IcebreakerError;
use crate::generator::batch::MessageBatch;
use crate::generator::{BioText, MessageGenerator};
use crate::providers::ProviderKind;

/// Bios shorter than this (in characters) are rejected without a backend call.
pub const MIN_BIO_CHARS: usize = 20;

/// Provider used by the chat front end.
pub const CHAT_PROVIDER: ProviderKind = ProviderKind::OpenAi;

pub const SAMPLE_BIO: &str = "Akhat, founder of an LLP in Kazakhstan. I work in appraisal, \
consulting and logistics. Right now I'm rolling out AI agents across my business processes \
to automate cold sales on LinkedIn and order handling in WhatsApp. Looking for fast \
developers to join the team.";

pub const START_TEXT: &str = "👋 Hi! I write personalized LinkedIn outreach messages.\n\n\
📝 Send me the bio text from a LinkedIn profile and I'll come up with 3 \
personalized ice-breakers.\n\n\
💡 Example: 'Ivan, founder of a FinTech startup...'";

pub const HELP_TEXT: &str = "ℹ️ How to use:\n\n\
1. Copy the bio from a LinkedIn profile\n\
2. Send it to me as a message\n\
3. Get 3 personalized message variants\n\n\
📌 Commands:\n\
/start - Get started\n\
/help - Show this help\n\
/example - Show an example";

pub const TOO_SHORT_TEXT: &str =
    "⚠️ The profile text is too short. Please send a more detailed description.";

pub const BLANK_TEXT: &str =
    "⚠️ The message has no text in it. Please paste the profile bio you want messages for.";

pub const PROCESSING_TEXT: &str = "⏳ Analyzing the profile and writing personalized messages...";

const DIVIDER: &str = "━━━━━━━━━━━━━━━";

pub fn example_text() -> String {
    format!(
        "Example profile bio:\n\n'{SAMPLE_BIO}'\n\n\
Just send me text like this and I'll write personalized messages! 🚀"
    )
}

/// Why an inbound message was not treated as a bio. Handled entirely by the
/// front end; the generator never sees rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("message is blank")]
    Blank,

    #[error("bio has {chars} characters, at least {} required", MIN_BIO_CHARS)]
    TooShort { chars: usize },
}

impl Rejection {
    pub fn reply(self) -> &'static str {
        match self {
            Rejection::Blank => BLANK_TEXT,
            Rejection::TooShort { .. } => TOO_SHORT_TEXT,
        }
    }
}

/// A bio that passed the screen. Only [`screen`] produces one, so the
/// generator is unreachable for rejected input.
#[derive(Debug)]
pub struct AcceptedBio(BioText);

impl AcceptedBio {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Reject blank input, then anything under [`MIN_BIO_CHARS`] characters.
pub fn screen(text: &str) -> Result<AcceptedBio, Rejection> {
    if text.trim().is_empty() {
        return Err(Rejection::Blank);
    }
    let chars = text.chars().count();
    if chars < MIN_BIO_CHARS {
        return Err(Rejection::TooShort { chars });
    }
    BioText::new(text)
        .map(AcceptedBio)
        .map_err(|_| Rejection::Blank)
}

/// Outbound side of one chat. [`respond`] drives it, so every transport runs
/// the same flow.
pub trait ChatReplies: Send + Sync {
    /// Handle to a sent notice, used to take it back.
    type Notice: Send;
    type Error: Send;

    fn send(&self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn notify(&self, text: &str) -> impl Future<Output = Result<Self::Notice, Self::Error>> + Send;

    /// Remove a notice. Failures are the transport's to log; the reply still
    /// goes out.
    fn retract(&self, notice: Self::Notice) -> impl Future<Output = ()> + Send;
}

/// Handle one inbound text message: screen it, and only if accepted show the
/// processing notice, generate, retract the notice and send the result.
pub async fn respond<C: ChatReplies>(
    generator: &MessageGenerator,
    chat: &C,
    text: &str,
) -> Result<(), C::Error> {
    let bio = match screen(text) {
        Ok(bio) => bio,
        Err(rejection) => {
            info!(reason = %rejection, "bio rejected");
            return chat.send(rejection.reply().to_owned()).await;
        }
    };

    let notice = chat.notify(PROCESSING_TEXT).await?;
    let reply = reply_for(generator, &bio).await;
    chat.retract(notice).await;
    chat.send(reply).await
}

/// Run the generator for an accepted bio and render the chat reply, success
/// or failure.
pub async fn reply_for(generator: &MessageGenerator, bio: &AcceptedBio) -> String {
    match generator.generate(&bio.0, CHAT_PROVIDER).await {
        Ok(batch) => format_batch(&batch),
        Err(e) => {
            error!(error = %e, "generation failed");
            format_failure(&e)
        }
    }
}

/// Numbered, decorated chat reply.
pub fn format_batch(batch: &MessageBatch) -> String {
    if batch.is_empty() {
        return "🤔 The model didn't return any usable messages this time. \
Try again or send a more detailed bio."
            .to_owned();
    }

    let mut reply = format!("✅ Personalized message variants ({}):\n\n", batch.len());
    for (i, message) in batch.iter().enumerate() {
        reply.push_str(&format!(
            "{DIVIDER}\n📨 Variant {} ({} characters):\n{message}\n\n",
            i + 1,
            message.char_count()
        ));
    }
    reply.push_str(DIVIDER);
    reply.push_str("\n💡 Pick the one that fits best or use it as a starting point!");
    reply
}

pub fn format_failure(error: &IcebreakerError) -> String {
    format!("❌ Something went wrong: {error}\n\nCheck the API key settings in your .env file.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_chars_rejected() {
        let err = screen("fifteen chars!!").unwrap_err();
        assert_eq!(err, Rejection::TooShort { chars: 15 });
        assert_eq!(err.reply(), TOO_SHORT_TEXT);
    }

    #[test]
    fn twenty_five_chars_accepted() {
        let text = "Founder, logistics, AI!!!";
        assert_eq!(text.chars().count(), 25);
        assert_eq!(screen(text).unwrap().as_str(), text);
    }

    #[test]
    fn boundary_is_twenty_characters() {
        assert!(screen(&"a".repeat(19)).is_err());
        assert!(screen(&"a".repeat(20)).is_ok());
    }

    #[test]
    fn screen_counts_characters_not_bytes() {
        // 12 Cyrillic letters: 24 bytes, still too short.
        assert_eq!(
            screen(&"б".repeat(12)).unwrap_err(),
            Rejection::TooShort { chars: 12 }
        );
    }

    #[test]
    fn long_blank_input_gets_blank_reply() {
        let err = screen(&" \n\t".repeat(20)).unwrap_err();
        assert_eq!(err, Rejection::Blank);
        assert_eq!(err.reply(), BLANK_TEXT);
    }

    #[test]
    fn short_blank_input_is_blank_not_short() {
        assert_eq!(screen("   ").unwrap_err(), Rejection::Blank);
    }

    #[test]
    fn batch_formatting_numbers_and_counts() {
        let batch = MessageBatch::from_response(
            "Hey, saw you're automating LinkedIn sales!\nWhatsApp order bots, nice idea",
        );
        let reply = format_batch(&batch);
        assert!(reply.starts_with("✅ Personalized message variants (2):\n\n━"));
        assert!(reply.contains("📨 Variant 1 (42 characters):\nHey, saw you're automating LinkedIn sales!\n\n"));
        assert!(reply.contains("📨 Variant 2 (30 characters):"));
        assert!(!reply.contains("Variant 3"));
        assert!(reply.ends_with(&format!("{DIVIDER}\n💡 Pick the one that fits best or use it as a starting point!")));
    }

    #[test]
    fn empty_batch_gets_its_own_reply() {
        let reply = format_batch(&MessageBatch::default());
        assert!(reply.contains("didn't return any usable messages"));
    }

    #[test]
    fn failure_reply_includes_error() {
        let err = IcebreakerError::Configuration("OPENAI_API_KEY is not set".to_owned());
        let reply = format_failure(&err);
        assert!(reply.starts_with("❌"));
        assert!(reply.contains("OPENAI_API_KEY is not set"));
    }

    #[test]
    fn example_contains_sample_bio() {
        assert!(example_text().contains(SAMPLE_BIO));
        assert!(screen(SAMPLE_BIO).is_ok());
    }
}
