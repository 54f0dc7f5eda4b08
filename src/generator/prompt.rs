use super::batch::{MAX_BATCH_LEN, MAX_MESSAGE_CHARS};

/// System message sent with chat-style backends that accept one.
pub const SYSTEM_PROMPT: &str = "You are a networking expert who writes personalized \
first-contact messages for LinkedIn. Your messages are natural, friendly and effective.";

/// Build the instruction prompt. The bio is embedded verbatim.
pub fn build_prompt(bio: &str, language: &str) -> String {
    format!(
        "Analyze the following LinkedIn profile and write {MAX_BATCH_LEN} variants of \
personalized first-contact messages (ice-breakers).

Profile:
{bio}

Requirements for the messages:
1. Write them in {language}
2. Each message is strictly no longer than {MAX_MESSAGE_CHARS} characters
3. No formal language: pick one conversational register (casual or politely informal) \
and use it consistently across all messages
4. Personalized, built on specific details from the profile
5. Natural, friendly, and inviting a reply
6. Each message takes its own distinct approach

Return only the {MAX_BATCH_LEN} messages, one per line, without numbering or any extra commentary."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIO: &str = "Akhat, founder of a consulting firm.\nAutomating cold sales with AI agents.";

    #[test]
    fn bio_is_embedded_verbatim() {
        let prompt = build_prompt(BIO, "Russian");
        assert!(prompt.contains(BIO));
    }

    #[test]
    fn prompt_carries_constraints() {
        let prompt = build_prompt(BIO, "Russian");
        assert!(prompt.contains("in Russian"));
        assert!(prompt.contains("no longer than 200 characters"));
        assert!(prompt.contains("write 3 variants"));
        assert!(prompt.contains("one per line, without numbering"));
        assert!(prompt.contains("distinct approach"));
    }

    #[test]
    fn language_is_configurable() {
        let prompt = build_prompt(BIO, "English");
        assert!(prompt.contains("in English"));
        assert!(!prompt.contains("Russian"));
    }
}
