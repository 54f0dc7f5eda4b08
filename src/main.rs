use icebreaker::config::Config;
use icebreaker::frontend::SAMPLE_BIO;
use icebreaker::{IcebreakerError, MessageBatch, MessageGenerator, ProviderKind, logging};

const RULE_WIDTH: usize = 80;

#[tokio::main]
async fn main() {
    logging::init("warn");

    // Single optional positional argument: the provider name.
    let provider_arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| ProviderKind::default().to_string());

    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("LinkedIn mini-agent: personalized message generation");
    println!("{rule}");
    println!("\nProfile under analysis:\n{SAMPLE_BIO}\n");
    println!("{rule}");
    println!("\nUsing API: {}", provider_arg.to_uppercase());
    println!("\nGenerating personalized messages...\n");

    match run(&provider_arg).await {
        Ok(batch) => print_batch(&batch, &rule),
        Err(e) => print_diagnostic(&e),
    }
}

async fn run(provider: &str) -> Result<MessageBatch, IcebreakerError> {
    let generator = MessageGenerator::from_config(Config::from_env()?)?;
    generator.generate_from_str(SAMPLE_BIO, provider).await
}

fn print_batch(batch: &MessageBatch, rule: &str) {
    println!("{rule}");
    println!("RESULT: {} personalized message variants", batch.len());
    println!("{rule}");

    for (i, message) in batch.iter().enumerate() {
        println!("\n[Variant {}] ({} characters)", i + 1, message.char_count());
        println!("├─ {message}");
    }

    println!("\n{rule}");
    println!("✓ Generation completed successfully!");
    println!("{rule}");
}

fn print_diagnostic(error: &IcebreakerError) {
    println!("\n❌ Error: {error}");
    println!("\nCheck:");
    println!("1. A .env file with your API key exists");
    println!("2. The API key is valid");
    println!("3. The provider is one of: openai, anthropic");
}
