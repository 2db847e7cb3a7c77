use anyhow::Context;

use persona_flow::assistant::Assistant;
use persona_flow::channels::CliChannel;
use persona_flow::config::FlowConfig;
use persona_flow::flow::GuidedConversationController;
use persona_flow::personas::PersonaCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = FlowConfig::from_env().context("reading configuration")?;

    eprintln!("🤖 persona-flow v{}", env!("CARGO_PKG_VERSION"));

    let mut catalog = PersonaCatalog::builtin().context("building persona tables")?;
    if let Some(ref path) = config.table_override {
        catalog = catalog
            .with_override_file(path)
            .with_context(|| format!("loading step table from {}", path.display()))?;
        eprintln!("   Custom flow: {}", path.display());
    }
    eprintln!(
        "   Persona: {}",
        config
            .initial_persona
            .map(|p| p.display_name())
            .unwrap_or("selector menu")
    );
    eprintln!("   Type an option number or your answer. /help for commands.\n");

    let assistant = Assistant::new(
        GuidedConversationController::new(),
        catalog,
        config.initial_persona,
    )
    .with_typing_delay(config.typing_delay);

    assistant.run(&CliChannel::new()).await?;

    Ok(())
}
