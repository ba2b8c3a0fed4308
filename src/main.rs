//! Replyforge - reply drafting for a live messaging page.
//!
//! Main entry point for the replyforge CLI. Commands attach to an
//! already-running browser over its debugging endpoint, resolve the
//! conversation context from the page, and drive a text-generation
//! provider with it.

mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use replyforge_config::{Config, ConfigStore, ProviderSettings};
use replyforge_protocols::{GenerationProvider, ProviderKind, Tone};
use replyforge_provider_anthropic::AnthropicProvider;
use replyforge_provider_openai::OpenAiProvider;
use replyforge_resolver::cdp::{CdpClient, CdpPage};
use replyforge_resolver::{ContextResolver, WaitOptions};
use replyforge_session::{AssistError, AssistSession};

use cli::{Cli, Commands, TemplateAction};

type CliError = Box<dyn std::error::Error>;

/// Initialize tracing on stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::new(path.clone()),
        None => ConfigStore::default_location()?,
    };
    let config = store.load_or_default()?;

    match cli.command {
        Commands::Conversations => cmd_conversations(&config, cli.endpoint.as_deref()).await,
        Commands::Draft {
            intent,
            template,
            conversation,
            tone,
            custom_tone,
            provider,
            max_tokens,
            insert,
        } => {
            let intent = resolve_intent(&config, intent, template)?;
            let tone = resolve_tone(&config, tone, custom_tone);
            cmd_draft(
                &config,
                cli.endpoint.as_deref(),
                DraftArgs {
                    intent,
                    conversation,
                    tone,
                    provider,
                    max_tokens,
                    insert,
                },
            )
            .await
        }
        Commands::Summarize {
            conversation,
            provider,
        } => {
            cmd_summarize(&config, cli.endpoint.as_deref(), conversation, provider).await
        }
        Commands::Template { action } => cmd_template(&store, config, action),
    }
}

struct DraftArgs {
    intent: String,
    conversation: Option<String>,
    tone: Tone,
    provider: Option<String>,
    max_tokens: Option<u32>,
    insert: bool,
}

/// List the conversation surfaces currently open on the page.
async fn cmd_conversations(config: &Config, endpoint: Option<&str>) -> Result<(), CliError> {
    let (_client, page) = attach(config, endpoint).await?;
    let resolver = resolver_from(config);

    let conversations = resolver.discover_open_conversations(&page).await?;
    if conversations.is_empty() {
        println!("No open conversations.");
        return Ok(());
    }

    println!("{:<28} {:<18} {}", "ID", "SURFACE", "PARTICIPANT");
    for c in &conversations {
        println!("{:<28} {:<18} {}", c.id, c.surface.as_str(), c.display_name);
    }
    Ok(())
}

/// Draft a reply, printing it to stdout.
async fn cmd_draft(
    config: &Config,
    endpoint: Option<&str>,
    args: DraftArgs,
) -> Result<(), CliError> {
    let provider = build_provider(config, args.provider.as_deref())?;
    let (_client, page) = attach(config, endpoint).await?;

    let mut session = AssistSession::new(page, resolver_from(config), provider);
    session.set_tone(args.tone)?;
    if let Some(id) = &args.conversation {
        session.open(id).await?;
    }

    let draft = run_assist(session.draft_reply(&args.intent, args.max_tokens)).await?;
    println!("{}", draft);

    if args.insert {
        session.insert_draft().await?;
        info!("draft placed in the compose field; review and send in the browser");
    }
    Ok(())
}

/// Summarize a conversation, printing the summary to stdout.
async fn cmd_summarize(
    config: &Config,
    endpoint: Option<&str>,
    conversation: Option<String>,
    provider: Option<String>,
) -> Result<(), CliError> {
    let provider = build_provider(config, provider.as_deref())?;
    let (_client, page) = attach(config, endpoint).await?;

    let mut session = AssistSession::new(page, resolver_from(config), provider);
    if let Some(id) = &conversation {
        session.open(id).await?;
    }

    let summary = run_assist(session.summarize()).await?;
    println!("{}", summary);
    Ok(())
}

/// Template storage commands.
fn cmd_template(
    store: &ConfigStore,
    mut config: Config,
    action: TemplateAction,
) -> Result<(), CliError> {
    match action {
        TemplateAction::List => {
            let templates = config.templates();
            if templates.is_empty() {
                println!("No templates stored.");
                return Ok(());
            }
            println!("{:<38} {:<20} {}", "ID", "NAME", "CONTENT");
            for t in templates {
                println!("{:<38} {:<20} {}", t.id, t.name, t.content);
            }
        }
        TemplateAction::Add { name, content } => {
            let id = config.add_template(&name, &content).id.clone();
            store.save(&config)?;
            println!("Added template {} ({})", name, id);
        }
        TemplateAction::Remove { key } => {
            if config.remove_template(&key) {
                store.save(&config)?;
                println!("Removed template {}", key);
            } else {
                return Err(format!("no template matches {:?}", key).into());
            }
        }
    }
    Ok(())
}

/// Connect to the browser and attach to the messaging tab.
///
/// The client owns the WebSocket receive task, so it must stay alive as
/// long as the page session is used.
async fn attach(config: &Config, endpoint: Option<&str>) -> Result<(CdpClient, CdpPage), CliError> {
    let endpoint = endpoint.unwrap_or(&config.browser.endpoint);
    let client = CdpClient::connect(endpoint).await?;
    let page = client
        .attach_page_matching(&config.browser.page_url_hint)
        .await?;
    Ok((client, page))
}

fn resolver_from(config: &Config) -> ContextResolver {
    ContextResolver::new()
        .with_wait(WaitOptions::new(config.preferences.extraction_timeout_ms))
        .with_recent_window(config.preferences.recent_window)
}

/// Surface the session's remediation hint on stderr before propagating.
async fn run_assist<T>(
    action: impl std::future::Future<Output = Result<T, AssistError>>,
) -> Result<T, CliError> {
    match action.await {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(hint) = err.suggestion() {
                eprintln!("hint: {}", hint);
            }
            Err(err.into())
        }
    }
}

/// The intent text for a draft: given directly, or looked up from a
/// stored template.
fn resolve_intent(
    config: &Config,
    intent: Option<String>,
    template: Option<String>,
) -> Result<String, CliError> {
    match (intent, template) {
        (Some(intent), _) => Ok(intent),
        (None, Some(key)) => Ok(config.template(&key)?.content.clone()),
        (None, None) => Err("give an intent, or --template to use a stored one".into()),
    }
}

/// Tone precedence: --custom-tone, then --tone, then the configured default.
fn resolve_tone(config: &Config, tone: Option<String>, custom_tone: Option<String>) -> Tone {
    if let Some(text) = custom_tone {
        return Tone::Custom(text);
    }
    match tone {
        Some(name) => Tone::from_name(&name),
        None => config.preferences.tone(),
    }
}

/// Build the generation provider named on the command line, falling back
/// to the configured preference.
fn build_provider(
    config: &Config,
    provider: Option<&str>,
) -> Result<Arc<dyn GenerationProvider>, CliError> {
    let kind = match provider {
        Some(name) => parse_provider(name)?,
        None => config.preferences.preferred_provider,
    };
    let settings = config.providers.settings_for(kind);
    let api_key = resolve_api_key(kind, settings)?;

    let provider: Arc<dyn GenerationProvider> = match kind {
        ProviderKind::Anthropic => {
            let mut p = AnthropicProvider::new(api_key);
            if let Some(base_url) = &settings.base_url {
                p = p.with_endpoint(base_url);
            }
            if let Some(model) = &settings.model {
                p = p.with_model(model);
            }
            Arc::new(p)
        }
        ProviderKind::OpenAi => {
            let mut p = OpenAiProvider::new(api_key);
            if let Some(base_url) = &settings.base_url {
                p = p.with_endpoint(base_url);
            }
            if let Some(model) = &settings.model {
                p = p.with_model(model);
            }
            Arc::new(p)
        }
    };
    Ok(provider)
}

fn parse_provider(name: &str) -> Result<ProviderKind, CliError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "anthropic" => Ok(ProviderKind::Anthropic),
        "openai" => Ok(ProviderKind::OpenAi),
        other => Err(format!("unknown provider {:?} (anthropic, openai)", other).into()),
    }
}

/// API key from config, falling back to the provider's environment variable.
fn resolve_api_key(kind: ProviderKind, settings: &ProviderSettings) -> Result<String, CliError> {
    let env_var = match kind {
        ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        ProviderKind::OpenAi => "OPENAI_API_KEY",
    };
    settings
        .api_key
        .clone()
        .or_else(|| std::env::var(env_var).ok())
        .ok_or_else(|| {
            format!(
                "no API key for {}; set providers.{}.api_key in config or {}",
                kind.as_str(),
                kind.as_str(),
                env_var
            )
            .into()
        })
}
