mod api;
mod relay;

use clap::{Parser, Subcommand};
use honyaku_channels::line::LineChannel;
use honyaku_core::{config, routing::LanguagePair, traits::Translator};
use honyaku_providers::deepl::DeepLTranslator;
use relay::Relay;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "honyaku",
    version,
    about = "LINE ⇄ DeepL translation relay (Japanese ⇄ English)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "HONYAKU_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server.
    Start,
    /// Translate text once and print the result.
    Translate {
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print the translation direction that would be used for some text.
    Detect {
        /// The text to classify.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Show configuration and DeepL character usage.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env_overrides();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.service.log_level)),
        )
        .init();

    if let Some(notice) = missing_config_notice(&cli.config) {
        info!("{notice}");
    }

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let translator = Arc::new(DeepLTranslator::from_config(&cfg.deepl)?);
            let channel = Arc::new(LineChannel::new(&cfg.line)?);
            let relay = Relay::new(translator, channel, cfg.reply.clone());

            let channel_secret = cfg
                .line
                .verify_signature
                .then(|| cfg.line.channel_secret.clone());
            if channel_secret.is_none() {
                tracing::warn!("webhook signature verification is disabled");
            }

            info!("{} starting", cfg.service.name);
            let state = api::ApiState::new(Arc::new(relay), channel_secret);
            api::serve(&cfg.api, state).await?;
        }
        Commands::Translate { text } => {
            let text = joined_arg(text, "translate")?;
            if cfg.deepl.auth_key.is_empty() {
                anyhow::bail!(
                    "deepl.auth_key is empty. Set it in {} or the {} env var.",
                    cli.config,
                    config::ENV_DEEPL_AUTH_KEY
                );
            }

            let translator = DeepLTranslator::from_config(&cfg.deepl)?;
            let pair = LanguagePair::for_text(&text);
            let translation = translator.translate(&text, pair).await?;
            eprintln!("{pair}");
            println!("{}", translation.joined(&cfg.reply.segment_separator));
        }
        Commands::Detect { text } => {
            let text = joined_arg(text, "detect")?;
            println!("{}", LanguagePair::for_text(&text));
        }
        Commands::Status => {
            println!("honyaku — status\n");
            println!("Config: {}", cli.config);
            println!(
                "Webhook: http://{}:{}{}",
                cfg.api.host, cfg.api.port, cfg.api.webhook_path
            );
            println!(
                "  line: {}",
                if cfg.line.access_token.is_empty() {
                    "missing access_token"
                } else if cfg.line.verify_signature && cfg.line.channel_secret.is_empty() {
                    "missing channel_secret"
                } else {
                    "configured"
                }
            );

            if cfg.deepl.auth_key.is_empty() {
                println!("  deepl: missing auth_key");
            } else {
                let translator = DeepLTranslator::from_config(&cfg.deepl)?;
                match translator.usage().await {
                    Ok(usage) => println!(
                        "  deepl: {} / {} characters used",
                        usage.character_count, usage.character_limit
                    ),
                    Err(e) => println!("  deepl: unavailable ({e})"),
                }
            }
        }
    }

    Ok(())
}

/// Startup notice for a config path that does not exist.
///
/// `config::load` runs before the subscriber is installed, so the fallback to
/// defaults is reported again once logging is up.
fn missing_config_notice(path: &str) -> Option<String> {
    (!std::path::Path::new(path).exists())
        .then(|| format!("Config file not found at {path}, using defaults"))
}

/// Join trailing CLI words into one text, rejecting an empty result.
fn joined_arg(words: Vec<String>, command: &str) -> anyhow::Result<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        anyhow::bail!("no text provided. Usage: honyaku {command} <text>");
    }
    Ok(text)
}
