// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use news_summarize::config::DeliveryChannel;
use news_summarize::utils::logging::{format_error, format_info, format_region, format_success};
use news_summarize::{
    AuditLog, BraveNewsClient, Config, ConsoleGateway, Delivery, FreshnessMode, FreshnessPolicy,
    FreshnessWindow, GroqChatClient, OperationTimer, Summarizer, TelegramClient, TopicPipeline,
    TopicResolver, UpdatePoller, Validator, WhatsAppClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "news_summarize")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Telegram bot that searches the news and replies with a summary", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Long-poll Telegram and answer every incoming topic until Ctrl-C
    Run,

    /// Summarize one topic and print it (or send it with --chat-id)
    Ask {
        /// Topic or region name, e.g. "middle east" or "quantum computing"
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Search only this window instead of the configured freshness mode
        #[arg(short, long, value_name = "PERIOD")]
        period: Option<FreshnessWindow>,

        /// Deliver through the configured channel instead of stdout
        #[arg(long, value_name = "CHAT")]
        chat_id: Option<String>,
    },

    /// List the configured regions and their countries
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    news_summarize::utils::logging::init_logger(cli.color, cli.verbose);

    info!("News Summarize");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::from_env_defaults().unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run => {
            cmd_run(&config).await?;
        }
        Commands::Ask {
            topic,
            period,
            chat_id,
        } => {
            cmd_ask(&config, &topic.join(" "), period, chat_id).await?;
        }
        Commands::Regions => {
            cmd_regions(&config);
        }
    }

    Ok(())
}

async fn cmd_run(config: &Config) -> Result<()> {
    config
        .require_credentials()
        .context("Missing credentials for the bot")?;

    let telegram = TelegramClient::new(&config.telegram).context("Failed to create Telegram client")?;
    let delivery = match config.delivery.channel {
        DeliveryChannel::Telegram => Delivery::Telegram(telegram.clone()),
        DeliveryChannel::WhatsApp => Delivery::WhatsApp(whatsapp_client(config)?),
    };

    let pipeline = build_pipeline(config, delivery).await?;
    info!(
        channel = pipeline.gateway().name(),
        regions = config.regions.len(),
        "Bot started"
    );

    let timer = OperationTimer::new("bot");
    let mut poller = UpdatePoller::new(telegram, &config.telegram);
    poller.run(&pipeline).await;
    timer.finish();

    let stats = pipeline.stats();
    info!(
        messages = stats.messages_handled,
        summaries = stats.summaries_sent,
        empty = stats.empty_topics,
        failures = stats.failures,
        results = stats.results_found,
        success_rate = format!("{:.1}%", stats.success_rate()),
        "Bot stopped"
    );

    Ok(())
}

async fn cmd_ask(
    config: &Config,
    topic: &str,
    period: Option<FreshnessWindow>,
    chat_id: Option<String>,
) -> Result<()> {
    Validator::require_secret(config.search.api_key.as_deref(), "search.api_key")?;
    Validator::require_secret(config.llm.api_key.as_deref(), "llm.api_key")?;

    let (delivery, chat_id) = match chat_id {
        Some(chat_id) => {
            Validator::validate_chat_id(&chat_id)?;
            let delivery = match config.delivery.channel {
                DeliveryChannel::Telegram => Delivery::Telegram(
                    TelegramClient::new(&config.telegram).context("Failed to create Telegram client")?,
                ),
                DeliveryChannel::WhatsApp => Delivery::WhatsApp(whatsapp_client(config)?),
            };
            (delivery, chat_id)
        }
        None => (Delivery::Console(ConsoleGateway), "console".to_string()),
    };

    let text = match period {
        Some(window) => format!("{}/{}", topic, window),
        None => topic.to_string(),
    };

    let pipeline = build_pipeline(config, delivery).await?;
    let outcome = pipeline.handle(&chat_id, &text).await;

    let message = format!("Topic \"{}\" handled via {}: {:?}", topic, pipeline.gateway().name(), outcome);
    match outcome {
        news_summarize::Outcome::Failed => eprintln!("{}", format_error(&message)),
        _ => eprintln!("{}", format_success(&message)),
    }

    Ok(())
}

fn cmd_regions(config: &Config) {
    let resolver = TopicResolver::new(config.regions.clone());
    if resolver.regions().is_empty() {
        println!("{}", format_info("No regions configured"));
        return;
    }

    for (name, countries) in resolver.regions() {
        println!("{}", format_region(name, countries));
    }
}

async fn build_pipeline(
    config: &Config,
    delivery: Delivery,
) -> Result<TopicPipeline<BraveNewsClient, GroqChatClient, Delivery>> {
    let audit = AuditLog::create(&config.audit.path, config.audit.format)
        .await
        .context("Failed to create audit log")?;
    info!("Audit log: {}", audit.path().display());

    let search = BraveNewsClient::new(&config.search, Arc::new(audit))
        .context("Failed to create Brave news client")?;
    let generator = GroqChatClient::new(&config.llm).context("Failed to create Groq client")?;

    Ok(TopicPipeline::new(
        TopicResolver::new(config.regions.clone()),
        FreshnessPolicy::new(search, config.search.parallel_queries),
        Summarizer::new(generator, config.llm.style),
        delivery,
        FreshnessMode::from_config(&config.freshness),
    ))
}

fn whatsapp_client(config: &Config) -> Result<WhatsAppClient> {
    let whatsapp = config
        .whatsapp
        .as_ref()
        .context("delivery.channel is whatsapp but the [whatsapp] section is missing")?;
    WhatsAppClient::new(whatsapp).context("Failed to create WhatsApp client")
}

