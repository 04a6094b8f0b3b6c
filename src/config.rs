// file: src/config.rs
// description: application configuration management with toml and env support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::FreshnessWindow;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
    pub freshness: FreshnessConfig,
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub whatsapp: Option<WhatsAppConfig>,
    pub audit: AuditConfig,
    #[serde(default)]
    pub regions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub api_base: String,
    pub poll_timeout_secs: u64,
    pub retry_delay_secs: u64,
    pub default_chat_id: Option<String>,
    #[serde(default)]
    pub allowed_chat_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub result_count: usize,
    pub country: String,
    pub search_lang: String,
    pub spellcheck: bool,
    pub extra_snippets: bool,
    pub min_interval_ms: u64,
    pub parallel_queries: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub style: SummaryStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    /// One concise digest across all results.
    Digest,
    /// Results grouped per topic with a fill-in template.
    Grouped,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FreshnessConfig {
    pub mode: FreshnessModeKind,
    pub window: FreshnessWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessModeKind {
    Fixed,
    Escalating,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    pub channel: DeliveryChannel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Telegram,
    WhatsApp,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhatsAppConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub api_base: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    pub path: PathBuf,
    pub format: AuditFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditFormat {
    Jsonl,
    Text,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NEWS_SUMMARIZE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.apply_env_fallbacks();
        config.normalize_regions();
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults plus secrets from the conventional environment variables.
    pub fn from_env_defaults() -> Result<Self> {
        dotenv().ok();
        let mut config = Self::default_config();
        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            telegram: TelegramConfig {
                bot_token: None,
                api_base: "https://api.telegram.org".to_string(),
                poll_timeout_secs: 100,
                retry_delay_secs: 1,
                default_chat_id: None,
                allowed_chat_ids: vec![],
            },
            search: SearchConfig {
                api_key: None,
                endpoint: "https://api.search.brave.com/res/v1/news/search".to_string(),
                result_count: 3,
                country: "all".to_string(),
                search_lang: "en".to_string(),
                spellcheck: true,
                extra_snippets: true,
                min_interval_ms: 1000,
                parallel_queries: 1,
            },
            llm: LlmConfig {
                api_key: None,
                endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                model: "llama-3.1-70b-versatile".to_string(),
                max_tokens: 8000,
                temperature: 0.2,
                style: SummaryStyle::Grouped,
            },
            freshness: FreshnessConfig {
                mode: FreshnessModeKind::Escalating,
                window: FreshnessWindow::Day,
            },
            delivery: DeliveryConfig {
                channel: DeliveryChannel::Telegram,
            },
            whatsapp: None,
            audit: AuditConfig {
                path: PathBuf::from("results.jsonl"),
                format: AuditFormat::Jsonl,
            },
            regions: default_regions(),
        }
    }

    /// Fill secrets left empty by the config file from the variable names the bot has always used.
    fn apply_env_fallbacks(&mut self) {
        fill_from_env(&mut self.telegram.bot_token, "TELEGRAM_BOT_TOKEN");
        fill_from_env(&mut self.telegram.default_chat_id, "TELEGRAM_CHAT_ID");
        fill_from_env(&mut self.search.api_key, "BRAVE_API_KEY");
        fill_from_env(&mut self.llm.api_key, "GROQ_API_KEY");

        if let Some(whatsapp) = self.whatsapp.as_mut() {
            fill_from_env(&mut whatsapp.account_sid, "TWILIO_ACCOUNT_SID");
            fill_from_env(&mut whatsapp.auth_token, "TWILIO_AUTH_TOKEN");
        }
    }

    fn normalize_regions(&mut self) {
        self.regions = std::mem::take(&mut self.regions)
            .into_iter()
            .map(|(name, countries)| (name.trim().to_lowercase(), countries))
            .collect();
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.result_count == 0 || self.search.result_count > 20 {
            return Err(PipelineError::Config(
                "search.result_count must be between 1 and 20".to_string(),
            ));
        }

        if self.search.parallel_queries == 0 {
            return Err(PipelineError::Config(
                "search.parallel_queries must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(PipelineError::Config(
                "llm.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.telegram.poll_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "telegram.poll_timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (region, countries) in &self.regions {
            if countries.is_empty() {
                return Err(PipelineError::Config(format!(
                    "region '{}' has no countries",
                    region
                )));
            }
        }

        Validator::validate_url(&self.search.endpoint)?;
        Validator::validate_url(&self.llm.endpoint)?;
        Validator::validate_url(&self.telegram.api_base)?;
        Validator::validate_audit_path(&self.audit.path)?;

        if let Some(chat_id) = &self.telegram.default_chat_id {
            Validator::validate_chat_id(chat_id)?;
        }

        if self.delivery.channel == DeliveryChannel::WhatsApp {
            let whatsapp = self.whatsapp.as_ref().ok_or_else(|| {
                PipelineError::Config(
                    "delivery.channel is whatsapp but no [whatsapp] section is configured"
                        .to_string(),
                )
            })?;
            Validator::validate_url(&whatsapp.api_base)?;
            Validator::validate_phone_address(&whatsapp.from)?;
            Validator::validate_phone_address(&whatsapp.to)?;
        }

        Ok(())
    }

    /// Secrets needed by the long-poll bot. Only checked when the bot starts,
    /// so the `regions` command works without credentials.
    pub fn require_credentials(&self) -> Result<()> {
        Validator::require_secret(self.telegram.bot_token.as_deref(), "telegram.bot_token")?;
        Validator::require_secret(self.search.api_key.as_deref(), "search.api_key")?;
        Validator::require_secret(self.llm.api_key.as_deref(), "llm.api_key")?;

        if self.delivery.channel == DeliveryChannel::WhatsApp {
            if let Some(whatsapp) = &self.whatsapp {
                Validator::require_secret(whatsapp.account_sid.as_deref(), "whatsapp.account_sid")?;
                Validator::require_secret(whatsapp.auth_token.as_deref(), "whatsapp.auth_token")?;
            }
        }

        Ok(())
    }
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    let missing = slot.as_deref().map(str::trim).is_none_or(str::is_empty);
    if missing {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                *slot = Some(value);
            }
        }
    }
}

fn default_regions() -> BTreeMap<String, Vec<String>> {
    let middle_east = [
        "Saudi Arabia",
        "United Arab Emirates",
        "Israel",
        "Iran",
        "Iraq",
        "Jordan",
        "Lebanon",
        "Syria",
        "Turkey",
        "Yemen",
        "Oman",
        "Kuwait",
        "Bahrain",
        "Qatar",
    ];
    let europe = [
        "Germany",
        "France",
        "United Kingdom",
        "Italy",
        "Spain",
        "Poland",
        "Netherlands",
        "Sweden",
        "Norway",
        "Switzerland",
        "Belgium",
        "Austria",
        "Denmark",
        "Finland",
        "Ireland",
    ];

    let mut regions = BTreeMap::new();
    regions.insert(
        "middle east".to_string(),
        middle_east.iter().map(|c| c.to_string()).collect(),
    );
    regions.insert(
        "europe".to_string(),
        europe.iter().map(|c| c.to_string()).collect(),
    );
    regions
}
