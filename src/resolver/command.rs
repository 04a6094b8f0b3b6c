// file: src/resolver/command.rs
// description: parses inbound chat text into help or topic commands
// reference: https://core.telegram.org/bots/features#commands

use crate::models::FreshnessWindow;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HELP_COMMAND: Regex = Regex::new(
        r"(?i)^/(help|start)(@[A-Za-z0-9_]+)?$"
    ).expect("HELP_COMMAND regex is valid");

    static ref PERIOD_SUFFIX: Regex = Regex::new(
        r"(?is)^(?P<topic>.*?)\s*/(?P<period>day|week|month|year|all)\s*$"
    ).expect("PERIOD_SUFFIX regex is valid");
}

pub const HELP_TEXT: &str = "\
Send me a topic and I will reply with a short summary of the latest news about it.

Examples:
  artificial intelligence
  middle east            (expands to every country in the region)
  quantum computing/week (only search the past week)

Period suffixes: /day, /week, /month, /year, /all
Without a suffix I start with the past day and widen the search until something turns up.

/help shows this message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Topic {
        topic: String,
        freshness: Option<FreshnessWindow>,
    },
}

pub fn parse_command(text: &str) -> Command {
    let text = text.trim();

    if HELP_COMMAND.is_match(text) {
        return Command::Help;
    }

    if let Some(caps) = PERIOD_SUFFIX.captures(text) {
        let freshness = caps["period"].parse::<FreshnessWindow>().ok();
        if freshness.is_some() {
            return Command::Topic {
                topic: caps["topic"].trim().to_string(),
                freshness,
            };
        }
    }

    Command::Topic {
        topic: text.to_string(),
        freshness: None,
    }
}
