// file: src/gateway/mod.rs
// description: outbound message gateways and delivery channel selection
// reference: internal module structure

pub mod console;
pub mod telegram;
pub mod whatsapp;

pub use console::ConsoleGateway;
pub use telegram::{TelegramClient, Update};
pub use whatsapp::WhatsAppClient;

use crate::error::Result;

/// Sends a text body to a destination. Delivery is fire-and-forget.
#[allow(async_fn_in_trait)]
pub trait MessageGateway {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// The configured reply channel.
pub enum Delivery {
    Telegram(TelegramClient),
    WhatsApp(WhatsAppClient),
    Console(ConsoleGateway),
}

impl Delivery {
    pub fn name(&self) -> &'static str {
        match self {
            Delivery::Telegram(_) => "telegram",
            Delivery::WhatsApp(_) => "whatsapp",
            Delivery::Console(_) => "console",
        }
    }
}

impl MessageGateway for Delivery {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        match self {
            Delivery::Telegram(client) => client.send(chat_id, text).await,
            Delivery::WhatsApp(client) => client.send(chat_id, text).await,
            Delivery::Console(console) => console.send(chat_id, text).await,
        }
    }
}

/// Splits `text` into chunks of at most `max_chars` characters, preferring line breaks.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_chars {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(max_chars) {
                let piece: String = piece.iter().collect();
                if piece.chars().count() == max_chars {
                    chunks.push(piece);
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_message_is_single_chunk() {
        assert_eq!(split_message("hello", 4096), vec!["hello".to_string()]);
    }

    #[test]
    fn test_split_prefers_line_breaks() {
        let text = "aaaa\nbbbb\ncccc\n";
        assert_eq!(
            split_message(text, 10),
            vec!["aaaa\nbbbb\n".to_string(), "cccc\n".to_string()]
        );
    }

    #[test]
    fn test_split_hard_wraps_long_lines() {
        let text = "x".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_preserves_content() {
        let text: String = (0..200).map(|i| format!("line {} é\n", i)).collect();
        let chunks = split_message(&text, 97);
        assert!(chunks.iter().all(|c| c.chars().count() <= 97));
        assert_eq!(chunks.concat(), text);
    }
}
