// file: src/utils/validation.rs
// description: configuration and input validation helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Telegram chat ids are signed integers (groups are negative) or `@channelname`.
    pub fn validate_chat_id(chat_id: &str) -> Result<()> {
        let chat_id = chat_id.trim();

        if let Some(name) = chat_id.strip_prefix('@') {
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Ok(());
            }
        } else if chat_id.parse::<i64>().is_ok() {
            return Ok(());
        }

        Err(PipelineError::Validation(format!(
            "Invalid Telegram chat id: {}",
            chat_id
        )))
    }

    /// Twilio WhatsApp addresses look like `whatsapp:+14155238886`.
    pub fn validate_phone_address(address: &str) -> Result<()> {
        let number = address
            .strip_prefix("whatsapp:")
            .and_then(|rest| rest.strip_prefix('+'))
            .ok_or_else(|| {
                PipelineError::Validation(format!(
                    "WhatsApp address must look like whatsapp:+<digits>: {}",
                    address
                ))
            })?;

        if number.len() < 7 || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(PipelineError::Validation(format!(
                "Invalid WhatsApp phone number: {}",
                address
            )));
        }

        Ok(())
    }

    pub fn require_secret(value: Option<&str>, name: &str) -> Result<()> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(PipelineError::Config(format!("{} is required", name))),
        }
    }

    pub fn validate_audit_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(PipelineError::Validation(
                "Audit log path is empty".to_string(),
            ));
        }

        if path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Audit log path is a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Truncate on a char boundary so multi-byte text never panics.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_chat_id() {
        assert!(Validator::validate_chat_id("123456789").is_ok());
        assert!(Validator::validate_chat_id("-1001234567890").is_ok());
        assert!(Validator::validate_chat_id("@news_channel").is_ok());
        assert!(Validator::validate_chat_id("@").is_err());
        assert!(Validator::validate_chat_id("not a chat").is_err());
    }

    #[test]
    fn test_validate_phone_address() {
        assert!(Validator::validate_phone_address("whatsapp:+14155238886").is_ok());
        assert!(Validator::validate_phone_address("+14155238886").is_err());
        assert!(Validator::validate_phone_address("whatsapp:+1415abc").is_err());
        assert!(Validator::validate_phone_address("whatsapp:+12").is_err());
    }

    #[test]
    fn test_require_secret() {
        assert!(Validator::require_secret(Some("key"), "search.api_key").is_ok());
        assert!(Validator::require_secret(Some("   "), "search.api_key").is_err());
        assert!(Validator::require_secret(None, "search.api_key").is_err());
    }

    #[test]
    fn test_validate_audit_path() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_audit_path(&temp.path().join("results.jsonl")).is_ok());
        assert!(Validator::validate_audit_path(temp.path()).is_err());
        assert!(Validator::validate_audit_path(Path::new("")).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("héllo wörld", 4), "héll...");
    }
}
