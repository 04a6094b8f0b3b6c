// file: src/models/freshness.rs
// description: freshness window recency filter for news searches
// reference: https://api-dashboard.search.brave.com/app/documentation/news-search/query

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recency filter applied to a search request, ordered narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessWindow {
    Day,
    Week,
    Month,
    Year,
    #[serde(rename = "all", alias = "all-time", alias = "alltime")]
    AllTime,
}

impl FreshnessWindow {
    /// Escalation order used when no fixed window is requested.
    pub const ESCALATION: [FreshnessWindow; 5] = [
        FreshnessWindow::Day,
        FreshnessWindow::Week,
        FreshnessWindow::Month,
        FreshnessWindow::Year,
        FreshnessWindow::AllTime,
    ];

    /// Brave `freshness` parameter value. `None` means the parameter is omitted.
    pub fn as_query_param(&self) -> Option<&'static str> {
        match self {
            FreshnessWindow::Day => Some("pd"),
            FreshnessWindow::Week => Some("pw"),
            FreshnessWindow::Month => Some("pm"),
            FreshnessWindow::Year => Some("py"),
            FreshnessWindow::AllTime => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FreshnessWindow::Day => "day",
            FreshnessWindow::Week => "week",
            FreshnessWindow::Month => "month",
            FreshnessWindow::Year => "year",
            FreshnessWindow::AllTime => "all",
        }
    }
}

impl fmt::Display for FreshnessWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FreshnessWindow {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(FreshnessWindow::Day),
            "week" => Ok(FreshnessWindow::Week),
            "month" => Ok(FreshnessWindow::Month),
            "year" => Ok(FreshnessWindow::Year),
            "all" | "all-time" | "alltime" => Ok(FreshnessWindow::AllTime),
            other => Err(PipelineError::Validation(format!(
                "Unknown freshness window: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_is_ordered() {
        let windows = FreshnessWindow::ESCALATION;
        assert!(windows.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(windows.first(), Some(&FreshnessWindow::Day));
        assert_eq!(windows.last(), Some(&FreshnessWindow::AllTime));
    }

    #[test]
    fn test_query_params() {
        assert_eq!(FreshnessWindow::Day.as_query_param(), Some("pd"));
        assert_eq!(FreshnessWindow::Year.as_query_param(), Some("py"));
        assert_eq!(FreshnessWindow::AllTime.as_query_param(), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("WEEK".parse::<FreshnessWindow>().unwrap(), FreshnessWindow::Week);
        assert_eq!("all".parse::<FreshnessWindow>().unwrap(), FreshnessWindow::AllTime);
        assert!("fortnight".parse::<FreshnessWindow>().is_err());
    }

    #[test]
    fn test_deserialize_alias() {
        let window: FreshnessWindow = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(window, FreshnessWindow::AllTime);
        let window: FreshnessWindow = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(window, FreshnessWindow::Month);
    }
}
