// file: src/llm/prompts.rs
// description: system instructions and payload serialization for news summaries

use crate::config::SummaryStyle;
use crate::models::SearchResult;

const BASE_GUIDELINES: &str = "\
You are a precise and efficient news summarizer. Given a list of news results, create a concise summary.

Guidelines:
- Focus on hard data, facts, and objective information.
- Maintain neutrality; avoid bias, opinions, or editorializing.
- Be concise and direct; omit unnecessary details or repetition.
- Do not include stock recommendations unless directly related to major news.
- Avoid generalized disclaimers or evasive language.
- Do not use double asterisks, single asterisks, or any other markdown emphasis.
- Every item must carry its date or age marker and the source URL.
- Do NOT include \"Here's a summary of the news\" or similar introductory phrases.";

const GROUPED_TEMPLATE: &str = "
Group the results by topic. For each topic fill in exactly this template, separated by a blank line:

Topic: <topic>
Date: <most recent date or age among the topic's results>
Summary: <two to four sentences covering the topic>
Link: <the most representative URL>";

pub fn system_prompt(style: SummaryStyle) -> String {
    match style {
        SummaryStyle::Digest => BASE_GUIDELINES.to_string(),
        SummaryStyle::Grouped => format!("{}\n{}", BASE_GUIDELINES, GROUPED_TEMPLATE),
    }
}

/// All records as one payload, in the order they were found.
pub fn build_payload(results: &[SearchResult]) -> String {
    let mut payload = String::from("Results:\n");
    for result in results {
        payload.push_str(&result.format_block());
        payload.push('\n');
    }
    payload
}
