/// Quick tools
///
/// Small single-purpose text utilities that skip classification entirely: word
/// counting, whitespace cleanup, JSON formatting, URL and email extraction, and
/// line sorting or de-duplication.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::core::error::ProcessingError;
use crate::core::handlers::{list_items, prettify_json};
use crate::core::patterns::{email_domain, extract_emails, extract_urls, unique_in_order};

lazy_static! {
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// The available quick tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tool {
    WordCount,
    Clean,
    FormatJson,
    ExtractUrls,
    ExtractEmails,
    SortLines,
    DedupeLines,
}

/// What a tool produced: plain text to paste back, or a JSON report
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Report(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlExtraction {
    pub urls: Vec<String>,
    pub count: usize,
    pub unique_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailExtraction {
    pub emails: Vec<String>,
    pub count: usize,
    pub unique_emails: Vec<String>,
    pub domains: Vec<String>,
}

impl Tool {
    /// Run the tool over a text
    ///
    /// # Arguments
    ///
    /// * `text` - Input text
    ///
    /// # Returns
    ///
    /// The tool's output, or an error when the input is unusable (invalid JSON)
    pub fn run(&self, text: &str) -> Result<ToolOutput, ProcessingError> {
        let output = match self {
            Tool::WordCount => ToolOutput::Report(serde_json::to_value(word_count(text))?),
            Tool::Clean => ToolOutput::Text(clean_text(text)),
            Tool::FormatJson => ToolOutput::Text(format_json(text)?),
            Tool::ExtractUrls => ToolOutput::Report(serde_json::to_value(url_extraction(text))?),
            Tool::ExtractEmails => {
                ToolOutput::Report(serde_json::to_value(email_extraction(text))?)
            }
            Tool::SortLines => ToolOutput::Text(sort_lines(text)),
            Tool::DedupeLines => ToolOutput::Text(dedupe_lines(text)),
        };

        Ok(output)
    }
}

pub fn word_count(text: &str) -> WordCount {
    WordCount {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|&c| c != ' ').count(),
        lines: text.split('\n').count(),
    }
}

/// Collapse every whitespace run, line breaks included, into one space
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text, " ").trim().to_string()
}

/// Validate JSON and re-serialize it with sorted keys and 2-space indentation
pub fn format_json(text: &str) -> Result<String, ProcessingError> {
    let data: Value = serde_json::from_str(text.trim())
        .map_err(|e| ProcessingError::InvalidInput(format!("Invalid JSON: {}", e)))?;
    prettify_json(&data)
}

pub fn url_extraction(text: &str) -> UrlExtraction {
    let urls = extract_urls(text);

    UrlExtraction {
        count: urls.len(),
        unique_urls: owned(unique_in_order(urls.iter().copied())),
        urls: owned(urls),
    }
}

pub fn email_extraction(text: &str) -> EmailExtraction {
    let emails = extract_emails(text);

    EmailExtraction {
        count: emails.len(),
        unique_emails: owned(unique_in_order(emails.iter().copied())),
        domains: owned(unique_in_order(emails.iter().copied().map(email_domain))),
        emails: owned(emails),
    }
}

pub fn sort_lines(text: &str) -> String {
    let mut lines = list_items(text);
    lines.sort_unstable();
    lines.join("\n")
}

/// Drop repeated lines, keeping the first occurrence of each
pub fn dedupe_lines(text: &str) -> String {
    unique_in_order(list_items(text)).join("\n")
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}
