/// Format classifier
///
/// Assigns exactly one `FormatLabel` to a text by walking an ordered rule table.
/// The first rule that matches wins, so the order of `RULES` is part of the
/// observable behaviour: `1,2\n3,4` is CSV even though it is also mostly numbers.

use serde::Serialize;
use std::fmt;

use crate::config::ClassifierSettings;
use crate::core::patterns::{extract_emails, extract_numbers, extract_urls};

/// The detected kind of a text blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FormatLabel {
    Json,
    Csv,
    Numbers,
    Urls,
    Emails,
    TextList,
    PlainText,
}

impl FormatLabel {
    /// All labels, in classification priority order
    pub const ALL: [FormatLabel; 7] = [
        FormatLabel::Json,
        FormatLabel::Csv,
        FormatLabel::Numbers,
        FormatLabel::Urls,
        FormatLabel::Emails,
        FormatLabel::TextList,
        FormatLabel::PlainText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatLabel::Json => "json",
            FormatLabel::Csv => "csv",
            FormatLabel::Numbers => "numbers",
            FormatLabel::Urls => "urls",
            FormatLabel::Emails => "emails",
            FormatLabel::TextList => "text_list",
            FormatLabel::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for FormatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification predicate over trimmed text
type Rule = fn(&str, &ClassifierSettings) -> bool;

/// Rules in priority order. Anything left over is plain text.
const RULES: &[(FormatLabel, Rule)] = &[
    (FormatLabel::Json, looks_like_json),
    (FormatLabel::Csv, looks_like_csv),
    (FormatLabel::Numbers, looks_like_numbers),
    (FormatLabel::Urls, looks_like_urls),
    (FormatLabel::Emails, looks_like_emails),
    (FormatLabel::TextList, looks_like_text_list),
];

/// Classify text with the default thresholds
pub fn classify(text: &str) -> FormatLabel {
    classify_with(text, &ClassifierSettings::default())
}

/// Classify text using the given thresholds
///
/// # Arguments
///
/// * `text` - Raw text; surrounding whitespace is ignored
/// * `settings` - Thresholds for the count and density rules
///
/// # Returns
///
/// The label of the first matching rule, or `PlainText`
pub fn classify_with(text: &str, settings: &ClassifierSettings) -> FormatLabel {
    let text = text.trim();

    RULES
        .iter()
        .find(|(_, rule)| rule(text, settings))
        .map(|(label, _)| *label)
        .unwrap_or(FormatLabel::PlainText)
}

/// Bracketed on both ends and strictly valid JSON
fn looks_like_json(text: &str, _settings: &ClassifierSettings) -> bool {
    let bracketed = (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'));

    bracketed && serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// The first (up to) three non-empty lines share the first line's comma count
fn looks_like_csv(text: &str, _settings: &ClassifierSettings) -> bool {
    if !text.contains('\n') || !text.contains(',') {
        return false;
    }

    let mut lines = text.split('\n');
    let expected = lines.next().map(|line| line.matches(',').count()).unwrap_or(0);
    if expected == 0 {
        return false;
    }

    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .take(3)
        .all(|line| line.matches(',').count() == expected)
}

/// Many numeric tokens that together cover most of the text
fn looks_like_numbers(text: &str, settings: &ClassifierSettings) -> bool {
    let numbers = extract_numbers(text);
    if numbers.len() <= settings.min_numbers {
        return false;
    }

    // Length of the tokens joined by single spaces
    let joined_len = numbers.iter().map(|n| n.chars().count()).sum::<usize>() + numbers.len() - 1;
    let total_len = text.chars().count();

    total_len > 0 && joined_len as f64 / total_len as f64 > settings.numeric_density_threshold
}

fn looks_like_urls(text: &str, settings: &ClassifierSettings) -> bool {
    extract_urls(text).len() > settings.min_urls
}

fn looks_like_emails(text: &str, settings: &ClassifierSettings) -> bool {
    extract_emails(text).len() > settings.min_emails
}

/// Several short non-empty lines
fn looks_like_text_list(text: &str, settings: &ClassifierSettings) -> bool {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines.len() > settings.min_list_lines
        && lines
            .iter()
            .all(|line| line.chars().count() < settings.max_list_line_chars)
}
