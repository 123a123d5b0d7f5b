/// Pattern definitions for the text engine
///
/// This module contains the regex patterns used to pull numbers, URLs and email
/// addresses out of raw text, along with the fixed word tables consulted by the
/// text analyzer (stop words, language markers, code and markdown indicators).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Signed, optionally decimal numbers. No exponents, no thousands separators.
    pub static ref NUMBER_RE: Regex = Regex::new(r"-?[0-9]+\.?[0-9]*").unwrap();

    /// `http://` or `https://` up to the next whitespace
    pub static ref URL_RE: Regex = Regex::new(r"https?://[^\s]+").unwrap();

    /// Host part of a URL (everything between the scheme and the first slash)
    pub static ref URL_DOMAIN_RE: Regex = Regex::new(r"https?://([^/]+)").unwrap();

    pub static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();

    /// Word tokens used by the text analyzer
    pub static ref WORD_RE: Regex = Regex::new(r"\b\w+\b").unwrap();

    /// Runs of sentence-ending punctuation
    pub static ref SENTENCE_END_RE: Regex = Regex::new(r"[.!?]+").unwrap();

    pub static ref WEB_MARKER_RE: Regex = Regex::new(r"https?://|www\.").unwrap();

    /// A line starting with `<digits>.`
    pub static ref NUMBERED_ITEM_RE: Regex = Regex::new(r"^\d+\.").unwrap();
}

/// Words ignored when ranking the most frequent words of a text
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them",
];

pub const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "that", "have", "for", "not", "with", "you", "this", "but", "his", "from",
    "they",
];

pub const SPANISH_MARKERS: &[&str] = &[
    "que", "de", "no", "en", "un", "ser", "se", "te", "todo", "le", "da", "su", "por",
];

// Repeated entries are intentional: each one adds to the score.
pub const FRENCH_MARKERS: &[&str] = &[
    "le", "de", "et", "que", "il", "être", "et", "en", "avoir", "que", "pour", "dans", "ce",
];

/// Substrings that mark a text as source code
pub const CODE_INDICATORS: &[&str] = &[
    "def ",
    "function ",
    "class ",
    "import ",
    "#include",
    "console.log",
    "print(",
    "<?php",
    "<html",
    "SELECT ",
    "FROM ",
];

pub const MARKDOWN_INDICATORS: &[&str] = &["# ", "## ", "- [", "```", "**", "__"];

pub const BULLET_MARKERS: &[&str] = &["- ", "* ", "• "];

/// Extract every signed decimal number in order of appearance
///
/// # Arguments
///
/// * `text` - Text to scan
///
/// # Returns
///
/// The matched substrings, decimal points preserved
pub fn extract_numbers(text: &str) -> Vec<&str> {
    NUMBER_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Extract every `http(s)://` URL in order of appearance
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Extract every email address in order of appearance
pub fn extract_emails(text: &str) -> Vec<&str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Get the host part of a URL, if it has one
pub fn url_domain(url: &str) -> Option<&str> {
    URL_DOMAIN_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Get the domain part of an email address (everything after the first `@`)
pub fn email_domain(email: &str) -> &str {
    email.split('@').nth(1).unwrap_or("")
}

/// Keep the first occurrence of every item, preserving order
pub fn unique_in_order<'a, I>(items: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
