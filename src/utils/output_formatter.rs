/// Output formatter for results
///
/// This module renders pipeline envelopes, analysis reports and tool output as
/// pretty JSON, compact JSON or a colored console view, optionally wrapped in a
/// markdown code fence.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// 2-space indented JSON
    #[default]
    Json,
    /// Single-line JSON
    Compact,
    /// Human-readable console view
    Text,
}

/// Render a JSON result in the requested format
///
/// # Arguments
///
/// * `value` - The result to render
/// * `format` - Output format
/// * `use_markdown` - Whether to wrap the output in triple backticks
///
/// # Returns
///
/// The rendered string, without a trailing newline
pub fn render_value(value: &Value, format: OutputFormat, use_markdown: bool) -> Result<String> {
    let body = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize result")?
        }
        OutputFormat::Compact => serde_json::to_string(value).context("Failed to serialize result")?,
        OutputFormat::Text => format_console(value),
    };

    Ok(wrap_markdown(body, use_markdown))
}

/// Render plain text output (e.g. a sorted list) as is
pub fn render_text(text: &str, use_markdown: bool) -> String {
    wrap_markdown(text.to_string(), use_markdown)
}

fn wrap_markdown(body: String, use_markdown: bool) -> String {
    if use_markdown {
        format!("```\n{}\n```", body)
    } else {
        body
    }
}

/// Format a result for the console
///
/// Top-level objects become titled sections, scalars become `Title: value`
/// lines and arrays become bulleted lists.
pub fn format_console(value: &Value) -> String {
    let mut output = String::new();

    match value {
        Value::Object(map) => {
            // Scalars first so the headline facts (format, error, ...) lead
            for (key, child) in map.iter().filter(|(_, v)| !is_nested(v)) {
                output.push_str(&format!("{}: {}\n", title_case(key).green(), scalar_text(child)));
            }

            for (key, child) in map.iter().filter(|(_, v)| is_nested(v)) {
                output.push_str(&format!("\n{}\n", title_case(key).yellow().bold()));
                format_nested(child, 1, &mut output);
            }
        }
        other => format_nested(other, 0, &mut output),
    }

    if output.is_empty() {
        output.push_str("No results.\n");
    }

    output.trim_end().to_string()
}

fn format_nested(value: &Value, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_nested(child) {
                    output.push_str(&format!("{}{}:\n", indent, title_case(key).cyan().bold()));
                    format_nested(child, depth + 1, output);
                } else {
                    output.push_str(&format!(
                        "{}{}: {}\n",
                        indent,
                        title_case(key).cyan(),
                        scalar_text(child)
                    ));
                }
            }
        }
        Value::Array(items) if items.is_empty() => {
            output.push_str(&format!("{}(none)\n", indent));
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    // Pairs such as ("example.com", 3) read better inline
                    Value::Array(pair) if pair.iter().all(|v| !is_nested(v)) => {
                        let parts: Vec<String> = pair.iter().map(scalar_text).collect();
                        output.push_str(&format!("{}- {}\n", indent, parts.join(": ")));
                    }
                    nested if is_nested(nested) => {
                        output.push_str(&format!("{}-\n", indent));
                        format_nested(nested, depth + 1, output);
                    }
                    scalar => output.push_str(&format!("{}- {}\n", indent, scalar_text(scalar))),
                }
            }
        }
        scalar => output.push_str(&format!("{}{}\n", indent, scalar_text(scalar))),
    }
}

fn is_nested(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Turn a snake_case key into a title, e.g. `basic_stats` -> `Basic Stats`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
