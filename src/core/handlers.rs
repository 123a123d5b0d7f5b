/// Per-format handlers
///
/// Each `FormatLabel` has one handler. A handler understands `analyze`, a few
/// format-specific transforms, and falls back to returning the parsed data
/// unchanged for any operation it does not know.

use std::collections::HashMap;
use std::fmt;
use std::io;

use log::debug;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::HandlerSettings;
use crate::core::classifier::FormatLabel;
use crate::core::error::ProcessingError;
use crate::core::patterns::{email_domain, extract_emails, extract_numbers, extract_urls, url_domain};

/// A requested operation, parsed from its name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Operation {
    #[default]
    Analyze,
    Prettify,
    Minify,
    ToJson,
    Sum,
    Sort,
    /// Any other name; handlers answer it with their passthrough data
    Other(String),
}

impl Operation {
    pub fn parse(name: &str) -> Self {
        match name {
            "analyze" => Operation::Analyze,
            "prettify" => Operation::Prettify,
            "minify" => Operation::Minify,
            "to_json" => Operation::ToJson,
            "sum" => Operation::Sum,
            "sort" => Operation::Sort,
            other => Operation::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operation::Analyze => "analyze",
            Operation::Prettify => "prettify",
            Operation::Minify => "minify",
            Operation::ToJson => "to_json",
            Operation::Sum => "sum",
            Operation::Sort => "sort",
            Operation::Other(name) => name,
        }
    }
}

impl From<&str> for Operation {
    fn from(name: &str) -> Self {
        Operation::parse(name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a handler produced: a summary for `analyze`, data for everything else
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    Summary(Summary),
    Processed(Value),
}

/// Statistics describing a classified text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Json(JsonSummary),
    Csv(CsvSummary),
    Numbers(NumberSummary),
    Urls(UrlSummary),
    Emails(EmailSummary),
    TextList(TextListSummary),
    PlainText(PlainTextSummary),
    /// Domain-level problem with the input, e.g. an empty CSV
    Failed(SoftError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoftError {
    pub error: String,
}

impl SoftError {
    fn summary(message: &str) -> HandlerOutput {
        HandlerOutput::Summary(Summary::Failed(SoftError {
            error: message.to_string(),
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeCounts {
    pub objects: usize,
    pub arrays: usize,
    pub strings: usize,
    pub numbers: usize,
    pub booleans: usize,
    pub nulls: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.objects + self.arrays + self.strings + self.numbers + self.booleans + self.nulls
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSummary {
    /// Type of the top-level value
    #[serde(rename = "type")]
    pub value_type: String,
    /// Length of the compact serialization
    pub size: usize,
    pub type_counts: TypeCounts,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvSummary {
    pub rows: usize,
    pub columns: usize,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlSummary {
    pub total_urls: usize,
    pub unique_domains: usize,
    /// `(domain, count)` pairs, most frequent first
    pub top_domains: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailSummary {
    pub total_emails: usize,
    pub unique_emails: usize,
    pub unique_domains: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextListSummary {
    pub total_items: usize,
    pub unique_items: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainTextSummary {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

/// Handles one format
pub trait FormatHandler {
    /// The format this handler is responsible for
    fn label(&self) -> FormatLabel;

    /// Run an operation over the text
    ///
    /// # Arguments
    ///
    /// * `text` - The text that was classified as this handler's format
    /// * `operation` - Requested operation; unknown ones return passthrough data
    ///
    /// # Returns
    ///
    /// A summary for `analyze`, processed data otherwise
    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError>;
}

/// Get the handler responsible for a format
pub fn handler_for(label: FormatLabel, settings: &HandlerSettings) -> Box<dyn FormatHandler> {
    match label {
        FormatLabel::Json => Box::new(JsonHandler),
        FormatLabel::Csv => Box::new(CsvHandler),
        FormatLabel::Numbers => Box::new(NumbersHandler),
        FormatLabel::Urls => Box::new(UrlsHandler {
            top_domains: settings.top_domains,
        }),
        FormatLabel::Emails => Box::new(EmailsHandler),
        FormatLabel::TextList => Box::new(TextListHandler),
        FormatLabel::PlainText => Box::new(PlainTextHandler),
    }
}

pub struct JsonHandler;

impl FormatHandler for JsonHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::Json
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let data: Value = serde_json::from_str(text)?;

        let output = match operation {
            Operation::Analyze => HandlerOutput::Summary(Summary::Json(analyze_json(&data)?)),
            Operation::Prettify => HandlerOutput::Processed(Value::String(prettify_json(&data)?)),
            Operation::Minify => HandlerOutput::Processed(Value::String(serde_json::to_string(&data)?)),
            _ => HandlerOutput::Processed(data),
        };

        Ok(output)
    }
}

/// Count every value in a JSON document by type
pub fn count_json_types(value: &Value, counts: &mut TypeCounts) {
    match value {
        Value::Object(map) => {
            counts.objects += 1;
            for child in map.values() {
                count_json_types(child, counts);
            }
        }
        Value::Array(items) => {
            counts.arrays += 1;
            for child in items {
                count_json_types(child, counts);
            }
        }
        Value::String(_) => counts.strings += 1,
        Value::Number(_) => counts.numbers += 1,
        Value::Bool(_) => counts.booleans += 1,
        Value::Null => counts.nulls += 1,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

fn analyze_json(data: &Value) -> Result<JsonSummary, ProcessingError> {
    let mut type_counts = TypeCounts::default();
    count_json_types(data, &mut type_counts);

    Ok(JsonSummary {
        value_type: json_type_name(data).to_string(),
        size: spaced_json_len(data)?,
        total_items: type_counts.total(),
        type_counts,
    })
}

/// Single-line JSON with `", "` and `": "` separators and every non-ASCII
/// character escaped as `\uXXXX`
struct SpacedAsciiFormatter;

impl serde_json::ser::Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Length of the document in its spaced, ASCII-only serialization
pub fn spaced_json_len(data: &Value) -> Result<usize, ProcessingError> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedAsciiFormatter);
    data.serialize(&mut serializer)?;
    Ok(out.len())
}

/// Rebuild a value with every object's keys in sorted order
pub fn sort_json_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_json_keys(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_json_keys).collect()),
        other => other.clone(),
    }
}

/// Sorted-key, 2-space indented serialization
pub fn prettify_json(data: &Value) -> Result<String, ProcessingError> {
    Ok(serde_json::to_string_pretty(&sort_json_keys(data))?)
}

pub struct CsvHandler;

impl FormatHandler for CsvHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::Csv
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let rows = parse_csv(text)?;
        debug!("Parsed {} CSV rows", rows.len());

        let output = match operation {
            Operation::Analyze => match rows.first() {
                None => SoftError::summary("Empty CSV"),
                Some(headers) => HandlerOutput::Summary(Summary::Csv(CsvSummary {
                    rows: rows.len(),
                    columns: headers.len(),
                    headers: headers.clone(),
                })),
            },
            Operation::ToJson => HandlerOutput::Processed(csv_to_json(&rows)),
            _ => HandlerOutput::Processed(json!(rows)),
        };

        Ok(output)
    }
}

/// Read all CSV rows; rows may have different lengths
///
/// Every empty line becomes an empty row, so `a,b\n\n1,2` has three rows.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, ProcessingError> {
    let bytes = text.as_bytes();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        // The reader skips empty lines silently, so count them from where it starts
        let start = reader.position().byte() as usize;
        let more = reader.read_record(&mut record)?;

        for _ in 0..blank_lines_at(bytes, start) {
            rows.push(Vec::new());
        }
        if !more {
            break;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Number of empty lines beginning at byte offset `start`
fn blank_lines_at(bytes: &[u8], start: usize) -> usize {
    let mut rest = bytes.get(start..).unwrap_or(&[]);

    // Second half of a `\r\n` terminator
    if start > 0 && bytes.get(start - 1) == Some(&b'\r') && rest.first() == Some(&b'\n') {
        rest = &rest[1..];
    }

    rest.iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count()
}

/// Turn CSV rows into keyed records using the first row as keys
///
/// Short rows simply lack the missing keys. Cells beyond the header get
/// synthetic `column_N` keys (1-based).
pub fn csv_to_json(rows: &[Vec<String>]) -> Value {
    let (headers, data_rows) = match rows.split_first() {
        Some(split) => split,
        None => return Value::Array(Vec::new()),
    };

    let records = data_rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            for (i, cell) in row.iter().enumerate() {
                let key = match headers.get(i) {
                    Some(header) => header.clone(),
                    None => format!("column_{}", i + 1),
                };
                record.insert(key, Value::String(cell.clone()));
            }
            Value::Object(record)
        })
        .collect();

    Value::Array(records)
}

pub struct NumbersHandler;

impl FormatHandler for NumbersHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::Numbers
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let numbers = parse_numbers(text)?;

        let output = match operation {
            Operation::Analyze => match summarize_numbers(&numbers) {
                Some(summary) => HandlerOutput::Summary(Summary::Numbers(summary)),
                None => SoftError::summary("No numbers found"),
            },
            Operation::Sum => {
                let sum: f64 = numbers.iter().sum();
                HandlerOutput::Processed(Value::String(format!("Sum: {}", format_float(sum))))
            }
            _ => HandlerOutput::Processed(json!(numbers)),
        };

        Ok(output)
    }
}

/// Extract and parse every number in the text
pub fn parse_numbers(text: &str) -> Result<Vec<f64>, ProcessingError> {
    extract_numbers(text)
        .into_iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ProcessingError::InvalidNumber {
                value: token.to_string(),
            })
        })
        .collect()
}

fn summarize_numbers(numbers: &[f64]) -> Option<NumberSummary> {
    if numbers.is_empty() {
        return None;
    }

    let sum: f64 = numbers.iter().sum();
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(NumberSummary {
        count: numbers.len(),
        min,
        max,
        sum,
        average: sum / numbers.len() as f64,
    })
}

/// Format a float the way a human expects to read it back
///
/// Integral values keep a `.0`; very large or very small magnitudes switch to
/// exponent form with a signed, two-digit exponent (`1e+16`, `2.5e-05`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exp) => format!(
                    "{}e{}{:02}",
                    mantissa,
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                ),
                Err(_) => formatted,
            },
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub struct UrlsHandler {
    pub top_domains: usize,
}

impl FormatHandler for UrlsHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::Urls
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let urls = extract_urls(text);

        let output = match operation {
            Operation::Analyze => {
                let domains = count_in_order(urls.iter().copied().filter_map(url_domain));
                HandlerOutput::Summary(Summary::Urls(UrlSummary {
                    total_urls: urls.len(),
                    unique_domains: domains.len(),
                    top_domains: top_counts(domains, self.top_domains),
                }))
            }
            _ => HandlerOutput::Processed(json!(urls)),
        };

        Ok(output)
    }
}

/// Count occurrences, keeping first-seen order
pub fn count_in_order<'a, I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for item in items {
        match index.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item.to_string(), 1));
            }
        }
    }

    counts
}

/// The `limit` highest counts; ties keep their first-seen order
pub fn top_counts(mut counts: Vec<(String, usize)>, limit: usize) -> Vec<(String, usize)> {
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

pub struct EmailsHandler;

impl FormatHandler for EmailsHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::Emails
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let emails = extract_emails(text);

        let output = match operation {
            Operation::Analyze => {
                let unique_emails = count_in_order(emails.iter().copied()).len();
                let unique_domains = count_in_order(emails.iter().copied().map(email_domain)).len();
                HandlerOutput::Summary(Summary::Emails(EmailSummary {
                    total_emails: emails.len(),
                    unique_emails,
                    unique_domains,
                }))
            }
            _ => HandlerOutput::Processed(json!(emails)),
        };

        Ok(output)
    }
}

pub struct TextListHandler;

impl FormatHandler for TextListHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::TextList
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let lines = list_items(text);

        let output = match operation {
            Operation::Analyze => {
                let unique_items = count_in_order(lines.iter().copied()).len();
                HandlerOutput::Summary(Summary::TextList(TextListSummary {
                    total_items: lines.len(),
                    unique_items,
                    duplicates: lines.len() - unique_items,
                }))
            }
            Operation::Sort => {
                let mut sorted = lines.clone();
                sorted.sort_unstable();
                HandlerOutput::Processed(Value::String(sorted.join("\n")))
            }
            _ => HandlerOutput::Processed(json!(lines)),
        };

        Ok(output)
    }
}

/// Trimmed, non-empty lines
pub fn list_items(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub struct PlainTextHandler;

impl FormatHandler for PlainTextHandler {
    fn label(&self) -> FormatLabel {
        FormatLabel::PlainText
    }

    fn handle(&self, text: &str, operation: &Operation) -> Result<HandlerOutput, ProcessingError> {
        let output = match operation {
            Operation::Analyze => HandlerOutput::Summary(Summary::PlainText(PlainTextSummary {
                characters: text.chars().count(),
                words: text.split_whitespace().count(),
                lines: text.split('\n').count(),
            })),
            _ => HandlerOutput::Processed(Value::String(text.to_string())),
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(label: FormatLabel, text: &str, operation: &str) -> HandlerOutput {
        handler_for(label, &HandlerSettings::default())
            .handle(text, &Operation::parse(operation))
            .unwrap()
    }

    fn summary(label: FormatLabel, text: &str) -> Summary {
        match run(label, text, "analyze") {
            HandlerOutput::Summary(summary) => summary,
            other => panic!("expected a summary, got {:?}", other),
        }
    }

    fn processed(label: FormatLabel, text: &str, operation: &str) -> Value {
        match run(label, text, operation) {
            HandlerOutput::Processed(value) => value,
            other => panic!("expected processed data, got {:?}", other),
        }
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::parse("to_json"), Operation::ToJson);
        assert_eq!(Operation::parse("shout"), Operation::Other("shout".to_string()));
        assert_eq!(Operation::parse("shout").as_str(), "shout");
        assert_eq!(Operation::default(), Operation::Analyze);
    }

    #[test]
    fn test_handler_labels_match() {
        for label in FormatLabel::ALL {
            assert_eq!(handler_for(label, &HandlerSettings::default()).label(), label);
        }
    }

    #[test]
    fn test_json_analyze_counts_types() {
        let text = r#"{"name": "x", "tags": ["a", "b"], "ok": true, "n": 1.5, "none": null}"#;
        let Summary::Json(s) = summary(FormatLabel::Json, text) else {
            panic!("expected a JSON summary");
        };
        assert_eq!(s.value_type, "object");
        assert_eq!(s.type_counts.objects, 1);
        assert_eq!(s.type_counts.arrays, 1);
        assert_eq!(s.type_counts.strings, 3);
        assert_eq!(s.type_counts.numbers, 1);
        assert_eq!(s.type_counts.booleans, 1);
        assert_eq!(s.type_counts.nulls, 1);
        assert_eq!(s.total_items, 8);
        // The input already uses the spaced separators
        assert_eq!(s.size, text.len());
    }

    #[test]
    fn test_json_size_uses_spaced_ascii_form() {
        let size = |text: &str| spaced_json_len(&serde_json::from_str(text).unwrap()).unwrap();

        // {"a": 1, "b": [1, 2]}
        assert_eq!(size(r#"{"a":1,"b":[1,2]}"#), 21);
        // {"k": "\u00e9"}
        assert_eq!(size(r#"{"k":"é"}"#), 15);
        // Astral characters take a surrogate pair
        assert_eq!(size(r#"["😀"]"#), 16);
        assert_eq!(size("{}"), 2);
        assert_eq!(size("[]"), 2);
    }

    #[test]
    fn test_json_prettify_sorts_keys() {
        let pretty = processed(FormatLabel::Json, r#"{"b": 1, "a": {"d": 2, "c": 3}}"#, "prettify");
        assert_eq!(
            pretty,
            Value::String("{\n  \"a\": {\n    \"c\": 3,\n    \"d\": 2\n  },\n  \"b\": 1\n}".to_string())
        );
    }

    #[test]
    fn test_json_minify_keeps_order() {
        let minified = processed(FormatLabel::Json, "{ \"b\" : 1,\n \"a\" : [1, 2] }", "minify");
        assert_eq!(minified, Value::String(r#"{"b":1,"a":[1,2]}"#.to_string()));
    }

    #[test]
    fn test_json_minify_then_prettify_is_canonical() {
        let first = r#"{"z": [1, {"y": 2, "x": 1}], "a": "s"}"#;
        let second = r#"{"a": "s", "z": [1, {"x": 1, "y": 2}]}"#;

        let canonical = |text: &str| {
            let Value::String(minified) = processed(FormatLabel::Json, text, "minify") else {
                panic!("minify returns a string");
            };
            processed(FormatLabel::Json, &minified, "prettify")
        };
        assert_eq!(canonical(first), canonical(second));
    }

    #[test]
    fn test_json_passthrough_and_invalid() {
        assert_eq!(processed(FormatLabel::Json, "[1,2]", "whatever"), json!([1, 2]));

        let err = JsonHandler.handle("{broken", &Operation::Analyze).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidJson(_)));
    }

    #[test]
    fn test_csv_analyze() {
        let Summary::Csv(s) = summary(FormatLabel::Csv, "name,age\nann,30\nbob,41") else {
            panic!("expected a CSV summary");
        };
        assert_eq!(s.rows, 3);
        assert_eq!(s.columns, 2);
        assert_eq!(s.headers, vec!["name", "age"]);
    }

    #[test]
    fn test_csv_blank_lines_are_empty_rows() {
        let text = "a,b\n1,2\n\n3,4";
        let Summary::Csv(s) = summary(FormatLabel::Csv, text) else {
            panic!("expected a CSV summary");
        };
        assert_eq!(s.rows, 4);
        assert_eq!(s.columns, 2);

        assert_eq!(
            processed(FormatLabel::Csv, text, "raw"),
            json!([["a", "b"], ["1", "2"], [], ["3", "4"]])
        );
        assert_eq!(
            processed(FormatLabel::Csv, text, "to_json"),
            json!([{"a": "1", "b": "2"}, {}, {"a": "3", "b": "4"}])
        );
    }

    #[test]
    fn test_parse_csv_blank_line_positions() {
        let rows = |text: &str| -> Vec<Vec<String>> { parse_csv(text).unwrap() };
        let row = |cells: &[&str]| -> Vec<String> { cells.iter().map(|c| c.to_string()).collect() };
        let blank: Vec<String> = Vec::new();

        assert_eq!(
            rows("a,b\n\n\n1,2"),
            vec![row(&["a", "b"]), blank.clone(), blank.clone(), row(&["1", "2"])]
        );
        assert_eq!(rows("a,b\n"), vec![row(&["a", "b"])]);
        assert_eq!(rows("a,b\n\n"), vec![row(&["a", "b"]), blank.clone()]);
        assert_eq!(
            rows("a,b\r\n\r\n1,2"),
            vec![row(&["a", "b"]), blank.clone(), row(&["1", "2"])]
        );
        // A whitespace-only line is a one-cell row
        assert_eq!(
            rows("a,b\n \n1,2"),
            vec![row(&["a", "b"]), row(&[" "]), row(&["1", "2"])]
        );
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_csv_empty_is_soft_error() {
        assert_eq!(
            summary(FormatLabel::Csv, ""),
            Summary::Failed(SoftError {
                error: "Empty CSV".to_string()
            })
        );
    }

    #[test]
    fn test_csv_to_json_short_and_long_rows() {
        let rows: Vec<Vec<String>> = vec![
            vec!["a".into(), "b".into()],
            vec!["1".into(), "2".into()],
            vec!["3".into()],
            vec!["4".into(), "5".into(), "6".into()],
        ];
        assert_eq!(
            csv_to_json(&rows),
            json!([{"a": "1", "b": "2"}, {"a": "3"}, {"a": "4", "b": "5", "column_3": "6"}])
        );
        assert_eq!(csv_to_json(&[]), json!([]));
    }

    #[test]
    fn test_csv_quoted_cells_and_passthrough() {
        let rows = processed(FormatLabel::Csv, "a,b\n\"x, y\",2", "raw");
        assert_eq!(rows, json!([["a", "b"], ["x, y", "2"]]));
    }

    #[test]
    fn test_numbers_analyze() {
        let Summary::Numbers(s) = summary(FormatLabel::Numbers, "1 2 3 4 5") else {
            panic!("expected a numbers summary");
        };
        assert_eq!(s.count, 5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.sum, 15.0);
        assert_eq!(s.average, 3.0);
    }

    #[test]
    fn test_numbers_sum_and_passthrough() {
        assert_eq!(processed(FormatLabel::Numbers, "1 2 3 4 5", "sum"), json!("Sum: 15.0"));
        assert_eq!(processed(FormatLabel::Numbers, "1.5 -2", "sum"), json!("Sum: -0.5"));
        assert_eq!(processed(FormatLabel::Numbers, "1 -2.5", "list"), json!([1.0, -2.5]));
    }

    #[test]
    fn test_numbers_none_found_is_soft_error() {
        assert_eq!(
            summary(FormatLabel::Numbers, "no digits here"),
            Summary::Failed(SoftError {
                error: "No numbers found".to_string()
            })
        );
    }

    #[test]
    fn test_urls_top_domains() {
        let text = "https://b.io/1 http://a.io https://b.io/2 https://c.io https://a.io/x https://d.io";
        let Summary::Urls(s) = summary(FormatLabel::Urls, text) else {
            panic!("expected a URL summary");
        };
        assert_eq!(s.total_urls, 6);
        assert_eq!(s.unique_domains, 4);
        assert_eq!(
            s.top_domains,
            vec![
                ("b.io".to_string(), 2),
                ("a.io".to_string(), 2),
                ("c.io".to_string(), 1),
                ("d.io".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_urls_top_domains_limit() {
        let handler = UrlsHandler { top_domains: 1 };
        let text = "https://a.io https://b.io https://b.io";
        let HandlerOutput::Summary(Summary::Urls(s)) = handler.handle(text, &Operation::Analyze).unwrap() else {
            panic!("expected a URL summary");
        };
        assert_eq!(s.top_domains, vec![("b.io".to_string(), 2)]);
    }

    #[test]
    fn test_emails_analyze() {
        let text = "ann@a.org bob@b.org ann@a.org carl@a.org";
        let Summary::Emails(s) = summary(FormatLabel::Emails, text) else {
            panic!("expected an email summary");
        };
        assert_eq!(s.total_emails, 4);
        assert_eq!(s.unique_emails, 3);
        assert_eq!(s.unique_domains, 2);
    }

    #[test]
    fn test_text_list_analyze_and_sort() {
        let text = "pear\n apple \nfig\n\npear";
        let Summary::TextList(s) = summary(FormatLabel::TextList, text) else {
            panic!("expected a text list summary");
        };
        assert_eq!(s.total_items, 4);
        assert_eq!(s.unique_items, 3);
        assert_eq!(s.duplicates, 1);

        assert_eq!(processed(FormatLabel::TextList, text, "sort"), json!("apple\nfig\npear\npear"));
        assert_eq!(processed(FormatLabel::TextList, text, "x"), json!(["pear", "apple", "fig", "pear"]));
    }

    #[test]
    fn test_plain_text() {
        let Summary::PlainText(s) = summary(FormatLabel::PlainText, "Hello big\nworld") else {
            panic!("expected a plain text summary");
        };
        assert_eq!(s.characters, 15);
        assert_eq!(s.words, 3);
        assert_eq!(s.lines, 2);

        assert_eq!(processed(FormatLabel::PlainText, "as is", "anything"), json!("as is"));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(15.0), "15.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(-1.5e17), "-1.5e+17");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.000025), "2.5e-05");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_numbers_sum_large_values() {
        assert_eq!(
            processed(FormatLabel::Numbers, "5000000000000000 5000000000000000", "sum"),
            json!("Sum: 1e+16")
        );
    }
}
