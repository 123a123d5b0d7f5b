/// clip_insight - classify clipboard text and report on it
///
/// This library detects what kind of data a text blob holds (JSON, CSV, numbers,
/// URLs, emails, a list or plain text), transforms or summarizes it through a
/// per-format handler, and computes readability and vocabulary statistics.

// Re-export core modules
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::Settings;
pub use crate::core::classifier::{classify, FormatLabel};
pub use crate::core::error::ProcessingError;
pub use crate::core::handlers::{Operation, Summary};
pub use crate::core::patterns::{extract_emails, extract_numbers, extract_urls};
pub use crate::core::pipeline::{run, Pipeline, ProcessingResult};
pub use crate::core::text_analyzer::{analyze_text, AnalysisReport, TextAnalyzer};
pub use crate::core::tools::{Tool, ToolOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line application functionality
///
/// These functions implement the driver contract: empty input yields an
/// `{"error": ...}` object instead of a result, everything else is passed to
/// the engine and serialized.
pub mod app {
    use anyhow::Result;
    use log::info;
    use serde_json::{json, Value};

    use crate::config::Settings;
    use crate::core::classifier::{classify_with, FormatLabel};
    use crate::core::pipeline::Pipeline;
    use crate::core::text_analyzer::TextAnalyzer;
    use crate::core::tools::{Tool, ToolOutput};

    pub const NO_DATA: &str = "No data provided";
    pub const NO_TEXT: &str = "No text provided";

    fn error_value(message: &str) -> Value {
        json!({ "error": message })
    }

    /// Run the processing pipeline over the input
    ///
    /// # Arguments
    ///
    /// * `text` - Input text
    /// * `operation` - Operation name
    /// * `format` - Skip detection and treat the text as this format
    /// * `settings` - Effective settings
    ///
    /// # Returns
    ///
    /// The serialized envelope, or an error object for empty input
    pub fn process_input(
        text: &str,
        operation: &str,
        format: Option<FormatLabel>,
        settings: &Settings,
    ) -> Result<Value> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(error_value(NO_DATA));
        }

        let pipeline = Pipeline::new(settings.clone());
        let result = match format {
            Some(format) => {
                info!("Processing input as {}", format);
                pipeline.run_as(text, format, operation)
            }
            None => pipeline.run(text, operation),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Run the text analyzer over the input
    pub fn analyze_input(text: &str, settings: &Settings) -> Result<Value> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(error_value(NO_TEXT));
        }

        let report = TextAnalyzer::new(settings.analytics.clone()).analyze(text);
        Ok(serde_json::to_value(report)?)
    }

    /// Report only the detected format
    pub fn classify_input(text: &str, settings: &Settings) -> Value {
        let text = text.trim();
        if text.is_empty() {
            return error_value(NO_DATA);
        }

        json!({ "format": classify_with(text, &settings.classifier) })
    }

    /// Run a quick tool over the input
    pub fn run_tool(tool: Tool, text: &str) -> Result<ToolOutput> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(ToolOutput::Report(error_value(NO_TEXT)));
        }

        Ok(tool.run(text)?)
    }
}
