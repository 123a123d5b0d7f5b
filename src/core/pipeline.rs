/// Processing pipeline
///
/// Classifies a text, hands it to the matching format handler and wraps the
/// outcome in a `ProcessingResult` envelope. This is the only place where hard
/// errors are caught: handlers propagate them with `?` and the pipeline turns
/// them into the envelope's `error` field.

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::core::classifier::{classify_with, FormatLabel};
use crate::core::handlers::{handler_for, HandlerOutput, Operation, Summary};

/// Uniform result of processing one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingResult {
    pub format: FormatLabel,
    pub operation: String,
    /// Input length in characters
    pub input_size: usize,
    pub processed_data: Option<Value>,
    pub summary: Option<Summary>,
    pub error: Option<String>,
}

impl ProcessingResult {
    fn new(format: FormatLabel, operation: &str, text: &str) -> Self {
        Self {
            format,
            operation: operation.to_string(),
            input_size: text.chars().count(),
            processed_data: None,
            summary: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Classify-and-dispatch pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Classify a text and run the requested operation on it
    ///
    /// # Arguments
    ///
    /// * `text` - The text to process
    /// * `operation` - Operation name, e.g. `analyze`, `prettify`, `sort`
    ///
    /// # Returns
    ///
    /// The result envelope; failures are reported inside it, never returned
    pub fn run(&self, text: &str, operation: &str) -> ProcessingResult {
        let format = classify_with(text, &self.settings.classifier);
        debug!("Detected format: {}", format);

        self.run_as(text, format, operation)
    }

    /// Run an operation treating the text as the given format, skipping detection
    pub fn run_as(&self, text: &str, format: FormatLabel, operation: &str) -> ProcessingResult {
        let mut result = ProcessingResult::new(format, operation, text);

        let handler = handler_for(format, &self.settings.handlers);
        match handler.handle(text, &Operation::parse(operation)) {
            Ok(HandlerOutput::Summary(summary)) => result.summary = Some(summary),
            Ok(HandlerOutput::Processed(data)) => result.processed_data = Some(data),
            Err(e) => {
                warn!("Processing {} text with '{}' failed: {}", format, operation, e);
                result.error = Some(e.to_string());
            }
        }

        result
    }
}

/// Process a text with the default settings
pub fn run(text: &str, operation: &str) -> ProcessingResult {
    Pipeline::default().run(text, operation)
}
