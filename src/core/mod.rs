/// Core module for text classification and analysis
///
/// This module contains the pattern extractors, the format classifier, the
/// per-format handlers, the processing pipeline, the text analyzer and the
/// quick tools.

pub mod classifier;
pub mod error;
pub mod handlers;
pub mod patterns;
pub mod pipeline;
pub mod text_analyzer;
pub mod tools;
