/// Utility modules for clip_insight
///
/// This module contains helpers for reading input text and for rendering
/// results to the terminal.

pub mod input;
pub mod output_formatter;
