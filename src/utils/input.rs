/// Input handling utilities
///
/// This module reads the text to work on, either from a file or from standard
/// input, and normalizes it the same way for both sources.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

/// Read the input text and trim surrounding whitespace.
///
/// Invalid UTF-8 is replaced rather than rejected, since clipboard contents
/// are not always clean.
///
/// # Arguments
///
/// * `file_path` - Optional file to read; standard input is used when absent
///
/// # Returns
///
/// The trimmed text
pub fn read_input(file_path: Option<&Path>) -> Result<String> {
    let bytes = match file_path {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read standard input")?;
            buffer
        }
    };

    debug!("Read {} bytes of input", bytes.len());
    Ok(decode_input(&bytes))
}

/// Decode raw input bytes into trimmed text
pub fn decode_input(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("Input is not valid UTF-8 ({}), replacing invalid bytes", e);
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    text.trim().to_string()
}
