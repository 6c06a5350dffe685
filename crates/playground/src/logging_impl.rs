//! Logging infrastructure for Playground
//!
//! Log records are emitted through `tracing` when the `logging` feature is on.
//! This module decides what may appear in them: command lines are escaped so a
//! crafted input cannot forge extra log lines, long values are truncated, and file
//! contents stay out of the logs unless explicitly allowed.
//!
//! # Log Levels
//!
//! - **INFO**: session lifecycle (load, reset), mission substep and level completion
//! - **DEBUG**: one record per dispatched command, accepted-but-unknown compiler flags
//! - **TRACE**: tokenizer output

use std::borrow::Cow;

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to include file contents in logs (default: false)
    pub log_file_contents: bool,

    /// Maximum length of logged values before truncation (default: 200)
    pub max_value_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file_contents: false,
            max_value_length: 200,
        }
    }
}

impl LogConfig {
    /// Create a new log configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow file contents (echo payloads, cat output) in log records.
    pub fn log_file_contents(mut self) -> Self {
        self.log_file_contents = true;
        self
    }

    /// Set maximum length for logged values
    pub fn max_value_length(mut self, len: usize) -> Self {
        self.max_value_length = len;
        self
    }

    /// Truncate value if it exceeds max length
    ///
    /// Cuts on a char boundary so multi-byte input never panics.
    pub fn truncate<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if value.len() <= self.max_value_length {
            Cow::Borrowed(value)
        } else {
            let mut end = self.max_value_length;
            while end > 0 && !value.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!(
                "{}...[truncated {} bytes]",
                &value[..end],
                value.len() - end
            ))
        }
    }
}

/// Escape characters that could be used for log injection.
pub fn sanitize_for_log(input: &str) -> String {
    input
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}

/// Format a command line for logging.
///
/// Only the command word is always shown; the arguments of `echo` carry file
/// contents and are summarised unless `log_file_contents` is set.
pub fn format_input_for_log(input: &str, config: &LogConfig) -> String {
    let sanitized = sanitize_for_log(input);
    let is_echo = sanitized.split_whitespace().next() == Some("echo");
    if is_echo && !config.log_file_contents {
        return format!("echo [{} bytes]", input.len());
    }
    config.truncate(&sanitized).into_owned()
}
