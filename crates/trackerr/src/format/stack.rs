//! Multi-line stack formatter.
//!
//! Renders one line per chain node, outermost first:
//!
//! ```text
//! src/handler.rs:40: params: user=42
//!     src/store.rs:88: loading profile
//!     src/store.rs:12: connection refused
//! ```

use trackerr_core::{ErrorData, Formatter};

use super::join_args;

/// Separator placed between lines by default.
pub const DEFAULT_SEPARATOR: &str = "\n\t";

/// Shown instead of `file:line` when a tracking point is invalid.
pub const UNKNOWN_LOCATION: &str = "(error getting file's line)";

/// Renders each chain node as `file:line: message: params: k=v, ...`.
///
/// The message and params parts are left out when empty. A node without
/// a valid tracking point, message, or arguments produces no line at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFormatter {
    separator: String,
    placeholder: String,
}

impl StackFormatter {
    /// Create a formatter with the default separator and placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string placed between lines.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the text shown for nodes without a valid tracking point.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// The string placed between lines.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The text shown for nodes without a valid tracking point.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn format_line(&self, data: &ErrorData<'_>) -> String {
        let has_location = data.has_valid_tracking();
        let has_message = !data.message().is_empty();
        let has_params = !data.args().is_empty();

        if !has_location && !has_message && !has_params {
            return String::new();
        }

        let mut terms = Vec::with_capacity(3);
        if has_location {
            let tracking = data.tracking();
            terms.push(format!("{}:{}", tracking.file(), tracking.line()));
        } else {
            terms.push(self.placeholder.clone());
        }
        if has_message {
            terms.push(data.message().to_owned());
        }
        if has_params {
            terms.push(format!("params: {}", join_args(data.args())));
        }

        terms.join(": ")
    }
}

impl Default for StackFormatter {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            placeholder: UNKNOWN_LOCATION.to_string(),
        }
    }
}

impl Formatter for StackFormatter {
    fn format(&self, errors: &[ErrorData<'_>]) -> String {
        errors
            .iter()
            .map(|data| self.format_line(data))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}
