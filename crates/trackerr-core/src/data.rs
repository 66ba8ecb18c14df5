//! Collected per-node data handed to formatters.
//!
//! Rendering an error chain flattens it into a slice of [`ErrorData`], one
//! entry per node. Index 0 is the most recently added context and the last
//! index is the original cause.

use indexmap::IndexMap;

use crate::tracking::TrackingData;

/// Named arguments attached to one chain node, in insertion order.
pub type Args = IndexMap<String, String>;

/// A read-only view of one error chain node.
#[derive(Debug, Clone, Copy)]
pub struct ErrorData<'a> {
    tracking: &'a TrackingData,
    message: &'a str,
    args: &'a Args,
}

impl<'a> ErrorData<'a> {
    /// Create a view over one node's fields.
    pub fn new(tracking: &'a TrackingData, message: &'a str, args: &'a Args) -> Self {
        Self {
            tracking,
            message,
            args,
        }
    }

    /// The node's tracking point.
    pub fn tracking(&self) -> &'a TrackingData {
        self.tracking
    }

    /// The node's rendered message, empty if none was set.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The node's own arguments.
    pub fn args(&self) -> &'a Args {
        self.args
    }

    /// Returns `true` if the tracking point can be displayed.
    pub fn has_valid_tracking(&self) -> bool {
        self.tracking.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackingError;

    #[test]
    fn test_has_valid_tracking() {
        let args = Args::new();
        let valid = TrackingData::at("src/lib.rs", 1);
        let invalid = TrackingData::unavailable(TrackingError::Disabled);

        assert!(ErrorData::new(&valid, "", &args).has_valid_tracking());
        assert!(!ErrorData::new(&invalid, "", &args).has_valid_tracking());
    }

    #[test]
    fn test_accessors() {
        let mut args = Args::new();
        args.insert("id".to_string(), "7".to_string());
        let tracking = TrackingData::at("src/lib.rs", 3);

        let data = ErrorData::new(&tracking, "not found", &args);

        assert_eq!(data.message(), "not found");
        assert_eq!(data.args().get("id").map(String::as_str), Some("7"));
        assert_eq!(data.tracking().line(), 3);
    }
}
