//! Single-line log summary formatter.

use indexmap::IndexMap;
use trackerr_core::{ErrorData, Formatter};

use super::join_args;

/// Renders the root cause message followed by the arguments of the chain.
///
/// Output looks like `connection refused: user=42, attempt=3`. Arguments
/// from every node are merged, and when two nodes set the same name the node
/// nearer the root cause wins. Messages of wrapping nodes are not shown: the
/// line reads as what ultimately failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogLineFormatter;

impl Formatter for LogLineFormatter {
    fn format(&self, errors: &[ErrorData<'_>]) -> String {
        let Some(root) = errors.last() else {
            return String::new();
        };

        let args = merge_args(errors);
        if args.is_empty() {
            root.message().to_owned()
        } else {
            format!("{}: {}", root.message(), join_args(args))
        }
    }
}

/// Merge the arguments of every entry, later entries overriding earlier ones.
///
/// A name keeps the position where it first appeared.
pub(crate) fn merge_args<'a>(errors: &[ErrorData<'a>]) -> IndexMap<&'a str, &'a str> {
    let mut merged = IndexMap::new();
    for data in errors {
        for (name, value) in data.args() {
            merged.insert(name.as_str(), value.as_str());
        }
    }
    merged
}
