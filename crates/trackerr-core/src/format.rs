//! The formatter interface.
//!
//! A [`Formatter`] turns a collected chain into one display string. The
//! slice is ordered outermost first: index 0 is the most recently added
//! context and the last entry is the original cause.
//!
//! Closures with the matching signature are formatters too:
//!
//! ```
//! # use trackerr_core::{ErrorData, Formatter};
//! let count = |errors: &[ErrorData<'_>]| format!("{} hops", errors.len());
//!
//! assert_eq!(count.format(&[]), "0 hops");
//! ```

use crate::data::ErrorData;

/// Renders a collected error chain.
///
/// Implementations must be pure: the same input always yields the same
/// string. Formatters are shared between threads and between every node
/// they were bound to.
pub trait Formatter: Send + Sync {
    /// Render the chain, outermost entry first.
    fn format(&self, errors: &[ErrorData<'_>]) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&[ErrorData<'_>]) -> String + Send + Sync,
{
    fn format(&self, errors: &[ErrorData<'_>]) -> String {
        self(errors)
    }
}
