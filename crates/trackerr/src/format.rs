//! Built-in formatters.
//!
//! - [`StackFormatter`]: one line per chain node with its location, message
//!   and arguments. The default.
//! - [`LogLineFormatter`]: a single line with the root cause message and the
//!   arguments of the whole chain, for log records.
//!
//! Any [`Formatter`](trackerr_core::Formatter) implementation, including a
//! closure, can be used in their place.

mod log_line;
mod stack;

pub use log_line::LogLineFormatter;
pub use stack::{DEFAULT_SEPARATOR, StackFormatter, UNKNOWN_LOCATION};

#[cfg(feature = "miette")]
pub(crate) use log_line::merge_args;

use std::fmt::Display;

/// Join `name=value` pairs with `", "`.
pub(crate) fn join_args<K, V>(args: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Display,
    V: Display,
{
    args.into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
