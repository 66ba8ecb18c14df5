//! Trackerr - error chains that remember where they have been.
//!
//! Every time an error is created or wrapped, trackerr records the caller's
//! location together with an optional message and named arguments. When the
//! error is finally displayed, the whole chain is rendered by a pluggable
//! [`Formatter`].
//!
//! # Examples
//!
//! ```
//! use trackerr::{Error, LogLineFormatter};
//!
//! fn read_profile(user: u32) -> Result<String, Error> {
//!     let io = std::io::Error::new(std::io::ErrorKind::NotFound, "profile missing");
//!     Err(trackerr::wrap(io).arg("user", user))
//! }
//!
//! fn handle() -> Result<String, Error> {
//!     read_profile(42).map_err(|err| trackerr::wrap(err).msg("handling request"))
//! }
//!
//! let err = handle().unwrap_err();
//!
//! // One line per hop: file:line, message and arguments.
//! assert_eq!(err.chain().count(), 2);
//!
//! // Or a single line for logs: root cause plus every argument.
//! assert_eq!(
//!     err.with_formatter(LogLineFormatter).to_string(),
//!     "profile missing: user=42"
//! );
//! ```
//!
//! Messages with format arguments are easiest through [`error!`]:
//!
//! ```
//! let err = trackerr::error!("test {} {}", "arg", 1);
//! assert_eq!(err.message(), "test arg 1");
//! ```
//!
//! # Formatters and factories
//!
//! Each node is bound to a formatter when it is built. The free functions
//! ([`new`], [`wrap`]) use a process-wide default [`Factory`] that can be
//! reconfigured with [`set_formatter`] or [`configure`]. Code that needs a
//! different rendering without touching shared state creates its own
//! [`Factory`], or rebinds an existing chain with [`Error::with_formatter`].

pub mod config;

mod error;
mod factory;
mod format;

#[cfg(feature = "miette")]
mod diagnostic;

pub use trackerr_core::{
    Args, ErrorData, Formatter, TrackingData, TrackingError, relativize,
};

pub use config::{Config, ConfigError};
pub use error::{Chain, Error};
pub use factory::{
    Factory, configure, default_formatter, new, set_formatter, set_shared_formatter, wrap,
    wrap_boxed,
};
pub use format::{DEFAULT_SEPARATOR, LogLineFormatter, StackFormatter, UNKNOWN_LOCATION};

/// Create an error with a formatted message using the default factory.
///
/// Accepts the same arguments as [`format!`]. The tracking point is the
/// macro's call site.
///
/// ```
/// let path = "/etc/app.toml";
/// let err = trackerr::error!("cannot open {path}").arg("attempt", 2);
///
/// assert_eq!(err.message(), "cannot open /etc/app.toml");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::new(::std::format!($($arg)+))
    };
}
