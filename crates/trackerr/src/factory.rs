//! Error factories and the process-wide default factory.
//!
//! A [`Factory`] holds the formatter new errors are bound to and the
//! tracking settings used to capture their locations. Binding happens when a
//! node is built: changing a factory's formatter later never affects errors
//! it already produced.
//!
//! Most code uses the free functions ([`new`], [`wrap`]) which go through a
//! shared default factory. That factory is ordinary process-wide state:
//! [`set_formatter`] and [`configure`] replace it for every later caller, and
//! concurrent reconfiguration has no ordering beyond last write wins. Code
//! that needs its own rendering without affecting anyone else should hold a
//! separate [`Factory`].
//!
//! # Example
//!
//! ```
//! use trackerr::{Factory, LogLineFormatter, StackFormatter};
//!
//! let logs = Factory::with_formatter(LogLineFormatter);
//! let reports = Factory::with_formatter(StackFormatter::new().with_separator(" <- "));
//!
//! let for_logs = logs.new_error("disk full").arg("free", 0);
//! let for_reports = reports.wrap(reports.new_error("disk full"));
//!
//! assert_eq!(for_logs.to_string(), "disk full: free=0");
//! assert!(for_reports.to_string().contains(" <- "));
//! ```

use std::{
    error::Error as StdError,
    panic::Location,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

use log::debug;

use trackerr_core::{Formatter, TrackingData, TrackingError};

use crate::{
    config::{Config, TrackingConfig},
    error::Error,
    format::StackFormatter,
};

static DEFAULT_FACTORY: LazyLock<RwLock<Factory>> = LazyLock::new(|| RwLock::new(Factory::new()));

/// Builds error nodes bound to one formatter.
///
/// Every constructing method is `#[track_caller]`: the tracking point
/// records the code that called the factory, not the factory itself.
#[derive(Clone)]
pub struct Factory {
    formatter: Arc<dyn Formatter>,
    tracking: TrackingConfig,
}

impl Factory {
    /// Create a factory bound to a default [`StackFormatter`].
    pub fn new() -> Self {
        Self::with_formatter(StackFormatter::default())
    }

    /// Create a factory bound to `formatter`.
    pub fn with_formatter(formatter: impl Formatter + 'static) -> Self {
        Self {
            formatter: Arc::new(formatter),
            tracking: TrackingConfig::default(),
        }
    }

    /// Create a factory from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            formatter: config.formatter(),
            tracking: config.tracking(),
        }
    }

    /// Replace the formatter used for errors built from now on.
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Arc::new(formatter);
    }

    /// Replace the formatter with one that may already be shared.
    pub fn set_shared_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.formatter = formatter;
    }

    /// Replace the tracking settings used for errors built from now on.
    pub fn set_tracking(&mut self, tracking: TrackingConfig) {
        self.tracking = tracking;
    }

    /// The formatter new errors are bound to.
    pub fn formatter(&self) -> &Arc<dyn Formatter> {
        &self.formatter
    }

    /// The tracking settings.
    pub fn tracking(&self) -> TrackingConfig {
        self.tracking
    }

    /// Create a new root error with `message`.
    #[track_caller]
    pub fn new_error(&self, message: impl Into<String>) -> Error {
        Error::root(self.track(), Arc::clone(&self.formatter), message.into())
    }

    /// Wrap `err`, adding a tracking point for the caller.
    ///
    /// An [`Error`] becomes the inner node of the result. Any other error is
    /// turned into a leaf carrying its display string.
    #[track_caller]
    pub fn wrap<E>(&self, err: E) -> Error
    where
        E: StdError + Send + Sync + 'static,
    {
        self.wrap_boxed(Box::new(err))
    }

    /// Wrap an already boxed error.
    ///
    /// A boxed [`Error`] is unboxed and linked, not wrapped as foreign.
    #[track_caller]
    pub fn wrap_boxed(&self, err: Box<dyn StdError + Send + Sync>) -> Error {
        Error::wrapping(self.track(), Arc::clone(&self.formatter), err)
    }

    #[track_caller]
    fn track(&self) -> TrackingData {
        if self.tracking.capture() {
            TrackingData::capture(Location::caller(), self.tracking.relative_paths())
        } else {
            TrackingData::unavailable(TrackingError::Disabled)
        }
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new error with the default factory.
///
/// ```
/// let err = trackerr::new("not found").arg("id", 7);
/// assert_eq!(err.message(), "not found");
/// ```
#[track_caller]
pub fn new(message: impl Into<String>) -> Error {
    default_factory().new_error(message)
}

/// Wrap an error with the default factory.
///
/// Returning `trackerr::wrap(err)` instead of `err` records the current
/// location in the chain.
#[track_caller]
pub fn wrap<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    default_factory().wrap(err)
}

/// Wrap a boxed error with the default factory.
#[track_caller]
pub fn wrap_boxed(err: Box<dyn StdError + Send + Sync>) -> Error {
    default_factory().wrap_boxed(err)
}

/// Replace the default factory's formatter for every later error.
///
/// Errors that already exist keep the formatter they were built with.
pub fn set_formatter(formatter: impl Formatter + 'static) {
    set_shared_formatter(Arc::new(formatter));
}

/// Replace the default factory's formatter with a shared one.
pub fn set_shared_formatter(formatter: Arc<dyn Formatter>) {
    let mut factory = DEFAULT_FACTORY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    factory.set_shared_formatter(formatter);
    debug!("Default error formatter replaced");
}

/// Replace the default factory's formatter and tracking settings.
pub fn configure(config: &Config) {
    let mut factory = DEFAULT_FACTORY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *factory = Factory::from_config(config);
    debug!(
        style:? = config.format().style(),
        capture = config.tracking().capture();
        "Default error factory configured"
    );
}

/// The formatter the default factory currently binds.
pub fn default_formatter() -> Arc<dyn Formatter> {
    Arc::clone(default_factory().formatter())
}

/// A snapshot of the default factory.
///
/// The lock is released before the snapshot is used, so foreign `Display`
/// implementations run during wrapping can reconfigure the default freely.
fn default_factory() -> Factory {
    DEFAULT_FACTORY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
