//! The error chain node.
//!
//! An [`Error`] is one link in a chain. It owns its tracking point, an
//! optional message, its own named arguments, the formatter it was built
//! with, and at most one inner node: the error it wraps.
//!
//! Nodes are built through a consuming builder: [`Error::msg`] and
//! [`Error::arg`] take the node by value and hand it back, so a node can only
//! be changed by the code that is still holding it before it is returned.
//!
//! # Example
//!
//! ```
//! use trackerr::{Factory, LogLineFormatter};
//!
//! let factory = Factory::with_formatter(LogLineFormatter);
//!
//! let err = factory.new_error("connection refused");
//! let err = factory.wrap(err).msg("loading profile").arg("user", 42);
//!
//! assert_eq!(err.to_string(), "connection refused: user=42");
//! assert_eq!(err.chain().count(), 2);
//! ```

use std::{error::Error as StdError, fmt, sync::Arc};

use trackerr_core::{Args, ErrorData, Formatter, TrackingData};

use crate::format::StackFormatter;

/// An error that records where it was created and every place it was wrapped.
///
/// `Display` collects the chain and renders it with the formatter bound when
/// this node was built. [`source`](StdError::source) returns the inner node,
/// so standard chain walks and `downcast_ref` see through every layer.
#[derive(Clone)]
pub struct Error {
    tracking: TrackingData,
    formatter: Arc<dyn Formatter>,
    message: String,
    args: Args,
    inner: Option<Box<Error>>,
    foreign: Option<Arc<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Create a root node with a message.
    pub(crate) fn root(
        tracking: TrackingData,
        formatter: Arc<dyn Formatter>,
        message: String,
    ) -> Self {
        Self {
            tracking,
            formatter,
            message,
            args: Args::new(),
            inner: None,
            foreign: None,
        }
    }

    /// Create a node wrapping `err`.
    ///
    /// Another [`Error`] becomes the inner node. Any other error becomes a
    /// leaf whose message is the foreign error's display string.
    pub(crate) fn wrapping(
        tracking: TrackingData,
        formatter: Arc<dyn Formatter>,
        err: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        match err.downcast::<Error>() {
            Ok(inner) => Self {
                inner: Some(inner),
                ..Self::root(tracking, formatter, String::new())
            },
            Err(foreign) => {
                let message = foreign.to_string();
                Self {
                    foreign: Some(Arc::from(foreign)),
                    ..Self::root(tracking, formatter, message)
                }
            }
        }
    }

    /// Set the message of this node.
    ///
    /// Only this node changes. Inner nodes keep their own messages.
    ///
    /// ```
    /// # let err = trackerr::new("timeout");
    /// let err = trackerr::wrap(err).msg(format!("retry {} failed", 3));
    /// assert_eq!(err.message(), "retry 3 failed");
    /// ```
    pub fn msg(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set a named argument on this node.
    ///
    /// The value is rendered with `Display` right away. Setting the same name
    /// twice keeps the last value.
    pub fn arg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// The tracking point of this node.
    pub fn tracking(&self) -> &TrackingData {
        &self.tracking
    }

    /// The message of this node, empty if none was set.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The arguments of this node only.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// The formatter bound to this node.
    pub fn formatter(&self) -> &Arc<dyn Formatter> {
        &self.formatter
    }

    /// The wrapped node, if any.
    pub fn inner(&self) -> Option<&Error> {
        self.inner.as_deref()
    }

    /// Iterate over the chain, starting with this node.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost node of the chain.
    pub fn root_cause(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    /// Collect the chain into formatter input.
    ///
    /// The first entry is this node and the last entry is the original
    /// cause.
    pub fn collect(&self) -> Vec<ErrorData<'_>> {
        self.chain().map(Error::data).collect()
    }

    /// Render the chain with the bound formatter.
    ///
    /// Same as `to_string()`.
    pub fn render(&self) -> String {
        self.formatter.format(&self.collect())
    }

    /// Render the chain with another formatter, leaving the bindings alone.
    pub fn render_with(&self, formatter: &dyn Formatter) -> String {
        formatter.format(&self.collect())
    }

    /// Copy the chain with every node bound to `formatter`.
    ///
    /// The chain this is called on is not modified.
    pub fn with_formatter(&self, formatter: impl Formatter + 'static) -> Self {
        self.with_shared_formatter(Arc::new(formatter))
    }

    /// Copy the chain with every node bound to a shared `formatter`.
    pub fn with_shared_formatter(&self, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            tracking: self.tracking.clone(),
            formatter: Arc::clone(&formatter),
            message: self.message.clone(),
            args: self.args.clone(),
            inner: self
                .inner
                .as_ref()
                .map(|inner| Box::new(inner.with_shared_formatter(formatter))),
            foreign: self.foreign.clone(),
        }
    }

    fn data(&self) -> ErrorData<'_> {
        ErrorData::new(&self.tracking, &self.message, &self.args)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&StackFormatter::default()))
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match (&self.inner, &self.foreign) {
            (Some(inner), _) => Some(&**inner as &(dyn StdError + 'static)),
            (None, Some(foreign)) => Some(&**foreign as &(dyn StdError + 'static)),
            (None, None) => None,
        }
    }
}

/// Iterator over the nodes of a chain, outermost first.
///
/// Created by [`Error::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.inner();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{Factory, LogLineFormatter};

    fn stack_factory() -> Factory {
        Factory::with_formatter(StackFormatter::default())
    }

    fn log_line_factory() -> Factory {
        Factory::with_formatter(LogLineFormatter)
    }

    #[derive(Debug, PartialEq)]
    struct Sentinel;

    impl fmt::Display for Sentinel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sentinel")
        }
    }

    impl StdError for Sentinel {}

    #[test]
    fn test_new_error_has_no_inner() {
        let err = stack_factory().new_error("boom");

        assert_eq!(err.message(), "boom");
        assert!(err.args().is_empty());
        assert!(err.inner().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_wrap_error_links_inner() {
        let factory = stack_factory();
        let root = factory.new_error("root");
        let wrapped = factory.wrap(root);

        assert!(wrapped.message().is_empty());
        assert!(wrapped.args().is_empty());
        assert_eq!(wrapped.inner().map(Error::message), Some("root"));
    }

    #[test]
    fn test_wrap_foreign_becomes_leaf() {
        let foreign = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = stack_factory().wrap(foreign);

        assert_eq!(err.message(), "no such file");
        assert!(err.inner().is_none());
        assert_eq!(err.collect().len(), 1);
    }

    #[test]
    fn test_msg_and_arg_stay_local() {
        let factory = log_line_factory();
        let root = factory.new_error("root").arg("id", 1);
        let outer = factory.wrap(root).msg("outer").arg("name", "x");

        let inner = outer.inner().expect("wrapped node");
        assert_eq!(inner.message(), "root");
        assert_eq!(inner.args().len(), 1);
        assert_eq!(outer.args().len(), 1);
        assert_eq!(outer.args().get("name").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_arg_last_write_wins() {
        let err = log_line_factory()
            .new_error("failed")
            .arg("attempt", 1)
            .arg("attempt", 2);

        assert_eq!(err.args().len(), 1);
        assert_eq!(err.to_string(), "failed: attempt=2");
    }

    #[test]
    fn test_collect_orders_outermost_first() {
        let factory = stack_factory();
        let err = factory.new_error("first");
        let err = factory.wrap(err).msg("second");
        let err = factory.wrap(err).msg("third");

        let messages: Vec<&str> = err.collect().iter().map(ErrorData::message).collect();

        assert_eq!(messages, ["third", "second", "first"]);
        assert_eq!(err.root_cause().message(), "first");
    }

    #[test]
    fn test_render_is_deterministic() {
        let factory = stack_factory();
        let err = factory.wrap(factory.new_error("boom").arg("a", 1)).arg("b", 2);

        assert_eq!(err.to_string(), err.to_string());
        assert_eq!(err.render(), err.to_string());
    }

    #[test]
    fn test_with_formatter_leaves_source_untouched() {
        let factory = stack_factory();
        let err = factory.wrap(factory.new_error("boom")).msg("context");
        let before = err.to_string();

        let rebound = err.with_formatter(LogLineFormatter);

        assert_eq!(err.to_string(), before);
        assert_eq!(rebound.to_string(), "boom");
        assert!(
            rebound
                .chain()
                .all(|node| Arc::ptr_eq(node.formatter(), rebound.formatter()))
        );
        assert!(
            err.chain()
                .all(|node| !Arc::ptr_eq(node.formatter(), rebound.formatter()))
        );
    }

    #[test]
    fn test_render_with_does_not_rebind() {
        let err = stack_factory().new_error("boom").arg("k", "v");

        assert_eq!(err.render_with(&LogLineFormatter), "boom: k=v");
        assert!(err.to_string().contains(": params: k=v"));
    }

    #[test]
    fn test_source_walk_reaches_foreign_error() {
        let factory = stack_factory();
        let err = factory.wrap(Sentinel);
        let err = factory.wrap(err).msg("middle");
        let err = factory.wrap(err);

        let mut sources = 0;
        let mut current: &(dyn StdError + 'static) = &err;
        while let Some(next) = current.source() {
            sources += 1;
            current = next;
        }

        assert_eq!(sources, 3);
        assert_eq!(current.downcast_ref::<Sentinel>(), Some(&Sentinel));
    }

    #[test]
    fn test_source_walk_finds_wrapped_node() {
        let factory = stack_factory();
        let sentinel = factory.new_error("predefined");
        let err = factory.wrap(sentinel.clone());
        let err = factory.wrap(err).arg("arg", "yes");

        let found = err
            .chain()
            .any(|node| node.tracking() == sentinel.tracking() && node.message() == "predefined");

        assert!(found);
    }

    #[test]
    fn test_wrap_boxed_error_node_is_not_double_wrapped() {
        let factory = stack_factory();
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(factory.new_error("root"));

        let err = factory.wrap_boxed(boxed);

        assert_eq!(err.chain().count(), 2);
        assert_eq!(err.root_cause().message(), "root");
    }

    #[test]
    fn test_debug_uses_stack_rendering() {
        let err = log_line_factory().new_error("boom");

        let debug = format!("{err:?}");

        assert!(debug.starts_with(file!()));
        assert!(debug.ends_with(": boom"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Error>();
    }
}
