//! [`miette`] integration.
//!
//! With the `miette` feature enabled, [`Error`] implements
//! [`miette::Diagnostic`] so a tracked chain can be handed straight to a
//! miette report handler. The report body is the chain rendered with its
//! bound formatter; the arguments of the whole chain become the help text,
//! and the wrapped node is exposed as the diagnostic source.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use crate::{
    error::Error,
    format::{join_args, merge_args},
};

impl MietteDiagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("trackerr::tracked"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let errors = self.collect();
        let args = merge_args(&errors);
        if args.is_empty() {
            return None;
        }

        Some(Box::new(format!("params: {}", join_args(args))))
    }

    fn diagnostic_source(&self) -> Option<&dyn MietteDiagnostic> {
        self.inner().map(|inner| inner as &dyn MietteDiagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Factory, LogLineFormatter};

    #[test]
    fn test_code_is_fixed() {
        let err = Factory::new().new_error("boom");

        let code = err.code().map(|code| code.to_string());

        assert_eq!(code.as_deref(), Some("trackerr::tracked"));
    }

    #[test]
    fn test_help_lists_merged_args() {
        let factory = Factory::with_formatter(LogLineFormatter);
        let err = factory.new_error("boom").arg("id", 1);
        let err = factory.wrap(err).arg("user", "ana");

        let help = err.help().map(|help| help.to_string());

        assert_eq!(help.as_deref(), Some("params: user=ana, id=1"));
    }

    #[test]
    fn test_diagnostic_source_is_inner_node() {
        let factory = Factory::new();
        let err = factory.wrap(factory.new_error("root")).msg("outer");

        let source = err.diagnostic_source().expect("wrapped node");
        let inner = err.inner().expect("wrapped node");

        assert!(std::ptr::addr_eq(
            source as *const dyn MietteDiagnostic,
            inner as *const Error
        ));
        assert!(inner.diagnostic_source().is_none());
    }

    #[test]
    fn test_no_args_no_help() {
        let err = Factory::new().new_error("boom");

        assert!(err.help().is_none());
    }
}
