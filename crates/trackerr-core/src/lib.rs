//! Trackerr Core Types and Definitions
//!
//! This crate provides the foundational types shared by every trackerr
//! error chain. It includes:
//!
//! - **Tracking points**: where an error was created or passed through
//!   ([`tracking::TrackingData`])
//! - **Collected data**: the read-only view of one chain node handed to
//!   formatters ([`data::ErrorData`])
//! - **Formatting**: the [`format::Formatter`] interface that renders a
//!   collected chain into a single string

pub mod data;
pub mod format;
pub mod tracking;

pub use data::{Args, ErrorData};
pub use format::Formatter;
pub use tracking::{TrackingData, TrackingError, relativize};
