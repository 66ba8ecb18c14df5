//! Tracking points for error chains.
//!
//! A [`TrackingData`] records the source location of one hop in an error
//! chain: the place the error was created, or a place it was wrapped on its
//! way up. Locations come from [`std::panic::Location`], normally obtained
//! through `#[track_caller]`, and file paths are optionally shortened
//! relative to the process working directory.
//!
//! Capture never fails loudly. Anything that goes wrong is recorded as a
//! [`TrackingError`] on the tracking point itself, and formatters decide how
//! to degrade.
//!
//! # Example
//!
//! ```
//! # use std::panic::Location;
//! # use trackerr_core::TrackingData;
//! let tracking = TrackingData::capture(Location::caller(), false);
//!
//! assert!(tracking.is_valid());
//! assert_eq!(tracking.file(), file!());
//! ```

use std::{
    env,
    panic::Location,
    path::{Component, Path, PathBuf},
};

use log::trace;
use thiserror::Error;

/// Why a tracking point is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// Location capture was turned off for the factory that built the node.
    #[error("location capture is disabled")]
    Disabled,

    /// The process working directory could not be determined.
    #[error("failed to read working directory: {0}")]
    WorkingDir(String),

    /// The file path cannot be expressed relative to the base directory.
    #[error("`{}` is not relative to `{}`", file.display(), base.display())]
    NotRelative { file: PathBuf, base: PathBuf },
}

/// The captured location of one node in an error chain.
///
/// When [`is_valid`](Self::is_valid) is `false` the file and line are not
/// meaningful and should not be displayed. A valid tracking point may still
/// carry an [`err`](Self::err) explaining why its path was left as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingData {
    pc: usize,
    file: String,
    line: u32,
    column: u32,
    is_valid: bool,
    err: Option<TrackingError>,
}

impl TrackingData {
    /// Capture a tracking point from a caller location.
    ///
    /// When `relative` is set, absolute file paths are rewritten relative to
    /// the current working directory. Failing that, the path is kept as is
    /// and the reason is stored in [`err`](Self::err).
    pub fn capture(location: &'static Location<'static>, relative: bool) -> Self {
        let mut tracking = Self {
            pc: std::ptr::from_ref(location) as usize,
            file: location.file().to_owned(),
            line: location.line(),
            column: location.column(),
            is_valid: true,
            err: None,
        };

        if relative {
            match relativize_to_cwd(Path::new(location.file())) {
                Ok(path) => tracking.file = path.to_string_lossy().into_owned(),
                Err(err) => {
                    trace!(file = location.file(), reason:% = err; "Keeping captured path for tracking point");
                    tracking.err = Some(err);
                }
            }
        }

        tracking
    }

    /// Create a tracking point with a fixed file and line.
    ///
    /// Useful for formatter tests and for errors rebuilt from external
    /// reports. The program counter is zero.
    pub fn at(file: impl Into<String>, line: u32) -> Self {
        Self {
            pc: 0,
            file: file.into(),
            line,
            column: 0,
            is_valid: true,
            err: None,
        }
    }

    /// Create an invalid tracking point carrying the reason capture failed.
    pub fn unavailable(reason: TrackingError) -> Self {
        Self {
            pc: 0,
            file: String::new(),
            line: 0,
            column: 0,
            is_valid: false,
            err: Some(reason),
        }
    }

    /// Opaque identifier of the capturing call site.
    ///
    /// Equal for two captures from the same call site, zero when unknown.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// File path of the call site.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number of the call site (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column number of the call site (1-based, zero when unknown).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns `true` if file and line can be displayed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The reason this tracking point is invalid or incomplete, if any.
    pub fn err(&self) -> Option<&TrackingError> {
        self.err.as_ref()
    }
}

/// Express `file` relative to the `base` directory.
///
/// Paths that are already relative are returned unchanged. Walking up out of
/// `base` produces `..` components, the same way `cd` would need them.
///
/// # Errors
///
/// Returns [`TrackingError::NotRelative`] if `base` is relative while `file`
/// is absolute, or if the two share no common root.
pub fn relativize(file: &Path, base: &Path) -> Result<PathBuf, TrackingError> {
    if file.is_relative() {
        return Ok(file.to_path_buf());
    }

    let not_relative = || TrackingError::NotRelative {
        file: file.to_path_buf(),
        base: base.to_path_buf(),
    };

    if base.is_relative() {
        return Err(not_relative());
    }

    let file_parts: Vec<Component<'_>> = file.components().collect();
    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|part| !matches!(part, Component::CurDir))
        .collect();

    let common = file_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return Err(not_relative());
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &file_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }

    Ok(relative)
}

fn relativize_to_cwd(file: &Path) -> Result<PathBuf, TrackingError> {
    if file.is_relative() {
        return Ok(file.to_path_buf());
    }

    let cwd = env::current_dir().map_err(|err| TrackingError::WorkingDir(err.to_string()))?;
    relativize(file, &cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_call_site() {
        let line = line!() + 1;
        let tracking = TrackingData::capture(Location::caller(), false);

        assert!(tracking.is_valid());
        assert!(tracking.err().is_none());
        assert_eq!(tracking.file(), file!());
        assert_eq!(tracking.line(), line);
        assert!(tracking.column() > 0);
        assert_ne!(tracking.pc(), 0);
    }

    #[test]
    fn test_capture_same_site_same_pc() {
        let capture = || TrackingData::capture(Location::caller(), false);

        assert_eq!(capture().pc(), capture().pc());
    }

    #[test]
    fn test_capture_relative_keeps_relative_path() {
        let tracking = TrackingData::capture(Location::caller(), true);

        assert!(tracking.is_valid());
        assert!(tracking.err().is_none());
        assert_eq!(tracking.file(), file!());
    }

    #[test]
    fn test_relativize_to_cwd_relative_file_unchanged() {
        let result = relativize_to_cwd(Path::new("src/lib.rs"));

        assert_eq!(result, Ok(PathBuf::from("src/lib.rs")));
    }

    #[test]
    fn test_unavailable_is_invalid() {
        let tracking = TrackingData::unavailable(TrackingError::Disabled);

        assert!(!tracking.is_valid());
        assert_eq!(tracking.err(), Some(&TrackingError::Disabled));
        assert_eq!(tracking.pc(), 0);
    }

    #[test]
    fn test_at_is_valid() {
        let tracking = TrackingData::at("src/main.rs", 12);

        assert!(tracking.is_valid());
        assert_eq!(tracking.file(), "src/main.rs");
        assert_eq!(tracking.line(), 12);
    }

    #[test]
    fn test_relativize_relative_file_unchanged() {
        let result = relativize(Path::new("src/lib.rs"), Path::new("/home/user/project"));

        assert_eq!(result, Ok(PathBuf::from("src/lib.rs")));
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_inside_base() {
        let result = relativize(
            Path::new("/home/user/project/src/lib.rs"),
            Path::new("/home/user/project"),
        );

        assert_eq!(result, Ok(PathBuf::from("src/lib.rs")));
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_outside_base_walks_up() {
        let result = relativize(
            Path::new("/home/user/other/main.rs"),
            Path::new("/home/user/project/crates"),
        );

        assert_eq!(result, Ok(PathBuf::from("../../other/main.rs")));
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_same_path() {
        let result = relativize(Path::new("/home/user"), Path::new("/home/user"));

        assert_eq!(result, Ok(PathBuf::from(".")));
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_relative_base_fails() {
        let result = relativize(Path::new("/home/user/main.rs"), Path::new("project"));

        assert!(matches!(result, Err(TrackingError::NotRelative { .. })));
    }

    #[test]
    fn test_tracking_error_display() {
        let err = TrackingError::NotRelative {
            file: PathBuf::from("/a/b.rs"),
            base: PathBuf::from("c"),
        };

        assert_eq!(err.to_string(), "`/a/b.rs` is not relative to `c`");
        assert_eq!(
            TrackingError::Disabled.to_string(),
            "location capture is disabled"
        );
    }
}
