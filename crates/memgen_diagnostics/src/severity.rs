//! How bad a diagnostic is for the instance it concerns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a RAM instance as far as one diagnostic is concerned.
///
/// Ordered so that `Error > Warning`; the worst diagnostic of a run decides
/// the exit code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// The instance was generated, but will not behave as in the simulator.
    Warning,
    /// The instance was skipped and nothing was written for it.
    Error,
}

impl Severity {
    /// Whether the instance was skipped.
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lowercase label used in terminal headers.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(
            [Severity::Warning, Severity::Error, Severity::Warning].into_iter().max(),
            Some(Severity::Error)
        );
    }

    #[test]
    fn only_errors_skip() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn labels() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
