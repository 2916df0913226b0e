//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W101]: component "RAM" in circuit "main" has no clock connection
///   --> circuit "main", instance "ram0"
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint_header(&self, diag: &Diagnostic) -> String {
        let header = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return header;
        }
        let ansi = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
        };
        format!("\x1b[1;{ansi}m{header}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.paint_header(diag), diag.message);

        if let Some(location) = &diag.location {
            out.push_str(&format!("  --> {location}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::location::Location;

    #[test]
    fn render_warning_with_location() {
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 101),
            "no clock connection",
        )
        .at(Location::instance("main", "ram0"));
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.starts_with("warning[W101]: no clock connection\n"));
        assert!(output.contains("--> circuit \"main\", instance \"ram0\""));
    }

    #[test]
    fn render_error_with_notes() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 101), "unsupported")
            .with_note("the RAM has a clear pin")
            .with_help("remove the clear pin");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("= note: the RAM has a clear pin"));
        assert!(output.contains("= help: remove the clear pin"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_with_color() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 1), "boom");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[E001]\x1b[0m: boom"));
    }
}
