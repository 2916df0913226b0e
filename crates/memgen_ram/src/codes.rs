//! Diagnostic codes emitted by the RAM generator.

use memgen_diagnostics::{Category, DiagnosticCode};

/// A clocked RAM whose clock terminal is not connected.
pub const MISSING_CLOCK: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

/// A RAM configuration that cannot be turned into synthesizable RTL.
pub const UNSUPPORTED_RAM: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A target HDL dialect the generator has no backend for.
pub const UNSUPPORTED_DIALECT: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
