//! Diagnostic creation, severity management, and terminal rendering.
//!
//! Generators never print. They emit structured [`Diagnostic`] messages into
//! a [`DiagnosticSink`] handed to them by the caller, and the caller decides
//! how to render them ([`TerminalRenderer`] for humans, `serde` for tools).

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use location::Location;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
