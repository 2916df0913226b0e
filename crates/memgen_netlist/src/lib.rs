//! The connectivity side of a circuit, as seen by a component generator.
//!
//! A netlist pass elsewhere discovers which net drives each terminal of
//! each component. Generators only need to ask a few questions about one
//! instance, captured by the [`Connectivity`] trait. [`InstanceConnections`]
//! is a plain in-memory answer to those questions, built from configuration
//! files or in tests.

#![warn(missing_docs)]

pub mod binding;
pub mod clock;
pub mod connectivity;
pub mod net;

pub use binding::{BindTarget, BindingTable, PortBinding};
pub use clock::ClockBusLayout;
pub use connectivity::{Connectivity, InstanceConnections, TerminalDriver};
pub use net::NetRef;
