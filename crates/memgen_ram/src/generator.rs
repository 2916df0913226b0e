//! The entry point tying feasibility, planning, emission and binding together.

use crate::bind::PortBinder;
use crate::codes;
use crate::config::RamConfig;
use crate::emit::emit;
use crate::feasibility::{unsupported_reasons, UnsupportedReason};
use crate::layout::TerminalLayout;
use crate::plan::{plan, SignalPlan};
use memgen_common::InternalError;
use memgen_diagnostics::{Diagnostic, DiagnosticSink, Location};
use memgen_ir::RtlUnit;
use memgen_netlist::{BindingTable, ClockBusLayout, Connectivity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target hardware description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// VHDL-93.
    #[default]
    Vhdl,
    /// Verilog-2001. Accepted in configuration but not generated.
    Verilog,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Vhdl => f.write_str("VHDL"),
            Dialect::Verilog => f.write_str("Verilog"),
        }
    }
}

/// Why one RAM instance produced no output.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The configuration fails the feasibility gate.
    #[error("RAM configuration is not synthesizable: {}", join_reasons(.reasons))]
    Unsupported {
        /// Every failed condition, in check order.
        reasons: Vec<UnsupportedReason>,
    },
    /// No backend for the requested dialect.
    #[error("the RAM generator cannot produce {0}")]
    UnsupportedDialect(Dialect),
    /// A bug in the generator.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

fn join_reasons(reasons: &[UnsupportedReason]) -> String {
    reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Everything generated for one RAM instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamArtifact {
    /// The instance label.
    pub instance: String,
    /// The component description.
    pub unit: RtlUnit,
    /// The instance's port map.
    pub bindings: BindingTable,
    /// The terminal indices the port map was built from.
    pub layout: TerminalLayout,
}

/// Generates RAM components for one target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamGenerator {
    dialect: Dialect,
    clock_bus: ClockBusLayout,
}

impl RamGenerator {
    /// Name of the generated entity.
    pub const COMPONENT_NAME: &'static str = "RAM";
    /// Output subdirectory for generated files.
    pub const SUB_DIRECTORY: &'static str = "memory";

    /// A generator for `dialect` whose clock generators use `clock_bus`.
    pub fn new(dialect: Dialect, clock_bus: ClockBusLayout) -> Self {
        Self { dialect, clock_bus }
    }

    /// Name of the generated entity.
    pub fn component_name(&self) -> &'static str {
        Self::COMPONENT_NAME
    }

    /// Output subdirectory for generated files.
    pub fn sub_directory(&self) -> &'static str {
        Self::SUB_DIRECTORY
    }

    /// The target dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether `cfg` can be generated in this generator's dialect.
    pub fn is_supported(&self, cfg: &RamConfig) -> bool {
        self.dialect == Dialect::Vhdl && unsupported_reasons(cfg).is_empty()
    }

    /// Builds the component description for `cfg` without binding it.
    pub fn build_unit(&self, cfg: &RamConfig) -> Result<RtlUnit, GenError> {
        self.check(cfg)?;
        let plan = plan(cfg)?;
        Ok(assemble(cfg, &plan)?)
    }

    /// Generates and binds one RAM instance.
    ///
    /// Unsupported configurations and dialects are reported to `sink` and
    /// returned as errors; the caller skips the instance. A missing clock
    /// is only a warning and the instance is still generated.
    pub fn generate(
        &self,
        instance: &str,
        cfg: &RamConfig,
        conn: &dyn Connectivity,
        sink: &DiagnosticSink,
    ) -> Result<RamArtifact, GenError> {
        let location = Location::instance(conn.circuit_name(), instance);
        if let Err(err) = self.check(cfg) {
            let mut diag = match &err {
                GenError::UnsupportedDialect(dialect) => Diagnostic::error(
                    codes::UNSUPPORTED_DIALECT,
                    format!("cannot generate RAM \"{instance}\" in {dialect}"),
                )
                .with_help("set `dialect = \"vhdl\"` in the project configuration"),
                _ => Diagnostic::error(
                    codes::UNSUPPORTED_RAM,
                    format!("RAM \"{instance}\" cannot be converted to synthesizable HDL"),
                ),
            };
            if let GenError::Unsupported { reasons } = &err {
                for reason in reasons {
                    diag = diag.with_note(reason.to_string());
                }
            }
            sink.emit(diag.at(location));
            return Err(err);
        }

        tracing::debug!(
            instance,
            data_width = cfg.data_width,
            address_width = cfg.address_width,
            lanes = cfg.lane_count(),
            "generating RAM"
        );
        let plan = plan(cfg)?;
        let unit = assemble(cfg, &plan)?;
        let bindings = PortBinder::new(cfg, &plan, self.clock_bus).bind(conn, sink, instance)?;
        Ok(RamArtifact {
            instance: instance.to_string(),
            unit,
            bindings,
            layout: TerminalLayout::for_config(cfg),
        })
    }

    fn check(&self, cfg: &RamConfig) -> Result<(), GenError> {
        if self.dialect != Dialect::Vhdl {
            return Err(GenError::UnsupportedDialect(self.dialect));
        }
        let reasons = unsupported_reasons(cfg);
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(GenError::Unsupported { reasons })
        }
    }
}

/// Emits the body for `plan` and checks the finished unit.
fn assemble(cfg: &RamConfig, plan: &SignalPlan) -> Result<RtlUnit, InternalError> {
    let body = emit(cfg, plan)?;
    let unit = RtlUnit {
        name: RamGenerator::COMPONENT_NAME.to_string(),
        ports: plan.ports.clone(),
        types: plan.types.clone(),
        storage: plan.storage.clone(),
        registers: plan.registers.clone(),
        wires: plan.wires.clone(),
        body,
    };
    verify(&unit)?;
    Ok(unit)
}

/// Every name used in the body is declared exactly once.
fn verify(unit: &RtlUnit) -> Result<(), InternalError> {
    let undeclared = unit.undeclared_references();
    if !undeclared.is_empty() {
        return Err(InternalError::new(format!(
            "generated RAM references undeclared signals: {}",
            undeclared.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }
    let duplicates = unit.duplicate_names();
    if !duplicates.is_empty() {
        return Err(InternalError::new(format!(
            "generated RAM declares names twice: {}",
            duplicates.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataBus, Trigger};
    use memgen_netlist::{InstanceConnections, NetRef};

    fn generator() -> RamGenerator {
        RamGenerator::new(Dialect::Vhdl, ClockBusLayout::default())
    }

    #[test]
    fn identity() {
        let gen = generator();
        assert_eq!(gen.component_name(), "RAM");
        assert_eq!(gen.sub_directory(), "memory");
        assert_eq!(gen.dialect(), Dialect::Vhdl);
    }

    #[test]
    fn verilog_rejected_before_feasibility() {
        let gen = RamGenerator::new(Dialect::Verilog, ClockBusLayout::default());
        let cfg = RamConfig::new(8, 4).with_bus(DataBus::Combined);
        assert!(!gen.is_supported(&cfg));
        let sink = DiagnosticSink::new();
        let err = gen
            .generate("ram0", &cfg, &InstanceConnections::new("main"), &sink)
            .unwrap_err();
        assert!(matches!(err, GenError::UnsupportedDialect(Dialect::Verilog)));
        assert_eq!(sink.diagnostics()[0].code, codes::UNSUPPORTED_DIALECT);
    }

    #[test]
    fn unsupported_reported_with_reasons() {
        let gen = generator();
        let sink = DiagnosticSink::new();
        let cfg = RamConfig::new(8, 4).with_trigger(Trigger::HighLevel).with_clear_pin(true);
        let err = gen
            .generate("ram0", &cfg, &InstanceConnections::new("main"), &sink)
            .unwrap_err();
        match &err {
            GenError::Unsupported { reasons } => assert_eq!(
                reasons,
                &vec![UnsupportedReason::Asynchronous, UnsupportedReason::ClearPin]
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("level triggered; the RAM has a clear pin"));
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::UNSUPPORTED_RAM);
        assert_eq!(diags[0].notes.len(), 2);
    }

    #[test]
    fn generated_unit_is_well_formed() {
        let gen = generator();
        for cfg in [
            RamConfig::new(1, 1),
            RamConfig::new(8, 4),
            RamConfig::new(12, 2).with_byte_enables(true),
            RamConfig::new(3, 1).with_byte_enables(true),
            RamConfig::new(64, 8).with_byte_enables(true),
        ] {
            let unit = gen.build_unit(&cfg).unwrap();
            assert_eq!(unit.name, "RAM");
            assert!(unit.undeclared_references().is_empty());
        }
    }

    #[test]
    fn artifact_carries_bindings() {
        let conn = InstanceConnections::new("main")
            .connect(0, NetRef::net("s_addr"))
            .connect_clock(5, "s_clock_bus_0");
        let sink = DiagnosticSink::new();
        let artifact = generator().generate("ram0", &RamConfig::new(8, 4), &conn, &sink).unwrap();
        assert_eq!(artifact.instance, "ram0");
        assert_eq!(artifact.bindings.len(), artifact.unit.ports.len());
        assert_eq!(artifact.bindings.tick_phase("Tick"), Some(2));
        assert!(sink.is_empty());
    }

    #[test]
    fn generate_builds_the_same_unit_and_warns_once() {
        let gen = generator();
        let cfg = RamConfig::new(12, 2).with_byte_enables(true);
        let sink = DiagnosticSink::new();
        let artifact = gen
            .generate("ram0", &cfg, &InstanceConnections::new("main"), &sink)
            .unwrap();
        assert_eq!(artifact.unit, gen.build_unit(&cfg).unwrap());
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::MISSING_CLOCK);
    }

    #[test]
    fn dialect_serde() {
        let d: Dialect = serde_json::from_str("\"verilog\"").unwrap();
        assert_eq!(d, Dialect::Verilog);
        assert_eq!(Dialect::default(), Dialect::Vhdl);
        assert_eq!(Dialect::Vhdl.to_string(), "VHDL");
    }
}
