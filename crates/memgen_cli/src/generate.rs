//! `memgen generate`: the RAM generation pipeline.
//!
//! 1. Find project root and load `memgen.toml`
//! 2. Generate every selected instance in parallel
//! 3. Render each artifact as a VHDL entity and a port-map fragment
//! 4. Write `<out>/memory/<instance>.vhd` and `<instance>_map.vhd`
//! 5. Render diagnostics in instance order
//!
//! Unsupported instances are skipped with an error diagnostic; the others
//! are still written. The exit code is 1 if any error was reported.

use std::path::{Path, PathBuf};

use memgen_config::{ConfigError, ProjectConfig, RamInstance};
use memgen_diagnostics::{DiagnosticSink, Severity};
use memgen_ram::{GenError, RamGenerator};
use memgen_vhdl::{render_instance, render_unit, FILE_EXTENSION};
use rayon::prelude::*;
use serde::Serialize;

use crate::pipeline::{load_project, render_diagnostics, sort_by_instance};
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// The rendered text of one instance.
#[derive(Debug)]
pub struct RenderedRam {
    /// The instance name.
    pub instance: String,
    /// The entity and architecture.
    pub entity: String,
    /// The instantiation fragment for the parent architecture.
    pub port_map: String,
}

/// Result of generating a whole project.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Files written, in instance order.
    pub written: Vec<PathBuf>,
    /// Instances skipped because they cannot be generated.
    pub skipped: Vec<String>,
    /// Every diagnostic, in instance order.
    pub diagnostics: Vec<memgen_diagnostics::Diagnostic>,
}

/// Runs the `memgen generate` command.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (root, config) = load_project(global)?;
    let out_dir = match &args.out {
        Some(out) => PathBuf::from(out),
        None => root.join(&config.project.output_dir),
    };

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "  Generating {} v{} ({})",
            config.project.name, config.project.version, config.project.dialect
        );
    }

    let report = generate_project(&config, &args.only, &out_dir)?;

    match args.format {
        ReportFormat::Text => {
            render_diagnostics(&report.diagnostics, global.color);
            if !global.quiet {
                for path in &report.written {
                    eprintln!("       Wrote {}", path.display());
                }
                let errors = count(&report, Severity::Error);
                let warnings = count(&report, Severity::Warning);
                eprintln!(
                    "   Result: {} file(s), {} skipped, {errors} error(s), {warnings} warning(s)",
                    report.written.len(),
                    report.skipped.len()
                );
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    let failed = report.diagnostics.iter().any(|d| d.severity.is_error());
    Ok(if failed { 1 } else { 0 })
}

fn count(report: &GenerateReport, severity: Severity) -> usize {
    report
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .count()
}

/// Generates the selected instances of `config` and writes them below `out_dir`.
///
/// An empty `only` selects every instance.
pub fn generate_project(
    config: &ProjectConfig,
    only: &[String],
    out_dir: &Path,
) -> Result<GenerateReport, Box<dyn std::error::Error>> {
    for name in only {
        config.instance(name)?;
    }
    let selected: Vec<&RamInstance> = config
        .ram
        .iter()
        .filter(|r| only.is_empty() || only.contains(&r.name))
        .collect();

    let generator = RamGenerator::new(config.project.dialect, config.clock_bus);
    let sink = DiagnosticSink::new();

    let results: Vec<Result<Option<RenderedRam>, GenerateFailure>> = selected
        .par_iter()
        .map(|ram| generate_instance(&generator, ram, config.project.global_clock, &sink))
        .collect();

    let dir = out_dir.join(generator.sub_directory());
    let mut written = Vec::new();
    let mut skipped = Vec::new();
    for (ram, result) in selected.iter().zip(results) {
        match result? {
            Some(rendered) => {
                std::fs::create_dir_all(&dir)?;
                let entity = dir.join(format!("{}.{FILE_EXTENSION}", rendered.instance));
                let port_map = dir.join(format!("{}_map.{FILE_EXTENSION}", rendered.instance));
                std::fs::write(&entity, &rendered.entity)?;
                std::fs::write(&port_map, &rendered.port_map)?;
                written.push(entity);
                written.push(port_map);
            }
            None => skipped.push(ram.name.clone()),
        }
    }

    let mut diagnostics = sink.take_all();
    let order: Vec<&str> = selected.iter().map(|r| r.name.as_str()).collect();
    sort_by_instance(&mut diagnostics, &order);
    Ok(GenerateReport {
        written,
        skipped,
        diagnostics,
    })
}

/// Failures that abort the whole run rather than skipping one instance.
#[derive(Debug, thiserror::Error)]
enum GenerateFailure {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gen(#[from] GenError),
}

/// Generates and renders one instance.
///
/// `Ok(None)` means the instance was skipped and a diagnostic explains why.
fn generate_instance(
    generator: &RamGenerator,
    ram: &RamInstance,
    global_clock: bool,
    sink: &DiagnosticSink,
) -> Result<Option<RenderedRam>, GenerateFailure> {
    let _span = tracing::info_span!("ram", instance = %ram.name).entered();
    let conn = ram.connectivity(global_clock)?;
    let artifact = match generator.generate(&ram.name, &ram.config(), &conn, sink) {
        Ok(artifact) => artifact,
        Err(GenError::Unsupported { .. } | GenError::UnsupportedDialect(_)) => {
            tracing::info!("skipped");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let entity = render_unit(&artifact.unit).map_err(GenError::from)?;
    let port_map =
        render_instance(&artifact.instance, &artifact.unit, &artifact.bindings).map_err(GenError::from)?;
    tracing::info!(ports = artifact.unit.ports.len(), "rendered");
    Ok(Some(RenderedRam {
        instance: artifact.instance,
        entity,
        port_map,
    }))
}
