//! `memgen check`: feasibility report for every RAM instance.
//!
//! Nothing is written. Each instance is listed as supported or with every
//! reason it cannot be generated; the exit code is 1 if any instance fails.

use memgen_config::{ProjectConfig, RamInstance};
use memgen_ram::{unsupported_reasons, Dialect, RamGenerator};
use serde::Serialize;

use crate::pipeline::load_project;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// The feasibility verdict for one instance.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InstanceReport {
    /// The instance name.
    pub instance: String,
    /// The circuit containing the instance.
    pub circuit: String,
    /// Whether HDL can be generated for it.
    pub supported: bool,
    /// Why not, in check order.
    pub reasons: Vec<String>,
}

/// Runs the `memgen check` command.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, config) = load_project(global)?;
    let reports = check_all(&config);

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                eprintln!(
                    "   Checking {} v{} ({} RAM instance(s))",
                    config.project.name,
                    config.project.version,
                    reports.len()
                );
            }
            for (report, ram) in reports.iter().zip(&config.ram) {
                if report.supported {
                    if !global.quiet {
                        println!("{:>12} {}", "ok", describe(ram));
                    }
                } else {
                    println!("{:>12} {}", "unsupported", describe(ram));
                    for reason in &report.reasons {
                        println!("{:>12} - {reason}", "");
                    }
                }
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(if reports.iter().all(|r| r.supported) { 0 } else { 1 })
}

/// Checks every instance of `config` in file order.
pub fn check_all(config: &ProjectConfig) -> Vec<InstanceReport> {
    let generator = RamGenerator::new(config.project.dialect, config.clock_bus);
    config
        .ram
        .iter()
        .map(|ram| {
            let cfg = ram.config();
            let mut reasons = Vec::new();
            if generator.dialect() != Dialect::Vhdl {
                reasons.push(format!("{} output is not available", generator.dialect()));
            }
            reasons.extend(unsupported_reasons(&cfg).iter().map(ToString::to_string));
            InstanceReport {
                instance: ram.name.clone(),
                circuit: ram.circuit.clone(),
                supported: generator.is_supported(&cfg),
                reasons,
            }
        })
        .collect()
}

fn describe(ram: &RamInstance) -> String {
    let cfg = ram.config();
    format!(
        "{} ({} x {} bits, {} lane(s))",
        ram.name,
        cfg.entry_count(),
        cfg.data_width,
        cfg.lane_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use memgen_config::load_config_from_str;

    const PROJECT: &str = r#"
[project]
name = "cpu"
version = "0.1.0"

[[ram]]
name = "good"
data_width = 12
address_width = 2
byte_enables = true

[[ram]]
name = "bad"
data_width = 8
address_width = 4
trigger = "high_level"
bus = "combined"

[ram.connections]
clock = "s_clk"
"#;

    #[test]
    fn reports_in_file_order() {
        let config = load_config_from_str(PROJECT).unwrap();
        let reports = check_all(&config);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].instance, "good");
        assert!(reports[0].supported);
        assert!(reports[0].reasons.is_empty());
        assert_eq!(reports[1].instance, "bad");
        assert!(!reports[1].supported);
        assert_eq!(reports[1].reasons.len(), 2);
        assert!(reports[1].reasons[1].contains("level triggered"));
    }

    #[test]
    fn verilog_rejects_everything() {
        let toml = PROJECT.replace("version = \"0.1.0\"", "version = \"0.1.0\"\ndialect = \"verilog\"");
        let config = load_config_from_str(&toml).unwrap();
        let reports = check_all(&config);
        assert!(reports.iter().all(|r| !r.supported));
        assert_eq!(reports[0].reasons, ["Verilog output is not available"]);
    }

    #[test]
    fn describe_instance() {
        let config = load_config_from_str(PROJECT).unwrap();
        assert_eq!(describe(&config.ram[0]), "good (4 x 12 bits, 2 lane(s))");
    }

    #[test]
    fn report_json_shape() {
        let config = load_config_from_str(PROJECT).unwrap();
        let json = serde_json::to_value(check_all(&config)).unwrap();
        assert_eq!(json[0]["instance"], "good");
        assert_eq!(json[0]["circuit"], "main");
        assert_eq!(json[1]["supported"], false);
    }
}
