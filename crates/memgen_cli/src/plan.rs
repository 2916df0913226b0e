//! `memgen plan`: print the signal plan of one RAM instance.

use memgen_ram::{unsupported_reasons, GenError, RamConfig, SignalPlan};

use crate::pipeline::load_project;
use crate::{GlobalArgs, PlanArgs};

/// Runs the `memgen plan` command.
///
/// Unsupported instances have no plan and are reported as an error.
pub fn run(args: &PlanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, config) = load_project(global)?;
    let ram = config.instance(&args.instance)?;
    let plan = plan_instance(&ram.config())?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(0)
}

/// Plans `cfg`, rejecting unsupported configurations with their reasons.
fn plan_instance(cfg: &RamConfig) -> Result<SignalPlan, GenError> {
    let reasons = unsupported_reasons(cfg);
    if !reasons.is_empty() {
        return Err(GenError::Unsupported { reasons });
    }
    Ok(memgen_ram::plan::plan(cfg)?)
}
