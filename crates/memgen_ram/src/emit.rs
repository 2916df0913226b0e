//! Behavioral body of the generated RAM.
//!
//! All inputs are captured on a tick, the tick is delayed through a
//! three-stage shift register, the write happens one clock after capture
//! (stage 0) and the output register loads two clocks later (stage 2).
//! With byte enables, each lane gets its own storage, write pulse, read
//! pulse and output process, all gated by that lane's captured enable.

use crate::config::RamConfig;
use crate::plan::{ports, regs, wires, LanePlan, SignalPlan, TICK_DELAY_STAGES};
use memgen_common::{GenResult, InternalError};
use memgen_ir::{Assignment, BinaryOp, Expr, Item, Process, SignalRef, Statement};

/// Delay-line stage whose output gates writes.
pub const WRITE_TAP: u32 = 0;
/// Delay-line stage whose output gates the output register.
pub const READ_TAP: u32 = 2;

const CONTROL_REMARK: &str = "Here the control signals are defined";
const INPUT_REMARK: &str = "Here the input registers are defined";
const MEMORY_REMARK: &str = "Here the actual memory is defined";
const MEMORIES_REMARK: &str = "Here the actual memories are defined";
const OUTPUT_REMARK: &str = "Here the output register is defined";

/// The write pulse: `[byte_enable AND] s_TickDelayLine(0) AND s_WEReg`.
pub fn write_pulse(byte_enable: Option<SignalRef>) -> Expr {
    pulse(byte_enable, WRITE_TAP, regs::WRITE_ENABLE)
}

/// The read pulse: `[byte_enable AND] s_TickDelayLine(2) AND s_OEReg`.
pub fn read_pulse(byte_enable: Option<SignalRef>) -> Expr {
    pulse(byte_enable, READ_TAP, regs::OUTPUT_ENABLE)
}

fn pulse(byte_enable: Option<SignalRef>, tap: u32, enable_reg: &str) -> Expr {
    let tick = Expr::signal(SignalRef::bit(regs::TICK_DELAY_LINE, tap));
    let head = match byte_enable {
        Some(be) => Expr::binary(BinaryOp::And, Expr::signal(be), tick),
        None => tick,
    };
    Expr::binary(BinaryOp::And, head, Expr::signal(SignalRef::whole(enable_reg)))
}

/// Builds the body for `cfg` from its plan, in emission order.
pub fn emit(cfg: &RamConfig, plan: &SignalPlan) -> GenResult<Vec<Item>> {
    if plan.lanes.len() != cfg.lane_count() as usize {
        return Err(InternalError::new(format!(
            "plan has {} lanes but the RAM needs {}",
            plan.lanes.len(),
            cfg.lane_count()
        )));
    }
    if cfg.is_asynchronous() {
        return Err(InternalError::new("cannot emit a level-triggered RAM"));
    }

    let mut body = vec![Item::Remark(CONTROL_REMARK.to_string())];
    for lane in &plan.lanes {
        let be = lane_enable_bit(lane);
        body.push(concurrent(SignalRef::whole(lane.read_pulse.as_str()), read_pulse(be.clone())));
        body.push(concurrent(SignalRef::whole(lane.write_pulse.as_str()), write_pulse(be)));
    }

    body.push(Item::Remark(INPUT_REMARK.to_string()));
    body.push(Item::Process(input_registers(plan)));
    body.push(Item::Process(tick_pipeline()));

    let memory_remark = if plan.lanes.len() > 1 { MEMORIES_REMARK } else { MEMORY_REMARK };
    body.push(Item::Remark(memory_remark.to_string()));
    body.extend(plan.lanes.iter().map(|lane| Item::Process(memory_process(cfg, lane))));

    body.push(Item::Remark(OUTPUT_REMARK.to_string()));
    body.extend(plan.lanes.iter().map(|lane| Item::Process(output_process(cfg, lane))));

    tracing::trace!(items = body.len(), "emitted RAM body");
    Ok(body)
}

fn concurrent(target: SignalRef, value: Expr) -> Item {
    Item::Assign(Assignment { target, value })
}

fn clocked(name: &str, body: Statement) -> Process {
    Process::clocked(name, ports::CLOCK, body)
}

fn lane_enable_bit(lane: &LanePlan) -> Option<SignalRef> {
    lane.byte_enable
        .as_ref()
        .map(|_| SignalRef::bit(regs::BYTE_ENABLE, lane.slice.lane))
}

/// `name` restricted to the lane's bits; the whole signal without byte enables.
fn lane_ref(cfg: &RamConfig, lane: &LanePlan, name: &str) -> SignalRef {
    if cfg.byte_enables {
        SignalRef::slice(name, lane.slice.high, lane.slice.low)
    } else {
        SignalRef::whole(name)
    }
}

fn input_registers(plan: &SignalPlan) -> Process {
    let mut captures = vec![
        (regs::DATA_IN, ports::DATA_IN),
        (regs::ADDRESS, ports::ADDRESS),
        (regs::WRITE_ENABLE, ports::WRITE_ENABLE),
        (regs::OUTPUT_ENABLE, ports::OUTPUT_ENABLE),
    ]
    .into_iter()
    .map(|(reg, port)| Statement::assign(SignalRef::whole(reg), Expr::signal(SignalRef::whole(port))))
    .collect::<Vec<_>>();
    for lane in &plan.lanes {
        if let Some(port) = &lane.byte_enable {
            captures.push(Statement::assign(
                SignalRef::bit(regs::BYTE_ENABLE, lane.slice.lane),
                Expr::signal(SignalRef::whole(port.as_str())),
            ));
        }
    }
    clocked(
        "InputRegs",
        Statement::when(Expr::is_high(SignalRef::whole(ports::TICK)), Statement::Block(captures)),
    )
}

fn tick_pipeline() -> Process {
    let top = TICK_DELAY_STAGES - 1;
    clocked(
        "TickPipeReg",
        Statement::Block(vec![
            Statement::assign(
                SignalRef::bit(regs::TICK_DELAY_LINE, 0),
                Expr::signal(SignalRef::whole(ports::TICK)),
            ),
            Statement::assign(
                SignalRef::slice(regs::TICK_DELAY_LINE, top, 1),
                Expr::signal(SignalRef::slice(regs::TICK_DELAY_LINE, top - 1, 0)),
            ),
        ]),
    )
}

fn memory_process(cfg: &RamConfig, lane: &LanePlan) -> Process {
    let word = || SignalRef::element(lane.storage.as_str(), SignalRef::whole(regs::ADDRESS));
    clocked(
        &lane.memory_process,
        Statement::Block(vec![
            Statement::when(
                Expr::is_high(SignalRef::whole(lane.write_pulse.as_str())),
                Statement::assign(word(), Expr::signal(lane_ref(cfg, lane, regs::DATA_IN))),
            ),
            Statement::assign(lane_ref(cfg, lane, wires::RAM_DATA_OUT), Expr::signal(word())),
        ]),
    )
}

fn output_process(cfg: &RamConfig, lane: &LanePlan) -> Process {
    clocked(
        &lane.output_process,
        Statement::when(
            Expr::is_high(SignalRef::whole(lane.read_pulse.as_str())),
            Statement::assign(
                lane_ref(cfg, lane, ports::DATA_OUT),
                Expr::signal(lane_ref(cfg, lane, wires::RAM_DATA_OUT)),
            ),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;
    use memgen_common::Logic;

    fn is_one(expr: &Expr) -> bool {
        matches!(expr, Expr::Literal(v) if v.width() == 1 && v.get(0) == Logic::One)
    }

    fn body_for(cfg: RamConfig) -> Vec<Item> {
        let plan = plan(&cfg).unwrap();
        emit(&cfg, &plan).unwrap()
    }

    fn process_names(body: &[Item]) -> Vec<&str> {
        body.iter()
            .filter_map(|item| match item {
                Item::Process(p) => Some(p.name.as_str()),
                _ => None,
            })
            .collect()
    }

    fn remarks(body: &[Item]) -> Vec<&str> {
        body.iter()
            .filter_map(|item| match item {
                Item::Remark(r) => Some(r.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn write_pulse_taps_stage_zero() {
        let expr = write_pulse(None);
        let refs = expr.signal_refs();
        assert_eq!(refs[0], &SignalRef::bit("s_TickDelayLine", 0));
        assert_eq!(refs[1], &SignalRef::whole("s_WEReg"));
    }

    #[test]
    fn read_pulse_taps_stage_two() {
        let expr = read_pulse(Some(SignalRef::bit("s_ByteEnableReg", 1)));
        let refs = expr.signal_refs();
        assert_eq!(
            refs,
            vec![
                &SignalRef::bit("s_ByteEnableReg", 1),
                &SignalRef::bit("s_TickDelayLine", 2),
                &SignalRef::whole("s_OEReg"),
            ]
        );
    }

    #[test]
    fn write_before_read() {
        assert!(WRITE_TAP < READ_TAP);
        assert!(READ_TAP < TICK_DELAY_STAGES);
    }

    #[test]
    fn plain_ram_layout() {
        let body = body_for(RamConfig::new(8, 4));
        assert_eq!(process_names(&body), ["InputRegs", "TickPipeReg", "Mem", "Res"]);
        assert_eq!(
            remarks(&body),
            [
                "Here the control signals are defined",
                "Here the input registers are defined",
                "Here the actual memory is defined",
                "Here the output register is defined",
            ]
        );
        let targets: Vec<_> = body
            .iter()
            .filter_map(|item| match item {
                Item::Assign(a) => Some(a.target.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(targets, [SignalRef::whole("s_oe"), SignalRef::whole("s_we")]);
    }

    #[test]
    fn byte_lane_processes_in_lane_order() {
        let body = body_for(RamConfig::new(24, 3).with_byte_enables(true));
        assert_eq!(
            process_names(&body),
            ["InputRegs", "TickPipeReg", "Mem0", "Mem1", "Mem2", "Res0", "Res1", "Res2"]
        );
        assert!(remarks(&body).contains(&"Here the actual memories are defined"));
    }

    #[test]
    fn ragged_lane_uses_truncated_storage_and_top_slice() {
        let body = body_for(RamConfig::new(12, 2).with_byte_enables(true));
        let mem1 = body
            .iter()
            .find_map(|item| match item {
                Item::Process(p) if p.name == "Mem1" => Some(p),
                _ => None,
            })
            .unwrap();
        let assigns = mem1.body.assignments();
        assert_eq!(
            assigns[0].0,
            &SignalRef::element("s_trunc_mem_contents", SignalRef::whole("s_AddressReg"))
        );
        assert_eq!(assigns[0].1, &Expr::signal(SignalRef::slice("s_DataInReg", 11, 8)));
        assert_eq!(assigns[1].0, &SignalRef::slice("s_ram_data_out", 11, 8));
    }

    #[test]
    fn input_capture_gated_by_tick() {
        let body = body_for(RamConfig::new(16, 4).with_byte_enables(true));
        let regs = body
            .iter()
            .find_map(|item| match item {
                Item::Process(p) if p.name == "InputRegs" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(regs.clock, "Clock");
        match &regs.body {
            Statement::If { condition, then_body } => {
                assert_eq!(condition, &Expr::is_high(SignalRef::whole("Tick")));
                let targets: Vec<_> = then_body.assignments().into_iter().map(|(t, _)| t.clone()).collect();
                assert_eq!(targets.len(), 6);
                assert!(targets.contains(&SignalRef::bit("s_ByteEnableReg", 1)));
            }
            other => panic!("unexpected capture body {other:?}"),
        }
    }

    #[test]
    fn tick_pipeline_shifts_up() {
        let process = tick_pipeline();
        let assigns = process.body.assignments();
        assert_eq!(assigns[0].0, &SignalRef::bit("s_TickDelayLine", 0));
        assert_eq!(assigns[1].0, &SignalRef::slice("s_TickDelayLine", 2, 1));
        assert_eq!(assigns[1].1, &Expr::signal(SignalRef::slice("s_TickDelayLine", 1, 0)));
    }

    #[test]
    fn conditions_compare_against_one() {
        let process = tick_pipeline();
        assert!(process.body.assignments().iter().all(|(_, value)| !is_one(value)));
        match Expr::is_high(SignalRef::whole("x")) {
            Expr::Binary { rhs, .. } => assert!(is_one(&rhs)),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn mismatched_plan_is_internal_error() {
        let cfg = RamConfig::new(16, 4).with_byte_enables(true);
        let plan = plan(&RamConfig::new(16, 4)).unwrap();
        assert!(emit(&cfg, &plan).is_err());
    }
}
