//! Port-map text for instantiating a unit in its parent architecture.

use crate::unit::literal;
use memgen_common::{GenResult, InternalError};
use memgen_ir::RtlUnit;
use memgen_netlist::{BindTarget, BindingTable, NetRef};

/// Renders a direct entity instantiation of `unit` labelled `label`.
///
/// Every port of the unit must be bound, and nothing else may be.
pub fn render_instance(label: &str, unit: &RtlUnit, bindings: &BindingTable) -> GenResult<String> {
    for port in &unit.ports {
        let Some(target) = bindings.get(&port.name) else {
            return Err(InternalError::new(format!("port {} of {label} is not bound", port.name)));
        };
        if let BindTarget::Constant { value } = target {
            if value.width() != port.width {
                return Err(InternalError::new(format!(
                    "constant for port {} of {label} is {} bits wide, expected {}",
                    port.name,
                    value.width(),
                    port.width
                )));
            }
        }
    }
    if let Some(extra) = bindings.iter().find(|b| unit.port(&b.port).is_none()) {
        return Err(InternalError::new(format!("{label} binds unknown port {}", extra.port)));
    }

    let pad = unit.ports.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let count = bindings.len();
    let mut out = format!("   {label} : ENTITY work.{}\n", unit.name);
    for (i, binding) in bindings.iter().enumerate() {
        let lead = if i == 0 { "      PORT MAP ( " } else { "                 " };
        let end = if i + 1 == count { " );" } else { "," };
        out.push_str(&format!("{lead}{:<pad$} => {}{end}\n", binding.port, actual(&binding.target)));
    }
    Ok(out)
}

fn actual(target: &BindTarget) -> String {
    match target {
        BindTarget::Net { net } => net_text(net),
        BindTarget::Constant { value } => literal(value),
        BindTarget::Open => "OPEN".to_string(),
        BindTarget::ClockPhase { bus, index } => format!("{bus}({index})"),
    }
}

/// Concatenations are only legal as port actuals from VHDL-2008 on.
fn net_text(net: &NetRef) -> String {
    match net {
        NetRef::Net(name) => name.clone(),
        NetRef::Bit { net, bit } => format!("{net}({bit})"),
        NetRef::Slice { net, high, low } => format!("{net}({high} DOWNTO {low})"),
        NetRef::Concat { concat } => concat.iter().map(net_text).collect::<Vec<_>>().join(" & "),
    }
}
