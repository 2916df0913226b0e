//! Entity and architecture text for one unit.

use crate::vector_type;
use crate::writer::VhdlWriter;
use memgen_common::{GenResult, InternalError, LogicVec};
use memgen_ir::{BinaryOp, Expr, Item, PortDirection, Process, RtlUnit, SignalRef, Statement};
use std::collections::HashMap;

/// Name of the generated architecture.
pub const ARCHITECTURE_NAME: &str = "PlatformIndependent";

/// Renders `unit` as a complete VHDL design file.
///
/// Fails if the body references a name the unit does not declare.
pub fn render_unit(unit: &RtlUnit) -> GenResult<String> {
    UnitRenderer::new(unit).render()
}

struct UnitRenderer<'a> {
    unit: &'a RtlUnit,
    widths: HashMap<&'a str, u32>,
    out: VhdlWriter,
}

impl<'a> UnitRenderer<'a> {
    fn new(unit: &'a RtlUnit) -> Self {
        let widths = unit
            .ports
            .iter()
            .map(|p| (p.name.as_str(), p.width))
            .chain(unit.registers.iter().map(|s| (s.name.as_str(), s.width)))
            .chain(unit.wires.iter().map(|s| (s.name.as_str(), s.width)))
            .chain(unit.storage.iter().map(|s| (s.name.as_str(), s.entry_width)))
            .collect();
        Self {
            unit,
            widths,
            out: VhdlWriter::new(),
        }
    }

    fn render(mut self) -> GenResult<String> {
        let unit = self.unit;
        let name = &unit.name;
        self.out.line("-- Generated by memgen. Do not edit.");
        self.out.line(&format!("-- Component : {name}"));
        self.out.blank();
        self.out.line("LIBRARY ieee;");
        self.out.line("USE ieee.std_logic_1164.all;");
        self.out.line("USE ieee.numeric_std.all;");
        self.out.blank();
        self.entity();
        self.out.blank();
        self.out.line(&format!("ARCHITECTURE {ARCHITECTURE_NAME} OF {name} IS"));
        self.out.blank();
        self.out.indent();
        self.declarations();
        self.out.dedent();
        self.out.line("BEGIN");
        self.out.indent();
        for item in &unit.body {
            self.item(item)?;
        }
        self.out.dedent();
        self.out.blank();
        self.out.line(&format!("END {ARCHITECTURE_NAME};"));
        Ok(self.out.finish())
    }

    fn entity(&mut self) {
        let unit = self.unit;
        let name = &unit.name;
        self.out.line(&format!("ENTITY {name} IS"));
        let pad = unit.ports.iter().map(|p| p.name.len()).max().unwrap_or(0);
        let count = unit.ports.len();
        self.out.indent();
        for (i, port) in unit.ports.iter().enumerate() {
            let lead = if i == 0 { "PORT ( " } else { "       " };
            let dir = match port.direction {
                PortDirection::Input => "IN ",
                PortDirection::Output => "OUT",
            };
            let end = if i + 1 == count { " );" } else { ";" };
            self.out.line(&format!(
                "{lead}{:<pad$} : {dir} {}{end}",
                port.name,
                vector_type(port.width)
            ));
        }
        self.out.dedent();
        self.out.line(&format!("END ENTITY {name};"));
    }

    fn declarations(&mut self) {
        let unit = self.unit;
        for ty in &unit.types {
            self.out.line(&format!(
                "TYPE {} IS ARRAY ( {} DOWNTO 0 ) OF {};",
                ty.name,
                ty.entries.saturating_sub(1),
                vector_type(ty.element_width)
            ));
        }
        if !unit.types.is_empty() {
            self.out.blank();
        }
        for storage in &unit.storage {
            self.out.line(&format!("SIGNAL {} : {};", storage.name, storage.ty));
        }
        if !unit.storage.is_empty() {
            self.out.blank();
        }
        let signals: Vec<_> = unit.registers.iter().chain(&unit.wires).collect();
        let pad = signals.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for signal in &signals {
            self.out.line(&format!(
                "SIGNAL {:<pad$} : {};",
                signal.name,
                vector_type(signal.width)
            ));
        }
        if !signals.is_empty() {
            self.out.blank();
        }
    }

    fn item(&mut self, item: &Item) -> GenResult<()> {
        match item {
            Item::Remark(text) => {
                self.out.blank();
                self.out.remark(text);
            }
            Item::Assign(a) => {
                let line = format!("{} <= {};", self.signal_ref(&a.target)?, self.expr(&a.value)?);
                self.out.line(&line);
            }
            Item::Process(p) => self.process(p)?,
        }
        Ok(())
    }

    fn process(&mut self, process: &Process) -> GenResult<()> {
        let clock = &process.clock;
        self.out.line(&format!("{} : PROCESS ( {clock} ) IS", process.name));
        self.out.line("BEGIN");
        self.out.indent();
        self.out.line(&format!("IF ({clock}'event AND ({clock} = '1')) THEN"));
        self.out.indent();
        self.statement(&process.body)?;
        self.out.dedent();
        self.out.line("END IF;");
        self.out.dedent();
        self.out.line(&format!("END PROCESS {};", process.name));
        self.out.blank();
        Ok(())
    }

    fn statement(&mut self, stmt: &Statement) -> GenResult<()> {
        match stmt {
            Statement::Assign { target, value } => {
                let line = format!("{} <= {};", self.signal_ref(target)?, self.expr(value)?);
                self.out.line(&line);
            }
            Statement::If {
                condition,
                then_body,
            } => {
                let line = format!("IF ({}) THEN", self.expr(condition)?);
                self.out.line(&line);
                self.out.indent();
                self.statement(then_body)?;
                self.out.dedent();
                self.out.line("END IF;");
            }
            Statement::Block(stmts) => {
                for s in stmts {
                    self.statement(s)?;
                }
            }
        }
        Ok(())
    }

    fn expr(&self, expr: &Expr) -> GenResult<String> {
        match expr {
            Expr::Signal(r) => self.signal_ref(r),
            Expr::Literal(value) => Ok(literal(value)),
            Expr::Binary { op, lhs, rhs } => {
                let left = self.operand(*op, lhs, true)?;
                let right = self.operand(*op, rhs, false)?;
                let op = match op {
                    BinaryOp::And => "AND",
                    BinaryOp::Eq => "=",
                };
                Ok(format!("{left} {op} {right}"))
            }
        }
    }

    /// AND chains associate to the left; everything else nested is
    /// parenthesized.
    fn operand(&self, parent: BinaryOp, expr: &Expr, left: bool) -> GenResult<String> {
        let text = self.expr(expr)?;
        Ok(match expr {
            Expr::Binary { op, .. } if !(left && parent == BinaryOp::And && *op == BinaryOp::And) => {
                format!("({text})")
            }
            _ => text,
        })
    }

    fn width_of(&self, name: &str) -> GenResult<u32> {
        self.widths
            .get(name)
            .copied()
            .ok_or_else(|| InternalError::new(format!("unit {} has no signal named {name}", self.unit.name)))
    }

    fn signal_ref(&self, r: &SignalRef) -> GenResult<String> {
        Ok(match r {
            SignalRef::Whole(name) => {
                self.width_of(name)?;
                name.clone()
            }
            SignalRef::Bit { name, index } => {
                if self.width_of(name)? == 1 {
                    name.clone()
                } else {
                    format!("{name}({index})")
                }
            }
            SignalRef::Slice { name, high, low } => {
                if self.width_of(name)? == 1 {
                    name.clone()
                } else if high == low {
                    format!("{name}({high})")
                } else {
                    format!("{name}({high} DOWNTO {low})")
                }
            }
            SignalRef::Element { array, address } => {
                self.width_of(array)?;
                let addr = self.signal_ref(address)?;
                if self.ref_width(address)? == 1 {
                    format!("{array}(to_integer(unsigned'(0 => {addr})))")
                } else {
                    format!("{array}(to_integer(unsigned({addr})))")
                }
            }
        })
    }

    fn ref_width(&self, r: &SignalRef) -> GenResult<u32> {
        match r {
            SignalRef::Whole(name) => self.width_of(name),
            SignalRef::Bit { .. } => Ok(1),
            SignalRef::Slice { high, low, .. } => Ok(high - low + 1),
            SignalRef::Element { array, .. } => self.width_of(array),
        }
    }
}

/// A VHDL literal: `'1'` for one bit, `"0101"` otherwise.
pub(crate) fn literal(value: &LogicVec) -> String {
    if value.width() == 1 {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}
