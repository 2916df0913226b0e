//! Behavioral statements for process bodies.

use crate::expr::Expr;
use crate::signal::SignalRef;
use serde::{Deserialize, Serialize};

/// A behavioral statement inside a [`Process`](crate::Process) body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// A signal assignment (`target <= value`).
    Assign {
        /// The target signal or signal slice.
        target: SignalRef,
        /// The value expression.
        value: Expr,
    },
    /// An if statement without else; an unassigned target keeps its value.
    If {
        /// The condition expression.
        condition: Expr,
        /// The body when the condition holds.
        then_body: Box<Statement>,
    },
    /// A block of statements in order.
    Block(Vec<Statement>),
}

impl Statement {
    /// `target <= value`.
    pub fn assign(target: SignalRef, value: Expr) -> Self {
        Statement::Assign { target, value }
    }

    /// `if condition then body`.
    pub fn when(condition: Expr, body: Statement) -> Self {
        Statement::If {
            condition,
            then_body: Box::new(body),
        }
    }

    /// Flattens this statement into the assignments it may perform.
    pub fn assignments(&self) -> Vec<(&SignalRef, &Expr)> {
        match self {
            Statement::Assign { target, value } => vec![(target, value)],
            Statement::If { then_body, .. } => then_body.assignments(),
            Statement::Block(stmts) => stmts.iter().flat_map(Statement::assignments).collect(),
        }
    }

    /// Every signal reference read or written by this statement.
    pub fn signal_refs(&self) -> Vec<&SignalRef> {
        match self {
            Statement::Assign { target, value } => {
                let mut refs = vec![target];
                refs.extend(value.signal_refs());
                refs
            }
            Statement::If {
                condition,
                then_body,
            } => {
                let mut refs = condition.signal_refs();
                refs.extend(then_body.signal_refs());
                refs
            }
            Statement::Block(stmts) => stmts.iter().flat_map(Statement::signal_refs).collect(),
        }
    }
}
