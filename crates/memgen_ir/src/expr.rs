//! Expressions used on the right-hand side of assignments and in conditions.

use crate::signal::SignalRef;
use memgen_common::{Logic, LogicVec};
use serde::{Deserialize, Serialize};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Bitwise AND.
    And,
    /// Equality test, yielding a boolean condition.
    Eq,
}

/// An expression in the behavioral IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a signal (or part of a signal).
    Signal(SignalRef),
    /// A literal constant value.
    Literal(LogicVec),
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left-hand side.
        lhs: Box<Expr>,
        /// The right-hand side.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Reads a signal reference.
    pub fn signal(r: SignalRef) -> Self {
        Expr::Signal(r)
    }

    /// A single-bit literal.
    pub fn bit(value: Logic) -> Self {
        Expr::Literal(LogicVec::filled(1, value))
    }

    /// `lhs op rhs`.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// The condition `r = '1'`.
    pub fn is_high(r: SignalRef) -> Self {
        Expr::binary(BinaryOp::Eq, Expr::Signal(r), Expr::bit(Logic::One))
    }

    /// Every signal reference read by this expression, left to right.
    pub fn signal_refs(&self) -> Vec<&SignalRef> {
        match self {
            Expr::Signal(r) => vec![r],
            Expr::Literal(_) => Vec::new(),
            Expr::Binary { lhs, rhs, .. } => {
                let mut refs = lhs.signal_refs();
                refs.extend(rhs.signal_refs());
                refs
            }
        }
    }
}
