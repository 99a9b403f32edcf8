//! Error taxonomy for the value core.
//!
//! Every fallible operation on a [`Value`](crate::value::Value) surfaces one
//! of these kinds. Errors are raised synchronously at the point of violation
//! and are never retried or suppressed inside the crate; callers decide what
//! to do with them.

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;
use thiserror::Error;

use crate::graph::GraphError;
use crate::value::Tag;

/// Fatal errors produced by value operations.
///
/// The one deliberate non-error: numeric narrowing during promotion may
/// silently escalate to the next wider shape (e.g. an unsigned result that
/// outgrows `u64` lands in `F64`) instead of raising.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ValueError {
    /// An operator or accessor was applied to a shape it does not support.
    #[error("type mismatch: {op} not supported between {left} and {right}")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::type_mismatch))
    )]
    TypeMismatch {
        op: &'static str,
        left: Tag,
        right: Tag,
    },

    /// Checked arithmetic exceeded the destination range.
    #[error("arithmetic overflow in {op}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::value::overflow)))]
    ArithmeticOverflow { op: &'static str },

    /// Division with a zero divisor.
    #[error("division by zero")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::division_by_zero))
    )]
    DivisionByZero,

    /// Modulo with a zero divisor.
    #[error("modulo by zero")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::modulo_by_zero))
    )]
    ModuloByZero,

    /// A sequence index (after negative-index normalization) is out of range.
    #[error("index {index} out of range for {shape} of length {len}")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::index_out_of_range))
    )]
    IndexOutOfRange { shape: Tag, index: i64, len: usize },

    /// A container method was called on a shape that lacks it.
    #[error("{shape} has no attribute '{method}'")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::attribute_unsupported))
    )]
    AttributeUnsupported { shape: Tag, method: &'static str },

    /// Iteration was requested on a non-iterable shape.
    #[error("{shape} is not iterable")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::value::iteration_unsupported))
    )]
    IterationUnsupported { shape: Tag },

    /// The shared graph handle is unusable (wrong shape, poisoned lock).
    #[error("graph state error: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::value::graph_state)))]
    GraphState(String),

    /// Explicit conversion failed (string parse, unsupported cast).
    #[error("cannot convert {from} to {to}: {detail}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::value::conversion)))]
    Conversion {
        from: Tag,
        to: &'static str,
        detail: String,
    },

    /// A graph algorithm raised through the bridge.
    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::value::graph)))]
    Graph(#[from] GraphError),
}

impl ValueError {
    /// Shorthand for a single-operand type mismatch.
    pub(crate) fn mismatch(op: &'static str, tag: Tag) -> Self {
        ValueError::TypeMismatch {
            op,
            left: tag,
            right: tag,
        }
    }
}
