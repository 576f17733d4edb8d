//! The reserved user-context parameter
//!
//! Generated pipelines may take an opaque context pointer that is handed
//! through to extern calls. It travels as a handle-typed variable with a
//! reserved name, so user parameters may not use that name.

use crate::expr::Expr;
use crate::parameter::Parameter;
use crate::types::Type;

/// Name reserved for the user-context argument.
pub const USER_CONTEXT_NAME: &str = "__user_context";

/// An expression for the user context passed to the pipeline, if any.
///
/// Rarely needed; mostly for forwarding the context to extern stages.
pub fn user_context_value() -> Expr {
    Expr::variable(
        Type::handle(),
        USER_CONTEXT_NAME,
        Some(Parameter::user_context()),
    )
}
