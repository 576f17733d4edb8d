//! Arguments passed to extern pipeline stages

use crate::expr::Expr;

/// One argument of a call to an extern stage.
///
/// Only scalar arguments are modelled; anything passed as a scalar travels
/// as an [`Expr`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExternFuncArgument {
    /// No argument bound yet
    #[default]
    Undefined,

    /// A scalar expression
    Expr(Expr),
}

impl ExternFuncArgument {
    /// Check if this argument carries an expression
    pub fn is_expr(&self) -> bool {
        matches!(self, ExternFuncArgument::Expr(_))
    }

    /// Check if this argument is bound to something
    pub fn is_defined(&self) -> bool {
        !matches!(self, ExternFuncArgument::Undefined)
    }

    /// Extract the expression, if any
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            ExternFuncArgument::Expr(e) => Some(e),
            ExternFuncArgument::Undefined => None,
        }
    }
}

impl From<Expr> for ExternFuncArgument {
    fn from(e: Expr) -> Self {
        ExternFuncArgument::Expr(e)
    }
}
