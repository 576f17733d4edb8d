//! Expression graph nodes that parameters appear in
//!
//! Only the nodes a parameter needs to describe itself are modelled here:
//! immediates (for current values and literal bounds), casts (for coerced
//! bounds) and variables (for references to a parameter).

use std::fmt;
use std::sync::Arc;

use crate::parameter::Parameter;
use crate::types::{Type, TypeCode};

/// A shared, immutable expression node.
///
/// Cloning an `Expr` clones the handle; the node itself is never copied.
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

/// The node kinds an [`Expr`] can hold.
#[derive(Debug)]
pub enum ExprNode {
    /// Signed integer constant
    IntImm {
        /// Constant type (an `int` type)
        ty: Type,
        /// Value, sign-extended from `ty.bits`
        value: i64,
    },

    /// Unsigned integer, boolean or handle constant
    UIntImm {
        /// Constant type (a `uint` or `handle` type)
        ty: Type,
        /// Value, truncated to `ty.bits`
        value: u64,
    },

    /// Floating point constant
    FloatImm {
        /// Constant type (a `float` type)
        ty: Type,
        /// Value
        value: f64,
    },

    /// Explicit conversion of `value` to `ty`
    Cast {
        /// Target type
        ty: Type,
        /// Converted expression
        value: Expr,
    },

    /// Named reference, optionally bound to a parameter
    Variable(Variable),
}

/// A named variable node.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable type
    pub ty: Type,

    /// Variable name
    pub name: String,

    /// The parameter this variable reads, if any
    pub param: Option<Parameter>,
}

impl Expr {
    fn from_node(node: ExprNode) -> Self {
        Expr(Arc::new(node))
    }

    /// Signed integer constant, sign-extended from the width of `ty`.
    pub fn int_imm(ty: Type, value: i64) -> Self {
        let value = if ty.bits > 0 && ty.bits < 64 {
            let shift = 64 - ty.bits as u32;
            (value << shift) >> shift
        } else {
            value
        };
        Self::from_node(ExprNode::IntImm { ty, value })
    }

    /// Unsigned constant, truncated to the width of `ty`.
    pub fn uint_imm(ty: Type, value: u64) -> Self {
        let value = if ty.bits > 0 && ty.bits < 64 {
            value & ((1u64 << ty.bits) - 1)
        } else {
            value
        };
        Self::from_node(ExprNode::UIntImm { ty, value })
    }

    /// Floating point constant. `float32` values are rounded to `f32`.
    pub fn float_imm(ty: Type, value: f64) -> Self {
        let value = if ty.bits == 32 {
            value as f32 as f64
        } else {
            value
        };
        Self::from_node(ExprNode::FloatImm { ty, value })
    }

    /// Explicit conversion of `value` to `ty`.
    pub fn cast(ty: Type, value: impl Into<Expr>) -> Self {
        Self::from_node(ExprNode::Cast {
            ty,
            value: value.into(),
        })
    }

    /// A named variable, optionally reading from `param`.
    pub fn variable(ty: Type, name: impl Into<String>, param: Option<Parameter>) -> Self {
        Self::from_node(ExprNode::Variable(Variable {
            ty,
            name: name.into(),
            param,
        }))
    }

    /// The node this expression wraps
    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// The type of the value this expression produces
    pub fn ty(&self) -> Type {
        match self.node() {
            ExprNode::IntImm { ty, .. }
            | ExprNode::UIntImm { ty, .. }
            | ExprNode::FloatImm { ty, .. }
            | ExprNode::Cast { ty, .. } => *ty,
            ExprNode::Variable(var) => var.ty,
        }
    }

    /// Check if both handles point at the same node
    pub fn same_as(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Check if this is an immediate constant
    pub fn is_const(&self) -> bool {
        matches!(
            self.node(),
            ExprNode::IntImm { .. } | ExprNode::UIntImm { .. } | ExprNode::FloatImm { .. }
        )
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Extract a signed integer constant
    pub fn as_int(&self) -> Option<i64> {
        match self.node() {
            ExprNode::IntImm { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Extract an unsigned, boolean or handle constant
    pub fn as_uint(&self) -> Option<u64> {
        match self.node() {
            ExprNode::UIntImm { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Extract a floating point constant
    pub fn as_float(&self) -> Option<f64> {
        match self.node() {
            ExprNode::FloatImm { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Extract the operand of a cast node
    pub fn as_cast(&self) -> Option<&Expr> {
        match self.node() {
            ExprNode::Cast { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Extract a variable node
    pub fn as_variable(&self) -> Option<&Variable> {
        match self.node() {
            ExprNode::Variable(var) => Some(var),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        if self.same_as(other) {
            return true;
        }
        match (self.node(), other.node()) {
            (ExprNode::IntImm { ty: ta, value: a }, ExprNode::IntImm { ty: tb, value: b }) => {
                ta == tb && a == b
            }
            (ExprNode::UIntImm { ty: ta, value: a }, ExprNode::UIntImm { ty: tb, value: b }) => {
                ta == tb && a == b
            }
            // Bitwise, so NaN constants compare equal to themselves
            (ExprNode::FloatImm { ty: ta, value: a }, ExprNode::FloatImm { ty: tb, value: b }) => {
                ta == tb && a.to_bits() == b.to_bits()
            }
            (ExprNode::Cast { ty: ta, value: a }, ExprNode::Cast { ty: tb, value: b }) => {
                ta == tb && a == b
            }
            // Variables are equal if they name the same parameter
            (ExprNode::Variable(a), ExprNode::Variable(b)) => {
                a.ty == b.ty
                    && a.name == b.name
                    && match (&a.param, &b.param) {
                        (Some(pa), Some(pb)) => pa.same_as(pb),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Display / Debug
// ═══════════════════════════════════════════════════════════════════

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExprNode::IntImm { ty, value } if *ty == Type::int(32) => write!(f, "{}", value),
            ExprNode::IntImm { ty, value } => write!(f, "{}({})", ty, value),
            ExprNode::UIntImm { ty, value } if ty.is_bool() => write!(f, "{}", *value != 0),
            ExprNode::UIntImm { ty, value } if ty.code == TypeCode::Handle => {
                write!(f, "handle({:#x})", value)
            }
            ExprNode::UIntImm { ty, value } => write!(f, "{}({})", ty, value),
            ExprNode::FloatImm { ty, value } if *ty == Type::float(32) => write!(f, "{}f", value),
            ExprNode::FloatImm { ty, value } => write!(f, "{}({})", ty, value),
            ExprNode::Cast { ty, value } => write!(f, "{}({})", ty, value),
            ExprNode::Variable(var) => write!(f, "{}", var.name),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({}: {})", self, self.ty())
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::uint_imm(Type::bool(), b as u64)
    }
}

impl From<i8> for Expr {
    fn from(n: i8) -> Self {
        Expr::int_imm(Type::int(8), n as i64)
    }
}

impl From<i16> for Expr {
    fn from(n: i16) -> Self {
        Expr::int_imm(Type::int(16), n as i64)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::int_imm(Type::int(32), n as i64)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int_imm(Type::int(64), n)
    }
}

impl From<u8> for Expr {
    fn from(n: u8) -> Self {
        Expr::uint_imm(Type::uint(8), n as u64)
    }
}

impl From<u16> for Expr {
    fn from(n: u16) -> Self {
        Expr::uint_imm(Type::uint(16), n as u64)
    }
}

impl From<u32> for Expr {
    fn from(n: u32) -> Self {
        Expr::uint_imm(Type::uint(32), n as u64)
    }
}

impl From<u64> for Expr {
    fn from(n: u64) -> Self {
        Expr::uint_imm(Type::uint(64), n)
    }
}

impl From<f32> for Expr {
    fn from(n: f32) -> Self {
        Expr::float_imm(Type::float(32), n as f64)
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::float_imm(Type::float(64), n)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}
