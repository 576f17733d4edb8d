//! Descriptors for the formal arguments of a compiled pipeline

use std::fmt;

use crate::expr::Expr;
use crate::types::Type;

/// What role an argument plays in the compiled function's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// A scalar passed by value
    InputScalar,
    /// A buffer the pipeline reads
    InputBuffer,
    /// A buffer the pipeline writes
    OutputBuffer,
}

/// One formal argument of an ahead-of-time compiled pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Argument name, used verbatim in the generated signature
    pub name: String,

    /// Argument role
    pub kind: ArgumentKind,

    /// Scalar type, or element type for buffers
    pub ty: Type,

    /// Buffer dimensionality (0 for scalars)
    pub dimensions: u8,

    /// The parameter's value at the time the descriptor was made
    pub value: Option<Expr>,

    /// Lower bound, already of type `ty`
    pub min: Option<Expr>,

    /// Upper bound, already of type `ty`
    pub max: Option<Expr>,
}

impl Argument {
    /// Create an argument with no value or bounds
    pub fn new(name: impl Into<String>, kind: ArgumentKind, ty: Type, dimensions: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            dimensions,
            value: None,
            min: None,
            max: None,
        }
    }

    /// Attach the current value (builder pattern)
    pub fn with_value(mut self, value: Option<Expr>) -> Self {
        self.value = value;
        self
    }

    /// Attach a range (builder pattern)
    pub fn with_range(mut self, min: Option<Expr>, max: Option<Expr>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Check if this is a by-value scalar
    pub fn is_scalar(&self) -> bool {
        self.kind == ArgumentKind::InputScalar
    }

    /// Check if this is a buffer of either direction
    pub fn is_buffer(&self) -> bool {
        matches!(
            self.kind,
            ArgumentKind::InputBuffer | ArgumentKind::OutputBuffer
        )
    }

    /// Check if the pipeline reads this argument
    pub fn is_input(&self) -> bool {
        matches!(
            self.kind,
            ArgumentKind::InputScalar | ArgumentKind::InputBuffer
        )
    }

    /// Check if the pipeline writes this argument
    pub fn is_output(&self) -> bool {
        self.kind == ArgumentKind::OutputBuffer
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgumentKind::InputScalar => write!(f, "{} {}", self.ty, self.name)?,
            ArgumentKind::InputBuffer => {
                write!(f, "const buffer<{}, {}> {}", self.ty, self.dimensions, self.name)?
            }
            ArgumentKind::OutputBuffer => {
                write!(f, "buffer<{}, {}> {}", self.ty, self.dimensions, self.name)?
            }
        }
        match (&self.min, &self.max) {
            (None, None) => Ok(()),
            (min, max) => write!(
                f,
                " in [{}, {}]",
                min.as_ref().map_or_else(|| "-inf".to_string(), Expr::to_string),
                max.as_ref().map_or_else(|| "+inf".to_string(), Expr::to_string),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_predicates() {
        let arg = Argument::new("x", ArgumentKind::InputScalar, Type::int(32), 0);
        assert!(arg.is_scalar());
        assert!(arg.is_input());
        assert!(!arg.is_buffer());
        assert!(!arg.is_output());
    }

    #[test]
    fn test_buffer_predicates() {
        let out = Argument::new("out", ArgumentKind::OutputBuffer, Type::uint(8), 2);
        assert!(out.is_buffer());
        assert!(out.is_output());
        assert!(!out.is_input());

        let input = Argument::new("in", ArgumentKind::InputBuffer, Type::uint(8), 2);
        assert!(input.is_buffer());
        assert!(input.is_input());
    }

    #[test]
    fn test_display() {
        let arg = Argument::new("p0", ArgumentKind::InputScalar, Type::int(32), 0);
        assert_eq!(arg.to_string(), "int32 p0");

        let bounded = arg
            .clone()
            .with_range(Some(Expr::from(0)), Some(Expr::from(10)));
        assert_eq!(bounded.to_string(), "int32 p0 in [0, 10]");

        let half = arg.with_range(None, Some(Expr::from(10)));
        assert_eq!(half.to_string(), "int32 p0 in [-inf, 10]");

        let buf = Argument::new("out", ArgumentKind::OutputBuffer, Type::float(32), 3);
        assert_eq!(buf.to_string(), "buffer<float32, 3> out");
    }
}
