//! # Quickbeam
//!
//! Typed scalar parameters for pipeline definitions.
//!
//! A [`Param`] stands in for a scalar that is not known while a pipeline is
//! being defined. When the pipeline is jitted the parameter is bound to a live
//! value with [`Param::set`]; when it is compiled ahead of time the parameter
//! becomes a named formal argument via [`Param::to_argument`].
//!
//! ## Architecture
//!
//! - **Parameter**: shared, reference-counted record of name, type, live
//!   value, default and range
//! - **Param<T>**: typed front door that fixes the declared type to `T`
//! - **Views**: a parameter appears as an [`Expr`] variable, an
//!   [`ExternFuncArgument`], or a compiled [`Argument`]
//!
//! ```
//! use quickbeam::{Expr, Param, Type};
//!
//! let radius = Param::with_range(3u8, 1, 16);
//! let expr: Expr = radius.to_expr();
//! assert_eq!(expr.ty(), Type::uint(8));
//!
//! radius.set(5);
//! assert_eq!(radius.get(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod argument;
pub mod error;
pub mod expr;
pub mod extern_arg;
pub mod naming;
pub mod options;
pub mod param;
pub mod parameter;
pub mod signature;
pub mod types;
pub mod user_context;

// Re-export main types
pub use argument::{Argument, ArgumentKind};
pub use error::{ParamError, Result};
pub use expr::{Expr, ExprNode, Variable};
pub use extern_arg::ExternFuncArgument;
pub use naming::{make_entity_name, unique_name};
pub use options::SignatureOptions;
pub use param::Param;
pub use parameter::Parameter;
pub use signature::Signature;
pub use types::{type_of, ParamType, PlainScalar, Type, TypeCode};
pub use user_context::{user_context_value, USER_CONTEXT_NAME};

/// Quickbeam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
