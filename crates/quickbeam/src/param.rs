//! Typed scalar parameters for pipeline definitions
//!
//! When jitting, bind a [`Param`] to a value with [`Param::set`] before the
//! pipeline runs. When compiling ahead of time, pass [`Param::to_argument`]
//! into the signature so the parameter becomes a formal argument.

use std::marker::PhantomData;

use crate::argument::{Argument, ArgumentKind};
use crate::error::Result;
use crate::expr::Expr;
use crate::extern_arg::ExternFuncArgument;
use crate::naming::make_entity_name;
use crate::parameter::Parameter;
use crate::types::{ParamType, PlainScalar, Type};

/// Category prefix for auto-generated parameter names
const PARAM_NAME_PREFIX: &str = "quickbeam::Param<?";

/// Tag character that starts auto-generated parameter names
const PARAM_NAME_TAG: char = 'p';

/// A scalar parameter of type `T`.
///
/// A `Param` is a typed handle on a shared [`Parameter`]. Clones share the
/// same value, range and name.
///
/// # Example
///
/// ```
/// use quickbeam::{Param, Type};
///
/// let threshold = Param::named_with_value("threshold", 0.5f32).unwrap();
/// threshold.set_range(0, 1);
///
/// let copy = threshold.clone();
/// copy.set(0.75);
/// assert_eq!(threshold.get(), 0.75);
///
/// let min = threshold.min_value().unwrap();
/// assert_eq!(min.ty(), Type::float(32));
/// ```
pub struct Param<T: ParamType> {
    param: Parameter,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ParamType> Param<T> {
    fn from_parameter(param: Parameter) -> Self {
        Self {
            param,
            _marker: PhantomData,
        }
    }

    fn auto_named() -> Self {
        let name = make_entity_name(PARAM_NAME_PREFIX, PARAM_NAME_TAG);
        Self::from_parameter(Parameter::generated(T::type_of(), name))
    }

    fn explicitly_named(name: impl Into<String>) -> Result<Self> {
        Parameter::new(T::type_of(), false, 0, name, true).map(Self::from_parameter)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// A parameter with a unique auto-generated name.
    pub fn new() -> Self {
        Self::auto_named()
    }

    /// A parameter with the given name.
    ///
    /// Fails with [`ParamError::ReservedName`](crate::ParamError::ReservedName)
    /// for `"__user_context"`.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        Self::explicitly_named(name)
    }

    /// A named parameter with an initial value.
    pub fn named_with_value(name: impl Into<String>, value: T) -> Result<Self> {
        let p = Self::explicitly_named(name)?;
        p.set(value);
        Ok(p)
    }

    /// A named parameter with an initial value and a range.
    pub fn named_with_range(
        name: impl Into<String>,
        value: T,
        min: impl Into<Expr>,
        max: impl Into<Expr>,
    ) -> Result<Self> {
        let p = Self::explicitly_named(name)?;
        p.set_range(min, max);
        p.set(value);
        Ok(p)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Identity
    // ═══════════════════════════════════════════════════════════════════

    /// The parameter's name
    pub fn name(&self) -> &str {
        self.param.name()
    }

    /// Whether the name was given at construction rather than generated
    pub fn is_explicit_name(&self) -> bool {
        self.param.is_explicit_name()
    }

    /// The pipeline type of `T`
    pub fn ty(&self) -> Type {
        T::type_of()
    }

    /// The shared entity behind this handle
    pub fn parameter(&self) -> &Parameter {
        &self.param
    }

    // ═══════════════════════════════════════════════════════════════════
    // Value (meaningful when jitting)
    // ═══════════════════════════════════════════════════════════════════

    /// The current value.
    ///
    /// Falls back to the default value, then to zero, when nothing was set.
    pub fn get(&self) -> T {
        self.param.load_scalar()
    }

    /// Set the current value. The range is not enforced here.
    pub fn set(&self, value: T) {
        self.param.store_scalar(value);
    }

    /// Pointer to the location holding the current value.
    ///
    /// Valid while any handle on the parameter is alive. Intended for native
    /// callers during JIT execution.
    pub fn get_address(&self) -> *mut T {
        self.param.scalar_address().cast::<T>()
    }

    /// Set the value used until [`Param::set`] is called
    pub fn set_default_value(&self, value: T) {
        self.param.store_default(value);
    }

    /// The default value, if any
    pub fn default_value(&self) -> Option<Expr> {
        self.param.default_value()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Range
    // ═══════════════════════════════════════════════════════════════════

    /// Set both bounds. Bounds of another type are cast to `T`'s type.
    pub fn set_range(&self, min: impl Into<Expr>, max: impl Into<Expr>) {
        self.set_min_value(min);
        self.set_max_value(max);
    }

    /// Make the parameter unbounded again
    pub fn clear_range(&self) {
        self.param.clear_min_value();
        self.param.clear_max_value();
    }

    /// Set the lower bound
    pub fn set_min_value(&self, min: impl Into<Expr>) {
        self.param.set_min_value(min);
    }

    /// Set the upper bound
    pub fn set_max_value(&self, max: impl Into<Expr>) {
        self.param.set_max_value(max);
    }

    /// The lower bound; `None` means unbounded
    pub fn min_value(&self) -> Option<Expr> {
        self.param.min_value()
    }

    /// The upper bound; `None` means unbounded
    pub fn max_value(&self) -> Option<Expr> {
        self.param.max_value()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Views
    // ═══════════════════════════════════════════════════════════════════

    /// Use this parameter inside an expression.
    ///
    /// The variable node holds the shared entity, so later range or value
    /// changes are visible through it.
    pub fn to_expr(&self) -> Expr {
        Expr::variable(T::type_of(), self.name(), Some(self.param.clone()))
    }

    /// Pass this parameter to an extern stage.
    pub fn to_extern_argument(&self) -> ExternFuncArgument {
        ExternFuncArgument::Expr(self.to_expr())
    }

    /// Describe this parameter as a formal argument for ahead-of-time
    /// compilation.
    pub fn to_argument(&self) -> Argument {
        Argument::new(self.name(), ArgumentKind::InputScalar, T::type_of(), 0)
            .with_value(self.param.scalar_expr())
            .with_range(self.min_value(), self.max_value())
    }
}

impl<T: PlainScalar> Param<T> {
    /// A parameter with an auto-generated name and an initial value.
    ///
    /// Not available for pointer handles; name those with [`Param::named`].
    ///
    /// ```
    /// use quickbeam::Param;
    ///
    /// let level = Param::with_value(3u8);
    /// assert_eq!(level.get(), 3);
    /// assert!(!level.is_explicit_name());
    /// ```
    ///
    /// Pointer handles are rejected at compile time:
    ///
    /// ```compile_fail
    /// quickbeam::Param::with_value(std::ptr::null_mut::<std::ffi::c_void>());
    /// ```
    pub fn with_value(value: T) -> Self {
        let p = Self::auto_named();
        p.set(value);
        p
    }

    /// A parameter with an auto-generated name, initial value and range.
    ///
    /// Like [`Param::with_value`], only for plain scalars:
    ///
    /// ```compile_fail
    /// quickbeam::Param::with_range(std::ptr::null::<u8>(), 0, 1);
    /// ```
    pub fn with_range(value: T, min: impl Into<Expr>, max: impl Into<Expr>) -> Self {
        let p = Self::auto_named();
        p.set_range(min, max);
        p.set(value);
        p
    }
}

impl<T: ParamType> Default for Param<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ParamType> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self::from_parameter(self.param.clone())
    }
}

impl<T: ParamType> std::fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.name())
            .field("ty", &T::type_of())
            .field("value", &self.get())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl<T: ParamType> From<&Param<T>> for Expr {
    fn from(p: &Param<T>) -> Self {
        p.to_expr()
    }
}

impl<T: ParamType> From<&Param<T>> for ExternFuncArgument {
    fn from(p: &Param<T>) -> Self {
        p.to_extern_argument()
    }
}

impl<T: ParamType> From<&Param<T>> for Argument {
    fn from(p: &Param<T>) -> Self {
        p.to_argument()
    }
}
