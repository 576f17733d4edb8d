//! The shared parameter entity
//!
//! A [`Parameter`] is a reference-counted handle. Every typed facade, every
//! variable node and every clone of the handle points at the same record, so
//! a value or range set through one of them is seen by all of them.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{ParamError, Result};
use crate::expr::Expr;
use crate::types::{decode_immediate, ParamType, ScalarBytes, Type, SCALAR_SLOT_BYTES};
use crate::user_context::USER_CONTEXT_NAME;

/// Storage for the live value. The bytes sit at offset 0 with 8-byte
/// alignment, so a pointer to the slot is a valid pointer to any scalar.
#[repr(C, align(8))]
#[derive(Debug, Default)]
struct ScalarSlot {
    bytes: ScalarBytes,

    /// Set once `set_scalar` has written a value
    initialized: bool,
}

#[derive(Debug, Default)]
struct Bounds {
    default_value: Option<Expr>,
    min_value: Option<Expr>,
    max_value: Option<Expr>,
}

struct ParameterContents {
    name: String,
    is_explicit_name: bool,
    ty: Type,
    is_buffer: bool,
    dimensions: u8,
    scalar: RwLock<ScalarSlot>,
    bounds: RwLock<Bounds>,
}

/// A reference-counted scalar parameter.
///
/// Cloning the handle shares the record; the record itself is never copied.
#[derive(Clone)]
pub struct Parameter {
    contents: Arc<ParameterContents>,
}

impl Parameter {
    /// Create a parameter with empty storage, no bounds and no default.
    ///
    /// Fails with [`ParamError::ReservedName`] when an explicit name equals
    /// the user-context sentinel.
    pub fn new(
        ty: Type,
        is_buffer: bool,
        dimensions: u8,
        name: impl Into<String>,
        is_explicit_name: bool,
    ) -> Result<Self> {
        let name = name.into();
        if is_explicit_name && name == USER_CONTEXT_NAME {
            return Err(ParamError::ReservedName { name });
        }
        Ok(Self::build(ty, is_buffer, dimensions, name, is_explicit_name))
    }

    /// A scalar with a generated name; generated names never need the
    /// sentinel check.
    pub(crate) fn generated(ty: Type, name: String) -> Self {
        Self::build(ty, false, 0, name, false)
    }

    /// The user-context parameter is the one place the sentinel may be used.
    pub(crate) fn user_context() -> Self {
        Self::build(Type::handle(), false, 0, USER_CONTEXT_NAME.to_string(), true)
    }

    fn build(
        ty: Type,
        is_buffer: bool,
        dimensions: u8,
        name: String,
        is_explicit_name: bool,
    ) -> Self {
        trace!(%name, %ty, is_explicit_name, "creating parameter");
        Self {
            contents: Arc::new(ParameterContents {
                name,
                is_explicit_name,
                ty,
                is_buffer,
                dimensions,
                scalar: RwLock::new(ScalarSlot::default()),
                bounds: RwLock::new(Bounds::default()),
            }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Identity
    // ═══════════════════════════════════════════════════════════════════

    /// The parameter's name
    pub fn name(&self) -> &str {
        &self.contents.name
    }

    /// Whether the name was supplied by the caller rather than generated
    pub fn is_explicit_name(&self) -> bool {
        self.contents.is_explicit_name
    }

    /// The declared type, fixed at construction
    pub fn ty(&self) -> Type {
        self.contents.ty
    }

    /// Whether this parameter describes a buffer (always false for scalars)
    pub fn is_buffer(&self) -> bool {
        self.contents.is_buffer
    }

    /// Number of buffer dimensions (0 for scalars)
    pub fn dimensions(&self) -> u8 {
        self.contents.dimensions
    }

    /// Check if both handles refer to the same record
    pub fn same_as(&self, other: &Parameter) -> bool {
        Arc::ptr_eq(&self.contents, &other.contents)
    }

    /// Number of live handles on this record
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.contents)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scalar Value
    // ═══════════════════════════════════════════════════════════════════

    fn check_type<T: ParamType>(&self) -> Result<()> {
        let got = T::type_of();
        if got != self.ty() {
            return Err(ParamError::TypeMismatch {
                name: self.name().to_string(),
                expected: self.ty(),
                got,
            });
        }
        Ok(())
    }

    /// The current value as `T`.
    ///
    /// Before any value or default is set this is the all-zero value of `T`.
    pub fn scalar<T: ParamType>(&self) -> Result<T> {
        self.check_type::<T>()?;
        Ok(self.load_scalar())
    }

    /// Store a new value. Bounds are not checked here.
    pub fn set_scalar<T: ParamType>(&self, value: T) -> Result<()> {
        self.check_type::<T>()?;
        self.store_scalar(value);
        Ok(())
    }

    /// Read without the type check; callers guarantee `T` matches.
    pub(crate) fn load_scalar<T: ParamType>(&self) -> T {
        T::load(&self.contents.scalar.read().bytes)
    }

    /// Write without the type check; callers guarantee `T` matches.
    pub(crate) fn store_scalar<T: ParamType>(&self, value: T) {
        trace!(name = %self.name(), ?value, "setting parameter value");
        let mut slot = self.contents.scalar.write();
        slot.bytes = [0; SCALAR_SLOT_BYTES];
        value.store(&mut slot.bytes);
        slot.initialized = true;
    }

    /// Whether a value or a default has been supplied
    pub fn has_scalar_value(&self) -> bool {
        self.contents.scalar.read().initialized || self.default_value().is_some()
    }

    /// Raw pointer to the storage slot.
    ///
    /// Valid for as long as any handle on this parameter is alive. Reads and
    /// writes through it bypass the lock and must not race with `set_scalar`.
    pub fn scalar_address(&self) -> *mut u8 {
        self.contents.scalar.data_ptr().cast::<u8>()
    }

    /// The current value as an immediate of the declared type.
    ///
    /// `None` for declared types with no scalar encoding (vectors, odd widths).
    pub fn scalar_expr(&self) -> Option<Expr> {
        decode_immediate(self.ty(), &self.contents.scalar.read().bytes)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Default Value
    // ═══════════════════════════════════════════════════════════════════

    /// Set the value used while no value has been set.
    pub fn set_default<T: ParamType>(&self, value: T) -> Result<()> {
        self.check_type::<T>()?;
        self.store_default(value);
        Ok(())
    }

    pub(crate) fn store_default<T: ParamType>(&self, value: T) {
        trace!(name = %self.name(), ?value, "setting parameter default");
        self.contents.bounds.write().default_value = Some(value.to_expr());
        let mut slot = self.contents.scalar.write();
        if !slot.initialized {
            slot.bytes = [0; SCALAR_SLOT_BYTES];
            value.store(&mut slot.bytes);
        }
    }

    /// The default value, if one was set
    pub fn default_value(&self) -> Option<Expr> {
        self.contents.bounds.read().default_value.clone()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Range
    // ═══════════════════════════════════════════════════════════════════

    /// Wrap `bound` in a cast unless it already has the declared type.
    fn coerce(&self, bound: Expr) -> Expr {
        if bound.ty() == self.ty() {
            bound
        } else {
            debug!(
                name = %self.name(),
                from = %bound.ty(),
                to = %self.ty(),
                "coercing parameter bound"
            );
            Expr::cast(self.ty(), bound)
        }
    }

    /// Set the lower bound, cast to the declared type if needed.
    ///
    /// A bound that refers to this parameter itself keeps the record alive
    /// until the bound is cleared or replaced.
    pub fn set_min_value(&self, min: impl Into<Expr>) {
        let min = self.coerce(min.into());
        self.contents.bounds.write().min_value = Some(min);
    }

    /// Set the upper bound, cast to the declared type if needed.
    ///
    /// A bound that refers to this parameter itself keeps the record alive
    /// until the bound is cleared or replaced.
    pub fn set_max_value(&self, max: impl Into<Expr>) {
        let max = self.coerce(max.into());
        self.contents.bounds.write().max_value = Some(max);
    }

    /// Remove the lower bound
    pub fn clear_min_value(&self) {
        self.contents.bounds.write().min_value = None;
    }

    /// Remove the upper bound
    pub fn clear_max_value(&self) {
        self.contents.bounds.write().max_value = None;
    }

    /// The lower bound; `None` means unbounded
    pub fn min_value(&self) -> Option<Expr> {
        self.contents.bounds.read().min_value.clone()
    }

    /// The upper bound; `None` means unbounded
    pub fn max_value(&self) -> Option<Expr> {
        self.contents.bounds.read().max_value.clone()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name())
            .field("ty", &self.ty())
            .field("is_explicit_name", &self.is_explicit_name())
            .finish()
    }
}
