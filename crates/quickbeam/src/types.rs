//! Type descriptors and the Rust-type → descriptor mapping
//!
//! [`Type`] is the pipeline-level type of a scalar (`int32`, `float64`,
//! `handle`, ...). [`ParamType`] ties a Rust value type to its descriptor and
//! knows how to move that value in and out of a parameter's storage slot.

use std::fmt;

use crate::expr::Expr;

/// Size in bytes of a parameter's scalar storage slot.
///
/// Large enough for every [`ParamType`]: 64-bit numbers and pointers.
pub const SCALAR_SLOT_BYTES: usize = 8;

/// Raw storage for one scalar, in native byte order starting at offset 0.
pub type ScalarBytes = [u8; SCALAR_SLOT_BYTES];

/// The numeric family of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// Signed two's-complement integer
    Int,
    /// Unsigned integer (`bits == 1` is a boolean)
    UInt,
    /// IEEE floating point
    Float,
    /// Opaque pointer
    Handle,
}

/// A scalar or vector type as seen by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type {
    /// Numeric family
    pub code: TypeCode,

    /// Bit width of one lane
    pub bits: u8,

    /// Number of vector lanes (1 for scalars)
    pub lanes: u16,
}

impl Type {
    /// Create a type from its parts.
    pub const fn new(code: TypeCode, bits: u8, lanes: u16) -> Self {
        Self { code, bits, lanes }
    }

    /// Signed integer scalar of the given width
    pub const fn int(bits: u8) -> Self {
        Self::new(TypeCode::Int, bits, 1)
    }

    /// Unsigned integer scalar of the given width
    pub const fn uint(bits: u8) -> Self {
        Self::new(TypeCode::UInt, bits, 1)
    }

    /// Floating point scalar of the given width
    pub const fn float(bits: u8) -> Self {
        Self::new(TypeCode::Float, bits, 1)
    }

    /// Boolean scalar (`uint1`)
    pub const fn bool() -> Self {
        Self::uint(1)
    }

    /// Opaque 64-bit pointer
    pub const fn handle() -> Self {
        Self::new(TypeCode::Handle, 64, 1)
    }

    /// Same element type with a different lane count
    pub const fn with_lanes(self, lanes: u16) -> Self {
        Self::new(self.code, self.bits, lanes)
    }

    /// Check if this is a signed integer type
    pub fn is_int(&self) -> bool {
        self.code == TypeCode::Int
    }

    /// Check if this is an unsigned integer type (including bool)
    pub fn is_uint(&self) -> bool {
        self.code == TypeCode::UInt
    }

    /// Check if this is a floating point type
    pub fn is_float(&self) -> bool {
        self.code == TypeCode::Float
    }

    /// Check if this is the boolean type
    pub fn is_bool(&self) -> bool {
        self.code == TypeCode::UInt && self.bits == 1
    }

    /// Check if this is an opaque handle
    pub fn is_handle(&self) -> bool {
        self.code == TypeCode::Handle
    }

    /// Check if this is a single-lane type
    pub fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    /// Bytes needed to hold one lane (booleans take a full byte)
    pub fn bytes(&self) -> usize {
        (self.bits as usize).div_ceil(8)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            TypeCode::Int => write!(f, "int{}", self.bits)?,
            TypeCode::UInt if self.bits == 1 => write!(f, "bool")?,
            TypeCode::UInt => write!(f, "uint{}", self.bits)?,
            TypeCode::Float => write!(f, "float{}", self.bits)?,
            TypeCode::Handle => write!(f, "handle")?,
        }
        if self.lanes > 1 {
            write!(f, "x{}", self.lanes)?;
        }
        Ok(())
    }
}

/// A Rust value type that can back a parameter.
///
/// Implementations exist for `bool`, the fixed-width integers, `f32`, `f64`
/// and raw pointers (as opaque handles).
pub trait ParamType: Copy + fmt::Debug + 'static {
    /// The pipeline type this Rust type maps to.
    fn type_of() -> Type;

    /// Write `self` at the start of `slot`.
    fn store(self, slot: &mut ScalarBytes);

    /// Read a value previously written by [`ParamType::store`].
    fn load(slot: &ScalarBytes) -> Self;

    /// An immediate expression holding `self`.
    fn to_expr(self) -> Expr;
}

/// Marker for plain numeric scalars (everything except pointer handles).
///
/// Only these may build a parameter from a bare initial value.
pub trait PlainScalar: ParamType {}

/// Shorthand for `T::type_of()`.
pub fn type_of<T: ParamType>() -> Type {
    T::type_of()
}

macro_rules! impl_numeric_param {
    ($($t:ty => $ty:expr, $imm:ident as $wide:ty;)*) => {$(
        impl ParamType for $t {
            fn type_of() -> Type {
                $ty
            }

            fn store(self, slot: &mut ScalarBytes) {
                let bytes = self.to_ne_bytes();
                slot[..bytes.len()].copy_from_slice(&bytes);
            }

            fn load(slot: &ScalarBytes) -> Self {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(&slot[..std::mem::size_of::<$t>()]);
                <$t>::from_ne_bytes(bytes)
            }

            fn to_expr(self) -> Expr {
                Expr::$imm(Self::type_of(), <$wide>::from(self))
            }
        }

        impl PlainScalar for $t {}
    )*};
}

impl_numeric_param! {
    i8 => Type::int(8), int_imm as i64;
    i16 => Type::int(16), int_imm as i64;
    i32 => Type::int(32), int_imm as i64;
    i64 => Type::int(64), int_imm as i64;
    u8 => Type::uint(8), uint_imm as u64;
    u16 => Type::uint(16), uint_imm as u64;
    u32 => Type::uint(32), uint_imm as u64;
    u64 => Type::uint(64), uint_imm as u64;
    f32 => Type::float(32), float_imm as f64;
    f64 => Type::float(64), float_imm as f64;
}

impl ParamType for bool {
    fn type_of() -> Type {
        Type::bool()
    }

    fn store(self, slot: &mut ScalarBytes) {
        slot[0] = self as u8;
    }

    fn load(slot: &ScalarBytes) -> Self {
        slot[0] != 0
    }

    fn to_expr(self) -> Expr {
        Expr::uint_imm(Type::bool(), self as u64)
    }
}

impl PlainScalar for bool {}

fn store_address(addr: usize, slot: &mut ScalarBytes) {
    let bytes = addr.to_ne_bytes();
    slot[..bytes.len()].copy_from_slice(&bytes);
}

fn load_address(slot: &ScalarBytes) -> usize {
    let mut bytes = [0u8; std::mem::size_of::<usize>()];
    bytes.copy_from_slice(&slot[..std::mem::size_of::<usize>()]);
    usize::from_ne_bytes(bytes)
}

impl<U: 'static> ParamType for *const U {
    fn type_of() -> Type {
        Type::handle()
    }

    fn store(self, slot: &mut ScalarBytes) {
        store_address(self as usize, slot);
    }

    fn load(slot: &ScalarBytes) -> Self {
        load_address(slot) as *const U
    }

    fn to_expr(self) -> Expr {
        Expr::uint_imm(Type::handle(), self as usize as u64)
    }
}

impl<U: 'static> ParamType for *mut U {
    fn type_of() -> Type {
        Type::handle()
    }

    fn store(self, slot: &mut ScalarBytes) {
        store_address(self as usize, slot);
    }

    fn load(slot: &ScalarBytes) -> Self {
        load_address(slot) as *mut U
    }

    fn to_expr(self) -> Expr {
        Expr::uint_imm(Type::handle(), self as usize as u64)
    }
}

/// Decode the value in `slot` as an immediate of type `ty`.
///
/// Returns `None` for types no [`ParamType`] maps to (vectors, odd widths).
pub(crate) fn decode_immediate(ty: Type, slot: &ScalarBytes) -> Option<Expr> {
    if !ty.is_scalar() {
        return None;
    }
    let expr = match (ty.code, ty.bits) {
        (TypeCode::Int, 8) => i8::load(slot).to_expr(),
        (TypeCode::Int, 16) => i16::load(slot).to_expr(),
        (TypeCode::Int, 32) => i32::load(slot).to_expr(),
        (TypeCode::Int, 64) => i64::load(slot).to_expr(),
        (TypeCode::UInt, 1) => bool::load(slot).to_expr(),
        (TypeCode::UInt, 8) => u8::load(slot).to_expr(),
        (TypeCode::UInt, 16) => u16::load(slot).to_expr(),
        (TypeCode::UInt, 32) => u32::load(slot).to_expr(),
        (TypeCode::UInt, 64) => u64::load(slot).to_expr(),
        (TypeCode::Float, 32) => f32::load(slot).to_expr(),
        (TypeCode::Float, 64) => f64::load(slot).to_expr(),
        (TypeCode::Handle, _) => Expr::uint_imm(ty, load_address(slot) as u64),
        _ => return None,
    };
    Some(expr)
}
