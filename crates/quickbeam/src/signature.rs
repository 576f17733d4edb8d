//! Ordered formal-argument lists for ahead-of-time compilation

use indexmap::IndexMap;
use tracing::debug;

use crate::argument::{Argument, ArgumentKind};
use crate::error::{ParamError, Result};
use crate::options::SignatureOptions;
use crate::types::Type;
use crate::user_context::USER_CONTEXT_NAME;

/// The argument list of a compiled pipeline, in declaration order.
///
/// # Example
///
/// ```
/// use quickbeam::{Param, Signature, SignatureOptions};
///
/// let width = Param::<i32>::named("width").unwrap();
/// let gain = Param::<f32>::named("gain").unwrap();
///
/// let sig = Signature::build(
///     SignatureOptions::with_user_context(),
///     [width.to_argument(), gain.to_argument()],
/// )
/// .unwrap();
///
/// assert_eq!(sig.names().collect::<Vec<_>>(), ["__user_context", "width", "gain"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    args: IndexMap<String, Argument>,
}

impl Signature {
    /// Create a signature shaped by `options`.
    pub fn new(options: &SignatureOptions) -> Self {
        let mut args = IndexMap::new();
        if options.user_context {
            args.insert(
                USER_CONTEXT_NAME.to_string(),
                Argument::new(
                    USER_CONTEXT_NAME,
                    ArgumentKind::InputScalar,
                    Type::handle(),
                    0,
                ),
            );
        }
        Self { args }
    }

    /// Create a signature and push every argument in order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(
        options: SignatureOptions,
        args: impl IntoIterator<Item = Argument>,
    ) -> Result<Self> {
        let mut sig = Self::new(&options);
        for arg in args {
            sig.push(arg)?;
        }
        debug!(count = sig.len(), "built signature");
        Ok(sig)
    }

    /// Append an argument.
    ///
    /// Fails if the name is already taken or is the reserved user-context
    /// name.
    pub fn push(&mut self, arg: Argument) -> Result<()> {
        if arg.name == USER_CONTEXT_NAME {
            return Err(ParamError::ReservedName { name: arg.name });
        }
        if self.args.contains_key(&arg.name) {
            return Err(ParamError::DuplicateArgument { name: arg.name });
        }
        self.args.insert(arg.name.clone(), arg);
        Ok(())
    }

    /// Look up an argument by name
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.args.get(name)
    }

    /// Whether the signature starts with the user-context argument
    pub fn has_user_context(&self) -> bool {
        self.args.contains_key(USER_CONTEXT_NAME)
    }

    /// Arguments in order
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.values()
    }

    /// Argument names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a Argument;
    type IntoIter = indexmap::map::Values<'a, String, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.values()
    }
}
