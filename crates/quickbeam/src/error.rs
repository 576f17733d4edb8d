//! Error types for parameter declaration and signature building

use thiserror::Error;

use crate::types::Type;

/// Main error type for Quickbeam operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// An explicit name collides with the reserved user-context sentinel
    #[error(
        "Param(\"{name}\") is reserved for the user context and cannot name a parameter. \
         Use user_context_value() when building a pipeline, or \
         SignatureOptions::with_user_context() when compiling ahead of time."
    )]
    ReservedName {
        /// The rejected name
        name: String,
    },

    /// Typed access to a parameter whose declared type differs
    #[error("Type error: parameter `{name}` is declared {expected}, accessed as {got}")]
    TypeMismatch {
        /// Parameter name
        name: String,
        /// Declared type of the parameter
        expected: Type,
        /// Type the caller asked for
        got: Type,
    },

    /// Two arguments with the same name in one signature
    #[error("Duplicate argument `{name}` in signature")]
    DuplicateArgument {
        /// The repeated name
        name: String,
    },
}

/// Result type alias for Quickbeam operations
pub type Result<T> = std::result::Result<T, ParamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_name_message_points_at_alternatives() {
        let err = ParamError::ReservedName {
            name: "__user_context".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("__user_context"));
        assert!(msg.contains("user_context_value()"));
        assert!(msg.contains("with_user_context()"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ParamError::TypeMismatch {
            name: "gain".to_string(),
            expected: Type::float(32),
            got: Type::int(32),
        };
        assert_eq!(
            err.to_string(),
            "Type error: parameter `gain` is declared float32, accessed as int32"
        );
    }
}
