//! Options for building compiled-pipeline signatures

/// Configuration for [`Signature`](crate::Signature) building.
///
/// Mirrors the target features a compiled pipeline is generated with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureOptions {
    /// Prepend an opaque `__user_context` handle argument
    pub user_context: bool,
}

impl SignatureOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a pipeline that takes an explicit user context.
    pub fn with_user_context() -> Self {
        Self {
            user_context: true,
        }
    }
}
