//! Errors raised while registering converters or resolving adaptations

use std::collections::TryReserveError;
use thiserror::Error;

/// Boxed error produced by a converter, protocol adapter or conform method.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during adaptation.
#[derive(Debug, Error)]
pub enum AdaptError {
    #[error("adapter table allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("adapter registry lock poisoned")]
    Poisoned,

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("can't adapt {protocol} for {type_name}")]
    CannotAdapt {
        protocol: String,
        type_name: &'static str,
    },

    /// A collaborator's own failure, carried through untouched.
    #[error(transparent)]
    Callback(BoxError),
}

impl AdaptError {
    /// Wrap an arbitrary collaborator error.
    pub fn callback(err: impl Into<BoxError>) -> Self {
        Self::Callback(err.into())
    }

    /// True for the failure class that protocol and conform methods use to decline.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Borrow the collaborator error if this is a `Callback` of type `E`.
    pub fn downcast_callback<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Callback(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for adaptation operations
pub type AdaptResult<T> = Result<T, AdaptError>;
