// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Error types for the type synthesis engine.
//!
//! Every failure is a caller-input or caller-sequencing error surfaced
//! synchronously at the offending call. Nothing here is transient or
//! retryable.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtendError>;

/// Failure modes of the builder and finalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendError {
    /// Blank name, empty bulk collection, mismatched parallel lists, or a
    /// duplicate member name.
    InvalidArgument {
        /// What was wrong with the argument.
        context: String,
    },
    /// The base type is sealed or not externally visible.
    InvalidBaseType {
        /// Name of the rejected base type.
        name: String,
    },
    /// Mutation attempted after the type was finalized, without a reset.
    AlreadyFinalized {
        /// Name of the already-created type.
        name: String,
    },
    /// `fetch` called before any session existed.
    NotConstructed,
    /// No constructor on the annotation type matches the positional runtime
    /// types of the supplied arguments.
    AnnotationConstructorNotFound {
        /// Name of the annotation type.
        annotation: String,
        /// Rendered argument signature that failed to match.
        signature: String,
    },
}

impl ExtendError {
    /// Shorthand for [`ExtendError::InvalidArgument`].
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }
}

impl fmt::Display for ExtendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { context } => write!(f, "invalid argument: {}", context),
            Self::InvalidBaseType { name } => {
                write!(f, "{} is either sealed or not public", name)
            }
            Self::AlreadyFinalized { name } => write!(
                f,
                "the type {} has already been created; reset the extender or create a new instance",
                name
            ),
            Self::NotConstructed => write!(f, "type has not been created"),
            Self::AnnotationConstructorNotFound {
                annotation,
                signature,
            } => write!(
                f,
                "no constructor on {} matches argument types ({})",
                annotation, signature
            ),
        }
    }
}

impl std::error::Error for ExtendError {}
