// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Metadata annotations for types and members.
//!
//! An annotation pairs a constructible metadata-tag type with an ordered list
//! of constructor arguments. The constructor overload is resolved once, at
//! registration time, by matching argument runtime kinds to parameter types
//! positionally.

use crate::error::{ExtendError, Result};
use crate::host::TypeHandle;
use crate::value::{Value, ValueKind};

/// A resolved annotation: metadata-tag type plus the exact constructor
/// argument values it was registered with.
#[derive(Debug, Clone)]
pub struct AnnotationSpec {
    annotation_type: TypeHandle,
    args: Vec<Value>,
}

impl AnnotationSpec {
    /// Resolve the annotation type's constructor against the supplied
    /// arguments and produce the annotation.
    ///
    /// Resolution matches argument runtime kinds to constructor parameter
    /// types in order; no other overload resolution rule applies. A missing
    /// match fails with [`ExtendError::AnnotationConstructorNotFound`].
    pub fn resolve(annotation_type: TypeHandle, args: Vec<Value>) -> Result<Self> {
        let kinds = arg_kinds(&annotation_type, &args)?;
        if annotation_type.find_constructor(&kinds).is_none() {
            return Err(constructor_not_found(&annotation_type, &kinds));
        }
        Ok(Self {
            annotation_type,
            args,
        })
    }

    /// The metadata-tag type.
    pub fn annotation_type(&self) -> &TypeHandle {
        &self.annotation_type
    }

    /// The exact constructor argument values, in order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Parameter types of the constructor overload this annotation resolved
    /// to.
    pub fn constructor_params(&self) -> &[TypeHandle] {
        // Resolution succeeded in `resolve`, and both the type and the args
        // are immutable afterwards.
        let kinds: Vec<ValueKind> = self.args.iter().filter_map(Value::kind).collect();
        self.annotation_type
            .find_constructor(&kinds)
            .unwrap_or(&[])
    }
}

fn arg_kinds(annotation_type: &TypeHandle, args: &[Value]) -> Result<Vec<ValueKind>> {
    args.iter()
        .map(|arg| {
            arg.kind()
                .ok_or_else(|| constructor_not_found_null(annotation_type))
        })
        .collect()
}

fn constructor_not_found(annotation_type: &TypeHandle, kinds: &[ValueKind]) -> ExtendError {
    ExtendError::AnnotationConstructorNotFound {
        annotation: annotation_type.name().to_string(),
        signature: kinds
            .iter()
            .map(|k| k.name().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn constructor_not_found_null(annotation_type: &TypeHandle) -> ExtendError {
    ExtendError::AnnotationConstructorNotFound {
        annotation: annotation_type.name().to_string(),
        signature: "null".to_string(),
    }
}
