// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Member declarations: fields and properties.

use crate::annotation::AnnotationSpec;
use crate::host::TypeHandle;

/// Kind of member declared on a synthesized type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Plain public field, always mutable.
    Field,
    /// Value slot exposed through get/set access, backed by a private field.
    Property,
}

/// One field or property declaration.
#[derive(Debug, Clone)]
pub struct MemberSpec {
    kind: MemberKind,
    name: String,
    value_type: TypeHandle,
    read_only: bool,
    annotations: Vec<AnnotationSpec>,
}

impl MemberSpec {
    /// Declare a field.
    pub fn field(name: impl Into<String>, value_type: TypeHandle) -> Self {
        Self {
            kind: MemberKind::Field,
            name: name.into(),
            value_type,
            read_only: false,
            annotations: Vec::new(),
        }
    }

    /// Declare a property. A getter is always generated; a setter only when
    /// `read_only` is false.
    pub fn property(name: impl Into<String>, value_type: TypeHandle, read_only: bool) -> Self {
        Self {
            kind: MemberKind::Property,
            name: name.into(),
            value_type,
            read_only,
            annotations: Vec::new(),
        }
    }

    /// Attach annotations to this member.
    pub fn with_annotations(mut self, annotations: Vec<AnnotationSpec>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &TypeHandle {
        &self.value_type
    }

    /// Whether write access is rejected. Always `false` for fields.
    pub fn is_read_only(&self) -> bool {
        self.kind == MemberKind::Property && self.read_only
    }

    /// Whether the member accepts writes.
    pub fn is_writable(&self) -> bool {
        !self.is_read_only()
    }

    /// Annotations attached to this member.
    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    /// Name of the private backing field synthesized for a property.
    pub fn backing_field(&self) -> Option<String> {
        match self.kind {
            MemberKind::Property => Some(format!("_{}", self.name)),
            MemberKind::Field => None,
        }
    }
}
