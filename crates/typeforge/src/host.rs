// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Host type system model.
//!
//! The synthesis engine treats "test a type for extensibility", "house a new
//! type", and "look up a constructor overload" as capabilities of its
//! environment. This module supplies that environment: opaque [`TypeHandle`]
//! references, builtin primitive types, caller-declared external types, and
//! the [`TypeSpace`] namespace that houses finalized types.

use crate::annotation::AnnotationSpec;
use crate::member::MemberSpec;
use crate::value::ValueKind;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// External visibility of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Top-level public type.
    Public,
    /// Public type nested inside a public type.
    NestedPublic,
    /// Not externally visible.
    Private,
}

#[derive(Debug)]
enum TypeDefKind {
    /// The default root type every synthesized type ultimately derives from.
    Root,
    /// Builtin primitive keyed by value kind.
    Builtin(ValueKind),
    /// Caller-declared external type (opaque to the engine).
    Declared,
    /// Type produced by the finalizer.
    Synthesized {
        members: Vec<MemberSpec>,
        annotations: Vec<AnnotationSpec>,
    },
}

#[derive(Debug)]
struct TypeDef {
    name: String,
    visibility: Visibility,
    sealed: bool,
    base: Option<TypeHandle>,
    /// Constructor overloads as ordered parameter type lists.
    constructors: Vec<Vec<TypeHandle>>,
    kind: TypeDefKind,
}

/// Opaque, cheaply clonable reference to a type in the host type system.
///
/// Builtin primitives compare structurally (two `primitive(ValueKind::Bool)`
/// handles are equal); declared and synthesized types compare by identity.
#[derive(Clone)]
pub struct TypeHandle(Arc<TypeDef>);

impl TypeHandle {
    /// The root object type: public, extensible, the default base.
    pub fn object() -> Self {
        Self(Arc::new(TypeDef {
            name: "Object".to_string(),
            visibility: Visibility::Public,
            sealed: false,
            base: None,
            constructors: vec![Vec::new()],
            kind: TypeDefKind::Root,
        }))
    }

    /// Builtin primitive type for a value kind. Sealed, like value types in
    /// most host runtimes, so it can never serve as a base.
    pub fn primitive(kind: ValueKind) -> Self {
        Self(Arc::new(TypeDef {
            name: kind.name().to_string(),
            visibility: Visibility::Public,
            sealed: true,
            base: None,
            constructors: Vec::new(),
            kind: TypeDefKind::Builtin(kind),
        }))
    }

    pub(crate) fn synthesize(
        name: String,
        base: TypeHandle,
        members: Vec<MemberSpec>,
        annotations: Vec<AnnotationSpec>,
    ) -> Self {
        Self(Arc::new(TypeDef {
            name,
            visibility: Visibility::Public,
            sealed: false,
            base: Some(base),
            constructors: vec![Vec::new()],
            kind: TypeDefKind::Synthesized {
                members,
                annotations,
            },
        }))
    }

    /// Simple name of the type.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// External visibility.
    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    /// Whether the type is sealed against derivation.
    pub fn is_sealed(&self) -> bool {
        self.0.sealed
    }

    /// A type can serve as a base when it is non-sealed and externally
    /// visible (public or publicly nested).
    pub fn is_extensible(&self) -> bool {
        !self.0.sealed
            && matches!(
                self.0.visibility,
                Visibility::Public | Visibility::NestedPublic
            )
    }

    /// Base type, if any. Builtins and the root have none.
    pub fn base(&self) -> Option<&TypeHandle> {
        self.0.base.as_ref()
    }

    /// Value kind when this is a builtin primitive.
    pub fn builtin_kind(&self) -> Option<ValueKind> {
        match self.0.kind {
            TypeDefKind::Builtin(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether this type was produced by the finalizer.
    pub fn is_synthesized(&self) -> bool {
        matches!(self.0.kind, TypeDefKind::Synthesized { .. })
    }

    /// Members declared directly on this type, in insertion order.
    /// Empty for non-synthesized types.
    pub fn members(&self) -> &[MemberSpec] {
        match &self.0.kind {
            TypeDefKind::Synthesized { members, .. } => members,
            _ => &[],
        }
    }

    /// Annotations attached to the type itself.
    pub fn annotations(&self) -> &[AnnotationSpec] {
        match &self.0.kind {
            TypeDefKind::Synthesized { annotations, .. } => annotations,
            _ => &[],
        }
    }

    /// Look up a member by name, walking the base chain.
    pub fn member(&self, name: &str) -> Option<&MemberSpec> {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(member) = ty.members().iter().find(|m| m.name() == name) {
                return Some(member);
            }
            current = ty.base();
        }
        None
    }

    /// All members visible on this type, base-first so derived declarations
    /// follow inherited ones.
    pub fn all_members(&self) -> Vec<&MemberSpec> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(ty) = current {
            chain.push(ty);
            current = ty.base();
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|ty| ty.members().iter())
            .collect()
    }

    /// Constructor overloads as ordered parameter type lists.
    pub fn constructors(&self) -> &[Vec<TypeHandle>] {
        &self.0.constructors
    }

    /// Find the constructor overload whose parameter types match the given
    /// argument kinds positionally. Fails closed: no match means `None`,
    /// never a best-effort guess.
    pub fn find_constructor(&self, arg_kinds: &[ValueKind]) -> Option<&[TypeHandle]> {
        self.0
            .constructors
            .iter()
            .find(|params| {
                params.len() == arg_kinds.len()
                    && params
                        .iter()
                        .zip(arg_kinds)
                        .all(|(param, kind)| param.builtin_kind() == Some(*kind))
            })
            .map(Vec::as_slice)
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (&self.0.kind, &other.0.kind) {
            (TypeDefKind::Root, TypeDefKind::Root) => true,
            (TypeDefKind::Builtin(a), TypeDefKind::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeHandle {}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name)
    }
}

/// Fluent declaration of an external host type.
///
/// Used by callers to describe types the engine did not create: base type
/// candidates with particular sealed/visibility attributes, and constructible
/// metadata-tag (annotation) types with their constructor overloads.
///
/// # Example
///
/// ```
/// use typeforge::{TypeDecl, TypeHandle, ValueKind, Visibility};
///
/// let author = TypeDecl::new("Author")
///     .constructor(vec![])
///     .constructor(vec![TypeHandle::primitive(ValueKind::Str)])
///     .build();
/// assert!(author.find_constructor(&[ValueKind::Str]).is_some());
///
/// let hidden = TypeDecl::new("Hidden").visibility(Visibility::Private).build();
/// assert!(!hidden.is_extensible());
/// ```
#[derive(Debug)]
pub struct TypeDecl {
    name: String,
    visibility: Visibility,
    sealed: bool,
    constructors: Vec<Vec<TypeHandle>>,
}

impl TypeDecl {
    /// Start a declaration. Public and unsealed by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            sealed: false,
            constructors: Vec::new(),
        }
    }

    /// Set external visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the type sealed against derivation.
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// Add a constructor overload with the given ordered parameter types.
    pub fn constructor(mut self, params: Vec<TypeHandle>) -> Self {
        self.constructors.push(params);
        self
    }

    /// Build the type handle.
    pub fn build(self) -> TypeHandle {
        TypeHandle(Arc::new(TypeDef {
            name: self.name,
            visibility: self.visibility,
            sealed: self.sealed,
            base: None,
            constructors: self.constructors,
            kind: TypeDefKind::Declared,
        }))
    }
}

static NEXT_SPACE_ID: AtomicU64 = AtomicU64::new(0);

/// Isolated namespace housing the types a single builder finalizes.
///
/// Allocated on first session initialization and exclusively owned by that
/// builder; released when the builder is discarded. Fetched type handles keep
/// their space alive independently of the builder.
#[derive(Debug)]
pub struct TypeSpace {
    name: String,
    registry: RwLock<HashMap<String, TypeHandle>>,
}

impl TypeSpace {
    pub(crate) fn allocate() -> Arc<Self> {
        let id = NEXT_SPACE_ID.fetch_add(1, Ordering::Relaxed);
        Arc::new(Self {
            name: format!("typespace.{}", id),
            registry: RwLock::new(HashMap::new()),
        })
    }

    /// Namespace identifier, unique per builder session lineage.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn register(&self, handle: TypeHandle) {
        self.registry
            .write()
            .insert(handle.name().to_string(), handle);
    }

    /// Look up a finalized type by simple name.
    pub fn lookup(&self, name: &str) -> Option<TypeHandle> {
        self.registry.read().get(name).cloned()
    }

    /// Number of finalized types housed here.
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    /// Returns `true` if no type has been finalized in this space.
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }
}
