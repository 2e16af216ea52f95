// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! The type synthesis builder.
//!
//! [`TypeExtender`] accumulates field, property, and annotation declarations
//! against a chosen base type, then finalizes them into a usable
//! [`TypeHandle`] exactly once. Mutators lazily initialize the underlying
//! construction session; `fetch` finalizes it; `reset` discards it so a new
//! session with the same name and base can begin.

use crate::annotation::AnnotationSpec;
use crate::error::{ExtendError, Result};
use crate::host::{TypeHandle, TypeSpace};
use crate::member::MemberSpec;
use crate::value::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Annotation request: metadata-tag type plus ordered constructor arguments.
pub type AnnotationArgs = (TypeHandle, Vec<Value>);

/// Builder that extends an existing type at runtime.
///
/// Each instance owns exclusive, unshared state. Operations are synchronous
/// and run to completion on the caller's thread; share an extender across
/// threads only with external serialization.
///
/// # Example
///
/// ```
/// use typeforge::{TypeExtender, TypeHandle, ValueKind};
///
/// # fn main() -> typeforge::Result<()> {
/// let mut extender = TypeExtender::new("Class A")?;
/// assert_eq!(extender.type_name(), "Class_A");
///
/// extender.add_property("IsAdded", TypeHandle::primitive(ValueKind::Bool), false)?;
/// extender.add_property("IsEnabled", TypeHandle::primitive(ValueKind::Bool), true)?;
///
/// let ty = extender.fetch()?;
/// assert_eq!(ty.name(), "Class_A");
/// assert!(ty.member("IsEnabled").is_some_and(|m| m.is_read_only()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TypeExtender {
    type_name: String,
    base_type: TypeHandle,
    session: Option<Session>,
}

#[derive(Debug)]
struct Session {
    space: Arc<TypeSpace>,
    members: Vec<MemberSpec>,
    type_annotations: Vec<AnnotationSpec>,
    finalized: Option<TypeHandle>,
}

impl Session {
    fn new(space: Arc<TypeSpace>) -> Self {
        Self {
            space,
            members: Vec::new(),
            type_annotations: Vec::new(),
            finalized: None,
        }
    }

    fn require_unique(&self, name: &str) -> Result<()> {
        if self.members.iter().any(|m| m.name() == name) {
            return Err(ExtendError::invalid_argument(format!(
                "duplicate member name: {}",
                name
            )));
        }
        Ok(())
    }

    fn register(&mut self, member: MemberSpec) -> Result<()> {
        self.require_unique(member.name())?;
        self.members.push(member);
        Ok(())
    }
}

impl TypeExtender {
    /// Create an extender deriving from the default root object type.
    ///
    /// The name is normalized: every space becomes an underscore. A blank
    /// name fails with [`ExtendError::InvalidArgument`].
    pub fn new(name: &str) -> Result<Self> {
        Self::with_base(name, TypeHandle::object())
    }

    /// Create an extender deriving from an explicit base type.
    ///
    /// The base must be non-sealed and externally visible; otherwise the
    /// constructor fails with [`ExtendError::InvalidBaseType`] and no
    /// partial builder escapes.
    pub fn with_base(name: &str, base_type: TypeHandle) -> Result<Self> {
        require_name(name, "type name")?;
        check_base(&base_type)?;
        Ok(Self {
            type_name: normalize(name),
            base_type,
            session: None,
        })
    }

    /// Normalized name of the type under construction.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Base type supplied at construction.
    pub fn base_type(&self) -> &TypeHandle {
        &self.base_type
    }

    /// The namespace housing this builder's finalized types, if a session
    /// has been initialized.
    pub fn type_space(&self) -> Option<&Arc<TypeSpace>> {
        self.session.as_ref().map(|s| &s.space)
    }

    /// Register a read-write or read-only property.
    ///
    /// A getter is always generated; a setter only when `read_only` is
    /// false. The accessors are plain storage-backed, no validation or
    /// coercion.
    pub fn add_property(
        &mut self,
        name: &str,
        value_type: TypeHandle,
        read_only: bool,
    ) -> Result<()> {
        require_name(name, "property name")?;
        let session = self.ensure_session()?;
        session.register(MemberSpec::property(name, value_type, read_only))
    }

    /// Register a property with annotations attached to the property
    /// descriptor (not its backing field).
    ///
    /// Every annotation constructor is resolved before the member registers;
    /// a resolution failure leaves the member set unchanged.
    pub fn add_property_with_annotations(
        &mut self,
        name: &str,
        value_type: TypeHandle,
        annotations: &[AnnotationArgs],
        read_only: bool,
    ) -> Result<()> {
        require_name(name, "property name")?;
        let session = self.ensure_session()?;
        let resolved = resolve_all(annotations)?;
        session.register(MemberSpec::property(name, value_type, read_only).with_annotations(resolved))
    }

    /// Register a collection of read-write properties sharing one value
    /// type. Each name is independently normalized.
    pub fn add_properties(&mut self, names: &[&str], value_type: TypeHandle) -> Result<()> {
        if names.is_empty() {
            return Err(ExtendError::invalid_argument(
                "property names can not be empty",
            ));
        }
        let normalized = normalize_batch(names)?;
        let session = self.ensure_session()?;
        precheck_batch(session, &normalized)?;
        for name in normalized {
            session.members.push(MemberSpec::property(name, value_type.clone(), false));
        }
        Ok(())
    }

    /// Register properties from parallel name/type lists.
    ///
    /// Both lists must be non-empty and of equal length; the check runs
    /// before any member registers, so a mismatch never leaves partial
    /// state.
    pub fn add_properties_typed(
        &mut self,
        names: &[&str],
        types: &[TypeHandle],
        all_read_only: bool,
    ) -> Result<()> {
        if names.is_empty() || types.is_empty() {
            return Err(ExtendError::invalid_argument(
                "property names or types can not be empty",
            ));
        }
        if names.len() != types.len() {
            return Err(ExtendError::invalid_argument(
                "property count must equal type count to avoid type mismatch",
            ));
        }
        let normalized = normalize_batch(names)?;
        let session = self.ensure_session()?;
        precheck_batch(session, &normalized)?;
        for (name, ty) in normalized.into_iter().zip(types) {
            session
                .members
                .push(MemberSpec::property(name, ty.clone(), all_read_only));
        }
        Ok(())
    }

    /// Register a plain public field.
    pub fn add_field(&mut self, name: &str, value_type: TypeHandle) -> Result<()> {
        require_name(name, "field name")?;
        let session = self.ensure_session()?;
        session.register(MemberSpec::field(name, value_type))
    }

    /// Register a field carrying a single annotation.
    pub fn add_field_annotated(
        &mut self,
        name: &str,
        value_type: TypeHandle,
        annotation_type: TypeHandle,
        args: Vec<Value>,
    ) -> Result<()> {
        require_name(name, "field name")?;
        let session = self.ensure_session()?;
        let annotation = AnnotationSpec::resolve(annotation_type, args)?;
        session.register(MemberSpec::field(name, value_type).with_annotations(vec![annotation]))
    }

    /// Register a field carrying several annotations.
    ///
    /// All annotation constructors are resolved before the field registers;
    /// if any fails, no field or annotation state is attached.
    pub fn add_field_with_annotations(
        &mut self,
        name: &str,
        value_type: TypeHandle,
        annotations: &[AnnotationArgs],
    ) -> Result<()> {
        require_name(name, "field name")?;
        let session = self.ensure_session()?;
        let resolved = resolve_all(annotations)?;
        session.register(MemberSpec::field(name, value_type).with_annotations(resolved))
    }

    /// Attach an annotation to the type itself rather than a member.
    pub fn add_type_annotation(
        &mut self,
        annotation_type: TypeHandle,
        args: Vec<Value>,
    ) -> Result<()> {
        let session = self.ensure_session()?;
        let annotation = AnnotationSpec::resolve(annotation_type, args)?;
        session.type_annotations.push(annotation);
        Ok(())
    }

    /// Finalize the accumulated declarations into a usable type.
    ///
    /// Fails with [`ExtendError::NotConstructed`] when no session was ever
    /// initialized. Finalizes exactly once; repeated calls return the same
    /// handle. Subsequent mutation fails with
    /// [`ExtendError::AlreadyFinalized`] until [`TypeExtender::reset`].
    pub fn fetch(&mut self) -> Result<TypeHandle> {
        let session = self.session.as_mut().ok_or(ExtendError::NotConstructed)?;
        if let Some(ty) = &session.finalized {
            return Ok(ty.clone());
        }

        let ty = TypeHandle::synthesize(
            self.type_name.clone(),
            self.base_type.clone(),
            session.members.clone(),
            session.type_annotations.clone(),
        );
        session.space.register(ty.clone());
        session.finalized = Some(ty.clone());
        log::debug!(
            "[TypeExtender::fetch] finalized {} with {} members in {}",
            self.type_name,
            session.members.len(),
            session.space.name()
        );
        Ok(ty)
    }

    /// Discard the current session, finalized or not, so a fresh one with
    /// the same name and base can begin. Previously fetched handles stay
    /// valid.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            log::debug!("[TypeExtender::reset] discarded session for {}", self.type_name);
        }
    }

    fn ensure_session(&mut self) -> Result<&mut Session> {
        if matches!(&self.session, Some(s) if s.finalized.is_some()) {
            return Err(ExtendError::AlreadyFinalized {
                name: self.type_name.clone(),
            });
        }
        let type_name = &self.type_name;
        Ok(self.session.get_or_insert_with(|| {
            let space = TypeSpace::allocate();
            log::debug!(
                "[TypeExtender::ensure_session] allocated {} for type {}",
                space.name(),
                type_name
            );
            Session::new(space)
        }))
    }
}

fn normalize(name: &str) -> String {
    name.replace(' ', "_")
}

fn check_base(base_type: &TypeHandle) -> Result<()> {
    if !base_type.is_extensible() {
        return Err(ExtendError::InvalidBaseType {
            name: base_type.name().to_string(),
        });
    }
    Ok(())
}

fn require_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ExtendError::invalid_argument(format!(
            "{} can not be blank",
            what
        )));
    }
    Ok(())
}

fn normalize_batch(names: &[&str]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| {
            require_name(name, "property name")?;
            Ok(normalize(name))
        })
        .collect()
}

/// Check a bulk batch for duplicates, within itself and against already
/// registered members, before anything is pushed.
fn precheck_batch(session: &Session, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        session.require_unique(name)?;
        if !seen.insert(name.as_str()) {
            return Err(ExtendError::invalid_argument(format!(
                "duplicate member name: {}",
                name
            )));
        }
    }
    Ok(())
}

fn resolve_all(annotations: &[AnnotationArgs]) -> Result<Vec<AnnotationSpec>> {
    annotations
        .iter()
        .map(|(ty, args)| AnnotationSpec::resolve(ty.clone(), args.clone()))
        .collect()
}
