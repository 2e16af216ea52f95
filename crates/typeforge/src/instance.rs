// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Instances of finalized types.
//!
//! Once a type is fetched it behaves like any other type in the host system:
//! it can be instantiated and its members read and written with runtime type
//! checking. Property accessors are plain storage-backed: the getter returns
//! the backing slot verbatim, the setter assigns it verbatim, and a setter
//! exists only for writable members.

use crate::host::TypeHandle;
use crate::member::MemberSpec;
use crate::value::{Value, ValueKind};
use std::collections::HashMap;
use std::fmt;

/// Errors for instance member access.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The type has no member slots to instantiate.
    NotInstantiable(String),
    /// No member with the given name, on the type or its base chain.
    MemberNotFound(String),
    /// Write attempted on a read-only property.
    ReadOnlyMember(String),
    /// Value runtime type does not match the member's declared type.
    TypeMismatch {
        expected: String,
        got: String,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInstantiable(name) => {
                write!(f, "{} is not an instantiable synthesized type", name)
            }
            Self::MemberNotFound(name) => write!(f, "member not found: {}", name),
            Self::ReadOnlyMember(name) => write!(f, "member {} is read-only", name),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for InstanceError {}

/// An object of a finalized synthesized type.
#[derive(Debug, Clone)]
pub struct Instance {
    ty: TypeHandle,
    slots: HashMap<String, Value>,
}

impl Instance {
    /// Instantiate a finalized type with default member values.
    ///
    /// Members inherited from a synthesized base are included. Builtin-typed
    /// slots start at their zero-like default; slots of external types start
    /// null.
    pub fn new(ty: &TypeHandle) -> Result<Self, InstanceError> {
        if !ty.is_synthesized() {
            return Err(InstanceError::NotInstantiable(ty.name().to_string()));
        }
        let slots = ty
            .all_members()
            .iter()
            .map(|member| (member.name().to_string(), default_slot(member)))
            .collect();
        Ok(Self {
            ty: ty.clone(),
            slots,
        })
    }

    /// The instance's type.
    pub fn type_handle(&self) -> &TypeHandle {
        &self.ty
    }

    /// Simple name of the instance's type.
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Read a member slot. Getters have no side effects.
    pub fn get_value(&self, name: &str) -> Result<&Value, InstanceError> {
        self.slots
            .get(name)
            .ok_or_else(|| InstanceError::MemberNotFound(name.to_string()))
    }

    /// Read a member slot as a concrete Rust type.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, InstanceError> {
        T::from_value(self.get_value(name)?)
    }

    /// Write a member slot verbatim.
    ///
    /// Rejects unknown members, read-only properties, and values whose
    /// runtime type differs from the member's declared type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), InstanceError> {
        let member = self
            .ty
            .member(name)
            .ok_or_else(|| InstanceError::MemberNotFound(name.to_string()))?;
        if !member.is_writable() {
            return Err(InstanceError::ReadOnlyMember(name.to_string()));
        }

        let value = value.into();
        check_assignable(member, &value)?;
        self.slots.insert(name.to_string(), value);
        Ok(())
    }

    /// Iterate member slots. Order is unspecified; use the type's member
    /// list for declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn default_slot(member: &MemberSpec) -> Value {
    match member.value_type().builtin_kind() {
        Some(kind) => Value::default_for(kind),
        None => Value::Null,
    }
}

fn check_assignable(member: &MemberSpec, value: &Value) -> Result<(), InstanceError> {
    let declared = member.value_type();
    match (declared.builtin_kind(), value.kind()) {
        // Builtin slot: runtime kind must match the declared kind exactly.
        (Some(expected), Some(got)) if expected == got => Ok(()),
        // External-typed slot accepts only null at this level.
        (None, None) => Ok(()),
        (_, got) => Err(InstanceError::TypeMismatch {
            expected: declared.name().to_string(),
            got: got.map_or_else(|| "null".to_string(), |k| k.name().to_string()),
        }),
    }
}

/// Conversion out of a member slot.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, InstanceError>;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $kind:expr) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, InstanceError> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    other => Err(InstanceError::TypeMismatch {
                        expected: $kind.name().to_string(),
                        got: format!("{:?}", other),
                    }),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, ValueKind::Bool);
impl_from_value!(u8, U8, ValueKind::U8);
impl_from_value!(u16, U16, ValueKind::U16);
impl_from_value!(u32, U32, ValueKind::U32);
impl_from_value!(u64, U64, ValueKind::U64);
impl_from_value!(i8, I8, ValueKind::I8);
impl_from_value!(i16, I16, ValueKind::I16);
impl_from_value!(i32, I32, ValueKind::I32);
impl_from_value!(i64, I64, ValueKind::I64);
impl_from_value!(f32, F32, ValueKind::F32);
impl_from_value!(f64, F64, ValueKind::F64);
impl_from_value!(char, Char, ValueKind::Char);

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, InstanceError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(InstanceError::TypeMismatch {
                expected: ValueKind::Str.name().to_string(),
                got: format!("{:?}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extender::TypeExtender;
    use crate::value::ValueKind;

    fn sample_type() -> TypeHandle {
        let mut extender = TypeExtender::new("Sample").expect("construct");
        extender
            .add_property("IsAdded", TypeHandle::primitive(ValueKind::Bool), false)
            .expect("add");
        extender
            .add_property("IsEnabled", TypeHandle::primitive(ValueKind::Bool), true)
            .expect("add");
        extender
            .add_field("Label", TypeHandle::primitive(ValueKind::Str))
            .expect("add");
        extender.fetch().expect("fetch")
    }

    #[test]
    fn slots_start_at_defaults() {
        let instance = Instance::new(&sample_type()).expect("instantiate");
        assert_eq!(instance.get::<bool>("IsAdded").expect("get"), false);
        assert_eq!(instance.get::<bool>("IsEnabled").expect("get"), false);
        assert_eq!(instance.get::<String>("Label").expect("get"), "");
    }

    #[test]
    fn writable_property_round_trips() {
        let mut instance = Instance::new(&sample_type()).expect("instantiate");
        instance.set("IsAdded", true).expect("set");
        assert!(instance.get::<bool>("IsAdded").expect("get"));
    }

    #[test]
    fn read_only_property_rejects_writes_but_reads_fine() {
        let mut instance = Instance::new(&sample_type()).expect("instantiate");
        let err = instance.set("IsEnabled", true).expect_err("read-only");
        assert_eq!(err, InstanceError::ReadOnlyMember("IsEnabled".into()));
        assert!(!instance.get::<bool>("IsEnabled").expect("get"));
    }

    #[test]
    fn fields_are_always_mutable() {
        let mut instance = Instance::new(&sample_type()).expect("instantiate");
        instance.set("Label", "hello").expect("set field");
        assert_eq!(instance.get::<String>("Label").expect("get"), "hello");
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let mut instance = Instance::new(&sample_type()).expect("instantiate");
        let err = instance.set("IsAdded", 42u32).expect_err("bool slot");
        assert!(matches!(err, InstanceError::TypeMismatch { .. }));
    }

    #[test]
    fn unknown_member_is_rejected() {
        let mut instance = Instance::new(&sample_type()).expect("instantiate");
        assert_eq!(
            instance.set("Missing", true),
            Err(InstanceError::MemberNotFound("Missing".into()))
        );
        assert!(instance.get::<bool>("Missing").is_err());
    }

    #[test]
    fn primitives_are_not_instantiable() {
        let err = Instance::new(&TypeHandle::primitive(ValueKind::Bool))
            .expect_err("primitive instance");
        assert!(matches!(err, InstanceError::NotInstantiable(_)));
    }

    #[test]
    fn inherited_members_are_accessible() {
        let mut base_ext = TypeExtender::new("Base").expect("construct");
        base_ext
            .add_property("Count", TypeHandle::primitive(ValueKind::U32), false)
            .expect("add");
        let base = base_ext.fetch().expect("fetch base");

        let mut derived_ext = TypeExtender::with_base("Derived", base).expect("construct");
        derived_ext
            .add_field("Label", TypeHandle::primitive(ValueKind::Str))
            .expect("add");
        let derived = derived_ext.fetch().expect("fetch derived");

        let mut instance = Instance::new(&derived).expect("instantiate");
        instance.set("Count", 7u32).expect("inherited slot");
        instance.set("Label", "x").expect("own slot");
        assert_eq!(instance.get::<u32>("Count").expect("get"), 7);
    }
}
