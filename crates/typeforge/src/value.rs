// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! Runtime value model.
//!
//! [`Value`] carries annotation constructor arguments and the member slots of
//! instantiated types. [`ValueKind`] is the runtime type tag used for
//! positional constructor matching.

use std::fmt;

/// Runtime type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Str,
}

impl ValueKind {
    /// Canonical type name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    /// Unset slot (member whose type has no default value).
    Null,
}

impl Value {
    /// Runtime type of this value. `None` for [`Value::Null`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::U8(_) => Some(ValueKind::U8),
            Self::U16(_) => Some(ValueKind::U16),
            Self::U32(_) => Some(ValueKind::U32),
            Self::U64(_) => Some(ValueKind::U64),
            Self::I8(_) => Some(ValueKind::I8),
            Self::I16(_) => Some(ValueKind::I16),
            Self::I32(_) => Some(ValueKind::I32),
            Self::I64(_) => Some(ValueKind::I64),
            Self::F32(_) => Some(ValueKind::F32),
            Self::F64(_) => Some(ValueKind::F64),
            Self::Char(_) => Some(ValueKind::Char),
            Self::String(_) => Some(ValueKind::Str),
            Self::Null => None,
        }
    }

    /// Default value for a kind (zero, empty, `'\0'`).
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => Self::Bool(false),
            ValueKind::U8 => Self::U8(0),
            ValueKind::U16 => Self::U16(0),
            ValueKind::U32 => Self::U32(0),
            ValueKind::U64 => Self::U64(0),
            ValueKind::I8 => Self::I8(0),
            ValueKind::I16 => Self::I16(0),
            ValueKind::I32 => Self::I32(0),
            ValueKind::I64 => Self::I64(0),
            ValueKind::F32 => Self::F32(0.0),
            ValueKind::F64 => Self::F64(0.0),
            ValueKind::Char => Self::Char('\0'),
            ValueKind::Str => Self::String(String::new()),
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_source {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_value_source!(bool, Bool);
impl_from_value_source!(u8, U8);
impl_from_value_source!(u16, U16);
impl_from_value_source!(u32, U32);
impl_from_value_source!(u64, U64);
impl_from_value_source!(i8, I8);
impl_from_value_source!(i16, I16);
impl_from_value_source!(i32, I32);
impl_from_value_source!(i64, I64);
impl_from_value_source!(f32, F32);
impl_from_value_source!(f64, F64);
impl_from_value_source!(char, Char);
impl_from_value_source!(String, String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
