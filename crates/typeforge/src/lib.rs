// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! # typeforge - Runtime type synthesis
//!
//! Synthesize a new named structural type at runtime: pick a base type,
//! incrementally attach fields, properties, and metadata annotations, then
//! finalize the definition into a usable type that can be instantiated and
//! introspected like any other type in the host system.
//!
//! ## Quick Start
//!
//! ```rust
//! use typeforge::{Instance, TypeExtender, TypeHandle, ValueKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut extender = TypeExtender::new("Class A")?;
//!     extender.add_property("IsAdded", TypeHandle::primitive(ValueKind::Bool), false)?;
//!     extender.add_property("IsEnabled", TypeHandle::primitive(ValueKind::Bool), true)?;
//!
//!     let ty = extender.fetch()?;
//!     assert_eq!(ty.name(), "Class_A");
//!
//!     let mut obj = Instance::new(&ty)?;
//!     obj.set("IsAdded", true)?;
//!     assert!(obj.get::<bool>("IsAdded")?);
//!     assert!(obj.set("IsEnabled", true).is_err()); // read-only
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeExtender`] | Builder that accumulates member declarations and finalizes them once |
//! | [`TypeHandle`] | Opaque reference to a type in the host type system |
//! | [`TypeDecl`] | Declaration of an external host type (bases, annotation tags) |
//! | [`Instance`] | Object of a finalized type with checked member access |
//! | [`Value`] | Runtime value for annotation arguments and member slots |
//!
//! ## Lifecycle
//!
//! Construct, mutate with any sequence of `add_*` calls (each lazily starts
//! the construction session), finalize exactly once with
//! [`TypeExtender::fetch`], and optionally [`TypeExtender::reset`] to begin a
//! fresh session under the same name and base. Fetched handles outlive the
//! builder that produced them.

/// Metadata annotations attachable to types and members.
pub mod annotation;
/// Error taxonomy of the synthesis engine.
pub mod error;
/// The builder: construction session, member accumulator, finalizer.
pub mod extender;
/// Host type system model: handles, declarations, type spaces.
pub mod host;
/// Instances of finalized types with checked member access.
pub mod instance;
/// Field and property declarations.
pub mod member;
/// Runtime value model.
pub mod value;

pub use annotation::AnnotationSpec;
pub use error::{ExtendError, Result};
pub use extender::{AnnotationArgs, TypeExtender};
pub use host::{TypeDecl, TypeHandle, TypeSpace, Visibility};
pub use instance::{FromValue, Instance, InstanceError};
pub use member::{MemberKind, MemberSpec};
pub use value::{Value, ValueKind};
