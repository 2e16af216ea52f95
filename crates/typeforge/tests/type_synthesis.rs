// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 typeforge contributors

//! End-to-end synthesis scenarios: build a type, finalize it, then
//! instantiate and introspect it like any other type.

use typeforge::{
    ExtendError, Instance, InstanceError, MemberKind, TypeDecl, TypeExtender, TypeHandle, Value,
    ValueKind, Visibility,
};

fn bool_type() -> TypeHandle {
    TypeHandle::primitive(ValueKind::Bool)
}

fn author_annotation() -> TypeHandle {
    TypeDecl::new("Author")
        .constructor(vec![])
        .constructor(vec![TypeHandle::primitive(ValueKind::Str)])
        .constructor(vec![
            TypeHandle::primitive(ValueKind::Str),
            TypeHandle::primitive(ValueKind::U32),
        ])
        .build()
}

#[test]
fn class_a_scenario() {
    // Builder named "Class A" over the root object type.
    let mut extender = TypeExtender::new("Class A").expect("construct");
    assert_eq!(extender.type_name(), "Class_A");
    assert_eq!(extender.base_type().name(), "Object");

    extender
        .add_property("IsAdded", bool_type(), false)
        .expect("writable property");
    extender
        .add_property("IsEnabled", bool_type(), true)
        .expect("read-only property");

    let ty = extender.fetch().expect("fetch");
    assert_eq!(ty.name(), "Class_A");

    let is_added = ty.member("IsAdded").expect("IsAdded");
    assert_eq!(is_added.kind(), MemberKind::Property);
    assert!(is_added.is_writable());
    assert_eq!(is_added.value_type(), &bool_type());

    let is_enabled = ty.member("IsEnabled").expect("IsEnabled");
    assert!(is_enabled.is_read_only());
    assert_eq!(is_enabled.value_type(), &bool_type());

    // The finalized type is a normal object: writable slots accept writes,
    // read-only slots reject them, both can be read.
    let mut obj = Instance::new(&ty).expect("instantiate");
    obj.set("IsAdded", true).expect("write IsAdded");
    assert!(obj.get::<bool>("IsAdded").expect("read IsAdded"));
    assert_eq!(
        obj.set("IsEnabled", true),
        Err(InstanceError::ReadOnlyMember("IsEnabled".into()))
    );
    assert!(!obj.get::<bool>("IsEnabled").expect("read IsEnabled"));
}

#[test]
fn sealed_base_never_yields_a_builder() {
    let sealed = TypeDecl::new("Locked").sealed().build();
    let err = TypeExtender::with_base("Derived", sealed).expect_err("sealed base");
    assert_eq!(err, ExtendError::InvalidBaseType { name: "Locked".into() });
}

#[test]
fn annotation_values_survive_to_introspection() {
    let mut extender = TypeExtender::new("Documented").expect("construct");
    extender
        .add_property_with_annotations(
            "Name",
            TypeHandle::primitive(ValueKind::Str),
            &[(
                author_annotation(),
                vec![Value::from("jane"), Value::from(3u32)],
            )],
            false,
        )
        .expect("annotated property");
    extender
        .add_type_annotation(author_annotation(), vec![Value::from("team")])
        .expect("type annotation");

    let ty = extender.fetch().expect("fetch");

    let member = ty.member("Name").expect("member");
    let annotation = &member.annotations()[0];
    assert_eq!(annotation.annotation_type().name(), "Author");
    assert_eq!(annotation.args()[0].as_str(), Some("jane"));
    assert_eq!(annotation.args()[1].as_u32(), Some(3));
    assert_eq!(annotation.constructor_params().len(), 2);

    assert_eq!(ty.annotations().len(), 1);
    assert_eq!(ty.annotations()[0].args()[0].as_str(), Some("team"));
}

#[test]
fn field_with_multiple_annotations() {
    let marker = TypeDecl::new("Deprecated").constructor(vec![]).build();

    let mut extender = TypeExtender::new("Tagged").expect("construct");
    extender
        .add_field_with_annotations(
            "Value",
            TypeHandle::primitive(ValueKind::I64),
            &[
                (author_annotation(), vec![Value::from("jane")]),
                (marker, vec![]),
            ],
        )
        .expect("field with two annotations");

    let ty = extender.fetch().expect("fetch");
    let member = ty.member("Value").expect("member");
    assert_eq!(member.annotations().len(), 2);
    assert_eq!(member.kind(), MemberKind::Field);
    assert!(member.is_writable());
}

#[test]
fn bulk_registration_yields_exactly_the_named_properties() {
    let mut extender = TypeExtender::new("Bulk").expect("construct");
    extender
        .add_properties(&["A", "B", "C"], bool_type())
        .expect("bulk add");

    let ty = extender.fetch().expect("fetch");
    assert_eq!(ty.members().len(), 3);

    let mut names: Vec<_> = ty.members().iter().map(|m| m.name().to_string()).collect();
    names.sort();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(ty.members().iter().all(|m| m.is_writable()));
    assert!(ty.members().iter().all(|m| m.value_type() == &bool_type()));
}

#[test]
fn reset_starts_over_under_the_same_identity() {
    let mut extender = TypeExtender::new("Phoenix").expect("construct");
    extender.add_field("First", bool_type()).expect("add");
    let first = extender.fetch().expect("fetch");

    assert!(matches!(
        extender.add_field("Second", bool_type()),
        Err(ExtendError::AlreadyFinalized { .. })
    ));

    extender.reset();
    extender.add_field("Second", bool_type()).expect("new session");
    let second = extender.fetch().expect("fetch again");

    assert_eq!(first.name(), second.name());
    assert_ne!(first, second);
    assert!(first.member("Second").is_none());
    assert!(second.member("First").is_none());
    assert!(second.member("Second").is_some());
}

#[test]
fn extending_a_synthesized_type() {
    let mut base_ext = TypeExtender::new("Animal").expect("construct");
    base_ext
        .add_property("Name", TypeHandle::primitive(ValueKind::Str), false)
        .expect("add");
    let animal = base_ext.fetch().expect("fetch");

    // A finalized type is itself extensible.
    let mut dog_ext = TypeExtender::with_base("Dog", animal.clone()).expect("construct");
    dog_ext
        .add_property("GoodBoy", bool_type(), false)
        .expect("add");
    let dog = dog_ext.fetch().expect("fetch");

    assert_eq!(dog.base(), Some(&animal));
    assert!(dog.member("Name").is_some());

    let mut rex = Instance::new(&dog).expect("instantiate");
    rex.set("Name", "Rex").expect("inherited property");
    rex.set("GoodBoy", true).expect("own property");
    assert_eq!(rex.get::<String>("Name").expect("get"), "Rex");
}

#[test]
fn visibility_gate_matches_host_rules() {
    for (decl, ok) in [
        (TypeDecl::new("P").build(), true),
        (
            TypeDecl::new("N").visibility(Visibility::NestedPublic).build(),
            true,
        ),
        (
            TypeDecl::new("H").visibility(Visibility::Private).build(),
            false,
        ),
        (TypeDecl::new("S").sealed().build(), false),
    ] {
        assert_eq!(TypeExtender::with_base("Derived", decl).is_ok(), ok);
    }
}

#[test]
fn type_space_houses_finalized_types() {
    let mut extender = TypeExtender::new("Housed").expect("construct");
    extender.add_field("X", bool_type()).expect("add");
    let ty = extender.fetch().expect("fetch");

    let space = extender.type_space().expect("space");
    assert_eq!(space.len(), 1);
    assert_eq!(space.lookup("Housed"), Some(ty));

    // A reset leaves the fetched handle and its space intact but detaches
    // the builder; the next session gets a fresh namespace.
    let old_space_name = space.name().to_string();
    extender.reset();
    extender.add_field("X", bool_type()).expect("add");
    extender.fetch().expect("fetch");
    let new_space = extender.type_space().expect("space");
    assert_ne!(new_space.name(), old_space_name);
}
