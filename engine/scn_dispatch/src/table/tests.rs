use super::*;
use pretty_assertions::assert_eq;
use scn_types::TypeRegistry;

struct Shapes {
    types: TypeRegistry,
    shape: TypeId,
    circle: TypeId,
    square: TypeId,
    triangle: TypeId,
}

fn shapes() -> Shapes {
    let mut types = TypeRegistry::new();
    let shape = types.register_type("Shape", None).expect("Shape");
    let circle = types.register_type("Circle", Some(shape)).expect("Circle");
    let square = types.register_type("Square", Some(shape)).expect("Square");
    let triangle = types
        .register_type("Triangle", Some(shape))
        .expect("Triangle");
    Shapes {
        types,
        shape,
        circle,
        square,
        triangle,
    }
}

fn table(s: &Shapes) -> DispatchTable<&'static str> {
    DispatchTable::new(s.shape, None)
}

#[test]
fn new_table_is_empty_and_stale() {
    let s = shapes();
    let table = table(&s);

    assert!(table.is_empty());
    assert_eq!(table.revision(), 0);
    assert_eq!(table.generation(), None);
    assert!(table.needs_rebuild(&s.types, None));
    assert_eq!(table.get(s.shape), None);
}

#[test]
fn register_appends_and_invalidates() {
    let s = shapes();
    let mut table = table(&s);
    table.rebuild(&s.types, None);
    assert!(!table.needs_rebuild(&s.types, None));

    table
        .register(&s.types, s.circle, Behavior::Method("circle"))
        .expect("circle derives from shape");

    assert_eq!(
        table.registrations(),
        &[Registration {
            ty: s.circle,
            behavior: Behavior::Method("circle"),
        }]
    );
    assert_eq!(table.generation(), None);
    assert!(table.needs_rebuild(&s.types, None));
    // Nothing resolved until the rebuild.
    assert_eq!(table.get(s.circle), Some(&Behavior::Default));
}

#[test]
fn register_outside_root_is_invalid() {
    let mut s = shapes();
    let light = s.types.register_type("Light", None).expect("Light");
    let mut table = table(&s);

    let err = table
        .register(&s.types, light, Behavior::Method("light"))
        .expect_err("Light is not a Shape");
    assert_eq!(
        err,
        DispatchError::InvalidType {
            ty: light,
            root: s.shape,
        }
    );
    assert!(table.registrations().is_empty());
}

#[test]
fn rebuild_covers_every_root_descendant() {
    let s = shapes();
    let mut table = table(&s);
    table.rebuild(&s.types, None);

    assert_eq!(table.len(), 4);
    for ty in [s.shape, s.circle, s.square, s.triangle] {
        assert_eq!(table.get(ty), Some(&Behavior::Default));
    }
    assert_eq!(table.generation(), Some(4));
    assert_eq!(table.revision(), 1);
}

#[test]
fn registration_propagates_to_descendants() {
    let s = shapes();
    let mut table = table(&s);
    table
        .register(&s.types, s.shape, Behavior::Method("generic"))
        .expect("register");
    table
        .register(&s.types, s.circle, Behavior::Method("circle"))
        .expect("register");
    table.rebuild(&s.types, None);

    assert_eq!(table.get(s.shape), Some(&Behavior::Method("generic")));
    assert_eq!(table.get(s.circle), Some(&Behavior::Method("circle")));
    assert_eq!(table.get(s.square), Some(&Behavior::Method("generic")));
    assert_eq!(table.get(s.triangle), Some(&Behavior::Method("generic")));
}

#[test]
fn later_ancestor_registration_overrides_earlier_specific_one() {
    let s = shapes();
    let mut table = table(&s);
    table
        .register(&s.types, s.shape, Behavior::Method("a"))
        .expect("register");
    table
        .register(&s.types, s.circle, Behavior::Method("b"))
        .expect("register");
    table
        .register(&s.types, s.shape, Behavior::Method("c"))
        .expect("register");
    table.rebuild(&s.types, None);

    assert_eq!(table.get(s.circle), Some(&Behavior::Method("c")));
    assert_eq!(table.get(s.square), Some(&Behavior::Method("c")));
}

#[test]
fn duplicate_registration_newest_wins() {
    let s = shapes();
    let mut table = table(&s);
    table
        .register(&s.types, s.square, Behavior::Method("old"))
        .expect("register");
    table
        .register(&s.types, s.square, Behavior::Method("new"))
        .expect("register");
    table.rebuild(&s.types, None);

    assert_eq!(table.registrations().len(), 2);
    assert_eq!(table.get(s.square), Some(&Behavior::Method("new")));
}

#[test]
fn rebuild_is_idempotent() {
    let s = shapes();
    let mut table = table(&s);
    table
        .register(&s.types, s.circle, Behavior::Method("circle"))
        .expect("register");
    table.rebuild(&s.types, None);
    let first = table.entries().to_vec();

    table.rebuild(&s.types, None);
    assert_eq!(table.entries(), first.as_slice());
}

#[test]
fn parent_fills_only_default_slots() {
    let s = shapes();
    let mut parent = table(&s);
    parent
        .register(&s.types, s.shape, Behavior::Method("generic"))
        .expect("register");
    parent
        .register(&s.types, s.circle, Behavior::Method("circle"))
        .expect("register");
    parent.rebuild(&s.types, None);

    let mut child = table(&s);
    child
        .register(&s.types, s.square, Behavior::Method("fast square"))
        .expect("register");
    let inherited = child.rebuild(&s.types, Some(&parent));

    assert_eq!(inherited, 3);
    assert_eq!(child.get(s.shape), Some(&Behavior::Method("generic")));
    assert_eq!(child.get(s.circle), Some(&Behavior::Method("circle")));
    assert_eq!(child.get(s.square), Some(&Behavior::Method("fast square")));
    assert_eq!(child.get(s.triangle), Some(&Behavior::Method("generic")));
}

#[test]
fn parent_rebuild_makes_child_stale() {
    let s = shapes();
    let mut parent = table(&s);
    parent.rebuild(&s.types, None);
    let mut child = table(&s);
    child.rebuild(&s.types, Some(&parent));
    assert!(!child.needs_rebuild(&s.types, Some(&parent)));

    parent
        .register(&s.types, s.triangle, Behavior::Method("triangle"))
        .expect("register");
    parent.rebuild(&s.types, None);

    assert!(child.needs_rebuild(&s.types, Some(&parent)));
    child.rebuild(&s.types, Some(&parent));
    assert_eq!(child.get(s.triangle), Some(&Behavior::Method("triangle")));
}

#[test]
fn shorter_parent_leaves_tail_default() {
    let mut s = shapes();
    let mut parent = table(&s);
    parent
        .register(&s.types, s.shape, Behavior::Method("generic"))
        .expect("register");
    parent.rebuild(&s.types, None);

    // The child sees a type the parent's last rebuild did not.
    let hexagon = s
        .types
        .register_type("Hexagon", Some(s.shape))
        .expect("Hexagon");
    let mut child = table(&s);
    child.rebuild(&s.types, Some(&parent));

    assert_eq!(parent.len(), 4);
    assert_eq!(child.len(), 5);
    assert_eq!(child.get(hexagon), Some(&Behavior::Default));
    assert_eq!(child.get(s.circle), Some(&Behavior::Method("generic")));
}

#[test]
fn narrower_child_spans_parent_slots() {
    let mut s = shapes();
    let node = s.types.register_type("Node", None).expect("Node");
    let light = s.types.register_type("Light", Some(node)).expect("Light");
    let mut parent = DispatchTable::new(node, None);
    parent
        .register(&s.types, node, Behavior::Method("generic"))
        .expect("register");
    parent.rebuild(&s.types, None);

    // Rooted at Shape, whose ids all sit below Node and Light.
    let mut child = table(&s);
    child.rebuild(&s.types, Some(&parent));

    assert_eq!(child.len(), parent.len());
    assert!(!child.is_covered(node));
    assert!(!child.is_covered(light));
    assert_eq!(
        child.resolve(node, CoveragePolicy::Lenient),
        Ok(Behavior::Method("generic"))
    );
    assert_eq!(
        child.resolve(light, CoveragePolicy::Lenient),
        Ok(Behavior::Method("generic"))
    );
    assert_eq!(
        child.resolve(light, CoveragePolicy::Strict),
        Err(DispatchError::UnsupportedType {
            ty: light,
            root: s.shape,
        })
    );
}

#[test]
fn registry_growth_makes_table_stale() {
    let mut s = shapes();
    let mut table = table(&s);
    table.rebuild(&s.types, None);

    s.types
        .register_type("Pentagon", Some(s.square))
        .expect("Pentagon");
    assert!(table.needs_rebuild(&s.types, None));
}

#[test]
fn unrelated_types_are_not_covered() {
    let mut s = shapes();
    let light = s.types.register_type("Light", None).expect("Light");
    let cone = s.types.register_type("Cone", Some(s.shape)).expect("Cone");
    let mut table = table(&s);
    table.rebuild(&s.types, None);

    // Light sits below Cone in id space, so it has a slot but no coverage.
    assert_eq!(table.len(), cone.index() + 1);
    assert!(!table.is_covered(light));
    assert_eq!(table.get(light), None);
    assert!(table.is_covered(cone));
}

#[test]
fn resolve_applies_policy() {
    let mut s = shapes();
    let light = s.types.register_type("Light", None).expect("Light");
    let mut table = table(&s);
    table
        .register(&s.types, s.shape, Behavior::Method("generic"))
        .expect("register");
    table.rebuild(&s.types, None);

    assert_eq!(
        table.resolve(s.circle, CoveragePolicy::Strict),
        Ok(Behavior::Method("generic"))
    );
    assert_eq!(
        table.resolve(light, CoveragePolicy::Strict),
        Err(DispatchError::UnsupportedType {
            ty: light,
            root: s.shape,
        })
    );
    assert_eq!(
        table.resolve(light, CoveragePolicy::Lenient),
        Ok(Behavior::Default)
    );
    assert_eq!(
        table.resolve(TypeId::BAD, CoveragePolicy::Lenient),
        Ok(Behavior::Default)
    );
}
