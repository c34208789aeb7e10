//! Undo/redo behaviour over sequences of operations
//!
//! This tests:
//! - Undo/redo as exact inverses of each operation
//! - Redo truncation after a new action
//! - Batched operations
//! - History limits

use pagebuilder_editor::{ComponentId, ComponentPatch, Editor, EditorConfig, NewComponent, Position};

fn editor_with_limit(history_limit: usize) -> Editor {
    Editor::with_config(
        "sequences",
        EditorConfig {
            id_seed: Some("s".into()),
            history_limit,
            ..Default::default()
        },
    )
}

fn editor() -> Editor {
    editor_with_limit(100)
}

fn add(ed: &mut Editor, name: &str, parent: Option<&ComponentId>) -> ComponentId {
    ed.add_component(NewComponent::new("container", name), parent)
        .unwrap()
}

#[test]
fn test_undo_twice_then_redo() {
    let mut ed = editor();
    let a = add(&mut ed, "A", None);
    let b = add(&mut ed, "B", None);
    let c = add(&mut ed, "C", None);

    assert!(ed.undo());
    assert!(ed.undo());
    assert_eq!(ed.tree().root_ids(), &[a.clone()]);
    assert_eq!(ed.tree().len(), 1);

    assert!(ed.redo());
    assert_eq!(ed.tree().root_ids(), &[a, b]);
    assert!(!ed.tree().contains(&c));
}

#[test]
fn test_each_operation_is_exactly_inverted() {
    let mut ed = editor();
    let a = add(&mut ed, "A", None);
    let b = add(&mut ed, "B", Some(&a));
    let c = add(&mut ed, "C", None);

    type Op = Box<dyn Fn(&mut Editor)>;
    let (a2, b2, c2) = (a.clone(), b.clone(), c.clone());
    let ops: Vec<(&str, Op)> = vec![
        (
            "update",
            Box::new(move |ed: &mut Editor| {
                ed.update_component(&a2, ComponentPatch::position(9.0, 9.0))
                    .unwrap();
            }) as Op,
        ),
        (
            "move",
            Box::new(move |ed: &mut Editor| {
                ed.move_component(&b2, Some(&c2), Position::new(1.0, 1.0))
                    .unwrap();
            }) as Op,
        ),
        (
            "delete",
            Box::new(move |ed: &mut Editor| {
                ed.delete_component(&a).unwrap();
            }) as Op,
        ),
        (
            "duplicate",
            Box::new(move |ed: &mut Editor| {
                ed.duplicate_component(&c).unwrap();
            }) as Op,
        ),
        (
            "add",
            Box::new(move |ed: &mut Editor| {
                ed.add_component(NewComponent::new("text", "D"), Some(&b))
                    .unwrap();
            }) as Op,
        ),
    ];

    for (name, op) in ops {
        let before = ed.snapshot();
        op(&mut ed);
        let after = ed.snapshot();
        assert_ne!(before, after, "{} changed nothing", name);

        assert!(ed.undo(), "{} was not undoable", name);
        assert_eq!(ed.snapshot(), before, "undo of {} is not exact", name);

        assert!(ed.redo(), "{} was not redoable", name);
        assert_eq!(ed.snapshot(), after, "redo of {} is not exact", name);
        ed.verify().unwrap();
    }
}

#[test]
fn test_new_action_truncates_redo() {
    let mut ed = editor();
    add(&mut ed, "A", None);
    add(&mut ed, "B", None);

    assert!(ed.undo());
    assert!(ed.can_redo());

    add(&mut ed, "C", None);
    assert!(!ed.can_redo());

    let before = ed.snapshot();
    assert!(!ed.redo());
    assert_eq!(ed.snapshot(), before);
}

#[test]
fn test_undo_restores_selection() {
    let mut ed = editor();
    let a = add(&mut ed, "A", None);
    let b = add(&mut ed, "B", None);
    ed.select_multiple(vec![a.clone(), b.clone()]);

    ed.delete_selection().unwrap();
    assert!(ed.selection().is_empty());

    assert!(ed.undo());
    assert_eq!(ed.selection().selected_ids(), &[a, b]);
}

#[test]
fn test_selection_changes_are_not_history_steps() {
    let mut ed = editor();
    let a = add(&mut ed, "A", None);
    let levels = ed.history().undo_levels();

    ed.clear_selection();
    ed.select_component(Some(a.clone()), false);
    ed.set_hovered_component(Some(a));
    ed.select_all();

    assert_eq!(ed.history().undo_levels(), levels);
}

#[test]
fn test_empty_history_is_noop() {
    let mut ed = editor();
    assert!(!ed.undo());
    assert!(!ed.redo());
    assert!(ed.tree().is_empty());
}

#[test]
fn test_batch_is_one_step() {
    let mut ed = editor();
    let page = add(&mut ed, "Page", None);

    ed.begin_batch("Build hero");
    let hero = add(&mut ed, "Hero", Some(&page));
    add(&mut ed, "Title", Some(&hero));
    add(&mut ed, "Subtitle", Some(&hero));
    ed.update_component(&hero, ComponentPatch::name("Hero banner"))
        .unwrap();
    ed.end_batch();

    assert_eq!(ed.tree().len(), 4);
    assert_eq!(ed.history().undo_description(), Some("Build hero"));

    assert!(ed.undo());
    assert_eq!(ed.tree().len(), 1);
    assert!(ed.tree().contains(&page));

    assert!(ed.redo());
    assert_eq!(ed.component(&hero).unwrap().name, "Hero banner");
}

#[test]
fn test_history_limit_drops_oldest() {
    let mut ed = editor_with_limit(3);
    for i in 0..5 {
        add(&mut ed, &format!("N{}", i), None);
    }
    assert_eq!(ed.history().undo_levels(), 3);

    while ed.undo() {}
    // The two oldest adds fell off the end of history
    assert_eq!(ed.tree().len(), 2);
}

#[test]
fn test_clear_history() {
    let mut ed = editor();
    add(&mut ed, "A", None);
    ed.undo();
    add(&mut ed, "B", None);
    ed.clear_history();
    assert!(!ed.can_undo());
    assert!(!ed.can_redo());
    assert_eq!(ed.tree().len(), 1);
}
