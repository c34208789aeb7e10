use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagebuilder_editor::{ComponentId, Editor, EditorConfig, NewComponent};

/// A page of `sections` containers, each holding `per_section` leaves.
fn wide_page(sections: usize, per_section: usize) -> (Editor, Vec<ComponentId>) {
    let mut editor = Editor::with_config(
        "bench",
        EditorConfig {
            id_seed: Some("b".into()),
            history_limit: 0,
            ..Default::default()
        },
    );
    let mut roots = Vec::with_capacity(sections);
    for s in 0..sections {
        let section = editor
            .add_component(NewComponent::new("container", format!("Section {}", s)), None)
            .unwrap();
        for i in 0..per_section {
            editor
                .add_component(NewComponent::new("text", format!("Item {}", i)), Some(&section))
                .unwrap();
        }
        roots.push(section);
    }
    editor.clear_history();
    (editor, roots)
}

fn duplicate_wide_section(c: &mut Criterion) {
    let (editor, roots) = wide_page(20, 50);

    c.bench_function("duplicate_wide_section", |b| {
        b.iter_batched(
            || editor_clone(&editor),
            |mut ed| ed.duplicate_component(black_box(&roots[10])),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn delete_wide_section(c: &mut Criterion) {
    let (editor, roots) = wide_page(20, 50);

    c.bench_function("delete_wide_section", |b| {
        b.iter_batched(
            || editor_clone(&editor),
            |mut ed| ed.delete_component(black_box(&roots[10])),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn undo_redo_cycle(c: &mut Criterion) {
    let (mut editor, roots) = wide_page(20, 50);
    editor.duplicate_component(&roots[0]).unwrap();

    c.bench_function("undo_redo_cycle", |b| {
        b.iter(|| {
            editor.undo();
            editor.redo();
        })
    });
}

fn verify_tree(c: &mut Criterion) {
    let (editor, _) = wide_page(20, 50);

    c.bench_function("verify_tree", |b| b.iter(|| black_box(&editor).verify()));
}

/// Fresh editor holding the same document, for destructive benches
fn editor_clone(editor: &Editor) -> Editor {
    Editor::from_document(
        editor.project_document(),
        EditorConfig {
            id_seed: Some("b".into()),
            history_limit: 0,
            ..Default::default()
        },
    )
    .unwrap()
}

criterion_group!(
    benches,
    duplicate_wide_section,
    delete_wide_section,
    undo_redo_cycle,
    verify_tree
);
criterion_main!(benches);
