use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::{Editor, EditorConfig, ProjectDocument};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Project file to inspect
    pub project: PathBuf,

    /// Print the component tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.project);
    let document = ProjectDocument::load_from_path(&path)?;
    let editor = Editor::from_document(document, EditorConfig::default())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(editor.tree())?);
        return Ok(());
    }

    println!("📄 {}", editor.name().bright_white().bold());
    println!();

    let outline = render_outline(&editor);
    if outline.is_empty() {
        println!("   {}", "(no components)".dimmed());
    } else {
        for line in outline {
            println!("   {}", line);
        }
    }

    println!();
    println!("Pages:");
    let current = editor.pages().current_page_id();
    for page in editor.pages().pages() {
        let marker = if &page.id == current { "●" } else { "○" };
        println!("   {} {} {} ({})", marker, page.name, page.path.dimmed(), page.id);
    }

    let viewport = editor.viewport();
    println!();
    println!(
        "Viewport: zoom {:.2}, pan ({}, {})   Grid: {} px{}",
        viewport.zoom(),
        viewport.pan_x,
        viewport.pan_y,
        editor.grid().size(),
        if editor.grid().snap_to_grid { ", snapping" } else { "" }
    );

    Ok(())
}

/// Indented `type "name" (id)` lines, roots first, children nested
pub fn render_outline(editor: &Editor) -> Vec<String> {
    editor
        .outline()
        .into_iter()
        .filter_map(|(depth, id)| {
            let component = editor.component(id)?;
            let mut flags = String::new();
            if component.locked {
                flags.push_str(" [locked]");
            }
            if component.hidden {
                flags.push_str(" [hidden]");
            }
            Some(format!(
                "{}{} \"{}\" ({}){}",
                "  ".repeat(depth),
                component.component_type,
                component.name,
                id,
                flags
            ))
        })
        .collect()
}
