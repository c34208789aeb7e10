use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::{Command, CommandOutcome, Editor, EditorError, ProjectDocument};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Project file to edit
    pub project: PathBuf,

    /// JSON array of editor commands
    pub script: PathBuf,

    /// Write the result here instead of over the project
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Run the script without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// One line of the run report
#[derive(Debug)]
pub struct StepReport {
    pub op: &'static str,
    pub result: Result<CommandOutcome, EditorError>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = PathBuf::from(cwd).join(&args.project);
    let script_path = PathBuf::from(cwd).join(&args.script);

    let document = ProjectDocument::load_from_path(&project_path)
        .with_context(|| format!("Failed to open project {}", project_path.display()))?;
    let mut editor = Editor::from_document(document, config.editor.clone())?;

    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid command script {}", script_path.display()))?;

    println!("🛠  {} {}", "Applying".green().bold(), script_path.display());
    println!("   Project: {}", project_path.display());
    println!();

    let report = run_script(&mut editor, commands);
    let mut skipped = 0;
    for (i, step) in report.iter().enumerate() {
        match &step.result {
            Ok(outcome) => println!("  {} {:>3} {} → {}", "✓".green(), i + 1, step.op, outcome),
            Err(e) => {
                skipped += 1;
                println!("  {} {:>3} {} skipped: {}", "⚠".yellow(), i + 1, step.op, e);
            }
        }
    }

    println!();
    println!(
        "   {} commands, {} applied, {} skipped, {} components",
        report.len(),
        report.len() - skipped,
        skipped,
        editor.tree().len()
    );

    if args.dry_run {
        println!("   {}", "Dry run, nothing saved".dimmed());
        return Ok(());
    }

    let out = args
        .out
        .map(|out| PathBuf::from(cwd).join(out))
        .unwrap_or(project_path);
    editor.project_document().save_to_path(&out, config.pretty)?;
    println!("✨ {} {}", "Saved".green().bold(), out.display());

    Ok(())
}

/// Execute every command in order. Rejected commands are reported and the
/// run continues, since each rejection leaves the editor untouched.
pub fn run_script(editor: &mut Editor, commands: Vec<Command>) -> Vec<StepReport> {
    commands
        .into_iter()
        .map(|command| {
            let op = command.name();
            let result = editor.execute(command);
            debug!(op, ok = result.is_ok(), "Script step");
            StepReport { op, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_editor::EditorConfig;

    #[test]
    fn test_rejected_steps_do_not_stop_the_run() {
        let mut editor = Editor::with_config(
            "script",
            EditorConfig {
                id_seed: Some("s".into()),
                ..Default::default()
            },
        );
        let commands: Vec<Command> = serde_json::from_str(
            r#"[
                { "op": "addComponent", "component": { "type": "container", "name": "Hero" } },
                { "op": "deleteComponent", "id": "missing" },
                { "op": "paste" },
                { "op": "duplicateComponent", "id": "s-1" }
            ]"#,
        )
        .unwrap();

        let report = run_script(&mut editor, commands);
        assert_eq!(report.len(), 4);
        assert!(report[0].result.is_ok());
        assert!(report[1].result.is_err());
        assert!(matches!(report[2].result, Err(EditorError::EmptyClipboard)));
        assert_eq!(report[3].op, "duplicateComponent");
        assert_eq!(editor.tree().len(), 2);
    }

    #[test]
    fn test_apply_saves_to_out() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        ProjectDocument::empty("site")
            .save_to_path(dir.path().join("site.json"), true)
            .unwrap();
        fs::write(
            dir.path().join("script.json"),
            r#"[{ "op": "addComponent", "component": { "type": "text", "name": "Hello" } }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                project: "site.json".into(),
                script: "script.json".into(),
                out: Some("out.json".into()),
                dry_run: false,
            },
            &cwd,
        )
        .unwrap();

        let original = ProjectDocument::load_from_path(dir.path().join("site.json")).unwrap();
        let edited = ProjectDocument::load_from_path(dir.path().join("out.json")).unwrap();
        assert!(original.canvas.components.is_empty());
        assert_eq!(edited.canvas.components.len(), 1);
    }
}
