use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::ProjectDocument;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project files to check
    #[arg(required = true)]
    pub projects: Vec<PathBuf>,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let mut failures = 0;

    for project in &args.projects {
        let path = PathBuf::from(cwd).join(project);
        let checked = ProjectDocument::load_from_path(&path).and_then(|doc| {
            doc.validate()?;
            Ok(doc.canvas.components.len())
        });

        match checked {
            Ok(count) => println!(
                "  {} {} ({} components)",
                "✓".green(),
                path.display(),
                count
            ),
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "✗".red(), path.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} projects failed validation", failures, args.projects.len());
    }

    println!();
    println!("{}", "✅ All projects valid".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_broken_project_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        ProjectDocument::empty("ok")
            .save_to_path(dir.path().join("ok.json"), false)
            .unwrap();
        fs::write(
            dir.path().join("broken.json"),
            r#"{ "name": "broken", "canvas": { "components": { "byId": {}, "allIds": [], "rootIds": ["x"] } } }"#,
        )
        .unwrap();

        assert!(validate(
            ValidateArgs {
                projects: vec!["ok.json".into()]
            },
            &cwd
        )
        .is_ok());
        assert!(validate(
            ValidateArgs {
                projects: vec!["ok.json".into(), "broken.json".into()]
            },
            &cwd
        )
        .is_err());
    }
}
