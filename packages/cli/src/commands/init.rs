use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::ProjectDocument;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project file to create
    pub file: PathBuf,

    /// Project name (defaults to the file stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Force overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);

    if path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let name = args.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    let config = Config::load(cwd)?;
    let document = ProjectDocument::empty(&name);
    document.save_to_path(&path, config.pretty)?;

    println!("  {} Created {}", "✓".green(), path.display());
    println!();
    println!("{}", format!("✅ Project \"{}\" initialized!", name).green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write a script of commands (JSON array)");
    println!("  2. Run: pagebuilder apply {} script.json", args.file.display());
    println!("  3. Run: pagebuilder inspect {}", args.file.display());

    Ok(())
}
