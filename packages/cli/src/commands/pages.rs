use super::project::Project;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagekit_editor::PageDocument;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page id (letters, digits, `-` and `_`)
    pub page: String,

    /// Replace an existing page with an empty one
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show the widgets of this page instead of listing pages
    pub page: Option<String>,
}

pub fn new_page(args: NewArgs, cwd: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;

    let path = project.store.page_path(&args.page)?;
    if path.exists() && !args.force {
        bail!("Page {} already exists (use --force to replace it)", args.page);
    }

    let mut document = PageDocument::new(args.page.as_str());
    document.save(&mut project.store)?;

    println!("{} Created {}", "✓".green(), path.display());
    Ok(())
}

pub fn list(args: ListArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;

    match args.page {
        None => {
            let pages = project.store.page_ids()?;
            if pages.is_empty() {
                println!("No pages in {}", project.store.dir().display());
            }
            for page in pages {
                println!("{}", page);
            }
        }
        Some(page) => {
            let session = project.session(&page)?;
            if session.blocks().is_empty() {
                println!("{} has no widgets", page.bright_white());
            }
            for block in session.blocks().blocks() {
                let tag = if project.catalog.contains(block.block_type()) {
                    block.block_type().normal()
                } else {
                    block.block_type().red()
                };
                let state = if block.enabled {
                    "".normal()
                } else {
                    " (disabled)".dimmed()
                };
                println!("{:>3}  {}  {}{}", block.position, block.id.cyan(), tag, state);
            }
        }
    }

    Ok(())
}
