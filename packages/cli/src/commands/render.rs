use super::project::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_renderer::{to_html, to_html_document, Renderer};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page id
    pub page: String,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit only the widget sections, without the document shell
    #[arg(long)]
    pub fragment: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;
    let session = project.session(&args.page)?;

    let ctx = project.config.page_context();
    let mut options = project.config.html_options();
    if args.compact {
        options.pretty = false;
    }

    let page = Renderer::new(&project.catalog).render_page(session.blocks().blocks(), &ctx);
    let html = if args.fragment {
        to_html(&page.nodes, &options)
    } else {
        to_html_document(&page, &ctx, &options)
    };

    for diagnostic in &page.diagnostics {
        eprintln!(
            "{} {} {}",
            "⚠️".yellow(),
            diagnostic.block_id.cyan(),
            diagnostic.message
        );
    }

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            info!(page = %args.page, widgets = page.nodes.len(), "Rendered page");
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}
