use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_editor::{JsonFileStore, PageDocument};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site name, used as the page title and author-bio fallback
    #[arg(short = 'n', long, default_value = "")]
    pub site_name: String,

    /// Site id namespacing lead-capture forms
    #[arg(short = 'i', long, default_value = "site")]
    pub site_id: String,

    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagekit site...".bright_blue().bold());

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        site_name: args.site_name,
        site_id: args.site_id,
        ..Config::default()
    };

    let pages_dir = config.get_pages_dir(cwd);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    // Seed an empty home page
    let mut store = JsonFileStore::new(&pages_dir);
    if !store.page_path("home")?.exists() {
        PageDocument::new("home").save(&mut store)?;
        println!("  {} Created {}/home.json", "✓".green(), args.pages_dir);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagekit catalog");
    println!("  2. Run: pagekit insert home hero");
    println!("  3. Run: pagekit render home -o dist/index.html");

    Ok(())
}
