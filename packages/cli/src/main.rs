mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::*;
use config::Config;
use tracing_subscriber::EnvFilter;

/// Pagekit CLI - compose landing pages from catalog widgets
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagekit site
    Init(InitArgs),

    /// Show the widget palette or one variant's fields
    Catalog(CatalogArgs),

    /// Create an empty page
    New(NewArgs),

    /// List pages, or the widgets of one page
    List(ListArgs),

    /// Add a widget with its default config
    Insert(InsertArgs),

    /// Swap a widget with its neighbour
    Move(MoveArgs),

    /// Move a widget to a position
    Reorder(ReorderArgs),

    /// Delete a widget
    Remove(WidgetArgs),

    /// Copy a widget to the end of the page
    Duplicate(WidgetArgs),

    /// Show or hide a widget
    Toggle(WidgetArgs),

    /// Write one config field
    Set(SetArgs),

    /// Add, update, remove or move an item of a config list
    EditList(EditListArgs),

    /// Point a widget's call to action at a URL or another widget
    Cta(CtaArgs),

    /// Upload images into a widget's image list
    Upload(UploadArgs),

    /// Render a page to HTML
    Render(RenderArgs),
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, cwd: &str) -> anyhow::Result<()> {
    match command {
        Command::Init(args) => init(args, cwd),
        Command::Catalog(args) => catalog(args, cwd),
        Command::New(args) => new_page(args, cwd),
        Command::List(args) => list(args, cwd),
        Command::Insert(args) => insert(args, cwd),
        Command::Move(args) => move_widget(args, cwd),
        Command::Reorder(args) => reorder(args, cwd),
        Command::Remove(args) => remove(args, cwd),
        Command::Duplicate(args) => duplicate(args, cwd),
        Command::Toggle(args) => toggle(args, cwd),
        Command::Set(args) => set(args, cwd),
        Command::EditList(args) => edit_list(args, cwd),
        Command::Cta(args) => cta(args, cwd),
        Command::Upload(args) => upload(args, cwd),
        Command::Render(args) => render(args, cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            // A broken config is reported by the command itself
            init_logging(&Config::load(&cwd).unwrap_or_default());
            run(cli.command, &cwd)
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
