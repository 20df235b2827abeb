use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_catalog::{Catalog, FieldKind, FieldSchema};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Show fields and defaults of one variant
    pub tag: Option<String>,

    /// Print the default config as JSON
    #[arg(long, requires = "tag")]
    pub defaults: bool,
}

pub fn catalog(args: CatalogArgs, _cwd: &str) -> Result<()> {
    let catalog = Catalog::builtin();

    let Some(tag) = args.tag else {
        for (category, variants) in catalog.palette() {
            println!("{}", category.display_name().bright_blue().bold());
            for descriptor in variants {
                let tag = format!("{:<20}", descriptor.tag());
                println!("  {} {}", tag.bright_white(), descriptor.description.dimmed());
            }
        }
        return Ok(());
    };

    let descriptor = catalog.describe(&tag)?;
    if args.defaults {
        let config = (descriptor.default_config)();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!(
        "{} ({})",
        descriptor.display_name.bright_white().bold(),
        descriptor.category
    );
    println!("{}", descriptor.description.dimmed());
    println!();
    print_fields(descriptor.fields, 1);

    Ok(())
}

fn print_fields(fields: &[FieldSchema], depth: usize) {
    let pad = "  ".repeat(depth);
    for field in fields {
        let marker = if field.required { "" } else { "?" };
        let name = format!("{:<20}", format!("{}{}", field.name, marker));
        println!("{}{} {}", pad, name.cyan(), kind_label(&field.kind).dimmed());
        if let FieldKind::List { item_fields, .. } = field.kind {
            print_fields(item_fields, depth + 1);
        }
    }
}

fn kind_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text => "text".to_string(),
        FieldKind::LongText => "long text".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Toggle => "toggle".to_string(),
        FieldKind::Url => "url".to_string(),
        FieldKind::Image => "image".to_string(),
        FieldKind::Choice(options) => format!("one of {}", options.join(" | ")),
        FieldKind::Cta => "call to action".to_string(),
        FieldKind::List { keyed: true, .. } => "list (keyed)".to_string(),
        FieldKind::List { .. } => "list".to_string(),
        FieldKind::StringList => "list of text".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_label() {
        assert_eq!(kind_label(&FieldKind::Choice(&["left", "center"])), "one of left | center");
        assert_eq!(kind_label(&FieldKind::StringList), "list of text");
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let args = CatalogArgs {
            tag: Some("marquee".to_string()),
            defaults: false,
        };
        assert!(catalog(args, ".").is_err());
    }
}
